//! Common utilities and helpers

use std::time::Duration;

pub mod logging;
pub mod path;

/// Utility functions for VidCompress
pub struct Utils;

impl Utils {
    /// Format duration for display
    pub fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;
        let milliseconds = duration.subsec_millis();

        if hours > 0 {
            format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, milliseconds)
        } else {
            format!("{:02}:{:02}.{:03}", minutes, seconds, milliseconds)
        }
    }

    /// Calculate progress percentage, capped at 100
    pub fn calculate_progress(current: f64, total: f64) -> f64 {
        if total <= 0.0 {
            0.0
        } else {
            (current / total * 100.0).clamp(0.0, 100.0)
        }
    }
}
