//! Condenses ffmpeg `-progress` key=value blocks into single status lines

use std::collections::HashMap;
use std::time::Duration;

use crate::utils::Utils;

/// Accumulates one `-progress` block at a time.
///
/// ffmpeg writes a dozen `key=value` lines per update and terminates each
/// block with `progress=continue` (or `progress=end` for the last one).
#[derive(Debug, Default)]
pub struct ProgressTracker {
    total_seconds: Option<f64>,
    fields: HashMap<String, String>,
}

impl ProgressTracker {
    /// Create a tracker; `total_seconds` enables percentage reporting
    pub fn new(total_seconds: Option<f64>) -> Self {
        Self {
            total_seconds: total_seconds.filter(|t| t.is_finite() && *t > 0.0),
            fields: HashMap::new(),
        }
    }

    /// Feed one line; returns a status line when a block completes
    pub fn push(&mut self, line: &str) -> Option<String> {
        let (key, value) = line.trim().split_once('=')?;
        let (key, value) = (key.trim(), value.trim());

        if key == "progress" {
            let summary = self.summary();
            self.fields.clear();
            return Some(summary);
        }

        self.fields.insert(key.to_string(), value.to_string());
        None
    }

    /// Encoded output position in seconds, if reported
    pub fn out_time_seconds(&self) -> Option<f64> {
        // out_time_ms is in microseconds as well, despite the name
        ["out_time_us", "out_time_ms"]
            .iter()
            .filter_map(|k| self.fields.get(*k))
            .find_map(|v| v.parse::<i64>().ok())
            .filter(|us| *us >= 0)
            .map(|us| us as f64 / 1_000_000.0)
    }

    fn summary(&self) -> String {
        let mut parts = Vec::new();

        if let Some(frame) = self.fields.get("frame") {
            parts.push(format!("frame={}", frame));
        }

        let position = self.out_time_seconds();
        if let Some(seconds) = position {
            parts.push(format!(
                "time={}",
                Utils::format_duration(Duration::from_secs_f64(seconds))
            ));
        }

        if let Some(speed) = self.fields.get("speed").filter(|s| s.as_str() != "N/A") {
            parts.push(format!("speed={}", speed));
        }

        if let (Some(position), Some(total)) = (position, self.total_seconds) {
            parts.push(format!("{:.1}%", Utils::calculate_progress(position, total)));
        }

        if parts.is_empty() {
            "progress".to_string()
        } else {
            parts.join(" ")
        }
    }
}
