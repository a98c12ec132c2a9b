// Domain rules - Format classification policy

use crate::domain::errors::*;
use crate::domain::model::*;

/// Decides whether a probed file is skipped, remuxed or transcoded
pub struct FormatClassifier;

impl FormatClassifier {
    /// Classify a probed file against the target.
    ///
    /// Returns `DomainError::NoVideoStream` when the file has no video stream;
    /// such files are not candidates at all, which is different from `Skip`.
    pub fn classify(probe: &MediaProbe, target: &TargetSpec) -> Result<Decision, DomainError> {
        let video = probe
            .primary_video_stream()
            .ok_or(DomainError::NoVideoStream)?;

        let codecs_match = Self::video_matches(video, target) && Self::audio_matches(probe, target);

        if !codecs_match {
            return Ok(Decision::Transcode);
        }

        if Self::container_matches(probe, target.container) {
            Ok(Decision::Skip)
        } else {
            Ok(Decision::Remux)
        }
    }

    /// The probe's format name list must contain the canonical alias list as
    /// a contiguous run (equality included).
    pub fn container_matches(probe: &MediaProbe, container: Container) -> bool {
        let aliases: Vec<&str> = probe.format_aliases().collect();
        let wanted: Vec<&str> = container.format_alias().split(',').collect();

        aliases.windows(wanted.len()).any(|window| window == wanted.as_slice())
    }

    pub fn video_matches(video: &Stream, target: &TargetSpec) -> bool {
        video.codec_name == target.video_codec.decoded_name()
    }

    /// A missing audio stream never matches
    pub fn audio_matches(probe: &MediaProbe, target: &TargetSpec) -> bool {
        let (codec, channels) = probe
            .primary_audio_stream()
            .map(|a| (a.codec_name.as_str(), a.channels))
            .unwrap_or(("", 0));

        codec == target.audio_codec() && channels == target.audio_channels()
    }
}
