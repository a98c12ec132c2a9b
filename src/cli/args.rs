//! Command-line argument value types

use clap::ValueEnum;

use crate::domain::model::{Container, VideoCodec};

/// `--video-codec` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VideoCodecArg {
    #[value(name = "h.265")]
    H265,
    #[value(name = "h.264")]
    H264,
    #[value(name = "vp9")]
    Vp9,
}

impl From<VideoCodecArg> for VideoCodec {
    fn from(arg: VideoCodecArg) -> Self {
        match arg {
            VideoCodecArg::H265 => VideoCodec::H265,
            VideoCodecArg::H264 => VideoCodec::H264,
            VideoCodecArg::Vp9 => VideoCodec::Vp9,
        }
    }
}

/// `--container` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ContainerArg {
    Mp4,
    Mkv,
}

impl From<ContainerArg> for Container {
    fn from(arg: ContainerArg) -> Self {
        match arg {
            ContainerArg::Mp4 => Container::Mp4,
            ContainerArg::Mkv => Container::Mkv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_names_match_codec_labels() {
        for arg in VideoCodecArg::value_variants() {
            let name = arg.to_possible_value().unwrap().get_name().to_string();
            assert_eq!(name, VideoCodec::from(*arg).label());
        }
    }

    #[test]
    fn test_container_mapping() {
        assert_eq!(Container::from(ContainerArg::Mkv), Container::Mkv);
        assert_eq!(Container::from(ContainerArg::Mp4).extension(), "mp4");
    }
}
