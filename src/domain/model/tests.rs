// Unit tests for domain models

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use crate::domain::errors::DomainError;
    use crate::domain::model::*;

    #[test]
    fn test_video_codec_labels() {
        assert_eq!(VideoCodec::H265.label(), "h.265");
        assert_eq!(VideoCodec::H264.to_string(), "h.264");
        assert_eq!(VideoCodec::Vp9.label(), "vp9");
    }

    #[test]
    fn test_decoded_names() {
        assert_eq!(VideoCodec::H265.decoded_name(), "hevc");
        assert_eq!(VideoCodec::H264.decoded_name(), "h264");
        assert_eq!(VideoCodec::Vp9.decoded_name(), "vp9");
    }

    #[test]
    fn test_encoder_selection() {
        let hw = VideoCodec::H265.select_encoder(true);
        assert_eq!(hw.name, "hevc_videotoolbox");
        assert!(hw.hardware);

        let sw = VideoCodec::H265.select_encoder(false);
        assert_eq!(sw.name, "libx265");
        assert!(!sw.hardware);

        // No hardware encoder exists for VP9, availability is irrelevant
        let vp9 = VideoCodec::Vp9.select_encoder(true);
        assert_eq!(vp9.name, "libvpx-vp9");
        assert!(!vp9.hardware);
    }

    #[test]
    fn test_container_extensions_and_aliases() {
        assert_eq!(Container::Mp4.extension(), "mp4");
        assert_eq!(Container::Mkv.to_string(), "mkv");

        assert_eq!(Container::Mp4.format_alias(), "mov,mp4,m4a,3gp,3g2,mj2");
        assert_eq!(Container::Mkv.format_alias(), "matroska,webm");
    }

    #[test]
    fn test_media_probe_primary_streams() {
        let probe = MediaProbe::new(
            "matroska,webm",
            12.5,
            vec![
                Stream::audio("opus", 6),
                Stream::video("vp9"),
                Stream::video("mjpeg"),
                Stream::audio("aac", 2),
            ],
        );

        assert_eq!(probe.primary_video_stream().unwrap().codec_name, "vp9");
        assert_eq!(probe.primary_audio_stream().unwrap().codec_name, "opus");
        assert_eq!(
            probe.format_aliases().collect::<Vec<_>>(),
            vec!["matroska", "webm"]
        );
        assert_eq!(probe.known_duration(), Some(12.5));
    }

    #[test]
    fn test_unknown_duration() {
        let probe = MediaProbe::new("avi", 0.0, vec![]);
        assert_eq!(probe.known_duration(), None);
    }

    #[test]
    fn test_transition_plan_replace() {
        let plan = TransitionPlan::new(
            Path::new("/videos/show/episode.mkv"),
            Container::Mp4,
            Action::ReEncoded,
            false,
        )
        .unwrap();

        assert_eq!(plan.temp, PathBuf::from("/videos/show/episode.temp.mp4"));
        assert_eq!(plan.final_path, PathBuf::from("/videos/show/episode.mp4"));
        assert!(plan.replaces_original());
    }

    #[test]
    fn test_transition_plan_in_place() {
        let plan = TransitionPlan::new(
            Path::new("/videos/clip.mp4"),
            Container::Mp4,
            Action::ReEncoded,
            false,
        )
        .unwrap();

        assert_eq!(plan.final_path, plan.input);
        assert!(!plan.replaces_original());
    }

    #[test]
    fn test_transition_plan_keep_original() {
        let remux = TransitionPlan::new(
            Path::new("/videos/clip.mkv"),
            Container::Mp4,
            Action::Remuxed,
            true,
        )
        .unwrap();
        assert_eq!(remux.final_path, PathBuf::from("/videos/clip_remuxed.mp4"));
        assert!(!remux.replaces_original());

        let encode = TransitionPlan::new(
            Path::new("/videos/clip.mp4"),
            Container::Mkv,
            Action::ReEncoded,
            true,
        )
        .unwrap();
        assert_eq!(encode.temp, PathBuf::from("/videos/clip.temp.mkv"));
        assert_eq!(
            encode.final_path,
            PathBuf::from("/videos/clip_re-encoded.mkv")
        );
    }

    #[test]
    fn test_transition_plan_rejects_empty_name() {
        assert!(TransitionPlan::new(Path::new("/"), Container::Mp4, Action::Remuxed, false).is_err());
    }

    #[test]
    fn test_decision_actions() {
        assert_eq!(Decision::Skip.action(), None);
        assert_eq!(Decision::Remux.action(), Some(Action::Remuxed));
        assert_eq!(Decision::Transcode.action(), Some(Action::ReEncoded));
    }

    #[test]
    fn test_operation_status() {
        assert!(OperationStatus::from_code(0).success());
        assert!(!OperationStatus::from_code(1).success());
        assert!(!OperationStatus { code: None }.success());
    }

    #[test]
    fn test_run_report_tally() {
        let mut report = RunReport::default();
        report.record(&FileOutcome::Promoted {
            action: Action::ReEncoded,
            destination: PathBuf::from("a.mp4"),
        });
        report.record(&FileOutcome::Promoted {
            action: Action::Remuxed,
            destination: PathBuf::from("b.mp4"),
        });
        report.record(&FileOutcome::Skipped);
        report.record(&FileOutcome::ProbeFailed);
        report.record(&FileOutcome::Failed(DomainError::ToolNotFound(
            "ffmpeg".to_string(),
        )));

        assert_eq!(report.transcoded, 1);
        assert_eq!(report.remuxed, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.probe_failed, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.total(), 5);
    }
}
