//! Default-value tests for configuration

#[cfg(test)]
mod defaults_tests {
    use crate::bubble::BubbleType;
    use crate::config::StudioConfig;
    use crate::output::{AspectRatio, Quality, VariantsCount, VariantsPolicy};

    #[test]
    fn test_default_general_starter() {
        let config = StudioConfig::default();
        assert_eq!(
            config.starter.general,
            vec![BubbleType::Style, BubbleType::Lighting, BubbleType::Mood]
        );
    }

    #[test]
    fn test_default_scene_type_starter_excludes_label() {
        let config = StudioConfig::default();
        assert_eq!(config.starter.scene_type.len(), 3);
        assert!(!config.starter.scene_type.contains(&BubbleType::Custom));
        assert_eq!(config.starter.scene_label, "Scene type");
    }

    #[test]
    fn test_default_output() {
        let config = StudioConfig::default();
        assert_eq!(config.output.aspect_ratio, AspectRatio::Square);
        assert_eq!(config.output.quality, Quality::TwoK);
        assert_eq!(config.output.variants_count, VariantsCount::ONE.get());
        assert_eq!(config.output.variants_policy, VariantsPolicy::Reject);
    }

    #[test]
    fn test_defaults_validate() {
        assert!(StudioConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_toml_equals_defaults() {
        let parsed: Result<StudioConfig, _> = toml::from_str("");
        assert_eq!(parsed.ok(), Some(StudioConfig::default()));
    }

    #[test]
    fn test_merge_keeps_lower_layer_when_upper_is_default() {
        let mut global = StudioConfig::default();
        global.output.quality = Quality::FourK;
        global.starter.scene_label = "Room".to_string();

        let merged = global.merge(StudioConfig::default());
        assert_eq!(merged.output.quality, Quality::FourK);
        assert_eq!(merged.starter.scene_label, "Room");
    }

    #[test]
    fn test_merge_upper_layer_wins() {
        let mut global = StudioConfig::default();
        global.output.aspect_ratio = AspectRatio::Portrait;
        let mut project = StudioConfig::default();
        project.output.aspect_ratio = AspectRatio::Widescreen;
        project.starter.general = vec![BubbleType::ColorPalette];

        let merged = global.merge(project);
        assert_eq!(merged.output.aspect_ratio, AspectRatio::Widescreen);
        assert_eq!(merged.starter.general, vec![BubbleType::ColorPalette]);
    }
}
