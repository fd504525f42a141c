//! Validation-focused tests for configuration

#[cfg(test)]
mod validation_tests {
    use crate::bubble::BubbleType;
    use crate::config::StudioConfig;
    use crate::output::{VariantsCount, VariantsPolicy};
    use crate::Error;

    #[test]
    fn test_empty_general_starter_rejected() {
        let mut config = StudioConfig::default();
        config.starter.general.clear();

        let result = config.validate();
        assert!(matches!(result, Err(Error::Validation(_))));
        if let Err(e) = result {
            assert!(e.to_string().contains("starter.general"));
        }
    }

    #[test]
    fn test_duplicate_starter_type_rejected() {
        let mut config = StudioConfig::default();
        config.starter.scene_type = vec![BubbleType::Mood, BubbleType::Style, BubbleType::Mood];

        let result = config.validate();
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("mood"));
        }
    }

    #[test]
    fn test_blank_scene_label_rejected() {
        let mut config = StudioConfig::default();
        config.starter.scene_label = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_domain_variants_rejected_by_default() {
        let mut config = StudioConfig::default();
        config.output.variants_count = 3;
        assert!(matches!(config.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_clamp_policy_snaps_variants_down() {
        let mut config = StudioConfig::default();
        config.output.variants_count = 3;
        config.output.variants_policy = VariantsPolicy::Clamp;

        assert!(config.validate().is_ok());
        let settings = config.output.output_settings();
        assert_eq!(
            settings.map(|s| s.variants_count).ok(),
            VariantsCount::new(2).ok()
        );
    }
}
