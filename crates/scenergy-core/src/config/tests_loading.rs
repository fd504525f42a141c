//! Loading-focused tests for configuration
//!
//! File parsing, path resolution and environment overrides.

#[cfg(test)]
mod loading_tests {
    use std::collections::HashMap;
    use std::io::Write;

    use serial_test::serial;

    use crate::bubble::BubbleType;
    use crate::config::{load_config, load_toml_file, project_config_path, StudioConfig};
    use crate::output::{AspectRatio, Quality, VariantsPolicy};
    use crate::{Error, Result};

    fn write_config(contents: &str) -> Result<(tempfile::TempDir, std::path::PathBuf)> {
        let temp_dir = tempfile::tempdir()
            .map_err(|e| Error::io_error(format!("Failed to create temp dir: {e}")))?;
        let path = temp_dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path)
            .map_err(|e| Error::io_error(format!("Failed to create test file: {e}")))?;
        file.write_all(contents.as_bytes())
            .map_err(|e| Error::io_error(format!("Failed to write test file: {e}")))?;
        Ok((temp_dir, path))
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_partial_file_overrides_named_keys_only() -> Result<()> {
        let (_dir, path) = write_config(
            r#"
            [output]
            quality = "4k"
            variants_policy = "clamp"
            "#,
        )?;
        let config = load_toml_file(&path)?;
        assert_eq!(config.output.quality, Quality::FourK);
        assert_eq!(config.output.variants_policy, VariantsPolicy::Clamp);
        assert_eq!(config.output.aspect_ratio, AspectRatio::Square);
        assert_eq!(config.starter, StudioConfig::default().starter);
        Ok(())
    }

    #[test]
    fn test_starter_lists_parse_kebab_case() -> Result<()> {
        let (_dir, path) = write_config(
            r#"
            [starter]
            scene_type = ["camera-angle", "color-palette"]
            "#,
        )?;
        let config = load_toml_file(&path)?;
        assert_eq!(
            config.starter.scene_type,
            vec![BubbleType::CameraAngle, BubbleType::ColorPalette]
        );
        Ok(())
    }

    #[test]
    fn test_malformed_toml_returns_parse_error() -> Result<()> {
        let (_dir, path) = write_config("[output\nquality = ")?;
        let result = load_toml_file(&path);
        assert!(matches!(result, Err(Error::Parse(_))));
        Ok(())
    }

    #[test]
    fn test_unknown_aspect_ratio_in_file_fails() -> Result<()> {
        let (_dir, path) = write_config("[output]\naspect_ratio = \"5:4\"\n")?;
        assert!(load_toml_file(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_directory_path_is_io_error() -> Result<()> {
        let temp_dir = tempfile::tempdir()
            .map_err(|e| Error::io_error(format!("Failed to create temp dir: {e}")))?;
        let result = load_toml_file(temp_dir.path());
        assert!(matches!(result, Err(Error::Io(_))));
        Ok(())
    }

    #[test]
    #[serial]
    fn test_project_config_path() {
        let result = project_config_path();
        assert!(result.is_ok());
        let path = result.unwrap_or_default();
        assert!(path.ends_with(".scenergy/config.toml"));
    }

    #[test]
    fn test_env_overrides() -> Result<()> {
        let config = StudioConfig::default().apply_env_with(env(&[
            ("SCENERGY_ASPECT_RATIO", "16:9"),
            ("SCENERGY_QUALITY", "1k"),
            ("SCENERGY_VARIANTS_COUNT", "4"),
            ("SCENERGY_GENERAL_STARTER", "style, reference"),
            ("SCENERGY_SCENE_LABEL", "Room"),
        ]))?;
        assert_eq!(config.output.aspect_ratio, AspectRatio::Widescreen);
        assert_eq!(config.output.quality, Quality::OneK);
        assert_eq!(config.output.variants_count, 4);
        assert_eq!(
            config.starter.general,
            vec![BubbleType::Style, BubbleType::Reference]
        );
        assert_eq!(config.starter.scene_label, "Room");
        Ok(())
    }

    #[test]
    fn test_default_valued_layer_cannot_undo_lower_layer_but_env_can() -> Result<()> {
        let mut global = StudioConfig::default();
        global.output.quality = Quality::FourK;
        let mut project = StudioConfig::default();
        project.output.quality = Quality::TwoK;

        let merged = global.merge(project);
        assert_eq!(merged.output.quality, Quality::FourK);

        let config = merged.apply_env_with(env(&[("SCENERGY_QUALITY", "2k")]))?;
        assert_eq!(config.output.quality, Quality::TwoK);
        Ok(())
    }

    #[test]
    fn test_env_rejects_unknown_values() {
        let bad_quality =
            StudioConfig::default().apply_env_with(env(&[("SCENERGY_QUALITY", "8k")]));
        assert!(matches!(bad_quality, Err(Error::InvalidConfig(_))));

        let bad_type = StudioConfig::default()
            .apply_env_with(env(&[("SCENERGY_SCENE_TYPE_STARTER", "style,texture")]));
        assert!(matches!(bad_type, Err(Error::InvalidConfig(_))));

        let blank_label =
            StudioConfig::default().apply_env_with(env(&[("SCENERGY_SCENE_LABEL", "  ")]));
        assert!(blank_label.is_err());
    }

    #[test]
    fn test_env_without_vars_is_identity() -> Result<()> {
        let config = StudioConfig::default().apply_env_with(env(&[]))?;
        assert_eq!(config, StudioConfig::default());
        Ok(())
    }

    #[test]
    #[serial]
    fn test_load_config_reads_project_file() -> Result<()> {
        let temp_dir = tempfile::tempdir()
            .map_err(|e| Error::io_error(format!("Failed to create temp dir: {e}")))?;
        let config_dir = temp_dir.path().join(".scenergy");
        std::fs::create_dir_all(&config_dir)?;
        std::fs::write(
            config_dir.join("config.toml"),
            "[output]\nquality = \"1k\"\n\n[starter]\nscene_label = \"Room\"\n",
        )?;

        let previous = std::env::current_dir()?;
        std::env::set_current_dir(temp_dir.path())?;
        let loaded = load_config();
        std::env::set_current_dir(previous)?;

        let config = loaded?;
        assert_eq!(config.output.quality, Quality::OneK);
        assert_eq!(config.starter.scene_label, "Room");
        Ok(())
    }

    #[test]
    #[serial]
    fn test_load_config_rejects_invalid_project_file() -> Result<()> {
        let temp_dir = tempfile::tempdir()
            .map_err(|e| Error::io_error(format!("Failed to create temp dir: {e}")))?;
        let config_dir = temp_dir.path().join(".scenergy");
        std::fs::create_dir_all(&config_dir)?;
        std::fs::write(config_dir.join("config.toml"), "[starter]\ngeneral = []\n")?;

        let previous = std::env::current_dir()?;
        std::env::set_current_dir(temp_dir.path())?;
        let loaded = load_config();
        std::env::set_current_dir(previous)?;

        assert!(matches!(loaded, Err(Error::Validation(_))));
        Ok(())
    }
}
