//! バンドル設定のユニットテスト

use super::*;
use crate::storage::StorageKind;
use serial_test::serial;
use tempfile::TempDir;

const SAMPLE_CONFIG: &str = r#"
data_definitions:
  config_location:
    import_definitions:
      write_target:
        type: yaml
        options:
          directory: /var/lib/datadef/import_definitions
  import_definitions:
    products-from-csv:
      provider: csv
      class: Product
"#;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.yaml");
    fs::write(&path, content).unwrap();
    path
}

mod load_tests {
    use super::*;

    #[test]
    fn parses_storage_descriptor() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, SAMPLE_CONFIG);

        let config = BundleConfig::load_from(&path).unwrap();

        let target = config.storage().descriptor("import_definitions").unwrap();
        assert_eq!(target.kind, StorageKind::Yaml);
        assert_eq!(
            target.options.directory.as_deref(),
            Some(Path::new("/var/lib/datadef/import_definitions"))
        );
    }

    #[test]
    fn parses_static_definitions() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, SAMPLE_CONFIG);

        let config = BundleConfig::load_from(&path).unwrap();

        let record = config.container().get("products-from-csv").unwrap();
        assert_eq!(record.provider.as_deref(), Some("csv"));
        assert_eq!(record.class.as_deref(), Some("Product"));
    }

    #[test]
    fn missing_file_is_configuration_error() {
        let err = BundleConfig::load_from(Path::new("/nonexistent/config.yaml")).unwrap_err();

        assert!(matches!(err, DatadefError::Configuration(_)));
    }

    #[test]
    fn empty_bundle_section_yields_no_descriptor() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "data_definitions: {}\n");

        let config = BundleConfig::load_from(&path).unwrap();

        assert!(config.storage().descriptor("import_definitions").is_none());
        assert!(config.container().definitions().is_empty());
    }
}

mod config_path_tests {
    use super::*;

    #[test]
    #[serial]
    fn env_var_overrides_default_path() {
        std::env::set_var(CONFIG_ENV, "/etc/datadef/custom.yaml");

        let path = config_path().unwrap();

        assert_eq!(path, PathBuf::from("/etc/datadef/custom.yaml"));
        std::env::remove_var(CONFIG_ENV);
    }

    #[test]
    #[serial]
    fn defaults_to_home_directory() {
        std::env::remove_var(CONFIG_ENV);
        std::env::set_var("HOME", "/home/tester");

        let path = config_path().unwrap();

        assert_eq!(path, PathBuf::from("/home/tester/.datadef/config.yaml"));
    }
}
