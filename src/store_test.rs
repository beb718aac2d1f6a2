//! DefinitionStore のユニットテスト

use super::*;
use crate::config::BundleConfig;
use crate::definition::ImportMapping;
use crate::storage::mock::MockBackend;
use serde_yaml::Value;
use std::sync::Arc;
use tempfile::TempDir;

fn mock_store() -> (Arc<MockBackend>, DefinitionStore) {
    let backend = Arc::new(MockBackend::new());
    let store = DefinitionStore::with_backend(Box::new(backend.clone()));
    (backend, store)
}

fn sample_definition(name: &str) -> ImportDefinition {
    let mut definition = ImportDefinition::new(name);
    definition.provider = Some("csv".to_string());
    definition.class = Some("Product".to_string());
    definition.object_path = Some("/products".to_string());
    definition.skip_new_objects = true;
    definition.mapping = vec![ImportMapping {
        from_column: Some("sku".to_string()),
        to_column: Some("articleNumber".to_string()),
        primary_identifier: true,
        ..Default::default()
    }];
    definition
}

fn static_record(provider: &str) -> DefinitionRecord {
    DefinitionRecord {
        provider: Some(provider.to_string()),
        ..Default::default()
    }
}

mod save_tests {
    use super::*;

    #[test]
    fn first_save_sets_both_dates() {
        let (_, store) = mock_store();
        let mut definition = sample_definition("products");

        store.save(&mut definition).unwrap();

        assert!(definition.creation_date().is_some());
        assert_eq!(definition.creation_date(), definition.modification_date());
    }

    #[test]
    fn second_save_keeps_creation_date() {
        let (_, store) = mock_store();
        let mut definition = sample_definition("products");
        definition.set_creation_date(1_000);
        definition.set_modification_date(1_000);

        store.save(&mut definition).unwrap();

        assert_eq!(definition.creation_date(), Some(1_000));
        assert!(definition.modification_date().unwrap() > 1_000);
    }

    #[test]
    fn persisted_bag_contains_only_allow_listed_fields() {
        let (backend, store) = mock_store();
        let mut definition = sample_definition("products");
        definition.set_writeable(false);

        store.save(&mut definition).unwrap();

        let bag = backend.stored_bag("products").unwrap();
        assert_eq!(bag.get("provider").and_then(Value::as_str), Some("csv"));
        assert!(bag.get("writeable").is_none());
    }

    #[test]
    fn empty_mapping_key_is_absent() {
        let (backend, store) = mock_store();
        let mut definition = sample_definition("products");
        definition.mapping.clear();

        store.save(&mut definition).unwrap();

        let bag = backend.stored_bag("products").unwrap();
        assert!(bag.get("mapping").is_none());
    }
}

mod load_tests {
    use super::*;

    #[test]
    fn round_trips_allow_listed_fields() {
        let (_, store) = mock_store();
        let mut definition = sample_definition("products");
        store.save(&mut definition).unwrap();

        let loaded = store.load("products").unwrap();

        assert_eq!(record::project(&loaded), record::project(&definition));
        assert!(loaded.writeable());
        assert_eq!(loaded.mapping.len(), 1);
        assert_eq!(loaded.mapping[0].from_column.as_deref(), Some("sku"));
    }

    #[test]
    fn missing_name_is_not_found() {
        let (_, store) = mock_store();

        let err = store.load("missing-id").unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().contains("missing-id"));
    }

    #[test]
    fn explicit_name_wins_over_stored_id() {
        let (backend, store) = mock_store();
        let bag = serde_yaml::from_str("provider: csv\n").unwrap();
        backend.insert_with_id("products", "renamed", bag);

        let loaded = store.load("products").unwrap();

        assert_eq!(loaded.name(), "products");
    }

    #[test]
    fn load_stored_surfaces_backend_id() {
        let (backend, store) = mock_store();
        let bag = serde_yaml::from_str("provider: csv\n").unwrap();
        backend.insert_with_id("products", "renamed", bag);

        let loaded = store.load_stored("products").unwrap();

        assert_eq!(loaded.name(), "renamed");
    }
}

mod static_definition_tests {
    use super::*;

    fn store_with_static() -> (Arc<MockBackend>, DefinitionStore) {
        let (backend, store) = mock_store();
        let mut statics = BTreeMap::new();
        statics.insert("declared".to_string(), static_record("csv"));
        (backend, store.with_static_definitions(statics))
    }

    #[test]
    fn falls_back_to_static_definition() {
        let (_, store) = store_with_static();

        let loaded = store.load("declared").unwrap();

        assert_eq!(loaded.name(), "declared");
        assert_eq!(loaded.provider.as_deref(), Some("csv"));
        assert!(!loaded.writeable());
    }

    #[test]
    fn persisted_definition_shadows_static() {
        let (_, store) = store_with_static();
        let mut definition = sample_definition("declared");
        definition.provider = Some("sql".to_string());
        store.save(&mut definition).unwrap();

        let loaded = store.load("declared").unwrap();

        assert_eq!(loaded.provider.as_deref(), Some("sql"));
        assert!(loaded.writeable());
    }

    #[test]
    fn names_merges_persisted_and_static() {
        let (_, store) = store_with_static();
        let mut definition = sample_definition("products");
        store.save(&mut definition).unwrap();

        assert_eq!(store.names().unwrap(), vec!["declared", "products"]);
    }

    #[test]
    fn all_loads_every_definition() {
        let (_, store) = store_with_static();
        let mut definition = sample_definition("products");
        store.save(&mut definition).unwrap();

        let definitions = store.all().unwrap();

        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].name(), "declared");
        assert!(!definitions[0].writeable());
        assert!(definitions[1].writeable());
    }
}

mod delete_tests {
    use super::*;

    #[test]
    fn delete_removes_record() {
        let (backend, store) = mock_store();
        let mut definition = sample_definition("products");
        store.save(&mut definition).unwrap();

        store.delete("products").unwrap();

        assert!(!backend.contains("products"));
    }

    #[test]
    fn delete_of_unknown_name_is_ok() {
        let (_, store) = mock_store();

        store.delete("missing").unwrap();
    }
}

mod configure_tests {
    use super::*;
    use crate::config::StorageConfig;

    #[test]
    fn missing_config_key_is_fatal() {
        let storage_config = StorageConfig::default();
        let container_config = crate::config::ContainerConfig::default();

        let err = DefinitionStore::configure(&storage_config, &container_config).unwrap_err();

        assert!(matches!(err, DatadefError::Configuration(_)));
        assert!(err.to_string().contains("import_definitions"));
    }

    #[test]
    fn configure_builds_store_from_bundle_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_yaml = format!(
            "data_definitions:\n  config_location:\n    import_definitions:\n      write_target:\n        type: yaml\n        options:\n          directory: {}\n  import_definitions:\n    declared:\n      provider: csv\n",
            temp_dir.path().join("defs").display()
        );
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, config_yaml).unwrap();
        let config = BundleConfig::load_from(&config_path).unwrap();

        let store = DefinitionStore::configure(config.storage(), config.container()).unwrap();

        let mut definition = sample_definition("products");
        store.save(&mut definition).unwrap();
        assert_eq!(store.names().unwrap(), vec!["declared", "products"]);
        assert!(temp_dir.path().join("defs").join("products.yaml").exists());
    }
}

mod exists_tests {
    use super::*;

    #[test]
    fn exists_checks_backend_and_static() {
        let (_, store) = mock_store();
        let mut statics = BTreeMap::new();
        statics.insert("declared".to_string(), static_record("csv"));
        let store = store.with_static_definitions(statics);

        let mut definition = sample_definition("products");
        store.save(&mut definition).unwrap();

        assert!(store.exists("products").unwrap());
        assert!(store.exists("declared").unwrap());
        assert!(!store.exists("missing").unwrap());
    }
}
