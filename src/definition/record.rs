//! Persisted shape of an import definition.
//!
//! `DefinitionRecord` is the typed on-disk schema: its field set IS the
//! allow-list. Projection and hydration are explicit typed conversions,
//! so transient runtime state on the model can never leak into storage.

use super::{ImportDefinition, ImportMapping};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Nested-path namespace of the persisted document.
pub const SETTINGS_SCOPE: &str = "data_definitions";
/// Entity category key inside the namespace.
pub const CONFIG_KEY: &str = "import_definitions";

/// Allow-listed field bag, as written to storage.
///
/// Scalar fields are copied verbatim (absent values serialize as null,
/// booleans always serialize). Two fields are shape-normalized instead:
/// `mapping` becomes a list of flat key/value bags and is omitted entirely
/// when empty, and the provider `configuration` bag is omitted when absent.
/// Dates are integer epoch seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<Mapping>,
    #[serde(default)]
    pub creation_date: Option<i64>,
    #[serde(default)]
    pub modification_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<Vec<Value>>,
    #[serde(default)]
    pub object_path: Option<String>,
    #[serde(default)]
    pub cleaner: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub rename_existing_objects: bool,
    #[serde(default)]
    pub relocate_existing_objects: bool,
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub runner: Option<String>,
    #[serde(default)]
    pub create_version: bool,
    #[serde(default)]
    pub stop_on_exception: bool,
    #[serde(default)]
    pub omit_mandatory_check: bool,
    #[serde(default)]
    pub failure_notification_document: Option<i64>,
    #[serde(default)]
    pub success_notification_document: Option<i64>,
    #[serde(default)]
    pub skip_existing_objects: bool,
    #[serde(default)]
    pub skip_new_objects: bool,
    #[serde(default)]
    pub force_load_object: bool,
    #[serde(default)]
    pub loader: Option<String>,
    #[serde(default)]
    pub fetcher: Option<String>,
}

/// Projects the in-memory model onto the allow-list.
pub fn project(definition: &ImportDefinition) -> DefinitionRecord {
    let mapping = if definition.mapping.is_empty() {
        None
    } else {
        Some(
            definition
                .mapping
                .iter()
                .map(|map| Value::Mapping(map.to_bag()))
                .collect(),
        )
    };

    let configuration = match &definition.configuration {
        Some(bag) if !bag.is_empty() => Some(bag.clone()),
        _ => None,
    };

    DefinitionRecord {
        name: Some(definition.name().to_string()),
        provider: definition.provider.clone(),
        class: definition.class.clone(),
        configuration,
        creation_date: definition.creation_date(),
        modification_date: definition.modification_date(),
        mapping,
        object_path: definition.object_path.clone(),
        cleaner: definition.cleaner.clone(),
        key: definition.key.clone(),
        rename_existing_objects: definition.rename_existing_objects,
        relocate_existing_objects: definition.relocate_existing_objects,
        filter: definition.filter.clone(),
        runner: definition.runner.clone(),
        create_version: definition.create_version,
        stop_on_exception: definition.stop_on_exception,
        omit_mandatory_check: definition.omit_mandatory_check,
        failure_notification_document: definition.failure_notification_document,
        success_notification_document: definition.success_notification_document,
        skip_existing_objects: definition.skip_existing_objects,
        skip_new_objects: definition.skip_new_objects,
        force_load_object: definition.force_load_object,
        loader: definition.loader.clone(),
        fetcher: definition.fetcher.clone(),
    }
}

/// Rebuilds the typed model from a persisted record.
///
/// `identity` becomes the result's name regardless of the record's own
/// `name` field; the caller decides whether it is the requested name or
/// the backend-assigned id. Mapping entries that are not bag-shaped are
/// skipped, not errored.
pub fn hydrate(record: &DefinitionRecord, identity: &str) -> ImportDefinition {
    let mut definition = ImportDefinition::new(identity);

    definition.provider = record.provider.clone();
    definition.class = record.class.clone();
    definition.configuration = record.configuration.clone();
    if let Some(ts) = record.creation_date {
        definition.set_creation_date(ts);
    }
    if let Some(ts) = record.modification_date {
        definition.set_modification_date(ts);
    }
    definition.mapping = record
        .mapping
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter_map(|entry| match entry {
            Value::Mapping(bag) => Some(ImportMapping::from_bag(bag)),
            _ => None,
        })
        .collect();
    definition.object_path = record.object_path.clone();
    definition.cleaner = record.cleaner.clone();
    definition.key = record.key.clone();
    definition.rename_existing_objects = record.rename_existing_objects;
    definition.relocate_existing_objects = record.relocate_existing_objects;
    definition.filter = record.filter.clone();
    definition.runner = record.runner.clone();
    definition.create_version = record.create_version;
    definition.stop_on_exception = record.stop_on_exception;
    definition.omit_mandatory_check = record.omit_mandatory_check;
    definition.failure_notification_document = record.failure_notification_document;
    definition.success_notification_document = record.success_notification_document;
    definition.skip_existing_objects = record.skip_existing_objects;
    definition.skip_new_objects = record.skip_new_objects;
    definition.force_load_object = record.force_load_object;
    definition.loader = record.loader.clone();
    definition.fetcher = record.fetcher.clone();

    definition
}

/// Parses a raw field bag into a typed record.
pub fn from_bag(bag: &Mapping) -> Result<DefinitionRecord> {
    Ok(serde_yaml::from_value(Value::Mapping(bag.clone()))?)
}

/// Serializes a record into a raw field bag.
pub fn to_bag(record: &DefinitionRecord) -> Result<Mapping> {
    match serde_yaml::to_value(record)? {
        Value::Mapping(bag) => Ok(bag),
        _ => Ok(Mapping::new()),
    }
}

/// Wraps a projected bag into the nested-path document
/// `data_definitions -> import_definitions -> <name> -> <bag>`.
pub fn wrap(name: &str, record: &DefinitionRecord) -> Result<Value> {
    let bag = to_bag(record)?;

    let mut by_name = Mapping::new();
    by_name.insert(Value::String(name.to_string()), Value::Mapping(bag));

    let mut category = Mapping::new();
    category.insert(
        Value::String(CONFIG_KEY.to_string()),
        Value::Mapping(by_name),
    );

    let mut document = Mapping::new();
    document.insert(
        Value::String(SETTINGS_SCOPE.to_string()),
        Value::Mapping(category),
    );

    Ok(Value::Mapping(document))
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
