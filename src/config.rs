//! Entity configuration loading.
//!
//! The built-in institutions/students tables are always present. An optional
//! JSON file (named by `SURVEYD_ENTITIES`) may replace them or add entities.
//! Every fault is reported here, at load time, so the reconciler never sees
//! a malformed manifest.

use crate::entity::{EntityConfig, EntityRegistry, ManifestEntry};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENTITIES_ENV: &str = "SURVEYD_ENTITIES";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid entity config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("entity {entity:?} has an empty idField")]
    MissingIdField { entity: String },

    #[error("entity {entity:?} manifest entry {index} has an empty key")]
    BlankKey { entity: String, index: usize },

    #[error("entity {entity:?} manifest entry {key:?} has an empty label")]
    BlankLabel { entity: String, key: String },

    #[error("entity {entity:?} manifest entry {key:?} label must start with a space")]
    UnspacedLabel { entity: String, key: String },

    #[error("entity {entity:?} lists key {key:?} more than once")]
    DuplicateKey { entity: String, key: String },

    #[error("entity {0:?} is defined more than once")]
    DuplicateEntity(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EntitiesFile {
    entities: Vec<EntityDef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct EntityDef {
    name: String,
    id_field: String,
    manifest: Vec<ManifestEntry>,
}

pub fn check_entity(name: &str, config: &EntityConfig) -> Result<(), ConfigError> {
    if config.id_field.trim().is_empty() {
        return Err(ConfigError::MissingIdField {
            entity: name.to_string(),
        });
    }
    let mut seen: HashSet<&str> = HashSet::new();
    for (index, entry) in config.manifest.iter().enumerate() {
        if entry.key.trim().is_empty() {
            return Err(ConfigError::BlankKey {
                entity: name.to_string(),
                index,
            });
        }
        if entry.label.trim().is_empty() {
            return Err(ConfigError::BlankLabel {
                entity: name.to_string(),
                key: entry.key.clone(),
            });
        }
        // Labels are concatenated as-is into the missing-fields message.
        if !entry.label.starts_with(' ') {
            return Err(ConfigError::UnspacedLabel {
                entity: name.to_string(),
                key: entry.key.clone(),
            });
        }
        if !seen.insert(entry.key.as_str()) {
            return Err(ConfigError::DuplicateKey {
                entity: name.to_string(),
                key: entry.key.clone(),
            });
        }
    }
    Ok(())
}

/// Built-ins overlaid with the entities in `raw`.
pub fn parse_entities(raw: &str) -> Result<EntityRegistry, ConfigError> {
    let file: EntitiesFile = serde_json::from_str(raw)?;
    let mut registry = EntityRegistry::builtin();
    let mut defined: HashSet<String> = HashSet::new();

    for def in file.entities {
        if !defined.insert(def.name.clone()) {
            return Err(ConfigError::DuplicateEntity(def.name));
        }
        let config = EntityConfig {
            id_field: def.id_field,
            manifest: def.manifest,
        };
        check_entity(&def.name, &config)?;
        registry.insert(def.name, config);
    }
    Ok(registry)
}

pub fn load_entities_file(path: &Path) -> Result<EntityRegistry, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_entities(&raw)
}

/// Registry for the sidecar: the file named by `SURVEYD_ENTITIES` when set,
/// otherwise the built-ins.
pub fn load_registry() -> Result<EntityRegistry, ConfigError> {
    match std::env::var_os(ENTITIES_ENV) {
        Some(p) if !p.is_empty() => {
            let path = PathBuf::from(p);
            tracing::info!(path = %path.display(), "loading entity config");
            load_entities_file(&path)
        }
        _ => Ok(EntityRegistry::builtin()),
    }
}
