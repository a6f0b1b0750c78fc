use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const INSTITUTIONS: &str = "institutions";
pub const STUDENTS: &str = "students";

/// Required `additional_data` keys for institutions, with the column label
/// shown when one is left unset. Labels carry their own leading space.
const INSTITUTIONS_MANIFEST: &[(&str, &str)] = &[
    ("has_internet_connection", " Internet"),
    ("has_electricity", " Electricity"),
    ("has_telephone", " Telephone"),
];

const STUDENTS_MANIFEST: &[(&str, &str)] = &[
    ("type_of_device", " Type of Device"),
    ("type_of_device_at_home", " Type of Device at Home"),
    ("internet_at_home", " Internet at Home"),
    ("internet_device", " Internet Device"),
    ("connection_type", " Connection Type"),
    ("electricity_at_home", " Electricity at Home"),
    ("tv_at_home", " TV at Home"),
    ("satellite_tv_at_home", " Satellite TV at Home"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityConfig {
    pub id_field: String,
    pub manifest: Vec<ManifestEntry>,
}

impl EntityConfig {
    fn from_table(id_field: &str, table: &[(&str, &str)]) -> Self {
        Self {
            id_field: id_field.to_string(),
            manifest: table
                .iter()
                .map(|(key, label)| ManifestEntry {
                    key: key.to_string(),
                    label: label.to_string(),
                })
                .collect(),
        }
    }

    pub fn institutions() -> Self {
        Self::from_table("id", INSTITUTIONS_MANIFEST)
    }

    pub fn students() -> Self {
        Self::from_table("student_id", STUDENTS_MANIFEST)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.manifest.iter().map(|e| e.key.as_str())
    }
}

/// Entity configurations by name. Built once at startup and read-only after.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entities: BTreeMap<String, EntityConfig>,
}

impl EntityRegistry {
    pub fn builtin() -> Self {
        let mut reg = Self::default();
        reg.insert(INSTITUTIONS, EntityConfig::institutions());
        reg.insert(STUDENTS, EntityConfig::students());
        reg
    }

    pub fn insert(&mut self, name: impl Into<String>, config: EntityConfig) {
        self.entities.insert(name.into(), config);
    }

    pub fn get(&self, name: &str) -> Option<&EntityConfig> {
        self.entities.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EntityConfig)> {
        self.entities.iter().map(|(k, v)| (k.as_str(), v))
    }
}
