use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{error::DomainError, pool::NotePool};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PoolFormat {
    #[default]
    Json,
    Yaml,
}

impl fmt::Display for PoolFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolFormat::Json => f.write_str("json"),
            PoolFormat::Yaml => f.write_str("yaml"),
        }
    }
}

impl FromStr for PoolFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(PoolFormat::Json),
            "yaml" | "yml" => Ok(PoolFormat::Yaml),
            other => Err(DomainError::validation(format!(
                "unsupported pool format `{other}`"
            ))),
        }
    }
}

pub trait PoolExporter {
    fn export(&self, pool: &NotePool, format: PoolFormat) -> Result<Vec<u8>, DomainError>;
}

pub struct SerdeExporter;

impl PoolExporter for SerdeExporter {
    fn export(&self, pool: &NotePool, format: PoolFormat) -> Result<Vec<u8>, DomainError> {
        match format {
            PoolFormat::Json => serde_json::to_vec_pretty(pool)
                .map_err(|err| DomainError::Serialization(err.to_string())),
            PoolFormat::Yaml => serde_yaml::to_string(pool)
                .map(String::into_bytes)
                .map_err(|err| DomainError::Serialization(err.to_string())),
        }
    }
}

/// Parses a pool file and runs the same validation as the built-in table.
pub fn load_pool(bytes: &[u8], format: PoolFormat) -> Result<NotePool, DomainError> {
    match format {
        PoolFormat::Json => serde_json::from_slice(bytes)
            .map_err(|err| DomainError::Serialization(err.to_string())),
        PoolFormat::Yaml => serde_yaml::from_slice(bytes)
            .map_err(|err| DomainError::Serialization(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_json() {
        let bytes = SerdeExporter
            .export(NotePool::builtin(), PoolFormat::Json)
            .unwrap();
        let output = String::from_utf8(bytes).unwrap();
        assert!(output.contains("\"id\": \"treble-C4\""));
        assert!(output.contains("\"clef\": \"bass\""));
    }

    #[test]
    fn yaml_export_loads_back() {
        let bytes = SerdeExporter
            .export(NotePool::builtin(), PoolFormat::Yaml)
            .unwrap();
        let pool = load_pool(&bytes, PoolFormat::Yaml).unwrap();
        assert_eq!(&pool, NotePool::builtin());
    }

    #[test]
    fn load_rejects_invalid_records() {
        let json = br#"[{"id":"bass-B2","clef":"bass","pitch_key":"b/2","solfege_index":6,
            "letter_name":"B","number_label":"6","piano_label":"B2"}]"#;
        let err = load_pool(json, PoolFormat::Json).unwrap_err();
        assert!(matches!(err, DomainError::Serialization(_)));
        assert!(err.to_string().contains("number label"));
    }

    #[test]
    fn format_parses_common_spellings() {
        assert_eq!("yml".parse::<PoolFormat>().unwrap(), PoolFormat::Yaml);
        assert_eq!("JSON".parse::<PoolFormat>().unwrap(), PoolFormat::Json);
        assert!("xml".parse::<PoolFormat>().is_err());
    }
}
