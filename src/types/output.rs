use crate::parser::error::InventoryError;
use crate::types::key_values::KeyValuesMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Attributes,
    Text,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            "attributes" => Ok(OutputFormat::Attributes),
            "text" => Ok(OutputFormat::Text),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

impl OutputFormat {
    /// Render collected inventory data in this format.
    pub fn render(self, data: &KeyValuesMap) -> Result<String, InventoryError> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?),
            OutputFormat::Attributes => Ok(serde_json::to_string_pretty(&data.to_attributes())?),
            OutputFormat::Text => {
                let mut out = String::new();
                for (key, values) in data {
                    for value in values {
                        out.push_str(key);
                        out.push('=');
                        out.push_str(value);
                        out.push('\n');
                    }
                }
                Ok(out)
            }
        }
    }
}

/// Full result of a collection pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryReport {
    pub metadata: ReportMetadata,
    pub generators: Vec<GeneratorOutcome>,
    pub data: KeyValuesMap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generators_dir: String,
    pub collected_at: chrono::DateTime<chrono::Utc>,
    pub checksum: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorOutcome {
    pub path: String,
    pub status: GeneratorStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GeneratorStatus {
    Succeeded,
    Failed { reason: String },
    Skipped { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> KeyValuesMap {
        [("os", "linux"), ("ip", "10.0.0.1"), ("ip", "10.0.0.2")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
    }

    #[test]
    fn test_output_format_from_str_case_insensitive() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("Yaml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!(
            "attributes".parse::<OutputFormat>().unwrap(),
            OutputFormat::Attributes
        );
        assert_eq!("TeXt".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
    }

    #[test]
    fn test_output_format_from_str_invalid() {
        let result = "binary".parse::<OutputFormat>();
        assert!(result
            .unwrap_err()
            .contains("Unknown output format: binary"));
    }

    #[test]
    fn test_output_format_serialization() {
        let serialized = serde_json::to_string(&OutputFormat::Attributes).unwrap();
        assert_eq!(serialized, r#""attributes""#);
    }

    #[test]
    fn test_render_text_lines() {
        let text = OutputFormat::Text.render(&sample()).unwrap();
        assert_eq!(text, "ip=10.0.0.1\nip=10.0.0.2\nos=linux\n");
    }

    #[test]
    fn test_render_json_object() {
        let json = OutputFormat::Json.render(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ip"][1], "10.0.0.2");
        assert_eq!(value["os"][0], "linux");
    }

    #[test]
    fn test_render_yaml() {
        let yaml = OutputFormat::Yaml.render(&sample()).unwrap();
        assert!(yaml.contains("os:"));
        assert!(yaml.contains("- linux"));
    }

    #[test]
    fn test_render_attributes() {
        let json = OutputFormat::Attributes.render(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "ip");
        assert_eq!(value[1]["value"], "linux");
    }

    #[test]
    fn test_generator_status_serialization() {
        let outcome = GeneratorOutcome {
            path: "/inv/mender-inventory-os".to_string(),
            status: GeneratorStatus::Skipped {
                reason: "not executable".to_string(),
            },
        };
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["status"]["status"], "skipped");
        assert_eq!(value["status"]["reason"], "not executable");
    }
}
