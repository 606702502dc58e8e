use crate::utils::error::{CmsError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// 初始內容：每個模型一個區塊，依檔案順序建立
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedContent {
    pub models: Vec<SeedModel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedModel {
    /// Model API id, e.g. `HeroSection`
    pub name: String,
    /// Printed after the model is seeded (e.g. images to upload by hand)
    pub note: Option<String>,
    #[serde(default)]
    pub entries: Vec<BTreeMap<String, SeedValue>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeedValue {
    Integer(i64),
    Text(String),
    List(Vec<String>),
}

impl SeedContent {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CmsError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let seed: SeedContent = toml::from_str(content)?;
        seed.validate()?;
        Ok(seed)
    }

    pub fn entry_count(&self) -> usize {
        self.models.iter().map(|m| m.entries.len()).sum()
    }
}

impl Validate for SeedContent {
    fn validate(&self) -> Result<()> {
        for model in &self.models {
            if model.name.trim().is_empty() {
                return Err(CmsError::InvalidConfigValueError {
                    field: "models.name".to_string(),
                    value: model.name.clone(),
                    reason: "Model name cannot be empty".to_string(),
                });
            }
            if let Some(field) = model
                .entries
                .iter()
                .flat_map(|entry| entry.keys())
                .find(|key| key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric()))
            {
                return Err(CmsError::InvalidConfigValueError {
                    field: format!("{}.entries", model.name),
                    value: field.clone(),
                    reason: "Field names must be alphanumeric API ids".to_string(),
                });
            }
        }
        Ok(())
    }
}
