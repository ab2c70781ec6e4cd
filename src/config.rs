use crate::annotation::{
    DEFAULT_ALGORITHM, DEFAULT_NOTE, DEFAULT_TRAINING_STEPS, ORIGINAL_PLANNED_STEPS,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub global: Global,
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub annotation: Annotation,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Global {
    pub print_summary: bool,
}
impl Default for Global {
    fn default() -> Self {
        Self {
            print_summary: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Paths {
    pub summary: String,
    pub metadata: String,
}
impl Default for Paths {
    fn default() -> Self {
        Self {
            summary: "results/compare/summary.json".into(),
            metadata: "results/DQN/train_meta.json".into(),
        }
    }
}

/// Policy for the injected training annotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotation {
    pub algorithm: String,
    /// Top-level summary key. Empty means `<algorithm>_training`.
    pub key: String,
    pub default_training_steps: u64,
    pub original_planned_steps: u64,
    pub note: String,
}
impl Default for Annotation {
    fn default() -> Self {
        Self {
            algorithm: DEFAULT_ALGORITHM.into(),
            key: "".into(),
            default_training_steps: DEFAULT_TRAINING_STEPS,
            original_planned_steps: ORIGINAL_PLANNED_STEPS,
            note: DEFAULT_NOTE.into(),
        }
    }
}
impl Annotation {
    pub fn target_key(&self) -> String {
        if self.key.is_empty() {
            format!("{}_training", self.algorithm)
        } else {
            self.key.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    pub trailing_newline: bool,
}
impl Default for Output {
    fn default() -> Self {
        Self {
            trailing_newline: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: false,
            file_path: "".into(),
        }
    }
}
