use crate::config::Style;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub grow: GrowSettings,
    #[serde(default)]
    pub export: ExportSettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct GrowSettings {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub style: Option<Style>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportSettings {
    pub directory: Option<PathBuf>,  // Where timestamped saves land
}

impl Settings {
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Missing file means defaults; a broken one is logged and ignored.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed settings");
                Self::default()
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read settings");
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("termbonsai")
            .join("config.toml")
    }
}
