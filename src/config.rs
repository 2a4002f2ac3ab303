use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::export::{ExportOptions, Quoting};
use crate::data::view::PAGE_SIZE;

/// Runtime settings. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Rows per table page.
    pub page_size: usize,
    /// Single ASCII character separating exported values.
    pub delimiter: char,
    pub quoting: Quoting,
    /// Plant shown first and used for asset fallback; the first plant when unset.
    pub default_plant: Option<String>,
    /// Directory holding `plant N/` asset folders, or a catalog manifest file.
    pub asset_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            delimiter: ',',
            quoting: Quoting::None,
            default_plant: None,
            asset_root: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_json::from_str(&text).context("parsing config")?;
        config.validate()?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` when given, else the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            bail!("pageSize must be at least 1");
        }
        if !self.delimiter.is_ascii() || self.delimiter == '\n' || self.delimiter == '"' {
            bail!("delimiter {:?} must be an ASCII character other than newline or quote", self.delimiter);
        }
        Ok(())
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            delimiter: self.delimiter as u8,
            quoting: self.quoting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: Config = serde_json::from_str(r#"{ "quoting": "rfc4180" }"#).unwrap();
        assert_eq!(config.page_size, 7);
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.quoting, Quoting::Rfc4180);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let zero = Config { page_size: 0, ..Config::default() };
        assert!(zero.validate().is_err());
        let wide = Config { delimiter: '§', ..Config::default() };
        assert!(wide.validate().is_err());
    }

    #[test]
    fn export_options_carry_delimiter() {
        let config = Config { delimiter: ';', ..Config::default() };
        assert_eq!(config.export_options().delimiter, b';');
    }
}
