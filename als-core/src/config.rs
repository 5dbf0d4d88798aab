//! Configuração de inicialização do driver
//!
//! Fontes: tabela `[driver]` de uma fixture TOML ou `ALS_ALAE` / `--alae`
//! na CLI.

use serde::{Deserialize, Serialize};

use crate::error::{AlsError, AlsResult};
use crate::types::EnableFlag;

/// Opções lidas uma única vez ao anexar o dispositivo
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlsConfig {
    /// Estado inicial da feature ALS (`false` = desligado)
    #[serde(default)]
    pub alae: bool,
}

impl AlsConfig {
    pub fn new(alae: bool) -> Self {
        Self { alae }
    }

    /// Valor inicial da flag de habilitação
    pub fn initial_flag(&self) -> EnableFlag {
        EnableFlag::from(self.alae)
    }

    /// Lê a tabela `[driver]` de um documento TOML
    pub fn from_toml_str(source: &str) -> AlsResult<Self> {
        #[derive(Deserialize)]
        struct Document {
            #[serde(default)]
            driver: AlsConfig,
        }

        let document: Document = toml::from_str(source)?;
        Ok(document.driver)
    }

    /// Interpreta o valor textual de `alae` (`0`, `1`, `true`, `false`)
    pub fn parse_alae(raw: &str) -> AlsResult<bool> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "0" | "false" => Ok(false),
            "1" | "true" => Ok(true),
            other => Err(AlsError::InvalidConfig(format!(
                "alae must be 0 or 1, got '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_disabled() {
        let config = AlsConfig::default();
        assert!(!config.alae);
        assert_eq!(config.initial_flag(), EnableFlag::DISABLED);
    }

    #[test]
    fn test_from_toml() {
        let config = AlsConfig::from_toml_str("[driver]\nalae = true\n").unwrap();
        assert_eq!(config.initial_flag(), EnableFlag::ENABLED);

        let empty = AlsConfig::from_toml_str("").unwrap();
        assert_eq!(empty, AlsConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_integer() {
        assert!(AlsConfig::from_toml_str("[driver]\nalae = 2\n").is_err());
    }

    #[test]
    fn test_parse_alae() {
        assert!(AlsConfig::parse_alae("1").unwrap());
        assert!(!AlsConfig::parse_alae(" false ").unwrap());
        assert!(matches!(
            AlsConfig::parse_alae("2"),
            Err(AlsError::InvalidConfig(_))
        ));
        for other in ["on", "off", "y", "n", ""] {
            assert!(AlsConfig::parse_alae(other).is_err(), "'{}' accepted", other);
        }
    }
}
