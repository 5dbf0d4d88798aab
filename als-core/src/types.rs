//! Tipos do namespace de firmware

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ═══════════════════════════════════════════════════════════════════════════════
// STATUS DA PLATAFORMA
// ═══════════════════════════════════════════════════════════════════════════════

/// Código de status devolvido pela avaliação de firmware (`acpi_status`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AcpiStatus(pub u32);

impl AcpiStatus {
    pub const OK: Self = Self(0x0000);
    pub const ERROR: Self = Self(0x0001);
    pub const NO_MEMORY: Self = Self(0x0004);
    pub const NOT_FOUND: Self = Self(0x0005);
    pub const NOT_EXIST: Self = Self(0x0006);
    pub const TYPE: Self = Self(0x0008);
    pub const NOT_IMPLEMENTED: Self = Self(0x000E);
    pub const SUPPORT: Self = Self(0x000F);
    pub const TIME: Self = Self(0x0011);
    pub const BAD_PARAMETER: Self = Self(0x1001);

    const NAMES: &'static [(Self, &'static str)] = &[
        (Self::OK, "AE_OK"),
        (Self::ERROR, "AE_ERROR"),
        (Self::NO_MEMORY, "AE_NO_MEMORY"),
        (Self::NOT_FOUND, "AE_NOT_FOUND"),
        (Self::NOT_EXIST, "AE_NOT_EXIST"),
        (Self::TYPE, "AE_TYPE"),
        (Self::NOT_IMPLEMENTED, "AE_NOT_IMPLEMENTED"),
        (Self::SUPPORT, "AE_SUPPORT"),
        (Self::TIME, "AE_TIME"),
        (Self::BAD_PARAMETER, "AE_BAD_PARAMETER"),
    ];

    pub fn is_success(&self) -> bool {
        *self == Self::OK
    }

    /// Nome simbólico, se conhecido
    pub fn name(&self) -> Option<&'static str> {
        Self::NAMES
            .iter()
            .find(|(status, _)| status == self)
            .map(|(_, name)| *name)
    }
}

impl fmt::Display for AcpiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({:#06x})", name, self.0),
            None => write!(f, "{:#06x}", self.0),
        }
    }
}

impl FromStr for AcpiStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((status, _)) = Self::NAMES.iter().find(|(_, name)| *name == s) {
            return Ok(*status);
        }
        let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => s.parse(),
        };
        parsed
            .map(Self)
            .map_err(|_| format!("unknown firmware status '{}'", s))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CAMINHOS DE MÉTODO
// ═══════════════════════════════════════════════════════════════════════════════

/// Caminho de um método de controle no namespace de firmware
///
/// Absoluto quando começa por `\` (ex.: `\_SB_.ATKD.ALSC`), relativo ao
/// escopo caso contrário (ex.: `_ALI`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodPath(Cow<'static, str>);

impl MethodPath {
    /// Caminho estático (tabela compilada)
    pub const fn from_static(path: &'static str) -> Self {
        Self(Cow::Borrowed(path))
    }

    pub fn new(path: impl Into<String>) -> Self {
        Self(Cow::Owned(path.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_absolute(&self) -> bool {
        self.0.starts_with('\\')
    }

    /// Resolve o caminho contra um escopo
    pub fn resolve(&self, scope: Scope<'_>) -> MethodPath {
        if self.is_absolute() {
            return self.clone();
        }
        match scope {
            Scope::Root => MethodPath::new(format!("\\{}", self.0)),
            Scope::Device(device) => MethodPath::new(format!("{}.{}", device.path, self.0)),
        }
    }

    /// Forma canônica: cada segmento completado com `_` até 4 caracteres
    ///
    /// `\_SB.ATKD.GALS` e `\_SB_.ATKD.GALS` nomeiam o mesmo objeto.
    pub fn normalized(&self) -> String {
        let (prefix, body) = match self.0.strip_prefix('\\') {
            Some(rest) => ("\\", rest),
            None => ("", &*self.0),
        };
        let segments: Vec<String> = body
            .split('.')
            .map(|segment| format!("{:_<4}", segment.to_ascii_uppercase()))
            .collect();
        format!("{}{}", prefix, segments.join("."))
    }
}

impl fmt::Display for MethodPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Número de argumentos de um método de controle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arity {
    /// Sem argumentos (leitura)
    Get,
    /// Um argumento inteiro (escrita)
    Set,
}

// ═══════════════════════════════════════════════════════════════════════════════
// DISPOSITIVO E ESCOPO
// ═══════════════════════════════════════════════════════════════════════════════

/// Instância de dispositivo no namespace de firmware
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcpiDevice {
    /// Hardware ID (ex.: `ACPI0008`)
    pub hid: String,
    /// Caminho absoluto do dispositivo (ex.: `\_SB_.ALS_`)
    pub path: MethodPath,
}

impl AcpiDevice {
    pub fn new(hid: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            hid: hid.into(),
            path: MethodPath::new(path),
        }
    }
}

/// Alvo de avaliação de um método
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<'a> {
    /// Raiz global do namespace
    Root,
    /// Instância específica de dispositivo
    Device(&'a AcpiDevice),
}

/// Escopo declarado na tabela de métodos (resolvido na invocação)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScopeKind {
    Root,
    Device,
}

impl ScopeKind {
    pub fn bind(self, device: &AcpiDevice) -> Scope<'_> {
        match self {
            ScopeKind::Root => Scope::Root,
            ScopeKind::Device => Scope::Device(device),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FLAG DE HABILITAÇÃO
// ═══════════════════════════════════════════════════════════════════════════════

/// Último valor de habilitação pedido por este processo (sempre 0 ou 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct EnableFlag(bool);

impl EnableFlag {
    pub const DISABLED: Self = Self(false);
    pub const ENABLED: Self = Self(true);

    pub fn is_enabled(&self) -> bool {
        self.0
    }

    /// Valor inteiro enviado ao firmware
    pub fn value(&self) -> u32 {
        self.0 as u32
    }
}

impl TryFrom<u32> for EnableFlag {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::DISABLED),
            1 => Ok(Self::ENABLED),
            other => Err(ValidationError::OutOfRange(other)),
        }
    }
}

impl From<bool> for EnableFlag {
    fn from(enabled: bool) -> Self {
        Self(enabled)
    }
}

impl From<EnableFlag> for u32 {
    fn from(flag: EnableFlag) -> Self {
        flag.value()
    }
}

impl fmt::Display for EnableFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(AcpiStatus::NOT_FOUND.to_string(), "AE_NOT_FOUND (0x0005)");
        assert_eq!(AcpiStatus(0x2001).to_string(), "0x2001");
        assert!(AcpiStatus::OK.is_success());
        assert!(!AcpiStatus::ERROR.is_success());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("AE_TIME".parse::<AcpiStatus>().unwrap(), AcpiStatus::TIME);
        assert_eq!("0x1001".parse::<AcpiStatus>().unwrap(), AcpiStatus::BAD_PARAMETER);
        assert_eq!("5".parse::<AcpiStatus>().unwrap(), AcpiStatus::NOT_FOUND);
        assert!("AE_BOGUS".parse::<AcpiStatus>().is_err());
    }

    #[test]
    fn test_normalized_pads_segments() {
        let short = MethodPath::new("\\_SB.ATKD.GALS");
        let full = MethodPath::new("\\_SB_.ATKD.GALS");
        assert_eq!(short.normalized(), "\\_SB_.ATKD.GALS");
        assert_eq!(short.normalized(), full.normalized());
        assert_eq!(MethodPath::new("\\_SB_.ALS._ALI").normalized(), "\\_SB_.ALS_._ALI");
    }

    #[test]
    fn test_resolve_against_scope() {
        let device = AcpiDevice::new("ACPI0008", "\\_SB_.ALS_");
        let ali = MethodPath::from_static("_ALI");
        assert!(!ali.is_absolute());
        assert_eq!(ali.resolve(Scope::Device(&device)).as_str(), "\\_SB_.ALS_._ALI");
        assert_eq!(ali.resolve(Scope::Root).as_str(), "\\_ALI");

        let absolute = MethodPath::from_static("\\_SB_.LSTP");
        assert_eq!(absolute.resolve(Scope::Device(&device)), absolute);
    }

    #[test]
    fn test_enable_flag_domain() {
        assert_eq!(EnableFlag::try_from(0).unwrap(), EnableFlag::DISABLED);
        assert_eq!(EnableFlag::try_from(1).unwrap(), EnableFlag::ENABLED);
        assert_eq!(
            EnableFlag::try_from(2).unwrap_err(),
            ValidationError::OutOfRange(2)
        );
        assert_eq!(EnableFlag::default().value(), 0);
        assert_eq!(EnableFlag::from(true).to_string(), "1");
    }
}
