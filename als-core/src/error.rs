//! Erros do shim de sensor de luz ambiente
//!
//! | Erro | Origem | Política |
//! |:-----|:-------|:---------|
//! | [`FirmwareError`] | método de firmware falhou | logado, recuperável |
//! | [`ValidationError`] | entrada do endpoint de controle | rejeitada sem mutação |
//! | [`AlsError`] | agregado para endpoints e ciclo de vida | propagado ao host |

use std::sync::PoisonError;
use thiserror::Error;

use crate::types::{AcpiStatus, MethodPath};

pub type FirmwareResult<T> = Result<T, FirmwareError>;
pub type ValidationResult<T> = Result<T, ValidationError>;
pub type AlsResult<T> = Result<T, AlsError>;

// Códigos errno do host (valores Linux)
pub const ENOENT: i32 = 2;
pub const EIO: i32 = 5;
pub const EACCES: i32 = 13;
pub const ENODEV: i32 = 19;
pub const EINVAL: i32 = 22;

/// Falha na avaliação de um método de firmware
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Integer evaluation for {method} failed [{status}]")]
pub struct FirmwareError {
    /// Método tentado
    pub method: MethodPath,
    /// Status reportado pela plataforma
    pub status: AcpiStatus,
}

impl FirmwareError {
    pub fn new(method: MethodPath, status: AcpiStatus) -> Self {
        Self { method, status }
    }
}

/// Entrada inválida no endpoint de controle
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No input supplied")]
    Missing,

    #[error("Empty input")]
    Empty,

    #[error("Malformed input: {0}")]
    Malformed(String),

    #[error("Value does not fit in 32 bits: {0}")]
    Overflow(String),

    #[error("Value {0} outside accepted range 0..=1")]
    OutOfRange(u32),
}

/// Erro agregado do driver
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlsError {
    #[error("Invalid argument: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Firmware(#[from] FirmwareError),

    #[error("Device {0} is not an ambient light sensor")]
    NoSuchDevice(String),

    #[error("Attribute {0} does not permit this access")]
    PermissionDenied(String),

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Fixture error: {0}")]
    Fixture(String),

    #[error("Lock poisoned")]
    LockPoisoned,
}

impl AlsError {
    /// Código errno negativo no formato esperado pelo host
    pub fn errno(&self) -> i32 {
        let code = match self {
            AlsError::Validation(_) | AlsError::InvalidConfig(_) => EINVAL,
            AlsError::Firmware(_) | AlsError::Fixture(_) | AlsError::LockPoisoned => EIO,
            AlsError::NoSuchDevice(_) => ENODEV,
            AlsError::PermissionDenied(_) => EACCES,
            AlsError::UnknownAttribute(_) => ENOENT,
        };
        -code
    }
}

impl<T> From<PoisonError<T>> for AlsError {
    fn from(_: PoisonError<T>) -> Self {
        AlsError::LockPoisoned
    }
}

impl From<toml::de::Error> for AlsError {
    fn from(err: toml::de::Error) -> Self {
        AlsError::Fixture(err.to_string())
    }
}
