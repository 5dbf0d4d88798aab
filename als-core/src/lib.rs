//! # 💡 als-core — Sensor de Luz Ambiente via Firmware
//!
//! Shim de integração que expõe o estado e os controles de um sensor de luz
//! ambiente (`ACPI0008`) a partir de métodos de controle do firmware.
//!
//! ## Componentes
//!
//! | Componente | Módulo | Função |
//! |:-----------|:-------|:-------|
//! | Method Invoker | [`firmware`] | avalia método com 0 ou 1 inteiro, falha recuperável |
//! | Status Aggregator | [`report`] | relatório de 7 linhas em ordem fixa |
//! | Control Writer | [`control`] | valida `0`/`1`, atualiza flag e firmware |
//! | Notification Handler | [`notify`] | relê `_ALI` e emite sinal de mudança |
//! | Ciclo de vida | [`driver`] | filtro de ID, attach/detach, endpoints |
//!
//! ## Exemplo
//!
//! ```
//! use std::sync::Arc;
//! use als_core::{AcpiDevice, AlsConfig, AlsDriver, Attribute, SimulatedFirmware};
//!
//! # fn main() -> Result<(), als_core::AlsError> {
//! let firmware = Arc::new(
//!     SimulatedFirmware::new()
//!         .with_value("\\_SB_.ATKD.ALSC", 0)
//!         .with_value("\\_SB_.ALS_._ALI", 300),
//! );
//! let driver = AlsDriver::new(AlsConfig::default());
//! let device = driver.attach(firmware, AcpiDevice::new("ACPI0008", "\\_SB_.ALS_"))?;
//!
//! device.store(Attribute::Alsc, Some(b"1\n".as_slice()))?;
//! let status = device.show(Attribute::Als)?;
//! assert!(status.starts_with("Local(ALSC/ALAE):          1\n"));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod control;
pub mod driver;
pub mod error;
pub mod firmware;
pub mod methods;
pub mod notify;
pub mod report;
pub mod sim;
pub mod state;
pub mod types;

pub use config::AlsConfig;
pub use driver::{AlsDevice, AlsDriver, Attribute, DEVICE_IDS};
pub use error::{
    AlsError, AlsResult, FirmwareError, FirmwareResult, ValidationError, ValidationResult,
};
pub use firmware::{invoke, Firmware};
pub use methods::{MethodSpec, MethodTable, SensorAttribute};
pub use notify::{ChangeNotifier, ChangeSignal, SubscriptionId};
pub use report::{ReportLine, ReportValue, StatusReport, FAILURE_SENTINEL};
pub use sim::{Fixture, SimulatedFirmware};
pub use state::AlsState;
pub use types::{AcpiDevice, AcpiStatus, Arity, EnableFlag, MethodPath, Scope, ScopeKind};
