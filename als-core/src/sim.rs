//! Firmware simulado em memória
//!
//! Namespace plano de métodos inteiros, usado pelos testes, pela CLI e
//! pelos benchmarks. Cada método guarda um valor; uma leitura devolve o
//! valor, uma escrita o substitui e devolve o eco. Métodos ausentes falham
//! com `AE_NOT_FOUND`, como na plataforma real.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use serde::{Deserialize, Serialize};

use crate::config::AlsConfig;
use crate::error::{AlsError, AlsResult};
use crate::firmware::Firmware;
use crate::types::{AcpiDevice, AcpiStatus, MethodPath, Scope};

/// Chamada registrada pelo simulador
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    /// Caminho absoluto normalizado
    pub path: String,
    pub arg: Option<u64>,
}

#[derive(Debug, Clone, Default)]
struct SimMethod {
    value: u64,
    failure: Option<AcpiStatus>,
    /// Escritas também atualizam este caminho
    mirror: Option<String>,
}

/// Firmware em memória
#[derive(Debug, Default)]
pub struct SimulatedFirmware {
    methods: Mutex<HashMap<String, SimMethod>>,
    calls: Mutex<Vec<Invocation>>,
}

impl SimulatedFirmware {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(path: &str) -> String {
        MethodPath::new(path).normalized()
    }

    /// Define método com valor inicial
    pub fn with_value(self, path: &str, value: u64) -> Self {
        self.set_value(path, value);
        self
    }

    /// Define método que sempre falha com `status`
    pub fn with_failure(self, path: &str, status: AcpiStatus) -> Self {
        self.methods
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(Self::key(path))
            .or_default()
            .failure = Some(status);
        self
    }

    /// Escritas em `path` também gravam em `target`
    pub fn with_mirror(self, path: &str, target: &str) -> Self {
        self.methods
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(Self::key(path))
            .or_default()
            .mirror = Some(Self::key(target));
        self
    }

    /// Altera o valor de um método (simula mudança de hardware)
    pub fn set_value(&self, path: &str, value: u64) {
        self.methods
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(Self::key(path))
            .or_default()
            .value = value;
    }

    /// Valor atual de um método
    pub fn value(&self, path: &str) -> Option<u64> {
        self.methods
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&Self::key(path))
            .map(|method| method.value)
    }

    /// Histórico de chamadas
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Chamadas com argumento (escritas)
    pub fn set_calls(&self) -> Vec<Invocation> {
        self.calls()
            .into_iter()
            .filter(|call| call.arg.is_some())
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl Firmware for SimulatedFirmware {
    fn evaluate_integer(
        &self,
        scope: Scope<'_>,
        path: &MethodPath,
        arg: Option<u64>,
    ) -> Result<u64, AcpiStatus> {
        let key = path.resolve(scope).normalized();
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Invocation { path: key.clone(), arg });

        let mut methods = self.methods.lock().unwrap_or_else(PoisonError::into_inner);
        let method = methods.get_mut(&key).ok_or(AcpiStatus::NOT_FOUND)?;
        if let Some(status) = method.failure {
            return Err(status);
        }

        let Some(value) = arg else {
            return Ok(method.value);
        };
        method.value = value;
        if let Some(target) = method.mirror.clone() {
            methods.entry(target).or_default().value = value;
        }
        Ok(value)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FIXTURES TOML
// ═══════════════════════════════════════════════════════════════════════════════

fn default_device() -> AcpiDevice {
    AcpiDevice::new("ACPI0008", "\\_SB_.ALS_")
}

/// Método declarado na fixture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureMethod {
    pub path: String,

    #[serde(default)]
    pub value: u64,

    /// Status de falha forçada (`AE_ERROR`, `0x0005`, ...)
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub mirror: Option<String>,
}

/// Descrição de uma plataforma simulada
///
/// ```toml
/// [device]
/// hid = "ACPI0008"
/// path = "\\_SB_.ALS_"
///
/// [driver]
/// alae = true
///
/// [[method]]
/// path = "\\_SB_.ATKD.ALSC"
/// mirror = "\\_SB_.ALAE"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default = "default_device")]
    pub device: AcpiDevice,

    #[serde(default)]
    pub driver: AlsConfig,

    #[serde(default, rename = "method")]
    pub methods: Vec<FixtureMethod>,
}

impl Fixture {
    pub fn from_toml_str(source: &str) -> AlsResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Constrói o firmware descrito
    pub fn firmware(&self) -> AlsResult<SimulatedFirmware> {
        let mut firmware = SimulatedFirmware::new();
        for method in &self.methods {
            firmware = firmware.with_value(&method.path, method.value);
            if let Some(status) = &method.status {
                let status: AcpiStatus = status.parse().map_err(AlsError::Fixture)?;
                firmware = firmware.with_failure(&method.path, status);
            }
            if let Some(mirror) = &method.mirror {
                firmware = firmware.with_mirror(&method.path, mirror);
            }
        }
        Ok(firmware)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self {
            device: default_device(),
            driver: AlsConfig::default(),
            methods: Vec::new(),
        }
    }
}
