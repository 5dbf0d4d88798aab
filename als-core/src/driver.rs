//! Driver: filtro de identidade, ciclo de vida e endpoints de propriedade
//!
//! ```text
//!   observador ── show("als") ──▶ report::build_report ─┐
//!   observador ── store("alsc") ─▶ control::set_enable ──┼──▶ firmware::invoke ──▶ Firmware
//!   plataforma ── on_event ──────▶ notify::on_event ─────┘
//!                                        │
//!                                        └──▶ ChangeNotifier ──▶ observadores
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::AlsConfig;
use crate::control;
use crate::error::{AlsError, AlsResult, FirmwareResult};
use crate::firmware::{self, Firmware};
use crate::methods::{MethodTable, SensorAttribute};
use crate::notify::{self, ChangeNotifier, ChangeSignal, SubscriptionId};
use crate::report::{self, StatusReport};
use crate::state::AlsState;
use crate::types::{AcpiDevice, EnableFlag};

pub const DRIVER_NAME: &str = "als";
pub const DRIVER_CLASS: &str = "ALS";

/// IDs de hardware aceitos (sensor de luz ambiente genérico)
pub const DEVICE_IDS: &[&str] = &["ACPI0008"];

// ═══════════════════════════════════════════════════════════════════════════════
// ATRIBUTOS
// ═══════════════════════════════════════════════════════════════════════════════

/// Endpoint de propriedade exposto pelo dispositivo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Relatório de status (somente leitura)
    Als,
    /// Controle da feature (somente escrita)
    Alsc,
}

impl Attribute {
    pub const ALL: [Attribute; 2] = [Attribute::Als, Attribute::Alsc];

    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Als => "als",
            Attribute::Alsc => "alsc",
        }
    }

    /// Permissões no estilo sysfs
    pub fn mode(&self) -> u32 {
        match self {
            Attribute::Als => 0o444,
            Attribute::Alsc => 0o200,
        }
    }

    pub fn readable(&self) -> bool {
        self.mode() & 0o444 != 0
    }

    pub fn writable(&self) -> bool {
        self.mode() & 0o222 != 0
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = AlsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::ALL
            .into_iter()
            .find(|attribute| attribute.name() == s)
            .ok_or_else(|| AlsError::UnknownAttribute(s.to_string()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DRIVER
// ═══════════════════════════════════════════════════════════════════════════════

/// Driver de sensor de luz ambiente
#[derive(Debug, Clone, Default)]
pub struct AlsDriver {
    config: AlsConfig,
    methods: MethodTable,
}

impl AlsDriver {
    pub fn new(config: AlsConfig) -> Self {
        Self {
            config,
            methods: MethodTable::default(),
        }
    }

    /// Usa outra tabela de métodos
    pub fn with_methods(mut self, methods: MethodTable) -> Self {
        self.methods = methods;
        self
    }

    pub fn config(&self) -> &AlsConfig {
        &self.config
    }

    /// O dispositivo é atendido por este driver?
    pub fn matches(&self, device: &AcpiDevice) -> bool {
        DEVICE_IDS
            .iter()
            .any(|id| id.eq_ignore_ascii_case(&device.hid))
    }

    /// Anexa o driver a um dispositivo
    ///
    /// Aplica o estado inicial de `alae` ao firmware. Uma falha nessa
    /// chamada é logada e não impede o attach.
    pub fn attach(
        &self,
        firmware: Arc<dyn Firmware>,
        device: AcpiDevice,
    ) -> AlsResult<AlsDevice> {
        if !self.matches(&device) {
            tracing::debug!(hid = %device.hid, "device id not handled");
            return Err(AlsError::NoSuchDevice(device.hid));
        }

        let initial = self.config.initial_flag();
        let dev = AlsDevice {
            device,
            firmware,
            methods: self.methods.clone(),
            state: AlsState::new(initial),
            notifier: ChangeNotifier::new(),
        };

        if let Err(err) = dev.apply_enable(initial) {
            tracing::warn!(%err, "initial alae not applied");
        }

        tracing::info!(
            driver = DRIVER_NAME,
            class = DRIVER_CLASS,
            device = %dev.device.path,
            alae = initial.value(),
            "ambient light sensor attached"
        );
        Ok(dev)
    }

    /// Desanexa o dispositivo, descartando observadores
    pub fn detach(&self, device: AlsDevice) {
        device.notifier.clear();
        tracing::info!(device = %device.device.path, "ambient light sensor detached");
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DISPOSITIVO ANEXADO
// ═══════════════════════════════════════════════════════════════════════════════

/// Instância anexada: dono do estado e do canal de notificação
pub struct AlsDevice {
    device: AcpiDevice,
    firmware: Arc<dyn Firmware>,
    methods: MethodTable,
    state: AlsState,
    notifier: ChangeNotifier,
}

impl fmt::Debug for AlsDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlsDevice")
            .field("device", &self.device)
            .field("enable", &self.state.enable_flag())
            .field("notifier", &self.notifier)
            .finish()
    }
}

impl AlsDevice {
    pub fn device(&self) -> &AcpiDevice {
        &self.device
    }

    pub fn enable_flag(&self) -> EnableFlag {
        self.state.enable_flag()
    }

    pub fn methods(&self) -> &MethodTable {
        &self.methods
    }

    /// Relatório de status (leitura nova do firmware)
    pub fn status(&self) -> StatusReport {
        report::build_report(&*self.firmware, &self.methods, &self.state, &self.device)
    }

    /// Escritor de controle
    pub fn set_enable(&self, raw: Option<&[u8]>) -> AlsResult<()> {
        control::set_enable(&*self.firmware, &self.methods, &self.state, &self.device, raw)
    }

    /// Tratador de eventos de hardware
    pub fn on_event(&self, event: u32) {
        notify::on_event(&*self.firmware, &self.methods, &self.device, &self.notifier, event);
    }

    /// Leitura direta de `_ALI`
    pub fn intensity(&self) -> FirmwareResult<u64> {
        let spec = self.methods.require(SensorAttribute::Intensity)?;
        firmware::get(&*self.firmware, spec, &self.device)
    }

    /// Inscreve observador no canal de mudança
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&ChangeSignal) + Send + Sync + 'static,
    {
        self.notifier.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Leitura de endpoint
    pub fn show(&self, attribute: Attribute) -> AlsResult<String> {
        if !attribute.readable() {
            return Err(AlsError::PermissionDenied(attribute.name().to_string()));
        }
        Ok(self.status().to_string())
    }

    /// Escrita em endpoint; devolve bytes consumidos
    pub fn store(&self, attribute: Attribute, buf: Option<&[u8]>) -> AlsResult<usize> {
        if !attribute.writable() {
            return Err(AlsError::PermissionDenied(attribute.name().to_string()));
        }
        self.set_enable(buf)?;
        Ok(buf.map_or(0, <[u8]>::len))
    }

    fn apply_enable(&self, flag: EnableFlag) -> FirmwareResult<u64> {
        let spec = self.methods.require(SensorAttribute::FeatureControl)?;
        firmware::set(&*self.firmware, spec, &self.device, flag.value() as u64)
    }
}
