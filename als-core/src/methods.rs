//! Tabela estática de métodos de controle
//!
//! Mapeia cada atributo lógico do sensor para `(escopo, caminho, aridade)`.
//! A tabela padrão cobre os notebooks ASUS com `ATKD`; outra tabela pode
//! ser injetada no driver sem mudar código.

use serde::Serialize;

use crate::error::{FirmwareError, FirmwareResult};
use crate::types::{AcpiStatus, Arity, MethodPath, ScopeKind};

/// Atributo lógico do sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SensorAttribute {
    /// Estado da feature ALS (`ALAE`)
    FeatureState,
    /// Limiar de sleep (`LSTP`)
    SleepThreshold,
    /// Brilho inicial (`BRTI`)
    BrightnessInit,
    /// Intensidade de luz ambiente (`_ALI`)
    Intensity,
    /// Leitura do fabricante (`ATKD.GALS`)
    VendorReading,
    /// Leitura via embedded controller (`EC0.RALS`)
    EcReading,
    /// Liga/desliga a feature (`ATKD.ALSC`)
    FeatureControl,
}

impl SensorAttribute {
    /// Ordem fixa das linhas de firmware no relatório
    pub const REPORT_ORDER: [SensorAttribute; 6] = [
        SensorAttribute::FeatureState,
        SensorAttribute::SleepThreshold,
        SensorAttribute::BrightnessInit,
        SensorAttribute::Intensity,
        SensorAttribute::VendorReading,
        SensorAttribute::EcReading,
    ];

    /// Rótulo de coluna no relatório de status
    pub fn label(&self) -> &'static str {
        match self {
            SensorAttribute::FeatureState => "\\_SB_.ALAE",
            SensorAttribute::SleepThreshold => "\\_SB_.LSTP",
            SensorAttribute::BrightnessInit => "\\_SB_.BRTI",
            SensorAttribute::Intensity => "\\_SB_.ALS_._ALI",
            SensorAttribute::VendorReading => "\\_SB_.ATKD.GALS",
            SensorAttribute::EcReading => "\\_SB_.PCI0.LPCB.EC0_.RALS",
            SensorAttribute::FeatureControl => "\\_SB_.ATKD.ALSC",
        }
    }
}

/// Entrada da tabela: onde e como avaliar um atributo
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodSpec {
    pub attribute: SensorAttribute,
    pub scope: ScopeKind,
    pub path: MethodPath,
    pub arity: Arity,
}

impl MethodSpec {
    pub const fn new(
        attribute: SensorAttribute,
        scope: ScopeKind,
        path: &'static str,
        arity: Arity,
    ) -> Self {
        Self {
            attribute,
            scope,
            path: MethodPath::from_static(path),
            arity,
        }
    }
}

const ASUS_ATKD: &[MethodSpec] = &[
    MethodSpec::new(SensorAttribute::FeatureState, ScopeKind::Root, "\\_SB_.ALAE", Arity::Get),
    MethodSpec::new(SensorAttribute::SleepThreshold, ScopeKind::Root, "\\_SB_.LSTP", Arity::Get),
    MethodSpec::new(SensorAttribute::BrightnessInit, ScopeKind::Root, "\\_SB_.BRTI", Arity::Get),
    MethodSpec::new(SensorAttribute::Intensity, ScopeKind::Device, "_ALI", Arity::Get),
    MethodSpec::new(SensorAttribute::VendorReading, ScopeKind::Root, "\\_SB.ATKD.GALS", Arity::Get),
    MethodSpec::new(
        SensorAttribute::EcReading,
        ScopeKind::Root,
        "\\_SB_.PCI0.LPCB.EC0_.RALS",
        Arity::Get,
    ),
    MethodSpec::new(SensorAttribute::FeatureControl, ScopeKind::Root, "\\_SB_.ATKD.ALSC", Arity::Set),
];

/// Mapeamento somente-leitura de atributo → método
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodTable {
    entries: Vec<MethodSpec>,
}

impl MethodTable {
    /// Tabela para firmware ASUS (`\_SB_.ATKD`)
    pub fn asus() -> Self {
        Self {
            entries: ASUS_ATKD.to_vec(),
        }
    }

    pub fn from_entries(entries: Vec<MethodSpec>) -> Self {
        Self { entries }
    }

    pub fn get(&self, attribute: SensorAttribute) -> Option<&MethodSpec> {
        self.entries.iter().find(|spec| spec.attribute == attribute)
    }

    /// Entrada obrigatória; ausência equivale a método inexistente
    pub fn require(&self, attribute: SensorAttribute) -> FirmwareResult<&MethodSpec> {
        self.get(attribute).ok_or_else(|| {
            FirmwareError::new(
                MethodPath::from_static(attribute.label()),
                AcpiStatus::NOT_FOUND,
            )
        })
    }

    /// Substitui (ou adiciona) a entrada de um atributo
    pub fn with_override(mut self, spec: MethodSpec) -> Self {
        match self.entries.iter_mut().find(|e| e.attribute == spec.attribute) {
            Some(entry) => *entry = spec,
            None => self.entries.push(spec),
        }
        self
    }

    /// Remove a entrada de um atributo
    pub fn without(mut self, attribute: SensorAttribute) -> Self {
        self.entries.retain(|spec| spec.attribute != attribute);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &MethodSpec> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MethodTable {
    fn default() -> Self {
        Self::asus()
    }
}
