//! Agregador de status
//!
//! Cada leitura consulta o firmware de novo, em ordem fixa. Uma consulta que
//! falha vira uma linha com sentinela; o relatório sempre sai completo.

use std::fmt;
use serde::Serialize;

use crate::firmware::{self, Firmware};
use crate::methods::{MethodTable, SensorAttribute};
use crate::state::AlsState;
use crate::types::{AcpiDevice, AcpiStatus, MethodPath};

/// Valor exibido quando a consulta falha
///
/// Indistinguível de uma leitura real de 1844 no texto; a forma tipada
/// ([`ReportValue::Failed`]) preserva a diferença.
pub const FAILURE_SENTINEL: u64 = 1844;

/// Largura da coluna de rótulos (rótulo + `:` + espaços)
pub const LABEL_WIDTH: usize = 27;

/// Rótulo da linha da flag local
pub const LOCAL_LABEL: &str = "Local(ALSC/ALAE)";

/// Resultado de uma consulta
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportValue {
    Value(u64),
    Failed { method: MethodPath, status: AcpiStatus },
}

impl ReportValue {
    /// Valor como aparece no texto
    pub fn rendered(&self) -> u64 {
        match self {
            ReportValue::Value(value) => *value,
            ReportValue::Failed { .. } => FAILURE_SENTINEL,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ReportValue::Failed { .. })
    }
}

/// Linha do relatório
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    pub label: &'static str,
    pub value: ReportValue,
}

/// Relatório de status, construído a cada leitura
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub lines: Vec<ReportLine>,
}

impl StatusReport {
    pub fn value_of(&self, label: &str) -> Option<&ReportValue> {
        self.lines
            .iter()
            .find(|line| line.label == label)
            .map(|line| &line.value)
    }

    /// Número de consultas que falharam
    pub fn failures(&self) -> usize {
        self.lines.iter().filter(|line| line.value.is_failed()).count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            let label = format!("{}:", line.label);
            writeln!(f, "{:<width$}{}", label, line.value.rendered(), width = LABEL_WIDTH)?;
        }
        Ok(())
    }
}

/// Monta o relatório para um dispositivo
///
/// Ordem: flag local, `ALAE`, `LSTP`, `BRTI`, `_ALI`, `GALS`, `RALS`.
/// Nenhuma falha interrompe as consultas seguintes.
pub fn build_report<F: Firmware + ?Sized>(
    firmware: &F,
    methods: &MethodTable,
    state: &AlsState,
    device: &AcpiDevice,
) -> StatusReport {
    let mut lines = Vec::with_capacity(1 + SensorAttribute::REPORT_ORDER.len());
    lines.push(ReportLine {
        label: LOCAL_LABEL,
        value: ReportValue::Value(state.enable_flag().value() as u64),
    });

    for attribute in SensorAttribute::REPORT_ORDER {
        let value = match methods
            .require(attribute)
            .and_then(|spec| firmware::invoke(firmware, spec.scope.bind(device), &spec.path, None))
        {
            Ok(value) => ReportValue::Value(value),
            Err(err) => ReportValue::Failed {
                method: err.method,
                status: err.status,
            },
        };
        lines.push(ReportLine {
            label: attribute.label(),
            value,
        });
    }

    StatusReport { lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimulatedFirmware;
    use crate::types::EnableFlag;

    fn device() -> AcpiDevice {
        AcpiDevice::new("ACPI0008", "\\_SB_.ALS_")
    }

    #[test]
    fn test_full_report_text() {
        let fw = SimulatedFirmware::new()
            .with_value("\\_SB_.ALAE", 1)
            .with_value("\\_SB_.LSTP", 2)
            .with_value("\\_SB_.BRTI", 7)
            .with_value("\\_SB_.ALS_._ALI", 320)
            .with_value("\\_SB_.ATKD.GALS", 5)
            .with_value("\\_SB_.PCI0.LPCB.EC0_.RALS", 118);
        let state = AlsState::new(EnableFlag::ENABLED);

        let report = build_report(&fw, &MethodTable::asus(), &state, &device());
        let expected = concat!(
            "Local(ALSC/ALAE):          1\n",
            "\\_SB_.ALAE:                1\n",
            "\\_SB_.LSTP:                2\n",
            "\\_SB_.BRTI:                7\n",
            "\\_SB_.ALS_._ALI:           320\n",
            "\\_SB_.ATKD.GALS:           5\n",
            "\\_SB_.PCI0.LPCB.EC0_.RALS: 118\n",
        );
        assert_eq!(report.to_string(), expected);
        assert_eq!(report.failures(), 0);
    }

    #[test]
    fn test_all_failures_still_seven_lines() {
        let fw = SimulatedFirmware::new();
        let report = build_report(&fw, &MethodTable::asus(), &AlsState::default(), &device());

        let text = report.to_string();
        assert_eq!(text.lines().count(), 7);
        assert_eq!(report.failures(), 6);
        for line in text.lines().skip(1) {
            assert!(line.ends_with(" 1844"), "line without sentinel: {}", line);
        }
        assert!(text.starts_with("Local(ALSC/ALAE):          0\n"));
    }

    #[test]
    fn test_one_failure_does_not_block_rest() {
        let fw = SimulatedFirmware::new()
            .with_value("\\_SB_.ALAE", 0)
            .with_failure("\\_SB_.LSTP", AcpiStatus::ERROR)
            .with_value("\\_SB_.BRTI", 3);
        let report = build_report(&fw, &MethodTable::asus(), &AlsState::default(), &device());

        assert_eq!(report.value_of("\\_SB_.ALAE"), Some(&ReportValue::Value(0)));
        assert_eq!(
            report.value_of("\\_SB_.LSTP"),
            Some(&ReportValue::Failed {
                method: MethodPath::new("\\_SB_.LSTP"),
                status: AcpiStatus::ERROR,
            })
        );
        assert_eq!(report.value_of("\\_SB_.BRTI"), Some(&ReportValue::Value(3)));
        // Todas as seis consultas foram feitas
        assert_eq!(fw.calls().len(), 6);
    }

    #[test]
    fn test_unmapped_attribute_renders_sentinel() {
        let table = MethodTable::asus().without(SensorAttribute::VendorReading);
        let fw = SimulatedFirmware::new();
        let report = build_report(&fw, &table, &AlsState::default(), &device());

        assert_eq!(report.lines.len(), 7);
        assert!(report.value_of("\\_SB_.ATKD.GALS").unwrap().is_failed());
        assert_eq!(fw.calls().len(), 5);
    }

    #[test]
    fn test_json_distinguishes_failure() {
        let fw = SimulatedFirmware::new().with_value("\\_SB_.ALAE", 1844);
        let report = build_report(&fw, &MethodTable::asus(), &AlsState::default(), &device());
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["lines"][1]["value"]["value"], 1844);
        assert_eq!(json["lines"][2]["value"]["failed"]["status"], 5);
    }
}
