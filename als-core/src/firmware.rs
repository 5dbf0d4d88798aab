//! Invocador de métodos de firmware
//!
//! [`Firmware`] é a fronteira com a plataforma: avalia um método que
//! devolve inteiro, com zero ou um argumento. [`invoke`] é a única porta
//! de entrada usada pelos demais componentes e nunca aborta o chamador,
//! já que métodos opcionais de fabricante podem não existir.

use std::fmt::Debug;
use std::sync::Arc;

use crate::error::{FirmwareError, FirmwareResult};
use crate::methods::MethodSpec;
use crate::types::{AcpiDevice, AcpiStatus, Arity, MethodPath, Scope};

/// Interface de avaliação inteira (`acpi_evaluate_integer`)
pub trait Firmware: Send + Sync + Debug {
    /// Avalia `path` no escopo dado
    ///
    /// `arg = None` avalia sem parâmetros; `Some(v)` passa exatamente um
    /// inteiro.
    fn evaluate_integer(
        &self,
        scope: Scope<'_>,
        path: &MethodPath,
        arg: Option<u64>,
    ) -> Result<u64, AcpiStatus>;
}

impl<F: Firmware + ?Sized> Firmware for Arc<F> {
    fn evaluate_integer(
        &self,
        scope: Scope<'_>,
        path: &MethodPath,
        arg: Option<u64>,
    ) -> Result<u64, AcpiStatus> {
        (**self).evaluate_integer(scope, path, arg)
    }
}

impl<F: Firmware + ?Sized> Firmware for &F {
    fn evaluate_integer(
        &self,
        scope: Scope<'_>,
        path: &MethodPath,
        arg: Option<u64>,
    ) -> Result<u64, AcpiStatus> {
        (**self).evaluate_integer(scope, path, arg)
    }
}

/// Invoca um método de firmware
///
/// Falhas são logadas com nome do método e status e devolvidas como
/// [`FirmwareError`].
pub fn invoke<F: Firmware + ?Sized>(
    firmware: &F,
    scope: Scope<'_>,
    path: &MethodPath,
    arg: Option<u64>,
) -> FirmwareResult<u64> {
    match firmware.evaluate_integer(scope, path, arg) {
        Ok(value) => {
            tracing::trace!(method = %path, ?arg, value, "integer evaluation");
            Ok(value)
        }
        Err(status) => {
            tracing::error!(method = %path, %status, "integer evaluation failed");
            Err(FirmwareError::new(path.clone(), status))
        }
    }
}

/// Leitura ("get") de uma entrada da tabela
pub fn get<F: Firmware + ?Sized>(
    firmware: &F,
    spec: &MethodSpec,
    device: &AcpiDevice,
) -> FirmwareResult<u64> {
    debug_assert_eq!(spec.arity, Arity::Get);
    invoke(firmware, spec.scope.bind(device), &spec.path, None)
}

/// Escrita ("set") de uma entrada da tabela
///
/// O retorno do método é informativo (eco ou código de status).
pub fn set<F: Firmware + ?Sized>(
    firmware: &F,
    spec: &MethodSpec,
    device: &AcpiDevice,
    value: u64,
) -> FirmwareResult<u64> {
    debug_assert_eq!(spec.arity, Arity::Set);
    invoke(firmware, spec.scope.bind(device), &spec.path, Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimulatedFirmware;

    #[test]
    fn test_invoke_get() {
        let fw = SimulatedFirmware::new().with_value("\\_SB_.LSTP", 42);
        let value = invoke(&fw, Scope::Root, &MethodPath::new("\\_SB_.LSTP"), None);
        assert_eq!(value, Ok(42));
    }

    #[test]
    fn test_invoke_missing_method_is_recoverable() {
        let fw = SimulatedFirmware::new();
        let err = invoke(&fw, Scope::Root, &MethodPath::new("\\_SB_.BRTI"), None).unwrap_err();
        assert_eq!(err.status, AcpiStatus::NOT_FOUND);
        assert_eq!(err.method.as_str(), "\\_SB_.BRTI");
    }

    #[test]
    fn test_invoke_set_passes_argument() {
        let fw = SimulatedFirmware::new().with_value("\\_SB_.ATKD.ALSC", 0);
        let echo = invoke(&fw, Scope::Root, &MethodPath::new("\\_SB_.ATKD.ALSC"), Some(1));
        assert_eq!(echo, Ok(1));

        let calls = fw.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].arg, Some(1));
    }

    #[test]
    fn test_get_resolves_device_scope() {
        let device = AcpiDevice::new("ACPI0008", "\\_SB_.ALS_");
        let fw = SimulatedFirmware::new().with_value("\\_SB_.ALS_._ALI", 310);
        let table = crate::methods::MethodTable::asus();
        let spec = table.get(crate::methods::SensorAttribute::Intensity).unwrap();
        assert_eq!(get(&fw, spec, &device), Ok(310));
    }

    #[test]
    fn test_invoke_through_arc_dyn() {
        let fw: Arc<dyn Firmware> = Arc::new(SimulatedFirmware::new().with_value("\\_SB_.ALAE", 1));
        assert_eq!(invoke(&fw, Scope::Root, &MethodPath::new("\\_SB.ALAE"), None), Ok(1));
    }
}
