//! Escritor de controle (`alsc`)
//!
//! Aceita `0` ou `1` no formato de `kstrtouint(buf, 0)`: `+` opcional,
//! base detectada pelo prefixo (`0x` hex, `0` octal, senão decimal) e no
//! máximo um `\n` final.

use crate::error::{AlsResult, ValidationError, ValidationResult};
use crate::firmware::{self, Firmware};
use crate::methods::{MethodTable, SensorAttribute};
use crate::state::AlsState;
use crate::types::{AcpiDevice, EnableFlag};

fn malformed(raw: &[u8]) -> ValidationError {
    ValidationError::Malformed(String::from_utf8_lossy(raw).trim_end().to_string())
}

/// Converte a entrada em inteiro sem sinal de 32 bits
pub fn parse_uint(raw: &[u8]) -> ValidationResult<u32> {
    let mut s = raw;
    if let [rest @ .., b'\n'] = s {
        s = rest;
    }
    if s.is_empty() {
        return Err(ValidationError::Empty);
    }
    if let [b'+', rest @ ..] = s {
        s = rest;
    }

    let (radix, digits) = match s {
        [b'0', x, d, ..] if (x | 0x20) == b'x' && d.is_ascii_hexdigit() => (16, &s[2..]),
        [b'0', ..] => (8, s),
        _ => (10, s),
    };
    if digits.is_empty() {
        return Err(malformed(raw));
    }

    let mut acc: u64 = 0;
    for &byte in digits {
        let digit = (byte as char).to_digit(radix).ok_or_else(|| malformed(raw))?;
        acc = acc * radix as u64 + digit as u64;
        if acc > u32::MAX as u64 {
            return Err(ValidationError::Overflow(
                String::from_utf8_lossy(raw).trim_end().to_string(),
            ));
        }
    }
    Ok(acc as u32)
}

/// Valida a entrada e aplica a flag de habilitação
///
/// Entrada rejeitada não toca o estado nem o firmware. Com entrada válida a
/// flag é atualizada antes da chamada a `ALSC`; uma falha de firmware é
/// devolvida ao chamador com a flag já atualizada.
pub fn set_enable<F: Firmware + ?Sized>(
    firmware: &F,
    methods: &MethodTable,
    state: &AlsState,
    device: &AcpiDevice,
    raw: Option<&[u8]>,
) -> AlsResult<()> {
    let flag = match validate(raw) {
        Ok(flag) => flag,
        Err(err) => {
            tracing::warn!(%err, "control write rejected");
            return Err(err.into());
        }
    };

    let spec = methods.require(SensorAttribute::FeatureControl)?;

    let mut current = state.lock()?;
    *current = flag;
    tracing::debug!(value = flag.value(), "enable flag updated");

    firmware::invoke(
        firmware,
        spec.scope.bind(device),
        &spec.path,
        Some(flag.value() as u64),
    )?;
    Ok(())
}

fn validate(raw: Option<&[u8]>) -> ValidationResult<EnableFlag> {
    let raw = raw.ok_or(ValidationError::Missing)?;
    EnableFlag::try_from(parse_uint(raw)?)
}
