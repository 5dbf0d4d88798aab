//! Estado mutável do dispositivo
//!
//! A única mutação é a sequência validar → atribuir → invocar firmware do
//! escritor de controle, serializada pelo mutex desta estrutura.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::AlsResult;
use crate::types::EnableFlag;

/// Estado por dispositivo
#[derive(Debug, Default)]
pub struct AlsState {
    enable: Mutex<EnableFlag>,
}

impl AlsState {
    pub fn new(initial: EnableFlag) -> Self {
        Self {
            enable: Mutex::new(initial),
        }
    }

    /// Valor atual da flag
    ///
    /// Leituras nunca falham: um lock envenenado ainda guarda um valor
    /// válido (0 ou 1).
    pub fn enable_flag(&self) -> EnableFlag {
        *self.enable.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Abre o escopo de escrita
    pub fn lock(&self) -> AlsResult<MutexGuard<'_, EnableFlag>> {
        Ok(self.enable.lock()?)
    }
}
