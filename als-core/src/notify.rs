//! Canal de notificação de mudança e tratador de eventos de hardware
//!
//! O sinal não carrega dados: só avisa os observadores que o endpoint de
//! status deve ser relido. Entrega no máximo uma vez por evento, sem fila e
//! sem confirmação.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use serde::Serialize;

use crate::firmware::{self, Firmware};
use crate::methods::{MethodTable, SensorAttribute};
use crate::types::{AcpiDevice, MethodPath};

/// Aviso de mudança (equivalente a um uevent `change`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeSignal {
    /// Dispositivo de origem
    pub device: MethodPath,
}

/// Handler de mudança (callback)
pub type ChangeHandler = Arc<dyn Fn(&ChangeSignal) + Send + Sync>;

/// Identificador de inscrição
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SubscriptionId(u64);

/// Bus de notificações de mudança
#[derive(Clone, Default)]
pub struct ChangeNotifier {
    handlers: Arc<Mutex<Vec<(SubscriptionId, ChangeHandler)>>>,
    next_id: Arc<AtomicU64>,
    emitted: Arc<AtomicU64>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra um observador
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&ChangeSignal) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(handler)));
        id
    }

    /// Remove um observador; `false` se já não existia
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.lock().unwrap_or_else(PoisonError::into_inner);
        let before = handlers.len();
        handlers.retain(|(handler_id, _)| *handler_id != id);
        handlers.len() != before
    }

    /// Remove todos os observadores
    pub fn clear(&self) {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    /// Emite o sinal para os observadores atuais
    ///
    /// Retorna quantos handlers foram chamados.
    pub fn emit(&self, signal: &ChangeSignal) -> usize {
        self.emitted.fetch_add(1, Ordering::Relaxed);
        // Snapshot: handlers podem se (des)inscrever durante a entrega
        let handlers: Vec<ChangeHandler> = self
            .handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();

        for handler in &handlers {
            handler(signal);
        }
        handlers.len()
    }

    /// Total de sinais emitidos
    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("handlers", &self.handler_count())
            .field("emitted", &self.emitted())
            .finish()
    }
}

/// Trata um evento assíncrono do dispositivo
///
/// Loga o código junto com uma leitura nova de `_ALI` (falha só é logada) e
/// emite exatamente um [`ChangeSignal`].
pub fn on_event<F: Firmware + ?Sized>(
    firmware: &F,
    methods: &MethodTable,
    device: &AcpiDevice,
    notifier: &ChangeNotifier,
    event: u32,
) {
    let code = format!("{event:#x}");
    match methods.get(SensorAttribute::Intensity) {
        Some(spec) => match firmware::invoke(firmware, spec.scope.bind(device), &spec.path, None) {
            Ok(intensity) => {
                tracing::info!(event = %code, intensity, "als notify");
            }
            Err(err) => {
                tracing::warn!(event = %code, %err, "als notify: intensity unavailable");
            }
        },
        None => tracing::info!(event = %code, "als notify"),
    }

    notifier.emit(&ChangeSignal {
        device: device.path.clone(),
    });
}
