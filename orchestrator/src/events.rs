use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Wallet-wide notifications
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletEvent {
    /// Prices or display decimals changed; re-read them now
    BalanceUpdate,
    AdvancedMode(bool),
    AutoLockWallet(bool),
}

impl WalletEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            WalletEvent::BalanceUpdate => EventKind::BalanceUpdate,
            WalletEvent::AdvancedMode(_) => EventKind::AdvancedMode,
            WalletEvent::AutoLockWallet(_) => EventKind::AutoLockWallet,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    BalanceUpdate,
    AdvancedMode,
    AutoLockWallet,
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::BalanceUpdate => "balance-update",
            EventKind::AdvancedMode => "advanced-mode",
            EventKind::AutoLockWallet => "auto-lock-wallet",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub type EventHandler = Arc<dyn Fn(&WalletEvent) + Send + Sync>;

/// Event bus connecting the price refresh to its listeners.
///
/// Handlers run synchronously on the emitting task, in registration order.
#[derive(Default)]
pub struct EventBus {
    handlers: RwLock<HashMap<EventKind, Vec<EventHandler>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one kind of event
    pub fn subscribe<F>(&self, kind: EventKind, handler: F)
    where
        F: Fn(&WalletEvent) + Send + Sync + 'static,
    {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(kind)
            .or_default()
            .push(Arc::new(handler));
    }

    /// Deliver `event` to every handler of its kind and return how many ran
    pub fn emit(&self, event: WalletEvent) -> usize {
        // Handlers may subscribe or emit themselves, so none run under the lock
        let handlers: Vec<EventHandler> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&event.kind())
            .cloned()
            .unwrap_or_default();

        debug!("📣 {} -> {} handler(s)", event.kind(), handlers.len());
        for handler in &handlers {
            handler(&event);
        }
        handlers.len()
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
            .map_or(0, Vec::len)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
        let counts: HashMap<&'static str, usize> = handlers
            .iter()
            .map(|(kind, list)| (kind.name(), list.len()))
            .collect();
        f.debug_struct("EventBus").field("handlers", &counts).finish()
    }
}
