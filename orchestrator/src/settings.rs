use crate::events::{EventBus, EventKind, WalletEvent};
use b1t_common::{Currency, DisplayConfig};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::watch;
use tracing::info;

/// User-facing wallet settings
#[derive(Debug, Clone, PartialEq)]
pub struct WalletSettings {
    pub currency: Currency,
    pub display_decimals: u32,
    pub advanced_mode: bool,
    pub auto_lock_wallet: bool,
}

impl From<&DisplayConfig> for WalletSettings {
    fn from(config: &DisplayConfig) -> Self {
        Self {
            currency: config.currency.clone(),
            display_decimals: config.decimals,
            advanced_mode: config.advanced_mode,
            auto_lock_wallet: config.auto_lock_wallet,
        }
    }
}

/// Owner of the wallet settings. Every change is announced on the bus.
#[derive(Debug)]
pub struct SettingsStore {
    settings: RwLock<WalletSettings>,
}

impl SettingsStore {
    pub fn new(settings: WalletSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }

    pub fn snapshot(&self) -> WalletSettings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn currency(&self) -> Currency {
        self.snapshot().currency
    }

    pub fn display_decimals(&self) -> u32 {
        self.snapshot().display_decimals
    }

    pub fn advanced_mode(&self) -> bool {
        self.snapshot().advanced_mode
    }

    pub fn auto_lock_wallet(&self) -> bool {
        self.snapshot().auto_lock_wallet
    }

    pub fn set_advanced_mode(&self, bus: &EventBus, enabled: bool) {
        self.update(|s| s.advanced_mode = enabled);
        info!("Advanced mode {}", if enabled { "enabled" } else { "disabled" });
        bus.emit(WalletEvent::AdvancedMode(enabled));
    }

    pub fn set_auto_lock_wallet(&self, bus: &EventBus, enabled: bool) {
        self.update(|s| s.auto_lock_wallet = enabled);
        bus.emit(WalletEvent::AutoLockWallet(enabled));
    }

    pub fn set_display_decimals(&self, bus: &EventBus, decimals: u32) {
        self.update(|s| s.display_decimals = decimals);
        bus.emit(WalletEvent::BalanceUpdate);
    }

    pub fn set_currency(&self, bus: &EventBus, currency: Currency) {
        self.update(|s| s.currency = currency);
        bus.emit(WalletEvent::BalanceUpdate);
    }

    fn update(&self, apply: impl FnOnce(&mut WalletSettings)) {
        let mut settings = self.settings.write().unwrap_or_else(PoisonError::into_inner);
        apply(&mut settings);
    }
}

/// Read-only, observable view of the display settings.
///
/// The cells change only in response to bus events; the bridge never
/// writes settings back.
#[derive(Debug, Clone)]
pub struct SettingsBridge {
    advanced_mode: watch::Receiver<bool>,
    display_decimals: watch::Receiver<u32>,
    auto_lock_wallet: watch::Receiver<bool>,
}

impl SettingsBridge {
    /// Subscribe to the bus. Advanced mode starts from the store, decimals
    /// at 0 until the first `balance-update`, and auto-lock at `false`.
    pub fn attach(bus: &EventBus, store: Arc<SettingsStore>) -> Self {
        let (advanced_tx, advanced_mode) = watch::channel(store.advanced_mode());
        let (decimals_tx, display_decimals) = watch::channel(0);
        let (auto_lock_tx, auto_lock_wallet) = watch::channel(false);

        bus.subscribe(EventKind::AdvancedMode, move |event| {
            if let WalletEvent::AdvancedMode(enabled) = event {
                advanced_tx.send_replace(*enabled);
            }
        });
        bus.subscribe(EventKind::BalanceUpdate, move |_| {
            decimals_tx.send_replace(store.display_decimals());
        });
        bus.subscribe(EventKind::AutoLockWallet, move |event| {
            if let WalletEvent::AutoLockWallet(enabled) = event {
                auto_lock_tx.send_replace(*enabled);
            }
        });

        Self {
            advanced_mode,
            display_decimals,
            auto_lock_wallet,
        }
    }

    pub fn advanced_mode(&self) -> bool {
        *self.advanced_mode.borrow()
    }

    pub fn display_decimals(&self) -> u32 {
        *self.display_decimals.borrow()
    }

    pub fn auto_lock_wallet(&self) -> bool {
        *self.auto_lock_wallet.borrow()
    }

    pub fn watch_advanced_mode(&self) -> watch::Receiver<bool> {
        self.advanced_mode.clone()
    }

    pub fn watch_display_decimals(&self) -> watch::Receiver<u32> {
        self.display_decimals.clone()
    }

    pub fn watch_auto_lock_wallet(&self) -> watch::Receiver<bool> {
        self.auto_lock_wallet.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Arc<SettingsStore> {
        Arc::new(SettingsStore::new(WalletSettings::from(&DisplayConfig::default())))
    }

    #[test]
    fn test_initial_cells() {
        let bus = EventBus::new();
        let store = store();
        store.update(|s| s.advanced_mode = true);

        let bridge = SettingsBridge::attach(&bus, store);

        assert!(bridge.advanced_mode());
        assert_eq!(bridge.display_decimals(), 0);
        assert!(!bridge.auto_lock_wallet());
    }

    #[test]
    fn test_balance_update_reads_decimals() {
        let bus = EventBus::new();
        let store = store();
        let bridge = SettingsBridge::attach(&bus, store.clone());

        bus.emit(WalletEvent::BalanceUpdate);
        assert_eq!(bridge.display_decimals(), 2);

        store.set_display_decimals(&bus, 6);
        assert_eq!(bridge.display_decimals(), 6);
    }

    #[test]
    fn test_store_setters_announce_changes() {
        let bus = EventBus::new();
        let store = store();
        let bridge = SettingsBridge::attach(&bus, store.clone());

        store.set_advanced_mode(&bus, true);
        store.set_auto_lock_wallet(&bus, true);

        assert!(bridge.advanced_mode());
        assert!(bridge.auto_lock_wallet());
        assert!(store.auto_lock_wallet());
    }

    #[test]
    fn test_set_currency_announces_balance_update() {
        let bus = EventBus::new();
        let store = store();
        let updates = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = updates.clone();
        bus.subscribe(EventKind::BalanceUpdate, move |_| {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        });
        let bridge = SettingsBridge::attach(&bus, store.clone());

        store.set_currency(&bus, Currency::new("eur"));

        assert_eq!(updates.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert_eq!(store.currency(), Currency::new("eur"));
        // The bridge re-read decimals on the same event
        assert_eq!(bridge.display_decimals(), 2);
    }

    #[test]
    fn test_bridge_ignores_direct_store_writes() {
        let bus = EventBus::new();
        let store = store();
        let bridge = SettingsBridge::attach(&bus, store.clone());

        // No event, no change
        store.update(|s| s.display_decimals = 4);

        assert_eq!(bridge.display_decimals(), 0);
    }

    #[tokio::test]
    async fn test_watchers_are_notified() {
        let bus = EventBus::new();
        let bridge = SettingsBridge::attach(&bus, store());
        let mut advanced = bridge.watch_advanced_mode();

        bus.emit(WalletEvent::AdvancedMode(true));

        advanced.changed().await.unwrap();
        assert!(*advanced.borrow());
    }
}
