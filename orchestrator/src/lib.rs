//! Price display orchestration for the B1T wallet: the refresh cycle, the
//! event bus it broadcasts on, and the settings view fed by that bus.

pub mod context;
pub mod currency_menu;
pub mod events;
pub mod refresh;
pub mod settings;

pub use context::AppContext;
pub use currency_menu::{CurrencyMenu, MenuOption};
pub use events::{EventBus, EventKind, WalletEvent};
pub use refresh::{RefreshOrchestrator, RefreshReport};
pub use settings::{SettingsBridge, SettingsStore, WalletSettings};
