use crate::currency_menu::CurrencyMenu;
use crate::events::{EventBus, WalletEvent};
use crate::settings::SettingsStore;
use b1t_common::{Currency, MarketSourceKind};
use b1t_market::{FetchOutcome, MarketSelection, PriceSource};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info};

/// What one refresh did
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshReport {
    /// New data arrived; the menu was rebuilt and `balance-update` sent
    Refreshed {
        source: MarketSourceKind,
        currencies: Vec<Currency>,
    },
    /// The fetch failed; displays keep their previous values
    Skipped { source: MarketSourceKind },
}

impl RefreshReport {
    pub fn is_refreshed(&self) -> bool {
        matches!(self, RefreshReport::Refreshed { .. })
    }
}

/// Price refresh cycle: market source → currency menu → `balance-update`
#[derive(Clone)]
pub struct RefreshOrchestrator {
    selection: Arc<MarketSelection>,
    menu: Arc<CurrencyMenu>,
    settings: Arc<SettingsStore>,
    event_bus: Arc<EventBus>,
}

impl RefreshOrchestrator {
    pub fn new(
        selection: Arc<MarketSelection>,
        menu: Arc<CurrencyMenu>,
        settings: Arc<SettingsStore>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            selection,
            menu,
            settings,
            event_bus,
        }
    }

    /// Refresh market data from the selected source and, only if that
    /// succeeded, rebuild the currency menu and broadcast `balance-update`.
    pub async fn refresh_price_display(&self) -> RefreshReport {
        let source = self.selection.current();
        let kind = source.kind();

        match source.fetch().await {
            FetchOutcome::Updated(_) => {
                let currencies = source.get_currencies().await;
                self.menu.fill(&currencies, &self.settings.currency());
                self.event_bus.emit(WalletEvent::BalanceUpdate);
                RefreshReport::Refreshed {
                    source: kind,
                    currencies,
                }
            }
            FetchOutcome::Retained => {
                if let Some(entry) = source.cached().await {
                    debug!(
                        "{}: showing data fetched {}s ago",
                        source.name(),
                        entry.age().num_seconds()
                    );
                }
                RefreshReport::Skipped { source: kind }
            }
        }
    }

    /// Refresh every `period` until `shutdown` flips to `true` or its sender
    /// is dropped. The first refresh runs immediately.
    pub async fn run(&self, period: Duration, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.refresh_price_display().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Price refresh loop stopped");
                        break;
                    }
                }
            }
        }
    }
}
