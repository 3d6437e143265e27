use crate::currency_menu::CurrencyMenu;
use crate::events::EventBus;
use crate::refresh::RefreshOrchestrator;
use crate::settings::{SettingsBridge, SettingsStore, WalletSettings};
use anyhow::{Context, Result};
use b1t_common::{AppConfig, ChainParams, Currency, MarketConfig, MarketSourceKind, Network};
use b1t_market::{HttpTransport, MarketSelection, MarketSource, PriceSource, ReqwestTransport};
use std::sync::Arc;
use std::time::Duration;

/// Everything the price display needs, wired once at startup
pub struct AppContext {
    network: Network,
    market_config: MarketConfig,
    transport: Arc<dyn HttpTransport>,
    selection: Arc<MarketSelection>,
    settings: Arc<SettingsStore>,
    event_bus: Arc<EventBus>,
    menu: Arc<CurrencyMenu>,
}

impl AppContext {
    /// Build a context backed by a real HTTP client
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let timeout = config.market.request_timeout_secs.map(Duration::from_secs);
        let transport = ReqwestTransport::new(timeout).context("failed to create HTTP transport")?;
        Ok(Self::new(config, Arc::new(transport)))
    }

    pub fn new(config: &AppConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let source = MarketSource::from_config(config.market.source, &config.market, transport.clone());

        Self {
            network: config.network,
            market_config: config.market.clone(),
            transport,
            selection: Arc::new(MarketSelection::new(source)),
            settings: Arc::new(SettingsStore::new(WalletSettings::from(&config.display))),
            event_bus: Arc::new(EventBus::new()),
            menu: Arc::new(CurrencyMenu::new()),
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn chain_params(&self) -> &'static ChainParams {
        ChainParams::for_network(self.network)
    }

    pub fn selection(&self) -> &Arc<MarketSelection> {
        &self.selection
    }

    pub fn settings(&self) -> &Arc<SettingsStore> {
        &self.settings
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    pub fn menu(&self) -> &Arc<CurrencyMenu> {
        &self.menu
    }

    pub fn refresher(&self) -> RefreshOrchestrator {
        RefreshOrchestrator::new(
            self.selection.clone(),
            self.menu.clone(),
            self.settings.clone(),
            self.event_bus.clone(),
        )
    }

    pub fn settings_bridge(&self) -> SettingsBridge {
        SettingsBridge::attach(&self.event_bus, self.settings.clone())
    }

    /// Switch the active market source. The new source starts with an empty
    /// cache; callers refresh afterwards to repopulate the display.
    pub fn select_market(&self, kind: MarketSourceKind) {
        if self.selection.kind() == kind {
            return;
        }
        let source = MarketSource::from_config(kind, &self.market_config, self.transport.clone());
        self.selection.select(source);
    }

    pub fn display_currency(&self) -> Currency {
        self.settings.currency()
    }

    /// Price of one coin in the display currency, `0.0` when unknown
    pub async fn current_price(&self) -> f64 {
        let currency = self.settings.currency();
        self.selection.current().get_price(&currency).await
    }
}
