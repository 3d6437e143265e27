use b1t_common::Currency;
use std::sync::{PoisonError, RwLock};

/// One entry of the currency selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    /// Code passed back to the market source, spelled as the source listed it
    pub value: Currency,
    pub label: String,
}

#[derive(Debug, Default)]
struct MenuState {
    options: Vec<MenuOption>,
    selected: Option<Currency>,
}

/// Display-currency selector, rebuilt from the active market source
#[derive(Debug, Default)]
pub struct CurrencyMenu {
    state: RwLock<MenuState>,
}

impl CurrencyMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the options with `currencies` and select the one matching
    /// `preferred`, falling back to the first option. An empty list keeps the
    /// current menu untouched.
    pub fn fill(&self, currencies: &[Currency], preferred: &Currency) {
        if currencies.is_empty() {
            return;
        }

        let mut options: Vec<MenuOption> = Vec::with_capacity(currencies.len());
        for currency in currencies {
            if options.iter().any(|o| currency.eq_ignore_case(o.value.as_str())) {
                continue;
            }
            options.push(MenuOption {
                value: currency.clone(),
                label: currency.as_str().to_ascii_uppercase(),
            });
        }

        let selected = options
            .iter()
            .find(|o| o.value.eq_ignore_case(preferred.as_str()))
            .or_else(|| options.first())
            .map(|o| o.value.clone());

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.options = options;
        state.selected = selected;
    }

    pub fn options(&self) -> Vec<MenuOption> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .options
            .clone()
    }

    pub fn selected(&self) -> Option<Currency> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .selected
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .options
            .is_empty()
    }
}
