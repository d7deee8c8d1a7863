use super::entities::{CalculatorLine, MarketSnapshot};
use super::valuation::MARGIN_DEFAULT;

/// Everything the UI shares through context.
#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    /// Latest completed refresh; `None` until the first fetch lands.
    pub snapshot: Option<MarketSnapshot>,
    pub calc_lines: Vec<CalculatorLine>,
    pub margin_percent: u32,
    pub trader_mode: bool,
    /// Overrides the built-in spot API key when set in Settings.
    pub api_key_override: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            snapshot: None,
            calc_lines: Vec::new(),
            margin_percent: MARGIN_DEFAULT,
            trader_mode: false,
            api_key_override: None,
        }
    }
}

impl AppState {
    pub fn catalogue(&self) -> &[crate::domain::entities::YardPrice] {
        self.snapshot
            .as_ref()
            .map(|snapshot| snapshot.catalogue.as_slice())
            .unwrap_or(&[])
    }

    pub fn spot_prices(&self) -> &[crate::domain::entities::SpotPrice] {
        self.snapshot
            .as_ref()
            .map(|snapshot| snapshot.spot_set.as_slice())
            .unwrap_or(&[])
    }
}
