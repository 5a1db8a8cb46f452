//! Shared application state: the basket and provider, built once at startup
//! and injected into handlers.

use crate::config::ServerConfig;
use corrlab_core::data::provider::MarketDataProvider;
use corrlab_core::data::yahoo::YahooProvider;
use corrlab_core::TickerBasket;

pub struct AppState {
    pub basket: TickerBasket,
    pub provider: Box<dyn MarketDataProvider + Send + Sync>,
    pub window_years: u32,
}

impl AppState {
    pub fn new(cfg: &ServerConfig) -> anyhow::Result<Self> {
        let basket = match &cfg.basket_path {
            Some(path) => TickerBasket::from_file(path)?,
            None => TickerBasket::default_indices(),
        };

        Ok(Self {
            basket,
            provider: Box::new(YahooProvider::new()?),
            window_years: cfg.window_years,
        })
    }

    #[cfg(test)]
    pub fn with_provider(
        basket: TickerBasket,
        provider: Box<dyn MarketDataProvider + Send + Sync>,
    ) -> Self {
        Self {
            basket,
            provider,
            window_years: 5,
        }
    }
}
