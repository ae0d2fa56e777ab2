// Gamma source - where dealer gamma curves come from
//
// Either the live API or the synthetic demo curve. Both produce the same
// response type, so the table and TUI never know which one is behind them.

use crate::api::{
    gamma_columns, transform_gamma_data_for_table, ApiClient, ApiError, DealerGammaResponse,
    DealerGammaService,
};
use crate::config::Config;
use crate::demo::demo_gamma;
use crate::table::{CellValue, TableError, TableProps};

#[derive(Clone)]
pub enum GammaSource {
    Api(ApiClient),
    Demo,
}

impl GammaSource {
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        if config.demo_mode {
            return Ok(Self::Demo);
        }
        ApiClient::new(&config.api).map(Self::Api)
    }

    /// Short description for logs and the status bar
    pub fn label(&self) -> &str {
        match self {
            Self::Api(client) => client.base_url(),
            Self::Demo => "demo",
        }
    }

    pub async fn fetch(&self, symbol: &str) -> Result<DealerGammaResponse, ApiError> {
        match self {
            Self::Api(client) => DealerGammaService::new(client).get_gamma_data(symbol).await,
            Self::Demo => {
                let response = demo_gamma(symbol);
                tracing::info!(
                    "Generated {} demo gamma points for {}",
                    response.gammas.len(),
                    response.symbol
                );
                Ok(response)
            }
        }
    }
}

pub fn table_title(response: &DealerGammaResponse) -> String {
    format!(
        "{} dealer gamma (zero GEX {})",
        response.symbol,
        CellValue::from(response.zerogex)
    )
}

/// Table props for a fetched curve
pub fn gamma_table(
    response: &DealerGammaResponse,
    page_size: usize,
) -> Result<TableProps, TableError> {
    TableProps::new(gamma_columns()?)
        .with_data(transform_gamma_data_for_table(response))
        .with_title(table_title(response))
        .with_page_size(page_size)
}

/// Table props with no rows, used when the first fetch fails
pub fn empty_gamma_table(symbol: &str, page_size: usize) -> Result<TableProps, TableError> {
    TableProps::new(gamma_columns()?)
        .with_title(format!("{} dealer gamma (no data)", symbol))
        .with_page_size(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_source_serves_synthetic_curve() {
        let config = Config {
            demo_mode: true,
            ..Config::default()
        };
        let source = GammaSource::from_config(&config).unwrap();
        assert_eq!(source.label(), "demo");

        let response = source.fetch("qqq").await.unwrap();
        assert_eq!(response.symbol, "QQQ");
        assert!(!response.gammas.is_empty());
    }

    #[test]
    fn api_source_reports_base_url() {
        let config = Config::default();
        let source = GammaSource::from_config(&config).unwrap();
        assert_eq!(source.label(), config.api.base_url);
    }

    #[test]
    fn gamma_table_paginates_records() {
        let response = demo_gamma("SPY");
        let props = gamma_table(&response, 10).unwrap();
        assert_eq!(props.data.len(), response.gammas.len());
        assert_eq!(props.total_pages(), response.gammas.len().div_ceil(10));
        assert_eq!(
            props.title.as_deref(),
            Some("SPY dealer gamma (zero GEX 440)")
        );
    }

    #[test]
    fn zero_page_size_is_an_error() {
        let response = demo_gamma("SPY");
        assert_eq!(gamma_table(&response, 0).unwrap_err(), TableError::ZeroPageSize);
    }

    #[test]
    fn empty_table_has_no_pages() {
        let props = empty_gamma_table("SPY", 10).unwrap();
        assert!(props.data.is_empty());
        assert_eq!(props.total_pages(), 0);
    }
}
