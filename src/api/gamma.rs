//! Dealer gamma endpoint
//!
//! Fetches a symbol's gamma curve and flattens it into table records.

use super::{ApiClient, ApiError, DEALER_GAMMA};
use crate::table::{Column, Columns, Record, TableError};
use serde::{Deserialize, Serialize};

/// Single gamma point with strike price and gamma value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GammaPoint {
    pub strike: f64,
    pub gamma: f64,
}

/// Complete dealer gamma response from the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealerGammaResponse {
    pub symbol: String,
    /// Zero gamma exchange level
    pub zerogex: f64,
    pub gammas: Vec<GammaPoint>,
}

/// Dealer gamma operations over a borrowed client
pub struct DealerGammaService<'a> {
    client: &'a ApiClient,
}

impl<'a> DealerGammaService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Fetch dealer gamma data for `symbol` (e.g. "SPY")
    pub async fn get_gamma_data(&self, symbol: &str) -> Result<DealerGammaResponse, ApiError> {
        let response: DealerGammaResponse = self
            .client
            .get_with_segments(DEALER_GAMMA, &[symbol], &[])
            .await?;

        tracing::info!(
            "Fetched {} gamma points for {} (zero GEX {})",
            response.gammas.len(),
            response.symbol,
            response.zerogex
        );

        Ok(response)
    }
}

/// One record per gamma point carrying the response's symbol and zero GEX,
/// in response order
pub fn transform_gamma_data_for_table(data: &DealerGammaResponse) -> Vec<Record> {
    data.gammas
        .iter()
        .map(|point| {
            Record::new()
                .with("symbol", data.symbol.as_str())
                .with("zerogex", data.zerogex)
                .with("strike", point.strike)
                .with("gamma", point.gamma)
        })
        .collect()
}

/// Columns for records produced by [`transform_gamma_data_for_table`]
pub fn gamma_columns() -> Result<Columns, TableError> {
    Columns::new(vec![
        Column::new("symbol", "Symbol"),
        Column::new("zerogex", "Zero GEX").sortable(),
        Column::new("strike", "Strike").sortable(),
        Column::new("gamma", "Gamma").sortable(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CellValue;
    use axum::{extract::Path, http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    fn spy() -> DealerGammaResponse {
        DealerGammaResponse {
            symbol: "SPY".to_string(),
            zerogex: 4500.0,
            gammas: vec![
                GammaPoint {
                    strike: 440.0,
                    gamma: 0.02,
                },
                GammaPoint {
                    strike: 450.0,
                    gamma: 0.05,
                },
            ],
        }
    }

    #[test]
    fn transform_flattens_points_in_order() {
        let records = transform_gamma_data_for_table(&spy());
        let expected = vec![
            Record::new()
                .with("symbol", "SPY")
                .with("zerogex", 4500.0)
                .with("strike", 440.0)
                .with("gamma", 0.02),
            Record::new()
                .with("symbol", "SPY")
                .with("zerogex", 4500.0)
                .with("strike", 450.0)
                .with("gamma", 0.05),
        ];
        assert_eq!(records, expected);
    }

    #[test]
    fn transform_of_empty_curve_is_empty() {
        let mut response = spy();
        response.gammas.clear();
        assert!(transform_gamma_data_for_table(&response).is_empty());
    }

    #[test]
    fn response_parses_from_wire_json() {
        let response: DealerGammaResponse = serde_json::from_value(json!({
            "symbol": "SPY",
            "zerogex": 4500,
            "gammas": [{"strike": 440, "gamma": 0.02}, {"strike": 450, "gamma": 0.05}]
        }))
        .unwrap();
        assert_eq!(response, spy());
    }

    #[test]
    fn gamma_columns_are_a_valid_set() {
        let columns = gamma_columns().unwrap();
        assert_eq!(columns.len(), 4);
        let keys: Vec<&str> = columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["symbol", "zerogex", "strike", "gamma"]);
    }

    #[test]
    fn gamma_columns_match_record_keys() {
        let columns = gamma_columns().unwrap();
        let record = &transform_gamma_data_for_table(&spy())[0];
        for column in &columns {
            assert!(!matches!(record.get(&column.key), CellValue::Absent));
        }
        assert!(columns.sortable("symbol").is_none());
        assert!(columns.sortable("strike").is_some());
    }

    #[tokio::test]
    async fn fetches_symbol_path() {
        let app = Router::new().route(
            "/dealergamma/:symbol",
            get(|Path(symbol): Path<String>| async move {
                if symbol == "SPY" {
                    Ok(Json(json!({
                        "symbol": symbol,
                        "zerogex": 4500,
                        "gammas": [{"strike": 440, "gamma": 0.02}, {"strike": 450, "gamma": 0.05}]
                    })))
                } else {
                    Err((StatusCode::NOT_FOUND, Json(json!({"error": "not found"}))))
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        let client = ApiClient::with_client(http, format!("http://{}", addr));
        let service = DealerGammaService::new(&client);

        let response = service.get_gamma_data("SPY").await.unwrap();
        assert_eq!(response, spy());
        assert_eq!(transform_gamma_data_for_table(&response).len(), 2);

        let err = service.get_gamma_data("QQQ").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn symbol_with_reserved_characters_stays_one_segment() {
        let app = Router::new().route(
            "/dealergamma/:symbol",
            get(|Path(symbol): Path<String>| async move {
                Json(json!({"symbol": symbol, "zerogex": 0, "gammas": []}))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        let client = ApiClient::with_client(http, format!("http://{}", addr));
        let service = DealerGammaService::new(&client);

        for symbol in ["BRK/B", "A#B", "C?D"] {
            let response = service.get_gamma_data(symbol).await.unwrap();
            assert_eq!(response.symbol, symbol);
        }
    }
}
