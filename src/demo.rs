// Demo mode: a synthetic dealer gamma curve for running without the API
//
// The curve is deterministic: a strike ladder around a spot level with gamma
// shaped like a bell that flips sign below the zero gamma level.
//
// Run with: gamma-table --demo   (or GAMMA_TABLE_DEMO=1)

use crate::api::{DealerGammaResponse, GammaPoint};

/// Spacing between strikes
const STRIKE_STEP: f64 = 5.0;

/// Strikes on each side of spot
const STRIKES_PER_SIDE: i32 = 20;

/// Spot level per known symbol; anything else gets a generic 100
fn spot_for(symbol: &str) -> f64 {
    match symbol.to_uppercase().as_str() {
        "SPY" => 450.0,
        "QQQ" => 380.0,
        "IWM" => 190.0,
        "SPX" => 4500.0,
        _ => 100.0,
    }
}

/// Build a demo response for `symbol`
pub fn demo_gamma(symbol: &str) -> DealerGammaResponse {
    let spot = spot_for(symbol);
    let zerogex = spot - 2.0 * STRIKE_STEP;
    let width = STRIKE_STEP * STRIKES_PER_SIDE as f64 / 2.0;

    let gammas = (-STRIKES_PER_SIDE..=STRIKES_PER_SIDE)
        .map(|i| {
            let strike = spot + i as f64 * STRIKE_STEP;
            let distance = (strike - spot) / width;
            let magnitude = (-distance * distance).exp() * 0.08;
            let sign = if strike < zerogex { -1.0 } else { 1.0 };
            GammaPoint {
                strike,
                gamma: (sign * magnitude * 10_000.0).round() / 10_000.0,
            }
        })
        .collect();

    DealerGammaResponse {
        symbol: symbol.to_uppercase(),
        zerogex,
        gammas,
    }
}
