use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;

/// Round to 2 fractional digits, half-up (away from zero).
///
/// Every monetary field in the crate goes through this helper so that
/// combination ranking ties are reproducible.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Derived price of a single one-way offer. Immutable once computed;
/// `total = fare + fee` holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct PriceBreakdown {
    pub fare: f64,
    pub fee: f64,
    pub total: f64,
}

/// Derive the full price from a base fare.
///
/// The fee is 10% of the fare with a minimum of R$40. A negative fare is a
/// provider contract violation and is rejected.
pub fn price(fare: f64) -> Result<PriceBreakdown, InvalidInput> {
    if fare < 0.0 {
        return Err(InvalidInput::NegativeFare(fare));
    }
    let fee = (fare * 0.10).max(40.0);
    let total = fare + fee;
    Ok(PriceBreakdown {
        fare: round2(fare),
        fee: round2(fee),
        total: round2(total),
    })
}
