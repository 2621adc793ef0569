//! American money-line odds conversion.

use crate::error::{HardwoodError, Result};

/// Convert a win probability to American odds. Favorites (p >= 0.5) get
/// negative lines, underdogs positive. Probabilities at or outside the
/// open interval (0, 1) have no finite line and are rejected.
pub fn prob_to_american(p: f64) -> Result<i64> {
    if !p.is_finite() || p <= 0.0 || p >= 1.0 {
        return Err(HardwoodError::InvalidProbability(p));
    }
    let line = if p >= 0.5 {
        -(100.0 * p / (1.0 - p))
    } else {
        100.0 * (1.0 - p) / p
    };
    Ok(line.round() as i64)
}

/// Implied win probability of an American line (no vig removal).
pub fn american_to_prob(ml: i64) -> Result<f64> {
    if ml == 0 {
        return Err(HardwoodError::MalformedQuery(
            "American odds of 0 are undefined".to_string(),
        ));
    }
    let ml = ml as f64;
    if ml < 0.0 {
        Ok(-ml / (-ml + 100.0))
    } else {
        Ok(100.0 / (ml + 100.0))
    }
}
