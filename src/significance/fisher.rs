//! Fisher's Exact Test on a single 2×2 table
//!
//! Two-sided test: the p-value is the total probability of every table with the
//! observed margins that is no more probable than the observed table, under the
//! hypergeometric distribution of the top-left cell.

use crate::error::{Error, Result};
use statrs::distribution::{Discrete, Hypergeometric};

/// Relative tolerance when comparing table probabilities against the observed one
const RELATIVE_TOLERANCE: f64 = 1e-7;

/// Outcome of one test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FisherResult {
    /// Sample odds ratio `a·d / (b·c)` (∞ when `b` or `c` is zero, NaN for empty margins)
    pub odds_ratio: f64,
    /// Two-sided p-value in `[0, 1]`
    pub p_value: f64,
}

/// Run Fisher's exact test on `[[a, b], [c, d]]`
///
/// Cells are counts; non-integral values are rounded to the nearest integer
/// (negatives and NaN become 0), so `a = 0.4` is tested as `a = 0`. Callers that
/// compare `a` against its expected frequency, such as the signed log score in
/// [`apply_fishers`](super::apply_fishers), use the unrounded value.
///
/// Edge cases:
/// - Any row or column margin is zero → odds ratio NaN, p-value 1.0
/// - `b == 0` or `c == 0` (with non-empty margins) → odds ratio +∞
pub fn fisher_exact(a: f64, b: f64, c: f64, d: f64) -> Result<FisherResult> {
    let (a, b, c, d) = (to_count(a), to_count(b), to_count(c), to_count(d));

    if a + b == 0 || c + d == 0 || a + c == 0 || b + d == 0 {
        return Ok(FisherResult {
            odds_ratio: f64::NAN,
            p_value: 1.0,
        });
    }

    let odds_ratio = if b > 0 && c > 0 {
        (a as f64 * d as f64) / (b as f64 * c as f64)
    } else {
        f64::INFINITY
    };

    let population = a + b + c + d;
    let successes = a + b;
    let draws = a + c;
    let hyper = Hypergeometric::new(population, successes, draws)
        .map_err(|e| Error::Distribution(e.to_string()))?;

    // Support of the top-left cell given the margins
    let lo = (draws + successes).saturating_sub(population);
    let hi = draws.min(successes);

    let observed = hyper.ln_pmf(a);
    let threshold = observed + RELATIVE_TOLERANCE.ln_1p();

    let p_value: f64 = (lo..=hi)
        .map(|x| hyper.ln_pmf(x))
        .filter(|&ln_p| ln_p <= threshold)
        .map(f64::exp)
        .sum();

    tracing::trace!(
        "Fisher [[{}, {}], [{}, {}]]: odds_ratio={}, p={}",
        a,
        b,
        c,
        d,
        odds_ratio,
        p_value
    );

    Ok(FisherResult {
        odds_ratio,
        p_value: p_value.min(1.0),
    })
}

fn to_count(value: f64) -> u64 {
    // NaN and negatives saturate to 0
    value.round() as u64
}
