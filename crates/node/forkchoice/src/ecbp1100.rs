//! ECBP-1100 "MESS" (Modified Exponential Subjective Scoring).
//!
//! A reorg is only accepted if the work of the proposed subchain, relative to the local
//! subchain, exceeds an antigravity factor that grows with the time elapsed since the common
//! ancestor. The factor follows a cubic curve from 1x at zero seconds to 31x at [`XCAP`]
//! seconds (about 7 hours), and stays at 31x beyond.
//!
//! See <https://ecips.ethereumclassic.org/ECIPs/ecip-1100>.

use crate::{PolicyError, ReorgPolicy};
use alloy_primitives::{B256, U256};
use forkline_storage::SealedHeader;

/// Fixed-point denominator of the curve.
pub const CURVE_FUNCTION_DENOMINATOR: u64 = 128;

/// Seconds after which the curve stops growing.
pub const XCAP: u64 = 25_132;

/// Maximum antigravity factor above 1x.
pub const AMPLITUDE: u64 = 15;

/// Height of the curve in fixed point, `CURVE_FUNCTION_DENOMINATOR * AMPLITUDE * 2`.
pub const HEIGHT: u64 = CURVE_FUNCTION_DENOMINATOR * AMPLITUDE * 2;

/// Evaluates the antigravity curve at `x` seconds, scaled by [`CURVE_FUNCTION_DENOMINATOR`].
///
/// `128 + (3x² - 2x³/xcap) * height / xcap²`, with `x` capped at [`XCAP`].
pub fn polynomial_v(x: u64) -> U256 {
    let x = U256::from(x.min(XCAP));
    let xcap = U256::from(XCAP);

    let square = x * x * U256::from(3);
    let cube = x * x * x * U256::from(2) / xcap;
    (square - cube) * U256::from(HEIGHT) / (xcap * xcap) + U256::from(CURVE_FUNCTION_DENOMINATOR)
}

/// The ECBP-1100 [`ReorgPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Ecbp1100;

impl ReorgPolicy for Ecbp1100 {
    fn check(
        &self,
        ancestor: &SealedHeader,
        current: &SealedHeader,
        proposed: &SealedHeader,
        td: &dyn Fn(B256, u64) -> Option<U256>,
    ) -> Result<(), PolicyError> {
        let lookup = |header: &SealedHeader| {
            td(header.hash(), header.number()).ok_or(PolicyError::MissingTotalDifficulty {
                hash: header.hash(),
                number: header.number(),
            })
        };
        let ancestor_td = lookup(ancestor)?;
        let local_subchain = lookup(current)?.saturating_sub(ancestor_td);
        let proposed_subchain = lookup(proposed)?.saturating_sub(ancestor_td);

        let span = current.timestamp.saturating_sub(ancestor.timestamp);
        let want = polynomial_v(span) * local_subchain;
        let got = proposed_subchain * U256::from(CURVE_FUNCTION_DENOMINATOR);

        if got < want {
            return Err(PolicyError::Suppressed { ancestor: ancestor.number(), span, got, want });
        }
        Ok(())
    }
}
