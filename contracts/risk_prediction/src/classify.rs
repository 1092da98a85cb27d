use crate::errors::Error;
use crate::types::RiskBand;

/// Highest representable probability in basis points (1.0).
pub const MAX_SCORE_BPS: u32 = 10_000;

/// Scores below this are `Low` (0.30).
pub const LOW_BAND_CEILING_BPS: u32 = 3_000;

/// Scores at or above this are `High` (0.70).
pub const HIGH_BAND_FLOOR_BPS: u32 = 7_000;

/// Classifies a risk score into its ordinal band.
///
/// Bands are closed on the lower edge and open on the upper edge, except
/// `High` which is closed at `MAX_SCORE_BPS`. A score above `MAX_SCORE_BPS`
/// is a scorer defect and is rejected, never clamped.
pub fn classify(score: u32) -> Result<RiskBand, Error> {
    if score > MAX_SCORE_BPS {
        return Err(Error::InvalidScore);
    }
    if score < LOW_BAND_CEILING_BPS {
        Ok(RiskBand::Low)
    } else if score < HIGH_BAND_FLOOR_BPS {
        Ok(RiskBand::Medium)
    } else {
        Ok(RiskBand::High)
    }
}
