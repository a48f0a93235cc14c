//! Land-measurement unit conversion.
//!
//! Fixed divisors from square feet into the two regional units the report
//! shows alongside it.

/// Square feet per shotok.
pub const SQFT_PER_SHOTOK: f64 = 435.6;
/// Square feet per katha.
pub const SQFT_PER_KATHA: f64 = 720.0;

/// An area expressed in every display unit at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaBreakdown {
    pub sq_ft: f64,
    pub shotok: f64,
    pub katha: f64,
}

impl AreaBreakdown {
    /// Convert a square-feet figure into all display units.
    pub fn from_sq_ft(sq_ft: f64) -> Self {
        Self {
            sq_ft,
            shotok: sq_ft / SQFT_PER_SHOTOK,
            katha: sq_ft / SQFT_PER_KATHA,
        }
    }
}
