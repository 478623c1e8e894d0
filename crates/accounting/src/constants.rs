/// Quantity threshold below which a position counts as flat.
/// Absorbs floating-point drift accumulated over long transaction histories.
pub const QUANTITY_THRESHOLD: &str = "0.000001";

/// Decimal precision for reported calculation results.
pub const DECIMAL_PRECISION: u32 = 6;

/// Rounding scale for intermediate cost-basis arithmetic.
pub const ROUNDING_SCALE: u32 = 8;
