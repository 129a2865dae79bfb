use primitive_types::U256;
use rust_decimal::Decimal;

/// Smallest-unit amount to whole coins, e.g. sha -> MOAC with `decimals = 18`.
/// `None` when the value does not fit a `Decimal` mantissa (96 bits).
pub fn to_decimal_units(amount: U256, decimals: u32) -> Option<Decimal> {
    if amount.bits() > 96 {
        return None;
    }
    Decimal::try_from_i128_with_scale(amount.low_u128() as i128, decimals)
        .ok()
        .map(|d| d.normalize())
}
