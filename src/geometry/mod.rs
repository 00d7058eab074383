pub mod compass;
pub mod layout;
pub mod slots;
pub mod speed;

/// Formats `value` with `decimals` fraction digits, rounding ties away from
/// zero ("260.5" reads "261"). `format!` alone rounds ties to even.
pub fn to_fixed(value: f64, decimals: usize) -> String {
    let factor = 10f64.powi(decimals as i32);
    format!("{:.*}", decimals, (value * factor).round() / factor)
}
