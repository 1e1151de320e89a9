/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor).round() / factor;

    // avoid serializing "-0.0"
    if rounded == 0.0 { 0.0 } else { rounded }
}
