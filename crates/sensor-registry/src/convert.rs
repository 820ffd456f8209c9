/// Fahrenheit equivalent of a Celsius value, rounded to one decimal place.
///
/// `f64::round` rounds halves away from zero, so 74.75 lands on 74.8.
pub fn fahrenheit(celsius: f64) -> f64 {
    round_tenth(celsius * 1.8 + 32.0)
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
