use chrono::prelude::*;

/// Current time from JavaScript's clock; chrono's `Utc::now` is unavailable
/// on wasm32 without the clock feature.
pub(crate) fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

/// Board seed from JavaScript's Math.random, one 32-bit draw per half.
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    let hi = (random() * f64::from(u32::MAX)) as u64;
    let lo = (random() * f64::from(u32::MAX)) as u64;
    (hi << 32) | lo
}
