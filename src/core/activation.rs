//! Activation functions shared by the hidden and output layers.

/// Rectified linear unit: `max(0, x)`
///
/// NaN maps to zero.
#[inline]
pub fn relu(x: f64) -> f64 {
    if x > 0.0 { x } else { 0.0 }
}

/// Logistic sigmoid: `1 / (1 + e^-x)`, bounded to (0, 1)
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Hyperbolic tangent, bounded to (-1, 1)
#[inline]
pub fn tanh(x: f64) -> f64 {
    x.tanh()
}

/// Softplus (smooth ReLU): `ln(1 + e^x)`
///
/// Above 20 the correction term is below f64 precision, so `x` is returned
/// directly to avoid overflow in `exp`.
#[inline]
pub fn softplus(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp().ln_1p() }
}

/// Clamp into [0, 1], mapping NaN to 0
#[inline]
pub fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}
