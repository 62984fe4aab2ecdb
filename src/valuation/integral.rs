//! Exact definite integration
//!
//! Every integrand the models use is elementary, so each family carries its
//! closed-form antiderivative and a definite integral is `F(b) - F(a)`.
//! No quadrature.
//!
//! The exponential families are written so that `F(0) = 0` and the
//! `1/rate` terms cancel analytically. Near `rate * x = 0` the remaining
//! factors are summed as power series instead of being formed from
//! `e^(-rate * x)` directly.

use super::ValuationError;

/// Below this `|rate * x|` the series forms are used
const SERIES_CUTOFF: f64 = 0.5;
const SERIES_TERMS: u32 = 24;

/// Integrand families with known antiderivatives
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Integrand {
    /// `value`, independent of x
    Constant { value: f64 },
    /// `scale * (1 + sign * e^(-rate * x))`
    Saturation { scale: f64, rate: f64, sign: f64 },
    /// `scale * x * (1 - e^(-rate * x))`
    RampSaturation { scale: f64, rate: f64 },
}

impl Integrand {
    /// Antiderivative evaluated at `x`, zero at the origin
    pub fn antiderivative(&self, x: f64) -> f64 {
        match *self {
            Integrand::Constant { value } => value * x,
            // (1 + s) x - s (x - (1 - e^(-rx)) / r)
            Integrand::Saturation { scale, rate, sign } => {
                scale * x * ((1.0 + sign) - sign * saturation_ratio(rate * x))
            }
            // x^2 / 2 - (1 - (1 + rx) e^(-rx)) / r^2
            Integrand::RampSaturation { scale, rate } => scale * x * x * ramp_ratio(rate * x),
        }
    }

    /// Integrand evaluated at `x`
    pub fn eval(&self, x: f64) -> f64 {
        match *self {
            Integrand::Constant { value } => value,
            Integrand::Saturation { scale, rate, sign } => scale * (1.0 + sign * (-rate * x).exp()),
            Integrand::RampSaturation { scale, rate } => scale * x * (1.0 - (-rate * x).exp()),
        }
    }

    /// Definite integral over `[lower, upper]`
    pub fn integrate(&self, lower: f64, upper: f64) -> Result<f64, ValuationError> {
        let value = self.antiderivative(upper) - self.antiderivative(lower);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ValuationError::unevaluable(format!(
                "integral over [{lower}, {upper}] is not finite"
            )))
        }
    }
}

/// `(y - 1 + e^(-y)) / y`, zero at `y = 0`
fn saturation_ratio(y: f64) -> f64 {
    if y.abs() >= SERIES_CUTOFF {
        return (y + (-y).exp_m1()) / y;
    }
    // sum over n >= 2 of (-y)^n / n!, divided by y
    let mut term = y / 2.0;
    let mut sum = 0.0;
    for n in 2..SERIES_TERMS {
        sum += term;
        term *= -y / f64::from(n + 1);
    }
    sum
}

/// `(y^2 / 2 - 1 + (1 + y) e^(-y)) / y^2`, zero at `y = 0`
fn ramp_ratio(y: f64) -> f64 {
    if y.abs() >= SERIES_CUTOFF {
        return (y * y / 2.0 + (-y).exp() * (1.0 + y) - 1.0) / (y * y);
    }
    // -(sum over n >= 3 of (n - 1) (-y)^n / n!), divided by y^2
    let mut term = -y / 6.0;
    let mut sum = 0.0;
    for n in 3..SERIES_TERMS {
        sum -= f64::from(n - 1) * term;
        term *= -y / f64::from(n + 1);
    }
    sum
}
