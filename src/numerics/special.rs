//! Sine and cosine integrals Si(x), Ci(x).
//!
//! Purpose
//! -------
//! Evaluate the trigonometric integrals needed by the analytic Fourier
//! transform of the NFW profile:
//!
//! - `Si(x) = ∫₀ˣ sin(t)/t dt`
//! - `Ci(x) = γ + ln x + ∫₀ˣ (cos t − 1)/t dt`
//!
//! Key behaviors
//! -------------
//! - For `|x| ≤ SERIES_CUTOFF` both functions use their power series. Ci is
//!   split into `γ + ln x + ci_regular(x)` so the logarithmic singularity can
//!   be cancelled analytically by [`ci_difference`].
//! - For larger arguments the complex continued fraction of `E₁(ix)` is
//!   evaluated with a modified Lentz recursion, using
//!   `E₁(ix) = −Ci(x) + i (Si(x) − π/2)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `Si` is odd and finite everywhere; `Si(0) = 0`.
//! - `Ci` is defined for `x > 0`; `Ci(0) = −∞`, and negative arguments
//!   return NaN (the principal value has an imaginary part there).
//! - Both branches agree to ~1e-15 relative at the cutoff.
//!
//! Conventions
//! -----------
//! - Pure functions on `f64`; no allocation, no logging.
use num_complex::Complex64;
use statrs::consts::EULER_MASCHERONI;

/// Switch point between the power series and the continued fraction.
pub const SERIES_CUTOFF: f64 = 2.0;

const MAX_ITER: usize = 100;
const FPMIN: f64 = 1.0e-300;

/// Sine integral `Si(x)`.
pub fn si(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let t = x.abs();
    let value = if t == 0.0 {
        0.0
    } else if t <= SERIES_CUTOFF {
        si_series(t)
    } else {
        si_ci_continued_fraction(t).0
    };
    if x < 0.0 { -value } else { value }
}

/// Cosine integral `Ci(x)` for `x > 0`.
pub fn ci(x: f64) -> f64 {
    if x.is_nan() || x < 0.0 {
        return f64::NAN;
    }
    if x == 0.0 {
        return f64::NEG_INFINITY;
    }
    if x <= SERIES_CUTOFF {
        EULER_MASCHERONI + x.ln() + ci_regular(x)
    } else {
        si_ci_continued_fraction(x).1
    }
}

/// `Si(y) − Si(x)`.
pub fn si_difference(x: f64, y: f64) -> f64 {
    si(y) - si(x)
}

/// `Ci(y) − Ci(x)` for `0 < x`, `0 < y`.
///
/// When both arguments sit in the series region the `γ + ln` parts are
/// combined into `ln(y/x)`, so the result stays accurate as `x, y → 0` with
/// a fixed ratio. This is the regime of the NFW transform at small `k·r_s`.
pub fn ci_difference(x: f64, y: f64) -> f64 {
    if x <= SERIES_CUTOFF && y <= SERIES_CUTOFF && x > 0.0 && y > 0.0 {
        (y / x).ln() + (ci_regular(y) - ci_regular(x))
    } else {
        ci(y) - ci(x)
    }
}

/// `Σ_{n≥0} (−1)ⁿ x^{2n+1} / ((2n+1)(2n+1)!)`.
fn si_series(x: f64) -> f64 {
    let x2 = x * x;
    // power holds (−1)ⁿ x^{2n+1}/(2n+1)!
    let mut power = x;
    let mut sum = x;
    for n in 1..MAX_ITER {
        let m = (2 * n) as f64;
        power *= -x2 / (m * (m + 1.0));
        let term = power / (m + 1.0);
        sum += term;
        if term.abs() < f64::EPSILON * sum.abs() {
            break;
        }
    }
    sum
}

/// Regular part of Ci: `Σ_{n≥1} (−1)ⁿ x^{2n} / (2n (2n)!)`.
fn ci_regular(x: f64) -> f64 {
    let x2 = x * x;
    // power holds (−1)ⁿ x^{2n}/(2n)!
    let mut power = 1.0;
    let mut sum = 0.0;
    for n in 1..MAX_ITER {
        let m = (2 * n) as f64;
        power *= -x2 / ((m - 1.0) * m);
        let term = power / m;
        sum += term;
        if term.abs() <= f64::EPSILON * sum.abs() {
            break;
        }
    }
    sum
}

/// Returns `(Si(t), Ci(t))` for `t > SERIES_CUTOFF`.
fn si_ci_continued_fraction(t: f64) -> (f64, f64) {
    let mut b = Complex64::new(1.0, t);
    let mut c = Complex64::new(1.0 / FPMIN, 0.0);
    let mut d = Complex64::new(1.0, 0.0) / b;
    let mut h = d;
    for i in 2..MAX_ITER {
        let a = -(((i - 1) * (i - 1)) as f64);
        b += 2.0;
        d = Complex64::new(1.0, 0.0) / (d * a + b);
        c = b + Complex64::new(a, 0.0) / c;
        let del = c * d;
        h *= del;
        if (del.re - 1.0).abs() + del.im.abs() < f64::EPSILON {
            break;
        }
    }
    // h = e^{it} E₁(it) at this point.
    h *= Complex64::new(t.cos(), -t.sin());
    (std::f64::consts::FRAC_PI_2 + h.im, -h.re)
}
