use crate::foundation::error::{ScrubError, ScrubResult};

/// Easing functions used to shape step-local interpolation time.
///
/// Every variant maps `0 -> 0` and `1 -> 1` and is monotonic on `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Linear interpolation.
    #[default]
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Sinusoidal ease-in/out.
    InOutSine,
    /// Exponential ease-out.
    OutExpo,
    /// CSS-style `cubic-bezier(x1, y1, x2, y2)` with fixed endpoints `(0,0)` and `(1,1)`.
    CubicBezier {
        /// First control point x, in `[0, 1]`.
        x1: f64,
        /// First control point y, in `[0, 1]`.
        y1: f64,
        /// Second control point x, in `[0, 1]`.
        x2: f64,
        /// Second control point y, in `[0, 1]`.
        y2: f64,
    },
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InOutSine => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
            Self::OutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Self::CubicBezier { x1, y1, x2, y2 } => {
                if t <= 0.0 || t >= 1.0 {
                    return t;
                }
                let s = solve_bezier_param(t, x1, x2);
                bezier_coord(s, y1, y2)
            }
        }
    }

    /// Validate parameters of the parametric variants.
    pub fn validate(self) -> ScrubResult<()> {
        if let Self::CubicBezier { x1, y1, x2, y2 } = self {
            let all_finite = [x1, y1, x2, y2].iter().all(|v| v.is_finite());
            let in_unit = [x1, y1, x2, y2].iter().all(|v| (0.0..=1.0).contains(v));
            if !all_finite || !in_unit {
                return Err(ScrubError::configuration(format!(
                    "cubic-bezier control points must lie in [0, 1], got ({x1}, {y1}, {x2}, {y2})"
                )));
            }
        }
        Ok(())
    }
}

// One axis of a bezier with endpoints 0 and 1.
fn bezier_coord(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

fn solve_bezier_param(x: f64, x1: f64, x2: f64) -> f64 {
    const EPS: f64 = 1e-7;

    let mut s = x;
    for _ in 0..8 {
        let err = bezier_coord(s, x1, x2) - x;
        if err.abs() < EPS {
            return s;
        }
        let slope = bezier_slope(s, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        s = (s - err / slope).clamp(0.0, 1.0);
    }

    // Newton stalled on a flat segment; bisection always converges since x(s) is monotonic.
    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..64 {
        let v = bezier_coord(s, x1, x2);
        if (v - x).abs() < EPS {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    s
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
