use core::f32::consts::PI;

use crate::math::{cos, powf, sin, sqrt};

/// Easing curves for tweened jumps and snaps.
///
/// [`Easing::sample`] maps normalized time `t` in `[0, 1]` to normalized progress. Most
/// curves start at `0` and end at `1`; `Spring`, `Back` and `Elastic` overshoot on the way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// No animation: the jump lands in the same call.
    #[default]
    Immediate,
    Linear,
    Spring,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInExpo,
    EaseOutExpo,
    EaseInOutExpo,
    EaseInCirc,
    EaseOutCirc,
    EaseInOutCirc,
    EaseInBounce,
    EaseOutBounce,
    EaseInOutBounce,
    EaseInBack,
    EaseOutBack,
    EaseInOutBack,
    EaseInElastic,
    EaseOutElastic,
    EaseInOutElastic,
}

const BACK: f32 = 1.70158;
const BACK_IN_OUT: f32 = BACK * 1.525;
const ELASTIC_PERIOD: f32 = 0.3;
const ELASTIC_SHIFT: f32 = ELASTIC_PERIOD / 4.0;

impl Easing {
    pub const ALL: [Self; 33] = [
        Self::Immediate,
        Self::Linear,
        Self::Spring,
        Self::EaseInQuad,
        Self::EaseOutQuad,
        Self::EaseInOutQuad,
        Self::EaseInCubic,
        Self::EaseOutCubic,
        Self::EaseInOutCubic,
        Self::EaseInQuart,
        Self::EaseOutQuart,
        Self::EaseInOutQuart,
        Self::EaseInQuint,
        Self::EaseOutQuint,
        Self::EaseInOutQuint,
        Self::EaseInSine,
        Self::EaseOutSine,
        Self::EaseInOutSine,
        Self::EaseInExpo,
        Self::EaseOutExpo,
        Self::EaseInOutExpo,
        Self::EaseInCirc,
        Self::EaseOutCirc,
        Self::EaseInOutCirc,
        Self::EaseInBounce,
        Self::EaseOutBounce,
        Self::EaseInOutBounce,
        Self::EaseInBack,
        Self::EaseOutBack,
        Self::EaseInOutBack,
        Self::EaseInElastic,
        Self::EaseOutElastic,
        Self::EaseInOutElastic,
    ];

    pub fn is_immediate(self) -> bool {
        self == Self::Immediate
    }

    /// Samples the curve at `t`, clamped to `[0, 1]`.
    pub fn sample(self, t: f32) -> f32 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Immediate => 1.0,
            Self::Linear => t,
            Self::Spring => {
                let wobble = sin(t * PI * (0.2 + 2.5 * t * t * t)) * powf(1.0 - t, 2.2);
                (wobble + t) * (1.0 + 1.2 * (1.0 - t))
            }

            Self::EaseInQuad => t * t,
            Self::EaseOutQuad => -t * (t - 2.0),
            Self::EaseInOutQuad => in_out(t, |v| v * v, |v| -(v * (v - 2.0) - 1.0), 1.0),

            Self::EaseInCubic => t * t * t,
            Self::EaseOutCubic => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Self::EaseInOutCubic => in_out(t, |v| v * v * v, |v| v * v * v + 2.0, 2.0),

            Self::EaseInQuart => t * t * t * t,
            Self::EaseOutQuart => {
                let u = t - 1.0;
                -(u * u * u * u - 1.0)
            }
            Self::EaseInOutQuart => in_out(t, |v| v * v * v * v, |v| -(v * v * v * v - 2.0), 2.0),

            Self::EaseInQuint => t * t * t * t * t,
            Self::EaseOutQuint => {
                let u = t - 1.0;
                u * u * u * u * u + 1.0
            }
            Self::EaseInOutQuint => {
                in_out(t, |v| v * v * v * v * v, |v| v * v * v * v * v + 2.0, 2.0)
            }

            Self::EaseInSine => 1.0 - cos(t * (PI / 2.0)),
            Self::EaseOutSine => sin(t * (PI / 2.0)),
            Self::EaseInOutSine => -0.5 * (cos(PI * t) - 1.0),

            Self::EaseInExpo => powf(2.0, 10.0 * (t - 1.0)),
            Self::EaseOutExpo => 1.0 - powf(2.0, -10.0 * t),
            Self::EaseInOutExpo => in_out(
                t,
                |v| powf(2.0, 10.0 * (v - 1.0)),
                |v| 2.0 - powf(2.0, -10.0 * v),
                1.0,
            ),

            Self::EaseInCirc => 1.0 - sqrt(1.0 - t * t),
            Self::EaseOutCirc => {
                let u = t - 1.0;
                sqrt(1.0 - u * u)
            }
            Self::EaseInOutCirc => in_out(
                t,
                |v| 1.0 - sqrt(1.0 - v * v),
                |v| sqrt(1.0 - v * v) + 1.0,
                2.0,
            ),

            Self::EaseInBounce => bounce_in(t),
            Self::EaseOutBounce => bounce_out(t),
            Self::EaseInOutBounce => {
                if t < 0.5 {
                    bounce_in(t * 2.0) * 0.5
                } else {
                    bounce_out(t * 2.0 - 1.0) * 0.5 + 0.5
                }
            }

            Self::EaseInBack => t * t * ((BACK + 1.0) * t - BACK),
            Self::EaseOutBack => {
                let u = t - 1.0;
                u * u * ((BACK + 1.0) * u + BACK) + 1.0
            }
            Self::EaseInOutBack => in_out(
                t,
                |v| v * v * ((BACK_IN_OUT + 1.0) * v - BACK_IN_OUT),
                |v| v * v * ((BACK_IN_OUT + 1.0) * v + BACK_IN_OUT) + 2.0,
                2.0,
            ),

            Self::EaseInElastic => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let u = t - 1.0;
                -(powf(2.0, 10.0 * u) * elastic_wave(u))
            }
            Self::EaseOutElastic => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                powf(2.0, -10.0 * t) * elastic_wave(t) + 1.0
            }
            Self::EaseInOutElastic => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let u = t * 2.0 - 1.0;
                if u < 0.0 {
                    -0.5 * powf(2.0, 10.0 * u) * elastic_wave(u)
                } else {
                    powf(2.0, -10.0 * u) * elastic_wave(u) * 0.5 + 1.0
                }
            }
        }
    }
}

/// Splits `t` into two halves over `v = 2t`: `first(v) / 2` below the midpoint,
/// `second(v - shift) / 2` above it.
fn in_out(t: f32, first: impl Fn(f32) -> f32, second: impl Fn(f32) -> f32, shift: f32) -> f32 {
    let v = t * 2.0;
    if v < 1.0 {
        0.5 * first(v)
    } else {
        0.5 * second(v - shift)
    }
}

fn elastic_wave(u: f32) -> f32 {
    sin((u - ELASTIC_SHIFT) * (2.0 * PI) / ELASTIC_PERIOD)
}

fn bounce_out(t: f32) -> f32 {
    const K: f32 = 7.5625;
    const D: f32 = 2.75;
    if t < 1.0 / D {
        K * t * t
    } else if t < 2.0 / D {
        let u = t - 1.5 / D;
        K * u * u + 0.75
    } else if t < 2.5 / D {
        let u = t - 2.25 / D;
        K * u * u + 0.9375
    } else {
        let u = t - 2.625 / D;
        K * u * u + 0.984375
    }
}

fn bounce_in(t: f32) -> f32 {
    1.0 - bounce_out(1.0 - t)
}
