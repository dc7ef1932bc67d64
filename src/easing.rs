// =============================================================================
// EASING.RS: Interpolation curves shared by entities, effects and scenes
//
// Every curve takes a normalized `t` and clamps it to [0, 1] first, so timers
// that overshoot their duration by a fraction of a frame land exactly on the
// end value.
// =============================================================================

use std::f32::consts::PI;

/// Linear interpolation. `t` is not clamped.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Smoothstep: `3t² - 2t³`.
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Sine-shaped ease-in-out. Used for facing turns.
#[inline]
pub fn ease_in_out_sine(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    -((PI * t).cos() - 1.0) * 0.5
}

#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[inline]
pub fn ease_in_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t
}

/// Overshoots past 1.0 before settling. Drives the clear banner pop.
#[inline]
pub fn ease_out_back(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let c1 = 1.70158_f32;
    let c3 = c1 + 1.0;
    1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
}

/// `lerp(start, end, smoothstep(t))`.
#[inline]
pub fn ease_in_out(start: f32, end: f32, t: f32) -> f32 {
    lerp(start, end, smoothstep(t))
}

/// `lerp(start, end, ease_out_cubic(t))`.
#[inline]
pub fn ease_out(start: f32, end: f32, t: f32) -> f32 {
    lerp(start, end, ease_out_cubic(t))
}

/// `lerp(start, end, ease_in_cubic(t))`.
#[inline]
pub fn ease_in(start: f32, end: f32, t: f32) -> f32 {
    lerp(start, end, ease_in_cubic(t))
}
