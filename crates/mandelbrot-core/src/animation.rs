use glam::Vec2;

use crate::ViewState;

/// Point on the unit circle reached after `elapsed` seconds at `speed`
/// radians per second, starting from `(0, 1)`.
pub fn orbit(elapsed: f32, speed: f32) -> Vec2 {
    let phase = elapsed * speed;
    Vec2::new(phase.sin(), phase.cos())
}

/// Drive `view.constant` around the unit circle while animation is on.
///
/// Runs after the input rules, so it overwrites any manual nudge made in
/// the same tick.
pub fn animate(view: &mut ViewState, elapsed: f32) {
    if view.animating {
        view.constant = orbit(elapsed, view.animation_speed);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
