use glam::Vec2;

use crate::ViewState;

/// Pan distance per tick at `zoom == 1`.
pub const PAN_STEP: f32 = 0.1;
/// Constant nudge per tick for each of the four adjust keys.
pub const CONSTANT_STEP: f32 = 0.001;

// ---------------------------------------------------------------------------
// Key: windowing-library-independent key representation
// ---------------------------------------------------------------------------

/// A bound key, independent of any windowing library.
///
/// The binary maps physical keys to `Key`; everything in the input rules
/// works purely with this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Space
    ZoomIn,
    /// Left Shift
    ZoomReset,
    /// U
    ConstantXUp,
    /// J
    ConstantXDown,
    /// I
    ConstantYUp,
    /// K
    ConstantYDown,
    /// R: constant, offset and zoom back to zero
    Reset,
}

impl Key {
    pub const ALL: [Key; 11] = [
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::ZoomIn,
        Key::ZoomReset,
        Key::ConstantXUp,
        Key::ConstantXDown,
        Key::ConstantYUp,
        Key::ConstantYDown,
        Key::Reset,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Key::Up => "Up",
            Key::Down => "Down",
            Key::Left => "Left",
            Key::Right => "Right",
            Key::ZoomIn => "ZoomIn",
            Key::ZoomReset => "ZoomReset",
            Key::ConstantXUp => "ConstantXUp",
            Key::ConstantXDown => "ConstantXDown",
            Key::ConstantYUp => "ConstantYUp",
            Key::ConstantYDown => "ConstantYDown",
            Key::Reset => "Reset",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// HeldKeys: polled "is this key down" state built from press/release edges
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys {
    held: [bool; Key::ALL.len()],
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as held.  Returns `true` only on the up→down transition;
    /// auto-repeat presses are ignored.
    pub fn press(&mut self, key: Key) -> bool {
        let slot = &mut self.held[key.index()];
        if *slot {
            return false;
        }
        *slot = true;
        log::debug!("{} down", key.name());
        true
    }

    /// Mark `key` as released.  Returns `true` only on the down→up transition.
    pub fn release(&mut self, key: Key) -> bool {
        let slot = &mut self.held[key.index()];
        if !*slot {
            return false;
        }
        *slot = false;
        log::debug!("{} up", key.name());
        true
    }

    /// Release everything, e.g. when the window loses focus and key-up
    /// events will never arrive.
    pub fn release_all(&mut self) {
        for key in Key::ALL {
            self.release(key);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }
}

// ---------------------------------------------------------------------------
// Per-tick input rules (pure, testable)
// ---------------------------------------------------------------------------

/// Pan distance for one tick, or `None` when `zoom` is exactly zero and the
/// division is undefined.
pub fn pan_step(zoom: f32) -> Option<f32> {
    (zoom != 0.0).then(|| PAN_STEP / zoom)
}

/// Apply one tick of held-key deltas to `view`.
///
/// Deltas are per tick, not per second: speed follows the frame rate.
/// The pan step is taken from `zoom` before any zoom key of the same tick
/// is applied.
pub fn apply_held_keys(view: &mut ViewState, keys: &HeldKeys) {
    if let Some(step) = pan_step(view.zoom) {
        if keys.is_held(Key::Up) {
            view.offset += Vec2::Y * step;
        }
        if keys.is_held(Key::Down) {
            view.offset -= Vec2::Y * step;
        }
        if keys.is_held(Key::Left) {
            view.offset -= Vec2::X * step;
        }
        if keys.is_held(Key::Right) {
            view.offset += Vec2::X * step;
        }
    }

    // Zoom speed shares the animation speed.
    if keys.is_held(Key::ZoomIn) {
        view.zoom += view.animation_speed;
    }
    if keys.is_held(Key::ZoomReset) && view.zoom > 1.0 {
        view.zoom = 1.0;
    }

    if keys.is_held(Key::ConstantXUp) {
        view.constant.x += CONSTANT_STEP;
    }
    if keys.is_held(Key::ConstantXDown) {
        view.constant.x -= CONSTANT_STEP;
    }
    if keys.is_held(Key::ConstantYUp) {
        view.constant.y += CONSTANT_STEP;
    }
    if keys.is_held(Key::ConstantYDown) {
        view.constant.y -= CONSTANT_STEP;
    }

    if keys.is_held(Key::Reset) {
        view.constant = Vec2::ZERO;
        view.offset = Vec2::ZERO;
        view.zoom = 0.0;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(keys: &[Key]) -> HeldKeys {
        let mut held = HeldKeys::new();
        for &k in keys {
            held.press(k);
        }
        held
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    // --- HeldKeys edges -------------------------------------------------------

    #[test]
    fn press_reports_only_the_first_edge() {
        let mut keys = HeldKeys::new();
        assert!(keys.press(Key::Up));
        assert!(!keys.press(Key::Up), "auto-repeat must not re-trigger");
        assert!(keys.is_held(Key::Up));
    }

    #[test]
    fn release_reports_only_the_first_edge() {
        let mut keys = holding(&[Key::Left]);
        assert!(keys.release(Key::Left));
        assert!(!keys.release(Key::Left));
        assert!(!keys.is_held(Key::Left));
    }

    #[test]
    fn release_all_clears_every_key() {
        let mut keys = holding(&Key::ALL);
        keys.release_all();
        assert_eq!(keys, HeldKeys::new());
        for key in Key::ALL {
            assert!(!keys.is_held(key), "{key:?} still held");
        }
    }

    #[test]
    fn key_slots_are_distinct() {
        for &k in &Key::ALL {
            let keys = holding(&[k]);
            for &other in &Key::ALL {
                assert_eq!(keys.is_held(other), k == other, "{k:?} vs {other:?}");
            }
        }
    }

    #[test]
    fn no_keys_leaves_view_untouched() {
        let mut view = ViewState::default();
        apply_held_keys(&mut view, &HeldKeys::new());
        assert_eq!(view, ViewState::default());
    }

    // --- Panning --------------------------------------------------------------

    #[test]
    fn up_and_right_move_by_step_over_zoom() {
        let mut view = ViewState::default();
        view.zoom = 2.0;
        apply_held_keys(&mut view, &holding(&[Key::Up, Key::Right]));
        assert!(approx(view.offset.x, 0.05), "x={}", view.offset.x);
        assert!(approx(view.offset.y, 0.05), "y={}", view.offset.y);
    }

    #[test]
    fn down_and_left_move_negative() {
        let mut view = ViewState::default();
        apply_held_keys(&mut view, &holding(&[Key::Down, Key::Left]));
        assert!(approx(view.offset.x, -0.1));
        assert!(approx(view.offset.y, -0.1));
    }

    #[test]
    fn opposite_directions_cancel() {
        let mut view = ViewState::default();
        apply_held_keys(
            &mut view,
            &holding(&[Key::Up, Key::Down, Key::Left, Key::Right]),
        );
        assert!(approx(view.offset.x, 0.0));
        assert!(approx(view.offset.y, 0.0));
    }

    #[test]
    fn pan_accumulates_per_tick() {
        let mut view = ViewState::default();
        view.zoom = 0.5;
        let keys = holding(&[Key::Right]);
        for _ in 0..10 {
            apply_held_keys(&mut view, &keys);
        }
        assert!((view.offset.x - 2.0).abs() < 1e-5, "x={}", view.offset.x);
        assert_eq!(view.offset.y, 0.0);
    }

    #[test]
    fn pan_uses_zoom_from_before_zoom_keys() {
        let mut view = ViewState::default();
        view.zoom = 2.0;
        apply_held_keys(&mut view, &holding(&[Key::Right, Key::ZoomReset]));
        assert!(approx(view.offset.x, 0.05), "x={}", view.offset.x);
        assert_eq!(view.zoom, 1.0);
    }

    #[test]
    fn pan_step_is_undefined_at_zero_zoom() {
        assert_eq!(pan_step(0.0), None);
        assert_eq!(pan_step(-0.0), None);
        assert_eq!(pan_step(2.0), Some(0.05));
    }

    #[test]
    fn pan_is_ignored_while_zoom_is_zero() {
        let mut view = ViewState::default();
        view.zoom = 0.0;
        view.offset = Vec2::new(0.3, 0.4);
        apply_held_keys(&mut view, &holding(&[Key::Up, Key::Right]));
        assert_eq!(view.offset, Vec2::new(0.3, 0.4));
        assert!(view.offset.is_finite());
    }

    // --- Zoom -----------------------------------------------------------------

    #[test]
    fn zoom_in_adds_animation_speed() {
        let mut view = ViewState::default();
        view.animation_speed = 0.25;
        apply_held_keys(&mut view, &holding(&[Key::ZoomIn]));
        assert_eq!(view.zoom, 1.25);
    }

    #[test]
    fn zoom_reset_clamps_down_to_one() {
        let mut view = ViewState::default();
        view.zoom = 7.5;
        apply_held_keys(&mut view, &holding(&[Key::ZoomReset]));
        assert_eq!(view.zoom, 1.0);
    }

    #[test]
    fn zoom_reset_never_increases_zoom() {
        for start in [-3.0, 0.0, 0.2, 1.0] {
            let mut view = ViewState::default();
            view.zoom = start;
            apply_held_keys(&mut view, &holding(&[Key::ZoomReset]));
            assert_eq!(view.zoom, start, "zoom-reset changed {start}");
        }
    }

    #[test]
    fn zoom_in_recovers_from_zero() {
        let mut view = ViewState::default();
        view.zoom = 0.0;
        apply_held_keys(&mut view, &holding(&[Key::ZoomIn]));
        assert_eq!(view.zoom, 0.001);
        assert!(pan_step(view.zoom).is_some());
    }

    // --- Constant -------------------------------------------------------------

    #[test]
    fn constant_keys_nudge_each_axis() {
        let mut view = ViewState::default();
        view.constant = Vec2::ZERO;
        apply_held_keys(&mut view, &holding(&[Key::ConstantXUp, Key::ConstantYDown]));
        assert!(approx(view.constant.x, 0.001));
        assert!(approx(view.constant.y, -0.001));

        apply_held_keys(&mut view, &holding(&[Key::ConstantXDown, Key::ConstantYUp]));
        assert!(approx(view.constant.x, 0.0));
        assert!(approx(view.constant.y, 0.0));
    }

    // --- Full reset -----------------------------------------------------------

    #[test]
    fn reset_zeroes_constant_offset_and_zoom() {
        let mut view = ViewState::default();
        view.offset = Vec2::new(1.5, -2.0);
        view.zoom = 3.0;
        apply_held_keys(&mut view, &holding(&[Key::Reset]));
        assert_eq!(view.constant, Vec2::ZERO);
        assert_eq!(view.offset, Vec2::ZERO);
        // Literal zero; panning is skipped until zoom moves off it.
        assert_eq!(view.zoom, 0.0);
    }

    #[test]
    fn reset_wins_over_other_keys_in_the_same_tick() {
        let mut view = ViewState::default();
        apply_held_keys(
            &mut view,
            &holding(&[Key::Up, Key::ZoomIn, Key::ConstantXUp, Key::Reset]),
        );
        assert_eq!(view.constant, Vec2::ZERO);
        assert_eq!(view.offset, Vec2::ZERO);
        assert_eq!(view.zoom, 0.0);
    }

    #[test]
    fn reset_leaves_iteration_settings_alone() {
        let mut view = ViewState::default();
        view.max_iterations = 123;
        view.escape_radius = 8.0;
        apply_held_keys(&mut view, &holding(&[Key::Reset]));
        assert_eq!(view.max_iterations, 123);
        assert_eq!(view.escape_radius, 8.0);
    }
}
