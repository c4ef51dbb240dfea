//! Pointer fallback that synthesizes gesture signals when no hand tracker runs.

use crate::constants::{
    DEFAULT_MANUAL_OPENNESS, MANUAL_OPENNESS_MAX, MANUAL_OPENNESS_MIN, POINTER_ROTATION_GAIN,
    WHEEL_OPENNESS_STEP,
};
use crate::gesture::GestureSignal;
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Side effects the host must apply after a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerAction {
    None,
    ToggleZen,
}

#[derive(Clone, Debug)]
pub struct PointerController {
    manual_openness: f32,
    current: Option<GestureSignal>,
}

impl Default for PointerController {
    fn default() -> Self {
        Self {
            manual_openness: DEFAULT_MANUAL_OPENNESS,
            current: None,
        }
    }
}

/// Pixel position to 0..1 within a `size` surface; degenerate sizes map to the center.
#[inline]
pub fn normalize_pointer(px: Vec2, size: Vec2) -> Vec2 {
    if size.x > 0.0 && size.y > 0.0 {
        (px / size).clamp(Vec2::ZERO, Vec2::ONE)
    } else {
        Vec2::splat(0.5)
    }
}

impl PointerController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest synthesized signal, `None` until the pointer first moves.
    pub fn signal(&self) -> Option<GestureSignal> {
        self.current
    }

    pub fn manual_openness(&self) -> f32 {
        self.manual_openness
    }

    /// `pos` is normalized (see [`normalize_pointer`]).
    pub fn on_move(&mut self, pos: Vec2) -> GestureSignal {
        let offset = pos - Vec2::splat(0.5);
        let prev = self.current.unwrap_or_default();
        let signal = GestureSignal {
            openness: self.manual_openness,
            rotation: Vec3::new(
                offset.y * POINTER_ROTATION_GAIN,
                offset.x * POINTER_ROTATION_GAIN,
                0.0,
            ),
            is_pinching: prev.is_pinching,
            pinch_strength: prev.pinch_strength,
            center: pos,
        };
        self.current = Some(signal);
        signal
    }

    pub fn on_press(&mut self, button: PointerButton, shift: bool) -> PointerAction {
        if button == PointerButton::Primary {
            return PointerAction::ToggleZen;
        }
        let secondary = button == PointerButton::Secondary;
        let pinching = secondary || shift;
        let mut signal = self.current.unwrap_or_default();
        signal.openness = if secondary { 1.0 } else { 0.0 };
        signal.is_pinching = pinching;
        signal.pinch_strength = if pinching { 1.0 } else { 0.0 };
        self.current = Some(signal);
        PointerAction::None
    }

    pub fn on_release(&mut self) {
        let mut signal = self.current.unwrap_or_default();
        signal.openness = self.manual_openness;
        signal.is_pinching = false;
        signal.pinch_strength = 0.0;
        self.current = Some(signal);
    }

    /// Positive `delta_y` (scrolling down) closes the formation.
    pub fn on_wheel(&mut self, delta_y: f32) {
        self.manual_openness = (self.manual_openness - delta_y * WHEEL_OPENNESS_STEP)
            .clamp(MANUAL_OPENNESS_MIN, MANUAL_OPENNESS_MAX);
        if let Some(signal) = self.current.as_mut() {
            signal.openness = self.manual_openness;
        }
    }
}
