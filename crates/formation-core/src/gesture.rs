//! Control signal snapshot and its mapping to animation drive targets.

use crate::constants::{
    CAMERA_FAR, CAMERA_NEAR, EXPANSION_BASE, EXPANSION_SPREAD, NEUTRAL_EXPANSION, ROTATION_GAIN,
};
use glam::{Vec2, Vec3};

/// One snapshot from a hand tracker or the pointer fallback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSignal {
    /// 0 for a fist, 1 for a fully open hand.
    pub openness: f32,
    pub rotation: Vec3,
    pub is_pinching: bool,
    pub pinch_strength: f32,
    /// Normalized screen-space position, origin top-left.
    pub center: Vec2,
}

impl Default for GestureSignal {
    fn default() -> Self {
        Self {
            openness: 0.0,
            rotation: Vec3::ZERO,
            is_pinching: false,
            pinch_strength: 0.0,
            center: Vec2::splat(0.5),
        }
    }
}

impl GestureSignal {
    /// True when every field that drives the animation is a finite number.
    pub fn is_finite(&self) -> bool {
        self.openness.is_finite() && self.rotation.is_finite()
    }
}

/// What the animation loop should smooth toward this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriveTarget {
    pub expansion: f32,
    /// Assembly pitch (x) and yaw (y).
    pub rotation: Vec2,
    pub camera_distance: f32,
    /// No signal: expansion is relaxing toward neutral.
    pub relaxing: bool,
}

impl Default for DriveTarget {
    fn default() -> Self {
        Self {
            expansion: NEUTRAL_EXPANSION,
            rotation: Vec2::ZERO,
            camera_distance: CAMERA_FAR,
            relaxing: true,
        }
    }
}

#[inline]
pub fn expansion_for_openness(openness: f32) -> f32 {
    EXPANSION_BASE + openness * EXPANSION_SPREAD
}

#[inline]
pub fn camera_distance_for(is_pinching: bool) -> f32 {
    if is_pinching {
        CAMERA_NEAR
    } else {
        CAMERA_FAR
    }
}

/// Turns signals into drive targets. Holds the last rotation and camera target
/// so they persist while the signal is absent.
#[derive(Clone, Debug, Default)]
pub struct GestureMapper {
    last: DriveTarget,
}

impl GestureMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot with a non-finite openness or rotation is treated as absent.
    pub fn map(&mut self, signal: Option<&GestureSignal>) -> DriveTarget {
        let signal = signal.filter(|s| {
            let usable = s.is_finite();
            if !usable {
                log::debug!("[gesture] dropped non-finite signal: {:?}", s);
            }
            usable
        });
        self.last = match signal {
            Some(s) => DriveTarget {
                expansion: expansion_for_openness(s.openness),
                rotation: Vec2::new(s.rotation.x, s.rotation.y) * ROTATION_GAIN,
                camera_distance: camera_distance_for(s.is_pinching),
                relaxing: false,
            },
            None => DriveTarget {
                expansion: NEUTRAL_EXPANSION,
                relaxing: true,
                ..self.last
            },
        };
        self.last
    }

    pub fn last(&self) -> DriveTarget {
        self.last
    }
}
