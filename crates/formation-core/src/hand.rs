//! Hand landmark post-processing.
//!
//! Landmarks follow the common 21-point hand topology (0 = wrist, 4 = thumb
//! tip, 8 = index tip, 9 = middle finger base, 12/16/20 = remaining tips) in
//! normalized image coordinates. Only x and y are used.

use crate::constants::{
    HAND_ROTATION_GAIN, OPENNESS_RANGE, OPENNESS_REST_DISTANCE, PINCH_STRENGTH_RANGE,
    PINCH_THRESHOLD,
};
use crate::gesture::GestureSignal;
use glam::{Vec2, Vec3};

pub const HAND_LANDMARK_COUNT: usize = 21;

const WRIST: usize = 0;
const THUMB_TIP: usize = 4;
const INDEX_TIP: usize = 8;
const MIDDLE_BASE: usize = 9;
const FINGERTIPS: [usize; 5] = [4, 8, 12, 16, 20];

/// Derive a signal from one tracked hand. Returns `None` for an incomplete set,
/// which the scene treats as "no hand".
pub fn signal_from_landmarks(landmarks: &[Vec3]) -> Option<GestureSignal> {
    if landmarks.len() < HAND_LANDMARK_COUNT {
        return None;
    }
    let xy = |i: usize| landmarks[i].truncate();
    let wrist = xy(WRIST);

    let mean_tip_distance = FINGERTIPS
        .iter()
        .map(|&i| xy(i).distance(wrist))
        .sum::<f32>()
        / FINGERTIPS.len() as f32;
    let openness = ((mean_tip_distance - OPENNESS_REST_DISTANCE) / OPENNESS_RANGE).clamp(0.0, 1.0);

    let pinch_distance = xy(THUMB_TIP).distance(xy(INDEX_TIP));
    let pinch_strength = (1.0 - pinch_distance / PINCH_STRENGTH_RANGE).clamp(0.0, 1.0);

    let middle_base = xy(MIDDLE_BASE);
    let delta: Vec2 = middle_base - wrist;
    let (dx, dy) = (delta.x, delta.y);

    Some(GestureSignal {
        openness,
        rotation: Vec3::new(dy * HAND_ROTATION_GAIN, -dx * HAND_ROTATION_GAIN, dy.atan2(dx)),
        is_pinching: pinch_distance < PINCH_THRESHOLD,
        pinch_strength,
        center: middle_base,
    })
}
