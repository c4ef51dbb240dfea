// Host-side sanity checks for the shared tuning constants.

use formation_core::*;

#[test]
fn blend_fractions_are_proper() {
    for blend in [
        POSITION_BLEND,
        EXPANSION_BLEND,
        EXPANSION_RELAX_BLEND,
        ROTATION_BLEND,
        CAMERA_BLEND,
    ] {
        assert!(blend > 0.0 && blend < 1.0, "blend {blend} out of (0, 1)");
    }
    assert!(EXPANSION_BLEND >= EXPANSION_RELAX_BLEND);
}

#[test]
fn gesture_ranges_are_ordered() {
    assert!(CAMERA_NEAR < CAMERA_FAR);
    assert!(EXPANSION_BASE < NEUTRAL_EXPANSION);
    assert!(EXPANSION_BASE + EXPANSION_SPREAD > NEUTRAL_EXPANSION);
    assert!(MANUAL_OPENNESS_MIN < DEFAULT_MANUAL_OPENNESS);
    assert!(DEFAULT_MANUAL_OPENNESS < MANUAL_OPENNESS_MAX);
    assert!(PINCH_THRESHOLD < PINCH_STRENGTH_RANGE);
}

#[test]
fn zen_pulse_stays_positive() {
    assert!(ZEN_PULSE_AMPLITUDE > 0.0 && ZEN_PULSE_AMPLITUDE < 1.0);
}

#[test]
fn camera_frustum_contains_every_shape() {
    assert!(CAMERA_ZNEAR > 0.0 && CAMERA_ZNEAR < CAMERA_ZFAR);
    let widest = ShapeKind::ALL
        .iter()
        .map(|k| k.max_radius())
        .fold(0.0_f32, f32::max);
    assert!(CAMERA_FAR + widest * (EXPANSION_BASE + EXPANSION_SPREAD) < CAMERA_ZFAR);
}

#[test]
fn theme_palette_is_distinct() {
    for (i, a) in THEME_COLORS.iter().enumerate() {
        for b in &THEME_COLORS[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert!(THEME_COLORS.contains(&METALLIC_GOLD));
    assert!(DEFAULT_PARTICLE_SIZE > 0.0);
    assert!(MIN_ORNAMENT_SEPARATION > 0.0 && MAX_PLACEMENT_ATTEMPTS > 0);
}
