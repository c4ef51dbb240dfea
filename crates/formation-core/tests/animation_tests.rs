// Host-side tests for the per-frame animation loop.

use formation_core::{
    build_model, place_ornaments, rgb_from_hex, zen_pulse, FormationError, GestureSignal,
    Ornament, OrnamentFrame, OrnamentParams, PlacementConfig, Scene, SceneConfig, ShapeKind,
    MATTE_GREEN,
};
use glam::{Quat, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

const FRAME: f32 = 1.0 / 60.0;

fn config(shape: ShapeKind) -> SceneConfig {
    SceneConfig {
        particle_count: 200,
        ornament_count: 40,
        shape,
        seed: Some(7),
        ..Default::default()
    }
}

fn scene(shape: ShapeKind) -> Scene {
    Scene::new(config(shape)).expect("valid config")
}

fn run(scene: &mut Scene, start: &mut u32, frames: u32) {
    for _ in 0..frames {
        scene.tick(*start as f32 * FRAME);
        *start += 1;
    }
}

fn max_distance_to_goal(scene: &Scene) -> f32 {
    let expansion = scene.drive().expansion;
    scene
        .particles()
        .iter()
        .zip(scene.active_targets())
        .map(|(p, t)| p.distance(*t * expansion))
        .fold(0.0, f32::max)
}

fn open_hand(openness: f32) -> GestureSignal {
    GestureSignal {
        openness,
        ..Default::default()
    }
}

#[test]
fn counts_are_fixed_for_the_scene_lifetime() {
    let mut s = scene(ShapeKind::Tree);
    let ornaments = s.ornaments().len();
    let mut t = 0;
    for kind in ShapeKind::ALL {
        s.set_shape(kind);
        s.toggle_zen();
        run(&mut s, &mut t, 5);
        assert_eq!(s.particles().len(), 200);
        assert_eq!(s.shape_targets().len(), 200);
        assert_eq!(s.zen_targets().len(), 200);
        assert_eq!(s.ornaments().len(), ornaments);
    }
    assert_eq!(s.frame_count(), 30);
}

#[test]
fn particles_start_scattered() {
    let s = scene(ShapeKind::Heart);
    assert!(s.particles().iter().all(|p| p.abs().max_element() <= 50.0));
    assert!(s.ornaments().iter().all(|o| o.scale() == 0.0));
}

#[test]
fn particles_converge_monotonically_to_a_fixed_target() {
    let mut s = scene(ShapeKind::Flower);
    let mut t = 0;
    let mut previous = max_distance_to_goal(&s);
    for _ in 0..600 {
        run(&mut s, &mut t, 1);
        let d = max_distance_to_goal(&s);
        assert!(d <= previous + 1e-4, "distance grew from {previous} to {d}");
        previous = d;
    }
    assert!(previous < 1e-3, "still {previous} away after 600 frames");
}

#[test]
fn toggling_zen_twice_restores_the_same_targets() {
    let mut s = scene(ShapeKind::Star);
    let shape_targets = s.active_targets().to_vec();
    let zen_targets = s.zen_targets().to_vec();

    s.toggle_zen();
    assert!(s.is_zen());
    assert_eq!(s.active_targets(), zen_targets.as_slice());

    s.toggle_zen();
    assert!(!s.is_zen());
    assert_eq!(s.active_targets(), shape_targets.as_slice());
    assert_eq!(s.zen_targets(), zen_targets.as_slice());
}

#[test]
fn every_shape_selection_resamples() {
    let mut s = scene(ShapeKind::Tree);
    s.set_shape(ShapeKind::Heart);
    let first = s.shape_targets().to_vec();
    s.set_shape(ShapeKind::Heart);
    assert_ne!(s.shape_targets(), first.as_slice());
    assert_eq!(s.shape(), ShapeKind::Heart);
}

#[test]
fn expansion_relaxes_upward_without_a_signal() {
    let mut s = scene(ShapeKind::Heart);
    let mut t = 0;
    s.push_signal(Some(open_hand(0.0)));
    run(&mut s, &mut t, 60);
    assert!(s.drive().expansion < 0.3);

    s.push_signal(None);
    let mut previous = s.drive().expansion;
    for _ in 0..200 {
        run(&mut s, &mut t, 1);
        let e = s.drive().expansion;
        assert!(e >= previous && e <= 1.0, "expansion {e} after {previous}");
        previous = e;
    }
    assert!((previous - 1.0).abs() < 0.01);
}

#[test]
fn expansion_relaxes_downward_without_a_signal() {
    let mut s = scene(ShapeKind::Heart);
    let mut t = 0;
    s.push_signal(Some(open_hand(1.0)));
    run(&mut s, &mut t, 60);
    assert!(s.drive().expansion > 1.6);

    s.push_signal(None);
    let mut previous = s.drive().expansion;
    for _ in 0..200 {
        run(&mut s, &mut t, 1);
        let e = s.drive().expansion;
        assert!(e <= previous && e >= 1.0, "expansion {e} after {previous}");
        previous = e;
    }
}

#[test]
fn signal_expansion_blends_a_tenth_per_frame() {
    let mut with_signal = scene(ShapeKind::Heart);
    with_signal.push_signal(Some(open_hand(0.0)));
    with_signal.tick(0.0);
    // 1.0 -> 0.2 at a tenth per frame
    assert!((with_signal.drive().expansion - 0.92).abs() < 1e-5);
}

#[test]
fn pinch_pulls_the_camera_in_and_it_stays_without_a_signal() {
    let mut s = scene(ShapeKind::Heart);
    let mut t = 0;
    assert_eq!(s.drive().camera_distance, 40.0);
    s.push_signal(Some(GestureSignal {
        is_pinching: true,
        pinch_strength: 1.0,
        ..Default::default()
    }));
    run(&mut s, &mut t, 300);
    assert!((s.drive().camera_distance - 15.0).abs() < 1e-3);

    s.push_signal(None);
    run(&mut s, &mut t, 100);
    assert!(s.drive().camera_distance < 16.0);
}

#[test]
fn rotation_follows_the_signal_with_gain() {
    let mut s = scene(ShapeKind::Heart);
    let mut t = 0;
    s.push_signal(Some(GestureSignal {
        rotation: Vec3::new(0.1, 0.2, 0.5),
        ..Default::default()
    }));
    run(&mut s, &mut t, 400);
    assert!(s.drive().rotation.distance(Vec2::new(0.2, 0.4)) < 1e-3);
    let expected = Quat::from_euler(glam::EulerRot::XYZ, 0.2, 0.4, 0.0);
    assert!(s.assembly_rotation().angle_between(expected) < 1e-2);
}

#[test]
fn non_finite_signal_does_not_poison_the_drive() {
    let mut s = scene(ShapeKind::Heart);
    let mut t = 0;
    s.push_signal(Some(open_hand(f32::NAN)));
    run(&mut s, &mut t, 1);
    assert!(s.drive().expansion.is_finite());

    s.push_signal(None);
    run(&mut s, &mut t, 500);
    assert!((s.drive().expansion - 1.0).abs() < 1e-3);
    assert!(s.particles().iter().all(|p| p.is_finite()));
    assert!(s.ornaments().iter().all(|o| o.position().is_finite()));
}

#[test]
fn latest_signal_wins() {
    let mut s = scene(ShapeKind::Heart);
    s.push_signal(Some(open_hand(0.1)));
    s.push_signal(Some(open_hand(0.9)));
    assert_eq!(s.latest_signal().map(|g| g.openness), Some(0.9));
    s.push_signal(None);
    assert_eq!(s.latest_signal(), None);
}

#[test]
fn decorations_show_only_on_the_tree_or_in_zen() {
    let mut s = scene(ShapeKind::Tree);
    let mut t = 0;
    run(&mut s, &mut t, 200);
    for o in s.ornaments() {
        let base = o.placement().profile.base_scale;
        assert!((o.scale() - base).abs() < 1e-3, "scale {} vs {}", o.scale(), base);
        assert!(o.is_drawn());
    }

    s.set_shape(ShapeKind::Heart);
    run(&mut s, &mut t, 200);
    assert!(s.ornaments().iter().all(|o| !o.is_drawn()));

    s.set_zen(true);
    run(&mut s, &mut t, 100);
    assert!(s.ornaments().iter().all(|o| o.is_drawn()));
}

#[test]
fn decorations_hidden_from_the_start_never_grow() {
    let mut s = scene(ShapeKind::Fireworks);
    let mut t = 0;
    run(&mut s, &mut t, 50);
    assert!(s.ornaments().iter().all(|o| o.scale() == 0.0));
}

#[test]
fn tree_mode_settles_on_anchor_with_only_yaw() {
    let mut s = scene(ShapeKind::Tree);
    let mut t = 0;
    s.set_zen(true);
    run(&mut s, &mut t, 30);
    s.set_zen(false);
    run(&mut s, &mut t, 400);
    for o in s.ornaments() {
        assert!(o.position().distance(o.placement().anchor) < 1e-3);
        let r = o.rotation();
        assert_eq!(r.x, 0.0);
        assert_eq!(r.z, 0.0);
        assert_eq!(r.y, o.placement().yaw);
    }
}

#[test]
fn zen_spin_advances_by_rotation_speed_per_frame() {
    let mut s = scene(ShapeKind::Tree);
    s.set_zen(true);
    s.tick(0.0);
    for o in s.ornaments() {
        let speed = o.placement().profile.rotation_speed;
        assert!((o.rotation().x - speed).abs() < 1e-6);
        assert!((o.rotation().z - speed * 0.5).abs() < 1e-6);
    }
}

#[test]
fn zen_oscillation_is_driven_by_the_supplied_time() {
    let mut rng = StdRng::seed_from_u64(3);
    let config = PlacementConfig {
        requested: 1,
        ..Default::default()
    };
    let (placements, _) = place_ornaments(&config, &mut rng).expect("valid config");
    let placement = placements[0];
    let model = build_model(&OrnamentParams::random(placement.variant, &mut rng));

    let settle = |time: f32| {
        let mut o = Ornament::new(placement, model.clone());
        let frame = OrnamentFrame {
            time,
            expansion: 1.0,
            zen: true,
            visible: true,
        };
        for _ in 0..600 {
            o.update(&frame);
        }
        o.position()
    };

    for time in [0.0, 1.5, 10.0] {
        let expected = placement.zen_anchor + placement.profile.oscillation(time, 1.0);
        assert!(settle(time).distance(expected) < 1e-3, "time {time}");
    }
    assert!(settle(0.0).distance(settle(5.0)) > 1e-2);
}

#[test]
fn zen_pulse_ripples_within_amplitude() {
    for i in [0usize, 1, 100, 7999] {
        for t in [0.0f32, 1.0, 17.3, 300.0] {
            let p = zen_pulse(i, t);
            assert!((0.95 - 1e-6..=1.05 + 1e-6).contains(&p), "pulse {p}");
        }
    }
    assert_ne!(zen_pulse(0, 1.0), zen_pulse(100, 1.0));
    assert_eq!(zen_pulse(0, 0.0), 1.0);
}

#[test]
fn zen_particles_track_pulsed_targets() {
    let mut s = scene(ShapeKind::Heart);
    s.set_zen(true);
    let time = 2.0;
    for _ in 0..600 {
        s.tick(time);
    }
    for (i, (p, target)) in s.particles().iter().zip(s.zen_targets()).enumerate() {
        let goal = *target * zen_pulse(i, time);
        assert!(p.distance(goal) < 1e-3);
    }
}

#[test]
fn invalid_configs_are_rejected() {
    let mut c = config(ShapeKind::Tree);
    c.particle_count = 0;
    assert!(matches!(
        Scene::new(c).err(),
        Some(FormationError::ZeroCount { .. })
    ));

    let mut c = config(ShapeKind::Tree);
    c.color = "gold".into();
    assert_eq!(
        Scene::new(c).err(),
        Some(FormationError::InvalidColor("gold".into()))
    );

    let mut c = config(ShapeKind::Tree);
    c.min_separation = -1.0;
    assert!(Scene::new(c).is_err());

    let mut c = config(ShapeKind::Tree);
    c.particle_size = 0.0;
    assert!(Scene::new(c).is_err());
}

#[test]
fn rejected_changes_leave_state_untouched() {
    let mut s = scene(ShapeKind::Star);
    let targets = s.shape_targets().to_vec();
    let appearance = s.appearance().clone();

    assert!(s.set_shape_by_name("cube").is_err());
    assert_eq!(s.shape(), ShapeKind::Star);
    assert_eq!(s.shape_targets(), targets.as_slice());

    assert!(s.set_color("#12345").is_err());
    assert!(s.set_particle_size(-1.0).is_err());
    assert!(s.set_particle_size(f32::NAN).is_err());
    assert_eq!(s.appearance(), &appearance);
}

#[test]
fn accepted_changes_apply() {
    let mut s = scene(ShapeKind::Star);
    s.set_color("#ff0000").expect("valid color");
    assert_eq!(s.particle_color(), [1.0, 0.0, 0.0]);
    s.set_particle_size(0.3).expect("valid size");
    assert_eq!(s.appearance().particle_size(), 0.3);
    s.set_shape_by_name("tree").expect("known shape");
    assert_eq!(s.particle_color(), rgb_from_hex(MATTE_GREEN));
}

#[test]
fn camera_tracks_drive_distance() {
    let s = scene(ShapeKind::Heart);
    let camera = s.camera(16.0 / 9.0);
    assert_eq!(camera.eye, Vec3::new(0.0, 0.0, 40.0));
    assert_eq!(camera.target, Vec3::ZERO);
}

#[test]
fn seeded_scenes_are_reproducible() {
    let mut a = scene(ShapeKind::Tree);
    let mut b = scene(ShapeKind::Tree);
    for frame in 0..20 {
        a.tick(frame as f32 * FRAME);
        b.tick(frame as f32 * FRAME);
    }
    assert_eq!(a.particles(), b.particles());
    assert_eq!(a.placement_report(), b.placement_report());
}
