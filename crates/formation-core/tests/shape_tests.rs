// Host-side tests for the shape target laws.

use formation_core::{generate_shape, FormationError, ShapeKind};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[test]
fn every_shape_returns_exactly_count_points() {
    let mut r = rng(1);
    for kind in ShapeKind::ALL {
        for count in [0usize, 1, 2, 7, 100, 8000] {
            let points = generate_shape(kind, count, &mut r);
            assert_eq!(points.len(), count, "{kind} with count {count}");
        }
    }
}

#[test]
fn zero_count_is_empty() {
    let mut r = rng(2);
    for kind in ShapeKind::ALL {
        assert!(generate_shape(kind, 0, &mut r).is_empty());
    }
}

#[test]
fn single_point_zen_cloud_is_finite() {
    // n = 1 puts the only point at the pole of the Fibonacci sphere
    let points = generate_shape(ShapeKind::Zen, 1, &mut rng(3));
    assert!(points[0].is_finite());
}

#[test]
fn every_point_is_within_the_shape_radius_bound() {
    let mut r = rng(4);
    for kind in ShapeKind::ALL {
        let points = generate_shape(kind, 10_000, &mut r);
        let max = points.iter().map(|p| p.length()).fold(0.0_f32, f32::max);
        assert!(
            max <= kind.max_radius(),
            "{kind}: max radius {max} exceeds bound {}",
            kind.max_radius()
        );
        assert!(points.iter().all(|p| p.is_finite()), "{kind} produced non-finite points");
    }
}

#[test]
fn star_alternates_outer_and_inner_radius() {
    let points = generate_shape(ShapeKind::Star, 1000, &mut rng(5));
    for (i, p) in points.iter().enumerate() {
        let r = p.truncate().length();
        if i % 2 == 0 {
            assert!((9.0 - 1e-3..=11.0 + 1e-3).contains(&r), "outer point {i} at radius {r}");
        } else {
            assert!((3.0 - 1e-3..=5.0 + 1e-3).contains(&r), "inner point {i} at radius {r}");
        }
        assert!(p.z.abs() <= 2.0);
    }
}

#[test]
fn tree_has_a_ground_disc_and_bounded_height() {
    let points = generate_shape(ShapeKind::Tree, 10_000, &mut rng(6));
    assert!(points.iter().all(|p| (-10.0..10.0).contains(&p.y)));
    let ground = points.iter().filter(|p| p.y == -10.0).count();
    // h < 0.6 out of 20 collapses to the ground, about 3% of samples
    assert!(ground > 100, "expected a populated ground disc, got {ground}");
    assert!(ground < 600, "ground disc too dense: {ground}");
}

#[test]
fn tree_is_wider_at_the_base() {
    let points = generate_shape(ShapeKind::Tree, 10_000, &mut rng(7));
    let mean_radius = |lo: f32, hi: f32| {
        let band: Vec<f32> = points
            .iter()
            .filter(|p| p.y > lo && p.y <= hi)
            .map(|p| glam::Vec2::new(p.x, p.z).length())
            .collect();
        band.iter().sum::<f32>() / band.len() as f32
    };
    assert!(mean_radius(-9.0, -5.0) > mean_radius(5.0, 9.0));
}

#[test]
fn zen_directions_depend_only_on_index() {
    let a = generate_shape(ShapeKind::Zen, 500, &mut rng(8));
    let b = generate_shape(ShapeKind::Zen, 500, &mut rng(9));
    for (i, (pa, pb)) in a.iter().zip(&b).enumerate() {
        let da = pa.normalize();
        let db = pb.normalize();
        assert!(
            da.distance(db) < 1e-4,
            "direction {i} differs between samples: {da} vs {db}"
        );
    }
}

#[test]
fn flower_points_lie_on_the_rose_curve() {
    let points = generate_shape(ShapeKind::Flower, 2000, &mut rng(10));
    for p in &points {
        assert!(p.truncate().length() <= 8.0 + 1e-3);
        assert!(p.z.abs() <= 1.5);
    }
}

#[test]
fn fireworks_fill_a_ball() {
    let points = generate_shape(ShapeKind::Fireworks, 5000, &mut rng(11));
    let inner = points.iter().filter(|p| p.length() < 7.5).count();
    assert!(inner > 0 && inner < points.len());
}

#[test]
fn same_seed_reproduces_a_formation() {
    for kind in ShapeKind::ALL {
        let a = generate_shape(kind, 300, &mut rng(12));
        let b = generate_shape(kind, 300, &mut rng(12));
        assert_eq!(a, b, "{kind} not reproducible");
    }
}

#[test]
fn consecutive_draws_are_freshly_sampled() {
    let mut r = rng(13);
    let a = generate_shape(ShapeKind::Heart, 300, &mut r);
    let b = generate_shape(ShapeKind::Heart, 300, &mut r);
    assert_ne!(a, b);
}

#[test]
fn shape_names_parse() {
    assert_eq!("star".parse::<ShapeKind>(), Ok(ShapeKind::Star));
    assert_eq!("Christmas Tree".parse::<ShapeKind>(), Ok(ShapeKind::Tree));
    assert_eq!(" ZEN ".parse::<ShapeKind>(), Ok(ShapeKind::Zen));
    assert_eq!("Sphere (Zen)".parse::<ShapeKind>(), Ok(ShapeKind::Zen));
    for kind in ShapeKind::ALL {
        assert_eq!(kind.label().parse::<ShapeKind>(), Ok(kind));
        assert_eq!(kind.short_name().parse::<ShapeKind>(), Ok(kind));
    }
}

#[test]
fn unknown_shape_name_is_rejected() {
    assert_eq!(
        "cube".parse::<ShapeKind>(),
        Err(FormationError::UnknownShape("cube".to_string()))
    );
    assert!("".parse::<ShapeKind>().is_err());
}
