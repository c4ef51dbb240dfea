//! Rejection-sampled decoration anchors inside the tree volume.
//!
//! Every accepted anchor keeps at least `min_separation` to all earlier ones.
//! Objects that fail `max_attempts` candidates are skipped, so a crowded volume
//! yields fewer placements than requested. That is reported, never an error.

use crate::constants::{MAX_PLACEMENT_ATTEMPTS, MIN_ORNAMENT_SEPARATION, ORNAMENT_COUNT};
use crate::error::{FormationError, Result};
use crate::ornament::{AnimationProfile, OrnamentVariant};
use fnv::FnvHashMap;
use glam::{IVec3, Vec3};
use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementConfig {
    pub requested: usize,
    pub min_separation: f32,
    pub max_attempts: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            requested: ORNAMENT_COUNT,
            min_separation: MIN_ORNAMENT_SEPARATION,
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

impl PlacementConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.min_separation.is_finite() || self.min_separation <= 0.0 {
            return Err(FormationError::InvalidSeparation(self.min_separation));
        }
        if self.max_attempts == 0 {
            return Err(FormationError::ZeroCount {
                what: "placement attempts",
            });
        }
        Ok(())
    }
}

/// Both destinations and the fixed motion profile of one decoration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub anchor: Vec3,
    pub zen_anchor: Vec3,
    pub profile: AnimationProfile,
    pub variant: OrnamentVariant,
    pub yaw: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlacementReport {
    pub requested: usize,
    pub placed: usize,
}

impl PlacementReport {
    pub fn skipped(&self) -> usize {
        self.requested - self.placed
    }

    pub fn saturated(&self) -> bool {
        self.placed < self.requested
    }
}

pub fn place_ornaments<R: Rng + ?Sized>(
    config: &PlacementConfig,
    rng: &mut R,
) -> Result<(Vec<Placement>, PlacementReport)> {
    config.validate()?;
    let mut grid = SeparationGrid::new(config.min_separation);
    let mut placements = Vec::with_capacity(config.requested);

    for _ in 0..config.requested {
        let variant = OrnamentVariant::draw(rng);
        let Some(anchor) = (0..config.max_attempts)
            .map(|_| sample_tree_volume(rng))
            .find(|candidate| grid.is_clear(*candidate))
        else {
            continue;
        };
        grid.insert(anchor);

        let zen_anchor = sample_zen_volume(rng);
        let yaw = variant.orientation().yaw(anchor, rng);
        placements.push(Placement {
            anchor,
            zen_anchor,
            profile: AnimationProfile::random(rng),
            variant,
            yaw,
        });
    }

    let report = PlacementReport {
        requested: config.requested,
        placed: placements.len(),
    };
    if report.saturated() {
        log::warn!(
            "[placement] saturated: placed {}/{} (min separation {:.2}, {} attempts)",
            report.placed,
            report.requested,
            config.min_separation,
            config.max_attempts
        );
    }
    Ok((placements, report))
}

/// A point inside the decoration cone. Height is biased toward the ground so
/// the wider lower tiers receive more objects.
pub fn sample_tree_volume<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    const HEIGHT: f32 = 20.0;
    const GROUND_CUTOFF: f32 = 1.2;
    let mut h = HEIGHT * (1.0 - rng.gen::<f32>().sqrt());
    if h < GROUND_CUTOFF {
        h = 0.0;
    }
    let angle = rng.gen_range(0.0..TAU);
    let max_r = (HEIGHT - h) * 0.38;
    let r = rng.gen::<f32>().sqrt() * max_r;
    Vec3::new(angle.cos() * r, h - HEIGHT / 2.0, angle.sin() * r)
}

/// A point inside the noise-deformed zen cloud, uniform in direction and volume.
pub fn sample_zen_volume<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = TAU * rng.gen::<f32>();
    let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
    let noise = (phi * 4.0).sin() * (theta * 3.0).cos() * 0.4
        + (phi * 2.5).sin() * (theta * 5.0).sin() * 0.3;
    let r = 10.0 * (1.0 + noise) * rng.gen::<f32>().cbrt();
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Smallest grid cell edge. Tiny separations would otherwise push cell keys
/// toward the `i32` limits.
const MIN_GRID_CELL: f32 = 0.05;

/// Uniform hash grid with cell edge at least the separation, so any conflict
/// lies in one of the 27 cells around a candidate.
struct SeparationGrid {
    cell: f32,
    min_sq: f32,
    cells: FnvHashMap<IVec3, SmallVec<[Vec3; 4]>>,
}

impl SeparationGrid {
    fn new(min_separation: f32) -> Self {
        Self {
            cell: min_separation.max(MIN_GRID_CELL),
            min_sq: min_separation * min_separation,
            cells: FnvHashMap::default(),
        }
    }

    fn key(&self, p: Vec3) -> IVec3 {
        (p / self.cell).floor().as_ivec3()
    }

    fn is_clear(&self, p: Vec3) -> bool {
        let base = self.key(p);
        for dz in -1..=1 {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let key = base.saturating_add(IVec3::new(dx, dy, dz));
                    let Some(bucket) = self.cells.get(&key) else {
                        continue;
                    };
                    // exactly min_separation apart is accepted
                    if bucket.iter().any(|q| q.distance_squared(p) < self.min_sq) {
                        return false;
                    }
                }
            }
        }
        true
    }

    fn insert(&mut self, p: Vec3) {
        let key = self.key(p);
        self.cells.entry(key).or_default().push(p);
    }
}
