use crate::constants::{
    DEFAULT_PARTICLE_SIZE, MAX_PLACEMENT_ATTEMPTS, METALLIC_GOLD, MIN_ORNAMENT_SEPARATION,
    ORNAMENT_COUNT, PARTICLE_COUNT,
};
use crate::error::{FormationError, Result};
use crate::placement::PlacementConfig;
use crate::shape::ShapeKind;

/// Construction-time knobs for a [`crate::Scene`]. Counts are fixed for the
/// scene's lifetime; build a new scene to change them.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub particle_count: usize,
    pub ornament_count: usize,
    pub min_separation: f32,
    pub max_attempts: u32,
    pub shape: ShapeKind,
    pub color: String,
    pub particle_size: f32,
    /// `Some` for reproducible sampling, `None` to seed from entropy.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            ornament_count: ORNAMENT_COUNT,
            min_separation: MIN_ORNAMENT_SEPARATION,
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
            shape: ShapeKind::Tree,
            color: format!("#{METALLIC_GOLD:06X}"),
            particle_size: DEFAULT_PARTICLE_SIZE,
            seed: None,
        }
    }
}

impl SceneConfig {
    pub fn placement(&self) -> PlacementConfig {
        PlacementConfig {
            requested: self.ornament_count,
            min_separation: self.min_separation,
            max_attempts: self.max_attempts,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.particle_count == 0 {
            return Err(FormationError::ZeroCount {
                what: "particle count",
            });
        }
        self.placement().validate()
    }
}
