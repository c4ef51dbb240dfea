//! The per-frame animation loop.
//!
//! All motion is exponential smoothing with fixed per-frame blend fractions
//! (see `constants.rs`), so a mode toggle or shape change is a plain state
//! write and the visible transition happens over the following ticks.

use crate::appearance::{Appearance, Rgb};
use crate::config::SceneConfig;
use crate::constants::{
    CAMERA_BLEND, CAMERA_FAR, EXPANSION_BLEND, EXPANSION_RELAX_BLEND, NEUTRAL_EXPANSION,
    ORNAMENT_VISIBLE_EPSILON, POSITION_BLEND, ROTATION_BLEND, SPAWN_HALF_EXTENT, ZEN_PULSE_AMPLITUDE,
    ZEN_PULSE_PHASE_STEP, ZEN_PULSE_SPEED,
};
use crate::error::Result;
use crate::gesture::{DriveTarget, GestureMapper, GestureSignal};
use crate::ornament::{build_model, OrnamentModel, OrnamentParams};
use crate::placement::{place_ornaments, Placement, PlacementReport};
use crate::shape::{generate_shape, ShapeKind};
use crate::state::Camera;
use glam::{EulerRot, Quat, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Breathing scale applied to particle `index` in zen mode. The phase advances
/// with the index so the pulse ripples through the set.
#[inline]
pub fn zen_pulse(index: usize, time: f32) -> f32 {
    1.0 + (time * ZEN_PULSE_SPEED + index as f32 * ZEN_PULSE_PHASE_STEP).sin() * ZEN_PULSE_AMPLITUDE
}

/// Smoothed drive parameters. Updated every tick whether or not a signal arrived.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriveState {
    pub expansion: f32,
    pub rotation: Vec2,
    pub camera_distance: f32,
}

impl Default for DriveState {
    fn default() -> Self {
        Self {
            expansion: NEUTRAL_EXPANSION,
            rotation: Vec2::ZERO,
            camera_distance: CAMERA_FAR,
        }
    }
}

impl DriveState {
    pub fn approach(&mut self, target: &DriveTarget) {
        let blend = if target.relaxing {
            EXPANSION_RELAX_BLEND
        } else {
            EXPANSION_BLEND
        };
        self.expansion = lerp(self.expansion, target.expansion, blend);
        self.rotation = self.rotation.lerp(target.rotation, ROTATION_BLEND);
        self.camera_distance = lerp(self.camera_distance, target.camera_distance, CAMERA_BLEND);
    }

    /// Orientation shared by the particle cloud and the decorations.
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0)
    }
}

/// Inputs shared by every decoration for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrnamentFrame {
    pub time: f32,
    pub expansion: f32,
    pub zen: bool,
    pub visible: bool,
}

#[derive(Clone, Debug)]
pub struct Ornament {
    placement: Placement,
    model: OrnamentModel,
    position: Vec3,
    scale: f32,
    /// Euler angles (XYZ). Yaw is fixed at placement.
    rotation: Vec3,
}

impl Ornament {
    /// Starts at its anchor with zero scale, so it grows in on first display.
    pub fn new(placement: Placement, model: OrnamentModel) -> Self {
        Self {
            position: placement.anchor,
            scale: 0.0,
            rotation: Vec3::new(0.0, placement.yaw, 0.0),
            placement,
            model,
        }
    }

    pub fn update(&mut self, frame: &OrnamentFrame) {
        let target_scale = if frame.visible {
            self.placement.profile.base_scale * frame.expansion
        } else {
            0.0
        };
        self.scale = lerp(self.scale, target_scale, POSITION_BLEND);
        if !frame.visible {
            return;
        }

        let target = if frame.zen {
            let spin = self.placement.profile.rotation_speed;
            self.rotation.x += spin;
            self.rotation.z += spin * 0.5;
            self.placement.zen_anchor * frame.expansion
                + self.placement.profile.oscillation(frame.time, frame.expansion)
        } else {
            self.rotation = Vec3::new(0.0, self.rotation.y, 0.0);
            self.placement.anchor * frame.expansion
        };
        self.position = self.position.lerp(target, POSITION_BLEND);
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn model(&self) -> &OrnamentModel {
        &self.model
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn is_drawn(&self) -> bool {
        self.scale > ORNAMENT_VISIBLE_EPSILON
    }
}

pub struct Scene {
    particles: Vec<Vec3>,
    shape_targets: Vec<Vec3>,
    zen_targets: Vec<Vec3>,
    ornaments: Vec<Ornament>,
    shape: ShapeKind,
    zen: bool,
    drive: DriveState,
    mapper: GestureMapper,
    latest_signal: Option<GestureSignal>,
    appearance: Appearance,
    placement_report: PlacementReport,
    rng: StdRng,
    frame: u64,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Result<Self> {
        config.validate()?;
        let appearance = Appearance::new(&config.color, config.particle_size)?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let count = config.particle_count;
        let particles = (0..count)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-SPAWN_HALF_EXTENT..SPAWN_HALF_EXTENT),
                    rng.gen_range(-SPAWN_HALF_EXTENT..SPAWN_HALF_EXTENT),
                    rng.gen_range(-SPAWN_HALF_EXTENT..SPAWN_HALF_EXTENT),
                )
            })
            .collect();
        let shape_targets = generate_shape(config.shape, count, &mut rng);
        let zen_targets = generate_shape(ShapeKind::Zen, count, &mut rng);

        let (placements, placement_report) = place_ornaments(&config.placement(), &mut rng)?;
        let ornaments = placements
            .into_iter()
            .map(|p| {
                let model = build_model(&OrnamentParams::random(p.variant, &mut rng));
                Ornament::new(p, model)
            })
            .collect::<Vec<_>>();

        log::info!(
            "[scene] particles={} shape={} ornaments={}/{}",
            count,
            config.shape,
            placement_report.placed,
            placement_report.requested
        );

        Ok(Self {
            particles,
            shape_targets,
            zen_targets,
            ornaments,
            shape: config.shape,
            zen: false,
            drive: DriveState::default(),
            mapper: GestureMapper::new(),
            latest_signal: None,
            appearance,
            placement_report,
            rng,
            frame: 0,
        })
    }

    /// Switch the normal formation. Targets are sampled afresh on every call,
    /// including repeated selection of the current shape.
    pub fn set_shape(&mut self, kind: ShapeKind) {
        self.shape = kind;
        self.shape_targets = generate_shape(kind, self.particles.len(), &mut self.rng);
        log::debug!("[scene] shape -> {}", kind);
    }

    pub fn set_shape_by_name(&mut self, name: &str) -> Result<()> {
        let kind = name.parse::<ShapeKind>().map_err(|e| {
            log::warn!("[scene] rejected shape: {e}");
            e
        })?;
        self.set_shape(kind);
        Ok(())
    }

    pub fn set_color(&mut self, value: &str) -> Result<()> {
        self.appearance.set_color(value).map_err(|e| {
            log::warn!("[scene] rejected color: {e}");
            e
        })?;
        log::debug!("[scene] color -> {}", value);
        Ok(())
    }

    pub fn set_particle_size(&mut self, size: f32) -> Result<()> {
        self.appearance.set_particle_size(size).map_err(|e| {
            log::warn!("[scene] rejected particle size: {e}");
            e
        })?;
        log::debug!("[scene] particle size -> {:.3}", size);
        Ok(())
    }

    /// Replace the latest-signal slot. `None` means no hand is tracked.
    pub fn push_signal(&mut self, signal: Option<GestureSignal>) {
        self.latest_signal = signal;
    }

    pub fn toggle_zen(&mut self) {
        self.set_zen(!self.zen);
    }

    pub fn set_zen(&mut self, zen: bool) {
        self.zen = zen;
        log::debug!("[scene] zen -> {}", zen);
    }

    /// Advance one frame. `time` is seconds since the animation started and
    /// only drives the oscillators; smoothing is per call.
    pub fn tick(&mut self, time: f32) {
        let target = self.mapper.map(self.latest_signal.as_ref());
        self.drive.approach(&target);

        let expansion = self.drive.expansion;
        let zen = self.zen;
        let targets = if zen {
            &self.zen_targets
        } else {
            &self.shape_targets
        };
        for (i, (live, target)) in self.particles.iter_mut().zip(targets).enumerate() {
            let mut goal = *target * expansion;
            if zen {
                goal *= zen_pulse(i, time);
            }
            *live = live.lerp(goal, POSITION_BLEND);
        }

        let frame = OrnamentFrame {
            time,
            expansion,
            zen,
            visible: zen || self.shape == ShapeKind::Tree,
        };
        for ornament in &mut self.ornaments {
            ornament.update(&frame);
        }
        self.frame += 1;
    }

    pub fn particles(&self) -> &[Vec3] {
        &self.particles
    }

    /// Targets the particles are currently converging to (before expansion).
    pub fn active_targets(&self) -> &[Vec3] {
        if self.zen {
            &self.zen_targets
        } else {
            &self.shape_targets
        }
    }

    pub fn shape_targets(&self) -> &[Vec3] {
        &self.shape_targets
    }

    pub fn zen_targets(&self) -> &[Vec3] {
        &self.zen_targets
    }

    pub fn ornaments(&self) -> &[Ornament] {
        &self.ornaments
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn is_zen(&self) -> bool {
        self.zen
    }

    pub fn drive(&self) -> &DriveState {
        &self.drive
    }

    pub fn latest_signal(&self) -> Option<&GestureSignal> {
        self.latest_signal.as_ref()
    }

    pub fn assembly_rotation(&self) -> Quat {
        self.drive.orientation()
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera::looking_at_origin(self.drive.camera_distance, aspect)
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn particle_color(&self) -> Rgb {
        self.appearance.particle_color(self.shape)
    }

    pub fn placement_report(&self) -> PlacementReport {
        self.placement_report
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}
