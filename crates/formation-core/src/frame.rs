//! Flattening the scene into GPU-ready sprite instances.

use crate::constants::PARTICLE_OPACITY;
use crate::scene::Scene;
use std::ops::Range;

/// One camera-facing sprite, in assembly-local space. The shared assembly
/// rotation is applied by the model matrix.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteInstance {
    pub pos: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

/// Instance ranges for the two draw passes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameLayout {
    pub particles: Range<u32>,
    pub ornaments: Range<u32>,
}

/// Upper bound on instances [`compose_instances`] can emit for `scene`.
pub fn instance_capacity(scene: &Scene) -> usize {
    scene.particles().len()
        + scene
            .ornaments()
            .iter()
            .map(|o| o.model().parts.len())
            .sum::<usize>()
}

/// Clear `out` and write all particles followed by the parts of every
/// decoration that is currently drawn.
pub fn compose_instances(scene: &Scene, out: &mut Vec<SpriteInstance>) -> FrameLayout {
    out.clear();
    let [r, g, b] = scene.particle_color();
    let particle_color = [r, g, b, PARTICLE_OPACITY];
    let particle_size = scene.appearance().particle_size();
    out.extend(scene.particles().iter().map(|p| SpriteInstance {
        pos: p.to_array(),
        size: particle_size,
        color: particle_color,
    }));
    let particle_end = out.len() as u32;

    for ornament in scene.ornaments().iter().filter(|o| o.is_drawn()) {
        let rotation = ornament.orientation();
        let scale = ornament.scale();
        for part in &ornament.model().parts {
            let [r, g, b] = part.color;
            out.push(SpriteInstance {
                pos: (ornament.position() + rotation * (part.offset * scale)).to_array(),
                size: part.size * scale,
                color: [r, g, b, 1.0],
            });
        }
    }

    FrameLayout {
        particles: 0..particle_end,
        ornaments: particle_end..out.len() as u32,
    }
}
