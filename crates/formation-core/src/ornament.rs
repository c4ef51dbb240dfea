//! Decoration variants, their per-object motion profile, and pure geometry builders.
//!
//! A variant is a plain tag. The placement solver only reads its
//! [`Orientation`] policy. Random per-object choices live in [`OrnamentParams`],
//! and [`build_model`] turns those into parts without touching an RNG.

use crate::appearance::{rgb_from_hex, Rgb};
use crate::constants::{METALLIC_GOLD, XMAS_RED};
use glam::{Vec2, Vec3};
use rand::seq::SliceRandom;
use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::{FRAC_PI_4, TAU};

const WHITE: u32 = 0xFFFFFF;
const GINGER_BROWN: u32 = 0x8B4513;
const CHEEK_PINK: u32 = 0xFFB6C1;
const CANDY_GREEN: u32 = 0x44FF44;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrnamentVariant {
    GiftBox,
    Stocking,
    Bow,
    Gingerbread,
}

/// How a decoration's yaw is chosen when it is placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Face away from the tree's vertical axis.
    FaceOutward,
    RandomYaw,
}

impl OrnamentVariant {
    pub const ALL: [OrnamentVariant; 4] = [
        OrnamentVariant::GiftBox,
        OrnamentVariant::Stocking,
        OrnamentVariant::Bow,
        OrnamentVariant::Gingerbread,
    ];

    /// Relative draw weight.
    pub fn weight(self) -> u32 {
        match self {
            OrnamentVariant::GiftBox => 1,
            OrnamentVariant::Stocking => 1,
            OrnamentVariant::Bow => 1,
            OrnamentVariant::Gingerbread => 1,
        }
    }

    pub fn orientation(self) -> Orientation {
        match self {
            OrnamentVariant::GiftBox | OrnamentVariant::Gingerbread => Orientation::FaceOutward,
            OrnamentVariant::Stocking | OrnamentVariant::Bow => Orientation::RandomYaw,
        }
    }

    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL
            .choose_weighted(rng, |v| v.weight())
            .unwrap_or(&OrnamentVariant::GiftBox)
    }
}

impl Orientation {
    pub fn yaw<R: Rng + ?Sized>(self, anchor: Vec3, rng: &mut R) -> f32 {
        match self {
            Orientation::FaceOutward => anchor.x.atan2(anchor.z),
            Orientation::RandomYaw => rng.gen_range(0.0..TAU),
        }
    }
}

/// Fixed per-object motion parameters, drawn once at placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationProfile {
    pub base_scale: f32,
    pub float_offset: f32,
    pub float_speed: f32,
    pub float_radius: f32,
    /// Radians per frame.
    pub rotation_speed: f32,
}

impl AnimationProfile {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            base_scale: (1.0 + rng.gen::<f32>() * 0.4) * 1.5,
            float_offset: rng.gen::<f32>() * TAU,
            float_speed: 0.2 + rng.gen::<f32>() * 0.5,
            float_radius: 2.5 + rng.gen::<f32>() * 4.0,
            rotation_speed: (rng.gen::<f32>() - 0.5) * 0.02,
        }
    }

    /// Zen-mode drift around the anchor. Each axis runs at a slightly different
    /// rate and phase so neighbouring objects do not move in lockstep.
    pub fn oscillation(&self, time: f32, expansion: f32) -> Vec3 {
        let radius = self.float_radius * expansion;
        let speed = self.float_speed;
        let offset = self.float_offset;
        Vec3::new(
            (time * speed + offset).sin() * radius,
            (time * speed * 1.1 + offset * 0.5).cos() * radius,
            (time * speed * 0.9 - offset * 0.8).sin() * radius,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Primitive {
    Sphere,
    Cuboid,
    Slab,
    Torus,
    Capsule,
    Cylinder,
}

/// One drawable piece of a decoration, in the decoration's local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrnamentPart {
    pub primitive: Primitive,
    pub offset: Vec3,
    /// Approximate half-extent, used as the sprite radius.
    pub size: f32,
    pub color: Rgb,
}

impl OrnamentPart {
    fn new(primitive: Primitive, offset: [f32; 3], size: f32, color: Rgb) -> Self {
        Self {
            primitive,
            offset: Vec3::from(offset),
            size,
            color,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrnamentModel {
    pub variant: OrnamentVariant,
    pub parts: SmallVec<[OrnamentPart; 24]>,
}

const GIFT_DOTS: usize = 8;
const GIFT_BOW_LOOPS: usize = 8;

/// Random choices for a gift box, drawn once at creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GiftBoxParams {
    /// Red box with gold ribbon, otherwise gold box with red ribbon.
    pub red_box: bool,
    /// Polka dots as (position along the side, height).
    pub dots: [Vec2; GIFT_DOTS],
    /// Lift angle of each loop of the lid bow.
    pub loop_tilts: [f32; GIFT_BOW_LOOPS],
}

impl GiftBoxParams {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let red_box = rng.gen::<f32>() > 0.5;
        let mut dots = [Vec2::ZERO; GIFT_DOTS];
        for dot in &mut dots {
            let along = (rng.gen::<f32>() - 0.5) * 0.3;
            let height = rng.gen::<f32>() * 0.3;
            *dot = Vec2::new(along, height);
        }
        let mut loop_tilts = [0.0; GIFT_BOW_LOOPS];
        for tilt in &mut loop_tilts {
            *tilt = FRAC_PI_4 + rng.gen::<f32>() * 0.2;
        }
        Self {
            red_box,
            dots,
            loop_tilts,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BowParams {
    /// Red ribbon, otherwise gold.
    pub red: bool,
}

impl BowParams {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            red: rng.gen::<f32>() > 0.3,
        }
    }
}

/// A variant together with its drawn parameters. [`build_model`] is a pure
/// function of this value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OrnamentParams {
    GiftBox(GiftBoxParams),
    Stocking,
    Bow(BowParams),
    Gingerbread,
}

impl OrnamentParams {
    pub fn random<R: Rng + ?Sized>(variant: OrnamentVariant, rng: &mut R) -> Self {
        match variant {
            OrnamentVariant::GiftBox => OrnamentParams::GiftBox(GiftBoxParams::random(rng)),
            OrnamentVariant::Stocking => OrnamentParams::Stocking,
            OrnamentVariant::Bow => OrnamentParams::Bow(BowParams::random(rng)),
            OrnamentVariant::Gingerbread => OrnamentParams::Gingerbread,
        }
    }

    pub fn variant(&self) -> OrnamentVariant {
        match self {
            OrnamentParams::GiftBox(_) => OrnamentVariant::GiftBox,
            OrnamentParams::Stocking => OrnamentVariant::Stocking,
            OrnamentParams::Bow(_) => OrnamentVariant::Bow,
            OrnamentParams::Gingerbread => OrnamentVariant::Gingerbread,
        }
    }
}

pub fn build_model(params: &OrnamentParams) -> OrnamentModel {
    let parts = match params {
        OrnamentParams::GiftBox(p) => gift_box_parts(p),
        OrnamentParams::Stocking => stocking_parts(),
        OrnamentParams::Bow(p) => bow_parts(p),
        OrnamentParams::Gingerbread => gingerbread_parts(),
    };
    OrnamentModel {
        variant: params.variant(),
        parts,
    }
}

fn gift_box_parts(params: &GiftBoxParams) -> SmallVec<[OrnamentPart; 24]> {
    use Primitive::*;
    let (box_hex, ribbon_hex) = if params.red_box {
        (XMAS_RED, METALLIC_GOLD)
    } else {
        (METALLIC_GOLD, XMAS_RED)
    };
    let box_color = rgb_from_hex(box_hex);
    let ribbon = rgb_from_hex(ribbon_hex);
    let white = rgb_from_hex(WHITE);

    let mut parts = SmallVec::new();
    parts.push(OrnamentPart::new(Cuboid, [0.0, 0.175, 0.0], 0.21, box_color));

    // polka dots scattered over the four sides
    for (i, dot) in params.dots.iter().enumerate() {
        let (along, height) = (dot.x, dot.y);
        let offset = match i % 4 {
            0 => [0.22, height, along],
            1 => [-0.22, height, along],
            2 => [along, height, 0.22],
            _ => [along, height, -0.22],
        };
        parts.push(OrnamentPart::new(Sphere, offset, 0.03, white));
    }

    parts.push(OrnamentPart::new(Slab, [0.0, 0.4, 0.0], 0.23, box_color));
    parts.push(OrnamentPart::new(Slab, [0.0, 0.24, 0.0], 0.24, ribbon));
    parts.push(OrnamentPart::new(Slab, [0.0, 0.24, 0.0], 0.24, ribbon));
    parts.push(OrnamentPart::new(Sphere, [0.0, 0.46, 0.0], 0.06, ribbon));

    // loop bow on the lid
    for (i, &tilt) in params.loop_tilts.iter().enumerate() {
        let angle = i as f32 / GIFT_BOW_LOOPS as f32 * TAU;
        let reach = Vec2::from_angle(angle) * 0.12 * tilt.cos();
        parts.push(OrnamentPart::new(
            Torus,
            [reach.x, 0.5 + 0.12 * tilt.sin(), reach.y],
            0.12,
            ribbon,
        ));
    }

    parts.push(OrnamentPart::new(Slab, [0.15, 0.42, 0.15], 0.075, white));
    parts
}

fn stocking_parts() -> SmallVec<[OrnamentPart; 24]> {
    use Primitive::*;
    let red = rgb_from_hex(XMAS_RED);
    let white = rgb_from_hex(WHITE);
    smallvec::smallvec![
        OrnamentPart::new(Cylinder, [0.0, 0.3, 0.0], 0.3, red),
        OrnamentPart::new(Capsule, [0.15, 0.0, 0.0], 0.25, red),
        OrnamentPart::new(Torus, [0.0, 0.6, 0.0], 0.25, white),
    ]
}

fn bow_parts(params: &BowParams) -> SmallVec<[OrnamentPart; 24]> {
    use Primitive::*;
    let color = if params.red {
        rgb_from_hex(XMAS_RED)
    } else {
        rgb_from_hex(METALLIC_GOLD)
    };
    smallvec::smallvec![
        OrnamentPart::new(Torus, [-0.2, 0.1, 0.0], 0.25, color),
        OrnamentPart::new(Torus, [0.2, 0.1, 0.0], 0.25, color),
        OrnamentPart::new(Sphere, [0.0, 0.1, 0.05], 0.08, color),
    ]
}

fn gingerbread_parts() -> SmallVec<[OrnamentPart; 24]> {
    use Primitive::*;
    let brown = rgb_from_hex(GINGER_BROWN);
    let white = rgb_from_hex(WHITE);
    let candy = rgb_from_hex(XMAS_RED);
    let pink = rgb_from_hex(CHEEK_PINK);
    let green = rgb_from_hex(CANDY_GREEN);
    smallvec::smallvec![
        // body and limbs
        OrnamentPart::new(Slab, [0.0, 0.45, 0.09], 0.3, brown),
        OrnamentPart::new(Sphere, [0.0, 0.9, 0.09], 0.25, brown),
        OrnamentPart::new(Slab, [-0.35, 0.5, 0.09], 0.15, brown),
        OrnamentPart::new(Slab, [0.35, 0.5, 0.09], 0.15, brown),
        OrnamentPart::new(Slab, [-0.22, 0.1, 0.09], 0.15, brown),
        OrnamentPart::new(Slab, [0.22, 0.1, 0.09], 0.15, brown),
        // face
        OrnamentPart::new(Sphere, [-0.08, 0.9, 0.18], 0.04, white),
        OrnamentPart::new(Sphere, [0.08, 0.9, 0.18], 0.04, white),
        OrnamentPart::new(Torus, [0.0, 0.85, 0.18], 0.08, white),
        OrnamentPart::new(Sphere, [-0.16, 0.85, 0.17], 0.04, pink),
        OrnamentPart::new(Sphere, [0.16, 0.85, 0.17], 0.04, pink),
        OrnamentPart::new(Torus, [0.0, 1.05, 0.15], 0.12, white),
        // buttons
        OrnamentPart::new(Sphere, [0.0, 0.6, 0.18], 0.05, candy),
        OrnamentPart::new(Sphere, [0.0, 0.45, 0.18], 0.05, candy),
        OrnamentPart::new(Sphere, [0.0, 0.3, 0.18], 0.05, green),
        // icing on the limbs
        OrnamentPart::new(Capsule, [-0.32, 0.5, 0.18], 0.08, white),
        OrnamentPart::new(Capsule, [0.32, 0.5, 0.18], 0.08, white),
        OrnamentPart::new(Capsule, [-0.25, 0.1, 0.18], 0.08, white),
        OrnamentPart::new(Capsule, [0.25, 0.1, 0.18], 0.08, white),
    ]
}
