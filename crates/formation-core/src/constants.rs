// Shared tuning constants for the formation engine and its front-ends.

// Population
pub const PARTICLE_COUNT: usize = 8000; // live particles, fixed for the scene lifetime
pub const ORNAMENT_COUNT: usize = 1280; // requested decorations (placed count may be lower)

// Placement solver
pub const MIN_ORNAMENT_SEPARATION: f32 = 2.2; // minimum distance between two anchors
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 1000; // candidates tried per decoration before skipping

// Per-frame blend fractions. These are applied once per rendered frame, so convergence
// speed follows the display refresh rate. Tune here rather than converting to time.
pub const POSITION_BLEND: f32 = 0.05; // particle and decoration position/scale smoothing
pub const EXPANSION_BLEND: f32 = 0.1; // expansion smoothing while a signal is present
pub const EXPANSION_RELAX_BLEND: f32 = 0.05; // expansion smoothing toward neutral without a signal
pub const ROTATION_BLEND: f32 = 0.05; // assembly orientation smoothing
pub const CAMERA_BLEND: f32 = 0.05; // camera distance smoothing

// Gesture mapping
pub const EXPANSION_BASE: f32 = 0.2; // expansion target for a closed fist
pub const EXPANSION_SPREAD: f32 = 1.5; // added expansion per unit of openness
pub const NEUTRAL_EXPANSION: f32 = 1.0; // relaxation target when no signal arrives
pub const ROTATION_GAIN: f32 = 2.0; // amplification of the signal rotation
pub const CAMERA_NEAR: f32 = 15.0; // camera distance while pinching
pub const CAMERA_FAR: f32 = 40.0; // default camera distance

// Zen mode
pub const ZEN_PULSE_SPEED: f32 = 0.4; // radians per second of the breathing pulse
pub const ZEN_PULSE_PHASE_STEP: f32 = 0.005; // phase offset between consecutive particles
pub const ZEN_PULSE_AMPLITUDE: f32 = 0.05; // relative scale swing of the pulse

// Initial scatter of live particles (half-extent of the spawn cube)
pub const SPAWN_HALF_EXTENT: f32 = 50.0;

// Below this scale a decoration is not drawn
pub const ORNAMENT_VISIBLE_EPSILON: f32 = 1e-3;

// Appearance
pub const DEFAULT_PARTICLE_SIZE: f32 = 0.12;
pub const PARTICLE_OPACITY: f32 = 0.5;

// Theme palette (0xRRGGBB)
pub const MATTE_GREEN: u32 = 0x2F5233;
pub const METALLIC_GOLD: u32 = 0xD4AF37;
pub const XMAS_RED: u32 = 0xC41E3A;
pub const BACKGROUND_BLACK: u32 = 0x050505;
pub const EMERALD: u32 = 0x50C878;
pub const THEME_COLORS: [u32; 4] = [METALLIC_GOLD, XMAS_RED, EMERALD, MATTE_GREEN];

// Pointer fallback mapping
pub const POINTER_ROTATION_GAIN: f32 = 0.5; // rotation per unit of normalized pointer offset
pub const WHEEL_OPENNESS_STEP: f32 = 0.001; // openness change per wheel delta unit
pub const MANUAL_OPENNESS_MIN: f32 = 0.1;
pub const MANUAL_OPENNESS_MAX: f32 = 2.5;
pub const DEFAULT_MANUAL_OPENNESS: f32 = 1.0;

// Hand landmark heuristics (normalized image units)
pub const OPENNESS_REST_DISTANCE: f32 = 0.1; // mean fingertip distance of a closed fist
pub const OPENNESS_RANGE: f32 = 0.35; // additional distance of a fully open hand
pub const PINCH_STRENGTH_RANGE: f32 = 0.1; // thumb-index distance at zero strength
pub const PINCH_THRESHOLD: f32 = 0.05; // thumb-index distance below which a pinch registers
pub const HAND_ROTATION_GAIN: f32 = 2.0;

// Camera
pub const CAMERA_FOVY_DEGREES: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
