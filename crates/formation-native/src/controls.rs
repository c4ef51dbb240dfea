use formation_core::ShapeKind;

/// Multiplier applied per grow/shrink key press.
pub const PARTICLE_SIZE_STEP: f32 = 1.25;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    SelectShape(ShapeKind),
    ToggleZen,
    CycleColor,
    GrowParticles,
    ShrinkParticles,
    Quit,
}

/// Digits 1..=6 select shapes in menu order.
#[inline]
pub fn shape_for_digit(key: &str) -> Option<ShapeKind> {
    let digit = key.parse::<usize>().ok()?;
    ShapeKind::ALL.get(digit.checked_sub(1)?).copied()
}

#[inline]
pub fn command_for_key(key: &str) -> Option<Command> {
    if let Some(kind) = shape_for_digit(key) {
        return Some(Command::SelectShape(kind));
    }
    match key {
        "z" | "Z" | " " => Some(Command::ToggleZen),
        "c" | "C" => Some(Command::CycleColor),
        "+" | "=" => Some(Command::GrowParticles),
        "-" | "_" => Some(Command::ShrinkParticles),
        "Escape" => Some(Command::Quit),
        _ => None,
    }
}
