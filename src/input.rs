use jt_core::ControlAction;

/// What a key press asks for: a controller action or a UI-only toggle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyCommand {
    Control(ControlAction),
    ToggleHelp,
}

/// Map a `KeyboardEvent.key` value to a command.
#[inline]
pub fn command_for_key(key: &str) -> Option<KeyCommand> {
    let action = match key {
        " " | "Spacebar" => ControlAction::ToggleAutoScan,
        "ArrowRight" | "ArrowUp" => ControlAction::DISTORTION_UP,
        "ArrowLeft" | "ArrowDown" => ControlAction::DISTORTION_DOWN,
        "]" => ControlAction::COUPLING_UP,
        "[" => ControlAction::COUPLING_DOWN,
        "r" | "R" => ControlAction::Reset,
        "h" | "H" => return Some(KeyCommand::ToggleHelp),
        _ => return None,
    };
    Some(KeyCommand::Control(action))
}

/// Parse a range input's `value` string, rejecting non-finite numbers.
#[inline]
pub fn parse_slider_value(raw: &str) -> Option<f32> {
    raw.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

/// Format a parameter for a range input's `value` attribute.
#[inline]
pub fn format_slider_value(v: f32) -> String {
    format!("{:.2}", v)
}
