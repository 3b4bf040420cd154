use crate::config::{Button, Panel};
use crate::toggle_state::{PanelStates, ToggleState};
use tracing::warn;

/// Resolves a glyph name from the panel config to its display character
pub fn resolve_glyph(glyph_name: Option<&String>) -> Option<&'static str> {
    let glyph_name = glyph_name?;

    match glyph_name.as_str() {
        "weather" | "umbrella" => Some("☂"),
        "sun" => Some("☀"),
        "walking" => Some("🚶"),
        "food" => Some("🍴"),
        "parking" => Some("🅿"),
        "refresh" => Some("↻"),
        other => {
            warn!("Unknown glyph name: {}", other);
            None
        }
    }
}

/// Gets the display name for a button, with a state indicator for toggles
pub fn display_name(button: &Button, states: &PanelStates) -> String {
    match button {
        Button::Toggle { label, .. } => {
            let indicator = button
                .key()
                .and_then(|key| states.get_state(key))
                .map(state_indicator)
                .unwrap_or("?");
            format!("{} {}", label, indicator)
        }
        Button::Refresh { label, .. } => label.clone(),
    }
}

fn state_indicator(state: ToggleState) -> &'static str {
    match state {
        ToggleState::On => "●",
        ToggleState::Off => "○",
        ToggleState::Disabled => "–",
    }
}

/// Describes what a state means for the query string
pub fn state_description(state: ToggleState) -> &'static str {
    match state {
        ToggleState::On => "included (true)",
        ToggleState::Off => "excluded (false)",
        ToggleState::Disabled => "not sent",
    }
}

/// Renders the whole panel as text, one button per line. A pure projection
/// of the current states; called after every mutation.
pub fn render_panel(panel: &Panel, states: &PanelStates) -> String {
    let mut out = String::new();
    out.push_str(&panel.name);
    out.push('\n');

    for button in &panel.buttons {
        let glyph = match button {
            Button::Toggle { glyph, .. } => resolve_glyph(glyph.as_ref()),
            Button::Refresh { .. } => resolve_glyph(Some(&"refresh".to_string())),
        };

        out.push_str("  ");
        if let Some(glyph) = glyph {
            out.push_str(glyph);
            out.push(' ');
        }
        out.push_str(&display_name(button, states));

        if let Some(state) = button.key().and_then(|key| states.get_state(key)) {
            out.push_str(&format!(
                "  [{}] {}",
                state.marker(),
                state_description(state)
            ));
        }
        out.push('\n');
    }

    out
}
