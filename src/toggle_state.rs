use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Represents the state of a toggle button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    On,
    Off,
    /// Excluded from the query string entirely; distinct from `Off`
    Disabled,
}

impl ToggleState {
    /// The state a toggle advances to when clicked, before any coupling
    /// policy is applied. `Disabled` wakes up to `On`; the cycle never
    /// returns to `Disabled` on its own.
    pub fn clicked(self) -> ToggleState {
        match self {
            ToggleState::Off => ToggleState::On,
            ToggleState::Disabled => ToggleState::On,
            ToggleState::On => ToggleState::Off,
        }
    }

    /// The query-parameter value this state serializes to, `None` for
    /// `Disabled` (omitted from the query string).
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            ToggleState::On => Some("true"),
            ToggleState::Off => Some("false"),
            ToggleState::Disabled => None,
        }
    }

    /// Maps a literal query-parameter value back to a state.
    pub fn from_query_value(value: &str) -> Option<ToggleState> {
        match value {
            "true" => Some(ToggleState::On),
            "false" => Some(ToggleState::Off),
            "disable" => Some(ToggleState::Disabled),
            _ => None,
        }
    }

    /// Default state when a toggle's parameter is absent from the URL.
    pub fn default_for(is_primary: bool) -> ToggleState {
        if is_primary {
            ToggleState::On
        } else {
            ToggleState::Disabled
        }
    }

    /// The visual marker the page applies to the button element.
    pub fn marker(self) -> &'static str {
        match self {
            ToggleState::On => "on",
            ToggleState::Off => "off",
            ToggleState::Disabled => "disable",
        }
    }
}

/// Holds the state of every toggle in the panel
#[derive(Debug)]
pub struct PanelStates {
    states: Arc<RwLock<HashMap<String, ToggleState>>>,
}

impl Clone for PanelStates {
    fn clone(&self) -> Self {
        Self {
            states: Arc::clone(&self.states),
        }
    }
}

impl Default for PanelStates {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelStates {
    pub fn new() -> Self {
        Self {
            states: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Gets the current state of a toggle, `None` if the key was never
    /// initialized (an unconfigured toggle).
    pub fn get_state(&self, key: &str) -> Option<ToggleState> {
        match self.states.read() {
            Ok(states) => {
                let state = states.get(key).copied();
                debug!("Retrieved state for '{}': {:?}", key, state);
                state
            }
            Err(e) => {
                warn!("Failed to read toggle state for '{}': {}", key, e);
                None
            }
        }
    }

    /// Sets the state of a toggle
    pub fn set_state(&self, key: &str, state: ToggleState) {
        match self.states.write() {
            Ok(mut states) => {
                let previous = states.insert(key.to_string(), state);
                debug!("Set state for '{}': {:?} -> {:?}", key, previous, state);
            }
            Err(e) => {
                warn!("Failed to set toggle state for '{}': {}", key, e);
            }
        }
    }

    /// Gets all current states (for rendering and tests)
    pub fn snapshot(&self) -> HashMap<String, ToggleState> {
        match self.states.read() {
            Ok(states) => states.clone(),
            Err(e) => {
                warn!("Failed to read toggle states: {}", e);
                HashMap::new()
            }
        }
    }

    /// Returns the number of toggles being tracked
    pub fn toggle_count(&self) -> usize {
        match self.states.read() {
            Ok(states) => states.len(),
            Err(_) => 0,
        }
    }
}
