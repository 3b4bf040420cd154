use crate::config::Coupling;
use crate::toggle_state::{PanelStates, ToggleState};
use tracing::{debug, info, warn};

/// Result of applying a click to a toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickOutcome {
    pub key: String,
    pub previous: ToggleState,
    pub new_state: ToggleState,
    /// A companion toggle forced into a state by the coupling policy
    pub forced: Option<(String, ToggleState)>,
}

/// Advances a toggle per the click table and applies the coupling policy:
///
/// | Current  | Primary clicked              | Dependent clicked     | Other   |
/// |----------|------------------------------|-----------------------|---------|
/// | Off      | On, dependent -> Disabled    | On                    | On      |
/// | Disabled | On                           | On, primary -> Off    | On      |
/// | On       | Off                          | Off, primary -> Off   | Off     |
///
/// Returns `None` (and leaves all states untouched) if the key was never
/// initialized.
pub fn apply_click(
    key: &str,
    coupling: Option<&Coupling>,
    states: &PanelStates,
) -> Option<ClickOutcome> {
    let Some(previous) = states.get_state(key) else {
        warn!("Ignoring click on unknown toggle '{}'", key);
        return None;
    };

    let new_state = previous.clicked();
    states.set_state(key, new_state);
    debug!("Toggle '{}' clicked: {:?} -> {:?}", key, previous, new_state);

    let forced = coupling.and_then(|c| forced_change(key, previous, c));
    if let Some((forced_key, forced_state)) = &forced {
        states.set_state(forced_key, *forced_state);
        info!(
            "Toggle '{}' clicked while {:?}, forcing '{}' to {:?}",
            key, previous, forced_key, forced_state
        );
    }

    Some(ClickOutcome {
        key: key.to_string(),
        previous,
        new_state,
        forced,
    })
}

// The coupling only ever touches the companion: activating the primary from
// Off sidelines the dependent, and any click on the dependent other than a
// plain Off->On overrides the primary with an explicit Off.
fn forced_change(
    key: &str,
    previous: ToggleState,
    coupling: &Coupling,
) -> Option<(String, ToggleState)> {
    if key == coupling.primary && previous == ToggleState::Off {
        return Some((coupling.dependent.clone(), ToggleState::Disabled));
    }
    if key == coupling.dependent
        && matches!(previous, ToggleState::Disabled | ToggleState::On)
    {
        return Some((coupling.primary.clone(), ToggleState::Off));
    }
    None
}
