//! URL-side of the panel: reading toggle states out of query parameters and
//! serializing them back into a refresh URL.

use crate::toggle_state::{PanelStates, ToggleState};
use tracing::{debug, warn};
use url::Url;

/// Resolves a single toggle's initial state from the URL.
///
/// Absent parameter: the primary toggle defaults to `On`, every other toggle
/// to `Disabled`. An unrecognized value also falls back to the default so the
/// toggle is never left without a state.
pub fn initial_state(url: &Url, key: &str, is_primary: bool) -> ToggleState {
    let param = url
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned());

    match param {
        Some(value) => ToggleState::from_query_value(&value).unwrap_or_else(|| {
            warn!(
                "Unrecognized value '{}' for parameter '{}', using default",
                value, key
            );
            ToggleState::default_for(is_primary)
        }),
        None => ToggleState::default_for(is_primary),
    }
}

/// Initializes every configured toggle from the URL. Runs once per page
/// lifetime; afterwards the states change only through clicks.
pub fn init_states(url: &Url, keys: &[&str], primary: Option<&str>, states: &PanelStates) {
    for key in keys {
        let state = initial_state(url, key, Some(*key) == primary);
        debug!("Initialized '{}' to {:?}", key, state);
        states.set_state(key, state);
    }
}

/// Builds the refresh URL: the current URL's scheme, host, and path with a
/// query string rebuilt from the toggle states in configured order.
/// `Disabled` toggles are omitted, `On` becomes `key=true`, `Off` becomes
/// `key=false`.
pub fn refresh_url(current: &Url, keys: &[&str], states: &PanelStates) -> Url {
    let mut url = current.clone();
    url.set_fragment(None);
    url.set_query(None);

    let pairs: Vec<(&str, &'static str)> = keys
        .iter()
        .filter_map(|key| {
            let state = states.get_state(key)?;
            state.query_value().map(|value| (*key, value))
        })
        .collect();

    if !pairs.is_empty() {
        let mut serializer = url.query_pairs_mut();
        for (key, value) in pairs {
            serializer.append_pair(key, value);
        }
    }

    debug!("Built refresh URL: {}", url);
    url
}
