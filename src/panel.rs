//! The panel controller: owns the configured panel and its toggle states,
//! and exposes the three operations of the widget's lifecycle — initialize
//! from a URL, advance a toggle on click, and serialize into a refresh URL.

use crate::config::Panel;
use crate::display;
use crate::query;
use crate::toggle_state::{PanelStates, ToggleState};
use crate::transition::{self, ClickOutcome};
use tracing::info;
use url::Url;

pub struct PanelController {
    panel: Panel,
    states: PanelStates,
}

impl PanelController {
    /// Creates a controller with every toggle in its absent-parameter
    /// default, so each toggle always holds a state even before
    /// `init_from_url` runs.
    pub fn new(panel: Panel) -> Self {
        let states = PanelStates::new();
        let primary = panel.primary_key().map(str::to_string);
        for key in panel.toggle_keys() {
            states.set_state(key, ToggleState::default_for(Some(key) == primary.as_deref()));
        }
        Self { panel, states }
    }

    /// Initializes every toggle from the URL's query parameters. Runs once
    /// at the start of the page lifetime.
    pub fn init_from_url(&self, url: &Url) {
        info!("Initializing panel '{}' from {}", self.panel.name, url);
        let keys = self.panel.toggle_keys();
        query::init_states(url, &keys, self.panel.primary_key(), &self.states);
    }

    /// Applies a click to the named toggle, returning what changed. `None`
    /// for keys the panel does not know.
    pub fn click(&self, key: &str) -> Option<ClickOutcome> {
        transition::apply_click(key, self.panel.coupling.as_ref(), &self.states)
    }

    /// Serializes the current states into the URL the refresh action
    /// navigates to.
    pub fn refresh_url(&self, current: &Url) -> Url {
        let keys = self.panel.toggle_keys();
        query::refresh_url(current, &keys, &self.states)
    }

    /// Text projection of the current panel
    pub fn render(&self) -> String {
        display::render_panel(&self.panel, &self.states)
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn states(&self) -> &PanelStates {
        &self.states
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Button, Coupling};

    fn toggle(id: &str, label: &str) -> Button {
        Button::Toggle {
            id: id.to_string(),
            label: label.to_string(),
            glyph: None,
        }
    }

    fn mood_panel() -> Panel {
        Panel {
            name: "Mood".to_string(),
            coupling: Some(Coupling {
                primary: "weather".to_string(),
                dependent: "walking".to_string(),
            }),
            buttons: vec![
                toggle("food-button", "Food"),
                toggle("walking-button", "Walking"),
                toggle("weather-button", "Weather"),
                Button::Refresh {
                    id: "refresh".to_string(),
                    label: "Refresh".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_new_controller_holds_defaults() {
        let controller = PanelController::new(mood_panel());
        assert_eq!(
            controller.states().get_state("weather"),
            Some(ToggleState::On)
        );
        assert_eq!(
            controller.states().get_state("food"),
            Some(ToggleState::Disabled)
        );
        assert_eq!(
            controller.states().get_state("walking"),
            Some(ToggleState::Disabled)
        );
    }

    #[test]
    fn test_init_overrides_defaults() {
        let controller = PanelController::new(mood_panel());
        let url = Url::parse("http://localhost:3000/?weather=false&food=true").unwrap();
        controller.init_from_url(&url);

        assert_eq!(
            controller.states().get_state("weather"),
            Some(ToggleState::Off)
        );
        assert_eq!(controller.states().get_state("food"), Some(ToggleState::On));
        assert_eq!(
            controller.states().get_state("walking"),
            Some(ToggleState::Disabled)
        );
    }

    #[test]
    fn test_click_uses_configured_coupling() {
        let controller = PanelController::new(mood_panel());
        let url = Url::parse("http://localhost:3000/?weather=false&walking=true").unwrap();
        controller.init_from_url(&url);

        let outcome = controller.click("weather").unwrap();
        assert_eq!(outcome.new_state, ToggleState::On);
        assert_eq!(
            outcome.forced,
            Some(("walking".to_string(), ToggleState::Disabled))
        );
    }

    #[test]
    fn test_click_unknown_key() {
        let controller = PanelController::new(mood_panel());
        assert_eq!(controller.click("swimming"), None);
    }

    #[test]
    fn test_refresh_url_reflects_clicks() {
        let controller = PanelController::new(mood_panel());
        let url = Url::parse("http://localhost:3000/").unwrap();
        controller.init_from_url(&url);

        // weather defaults On; clicking food wakes it to On
        controller.click("food").unwrap();
        let refreshed = controller.refresh_url(&url);
        assert_eq!(
            refreshed.as_str(),
            "http://localhost:3000/?food=true&weather=true"
        );
    }
}
