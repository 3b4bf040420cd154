pub mod config;
pub mod display;
pub mod panel;
pub mod query;
pub mod toggle_state;
pub mod transition;


pub use config::{load_config, load_config_from, Button, Config, Coupling, Panel};
pub use display::{display_name, render_panel, resolve_glyph, state_description};
pub use panel::PanelController;
pub use query::{init_states, initial_state, refresh_url};
pub use toggle_state::{PanelStates, ToggleState};
pub use transition::{apply_click, ClickOutcome};
