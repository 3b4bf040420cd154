use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;

#[derive(Debug, Clone, Deserialize, Serialize)]
struct Config {
    panel: Panel,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct Panel {
    name: String,
    #[serde(default)]
    coupling: Option<Coupling>,
    buttons: Vec<Button>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct Coupling {
    primary: String,
    dependent: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Button {
    Toggle {
        id: String,
        label: String,
        #[serde(default)]
        glyph: Option<String>,
    },
    Refresh {
        #[serde(default = "default_refresh_id")]
        id: String,
        #[serde(default = "default_refresh_label")]
        label: String,
    },
}

fn default_refresh_id() -> String {
    "refresh".to_string()
}

fn default_refresh_label() -> String {
    "Refresh".to_string()
}

const BUTTON_ID_SUFFIX: &str = "-button";

fn main() {
    println!("cargo:rerun-if-changed=panel.yaml");

    let panel_yaml = fs::read_to_string("panel.yaml")
        .expect("Failed to read panel.yaml - ensure it exists in the project root");

    let config: Config = serde_yaml::from_str(&panel_yaml).expect("Failed to parse panel.yaml");

    let mut keys: HashSet<String> = HashSet::new();
    let mut refresh_count = 0;

    for button in &config.panel.buttons {
        match button {
            Button::Toggle { id, .. } => {
                let key = id.strip_suffix(BUTTON_ID_SUFFIX).unwrap_or_else(|| {
                    panic!("Toggle id '{}' must end with '{}'", id, BUTTON_ID_SUFFIX)
                });
                if key.is_empty() {
                    panic!("Toggle id '{}' has an empty key", id);
                }
                if !keys.insert(key.to_string()) {
                    panic!("Duplicate toggle key '{}' in panel.yaml", key);
                }
            }
            Button::Refresh { .. } => {
                refresh_count += 1;
            }
        }
    }

    if refresh_count != 1 {
        panic!(
            "panel.yaml must declare exactly one refresh control, found {}",
            refresh_count
        );
    }

    if let Some(coupling) = &config.panel.coupling {
        if !keys.contains(&coupling.primary) {
            panic!(
                "Coupling primary '{}' does not name a configured toggle",
                coupling.primary
            );
        }
        if !keys.contains(&coupling.dependent) {
            panic!(
                "Coupling dependent '{}' does not name a configured toggle",
                coupling.dependent
            );
        }
        if coupling.primary == coupling.dependent {
            panic!("Coupling primary and dependent must be different toggles");
        }
    }
}
