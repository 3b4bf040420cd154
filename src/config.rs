use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

// Embed panel.yaml at compile time; build.rs validates it
const EMBEDDED_PANEL: &str = include_str!("../panel.yaml");

/// Suffix shared by all toggle element ids; the toggle key is the id minus
/// this suffix (the id `weather-button` drives the `weather` parameter).
pub const BUTTON_ID_SUFFIX: &str = "-button";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub panel: Panel,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Panel {
    pub name: String,
    #[serde(default)]
    pub coupling: Option<Coupling>,
    pub buttons: Vec<Button>,
}

/// A declared pairing between two toggles: while the primary is active the
/// dependent is irrelevant, and re-enabling the dependent overrides the
/// primary. The transition table itself stays generic; this is policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Coupling {
    pub primary: String,
    pub dependent: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Button {
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

impl Button {
    /// The query-parameter key for a toggle, derived from its element id by
    /// stripping the `-button` suffix. `None` for non-toggle controls.
    pub fn key(&self) -> Option<&str> {
        match self {
            Button::Toggle { id, .. } => Some(id.strip_suffix(BUTTON_ID_SUFFIX).unwrap_or(id)),
            Button::Refresh { .. } => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Button::Toggle { label, .. } | Button::Refresh { label, .. } => label,
        }
    }

    pub fn is_toggle(&self) -> bool {
        matches!(self, Button::Toggle { .. })
    }
}

impl Panel {
    /// Toggle keys in declared (element) order. This order drives query
    /// serialization.
    pub fn toggle_keys(&self) -> Vec<&str> {
        self.buttons.iter().filter_map(|b| b.key()).collect()
    }

    pub fn has_toggle(&self, key: &str) -> bool {
        self.buttons.iter().any(|b| b.key() == Some(key))
    }

    /// The key that defaults to `On` when its parameter is absent. Only the
    /// coupling primary gets this treatment; every other toggle defaults to
    /// `Disabled`.
    pub fn primary_key(&self) -> Option<&str> {
        self.coupling.as_ref().map(|c| c.primary.as_str())
    }

    pub fn validate(&self) -> Result<()> {
        let mut keys: HashSet<&str> = HashSet::new();
        let mut refresh_count = 0;

        for button in &self.buttons {
            match button {
                Button::Toggle { id, .. } => {
                    let Some(key) = id.strip_suffix(BUTTON_ID_SUFFIX) else {
                        bail!("Toggle id '{}' must end with '{}'", id, BUTTON_ID_SUFFIX);
                    };
                    if key.is_empty() {
                        bail!("Toggle id '{}' has an empty key", id);
                    }
                    if !keys.insert(key) {
                        bail!("Duplicate toggle key '{}'", key);
                    }
                }
                Button::Refresh { .. } => refresh_count += 1,
            }
        }

        if refresh_count != 1 {
            bail!(
                "Panel must declare exactly one refresh control, found {}",
                refresh_count
            );
        }

        if let Some(coupling) = &self.coupling {
            if !keys.contains(coupling.primary.as_str()) {
                bail!(
                    "Coupling primary '{}' does not name a configured toggle",
                    coupling.primary
                );
            }
            if !keys.contains(coupling.dependent.as_str()) {
                bail!(
                    "Coupling dependent '{}' does not name a configured toggle",
                    coupling.dependent
                );
            }
            if coupling.primary == coupling.dependent {
                bail!("Coupling primary and dependent must be different toggles");
            }
        }

        Ok(())
    }
}

pub fn load_config() -> Result<Config> {
    tracing::info!("Using embedded panel configuration");
    let config: Config = serde_yaml::from_str(EMBEDDED_PANEL)?;
    config.panel.validate()?;
    Ok(config)
}

pub fn load_config_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    tracing::info!("Loading panel configuration from {}", path.display());
    let yaml = std::fs::read_to_string(path)?;
    let config: Config = serde_yaml::from_str(&yaml)?;
    config.panel.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_panel() {
        let yaml = r#"
panel:
  name: "Mood"
  coupling:
    primary: weather
    dependent: walking
  buttons:
    - type: toggle
      id: food-button
      label: "Food"
      glyph: food
    - type: toggle
      id: walking-button
      label: "Walking"
    - type: toggle
      id: weather-button
      label: "Weather"
      glyph: weather
    - type: refresh
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.panel.name, "Mood");
        assert_eq!(config.panel.buttons.len(), 4);
        config.panel.validate().unwrap();

        // Keys are derived from element ids, in element order
        assert_eq!(
            config.panel.toggle_keys(),
            vec!["food", "walking", "weather"]
        );
        assert_eq!(config.panel.primary_key(), Some("weather"));

        match &config.panel.buttons[0] {
            Button::Toggle { id, label, glyph } => {
                assert_eq!(id, "food-button");
                assert_eq!(label, "Food");
                assert_eq!(glyph.as_deref(), Some("food"));
            }
            _ => panic!("Expected toggle button"),
        }

        // Refresh control falls back to its default id and label
        match &config.panel.buttons[3] {
            Button::Refresh { id, label } => {
                assert_eq!(id, "refresh");
                assert_eq!(label, "Refresh");
            }
            _ => panic!("Expected refresh button"),
        }
    }

    #[test]
    fn test_embedded_panel_is_valid() {
        let config = load_config().unwrap();
        assert_eq!(
            config.panel.toggle_keys(),
            vec!["food", "parking", "walking", "weather"]
        );
        assert_eq!(
            config.panel.coupling,
            Some(Coupling {
                primary: "weather".to_string(),
                dependent: "walking".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_rejects_bad_id() {
        let yaml = r#"
panel:
  name: "Broken"
  buttons:
    - type: toggle
      id: weather
      label: "Weather"
    - type: refresh
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.panel.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_coupling_key() {
        let yaml = r#"
panel:
  name: "Broken"
  coupling:
    primary: weather
    dependent: swimming
  buttons:
    - type: toggle
      id: weather-button
      label: "Weather"
    - type: refresh
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.panel.validate().is_err());
    }

    #[test]
    fn test_validate_requires_refresh() {
        let yaml = r#"
panel:
  name: "Broken"
  buttons:
    - type: toggle
      id: weather-button
      label: "Weather"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.panel.validate().is_err());
    }
}
