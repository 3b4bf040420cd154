use anyhow::Result;
use mood_panel::config::{load_config, load_config_from};
use mood_panel::panel::PanelController;
use std::io::{self, BufRead};
use tracing::info;
use url::Url;

const DEFAULT_URL: &str = "http://localhost:3000/";

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    info!("Starting mood panel");

    let config = match std::env::var("MOOD_PANEL_CONFIG") {
        Ok(path) => load_config_from(path)?,
        Err(_) => load_config()?,
    };

    info!("Panel: {}", config.panel.name);
    info!("Number of buttons: {}", config.panel.buttons.len());

    let start_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_URL.to_string());
    let url = Url::parse(&start_url)?;

    let controller = PanelController::new(config.panel);
    controller.init_from_url(&url);

    println!("{}", controller.render());
    println!("Commands: click <key> | show | refresh | quit");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let mut parts = line.split_whitespace();

        match parts.next() {
            Some("click") => match parts.next() {
                Some(key) => match controller.click(key) {
                    Some(outcome) => {
                        if let Some((forced_key, forced_state)) = &outcome.forced {
                            println!(
                                "{}: {:?} -> {:?} (forced {} to {:?})",
                                outcome.key, outcome.previous, outcome.new_state,
                                forced_key, forced_state
                            );
                        } else {
                            println!(
                                "{}: {:?} -> {:?}",
                                outcome.key, outcome.previous, outcome.new_state
                            );
                        }
                        println!("{}", controller.render());
                    }
                    None => println!("Unknown toggle '{}'", key),
                },
                None => println!("Usage: click <key>"),
            },
            Some("show") => println!("{}", controller.render()),
            Some("refresh") => {
                let next = controller.refresh_url(&url);
                info!("Navigating to {}", next);
                println!("{}", next);
                // Navigation ends the page's lifetime
                break;
            }
            Some("quit") | Some("exit") => break,
            Some(other) => println!("Unknown command '{}'", other),
            None => {}
        }
    }

    Ok(())
}
