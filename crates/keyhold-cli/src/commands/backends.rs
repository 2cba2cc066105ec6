//! `keyhold backends` command
//!
//! Lists every registered backend with its current viability score.

use anyhow::Result;
use keyhold_core::{score, Keyring};

pub fn execute(keyring: &Keyring) -> Result<()> {
    // Bind first so the listing can mark the active backend
    let binding = keyring.get_keyring().map(|_| keyring.binding());

    println!("Keyring backends:");
    println!();

    for status in keyring.backends() {
        let marker = if status.active { "*" } else { " " };
        let viability = if status.score > score::LAST_RESORT {
            "recommended"
        } else if score::is_viable(status.score) {
            "last resort"
        } else {
            "unsupported"
        };

        println!("{} {} - {}", marker, status.name, status.description);
        println!("    Score:  {} ({})", status.score, viability);
    }

    println!();
    match binding {
        Ok(Some(binding)) => println!("Active: {}", binding),
        Ok(None) => println!("Active: none"),
        Err(e) => println!("Active: none ({})", e),
    }
    Ok(())
}
