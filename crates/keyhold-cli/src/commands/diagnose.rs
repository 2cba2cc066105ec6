//! `keyhold diagnose` command

use anyhow::Result;
use keyhold_core::logging::log_file_path;
use keyhold_core::Keyring;

pub fn execute(keyring: &Keyring) -> Result<()> {
    let loader = keyring.config_loader();

    println!("Config search path:");
    for candidate in loader.candidates() {
        let found = if candidate.is_file() { "found" } else { "missing" };
        println!("  {} ({})", candidate.display(), found);
    }

    println!();
    match keyring.load_config() {
        Ok(Some(config)) => {
            println!("Config source:   {}", config.source);
            println!(
                "default-keyring: {}",
                config.default_keyring.as_deref().unwrap_or("(not set)")
            );
            println!(
                "keyring-path:    {}",
                config
                    .keyring_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
        }
        Ok(None) => println!("Config:          (none)"),
        Err(e) => println!("Config error:    {}", e),
    }

    println!();
    match keyring.get_keyring() {
        Ok(_) => {
            if let Some(binding) = keyring.binding() {
                println!("Active backend:  {}", binding);
            }
        }
        Err(e) => println!("Active backend:  none ({})", e),
    }
    println!("Debug log:       {}", log_file_path().display());
    Ok(())
}
