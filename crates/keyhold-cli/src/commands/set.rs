//! `keyhold set` command

use std::io::{self, BufRead, IsTerminal};

use anyhow::{Context, Result};
use keyhold_core::Keyring;

use crate::cli::SetArgs;

pub fn execute(keyring: &Keyring, args: SetArgs) -> Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => read_password(&args.service, &args.username)?,
    };

    keyring.set_password(&args.service, &args.username, &password)?;
    eprintln!("Stored password for {} / {}", args.service, args.username);
    Ok(())
}

fn read_password(service: &str, username: &str) -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        let prompt = format!("Password for '{}' in '{}': ", username, service);
        return rpassword::prompt_password(prompt).context("failed to read password from terminal");
    }

    let mut line = String::new();
    stdin.lock().read_line(&mut line).context("failed to read password from stdin")?;
    Ok(strip_line_ending(&line).to_string())
}

fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
        .unwrap_or(line)
}
