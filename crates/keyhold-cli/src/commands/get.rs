//! `keyhold get` command

use anyhow::{bail, Result};
use keyhold_core::Keyring;

use crate::cli::EntryArgs;

pub fn execute(keyring: &Keyring, args: EntryArgs) -> Result<()> {
    match keyring.get_password(&args.service, &args.username)? {
        Some(password) => {
            println!("{}", password);
            Ok(())
        }
        None => bail!("no password stored for {} / {}", args.service, args.username),
    }
}
