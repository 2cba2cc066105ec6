//! `keyhold del` command

use anyhow::{bail, Result};
use keyhold_core::Keyring;

use crate::cli::EntryArgs;

pub fn execute(keyring: &Keyring, args: EntryArgs) -> Result<()> {
    match keyring.delete_password(&args.service, &args.username) {
        Ok(()) => {
            eprintln!("Deleted password for {} / {}", args.service, args.username);
            Ok(())
        }
        Err(e) if e.is_no_entry() => {
            bail!("no password stored for {} / {}", args.service, args.username)
        }
        Err(e) => Err(e.into()),
    }
}
