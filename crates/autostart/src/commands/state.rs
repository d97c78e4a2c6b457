use autostart_core::StartupState;
use autostart_core::config::Config;

use super::backend;
use crate::EntryArgs;

/// Writes `state` to the entry's approved list.
///
/// `NotFound` clears the flag, which Windows treats the same as enabled.
pub fn execute(config: &Config, args: &EntryArgs, state: StartupState) {
    backend::with_explorer(config, |explorer| {
        let mut entry = backend::find_entry(explorer, args.group, &args.name);
        if let Err(e) = explorer.set_state(&mut entry, state) {
            backend::fail(&e);
        }
        match state {
            StartupState::NotFound => {
                println!("Cleared the flag for '{}' in {}.", entry.name, entry.group);
            }
            _ => println!("'{}' in {} is now {state}.", entry.name, entry.group),
        }
    });
}
