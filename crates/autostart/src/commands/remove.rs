use autostart_core::config::Config;

use super::backend;
use crate::EntryArgs;

/// Deletes the entry from its group and clears its flag.
pub fn execute(config: &Config, args: &EntryArgs) {
    backend::with_explorer(config, |explorer| {
        let mut entry = backend::find_entry(explorer, args.group, &args.name);
        if let Err(e) = explorer.remove(&mut entry) {
            backend::fail(&e);
        }
        println!("Removed '{}' from {}.", entry.name, entry.group);
    });
}
