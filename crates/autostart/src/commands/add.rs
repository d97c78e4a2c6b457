use autostart_core::GroupId;
use autostart_core::config::Config;

use super::backend;

/// Adds `path` to `group` under `name`.
pub fn execute(config: &Config, name: &str, path: &str, group: GroupId) {
    backend::with_explorer(config, |explorer| {
        if let Err(e) = explorer.add(name, path, group) {
            backend::fail(&e);
        }
        println!("Added '{name}' to {group}.");
    });
}
