use clap::Args;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};

use autostart_core::config::Config;
use autostart_core::{EntriesByGroup, Explorer, GroupId, Result};

use super::backend;

#[derive(Args)]
pub struct ListArgs {
    /// Only list this group
    #[arg(long, short)]
    pub group: Option<GroupId>,
    /// Hide entries that are disabled
    #[arg(long)]
    pub enabled: bool,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn execute(config: &Config, args: &ListArgs) {
    backend::with_explorer(config, |explorer| {
        let entries = match collect(explorer, args) {
            Ok(entries) => entries,
            Err(e) => backend::fail(&e),
        };

        if args.json {
            match serde_json::to_string_pretty(&entries) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("Error: could not serialize entries: {e}");
                    std::process::exit(1);
                }
            }
            return;
        }

        let count: usize = entries.values().map(Vec::len).sum();
        println!("{}", table(&entries));
        println!("\n{count} entries found");
    });
}

fn collect(explorer: &Explorer<'_>, args: &ListArgs) -> Result<EntriesByGroup> {
    match (args.group, args.enabled) {
        (Some(id), false) => Ok(EntriesByGroup::from([(id, explorer.list_group(id)?)])),
        (Some(id), true) => Ok(EntriesByGroup::from([(id, explorer.list_group_enabled(id)?)])),
        (None, false) => explorer.list_all(),
        (None, true) => explorer.list_all_enabled(),
    }
}

fn table(entries: &EntriesByGroup) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Group"),
            Cell::new("Name"),
            Cell::new("State"),
            Cell::new("Path"),
            Cell::new("Arguments"),
        ]);

    for entry in entries.values().flatten() {
        let path = if entry.malformed {
            format!("{} (malformed)", entry.executable_path)
        } else {
            entry.executable_path.clone()
        };
        table.add_row(vec![
            Cell::new(entry.group),
            Cell::new(&entry.name),
            Cell::new(entry.state),
            Cell::new(path),
            Cell::new(&entry.arguments),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use autostart_core::source::RawEntry;
    use autostart_core::{Catalog, Entry, StartupFolders, StartupState};

    fn entry(name: &str, state: StartupState, raw_command: &str) -> Entry {
        let catalog = Catalog::new(StartupFolders {
            user: r"C:\Users\ana\Startup".into(),
            common: r"C:\ProgramData\Startup".into(),
        });
        let raw = RawEntry {
            name: name.into(),
            raw_command: raw_command.into(),
            origin_path: catalog.get(GroupId::Hkcu).location(),
        };
        Entry::from_raw(raw, &catalog.get(GroupId::Hkcu).descriptor, state)
    }

    #[test]
    fn table_shows_state_and_arguments() {
        // Arrange
        let entries = EntriesByGroup::from([(
            GroupId::Hkcu,
            vec![entry("Tool", StartupState::Disabled, r"C:\Tools\tool.exe --quiet")],
        )]);

        // Act
        let rendered = table(&entries).to_string();

        // Assert
        assert!(rendered.contains("Tool"));
        assert!(rendered.contains("disabled"));
        assert!(rendered.contains("--quiet"));
    }

    #[test]
    fn malformed_entries_are_marked() {
        let entries = EntriesByGroup::from([(
            GroupId::Hkcu,
            vec![entry("Broken", StartupState::NotFound, r#""C:\Tools\tool.exe --quiet"#)],
        )]);

        let rendered = table(&entries).to_string();

        assert!(rendered.contains("(malformed)"));
    }

    #[test]
    fn json_keys_groups_by_name() {
        let entries = EntriesByGroup::from([(
            GroupId::Hkcu,
            vec![entry("Tool", StartupState::Enabled, r"C:\Tools\tool.exe --quiet")],
        )]);

        let json = serde_json::to_value(&entries).unwrap();

        assert_eq!(json["hkcu"][0]["name"], "Tool");
        assert_eq!(json["hkcu"][0]["state"], "enabled");
    }
}
