use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};

use autostart_core::Catalog;
use autostart_core::config::Config;

use super::backend;

pub fn execute(config: &Config) {
    backend::with_explorer(config, |explorer| {
        println!("{}", table(explorer.catalog()));
        if backend::is_elevated() {
            println!("\nRunning elevated: every group can be changed.");
        } else {
            println!("\nNot elevated: groups marked Admin are read-only.");
        }
    });
}

fn table(catalog: &Catalog) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Group"),
            Cell::new("Location"),
            Cell::new("Approved list"),
            Cell::new("Admin"),
        ]);

    for group in catalog.iter() {
        table.add_row(vec![
            Cell::new(group.id()),
            Cell::new(group.location()),
            Cell::new(&group.descriptor.approved),
            Cell::new(if group.descriptor.requires_elevated_privileges {
                "yes"
            } else {
                "no"
            }),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use autostart_core::StartupFolders;

    #[test]
    fn every_group_gets_a_row() {
        // Arrange
        let catalog = Catalog::new(StartupFolders {
            user: r"C:\Users\ana\Startup".into(),
            common: r"C:\ProgramData\Startup".into(),
        });

        // Act
        let rendered = table(&catalog).to_string();

        // Assert
        for id in autostart_core::GroupId::ALL {
            assert!(rendered.contains(id.as_str()), "missing {id}");
        }
        assert!(rendered.contains("StartupFolder"));
    }
}
