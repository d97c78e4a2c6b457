mod commands;

use clap::{Args, Parser, Subcommand};

use autostart_core::{GroupId, StartupState};

#[derive(Parser)]
#[command(
    name = "autostart",
    version,
    about = "Inspect and manage programs that run at Windows logon"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init,
    /// Show the startup groups and where they live
    Groups,
    /// List startup entries
    List(commands::list::ListArgs),
    /// Add a program to a startup group
    Add {
        /// Entry name (value name, or launcher file name without .lnk)
        name: String,
        /// Command to run: executable path, optionally quoted, plus arguments
        path: String,
        /// Target group
        #[arg(long, short)]
        group: GroupId,
    },
    /// Let an entry run at logon
    Enable(EntryArgs),
    /// Keep an entry from running at logon without removing it
    Disable(EntryArgs),
    /// Clear an entry's enabled/disabled flag
    Reset(EntryArgs),
    /// Delete an entry and its flag
    Remove(EntryArgs),
}

/// Identifies one entry.
#[derive(Args)]
pub struct EntryArgs {
    /// Group the entry belongs to (e.g. hkcu, start-menu-user)
    pub group: GroupId,
    /// Entry name as shown by `autostart list`
    pub name: String,
}

fn main() {
    let cli = Cli::parse();

    let config = autostart_core::config::load();
    autostart_core::log::init(&config.logging);

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Groups => commands::groups::execute(&config),
        Commands::List(args) => commands::list::execute(&config, &args),
        Commands::Add { name, path, group } => {
            commands::add::execute(&config, &name, &path, group);
        }
        Commands::Enable(entry) => {
            commands::state::execute(&config, &entry, StartupState::Enabled);
        }
        Commands::Disable(entry) => {
            commands::state::execute(&config, &entry, StartupState::Disabled);
        }
        Commands::Reset(entry) => {
            commands::state::execute(&config, &entry, StartupState::NotFound);
        }
        Commands::Remove(entry) => commands::remove::execute(&config, &entry),
    }
}
