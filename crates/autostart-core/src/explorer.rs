//! Facade for listing, adding, toggling and removing startup entries.

use std::collections::BTreeMap;

use crate::catalog::Catalog;
use crate::entry::Entry;
use crate::group::{Group, GroupId};
use crate::source::ApprovedList;
use crate::state::StartupState;
use crate::store::{DirectoryStore, KeyStore, LauncherFactory, Stores};
use crate::{Error, Result};

/// Entries per group, in [`GroupId::ALL`] order.
pub type EntriesByGroup = BTreeMap<GroupId, Vec<Entry>>;

pub struct Explorer<'a> {
    catalog: &'a Catalog,
    stores: Stores<'a>,
}

impl<'a> Explorer<'a> {
    pub fn new(
        catalog: &'a Catalog,
        keys: &'a dyn KeyStore,
        files: &'a dyn DirectoryStore,
        launchers: &'a dyn LauncherFactory,
    ) -> Self {
        Self {
            catalog,
            stores: Stores {
                keys,
                files,
                launchers,
            },
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    /// Returns the catalog slot for `id`.
    pub fn group(&self, id: GroupId) -> &Group {
        self.catalog.get(id)
    }

    /// Lists the entries of every group.
    ///
    /// A group that cannot be read is logged and listed as empty.
    pub fn list_all(&self) -> Result<EntriesByGroup> {
        self.collect(|_| true)
    }

    /// Lists the entries of every group that will run at logon.
    pub fn list_all_enabled(&self) -> Result<EntriesByGroup> {
        self.collect(|entry| entry.state.will_run())
    }

    /// Lists one group's entries in store order.
    pub fn list_group(&self, id: GroupId) -> Result<Vec<Entry>> {
        let group = self.catalog.get(id);
        let raw = group.source.list_raw_entries(self.stores)?;
        let approved = ApprovedList::open(self.stores.keys, &group.descriptor.approved)?;

        let mut entries = Vec::with_capacity(raw.len());
        for raw in raw {
            match approved.state(&raw.name) {
                Ok(state) => entries.push(Entry::from_raw(raw, &group.descriptor, state)),
                Err(e) => log::warn!("Skipping '{}' in {id}: {e}", raw.name),
            }
        }
        log::debug!("{id}: {} entries", entries.len());
        Ok(entries)
    }

    /// Lists one group's entries that will run at logon.
    pub fn list_group_enabled(&self, id: GroupId) -> Result<Vec<Entry>> {
        let mut entries = self.list_group(id)?;
        entries.retain(|entry| entry.state.will_run());
        Ok(entries)
    }

    /// Looks up a single entry by name.
    pub fn find(&self, id: GroupId, name: &str) -> Result<Option<Entry>> {
        Ok(self
            .list_group(id)?
            .into_iter()
            .find(|entry| entry.name == name))
    }

    /// Reads the current approved-list state of `name` in group `id`.
    pub fn state(&self, id: GroupId, name: &str) -> Result<StartupState> {
        self.catalog.get(id).state(self.stores.keys, name)
    }

    /// Adds `executable_path` to `id` under `name`.
    ///
    /// Folder groups get a `<name>.lnk` launcher; key groups get a string value.
    /// Blank names are rejected, and so are launcher names that would leave
    /// the Startup folder.
    pub fn add(&self, name: &str, executable_path: &str, id: GroupId) -> Result<()> {
        let group = self.catalog.get(id);
        if !is_valid_name(name, group.descriptor.is_shortcut) {
            return Err(Error::InvalidName { name: name.into() });
        }
        group.source.add_raw_entry(self.stores, name, executable_path)
    }

    /// Writes `state` to the entry's approved list and records it on the entry.
    ///
    /// A removed entry has no flag to change and yields [`Error::NotFound`].
    pub fn set_state(&self, entry: &mut Entry, state: StartupState) -> Result<()> {
        if entry.removed {
            return Err(Error::NotFound {
                what: format!("'{}' in {}", entry.name, entry.group),
            });
        }
        self.catalog
            .get(entry.group)
            .set_state(self.stores.keys, &entry.name, state)?;
        entry.state = state;
        Ok(())
    }

    /// Enables or disables the entry.
    pub fn set_enabled(&self, entry: &mut Entry, enabled: bool) -> Result<()> {
        self.set_state(entry, StartupState::from(enabled))
    }

    /// Removes the entry from its group and its approved list.
    ///
    /// The entry's state becomes `NotFound` whenever its primary definition
    /// was deleted, even if clearing the flag then failed. From then on the
    /// entry is terminal.
    pub fn remove(&self, entry: &mut Entry) -> Result<()> {
        let removal = self.catalog.get(entry.group).remove_raw_entry(
            self.stores,
            &entry.name,
            entry.removal_identifier(),
        );
        if removal.primary_removed() {
            entry.state = StartupState::NotFound;
            entry.removed = true;
        }
        removal.into_result()
    }

    fn collect(&self, keep: impl Fn(&Entry) -> bool) -> Result<EntriesByGroup> {
        let mut all = BTreeMap::new();
        for id in GroupId::ALL {
            let mut entries = match self.list_group(id) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("Listing {id} as empty: {e}");
                    Vec::new()
                }
            };
            entries.retain(|entry| keep(entry));
            all.insert(id, entries);
        }
        Ok(all)
    }
}

/// Blank names never qualify. Launcher names must also be a single file
/// name so the launcher lands inside its folder.
fn is_valid_name(name: &str, is_launcher: bool) -> bool {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return false;
    }
    !is_launcher || !(trimmed.contains(['/', '\\']) || trimmed == "." || trimmed == "..")
}
