use std::collections::{BTreeMap, HashMap};

use crate::error::MigrationError;
use crate::model::wekan::List;
use crate::model::work_package::Status;

/// Status links resolved once at startup, keyed both by OpenProject name and
/// by Wekan list id.
#[derive(Debug)]
pub struct StatusTable {
    by_name: HashMap<String, String>,
    by_list: HashMap<String, String>,
}

impl StatusTable {
    /// Every list on the board must map to a status that exists remotely.
    pub fn resolve(
        remote: Vec<Status>,
        lists: &[List],
        title_to_status: &BTreeMap<String, String>,
    ) -> Result<Self, MigrationError> {
        let by_name: HashMap<String, String> =
            remote.into_iter().map(|s| (s.name, s.href)).collect();

        let mut by_list = HashMap::new();
        for list in lists {
            let name = title_to_status
                .get(&list.title)
                .ok_or_else(|| MigrationError::UnmappedList {
                    title: list.title.clone(),
                })?;
            let href = by_name
                .get(name)
                .ok_or_else(|| MigrationError::UnknownStatus { name: name.clone() })?;
            by_list.insert(list.id.clone(), href.clone());
        }

        Ok(Self { by_name, by_list })
    }

    pub fn named(&self, name: &str) -> Result<&str, MigrationError> {
        self.by_name
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| MigrationError::UnknownStatus {
                name: name.to_string(),
            })
    }

    pub fn for_list(&self, list_id: &str) -> Option<&str> {
        self.by_list.get(list_id).map(String::as_str)
    }
}
