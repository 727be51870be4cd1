//! CSV export of the user start history.

use std::collections::{BTreeSet, HashMap};

use crate::error::{AppError, AppResult};
use crate::storage::HistoryEntry;

const BASE_COLUMNS: [&str; 6] = ["user_id", "first_name", "last_name", "language", "username", "start_time"];

/// Renders the history as CSV: the base columns, then one `1`/`0` column per
/// category label held by any listed user, labels sorted.
pub fn history_csv(entries: &[HistoryEntry], labels_by_user: &HashMap<String, Vec<String>>) -> AppResult<Vec<u8>> {
    let labels: BTreeSet<&str> = entries
        .iter()
        .filter_map(|e| labels_by_user.get(&e.user_id))
        .flatten()
        .map(String::as_str)
        .collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(BASE_COLUMNS.iter().copied().chain(labels.iter().copied()))?;

    for entry in entries {
        let held = labels_by_user.get(&entry.user_id);
        let start_time = entry.start_time.to_rfc3339();
        let mut record = vec![
            entry.user_id.as_str(),
            entry.first_name.as_str(),
            entry.last_name.as_str(),
            entry.language.as_deref().unwrap_or(""),
            entry.username.as_str(),
            start_time.as_str(),
        ];
        record.extend(labels.iter().map(|label| {
            if held.is_some_and(|h| h.iter().any(|l| l.as_str() == *label)) {
                "1"
            } else {
                "0"
            }
        }));
        writer.write_record(&record)?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Io(std::io::Error::other(e.to_string())))
}
