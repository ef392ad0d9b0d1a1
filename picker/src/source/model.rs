use serde::{Deserialize, Serialize};

use super::errors::SourceError;
use crate::model::{FolderRecord, ItemRecord, SelectorData};

/// Column layout of the folders table.
pub const FOLDER_COLUMNS: [&str; 3] = ["id", "title", "parent_id"];
/// Column layout of the items table.
pub const ITEM_COLUMNS: [&str; 3] = ["id", "title", "folder_id"];

/// `[id, title, parent_id]` folder row.
pub type FolderRow = (i64, String, Option<i64>);
/// `[id, title, folder_id]` item row.
pub type ItemRow = (i64, String, i64);

/// Columnar table: a header followed by positional rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable<R> {
    pub columns: Vec<String>,
    pub data: Vec<R>,
}

/// Wire payload served by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResponse {
    pub folders: RawTable<FolderRow>,
    pub items: RawTable<ItemRow>,
}

impl RawResponse {
    /// Map the positional rows into folder and item records.
    pub fn into_data(self) -> Result<SelectorData, SourceError> {
        check_columns("folders", &self.folders.columns, &FOLDER_COLUMNS)?;
        check_columns("items", &self.items.columns, &ITEM_COLUMNS)?;

        let folders = self
            .folders
            .data
            .into_iter()
            .map(|(id, title, parent_id)| {
                FolderRecord::new(id, title, parent_id)
            })
            .collect();
        let items = self
            .items
            .data
            .into_iter()
            .map(|(id, title, folder_id)| ItemRecord::new(id, title, folder_id))
            .collect();

        Ok(SelectorData::new(folders, items))
    }
}

/// Decode a JSON wire payload into selector data.
pub fn parse_response(payload: &str) -> Result<SelectorData, SourceError> {
    let raw: RawResponse = serde_json::from_str(payload)?;
    raw.into_data()
}

fn check_columns(
    table: &'static str,
    found: &[String],
    expected: &[&str],
) -> Result<(), SourceError> {
    if found.iter().map(String::as_str).eq(expected.iter().copied()) {
        return Ok(());
    }

    Err(SourceError::UnexpectedColumns {
        table,
        found: found.to_vec(),
    })
}
