use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a folder record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct FolderId(pub i64);

/// Identifier of an item record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Flat folder record as delivered by the data source.
///
/// `parent_id == None` marks a root folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderRecord {
    pub id: FolderId,
    pub title: String,
    pub parent_id: Option<FolderId>,
}

impl FolderRecord {
    /// Create a folder record; `None` marks a root.
    pub fn new(
        id: i64,
        title: impl Into<String>,
        parent_id: Option<i64>,
    ) -> Self {
        Self {
            id: FolderId(id),
            title: title.into(),
            parent_id: parent_id.map(FolderId),
        }
    }
}

/// Flat item record; every item belongs to exactly one folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub id: ItemId,
    pub title: String,
    pub folder_id: FolderId,
}

impl ItemRecord {
    /// Create an item record stored in `folder_id`.
    pub fn new(id: i64, title: impl Into<String>, folder_id: i64) -> Self {
        Self {
            id: ItemId(id),
            title: title.into(),
            folder_id: FolderId(folder_id),
        }
    }
}

/// Complete record set consumed by the tree builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorData {
    pub folders: Vec<FolderRecord>,
    pub items: Vec<ItemRecord>,
}

impl SelectorData {
    /// Bundle folder and item records.
    pub fn new(folders: Vec<FolderRecord>, items: Vec<ItemRecord>) -> Self {
        Self { folders, items }
    }

    /// Return whether the dataset has neither folders nor items.
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.items.is_empty()
    }
}
