//! Folder/item tree construction and tri-state selection for item pickers.
//!
//! The crate is split into layers that build on each other:
//! - records ([`FolderRecord`], [`ItemRecord`]) and the tree built from them
//!   ([`FolderTree`], [`FolderNode`]);
//! - the pure tri-state derivation ([`folder_selection_state`],
//!   [`FolderStates`]);
//! - the per-tree [`SelectionSession`] holding selected items and expanded
//!   folders;
//! - data sources decoding the columnar wire payload ([`DataSource`]) and the
//!   [`ItemSelector`] loader tying a fetch to a session.
//!
//! # Quick Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use picker::{
//!     FolderId, FolderRecord, FolderTree, ItemId, ItemRecord,
//!     SelectionSession, SelectionState, SelectorData,
//! };
//!
//! let data = SelectorData::new(
//!     vec![
//!         FolderRecord::new(1, "Root", None),
//!         FolderRecord::new(2, "Child", Some(1)),
//!     ],
//!     vec![ItemRecord::new(1, "I1", 1), ItemRecord::new(2, "I2", 2)],
//! );
//! let tree = Arc::new(FolderTree::build(&data));
//! let mut session = SelectionSession::new(Some(tree));
//!
//! session.toggle_item(ItemId(1));
//! assert_eq!(
//!     session.folder_state(FolderId(1)),
//!     SelectionState::Indeterminate
//! );
//!
//! session.toggle_folder_row(FolderId(1));
//! assert_eq!(session.folder_state(FolderId(1)), SelectionState::Checked);
//! ```

mod collation;
mod config;
mod loader;
mod model;
mod selection;
mod source;
mod tree;
mod tristate;

pub use collation::TitleOrder;
pub use config::{ConfigError, PickerConfig};
pub use loader::{ItemSelector, LoadState};
pub use model::{FolderId, FolderRecord, ItemId, ItemRecord, SelectorData};
pub use selection::{InitialExpansion, SelectionSession, SelectionSnapshot};
pub use source::{
    DataSource, FOLDER_COLUMNS, FileSource, FolderRow, ITEM_COLUMNS, ItemRow,
    LOAD_FAILED_MESSAGE, RawResponse, RawTable, SourceError, StaticSource,
    parse_response,
};
pub use tree::{FolderNode, FolderTree};
pub use tristate::{FolderStates, SelectionState, folder_selection_state};
