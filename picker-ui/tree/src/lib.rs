//! Visible-row helpers and a plain-text view for picker trees.
//!
//! This crate is split into two layers:
//! - model helpers ([`TreeRow`], [`RowAction`], [`flatten_tree`]) that turn a
//!   [`SelectionSession`](picker::SelectionSession) into rows;
//! - view helpers ([`TreeView`], [`checkbox`], [`footer_line`]) that render
//!   those rows as text.
//!
//! The recommended flow for an interactive picker:
//! 1. keep the session in your app state;
//! 2. call [`flatten_tree`] or [`TreeView::lines`] after every change;
//! 3. map user input to a [`RowAction`] via [`TreeRow::press_action`] or
//!    [`TreeRow::toggle_action`] and apply it to the session.
//!
//! See `examples/render_tree.rs` for a complete runnable example.
//!
//! # Quick Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use picker::{
//!     FolderRecord, FolderTree, ItemRecord, SelectionSession, SelectorData,
//! };
//! use picker_ui_tree::{TreeView, flatten_tree};
//!
//! let data = SelectorData::new(
//!     vec![FolderRecord::new(1, "Audio", None)],
//!     vec![ItemRecord::new(5, "Audio item 1", 1)],
//! );
//! let mut session =
//!     SelectionSession::new(Some(Arc::new(FolderTree::build(&data))));
//!
//! let press = flatten_tree(&session)[0].press_action();
//! press.apply(&mut session);
//!
//! assert_eq!(
//!     TreeView::new(&session).view(),
//!     "v [x] Audio\n    [x] Audio item 1\nSelected item IDs: 5"
//! );
//! ```

mod model;
mod view;

pub use model::{FolderRow, ItemRow, RowAction, TreeRow, flatten_tree};
pub use view::{TreeView, checkbox, footer_line, format_selected_ids};
