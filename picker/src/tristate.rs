use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::model::{FolderId, ItemId};
use crate::tree::{FolderNode, FolderTree};

/// Checkbox state of a folder relative to its descendant items.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SelectionState {
    #[default]
    Unchecked,
    Checked,
    Indeterminate,
}

impl SelectionState {
    fn from_counts(selected: usize, total: usize) -> Self {
        if total == 0 || selected == 0 {
            SelectionState::Unchecked
        } else if selected == total {
            SelectionState::Checked
        } else {
            SelectionState::Indeterminate
        }
    }

    /// Return whether every descendant item is selected.
    pub fn is_checked(self) -> bool {
        matches!(self, SelectionState::Checked)
    }

    /// Return whether only some descendant items are selected.
    pub fn is_indeterminate(self) -> bool {
        matches!(self, SelectionState::Indeterminate)
    }
}

/// Derive a folder's tri-state from the current item selection.
///
/// Only ids present in the folder's descendant items are consulted, so
/// selected ids that belong elsewhere (or nowhere) have no effect. A folder
/// without descendant items is always unchecked.
pub fn folder_selection_state(
    node: &FolderNode,
    selected_item_ids: &BTreeSet<ItemId>,
) -> SelectionState {
    let items = node.all_descendant_items();
    let selected = items
        .iter()
        .filter(|item| selected_item_ids.contains(&item.id))
        .count();

    SelectionState::from_counts(selected, items.len())
}

/// Tri-state of every folder in a tree for one selection snapshot.
///
/// Each folder is evaluated once; callers recompute after every selection
/// change they want reflected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderStates {
    states: HashMap<FolderId, SelectionState>,
}

impl FolderStates {
    /// Evaluate every folder of `tree` against `selected_item_ids`.
    pub fn compute(
        tree: &FolderTree,
        selected_item_ids: &BTreeSet<ItemId>,
    ) -> Self {
        let states = tree
            .nodes()
            .map(|node| {
                (node.id(), folder_selection_state(node, selected_item_ids))
            })
            .collect();

        Self { states }
    }

    /// State of `id`, unchecked for folders not in the tree.
    pub fn get(&self, id: FolderId) -> SelectionState {
        self.states.get(&id).copied().unwrap_or_default()
    }

    /// Return the number of folders with a computed state.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
