use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::model::{FolderId, ItemId};
use crate::tree::FolderTree;
use crate::tristate::{FolderStates, SelectionState, folder_selection_state};

/// Folders expanded when a session opens on a new tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitialExpansion {
    /// Every indexed folder, orphans included.
    #[default]
    All,
    /// Root folders only.
    Roots,
    /// Nothing expanded.
    Collapsed,
}

/// Selection and expansion state for one tree.
///
/// Both sets are shared copy-on-write: a [`SelectionSnapshot`] taken before
/// a mutation keeps observing the old sets. Without a tree every mutator is
/// a no-op.
#[derive(Debug, Clone, Default)]
pub struct SelectionSession {
    tree: Option<Arc<FolderTree>>,
    initial_expansion: InitialExpansion,
    selected_item_ids: Arc<BTreeSet<ItemId>>,
    expanded_folder_ids: Arc<BTreeSet<FolderId>>,
}

/// Immutable view of the session sets at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSnapshot {
    selected_item_ids: Arc<BTreeSet<ItemId>>,
    expanded_folder_ids: Arc<BTreeSet<FolderId>>,
}

impl SelectionSnapshot {
    /// Return selected item ids at snapshot time.
    pub fn selected_item_ids(&self) -> &BTreeSet<ItemId> {
        &self.selected_item_ids
    }

    /// Return expanded folder ids at snapshot time.
    pub fn expanded_folder_ids(&self) -> &BTreeSet<FolderId> {
        &self.expanded_folder_ids
    }
}

impl SelectionSession {
    /// Open a session with every folder expanded and nothing selected.
    pub fn new(tree: Option<Arc<FolderTree>>) -> Self {
        Self::with_expansion(tree, InitialExpansion::All)
    }

    /// Open a session expanding folders per `initial_expansion`.
    pub fn with_expansion(
        tree: Option<Arc<FolderTree>>,
        initial_expansion: InitialExpansion,
    ) -> Self {
        let expanded_folder_ids =
            initial_expanded_ids(tree.as_deref(), initial_expansion);

        Self {
            tree,
            initial_expansion,
            selected_item_ids: Arc::default(),
            expanded_folder_ids: Arc::new(expanded_folder_ids),
        }
    }

    /// Return the tree, `None` while nothing is loaded.
    pub fn tree(&self) -> Option<&FolderTree> {
        self.tree.as_deref()
    }

    /// Shared handle of the current tree.
    pub fn tree_handle(&self) -> Option<&Arc<FolderTree>> {
        self.tree.as_ref()
    }

    /// Return currently selected item ids, ascending.
    pub fn selected_item_ids(&self) -> &BTreeSet<ItemId> {
        &self.selected_item_ids
    }

    /// Return currently expanded folder ids.
    pub fn expanded_folder_ids(&self) -> &BTreeSet<FolderId> {
        &self.expanded_folder_ids
    }

    /// Return whether the item is selected.
    pub fn is_selected(&self, item_id: ItemId) -> bool {
        self.selected_item_ids.contains(&item_id)
    }

    /// Return whether the folder is expanded.
    pub fn is_expanded(&self, folder_id: FolderId) -> bool {
        self.expanded_folder_ids.contains(&folder_id)
    }

    /// Capture both sets without copying them.
    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            selected_item_ids: Arc::clone(&self.selected_item_ids),
            expanded_folder_ids: Arc::clone(&self.expanded_folder_ids),
        }
    }

    /// Swap in a new tree, resetting both sets when the tree changed.
    ///
    /// Passing the handle already held keeps the current state.
    pub fn replace_tree(&mut self, tree: Option<Arc<FolderTree>>) {
        let unchanged = match (&self.tree, &tree) {
            (Some(current), Some(next)) => Arc::ptr_eq(current, next),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return;
        }

        log::debug!("selection session reset for a new tree");
        *self = Self::with_expansion(tree, self.initial_expansion);
    }

    /// Flip membership of `item_id` in the selection.
    ///
    /// The id is not validated against the tree.
    pub fn toggle_item(&mut self, item_id: ItemId) {
        if self.tree.is_none() {
            return;
        }

        toggle_member(Arc::make_mut(&mut self.selected_item_ids), item_id);
    }

    /// Flip membership of `folder_id` in the expanded set.
    pub fn toggle_folder_expand(&mut self, folder_id: FolderId) {
        if self.tree.is_none() {
            return;
        }

        toggle_member(Arc::make_mut(&mut self.expanded_folder_ids), folder_id);
    }

    /// Select or deselect every descendant item of a folder.
    ///
    /// A checked folder is fully deselected; an unchecked or indeterminate
    /// folder is fully selected. Unknown folders are ignored.
    pub fn toggle_folder_row(&mut self, folder_id: FolderId) {
        let Some(tree) = self.tree.as_deref() else {
            return;
        };
        let Some(node) = tree.get(folder_id) else {
            return;
        };
        if !node.has_items() {
            return;
        }

        let state = folder_selection_state(node, &self.selected_item_ids);
        let item_ids = node.all_descendant_items().iter().map(|item| item.id);
        let selected = Arc::make_mut(&mut self.selected_item_ids);
        match state {
            SelectionState::Checked => {
                for item_id in item_ids {
                    selected.remove(&item_id);
                }
            },
            SelectionState::Unchecked | SelectionState::Indeterminate => {
                selected.extend(item_ids);
            },
        }
    }

    /// Drop every selected item, leaving expansion untouched.
    pub fn clear_selection(&mut self) {
        if self.tree.is_none() || self.selected_item_ids.is_empty() {
            return;
        }

        self.selected_item_ids = Arc::default();
    }

    /// Tri-state of one folder against the current selection.
    pub fn folder_state(&self, folder_id: FolderId) -> SelectionState {
        self.tree
            .as_deref()
            .and_then(|tree| tree.get(folder_id))
            .map(|node| folder_selection_state(node, &self.selected_item_ids))
            .unwrap_or_default()
    }

    /// Tri-state of every folder against the current selection.
    pub fn folder_states(&self) -> FolderStates {
        match self.tree.as_deref() {
            Some(tree) => FolderStates::compute(tree, &self.selected_item_ids),
            None => FolderStates::default(),
        }
    }
}

fn initial_expanded_ids(
    tree: Option<&FolderTree>,
    initial_expansion: InitialExpansion,
) -> BTreeSet<FolderId> {
    let Some(tree) = tree else {
        return BTreeSet::new();
    };

    match initial_expansion {
        InitialExpansion::All => tree.folder_ids().collect(),
        InitialExpansion::Roots => tree.roots().map(|node| node.id()).collect(),
        InitialExpansion::Collapsed => BTreeSet::new(),
    }
}

fn toggle_member<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use super::{InitialExpansion, SelectionSession};
    use crate::model::{
        FolderId, FolderRecord, ItemId, ItemRecord, SelectorData,
    };
    use crate::tree::FolderTree;
    use crate::tristate::SelectionState;

    fn sample_tree() -> Arc<FolderTree> {
        Arc::new(FolderTree::build(&SelectorData::new(
            vec![
                FolderRecord::new(1, "Audio", None),
                FolderRecord::new(4, "Speakers", Some(1)),
                FolderRecord::new(8, "Rigging", None),
                FolderRecord::new(9, "Empty", None),
                FolderRecord::new(12, "Lost", Some(404)),
            ],
            vec![
                ItemRecord::new(5, "Audio item 1", 1),
                ItemRecord::new(7, "Speaker item 1", 4),
                ItemRecord::new(4, "Speaker item 2", 4),
                ItemRecord::new(6, "Truss item 1", 8),
            ],
        )))
    }

    fn ids(values: &[i64]) -> BTreeSet<ItemId> {
        values.iter().copied().map(ItemId).collect()
    }

    #[test]
    fn given_new_tree_when_session_opens_then_all_folders_are_expanded() {
        let session = SelectionSession::new(Some(sample_tree()));

        assert!(session.selected_item_ids().is_empty());
        let expanded: Vec<i64> =
            session.expanded_folder_ids().iter().map(|id| id.0).collect();
        assert_eq!(expanded, vec![1, 4, 8, 9, 12]);
    }

    #[test]
    fn given_roots_expansion_when_session_opens_then_only_roots_expand() {
        let session = SelectionSession::with_expansion(
            Some(sample_tree()),
            InitialExpansion::Roots,
        );

        assert!(session.is_expanded(FolderId(1)));
        assert!(!session.is_expanded(FolderId(4)));
        assert!(!session.is_expanded(FolderId(12)));
    }

    #[test]
    fn given_item_when_toggled_twice_then_selection_is_restored() {
        let mut session = SelectionSession::new(Some(sample_tree()));
        session.toggle_item(ItemId(6));
        let before = session.selected_item_ids().clone();

        session.toggle_item(ItemId(5));
        assert!(session.is_selected(ItemId(5)));
        session.toggle_item(ItemId(5));

        assert_eq!(session.selected_item_ids(), &before);
    }

    #[test]
    fn given_unknown_item_id_when_toggled_then_it_is_tracked_anyway() {
        let mut session = SelectionSession::new(Some(sample_tree()));

        session.toggle_item(ItemId(999));

        assert_eq!(session.selected_item_ids(), &ids(&[999]));
        assert_eq!(session.folder_state(FolderId(1)), SelectionState::Unchecked);
    }

    #[test]
    fn given_unchecked_folder_when_row_toggled_then_descendants_are_selected() {
        let mut session = SelectionSession::new(Some(sample_tree()));
        session.toggle_item(ItemId(6));

        session.toggle_folder_row(FolderId(1));

        assert_eq!(session.selected_item_ids(), &ids(&[4, 5, 6, 7]));
        assert_eq!(session.folder_state(FolderId(1)), SelectionState::Checked);
    }

    #[test]
    fn given_indeterminate_folder_when_row_toggled_then_it_becomes_checked() {
        let mut session = SelectionSession::new(Some(sample_tree()));
        session.toggle_item(ItemId(7));
        assert_eq!(
            session.folder_state(FolderId(1)),
            SelectionState::Indeterminate
        );

        session.toggle_folder_row(FolderId(1));

        assert_eq!(session.folder_state(FolderId(1)), SelectionState::Checked);
        assert_eq!(session.selected_item_ids(), &ids(&[4, 5, 7]));
    }

    #[test]
    fn given_checked_folder_when_row_toggled_then_only_its_items_are_removed() {
        let mut session = SelectionSession::new(Some(sample_tree()));
        session.toggle_item(ItemId(6));
        session.toggle_item(ItemId(999));
        session.toggle_folder_row(FolderId(4));
        assert_eq!(session.folder_state(FolderId(4)), SelectionState::Checked);

        session.toggle_folder_row(FolderId(4));

        assert_eq!(session.selected_item_ids(), &ids(&[6, 999]));
        assert_eq!(session.folder_state(FolderId(4)), SelectionState::Unchecked);
    }

    #[test]
    fn given_repeated_row_toggles_when_state_is_unchanged_then_they_alternate()
    {
        let mut session = SelectionSession::new(Some(sample_tree()));

        session.toggle_folder_row(FolderId(8));
        assert_eq!(session.selected_item_ids(), &ids(&[6]));
        session.toggle_folder_row(FolderId(8));
        assert!(session.selected_item_ids().is_empty());
        session.toggle_folder_row(FolderId(8));
        assert_eq!(session.selected_item_ids(), &ids(&[6]));
    }

    #[test]
    fn given_unknown_or_empty_folder_when_row_toggled_then_selection_is_unchanged()
     {
        let mut session = SelectionSession::new(Some(sample_tree()));

        session.toggle_folder_row(FolderId(404));
        session.toggle_folder_row(FolderId(9));

        assert!(session.selected_item_ids().is_empty());
    }

    #[test]
    fn given_folder_when_expand_toggled_then_selection_is_untouched() {
        let mut session = SelectionSession::new(Some(sample_tree()));
        session.toggle_item(ItemId(5));

        session.toggle_folder_expand(FolderId(4));
        assert!(!session.is_expanded(FolderId(4)));
        session.toggle_folder_expand(FolderId(4));

        assert!(session.is_expanded(FolderId(4)));
        assert_eq!(session.selected_item_ids(), &ids(&[5]));
    }

    #[test]
    fn given_selection_when_cleared_then_expansion_is_kept() {
        let mut session = SelectionSession::new(Some(sample_tree()));
        session.toggle_folder_row(FolderId(1));
        session.toggle_folder_expand(FolderId(8));

        session.clear_selection();

        assert!(session.selected_item_ids().is_empty());
        assert!(!session.is_expanded(FolderId(8)));
        assert!(session.is_expanded(FolderId(1)));
    }

    #[test]
    fn given_missing_tree_when_mutated_then_every_operation_is_a_no_op() {
        let mut session = SelectionSession::new(None);

        session.toggle_item(ItemId(1));
        session.toggle_folder_expand(FolderId(1));
        session.toggle_folder_row(FolderId(1));
        session.clear_selection();

        assert!(session.selected_item_ids().is_empty());
        assert!(session.expanded_folder_ids().is_empty());
        assert!(session.folder_states().is_empty());
        assert_eq!(session.folder_state(FolderId(1)), SelectionState::Unchecked);
    }

    #[test]
    fn given_snapshot_when_session_mutates_then_snapshot_keeps_old_sets() {
        let mut session = SelectionSession::new(Some(sample_tree()));
        session.toggle_item(ItemId(5));
        let snapshot = session.snapshot();

        session.toggle_item(ItemId(6));
        session.toggle_folder_expand(FolderId(1));

        assert_eq!(snapshot.selected_item_ids(), &ids(&[5]));
        assert!(snapshot.expanded_folder_ids().contains(&FolderId(1)));
        assert_eq!(session.selected_item_ids(), &ids(&[5, 6]));
    }

    #[test]
    fn given_new_tree_handle_when_replaced_then_state_resets() {
        let tree = sample_tree();
        let mut session = SelectionSession::new(Some(Arc::clone(&tree)));
        session.toggle_item(ItemId(5));
        session.toggle_folder_expand(FolderId(1));

        session.replace_tree(Some(Arc::clone(&tree)));
        assert_eq!(session.selected_item_ids(), &ids(&[5]));
        session.replace_tree(session.tree_handle().cloned());
        assert_eq!(session.selected_item_ids(), &ids(&[5]));
        assert!(!session.is_expanded(FolderId(1)));

        session.replace_tree(Some(sample_tree()));
        assert!(session.selected_item_ids().is_empty());
        assert!(session.is_expanded(FolderId(1)));
    }
}
