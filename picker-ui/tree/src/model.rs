use picker::{
    FolderId, FolderNode, FolderTree, ItemId, ItemRecord, SelectionSession,
    SelectionState,
};

/// Visible folder row.
#[derive(Debug, Clone, Copy)]
pub struct FolderRow<'a> {
    /// Zero-based tree depth (`0` for root folders).
    pub depth: usize,
    pub node: &'a FolderNode,
    pub state: SelectionState,
    pub expanded: bool,
    /// `false` when the folder has no descendant items to select.
    pub enabled: bool,
}

/// Visible item row.
#[derive(Debug, Clone, Copy)]
pub struct ItemRow<'a> {
    pub depth: usize,
    pub item: &'a ItemRecord,
    pub selected: bool,
}

/// One row of the flattened, currently visible tree.
#[derive(Debug, Clone, Copy)]
pub enum TreeRow<'a> {
    Folder(FolderRow<'a>),
    Item(ItemRow<'a>),
}

impl TreeRow<'_> {
    /// Return zero-based tree depth.
    pub fn depth(&self) -> usize {
        match self {
            TreeRow::Folder(row) => row.depth,
            TreeRow::Item(row) => row.depth,
        }
    }

    /// Return the folder or item title.
    pub fn title(&self) -> &str {
        match self {
            TreeRow::Folder(row) => row.node.title(),
            TreeRow::Item(row) => &row.item.title,
        }
    }

    /// Return whether the row is a folder row.
    pub fn is_folder(&self) -> bool {
        matches!(self, TreeRow::Folder(_))
    }

    /// Action bound to a press on the row body.
    pub fn press_action(&self) -> RowAction {
        match self {
            TreeRow::Folder(row) => RowAction::ToggleFolderRow(row.node.id()),
            TreeRow::Item(row) => RowAction::ToggleItem(row.item.id),
        }
    }

    /// Action bound to the expander, folders only.
    pub fn toggle_action(&self) -> Option<RowAction> {
        match self {
            TreeRow::Folder(row) => {
                Some(RowAction::ToggleFolderExpand(row.node.id()))
            },
            TreeRow::Item(_) => None,
        }
    }
}

/// User intent forwarded to a [`SelectionSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    ToggleItem(ItemId),
    ToggleFolderRow(FolderId),
    ToggleFolderExpand(FolderId),
    ClearSelection,
}

impl RowAction {
    /// Forward the action to `session`.
    pub fn apply(self, session: &mut SelectionSession) {
        match self {
            RowAction::ToggleItem(id) => session.toggle_item(id),
            RowAction::ToggleFolderRow(id) => session.toggle_folder_row(id),
            RowAction::ToggleFolderExpand(id) => {
                session.toggle_folder_expand(id)
            },
            RowAction::ClearSelection => session.clear_selection(),
        }
    }
}

/// Flatten the session tree into a depth-first list of visible rows.
///
/// A folder row is followed, when expanded, by its child folders and then
/// its own items, one level deeper. Folder states are derived once per
/// call, so call again after every mutation.
pub fn flatten_tree(session: &SelectionSession) -> Vec<TreeRow<'_>> {
    let Some(tree) = session.tree() else {
        return Vec::new();
    };

    let states = session.folder_states();
    let mut rows = Vec::new();
    let mut pending: Vec<Pending<'_>> =
        tree.roots().map(|root| Pending::Folder(root, 0)).collect();
    pending.reverse();

    while let Some(next) = pending.pop() {
        match next {
            Pending::Folder(node, depth) => {
                let expanded = session.is_expanded(node.id());
                rows.push(TreeRow::Folder(FolderRow {
                    depth,
                    node,
                    state: states.get(node.id()),
                    expanded,
                    enabled: node.has_items(),
                }));

                if expanded {
                    pending.push(Pending::Items(node, depth + 1));
                    push_children(tree, node, depth + 1, &mut pending);
                }
            },
            Pending::Items(node, depth) => {
                rows.extend(node.items().iter().map(|item| {
                    TreeRow::Item(ItemRow {
                        depth,
                        item,
                        selected: session.is_selected(item.id),
                    })
                }));
            },
        }
    }

    log::trace!("flattened {} visible rows", rows.len());
    rows
}

/// Work left for [`flatten_tree`], popped in row order.
enum Pending<'a> {
    Folder(&'a FolderNode, usize),
    Items(&'a FolderNode, usize),
}

fn push_children<'a>(
    tree: &'a FolderTree,
    node: &'a FolderNode,
    depth: usize,
    pending: &mut Vec<Pending<'a>>,
) {
    let first = pending.len();
    pending.extend(
        tree.children(node).map(|child| Pending::Folder(child, depth)),
    );
    pending[first..].reverse();
}
