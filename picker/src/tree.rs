use std::cmp::Ordering;
use std::collections::HashMap;

use crate::collation::TitleOrder;
use crate::model::{FolderId, FolderRecord, ItemRecord, SelectorData};

/// Folder with its sorted direct children and memoized descendant items.
///
/// Nodes are owned by a [`FolderTree`]; child folders are resolved through
/// [`FolderTree::children`].
#[derive(Debug, Clone)]
pub struct FolderNode {
    folder: FolderRecord,
    children: Vec<usize>,
    items: Vec<ItemRecord>,
    all_descendant_items: Vec<ItemRecord>,
}

impl FolderNode {
    fn new(folder: FolderRecord) -> Self {
        Self {
            folder,
            children: Vec::new(),
            items: Vec::new(),
            all_descendant_items: Vec::new(),
        }
    }

    /// Return folder id.
    pub fn id(&self) -> FolderId {
        self.folder.id
    }

    /// Return display title.
    pub fn title(&self) -> &str {
        &self.folder.title
    }

    /// Items stored directly in this folder, sorted by title.
    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    /// Own items followed by every nested folder's items, in tree order.
    pub fn all_descendant_items(&self) -> &[ItemRecord] {
        &self.all_descendant_items
    }

    /// Whether any item lives in this folder or below it.
    pub fn has_items(&self) -> bool {
        !self.all_descendant_items.is_empty()
    }
}

/// Immutable folder hierarchy built from flat records.
///
/// `roots` holds folders without a parent. The id index also covers
/// orphans, i.e. folders whose parent id does not resolve.
#[derive(Debug, Clone, Default)]
pub struct FolderTree {
    nodes: Vec<FolderNode>,
    roots: Vec<usize>,
    by_id: HashMap<FolderId, usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Pending,
    Active,
    Done,
}

impl FolderTree {
    /// Build a tree using the default title collation.
    pub fn build(data: &SelectorData) -> Self {
        Self::build_with(data, TitleOrder::default())
    }

    /// Build a tree ordering titles with `order`.
    ///
    /// Construction never fails: items pointing at unknown folders are
    /// dropped, folders pointing at unknown parents become orphans and a
    /// duplicate folder id replaces the earlier record in place.
    pub fn build_with(data: &SelectorData, order: TitleOrder) -> Self {
        let mut nodes: Vec<FolderNode> =
            Vec::with_capacity(data.folders.len());
        let mut by_id = HashMap::with_capacity(data.folders.len());

        for folder in &data.folders {
            match by_id.get(&folder.id) {
                Some(&slot) => {
                    log::warn!(
                        "duplicate folder id {}: keeping the later record",
                        folder.id
                    );
                    nodes[slot] = FolderNode::new(folder.clone());
                },
                None => {
                    by_id.insert(folder.id, nodes.len());
                    nodes.push(FolderNode::new(folder.clone()));
                },
            }
        }

        let mut dropped_items = 0usize;
        for item in &data.items {
            match by_id.get(&item.folder_id) {
                Some(&slot) => nodes[slot].items.push(item.clone()),
                None => dropped_items += 1,
            }
        }

        let mut roots = Vec::new();
        let mut orphans = 0usize;
        for slot in 0..nodes.len() {
            match nodes[slot].folder.parent_id {
                None => roots.push(slot),
                Some(parent_id) => match by_id.get(&parent_id) {
                    Some(&parent) => nodes[parent].children.push(slot),
                    None => orphans += 1,
                },
            }
        }

        sort_nodes(&mut nodes, &mut roots, order);

        let mut visits = vec![Visit::Pending; nodes.len()];
        let start_order: Vec<usize> =
            roots.iter().copied().chain(0..nodes.len()).collect();
        for slot in start_order {
            if visits[slot] == Visit::Pending {
                collect_descendants(&mut nodes, &mut visits, slot);
            }
        }

        log::debug!(
            "folder tree built: folders={} roots={} dropped_items={dropped_items} orphans={orphans}",
            nodes.len(),
            roots.len()
        );

        Self {
            nodes,
            roots,
            by_id,
        }
    }

    /// Root folders sorted by title.
    pub fn roots(&self) -> impl ExactSizeIterator<Item = &FolderNode> + '_ {
        self.roots.iter().map(|slot| &self.nodes[*slot])
    }

    /// Sorted child folders of `node`.
    pub fn children<'a>(
        &'a self,
        node: &'a FolderNode,
    ) -> impl Iterator<Item = &'a FolderNode> + 'a {
        node.children.iter().filter_map(|slot| self.nodes.get(*slot))
    }

    /// Look up any folder by id, orphans included.
    pub fn get(&self, id: FolderId) -> Option<&FolderNode> {
        self.by_id.get(&id).map(|slot| &self.nodes[*slot])
    }

    /// Return whether the id is indexed, orphans included.
    pub fn contains(&self, id: FolderId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Number of distinct folders, orphans included.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Return whether the tree has no folders.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Every folder id in input order.
    pub fn folder_ids(&self) -> impl Iterator<Item = FolderId> + '_ {
        self.nodes.iter().map(FolderNode::id)
    }

    /// Every folder node in input order, orphans included.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &FolderNode> + '_ {
        self.nodes.iter()
    }

    /// Whether the folder declares a parent that does not exist.
    pub fn is_orphan(&self, id: FolderId) -> bool {
        self.get(id)
            .and_then(|node| node.folder.parent_id)
            .is_some_and(|parent_id| !self.by_id.contains_key(&parent_id))
    }

    /// Number of folders reachable from the roots.
    pub fn reachable_count(&self) -> usize {
        let mut pending: Vec<&FolderNode> = self.roots().collect();
        let mut count = 0;
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(self.children(node));
        }

        count
    }
}

fn sort_nodes(
    nodes: &mut [FolderNode],
    roots: &mut [usize],
    order: TitleOrder,
) {
    let shared: &[FolderNode] = nodes;
    roots.sort_by(|left, right| compare_slots(shared, order, *left, *right));

    for slot in 0..nodes.len() {
        let mut children = std::mem::take(&mut nodes[slot].children);
        let shared: &[FolderNode] = nodes;
        children
            .sort_by(|left, right| compare_slots(shared, order, *left, *right));

        let node = &mut nodes[slot];
        node.children = children;
        node.items
            .sort_by(|left, right| order.compare(&left.title, &right.title));
    }
}

fn compare_slots(
    nodes: &[FolderNode],
    order: TitleOrder,
    left: usize,
    right: usize,
) -> Ordering {
    order.compare(&nodes[left].folder.title, &nodes[right].folder.title)
}

/// Post-order walk from `start` filling `all_descendant_items`.
///
/// Uses an explicit stack rather than recursion.
/// A child still marked active at visit time is an ancestor, so the edge
/// closes a cycle and is skipped.
fn collect_descendants(
    nodes: &mut [FolderNode],
    visits: &mut [Visit],
    start: usize,
) {
    visits[start] = Visit::Active;
    let mut stack = vec![(start, 0usize)];

    while let Some((slot, cursor)) = stack.pop() {
        let Some(&child) = nodes[slot].children.get(cursor) else {
            finish_descendants(nodes, visits, slot);
            continue;
        };

        stack.push((slot, cursor + 1));
        match visits[child] {
            Visit::Active => log::warn!(
                "folder {} closes a parent cycle through folder {}; skipping it",
                nodes[child].folder.id,
                nodes[slot].folder.id
            ),
            Visit::Pending => {
                visits[child] = Visit::Active;
                stack.push((child, 0));
            },
            Visit::Done => {},
        }
    }
}

fn finish_descendants(
    nodes: &mut [FolderNode],
    visits: &mut [Visit],
    slot: usize,
) {
    let mut descendants = nodes[slot].items.clone();
    for &child in &nodes[slot].children {
        if visits[child] == Visit::Done {
            descendants.extend_from_slice(&nodes[child].all_descendant_items);
        }
    }

    nodes[slot].all_descendant_items = descendants;
    visits[slot] = Visit::Done;
}
