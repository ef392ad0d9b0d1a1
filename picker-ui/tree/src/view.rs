use std::collections::BTreeSet;

use picker::{ItemId, SelectionSession, SelectionState};

use crate::model::{TreeRow, flatten_tree};

const DEFAULT_INDENT_WIDTH: usize = 2;

type RowRenderer<'a> = dyn Fn(&TreeRow<'_>) -> String + 'a;

/// Plain-text tree view over a [`SelectionSession`].
///
/// Each visible row becomes one line: indentation, expander, checkbox and
/// title. A custom row renderer replaces everything after the indentation.
pub struct TreeView<'a> {
    session: &'a SelectionSession,
    indent_width: usize,
    render_row: Option<Box<RowRenderer<'a>>>,
}

impl<'a> TreeView<'a> {
    pub fn new(session: &'a SelectionSession) -> Self {
        Self {
            session,
            indent_width: DEFAULT_INDENT_WIDTH,
            render_row: None,
        }
    }

    /// Set the number of spaces per depth level.
    pub fn indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Render rows with `render_row` instead of the default layout.
    pub fn render_row(
        mut self,
        render_row: impl Fn(&TreeRow<'_>) -> String + 'a,
    ) -> Self {
        self.render_row = Some(Box::new(render_row));
        self
    }

    /// Render every visible row.
    pub fn lines(&self) -> Vec<String> {
        flatten_tree(self.session)
            .iter()
            .map(|row| {
                let indent = " ".repeat(row.depth() * self.indent_width);
                let body = match &self.render_row {
                    Some(render_row) => render_row(row),
                    None => default_row(row),
                };
                format!("{indent}{body}")
            })
            .collect()
    }

    /// Rows followed by the selection footer.
    pub fn view(&self) -> String {
        let mut lines = self.lines();
        lines.push(footer_line(self.session.selected_item_ids()));
        lines.join("\n")
    }
}

/// Checkbox marker for a folder state.
pub fn checkbox(state: SelectionState) -> &'static str {
    match state {
        SelectionState::Unchecked => "[ ]",
        SelectionState::Checked => "[x]",
        SelectionState::Indeterminate => "[-]",
    }
}

/// Selected ids ascending, comma separated.
pub fn format_selected_ids(selected: &BTreeSet<ItemId>) -> String {
    selected
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Footer text listing the selection.
pub fn footer_line(selected: &BTreeSet<ItemId>) -> String {
    format!("Selected item IDs: {}", format_selected_ids(selected))
}

fn default_row(row: &TreeRow<'_>) -> String {
    match row {
        TreeRow::Folder(folder) => {
            let expander = if folder.expanded { "v" } else { ">" };
            let marker = if folder.enabled {
                checkbox(folder.state)
            } else {
                "[.]"
            };
            format!("{expander} {marker} {}", folder.node.title())
        },
        TreeRow::Item(item) => {
            let marker = if item.selected {
                checkbox(SelectionState::Checked)
            } else {
                checkbox(SelectionState::Unchecked)
            };
            format!("  {marker} {}", item.item.title)
        },
    }
}
