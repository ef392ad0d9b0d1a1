use std::sync::Arc;

use crate::config::PickerConfig;
use crate::model::SelectorData;
use crate::selection::SelectionSession;
use crate::source::{DataSource, SourceError};
use crate::tree::FolderTree;

/// Lifecycle of the dataset behind an item selector.
#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Failed { message: String },
    Ready(SelectionSession),
}

/// Owns the current dataset load and the session built on top of it.
///
/// Every successful load builds a fresh tree, so the session (selection and
/// expansion) starts over. An empty dataset yields a session without a
/// tree.
#[derive(Debug, Clone)]
pub struct ItemSelector {
    config: PickerConfig,
    state: LoadState,
}

impl ItemSelector {
    /// Create a selector waiting for its first load.
    pub fn new(config: PickerConfig) -> Self {
        Self {
            config,
            state: LoadState::Loading,
        }
    }

    /// Return the config applied to every load.
    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Return the current load state.
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Fetch from `source` and apply the result.
    pub fn load(&mut self, source: &dyn DataSource) -> &LoadState {
        self.state = LoadState::Loading;
        self.apply(source.fetch())
    }

    /// Apply a finished fetch.
    pub fn apply(
        &mut self,
        result: Result<SelectorData, SourceError>,
    ) -> &LoadState {
        self.state = match result {
            Ok(data) => {
                let tree = if data.is_empty() {
                    log::debug!("item selector loaded an empty dataset");
                    None
                } else {
                    let tree =
                        FolderTree::build_with(&data, self.config.title_order);
                    Some(Arc::new(tree))
                };
                LoadState::Ready(SelectionSession::with_expansion(
                    tree,
                    self.config.initial_expansion,
                ))
            },
            Err(err) => {
                log::warn!("item selector load failed: {err}");
                LoadState::Failed {
                    message: format!("{err}"),
                }
            },
        };

        &self.state
    }

    /// Return the session once data is ready.
    pub fn session(&self) -> Option<&SelectionSession> {
        match &self.state {
            LoadState::Ready(session) => Some(session),
            _ => None,
        }
    }

    /// Return the mutable session once data is ready.
    pub fn session_mut(&mut self) -> Option<&mut SelectionSession> {
        match &mut self.state {
            LoadState::Ready(session) => Some(session),
            _ => None,
        }
    }

    /// Placeholder text while no tree is shown.
    pub fn status_line(&self) -> Option<String> {
        match &self.state {
            LoadState::Loading => Some(String::from("Loading items…")),
            LoadState::Failed { message } => {
                Some(format!("Error loading items: {message}"))
            },
            LoadState::Ready(_) => None,
        }
    }
}

impl Default for ItemSelector {
    fn default() -> Self {
        Self::new(PickerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{ItemSelector, LoadState};
    use crate::config::PickerConfig;
    use crate::model::{
        FolderId, FolderRecord, ItemId, ItemRecord, SelectorData,
    };
    use crate::selection::InitialExpansion;
    use crate::source::{LOAD_FAILED_MESSAGE, StaticSource};

    fn data() -> SelectorData {
        SelectorData::new(
            vec![
                FolderRecord::new(1, "Root", None),
                FolderRecord::new(2, "Child", Some(1)),
            ],
            vec![
                ItemRecord::new(1, "I1", 1),
                ItemRecord::new(2, "I2", 2),
            ],
        )
    }

    #[test]
    fn given_new_selector_when_nothing_loaded_then_it_reports_loading() {
        let selector = ItemSelector::default();

        assert!(matches!(selector.state(), LoadState::Loading));
        assert!(selector.session().is_none());
        assert_eq!(selector.status_line().as_deref(), Some("Loading items…"));
    }

    #[test]
    fn given_successful_fetch_when_loaded_then_session_is_ready() {
        let mut selector = ItemSelector::default();

        selector.load(&StaticSource::new(data()));

        let session = selector.session().expect("session should be ready");
        assert_eq!(session.tree().map(|tree| tree.len()), Some(2));
        assert!(session.is_expanded(FolderId(2)));
        assert!(selector.status_line().is_none());
    }

    #[test]
    fn given_failed_fetch_when_loaded_then_message_is_surfaced() {
        let mut selector = ItemSelector::default();

        selector.load(&StaticSource::failing(LOAD_FAILED_MESSAGE));

        assert!(selector.session().is_none());
        assert_eq!(
            selector.status_line().as_deref(),
            Some("Error loading items: Failed to load item selector data")
        );
    }

    #[test]
    fn given_selection_when_reloaded_then_state_is_replaced() {
        let mut selector = ItemSelector::default();
        selector.load(&StaticSource::new(data()));
        if let Some(session) = selector.session_mut() {
            session.toggle_item(ItemId(1));
            session.toggle_folder_expand(FolderId(1));
        }

        selector.load(&StaticSource::new(data()));

        let session = selector.session().expect("session should be ready");
        assert!(session.selected_item_ids().is_empty());
        assert!(session.is_expanded(FolderId(1)));
    }

    #[test]
    fn given_empty_dataset_when_loaded_then_session_ignores_mutations() {
        let mut selector = ItemSelector::default();
        selector.load(&StaticSource::new(SelectorData::default()));

        let session = selector.session_mut().expect("session should be ready");
        session.toggle_item(ItemId(5));
        session.toggle_folder_expand(FolderId(1));

        assert!(session.tree().is_none());
        assert!(session.selected_item_ids().is_empty());
        assert!(session.expanded_folder_ids().is_empty());
        assert!(selector.status_line().is_none());
    }

    #[test]
    fn given_collapsed_config_when_loaded_then_nothing_is_expanded() {
        let config = PickerConfig {
            initial_expansion: InitialExpansion::Collapsed,
            ..PickerConfig::default()
        };
        let mut selector = ItemSelector::new(config);

        selector.load(&StaticSource::new(data()));

        let session = selector.session().expect("session should be ready");
        assert!(session.expanded_folder_ids().is_empty());
    }
}
