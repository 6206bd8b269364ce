//! Standard view handlers

use tracing::debug;

use super::{ViewHandler, ViewId};
use crate::error::{LineageError, Result};
use crate::session::Session;
use crate::source::TreeSource;

/// Message shown when the tree has no persons.
pub const EMPTY_TREE_MESSAGE: &str = "No persons in the family tree yet.";

/// Fetches the tree on every activation and renders it by generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeView;

impl ViewHandler for TreeView {
    fn load_and_render(
        &self,
        _view: &ViewId,
        session: &mut Session,
        source: &dyn TreeSource,
    ) -> Result<String> {
        session.ensure_signed_in()?;
        session.load_from(source)?;
        let layout = session.layout()?;
        debug!(
            levels = layout.levels.len(),
            nodes = layout.node_count(),
            "rendered tree view"
        );
        if layout.is_empty() {
            return Ok(EMPTY_TREE_MESSAGE.to_string());
        }
        Ok(layout.to_string())
    }
}

/// Fetches the tree and renders family statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticsView;

impl ViewHandler for StatisticsView {
    fn load_and_render(
        &self,
        _view: &ViewId,
        session: &mut Session,
        source: &dyn TreeSource,
    ) -> Result<String> {
        session.ensure_signed_in()?;
        session.load_from(source)?;
        Ok(session.statistics()?.to_string())
    }
}

/// Shows one person from the current snapshot.
///
/// Only fetches when no tree has been loaded yet; selecting a person is a
/// lookup into what the tree view already shows.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonView;

impl ViewHandler for PersonView {
    fn load_and_render(
        &self,
        view: &ViewId,
        session: &mut Session,
        source: &dyn TreeSource,
    ) -> Result<String> {
        let ViewId::Person(id) = *view else {
            return Err(LineageError::UnknownView(view.to_string()));
        };
        session.ensure_signed_in()?;
        if !session.is_loaded() {
            session.load_from(source)?;
        }
        session
            .detail_lookup()
            .detail(id)
            .map(|detail| detail.to_string())
            .ok_or(LineageError::PersonNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::{PersonId, PersonRecord};
    use crate::source::StaticSource;

    #[test]
    fn test_tree_view_empty_message() {
        let mut session = Session::default();
        let output = TreeView
            .load_and_render(&ViewId::Tree, &mut session, &StaticSource::default())
            .unwrap();
        assert_eq!(output, EMPTY_TREE_MESSAGE);
        assert!(session.is_loaded());
    }

    #[test]
    fn test_person_view_rejects_other_views() {
        let mut session = Session::default();
        let err = PersonView
            .load_and_render(&ViewId::Tree, &mut session, &StaticSource::default())
            .unwrap_err();
        assert!(matches!(err, LineageError::UnknownView(_)));
    }

    #[test]
    fn test_person_view_uses_existing_snapshot() {
        let mut session = Session::default();
        session.replace_tree(vec![PersonRecord::new(1, "Ana")]);
        // The source knows nobody; the snapshot must be used as is
        let output = PersonView
            .load_and_render(
                &ViewId::Person(PersonId(1)),
                &mut session,
                &StaticSource::default(),
            )
            .unwrap();
        assert!(output.starts_with("Name: Ana"));
    }
}
