//! Dispatch table from view kind to handler

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use super::{PersonView, StatisticsView, TreeView, ViewHandler, ViewId, ViewKind};
use crate::error::{LineageError, Result};
use crate::session::Session;
use crate::source::TreeSource;

/// Maps each view kind to the handler that serves it.
///
/// Built once with [`ViewRegistry::with_handler`] (or
/// [`ViewRegistry::standard`]); there is no way to swap a handler afterwards.
///
/// # Example
///
/// ```
/// use lineage::{PersonRecord, Session, StaticSource, ViewId, ViewRegistry};
///
/// let registry = ViewRegistry::standard();
/// let source = StaticSource::new(vec![PersonRecord::new(1, "Ana")]);
/// let mut session = Session::default();
///
/// let output = registry
///     .dispatch(&ViewId::Tree, &mut session, &source)
///     .unwrap();
/// assert!(output.contains("Ana"));
/// ```
#[derive(Default)]
pub struct ViewRegistry {
    handlers: BTreeMap<ViewKind, Box<dyn ViewHandler>>,
}

impl ViewRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the tree, statistics and person views.
    pub fn standard() -> Self {
        Self::new()
            .with_handler(ViewKind::Tree, TreeView)
            .with_handler(ViewKind::Statistics, StatisticsView)
            .with_handler(ViewKind::Person, PersonView)
    }

    /// Add a handler for `kind`. A later call for the same kind replaces the
    /// earlier one while the registry is still being built.
    pub fn with_handler(mut self, kind: ViewKind, handler: impl ViewHandler + 'static) -> Self {
        self.handlers.insert(kind, Box::new(handler));
        self
    }

    /// Check if a handler is registered for `kind`.
    pub fn contains(&self, kind: ViewKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Registered view kinds, in a stable order.
    pub fn kinds(&self) -> impl Iterator<Item = ViewKind> + '_ {
        self.handlers.keys().copied()
    }

    /// Route `view` to its handler.
    pub fn dispatch(
        &self,
        view: &ViewId,
        session: &mut Session,
        source: &dyn TreeSource,
    ) -> Result<String> {
        let handler = self
            .handlers
            .get(&view.kind())
            .ok_or_else(|| LineageError::UnknownView(view.to_string()))?;
        debug!(view = %view, "dispatching view");
        handler.load_and_render(view, session, source)
    }

    /// Parse a command such as `person 3` and dispatch it.
    pub fn dispatch_command(
        &self,
        command: &str,
        session: &mut Session,
        source: &dyn TreeSource,
    ) -> Result<String> {
        let view: ViewId = command.parse()?;
        self.dispatch(&view, session, source)
    }
}

impl fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewRegistry")
            .field("kinds", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
