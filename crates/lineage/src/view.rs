//! Views and their dispatch table
//!
//! A view is identified by a [`ViewId`]. Each view kind has one
//! [`ViewHandler`] that loads whatever data it needs and renders it to text.
//! Handlers are collected once into a [`ViewRegistry`], which is the only
//! place view commands are routed.
//!
//! ```text
//! "person 3" → ViewId::Person(3) → ViewRegistry → PersonView → String
//! ```

mod handlers;
mod registry;

pub use handlers::{PersonView, StatisticsView, TreeView, EMPTY_TREE_MESSAGE};
pub use registry::ViewRegistry;

use std::fmt;
use std::str::FromStr;

use crate::error::{LineageError, Result};
use crate::person::PersonId;
use crate::session::Session;
use crate::source::TreeSource;

/// A concrete view request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    /// Family tree grouped by generation
    Tree,

    /// Family statistics
    Statistics,

    /// Details of one person
    Person(PersonId),
}

/// The kind of a view, used as the registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewKind {
    /// See [`ViewId::Tree`]
    Tree,
    /// See [`ViewId::Statistics`]
    Statistics,
    /// See [`ViewId::Person`]
    Person,
}

impl ViewId {
    /// The registry key for this view.
    pub fn kind(&self) -> ViewKind {
        match self {
            ViewId::Tree => ViewKind::Tree,
            ViewId::Statistics => ViewKind::Statistics,
            ViewId::Person(_) => ViewKind::Person,
        }
    }
}

impl FromStr for ViewId {
    type Err = LineageError;

    /// Parse `tree`, `stats` / `statistics` or `person <id>`.
    fn from_str(s: &str) -> Result<Self> {
        let mut words = s.split_whitespace();
        let command = words.next().unwrap_or_default();
        let argument = words.next();

        if words.next().is_some() {
            return Err(LineageError::UnknownView(s.trim().to_string()));
        }

        match (command, argument) {
            ("tree", None) => Ok(ViewId::Tree),
            ("stats" | "statistics", None) => Ok(ViewId::Statistics),
            ("person", Some(id)) => id
                .parse::<i64>()
                .map(|id| ViewId::Person(PersonId(id)))
                .map_err(|_| LineageError::UnknownView(s.trim().to_string())),
            _ => Err(LineageError::UnknownView(s.trim().to_string())),
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewId::Tree => write!(f, "tree"),
            ViewId::Statistics => write!(f, "stats"),
            ViewId::Person(id) => write!(f, "person {}", id),
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Tree => write!(f, "tree"),
            ViewKind::Statistics => write!(f, "stats"),
            ViewKind::Person => write!(f, "person"),
        }
    }
}

/// Loads and renders one kind of view.
pub trait ViewHandler {
    /// Load the data `view` needs into `session` (fetching from `source` when
    /// required) and render it.
    fn load_and_render(
        &self,
        view: &ViewId,
        session: &mut Session,
        source: &dyn TreeSource,
    ) -> Result<String>;
}
