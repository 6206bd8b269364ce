//! Per-viewer session state
//!
//! The session holds everything a view needs between activations: who is
//! looking, which labels to use, and the person list from the most recent
//! tree load. It is passed explicitly to view handlers.

use std::sync::Arc;

use tracing::info;

use crate::detail::DetailLookup;
use crate::error::{LineageError, Result};
use crate::generation::GenerationIndex;
use crate::options::LayoutOptions;
use crate::person::{validate_unique_ids, PersonRecord};
use crate::render::{render_tiers, TreeLayout};
use crate::source::TreeSource;
use crate::stats::FamilyStatistics;
use crate::tiers::group_with_index;

/// Viewer state carried between view activations.
#[derive(Debug, Clone)]
pub struct Session {
    user: Option<String>,
    options: LayoutOptions,
    persons: Arc<[PersonRecord]>,
    loaded: bool,
    sign_in_required: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(LayoutOptions::default())
    }
}

impl Session {
    /// Create an anonymous session with the given labels.
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            user: None,
            options,
            persons: Arc::from(Vec::new()),
            loaded: false,
            sign_in_required: false,
        }
    }

    /// Attach the name of the signed-in user.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Refuse family-tree views while no user is signed in.
    pub fn require_sign_in(mut self) -> Self {
        self.sign_in_required = true;
        self
    }

    /// Fails with `NotSignedIn` when sign-in is required and nobody is signed in.
    pub fn ensure_signed_in(&self) -> Result<()> {
        if self.sign_in_required && self.user.is_none() {
            return Err(LineageError::NotSignedIn);
        }
        Ok(())
    }

    /// Name of the signed-in user, if any.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Labels used for rendering.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Person list from the latest load (empty before the first load).
    pub fn persons(&self) -> &[PersonRecord] {
        &self.persons
    }

    /// Shared handle to the current snapshot.
    pub fn snapshot(&self) -> Arc<[PersonRecord]> {
        Arc::clone(&self.persons)
    }

    /// Whether a tree has been loaded yet.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Replace the snapshot wholesale. Nothing from the previous load is kept.
    pub fn replace_tree(&mut self, persons: Vec<PersonRecord>) {
        self.persons = Arc::from(persons);
        self.loaded = true;
    }

    /// Fetch a fresh tree from `source` and make it the current snapshot.
    ///
    /// On failure the previous snapshot is left untouched.
    pub fn load_from(&mut self, source: &dyn TreeSource) -> Result<usize> {
        let persons = source.fetch_tree()?;
        validate_unique_ids(&persons)?;
        let count = persons.len();
        self.replace_tree(persons);
        info!(source = source.name(), persons = count, "loaded family tree");
        Ok(count)
    }

    /// Build the render plan for the current snapshot.
    pub fn layout(&self) -> Result<TreeLayout> {
        let index = GenerationIndex::build(&self.persons)?;
        let tiers = group_with_index(&self.persons, &index);
        Ok(render_tiers(&tiers, &self.options))
    }

    /// Statistics for the current snapshot.
    pub fn statistics(&self) -> Result<FamilyStatistics> {
        FamilyStatistics::from_persons(&self.persons)
    }

    /// Detail lookup over the current snapshot.
    pub fn detail_lookup(&self) -> DetailLookup<'_> {
        DetailLookup::new(&self.persons, self.options.clone())
    }
}
