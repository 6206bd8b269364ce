//! # Lineage
//!
//! A genealogy layout engine.
//!
//! Lineage takes the flat person list a family-tree provider returns, works
//! out each person's generation from their parent references, groups people
//! into generation tiers and projects those tiers onto a render plan that a
//! view layer can draw.
//!
//! ## Architecture
//!
//! ```text
//! TreeSource → [PersonRecord] → GenerationIndex → [GenerationTier] → TreeLayout
//!                                                                 ↘ DetailLookup
//! ```
//!
//! - **Engine**: [`compute_generation`], [`group_by_generation`],
//!   [`render_tiers`] and [`DetailLookup`] are pure functions of the list
//! - **Session**: explicit viewer state holding the latest snapshot
//! - **Views**: a [`ViewRegistry`] dispatch table from view kind to handler
//!
//! ## Example
//!
//! ```
//! use lineage::{group_by_generation, PersonRecord};
//!
//! let persons = vec![
//!     PersonRecord::new(1, "Ana"),
//!     PersonRecord::new(2, "Bia").with_father(1),
//!     PersonRecord::new(3, "Caio").with_father(2),
//! ];
//!
//! let tiers = group_by_generation(&persons).unwrap();
//! let names: Vec<_> = tiers.iter().map(|t| t.persons[0].name.as_str()).collect();
//! assert_eq!(names, ["Ana", "Bia", "Caio"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod detail;
pub mod error;
pub mod generation;
pub mod options;
pub mod person;
pub mod render;
pub mod session;
pub mod source;
pub mod stats;
pub mod tiers;
pub mod view;

// Re-export main types
pub use detail::{person_detail, DetailLookup, PersonDetail};
pub use error::{LineageError, Result};
pub use generation::{compute_generation, CutEdge, GenerationIndex};
pub use options::LayoutOptions;
pub use person::{parse_persons, PersonId, PersonRecord};
pub use render::{render_tiers, PersonNode, TreeLayout, TreeLevel};
pub use session::Session;
pub use source::{JsonFileSource, StaticSource, TreeSource};
pub use stats::FamilyStatistics;
pub use tiers::{group_by_generation, group_with_index, GenerationTier};
pub use view::{ViewHandler, ViewId, ViewKind, ViewRegistry};

/// Lineage version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
