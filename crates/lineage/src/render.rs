//! Render plan for the tree view
//!
//! [`render_tiers`] projects generation tiers onto display nodes. The result
//! carries no markup; presentation is left to the view layer. [`TreeLayout`]
//! also implements `Display` as a plain-text rendering for terminals.

use std::fmt;

use crate::options::LayoutOptions;
use crate::person::PersonId;
use crate::tiers::GenerationTier;

/// One person as shown on a tree level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonNode {
    /// Id used to look up the full record on selection
    pub id: PersonId,

    /// Display name
    pub name: String,

    /// Birth date, or the configured fallback label
    pub birth_label: String,

    /// Birth place; `None` means the line is omitted entirely
    pub birth_place: Option<String>,
}

/// One row of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLevel {
    /// Generation shown on this row
    pub generation: u32,

    /// Nodes in tier order
    pub nodes: Vec<PersonNode>,
}

/// The whole render plan, levels in ascending generation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeLayout {
    /// Rows of the tree
    pub levels: Vec<TreeLevel>,
}

impl TreeLayout {
    /// Check if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Total number of person nodes across all levels.
    pub fn node_count(&self) -> usize {
        self.levels.iter().map(|level| level.nodes.len()).sum()
    }

    /// Find the node for a person id.
    pub fn node(&self, id: PersonId) -> Option<&PersonNode> {
        self.levels
            .iter()
            .flat_map(|level| level.nodes.iter())
            .find(|node| node.id == id)
    }
}

/// Project tiers onto a render plan. Pure; the tiers are not modified.
pub fn render_tiers(tiers: &[GenerationTier], options: &LayoutOptions) -> TreeLayout {
    let levels = tiers
        .iter()
        .map(|tier| TreeLevel {
            generation: tier.generation,
            nodes: tier
                .persons
                .iter()
                .map(|person| PersonNode {
                    id: person.id,
                    name: person.name.clone(),
                    birth_label: person
                        .birth_date
                        .clone()
                        .unwrap_or_else(|| options.unknown_date_label.clone()),
                    birth_place: person.birth_place.clone(),
                })
                .collect(),
        })
        .collect();

    TreeLayout { levels }
}

impl fmt::Display for PersonNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} - {}", self.id, self.name, self.birth_label)?;
        if let Some(place) = &self.birth_place {
            write!(f, ", {}", place)?;
        }
        Ok(())
    }
}

impl fmt::Display for TreeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, level) in self.levels.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "Generation {}", level.generation)?;
            for node in &level.nodes {
                write!(f, "\n  {}", node)?;
            }
        }
        Ok(())
    }
}
