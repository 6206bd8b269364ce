//! Family statistics

use std::fmt;

use crate::error::Result;
use crate::generation::GenerationIndex;
use crate::person::PersonRecord;

/// Summary numbers for the statistics view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FamilyStatistics {
    /// Number of persons in the tree
    pub total_persons: usize,

    /// Number of generations (`max generation + 1`, 0 for an empty tree)
    pub generations: u32,

    /// Persons with no resolvable parent
    pub root_count: usize,

    /// Parent references ignored to break ancestry loops
    pub cycles_cut: usize,

    /// Parent references pointing outside the tree
    pub unresolved_references: usize,
}

impl FamilyStatistics {
    /// Compute statistics for a person list.
    pub fn from_persons(persons: &[PersonRecord]) -> Result<Self> {
        let index = GenerationIndex::build(persons)?;
        Ok(Self::from_index(&index))
    }

    /// Compute statistics from an already built index.
    pub fn from_index(index: &GenerationIndex) -> Self {
        Self {
            total_persons: index.len(),
            generations: index.max_generation().map_or(0, |max| max + 1),
            root_count: index.root_count(),
            cycles_cut: index.cycles_cut().len(),
            unresolved_references: index.unresolved_references(),
        }
    }
}

impl fmt::Display for FamilyStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Persons: {}", self.total_persons)?;
        writeln!(f, "Generations: {}", self.generations)?;
        write!(f, "Roots: {}", self.root_count)?;
        if self.unresolved_references > 0 {
            write!(f, "\nUnresolved parent references: {}", self.unresolved_references)?;
        }
        if self.cycles_cut > 0 {
            write!(f, "\nAncestry loops broken: {}", self.cycles_cut)?;
        }
        Ok(())
    }
}
