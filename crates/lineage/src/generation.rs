//! Generation numbers over an ancestry graph
//!
//! A person's generation is 0 when none of their parents can be found in the
//! supplied list, and `1 + max(parent generations)` otherwise. The list is
//! walked once, depth-first over parent references, with an explicit stack:
//! long ancestry chains never grow the call stack, and each person's
//! generation is computed exactly once no matter how many descendants share
//! them.
//!
//! # Cycles
//!
//! Parent references can form loops in bad data (a person listed as their own
//! ancestor). When the walk reaches a person that is already on the current
//! ancestry path, the reference that closes the loop is cut: that ancestor
//! contributes nothing through it. Every cut is recorded as a [`CutEdge`] and
//! logged, and the computation still completes. Generations therefore never
//! exceed `persons.len() - 1`.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::Result;
use crate::person::{validate_unique_ids, PersonId, PersonRecord};

/// A parent reference that was ignored because it closed an ancestry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutEdge {
    /// The person whose parent reference was cut
    pub child: PersonId,

    /// The referenced parent, already on the ancestry path
    pub ancestor: PersonId,
}

/// Generation number per person, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationIndex {
    generations: IndexMap<PersonId, u32>,
    cycles_cut: Vec<CutEdge>,
    unresolved_references: usize,
    root_count: usize,
}

#[derive(Debug, Clone, Copy)]
enum Mark {
    Unvisited,
    OnPath,
    Done(u32),
}

/// One person being resolved. `cursor` walks father (0) then mother (1).
#[derive(Debug, Clone, Copy)]
struct Frame {
    index: usize,
    cursor: u8,
    generation: u32,
}

impl Frame {
    fn new(index: usize) -> Self {
        Self {
            index,
            cursor: 0,
            generation: 0,
        }
    }
}

impl GenerationIndex {
    /// Compute the generation of every person in `persons`.
    ///
    /// Fails with `InvalidInput` when two records share an id; dangling parent
    /// references and ancestry loops are not errors.
    pub fn build(persons: &[PersonRecord]) -> Result<Self> {
        validate_unique_ids(persons)?;

        let positions: HashMap<PersonId, usize> = persons
            .iter()
            .enumerate()
            .map(|(index, person)| (person.id, index))
            .collect();

        let root_count = persons
            .iter()
            .filter(|person| {
                person
                    .parent_ids()
                    .all(|parent| !positions.contains_key(&parent))
            })
            .count();

        let mut marks = vec![Mark::Unvisited; persons.len()];
        let mut cycles_cut = Vec::new();
        let mut unresolved_references = 0;
        let mut stack: Vec<Frame> = Vec::new();

        for start in 0..persons.len() {
            if !matches!(marks[start], Mark::Unvisited) {
                continue;
            }
            marks[start] = Mark::OnPath;
            stack.push(Frame::new(start));

            while let Some(top) = stack.last_mut() {
                if top.cursor >= 2 {
                    let Frame {
                        index, generation, ..
                    } = *top;
                    stack.pop();
                    marks[index] = Mark::Done(generation);
                    if let Some(child) = stack.last_mut() {
                        child.generation = child.generation.max(generation + 1);
                    }
                    continue;
                }

                let person = &persons[top.index];
                let parent = if top.cursor == 0 {
                    person.father_id
                } else {
                    person.mother_id
                };
                top.cursor += 1;

                let Some(parent_id) = parent else {
                    continue;
                };
                let Some(&parent_index) = positions.get(&parent_id) else {
                    unresolved_references += 1;
                    continue;
                };

                match marks[parent_index] {
                    Mark::Done(parent_generation) => {
                        top.generation = top.generation.max(parent_generation + 1);
                    }
                    Mark::OnPath => {
                        warn!(
                            child = %person.id,
                            ancestor = %parent_id,
                            "ancestry loop detected, ignoring parent reference"
                        );
                        cycles_cut.push(CutEdge {
                            child: person.id,
                            ancestor: parent_id,
                        });
                    }
                    Mark::Unvisited => {
                        marks[parent_index] = Mark::OnPath;
                        stack.push(Frame::new(parent_index));
                    }
                }
            }
        }

        let generations = persons
            .iter()
            .zip(&marks)
            .map(|(person, mark)| match mark {
                Mark::Done(generation) => (person.id, *generation),
                // Every start is drained to completion above
                Mark::Unvisited | Mark::OnPath => (person.id, 0),
            })
            .collect();

        let index = Self {
            generations,
            cycles_cut,
            unresolved_references,
            root_count,
        };
        debug!(
            persons = index.len(),
            max_generation = ?index.max_generation(),
            cycles_cut = index.cycles_cut.len(),
            unresolved_references = index.unresolved_references,
            "computed generation index"
        );
        Ok(index)
    }

    /// Generation of a person, if the person was part of the input.
    pub fn get(&self, id: PersonId) -> Option<u32> {
        self.generations.get(&id).copied()
    }

    /// Highest generation present, `None` for an empty index.
    pub fn max_generation(&self) -> Option<u32> {
        self.generations.values().copied().max()
    }

    /// Number of persons indexed.
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    /// Check if no persons were indexed.
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    /// `(id, generation)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (PersonId, u32)> + '_ {
        self.generations.iter().map(|(id, generation)| (*id, *generation))
    }

    /// Parent references that were ignored to break ancestry loops.
    pub fn cycles_cut(&self) -> &[CutEdge] {
        &self.cycles_cut
    }

    /// Number of parent references pointing outside the supplied list.
    pub fn unresolved_references(&self) -> usize {
        self.unresolved_references
    }

    /// Number of persons with no resolvable parent.
    ///
    /// Persons at generation 0 only because a loop was cut are not roots.
    pub fn root_count(&self) -> usize {
        self.root_count
    }
}

/// Compute the generation of `person` against the full list `all_persons`.
///
/// The result follows the parent references of `person` itself. When the
/// list holds an identical record, its indexed generation is returned (which
/// keeps loop cuts consistent); otherwise, including when the list holds a
/// different version of the same id, the generation is derived from
/// whichever of `person`'s parents the list resolves.
pub fn compute_generation(person: &PersonRecord, all_persons: &[PersonRecord]) -> Result<u32> {
    let index = GenerationIndex::build(all_persons)?;
    let listed = all_persons.iter().find(|listed| listed.id == person.id);
    if let (Some(listed), Some(generation)) = (listed, index.get(person.id)) {
        if listed == person {
            return Ok(generation);
        }
    }
    Ok(person
        .parent_ids()
        .filter_map(|parent| index.get(parent))
        .map(|generation| generation + 1)
        .max()
        .unwrap_or(0))
}
