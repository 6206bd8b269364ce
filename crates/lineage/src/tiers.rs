//! Grouping persons into generation tiers

use std::collections::BTreeMap;

use crate::error::Result;
use crate::generation::GenerationIndex;
use crate::person::PersonRecord;

/// All persons sharing one generation number; one visual row of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTier {
    /// Generation number shared by every person in the tier
    pub generation: u32,

    /// Persons of this generation, in input order
    pub persons: Vec<PersonRecord>,
}

impl GenerationTier {
    /// Number of persons in the tier.
    pub fn len(&self) -> usize {
        self.persons.len()
    }

    /// Check if the tier holds no persons.
    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }
}

/// Group `persons` into tiers ordered by ascending generation.
///
/// Intra-tier order is the order of `persons`. An empty list yields no tiers.
pub fn group_by_generation(persons: &[PersonRecord]) -> Result<Vec<GenerationTier>> {
    let index = GenerationIndex::build(persons)?;
    Ok(group_with_index(persons, &index))
}

/// Group `persons` using an index already computed for the same list.
///
/// Persons missing from `index` are placed in generation 0.
pub fn group_with_index(persons: &[PersonRecord], index: &GenerationIndex) -> Vec<GenerationTier> {
    let mut by_generation: BTreeMap<u32, Vec<PersonRecord>> = BTreeMap::new();
    for person in persons {
        let generation = index.get(person.id).unwrap_or(0);
        by_generation
            .entry(generation)
            .or_default()
            .push(person.clone());
    }

    by_generation
        .into_iter()
        .map(|(generation, persons)| GenerationTier {
            generation,
            persons,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::PersonId;

    fn ids(tier: &GenerationTier) -> Vec<PersonId> {
        tier.persons.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_empty_input_yields_no_tiers() {
        assert!(group_by_generation(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_tiers_sorted_and_keep_input_order() {
        let persons = vec![
            PersonRecord::new(5, "Eva").with_mother(1),
            PersonRecord::new(1, "Ana"),
            PersonRecord::new(3, "Caio").with_father(1),
            PersonRecord::new(2, "Bia"),
        ];
        let tiers = group_by_generation(&persons).unwrap();

        assert_eq!(tiers.len(), 2);
        assert_eq!(tiers[0].generation, 0);
        assert_eq!(ids(&tiers[0]), vec![PersonId(1), PersonId(2)]);
        assert_eq!(tiers[1].generation, 1);
        assert_eq!(ids(&tiers[1]), vec![PersonId(5), PersonId(3)]);
    }

    #[test]
    fn test_generation_gaps_are_not_filled() {
        // Parent at generation 0, child at 1; nothing else. No empty tiers appear.
        let persons = vec![
            PersonRecord::new(1, "Ana"),
            PersonRecord::new(2, "Bia").with_father(1),
        ];
        let tiers = group_by_generation(&persons).unwrap();
        assert!(tiers.iter().all(|tier| !tier.is_empty()));
    }
}
