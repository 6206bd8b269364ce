//! Person records as delivered by the family-tree provider

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LineageError, Result};

/// Caller-stable identifier of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub i64);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PersonId {
    fn from(id: i64) -> Self {
        PersonId(id)
    }
}

impl From<i32> for PersonId {
    fn from(id: i32) -> Self {
        PersonId(i64::from(id))
    }
}

/// A single person in the family tree.
///
/// Parent references may be absent, or may point at ids that are not part of
/// the list being laid out (partial trees). Neither case is an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Unique identifier
    pub id: PersonId,

    /// Display name
    pub name: String,

    /// Birth date as supplied by the provider (free-form)
    pub birth_date: Option<String>,

    /// Birth place
    pub birth_place: Option<String>,

    /// Death date as supplied by the provider (free-form)
    pub death_date: Option<String>,

    /// Death place
    pub death_place: Option<String>,

    /// Gender marker, usually `"M"` or `"F"`
    pub gender: Option<String>,

    /// Father reference
    pub father_id: Option<PersonId>,

    /// Mother reference
    pub mother_id: Option<PersonId>,

    /// Free-text notes
    pub notes: Option<String>,
}

impl PersonRecord {
    /// Create a record with only an id and a name.
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            birth_date: None,
            birth_place: None,
            death_date: None,
            death_place: None,
            gender: None,
            father_id: None,
            mother_id: None,
            notes: None,
        }
    }

    /// Set the father reference.
    pub fn with_father(mut self, id: impl Into<PersonId>) -> Self {
        self.father_id = Some(id.into());
        self
    }

    /// Set the mother reference.
    pub fn with_mother(mut self, id: impl Into<PersonId>) -> Self {
        self.mother_id = Some(id.into());
        self
    }

    /// Set the birth date.
    pub fn with_birth_date(mut self, date: impl Into<String>) -> Self {
        self.birth_date = Some(date.into());
        self
    }

    /// Set the birth place.
    pub fn with_birth_place(mut self, place: impl Into<String>) -> Self {
        self.birth_place = Some(place.into());
        self
    }

    /// Set the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Father then mother, skipping absent references.
    pub fn parent_ids(&self) -> impl Iterator<Item = PersonId> {
        self.father_id.into_iter().chain(self.mother_id)
    }
}

/// Parse a person list from provider JSON.
///
/// Accepts either a bare array of records or the provider envelope
/// `{"tree": [...]}`. Any malformed record fails the whole parse.
pub fn parse_persons(json: &str) -> Result<Vec<PersonRecord>> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| LineageError::invalid_input(format!("not valid JSON: {}", e)))?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut map) => match map.remove("tree") {
            Some(serde_json::Value::Array(items)) => items,
            Some(_) => {
                return Err(LineageError::invalid_input(
                    "'tree' field is not a list of person records",
                ))
            }
            None => {
                return Err(LineageError::invalid_input(
                    "expected a list of person records or an object with a 'tree' list",
                ))
            }
        },
        _ => {
            return Err(LineageError::invalid_input(
                "expected a list of person records",
            ))
        }
    };

    let persons = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<PersonRecord>(item)
                .map_err(|e| LineageError::invalid_input(format!("record {}: {}", index, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    validate_unique_ids(&persons)?;
    Ok(persons)
}

/// Reject lists in which two records share an id.
pub fn validate_unique_ids(persons: &[PersonRecord]) -> Result<()> {
    let mut seen = HashSet::with_capacity(persons.len());
    for person in persons {
        if !seen.insert(person.id) {
            return Err(LineageError::invalid_input(format!(
                "duplicate person id {}",
                person.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_array() {
        let persons =
            parse_persons(r#"[{"id": 1, "name": "Ana"}, {"id": 2, "name": "Bia", "father_id": 1}]"#)
                .unwrap();
        assert_eq!(persons.len(), 2);
        assert_eq!(persons[1].father_id, Some(PersonId(1)));
        assert_eq!(persons[1].mother_id, None);
    }

    #[test]
    fn test_parse_tree_envelope() {
        let persons = parse_persons(r#"{"tree": [{"id": 5, "name": "Caio", "gender": "M"}]}"#)
            .unwrap();
        assert_eq!(persons, vec![PersonRecord {
            gender: Some("M".to_string()),
            ..PersonRecord::new(5, "Caio")
        }]);
    }

    #[test]
    fn test_parse_accepts_explicit_nulls_and_unknown_fields() {
        let persons = parse_persons(
            r#"[{"id": 1, "name": "Ana", "father_id": null, "created_at": "2024-01-01"}]"#,
        )
        .unwrap();
        assert_eq!(persons[0].father_id, None);
    }

    #[test]
    fn test_parse_missing_id_is_invalid() {
        let err = parse_persons(r#"[{"id": 1, "name": "Ana"}, {"name": "Bia"}]"#).unwrap_err();
        match err {
            LineageError::InvalidInput { reason } => {
                assert!(reason.starts_with("record 1:"), "{}", reason);
                assert!(reason.contains("id"), "{}", reason);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_non_list_is_invalid() {
        assert!(matches!(
            parse_persons(r#""just a string""#),
            Err(LineageError::InvalidInput { .. })
        ));
        assert!(matches!(
            parse_persons(r#"{"persons": []}"#),
            Err(LineageError::InvalidInput { .. })
        ));
        assert!(matches!(
            parse_persons(r#"{"tree": 3}"#),
            Err(LineageError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_parse_duplicate_ids_is_invalid() {
        let err = parse_persons(r#"[{"id": 1, "name": "Ana"}, {"id": 1, "name": "Bia"}]"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: duplicate person id 1");
    }

    #[test]
    fn test_parent_ids_order() {
        let person = PersonRecord::new(3, "Caio").with_mother(2).with_father(1);
        assert_eq!(
            person.parent_ids().collect::<Vec<_>>(),
            vec![PersonId(1), PersonId(2)]
        );
    }
}
