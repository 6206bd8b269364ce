//! Person detail lookup for selected tree nodes

use std::collections::HashMap;
use std::fmt;

use crate::options::LayoutOptions;
use crate::person::{PersonId, PersonRecord};

/// Full details of a selected person, placeholders filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonDetail {
    /// Person id
    pub id: PersonId,
    /// Display name
    pub name: String,
    /// Birth date or the unknown placeholder
    pub birth_date: String,
    /// Birth place or the unknown placeholder
    pub birth_place: String,
    /// Notes or the no-notes placeholder
    pub notes: String,
    /// Gender marker, when recorded
    pub gender: Option<String>,
    /// Death date, when recorded
    pub death_date: Option<String>,
    /// Death place, when recorded
    pub death_place: Option<String>,
}

impl PersonDetail {
    fn from_record(person: &PersonRecord, options: &LayoutOptions) -> Self {
        let or_unknown =
            |field: &Option<String>| field.clone().unwrap_or_else(|| options.unknown_label.clone());
        Self {
            id: person.id,
            name: person.name.clone(),
            birth_date: or_unknown(&person.birth_date),
            birth_place: or_unknown(&person.birth_place),
            notes: person
                .notes
                .clone()
                .unwrap_or_else(|| options.no_notes_label.clone()),
            gender: person.gender.clone(),
            death_date: person.death_date.clone(),
            death_place: person.death_place.clone(),
        }
    }
}

impl fmt::Display for PersonDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Born: {}", self.birth_date)?;
        writeln!(f, "Place: {}", self.birth_place)?;
        if let Some(gender) = &self.gender {
            writeln!(f, "Gender: {}", gender)?;
        }
        match (&self.death_date, &self.death_place) {
            (Some(date), Some(place)) => writeln!(f, "Died: {}, {}", date, place)?,
            (Some(known), None) | (None, Some(known)) => writeln!(f, "Died: {}", known)?,
            (None, None) => {}
        }
        write!(f, "Notes: {}", self.notes)
    }
}

/// Id-indexed view over a person list, handed to the view layer alongside
/// the render plan.
#[derive(Debug, Clone)]
pub struct DetailLookup<'a> {
    by_id: HashMap<PersonId, &'a PersonRecord>,
    options: LayoutOptions,
}

impl<'a> DetailLookup<'a> {
    /// Index `persons` for lookup. With duplicate ids the first record wins.
    pub fn new(persons: &'a [PersonRecord], options: LayoutOptions) -> Self {
        let mut by_id = HashMap::with_capacity(persons.len());
        for person in persons {
            by_id.entry(person.id).or_insert(person);
        }
        Self { by_id, options }
    }

    /// Details for `id`, or `None` when the person is not in the list.
    pub fn detail(&self, id: PersonId) -> Option<PersonDetail> {
        self.by_id
            .get(&id)
            .map(|person| PersonDetail::from_record(person, &self.options))
    }

    /// The raw record for `id`.
    pub fn record(&self, id: PersonId) -> Option<&'a PersonRecord> {
        self.by_id.get(&id).copied()
    }
}

/// One-shot detail lookup without building an index.
pub fn person_detail(
    persons: &[PersonRecord],
    id: PersonId,
    options: &LayoutOptions,
) -> Option<PersonDetail> {
    persons
        .iter()
        .find(|person| person.id == id)
        .map(|person| PersonDetail::from_record(person, options))
}
