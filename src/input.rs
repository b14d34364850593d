//! Input rows: one person per row of a delimited file.

use crate::errors::{self, Result};
use itertools::Itertools;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::io;

/// One person, as given in one row of the input table.
///
/// Column names follow the headers of the input file. Event columns may be
/// left out of the file entirely; the identity and parentage columns are
/// required.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Person {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Given Names")]
    pub given_names: String,
    #[serde(rename = "Surname")]
    pub surname: String,
    /// `0` for male, anything else for female.
    #[serde(rename = "Sex")]
    pub sex: String,
    /// External ID of the father; empty cells become `None`.
    #[serde(rename = "Father ID")]
    pub father_id: Option<String>,
    /// External ID of the mother; empty cells become `None`.
    #[serde(rename = "Mother ID")]
    pub mother_id: Option<String>,

    #[serde(rename = "Birth Date", default)]
    pub birth_date: String,
    #[serde(rename = "Birth City", default)]
    pub birth_city: String,
    #[serde(rename = "Birth County", default)]
    pub birth_county: String,
    #[serde(rename = "Birth State", default)]
    pub birth_state: String,

    #[serde(rename = "Death Date", default)]
    pub death_date: String,
    #[serde(rename = "Death City", default)]
    pub death_city: String,
    #[serde(rename = "Death County", default)]
    pub death_county: String,
    #[serde(rename = "Death State", default)]
    pub death_state: String,

    #[serde(rename = "Burial Date", default)]
    pub burial_date: String,
    #[serde(rename = "Burial City", default)]
    pub burial_city: String,
    #[serde(rename = "Burial County", default)]
    pub burial_county: String,
    #[serde(rename = "Burial State", default)]
    pub burial_state: String,
}

/// Columns that every input file must have, even if all their cells are empty.
const REQUIRED_COLUMNS: &[&str] = &[
    "ID",
    "Given Names",
    "Surname",
    "Sex",
    "Father ID",
    "Mother ID",
];

/// Life events that are recorded for each person.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Birth,
    Death,
    Burial,
}

impl EventKind {
    /// The GEDCOM tag of the event.
    pub fn tag(self) -> &'static str {
        match self {
            EventKind::Birth => "BIRT",
            EventKind::Death => "DEAT",
            EventKind::Burial => "BURI",
        }
    }
}

/// Borrowed view of the date and place columns of one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Event<'a> {
    pub kind: EventKind,
    pub date: &'a str,
    pub city: &'a str,
    pub county: &'a str,
    pub state: &'a str,
}

impl Person {
    /// True if at least one parent is known.
    pub fn has_known_parent(&self) -> bool {
        self.father_id.is_some() || self.mother_id.is_some()
    }

    /// Birth, death and burial, in this order.
    pub fn events(&self) -> [Event<'_>; 3] {
        [
            Event {
                kind: EventKind::Birth,
                date: &self.birth_date,
                city: &self.birth_city,
                county: &self.birth_county,
                state: &self.birth_state,
            },
            Event {
                kind: EventKind::Death,
                date: &self.death_date,
                city: &self.death_city,
                county: &self.death_county,
                state: &self.death_state,
            },
            Event {
                kind: EventKind::Burial,
                date: &self.burial_date,
                city: &self.burial_city,
                county: &self.burial_county,
                state: &self.burial_state,
            },
        ]
    }
}

/// Read all people from CSV data with a header row.
///
/// Cells are trimmed. A header without one of the required columns, or a
/// row that cannot be parsed, makes the whole input invalid.
pub fn read_people_from<R: io::Read>(reader: R) -> Result<Vec<Person>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?;
    let missing = REQUIRED_COLUMNS
        .iter()
        .filter(|&&col| !headers.iter().any(|h| h == col))
        .join(", ");
    if !missing.is_empty() {
        return Err(errors::invalid_input(format!("missing columns: {missing}")));
    }
    let mut people = Vec::new();
    for result in rdr.deserialize() {
        let person: Person = match result {
            Ok(person) => person,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => return Err(errors::invalid_input(format!("{e}"))),
        };
        people.push(person);
    }
    debug!(target: "csv2gedcom", "rows read: {}", people.len());
    Ok(people)
}

/// Read all people from a CSV file.
pub fn read_people(filename: &str) -> Result<Vec<Person>> {
    let file = fs::File::open(filename)?;
    read_people_from(io::BufReader::new(file))
}
