//! GEDCOM 5.5.1 building blocks: header, trailer and value formatting.

use crate::errors::{self, Result};
use chrono::NaiveDateTime;
use itertools::Itertools;
use std::io::{self, Write};

pub const GEDCOM_VERSION: &str = "5.5.1";

/// Month names of the source locale that differ from the GEDCOM abbreviations.
/// Applied after the date has been uppercased.
const MONTH_TRANSLATIONS: &[(&str, &str)] = &[("MAJ", "MAY"), ("OKT", "OCT")];

const DISCLAIMER: &[&str] = &[
    "This Gedcom file is not to be trusted and/or verified data.",
    "The data herein is converted from CSV (comma separated values)",
    "and some fields may contain invalid data or other mismatches.",
];

/// The person or organization that submits the file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submitter {
    pub name: String,
    /// Address, one element per line.
    pub address: Vec<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Descriptive fields of the header block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    /// Receiving system.
    pub destination: String,
    pub file_name: String,
    pub copyright: Option<String>,
    pub language: String,
    pub submitter: Submitter,
}

impl Default for Submitter {
    fn default() -> Self {
        Submitter {
            name: "Firstname Lastname".to_owned(),
            address: vec![
                "Street Address 1".to_owned(),
                "90 210 BEVERLY HILLS".to_owned(),
                "USA".to_owned(),
            ],
            phone: Some("+1-202-555-0170".to_owned()),
            email: Some("your@email.com".to_owned()),
        }
    }
}

impl Default for Header {
    fn default() -> Self {
        Header {
            destination: "MinSläkt".to_owned(),
            file_name: "MYFAMILY.GED".to_owned(),
            copyright: None,
            language: "Swedish".to_owned(),
            submitter: Submitter::default(),
        }
    }
}

impl Header {
    /// Every value must fit on one GEDCOM line.
    pub fn validate(&self) -> Result<()> {
        let s = &self.submitter;
        let fields = [
            ("destination", Some(&self.destination)),
            ("file name", Some(&self.file_name)),
            ("copyright", self.copyright.as_ref()),
            ("language", Some(&self.language)),
            ("submitter name", Some(&s.name)),
            ("phone", s.phone.as_ref()),
            ("email", s.email.as_ref()),
        ];
        let address = s.address.iter().map(|line| ("address", Some(line)));
        for (what, value) in fields.into_iter().chain(address) {
            if let Some(value) = value {
                if value.contains(['\n', '\r']) {
                    return Err(errors::invalid_argument(format!(
                        "{what} must be a single line, got '{value}'"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Write the header block and the submitter record.
    pub fn write(&self, out: &mut dyn Write, timestamp: NaiveDateTime) -> io::Result<()> {
        writeln!(out, "0 HEAD")?;
        writeln!(out, "1 SOUR CSV2GEDCOM")?;
        writeln!(out, "2 VERS {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "2 NAME {}", env!("CARGO_PKG_NAME"))?;
        writeln!(out, "1 DATE {}", header_date(timestamp))?;
        writeln!(out, "2 TIME {}", timestamp.format("%H:%M:%S"))?;
        writeln!(out, "1 DEST {}", self.destination)?;
        writeln!(out, "1 SUBM @SUBM1@")?;
        writeln!(out, "1 FILE {}", self.file_name)?;
        if let Some(copyright) = &self.copyright {
            writeln!(out, "1 COPR {copyright}")?;
        }
        writeln!(out, "1 GEDC")?;
        writeln!(out, "2 VERS {GEDCOM_VERSION}")?;
        writeln!(out, "2 FORM LINEAGE-LINKED")?;
        writeln!(out, "1 CHAR UTF-8")?;
        writeln!(out, "1 LANG {}", self.language)?;
        writeln!(out, "1 NOTE {}", DISCLAIMER[0])?;
        for line in &DISCLAIMER[1..] {
            writeln!(out, "2 CONT {line}")?;
        }

        let s = &self.submitter;
        writeln!(out)?;
        writeln!(out, "0 @SUBM1@ SUBM")?;
        writeln!(out, "1 NAME {}", s.name)?;
        if let Some((first, rest)) = s.address.split_first() {
            writeln!(out, "1 ADDR {first}")?;
            for line in rest {
                writeln!(out, "2 CONT {line}")?;
            }
        }
        if let Some(phone) = &s.phone {
            writeln!(out, "1 PHON {phone}")?;
        }
        if let Some(email) = &s.email {
            writeln!(out, "1 EMAIL {email}")?;
        }
        Ok(())
    }
}

pub fn write_trailer(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "0 TRLR")
}

/// `DD MON YYYY`, uppercase.
pub fn header_date(timestamp: NaiveDateTime) -> String {
    timestamp.format("%d %b %Y").to_string().to_uppercase()
}

/// Uppercase the date and replace local month names with English ones.
pub fn render_date(date: &str) -> String {
    MONTH_TRANSLATIONS
        .iter()
        .fold(date.to_uppercase(), |d, (from, to)| d.replace(from, to))
}

/// Non-empty place components joined by `", "`, or `None` if all are empty.
pub fn render_place(city: &str, county: &str, state: &str) -> Option<String> {
    let place = [city, county, state]
        .into_iter()
        .filter(|s| !s.is_empty())
        .join(", ");
    if place.is_empty() { None } else { Some(place) }
}

/// `0` is male, everything else female.
pub fn sex_code(sex: &str) -> char {
    if sex == "0" { 'M' } else { 'F' }
}
