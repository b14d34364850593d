//! Turning the rows into a GEDCOM file.

use crate::diagnostics::DiagnosticSink;
use crate::family::{FamilyAggregator, FamilyId, PersonId};
use crate::gedcom::{self, Header};
use crate::information::Statistics;
use crate::input::Person;
use chrono::{Local, NaiveDateTime};
use log::warn;
use std::collections::HashMap;
use std::io::{self, Write};

/// A lineage-linked view of the input rows, ready to be written out.
///
/// All IDs and families are computed in [Emitter::new]. Rendering does not
/// change the emitter, so it can be rendered any number of times.
pub struct Emitter<'a> {
    people: &'a [Person],
    ids: HashMap<&'a str, PersonId>,
    families: FamilyAggregator,
    header: Header,
}

impl<'a> Emitter<'a> {
    pub fn new(people: &'a [Person]) -> Emitter<'a> {
        Self::with_header(people, Header::default())
    }

    pub fn with_header(people: &'a [Person], header: Header) -> Emitter<'a> {
        Self::with_families(people, header, FamilyAggregator::new())
    }

    /// Build the emitter around a caller-supplied aggregator.
    ///
    /// `families` must be freshly constructed: the rows are recorded into it
    /// and its spouse index is built here.
    pub fn with_families(
        people: &'a [Person],
        header: Header,
        mut families: FamilyAggregator,
    ) -> Emitter<'a> {
        debug_assert!(families.is_empty(), "aggregator already has families");
        // If an ID occurs more than once, the last row wins.
        let mut ids = HashMap::new();
        for (i, person) in people.iter().enumerate() {
            if let Some(prev) = ids.insert(person.id.as_str(), i + 1) {
                warn!(
                    target: "csv2gedcom",
                    "duplicate ID {}: rows {} and {}, using row {}",
                    person.id,
                    prev,
                    i + 1,
                    i + 1
                );
            }
        }
        for person in people.iter().filter(|p| p.has_known_parent()) {
            families.record_child(
                person.father_id.as_deref(),
                person.mother_id.as_deref(),
                ids[person.id.as_str()],
            );
        }
        families.build_spouse_index();
        Statistics::gather(people, &ids, &families).log();
        Emitter {
            people,
            ids,
            families,
            header,
        }
    }

    pub fn internal_id(&self, id: &str) -> Option<PersonId> {
        self.ids.get(id).copied()
    }

    /// The family in which this person is a child.
    pub fn family_of_origin(&self, person: &Person) -> Option<FamilyId> {
        if !person.has_known_parent() {
            return None;
        }
        self.families
            .lookup_family(person.father_id.as_deref(), person.mother_id.as_deref())
            .map(|f| f.id)
    }

    pub fn families(&self) -> &FamilyAggregator {
        &self.families
    }

    /// Write the whole file, stamped with the current local time.
    pub fn render(
        &self,
        out: &mut dyn Write,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> io::Result<()> {
        self.render_at(Local::now().naive_local(), out, diagnostics)
    }

    /// Write the whole file: header, individuals, families, trailer.
    pub fn render_at(
        &self,
        timestamp: NaiveDateTime,
        out: &mut dyn Write,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> io::Result<()> {
        self.header.write(out, timestamp)?;
        for person in self.people {
            self.write_individual(person, out)?;
        }
        self.families
            .emit_family_records(&self.ids, out, diagnostics)?;
        gedcom::write_trailer(out)
    }

    fn write_individual(&self, person: &Person, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "0 @I{}@ INDI", self.ids[person.id.as_str()])?;
        writeln!(out, "1 NAME {} /{}/", person.given_names, person.surname)?;
        writeln!(out, "1 SEX {}", gedcom::sex_code(&person.sex))?;
        for event in person.events() {
            if event.date.is_empty() {
                continue;
            }
            writeln!(out, "1 {}", event.kind.tag())?;
            writeln!(out, "2 DATE {}", gedcom::render_date(event.date))?;
            if let Some(place) = gedcom::render_place(event.city, event.county, event.state) {
                writeln!(out, "2 PLAC {place}")?;
            }
        }
        if let Some(famc) = self.family_of_origin(person) {
            writeln!(out, "1 FAMC @F{famc}@")?;
        }
        for fams in self.families.spouse_families(&person.id) {
            writeln!(out, "1 FAMS @F{fams}@")?;
        }
        Ok(())
    }
}
