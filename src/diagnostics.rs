//! Recoverable data-quality problems found while writing the output.
//!
//! These never interrupt the conversion. They are handed to a
//! [DiagnosticSink] instead of being written into the GEDCOM stream.

use log::warn;
use std::fmt;

/// Which parent slot of a family a reference came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Father,
    Mother,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Role::Father => write!(f, "father"),
            Role::Mother => write!(f, "mother"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// A family refers to a parent ID that has no row of its own.
    MissingParent { id: String, role: Role },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Diagnostic::MissingParent { id, role } => {
                write!(f, "missing individual {id} registered as {role}")
            }
        }
    }
}

pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics in memory.
impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Reports diagnostics as log warnings.
#[derive(Default)]
pub struct LogSink {
    pub reported: usize,
}

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.reported += 1;
        warn!(target: "csv2gedcom", "{diagnostic}");
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_parent_message() {
        let d = Diagnostic::MissingParent {
            id: "X".to_owned(),
            role: Role::Father,
        };
        assert_eq!(d.to_string(), "missing individual X registered as father");
        let d = Diagnostic::MissingParent {
            id: "17".to_owned(),
            role: Role::Mother,
        };
        assert_eq!(d.to_string(), "missing individual 17 registered as mother");
    }

    #[test]
    fn log_sink_counts() {
        let mut sink = LogSink::default();
        sink.report(Diagnostic::MissingParent {
            id: "X".to_owned(),
            role: Role::Mother,
        });
        assert_eq!(sink.reported, 1);
    }
}
