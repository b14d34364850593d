//! Fatal errors of a conversion.
//!
//! Data-quality problems that do not stop the conversion are
//! [diagnostics](crate::diagnostics) instead.

use serde::Serialize;
use std::{error, fmt, result};

/// Result of reading input and writing GEDCOM output.
pub type Result<T> = result::Result<T, Box<dyn error::Error>>;

/// A CSV file that cannot be converted: a required column is missing or a row is malformed.
#[derive(Debug)]
pub struct InvalidInput(pub String);

/// A command line value that cannot go into the GEDCOM header.
#[derive(Debug)]
pub struct InvalidArgument(pub String);

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid input: {}", self.0)
    }
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid argument: {}", self.0)
    }
}

impl error::Error for InvalidInput {}

impl error::Error for InvalidArgument {}

/// A helper for constructing [InvalidInput].
pub fn invalid_input(s: String) -> Box<dyn error::Error> {
    InvalidInput(s).into()
}

/// A helper for constructing [InvalidArgument].
pub fn invalid_argument(s: String) -> Box<dyn error::Error> {
    InvalidArgument(s).into()
}

/// Fatal error as stored in an error report file.
#[derive(Serialize)]
pub struct OError {
    pub error: String,
}
