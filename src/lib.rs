pub mod diagnostics;
pub mod emitter;
pub mod errors;
pub mod family;
pub mod gedcom;
mod information;
pub mod input;
