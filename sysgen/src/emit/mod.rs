mod header;
mod names;
mod rust;

use std::io::{
    self,
    Write,
};

pub use header::HeaderEmitter;
pub use names::NamesEmitter;
pub use rust::RustEmitter;

use crate::{
    config::Config,
    table::Table,
};

pub(crate) const GENERATED_NOTICE: &str = "DO NOT EDIT-- this file is automatically @generated.";

/// An emitter turns a [`Table`] into one output format.
///
/// Emitters must be deterministic: the same table always produces the same bytes.
pub trait Emitter {
    /// The name of the emitter (displayed on the terminal)
    fn name(&self) -> String;

    /// Write the complete output for `table` into `out`
    fn emit<W: Write>(&mut self, table: &Table, out: &mut W) -> io::Result<()>;
}

/// The output formats the generator supports
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// C header with one constant per system call
    Header,
    /// C array of system call names
    Names,
    /// Rust module with constants and the slot table
    Rust,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Header, Format::Names, Format::Rust];

    /// The output file name the config selects for this format
    pub fn file_name<'a>(&self, config: &'a Config) -> &'a str {
        match self {
            Format::Header => config.syshdr(),
            Format::Names => config.sysnames(),
            Format::Rust => config.sysrs(),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Header => write!(f, "header"),
            Format::Names => write!(f, "names"),
            Format::Rust => write!(f, "rust"),
        }
    }
}

/// Emit `table` in the given format into a string
pub fn render<E: Emitter>(emitter: &mut E, table: &Table) -> io::Result<String> {
    let mut buf = Vec::new();
    emitter.emit(table, &mut buf)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
