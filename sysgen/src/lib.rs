//! Generator for system call tables.
//!
//! A `syscalls.master` file lists every system call number of an ABI together
//! with its declaration. This crate parses it, checks that the numbers form a
//! dense range with unique names and renders the result as a C header, a C
//! names array or a Rust module.
//!
//! ```no_run
//! use sysgen::{Config, Format};
//!
//! let config = Config::from_file("syscalls.conf").unwrap();
//! let header = sysgen::generate("syscalls.master", &config, Format::Header).unwrap();
//! print!("{}", header);
//! ```

mod config;
mod emit;
mod master;
mod table;

use std::path::Path;

use thiserror::Error;

pub use config::{
    Config,
    ConfigBuilder,
    ConfigError,
};
pub use emit::{
    render,
    Emitter,
    Format,
    HeaderEmitter,
    NamesEmitter,
    RustEmitter,
};
pub use master::{
    Arg,
    Declaration,
    Master,
    ParseError,
    Record,
    RecordBody,
    SlotKind,
    MAX_ARGS,
    MAX_RANGE,
};
pub use table::{
    Slot,
    Table,
    TableError,
};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Invalid config: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Invalid master file: {0}")]
    ParseError(#[from] ParseError),

    #[error("Invalid system call table: {0}")]
    TableError(#[from] TableError),

    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
}

/// Parse the master file at `path` and render it in `format`
pub fn generate<P: AsRef<Path>>(path: P, config: &Config, format: Format) -> Result<String, GenerateError> {
    let master = Master::from_file(path)?;
    generate_from(&master, config, format)
}

/// Like [`generate`] but takes the contents of the master file
pub fn generate_str(text: &str, config: &Config, format: Format) -> Result<String, GenerateError> {
    let master = Master::parse(text)?;
    generate_from(&master, config, format)
}

fn generate_from(master: &Master, config: &Config, format: Format) -> Result<String, GenerateError> {
    let table = Table::build(master, config)?;

    let output = match format {
        Format::Header => render(&mut HeaderEmitter::new(config), &table)?,
        Format::Names => render(&mut NamesEmitter::new(config), &table)?,
        Format::Rust => render(&mut RustEmitter::new(), &table)?,
    };

    Ok(output)
}
