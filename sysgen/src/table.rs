use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{
    config::Config,
    master::{
        Declaration,
        Master,
        SlotKind,
    },
};

/// Names the generated Rust module defines next to the per-syscall constants
const RESERVED_IDENTS: &[&str] = &["MAXSYSCALL", "SYSENT", "BY_NAME", "lookup", "sysent", "Sysent", "SlotKind"];

const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do", "dyn", "else", "enum", "extern", "false",
    "final", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized", "use", "virtual", "where",
    "while", "yield",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("The master file does not contain any system calls")]
    Empty,

    #[error("line {line}: system call {number} is missing, numbers must be contiguous")]
    Gap { line: usize, number: u64 },

    #[error("line {line}: system call {number} is already assigned")]
    DuplicateNumber { line: usize, number: u64 },

    #[error("line {line}: '{name}' is already bound to system call {previous}")]
    DuplicateName { line: usize, name: String, previous: u64 },

    #[error("line {line}: identifier '{ident}' of '{name}' collides with another entry")]
    DuplicateIdent { line: usize, ident: String, name: String },

    #[error("line {line}: '{name}' cannot be used as a Rust identifier")]
    InvalidIdent { line: usize, name: String },
}

/// One slot of the table. Every number in `0..MAXSYSCALL` has exactly one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    number: u64,
    kind: SlotKind,
    audit: String,
    name: String,
    ident: Option<String>,
    declaration: Option<Declaration>,
}

impl Slot {
    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    pub fn is_bound(&self) -> bool {
        self.kind.is_bound()
    }

    pub fn audit(&self) -> &str {
        &self.audit
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The Rust identifier of a bound slot
    pub fn ident(&self) -> Option<&str> {
        self.ident.as_deref()
    }

    pub fn declaration(&self) -> Option<&Declaration> {
        self.declaration.as_ref()
    }

    pub fn narg(&self) -> usize {
        self.declaration.as_ref().map(|decl| decl.args().len()).unwrap_or(0)
    }
}

fn rust_ident(name: &str, prefix: &str) -> Option<String> {
    let stripped = match name.strip_prefix(prefix) {
        Some(stripped) if !prefix.is_empty() && !stripped.is_empty() => stripped,
        _ => name,
    };

    if stripped.starts_with(|c: char| c.is_ascii_digit()) || matches!(stripped, "self" | "Self" | "super" | "crate" | "_") {
        None
    } else if RUST_KEYWORDS.contains(&stripped) {
        Some(format!("r#{}", stripped))
    } else {
        Some(stripped.to_string())
    }
}

/// The validated, dense system call table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    slots: Vec<Slot>,
}

impl Table {
    pub fn build(master: &Master, config: &Config) -> Result<Self, TableError> {
        let mut slots = Vec::new();
        let mut names = FxHashMap::<&str, u64>::default();
        let mut idents = FxHashMap::<String, u64>::default();

        for ident in RESERVED_IDENTS {
            idents.insert(ident.to_string(), u64::MAX);
        }

        for record in master.records() {
            let expected = slots.len() as u64;

            if record.first() > expected {
                return Err(TableError::Gap {
                    line: record.line(),
                    number: expected,
                });
            } else if record.first() < expected {
                return Err(TableError::DuplicateNumber {
                    line: record.line(),
                    number: record.first(),
                });
            }

            let ident = if record.kind().is_bound() {
                let name = record.name();

                if let Some(previous) = names.insert(name, record.first()) {
                    return Err(TableError::DuplicateName {
                        line: record.line(),
                        name: name.to_string(),
                        previous,
                    });
                }

                let ident = rust_ident(name, config.abi_func_prefix()).ok_or_else(|| TableError::InvalidIdent {
                    line: record.line(),
                    name: name.to_string(),
                })?;

                if idents.insert(ident.clone(), record.first()).is_some() {
                    return Err(TableError::DuplicateIdent {
                        line: record.line(),
                        ident,
                        name: name.to_string(),
                    });
                }

                Some(ident)
            } else {
                None
            };

            for number in record.first()..=record.last() {
                slots.push(Slot {
                    number,
                    kind: record.kind(),
                    audit: record.audit().to_string(),
                    name: record.name().to_string(),
                    ident: ident.clone(),
                    declaration: record.declaration().cloned(),
                });
            }
        }

        if slots.is_empty() {
            return Err(TableError::Empty);
        }

        Ok(Self {
            slots,
        })
    }

    /// The required size of any array indexed by system call number
    pub fn max_syscall(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, number: u64) -> Option<&Slot> {
        self.slots.get(usize::try_from(number).ok()?)
    }

    pub fn iter_bound(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|slot| slot.is_bound())
    }

    /// Bound slots sorted by name
    pub fn sorted_by_name(&self) -> Vec<&Slot> {
        let mut bound: Vec<&Slot> = self.iter_bound().collect();
        bound.sort_by(|a, b| a.name().cmp(b.name()));
        bound
    }

    pub fn lookup(&self, name: &str) -> Option<u64> {
        self.iter_bound().find(|slot| slot.name() == name).map(|slot| slot.number())
    }
}
