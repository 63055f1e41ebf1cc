pub use sysgen::SlotKind;

/// One slot of the system call table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sysent {
    number: u64,
    name: &'static str,
    kind: SlotKind,
    audit: &'static str,
    narg: u8,
    declaration: Option<&'static str>,
}

impl Sysent {
    pub const fn new(number: u64, name: &'static str, kind: SlotKind, audit: &'static str, narg: u8, declaration: Option<&'static str>) -> Self {
        Self {
            number,
            name,
            kind,
            audit,
            narg,
            declaration,
        }
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    /// The name from the master file. Placeholders share names like `unimpl_md_syscall`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    /// Whether the slot can be the target of a dispatch
    pub fn is_bound(&self) -> bool {
        self.kind.is_bound()
    }

    pub fn audit(&self) -> &'static str {
        self.audit
    }

    /// How many of `x0..x5` the system call reads
    pub fn narg(&self) -> usize {
        self.narg as usize
    }

    /// The C declaration of a bound slot
    pub fn declaration(&self) -> Option<&'static str> {
        self.declaration
    }
}
