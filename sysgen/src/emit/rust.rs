use std::io::{
    self,
    Write,
};

use crate::{
    emit::{
        Emitter,
        GENERATED_NOTICE,
    },
    table::Table,
};

/// Emits a Rust module meant to be `include!`d into a module that has
/// `Sysent` and `SlotKind` in scope.
///
/// The module contains one `u64` constant per bound system call, `MAXSYSCALL`,
/// the dense `SYSENT` table and the `BY_NAME` index sorted by name.
#[derive(Default)]
pub struct RustEmitter {}

impl RustEmitter {
    pub fn new() -> Self {
        Self {}
    }
}

impl Emitter for RustEmitter {
    fn name(&self) -> String {
        "rust".to_string()
    }

    fn emit<W: Write>(&mut self, table: &Table, out: &mut W) -> io::Result<()> {
        writeln!(out, "// System call numbers.")?;
        writeln!(out, "//")?;
        writeln!(out, "// {}", GENERATED_NOTICE)?;
        writeln!(out)?;

        for slot in table.iter_bound() {
            if let (Some(ident), Some(decl)) = (slot.ident(), slot.declaration()) {
                writeln!(out, "/// `{}`", decl)?;
                writeln!(out, "pub const {}: u64 = {};", ident, slot.number())?;
            }
        }

        writeln!(out)?;
        writeln!(out, "/// Number of slots in [`SYSENT`], one more than the highest system call number")?;
        writeln!(out, "pub const MAXSYSCALL: usize = {};", table.max_syscall())?;
        writeln!(out)?;
        writeln!(out, "/// The system call table, indexed by number")?;
        writeln!(out, "pub static SYSENT: [Sysent; MAXSYSCALL] = [")?;

        for slot in table.slots() {
            let decl = match slot.declaration() {
                Some(decl) => format!("Some({:?})", decl.to_string()),
                None => "None".to_string(),
            };

            writeln!(
                out,
                "    Sysent::new({}, {:?}, {}, {:?}, {}, {}),",
                slot.number(),
                slot.name(),
                slot.kind().variant(),
                slot.audit(),
                slot.narg(),
                decl
            )?;
        }

        writeln!(out, "];")?;
        writeln!(out)?;

        let sorted = table.sorted_by_name();
        writeln!(out, "/// Bound system calls sorted by name")?;
        writeln!(out, "pub static BY_NAME: [(&str, u64); {}] = [", sorted.len())?;

        for slot in sorted {
            writeln!(out, "    ({:?}, {}),", slot.name(), slot.number())?;
        }

        writeln!(out, "];")
    }
}
