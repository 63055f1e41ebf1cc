use std::io::{
    self,
    Write,
};

use crate::{
    config::Config,
    emit::{
        header::placeholder_description,
        Emitter,
        GENERATED_NOTICE,
    },
    table::Table,
};

/// Emits a C array that maps every system call number to a printable name.
/// Placeholders are named `#<number>`.
pub struct NamesEmitter {
    array: String,
}

impl NamesEmitter {
    pub fn new(config: &Config) -> Self {
        Self {
            array: config.names_name().to_string(),
        }
    }
}

impl Emitter for NamesEmitter {
    fn name(&self) -> String {
        "names".to_string()
    }

    fn emit<W: Write>(&mut self, table: &Table, out: &mut W) -> io::Result<()> {
        writeln!(out, "/*")?;
        writeln!(out, " * System call names.")?;
        writeln!(out, " *")?;
        writeln!(out, " * {}", GENERATED_NOTICE)?;
        writeln!(out, " */")?;
        writeln!(out)?;
        writeln!(out, "const char *{}[] = {{", self.array)?;

        for slot in table.slots() {
            if slot.is_bound() {
                writeln!(out, "\t\"{}\",\t\t\t/* {} = {} */", slot.name(), slot.number(), slot.name())?;
            } else {
                writeln!(
                    out,
                    "\t\"#{}\",\t\t\t/* {} = {} {} */",
                    slot.number(),
                    slot.number(),
                    placeholder_description(slot.kind()),
                    slot.name()
                )?;
            }
        }

        writeln!(out, "}};")
    }
}
