use std::io::{
    self,
    Write,
};

use crate::{
    config::Config,
    emit::{
        Emitter,
        GENERATED_NOTICE,
    },
    master::SlotKind,
    table::Table,
};

pub(crate) fn placeholder_description(kind: SlotKind) -> &'static str {
    match kind {
        SlotKind::Obsolete => "obsolete",
        SlotKind::Reserved => "reserved",
        _ => "unimplemented",
    }
}

/// Emits the C header: one `#define` per bound slot, a comment per placeholder
/// and the `MAXSYSCALL` sentinel.
pub struct HeaderEmitter {
    prefix: String,
}

impl HeaderEmitter {
    pub fn new(config: &Config) -> Self {
        Self {
            prefix: config.syscall_prefix().to_string(),
        }
    }
}

impl Emitter for HeaderEmitter {
    fn name(&self) -> String {
        "header".to_string()
    }

    fn emit<W: Write>(&mut self, table: &Table, out: &mut W) -> io::Result<()> {
        writeln!(out, "/*")?;
        writeln!(out, " * System call numbers.")?;
        writeln!(out, " *")?;
        writeln!(out, " * {}", GENERATED_NOTICE)?;
        writeln!(out, " */")?;
        writeln!(out)?;

        for slot in table.slots() {
            if slot.is_bound() {
                writeln!(out, "#define\t{}{}\t{}", self.prefix, slot.name(), slot.number())?;
            } else {
                writeln!(out, "\t\t\t\t/* {} is {} {} */", slot.number(), placeholder_description(slot.kind()), slot.name())?;
            }
        }

        writeln!(out, "#define\t{}MAXSYSCALL\t{}", self.prefix, table.max_syscall())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        emit::render,
        master::Master,
    };

    #[test]
    fn test_header() {
        let config = Config::builder().syscall_prefix("LINUX_SYS_").build();
        let master = Master::parse(
            "0\tAUE_NULL\tUNIMPL\tlinux_io_setup\n\
             1\tAUE_NULL\tSTD\t{ long linux_setxattr(const char *path); }\n\
             2\tAUE_NULL\tOBSOL\tlinux_old\n\
             3\tAUE_NULL\tRESERVED\tlinux_future\n",
        )
        .unwrap();
        let table = Table::build(&master, &config).unwrap();
        let header = render(&mut HeaderEmitter::new(&config), &table).unwrap();

        assert_eq!(
            header,
            "/*\n * System call numbers.\n *\n * DO NOT EDIT-- this file is automatically @generated.\n */\n\n\
             \t\t\t\t/* 0 is unimplemented linux_io_setup */\n\
             #define\tLINUX_SYS_linux_setxattr\t1\n\
             \t\t\t\t/* 2 is obsolete linux_old */\n\
             \t\t\t\t/* 3 is reserved linux_future */\n\
             #define\tLINUX_SYS_MAXSYSCALL\t4\n"
        );
    }
}
