use std::path::PathBuf;

use linuxulator::syscalls;
use rustc_hash::FxHashSet;
use sysgen::{
    Config,
    Format,
    Master,
    SlotKind,
    Table,
};

fn master_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../linuxulator/master")
}

fn load() -> (Master, Config) {
    let config = Config::from_file(master_dir().join("syscalls.conf")).unwrap();
    let master = Master::from_file(master_dir().join("syscalls.master")).unwrap();
    (master, config)
}

#[test]
fn test_numbers_are_dense() {
    let (master, config) = load();
    let table = Table::build(&master, &config).unwrap();

    assert_eq!(table.max_syscall(), 453);
    assert_eq!(table.max_syscall(), syscalls::MAXSYSCALL);

    for (i, slot) in table.slots().iter().enumerate() {
        assert_eq!(slot.number(), i as u64);
    }

    let highest = table.iter_bound().map(|slot| slot.number()).max().unwrap();
    assert_eq!(highest as usize + 1, table.max_syscall());
}

#[test]
fn test_names_are_unique() {
    let (master, config) = load();
    let table = Table::build(&master, &config).unwrap();
    let mut names = FxHashSet::default();
    let mut numbers = FxHashSet::default();

    for slot in table.iter_bound() {
        assert!(names.insert(slot.name()), "{} is bound twice", slot.name());
        assert!(numbers.insert(slot.number()));
        assert!((slot.number() as usize) < table.max_syscall());
    }

    assert_eq!(syscalls::BY_NAME.len(), names.len());
}

#[test]
fn test_generated_table_matches_master() {
    let (master, config) = load();
    let table = Table::build(&master, &config).unwrap();

    assert_eq!(syscalls::SYSENT.len(), table.slots().len());

    for (slot, entry) in table.slots().iter().zip(syscalls::SYSENT.iter()) {
        assert_eq!(slot.number(), entry.number());
        assert_eq!(slot.name(), entry.name());
        assert_eq!(slot.kind(), entry.kind());
        assert_eq!(slot.narg(), entry.narg());

        if slot.is_bound() {
            assert_eq!(syscalls::lookup(slot.name()), Some(slot.number()));
            assert_eq!(table.lookup(slot.name()), Some(slot.number()));
        } else {
            assert_eq!(table.lookup(slot.name()), None);
            assert!(matches!(entry.kind(), SlotKind::Unimplemented | SlotKind::Obsolete | SlotKind::Reserved));
            assert_eq!(entry.declaration(), None);
        }
    }

    let placeholders = syscalls::SYSENT.iter().filter(|entry| !entry.is_bound()).count();
    assert_eq!(placeholders, 156);
}

#[test]
fn test_deterministic() {
    let path = master_dir().join("syscalls.master");
    let (_, config) = load();

    for format in Format::ALL {
        let first = sysgen::generate(&path, &config, format).unwrap();
        let second = sysgen::generate(&path, &config, format).unwrap();
        assert_eq!(first, second, "{} output differs between runs", format);
    }
}

#[test]
fn test_header() {
    let (_, config) = load();
    let header = sysgen::generate(master_dir().join("syscalls.master"), &config, Format::Header).unwrap();

    assert!(header.contains("\t\t\t\t/* 0 is unimplemented linux_io_setup */\n"));
    assert!(header.contains("#define\tLINUX_SYS_linux_setxattr\t5\n"));
    assert!(header.contains("#define\tLINUX_SYS_read\t63\n"));
    assert!(header.contains("#define\tLINUX_SYS_linux_write\t64\n"));
    assert!(header.contains("\t\t\t\t/* 244 is unimplemented unimpl_md_syscall */\n"));
    assert!(header.contains("#define\tLINUX_SYS_linux_fchmodat2\t452\n"));
    assert!(header.ends_with("#define\tLINUX_SYS_MAXSYSCALL\t453\n"));
    assert_eq!(header.matches("#define").count(), 297 + 1);
}

#[test]
fn test_header_matches_published_table() {
    let (_, config) = load();
    let header = sysgen::generate(master_dir().join("syscalls.master"), &config, Format::Header).unwrap();
    let published = include_str!("linux_syscall.h");

    for (i, (generated, expected)) in header.lines().zip(published.lines()).enumerate() {
        assert_eq!(generated, expected, "line {} differs", i + 1);
    }
    assert_eq!(header, published);
}

#[test]
fn test_names() {
    let (_, config) = load();
    let names = sysgen::generate(master_dir().join("syscalls.master"), &config, Format::Names).unwrap();

    assert!(names.contains("const char *linux_syscallnames[] = {\n"));
    assert!(names.contains("\t\"#0\",\t\t\t/* 0 = unimplemented linux_io_setup */\n"));
    assert!(names.contains("\t\"linux_write\",\t\t\t/* 64 = linux_write */\n"));
    assert!(names.ends_with("};\n"));
}
