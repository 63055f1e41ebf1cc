use std::path::PathBuf;

use clap::Parser;
use linuxulator::{
    cli::{
        self,
        Args,
    },
    Logger,
};
use sysgen::{
    GenerateError,
    ParseError,
};

fn master_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../linuxulator/master")
}

/// A fresh scratch directory for one test
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("linuxulator-cli-{}-{}", std::process::id(), name));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn args(extra: &[&str]) -> Args {
    let master = master_dir().join("syscalls.master");
    let config = master_dir().join("syscalls.conf");
    let mut argv = vec![
        "sysent-gen".to_string(),
        "--master".to_string(),
        master.display().to_string(),
        "--config".to_string(),
        config.display().to_string(),
    ];
    argv.extend(extra.iter().map(|arg| arg.to_string()));
    Args::try_parse_from(argv).unwrap()
}

fn run(args: &Args) -> Result<bool, GenerateError> {
    cli::run(args, &mut Logger::plain())
}

#[test]
fn test_outdir_writes_every_format() {
    let dir = scratch("outdir");
    let outdir = dir.join("out");
    let outdir = outdir.to_str().unwrap();

    assert!(run(&args(&["--outdir", outdir])).unwrap());

    let header = std::fs::read_to_string(dir.join("out/linux_syscall.h")).unwrap();
    assert_eq!(header, include_str!("../table/linux_syscall.h"));
    assert!(std::fs::read_to_string(dir.join("out/linux_syscalls.c")).unwrap().contains("const char *linux_syscallnames[] = {\n"));
    assert!(std::fs::read_to_string(dir.join("out/syscalls.rs")).unwrap().contains("pub const MAXSYSCALL: usize = 453;\n"));

    /* fresh output is up to date */
    assert!(run(&args(&["--outdir", outdir, "--check"])).unwrap());

    /* a stale file fails the check */
    std::fs::write(dir.join("out/linux_syscalls.c"), "stale").unwrap();
    assert!(!run(&args(&["--outdir", outdir, "--check"])).unwrap());
    assert_eq!(std::fs::read_to_string(dir.join("out/linux_syscalls.c")).unwrap(), "stale");

    /* only the selected format is checked */
    assert!(run(&args(&["--outdir", outdir, "--format", "header", "--check"])).unwrap());

    /* a missing file fails the check */
    std::fs::remove_file(dir.join("out/syscalls.rs")).unwrap();
    assert!(!run(&args(&["--outdir", outdir, "--format", "rust", "--check"])).unwrap());
    assert!(!dir.join("out/syscalls.rs").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_output_defaults_to_header() {
    let dir = scratch("output");
    let output = dir.join("table.h");
    let output = output.to_str().unwrap();

    assert!(run(&args(&["--output", output])).unwrap());
    assert_eq!(std::fs::read_to_string(output).unwrap(), include_str!("../table/linux_syscall.h"));
    assert!(run(&args(&["--output", output, "--check"])).unwrap());
    assert!(!run(&args(&["--output", output, "--format", "names", "--check"])).unwrap());

    let missing = dir.join("missing.h");
    assert!(!run(&args(&["--output", missing.to_str().unwrap(), "--check"])).unwrap());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_check_propagates_io_errors() {
    let dir = scratch("ioerror");

    /* reading a directory fails with something other than NotFound */
    let result = run(&args(&["--output", dir.to_str().unwrap(), "--check"]));
    assert!(matches!(result, Err(GenerateError::IOError(_))));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_failures() {
    let result = cli::run(
        &Args::try_parse_from(["sysent-gen", "--master", "/nonexistent/syscalls.master"]).unwrap(),
        &mut Logger::plain(),
    );
    assert!(matches!(result, Err(GenerateError::ParseError(ParseError::IOError(_)))));

    /* --check needs something to compare against */
    assert!(Args::try_parse_from(["sysent-gen", "--master", "syscalls.master", "--check"]).is_err());
    assert!(Args::try_parse_from(["sysent-gen", "--master", "m", "--output", "a", "--outdir", "b"]).is_err());
    assert!(Args::try_parse_from(["sysent-gen", "--master", "m", "--format", "yaml"]).is_err());
}
