use std::path::PathBuf;

use sysgen::{
    Config,
    Format,
};

const MASTER: &str = "master/syscalls.master";
const CONFIG: &str = "master/syscalls.conf";

fn main() {
    println!("cargo:rerun-if-changed={}", MASTER);
    println!("cargo:rerun-if-changed={}", CONFIG);

    let config = match Config::from_file(CONFIG) {
        Ok(config) => config,
        Err(err) => panic!("{}: {}", CONFIG, err),
    };

    let module = match sysgen::generate(MASTER, &config, Format::Rust) {
        Ok(module) => module,
        Err(err) => panic!("{}: {}", MASTER, err),
    };

    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").unwrap());
    std::fs::write(out_dir.join("syscalls.rs"), module).unwrap();
}
