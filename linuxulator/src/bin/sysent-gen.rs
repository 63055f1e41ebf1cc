//! Generates the system call table files from a `syscalls.master` file

use std::process::ExitCode;

use clap::Parser;
use linuxulator::{
    cli::{
        self,
        Args,
    },
    Logger,
};

fn main() -> ExitCode {
    let args = Args::parse();
    let mut logger = Logger::spinner();
    let result = cli::run(&args, &mut logger);
    cli::exit_code(result, &logger)
}
