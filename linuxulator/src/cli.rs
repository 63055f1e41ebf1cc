//! The `sysent-gen` command line front end of the generator

use std::{
    io,
    path::{
        Path,
        PathBuf,
    },
    process::ExitCode,
};

use sysgen::{
    Config,
    Emitter,
    Format,
    GenerateError,
    HeaderEmitter,
    Master,
    NamesEmitter,
    RustEmitter,
    Table,
};

use crate::logger::Logger;

#[derive(clap::ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Header,
    Names,
    Rust,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Header => Format::Header,
            OutputFormat::Names => Format::Names,
            OutputFormat::Rust => Format::Rust,
        }
    }
}

#[derive(clap::Parser, Debug)]
#[command(name = "sysent-gen", author, version, about = "Generates system call tables from a syscalls.master file", long_about = None)]
#[command(group(clap::ArgGroup::new("target").args(["output", "outdir"])))]
pub struct Args {
    /// The syscalls.master file
    #[arg(long)]
    pub master: PathBuf,

    /// The syscalls.conf file with the generator settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// The format to generate (default: header). With --outdir all formats are generated by default.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the output to this file instead of stdout
    #[arg(long, conflicts_with = "outdir")]
    pub output: Option<PathBuf>,

    /// Write every format into this directory under the file names from the config
    #[arg(long)]
    pub outdir: Option<PathBuf>,

    /// Fail if the output files are not up to date instead of writing them.
    /// Needs --output or --outdir.
    #[arg(long, default_value_t = false, requires = "target")]
    pub check: bool,
}

fn emit<E: Emitter>(logger: &Logger, emitter: &mut E, table: &Table) -> Result<String, GenerateError> {
    logger.debug(format!("Running the {} emitter", emitter.name()));
    Ok(sysgen::render(emitter, table)?)
}

fn render(logger: &Logger, table: &Table, config: &Config, format: Format) -> Result<String, GenerateError> {
    match format {
        Format::Header => emit(logger, &mut HeaderEmitter::new(config), table),
        Format::Names => emit(logger, &mut NamesEmitter::new(config), table),
        Format::Rust => emit(logger, &mut RustEmitter::new(), table),
    }
}

/// Write `content` to `path` or, when checking, compare it with the contents of `path`.
/// Returns whether the file is up to date. A missing file is out of date.
pub fn write_or_check(logger: &Logger, path: &Path, content: &str, check: bool) -> Result<bool, GenerateError> {
    if check {
        let current = match std::fs::read_to_string(path) {
            Ok(current) => current,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                logger.error(format!("{} does not exist", path.display()));
                return Ok(false);
            },
            Err(err) => return Err(GenerateError::IOError(io::Error::new(err.kind(), format!("{}: {}", path.display(), err)))),
        };

        if current != content {
            logger.error(format!("{} is out of date", path.display()));
            return Ok(false);
        }

        logger.info(format!("{} is up to date", path.display()));
    } else {
        std::fs::write(path, content)?;
        logger.info(format!("Wrote {}", path.display()));
    }

    Ok(true)
}

/// Run the generator as requested by `args`. Returns `false` when `--check` found stale files.
pub fn run(args: &Args, logger: &mut Logger) -> Result<bool, GenerateError> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    logger.set_title(format!("Parsing {}", args.master.display()));
    let master = Master::from_file(&args.master)?;
    let table = Table::build(&master, &config)?;
    logger.debug(format!("Parsed {} records into {} slots", master.records().len(), table.max_syscall()));

    let mut up_to_date = true;

    if let Some(outdir) = &args.outdir {
        let formats = match args.format {
            Some(format) => vec![Format::from(format)],
            None => Format::ALL.to_vec(),
        };

        if !args.check {
            std::fs::create_dir_all(outdir)?;
        }

        for format in formats {
            logger.set_title(format!("Generating {}", format));
            logger.set_prefix(format.to_string());
            let content = render(logger, &table, &config, format)?;
            up_to_date &= write_or_check(logger, &outdir.join(format.file_name(&config)), &content, args.check)?;
        }

        logger.clear_prefix();
    } else {
        let format = args.format.map(Format::from).unwrap_or(Format::Header);
        logger.set_title(format!("Generating {}", format));
        let content = render(logger, &table, &config, format)?;

        match &args.output {
            Some(path) => up_to_date = write_or_check(logger, path, &content, args.check)?,
            None => print!("{}", content),
        }
    }

    Ok(up_to_date)
}

/// Turn the outcome of [`run`] into the process exit status
pub fn exit_code(result: Result<bool, GenerateError>, logger: &Logger) -> ExitCode {
    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            logger.error(err.to_string());
            ExitCode::FAILURE
        },
    }
}
