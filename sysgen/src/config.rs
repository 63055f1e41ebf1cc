use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("line {line}: expected key=\"value\"")]
    Syntax { line: usize },

    #[error("line {line}: missing closing quote")]
    UnterminatedQuote { line: usize },

    #[error("line {line}: unknown setting '{key}'")]
    UnknownKey { line: usize, key: String },

    #[error("IO error: {0}")]
    IOError(String),
}

/// Settings for the generator, usually read from a `syscalls.conf` file.
///
/// The file consists of shell-style assignments:
/// ```text
/// # comment
/// syscallprefix="LINUX_SYS_"
/// namesname="linux_syscallnames"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    sysnames: String,
    syshdr: String,
    sysrs: String,
    syscall_prefix: String,
    names_name: String,
    abi_func_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sysnames: "syscalls.c".to_string(),
            syshdr: "syscall.h".to_string(),
            sysrs: "syscalls.rs".to_string(),
            syscall_prefix: "SYS_".to_string(),
            names_name: "syscallnames".to_string(),
            abi_func_prefix: String::new(),
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder {
            config: Config::default(),
        }
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        for (i, line) in text.lines().enumerate() {
            let line_no = i + 1;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (key, value) = line.split_once('=').ok_or(ConfigError::Syntax {
                line: line_no,
            })?;
            let key = key.trim();
            let value = value.trim();

            let value = if let Some(quoted) = value.strip_prefix('"') {
                quoted.strip_suffix('"').ok_or(ConfigError::UnterminatedQuote {
                    line: line_no,
                })?
            } else if value.contains(char::is_whitespace) {
                return Err(ConfigError::Syntax {
                    line: line_no,
                });
            } else {
                value
            };
            let value = value.to_string();

            match key {
                "sysnames" => config.sysnames = value,
                "syshdr" => config.syshdr = value,
                "sysrs" => config.sysrs = value,
                "syscallprefix" => config.syscall_prefix = value,
                "namesname" => config.names_name = value,
                "abi_func_prefix" => config.abi_func_prefix = value,
                _ => {
                    return Err(ConfigError::UnknownKey {
                        line: line_no,
                        key: key.to_string(),
                    })
                },
            }
        }

        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IOError(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::parse(&text)
    }

    /// File name of the C names array
    pub fn sysnames(&self) -> &str {
        &self.sysnames
    }

    /// File name of the C header
    pub fn syshdr(&self) -> &str {
        &self.syshdr
    }

    /// File name of the Rust module
    pub fn sysrs(&self) -> &str {
        &self.sysrs
    }

    /// Prefix of every constant in the C header
    pub fn syscall_prefix(&self) -> &str {
        &self.syscall_prefix
    }

    /// Identifier of the C names array
    pub fn names_name(&self) -> &str {
        &self.names_name
    }

    /// Prefix that is stripped from names when deriving Rust identifiers
    pub fn abi_func_prefix(&self) -> &str {
        &self.abi_func_prefix
    }
}

/// Builds a [`Config`] without going through a `syscalls.conf` file.
/// Use [`Config::builder`] to create it.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the file name of the C names array (default: `syscalls.c`)
    pub fn sysnames<S: Into<String>>(mut self, name: S) -> Self {
        self.config.sysnames = name.into();
        self
    }

    /// Set the file name of the C header (default: `syscall.h`)
    pub fn syshdr<S: Into<String>>(mut self, name: S) -> Self {
        self.config.syshdr = name.into();
        self
    }

    /// Set the file name of the Rust module (default: `syscalls.rs`)
    pub fn sysrs<S: Into<String>>(mut self, name: S) -> Self {
        self.config.sysrs = name.into();
        self
    }

    /// Set the prefix of the constants in the C header (default: `SYS_`)
    pub fn syscall_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.config.syscall_prefix = prefix.into();
        self
    }

    /// Set the identifier of the C names array (default: `syscallnames`)
    pub fn names_name<S: Into<String>>(mut self, name: S) -> Self {
        self.config.names_name = name.into();
        self
    }

    /// Strip this prefix from names when deriving Rust identifiers (default: none)
    pub fn abi_func_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.config.abi_func_prefix = prefix.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
