use thiserror::Error;

/// Largest errno a system call can return. Return values in
/// `[-MAX_ERRNO, -1]` are errors, everything else is a result.
pub const MAX_ERRNO: i64 = 4095;

/// Errors a system call handler reports back to the emulated program
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinuxError {
    #[error("Operation not permitted")]
    Perm,

    #[error("No such file or directory")]
    NoEnt,

    #[error("No such process")]
    Srch,

    #[error("Interrupted system call")]
    Intr,

    #[error("I/O error")]
    Io,

    #[error("Bad file descriptor")]
    BadF,

    #[error("Resource temporarily unavailable")]
    Again,

    #[error("Out of memory")]
    NoMem,

    #[error("Permission denied")]
    Acces,

    #[error("Bad address")]
    Fault,

    #[error("File exists")]
    Exist,

    #[error("Not a directory")]
    NotDir,

    #[error("Is a directory")]
    IsDir,

    #[error("Invalid argument")]
    Inval,

    #[error("Too many open files")]
    MFile,

    #[error("No space left on device")]
    NoSpc,

    #[error("Illegal seek")]
    SPipe,

    #[error("Result out of range")]
    Range,

    #[error("Function not implemented")]
    NoSys,

    #[error("errno {0}")]
    Other(i32),
}

impl LinuxError {
    pub fn errno(&self) -> i32 {
        match self {
            LinuxError::Perm => 1,
            LinuxError::NoEnt => 2,
            LinuxError::Srch => 3,
            LinuxError::Intr => 4,
            LinuxError::Io => 5,
            LinuxError::BadF => 9,
            LinuxError::Again => 11,
            LinuxError::NoMem => 12,
            LinuxError::Acces => 13,
            LinuxError::Fault => 14,
            LinuxError::Exist => 17,
            LinuxError::NotDir => 20,
            LinuxError::IsDir => 21,
            LinuxError::Inval => 22,
            LinuxError::MFile => 24,
            LinuxError::NoSpc => 28,
            LinuxError::SPipe => 29,
            LinuxError::Range => 34,
            LinuxError::NoSys => 38,
            LinuxError::Other(errno) => *errno,
        }
    }

    pub fn from_errno(errno: i32) -> Self {
        match errno {
            1 => LinuxError::Perm,
            2 => LinuxError::NoEnt,
            3 => LinuxError::Srch,
            4 => LinuxError::Intr,
            5 => LinuxError::Io,
            9 => LinuxError::BadF,
            11 => LinuxError::Again,
            12 => LinuxError::NoMem,
            13 => LinuxError::Acces,
            14 => LinuxError::Fault,
            17 => LinuxError::Exist,
            20 => LinuxError::NotDir,
            21 => LinuxError::IsDir,
            22 => LinuxError::Inval,
            24 => LinuxError::MFile,
            28 => LinuxError::NoSpc,
            29 => LinuxError::SPipe,
            34 => LinuxError::Range,
            38 => LinuxError::NoSys,
            errno => LinuxError::Other(errno),
        }
    }

    /// The value of `x0` after a failed system call. Errnos outside of
    /// `1..=MAX_ERRNO` would read as success and are reported as `EINVAL`.
    pub fn encode(&self) -> u64 {
        let errno = self.errno() as i64;

        if (1..=MAX_ERRNO).contains(&errno) {
            (-errno) as u64
        } else {
            LinuxError::Inval.encode()
        }
    }
}

/// Turn the result of a handler into the value of `x0`
pub fn encode_return(result: Result<u64, LinuxError>) -> u64 {
    match result {
        Ok(value) => value,
        Err(err) => err.encode(),
    }
}

/// Split a raw `x0` value into a result or an error
pub fn decode_return(value: u64) -> Result<u64, LinuxError> {
    let signed = value as i64;

    if (-MAX_ERRNO..0).contains(&signed) {
        Err(LinuxError::from_errno(-signed as i32))
    } else {
        Ok(value)
    }
}
