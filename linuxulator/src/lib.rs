//! <h1 align="center"> 🐧 linuxulator 🐧 </h1><hr/>
//!
//! The ARM64 Linux system call table and a dispatcher for emulators.
//!
//! [`syscalls`] holds the system call numbers, generated at build time from `master/syscalls.master`.
//! A [`Dispatcher`] routes the numbers to handlers and answers everything else with `ENOSYS`.
//!
//! ```
//! use linuxulator::{
//!     syscalls,
//!     Dispatcher,
//!     LinuxError,
//!     SyscallArgs,
//! };
//!
//! let mut dispatcher = Dispatcher::<u64>::new();
//! dispatcher.register(syscalls::getpid, |pid, _| Ok(*pid)).unwrap();
//!
//! let mut pid = 1;
//! assert_eq!(dispatcher.dispatch(&mut pid, syscalls::getpid, &SyscallArgs::default()), Ok(1));
//! assert_eq!(dispatcher.dispatch(&mut pid, syscalls::read, &SyscallArgs::default()), Err(LinuxError::NoSys));
//! ```

mod dispatch;
mod errno;
mod logger;
mod sysent;

/* The interface: */
pub mod abi;
pub mod cli;
pub mod syscalls;

pub use abi::{
    Aarch64Registers,
    GpRegister,
    RegisterFile,
    SyscallArgs,
};
pub use dispatch::{
    DispatchError,
    Dispatcher,
    Handler,
};
pub use errno::{
    decode_return,
    encode_return,
    LinuxError,
    MAX_ERRNO,
};
pub use logger::Logger;
pub use sysent::{
    SlotKind,
    Sysent,
};
