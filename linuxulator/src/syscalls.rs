//! The ARM64 Linux system call numbers.
//!
//! Everything but [`lookup`] and [`sysent`] is generated from `master/syscalls.master`
//! at build time.

#![allow(non_upper_case_globals)]

use crate::sysent::{
    SlotKind,
    Sysent,
};

include!(concat!(env!("OUT_DIR"), "/syscalls.rs"));

/// Find the number of a bound system call by its name in the master file
pub fn lookup(name: &str) -> Option<u64> {
    BY_NAME.binary_search_by(|(probe, _)| (*probe).cmp(name)).ok().map(|idx| BY_NAME[idx].1)
}

/// Get the slot of a system call number. Placeholders are returned too.
pub fn sysent(number: u64) -> Option<&'static Sysent> {
    SYSENT.get(usize::try_from(number).ok()?)
}
