use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{
    abi::{
        syscall_number,
        syscall_return,
        Aarch64Registers,
        SyscallArgs,
    },
    errno::{
        encode_return,
        LinuxError,
    },
    logger::Logger,
    syscalls,
    sysent::SlotKind,
};

/// A system call handler. It gets the emulator state and the raw arguments.
pub type Handler<C> = fn(&mut C, &SyscallArgs) -> Result<u64, LinuxError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("System call number {0} is out of range")]
    OutOfRange(u64),

    #[error("System call {number} ({name}) is {kind} and cannot get a handler")]
    Placeholder { number: u64, name: &'static str, kind: SlotKind },

    #[error("System call {number} ({name}) already has a handler")]
    AlreadyRegistered { number: u64, name: &'static str },

    #[error("Unknown system call: {0}")]
    UnknownName(String),
}

/// Routes system calls to their handlers by number.
///
/// The dispatcher has exactly [`syscalls::MAXSYSCALL`] slots. Numbers without a handler,
/// placeholders and numbers beyond the table fail with `ENOSYS`.
pub struct Dispatcher<C> {
    handlers: Vec<Option<Handler<C>>>,
    misses: FxHashMap<u64, usize>,
    out_of_range: usize,
    logger: Logger,
}

impl<C> Dispatcher<C> {
    pub fn new() -> Self {
        Self::with_logger(Logger::plain())
    }

    /// Use `logger` to report system calls that have no handler
    pub fn with_logger(mut logger: Logger) -> Self {
        logger.set_prefix("dispatch");

        Self {
            handlers: (0..syscalls::MAXSYSCALL).map(|_| None).collect(),
            misses: FxHashMap::default(),
            out_of_range: 0,
            logger,
        }
    }

    pub fn register(&mut self, number: u64, handler: Handler<C>) -> Result<(), DispatchError> {
        let entry = syscalls::sysent(number).ok_or(DispatchError::OutOfRange(number))?;

        if !entry.is_bound() {
            return Err(DispatchError::Placeholder {
                number,
                name: entry.name(),
                kind: entry.kind(),
            });
        }

        let slot = &mut self.handlers[number as usize];

        if slot.is_some() {
            return Err(DispatchError::AlreadyRegistered {
                number,
                name: entry.name(),
            });
        }

        *slot = Some(handler);
        Ok(())
    }

    /// Like [`Dispatcher::register`] but takes the name from the master file, e.g. `linux_write`
    pub fn register_name(&mut self, name: &str, handler: Handler<C>) -> Result<(), DispatchError> {
        let number = syscalls::lookup(name).ok_or_else(|| DispatchError::UnknownName(name.to_string()))?;
        self.register(number, handler)
    }

    pub fn is_registered(&self, number: u64) -> bool {
        self.handler(number).is_some()
    }

    fn handler(&self, number: u64) -> Option<Handler<C>> {
        let idx = usize::try_from(number).ok()?;
        self.handlers.get(idx).copied().flatten()
    }

    /// Run the handler of `number`
    pub fn dispatch(&mut self, ctx: &mut C, number: u64, args: &SyscallArgs) -> Result<u64, LinuxError> {
        match self.handler(number) {
            Some(handler) => handler(ctx, args),
            None => {
                self.report_nosys(number);
                Err(LinuxError::NoSys)
            },
        }
    }

    /// Handle an `svc #0`: read the number from `x8` and the arguments from `x0..x5`,
    /// dispatch and store the result or the negated errno in `x0`.
    pub fn trap<R: Aarch64Registers + ?Sized>(&mut self, ctx: &mut C, regs: &mut R) -> Result<u64, LinuxError> {
        let number = regs.get_gp_register(syscall_number);
        let args = SyscallArgs::from_registers(regs);
        let result = self.dispatch(ctx, number, &args);
        regs.set_gp_register(syscall_return, encode_return(result));
        result
    }

    fn report_nosys(&mut self, number: u64) {
        /* numbers past the table share one counter, the guest picks them freely */
        let Some(entry) = syscalls::sysent(number) else {
            self.out_of_range += 1;

            if self.out_of_range == 1 {
                self.logger.warning(format!("System call number {} is out of range, returning ENOSYS (reported once)", number));
            }
            return;
        };

        let count = self.misses.entry(number).or_insert(0);
        *count += 1;

        if *count > 1 {
            return;
        }

        if entry.is_bound() {
            self.logger.warning(format!("No handler for system call {} ({}), returning ENOSYS", entry.name(), number));
        } else {
            self.logger.warning(format!("System call {} is {} ({}), returning ENOSYS", number, entry.kind(), entry.name()));
        }
    }

    /// How often `number` failed with `ENOSYS`. Numbers past the table are
    /// counted together in [`Dispatcher::nosys_out_of_range`].
    pub fn nosys_count(&self, number: u64) -> usize {
        self.misses.get(&number).copied().unwrap_or(0)
    }

    /// How often a number past the end of the table was dispatched
    pub fn nosys_out_of_range(&self) -> usize {
        self.out_of_range
    }

    /// The numbers below `MAXSYSCALL` that failed with `ENOSYS` so far, in ascending order
    pub fn nosys_numbers(&self) -> Vec<u64> {
        let mut numbers: Vec<u64> = self.misses.keys().copied().collect();
        numbers.sort_unstable();
        numbers
    }
}

impl<C> Default for Dispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}
