//! The ARM64 Linux system call convention

use crate::errno::LinuxError;

/// The general purpose registers of the AArch64 ISA
#[allow(missing_docs)]
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[repr(usize)]
pub enum GpRegister {
    x0,
    x1,
    x2,
    x3,
    x4,
    x5,
    x6,
    x7,
    x8,
    x9,
    x10,
    x11,
    x12,
    x13,
    x14,
    x15,
    x16,
    x17,
    x18,
    x19,
    x20,
    x21,
    x22,
    x23,
    x24,
    x25,
    x26,
    x27,
    x28,
    x29,
    x30,
}

impl GpRegister {
    pub const COUNT: usize = 31;

    pub fn from_usize(number: usize) -> Self {
        assert!(number < Self::COUNT);
        unsafe { std::mem::transmute::<usize, GpRegister>(number) }
    }
}

/* syscall related registers */
/// The general purpose register that holds the syscall number
#[allow(non_upper_case_globals)]
pub const syscall_number: GpRegister = GpRegister::x8;
/// The general purpose registers that hold the syscall arguments
#[allow(non_upper_case_globals)]
pub const syscall_args: [GpRegister; 6] = [GpRegister::x0, GpRegister::x1, GpRegister::x2, GpRegister::x3, GpRegister::x4, GpRegister::x5];
/// The general purpose register that receives the return value or the negated errno
#[allow(non_upper_case_globals)]
pub const syscall_return: GpRegister = GpRegister::x0;

/// Access to the register state of an emulated AArch64 thread
pub trait Aarch64Registers {
    /// Retrieve the value of a general purpose register
    fn get_gp_register(&self, register: GpRegister) -> u64;
    /// Store a value into a general purpose register
    fn set_gp_register(&mut self, register: GpRegister, value: u64);
}

/// A plain array of the general purpose registers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterFile {
    gp: [u64; GpRegister::COUNT],
}

impl RegisterFile {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Aarch64Registers for RegisterFile {
    fn get_gp_register(&self, register: GpRegister) -> u64 {
        self.gp[register as usize]
    }

    fn set_gp_register(&mut self, register: GpRegister, value: u64) {
        self.gp[register as usize] = value;
    }
}

/// The arguments of a system call, as found in `x0..x5`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyscallArgs {
    args: [u64; 6],
}

impl SyscallArgs {
    pub fn new(args: [u64; 6]) -> Self {
        Self {
            args,
        }
    }

    pub fn from_registers<R: Aarch64Registers + ?Sized>(regs: &R) -> Self {
        let mut args = [0; 6];

        for (arg, register) in args.iter_mut().zip(syscall_args) {
            *arg = regs.get_gp_register(register);
        }

        Self {
            args,
        }
    }

    /// The raw value of the `index`th argument
    pub fn get(&self, index: usize) -> u64 {
        self.args[index]
    }

    /// The `index`th argument truncated to 32 bits, like an `int` or `unsigned int` parameter
    pub fn get_u32(&self, index: usize) -> u32 {
        self.args[index] as u32
    }

    pub fn get_i32(&self, index: usize) -> i32 {
        self.args[index] as u32 as i32
    }

    /// The `index`th argument as a file descriptor
    pub fn fd(&self, index: usize) -> Result<i32, LinuxError> {
        let fd = self.get_i32(index);

        if fd < 0 {
            Err(LinuxError::BadF)
        } else {
            Ok(fd)
        }
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.args
    }
}
