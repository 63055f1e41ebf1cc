use linuxulator::{
    decode_return,
    syscalls,
    Aarch64Registers,
    DispatchError,
    Dispatcher,
    GpRegister,
    LinuxError,
    RegisterFile,
    SyscallArgs,
};

/// A tiny emulated process that only knows how to write to stdout and exit
#[derive(Default)]
struct Process {
    stdout: Vec<u8>,
    memory: Vec<u8>,
    exit_code: Option<i32>,
}

fn write(process: &mut Process, args: &SyscallArgs) -> Result<u64, LinuxError> {
    if args.fd(0)? != 1 {
        return Err(LinuxError::BadF);
    }

    let start = args.get(1) as usize;
    let end = start.checked_add(args.get(2) as usize).ok_or(LinuxError::Fault)?;
    let data = process.memory.get(start..end).ok_or(LinuxError::Fault)?;
    process.stdout.extend_from_slice(data);
    Ok(data.len() as u64)
}

fn exit_group(process: &mut Process, args: &SyscallArgs) -> Result<u64, LinuxError> {
    process.exit_code = Some(args.get_i32(0));
    Ok(0)
}

fn svc(dispatcher: &mut Dispatcher<Process>, process: &mut Process, number: u64, args: [u64; 6]) -> Result<u64, LinuxError> {
    let mut regs = RegisterFile::new();
    regs.set_gp_register(GpRegister::x8, number);

    for (i, arg) in args.into_iter().enumerate() {
        regs.set_gp_register(GpRegister::from_usize(i), arg);
    }

    let result = dispatcher.trap(process, &mut regs);
    assert_eq!(decode_return(regs.get_gp_register(GpRegister::x0)), result);
    result
}

#[test]
fn test_hello_world() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.register_name("linux_write", write).unwrap();
    dispatcher.register(syscalls::exit_group, exit_group).unwrap();

    let mut process = Process {
        memory: b"Hello World!\n".to_vec(),
        ..Default::default()
    };

    assert_eq!(svc(&mut dispatcher, &mut process, syscalls::write, [1, 0, 13, 0, 0, 0]), Ok(13));
    assert_eq!(svc(&mut dispatcher, &mut process, syscalls::write, [2, 0, 13, 0, 0, 0]), Err(LinuxError::BadF));
    assert_eq!(svc(&mut dispatcher, &mut process, syscalls::write, [1, 10, 13, 0, 0, 0]), Err(LinuxError::Fault));
    assert_eq!(svc(&mut dispatcher, &mut process, syscalls::exit_group, [3, 0, 0, 0, 0, 0]), Ok(0));

    assert_eq!(process.stdout, b"Hello World!\n");
    assert_eq!(process.exit_code, Some(3));
}

#[test]
fn test_unsupported() {
    let mut dispatcher = Dispatcher::new();
    let mut process = Process::default();

    /* every slot without a handler fails gracefully */
    for number in 0..syscalls::MAXSYSCALL as u64 {
        assert_eq!(svc(&mut dispatcher, &mut process, number, [0; 6]), Err(LinuxError::NoSys));
        assert_eq!(dispatcher.nosys_count(number), 1);
    }

    for number in syscalls::MAXSYSCALL as u64..syscalls::MAXSYSCALL as u64 + 10 {
        assert_eq!(svc(&mut dispatcher, &mut process, number, [0; 6]), Err(LinuxError::NoSys));
        assert_eq!(dispatcher.nosys_count(number), 0);
    }
    assert_eq!(dispatcher.nosys_out_of_range(), 10);
    assert_eq!(dispatcher.nosys_numbers().len(), syscalls::MAXSYSCALL);

    assert_eq!(svc(&mut dispatcher, &mut process, syscalls::write, [1, 0, 0, 0, 0, 0]), Err(LinuxError::NoSys));
    assert_eq!(dispatcher.nosys_count(syscalls::write), 2);
}

#[test]
fn test_every_bound_slot_is_registrable() {
    let mut dispatcher = Dispatcher::<Process>::new();

    for entry in syscalls::SYSENT.iter() {
        let result = dispatcher.register(entry.number(), exit_group);

        if entry.is_bound() {
            assert_eq!(result, Ok(()));
        } else {
            assert!(matches!(result, Err(DispatchError::Placeholder { .. })));
        }
    }

    for (name, number) in syscalls::BY_NAME.iter() {
        assert!(dispatcher.is_registered(*number), "{} is not registered", name);
    }
}
