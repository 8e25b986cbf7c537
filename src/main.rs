use byteman::computer::{Computer, MachineConfig};
use byteman::loader::{self, LoadError};

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use eyre::{Result, WrapErr};
use log::{debug, error, LevelFilter};
use simple_logger::SimpleLogger;

const EXIT_FAULT: u8 = 1;
const EXIT_NOT_FOUND: u8 = 2;
const EXIT_BAD_PROGRAM: u8 = 3;

/// Runs a program on the 8-register, 256-byte machine.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Program file, one binary byte per line; `#` starts a comment
    program: PathBuf,

    /// Fault on stack overflow or underflow instead of wrapping
    #[arg(long)]
    strict_stack: bool,

    /// Log machine state before every instruction
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // RUST_LOG overrides the default level; --trace overrides both.
    let mut logger = SimpleLogger::new().with_level(LevelFilter::Warn).env();
    if args.trace {
        logger = logger.with_level(LevelFilter::Trace);
    }
    logger.init().wrap_err("failed to initialise logging")?;

    let program = match loader::load_file(&args.program) {
        Ok(program) => program,
        Err(err) => {
            match &err {
                LoadError::Io { path, source } if source.kind() == ErrorKind::NotFound => {
                    eprintln!("{}: {} Not found", env!("CARGO_PKG_NAME"), path.display())
                }
                LoadError::Io { .. } => eprintln!("{}: {}", env!("CARGO_PKG_NAME"), err),
                _ => eprintln!("{}: {}: {}", env!("CARGO_PKG_NAME"), args.program.display(), err),
            }
            return Ok(ExitCode::from(load_exit_code(&err)));
        }
    };

    let mut computer = Computer::new(MachineConfig {
        strict_stack: args.strict_stack,
        trace: args.trace,
        ..MachineConfig::default()
    });
    computer
        .load_program(&program)
        .wrap_err("program does not fit in memory")?;

    if let Err(err) = computer.run() {
        error!("{}", err);
        debug!("{}", computer.trace_line());
        return Ok(ExitCode::from(EXIT_FAULT));
    }

    Ok(ExitCode::SUCCESS)
}

fn load_exit_code(err: &LoadError) -> u8 {
    match err {
        // read_to_string reports non-UTF-8 text as InvalidData
        LoadError::Io { source, .. } if source.kind() == ErrorKind::InvalidData => {
            EXIT_BAD_PROGRAM
        }
        LoadError::Io { .. } => EXIT_NOT_FOUND,
        LoadError::InvalidLiteral { .. } | LoadError::ProgramTooLarge { .. } => EXIT_BAD_PROGRAM,
    }
}
