use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use smallvec::SmallVec;
use thiserror::Error;

use crate::computer::memory::MEMORY_SIZE;

pub type Program = SmallVec<[u8; MEMORY_SIZE]>;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: invalid binary literal {text:?}")]
    InvalidLiteral { line: usize, text: String },

    #[error("program is {len} bytes, memory holds {}", MEMORY_SIZE)]
    ProgramTooLarge { len: usize },
}

/// Parses program text: one base-2 byte per line, `#` starts a comment and
/// blank lines are skipped.
pub fn parse_program(source: &str) -> Result<Program, LoadError> {
    let mut program = Program::new();

    for (i, line) in source.lines().enumerate() {
        let text = line.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }

        let byte = u8::from_str_radix(text, 2).map_err(|_| LoadError::InvalidLiteral {
            line: i + 1,
            text: text.to_string(),
        })?;
        program.push(byte);
    }

    if program.len() > MEMORY_SIZE {
        return Err(LoadError::ProgramTooLarge { len: program.len() });
    }

    Ok(program)
}

pub fn load_file(path: &Path) -> Result<Program, LoadError> {
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let program = parse_program(&source)?;
    debug!("{}: {} bytes", path.display(), program.len());

    Ok(program)
}
