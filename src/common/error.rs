use std::io::Error;
use std::io::ErrorKind;

// Helpers for the ambient disk/buffer layer, which stays on plain io::Error
// since it has no heap-file-specific vocabulary of its own.
pub fn already_exists(message: &str) -> Error {
  Error::new(ErrorKind::AlreadyExists, message)
}

pub fn invalid_data(message: &str) -> Error {
  Error::new(ErrorKind::InvalidData, message)
}

pub fn invalid_input(message: &str) -> Error {
  Error::new(ErrorKind::InvalidInput, message)
}

pub fn not_found(message: &str) -> Error {
  Error::new(ErrorKind::NotFound, message)
}

// Typed error channel for the heap-file layer (see ERROR HANDLING DESIGN).
// Layer-local kinds are distinguished from passthrough buffer/disk errors so
// callers can match on them instead of inspecting an io::ErrorKind string.
#[derive(thiserror::Error, Debug)]
pub enum HeapFileError {
  #[error("file already exists")]
  FileExists,

  #[error("invalid scan parameters")]
  BadScanParm,

  #[error("record length exceeds page capacity")]
  InvalidRecLen,

  #[error("scan exhausted")]
  FileEof,

  #[error("page has no records")]
  NoRecords,

  #[error("invalid slot number")]
  InvalidSlotNo,

  #[error("page has no space for record")]
  NoSpace,

  #[error("end of page reached")]
  EndOfPage,

  #[error(transparent)]
  Io(#[from] Error),
}
