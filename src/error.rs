use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal conditions. Any of these aborts the whole compilation and no
/// artifact is written.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("{file}:{line}: malformed input: {reason}")]
  MalformedInput { file: String, line: usize, reason: String },

  #[error("values in range [{min}, {max}] do not fit into any supported integer type")]
  WidthOverflow { min: i64, max: i64 },

  #[error("I/O error on {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("configuration error: {0}")]
  Config(#[from] config::ConfigError),

  #[error("block size search for block size {0} produced no result")]
  SearchAborted(usize),

  #[error("no candidate block sizes to search")]
  NoBlockSizes,

  #[error("column has {found} entries, expected {expected}")]
  ColumnLength { expected: usize, found: usize },

  #[error("case partner {partner:#x} of {codepoint:04X} is outside the table")]
  PartnerOutOfDomain { codepoint: u32, partner: i64 },
}

impl Error {
  pub fn malformed(file: &str, line: usize, reason: impl Into<String>) -> Error {
    return Error::MalformedInput {
      file: file.to_owned(),
      line,
      reason: reason.into(),
    };
  }

  pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Error {
    return Error::Io {
      path: path.into(),
      source,
    };
  }
}

/// Recoverable conditions. They are logged and collected, and never change
/// the exit status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Warning {
  #[error("Unicode version differs in {file}: found {found}, keeping {kept}")]
  VersionMismatch { file: String, kept: String, found: String },

  #[error("{first:04X}..{last:04X} does not contain a multiple of 10 characters")]
  RangeMultipleViolation { first: u32, last: u32 },

  #[error("emoji {codepoint:#x} has break property {previous}, not 'Other'")]
  BreakPropertyOverridden { codepoint: u32, previous: String },
}
