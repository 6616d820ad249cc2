use std::{
  backtrace::{Backtrace, BacktraceStatus},
  fmt::{Debug, Display},
};

use strum::Display as StrumDisplay;

/// Classification of an [`AppError`], used to pick the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
  /// Caller supplied something the recommender cannot work with:
  /// ragged or empty matrix, out-of-range index, mismatched vector lengths.
  InvalidInput,
  /// Reading the ratings source failed.
  Io,
  Internal,
}

#[derive(Debug)]
pub struct AppError {
  err: anyhow::Error,
  kind: ErrorKind,
}

impl AppError {
  /// Create with `Internal` kind
  pub fn new<E: Into<anyhow::Error>>(err: E) -> Self {
    Self {
      err: err.into(),
      kind: ErrorKind::Internal,
    }
  }

  /// Create with custom kind
  pub fn with_kind<E: Into<anyhow::Error>>(kind: ErrorKind, err: E) -> Self {
    Self {
      err: err.into(),
      kind,
    }
  }

  pub fn invalid_input(msg: impl Display + Debug + Send + Sync + 'static) -> Self {
    Self::with_kind(ErrorKind::InvalidInput, anyhow::Error::msg(msg))
  }

  #[must_use]
  pub const fn kind(&self) -> ErrorKind {
    self.kind
  }

  /// Exit code for the CLI (sysexits-style for I/O).
  #[must_use]
  pub const fn exit_code(&self) -> u8 {
    match self.kind {
      ErrorKind::InvalidInput => 2,
      ErrorKind::Io => 74,
      ErrorKind::Internal => 1,
    }
  }

  /// Get backtrace from anyhow (requires `RUST_BACKTRACE=1` to capture)
  pub fn backtrace(&self) -> &Backtrace {
    self.err.backtrace()
  }

  /// Human-readable report, with the backtrace appended in debug builds.
  #[must_use]
  pub fn report(&self) -> String {
    if cfg!(debug_assertions) {
      let bt = self.backtrace();
      if bt.status() == BacktraceStatus::Captured {
        return format!("{self}\nBacktrace:\n{bt}");
      }
    }
    self.to_string()
  }
}

impl Display for AppError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "[{}] {:#}", self.kind, self.err)
  }
}

impl<E> From<E> for AppError
where
  E: Into<anyhow::Error>,
{
  fn from(err: E) -> Self {
    Self::new(err)
  }
}
