use std::path::Path;

use anyhow::Context;
use cfrec_core::RatingsMatrix;
use cfrec_shared::{AppError, ErrorKind, Rating};

/// Read a comma-separated ratings table: one line per user, one column per item.
pub async fn load_ratings(path: impl AsRef<Path>) -> Result<RatingsMatrix, AppError> {
  let path = path.as_ref();
  let raw = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("failed to read ratings from {}", path.display()))
    .map_err(|err| AppError::with_kind(ErrorKind::Io, err))?;

  let matrix = parse_ratings(&raw)?;
  tracing::info!(
    path = %path.display(),
    users = matrix.n_users(),
    items = matrix.n_items(),
    "loaded ratings"
  );
  Ok(matrix)
}

/// Parse ratings text. Blank lines are skipped; every cell must be a
/// non-negative integer.
pub fn parse_ratings(raw: &str) -> Result<RatingsMatrix, AppError> {
  let mut rows = Vec::new();

  for (line_idx, line) in raw.lines().enumerate() {
    if line.trim().is_empty() {
      continue;
    }
    let row = line
      .split(',')
      .enumerate()
      .map(|(col_idx, cell)| {
        cell.trim().parse::<Rating>().map_err(|err| {
          AppError::invalid_input(format!(
            "line {}, column {}: {:?} is not a non-negative integer ({err})",
            line_idx + 1,
            col_idx + 1,
            cell.trim()
          ))
        })
      })
      .collect::<Result<Vec<_>, _>>()?;
    rows.push(row);
  }

  RatingsMatrix::new(rows)
}
