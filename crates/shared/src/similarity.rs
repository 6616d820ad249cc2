use crate::{AppError, Rating};

/// Compute cosine similarity between two rating vectors.
///
/// Ratings are non-negative, so the result lies in [0.0, 1.0]. If either
/// vector has zero norm the similarity is 0.0, not NaN.
pub fn cosine_similarity(a: &[Rating], b: &[Rating]) -> Result<f64, AppError> {
  if a.len() != b.len() {
    return Err(AppError::invalid_input(format!(
      "rating vectors differ in length: {} vs {}",
      a.len(),
      b.len()
    )));
  }

  let mut dot = 0.0_f64;
  let mut norm_a = 0.0_f64;
  let mut norm_b = 0.0_f64;

  for (&x, &y) in a.iter().zip(b.iter()) {
    let x = f64::from(x);
    let y = f64::from(y);
    dot = x.mul_add(y, dot);
    norm_a = x.mul_add(x, norm_a);
    norm_b = y.mul_add(y, norm_b);
  }

  // Integer inputs: a zero norm is exactly zero.
  if norm_a == 0.0 || norm_b == 0.0 {
    return Ok(0.0);
  }

  Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}
