use std::fmt::Write;

use cfrec_core::{Prediction, UserId};
use cfrec_shared::{AppError, OutputFormat};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Report<'a> {
  user: UserId,
  top_n: usize,
  recommendations: &'a [Prediction],
}

#[must_use]
pub fn render_text(user: UserId, top_n: usize, recommendations: &[Prediction]) -> String {
  let mut out = String::new();

  let _ = writeln!(out, "Top {top_n} movie recommendations for User {user}:");
  for rec in recommendations {
    let _ = writeln!(
      out,
      "Movie {} with predicted rating: {:.2}",
      rec.item, rec.rating
    );
  }

  out
}

pub fn render_json(
  user: UserId,
  top_n: usize,
  recommendations: &[Prediction],
) -> Result<String, AppError> {
  let report = Report {
    user,
    top_n,
    recommendations,
  };
  Ok(serde_json::to_string_pretty(&report)? + "\n")
}

pub fn render(
  format: OutputFormat,
  user: UserId,
  top_n: usize,
  recommendations: &[Prediction],
) -> Result<String, AppError> {
  match format {
    OutputFormat::Text => Ok(render_text(user, top_n, recommendations)),
    OutputFormat::Json => render_json(user, top_n, recommendations),
  }
}

#[cfg(test)]
mod tests {
  use cfrec_core::{RatingsMatrix, recommend};

  use super::*;

  fn sample() -> (UserId, Vec<Prediction>) {
    let m = RatingsMatrix::new(vec![vec![5, 0, 3, 0], vec![4, 0, 0, 1], vec![0, 5, 4, 0]]).unwrap();
    let user = m.user(0).unwrap();
    (user, recommend(&m, user, 3).unwrap())
  }

  #[test]
  fn text_uses_one_based_labels() {
    let (user, recs) = sample();
    let out = render_text(user, 3, &recs);
    assert_eq!(
      out,
      "Top 3 movie recommendations for User 1:\n\
       Movie 2 with predicted rating: 5.00\n\
       Movie 4 with predicted rating: 1.00\n"
    );
  }

  #[test]
  fn text_with_no_recommendations_is_header_only() {
    let (user, _) = sample();
    assert_eq!(
      render(OutputFormat::Text, user, 0, &[]).unwrap(),
      "Top 0 movie recommendations for User 1:\n"
    );
  }

  #[test]
  fn json_report() {
    let (user, recs) = sample();
    let out = render(OutputFormat::Json, user, 3, &recs).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["user"], 1);
    assert_eq!(value["top_n"], 3);
    assert_eq!(value["recommendations"][0]["item"], 2);
    assert_eq!(value["recommendations"][1]["item"], 4);
    assert_eq!(value["recommendations"].as_array().unwrap().len(), 2);
  }
}
