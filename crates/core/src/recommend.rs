use cfrec_shared::AppError;
use serde::Serialize;

use crate::predict::{aggregate, neighbor_similarities};
use crate::{ItemId, RatingsMatrix, UserId};

/// Predicted rating for an item the user has not rated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
  pub item: ItemId,
  pub rating: f64,
}

/// Top-`top_n` unrated items for `user`, best first.
///
/// Equal predictions keep ascending item order. Returns fewer than `top_n`
/// entries when the user has fewer unrated items.
pub fn recommend(
  ratings: &RatingsMatrix,
  user: UserId,
  top_n: usize,
) -> Result<Vec<Prediction>, AppError> {
  ratings.check(user, None)?;
  if top_n == 0 {
    return Ok(Vec::new());
  }

  // Same per-neighbor similarities `predict` would compute for every item.
  let neighbors = neighbor_similarities(ratings, user)?;

  let mut predictions: Vec<Prediction> = ratings
    .items()
    .filter(|&item| !ratings.is_rated(user, item))
    .map(|item| Prediction {
      item,
      rating: aggregate(ratings, item, &neighbors),
    })
    .collect();

  let candidates = predictions.len();
  // Stable sort.
  predictions.sort_by(|a, b| b.rating.total_cmp(&a.rating));
  predictions.truncate(top_n);

  tracing::debug!(
    user = %user,
    neighbors = neighbors.len(),
    candidates,
    returned = predictions.len(),
    "ranked recommendations"
  );

  Ok(predictions)
}

#[cfg(test)]
mod tests {
  use cfrec_shared::ErrorKind;

  use super::*;
  use crate::predict;

  const EPS: f64 = 1e-9;

  fn matrix(rows: Vec<Vec<u32>>) -> RatingsMatrix {
    RatingsMatrix::new(rows).unwrap()
  }

  fn items(recs: &[Prediction]) -> Vec<usize> {
    recs.iter().map(|p| p.item.index()).collect()
  }

  fn movie_matrix() -> RatingsMatrix {
    matrix(vec![
      vec![5, 3, 0, 1, 0, 0],
      vec![4, 0, 0, 1, 2, 0],
      vec![1, 1, 0, 5, 0, 4],
      vec![1, 0, 0, 4, 4, 0],
      vec![0, 1, 5, 4, 0, 3],
      vec![2, 0, 3, 0, 5, 1],
    ])
  }

  #[test]
  fn worked_example() {
    let m = matrix(vec![vec![5, 0, 3], vec![4, 0, 0], vec![0, 5, 4]]);
    let recs = recommend(&m, m.user(0).unwrap(), 2).unwrap();
    assert_eq!(items(&recs), [1]);
    assert!((recs[0].rating - 5.0).abs() < EPS);
  }

  #[test]
  fn never_recommends_rated_items() {
    let m = movie_matrix();
    for user in m.users() {
      for rec in recommend(&m, user, 10).unwrap() {
        assert!(!m.is_rated(user, rec.item), "user {user} item {}", rec.item);
      }
    }
  }

  #[test]
  fn length_is_min_of_top_n_and_unrated() {
    let m = movie_matrix();
    for user in m.users() {
      let unrated = m.items().filter(|&i| !m.is_rated(user, i)).count();
      for top_n in 0..8 {
        let recs = recommend(&m, user, top_n).unwrap();
        assert_eq!(recs.len(), top_n.min(unrated));
      }
    }
  }

  #[test]
  fn sorted_descending_and_matches_predict() {
    let m = movie_matrix();
    for user in m.users() {
      let recs = recommend(&m, user, usize::MAX).unwrap();
      for pair in recs.windows(2) {
        assert!(pair[0].rating >= pair[1].rating);
      }
      for rec in &recs {
        assert_eq!(rec.rating, predict(&m, user, rec.item).unwrap());
      }
    }
  }

  #[test]
  fn ties_keep_item_order() {
    // User 0 is orthogonal to everyone, so all predictions are 0.
    let m = matrix(vec![vec![5, 0, 0, 0, 0], vec![0, 3, 4, 0, 0], vec![0, 0, 0, 2, 1]]);
    let recs = recommend(&m, m.user(0).unwrap(), 10).unwrap();
    assert_eq!(items(&recs), [1, 2, 3, 4]);
    assert!(recs.iter().all(|p| p.rating == 0.0));

    // Two identical neighbors give items 1 and 3 the same prediction.
    let m = matrix(vec![vec![4, 0, 2, 0], vec![4, 5, 2, 5], vec![4, 1, 2, 1]]);
    let recs = recommend(&m, m.user(0).unwrap(), 10).unwrap();
    assert_eq!(items(&recs), [1, 3]);
    assert_eq!(recs[0].rating, recs[1].rating);
  }

  #[test]
  fn higher_prediction_ranks_first() {
    let m = matrix(vec![vec![5, 0, 0], vec![5, 1, 5], vec![5, 1, 5]]);
    let recs = recommend(&m, m.user(0).unwrap(), 1).unwrap();
    assert_eq!(items(&recs), [2]);
    assert!((recs[0].rating - 5.0).abs() < EPS);
  }

  #[test]
  fn top_n_zero_is_empty() {
    let m = movie_matrix();
    assert!(recommend(&m, m.user(0).unwrap(), 0).unwrap().is_empty());
  }

  #[test]
  fn fully_rated_user_is_empty() {
    let m = matrix(vec![vec![1, 2, 3], vec![0, 4, 0]]);
    assert!(recommend(&m, m.user(0).unwrap(), 5).unwrap().is_empty());
  }

  #[test]
  fn foreign_user_is_invalid_input() {
    let big = movie_matrix();
    let m = matrix(vec![vec![1, 0]]);
    let err = recommend(&m, big.user(5).unwrap(), 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
  }

  #[test]
  fn serializes_one_based_items() {
    let m = matrix(vec![vec![5, 0, 3], vec![4, 0, 0], vec![0, 5, 4]]);
    let recs = recommend(&m, m.user(0).unwrap(), 1).unwrap();
    let json = serde_json::to_value(&recs).unwrap();
    assert_eq!(json[0]["item"], 2);
  }
}
