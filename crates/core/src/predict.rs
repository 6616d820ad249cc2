use cfrec_shared::{AppError, similarity::cosine_similarity};

use crate::{ItemId, RatingsMatrix, UserId};

/// Similarity of `target` to every other user, in ascending user order.
///
/// Computed on the full rating rows, including whatever item is later predicted.
pub fn neighbor_similarities(
  ratings: &RatingsMatrix,
  target: UserId,
) -> Result<Vec<(UserId, f64)>, AppError> {
  ratings.check(target, None)?;
  let target_row = ratings.row(target);

  ratings
    .users()
    .filter(|&other| other != target)
    .map(|other| cosine_similarity(target_row, ratings.row(other)).map(|sim| (other, sim)))
    .collect()
}

/// Similarity-weighted mean of the neighbors' ratings for `item`.
///
/// Neighbors that have not rated `item` are skipped entirely. Returns 0.0 when
/// the total absolute similarity weight is zero.
pub(crate) fn aggregate(
  ratings: &RatingsMatrix,
  item: ItemId,
  neighbors: &[(UserId, f64)],
) -> f64 {
  let mut weighted_sum = 0.0_f64;
  let mut similarity_sum = 0.0_f64;
  let mut contributors = 0_usize;

  for &(neighbor, sim) in neighbors {
    if !ratings.is_rated(neighbor, item) {
      continue;
    }
    weighted_sum += sim * f64::from(ratings.rating(neighbor, item));
    similarity_sum += sim.abs();
    contributors += 1;
  }

  tracing::trace!(
    item = %item,
    contributors,
    similarity_sum,
    "aggregated neighbor ratings"
  );

  if similarity_sum == 0.0 {
    return 0.0;
  }
  weighted_sum / similarity_sum
}

/// Predict `target`'s rating for `item` from every other user's rating of it.
///
/// Similarities are recomputed on each call; use [`crate::recommend`] to score
/// many items for one user.
pub fn predict(ratings: &RatingsMatrix, target: UserId, item: ItemId) -> Result<f64, AppError> {
  ratings.check(target, Some(item))?;
  let neighbors = neighbor_similarities(ratings, target)?;
  Ok(aggregate(ratings, item, &neighbors))
}
