use std::fmt;

use cfrec_shared::{AppError, Rating, UNRATED};
use serde::{Deserialize, Serialize};

/// Zero-based row index into a [`RatingsMatrix`].
///
/// Obtained from [`RatingsMatrix::user`], which checks the bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "usize")]
pub struct UserId(usize);

/// Zero-based column index into a [`RatingsMatrix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "usize")]
pub struct ItemId(usize);

macro_rules! index_newtype {
  ($ty:ident) => {
    impl $ty {
      #[must_use]
      pub const fn index(self) -> usize {
        self.0
      }

      /// One-based label, as shown to people.
      #[must_use]
      pub const fn label(self) -> usize {
        self.0 + 1
      }
    }

    impl fmt::Display for $ty {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
      }
    }

    // Serialized as the one-based label.
    impl From<$ty> for usize {
      fn from(id: $ty) -> Self {
        id.label()
      }
    }
  };
}

index_newtype!(UserId);
index_newtype!(ItemId);

/// Dense user × item ratings. Row = user, column = item, `0` = unrated.
///
/// Always non-empty and rectangular; every constructor goes through
/// [`RatingsMatrix::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Rating>>", into = "Vec<Vec<Rating>>")]
pub struct RatingsMatrix {
  rows: Vec<Vec<Rating>>,
  n_items: usize,
}

impl RatingsMatrix {
  pub fn new(rows: Vec<Vec<Rating>>) -> Result<Self, AppError> {
    let Some(first) = rows.first() else {
      return Err(AppError::invalid_input("ratings matrix has no users"));
    };
    let n_items = first.len();
    if n_items == 0 {
      return Err(AppError::invalid_input("ratings matrix has no items"));
    }

    if let Some((idx, row)) = rows
      .iter()
      .enumerate()
      .find(|(_, row)| row.len() != n_items)
    {
      return Err(AppError::invalid_input(format!(
        "ragged ratings matrix: row {idx} has {} items, expected {n_items}",
        row.len()
      )));
    }

    Ok(Self { rows, n_items })
  }

  #[must_use]
  pub fn n_users(&self) -> usize {
    self.rows.len()
  }

  #[must_use]
  pub const fn n_items(&self) -> usize {
    self.n_items
  }

  pub fn user(&self, index: usize) -> Result<UserId, AppError> {
    if index < self.n_users() {
      Ok(UserId(index))
    } else {
      Err(AppError::invalid_input(format!(
        "user index {index} out of range (0..{})",
        self.n_users()
      )))
    }
  }

  pub fn item(&self, index: usize) -> Result<ItemId, AppError> {
    if index < self.n_items {
      Ok(ItemId(index))
    } else {
      Err(AppError::invalid_input(format!(
        "item index {index} out of range (0..{})",
        self.n_items
      )))
    }
  }

  pub fn users(&self) -> impl Iterator<Item = UserId> + use<> {
    (0..self.n_users()).map(UserId)
  }

  pub fn items(&self) -> impl Iterator<Item = ItemId> + use<> {
    (0..self.n_items).map(ItemId)
  }

  /// Full rating vector of `user`.
  ///
  /// # Panics
  /// If `user` was not issued by this matrix (or one with at least as many rows).
  #[must_use]
  pub fn row(&self, user: UserId) -> &[Rating] {
    &self.rows[user.0]
  }

  #[must_use]
  pub fn rating(&self, user: UserId, item: ItemId) -> Rating {
    self.rows[user.0][item.0]
  }

  #[must_use]
  pub fn is_rated(&self, user: UserId, item: ItemId) -> bool {
    self.rating(user, item) != UNRATED
  }

  /// Re-check ids that may come from a different matrix.
  pub(crate) fn check(&self, user: UserId, item: Option<ItemId>) -> Result<(), AppError> {
    self.user(user.0)?;
    if let Some(item) = item {
      self.item(item.0)?;
    }
    Ok(())
  }
}

impl TryFrom<Vec<Vec<Rating>>> for RatingsMatrix {
  type Error = AppError;

  fn try_from(rows: Vec<Vec<Rating>>) -> Result<Self, Self::Error> {
    Self::new(rows)
  }
}

impl From<RatingsMatrix> for Vec<Vec<Rating>> {
  fn from(matrix: RatingsMatrix) -> Self {
    matrix.rows
  }
}
