//! User-based collaborative filtering over a dense ratings matrix.
//!
//! Users are compared by cosine similarity of their full rating rows; an
//! unrated item's score is the similarity-weighted mean of the neighbors who
//! rated it.

mod matrix;
pub use matrix::{ItemId, RatingsMatrix, UserId};

mod predict;
pub use predict::{neighbor_similarities, predict};

mod recommend;
pub use recommend::{Prediction, recommend};
