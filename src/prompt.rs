use cfrec_core::{RatingsMatrix, UserId};
use cfrec_shared::{AppError, ErrorKind};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
  pub user: UserId,
  pub top_n: usize,
}

/// Ask for the target user and the number of recommendations.
pub async fn ask<R, W>(
  input: &mut R,
  output: &mut W,
  ratings: &RatingsMatrix,
) -> Result<Request, AppError>
where
  R: AsyncBufRead + Unpin,
  W: AsyncWrite + Unpin,
{
  let raw_user = ask_line(input, output, "Enter the user index (M, 0-indexed): ").await?;
  let raw_top_n = ask_line(input, output, "Enter the number of recommendations (N): ").await?;

  let user = raw_user
    .parse::<usize>()
    .ok()
    .and_then(|index| ratings.user(index).ok())
    .ok_or_else(|| {
      AppError::invalid_input(format!(
        "Invalid user index! {raw_user:?} is not in 0..{}",
        ratings.n_users()
      ))
    })?;

  let top_n = raw_top_n.parse::<usize>().map_err(|_| {
    AppError::invalid_input(format!(
      "Invalid number of recommendations! {raw_top_n:?} is not a non-negative integer"
    ))
  })?;

  Ok(Request { user, top_n })
}

async fn ask_line<R, W>(input: &mut R, output: &mut W, question: &str) -> Result<String, AppError>
where
  R: AsyncBufRead + Unpin,
  W: AsyncWrite + Unpin,
{
  let io_err = |err: std::io::Error| AppError::with_kind(ErrorKind::Io, err);

  output.write_all(question.as_bytes()).await.map_err(io_err)?;
  output.flush().await.map_err(io_err)?;

  let mut line = String::new();
  let read = input.read_line(&mut line).await.map_err(io_err)?;
  if read == 0 {
    return Err(AppError::invalid_input(format!(
      "no answer to {:?}: input ended",
      question.trim_end()
    )));
  }
  Ok(line.trim().to_owned())
}
