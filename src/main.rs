use std::process::ExitCode;

use cfrec_core::recommend;
use cfrec_shared::{APP_ENV, AppError};
use tokio::io::{AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod loader;
mod prompt;
mod render;

use crate::loader::load_ratings;
use crate::render::render;

#[tokio::main]
async fn main() -> ExitCode {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();
  dotenvy::dotenv().ok();

  match run().await {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      tracing::error!(kind = %err.kind(), "{err}");
      eprintln!("{}", err.report());
      ExitCode::from(err.exit_code())
    }
  }
}

async fn run() -> Result<(), AppError> {
  let ratings = load_ratings(&APP_ENV.ratings_path).await?;

  let mut stdin = BufReader::new(tokio::io::stdin());
  let mut stdout = tokio::io::stdout();
  let request = prompt::ask(&mut stdin, &mut stdout, &ratings).await?;

  let recommendations = recommend(&ratings, request.user, request.top_n)?;
  let out = render(
    APP_ENV.output_format,
    request.user,
    request.top_n,
    &recommendations,
  )?;

  stdout.write_all(out.as_bytes()).await?;
  stdout.flush().await?;

  Ok(())
}
