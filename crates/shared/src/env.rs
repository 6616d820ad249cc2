use std::env;
use std::str::FromStr;
use std::sync::LazyLock;

use strum::{Display, EnumString};

/// How recommendations are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

pub struct AppEnv {
  pub ratings_path: String,
  pub output_format: OutputFormat,
}

impl AppEnv {
  fn new() -> Self {
    Self {
      ratings_path: env::var("RATINGS_PATH").unwrap_or_else(|_| "ratings.csv".to_owned()),
      output_format: env::var("OUTPUT_FORMAT")
        .map(|raw| parse_output_format(&raw))
        .unwrap_or_default(),
    }
  }
}

fn parse_output_format(raw: &str) -> OutputFormat {
  OutputFormat::from_str(raw.trim()).unwrap_or_else(|_| {
    tracing::warn!(value = raw, "unknown OUTPUT_FORMAT, falling back to text");
    OutputFormat::Text
  })
}

pub static APP_ENV: LazyLock<AppEnv> = LazyLock::new(AppEnv::new);
