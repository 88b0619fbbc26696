//! `server`: the caseload assignment API.
//!
//! ```text
//! server [--config caseload.toml] serve
//! server hash-password
//! ```
//!
//! Settings come from the TOML file named by `--config`, overridden by
//! `CASELOAD_*` environment variables (`CASELOAD_PORT=9000`). Each
//! `[[users]]` entry needs an argon2 PHC string; `hash-password` prints one.

use std::{
  io::{self, BufRead, Write},
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::{Context as _, anyhow};
use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use caseload_core::AssignmentService;
use caseload_server::{AppState, ServerConfig, auth::AuthConfig};
use caseload_store_sqlite::SqliteStore;
use clap::{Parser, Subcommand};
use rand_core::OsRng;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Volunteer case-assignment server")]
struct Cli {
  /// TOML settings file; missing is fine if the environment covers it.
  #[arg(short, long, default_value = "config.toml", global = true)]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Default)]
enum Command {
  /// Open the store and serve HTTP (the default).
  #[default]
  Serve,
  /// Read a password from stdin and print its argon2 hash.
  HashPassword,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  match cli.command.unwrap_or_default() {
    Command::HashPassword => hash_password(),
    Command::Serve => {
      tracing_subscriber::fmt()
        .with_env_filter(
          EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy(),
        )
        .init();
      serve(load_config(&cli.config)?).await
    }
  }
}

fn load_config(path: &Path) -> anyhow::Result<ServerConfig> {
  config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("CASELOAD"))
    .build()
    .and_then(|c| c.try_deserialize::<ServerConfig>())
    .with_context(|| format!("invalid settings (file {})", path.display()))
}

async fn serve(settings: ServerConfig) -> anyhow::Result<()> {
  if settings.users.is_empty() {
    tracing::warn!("no [[users]] configured; all requests will get 401");
  }

  let store_path = home_relative(&settings.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("opening {}", store_path.display()))?;

  let app = caseload_server::router(AppState {
    service: AssignmentService::new(Arc::new(store)),
    auth:    Arc::new(AuthConfig::new(settings.users)),
  });

  let listener = TcpListener::bind((settings.host.as_str(), settings.port))
    .await
    .with_context(|| format!("binding {}:{}", settings.host, settings.port))?;
  let addr = listener.local_addr()?;
  tracing::info!(%addr, store = %store_path.display(), "serving");

  axum::serve(listener, app).await?;
  Ok(())
}

fn hash_password() -> anyhow::Result<()> {
  eprint!("Password: ");
  io::stderr().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  let password = line.trim_end_matches(['\n', '\r']);

  let salt = SaltString::generate(&mut OsRng);
  let phc = Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map_err(|e| anyhow!("hashing failed: {e}"))?;
  println!("{phc}");
  Ok(())
}

/// `~/x` resolves against `$HOME`; anything else is returned unchanged.
fn home_relative(path: &Path) -> PathBuf {
  match (path.strip_prefix("~"), std::env::var_os("HOME")) {
    (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
    _ => path.to_path_buf(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn home_relative_leaves_plain_paths_alone() {
    assert_eq!(home_relative(Path::new("/srv/caseload.db")), Path::new("/srv/caseload.db"));
    assert_eq!(home_relative(Path::new("caseload.db")), Path::new("caseload.db"));
  }

  #[test]
  fn cli_defaults_to_serve() {
    let cli = Cli::try_parse_from(["server"]).unwrap();
    assert!(matches!(cli.command.unwrap_or_default(), Command::Serve));

    let cli = Cli::try_parse_from(["server", "hash-password", "-c", "x.toml"]).unwrap();
    assert!(matches!(cli.command, Some(Command::HashPassword)));
    assert_eq!(cli.config, Path::new("x.toml"));
  }
}
