use clap::Parser;
use std::path::PathBuf;

/// A terminal client for signing in to a cardroom server
#[derive(Parser)]
#[clap(version)]
pub struct Config {
    /// The server to sign in against. Should only be the protocol and
    /// domain, e.g. `http://cardroom.your-domain.com`.
    #[clap(long, default_value = "http://127.0.0.1:5000")]
    server: String,

    /// Where to write diagnostic logs. The terminal belongs to the UI, so
    /// nothing is ever logged there.
    #[clap(long)]
    log_dir: Option<PathBuf>,
}

impl Config {
    /// The server every login request goes to.
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Get the configured log directory, or a default in the platform's
    /// data directory. If we can't find that (for example because `$HOME`
    /// is unset), fall back to the current directory.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("io", "cardroom", "cardroom")
                    .map(|dirs| dirs.data_local_dir().join("logs"))
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
