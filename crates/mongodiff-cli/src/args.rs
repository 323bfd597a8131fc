//! Command line flags

use clap::{ArgAction, Parser, ValueEnum};
use mongodiff_core::config::DEFAULT_AUTH_SOURCE;
use mongodiff_core::diff::{AnsiFormatter, Formatter, PlainFormatter};
use mongodiff_core::logging_facility::Profile;
use mongodiff_core::{Credentials, ExcludeList, Result, RunConfig};
use mongodiff_store::ConnectOptions;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Human,
    Json,
}

impl LogFormat {
    pub fn profile(self) -> Profile {
        match self {
            LogFormat::Human => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "mongodiff", version)]
#[command(
    about = "Capture documents added to a MongoDB database and emit replay scripts",
    long_about = None
)]
pub struct Cli {
    /// Database host, optionally with port
    #[arg(long, env = "MONGODIFF_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Database to watch
    #[arg(long, default_value = "test")]
    pub db: String,

    /// Comma-separated collection names to ignore
    #[arg(long, default_value = "")]
    pub excludes: String,

    /// Prefix for every generated file
    #[arg(long = "file-output", default_value = "setup")]
    pub file_output: String,

    /// Wait for Ctrl+C between the two snapshots
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub wait_for_signal: bool,

    #[arg(long)]
    pub username: Option<String>,

    #[arg(long, env = "MONGODIFF_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Authentication database
    #[arg(long, default_value = DEFAULT_AUTH_SOURCE)]
    pub auth_source: String,

    /// Write credentials into the generated scripts instead of
    /// referencing MONGO_USERNAME / MONGO_PASSWORD
    #[arg(long)]
    pub echo_credentials: bool,

    /// Disable coloured output (NO_COLOR is honoured too)
    #[arg(long)]
    pub no_color: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Human)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Credentials, present only when a username was given
    pub fn credentials(&self) -> Option<Credentials> {
        self.username.as_ref().map(|username| {
            Credentials::new(username.clone(), self.password.clone().unwrap_or_default())
                .with_auth_source(self.auth_source.clone())
        })
    }

    /// # Errors
    ///
    /// `InvalidInput` for an empty database name or output prefix.
    pub fn run_config(&self) -> Result<RunConfig> {
        Ok(RunConfig::new(self.db.clone(), self.file_output.clone())?
            .with_excludes(ExcludeList::parse(&self.excludes))
            .with_credentials(self.credentials())
            .with_echo_credentials(self.echo_credentials))
    }

    pub fn connect_options(&self) -> ConnectOptions {
        ConnectOptions::new(self.host.clone(), self.db.clone())
            .with_credentials(self.credentials())
    }

    pub fn use_color(&self) -> bool {
        let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        !self.no_color && !no_color_env && std::io::stdout().is_terminal()
    }

    pub fn formatter(&self) -> Box<dyn Formatter> {
        if self.use_color() {
            Box::new(AnsiFormatter)
        } else {
            Box::new(PlainFormatter)
        }
    }
}
