//! Run configuration consumed by the core
//!
//! The CLI populates these from flags and environment variables; the core
//! never reads either directly.

use crate::errors::{DiffError, ExError, ExErrorKind, Result};
use mongodiff_core_types::Sensitive;
use std::collections::BTreeSet;

/// Authentication database used when none is given
pub const DEFAULT_AUTH_SOURCE: &str = "admin";

/// Collection names skipped by the collector
///
/// Parsed from a comma-separated list. Matching is exact and case-sensitive;
/// segments are not trimmed, empty segments are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludeList(BTreeSet<String>);

impl ExcludeList {
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<S: Into<String>> FromIterator<S> for ExcludeList {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Database login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: Sensitive<String>,
    pub auth_source: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Sensitive::new(password.into()),
            auth_source: DEFAULT_AUTH_SOURCE.to_string(),
        }
    }

    pub fn with_auth_source(mut self, auth_source: impl Into<String>) -> Self {
        self.auth_source = auth_source.into();
        self
    }
}

/// Everything one capture run needs besides the database handle
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Database being watched; also written into the generated scripts
    pub database: String,
    pub excludes: ExcludeList,
    /// Prefix for every emitted file name
    pub prefix: String,
    pub credentials: Option<Credentials>,
    /// Write credentials literally into scripts instead of env var references
    pub echo_credentials: bool,
}

impl RunConfig {
    /// Create a configuration with no excludes and no credentials
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the database name or prefix is empty.
    pub fn new(database: impl Into<String>, prefix: impl Into<String>) -> Result<Self> {
        let database = database.into();
        let prefix = prefix.into();
        if database.is_empty() {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("configure")
                .with_message("Database name cannot be empty"));
        }
        if prefix.is_empty() {
            return Err(DiffError::EmptyPrefix.into());
        }
        Ok(Self {
            database,
            excludes: ExcludeList::default(),
            prefix,
            credentials: None,
            echo_credentials: false,
        })
    }

    pub fn with_excludes(mut self, excludes: ExcludeList) -> Self {
        self.excludes = excludes;
        self
    }

    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_echo_credentials(mut self, echo: bool) -> Self {
        self.echo_credentials = echo;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclude_list_exact_match() {
        let excludes = ExcludeList::parse("system.profile,Logs, audit");
        assert!(excludes.contains("system.profile"));
        assert!(excludes.contains("Logs"));
        assert!(!excludes.contains("logs"));
        assert!(excludes.contains(" audit"));
        assert!(!excludes.contains("audit"));
        assert_eq!(excludes.len(), 3);
    }

    #[test]
    fn test_exclude_list_drops_empty_segments() {
        assert!(ExcludeList::parse("").is_empty());
        let excludes = ExcludeList::parse(",a,,b,");
        assert_eq!(excludes.len(), 2);
        assert!(!excludes.contains(""));
    }

    #[test]
    fn test_run_config_rejects_empty_prefix_and_database() {
        let err = RunConfig::new("test", "").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        let err = RunConfig::new("", "setup").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }

    #[test]
    fn test_credentials_default_auth_source_and_redaction() {
        let creds = Credentials::new("admin", "pw");
        assert_eq!(creds.auth_source, DEFAULT_AUTH_SOURCE);
        let debug = format!("{:?}", creds);
        assert!(debug.contains("***REDACTED***"));
        assert!(!debug.contains("\"pw\""));
        let creds = creds.with_auth_source("users");
        assert_eq!(creds.auth_source, "users");
    }
}
