use crate::config::RunConfig;
use crate::errors::{DiffError, Result};
use crate::model::ChangeSet;

/// Name of the per-collection import file
pub fn import_file_name(prefix: &str, collection: &str) -> String {
    format!("{}_{}.json", prefix, collection)
}

/// Line breaks, including the ones JavaScript treats as line terminators
fn breaks_lines(c: char) -> bool {
    c.is_control() || c == '\u{2028}' || c == '\u{2029}'
}

/// Reject names that would break out of a script line or the output directory
///
/// Names end up in script comments and, for collections, in file names.
fn check_name(what: &str, name: &str, allow_separators: bool) -> Result<()> {
    let reason = if name.chars().any(breaks_lines) {
        "contains a control character"
    } else if !allow_separators && name.contains(['/', '\\']) {
        "contains a path separator"
    } else {
        return Ok(());
    };
    Err(DiffError::UnsafeName {
        what: what.to_string(),
        name: name.to_string(),
        reason: reason.to_string(),
    }
    .into())
}

/// How generated scripts authenticate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptAuth {
    /// No credentials were configured
    None,
    /// Credentials written literally into the scripts
    Echo {
        username: String,
        password: String,
        auth_source: String,
    },
    /// Scripts read `MONGO_USERNAME` / `MONGO_PASSWORD` at run time
    FromEnv { auth_source: String },
}

/// One changed collection as the templates see it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionEntry {
    pub name: String,
    pub import_file: String,
    /// Literal forms of the changed identifiers, in identifier order
    pub literals: Vec<String>,
}

/// Everything the templates may reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub database: String,
    pub prefix: String,
    pub auth: ScriptAuth,
    pub collections: Vec<CollectionEntry>,
}

impl RenderContext {
    /// # Errors
    ///
    /// `Render` when the database name, prefix or a collection name contains
    /// a control character, or a collection name contains a path separator.
    pub fn new(config: &RunConfig, changes: &ChangeSet) -> Result<Self> {
        check_name("database", &config.database, false)?;
        check_name("prefix", &config.prefix, true)?;
        for (name, _) in changes {
            check_name("collection", name, false)?;
        }

        let auth = match (&config.credentials, config.echo_credentials) {
            (None, _) => ScriptAuth::None,
            (Some(creds), true) => ScriptAuth::Echo {
                username: creds.username.clone(),
                password: creds.password.expose().clone(),
                auth_source: creds.auth_source.clone(),
            },
            (Some(creds), false) => ScriptAuth::FromEnv {
                auth_source: creds.auth_source.clone(),
            },
        };

        let collections = changes
            .iter()
            .map(|(name, change)| CollectionEntry {
                name: name.clone(),
                import_file: import_file_name(&config.prefix, name),
                literals: change.ids.iter().map(|id| id.literal()).collect(),
            })
            .collect();

        Ok(Self {
            database: config.database.clone(),
            prefix: config.prefix.clone(),
            auth,
            collections,
        })
    }

    /// Name of the cleanup script the shell/batch wrappers hand to the shell
    pub fn clean_script_name(&self) -> String {
        format!("{}_clean.js", self.prefix)
    }
}
