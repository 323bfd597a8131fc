//! Driver-backed document source

use crate::convert::{document_to_json, identifier_from_document, identifier_to_bson};
use crate::errors::{connectivity, invalid_host, read_error, Result};
use bson::{doc, Document};
use mongodb::options::{ClientOptions, Credential, FindOptions, ServerAddress};
use mongodb::sync::{Client, Database};
use mongodiff_core::source::{DocumentSource, IdentifierStream};
use mongodiff_core::{Credentials, Identifier};
use serde_json::Value;
use std::time::Duration;

/// Where and how to connect
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// `host` or `host:port`
    pub host: String,
    pub database: String,
    pub credentials: Option<Credentials>,
    /// Upper bound for connecting and for server selection
    pub timeout: Duration,
}

impl ConnectOptions {
    pub fn new(host: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            database: database.into(),
            credentials: None,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// One database on a MongoDB server
pub struct MongoSource {
    name: String,
    database: Database,
}

impl MongoSource {
    /// Build a client for the host and check the handshake with `ping`
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an unparsable host, `Connectivity` when the client
    /// cannot be built or the server does not answer (including refused
    /// authentication).
    pub fn connect(options: &ConnectOptions) -> Result<Self> {
        let address = ServerAddress::parse(&options.host)
            .map_err(|e| invalid_host(&options.host, e))?;

        let credential = options.credentials.as_ref().map(|creds| {
            Credential::builder()
                .username(creds.username.clone())
                .password(creds.password.expose().clone())
                .source(creds.auth_source.clone())
                .build()
        });

        let client_options = ClientOptions::builder()
            .hosts(vec![address])
            .credential(credential)
            .connect_timeout(options.timeout)
            .server_selection_timeout(options.timeout)
            .app_name("mongodiff".to_string())
            .build();

        let client = Client::with_options(client_options).map_err(|e| connectivity("connect", e))?;
        let database = client.database(&options.database);
        database
            .run_command(doc! {"ping": 1}, None)
            .map_err(|e| connectivity("connect", e))?;

        tracing::info!(host = %options.host, database = %options.database, "connected");
        Ok(Self {
            name: options.database.clone(),
            database,
        })
    }
}

impl DocumentSource for MongoSource {
    fn database_name(&self) -> &str {
        &self.name
    }

    fn list_collection_names(&self) -> Result<Vec<String>> {
        self.database
            .list_collection_names(None)
            .map_err(|e| connectivity("list_collections", e))
    }

    fn identifiers<'a>(&'a self, collection: &str) -> Result<IdentifierStream<'a>> {
        let options = FindOptions::builder().projection(doc! {"_id": 1}).build();
        let cursor = self
            .database
            .collection::<Document>(collection)
            .find(None, options)
            .map_err(|e| read_error("collect_snapshot", collection, e))?;

        let name = collection.to_string();
        Ok(Box::new(cursor.map(move |item| {
            let document = item.map_err(|e| read_error("collect_snapshot", &name, e))?;
            identifier_from_document(&name, &document)
        })))
    }

    fn fetch_document(&self, collection: &str, id: &Identifier) -> Result<Option<Value>> {
        let found = self
            .database
            .collection::<Document>(collection)
            .find_one(doc! {"_id": identifier_to_bson(id)}, None)
            .map_err(|e| {
                read_error("fetch_document", collection, e).with_identifier(id.canonical())
            })?;
        Ok(found.map(document_to_json))
    }
}
