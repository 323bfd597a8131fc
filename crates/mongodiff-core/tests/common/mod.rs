use mongodiff_core::source::MemorySource;
use mongodiff_core::{Identifier, RunConfig};
use serde_json::json;
use std::fs;
use std::path::Path;

pub const OID_HEX: &str = "501ca04b668d67b3d6489f3a";

/// Database `test` with a `users` collection holding `id1`
#[allow(dead_code)]
pub fn users_source() -> MemorySource {
    let source = MemorySource::new("test");
    source.insert("users", Identifier::from("id1"), json!({"name": "first"}));
    source
}

/// Default run configuration for database `test`, prefix `setup`
#[allow(dead_code)]
pub fn setup_config() -> RunConfig {
    RunConfig::new("test", "setup").unwrap()
}

/// File names in a directory, sorted
#[allow(dead_code)]
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .collect();
    names.sort();
    names
}

/// Contents of every file in a directory, sorted by name
#[allow(dead_code)]
pub fn read_all(dir: &Path) -> Vec<(String, Vec<u8>)> {
    file_names(dir)
        .into_iter()
        .map(|name| {
            let body = fs::read(dir.join(&name)).unwrap();
            (name, body)
        })
        .collect()
}
