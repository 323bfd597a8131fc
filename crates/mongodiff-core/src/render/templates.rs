//! Script bodies
//!
//! Every generated script takes the target host as its first argument,
//! falling back to `MONGO_SERVER` and then `localhost`. Values coming from
//! the database (database and collection names, credentials) are quoted for
//! the target shell wherever they are arguments. Comment lines carry them
//! unquoted, which relies on [`RenderContext::new`] rejecting line breaks.

use crate::render::context::{RenderContext, ScriptAuth};
use serde_json::Value;

const SH_HEADER: &str = "#!/bin/sh\nset -e\n";
const SH_HOST: &str = "MONGO_HOST=\"${1:-${MONGO_SERVER:-localhost}}\"\ncd \"$(dirname \"$0\")\"\n";

const BAT_HEADER: &str = "@echo off\nsetlocal";
const BAT_HOST: &str = "set \"MONGO_HOST=%~1\"\n\
if \"%MONGO_HOST%\"==\"\" set \"MONGO_HOST=%MONGO_SERVER%\"\n\
if \"%MONGO_HOST%\"==\"\" set \"MONGO_HOST=localhost\"\n\
cd /d \"%~dp0\"";

/// Single-quote a value for POSIX shells
pub fn sh_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

/// Double-quote a value for cmd.exe, escaping `%` expansion
pub fn bat_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('%', "%%").replace('"', "\"\""))
}

fn sh_auth(auth: &ScriptAuth) -> String {
    match auth {
        ScriptAuth::None => String::new(),
        ScriptAuth::Echo {
            username,
            password,
            auth_source,
        } => format!(
            " --username {} --password {} --authenticationDatabase {}",
            sh_quote(username),
            sh_quote(password),
            sh_quote(auth_source)
        ),
        ScriptAuth::FromEnv { auth_source } => format!(
            " --username \"$MONGO_USERNAME\" --password \"$MONGO_PASSWORD\" --authenticationDatabase {}",
            sh_quote(auth_source)
        ),
    }
}

fn bat_auth(auth: &ScriptAuth) -> String {
    match auth {
        ScriptAuth::None => String::new(),
        ScriptAuth::Echo {
            username,
            password,
            auth_source,
        } => format!(
            " --username {} --password {} --authenticationDatabase {}",
            bat_quote(username),
            bat_quote(password),
            bat_quote(auth_source)
        ),
        ScriptAuth::FromEnv { auth_source } => format!(
            " --username \"%MONGO_USERNAME%\" --password \"%MONGO_PASSWORD%\" --authenticationDatabase {}",
            bat_quote(auth_source)
        ),
    }
}

fn collection_list(ctx: &RenderContext) -> String {
    ctx.collections
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Batch files are run by cmd.exe and need CRLF line endings
fn crlf(body: &str) -> String {
    body.lines().map(|line| format!("{}\r\n", line)).collect()
}

/// Mongo shell script removing every captured document
pub fn clean_js(ctx: &RenderContext) -> String {
    let mut out = format!(
        "// Removes the documents captured from database {}\n",
        ctx.database
    );
    for collection in &ctx.collections {
        let name = Value::String(collection.name.clone());
        for literal in &collection.literals {
            out.push_str(&format!(
                "db.getCollection({}).remove({{\"_id\": {}}});\n",
                name, literal
            ));
        }
    }
    out
}

/// Shell script importing every captured document
pub fn replay_sh(ctx: &RenderContext) -> String {
    let mut out = String::from(SH_HEADER);
    out.push_str(&format!(
        "# Replays captured changes into database {}\n# Usage: {}.sh [host]\n",
        ctx.database, ctx.prefix
    ));
    out.push_str(SH_HOST);
    out.push('\n');
    let auth = sh_auth(&ctx.auth);
    for collection in &ctx.collections {
        out.push_str(&format!(
            "mongoimport --host \"$MONGO_HOST\"{} --db {} --collection {} --file {}\n",
            auth,
            sh_quote(&ctx.database),
            sh_quote(&collection.name),
            sh_quote(&collection.import_file)
        ));
    }
    out
}

/// Batch equivalent of [`replay_sh`]
pub fn replay_bat(ctx: &RenderContext) -> String {
    let mut out = format!(
        "{}\nrem Replays captured changes into database {}\nrem Usage: {}.bat [host]\n{}\n\n",
        BAT_HEADER, ctx.database, ctx.prefix, BAT_HOST
    );
    let auth = bat_auth(&ctx.auth);
    for collection in &ctx.collections {
        out.push_str(&format!(
            "mongoimport --host \"%MONGO_HOST%\"{} --db {} --collection {} --file {}\n",
            auth,
            bat_quote(&ctx.database),
            bat_quote(&collection.name),
            bat_quote(&collection.import_file)
        ));
    }
    out.push_str("endlocal\n");
    crlf(&out)
}

/// Shell script running the cleanup script through the mongo shell
pub fn clean_sh(ctx: &RenderContext) -> String {
    let mut out = String::from(SH_HEADER);
    out.push_str(&format!(
        "# Removes captured documents from database {}\n# Collections: {}\n# Usage: {}_clean.sh [host]\n",
        ctx.database,
        collection_list(ctx),
        ctx.prefix
    ));
    out.push_str(SH_HOST);
    out.push('\n');
    out.push_str(&format!(
        "mongo --host \"$MONGO_HOST\"{} {} {}\n",
        sh_auth(&ctx.auth),
        sh_quote(&ctx.database),
        sh_quote(&ctx.clean_script_name())
    ));
    out
}

/// Batch equivalent of [`clean_sh`]
pub fn clean_bat(ctx: &RenderContext) -> String {
    let out = format!(
        "{}\nrem Removes captured documents from database {}\nrem Collections: {}\nrem Usage: {}_clean.bat [host]\n{}\n\n\
mongo --host \"%MONGO_HOST%\"{} {} {}\nendlocal\n",
        BAT_HEADER,
        ctx.database,
        collection_list(ctx),
        ctx.prefix,
        BAT_HOST,
        bat_auth(&ctx.auth),
        bat_quote(&ctx.database),
        bat_quote(&ctx.clean_script_name())
    );
    crlf(&out)
}
