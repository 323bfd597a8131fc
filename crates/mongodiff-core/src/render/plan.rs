use crate::errors::{DiffError, Result};
use crate::render::context::RenderContext;
use crate::render::templates;

/// Permission bits for scripts meant to be run directly
pub const MODE_EXECUTABLE: u32 = 0o700;
/// Permission bits for everything else
pub const MODE_PRIVATE: u32 = 0o600;

/// One entry of the render plan
#[derive(Clone, Copy)]
pub struct ArtifactTemplate {
    /// File name with `{prefix}` / `{database}` placeholders
    pub path_template: &'static str,
    pub body: fn(&RenderContext) -> String,
    /// Unix permission bits; ignored elsewhere
    pub mode: u32,
}

impl std::fmt::Debug for ArtifactTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactTemplate")
            .field("path_template", &self.path_template)
            .field("mode", &format_args!("{:o}", self.mode))
            .finish()
    }
}

/// The fixed set of scripts emitted alongside the import files
///
/// The shell and batch wrappers reference the cleanup script and import
/// files by the names produced here, so the set is always emitted whole.
pub const RENDER_PLAN: &[ArtifactTemplate] = &[
    ArtifactTemplate {
        path_template: "{prefix}_clean.js",
        body: templates::clean_js,
        mode: MODE_PRIVATE,
    },
    ArtifactTemplate {
        path_template: "{prefix}.bat",
        body: templates::replay_bat,
        mode: MODE_PRIVATE,
    },
    ArtifactTemplate {
        path_template: "{prefix}.sh",
        body: templates::replay_sh,
        mode: MODE_EXECUTABLE,
    },
    ArtifactTemplate {
        path_template: "{prefix}_clean.bat",
        body: templates::clean_bat,
        mode: MODE_PRIVATE,
    },
    ArtifactTemplate {
        path_template: "{prefix}_clean.sh",
        body: templates::clean_sh,
        mode: MODE_EXECUTABLE,
    },
];

/// A fully rendered output file, not yet written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    /// Path relative to the output directory
    pub path: String,
    pub body: String,
    pub mode: u32,
}

/// Expand `{prefix}` and `{database}` in a file name template
///
/// # Errors
///
/// `Render` for unknown or unterminated placeholders.
pub fn expand_path(template: &str, ctx: &RenderContext) -> Result<String> {
    let mut out = String::with_capacity(template.len() + ctx.prefix.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| DiffError::UnknownPlaceholder {
            template: template.to_string(),
            placeholder: after.to_string(),
        })?;
        match &after[..close] {
            "prefix" => out.push_str(&ctx.prefix),
            "database" => out.push_str(&ctx.database),
            other => {
                return Err(DiffError::UnknownPlaceholder {
                    template: template.to_string(),
                    placeholder: other.to_string(),
                }
                .into())
            }
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Evaluate every plan entry against one context
///
/// # Errors
///
/// `Render` when a path template cannot be expanded.
pub fn render_plan(plan: &[ArtifactTemplate], ctx: &RenderContext) -> Result<Vec<RenderedArtifact>> {
    plan.iter()
        .map(|template| {
            Ok(RenderedArtifact {
                path: expand_path(template.path_template, ctx)?,
                body: (template.body)(ctx),
                mode: template.mode,
            })
        })
        .collect()
}
