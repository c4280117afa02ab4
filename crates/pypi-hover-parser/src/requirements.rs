use crate::utils::base_name;
use crate::{CursorContext, ManifestFormat};

/**
    Line-based requirement files (`requirements.txt` and friends):
    one requirement per line, name first, then extras and version
    specifiers.
*/
#[derive(Debug, Clone, Copy)]
pub struct RequirementsTxt;

impl RequirementsTxt {
    fn requirement_name<'a>(ctx: &CursorContext<'a>) -> Option<&'a str> {
        let (_, line) = ctx.current_line()?;
        parse_requirement_name(line)
    }
}

impl ManifestFormat for RequirementsTxt {
    fn is_supported(&self, file_name: &str) -> bool {
        let name = base_name(file_name);
        name.ends_with(".txt") && name.contains("requirements")
    }

    fn is_focused(&self, ctx: &CursorContext) -> bool {
        Self::requirement_name(ctx).is_some()
    }

    fn extract_name(&self, ctx: &CursorContext) -> Option<String> {
        Some(Self::requirement_name(ctx)?.to_string())
    }
}

/**
    Extracts the package name from one requirement line.

    Comments, blank lines, and option lines (`-r`, `-e`, `--hash`, ...)
    carry no package name. The name ends at the first extras bracket,
    version specifier, environment marker, or inline comment.
*/
fn parse_requirement_name(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
        return None;
    }

    let end = line
        .find(['[', '<', '>', '=', '!', '~', ';', '#', ' '])
        .unwrap_or(line.len());

    let name = line[..end].trim();
    if name.is_empty() { None } else { Some(name) }
}
