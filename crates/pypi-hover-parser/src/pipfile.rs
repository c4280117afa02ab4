use crate::utils::{base_name, unquote};
use crate::{CursorContext, ManifestFormat};

const PACKAGE_TABLES: &[&str] = &["packages", "dev-packages"];

/**
    The `Pipfile` manifest format: TOML-style tables where each key
    of `[packages]` and `[dev-packages]` is a package name.
*/
#[derive(Debug, Clone, Copy)]
pub struct Pipfile;

impl Pipfile {
    /// The table header the cursor line belongs to, if any.
    fn enclosing_table<'a>(ctx: &CursorContext<'a>) -> Option<&'a str> {
        let (line_start, _) = ctx.current_line()?;

        let mut table = None;
        let mut start = 0;
        for line in ctx.text.split_inclusive('\n') {
            if start > line_start {
                break;
            }
            if let Some(header) = parse_table_header(line) {
                table = Some(header);
            }
            start += line.len();
        }

        table
    }

    fn key_under_cursor<'a>(ctx: &CursorContext<'a>) -> Option<&'a str> {
        let (line_start, line) = ctx.current_line()?;

        if parse_table_header(line).is_some() {
            return None;
        }

        let eq = line.find('=')?;
        let column = ctx.offset - line_start;
        if column >= eq {
            return None;
        }

        let key = unquote(&line[..eq]);
        if key.is_empty() { None } else { Some(key) }
    }
}

impl ManifestFormat for Pipfile {
    fn is_supported(&self, file_name: &str) -> bool {
        base_name(file_name) == "Pipfile"
    }

    fn is_focused(&self, ctx: &CursorContext) -> bool {
        Self::enclosing_table(ctx).is_some_and(|t| PACKAGE_TABLES.contains(&t))
            && Self::key_under_cursor(ctx).is_some()
    }

    fn extract_name(&self, ctx: &CursorContext) -> Option<String> {
        Some(Self::key_under_cursor(ctx)?.to_string())
    }
}

fn parse_table_header(line: &str) -> Option<&str> {
    let line = line.trim();
    line.strip_prefix('[')?.strip_suffix(']')
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "[packages]\nrequests = \"*\"\n\"Django\" = \">=4.0\"\n\n[dev-packages]\npytest = \"*\"\n\n[scripts]\ntest = \"pytest\"\n";

    fn ctx_at(offset: usize) -> CursorContext<'static> {
        CursorContext {
            file_name: "Pipfile",
            text: TEXT,
            offset,
        }
    }

    #[test]
    fn supported_by_basename_only() {
        assert!(Pipfile.is_supported("Pipfile"));
        assert!(Pipfile.is_supported("/some/dir/Pipfile"));
        assert!(!Pipfile.is_supported("Pipfile.lock"));
        assert!(!Pipfile.is_supported("requirements.txt"));
    }

    #[test]
    fn extracts_key_in_packages_table() {
        let ctx = ctx_at(TEXT.find("requests").unwrap());
        assert!(Pipfile.is_focused(&ctx));
        assert_eq!(Pipfile.extract_name(&ctx).as_deref(), Some("requests"));
    }

    #[test]
    fn extracts_quoted_key() {
        let ctx = ctx_at(TEXT.find("Django").unwrap());
        assert_eq!(Pipfile.extract_name(&ctx).as_deref(), Some("Django"));
    }

    #[test]
    fn extracts_key_in_dev_packages_table() {
        let ctx = ctx_at(TEXT.find("pytest =").unwrap());
        assert!(Pipfile.is_focused(&ctx));
        assert_eq!(Pipfile.extract_name(&ctx).as_deref(), Some("pytest"));
    }

    #[test]
    fn ignores_other_tables() {
        let ctx = ctx_at(TEXT.rfind("test = \"pytest\"").unwrap());
        assert!(!Pipfile.is_focused(&ctx));
    }

    #[test]
    fn ignores_table_header_lines() {
        let ctx = ctx_at(TEXT.find("[dev-packages]").unwrap() + 2);
        assert!(!Pipfile.is_focused(&ctx));
    }

    #[test]
    fn ignores_cursor_past_the_key() {
        let offset = TEXT.find("requests = \"*\"").unwrap() + "requests = \"".len();
        assert!(!Pipfile.is_focused(&ctx_at(offset)));
    }
}
