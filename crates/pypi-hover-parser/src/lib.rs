mod pipfile;
mod requirements;
mod utils;

pub use self::pipfile::Pipfile;
pub use self::requirements::RequirementsTxt;

/**
    A cursor position inside a manifest document.

    `offset` is a byte offset into `text`; `file_name` may be a full
    path, only its base name is inspected.
*/
#[derive(Debug, Clone, Copy)]
pub struct CursorContext<'a> {
    pub file_name: &'a str,
    pub text: &'a str,
    pub offset: usize,
}

impl<'a> CursorContext<'a> {
    /// The line containing the cursor, as (line start offset, line text).
    pub(crate) fn current_line(&self) -> Option<(usize, &'a str)> {
        if self.offset > self.text.len() {
            return None;
        }

        let mut start = 0;
        for line in self.text.split_inclusive('\n') {
            let end = start + line.len();
            if self.offset < end || (self.offset == end && !line.ends_with('\n')) {
                return Some((start, line.trim_end_matches(['\n', '\r'])));
            }
            start = end;
        }

        None
    }
}

/**
    A single supported manifest flavor.

    Implementations decide whether a file name belongs to them,
    whether a cursor position sits on a package-name token, and how
    to extract that token.
*/
pub trait ManifestFormat {
    fn is_supported(&self, file_name: &str) -> bool;
    fn is_focused(&self, ctx: &CursorContext) -> bool;
    fn extract_name(&self, ctx: &CursorContext) -> Option<String>;
}

// Fixed registration order - the first matching format wins,
// so precedence between formats is deterministic.
static FORMATS: &[&(dyn ManifestFormat + Sync)] = &[&Pipfile, &RequirementsTxt];

/**
    Finds the package name under the cursor, if any.

    Tries each known manifest format in registration order and
    extracts from the first one that recognizes both the file
    and the cursor position.
*/
#[must_use]
pub fn locate(ctx: &CursorContext) -> Option<String> {
    FORMATS
        .iter()
        .find(|format| format.is_supported(ctx.file_name) && format.is_focused(ctx))
        .and_then(|format| format.extract_name(ctx))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIPFILE: &str = "[packages]\nrequests = \"*\"\n\n[dev-packages]\npytest = \"*\"\n";

    #[test]
    fn locate_finds_pipfile_package() {
        let ctx = CursorContext {
            file_name: "/home/user/project/Pipfile",
            text: PIPFILE,
            offset: PIPFILE.find("requests").unwrap() + 3,
        };

        assert_eq!(locate(&ctx).as_deref(), Some("requests"));
    }

    #[test]
    fn locate_finds_requirements_package() {
        let text = "# deps\nflask>=2.0\n";
        let ctx = CursorContext {
            file_name: "requirements.txt",
            text,
            offset: text.find("flask").unwrap() + 2,
        };

        assert_eq!(locate(&ctx).as_deref(), Some("flask"));
    }

    #[test]
    fn locate_ignores_unsupported_files() {
        let ctx = CursorContext {
            file_name: "Cargo.toml",
            text: PIPFILE,
            offset: 15,
        };

        assert_eq!(locate(&ctx), None);
    }

    #[test]
    fn current_line_maps_offsets() {
        let ctx = CursorContext {
            file_name: "Pipfile",
            text: "abc\ndef\n",
            offset: 5,
        };

        assert_eq!(ctx.current_line(), Some((4, "def")));
    }

    #[test]
    fn current_line_out_of_bounds_is_none() {
        let ctx = CursorContext {
            file_name: "Pipfile",
            text: "abc\n",
            offset: 99,
        };

        assert_eq!(ctx.current_line(), None);
    }
}
