use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use pypi_hover_clients::pypi::models::RegistryMetadata;

use crate::shared::MarkdownBuilder;

/// Maximum display length of a package summary, ellipsis included.
pub const SUMMARY_MAX_LEN: usize = 400;

const ELLIPSIS: &str = "...";
const CLOSE_GLYPH: char = '\u{00D7}';

/**
    Raised when a raw metadata record lacks a field the display
    shaping needs. Carries the offending record for diagnosability.
*/
#[derive(Debug, Error)]
#[error("package data extraction failed for \"{record}\": missing '{field}'")]
pub struct ExtractionError {
    field: String,
    record: String,
}

impl ExtractionError {
    fn new(field: impl Into<String>, meta: &RegistryMetadata) -> Self {
        Self {
            field: field.into(),
            record: meta.as_value().to_string(),
        }
    }
}

/**
    The shaped, display-ready view of a package metadata record.

    This is the contract with whatever renders the popup - raw
    records stay in the cache untruncated, shaping happens on the
    way out.
*/
#[derive(Debug, Clone, Serialize)]
pub struct PackageHover {
    pub name: String,
    pub summary: String,
    pub url_pypi: String,
    pub url_homepage: String,
    pub author: String,
    pub close_glyph: char,
}

impl PackageHover {
    /**
        Shapes a raw registry record for display.

        # Errors

        Fails with [`ExtractionError`] when the record has no `info`
        section or that section is missing any of the displayed
        fields. A `null` field counts as missing - the popup needs
        text, and `null` carries none.
    */
    pub fn from_metadata(meta: &RegistryMetadata) -> Result<Self, ExtractionError> {
        let info = meta.info().ok_or_else(|| ExtractionError::new("info", meta))?;

        let summary = required_str(info, "summary", meta)?;

        Ok(Self {
            name: required_str(info, "name", meta)?.to_string(),
            summary: truncate(summary, SUMMARY_MAX_LEN),
            url_pypi: required_str(info, "package_url", meta)?.to_string(),
            url_homepage: required_str(info, "home_page", meta)?.to_string(),
            author: required_str(info, "author", meta)?.to_string(),
            close_glyph: CLOSE_GLYPH,
        })
    }

    /// Renders the popup body, mirroring the editor popup template.
    #[must_use]
    pub fn render_markdown(&self) -> String {
        let mut md = MarkdownBuilder::new();

        md.h1(&self.name);
        md.br();
        md.p(&self.summary);
        md.br();
        md.list_item(&format!(
            "Page: [PyPI]({}) / [Homepage]({})",
            self.url_pypi, self.url_homepage
        ));
        md.list_item(&format!("Author: {}", self.author));

        md.build()
    }
}

/**
    Consumer of shaped hover records.

    The editor-facing half of the system implements this - the core
    never talks to popup or status-bar primitives directly.
*/
pub trait Presenter {
    fn show(&mut self, hover: &PackageHover);
    fn dismiss(&mut self);
}

fn required_str<'a>(
    info: &'a Value,
    field: &str,
    meta: &RegistryMetadata,
) -> Result<&'a str, ExtractionError> {
    info.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| ExtractionError::new(field, meta))
}

/**
    Truncates to at most `max` characters, replacing the tail
    with an ellipsis when anything had to be cut.
*/
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max - ELLIPSIS.len()).collect();
        kept + ELLIPSIS
    } else {
        s.to_string()
    }
}
