mod shared;

pub mod hover;

pub use self::hover::{ExtractionError, PackageHover, Presenter, SUMMARY_MAX_LEN};
pub use self::shared::MarkdownBuilder;
