mod markdown_builder;

pub use self::markdown_builder::*;
