mod registry;

pub use self::registry::*;
