mod error;
mod paths;
mod settings;
mod store;

pub use self::error::*;
pub use self::paths::*;
pub use self::settings::*;
pub use self::store::*;
