#[macro_use]
mod ucd_type;

pub mod aliases;
pub mod scripts;
pub mod source;

pub use self::aliases::{ValueAlias, ValueAliases};
pub use self::scripts::ScriptNames;
pub use self::source::{UcdLine, UcdSource};
pub use self::ucd_type::*;
