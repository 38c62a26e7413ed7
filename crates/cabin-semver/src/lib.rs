//! Hand-rolled SemVer 2.0.0 parsing and Cargo-style version-requirement
//! matching, with no dependency on the `semver` crate: this is the one
//! component of `cabin` whose parser, error messages, and precedence
//! rules are implemented from the grammar directly.

mod error;
mod identifier;
mod lexer;
mod parser;
mod req;
mod version;

pub use error::ParseError;
pub use identifier::Identifier;
pub use req::{Comparator, Op, VersionReq};
pub use version::{BuildMetadata, Prerelease, Version};
