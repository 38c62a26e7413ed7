mod compdb;
mod config;
mod dag;
mod discover;
mod error;
mod expand;
mod freshness;
mod layout;
mod makefile;
mod mm;
mod targets;
mod test_discovery;
mod variables;

pub use compdb::{render as render_compile_commands, CompileCommand};
pub use config::{BuildConfig, Constructed};
pub use dag::Dag;
pub use discover::{all_sources, find_entry_points, is_header, is_source, EntryPoints};
pub use error::Error;
pub use freshness::is_fresh;
pub use layout::{Layout, ProfileKind};
pub use makefile::Makefile;
pub use targets::Target;
pub use variables::{VarType, Variable};
