//! Compiler/linker flag model and C++ compiler detection.
//!
//! `CompilerOptions` is the typed accumulator that dependency
//! installation (`cabin-deps`) and profile assembly both feed into via
//! `merge`, consumed by the build graph (`cabin-build`) to produce
//! compile and link command lines.

mod assemble;
mod detect;
mod error;
mod options;

pub use assemble::{assemble_cflags, assemble_ldflags, BuildInfo, CFlagsParams};
pub use detect::detect_cxx;
pub use error::Error;
pub use options::{CFlags, CompilerOptions, IncludeDir, LdFlags, Lib, LibDir, Macro};
