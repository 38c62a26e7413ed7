mod cache_dir;
mod error;
mod install;
mod pkgconfig;

pub use error::Error;
pub use install::InstallDependencies;
