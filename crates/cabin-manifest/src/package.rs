use cabin_semver::Version;

use crate::edition::Edition;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub edition: Edition,
    pub version: Version,
}
