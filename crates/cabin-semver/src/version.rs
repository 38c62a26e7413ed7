use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::identifier::{cmp_identifier_lists, format_identifier_list, Identifier};
use crate::parser::Parser;

/// A dotted list of pre-release identifiers, e.g. `alpha.1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Prerelease(pub(crate) Vec<Identifier>);

impl Prerelease {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn identifiers(&self) -> &[Identifier] {
        &self.0
    }
}

impl fmt::Display for Prerelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_identifier_list(&self.0))
    }
}

/// A dotted list of build-metadata identifiers, e.g. `build.42`.
///
/// Ignored for SemVer precedence; `cabin` additionally uses it as a
/// secondary, deterministic tie-break sort key (see `Version::cmp`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BuildMetadata(pub(crate) Vec<Identifier>);

impl BuildMetadata {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn identifiers(&self) -> &[Identifier] {
        &self.0
    }
}

impl fmt::Display for BuildMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_identifier_list(&self.0))
    }
}

/// A parsed SemVer 2.0.0 version.
#[derive(Debug, Clone, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Prerelease,
    pub build: BuildMetadata,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            pre: Prerelease::default(),
            build: BuildMetadata::default(),
        }
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Parser::new(input).parse_version()
    }

    pub fn is_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre.is_empty() {
            write!(f, "-{}", self.pre)?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build)?;
        }
        Ok(())
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    /// SemVer 2.0.0 precedence on (major, minor, patch, pre-release),
    /// with build metadata compared last as a deterministic tie-break
    /// that the SemVer spec itself leaves unordered.
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.cmp(&other.minor))
            .then_with(|| self.patch.cmp(&other.patch))
            .then_with(|| cmp_prerelease(&self.pre, &other.pre))
            .then_with(|| cmp_identifier_lists(&self.build.0, &other.build.0))
    }
}

/// A version with no pre-release has higher precedence than one with a
/// pre-release; otherwise identifiers compare per SemVer's prefix rule.
fn cmp_prerelease(a: &Prerelease, b: &Prerelease) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => cmp_identifier_lists(&a.0, &b.0),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trips() {
        for s in [
            "1.2.3",
            "0.0.0",
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-0.3.7",
            "1.0.0-x-y-z",
            "1.0.0+build.42",
            "1.0.0-beta+exp.sha.5114f85",
        ] {
            assert_eq!(Version::parse(s).unwrap().to_string(), s);
        }
    }

    #[test]
    fn canonical_precedence_chain() {
        let chain = [
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-alpha.beta",
            "1.0.0-beta",
            "1.0.0-beta.2",
            "1.0.0-beta.11",
            "1.0.0-rc.1",
            "1.0.0",
        ];
        let versions: Vec<Version> = chain.iter().map(|s| Version::parse(s).unwrap()).collect();
        for window in versions.windows(2) {
            assert!(window[0] < window[1], "{} should be < {}", window[0], window[1]);
        }
    }

    #[test]
    fn rejects_leading_zero() {
        assert!(Version::parse("01.2.3").is_err());
        assert!(Version::parse("1.2.3-01").is_err());
    }

    #[test]
    fn rejects_overflow() {
        assert!(Version::parse("18446744073709551616.0.0").is_err());
    }
}
