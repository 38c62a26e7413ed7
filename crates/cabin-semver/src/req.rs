use std::fmt;

use crate::error::ParseError;
use crate::lexer::TokenKind;
use crate::parser::Parser;
use crate::version::{Prerelease, Version};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Exact,
    Greater,
    GreaterEq,
    Less,
    LessEq,
    Tilde,
    Caret,
    Wildcard,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Op::Exact => "=",
            Op::Greater => ">",
            Op::GreaterEq => ">=",
            Op::Less => "<",
            Op::LessEq => "<=",
            Op::Tilde => "~",
            Op::Caret => "^",
            Op::Wildcard => "",
        };
        write!(f, "{s}")
    }
}

/// A single comparator such as `^1.2`, `~1`, `>=2.0.0`, or `1.*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparator {
    pub op: Op,
    pub major: Option<u64>,
    pub minor: Option<u64>,
    pub patch: Option<u64>,
    pub pre: Prerelease,
}

impl Comparator {
    fn lower_bound(&self) -> Version {
        Version {
            major: self.major.unwrap_or(0),
            minor: self.minor.unwrap_or(0),
            patch: self.patch.unwrap_or(0),
            pre: self.pre.clone(),
            build: Default::default(),
        }
    }

    /// Exclusive upper bound for `~`: bumps the least-specific named
    /// component (patch if given, else minor, else major).
    fn tilde_upper(&self) -> Version {
        let major = self.major.unwrap_or(0);
        match (self.minor, self.patch) {
            (Some(minor), _) => Version::new(major, minor + 1, 0),
            (None, _) => Version::new(major + 1, 0, 0),
        }
    }

    /// Exclusive upper bound for `^`, per Cargo's caret semantics: bumps
    /// the first nonzero of major/minor/patch, or the next unspecified
    /// component when all given components are zero.
    fn caret_upper(&self) -> Version {
        let major = self.major.unwrap_or(0);
        if major > 0 {
            return Version::new(major + 1, 0, 0);
        }
        match (self.minor, self.patch) {
            (Some(minor), _) if minor > 0 => Version::new(0, minor + 1, 0),
            (Some(_), Some(patch)) => Version::new(0, 0, patch + 1),
            (Some(_), None) => Version::new(0, 1, 0),
            (None, _) => Version::new(1, 0, 0),
        }
    }

    fn matches(&self, version: &Version) -> bool {
        if version.is_prerelease() {
            let same_triple = self.major.map_or(true, |m| m == version.major)
                && self.minor.map_or(true, |m| m == version.minor)
                && self.patch.map_or(true, |p| p == version.patch);
            if !(same_triple && !self.pre.is_empty()) {
                return false;
            }
        }

        match self.op {
            Op::Wildcard => {
                self.major.map_or(true, |m| m == version.major)
                    && self.minor.map_or(true, |m| m == version.minor)
                    && self.patch.map_or(true, |p| p == version.patch)
            }
            Op::Exact => {
                let major_ok = self.major.map_or(true, |m| m == version.major);
                let minor_ok = self.minor.map_or(true, |m| m == version.minor);
                let patch_ok = self.patch.map_or(true, |p| p == version.patch);
                major_ok && minor_ok && patch_ok && {
                    if self.patch.is_some() {
                        self.pre == version.pre
                    } else {
                        true
                    }
                }
            }
            Op::Greater => *version > self.lower_bound(),
            Op::GreaterEq => *version >= self.lower_bound(),
            Op::Less => *version < self.lower_bound(),
            Op::LessEq => *version <= self.lower_bound(),
            Op::Tilde => *version >= self.lower_bound() && *version < self.tilde_upper(),
            Op::Caret => *version >= self.lower_bound() && *version < self.caret_upper(),
        }
    }

    fn to_pkg_config_clause(&self, pkg_name: &str) -> String {
        match self.op {
            Op::Wildcard => pkg_name.to_string(),
            Op::Exact => format!("{pkg_name} = {}", self.lower_bound_triple()),
            Op::Greater => format!("{pkg_name} > {}", self.lower_bound_triple()),
            Op::GreaterEq => format!("{pkg_name} >= {}", self.lower_bound_triple()),
            Op::Less => format!("{pkg_name} < {}", self.lower_bound_triple()),
            Op::LessEq => format!("{pkg_name} <= {}", self.lower_bound_triple()),
            Op::Tilde => format!(
                "{pkg_name} >= {}, {pkg_name} < {}",
                self.lower_bound_triple(),
                self.tilde_upper()
            ),
            Op::Caret => format!(
                "{pkg_name} >= {}, {pkg_name} < {}",
                self.lower_bound_triple(),
                self.caret_upper()
            ),
        }
    }

    /// pkg-config has no pre-release concept; only major.minor.patch is
    /// rendered (see the Open Question decision in `DESIGN.md`).
    fn lower_bound_triple(&self) -> String {
        format!(
            "{}.{}.{}",
            self.major.unwrap_or(0),
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0)
        )
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.op == Op::Wildcard {
            write!(f, "{}", self.lower_bound_triple().replace(".0.0", ".*"))?;
            return Ok(());
        }
        write!(f, "{}{}", self.op, self.major.unwrap_or(0))?;
        if let Some(minor) = self.minor {
            write!(f, ".{minor}")?;
            if let Some(patch) = self.patch {
                write!(f, ".{patch}")?;
            }
        }
        if !self.pre.is_empty() {
            write!(f, "-{}", self.pre)?;
        }
        Ok(())
    }
}

/// A Cargo-style version requirement: a comma-separated, intersected
/// list of comparators that a candidate `Version` must satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionReq {
    pub comparators: Vec<Comparator>,
}

impl VersionReq {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Parser::new(input).parse_version_req()
    }

    pub fn matches(&self, version: &Version) -> bool {
        self.comparators.iter().all(|c| c.matches(version))
    }

    /// Renders this requirement as a pkg-config version-constraint
    /// expression for the given package name, e.g. `foo >= 1.2.0, foo <
    /// 2.0.0`.
    pub fn to_pkg_config_string(&self, pkg_name: &str) -> String {
        self.comparators
            .iter()
            .map(|c| c.to_pkg_config_clause(pkg_name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for VersionReq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.comparators.iter().map(ToString::to_string).collect();
        write!(f, "{}", rendered.join(", "))
    }
}

impl<'a> Parser<'a> {
    pub(crate) fn parse_version_req(mut self) -> Result<VersionReq, ParseError> {
        let mut comparators = Vec::new();
        loop {
            comparators.push(self.parse_comparator()?);
            match self.peek().kind.clone() {
                TokenKind::Unknown(',') => {
                    self.advance();
                }
                TokenKind::Eof => break,
                _ => {
                    let tok = self.peek().clone();
                    return Err(self.error_at(tok.start, tok.end, "expected ',' or end of requirement"));
                }
            }
        }
        Ok(VersionReq { comparators })
    }

    fn parse_op(&mut self) -> Op {
        match self.peek().kind.clone() {
            TokenKind::Unknown('^') => {
                self.advance();
                Op::Caret
            }
            TokenKind::Unknown('~') => {
                self.advance();
                Op::Tilde
            }
            TokenKind::Unknown('=') => {
                self.advance();
                Op::Exact
            }
            TokenKind::Unknown('>') => {
                self.advance();
                if matches!(self.peek().kind, TokenKind::Unknown('=')) {
                    self.advance();
                    Op::GreaterEq
                } else {
                    Op::Greater
                }
            }
            TokenKind::Unknown('<') => {
                self.advance();
                if matches!(self.peek().kind, TokenKind::Unknown('=')) {
                    self.advance();
                    Op::LessEq
                } else {
                    Op::Less
                }
            }
            _ => Op::Caret,
        }
    }

    fn parse_comparator(&mut self) -> Result<Comparator, ParseError> {
        if matches!(self.peek().kind, TokenKind::Unknown('*')) {
            self.advance();
            return Ok(Comparator {
                op: Op::Wildcard,
                major: None,
                minor: None,
                patch: None,
                pre: Prerelease::default(),
            });
        }

        let op = self.parse_op();

        if matches!(self.peek().kind, TokenKind::Unknown('*')) {
            self.advance();
            return Ok(Comparator {
                op: Op::Wildcard,
                major: None,
                minor: None,
                patch: None,
                pre: Prerelease::default(),
            });
        }

        let major = self.expect_num_component("major version")?;
        let mut minor = None;
        let mut patch = None;
        let mut pre = Prerelease::default();
        let mut wildcard = false;

        if matches!(self.peek().kind, TokenKind::Dot) {
            self.advance();
            if matches!(self.peek().kind, TokenKind::Unknown('*')) {
                self.advance();
                wildcard = true;
            } else {
                minor = Some(self.expect_num_component("minor version")?);
                if matches!(self.peek().kind, TokenKind::Dot) {
                    self.advance();
                    if matches!(self.peek().kind, TokenKind::Unknown('*')) {
                        self.advance();
                        wildcard = true;
                    } else {
                        patch = Some(self.expect_num_component("patch version")?);
                    }
                }
            }
        }

        if !wildcard && matches!(self.peek().kind, TokenKind::Hyphen) {
            self.advance();
            pre = Prerelease(self.parse_identifier_list("pre-release identifier")?);
        }

        Ok(Comparator {
            op: if wildcard { Op::Wildcard } else { op },
            major: Some(major),
            minor,
            patch,
            pre,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn caret_default() {
        let req = VersionReq::parse("1.2.3").unwrap();
        assert!(req.matches(&v("1.2.3")));
        assert!(req.matches(&v("1.9.0")));
        assert!(!req.matches(&v("2.0.0")));
        assert!(!req.matches(&v("1.2.2")));
    }

    #[test]
    fn caret_zero_major() {
        let req = VersionReq::parse("^0.2.3").unwrap();
        assert!(req.matches(&v("0.2.3")));
        assert!(!req.matches(&v("0.3.0")));
    }

    #[test]
    fn tilde() {
        let req = VersionReq::parse("~1.2").unwrap();
        assert!(req.matches(&v("1.2.9")));
        assert!(!req.matches(&v("1.3.0")));
    }

    #[test]
    fn wildcard_and_comparators() {
        let req = VersionReq::parse(">=1.0.0, <2.0.0").unwrap();
        assert!(req.matches(&v("1.5.0")));
        assert!(!req.matches(&v("2.0.0")));

        let req = VersionReq::parse("1.*").unwrap();
        assert!(req.matches(&v("1.9.9")));
        assert!(!req.matches(&v("2.0.0")));
    }

    #[test]
    fn pkg_config_rendering() {
        let req = VersionReq::parse("^1.2.0").unwrap();
        assert_eq!(req.to_pkg_config_string("libfoo"), "libfoo >= 1.2.0, libfoo < 2.0.0");
    }

    #[test]
    fn prerelease_only_matches_same_triple() {
        let req = VersionReq::parse("^1.2.3-alpha").unwrap();
        assert!(req.matches(&v("1.2.3-alpha")));
        assert!(!req.matches(&v("1.2.4-alpha")));
        // A stable candidate is unaffected by the gate; it still must
        // fall within the caret range computed from the bound.
        assert!(req.matches(&v("1.2.3")));

        let plain = VersionReq::parse("^1.2.3").unwrap();
        assert!(!plain.matches(&v("1.2.3-alpha")));
    }
}
