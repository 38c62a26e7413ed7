use std::cmp::Ordering;
use std::fmt;

/// A single dot-separated component of a pre-release or build string.
///
/// Numeric identifiers (`[0-9]+` with no leading zero, "0" excepted)
/// compare numerically; any identifier containing a letter or a hyphen
/// compares as plain text. Per SemVer 2.0.0, a numeric identifier always
/// has lower precedence than an alphanumeric one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Numeric(u64),
    AlphaNumeric(String),
}

impl Identifier {
    pub(crate) fn numeric(raw: &str) -> Option<u64> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if raw.len() > 1 && raw.starts_with('0') {
            return None;
        }
        raw.parse().ok()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{n}"),
            Identifier::AlphaNumeric(s) => write!(f, "{s}"),
        }
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Identifier::Numeric(a), Identifier::Numeric(b)) => a.cmp(b),
            (Identifier::AlphaNumeric(a), Identifier::AlphaNumeric(b)) => a.cmp(b),
            (Identifier::Numeric(_), Identifier::AlphaNumeric(_)) => Ordering::Less,
            (Identifier::AlphaNumeric(_), Identifier::Numeric(_)) => Ordering::Greater,
        }
    }
}

/// Compares two dot-separated identifier lists by SemVer's prefix rule:
/// identifiers are compared pairwise until one differs, and if every
/// shared identifier is equal, the shorter list sorts first.
pub(crate) fn cmp_identifier_lists(a: &[Identifier], b: &[Identifier]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        let ord = x.cmp(y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

pub(crate) fn format_identifier_list(ids: &[Identifier]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}
