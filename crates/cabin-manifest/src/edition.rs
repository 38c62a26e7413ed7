use std::fmt;

use crate::error::{self, Error};

/// A C++ language-standard tag. The original source token (`"20"`,
/// `"2a"`, ...) is retained alongside the canonical standard so
/// diagnostics can echo back exactly what the user wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Standard {
    Cpp98,
    Cpp03,
    Cpp11,
    Cpp14,
    Cpp17,
    Cpp20,
    Cpp23,
    Cpp26,
}

impl Standard {
    /// The two-digit year used in `-std=c++<year>`.
    pub fn year_code(&self) -> &'static str {
        match self {
            Standard::Cpp98 => "98",
            Standard::Cpp03 => "03",
            Standard::Cpp11 => "11",
            Standard::Cpp14 => "14",
            Standard::Cpp17 => "17",
            Standard::Cpp20 => "20",
            Standard::Cpp23 => "23",
            Standard::Cpp26 => "26",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edition {
    pub standard: Standard,
    original: String,
}

impl Edition {
    pub fn code(&self) -> &'static str {
        self.standard.year_code()
    }

    pub fn parse(raw: &str) -> Result<Self, Error> {
        let standard = match raw {
            "98" => Standard::Cpp98,
            "03" => Standard::Cpp03,
            "0x" | "11" => Standard::Cpp11,
            "1y" | "14" => Standard::Cpp14,
            "1z" | "17" => Standard::Cpp17,
            "2a" | "20" => Standard::Cpp20,
            "2b" | "23" => Standard::Cpp23,
            "2c" => Standard::Cpp26,
            other => {
                return Err(error::invalid(
                    "package edition",
                    format!("unrecognized edition code '{other}'"),
                ))
            }
        };
        Ok(Edition {
            standard,
            original: raw.to_string(),
        })
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn aliases_collapse_to_canonical_standard() {
        assert_eq!(Edition::parse("0x").unwrap().standard, Standard::Cpp11);
        assert_eq!(Edition::parse("11").unwrap().standard, Standard::Cpp11);
        assert_eq!(Edition::parse("2a").unwrap().standard, Standard::Cpp20);
        assert_eq!(Edition::parse("20").unwrap().standard, Standard::Cpp20);
    }

    #[test]
    fn rejects_unknown_code() {
        assert!(Edition::parse("99").is_err());
    }

    #[test]
    fn retains_original_token() {
        let edition = Edition::parse("2a").unwrap();
        assert_eq!(edition.to_string(), "2a");
        assert_eq!(edition.code(), "20");
    }
}
