use serde::Deserialize;

use crate::error::{self, Error};
use crate::validate::validate_flag;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub cxxflags: Vec<String>,
    pub ldflags: Vec<String>,
    pub lto: bool,
    pub debug: bool,
    pub comp_db: bool,
    pub opt_level: u8,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawProfileOverride {
    #[serde(default)]
    pub cxxflags: Vec<String>,
    #[serde(default)]
    pub ldflags: Vec<String>,
    pub lto: Option<bool>,
    pub debug: Option<bool>,
    #[serde(rename = "comp-db")]
    pub comp_db: Option<bool>,
    #[serde(rename = "opt-level")]
    pub opt_level: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawProfileSection {
    #[serde(default)]
    pub cxxflags: Vec<String>,
    #[serde(default)]
    pub ldflags: Vec<String>,
    pub lto: Option<bool>,
    pub debug: Option<bool>,
    #[serde(rename = "comp-db")]
    pub comp_db: Option<bool>,
    #[serde(rename = "opt-level")]
    pub opt_level: Option<u8>,
    #[serde(default)]
    pub dev: RawProfileOverride,
    #[serde(default)]
    pub release: RawProfileOverride,
}

struct Defaults {
    debug: bool,
    opt_level: u8,
}

fn build_profile(
    base: &RawProfileSection,
    over: &RawProfileOverride,
    defaults: Defaults,
    name: &str,
) -> Result<Profile, Error> {
    let mut cxxflags = base.cxxflags.clone();
    cxxflags.extend(over.cxxflags.iter().cloned());
    let mut ldflags = base.ldflags.clone();
    ldflags.extend(over.ldflags.iter().cloned());

    for flag in cxxflags.iter().chain(ldflags.iter()) {
        validate_flag(flag)
            .map_err(|reason| error::invalid(format!("profile.{name} flag"), reason))?;
    }

    let opt_level = over.opt_level.or(base.opt_level).unwrap_or(defaults.opt_level);
    if opt_level > 3 {
        return Err(error::invalid(
            format!("profile.{name}.opt-level"),
            format!("must be <= 3, got {opt_level}"),
        ));
    }

    Ok(Profile {
        cxxflags,
        ldflags,
        lto: over.lto.or(base.lto).unwrap_or(false),
        debug: over.debug.or(base.debug).unwrap_or(defaults.debug),
        comp_db: over.comp_db.or(base.comp_db).unwrap_or(false),
        opt_level,
    })
}

pub(crate) fn build_profiles(
    raw: &Option<RawProfileSection>,
) -> Result<(Profile, Profile), Error> {
    let empty_base = RawProfileSection::default();
    let base = raw.as_ref().unwrap_or(&empty_base);

    let dev = build_profile(
        base,
        &base.dev,
        Defaults { debug: true, opt_level: 0 },
        "dev",
    )?;
    let release = build_profile(
        base,
        &base.release,
        Defaults { debug: false, opt_level: 3 },
        "release",
    )?;
    Ok((dev, release))
}
