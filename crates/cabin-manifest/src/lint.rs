use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Lint {
    #[serde(default)]
    pub cpplint: CpplintConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CpplintConfig {
    #[serde(default)]
    pub filters: Vec<String>,
}
