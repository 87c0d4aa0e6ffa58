//! Fixture files shared by the sanitizer test suites.
//!
//! HTML cases live in TOML, stylesheet cases in JSON. Both carry a `format`
//! marker and unique case ids.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const HTML_CASES_FORMAT_V1: &str = "html-cases-v1";
pub const STYLESHEET_CASES_FORMAT_V1: &str = "stylesheet-cases-v1";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct HtmlCase {
    pub id: String,
    pub input: String,
    pub expected: String,
    /// Name of the policy profile the suite should use; `None` means the
    /// suite default.
    #[serde(default)]
    pub policy: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct StylesheetCase {
    pub id: String,
    pub input: String,
    pub expected: String,
    #[serde(default)]
    pub container_class: Option<String>,
    #[serde(default)]
    pub id_suffix: Option<String>,
    #[serde(default)]
    pub base_uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CaseFile<T> {
    format: String,
    cases: Vec<T>,
}

trait HasId {
    fn id(&self) -> &str;
}

impl HasId for HtmlCase {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for StylesheetCase {
    fn id(&self) -> &str {
        &self.id
    }
}

/// `<crate>/tests/fixtures`, given the crate's `CARGO_MANIFEST_DIR`.
pub fn fixtures_dir(manifest_dir: &str) -> PathBuf {
    Path::new(manifest_dir).join("tests").join("fixtures")
}

fn read(path: &Path) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read fixture {path:?}: {err}"))
}

fn validate<T: HasId>(file: &CaseFile<T>, format: &str, path: &Path) {
    assert_eq!(
        file.format, format,
        "unexpected format marker in {path:?}"
    );
    assert!(!file.cases.is_empty(), "no cases in {path:?}");
    let mut seen = BTreeSet::new();
    for case in &file.cases {
        assert!(
            seen.insert(case.id()),
            "duplicate case id '{}' in {path:?}",
            case.id()
        );
    }
}

fn load<T>(path: &Path, format: &str, parse: fn(&str) -> Result<CaseFile<T>, String>) -> Vec<T>
where
    T: DeserializeOwned + HasId,
{
    let file = parse(&read(path))
        .unwrap_or_else(|err| panic!("failed to parse fixture {path:?}: {err}"));
    validate(&file, format, path);
    file.cases
}

pub fn load_html_cases(path: &Path) -> Vec<HtmlCase> {
    load(path, HTML_CASES_FORMAT_V1, |text| {
        toml::from_str(text).map_err(|err| err.to_string())
    })
}

pub fn load_stylesheet_cases(path: &Path) -> Vec<StylesheetCase> {
    load(path, STYLESHEET_CASES_FORMAT_V1, |text| {
        serde_json::from_str(text).map_err(|err| err.to_string())
    })
}

/// Keeps the cases whose id contains `filter`, when one is given through
/// the `SANITIZER_CASE_FILTER` environment variable.
pub fn filter_from_env<T: Clone>(cases: &[T], id: impl Fn(&T) -> &str) -> Vec<T> {
    match std::env::var("SANITIZER_CASE_FILTER") {
        Ok(filter) if !filter.is_empty() => cases
            .iter()
            .filter(|case| id(case).contains(&filter))
            .cloned()
            .collect(),
        _ => cases.to_vec(),
    }
}
