//! Storefront catalog: the countries and languages a picker offers.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_CATALOG: &str = include_str!("../assets/catalog.toml");

/// Errors raised while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported catalog format for {path} (expected .toml or .json)")]
    UnsupportedFormat { path: PathBuf },

    #[error("catalog lists country '{value}' more than once")]
    DuplicateCountry { value: String },

    #[error("catalog country #{index} has an empty {field}")]
    EmptyField { index: usize, field: &'static str },

    #[error("catalog does not list any countries")]
    NoCountries,
}

/// One country or region offered by the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Country {
    pub name: String,
    pub iso: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Listed in the popular sub-list above the full list.
    #[serde(default)]
    pub popular: bool,
    /// Selection token; the ISO code when unset.
    #[serde(default)]
    pub value: Option<String>,
}

impl Country {
    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or(&self.iso)
    }
}

/// One storefront language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

/// Countries and languages rendered into the picker markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Catalog {
    /// Live-region template; `[count]` is replaced with the result count.
    pub results_template: Option<String>,
    pub current_country: Option<String>,
    pub current_language: Option<String>,
    pub countries: Vec<Country>,
    pub languages: Vec<Language>,
}

impl Catalog {
    /// The catalog bundled with the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(source)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json_str(source: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(source)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog file, picking the format from its extension.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let read = || {
            fs::read_to_string(path).map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })
        };

        match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&read()?),
            Some("json") => Self::from_json_str(&read()?),
            _ => Err(CatalogError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn country(&self, value: &str) -> Option<&Country> {
        self.countries.iter().find(|country| country.value() == value)
    }

    pub fn language(&self, code: &str) -> Option<&Language> {
        self.languages.iter().find(|language| language.code == code)
    }

    pub fn popular(&self) -> impl Iterator<Item = &Country> {
        self.countries.iter().filter(|country| country.popular)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.countries.is_empty() {
            return Err(CatalogError::NoCountries);
        }

        let mut seen = HashSet::new();
        for (index, country) in self.countries.iter().enumerate() {
            if country.name.trim().is_empty() {
                return Err(CatalogError::EmptyField {
                    index,
                    field: "name",
                });
            }
            if country.value().trim().is_empty() {
                return Err(CatalogError::EmptyField {
                    index,
                    field: "value",
                });
            }
            if !seen.insert(country.value()) {
                return Err(CatalogError::DuplicateCountry {
                    value: country.value().to_string(),
                });
            }
        }
        Ok(())
    }
}
