// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! City catalog and name search.
//!
//! The catalog is a flat list of cities fetched from the travel data API.
//! At build time every city gets a folded (case- and diacritic-free) copy of
//! both name variants so that searches only fold the query.
//!
//! ## Publication
//!
//! A `CityIndex` holds the published catalog behind `RwLock<Arc<_>>`.
//! Building happens outside the lock; publishing swaps the `Arc` in one
//! write. Readers clone the `Arc` and release the lock before searching, so
//! they never observe a partially built catalog and never wait on a build.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Deserialize;
use skyfare_domain::{City, is_iata_code};
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::text::fold;

/// Language whose translation is used as the local-script name by default.
pub const DEFAULT_LOCAL_LANGUAGE: &str = "ru";

/// Default number of results returned by a name search.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Wire shape of one catalog row.
#[derive(Debug, Deserialize)]
struct CityRow {
    code: String,
    name: String,
    #[serde(default)]
    name_translations: Option<HashMap<String, String>>,
    country_code: String,
}

/// Search-ready folded names for one city.
#[derive(Debug, Clone)]
struct NormalizedCityEntry {
    /// Position of the city in `CityCatalog::cities`.
    index: usize,
    normalized_local: String,
    normalized_english: String,
}

impl NormalizedCityEntry {
    fn matches(&self, folded_query: &str) -> bool {
        self.normalized_local.contains(folded_query)
            || self.normalized_english.contains(folded_query)
    }
}

/// An immutable, fully indexed city catalog.
#[derive(Debug, Default)]
pub struct CityCatalog {
    cities: Vec<City>,
    by_code: HashMap<String, usize>,
    entries: Vec<NormalizedCityEntry>,
}

impl CityCatalog {
    /// Decodes a catalog payload and builds its search structures.
    ///
    /// Rows whose code is not three ASCII letters are skipped, as are
    /// repeated codes (the first occurrence wins).
    ///
    /// # Arguments
    ///
    /// * `catalog_bytes` - The raw JSON array of cities
    /// * `local_language` - Translation key used for the local-script name
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Decode` if the payload is not a JSON array of
    /// city rows.
    pub fn build(catalog_bytes: &[u8], local_language: &str) -> Result<Self, CoreError> {
        let rows: Vec<CityRow> = serde_json::from_slice(catalog_bytes)?;

        let mut cities: Vec<City> = Vec::with_capacity(rows.len());
        let mut by_code: HashMap<String, usize> = HashMap::with_capacity(rows.len());
        let mut entries: Vec<NormalizedCityEntry> = Vec::with_capacity(rows.len());

        for row in rows {
            let code: &str = row.code.trim();
            if !is_iata_code(code) {
                warn!(code = %row.code, "Skipping catalog row with malformed code");
                continue;
            }

            let local: &str = row
                .name_translations
                .as_ref()
                .and_then(|t| t.get(local_language))
                .map_or("", String::as_str);
            let city: City = City::new(code, local, &row.name, &row.country_code);

            if by_code.contains_key(&city.code) {
                warn!(code = %city.code, "Skipping duplicate catalog row");
                continue;
            }

            let index: usize = cities.len();
            let local_source: &str = if local.is_empty() { &row.name } else { local };
            entries.push(NormalizedCityEntry {
                index,
                normalized_local: fold(local_source),
                normalized_english: fold(&row.name),
            });
            by_code.insert(city.code.clone(), index);
            cities.push(city);
        }

        Ok(Self {
            cities,
            by_code,
            entries,
        })
    }

    /// Returns the number of cities in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Returns whether the catalog has no cities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Looks up a city by code, ignoring case.
    #[must_use]
    pub fn city(&self, code: &str) -> Option<&City> {
        self.by_code
            .get(&code.trim().to_uppercase())
            .map(|&index| &self.cities[index])
    }

    /// Returns up to `limit` cities whose folded name contains the folded
    /// query, in catalog order.
    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<City> {
        let trimmed: &str = query.trim();
        if trimmed.is_empty() || limit == 0 {
            return Vec::new();
        }

        let folded: String = fold(trimmed);
        self.entries
            .iter()
            .filter(|entry| entry.matches(&folded))
            .take(limit)
            .map(|entry| self.cities[entry.index].clone())
            .collect()
    }
}

/// The published city catalog plus the lookups built on top of it.
#[derive(Debug)]
pub struct CityIndex {
    local_language: String,
    catalog: RwLock<Arc<CityCatalog>>,
}

impl Default for CityIndex {
    fn default() -> Self {
        Self::new(DEFAULT_LOCAL_LANGUAGE)
    }
}

impl CityIndex {
    /// Creates an empty index.
    ///
    /// # Arguments
    ///
    /// * `local_language` - Translation key used for the local-script name
    #[must_use]
    pub fn new(local_language: &str) -> Self {
        Self {
            local_language: local_language.to_string(),
            catalog: RwLock::new(Arc::new(CityCatalog::default())),
        }
    }

    /// Returns the translation key used for local-script names.
    #[must_use]
    pub fn local_language(&self) -> &str {
        &self.local_language
    }

    /// Decodes a catalog payload and publishes it.
    ///
    /// # Returns
    ///
    /// The number of cities now published.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Decode` if the payload cannot be decoded. The
    /// previously published catalog stays in place.
    pub fn load(&self, catalog_bytes: &[u8]) -> Result<usize, CoreError> {
        let catalog: CityCatalog = CityCatalog::build(catalog_bytes, &self.local_language)?;
        Ok(self.publish(catalog))
    }

    /// Replaces the published catalog with `catalog`.
    ///
    /// # Returns
    ///
    /// The number of cities now published.
    pub fn publish(&self, catalog: CityCatalog) -> usize {
        let count: usize = catalog.len();
        let fresh: Arc<CityCatalog> = Arc::new(catalog);
        *self
            .catalog
            .write()
            .unwrap_or_else(PoisonError::into_inner) = fresh;
        info!(count, "Published city catalog");
        count
    }

    /// Returns the currently published catalog.
    #[must_use]
    pub fn snapshot(&self) -> Arc<CityCatalog> {
        self.catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of published cities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Returns whether no catalog has been published yet (or it was empty).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Looks up a city by code, ignoring case.
    #[must_use]
    pub fn city(&self, code: &str) -> Option<City> {
        self.snapshot().city(code).cloned()
    }

    /// Returns a display title for `code`.
    ///
    /// The local-script name wins when present, then the English name; an
    /// unknown code is returned unchanged.
    #[must_use]
    pub fn title_for(&self, code: &str) -> String {
        self.snapshot()
            .city(code)
            .map_or_else(|| code.to_string(), |city| city.title().to_string())
    }

    /// Resolves free text or a code to an IATA code.
    ///
    /// Input that is exactly three characters and already uppercase is
    /// taken as a code without consulting the catalog. Anything else is
    /// searched and the first match wins.
    #[must_use]
    pub fn resolve(&self, free_text_or_code: &str) -> Option<String> {
        let trimmed: &str = free_text_or_code.trim();
        if trimmed.is_empty() {
            return None;
        }

        if trimmed.chars().count() == 3 && trimmed.to_uppercase() == trimmed {
            return Some(trimmed.to_string());
        }

        let resolved: Option<String> = self
            .search(trimmed, 1)
            .into_iter()
            .next()
            .map(|city| city.code);
        debug!(query = %trimmed, resolved = ?resolved, "Resolved city input");
        resolved
    }

    /// Searches the published catalog by name.
    ///
    /// An empty query yields no results. Matching is substring containment
    /// on folded names and results keep catalog order.
    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<City> {
        self.snapshot().search(query, limit)
    }
}
