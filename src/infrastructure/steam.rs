//! Steam location dataset
//!
//! Resolves Steam profile location codes against `steam_countries.json`:
//! an object keyed by country code, each country holding its states keyed
//! by state code, each state holding its cities keyed by numeric city id.
//! Every level carries a display name and, usually, `"lat,lng"` coordinates.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{LocationQuery, LookupError};
use crate::infrastructure::traits::{FileSystem, LocationLookup};
use crate::infrastructure::{InfraError, InfraResult};

/// Record produced by [`SteamLocationLookup`].
///
/// Levels the query did not resolve are omitted from the JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SteamLocation {
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// `"lat,lng"` of the most specific level that has coordinates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates_accuracy_level: Option<u8>,
    /// Resolved names, most specific first, e.g. "Seattle, Washington, United States"
    pub map_search_string: String,
}

impl SteamLocation {
    /// Build a record from resolved levels, country first.
    fn from_levels(levels: &[PlaceRef<'_>]) -> Self {
        let name_at = |idx: usize| levels.get(idx).map(|p| p.name.to_string());
        let pinned = levels.iter().rev().find(|p| p.coordinates.is_some());

        Self {
            country: name_at(0).unwrap_or_default(),
            state: name_at(1),
            city: name_at(2),
            coordinates: pinned.and_then(|p| p.coordinates).map(str::to_string),
            coordinates_accuracy_level: pinned.and_then(|p| p.accuracy),
            map_search_string: levels
                .iter()
                .rev()
                .map(|p| p.name)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PlaceRef<'a> {
    name: &'a str,
    coordinates: Option<&'a str>,
    accuracy: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct City {
    pub name: String,
    #[serde(default)]
    pub coordinates: Option<String>,
    #[serde(default, deserialize_with = "accuracy_level")]
    pub coordinates_accuracy_level: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct State {
    pub name: String,
    #[serde(default)]
    pub coordinates: Option<String>,
    #[serde(default, deserialize_with = "accuracy_level")]
    pub coordinates_accuracy_level: Option<u8>,
    #[serde(default)]
    pub cities: BTreeMap<String, City>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Country {
    pub name: String,
    #[serde(default)]
    pub coordinates: Option<String>,
    #[serde(default, deserialize_with = "accuracy_level")]
    pub coordinates_accuracy_level: Option<u8>,
    #[serde(default)]
    pub states: BTreeMap<String, State>,
}

macro_rules! place_ref {
    ($ty:ty) => {
        impl $ty {
            fn place(&self) -> PlaceRef<'_> {
                PlaceRef {
                    name: &self.name,
                    coordinates: self.coordinates.as_deref(),
                    accuracy: self.coordinates_accuracy_level,
                }
            }
        }
    };
}

place_ref!(Country);
place_ref!(State);
place_ref!(City);

/// The dataset ships accuracy levels both as numbers and as numeric strings.
fn accuracy_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(u8),
        Text(String),
    }

    match Option::<Repr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Repr::Number(n)) => Ok(Some(n)),
        Some(Repr::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Repr::Text(s)) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Codes are matched trimmed and case-insensitively.
fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// In-memory Steam location dataset with normalized codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SteamDataset {
    countries: BTreeMap<String, Country>,
}

/// Dataset content that parses but cannot be indexed.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("duplicate country code {0}")]
    DuplicateCountry(String),

    #[error("duplicate state code {state} in country {country}")]
    DuplicateState { country: String, state: String },
}

impl SteamDataset {
    /// Parse `steam_countries.json` content.
    pub fn from_json(text: &str) -> Result<Self, DatasetError> {
        let countries: BTreeMap<String, Country> = serde_json::from_str(text)?;
        Self::from_countries(countries)
    }

    /// Index countries by normalized code.
    ///
    /// Codes that collide after normalization (`"US"` and `"us"`) are rejected.
    pub fn from_countries(countries: BTreeMap<String, Country>) -> Result<Self, DatasetError> {
        let mut normalized = BTreeMap::new();
        for (code, mut country) in countries {
            let code = normalize_code(&code);
            let mut states = BTreeMap::new();
            for (state_code, state) in std::mem::take(&mut country.states) {
                let state_code = normalize_code(&state_code);
                if states.insert(state_code.clone(), state).is_some() {
                    return Err(DatasetError::DuplicateState {
                        country: code,
                        state: state_code,
                    });
                }
            }
            country.states = states;
            if normalized.insert(code.clone(), country).is_some() {
                return Err(DatasetError::DuplicateCountry(code));
            }
        }
        Ok(Self {
            countries: normalized,
        })
    }

    /// Load the dataset file at `path`.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> InfraResult<Self> {
        debug!("load: path={}", path.display());
        if !fs.is_file(path) {
            return Err(InfraError::DatasetNotFound(path.to_path_buf()));
        }
        let text = fs
            .read_to_string(path)
            .map_err(|e| InfraError::io(format!("read dataset {}", path.display()), e))?;
        let dataset = Self::from_json(&text).map_err(|e| InfraError::Dataset {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        info!("loaded {} countries from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    pub fn country(&self, code: &str) -> Option<&Country> {
        self.countries.get(&normalize_code(code))
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

/// [`LocationLookup`] backed by a [`SteamDataset`].
///
/// - unknown or empty country code: [`LookupError::UnknownCountry`]
/// - empty state code: country-level record, city id ignored
/// - unknown state code: [`LookupError::UnknownState`]
/// - city id 0: state-level record
/// - unknown city id: [`LookupError::UnknownCity`]
#[derive(Debug, Clone)]
pub struct SteamLocationLookup {
    dataset: SteamDataset,
}

impl SteamLocationLookup {
    pub fn new(dataset: SteamDataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &SteamDataset {
        &self.dataset
    }
}

impl LocationLookup for SteamLocationLookup {
    type Record = SteamLocation;

    fn find(&self, query: &LocationQuery) -> Result<SteamLocation, LookupError> {
        let country = self
            .dataset
            .country(&query.country_code)
            .ok_or_else(|| LookupError::UnknownCountry(query.country_code.clone()))?;
        let mut levels = vec![country.place()];

        let state_code = normalize_code(&query.state_code);
        if state_code.is_empty() {
            if query.city_id != 0 {
                debug!("find: city id {} ignored without state code", query.city_id);
            }
        } else {
            let state = country
                .states
                .get(&state_code)
                .ok_or_else(|| LookupError::UnknownState {
                    country: query.country_code.clone(),
                    state: query.state_code.clone(),
                })?;
            levels.push(state.place());

            if query.city_id != 0 {
                let city = state
                    .cities
                    .get(&query.city_id.to_string())
                    .ok_or_else(|| LookupError::UnknownCity {
                        country: query.country_code.clone(),
                        state: query.state_code.clone(),
                        city_id: query.city_id,
                    })?;
                levels.push(city.place());
            }
        }

        let location = SteamLocation::from_levels(&levels);
        debug!("find: {} -> {}", query, location.map_search_string);
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_textual_accuracy_level_when_parsing_then_reads_number() {
        let city: City =
            serde_json::from_str(r#"{"name": "Berlin", "coordinates": "52.52,13.40", "coordinates_accuracy_level": "5"}"#)
                .unwrap();
        assert_eq!(city.coordinates_accuracy_level, Some(5));
    }

    #[test]
    fn given_numeric_accuracy_level_when_parsing_then_reads_number() {
        let city: City = serde_json::from_str(r#"{"name": "Berlin", "coordinates_accuracy_level": 4}"#).unwrap();
        assert_eq!(city.coordinates_accuracy_level, Some(4));
        assert_eq!(city.coordinates, None);
    }

    #[test]
    fn given_non_numeric_accuracy_level_when_parsing_then_fails() {
        let result = serde_json::from_str::<City>(r#"{"name": "Berlin", "coordinates_accuracy_level": "high"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn given_lowercase_keys_when_building_dataset_then_codes_are_uppercased() {
        let dataset = SteamDataset::from_json(r#"{"de": {"name": "Germany", "states": {"be": {"name": "Berlin"}}}}"#)
            .unwrap();
        let country = dataset.country("DE").expect("country");
        assert!(country.states.contains_key("BE"));
    }

    #[test]
    fn given_codes_differing_only_in_case_when_building_dataset_then_fails() {
        let result = SteamDataset::from_json(r#"{"US": {"name": "Upper"}, "us": {"name": "Lower"}}"#);
        assert!(matches!(result, Err(DatasetError::DuplicateCountry(code)) if code == "US"));
    }

    #[test]
    fn given_padded_state_code_colliding_when_building_dataset_then_fails() {
        let result = SteamDataset::from_json(
            r#"{"US": {"name": "United States", "states": {"WA": {"name": "A"}, " wa ": {"name": "B"}}}}"#,
        );
        assert!(matches!(
            result,
            Err(DatasetError::DuplicateState { country, state }) if country == "US" && state == "WA"
        ));
    }
}
