//! # Preference Store
//!
//! A flat key-value map of JSON-serializable values under a namespaced key
//! prefix — the terminal cousin of the sites' local-storage manager. The
//! [`KvStore`] trait abstracts the backing so tests run against
//! [`MemoryKv`] while production uses a single pretty-printed JSON file.
//!
//! Individual values that fail to parse read back as absent rather than
//! failing the caller; a missing preferences entry yields the defaults.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{PlazaError, Result};
use crate::model::Ride;
use crate::registration::{Registration, RegistrationStatus};

/// Every stored key carries this prefix.
pub const KEY_PREFIX: &str = "plaza.";

const PREFS_FILENAME: &str = "prefs.json";
const SEARCH_HISTORY_LIMIT: usize = 20;

mod keys {
    pub const PREFERENCES: &str = "preferences";
    pub const LAST_VISIT: &str = "last-visit";
    pub const SEARCH_HISTORY: &str = "search-history";
    pub const REGISTRATIONS: &str = "registrations";
    pub const RIDES_CACHE: &str = "rides-cache";
}

/// Abstract flat string-to-string storage.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
    fn keys(&self) -> Result<Vec<String>>;
}

/// Production backing: one JSON object file in the preference directory.
pub struct FileKv {
    path: PathBuf,
}

impl FileKv {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            path: dir.as_ref().join(PREFS_FILENAME),
        }
    }

    fn load_map(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(PlazaError::Io)?;
        serde_json::from_str(&content)
            .map_err(|e| PlazaError::Prefs(format!("corrupt preference file: {}", e)))
    }

    fn save_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(PlazaError::Io)?;
            }
        }
        let content = serde_json::to_string_pretty(map).map_err(PlazaError::Serialization)?;
        fs::write(&self.path, content).map_err(PlazaError::Io)?;
        Ok(())
    }
}

impl KvStore for FileKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load_map()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        let mut map = self.load_map()?;
        map.insert(key.to_string(), value);
        self.save_map(&map)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut map = self.load_map()?;
        map.remove(key);
        self.save_map(&map)
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.load_map()?.keys().cloned().collect())
    }
}

/// In-memory backing for tests.
#[derive(Debug, Default)]
pub struct MemoryKv {
    map: BTreeMap<String, String>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.map.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.map.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.map.keys().cloned().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Imperial,
    Metric,
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "imperial" => Ok(Units::Imperial),
            "metric" => Ok(Units::Metric),
            other => Err(format!("unknown units: {}", other)),
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Units::Imperial => "imperial",
            Units::Metric => "metric",
        })
    }
}

/// User preferences. Unknown or missing entries fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub theme: Theme,
    pub notifications: bool,
    pub email_updates: bool,
    pub ride_reminders: bool,
    pub difficulty_preference: String,
    pub max_distance: u32,
    pub units: Units,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            notifications: true,
            email_updates: true,
            ride_reminders: true,
            difficulty_preference: "all".to_string(),
            max_distance: 50,
            units: Units::Imperial,
        }
    }
}

impl Preferences {
    /// (key, value) pairs for the config listing, in a fixed order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("theme", self.theme.to_string()),
            ("notifications", self.notifications.to_string()),
            ("email-updates", self.email_updates.to_string()),
            ("ride-reminders", self.ride_reminders.to_string()),
            (
                "difficulty-preference",
                self.difficulty_preference.clone(),
            ),
            ("max-distance", self.max_distance.to_string()),
            ("units", self.units.to_string()),
        ]
    }
}

/// One remembered search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntry {
    pub term: String,
    pub searched_at: DateTime<Utc>,
}

/// Cached rides from the last successful load, for offline fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RidesCache {
    pub rides: Vec<Ride>,
    pub last_updated: DateTime<Utc>,
}

/// Typed operations over a [`KvStore`].
pub struct PrefStore<S: KvStore> {
    kv: S,
}

impl<S: KvStore> PrefStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    fn namespaced(key: &str) -> String {
        format!("{}{}", KEY_PREFIX, key)
    }

    /// Read a JSON value; absent or unparseable entries come back as `None`.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.kv.get(&Self::namespaced(key))? {
            None => Ok(None),
            Some(raw) => Ok(serde_json::from_str(&raw).ok()),
        }
    }

    pub fn set_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value).map_err(PlazaError::Serialization)?;
        self.kv.set(&Self::namespaced(key), raw)
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        self.kv.remove(&Self::namespaced(key))
    }

    // ----- preferences -----

    pub fn preferences(&self) -> Preferences {
        self.get_json(keys::PREFERENCES)
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    pub fn save_preferences(&mut self, prefs: &Preferences) -> Result<()> {
        self.set_json(keys::PREFERENCES, prefs)
    }

    /// Set one preference by its config key, returning the updated set.
    pub fn set_preference(&mut self, key: &str, value: &str) -> Result<Preferences> {
        let mut prefs = self.preferences();
        match key {
            "theme" => prefs.theme = value.parse().map_err(PlazaError::Api)?,
            "notifications" => prefs.notifications = parse_bool(value)?,
            "email-updates" => prefs.email_updates = parse_bool(value)?,
            "ride-reminders" => prefs.ride_reminders = parse_bool(value)?,
            "difficulty-preference" => prefs.difficulty_preference = value.to_string(),
            "max-distance" => {
                prefs.max_distance = value
                    .parse()
                    .map_err(|_| PlazaError::Api("max-distance must be a number".to_string()))?
            }
            "units" => prefs.units = value.parse().map_err(PlazaError::Api)?,
            other => {
                return Err(PlazaError::Api(format!(
                    "unknown preference key: {}",
                    other
                )))
            }
        }
        self.save_preferences(&prefs)?;
        Ok(prefs)
    }

    // ----- visit tracking -----

    /// Record this visit and return the greeting for the previous one.
    pub fn record_visit(&mut self, now: DateTime<Utc>) -> Result<String> {
        let last: Option<DateTime<Utc>> = self.get_json(keys::LAST_VISIT)?;
        self.set_json(keys::LAST_VISIT, &now)?;
        Ok(greeting_for(last, now))
    }

    // ----- search history -----

    /// Remember a search term: deduplicated, most recent first, capped.
    /// Terms shorter than two characters are not worth remembering.
    pub fn push_search(&mut self, term: &str, now: DateTime<Utc>) -> Result<()> {
        let clean = term.trim().to_lowercase();
        if clean.len() < 2 {
            return Ok(());
        }
        let mut history: Vec<SearchEntry> =
            self.get_json(keys::SEARCH_HISTORY)?.unwrap_or_default();
        history.retain(|entry| entry.term != clean);
        history.insert(
            0,
            SearchEntry {
                term: clean,
                searched_at: now,
            },
        );
        history.truncate(SEARCH_HISTORY_LIMIT);
        self.set_json(keys::SEARCH_HISTORY, &history)
    }

    pub fn search_history(&self) -> Vec<SearchEntry> {
        self.get_json(keys::SEARCH_HISTORY)
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    pub fn clear_search_history(&mut self) -> Result<()> {
        self.remove(keys::SEARCH_HISTORY)
    }

    // ----- rides cache -----

    pub fn cache_rides(&mut self, rides: &[Ride], now: DateTime<Utc>) -> Result<()> {
        self.set_json(
            keys::RIDES_CACHE,
            &RidesCache {
                rides: rides.to_vec(),
                last_updated: now,
            },
        )
    }

    pub fn cached_rides(&self) -> Option<RidesCache> {
        self.get_json(keys::RIDES_CACHE).ok().flatten()
    }

    // ----- registrations -----

    pub fn append_registration(&mut self, registration: &Registration) -> Result<()> {
        let mut all = self.registrations();
        all.push(registration.clone());
        self.set_json(keys::REGISTRATIONS, &all)
    }

    pub fn registrations(&self) -> Vec<Registration> {
        self.get_json(keys::REGISTRATIONS)
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    /// Flip a registration to cancelled; the entry stays in the ledger.
    pub fn cancel_registration(&mut self, id: &str) -> Result<Registration> {
        let mut all = self.registrations();
        let entry = all
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| PlazaError::RecordNotFound(id.to_string()))?;
        entry.status = RegistrationStatus::Cancelled;
        let cancelled = entry.clone();
        self.set_json(keys::REGISTRATIONS, &all)?;
        Ok(cancelled)
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" => Ok(true),
        "false" | "off" | "no" => Ok(false),
        other => Err(PlazaError::Api(format!(
            "expected true or false, got: {}",
            other
        ))),
    }
}

/// Greeting based on the gap since the previous visit.
pub fn greeting_for(last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match last {
        None => "Welcome! Let us know if you have any questions.".to_string(),
        Some(last) => {
            let days = (now - last).num_days();
            if days < 1 {
                "Back so soon! Awesome!".to_string()
            } else if days == 1 {
                "You last visited 1 day ago.".to_string()
            } else {
                format!("You last visited {} days ago.", days)
            }
        }
    }
}
