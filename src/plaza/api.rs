//! # API Facade
//!
//! The single entry point UI clients talk to. The facade owns one
//! [`DataStore`] per dataset plus the preference store, dispatches into
//! the engines, and applies the per-dataset fallback policy that the
//! stores deliberately do not have:
//!
//! - **attractions** fall back to the builtin dataset with a warning;
//! - **rides** fall back to the last cached snapshot with a warning, and
//!   error out only when there is no cache;
//! - **members** have no fallback — the error goes to the caller.
//!
//! Methods return data plus [`CmdMessage`]s; the facade never touches
//! stdout and never assumes a terminal.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::de::DeserializeOwned;

use crate::error::{PlazaError, Result};
use crate::export;
use crate::model::{Attraction, Member, Record, Ride};
use crate::prefs::{KvStore, PrefStore, Preferences};
use crate::registration::{register, Registration, RegistrationForm};
use crate::store::builtin;
use crate::store::file::FileSource;
use crate::store::{DataSource, DataStore, Snapshot};

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A structured user-facing message; the CLI decides how to present it.
#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// The facade. Generic over the preference backing so tests run entirely
/// in memory.
pub struct PlazaApi<S: KvStore> {
    data_dir: PathBuf,
    members: DataStore<Member>,
    attractions: DataStore<Attraction>,
    rides: DataStore<Ride>,
    prefs: PrefStore<S>,
}

fn try_load<R: Record + DeserializeOwned>(
    store: &mut DataStore<R>,
    source: &dyn DataSource,
) -> Result<()> {
    store.load(source).map(|_| ())
}

impl<S: KvStore> PlazaApi<S> {
    pub fn new(data_dir: impl Into<PathBuf>, kv: S) -> Self {
        Self {
            data_dir: data_dir.into(),
            members: DataStore::new(),
            attractions: DataStore::new(),
            rides: DataStore::new(),
            prefs: PrefStore::new(kv),
        }
    }

    fn fixture(&self, name: &str) -> FileSource {
        FileSource::new(self.data_dir.join(format!("{}.json", name)))
    }

    /// Members: no fallback. The caller surfaces the error and a retry
    /// hint.
    pub fn load_members(&mut self) -> Result<(&Snapshot<Member>, Vec<CmdMessage>)> {
        let source = self.fixture("members");
        try_load(&mut self.members, &source)?;
        let snapshot = self
            .members
            .snapshot()
            .ok_or_else(|| PlazaError::Api("members dataset unavailable".to_string()))?;
        Ok((snapshot, Vec::new()))
    }

    /// Attractions: fall back to the compiled-in dataset on any load or
    /// validation failure.
    pub fn load_attractions(&mut self) -> Result<(&Snapshot<Attraction>, Vec<CmdMessage>)> {
        let source = self.fixture("attractions");
        let mut messages = Vec::new();

        if let Err(err) = try_load(&mut self.attractions, &source) {
            messages.push(CmdMessage::warning(format!(
                "Could not load attractions ({}). Showing the builtin dataset.",
                err
            )));
            try_load(&mut self.attractions, &builtin::attractions_fallback())?;
        }

        let snapshot = self
            .attractions
            .snapshot()
            .ok_or_else(|| PlazaError::Api("attractions dataset unavailable".to_string()))?;
        Ok((snapshot, messages))
    }

    /// Rides: fall back to the cached snapshot from the last successful
    /// load; error out only when there is none.
    pub fn load_rides(&mut self) -> Result<(&Snapshot<Ride>, Vec<CmdMessage>)> {
        let source = self.fixture("rides");
        let mut messages = Vec::new();

        match try_load(&mut self.rides, &source) {
            Ok(()) => {
                let records: Vec<Ride> = self
                    .rides
                    .snapshot()
                    .map(|s| s.records().to_vec())
                    .unwrap_or_default();
                if self.prefs.cache_rides(&records, Utc::now()).is_err() {
                    messages.push(CmdMessage::warning(
                        "Could not update the offline ride cache.",
                    ));
                }
            }
            Err(err) => match self.prefs.cached_rides() {
                Some(cache) if !cache.rides.is_empty() => {
                    messages.push(CmdMessage::info(
                        "Using cached ride data. Some information may be outdated.",
                    ));
                    self.rides.install(cache.rides);
                }
                _ => return Err(err),
            },
        }

        let snapshot = self
            .rides
            .snapshot()
            .ok_or_else(|| PlazaError::Api("rides dataset unavailable".to_string()))?;
        Ok((snapshot, messages))
    }

    /// Sign up for a ride: validates the form, bumps the participant
    /// count in a fresh snapshot, and appends to the ledger.
    pub fn join_ride(
        &mut self,
        ride_id: &str,
        form: &RegistrationForm,
    ) -> Result<(Registration, Vec<CmdMessage>)> {
        let (_, mut messages) = self.load_rides()?;

        let snapshot = self
            .rides
            .snapshot()
            .ok_or_else(|| PlazaError::Api("rides dataset unavailable".to_string()))?;
        let (next, registration) = register(snapshot, ride_id, form)?;

        self.rides.set(next);
        self.prefs.append_registration(&registration)?;

        let records: Vec<Ride> = self
            .rides
            .snapshot()
            .map(|s| s.records().to_vec())
            .unwrap_or_default();
        if self.prefs.cache_rides(&records, Utc::now()).is_err() {
            messages.push(CmdMessage::warning(
                "Could not update the offline ride cache.",
            ));
        }

        messages.push(CmdMessage::success(format!(
            "Successfully registered for {}! Check your email for details.",
            registration.ride_title
        )));
        Ok((registration, messages))
    }

    pub fn registrations(&self) -> Vec<Registration> {
        self.prefs.registrations()
    }

    pub fn cancel_registration(&mut self, id: &str) -> Result<(Registration, Vec<CmdMessage>)> {
        let cancelled = self.prefs.cancel_registration(id)?;
        let messages = vec![CmdMessage::success(format!(
            "Registration {} cancelled.",
            cancelled.id
        ))];
        Ok((cancelled, messages))
    }

    /// Record this visit; best effort, a broken preference store must not
    /// block browsing.
    pub fn record_visit(&mut self) -> Option<String> {
        self.prefs.record_visit(Utc::now()).ok()
    }

    /// Remember a search term; best effort for the same reason.
    pub fn note_search(&mut self, term: &str) {
        let _ = self.prefs.push_search(term, Utc::now());
    }

    pub fn config_entries(&self) -> Vec<(&'static str, String)> {
        self.prefs.preferences().entries()
    }

    pub fn set_config(&mut self, key: &str, value: &str) -> Result<(Preferences, Vec<CmdMessage>)> {
        let prefs = self.prefs.set_preference(key, value)?;
        let messages = vec![CmdMessage::success(format!("{} set to {}", key, value))];
        Ok((prefs, messages))
    }

    pub fn export_backup(&self, out_dir: &Path) -> Result<(PathBuf, Vec<CmdMessage>)> {
        let path = export::write_backup(&self.prefs, out_dir, Utc::now())?;
        let messages = vec![CmdMessage::success(format!(
            "Exported to {}",
            path.display()
        ))];
        Ok((path, messages))
    }
}
