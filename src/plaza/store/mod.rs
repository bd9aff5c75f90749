//! # Data Loading Layer
//!
//! This module defines how datasets get into memory. The [`DataSource`]
//! trait abstracts where a payload comes from; [`DataStore`] owns the
//! current [`Snapshot`] and the rules for replacing it.
//!
//! ## Design Rationale
//!
//! Sources are abstracted behind a trait to:
//! - Enable **testing** with [`memory::StaticSource`] (no filesystem needed)
//! - Keep the compiled-in fallback dataset behind the same interface
//! - Keep load policy (what to do on failure) **out** of the store — the
//!   caller picks the fallback, the store only ever swaps wholesale
//!
//! ## Load Semantics
//!
//! A snapshot is replaced in one piece on a successful load and left
//! untouched on a failed one. The split [`DataStore::begin`] /
//! [`DataStore::resolve`] API models loads that are conceptually in flight
//! at the same time: whichever payload resolves last wins, regardless of
//! the order the loads were issued. [`LoadTicket`]s only stamp the
//! resulting snapshot's generation.
//!
//! ## Validation
//!
//! A payload must be a JSON array of well-formed records, non-empty, with
//! unique ids. Record order is normalized to ascending date (stable,
//! undated records last) so that downstream stable date sorts are
//! order-preserving.

use crate::error::{PlazaError, Result};
use crate::model::{date_order, Record};
use serde::de::DeserializeOwned;
use std::collections::HashSet;

pub mod builtin;
pub mod file;
pub mod memory;

/// Abstract origin of a raw dataset payload.
pub trait DataSource {
    /// Fetch the raw payload. Failures here are load failures; parsing and
    /// validation happen in the store.
    fn fetch(&self) -> Result<String>;

    /// Human-readable origin for user-facing messages.
    fn origin(&self) -> String;
}

/// An immutable ordered collection of records as of one load.
#[derive(Debug, Clone)]
pub struct Snapshot<R> {
    records: Vec<R>,
    generation: u64,
}

impl<R: Record> Snapshot<R> {
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Ticket number of the load that produced this snapshot.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Non-destructive single-record update: returns a new snapshot with
    /// the matching record swapped out, order preserved.
    pub fn replace(&self, updated: R) -> Result<Snapshot<R>> {
        if self.get(updated.id()).is_none() {
            return Err(PlazaError::RecordNotFound(updated.id().to_string()));
        }
        let records = self
            .records
            .iter()
            .map(|r| {
                if r.id() == updated.id() {
                    updated.clone()
                } else {
                    r.clone()
                }
            })
            .collect();
        Ok(Snapshot {
            records,
            generation: self.generation,
        })
    }
}

/// Handle for a load in flight, issued by [`DataStore::begin`].
#[derive(Debug, Clone, Copy)]
pub struct LoadTicket {
    seq: u64,
}

/// Owner of the current snapshot for one dataset.
pub struct DataStore<R> {
    snapshot: Option<Snapshot<R>>,
    next_seq: u64,
}

impl<R> Default for DataStore<R> {
    fn default() -> Self {
        Self {
            snapshot: None,
            next_seq: 0,
        }
    }
}

impl<R: Record + DeserializeOwned> DataStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<&Snapshot<R>> {
        self.snapshot.as_ref()
    }

    /// Fetch, validate, and install in one step. On failure the previous
    /// snapshot is untouched.
    pub fn load(&mut self, source: &dyn DataSource) -> Result<&Snapshot<R>> {
        let ticket = self.begin();
        let payload = source.fetch();
        self.resolve(ticket, payload)
    }

    /// Issue a ticket for a load about to start.
    pub fn begin(&mut self) -> LoadTicket {
        self.next_seq += 1;
        LoadTicket { seq: self.next_seq }
    }

    /// Complete a load. The payload that resolves last wins, regardless of
    /// ticket order; an `Err` payload leaves the held snapshot untouched.
    pub fn resolve(
        &mut self,
        ticket: LoadTicket,
        payload: Result<String>,
    ) -> Result<&Snapshot<R>> {
        let records = parse_records(&payload?)?;
        Ok(self.snapshot.insert(Snapshot {
            records,
            generation: ticket.seq,
        }))
    }

    /// Install pre-validated records wholesale (cache restore, post-update
    /// snapshots). Bypasses payload parsing, not the swap discipline.
    pub fn install(&mut self, mut records: Vec<R>) -> &Snapshot<R> {
        records.sort_by(|a, b| date_order(a.date(), b.date()));
        self.next_seq += 1;
        self.snapshot.insert(Snapshot {
            records,
            generation: self.next_seq,
        })
    }

    /// Swap in an already-built snapshot (e.g. from [`Snapshot::replace`]).
    pub fn set(&mut self, snapshot: Snapshot<R>) -> &Snapshot<R> {
        self.snapshot.insert(snapshot)
    }
}

/// Parse and validate one dataset payload.
fn parse_records<R: Record + DeserializeOwned>(payload: &str) -> Result<Vec<R>> {
    let mut records: Vec<R> =
        serde_json::from_str(payload).map_err(|e| PlazaError::Validation(e.to_string()))?;

    if records.is_empty() {
        return Err(PlazaError::Validation("dataset is empty".to_string()));
    }

    let mut seen = HashSet::new();
    for record in &records {
        if !seen.insert(record.id().to_string()) {
            return Err(PlazaError::Validation(format!(
                "duplicate record id: {}",
                record.id()
            )));
        }
    }

    records.sort_by(|a, b| date_order(a.date(), b.date()));
    Ok(records)
}
