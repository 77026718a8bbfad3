//! Deep-link overlay: fetches one record by `objectID`, independent of the
//! live result set.
//!
//! Resolution is split in two so the fetch can run wherever the embedding
//! event loop wants it: [`DeepLinkResolver::observe`] reacts to the URL's
//! `factId` and hands out a [`FetchTicket`], and
//! [`DeepLinkResolver::complete`] commits the fetch result only if that
//! ticket is still current. Tickets carry a generation counter, so a slow
//! response for an id the user navigated away from (and back to) is dropped.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::FactRecord;

/// Anything that can look a record up by id.
pub trait RecordSource {
    /// `Ok(None)` when no record has that id.
    fn fetch_record(&self, object_id: &str) -> Result<Option<FactRecord>>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum OverlayPhase {
    Idle,
    Fetching { id: String },
    Showing { record: FactRecord },
    NotFound { id: String },
}

/// Permission to commit one fetch result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    id: String,
    generation: u64,
}

impl FetchTicket {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone)]
pub struct DeepLinkResolver {
    enabled: bool,
    current_id: Option<String>,
    generation: u64,
    phase: OverlayPhase,
    fallback_applied_for: Option<String>,
}

impl DeepLinkResolver {
    /// `enabled` is the credential gate decision; a disabled resolver never
    /// issues a ticket.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled,
            current_id: None,
            generation: 0,
            phase: OverlayPhase::Idle,
            fallback_applied_for: None,
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    #[must_use]
    pub const fn phase(&self) -> &OverlayPhase {
        &self.phase
    }

    /// Feeds the URL's current `factId`. Returns a ticket when a fetch should
    /// start; an unchanged id never refetches.
    pub fn observe(&mut self, fact_id: Option<&str>) -> Option<FetchTicket> {
        let fact_id = fact_id.map(str::trim).filter(|id| !id.is_empty());
        if fact_id == self.current_id.as_deref() {
            return None;
        }

        self.generation += 1;
        self.current_id = fact_id.map(ToString::to_string);
        let Some(id) = fact_id else {
            self.phase = OverlayPhase::Idle;
            return None;
        };
        if !self.enabled {
            debug!(fact_id = id, "deep link ignored: search credentials not configured");
            self.phase = OverlayPhase::Idle;
            return None;
        }

        self.phase = OverlayPhase::Fetching { id: id.to_string() };
        Some(FetchTicket {
            id: id.to_string(),
            generation: self.generation,
        })
    }

    /// Commits a fetch result. Returns `false` when the ticket is stale and the
    /// result was discarded.
    pub fn complete(&mut self, ticket: &FetchTicket, result: Result<Option<FactRecord>>) -> bool {
        if ticket.generation != self.generation
            || self.current_id.as_deref() != Some(ticket.id.as_str())
        {
            debug!(fact_id = %ticket.id, "discarding stale deep-link response");
            return false;
        }

        self.phase = match result {
            Ok(Some(record)) if record.object_id == ticket.id => OverlayPhase::Showing { record },
            Ok(Some(record)) => {
                warn!(
                    fact_id = %ticket.id,
                    returned = %record.object_id,
                    "deep-link lookup returned a different record"
                );
                OverlayPhase::NotFound {
                    id: ticket.id.clone(),
                }
            }
            Ok(None) => {
                debug!(fact_id = %ticket.id, "deep-link record not found");
                OverlayPhase::NotFound {
                    id: ticket.id.clone(),
                }
            }
            Err(err) => {
                warn!(fact_id = %ticket.id, code = err.code(), error = %err, "deep-link fetch failed");
                OverlayPhase::NotFound {
                    id: ticket.id.clone(),
                }
            }
        };
        true
    }

    /// The record to display, only while it matches the current id.
    #[must_use]
    pub fn record(&self) -> Option<&FactRecord> {
        match &self.phase {
            OverlayPhase::Showing { record }
                if self.current_id.as_deref() == Some(record.object_id.as_str()) =>
            {
                Some(record)
            }
            _ => None,
        }
    }

    /// Clears the overlay. Pair with `UrlWriter::close_overlay`.
    pub fn close(&mut self) {
        self.generation += 1;
        self.current_id = None;
        self.phase = OverlayPhase::Idle;
    }

    /// Shown record whose facets should seed an unfiltered URL, at most once
    /// per id.
    pub fn take_fallback_record(&mut self) -> Option<&FactRecord> {
        let id = self.record()?.object_id.clone();
        if self.fallback_applied_for.as_deref() == Some(id.as_str()) {
            return None;
        }
        self.fallback_applied_for = Some(id);
        self.record()
    }

    /// Observe and fetch in one step.
    pub fn resolve<S>(&mut self, fact_id: Option<&str>, source: &S) -> Option<&FactRecord>
    where
        S: RecordSource + ?Sized,
    {
        if let Some(ticket) = self.observe(fact_id) {
            let result = source.fetch_record(ticket.id());
            self.complete(&ticket, result);
        }
        self.record()
    }
}
