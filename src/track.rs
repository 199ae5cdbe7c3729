//! Track event sequences and their codec sessions
//!
//! A [`Track`] owns its events in temporal order; the growable sequence
//! replaces the original format reader's per-node linked list, so dropping a
//! track releases everything without recursion. Encoding and decoding each
//! happen through a session object ([`encode::TrackEncoder`],
//! [`decode::TrackDecoder`]) that owns its cursor, its diagnostic sink and,
//! for decoding, the running-status state — sessions for different tracks
//! share nothing.

use crate::event::TrackEvent;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod decode;
pub mod encode;

/// An ordered, owned sequence of track events.
///
/// Insertion order is temporal order. A well-formed track's final event is
/// the meta end-of-track marker; [`decode::TrackDecoder`] reports a
/// diagnostic when it is absent and [`encode::TrackEncoder::finish`] appends
/// it.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Track {
    /// The events, first to last
    events: Vec<TrackEvent>,
}

impl Track {
    /// Creates an empty track
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event after every existing one
    pub fn push(&mut self, event: TrackEvent) {
        self.events.push(event);
    }

    /// The events in temporal order
    pub fn events(&self) -> &[TrackEvent] {
        &self.events
    }

    /// Consumes the track, yielding its events
    pub fn into_events(self) -> Vec<TrackEvent> {
        self.events
    }

    /// Number of events in the track
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if the track holds no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns true if the final event is the meta end-of-track marker
    pub fn is_terminated(&self) -> bool {
        self.events
            .last()
            .is_some_and(TrackEvent::is_end_of_track)
    }
}

impl From<Vec<TrackEvent>> for Track {
    fn from(events: Vec<TrackEvent>) -> Self {
        Self { events }
    }
}
