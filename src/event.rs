//! Track event model
//!
//! A track is a temporal sequence of [`TrackEvent`]s. Each event pairs a
//! delta time (ticks since the previous event on the same track) with one of
//! the four wire-level event kinds, represented as the closed sum
//! [`EventBody`].

use meta::MetaEvent;
use mode::ModeEvent;
use sysex::SysexEvent;
use voice::VoiceEvent;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod meta;
pub mod mode;
pub mod sysex;
pub mod voice;

/// One event in a track: a delta time plus the event payload
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackEvent {
    /// Ticks to wait after the previous event on this track
    pub delta_time: u32,
    /// The event itself
    pub body: EventBody,
}

impl TrackEvent {
    /// Pairs a delta time with an event body
    pub fn new(delta_time: u32, body: EventBody) -> Self {
        Self { delta_time, body }
    }

    /// Returns true for the meta end-of-track event that must terminate
    /// every track
    pub fn is_end_of_track(&self) -> bool {
        matches!(
            &self.body,
            EventBody::Meta(meta) if meta.kind == meta::MetaKind::EndOfTrack
        )
    }
}

/// The four event kinds a track byte stream can hold
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EventBody {
    /// A channel voice event (notes, controllers, program changes...)
    Voice(VoiceEvent),
    /// A channel mode event, wire-encoded as a controller change with a
    /// first data byte of 0x78 or above
    Mode(ModeEvent),
    /// A meta event carrying sequencer-level information
    Meta(MetaEvent),
    /// A system exclusive event
    Sysex(SysexEvent),
}

#[cfg(test)]
mod tests {
    use super::{
        meta::MetaEvent,
        voice::{VoiceEvent, VoiceKind},
        EventBody, TrackEvent,
    };

    #[test]
    fn end_of_track_detection() {
        let eot = TrackEvent::new(0, EventBody::Meta(MetaEvent::end_of_track()));
        assert!(eot.is_end_of_track());

        let note = TrackEvent::new(
            0,
            EventBody::Voice(VoiceEvent {
                kind: VoiceKind::NoteOn,
                channel: 0,
                data1: 60,
                data2: 0x40,
            }),
        );
        assert!(!note.is_end_of_track())
    }
}
