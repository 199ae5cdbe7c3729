//! Track event decoder and running-status state machine
//!
//! The wire format routinely omits the status byte between consecutive
//! voice or mode events ("running status"), so the next event cannot be
//! classified from its first byte alone. A [`TrackDecoder`] peeks at the
//! unread bytes, classifies, and only then consumes: an explicit status in
//! 0x80..=0xEF selects a voice kind by its high nibble — unless the nibble
//! is 0xB and the following data byte is above 0x77, which marks a channel
//! mode event instead. A leading byte below 0x80 is data, meaning the status
//! was omitted and the remembered one applies; a remembered 0xB status
//! re-runs the same above-0x77 test on the data byte before deciding
//! between a controller change and a mode event.
//!
//! The 0x77 threshold is how real-world encoders disambiguate the two
//! kinds, so it is applied identically whether the status byte is explicit
//! or inherited.

use crate::{
    cursor::ByteCursor,
    diag::{Diagnostic, DiagnosticSink, Ignore},
    error::CodecError,
    event::{
        meta::{MetaEvent, MetaKind},
        mode::{ModeEvent, ModeKind},
        sysex::{SysexEvent, SysexMarker},
        voice::{VoiceEvent, VoiceKind},
        EventBody, TrackEvent,
    },
    track::Track,
    vlq,
};

/// Status remembered across events within one decode session
#[derive(Debug, Clone, Copy, PartialEq)]
enum RunningStatus {
    /// No status to inherit; a data byte here is an error
    None,
    /// Last explicit status selected a voice kind other than 0xB
    Voice(u8),
    /// Last explicit status had the 0xB nibble, so an inherited event is
    /// a controller change or a mode event depending on its data byte
    ModeOrVoice(u8),
}

/// One track's decode session: the input cursor, the running-status state
/// and a diagnostic sink
#[derive(Debug)]
pub struct TrackDecoder<S = Ignore> {
    /// The track chunk payload being consumed
    cursor: ByteCursor,
    /// Status inherited by events whose status byte was omitted
    running: RunningStatus,
    /// Receives non-fatal reports
    sink: S,
}

impl TrackDecoder<Ignore> {
    /// Creates a decoder over a track payload, discarding diagnostics
    pub fn new(payload: Vec<u8>) -> Self {
        Self::with_sink(payload, Ignore)
    }
}

impl<S: DiagnosticSink> TrackDecoder<S> {
    /// Creates a decoder over a track payload, reporting diagnostics to
    /// `sink`
    pub fn with_sink(payload: Vec<u8>, sink: S) -> Self {
        Self {
            cursor: ByteCursor::from(payload),
            running: RunningStatus::None,
            sink,
        }
    }

    /// Decodes every event in the payload.
    ///
    /// Structural failures abort and propagate. A missing end-of-track
    /// marker is reported through the sink and the events decoded so far
    /// are still returned.
    pub fn decode(mut self) -> Result<Track, CodecError> {
        let mut track = Track::new();
        while !self.cursor.at_end() {
            track.push(self.decode_event()?);
        }

        if !track.is_terminated() {
            self.sink.report(Diagnostic::MissingEndOfTrack);
        }
        Ok(track)
    }

    /// Decodes a single event: delta time, classification, kind-specific
    /// payload
    fn decode_event(&mut self) -> Result<TrackEvent, CodecError> {
        let (delta_time, _) = vlq::decode(&mut self.cursor)?;

        let unread = self.cursor.remaining();
        let first = *unread.first().ok_or(CodecError::TruncatedStream)?;

        let body = match first {
            0xF0 | 0xF7 => {
                self.running = RunningStatus::None;
                EventBody::Sysex(self.decode_sysex()?)
            }

            0xFF => {
                self.running = RunningStatus::None;
                EventBody::Meta(self.decode_meta()?)
            }

            0x80..=0xEF if first >> 4 == 0xB => {
                // Either a controller change or a mode event; the first
                // data byte decides, and later status-less events re-run
                // the same test
                self.running = RunningStatus::ModeOrVoice(first);
                if unread.get(1).copied().is_some_and(|byte| byte > 0x77) {
                    EventBody::Mode(self.decode_mode(None)?)
                } else {
                    EventBody::Voice(self.decode_voice(None)?)
                }
            }

            0x80..=0xEF => {
                self.running = RunningStatus::Voice(first);
                EventBody::Voice(self.decode_voice(None)?)
            }

            // A data byte: the status was omitted, inherit the remembered one
            data => match self.running {
                RunningStatus::Voice(status) => {
                    EventBody::Voice(self.decode_voice(Some(status))?)
                }
                RunningStatus::ModeOrVoice(status) if data <= 0x77 => {
                    EventBody::Voice(self.decode_voice(Some(status))?)
                }
                RunningStatus::ModeOrVoice(status) => {
                    EventBody::Mode(self.decode_mode(Some(status))?)
                }
                RunningStatus::None => return Err(CodecError::UnknownEventKind(data)),
            },
        };

        Ok(TrackEvent::new(delta_time, body))
    }

    /// Decodes a voice event, reading the status byte unless an inherited
    /// one is supplied
    fn decode_voice(&mut self, inherited: Option<u8>) -> Result<VoiceEvent, CodecError> {
        let status = match inherited {
            Some(status) => status,
            None => self.cursor.read_byte()?,
        };
        let kind = VoiceKind::from_status_nibble(status >> 4)
            .ok_or(CodecError::UnknownEventKind(status))?;

        let data1 = self.cursor.read_byte()?;
        let data2 = if kind.data_byte_count() == 2 {
            self.cursor.read_byte()?
        } else {
            0
        };

        Ok(VoiceEvent {
            kind,
            channel: status & 0x0F,
            data1,
            data2,
        })
    }

    /// Decodes a mode event, reading the status byte unless an inherited
    /// one is supplied
    fn decode_mode(&mut self, inherited: Option<u8>) -> Result<ModeEvent, CodecError> {
        let status = match inherited {
            Some(status) => status,
            None => self.cursor.read_byte()?,
        };
        let code = self.cursor.read_byte()?;
        let kind = ModeKind::from_code(code).ok_or(CodecError::UnknownEventKind(code))?;
        let data = self.cursor.read_byte()?;

        Ok(ModeEvent {
            kind,
            channel: status & 0x0F,
            data,
        })
    }

    /// Decodes a meta event's type byte, length and payload
    fn decode_meta(&mut self) -> Result<MetaEvent, CodecError> {
        // Classification already saw the 0xFF status
        let _status = self.cursor.read_byte()?;
        let type_byte = self.cursor.read_byte()?;
        let kind = MetaKind::from_type_byte(type_byte);
        if !kind.is_known() {
            self.sink.report(Diagnostic::UnknownMetaType(type_byte));
        }

        let (length, _) = vlq::decode(&mut self.cursor)?;
        let data = self.cursor.read(length as usize)?.to_vec();

        Ok(MetaEvent::new(kind, data))
    }

    /// Decodes a sysex event's marker, length and payload
    fn decode_sysex(&mut self) -> Result<SysexEvent, CodecError> {
        let marker_byte = self.cursor.read_byte()?;
        let marker = SysexMarker::from_byte(marker_byte)
            .ok_or(CodecError::UnknownEventKind(marker_byte))?;

        let (length, _) = vlq::decode(&mut self.cursor)?;
        let data = self.cursor.read(length as usize)?.to_vec();

        Ok(SysexEvent::new(marker, data))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::TrackDecoder;
    use crate::{
        diag::Diagnostic,
        error::CodecError,
        event::{
            meta::{MetaEvent, MetaKind},
            mode::{ModeEvent, ModeKind},
            sysex::{SysexEvent, SysexMarker},
            voice::{VoiceEvent, VoiceKind},
            EventBody, TrackEvent,
        },
    };

    /// The canonical end-of-track byte sequence
    const EOT: [u8; 4] = [0x00, 0xFF, 0x2F, 0x00];

    #[test]
    fn explicit_voice_events_decode() {
        let mut payload = vec![0x00, 0x92, 60, 0x40, 0x81, 0x40, 0x82, 60, 0x00];
        payload.extend(EOT);
        let track = TrackDecoder::new(payload).decode().unwrap();

        assert_eq!(
            track.events()[0],
            TrackEvent::new(
                0,
                EventBody::Voice(VoiceEvent {
                    kind: VoiceKind::NoteOn,
                    channel: 2,
                    data1: 60,
                    data2: 0x40,
                })
            )
        );
        assert_eq!(
            track.events()[1],
            TrackEvent::new(
                192,
                EventBody::Voice(VoiceEvent {
                    kind: VoiceKind::NoteOff,
                    channel: 2,
                    data1: 60,
                    data2: 0x00,
                })
            )
        )
    }

    #[test]
    fn running_status_inherits_the_voice_kind_and_channel() {
        // Second note-on omits its status byte entirely
        let mut payload = vec![0x00, 0x90, 60, 0x40, 0x10, 64, 0x40];
        payload.extend(EOT);
        let track = TrackDecoder::new(payload).decode().unwrap();

        assert_eq!(
            track.events()[1],
            TrackEvent::new(
                0x10,
                EventBody::Voice(VoiceEvent {
                    kind: VoiceKind::NoteOn,
                    channel: 0,
                    data1: 64,
                    data2: 0x40,
                })
            )
        )
    }

    #[test]
    fn status_nibble_0xb_with_high_data_byte_is_a_mode_event() {
        let mut payload = vec![0x00, 0xB0, 0x79, 0x00];
        payload.extend(EOT);
        let track = TrackDecoder::new(payload).decode().unwrap();

        assert_eq!(
            track.events()[0],
            TrackEvent::new(
                0,
                EventBody::Mode(ModeEvent {
                    kind: ModeKind::ResetControllers,
                    channel: 0,
                    data: 0,
                })
            )
        )
    }

    #[test]
    fn inherited_0xb_status_with_low_data_byte_is_a_controller_change() {
        // Explicit controller change on channel 2, then a status-less event
        // whose first data byte 0x0A is at or below 0x77
        let mut payload = vec![0x00, 0xB2, 0x07, 0x64, 0x00, 0x0A, 0x32];
        payload.extend(EOT);
        let track = TrackDecoder::new(payload).decode().unwrap();

        assert_eq!(
            track.events()[1],
            TrackEvent::new(
                0,
                EventBody::Voice(VoiceEvent {
                    kind: VoiceKind::Controller,
                    channel: 2,
                    data1: 0x0A,
                    data2: 0x32,
                })
            )
        )
    }

    #[test]
    fn inherited_0xb_status_with_high_data_byte_is_a_mode_event() {
        // Mode event, then a status-less event whose first byte 0x7B is in
        // the reserved mode range
        let mut payload = vec![0x00, 0xB1, 0x79, 0x00, 0x20, 0x7B, 0x00];
        payload.extend(EOT);
        let track = TrackDecoder::new(payload).decode().unwrap();

        assert_eq!(
            track.events()[1],
            TrackEvent::new(
                0x20,
                EventBody::Mode(ModeEvent {
                    kind: ModeKind::NotesOff,
                    channel: 1,
                    data: 0,
                })
            )
        )
    }

    #[test]
    fn controller_change_leaves_the_ambiguous_state_for_inherited_events() {
        // Explicit damper pedal change, then a status-less event whose
        // first byte is in the mode range: the 0xB status inherited from a
        // plain controller change must still allow a mode event
        let mut payload = vec![0x00, 0xB0, 0x40, 0x00, 0x00, 0x79, 0x00];
        payload.extend(EOT);
        let track = TrackDecoder::new(payload).decode().unwrap();

        assert_eq!(
            track.events()[1],
            TrackEvent::new(
                0,
                EventBody::Mode(ModeEvent {
                    kind: ModeKind::ResetControllers,
                    channel: 0,
                    data: 0,
                })
            )
        )
    }

    #[test]
    fn threshold_edge_0x77_stays_a_controller_change() {
        let mut payload = vec![0x00, 0xB0, 0x77, 0x00];
        payload.extend(EOT);
        let track = TrackDecoder::new(payload).decode().unwrap();

        assert_eq!(
            track.events()[0],
            TrackEvent::new(
                0,
                EventBody::Voice(VoiceEvent {
                    kind: VoiceKind::Controller,
                    channel: 0,
                    data1: 0x77,
                    data2: 0x00,
                })
            )
        )
    }

    #[test]
    fn meta_and_sysex_events_clear_running_status() {
        // Voice, then sysex, then a bare data byte: with the status cleared
        // that byte classifies as nothing
        let payload = vec![
            0x00, 0x90, 60, 0x40, // note on
            0x00, 0xF0, 0x01, 0x43, // sysex
            0x00, 0x3C, 0x40, // status-less bytes with no status to inherit
        ];
        let result = TrackDecoder::new(payload).decode();

        assert_eq!(result, Err(CodecError::UnknownEventKind(0x3C)))
    }

    #[test]
    fn meta_events_decode_with_payload() {
        let mut payload = vec![0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20];
        payload.extend(EOT);
        let track = TrackDecoder::new(payload).decode().unwrap();

        assert_eq!(
            track.events()[0],
            TrackEvent::new(
                0,
                EventBody::Meta(MetaEvent::new(
                    MetaKind::SetTempo,
                    vec![0x07, 0xA1, 0x20]
                ))
            )
        )
    }

    #[test]
    fn unknown_meta_types_are_reported_and_carried_raw() {
        let mut payload = vec![0x00, 0xFF, 0x21, 0x01, 0x00];
        payload.extend(EOT);
        let mut diagnostics = vec![];
        let track = TrackDecoder::with_sink(payload, &mut diagnostics)
            .decode()
            .unwrap();

        assert_eq!(
            track.events()[0].body,
            EventBody::Meta(MetaEvent::new(MetaKind::Unknown(0x21), vec![0x00]))
        );
        assert_eq!(diagnostics, vec![Diagnostic::UnknownMetaType(0x21)])
    }

    #[test]
    fn sysex_events_decode_with_payload() {
        let mut payload = vec![0x00, 0xF7, 0x02, 0x10, 0x20];
        payload.extend(EOT);
        let track = TrackDecoder::new(payload).decode().unwrap();

        assert_eq!(
            track.events()[0].body,
            EventBody::Sysex(SysexEvent::new(SysexMarker::Escape, vec![0x10, 0x20]))
        )
    }

    #[test]
    fn missing_end_of_track_is_reported_not_fatal() {
        let payload = vec![0x00, 0x90, 60, 0x40];
        let mut diagnostics = vec![];
        let track = TrackDecoder::with_sink(payload, &mut diagnostics)
            .decode()
            .unwrap();

        assert_eq!(track.len(), 1);
        assert_eq!(diagnostics, vec![Diagnostic::MissingEndOfTrack])
    }

    #[test]
    fn truncated_meta_payload_is_fatal() {
        let payload = vec![0x00, 0xFF, 0x51, 0x03, 0x07];
        let result = TrackDecoder::new(payload).decode();

        assert_eq!(result, Err(CodecError::TruncatedStream))
    }

    #[test]
    fn delta_time_cut_mid_integer_is_a_malformed_vlq() {
        let payload = vec![0x81];
        let result = TrackDecoder::new(payload).decode();

        assert_eq!(result, Err(CodecError::MalformedVlq))
    }

    #[test]
    fn leading_data_byte_with_no_status_fails() {
        let payload = vec![0x00, 0x3C, 0x40];
        let result = TrackDecoder::new(payload).decode();

        assert_eq!(result, Err(CodecError::UnknownEventKind(0x3C)))
    }
}
