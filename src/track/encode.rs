//! Track event encoder
//!
//! A [`TrackEncoder`] serializes events one at a time into an owned byte
//! buffer that becomes a track chunk's payload. Every event starts with its
//! variable-length delta time, followed by the kind-specific layout.
//!
//! Range validation is permissive: a voice or mode data byte above its
//! kind's legal maximum is reported through the diagnostic sink and written
//! anyway, matching how real-world encoders behave. Only a meta payload
//! whose length contradicts the fixed-length table is treated as a caller
//! bug and panics.

use crate::{
    cursor::ByteCursor,
    diag::{Diagnostic, DiagnosticSink, Ignore},
    event::{
        meta::{MetaEvent, MetaKind},
        mode::{ModeEvent, ModeKind},
        sysex::{SysexEvent, SysexMarker},
        voice::{VoiceEvent, VoiceKind},
        EventBody, TrackEvent,
    },
    vlq,
};

/// One track's encode session: the output buffer plus a diagnostic sink
#[derive(Debug)]
pub struct TrackEncoder<S = Ignore> {
    /// Accumulates the track chunk payload
    cursor: ByteCursor,
    /// Receives out-of-range and unknown-meta reports
    sink: S,
}

impl TrackEncoder<Ignore> {
    /// Creates an encoder that discards diagnostics
    pub fn new() -> Self {
        Self::with_sink(Ignore)
    }
}

impl Default for TrackEncoder<Ignore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DiagnosticSink> TrackEncoder<S> {
    /// Creates an encoder reporting diagnostics to `sink`
    pub fn with_sink(sink: S) -> Self {
        Self {
            cursor: ByteCursor::new(),
            sink,
        }
    }

    /// Encodes a voice event: delta time, status byte, one or two data
    /// bytes
    pub fn emit_voice(&mut self, delta_time: u32, channel: u8, kind: VoiceKind, data1: u8, data2: u8) {
        self.encode_event(&TrackEvent::new(
            delta_time,
            EventBody::Voice(VoiceEvent {
                kind,
                channel,
                data1,
                data2,
            }),
        ));
    }

    /// Encodes a mode event: delta time, controller status byte, mode
    /// code, data byte
    pub fn emit_mode(&mut self, delta_time: u32, channel: u8, kind: ModeKind, data: u8) {
        self.encode_event(&TrackEvent::new(
            delta_time,
            EventBody::Mode(ModeEvent { kind, channel, data }),
        ));
    }

    /// Encodes a meta event: delta time, 0xFF, type byte, length, payload.
    ///
    /// # Panics
    ///
    /// Panics if `kind` declares a fixed length in the meta table and
    /// `data` is not exactly that long.
    pub fn emit_meta(&mut self, delta_time: u32, kind: MetaKind, data: &[u8]) {
        self.encode_event(&TrackEvent::new(
            delta_time,
            EventBody::Meta(MetaEvent::new(kind, data.to_vec())),
        ));
    }

    /// Encodes a sysex event: delta time, marker byte, length, payload
    pub fn emit_sysex(&mut self, delta_time: u32, marker: SysexMarker, data: &[u8]) {
        self.encode_event(&TrackEvent::new(
            delta_time,
            EventBody::Sysex(SysexEvent::new(marker, data.to_vec())),
        ));
    }

    /// Encodes an already-constructed event, delta time first
    pub fn encode_event(&mut self, event: &TrackEvent) {
        vlq::encode_into(&mut self.cursor, event.delta_time);
        match &event.body {
            EventBody::Voice(voice) => self.encode_voice(voice),
            EventBody::Mode(mode) => self.encode_mode(mode),
            EventBody::Meta(meta) => self.encode_meta(meta),
            EventBody::Sysex(sysex) => self.encode_sysex(sysex),
        }
    }

    /// Appends the end-of-track event and returns the finished payload
    pub fn finish(mut self) -> Vec<u8> {
        // Fixed 4-byte shorthand: zero delta, 0xFF, type 0x2F, length 0
        self.cursor.write(&[0x00, 0xFF, 0x2F, 0x00]);
        self.cursor.into_bytes()
    }

    /// Returns the payload as written, without appending an end-of-track
    /// event.
    ///
    /// Used when re-encoding a decoded track whose events already include
    /// the marker.
    pub fn into_payload(self) -> Vec<u8> {
        self.cursor.into_bytes()
    }

    /// Consumes the encoder, returning the payload and the sink
    pub fn into_parts(self) -> (Vec<u8>, S) {
        (self.cursor.into_bytes(), self.sink)
    }

    /// Writes a voice event's status and data bytes
    fn encode_voice(&mut self, event: &VoiceEvent) {
        if event.data1 > event.kind.data1_max() {
            self.sink.report(Diagnostic::ValueOutOfRange {
                field: "voice data 1",
                value: event.data1,
                max: event.kind.data1_max(),
            });
        }
        let two_data_bytes = event.kind.data_byte_count() == 2;
        if two_data_bytes && event.data2 > event.kind.data2_max() {
            self.sink.report(Diagnostic::ValueOutOfRange {
                field: "voice data 2",
                value: event.data2,
                max: event.kind.data2_max(),
            });
        }

        self.cursor.write_byte(event.status_byte());
        self.cursor.write_byte(event.data1);
        if two_data_bytes {
            self.cursor.write_byte(event.data2);
        }
    }

    /// Writes a mode event's status byte, code and data byte
    fn encode_mode(&mut self, event: &ModeEvent) {
        if event.data > event.kind.data_max() {
            self.sink.report(Diagnostic::ValueOutOfRange {
                field: "mode data",
                value: event.data,
                max: event.kind.data_max(),
            });
        }

        self.cursor.write_byte(event.status_byte());
        self.cursor.write_byte(event.kind.code());
        self.cursor.write_byte(event.data);
    }

    /// Writes a meta event's status, type byte, length and payload
    fn encode_meta(&mut self, event: &MetaEvent) {
        if let Some(expected) = event.kind.expected_length() {
            assert_eq!(
                event.data.len(),
                expected,
                "meta payload length contradicts the fixed-length table"
            );
        }
        if !event.kind.is_known() {
            self.sink
                .report(Diagnostic::UnknownMetaType(event.kind.type_byte()));
        }

        self.cursor.write_byte(0xFF);
        self.cursor.write_byte(event.kind.type_byte());
        vlq::encode_into(&mut self.cursor, event.data.len() as u32);
        if !event.data.is_empty() {
            self.cursor.write(&event.data);
        }
    }

    /// Writes a sysex event's marker, length and payload
    fn encode_sysex(&mut self, event: &SysexEvent) {
        self.cursor.write_byte(event.marker.byte());
        vlq::encode_into(&mut self.cursor, event.data.len() as u32);
        self.cursor.write(&event.data);
    }
}
