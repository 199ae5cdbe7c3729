//! # swaram
//!
//! A minimal dependency codec for the standard MIDI file container: the
//! event data model, the per-event encode/decode algorithms (including the
//! running-status state machine), the variable-length integer codec, and
//! chunk framing — without pulling in playback, synthesis, or file I/O.
//!
//! ## Overview
//!
//! A MIDI file is a header chunk followed by track chunks; each chunk is a
//! 4-character ASCII tag, a 32-bit big-endian length, and a payload. A track
//! payload is a stream of delta-timed events of four kinds — voice, mode,
//! meta and sysex — where the status byte of consecutive voice/mode events
//! is frequently omitted ("running status") and mode events share the
//! controller change's status nibble, distinguishable only by their first
//! data byte. This crate reconstructs event boundaries from such streams and
//! writes them back bit-exactly.
//!
//! ## Example Usage
//!
//! ```rust
//! use swaram::{
//!     chunk::{
//!         header::{Division, FileHeader, Format},
//!         Chunk, ChunkTag,
//!     },
//!     cursor::ByteCursor,
//!     diag::Ignore,
//!     event::voice::VoiceKind,
//!     file::MidiFile,
//!     track::encode::TrackEncoder,
//! };
//!
//! // Encode one track: a note, then the mandatory end-of-track event.
//! let mut encoder = TrackEncoder::new();
//! encoder.emit_voice(0, 0, VoiceKind::NoteOn, 60, 0x40);
//! encoder.emit_voice(96, 0, VoiceKind::NoteOff, 60, 0);
//! let payload = encoder.finish();
//!
//! // Frame it into a complete single-track file.
//! let header = FileHeader {
//!     format: Format::Zero,
//!     track_count: 1,
//!     division: Division::TicksPerQuarterNote(96),
//! };
//! let mut out = ByteCursor::new();
//! header.to_chunk().write_into(&mut out).unwrap();
//! Chunk::new(ChunkTag::Track, payload).write_into(&mut out).unwrap();
//!
//! // And read it back.
//! let file = MidiFile::parse(out.as_bytes(), Ignore).unwrap();
//! assert_eq!(file.tracks[0].events().len(), 3);
//! ```
//!
//! ## Library Structure
//!
//! - **[`cursor`]**: the growable byte region both codec directions operate
//!   over, with independent sequential write and read offsets.
//! - **[`vlq`]**: the 7-bits-per-byte variable-length quantity codec used
//!   for delta times and payload lengths.
//! - **[`event`]**: the event model — [`event::TrackEvent`], the closed
//!   [`event::EventBody`] sum, and the per-kind wire tables.
//! - **[`track`]**: owned event sequences plus the encode and decode
//!   sessions; [`track::decode::TrackDecoder`] houses the running-status
//!   state machine.
//! - **[`chunk`]**: tag/length framing and the [`chunk::header`] fields.
//! - **[`file`]**: whole-file parse and serialize over in-memory bytes.
//! - **[`error`] / [`diag`]**: fatal errors versus reported-and-continue
//!   diagnostics.
//!
//! ## Error Policy
//!
//! Structural framing problems (bad tag, truncated chunk, malformed
//! variable-length quantity) abort with a [`error::CodecError`]. Semantic
//! slips (out-of-range data bytes, unknown meta types, a missing
//! end-of-track marker) are reported through an injected
//! [`diag::DiagnosticSink`] and processing continues, matching how
//! permissive real-world files need to be handled. Nothing is retried
//! internally.

pub mod chunk;
pub mod cursor;
pub mod diag;
pub mod error;
pub mod event;
pub mod file;
pub mod track;
pub mod vlq;

pub use chunk::{Chunk, ChunkTag};
pub use cursor::ByteCursor;
pub use diag::{Diagnostic, DiagnosticSink};
pub use error::CodecError;
pub use event::{EventBody, TrackEvent};
pub use file::MidiFile;
pub use track::Track;
