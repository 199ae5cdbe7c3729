//! Whole-file parse and serialize
//!
//! Ties the chunk framer and the track codec together for the common case
//! of a complete file held in memory: one header chunk followed by as many
//! track chunks as the header declares. File I/O stays with the caller —
//! read the bytes in one go, hand them here, and write the returned buffer
//! back out in one go.

use crate::{
    chunk::{header::FileHeader, Chunk, ChunkTag},
    cursor::ByteCursor,
    diag::DiagnosticSink,
    error::CodecError,
    track::{decode::TrackDecoder, encode::TrackEncoder, Track},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A fully decoded file: its header plus every track's event sequence
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MidiFile {
    /// The decoded header chunk
    pub header: FileHeader,
    /// One decoded track per track chunk, in file order
    pub tracks: Vec<Track>,
}

impl MidiFile {
    /// Decodes a complete in-memory file.
    ///
    /// Reads the header chunk, then decodes exactly as many track chunks as
    /// the header declares. Each track gets its own decode session; all
    /// non-fatal reports flow to the one sink.
    pub fn parse<S: DiagnosticSink>(bytes: &[u8], mut sink: S) -> Result<Self, CodecError> {
        let mut cursor = ByteCursor::from(bytes);

        let header_chunk = Chunk::read_expecting(&mut cursor, ChunkTag::Header)?;
        let header = FileHeader::parse(&header_chunk.payload)?;

        let mut tracks = Vec::with_capacity(usize::from(header.track_count));
        for _ in 0..header.track_count {
            let chunk = Chunk::read_expecting(&mut cursor, ChunkTag::Track)?;
            tracks.push(TrackDecoder::with_sink(chunk.payload, &mut sink).decode()?);
        }

        Ok(Self { header, tracks })
    }

    /// Serializes the header chunk and every track chunk into the
    /// destination stream.
    ///
    /// Tracks are re-encoded event by event; decoded tracks already carry
    /// their end-of-track event, so none is appended here.
    pub fn write_into<S: DiagnosticSink>(
        &self,
        cursor: &mut ByteCursor,
        mut sink: S,
    ) -> Result<(), CodecError> {
        self.header.to_chunk().write_into(cursor)?;

        for track in &self.tracks {
            let mut encoder = TrackEncoder::with_sink(&mut sink);
            for event in track.events() {
                encoder.encode_event(event);
            }
            Chunk::new(ChunkTag::Track, encoder.into_payload()).write_into(cursor)?;
        }
        Ok(())
    }

    /// Serializes the file into a fresh byte buffer
    pub fn to_bytes<S: DiagnosticSink>(&self, sink: S) -> Result<Vec<u8>, CodecError> {
        let mut cursor = ByteCursor::new();
        self.write_into(&mut cursor, sink)?;
        Ok(cursor.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::MidiFile;
    use crate::{
        chunk::{
            header::{Division, FileHeader, Format},
            Chunk, ChunkTag,
        },
        cursor::ByteCursor,
        diag::Ignore,
        error::CodecError,
        event::voice::VoiceKind,
        track::encode::TrackEncoder,
    };

    /// Builds a two-track format 1 file the long way around
    fn sample_file_bytes() -> Vec<u8> {
        let header = FileHeader {
            format: Format::One,
            track_count: 2,
            division: Division::TicksPerQuarterNote(96),
        };

        let mut cursor = ByteCursor::new();
        header.to_chunk().write_into(&mut cursor).unwrap();

        for channel in 0..2 {
            let mut encoder = TrackEncoder::new();
            encoder.emit_voice(0, channel, VoiceKind::ProgramChange, 0x19, 0);
            encoder.emit_voice(0, channel, VoiceKind::NoteOn, 60, 0x40);
            encoder.emit_voice(96, channel, VoiceKind::NoteOff, 60, 0);
            Chunk::new(ChunkTag::Track, encoder.finish())
                .write_into(&mut cursor)
                .unwrap();
        }

        cursor.into_bytes()
    }

    #[test]
    fn file_parses_header_and_every_track() {
        let file = MidiFile::parse(&sample_file_bytes(), Ignore).unwrap();

        assert_eq!(file.header.track_count, 2);
        assert_eq!(file.tracks.len(), 2);
        for track in &file.tracks {
            // program change, note on, note off, end of track
            assert_eq!(track.len(), 4);
            assert!(track.is_terminated())
        }
    }

    #[test]
    fn decode_encode_decode_is_structurally_identical() {
        let first = MidiFile::parse(&sample_file_bytes(), Ignore).unwrap();
        let rewritten = first.to_bytes(Ignore).unwrap();
        let second = MidiFile::parse(&rewritten, Ignore).unwrap();

        assert_eq!(first, second)
    }

    #[test]
    fn file_must_start_with_a_header_chunk() {
        let mut cursor = ByteCursor::new();
        Chunk::new(ChunkTag::Track, vec![0x00, 0xFF, 0x2F, 0x00])
            .write_into(&mut cursor)
            .unwrap();

        assert_eq!(
            MidiFile::parse(cursor.as_bytes(), Ignore),
            Err(CodecError::UnexpectedChunk {
                expected: ChunkTag::Header,
                found: ChunkTag::Track,
            })
        )
    }

    #[test]
    fn missing_track_chunks_fail() {
        let header = FileHeader {
            format: Format::One,
            track_count: 1,
            division: Division::TicksPerQuarterNote(96),
        };
        let mut cursor = ByteCursor::new();
        header.to_chunk().write_into(&mut cursor).unwrap();

        assert_eq!(
            MidiFile::parse(cursor.as_bytes(), Ignore),
            Err(CodecError::TruncatedStream)
        )
    }
}
