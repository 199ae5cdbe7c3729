//! Non-fatal diagnostic reporting
//!
//! The original format is forgiving: out-of-range data bytes are still
//! written, unknown meta types pass through as raw bytes, and a track missing
//! its end-of-track marker still yields every event that was decoded. Each of
//! those conditions is surfaced as a [`Diagnostic`] through an injected
//! [`DiagnosticSink`] rather than an error, so encoding and decoding continue
//! on a best-effort basis. [`Ignore`] is the no-op default; a
//! `Vec<Diagnostic>` also implements the sink trait for callers that want to
//! collect and inspect reports.

use thiserror::Error;

/// A recoverable condition noticed while encoding or decoding.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Diagnostic {
    /// A voice or mode data byte exceeded its kind's legal maximum. The
    /// value was written to the stream anyway.
    #[error("{field} value {value:#04x} is larger than legal limit {max:#04x}")]
    ValueOutOfRange {
        /// Which data byte was out of range
        field: &'static str,
        /// The offending value
        value: u8,
        /// The kind's declared maximum
        max: u8,
    },
    /// A meta event type byte outside the known table was read or written
    #[error("Unknown meta event type {0:#04x}")]
    UnknownMetaType(u8),
    /// A track's byte stream ended on something other than the end-of-track
    /// meta event
    #[error("End-of-track marker not found")]
    MissingEndOfTrack,
}

/// Destination for [`Diagnostic`] reports.
///
/// Encode and decode sessions each hold their own sink, so decoding several
/// tracks concurrently needs no shared state.
pub trait DiagnosticSink {
    /// Receives one diagnostic report
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Sink that discards every report
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ignore;

impl DiagnosticSink for Ignore {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}
