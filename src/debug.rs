//! Tracing hooks for transcoder construction and calls.
//!
//! Everything here compiles to an inline no-op unless the `tracing` feature
//! is enabled.

use crate::padding::Padding;

/// Target name for tracing events.
#[cfg(feature = "tracing")]
const TRANSCODER_TARGET: &str = "flagpack::transcoder";

/// Traces a transcoder that passed validation.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_transcoder_built(fields: usize, max_fields: u32, padding: Padding) {
    tracing::debug!(
        target: TRANSCODER_TARGET,
        fields = fields,
        max_fields = max_fields,
        padding = ?padding,
        "transcoder_built"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_transcoder_built(_fields: usize, _max_fields: u32, _padding: Padding) {}

/// Traces a successful encode.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_encode(fields: usize, protected: &dyn std::fmt::Display) {
    tracing::trace!(
        target: TRANSCODER_TARGET,
        fields = fields,
        protected = %protected,
        "encode"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_encode(_fields: usize, _protected: &dyn std::fmt::Display) {}

/// Traces a successful decode. `padded` counts fields the integer did not carry.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_decode(payload_bits: usize, padded: usize, padding: Padding) {
    tracing::trace!(
        target: TRANSCODER_TARGET,
        payload_bits = payload_bits,
        padded = padded,
        padding = ?padding,
        "decode"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_decode(_payload_bits: usize, _padded: usize, _padding: Padding) {}

/// Traces a rejected construction or call.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_rejected(operation: &'static str, kind: &'static str) {
    tracing::debug!(
        target: TRANSCODER_TARGET,
        operation = operation,
        kind = kind,
        "rejected"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_rejected(_operation: &'static str, _kind: &'static str) {}
