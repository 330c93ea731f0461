// Copyright (C) 2024-2026 The vterm Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fatal error surface.
//!
//! Most malformed input is swallowed locally with a `tracing` log line:
//! an unrecognized CC1/ESC/CSI/OSC code, an oversized or timed-out
//! string sequence, a malformed UTF-8 code point. None of those raise a
//! [`ParserError`] — see the `tracing::warn!`/`debug!` call sites in
//! [`crate::parser`] for where they surface instead.

use thiserror::Error;

/// The one fatal condition the core can encounter.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParserError {
    /// A parse routine failed to advance the byte cursor, the active
    /// routine, or the input buffer.
    ///
    /// Structurally unreachable here: [`crate::parser::VtParser::feed`]
    /// drives the byte cursor itself with a `for` loop over the input
    /// slice rather than asking the active routine to report how much it
    /// consumed, so no routine ever gets the chance to stall. The variant
    /// is kept so the error surface documented for this crate matches
    /// what a host integrating against it would expect to handle.
    #[error("parser failed to make forward progress")]
    ParserStuck,
}
