// Copyright (C) 2024-2026 The vterm Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `OSC`/`DCS`/`APC`/`PM` string sequences: bytes collected until a string
//! terminator (`ST`, `ESC \`) or `BEL`.
//!
//! Only `OSC` carries semantics this crate acts on (window title, OSC 52
//! clipboard). `DCS`/`APC`/`PM` are accepted so a well-formed stream never
//! trips the unrecognized-sequence path, but their payloads are discarded
//! once logged.

use vterm_common::event::Event;

/// Which string-sequence family is being accumulated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StringKind {
    Osc,
    Dcs,
    Apc,
    Pm,
}

/// Decode a fully-collected `OSC` payload (the bytes between `ESC ]` and
/// the terminator, not including either).
#[must_use]
pub fn dispatch_osc(payload: &[u8]) -> Event {
    let Ok(text) = std::str::from_utf8(payload) else {
        warn!("OSC payload was not valid UTF-8, {} bytes dropped", payload.len());
        return Event::Unknown;
    };
    let mut parts = text.splitn(2, ';');
    let Some(code) = parts.next() else {
        return Event::Unknown;
    };
    let rest = parts.next().unwrap_or("");
    match code {
        "0" | "2" => Event::WindowTitle(rest.to_string()),
        "52" => dispatch_clipboard(rest),
        other => {
            debug!("unrecognized OSC code {other}");
            Event::Unknown
        }
    }
}

fn dispatch_clipboard(rest: &str) -> Event {
    use base64::Engine as _;

    // `rest` is `Pc;Pd` where `Pc` names the selection (ignored here, this
    // crate has a single clipboard slot) and `Pd` is `?` for a read-back
    // request or the base64 payload to store.
    let Some((_selection, payload)) = rest.split_once(';') else {
        return Event::Unknown;
    };
    if payload == "?" {
        return Event::Clipboard { query: true, data: None };
    }
    match base64::engine::general_purpose::STANDARD.decode(payload) {
        Ok(data) => Event::Clipboard { query: false, data: Some(data) },
        Err(err) => {
            warn!("OSC 52 clipboard payload failed to base64-decode: {err}");
            Event::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn osc_0_sets_window_title() {
        assert_eq!(dispatch_osc(b"0;my title"), Event::WindowTitle("my title".to_string()));
    }

    #[test]
    fn osc_52_query_requests_readback() {
        assert_eq!(dispatch_osc(b"52;c;?"), Event::Clipboard { query: true, data: None });
    }

    #[test]
    fn osc_52_decodes_base64_payload() {
        assert_eq!(
            dispatch_osc(b"52;c;aGVsbG8="),
            Event::Clipboard { query: false, data: Some(b"hello".to_vec()) }
        );
    }

    #[test]
    fn unrecognized_osc_code_is_unknown() {
        assert_eq!(dispatch_osc(b"999;whatever"), Event::Unknown);
    }
}
