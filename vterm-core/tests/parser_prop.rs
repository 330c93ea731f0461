// Copyright (C) 2024-2026 The vterm Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use proptest::prelude::*;
use vterm_core::parser::VtParser;

/// Printable ASCII, common controls, the `ESC` introducer, and fully
/// random bytes, mirroring the byte mix a real pty would deliver.
fn arb_vt_bytes() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(
        prop_oneof![
            3 => 0x20u8..=0x7E,
            1 => prop::sample::select(vec![0x07u8, 0x08, b'\r', b'\n', b'\t']),
            1 => Just(0x1Bu8),
            1 => any::<u8>(),
        ],
        0..256,
    )
}

proptest! {
    /// No byte sequence, however malformed, should ever panic the parser.
    #[test]
    fn parser_never_panics_on_random_bytes(data in arb_vt_bytes()) {
        let mut parser = VtParser::default();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| parser.feed(&data)));
        prop_assert!(result.is_ok());
    }

    /// Feeding the same bytes as one chunk or split across many single-byte
    /// `feed()` calls produces the same sequence of `Print` text, modulo
    /// the incomplete-UTF-8 buffering `feed()` explicitly documents.
    #[test]
    fn feeding_in_chunks_matches_feeding_whole(data in arb_vt_bytes()) {
        use vterm_common::event::Event;

        let mut whole = VtParser::default();
        let events_whole = whole.feed(&data);

        let mut chunked = VtParser::default();
        let mut events_chunked = Vec::new();
        for byte in &data {
            events_chunked.extend(chunked.feed(std::slice::from_ref(byte)));
        }

        let print_text = |events: &[Event]| {
            events
                .iter()
                .filter_map(|e| match e {
                    Event::Print(s) => Some(s.clone()),
                    _ => None,
                })
                .collect::<String>()
        };
        prop_assert_eq!(print_text(&events_whole), print_text(&events_chunked));
    }
}
