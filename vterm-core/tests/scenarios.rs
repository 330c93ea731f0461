// Copyright (C) 2024-2026 The vterm Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end scenarios on a 40x24 grid, one per named case in `spec.md`'s
//! Testable Properties section. Each drives [`VtEmulator`] exactly as a
//! host would: feed bytes in, read the buffer/cursor/notifications back.

use std::cell::RefCell;
use std::rc::Rc;

use vterm_buffer::notify::Notification;
use vterm_core::interface::VtEmulator;
use vterm_core::io::NullPtyWriter;

fn term() -> VtEmulator<NullPtyWriter> {
    VtEmulator::new(40, 24, NullPtyWriter)
}

fn row_text(term: &VtEmulator<NullPtyWriter>, y: usize) -> String {
    term.buffer()[y].as_slice().iter().map(|g| g.ch).collect()
}

#[test]
fn scenario_1_plain_print() {
    let mut term = term();
    let refreshes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&refreshes);
    term.on(move |n| {
        if let Notification::Refresh { dirty, .. } = n {
            sink.borrow_mut().push(*dirty);
        }
    });
    term.feed(b"test");
    let expected: String = "test".to_string() + &" ".repeat(36);
    assert_eq!(row_text(&term, 0), expected);
    assert_eq!(*refreshes.borrow(), vec![(0, 0)]);
    assert_eq!(term.cursor(), vterm_core::interface::CursorPosition { x: 4, y: 0 });
}

#[test]
fn scenario_2_line_wrap() {
    let mut term = term();
    term.feed(&[b'E'; 50]);
    assert_eq!(row_text(&term, 0), "E".repeat(40));
    assert_eq!(row_text(&term, 1), "E".repeat(10) + &" ".repeat(30));
    assert_eq!(term.cursor(), vterm_core::interface::CursorPosition { x: 10, y: 1 });
}

#[test]
fn scenario_3_scroll_region() {
    let mut term = term();
    let mut input = Vec::new();
    for i in 0..30 {
        input.extend_from_slice(i.to_string().as_bytes());
        input.extend_from_slice(b"\n\r");
    }
    input.extend_from_slice(b"\x1b[1;23r");
    input.extend_from_slice(b"\x1b[23;1H");
    input.extend_from_slice(b"29\r\n30");
    input.extend_from_slice(b"\x1b[1;24r");
    term.feed(&input);

    assert!(row_text(&term, 23).starts_with("23"));
    assert!(row_text(&term, 24).starts_with("24"));
    assert!(row_text(&term, 29).starts_with("29"));
    assert!(row_text(&term, 30).starts_with("30"));
}

#[test]
fn scenario_4_alternate_screen_round_trip() {
    let mut term = term();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    term.on(move |n| {
        if let Notification::Alternate(on) = n {
            sink.borrow_mut().push(*on);
        }
    });

    term.feed(b"A");
    let saved_cursor = term.cursor();
    term.feed(b"\x1b[?1049h");
    term.feed(b"B");
    term.feed(b"\x1b[?1049l");

    assert!(row_text(&term, 0).starts_with('A'));
    assert_eq!(term.cursor(), saved_cursor);
    assert_eq!(*seen.borrow(), vec![true, false]);
}

#[test]
fn scenario_5_primary_da_reply() {
    let (tx, rx) = crossbeam_channel::unbounded::<Vec<u8>>();
    let mut term = VtEmulator::new(40, 24, tx);
    let before = term.buffer()[0].as_slice().to_vec();
    term.feed(b"\x1b[c");
    assert_eq!(rx.try_recv().unwrap(), b"\x1b[?1;2c".to_vec());
    assert_eq!(term.buffer()[0].as_slice(), before.as_slice());
}

#[test]
fn scenario_6_sgr_reset_and_color() {
    let mut term = term();
    term.feed(b"\x1b[31mX\x1b[0mY");
    let line = &term.buffer()[0];
    assert_eq!(line.get(0).unwrap().attr.fg(), 1);
    assert_eq!(line.get(0).unwrap().ch, 'X');
    assert_eq!(line.get(1).unwrap().attr, vterm_common::glyph::Attr::default());
    assert_eq!(line.get(1).unwrap().ch, 'Y');
}

#[test]
fn decsc_decrc_restores_cursor_position() {
    let mut term = term();
    // Move to row 4, col 6 (1-based), save, wander off, then restore.
    term.feed(b"\x1b[4;6H\x1b7\x1b[20;30H\x1b8");
    assert_eq!(term.cursor(), vterm_core::interface::CursorPosition { x: 5, y: 3 });
}

#[test]
fn csi_s_u_restores_cursor_position() {
    let mut term = term();
    term.feed(b"\x1b[4;6H\x1b[s\x1b[20;30H\x1b[u");
    assert_eq!(term.cursor(), vterm_core::interface::CursorPosition { x: 5, y: 3 });
}
