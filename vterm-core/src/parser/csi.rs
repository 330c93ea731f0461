// Copyright (C) 2024-2026 The vterm Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSI (`ESC [`) parameter accumulation and dispatch.
//!
//! A CSI sequence is `leading modifier bytes` (private markers, 0x3C-0x3F,
//! only ever seen before the first parameter digit) + `numeric parameters`
//! (digits and `;`) + `trailing modifier bytes` (intermediates, 0x20-0x2F)
//! + one final byte (0x40-0x7E) that terminates the sequence. Dispatch
//! keys on the triple `(leading, trailing, final)` rather than a
//! string-built command name.

use vterm_common::cursor::CursorVisualStyle;
use vterm_common::event::{Direction, EraseDisplay, EraseLine, Event, TabClear};
use vterm_common::mode::{AnsiMode, DecPrivateMode};
use vterm_common::sgr::SelectGraphicRendition;

/// What to do with a byte handed to [`CsiAccum::push`].
pub enum CsiPush {
    /// Byte accepted, sequence still open.
    Continue,
    /// Byte was the final byte; the sequence is ready for dispatch.
    Done,
    /// Byte doesn't belong in a CSI sequence; abort without dispatching.
    Invalid,
}

/// Accumulates the bytes of one CSI sequence.
#[derive(Debug, Default, Clone)]
pub struct CsiAccum {
    leading_mod: Vec<u8>,
    params_raw: Vec<u8>,
    trailing_mod: Vec<u8>,
    final_byte: u8,
}

impl CsiAccum {
    pub fn push(&mut self, b: u8) -> CsiPush {
        match b {
            0x3C..=0x3F if self.params_raw.is_empty() && self.trailing_mod.is_empty() => {
                self.leading_mod.push(b);
                CsiPush::Continue
            }
            b'0'..=b'9' | b';' if self.trailing_mod.is_empty() => {
                self.params_raw.push(b);
                CsiPush::Continue
            }
            0x20..=0x2F => {
                self.trailing_mod.push(b);
                CsiPush::Continue
            }
            0x40..=0x7E => {
                self.final_byte = b;
                CsiPush::Done
            }
            _ => CsiPush::Invalid,
        }
    }

    fn params(&self) -> Vec<u16> {
        if self.params_raw.is_empty() {
            return Vec::new();
        }
        let raw = std::str::from_utf8(&self.params_raw).unwrap_or("");
        raw.split(';').map(|p| p.parse::<u16>().unwrap_or(0)).collect()
    }

    /// Dispatch the completed sequence. `SM`/`RM`/DECSET/DECRST may return
    /// an empty `Vec` when every code in the parameter list is
    /// unrecognized; each unrecognized code is logged as it is skipped.
    #[must_use]
    pub fn dispatch(&self) -> Vec<Event> {
        let params = self.params();
        let leading = self.leading_mod.as_slice();
        let trailing = self.trailing_mod.as_slice();

        match (leading, trailing, self.final_byte) {
            (b"", b"", b'@') => vec![Event::InsertChars(count(&params, 0))],
            (b"", b"", b'A') => vec![motion(Direction::Up, &params)],
            (b"", b"", b'B') => vec![motion(Direction::Down, &params)],
            (b"", b"", b'C') => vec![motion(Direction::Forward, &params)],
            (b"", b"", b'D') => vec![motion(Direction::Back, &params)],
            (b"", b"", b'E') => vec![Event::CursorNextLine(count(&params, 0))],
            (b"", b"", b'F') => vec![Event::CursorPrevLine(count(&params, 0))],
            (b"", b"", b'G') => vec![Event::CursorColumn(count(&params, 0))],
            (b"", b"", b'H' | b'f') => vec![Event::CursorPosition {
                row: Some(count(&params, 0)),
                col: Some(count(&params, 1)),
            }],
            (b"", b"", b'I') => (0..count(&params, 0)).map(|_| Event::ForwardTabStop).collect(),
            (b"", b"", b'Z') => vec![Event::BackTab(count(&params, 0))],
            (b"", b"", b'J') => vec![Event::EraseDisplay(match param(&params, 0) {
                1 => EraseDisplay::Above,
                2 => EraseDisplay::All,
                3 => EraseDisplay::SavedLines,
                _ => EraseDisplay::Below,
            })],
            (b"", b"", b'K') => vec![Event::EraseLine(match param(&params, 0) {
                1 => EraseLine::Left,
                2 => EraseLine::All,
                _ => EraseLine::Right,
            })],
            (b"", b"", b'L') => vec![Event::InsertLines(count(&params, 0))],
            (b"", b"", b'M') => vec![Event::DeleteLines(count(&params, 0))],
            (b"", b"", b'P') => vec![Event::DeleteChars(count(&params, 0))],
            (b"", b"", b'S') => vec![Event::ScrollUp(count(&params, 0))],
            (b"", b"", b'T') => vec![Event::ScrollDown(count(&params, 0))],
            (b"", b"", b'X') => vec![Event::EraseChars(count(&params, 0))],
            (b"", b"", b'c') => vec![Event::RequestPrimaryDeviceAttributes],
            (b">", b"", b'c') => vec![Event::RequestSecondaryDeviceAttributes],
            (b"", b"", b'd') => vec![Event::CursorRow(count(&params, 0))],
            (b"", b"", b'g') => vec![Event::TabClear(if param(&params, 0) == 3 {
                TabClear::All
            } else {
                TabClear::ThisColumn
            })],
            (b"", b"", b'h') => ansi_mode_events(&params, true),
            (b"", b"", b'l') => ansi_mode_events(&params, false),
            (b"?", b"", b'h') => dec_private_mode_events(&params, true),
            (b"?", b"", b'l') => dec_private_mode_events(&params, false),
            (b"", b"", b'm') => vec![Event::Sgr(sgr_events(&params))],
            (b"", b"", b'n') => dsr_event(param(&params, 0)),
            (b"?", b"", b'n') => dsr_event(param(&params, 0)),
            (b"", b"", b'r') => vec![
                Event::SetScrollRegion {
                    top: optional(&params, 0),
                    bottom: optional(&params, 1),
                },
                Event::CursorPosition { row: Some(1), col: Some(1) },
            ],
            (b"", b"", b's') => vec![Event::SaveCursor],
            (b"", b"", b'u') => vec![Event::RestoreCursor],
            (b"", b"!", b'p') => vec![Event::SoftReset],
            (b"", b" ", b'q') => vec![Event::CursorStyle(CursorVisualStyle::from(param(&params, 0) as usize))],
            (b"", b"$", b'p') => vec![Event::RequestMode { ansi: true, code: param(&params, 0) }],
            (b"?", b"$", b'p') => vec![Event::RequestMode { ansi: false, code: param(&params, 0) }],
            (b">", b"", b'q') => vec![Event::RequestXtVersion],
            _ => vec![Event::Unknown],
        }
    }
}

fn param(params: &[u16], i: usize) -> u16 {
    params.get(i).copied().unwrap_or(0)
}

fn optional(params: &[u16], i: usize) -> Option<u16> {
    match param(params, i) {
        0 => None,
        n => Some(n),
    }
}

fn count(params: &[u16], i: usize) -> u16 {
    match param(params, i) {
        0 => 1,
        n => n,
    }
}

fn motion(dir: Direction, params: &[u16]) -> Event {
    Event::CursorMove { dir, n: count(params, 0) }
}

fn ansi_mode_events(params: &[u16], enabled: bool) -> Vec<Event> {
    params
        .iter()
        .filter_map(|&code| {
            AnsiMode::from_code(code).map_or_else(
                || {
                    warn!("unrecognized ANSI mode code {code}");
                    None
                },
                |mode| Some(Event::SetAnsiMode { mode, enabled }),
            )
        })
        .collect()
}

fn dec_private_mode_events(params: &[u16], enabled: bool) -> Vec<Event> {
    params
        .iter()
        .filter_map(|&code| {
            DecPrivateMode::from_code(code).map_or_else(
                || {
                    warn!("unrecognized DEC private mode code {code}");
                    None
                },
                |mode| Some(Event::SetDecPrivateMode { mode, enabled }),
            )
        })
        .collect()
}

fn sgr_events(params: &[u16]) -> Vec<SelectGraphicRendition> {
    if params.is_empty() {
        return vec![SelectGraphicRendition::Reset];
    }
    let mut out = Vec::with_capacity(params.len());
    let mut i = 0;
    while i < params.len() {
        let p = usize::from(params[i]);
        if (p == 38 || p == 48) && params.get(i + 1) == Some(&5) {
            if let Some(&index) = params.get(i + 2) {
                out.push(SelectGraphicRendition::from_usize_color(p == 38, index));
            }
            i += 3;
            continue;
        }
        out.push(SelectGraphicRendition::from_usize(p));
        i += 1;
    }
    out
}

fn dsr_event(code: u16) -> Vec<Event> {
    use vterm_common::event::DeviceStatusReport as Dsr;
    match code {
        5 => vec![Event::DeviceStatusReport(Dsr::OperatingStatus)],
        6 => vec![Event::DeviceStatusReport(Dsr::CursorPosition)],
        15 => vec![Event::DeviceStatusReport(Dsr::Printer)],
        25 => vec![Event::DeviceStatusReport(Dsr::Udk)],
        26 => vec![Event::DeviceStatusReport(Dsr::Keyboard)],
        53 => vec![Event::DeviceStatusReport(Dsr::LockingShift)],
        other => {
            warn!("unrecognized DSR code {other}");
            vec![Event::Unknown]
        }
    }
}
