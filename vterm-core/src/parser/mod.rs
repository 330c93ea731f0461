// Copyright (C) 2024-2026 The vterm Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The VT parser: drives a byte stream through a family of parse
//! routines and emits [`Event`]s for [`vterm_buffer::handler::apply`] to
//! consume.
//!
//! [`VtParser::feed`] owns the byte cursor itself (a plain `for` loop
//! over the input slice) rather than asking each routine to report how
//! far it advanced, so "no forward progress" — the one condition
//! [`crate::error::ParserError::ParserStuck`] names — can't arise.

mod charset;
mod csi;
mod string;

use std::time::{Duration, Instant};

use vterm_common::charmap::CharsetId;
use vterm_common::config::ParserConfig;
use vterm_common::event::{CharsetSlot, Event, LockingShift};

use self::charset::CharsetTable;
use self::csi::{CsiAccum, CsiPush};
use self::string::StringKind;

/// Which parse routine is currently consuming the byte stream.
#[derive(Debug, Default)]
enum Routine {
    #[default]
    Unknown,
    Esc,
    EscHash,
    EscPercent,
    EscDesignate(CharsetSlot),
    EscSpace,
    Csi(CsiAccum),
    StringSeq { kind: StringKind, started_at: Instant, esc_seen: bool },
}

/// Translates a byte stream into the semantic [`Event`] vocabulary.
///
/// Owns the character-set designation table ([`CharsetTable`]): the
/// screen model treats `DesignateCharset`/`LockingShift` as no-ops, so
/// this is the only place that state can live.
#[derive(Debug)]
pub struct VtParser {
    routine: Routine,
    charsets: CharsetTable,
    saved_charsets: Option<CharsetTable>,
    string_buf: Vec<u8>,
    /// Incomplete UTF-8 tail carried across `feed()` calls when a
    /// multi-byte code point is split at a chunk boundary.
    pending_utf8: Vec<u8>,
    config: ParserConfig,
}

impl Default for VtParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

impl VtParser {
    #[must_use]
    pub fn new(config: ParserConfig) -> Self {
        Self {
            routine: Routine::Unknown,
            charsets: CharsetTable::default(),
            saved_charsets: None,
            string_buf: Vec::new(),
            pending_utf8: Vec::new(),
            config,
        }
    }

    /// Feed a chunk of bytes and drain the events it produces.
    #[must_use]
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Event> {
        let mut events = Vec::new();
        let mut print_run = std::mem::take(&mut self.pending_utf8);
        for &b in bytes {
            self.step(b, &mut print_run, &mut events);
        }
        self.flush_print(&mut print_run, &mut events, true);
        events
    }

    fn step(&mut self, b: u8, print_run: &mut Vec<u8>, events: &mut Vec<Event>) {
        let routine = std::mem::take(&mut self.routine);
        match routine {
            Routine::Unknown => {
                if is_c0(b) {
                    self.flush_print(print_run, events, false);
                    self.dispatch_c0(b, events);
                } else {
                    print_run.push(b);
                    self.routine = Routine::Unknown;
                }
            }
            Routine::Esc => self.step_esc(b, events),
            Routine::EscHash => self.step_esc_hash(b, events),
            Routine::EscPercent => self.step_esc_percent(b, events),
            Routine::EscDesignate(slot) => self.step_esc_designate(slot, b, events),
            Routine::EscSpace => self.step_esc_space(b, events),
            Routine::Csi(mut accum) => {
                if b == 0x1B {
                    if self.config.warn {
                        warn!("CSI sequence aborted by an embedded ESC");
                    }
                    self.routine = Routine::Esc;
                } else if is_c0(b) {
                    // Embedded C0 controls are dispatched normally without
                    // disturbing the sequence under construction.
                    self.dispatch_c0(b, events);
                    self.routine = Routine::Csi(accum);
                } else {
                    match accum.push(b) {
                        CsiPush::Continue => self.routine = Routine::Csi(accum),
                        CsiPush::Done => {
                            let new = accum.dispatch();
                            self.commit(events, new);
                            self.routine = Routine::Unknown;
                        }
                        CsiPush::Invalid => {
                            if self.config.warn {
                                warn!("malformed CSI sequence aborted");
                            }
                            self.routine = Routine::Unknown;
                        }
                    }
                }
            }
            Routine::StringSeq { kind, started_at, esc_seen } => {
                self.step_string(kind, started_at, esc_seen, b, events);
            }
        }
    }

    fn step_string(&mut self, kind: StringKind, started_at: Instant, esc_seen: bool, b: u8, events: &mut Vec<Event>) {
        if esc_seen {
            if b == b'\\' {
                self.finish_string(kind, events);
                self.routine = Routine::Unknown;
            } else {
                // Not a string terminator: the sequence is aborted and the
                // byte that follows `ESC` is handed to a fresh one-shot ESC
                // dispatch, since the host commonly aborts a string by
                // starting the next sequence immediately.
                if self.config.warn {
                    warn!("string sequence aborted by an embedded ESC");
                }
                self.string_buf.clear();
                self.routine = Routine::Unknown;
                self.step_esc(b, events);
            }
            return;
        }
        if b == 0x1B {
            self.routine = Routine::StringSeq { kind, started_at, esc_seen: true };
            return;
        }
        if b == 0x07 {
            self.finish_string(kind, events);
            self.routine = Routine::Unknown;
            return;
        }
        self.string_buf.push(b);
        let overlong = self.string_buf.len() > self.config.max_string_sequence;
        let timed_out = started_at.elapsed() > Duration::from_millis(self.config.osc_time_limit_ms);
        if overlong || timed_out {
            if self.config.warn {
                warn!("string sequence aborted: too long or timed out");
            }
            self.string_buf.clear();
            self.routine = Routine::Unknown;
        } else {
            self.routine = Routine::StringSeq { kind, started_at, esc_seen: false };
        }
    }

    fn finish_string(&mut self, kind: StringKind, events: &mut Vec<Event>) {
        let payload = std::mem::take(&mut self.string_buf);
        if kind == StringKind::Osc {
            let ev = string::dispatch_osc(&payload);
            self.commit(events, vec![ev]);
        } else {
            debug!("discarding {} byte {:?} payload", payload.len(), kind);
        }
    }

    fn step_esc(&mut self, b: u8, events: &mut Vec<Event>) {
        match b {
            b'D' => self.finish_esc(Event::Index, events),
            b'E' => self.finish_esc(Event::NextLine, events),
            b'H' => self.finish_esc(Event::HorizontalTabSet, events),
            b'M' => self.finish_esc(Event::ReverseIndex, events),
            b'Z' => self.finish_esc(Event::RequestDeviceId, events),
            b'7' => self.finish_esc(Event::SaveCursor, events),
            b'8' => self.finish_esc(Event::RestoreCursor, events),
            b'=' => self.finish_esc(Event::ApplicationKeypad(true), events),
            b'>' => self.finish_esc(Event::ApplicationKeypad(false), events),
            b'c' => self.finish_esc(Event::FullReset, events),
            b'n' => self.finish_esc(Event::LockingShift(LockingShift::Ls2), events),
            b'o' => self.finish_esc(Event::LockingShift(LockingShift::Ls3), events),
            b'|' => self.finish_esc(Event::LockingShift(LockingShift::Ls3R), events),
            b'}' => self.finish_esc(Event::LockingShift(LockingShift::Ls2R), events),
            b'~' => self.finish_esc(Event::LockingShift(LockingShift::Ls1R), events),
            b'[' => self.routine = Routine::Csi(CsiAccum::default()),
            b']' => self.start_string(StringKind::Osc),
            b'P' => self.start_string(StringKind::Dcs),
            b'^' => self.start_string(StringKind::Pm),
            b'_' => self.start_string(StringKind::Apc),
            b'#' => self.routine = Routine::EscHash,
            b'%' => self.routine = Routine::EscPercent,
            b'(' => self.routine = Routine::EscDesignate(CharsetSlot::G0),
            b')' | b'-' => self.routine = Routine::EscDesignate(CharsetSlot::G1),
            b'*' | b'.' => self.routine = Routine::EscDesignate(CharsetSlot::G2),
            b'+' | b'/' => self.routine = Routine::EscDesignate(CharsetSlot::G3),
            b' ' => self.routine = Routine::EscSpace,
            // `ESC ESC` resets without dispatch: stay in the one-shot state.
            0x1B => self.routine = Routine::Esc,
            other => {
                if self.config.warn {
                    warn!("unrecognized ESC byte {other:#04x}");
                }
                self.commit(events, vec![Event::Unknown]);
                self.routine = Routine::Unknown;
            }
        }
    }

    fn finish_esc(&mut self, ev: Event, events: &mut Vec<Event>) {
        self.commit(events, vec![ev]);
        self.routine = Routine::Unknown;
    }

    fn start_string(&mut self, kind: StringKind) {
        self.string_buf.clear();
        self.routine = Routine::StringSeq { kind, started_at: Instant::now(), esc_seen: false };
    }

    fn step_esc_hash(&mut self, b: u8, events: &mut Vec<Event>) {
        let ev = match b {
            b'8' => Event::ScreenAlignmentTest,
            b'3' | b'4' | b'5' | b'6' => Event::NoOp,
            other => {
                if self.config.warn {
                    warn!("unrecognized ESC # byte {other:#04x}");
                }
                Event::Unknown
            }
        };
        self.finish_esc(ev, events);
    }

    fn step_esc_percent(&mut self, b: u8, events: &mut Vec<Event>) {
        let ev = match b {
            b'@' | b'G' => Event::NoOp,
            other => {
                if self.config.warn {
                    warn!("unrecognized ESC % byte {other:#04x}");
                }
                Event::Unknown
            }
        };
        self.finish_esc(ev, events);
    }

    fn step_esc_space(&mut self, b: u8, events: &mut Vec<Event>) {
        let ev = match b {
            b'F' | b'G' | b'L' | b'M' | b'N' => Event::NoOp,
            other => {
                if self.config.warn {
                    warn!("unrecognized ESC SP byte {other:#04x}");
                }
                Event::Unknown
            }
        };
        self.finish_esc(ev, events);
    }

    fn step_esc_designate(&mut self, slot: CharsetSlot, b: u8, events: &mut Vec<Event>) {
        let ev = match CharsetId::from_designator(b) {
            Some(charset) => Event::DesignateCharset { slot, charset },
            None => {
                if self.config.warn {
                    warn!("unrecognized charset designator {b:#04x}");
                }
                Event::Unknown
            }
        };
        self.finish_esc(ev, events);
    }

    /// Apply the character-set side effects of a completed event batch
    /// (designation, locking shift, DECSC/DECRC, hard reset) and append it.
    fn commit(&mut self, events: &mut Vec<Event>, new: Vec<Event>) {
        for ev in &new {
            match ev {
                Event::DesignateCharset { slot, charset } => self.charsets.designate(*slot, *charset),
                Event::LockingShift(shift) => self.charsets.apply_locking_shift(*shift),
                Event::SaveCursor => self.saved_charsets = Some(self.charsets.snapshot()),
                Event::RestoreCursor => {
                    if let Some(saved) = self.saved_charsets {
                        self.charsets.restore(saved);
                    }
                }
                Event::FullReset => {
                    self.charsets = CharsetTable::default();
                    self.saved_charsets = None;
                }
                _ => {}
            }
        }
        events.extend(new);
    }

    fn dispatch_c0(&mut self, b: u8, events: &mut Vec<Event>) {
        match b {
            0x00 | 0x05 | 0x11 | 0x13 | 0x18 | 0x1A | 0x7F => {}
            0x07 => events.push(Event::Bell),
            0x08 => events.push(Event::Backspace),
            0x09 => events.push(Event::ForwardTabStop),
            0x0A | 0x0B | 0x0C => events.push(Event::LineFeed),
            0x0D => events.push(Event::CarriageReturn),
            0x0E => {
                self.charsets.apply_locking_shift(LockingShift::ShiftOutG1);
                events.push(Event::LockingShift(LockingShift::ShiftOutG1));
            }
            0x0F => {
                self.charsets.apply_locking_shift(LockingShift::ShiftInG0);
                events.push(Event::LockingShift(LockingShift::ShiftInG0));
            }
            0x1B => self.routine = Routine::Esc,
            other => {
                if self.config.warn {
                    warn!("unrecognized C0 control {other:#04x}");
                }
                events.push(Event::Unknown);
            }
        }
    }

    /// Decode `print_run` as UTF-8 with recovery and emit a [`Event::Print`].
    ///
    /// A genuinely invalid byte is replaced with `?`. An incomplete
    /// trailing sequence is buffered for the next `feed()` call when
    /// `at_chunk_end` is true (the chunk may simply have split a code
    /// point); otherwise a control byte interrupted it, which can never be
    /// a valid continuation byte, so it is replaced with `?` immediately.
    fn flush_print(&mut self, print_run: &mut Vec<u8>, events: &mut Vec<Event>, at_chunk_end: bool) {
        if print_run.is_empty() {
            return;
        }
        let bytes = std::mem::take(print_run);
        let mut out = String::new();
        let mut rest: &[u8] = &bytes;
        while !rest.is_empty() {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(err) => {
                    let valid_up_to = err.valid_up_to();
                    if let Ok(valid) = std::str::from_utf8(&rest[..valid_up_to]) {
                        out.push_str(valid);
                    }
                    match err.error_len() {
                        Some(len) => {
                            out.push('?');
                            rest = &rest[valid_up_to + len..];
                        }
                        None => {
                            if at_chunk_end {
                                self.pending_utf8 = rest[valid_up_to..].to_vec();
                            } else {
                                out.push('?');
                            }
                            break;
                        }
                    }
                }
            }
        }
        if !out.is_empty() {
            events.push(Event::Print(self.charsets.translate(&out)));
        }
    }
}

const fn is_c0(b: u8) -> bool {
    b <= 0x1F || b == 0x7F
}

#[cfg(test)]
mod tests {
    use super::*;
    use vterm_common::sgr::SelectGraphicRendition;

    #[test]
    fn plain_text_round_trips() {
        let mut parser = VtParser::default();
        assert_eq!(parser.feed(b"hello"), vec![Event::Print("hello".to_string())]);
    }

    #[test]
    fn split_utf8_code_point_across_feed_calls() {
        let mut parser = VtParser::default();
        // "é" = 0xC3 0xA9
        assert_eq!(parser.feed(&[0xC3]), Vec::<Event>::new());
        assert_eq!(parser.feed(&[0xA9]), vec![Event::Print("é".to_string())]);
    }

    #[test]
    fn control_byte_interrupts_incomplete_utf8_with_replacement() {
        let mut parser = VtParser::default();
        let events = parser.feed(&[0xC3, 0x07]);
        assert_eq!(events, vec![Event::Print("?".to_string()), Event::Bell]);
    }

    #[test]
    fn csi_sgr_reset_then_foreground() {
        let mut parser = VtParser::default();
        let events = parser.feed(b"\x1b[31;1m");
        assert_eq!(
            events,
            vec![Event::Sgr(vec![SelectGraphicRendition::Foreground(1), SelectGraphicRendition::Bold])]
        );
    }

    #[test]
    fn primary_da_request_is_recognized() {
        let mut parser = VtParser::default();
        assert_eq!(parser.feed(b"\x1b[c"), vec![Event::RequestPrimaryDeviceAttributes]);
    }

    #[test]
    fn decsc_snapshots_and_decrc_restores_charset_table() {
        let mut parser = VtParser::default();
        parser.feed(b"\x1b(0"); // designate DEC special graphics into G0
        parser.feed(b"\x1b7"); // DECSC
        parser.feed(b"\x1b(B"); // back to US ASCII
        let events = parser.feed(b"\x1b8q"); // DECRC, then print through whatever's active
        assert!(events.contains(&Event::RestoreCursor));
        // after DECRC, G0 should be DEC special graphics again: 'q' -> box-drawing horizontal line
        assert_eq!(parser.charsets.translate("q"), "\u{2500}");
    }

    #[test]
    fn osc_title_sequence_terminated_by_st() {
        let mut parser = VtParser::default();
        let events = parser.feed(b"\x1b]0;hello\x1b\\");
        assert_eq!(events, vec![Event::WindowTitle("hello".to_string())]);
    }

    #[test]
    fn osc_title_sequence_terminated_by_bel() {
        let mut parser = VtParser::default();
        let events = parser.feed(b"\x1b]2;world\x07");
        assert_eq!(events, vec![Event::WindowTitle("world".to_string())]);
    }

    #[test]
    fn oversized_string_sequence_aborts_silently() {
        let mut parser = VtParser::default();
        let mut cfg = ParserConfig::default();
        cfg.max_string_sequence = 4;
        let mut parser = VtParser::new(cfg);
        let events = parser.feed(b"\x1b]0;this is way too long\x1b\\");
        assert!(events.is_empty());
        // parser recovered: a fresh sequence afterward still works
        let events = parser.feed(b"hi");
        assert_eq!(events, vec![Event::Print("hi".to_string())]);
    }
}
