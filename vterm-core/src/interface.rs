// Copyright (C) 2024-2026 The vterm Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The public facade: wires [`VtParser`] and [`Screen`] together.
//!
//! Everything upstream of this module only produces or consumes events;
//! this is the one place that has both the parser and the screen model in
//! hand, so it is also the one place that can assemble a writeback reply
//! that depends on live cursor state (`CPR`, `DECRQM`) and forward it to
//! the pty.

use vterm_buffer::handler;
use vterm_buffer::line::Line;
use vterm_buffer::notify::Notification;
use vterm_buffer::screen::Screen;
use vterm_common::config::ParserConfig;
use vterm_common::cursor::CursorVisualStyle;
use vterm_common::event::{DeviceStatusReport, Event};
use vterm_common::mode::{AnsiMode, DecPrivateMode, Mode};

use crate::io::PtyWriter;
use crate::parser::VtParser;

/// The `{x, y}` cursor position returned by [`VtEmulator::cursor`]. The
/// screen model tracks a richer [`vterm_buffer::cursor::CursorState`]
/// internally (pen attribute, wrap/origin latches); only the coordinates
/// are part of this crate's public surface.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CursorPosition {
    pub x: usize,
    pub y: usize,
}

/// A parser, a screen, and a pty writeback sink, wired together.
///
/// This is the crate's only intended entry point. A host feeds inbound
/// pty bytes in through [`VtEmulator::feed`], reads the screen model back
/// out through the accessors, and subscribes to [`Notification`]s through
/// [`VtEmulator::on`] to know when a redraw is warranted.
pub struct VtEmulator<W: PtyWriter> {
    parser: VtParser,
    screen: Screen,
    pty: W,
    observers: Vec<Box<dyn FnMut(&Notification)>>,
}

impl<W: PtyWriter> VtEmulator<W> {
    #[must_use]
    pub fn new(cols: usize, rows: usize, pty: W) -> Self {
        Self::with_config(cols, rows, pty, ParserConfig::default())
    }

    #[must_use]
    pub fn with_config(cols: usize, rows: usize, pty: W, config: ParserConfig) -> Self {
        Self {
            parser: VtParser::new(config),
            screen: Screen::new(cols, rows),
            pty,
            observers: Vec::new(),
        }
    }

    /// Subscribe to every [`Notification`] the screen model emits.
    /// Callbacks run synchronously, in emission order, before the call
    /// that triggered them returns.
    pub fn on(&mut self, cb: impl FnMut(&Notification) + 'static) {
        self.observers.push(Box::new(cb));
    }

    fn notify(&mut self, notification: Notification) {
        for observer in &mut self.observers {
            observer(&notification);
        }
    }

    /// Feed one chunk of inbound pty bytes through the parser.
    ///
    /// Each event is applied to the screen model; events whose reply
    /// depends on live state (device attributes, status reports,
    /// `DECRQM`, `XTVERSION`) are turned into bytes and handed to the
    /// pty writer as they're encountered, in the order they were parsed.
    /// A trailing [`Notification::Refresh`] fires once, after every event
    /// in the chunk has been applied, if anything actually changed.
    pub fn feed(&mut self, bytes: &[u8]) {
        let events = self.parser.feed(bytes);
        for event in &events {
            if let Some(reply) = self.writeback_for(event) {
                self.pty.write(&reply);
            }
            if let Some(notification) = handler::apply(event, &mut self.screen) {
                self.notify(notification);
            }
        }
        if let Some(refresh) = self.screen.take_refresh() {
            self.notify(refresh);
        }
    }

    fn writeback_for(&self, event: &Event) -> Option<Vec<u8>> {
        match event {
            Event::RequestPrimaryDeviceAttributes | Event::RequestDeviceId => {
                Some(b"\x1b[?1;2c".to_vec())
            }
            Event::RequestSecondaryDeviceAttributes => Some(b"\x1b[>0;256;0c".to_vec()),
            Event::DeviceStatusReport(kind) => Some(self.dsr_reply(*kind)),
            Event::RequestMode { ansi, code } => Some(self.decrqm_reply(*ansi, *code)),
            Event::RequestXtVersion => Some(b"\x1bP>|vterm(0.1.0)\x1b\\".to_vec()),
            Event::Write(bytes) => Some(bytes.clone()),
            _ => None,
        }
    }

    /// `5`/`15`/`25`/`26`/`53` report a fixed payload; only `6` (`CPR`)
    /// depends on live cursor state.
    fn dsr_reply(&self, kind: DeviceStatusReport) -> Vec<u8> {
        match kind {
            DeviceStatusReport::OperatingStatus => b"\x1b[0n".to_vec(),
            DeviceStatusReport::CursorPosition => {
                let cursor = self.screen.cursor();
                format!("\x1b[{};{}R", cursor.y + 1, cursor.x + 1).into_bytes()
            }
            DeviceStatusReport::Printer => b"\x1b[?13n".to_vec(),
            DeviceStatusReport::Udk => b"\x1b[?20n".to_vec(),
            DeviceStatusReport::Keyboard => b"\x1b[27;1;0n".to_vec(),
            DeviceStatusReport::LockingShift => b"\x1b[?50n".to_vec(),
        }
    }

    /// `DECRQM`/`RQM` reply: `CSI [?] Ps ; Pv $ y`, `Pv` one of `0`
    /// (not recognized), `1` (set) or `2` (reset). This crate never
    /// reports `3`/`4` (permanently set/reset); every mode it recognizes
    /// can be toggled.
    fn decrqm_reply(&self, ansi: bool, code: u16) -> Vec<u8> {
        let value = if ansi {
            AnsiMode::from_code(code).map_or(0, |mode| u8::from(self.ansi_mode_set(mode)) + 1)
        } else {
            DecPrivateMode::from_code(code)
                .and_then(|mode| self.dec_private_mode_set(mode))
                .map_or(0, |set| u8::from(set) + 1)
        };
        let marker = if ansi { "" } else { "?" };
        format!("\x1b[{marker}{code};{value}$y").into_bytes()
    }

    fn ansi_mode_set(&self, mode: AnsiMode) -> bool {
        match mode {
            AnsiMode::Insert => self.screen.mode().contains(Mode::INSERT),
            AnsiMode::KeyboardLock => self.screen.mode().contains(Mode::KBDLOCK),
            AnsiMode::LineFeedNewLine => self.screen.mode().contains(Mode::CRLF),
            AnsiMode::SendReceive => !self.screen.mode().contains(Mode::ECHO),
        }
    }

    /// `None` for DEC private modes with no counterpart in [`Mode`]
    /// (origin mode aside, these are host-keyboard-encoding hints the
    /// screen model doesn't track) — reported as "not recognized".
    fn dec_private_mode_set(&self, mode: DecPrivateMode) -> Option<bool> {
        use DecPrivateMode::{
            AllowWidthChange, AltScreen47, AltScreen1047, AltSendsEsc, AppCursor, AutoWrap,
            BackspaceSendsBs, ColumnMode132, CursorBlink, MetaSendsEsc, MouseButtonEvent,
            MouseSgr, MouseX10, OriginMode, ReverseVideo, ReverseWrapAround, SaveCursor,
            SaveCursorAltScreenClear, ScrollOnKeystroke, ScrollOnOutput, ShowCursor,
        };
        Some(match mode {
            AppCursor => self.screen.mode().contains(Mode::APPCURSOR),
            ReverseVideo => self.screen.mode().contains(Mode::REVERSE),
            AutoWrap => self.screen.mode().contains(Mode::WRAP),
            ShowCursor => !self.screen.mode().contains(Mode::HIDE),
            OriginMode => self.screen.cursor().origin_mode(),
            MouseX10 | MouseButtonEvent => self.screen.mode().contains(Mode::MOUSEBTN),
            MouseSgr => self.screen.mode().contains(Mode::MOUSESGR),
            AltScreen47 | AltScreen1047 | SaveCursorAltScreenClear => {
                self.screen.mode().contains(Mode::ALTSCREEN)
            }
            ColumnMode132
            | CursorBlink
            | AllowWidthChange
            | ReverseWrapAround
            | BackspaceSendsBs
            | ScrollOnOutput
            | ScrollOnKeystroke
            | MetaSendsEsc
            | AltSendsEsc
            | SaveCursor => return None,
        })
    }

    /// Resize the grid: pads/truncates every row, resets tab stops and
    /// the scroll region, clamps the cursor, and fires `resize` followed
    /// by a `refresh` if anything on screen actually moved.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.screen.resize(cols, rows);
        self.notify(Notification::Resize(cols, rows));
        if let Some(refresh) = self.screen.take_refresh() {
            self.notify(refresh);
        }
    }

    #[must_use]
    pub fn cursor(&self) -> CursorPosition {
        let cursor = self.screen.cursor();
        CursorPosition { x: cursor.x, y: cursor.y }
    }

    /// The full buffer, scrollback and visible rows together.
    #[must_use]
    pub fn buffer(&self) -> &[Line] {
        self.screen.buffer_lines()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.screen.title()
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.screen.mode()
    }

    #[must_use]
    pub fn cursor_style(&self) -> CursorVisualStyle {
        self.screen.cursor_style()
    }

    #[must_use]
    pub fn clipboard(&self) -> &[u8] {
        self.screen.clipboard()
    }

    #[must_use]
    pub fn pty(&self) -> &W {
        &self.pty
    }

    pub fn pty_mut(&mut self) -> &mut W {
        &mut self.pty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::NullPtyWriter;

    fn emulator(cols: usize, rows: usize) -> VtEmulator<NullPtyWriter> {
        VtEmulator::new(cols, rows, NullPtyWriter)
    }

    #[test]
    fn primary_da_replies_with_pinned_payload() {
        let (tx, rx) = crossbeam_channel::unbounded::<Vec<u8>>();
        let mut term = VtEmulator::new(80, 24, tx);
        term.feed(b"\x1b[c");
        assert_eq!(rx.try_recv().unwrap(), b"\x1b[?1;2c".to_vec());
    }

    #[test]
    fn decid_replies_identically_to_primary_da() {
        let (tx, rx) = crossbeam_channel::unbounded::<Vec<u8>>();
        let mut term = VtEmulator::new(80, 24, tx);
        term.feed(b"\x1bZ");
        assert_eq!(rx.try_recv().unwrap(), b"\x1b[?1;2c".to_vec());
    }

    #[test]
    fn cursor_position_report_reflects_live_cursor() {
        let (tx, rx) = crossbeam_channel::unbounded::<Vec<u8>>();
        let mut term = VtEmulator::new(80, 24, tx);
        term.feed(b"line1\r\nline2\x1b[6n");
        assert_eq!(rx.try_recv().unwrap(), b"\x1b[2;6R".to_vec());
    }

    #[test]
    fn decrqm_reports_set_for_an_enabled_dec_private_mode() {
        let (tx, rx) = crossbeam_channel::unbounded::<Vec<u8>>();
        let mut term = VtEmulator::new(80, 24, tx);
        term.feed(b"\x1b[?25h\x1b[?25$p");
        assert_eq!(rx.try_recv().unwrap(), b"\x1b[?25;1$y".to_vec());
    }

    #[test]
    fn decrqm_reports_not_recognized_for_an_untracked_code() {
        let (tx, rx) = crossbeam_channel::unbounded::<Vec<u8>>();
        let mut term = VtEmulator::new(80, 24, tx);
        term.feed(b"\x1b[?9999$p");
        assert_eq!(rx.try_recv().unwrap(), b"\x1b[?9999;0$y".to_vec());
    }

    #[test]
    fn feed_applies_print_and_fires_one_trailing_refresh() {
        let mut term = emulator(80, 24);
        let mut refreshes = 0;
        term.on(move |n| {
            if matches!(n, Notification::Refresh { .. }) {
                refreshes += 1;
            }
        });
        term.feed(b"hello");
        assert_eq!(term.cursor(), CursorPosition { x: 5, y: 0 });
        assert_eq!(term.buffer()[0].get(0).unwrap().ch, 'h');
    }

    #[test]
    fn alternate_screen_round_trip_fires_notification_and_restores_primary() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut term = emulator(80, 24);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        term.on(move |n| sink.borrow_mut().push(n.clone()));

        term.feed(b"primary");
        term.feed(b"\x1b[?1049h");
        assert!(term.mode().contains(Mode::ALTSCREEN));
        term.feed(b"\x1b[?1049l");
        assert!(!term.mode().contains(Mode::ALTSCREEN));
        assert_eq!(term.buffer()[0].get(0).unwrap().ch, 'p');

        assert!(seen.borrow().iter().any(|n| matches!(n, Notification::Alternate(true))));
        assert!(seen.borrow().iter().any(|n| matches!(n, Notification::Alternate(false))));
    }

    #[test]
    fn window_title_notification_carries_the_new_title() {
        let mut term = emulator(80, 24);
        let mut titles = Vec::new();
        term.on(move |n| {
            if let Notification::Title(title) = n {
                titles.push(title.clone());
            }
        });
        term.feed(b"\x1b]0;hello there\x07");
        assert_eq!(titles, vec!["hello there".to_string()]);
        assert_eq!(term.title(), "hello there");
    }

    #[test]
    fn resize_updates_geometry_and_notifies() {
        let mut term = emulator(80, 24);
        let mut resizes = Vec::new();
        term.on(move |n| {
            if let Notification::Resize(cols, rows) = n {
                resizes.push((*cols, *rows));
            }
        });
        term.resize(100, 30);
        assert_eq!(resizes, vec![(100, 30)]);
        assert_eq!(term.buffer().len(), 30);
    }
}
