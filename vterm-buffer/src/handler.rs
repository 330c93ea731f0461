// Copyright (C) 2024-2026 The vterm Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Applies one semantic [`Event`] to a [`Screen`], producing any
//! notifications that fire synchronously at the point of the triggering
//! sequence (`alternate`, `title`, `resize`). `refresh` is a per-chunk
//! aggregate and is drained separately via [`Screen::take_refresh`].

use vterm_common::event::{Direction, EraseDisplay, EraseLine, Event, TabClear};
use vterm_common::glyph::AttrFlags;
use vterm_common::mode::{DecPrivateMode, Mode};
use vterm_common::sgr::SelectGraphicRendition;

use crate::notify::Notification;
use crate::screen::Screen;

/// Apply `event` to `screen`. Returns any notification that fires
/// synchronously (not `Refresh`, which the caller drains per-chunk).
///
/// Events with no grid effect (character-set designation and locking
/// shift are fully handled inside the parser's own state before it ever
/// emits an event; `Write`/DA/DSR/DECRQM/XTVERSION are handled by the
/// facade, which has access to both parser and screen) are no-ops here.
#[allow(clippy::too_many_lines)]
pub fn apply(event: &Event, screen: &mut Screen) -> Option<Notification> {
    match event {
        Event::Print(s) => {
            screen.print(s);
            None
        }
        Event::Bell | Event::NoOp | Event::Unknown => None,
        Event::Backspace => {
            screen.move_relative(-1, 0);
            None
        }
        Event::ForwardTabStop => {
            screen.tab_forward();
            None
        }
        Event::BackTab(n) => {
            screen.tab_backward(*n as usize);
            None
        }
        Event::LineFeed => {
            screen.new_line(false);
            None
        }
        Event::CarriageReturn => {
            screen.set_column(0);
            None
        }
        Event::Index => {
            screen.index();
            None
        }
        Event::NextLine => {
            screen.index();
            screen.set_column(0);
            None
        }
        Event::ReverseIndex => {
            screen.reverse_index();
            None
        }
        Event::HorizontalTabSet => {
            screen.tab_set();
            None
        }
        Event::SaveCursor => {
            screen.save_cursor();
            None
        }
        Event::RestoreCursor => {
            screen.restore_cursor();
            None
        }
        Event::ApplicationKeypad(on) => {
            screen.set_mode(Mode::APPKEYPAD, *on);
            None
        }
        Event::DesignateCharset { .. } | Event::LockingShift(_) => None,
        Event::ScreenAlignmentTest => {
            screen.screen_alignment_test();
            None
        }
        Event::FullReset => {
            let (cols, rows) = (screen.cols(), screen.rows());
            *screen = Screen::new(cols, rows);
            None
        }
        Event::SoftReset => {
            screen.set_mode(Mode::INSERT, false);
            screen.set_mode(Mode::WRAP, true);
            screen.set_origin_mode(false);
            screen.set_scroll_region(None, None);
            None
        }
        Event::CursorPosition { row, col } => {
            let row = row.map(|r| r.saturating_sub(1) as usize);
            let col = col.map(|c| c.saturating_sub(1) as usize);
            screen.move_to(col, row);
            None
        }
        Event::CursorMove { dir, n } => {
            let n = (*n).max(1) as isize;
            match dir {
                Direction::Up => screen.move_relative(0, -n),
                Direction::Down => screen.move_relative(0, n),
                Direction::Forward => screen.move_relative(n, 0),
                Direction::Back => screen.move_relative(-n, 0),
            }
            None
        }
        Event::CursorNextLine(n) => {
            screen.cursor_next_line(*n as usize);
            None
        }
        Event::CursorPrevLine(n) => {
            screen.cursor_prev_line(*n as usize);
            None
        }
        Event::CursorColumn(n) => {
            screen.set_column(n.saturating_sub(1) as usize);
            None
        }
        Event::CursorRow(n) => {
            screen.set_row(n.saturating_sub(1) as usize);
            None
        }
        Event::EraseDisplay(mode) => {
            match mode {
                EraseDisplay::Below => screen.erase_below(),
                EraseDisplay::Above => screen.erase_above(),
                EraseDisplay::All | EraseDisplay::SavedLines => screen.erase_all(),
            }
            None
        }
        Event::EraseLine(mode) => {
            match mode {
                EraseLine::Right => screen.erase_right(),
                EraseLine::Left => screen.erase_left(),
                EraseLine::All => screen.erase_line_all(),
            }
            None
        }
        Event::InsertLines(n) => {
            screen.insert_lines((*n).max(1) as usize);
            None
        }
        Event::DeleteLines(n) => {
            screen.delete_lines((*n).max(1) as usize);
            None
        }
        Event::InsertChars(n) => {
            screen.insert_chars((*n).max(1) as usize);
            None
        }
        Event::DeleteChars(n) => {
            screen.delete_chars((*n).max(1) as usize);
            None
        }
        Event::EraseChars(n) => {
            screen.erase_chars((*n).max(1) as usize);
            None
        }
        Event::ScrollUp(n) => {
            screen.scroll_up((*n).max(1) as isize);
            None
        }
        Event::ScrollDown(n) => {
            screen.scroll_up(-((*n).max(1) as isize));
            None
        }
        Event::SetAnsiMode { mode, enabled } => {
            apply_ansi_mode(screen, *mode, *enabled);
            None
        }
        Event::SetDecPrivateMode { mode, enabled } => apply_dec_private_mode(screen, *mode, *enabled),
        Event::RequestMode { .. } | Event::RequestPrimaryDeviceAttributes | Event::RequestSecondaryDeviceAttributes => None,
        Event::Sgr(ops) => {
            apply_sgr(screen, ops);
            None
        }
        Event::SetScrollRegion { top, bottom } => {
            let top = top.map(|t| t.saturating_sub(1) as usize);
            let bottom = bottom.map(|b| b.saturating_sub(1) as usize);
            screen.set_scroll_region(top, bottom);
            None
        }
        Event::TabClear(mode) => {
            match mode {
                TabClear::ThisColumn => screen.tab_clear_here(),
                TabClear::All => screen.tab_clear_all(),
            }
            None
        }
        Event::WindowTitle(title) => {
            screen.set_title(title.clone());
            Some(Notification::Title(title.clone()))
        }
        Event::Clipboard { query, data } => {
            if !*query {
                if let Some(data) = data {
                    screen.set_clipboard(data.clone());
                }
            }
            None
        }
        Event::RequestDeviceId | Event::DeviceStatusReport(_) => None,
        Event::CursorStyle(style) => {
            screen.set_cursor_style(*style);
            None
        }
        Event::RequestXtVersion | Event::Write(_) => None,
    }
}

fn apply_ansi_mode(screen: &mut Screen, mode: vterm_common::mode::AnsiMode, enabled: bool) {
    use vterm_common::mode::AnsiMode;
    match mode {
        AnsiMode::Insert => screen.set_mode(Mode::INSERT, enabled),
        AnsiMode::KeyboardLock => screen.set_mode(Mode::KBDLOCK, enabled),
        AnsiMode::LineFeedNewLine => screen.set_mode(Mode::CRLF, enabled),
        AnsiMode::SendReceive => screen.set_mode(Mode::ECHO, !enabled),
    }
}

fn apply_dec_private_mode(screen: &mut Screen, mode: DecPrivateMode, enabled: bool) -> Option<Notification> {
    match mode {
        DecPrivateMode::AppCursor => {
            screen.set_mode(Mode::APPCURSOR, enabled);
            None
        }
        DecPrivateMode::ReverseVideo => {
            screen.set_mode(Mode::REVERSE, enabled);
            None
        }
        DecPrivateMode::OriginMode => {
            screen.set_origin_mode(enabled);
            None
        }
        DecPrivateMode::AutoWrap => {
            screen.set_mode(Mode::WRAP, enabled);
            None
        }
        DecPrivateMode::ShowCursor => {
            screen.set_mode(Mode::HIDE, !enabled);
            None
        }
        DecPrivateMode::MouseX10 | DecPrivateMode::MouseButtonEvent => {
            screen.set_mode(Mode::MOUSEBTN, enabled);
            if matches!(mode, DecPrivateMode::MouseButtonEvent) {
                screen.set_mode(Mode::MOUSEMOTION, enabled);
            }
            None
        }
        DecPrivateMode::MouseSgr => {
            screen.set_mode(Mode::MOUSESGR, enabled);
            None
        }
        DecPrivateMode::AltScreen47 | DecPrivateMode::AltScreen1047 | DecPrivateMode::SaveCursorAltScreenClear => {
            Some(screen.set_alternate_mode(enabled))
        }
        DecPrivateMode::SaveCursor => {
            if enabled {
                screen.save_cursor();
            } else {
                screen.restore_cursor();
            }
            None
        }
        // 132-column mode, allow-width-change, blink, reverse-wrap-around,
        // backspace-sends-BS, scroll-on-output/keystroke, and meta/alt-sends-ESC
        // are recognized but have no grid effect: 132-column resizing is the
        // host's call (it owns the pty geometry), and the rest are keyboard/
        // host-encoding hints outside this crate's scope.
        DecPrivateMode::ColumnMode132
        | DecPrivateMode::AllowWidthChange
        | DecPrivateMode::CursorBlink
        | DecPrivateMode::ReverseWrapAround
        | DecPrivateMode::BackspaceSendsBs
        | DecPrivateMode::ScrollOnOutput
        | DecPrivateMode::ScrollOnKeystroke
        | DecPrivateMode::MetaSendsEsc
        | DecPrivateMode::AltSendsEsc => None,
    }
}

fn apply_sgr(screen: &mut Screen, ops: &[SelectGraphicRendition]) {
    let mut attr = screen.attr();
    for op in ops {
        attr = match *op {
            SelectGraphicRendition::Reset => Default::default(),
            SelectGraphicRendition::Bold => attr.with_flag(AttrFlags::BOLD, true),
            SelectGraphicRendition::ResetBold => attr.with_flag(AttrFlags::BOLD, false),
            SelectGraphicRendition::Italic => attr.with_flag(AttrFlags::ITALIC, true),
            SelectGraphicRendition::ResetItalic => attr.with_flag(AttrFlags::ITALIC, false),
            SelectGraphicRendition::Underline => attr.with_flag(AttrFlags::UNDERLINE, true),
            SelectGraphicRendition::ResetUnderline => attr.with_flag(AttrFlags::UNDERLINE, false),
            SelectGraphicRendition::Blink => attr.with_flag(AttrFlags::BLINK, true),
            SelectGraphicRendition::ResetBlink => attr.with_flag(AttrFlags::BLINK, false),
            SelectGraphicRendition::Reverse => attr.with_flag(AttrFlags::REVERSE, true),
            SelectGraphicRendition::ResetReverse => attr.with_flag(AttrFlags::REVERSE, false),
            // "Invisible" has no dedicated attribute bit in the packed word;
            // GFX is otherwise unused by SGR, so conceal reuses it.
            SelectGraphicRendition::Invisible => attr.with_flag(AttrFlags::GFX, true),
            SelectGraphicRendition::ResetInvisible => attr.with_flag(AttrFlags::GFX, false),
            SelectGraphicRendition::Foreground(idx) => attr.with_fg(idx),
            SelectGraphicRendition::Background(idx) => attr.with_bg(idx),
            SelectGraphicRendition::Unknown(_) => attr,
        };
    }
    screen.set_attr(attr);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sgr_reset_then_color_matches_scenario_6() {
        let mut screen = Screen::new(40, 24);
        apply(&Event::Sgr(vec![SelectGraphicRendition::Foreground(1)]), &mut screen);
        screen.print("X");
        apply(&Event::Sgr(vec![SelectGraphicRendition::Reset]), &mut screen);
        screen.print("Y");
        assert_eq!(screen.line(0).unwrap().get(0).unwrap().attr.fg(), 1);
        assert_eq!(screen.line(0).unwrap().get(1).unwrap().attr, vterm_common::glyph::Attr::default());
    }

    #[test]
    fn window_title_updates_screen_and_emits_notification() {
        let mut screen = Screen::new(10, 5);
        let note = apply(&Event::WindowTitle("hi".to_string()), &mut screen);
        assert_eq!(screen.title(), "hi");
        assert_eq!(note, Some(Notification::Title("hi".to_string())));
    }

    #[test]
    fn carriage_return_and_line_feed_compose_crlf() {
        let mut screen = Screen::new(10, 5);
        screen.print("ab");
        apply(&Event::CarriageReturn, &mut screen);
        apply(&Event::LineFeed, &mut screen);
        assert_eq!(screen.cursor().x, 0);
        assert_eq!(screen.cursor().y, 1);
    }

    #[test]
    fn decsc_decrc_round_trips_cursor_position() {
        let mut screen = Screen::new(40, 24);
        apply(&Event::CursorPosition { row: Some(4), col: Some(6) }, &mut screen);
        apply(&Event::SaveCursor, &mut screen);
        apply(&Event::CursorPosition { row: Some(20), col: Some(30) }, &mut screen);
        apply(&Event::RestoreCursor, &mut screen);
        assert_eq!((screen.cursor().x, screen.cursor().y), (5, 3));
    }

    #[test]
    fn dec_private_mode_1048_round_trips_cursor_position() {
        use vterm_common::mode::DecPrivateMode;

        let mut screen = Screen::new(40, 24);
        apply(&Event::CursorPosition { row: Some(4), col: Some(6) }, &mut screen);
        apply(&Event::SetDecPrivateMode { mode: DecPrivateMode::SaveCursor, enabled: true }, &mut screen);
        apply(&Event::CursorPosition { row: Some(20), col: Some(30) }, &mut screen);
        apply(&Event::SetDecPrivateMode { mode: DecPrivateMode::SaveCursor, enabled: false }, &mut screen);
        assert_eq!((screen.cursor().x, screen.cursor().y), (5, 3));
    }
}
