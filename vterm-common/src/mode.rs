// Copyright (C) 2024-2026 The vterm Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The screen model's public mode bitmask, and the DEC private / ANSI
//! mode codes that set and clear it.

use bitflags::bitflags;

bitflags! {
    /// Mode flags exposed by the public facade's `mode()` accessor.
    #[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
    pub struct Mode: u16 {
        const WRAP         = 1 << 0;
        const INSERT       = 1 << 1;
        const APPKEYPAD    = 1 << 2;
        const ALTSCREEN     = 1 << 3;
        const CRLF          = 1 << 4;
        const MOUSEBTN      = 1 << 5;
        const MOUSEMOTION   = 1 << 6;
        const REVERSE       = 1 << 7;
        const KBDLOCK       = 1 << 8;
        const HIDE          = 1 << 9;
        const ECHO          = 1 << 10;
        const APPCURSOR     = 1 << 11;
        const MOUSESGR      = 1 << 12;
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::WRAP | Self::ECHO
    }
}

/// DEC private mode codes recognized by `CSI ? Ps h` / `CSI ? Ps l` (DECSET/DECRST).
///
/// Codes with no bit in [`Mode`] (origin mode, 132-column mode, and the
/// handful of host-keyboard-encoding hints) are handled directly by the
/// screen model rather than folded into the public bitmask.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecPrivateMode {
    AppCursor,
    ColumnMode132,
    ReverseVideo,
    OriginMode,
    AutoWrap,
    CursorBlink,
    ShowCursor,
    AllowWidthChange,
    ReverseWrapAround,
    AltScreen47,
    AltScreen1047,
    BackspaceSendsBs,
    MouseX10,
    MouseButtonEvent,
    MouseSgr,
    ScrollOnOutput,
    ScrollOnKeystroke,
    MetaSendsEsc,
    AltSendsEsc,
    SaveCursor,
    SaveCursorAltScreenClear,
}

impl DecPrivateMode {
    #[must_use]
    pub fn from_code(code: u16) -> Option<Self> {
        Some(match code {
            1 => Self::AppCursor,
            3 => Self::ColumnMode132,
            5 => Self::ReverseVideo,
            6 => Self::OriginMode,
            7 => Self::AutoWrap,
            12 => Self::CursorBlink,
            25 => Self::ShowCursor,
            40 => Self::AllowWidthChange,
            45 => Self::ReverseWrapAround,
            47 => Self::AltScreen47,
            1047 => Self::AltScreen1047,
            67 => Self::BackspaceSendsBs,
            1000 => Self::MouseX10,
            1002 => Self::MouseButtonEvent,
            1006 => Self::MouseSgr,
            1010 => Self::ScrollOnOutput,
            1011 => Self::ScrollOnKeystroke,
            1036 => Self::MetaSendsEsc,
            1039 => Self::AltSendsEsc,
            1048 => Self::SaveCursor,
            1049 => Self::SaveCursorAltScreenClear,
            _ => return None,
        })
    }
}

/// ANSI (non-DEC-private) mode codes recognized by plain `CSI Ps h` / `CSI Ps l` (SM/RM).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnsiMode {
    KeyboardLock,
    Insert,
    SendReceive,
    LineFeedNewLine,
}

impl AnsiMode {
    #[must_use]
    pub fn from_code(code: u16) -> Option<Self> {
        Some(match code {
            2 => Self::KeyboardLock,
            4 => Self::Insert,
            12 => Self::SendReceive,
            20 => Self::LineFeedNewLine,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_has_wrap_and_echo() {
        let mode = Mode::default();
        assert!(mode.contains(Mode::WRAP));
        assert!(mode.contains(Mode::ECHO));
        assert!(!mode.contains(Mode::INSERT));
    }

    #[test]
    fn dec_private_mode_lookup() {
        assert_eq!(DecPrivateMode::from_code(7), Some(DecPrivateMode::AutoWrap));
        assert_eq!(DecPrivateMode::from_code(1049), Some(DecPrivateMode::SaveCursorAltScreenClear));
        assert_eq!(DecPrivateMode::from_code(9999), None);
    }

    #[test]
    fn ansi_mode_lookup() {
        assert_eq!(AnsiMode::from_code(4), Some(AnsiMode::Insert));
        assert_eq!(AnsiMode::from_code(9999), None);
    }
}
