// Copyright (C) 2024-2026 The vterm Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cursor visual style, decoded from `DECSCUSR` (`CSI Ps SP q`).
//!
//! Not named in `spec.md`'s CSI table; supplemented because it is a
//! low-risk, standard DEC private sequence real shells emit. The screen
//! model stores the decoded style and exposes it for a renderer to use;
//! it has no effect on grid contents.

#[allow(clippy::module_name_repetitions)]
#[derive(Default, Debug, Eq, PartialEq, Clone, Copy)]
pub enum CursorVisualStyle {
    BlockCursorBlink,
    #[default]
    BlockCursorSteady,
    UnderlineCursorBlink,
    UnderlineCursorSteady,
    VerticalLineCursorBlink,
    VerticalLineCursorSteady,
}

impl From<usize> for CursorVisualStyle {
    fn from(value: usize) -> Self {
        match value {
            2 => Self::BlockCursorSteady,
            3 => Self::UnderlineCursorBlink,
            4 => Self::UnderlineCursorSteady,
            5 => Self::VerticalLineCursorBlink,
            6 => Self::VerticalLineCursorSteady,
            _ => Self::BlockCursorBlink,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_param_defaults_to_blinking_block() {
        assert_eq!(CursorVisualStyle::from(99), CursorVisualStyle::BlockCursorBlink);
        assert_eq!(CursorVisualStyle::from(0), CursorVisualStyle::BlockCursorBlink);
    }

    #[test]
    fn known_params_decode() {
        assert_eq!(CursorVisualStyle::from(4), CursorVisualStyle::UnderlineCursorSteady);
    }
}
