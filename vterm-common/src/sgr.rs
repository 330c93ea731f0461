// Copyright (C) 2024-2026 The vterm Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SGR` (Select Graphic Rendition) parameter vocabulary.
//!
//! Unlike a renderer-facing color model, colors here are plain indices
//! (0-511) into the packed [`crate::glyph::Attr`] word; 256/257 denote
//! the default background/foreground per `spec.md` 3. No true-color
//! (24-bit) SGR is recognized — it is an explicit non-goal.

use crate::glyph::DEFAULT_FG;

/// One decoded `SGR` sub-command, produced by iterating a CSI `m` parameter list.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SelectGraphicRendition {
    Reset,
    Bold,
    ResetBold,
    Italic,
    ResetItalic,
    Underline,
    ResetUnderline,
    Blink,
    ResetBlink,
    Reverse,
    ResetReverse,
    Invisible,
    ResetInvisible,
    Foreground(u16),
    Background(u16),
    Unknown(usize),
}

impl SelectGraphicRendition {
    /// Decode a single already-split numeric `SGR` parameter.
    ///
    /// `38;5;N` and `48;5;N` are three-parameter forms and are decoded by
    /// the caller (the CSI dispatcher), which recognizes the `38`/`48`
    /// prefix and consumes the following `5;N` pair itself before calling
    /// back in here with the resolved index.
    #[must_use]
    pub fn from_usize(val: usize) -> Self {
        match val {
            0 => Self::Reset,
            1 => Self::Bold,
            22 => Self::ResetBold,
            3 => Self::Italic,
            23 => Self::ResetItalic,
            4 => Self::Underline,
            24 => Self::ResetUnderline,
            5 => Self::Blink,
            25 => Self::ResetBlink,
            7 => Self::Reverse,
            27 => Self::ResetReverse,
            8 => Self::Invisible,
            28 => Self::ResetInvisible,
            30..=37 => Self::Foreground((val - 30) as u16),
            39 => Self::Foreground(DEFAULT_FG),
            40..=47 => Self::Background((val - 40) as u16),
            49 => Self::Background(u16::from(crate::glyph::DEFAULT_BG)),
            90..=97 => Self::Foreground((val - 90 + 8) as u16),
            100..=107 => Self::Background((val - 100 + 8) as u16),
            other => Self::Unknown(other),
        }
    }

    /// Build the indexed-256-color variant for `38;5;N` / `48;5;N`.
    #[must_use]
    pub const fn from_usize_color(is_foreground: bool, index: u16) -> Self {
        if is_foreground {
            Self::Foreground(index)
        } else {
            Self::Background(index)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_reset_and_bold() {
        assert_eq!(SelectGraphicRendition::from_usize(0), SelectGraphicRendition::Reset);
        assert_eq!(SelectGraphicRendition::from_usize(1), SelectGraphicRendition::Bold);
        assert_eq!(SelectGraphicRendition::from_usize(22), SelectGraphicRendition::ResetBold);
    }

    #[test]
    fn decodes_standard_and_bright_colors() {
        assert_eq!(SelectGraphicRendition::from_usize(31), SelectGraphicRendition::Foreground(1));
        assert_eq!(SelectGraphicRendition::from_usize(39), SelectGraphicRendition::Foreground(DEFAULT_FG));
        assert_eq!(SelectGraphicRendition::from_usize(91), SelectGraphicRendition::Foreground(9));
        assert_eq!(SelectGraphicRendition::from_usize(104), SelectGraphicRendition::Background(12));
    }

    #[test]
    fn unknown_param_is_preserved() {
        assert_eq!(SelectGraphicRendition::from_usize(59), SelectGraphicRendition::Unknown(59));
    }

    #[test]
    fn indexed_color_helper() {
        assert_eq!(SelectGraphicRendition::from_usize_color(true, 200), SelectGraphicRendition::Foreground(200));
        assert_eq!(SelectGraphicRendition::from_usize_color(false, 200), SelectGraphicRendition::Background(200));
    }
}
