//! Symbol system with Unicode and ASCII fallbacks

use ratatui::symbols::border;

/// Symbol with Unicode and ASCII fallback
#[derive(Debug, Clone, Copy)]
pub struct Symbol {
    pub unicode: char,
    pub ascii: char,
}

impl Symbol {
    pub const fn new(unicode: char, ascii: char) -> Self {
        Self { unicode, ascii }
    }

    /// Render the appropriate character based on Unicode support
    pub fn render(&self, use_unicode: bool) -> char {
        if use_unicode {
            self.unicode
        } else {
            self.ascii
        }
    }
}

/// Lit cell of a block digit
pub const DIGIT_FILL: Symbol = Symbol::new('\u{2588}', '#'); // █

/// Ring track cell (ASCII ring only, Unicode uses the canvas)
pub const RING_TRACK: Symbol = Symbol::new('\u{00B7}', '.'); // ·

/// Progress arc cell (ASCII ring only)
pub const RING_ARC: Symbol = Symbol::new('\u{2022}', 'o'); // •

/// Tick mark cell (ASCII ring only)
pub const TICK: Symbol = Symbol::new('\u{2219}', '+'); // ∙

/// Five-second tick mark cell (ASCII ring only)
pub const TICK_MAJOR: Symbol = Symbol::new('\u{25AA}', '#'); // ▪

/// Tick mark of the current second (ASCII ring only)
pub const TICK_ACTIVE: Symbol = Symbol::new('\u{25C6}', '*'); // ◆

/// Pressed / released toggle indicators on the controls bar
pub const BUTTON_ON: Symbol = Symbol::new('\u{25CF}', '*'); // ●
pub const BUTTON_OFF: Symbol = Symbol::new('\u{25CB}', 'o'); // ○

/// Border set for the frame and the help box
pub fn border_set(use_unicode: bool) -> border::Set {
    if use_unicode {
        border::ROUNDED
    } else {
        border::Set {
            top_left: "+",
            top_right: "+",
            bottom_left: "+",
            bottom_right: "+",
            vertical_left: "|",
            vertical_right: "|",
            horizontal_top: "-",
            horizontal_bottom: "-",
        }
    }
}

/// Detect if the terminal supports Unicode characters
///
/// Checks the locale variables for UTF-8, then known Unicode-capable
/// terminals.
pub fn detect_unicode() -> bool {
    let utf8_locale = ["LC_ALL", "LC_CTYPE", "LANG"].iter().any(|var| {
        std::env::var(var)
            .map(|value| value.to_lowercase().contains("utf"))
            .unwrap_or(false)
    });
    if utf8_locale {
        return true;
    }

    if let Ok(term_program) = std::env::var("TERM_PROGRAM") {
        let unicode_terminals = [
            "iTerm.app",
            "Apple_Terminal",
            "vscode",
            "Alacritty",
            "kitty",
            "WezTerm",
        ];
        if unicode_terminals.iter().any(|t| term_program.contains(t)) {
            return true;
        }
    }

    if let Ok(term) = std::env::var("TERM") {
        let unicode_terms = ["xterm", "screen", "tmux", "rxvt"];
        if unicode_terms.iter().any(|t| term.contains(t)) {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_render() {
        assert_eq!(DIGIT_FILL.render(true), '\u{2588}');
        assert_eq!(DIGIT_FILL.render(false), '#');
    }

    #[test]
    fn test_ascii_symbols_are_ascii() {
        let all = [
            DIGIT_FILL,
            RING_TRACK,
            RING_ARC,
            TICK,
            TICK_MAJOR,
            TICK_ACTIVE,
            BUTTON_ON,
            BUTTON_OFF,
        ];
        for symbol in all {
            assert!(symbol.ascii.is_ascii(), "{symbol:?} is not ASCII");
        }
    }

    #[test]
    fn test_ascii_border_is_ascii() {
        let set = border_set(false);
        assert!(set.top_left.is_ascii() && set.horizontal_top.is_ascii());
        assert_eq!(border_set(true).top_left, border::ROUNDED.top_left);
    }
}
