//! Terminal theme mapping token styles to ANSI colors.
//!
//! Colors are the Catppuccin Mocha palette, written as 24-bit SGR
//! sequences.

use dependenttt_mode::Style;
use std::collections::HashMap;

const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

mod catppuccin {
    use super::Rgb;

    pub const MAUVE: Rgb = Rgb {
        r: 0xcb,
        g: 0xa6,
        b: 0xf7,
    }; // #cba6f7
    pub const GREEN: Rgb = Rgb {
        r: 0xa6,
        g: 0xe3,
        b: 0xa1,
    }; // #a6e3a1
    pub const PEACH: Rgb = Rgb {
        r: 0xfa,
        g: 0xb3,
        b: 0x87,
    }; // #fab387
    pub const OVERLAY0: Rgb = Rgb {
        r: 0x6c,
        g: 0x70,
        b: 0x86,
    }; // #6c7086
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeStyle {
    pub fg: Rgb,
    pub italic: bool,
}

impl ThemeStyle {
    fn escape(&self) -> String {
        let italic = if self.italic { "3;" } else { "" };
        format!(
            "\x1b[{}38;2;{};{};{}m",
            italic, self.fg.r, self.fg.g, self.fg.b
        )
    }
}

pub struct Theme {
    styles: HashMap<Style, ThemeStyle>,
}

impl Theme {
    pub fn catppuccin_mocha() -> Self {
        let mut styles = HashMap::new();

        styles.insert(
            Style::Keyword,
            ThemeStyle {
                fg: catppuccin::MAUVE,
                italic: false,
            },
        );
        styles.insert(
            Style::String,
            ThemeStyle {
                fg: catppuccin::GREEN,
                italic: false,
            },
        );
        styles.insert(
            Style::Number,
            ThemeStyle {
                fg: catppuccin::PEACH,
                italic: false,
            },
        );
        styles.insert(
            Style::Comment,
            ThemeStyle {
                fg: catppuccin::OVERLAY0,
                italic: true,
            },
        );

        Self { styles }
    }

    pub fn style_for(&self, style: Style) -> Option<&ThemeStyle> {
        self.styles.get(&style)
    }

    /// `text` wrapped in the escape sequence for `style`; unstyled text is returned as is
    pub fn paint(&self, style: Option<Style>, text: &str) -> String {
        match style.and_then(|s| self.style_for(s)) {
            Some(theme_style) => format!("{}{}{}", theme_style.escape(), text, RESET),
            None => text.to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::catppuccin_mocha()
    }
}
