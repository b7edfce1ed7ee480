use inksac::prelude::*;
use std::io::IsTerminal;

/// Colors the shell's own diagnostics when the terminal supports it.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticStyle {
    color_support: ColorSupport,
}

impl Default for DiagnosticStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticStyle {
    pub fn new() -> Self {
        if !std::io::stderr().is_terminal() {
            return Self::plain();
        }

        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    pub fn plain() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    pub fn error(&self, error: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        error.style(error_style).to_string()
    }

    pub fn hint(&self, hint: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();
        hint.style(hint_style).to_string()
    }
}
