//! Terminal output with ANSI colors

use super::registry::{FormatError, Formatter};
use crate::metta::token::{unroll, Category, Token, TokenNode};
use crossterm::style::{Color, Stylize};

/// Colors cycled through by parenthesis depth class.
pub const DEFAULT_PAREN_PALETTE: [Color; 6] = [
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::Green,
    Color::Blue,
    Color::DarkYellow,
];

#[derive(Debug, Clone)]
pub struct AnsiFormatter {
    paren_palette: Vec<Color>,
}

impl Default for AnsiFormatter {
    fn default() -> Self {
        AnsiFormatter {
            paren_palette: DEFAULT_PAREN_PALETTE.to_vec(),
        }
    }
}

impl AnsiFormatter {
    /// Use a custom palette for parentheses. An empty palette falls back to the default.
    pub fn with_palette(paren_palette: Vec<Color>) -> Self {
        if paren_palette.is_empty() {
            return AnsiFormatter::default();
        }
        AnsiFormatter { paren_palette }
    }

    fn paren_color(&self, depth: u8) -> Color {
        self.paren_palette[usize::from(depth) % self.paren_palette.len()]
    }

    fn render_token(&self, token: &Token) -> String {
        let text = token.text.as_str();
        match token.category {
            Category::PlainText => text.to_string(),
            Category::Comment => text.with(Color::DarkGrey).italic().to_string(),
            Category::String => text.with(Color::Green).to_string(),
            Category::Variable => text.with(Color::Cyan).to_string(),
            Category::NamespaceRef => text.with(Color::DarkCyan).bold().to_string(),
            Category::Keyword => text.with(Color::Magenta).bold().to_string(),
            Category::Operator => text.with(Color::Red).to_string(),
            Category::Number => text.with(Color::DarkYellow).to_string(),
            Category::FunctionName => text.with(Color::Blue).to_string(),
            Category::Bracket | Category::Punctuation => text.with(Color::Grey).to_string(),
            Category::BracketOpen(depth) | Category::BracketClose(depth) => {
                text.with(self.paren_color(depth.get())).to_string()
            }
            Category::BracketUnmatched => text.with(Color::White).on(Color::Red).bold().to_string(),
        }
    }

    pub fn render(&self, nodes: &[TokenNode]) -> String {
        unroll(nodes)
            .iter()
            .map(|token| self.render_token(token))
            .collect()
    }
}

impl Formatter for AnsiFormatter {
    fn name(&self) -> &str {
        "ansi"
    }

    fn format_tokens(&self, nodes: &[TokenNode]) -> Result<String, FormatError> {
        Ok(self.render(nodes))
    }

    fn description(&self) -> &str {
        "Terminal colors, parentheses colored by depth"
    }
}
