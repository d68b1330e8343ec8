//! Colours used across kc's output. `console` drops the escape codes on its
//! own when the stream isn't a terminal.

use std::fmt::Display;

use console::{style, StyledObject};

pub const RULE: &str = "─────────────────────────────────────────────────────────";
pub const CURRENT_MARKER: &str = "●";
pub const CHECK: &str = "✓";

pub fn header<D: Display>(text: D) -> StyledObject<D> {
    style(text).cyan().bold()
}

pub fn index<D: Display>(text: D) -> StyledObject<D> {
    style(text).yellow()
}

pub fn current<D: Display>(text: D) -> StyledObject<D> {
    style(text).green().bold()
}

pub fn muted<D: Display>(text: D) -> StyledObject<D> {
    style(text).color256(8)
}

pub fn prompt<D: Display>(text: D) -> StyledObject<D> {
    style(text).blue()
}

pub fn success<D: Display>(text: D) -> StyledObject<D> {
    style(text).green().bold()
}

pub fn highlight<D: Display>(text: D) -> StyledObject<D> {
    style(text).cyan().bold()
}

pub fn warning<D: Display>(text: D) -> StyledObject<D> {
    style(text).yellow()
}

pub fn error<D: Display>(text: D) -> StyledObject<D> {
    style(text).red()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_preserved() {
        let styled = current("prod-east").force_styling(false).to_string();
        assert_eq!(styled, "prod-east");
    }

    #[test]
    fn forced_styling_wraps_text() {
        let styled = error("boom").force_styling(true).to_string();
        assert!(styled.contains("boom"));
        assert!(styled.starts_with("\u{1b}["));
    }
}
