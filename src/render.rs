//! The prompt escaping contract.
//!
//! Shell prompts count the printed width of the prompt string, so two things
//! must be guarded when emitting segments into one:
//!
//! * zero-width runs (color codes) must be bracketed in the renderer's
//!   `escape_hl_start` / `escape_hl_end` markers so the shell does not count
//!   them, and
//! * literal characters that the shell's prompt syntax would interpret must
//!   be replaced per the renderer's translation table.
//!
//! [`escape`](PromptRenderer::escape) is applied exactly once, at final
//! emission.  Re-applying it to already-escaped text would double the
//! replacements, so callers must not escape eagerly.

/// Escaping rules for one target shell.
pub trait PromptRenderer {
    /// Marker opening a zero-width run.
    fn escape_hl_start(&self) -> &'static str;

    /// Marker closing a zero-width run.
    fn escape_hl_end(&self) -> &'static str;

    /// `literal character -> replacement` table.  Characters absent from the
    /// table pass through unchanged.
    fn character_translations(&self) -> &'static [(char, &'static str)];

    /// Replace every translated character in `text`, left to right, each
    /// source character at most once.
    fn escape(&self, text: &str) -> String {
        let table = self.character_translations();
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match table.iter().find(|(from, _)| *from == c) {
                Some((_, to)) => out.push_str(to),
                None => out.push(c),
            }
        }
        out
    }

    /// Bracket a zero-width styling run in the width-escape markers.
    fn wrap_zero_width(&self, styling: &str) -> String {
        format!(
            "{}{}{}",
            self.escape_hl_start(),
            styling,
            self.escape_hl_end()
        )
    }
}

/// zsh prompt rules: `%{ %}` width escapes, `%` doubled.
pub struct ZshRenderer;

impl PromptRenderer for ZshRenderer {
    fn escape_hl_start(&self) -> &'static str {
        "%{"
    }

    fn escape_hl_end(&self) -> &'static str {
        "%}"
    }

    fn character_translations(&self) -> &'static [(char, &'static str)] {
        &[('%', "%%")]
    }
}

/// bash prompt rules: `\[ \]` width escapes, backslash doubled.
pub struct BashRenderer;

impl PromptRenderer for BashRenderer {
    fn escape_hl_start(&self) -> &'static str {
        "\\["
    }

    fn escape_hl_end(&self) -> &'static str {
        "\\]"
    }

    fn character_translations(&self) -> &'static [(char, &'static str)] {
        &[('\\', "\\\\")]
    }
}

/// No-op rules for status bars that take plain text.
pub struct PlainRenderer;

impl PromptRenderer for PlainRenderer {
    fn escape_hl_start(&self) -> &'static str {
        ""
    }

    fn escape_hl_end(&self) -> &'static str {
        ""
    }

    fn character_translations(&self) -> &'static [(char, &'static str)] {
        &[]
    }
}
