//! Terminal markdown rendering with syntax-highlighted code blocks.
//!
//! `ChatRenderer` combines `termimad` for prose and `syntect` for code
//! fences. The skin, accent color and highlight theme follow the current
//! [`Theme`]; toggling the theme rebuilds the renderer.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;
use termimad::MadSkin;
use termimad::crossterm::style::Color;

use suki_types::chat::Theme;

pub struct ChatRenderer {
    theme: Theme,
    skin: MadSkin,
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl ChatRenderer {
    pub fn new(theme: Theme) -> Self {
        let mut skin = if theme.is_dark() {
            MadSkin::default_dark()
        } else {
            MadSkin::default_light()
        };

        let accent = accent_color(theme);
        skin.bold.set_fg(accent);
        skin.headers[0].set_fg(accent);
        skin.headers[1].set_fg(accent);
        skin.inline_code.set_fg(if theme.is_dark() {
            Color::Yellow
        } else {
            Color::DarkYellow
        });

        Self {
            theme,
            skin,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// The bot's name styled as a speaker label.
    pub fn bot_label(&self, name: &str) -> String {
        let label = console::style(name).bold();
        let label = if self.theme.is_dark() {
            label.magenta()
        } else {
            label.blue()
        };
        format!("{label}")
    }

    /// The user styled as a speaker label.
    pub fn user_label(&self) -> String {
        format!("{}", console::style("Tú").green().bold())
    }

    /// Input prompt shown in front of the user's line.
    pub fn user_prompt(&self) -> String {
        format!("  {} ", console::style("Tú >").green().bold())
    }

    /// Redraw the terminal line holding the tail of a reply being revealed.
    ///
    /// The first line carries the bot label, continuation lines are indented.
    /// The input prompt keeps the terminal in raw mode, so the line is
    /// rewritten from column zero and flushed on every call.
    pub fn draw_reveal_line(&self, out: &mut impl Write, label: &str, pending: &str) -> io::Result<()> {
        write!(out, "\r")?;
        queue!(out, Clear(ClearType::CurrentLine))?;
        match pending.rsplit_once('\n') {
            Some((_, tail)) => write!(out, "  {tail}")?,
            None => write!(out, "  {label} {pending}")?,
        }
        out.flush()
    }

    /// Render a committed message. Fenced code is highlighted, prose goes
    /// through termimad.
    pub fn render_final(&self, markdown: &str) -> String {
        let mut output = String::new();
        let mut in_code_block = false;
        let mut code_lang = String::new();
        let mut code_buf = String::new();

        for line in markdown.lines() {
            if line.starts_with("```") {
                if in_code_block {
                    output.push_str(&self.highlight_code(&code_buf, &code_lang));
                    output.push('\n');
                } else {
                    code_lang = line.trim_start_matches('`').trim().to_string();
                    code_buf.clear();
                }
                in_code_block = !in_code_block;
            } else if in_code_block {
                code_buf.push_str(line);
                code_buf.push('\n');
            } else {
                output.push_str(&self.skin.term_text(line).to_string());
            }
        }

        // Unclosed fence: highlight what arrived.
        if in_code_block && !code_buf.is_empty() {
            output.push_str(&self.highlight_code(&code_buf, &code_lang));
        }

        output
    }

    fn highlight_code(&self, code: &str, lang: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("  {}\n", console::style(format!("--- {lang} ---")).dim()));

        let Some(theme) = self.theme_set.themes.get(syntax_theme_name(self.theme)) else {
            for line in code.lines() {
                output.push_str(&format!("  {line}\n"));
            }
            return output;
        };

        let syntax = if lang.is_empty() {
            self.syntax_set.find_syntax_plain_text()
        } else {
            self.syntax_set
                .find_syntax_by_token(lang)
                .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
        };
        let mut h = HighlightLines::new(syntax, theme);

        for line in code.lines() {
            let ranges: Vec<(Style, &str)> = h
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_default();
            let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
            output.push_str(&format!("  {escaped}\x1b[0m\n"));
        }

        output
    }
}

/// Heading and emphasis color for a theme.
fn accent_color(theme: Theme) -> Color {
    match theme {
        Theme::Dark => Color::Rgb {
            r: 255,
            g: 182,
            b: 193,
        },
        Theme::Light => Color::Magenta,
    }
}

fn syntax_theme_name(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => "base16-ocean.dark",
        Theme::Light => "base16-ocean.light",
    }
}
