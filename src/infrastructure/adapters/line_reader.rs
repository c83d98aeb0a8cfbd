//! 터미널 라인 입력 어댑터.
//! 명령 이름을 타이핑하는 동안 일치하는 명령 추천을 프롬프트 아래에 표시한다.

use std::env;
use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::queue;
use crossterm::style::{Color, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, ClearType};
use tracing::debug;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::application::ports::LineReader;
use crate::domain::command::CommandSpec;
use crate::infrastructure::render::Theme;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Suggestion {
    name: &'static str,
    tokens: &'static [&'static str],
    description: &'static str,
}

/// stdin 기반 라인 리더.
/// - TTY + 지원 터미널: raw mode 편집 + 실시간 명령 추천
/// - non-TTY/미지원 터미널: 일반 라인 입력
pub struct TerminalLineReader {
    theme: Theme,
    suggestions: Vec<Suggestion>,
    interactive: bool,
}

impl TerminalLineReader {
    pub fn new(theme: Theme, commands: &[CommandSpec]) -> Self {
        Self {
            theme,
            suggestions: commands
                .iter()
                .map(|spec| Suggestion {
                    name: spec.name,
                    tokens: spec.prefixes,
                    description: spec.description,
                })
                .collect(),
            interactive: supports_interactive_input(),
        }
    }
}

impl LineReader for TerminalLineReader {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        if !self.interactive {
            return read_line_fallback(prompt, &self.theme);
        }

        match self.read_line_interactive(prompt) {
            Ok(line) => Ok(line),
            Err(err) => {
                // raw mode를 쓸 수 없는 터미널이면 이후 입력은 일반 모드로 고정한다.
                debug!(error = %err, "interactive input unavailable, falling back to line mode");
                self.interactive = false;
                read_line_fallback(prompt, &self.theme)
            }
        }
    }
}

impl TerminalLineReader {
    fn read_line_interactive(&self, prompt: &str) -> Result<Option<String>> {
        let mut stdout = io::stdout();
        let _guard = InputGuard::enter()?;

        let mut input = String::new();
        let mut cursor_chars = 0usize;
        let mut selected_idx = 0usize;

        loop {
            let suggestions = match_suggestions(&self.suggestions, &input);
            if suggestions.is_empty() {
                selected_idx = 0;
            } else if selected_idx >= suggestions.len() {
                selected_idx = suggestions.len() - 1;
            }

            self.render_frame(&mut stdout, prompt, &input, cursor_chars, &suggestions, selected_idx)?;

            let key = match event::read()? {
                Event::Paste(text) => {
                    for ch in text.chars().filter(|c| !c.is_control()) {
                        insert_char_at(&mut input, cursor_chars, ch);
                        cursor_chars += 1;
                    }
                    continue;
                }
                Event::Key(key) if key.kind == KeyEventKind::Press => key,
                _ => continue,
            };

            match key.code {
                KeyCode::Enter => {
                    self.finish_frame(&mut stdout, prompt, &input)?;
                    return Ok(Some(input));
                }
                KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.finish_frame(&mut stdout, prompt, &input)?;
                    return Ok(None);
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.finish_frame(&mut stdout, prompt, &input)?;
                    return Ok(Some("exit".to_string()));
                }
                KeyCode::Backspace => {
                    if cursor_chars > 0 {
                        remove_char_at(&mut input, cursor_chars - 1);
                        cursor_chars -= 1;
                    }
                }
                KeyCode::Delete => {
                    if cursor_chars < input.chars().count() {
                        remove_char_at(&mut input, cursor_chars);
                    }
                }
                KeyCode::Left => cursor_chars = cursor_chars.saturating_sub(1),
                KeyCode::Right => cursor_chars = (cursor_chars + 1).min(input.chars().count()),
                KeyCode::Home => cursor_chars = 0,
                KeyCode::End => cursor_chars = input.chars().count(),
                KeyCode::Up => selected_idx = selected_idx.saturating_sub(1),
                KeyCode::Down => {
                    if !suggestions.is_empty() {
                        selected_idx = (selected_idx + 1).min(suggestions.len() - 1);
                    }
                }
                KeyCode::Tab => {
                    if let Some(item) = suggestions.get(selected_idx) {
                        input = item.name.to_string();
                        cursor_chars = input.chars().count();
                    }
                }
                KeyCode::Char(ch) => {
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT)
                    {
                        insert_char_at(&mut input, cursor_chars, ch);
                        cursor_chars += 1;
                    }
                }
                _ => {}
            }
        }
    }

    fn render_frame(
        &self,
        stdout: &mut io::Stdout,
        prompt: &str,
        input: &str,
        cursor_chars: usize,
        suggestions: &[&Suggestion],
        selected_idx: usize,
    ) -> Result<()> {
        let (w, _) = terminal::size().unwrap_or((80, 24));
        let width = (w as usize).max(20);
        let available = width.saturating_sub(display_width(prompt) + 1);

        queue!(
            stdout,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::FromCursorDown)
        )?;
        write!(
            stdout,
            "{}{}",
            self.theme.accent(prompt),
            tail_with_ellipsis_display(input, available)
        )?;

        // 추천 목록은 입력줄 아래에 그리고, 커서는 다시 입력줄로 되돌린다.
        for (idx, item) in suggestions.iter().enumerate() {
            let marker = if idx == selected_idx { ">" } else { " " };
            let line = clip_line_display(
                &format!("{marker} {:<10} - {}", item.name, item.description),
                width.saturating_sub(1),
            );
            let fg = if idx == selected_idx {
                Color::Cyan
            } else {
                Color::DarkGrey
            };
            if self.theme.enabled() {
                queue!(stdout, SetForegroundColor(fg))?;
            }
            write!(stdout, "\r\n{line}")?;
            queue!(stdout, ResetColor)?;
        }
        if !suggestions.is_empty() {
            queue!(stdout, cursor::MoveUp(suggestions.len() as u16))?;
        }

        let col = prompt_cursor_col(prompt, input, cursor_chars, width);
        queue!(stdout, cursor::MoveToColumn(col as u16), cursor::Show)?;
        stdout.flush()?;
        Ok(())
    }

    fn finish_frame(&self, stdout: &mut io::Stdout, prompt: &str, input: &str) -> Result<()> {
        queue!(
            stdout,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::FromCursorDown)
        )?;
        write!(stdout, "{}{}\r\n", self.theme.accent(prompt), input)?;
        stdout.flush()?;
        Ok(())
    }
}

fn supports_interactive_input() -> bool {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        return false;
    }

    // dumb 터미널에서는 제어 시퀀스 기반 UI를 비활성화한다.
    if let Ok(term) = env::var("TERM")
        && term.eq_ignore_ascii_case("dumb")
    {
        return false;
    }

    true
}

fn read_line_fallback(prompt: &str, theme: &Theme) -> Result<Option<String>> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", theme.accent(prompt))?;
    stdout.flush()?;

    read_line_from(&mut io::stdin().lock())
}

/// 한 줄을 바이트 단위로 읽는다. UTF-8이 아닌 바이트는 대체 문자로 바꿔 일반 입력으로 넘긴다.
fn read_line_from(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }

    Ok(Some(trim_newline(String::from_utf8_lossy(&buf).into_owned())))
}

/// 공백 없는 첫 단어가 명령 이름/별칭의 앞부분이면 추천 대상으로 본다.
fn match_suggestions<'a>(all: &'a [Suggestion], input: &str) -> Vec<&'a Suggestion> {
    let q = input.trim_start().to_lowercase();
    if q.is_empty() || q.contains(char::is_whitespace) {
        return Vec::new();
    }

    all.iter()
        .filter(|s| s.tokens.iter().any(|token| token.starts_with(&q)))
        .filter(|s| !s.tokens.iter().any(|token| *token == q))
        .collect()
}

fn prompt_cursor_col(prompt: &str, input: &str, cursor_chars: usize, width: usize) -> usize {
    let prefix_width = display_width(prompt);
    let available = width.saturating_sub(prefix_width + 1);
    let before_cursor: String = input.chars().take(cursor_chars).collect();

    if display_width(input) <= available {
        return (prefix_width + display_width(&before_cursor)).min(width.saturating_sub(1));
    }

    // 넘친 입력은 꼬리만 보이므로 커서를 입력 끝에 맞춘다.
    (prefix_width + display_width(&tail_with_ellipsis_display(input, available)))
        .min(width.saturating_sub(1))
}

fn tail_with_ellipsis_display(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if display_width(text) <= max_width {
        return text.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let target = max_width - 3;
    let mut tail_rev = String::new();
    let mut used = 0usize;
    for ch in text.chars().rev() {
        let cw = char_display_width(ch);
        if used + cw > target {
            break;
        }
        tail_rev.push(ch);
        used += cw;
    }

    let tail: String = tail_rev.chars().rev().collect();
    format!("...{tail}")
}

fn clip_line_display(line: &str, max_width: usize) -> String {
    if display_width(line) <= max_width {
        return line.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let mut out = String::new();
    let mut used = 0usize;
    for ch in line.chars() {
        let cw = char_display_width(ch);
        if used + cw > max_width - 3 {
            break;
        }
        out.push(ch);
        used += cw;
    }
    out.push_str("...");
    out
}

fn trim_newline(mut s: String) -> String {
    while matches!(s.chars().last(), Some('\n' | '\r')) {
        s.pop();
    }
    s
}

fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn char_display_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

fn insert_char_at(input: &mut String, char_idx: usize, ch: char) {
    let byte_idx = byte_index_at_char(input, char_idx);
    input.insert(byte_idx, ch);
}

fn remove_char_at(input: &mut String, char_idx: usize) {
    let start = byte_index_at_char(input, char_idx);
    let end = byte_index_at_char(input, char_idx + 1);
    if start < end && end <= input.len() {
        input.replace_range(start..end, "");
    }
}

fn byte_index_at_char(input: &str, char_idx: usize) -> usize {
    input
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(input.len())
}

struct InputGuard;

impl InputGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for InputGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = crossterm::execute!(stdout, cursor::Show, ResetColor);
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::command::BUILTIN_COMMANDS;
    use std::io::Cursor;

    fn reader() -> TerminalLineReader {
        TerminalLineReader::new(Theme::plain(), &BUILTIN_COMMANDS)
    }

    fn names(input: &str) -> Vec<&'static str> {
        let reader = reader();
        match_suggestions(&reader.suggestions, input)
            .into_iter()
            .map(|s| s.name)
            .collect()
    }

    #[test]
    fn suggests_commands_by_name_and_alias() {
        assert_eq!(names("an"), vec!["analyze"]);
        assert_eq!(names("N"), vec!["navigate"]);
        assert_eq!(names("f"), vec!["search"]);
        assert_eq!(names("e"), vec!["analyze", "exit"]);
        assert_eq!(names("q"), vec!["exit"]);
    }

    #[test]
    fn no_suggestions_once_arguments_start_or_token_is_complete() {
        assert!(names("").is_empty());
        assert!(names("analyze my project").is_empty());
        assert!(names("help").is_empty());
        assert!(names("zzz").is_empty());
    }

    #[test]
    fn edits_respect_multibyte_characters() {
        let mut input = "cd 문서".to_string();
        insert_char_at(&mut input, 3, '/');
        assert_eq!(input, "cd /문서");

        remove_char_at(&mut input, 4);
        assert_eq!(input, "cd /서");

        remove_char_at(&mut input, 10);
        assert_eq!(input, "cd /서");
    }

    #[test]
    fn long_input_shows_its_tail() {
        assert_eq!(tail_with_ellipsis_display("search everything", 9), "...ything");
        assert_eq!(tail_with_ellipsis_display("ls", 9), "ls");
        assert_eq!(tail_with_ellipsis_display("abcdef", 2), "..");
    }

    #[test]
    fn cursor_column_tracks_display_width() {
        assert_eq!(prompt_cursor_col("> ", "ls", 1, 80), 3);
        assert_eq!(prompt_cursor_col("> ", "cd 문서", 5, 80), 9);
    }

    #[test]
    fn line_mode_reads_until_end_of_input() {
        let mut input = Cursor::new(&b"help\r\n  ls src\nexit"[..]);

        assert_eq!(read_line_from(&mut input).unwrap().as_deref(), Some("help"));
        assert_eq!(read_line_from(&mut input).unwrap().as_deref(), Some("  ls src"));
        assert_eq!(read_line_from(&mut input).unwrap().as_deref(), Some("exit"));
        assert_eq!(read_line_from(&mut input).unwrap(), None);
    }

    #[test]
    fn line_mode_survives_invalid_utf8() {
        let mut input = Cursor::new(&b"analyze caf\xe9\nexit\n"[..]);

        assert_eq!(
            read_line_from(&mut input).unwrap().as_deref(),
            Some("analyze caf\u{FFFD}")
        );
        assert_eq!(read_line_from(&mut input).unwrap().as_deref(), Some("exit"));
        assert_eq!(read_line_from(&mut input).unwrap(), None);
    }

    #[test]
    fn trims_line_endings() {
        assert_eq!(trim_newline("analyze\r\n".to_string()), "analyze");
        assert_eq!(trim_newline("help".to_string()), "help");
    }
}
