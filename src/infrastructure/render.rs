//! 터미널 출력용 테마와 박스/배너/도움말 렌더링 모듈.

use std::env;
use std::io::{self, IsTerminal};

use crossterm::style::{Color, Stylize};
use unicode_width::UnicodeWidthStr;

use crate::domain::command::CommandSpec;

pub const DEFAULT_THEME_COLOR: &str = "#00c5e0";
const HELP_NAME_WIDTH: usize = 15;

const BANNER_ART: [&str; 6] = [
    " ██████╗ ██████╗ ███████╗    ██████╗ ██████╗ ███████╗",
    "██╔════╝██╔═══██╗██╔════╝    ██╔══██╗██╔══██╗██╔════╝",
    "██║     ██║   ██║███████╗    ██████╔╝██║  ██║█████╗  ",
    "██║     ██║   ██║╚════██║    ██╔══██╗██║  ██║██╔══╝  ",
    "╚██████╗╚██████╔╝███████║    ██║  ██║██████╔╝██║     ",
    " ╚═════╝ ╚═════╝ ╚══════╝    ╚═╝  ╚═╝╚═════╝ ╚═╝     ",
];

/// 강조색과 색상 출력 여부를 묶은 테마.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    accent: Color,
    enabled: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::plain()
    }
}

impl Theme {
    pub fn new(accent: Color, enabled: bool) -> Self {
        Self { accent, enabled }
    }

    /// 이스케이프 시퀀스를 전혀 쓰지 않는 테마.
    pub fn plain() -> Self {
        Self::new(default_accent(), false)
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn accent(&self, text: &str) -> String {
        self.paint(text, |t| t.with(self.accent).to_string())
    }

    pub fn accent_bold(&self, text: &str) -> String {
        self.paint(text, |t| t.with(self.accent).bold().to_string())
    }

    pub fn accent_dim(&self, text: &str) -> String {
        self.paint(text, |t| t.with(self.accent).dim().to_string())
    }

    pub fn warning(&self, text: &str) -> String {
        self.paint(text, |t| t.yellow().to_string())
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(text, |t| t.red().to_string())
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> String) -> String {
        if self.enabled {
            style(text)
        } else {
            text.to_string()
        }
    }
}

/// `#rrggbb` 형식의 설정 값을 truecolor로 변환한다.
pub fn parse_hex_color(raw: &str) -> Option<Color> {
    let hex = raw.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |idx: usize| u8::from_str_radix(&hex[idx..idx + 2], 16).ok();
    Some(Color::Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

pub fn default_accent() -> Color {
    Color::Rgb {
        r: 0x00,
        g: 0xc5,
        b: 0xe0,
    }
}

/// stdout이 TTY이고 `NO_COLOR`가 없을 때만 색상을 쓴다.
pub fn terminal_supports_color() -> bool {
    if env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        return false;
    }
    io::stdout().is_terminal()
}

/// 시작 배너 본문을 생성한다.
pub fn render_banner(theme: &Theme) -> String {
    let mut lines = vec![String::new()];
    lines.extend(BANNER_ART.iter().map(|row| theme.accent(row)));
    lines.extend([
        String::new(),
        theme.accent_bold("Welcome to CCOS (Claude Code Open Source)"),
        theme.accent_dim("An open-source alternative using Perplexity AI models"),
        String::new(),
    ]);

    let mut out = render_box(&lines, theme);
    out.push('\n');
    out.push_str(&theme.accent_dim(
        "Type your command or \"help\" for available commands.",
    ));
    out.push('\n');
    out
}

/// 명령 테이블을 도움말 박스로 렌더링한다.
pub fn render_help(commands: &[CommandSpec], theme: &Theme) -> String {
    let mut lines = vec![theme.accent_bold("Available Commands:"), String::new()];
    for spec in commands {
        let name = format!("{:<width$}", spec.name, width = HELP_NAME_WIDTH);
        lines.push(format!("{} {}", theme.accent_bold(&name), spec.description));
    }

    let mut out = render_box(&lines, theme);
    out.push('\n');
    out.push_str(&theme.accent_dim("Example: analyze project structure"));
    out.push('\n');
    out
}

/// 둥근 모서리 박스. 폭은 이스케이프 시퀀스를 제외한 표시 폭 기준이다.
pub fn render_box(lines: &[String], theme: &Theme) -> String {
    let inner = lines.iter().map(|l| visible_width(l)).max().unwrap_or(0);
    let horizontal = "─".repeat(inner + 2);

    let mut out = String::new();
    out.push_str(&theme.accent(&format!("╭{horizontal}╮")));
    out.push('\n');
    for line in lines {
        let pad = " ".repeat(inner - visible_width(line));
        out.push_str(&format!(
            "{} {line}{pad} {}\n",
            theme.accent("│"),
            theme.accent("│")
        ));
    }
    out.push_str(&theme.accent(&format!("╰{horizontal}╯")));
    out.push('\n');
    out
}

/// ANSI SGR/CSI 시퀀스를 건너뛴 터미널 표시 폭.
pub fn visible_width(text: &str) -> usize {
    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // 최종 바이트(0x40..=0x7e)까지가 하나의 CSI 시퀀스다.
            for c in chars.by_ref() {
                if ('\x40'..='\x7e').contains(&c) {
                    break;
                }
            }
            continue;
        }
        plain.push(ch);
    }

    UnicodeWidthStr::width(plain.as_str())
}
