//! 설정 스키마와 병합/해석 규칙.

use serde::{Deserialize, Serialize};

use crate::infrastructure::render::DEFAULT_THEME_COLOR;

pub const DEFAULT_PROMPT: &str = "> ";

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct Config {
    /// 터미널 표시 설정
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct UiConfig {
    /// 강조색(`#rrggbb`)
    pub theme_color: Option<String>,
    /// 입력 프롬프트 문자열
    pub prompt: Option<String>,
    /// 색상 출력 허용 여부(기본 true, TTY일 때만 적용)
    pub color: Option<bool>,
    /// 시작 배너 출력 여부(기본 true)
    pub banner: Option<bool>,
    /// 핸들러 실행 전 "Thinking..." 표시 여부(기본 true)
    pub thinking_indicator: Option<bool>,
}

impl Config {
    pub fn theme_color(&self) -> &str {
        self.ui.theme_color.as_deref().unwrap_or(DEFAULT_THEME_COLOR)
    }

    /// 빈 프롬프트는 입력 위치를 알 수 없으므로 기본값으로 대체한다.
    pub fn prompt(&self) -> &str {
        match self.ui.prompt.as_deref() {
            Some(prompt) if !prompt.is_empty() => prompt,
            _ => DEFAULT_PROMPT,
        }
    }

    pub fn color_enabled(&self) -> bool {
        self.ui.color.unwrap_or(true)
    }

    pub fn banner_enabled(&self) -> bool {
        self.ui.banner.unwrap_or(true)
    }

    pub fn thinking_indicator(&self) -> bool {
        self.ui.thinking_indicator.unwrap_or(true)
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub(crate) fn merge_from(&mut self, other: Config) {
        self.ui.merge_from(other.ui);
    }
}

impl UiConfig {
    pub(crate) fn merge_from(&mut self, other: UiConfig) {
        if other.theme_color.is_some() {
            self.theme_color = other.theme_color;
        }
        if other.prompt.is_some() {
            self.prompt = other.prompt;
        }
        if other.color.is_some() {
            self.color = other.color;
        }
        if other.banner.is_some() {
            self.banner = other.banner;
        }
        if other.thinking_indicator.is_some() {
            self.thinking_indicator = other.thinking_indicator;
        }
    }
}
