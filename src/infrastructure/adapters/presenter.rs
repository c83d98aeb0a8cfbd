//! 콘솔 presenter 포트 구현 어댑터.

use std::sync::Arc;

use crate::application::ports::{Output, Presenter};
use crate::domain::command::CommandSpec;
use crate::infrastructure::render::{Theme, render_banner, render_help};

/// 테마를 적용해 출력 포트로 쓰는 presenter.
pub struct ConsolePresenter {
    theme: Theme,
    out: Arc<dyn Output>,
    thinking_indicator: bool,
}

impl ConsolePresenter {
    pub fn new(theme: Theme, out: Arc<dyn Output>) -> Self {
        Self {
            theme,
            out,
            thinking_indicator: true,
        }
    }

    /// 핸들러 호출 전 "Thinking..." 표시 여부를 바꾼다.
    pub fn with_thinking_indicator(mut self, enabled: bool) -> Self {
        self.thinking_indicator = enabled;
        self
    }
}

impl Presenter for ConsolePresenter {
    fn banner(&self) {
        self.out.write_line(&render_banner(&self.theme));
    }

    fn help(&self, commands: &[CommandSpec]) {
        self.out.write(&render_help(commands, &self.theme));
    }

    fn thinking(&self) {
        if self.thinking_indicator {
            self.out.write_line(&self.theme.accent_dim("Thinking..."));
        }
    }

    fn unknown_command(&self) {
        self.out.write_line(
            &self
                .theme
                .warning("Unknown command. Type \"help\" for available commands."),
        );
    }

    fn handler_error(&self, message: &str) {
        self.out
            .write_line(&format!("{} {message}", self.theme.error("Error:")));
    }

    fn farewell(&self) {
        self.out.write_line(&format!("\n{}", self.theme.accent("Goodbye!")));
    }

    fn output(&self) -> &dyn Output {
        self.out.as_ref()
    }
}
