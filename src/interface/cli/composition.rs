//! 애플리케이션 조립(composition root) 모듈.

use std::sync::Arc;

use anyhow::Result;
use tracing::warn;

use crate::application::dispatcher::Dispatcher;
use crate::application::input_loop::InputLoop;
use crate::application::ports::{LineReader, Output, Presenter};
use crate::domain::command::CommandTable;
use crate::infrastructure::adapters::{ConsolePresenter, StdoutOutput, TerminalLineReader};
use crate::infrastructure::config::Config;
use crate::infrastructure::handlers::default_handlers;
use crate::infrastructure::render::{
    Theme, default_accent, parse_hex_color, terminal_supports_color,
};
use crate::interface::cli::command::ShellOptions;

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config: Config,
    theme: Theme,
    table: CommandTable,
    presenter: Arc<dyn Presenter>,
    banner: bool,
}

impl AppComposition {
    /// 설정 파일을 읽고 stdout 기반 조합을 생성한다.
    pub fn load(options: &ShellOptions) -> Result<Self> {
        let config = Config::load(options.config_path.as_deref())?;
        let color = !options.no_color && config.color_enabled() && terminal_supports_color();
        Ok(Self::from_config(config, options, color, Arc::new(StdoutOutput)))
    }

    /// 출력 어댑터와 색상 여부를 외부에서 주입한다.
    pub fn from_config(
        config: Config,
        options: &ShellOptions,
        color: bool,
        output: Arc<dyn Output>,
    ) -> Self {
        let accent = parse_hex_color(config.theme_color()).unwrap_or_else(|| {
            warn!(value = config.theme_color(), "invalid theme_color, using default");
            default_accent()
        });
        let theme = Theme::new(accent, color);
        let presenter = ConsolePresenter::new(theme, output)
            .with_thinking_indicator(config.thinking_indicator());

        Self {
            banner: !options.no_banner && config.banner_enabled(),
            config,
            theme,
            table: CommandTable::builtin(),
            presenter: Arc::new(presenter),
        }
    }

    pub fn presenter(&self) -> Arc<dyn Presenter> {
        self.presenter.clone()
    }

    pub fn banner_enabled(&self) -> bool {
        self.banner
    }

    /// 내장 테이블과 기본 핸들러를 연결한 디스패처를 생성한다.
    pub fn dispatcher(&self) -> Dispatcher {
        default_handlers().into_iter().fold(
            Dispatcher::new(self.table.clone(), self.presenter()),
            |dispatcher, (name, handler)| dispatcher.with_handler(name, handler),
        )
    }

    /// stdin 터미널 라인 리더를 생성한다.
    pub fn terminal_reader(&self) -> Box<dyn LineReader> {
        Box::new(TerminalLineReader::new(self.theme, self.table.specs()))
    }

    /// 주어진 라인 리더로 입력 루프를 생성한다.
    pub fn input_loop(&self, reader: Box<dyn LineReader>) -> InputLoop {
        InputLoop::new(
            reader,
            self.dispatcher(),
            self.presenter(),
            self.config.prompt(),
        )
    }
}
