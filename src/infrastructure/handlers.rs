//! analyze/navigate/search 명령의 자리표시 핸들러.
//!
//! 실제 분석/탐색/검색 구현으로 교체되기 전까지 요청만 확인해 준다.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::ports::{CommandHandler, Output};

/// 요청을 확인만 하고 성공으로 끝나는 핸들러.
pub struct PlaceholderHandler {
    command: &'static str,
}

impl PlaceholderHandler {
    pub fn new(command: &'static str) -> Self {
        Self { command }
    }
}

#[async_trait]
impl CommandHandler for PlaceholderHandler {
    async fn handle(&self, line: &str, out: &dyn Output) -> Result<()> {
        out.write_line(&format!("{}: \"{line}\" is not available yet", self.command));
        Ok(())
    }
}

/// 테이블의 `Run` 명령에 연결되는 기본 핸들러 목록.
pub fn default_handlers() -> Vec<(&'static str, Box<dyn CommandHandler>)> {
    ["analyze", "navigate", "search"]
        .into_iter()
        .map(|name| {
            (
                name,
                Box::new(PlaceholderHandler::new(name)) as Box<dyn CommandHandler>,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::BufferOutput;

    #[tokio::test]
    async fn placeholder_echoes_the_request() {
        let out = BufferOutput::default();

        PlaceholderHandler::new("search")
            .handle("find todo", &out)
            .await
            .unwrap();

        assert_eq!(out.contents(), "search: \"find todo\" is not available yet\n");
    }

    #[test]
    fn default_handlers_cover_runnable_builtins() {
        use crate::domain::command::{CommandAction, CommandTable};

        let bound: Vec<&str> = default_handlers().into_iter().map(|(n, _)| n).collect();
        let runnable: Vec<&str> = CommandTable::builtin()
            .specs()
            .iter()
            .filter(|s| s.action == CommandAction::Run)
            .map(|s| s.name)
            .collect();

        assert_eq!(bound, runnable);
    }
}
