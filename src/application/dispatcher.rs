//! 입력 한 줄을 명령 테이블에 따라 라우팅하는 디스패처.

use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, warn};

use crate::application::ports::{CommandHandler, Presenter};
use crate::domain::command::{
    CommandAction, CommandSpec, CommandTable, DispatchOutcome, DispatchResult, normalize,
};

/// 불변 명령 테이블 + 이름별 핸들러 바인딩.
pub struct Dispatcher {
    table: CommandTable,
    handlers: HashMap<&'static str, Box<dyn CommandHandler>>,
    presenter: Arc<dyn Presenter>,
}

impl Dispatcher {
    pub fn new(table: CommandTable, presenter: Arc<dyn Presenter>) -> Self {
        Self {
            table,
            handlers: HashMap::new(),
            presenter,
        }
    }

    /// 테이블의 `Run` 항목 이름에 핸들러를 연결한다.
    pub fn with_handler(mut self, name: &'static str, handler: Box<dyn CommandHandler>) -> Self {
        if self.table.get(name).is_none() {
            warn!(command = name, "handler registered for a command missing from the table");
        }
        self.handlers.insert(name, handler);
        self
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    /// 입력 한 줄을 처리한다. 핸들러 실패는 모두 `HandlerError`로 변환되어
    /// 호출자에게 전파되지 않는다.
    pub async fn dispatch(&self, line: &str) -> DispatchOutcome {
        let command = normalize(line);
        if command.is_empty() {
            return DispatchOutcome::Continue(DispatchResult::Handled);
        }

        let Some(spec) = self.table.resolve(&command) else {
            debug!(input = %command, "no command matched");
            return DispatchOutcome::Continue(DispatchResult::UnknownCommand);
        };
        debug!(command = spec.name, input = %command, "dispatching");

        match spec.action {
            CommandAction::Quit => {
                self.presenter.farewell();
                DispatchOutcome::Quit
            }
            CommandAction::Help => {
                self.presenter.help(self.table.specs());
                DispatchOutcome::Continue(DispatchResult::Handled)
            }
            CommandAction::Run => DispatchOutcome::Continue(self.run_handler(spec, &command).await),
        }
    }

    async fn run_handler(&self, spec: &CommandSpec, command: &str) -> DispatchResult {
        let Some(handler) = self.handlers.get(spec.name) else {
            warn!(command = spec.name, "no handler registered");
            return DispatchResult::HandlerError(format!(
                "no handler registered for `{}`",
                spec.name
            ));
        };

        self.presenter.thinking();

        // 핸들러 패닉도 루프를 죽이지 않도록 경계에서 잡는다.
        let outcome = AssertUnwindSafe(handler.handle(command, self.presenter.output()))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(())) => DispatchResult::Handled,
            Ok(Err(err)) => {
                let message = format!("{err:#}");
                warn!(command = spec.name, error = %message, "handler failed");
                DispatchResult::HandlerError(message)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(command = spec.name, error = %message, "handler panicked");
                DispatchResult::HandlerError(message)
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        return format!("handler panicked: {msg}");
    }
    if let Some(msg) = payload.downcast_ref::<String>() {
        return format!("handler panicked: {msg}");
    }
    "handler panicked".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{
        FailingHandler, PanickingHandler, RecordingHandler, RecordingPresenter,
    };

    fn dispatcher_with(
        presenter: Arc<RecordingPresenter>,
        analyze: Arc<RecordingHandler>,
    ) -> Dispatcher {
        Dispatcher::new(CommandTable::builtin(), presenter)
            .with_handler("analyze", Box::new(analyze))
            .with_handler("navigate", Box::new(FailingHandler("permission denied")))
            .with_handler("search", Box::new(PanickingHandler))
    }

    #[tokio::test]
    async fn routes_full_line_to_matching_handler() {
        let presenter = Arc::new(RecordingPresenter::default());
        let analyze = Arc::new(RecordingHandler::default());
        let dispatcher = dispatcher_with(presenter.clone(), analyze.clone());

        let outcome = dispatcher.dispatch("analyze my project").await;

        assert_eq!(outcome, DispatchOutcome::Continue(DispatchResult::Handled));
        assert_eq!(analyze.calls(), vec!["analyze my project".to_string()]);
        assert_eq!(presenter.events(), vec!["thinking".to_string()]);
    }

    #[tokio::test]
    async fn casing_and_whitespace_variants_share_handler_and_argument() {
        let presenter = Arc::new(RecordingPresenter::default());
        let analyze = Arc::new(RecordingHandler::default());
        let dispatcher = dispatcher_with(presenter, analyze.clone());

        for input in ["  ANALYZE foo", "Analyze foo", "analyze foo\t"] {
            dispatcher.dispatch(input).await;
        }

        assert_eq!(analyze.calls(), vec!["analyze foo".to_string(); 3]);
    }

    #[tokio::test]
    async fn empty_input_is_a_silent_no_op() {
        let presenter = Arc::new(RecordingPresenter::default());
        let analyze = Arc::new(RecordingHandler::default());
        let dispatcher = dispatcher_with(presenter.clone(), analyze.clone());

        for input in ["", "   ", "\t"] {
            let outcome = dispatcher.dispatch(input).await;
            assert_eq!(outcome, DispatchOutcome::Continue(DispatchResult::Handled));
        }

        assert!(analyze.calls().is_empty());
        assert!(presenter.events().is_empty());
    }

    #[tokio::test]
    async fn unmatched_input_is_unknown_command() {
        let presenter = Arc::new(RecordingPresenter::default());
        let dispatcher = dispatcher_with(presenter.clone(), Arc::default());

        for input in ["foobar", "help me", "exit now", "?"] {
            let outcome = dispatcher.dispatch(input).await;
            assert_eq!(
                outcome,
                DispatchOutcome::Continue(DispatchResult::UnknownCommand)
            );
        }
        assert!(presenter.events().is_empty());
    }

    #[tokio::test]
    async fn quit_directives_say_goodbye() {
        for input in ["exit", "QUIT", "  Exit  "] {
            let presenter = Arc::new(RecordingPresenter::default());
            let dispatcher = dispatcher_with(presenter.clone(), Arc::default());

            assert_eq!(dispatcher.dispatch(input).await, DispatchOutcome::Quit);
            assert_eq!(presenter.events(), vec!["farewell".to_string()]);
        }
    }

    #[tokio::test]
    async fn help_lists_the_whole_table() {
        let presenter = Arc::new(RecordingPresenter::default());
        let dispatcher = dispatcher_with(presenter.clone(), Arc::default());

        let outcome = dispatcher.dispatch("HELP").await;

        assert_eq!(outcome, DispatchOutcome::Continue(DispatchResult::Handled));
        assert_eq!(
            presenter.events(),
            vec!["help:analyze,navigate,search,help,exit".to_string()]
        );
    }

    #[tokio::test]
    async fn handler_errors_are_contained() {
        let presenter = Arc::new(RecordingPresenter::default());
        let dispatcher = dispatcher_with(presenter, Arc::default());

        let outcome = dispatcher.dispatch("cd /root").await;

        assert_eq!(
            outcome,
            DispatchOutcome::Continue(DispatchResult::HandlerError(
                "permission denied".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn handler_panics_are_contained() {
        let presenter = Arc::new(RecordingPresenter::default());
        let dispatcher = dispatcher_with(presenter, Arc::default());

        let outcome = dispatcher.dispatch("find needle").await;

        assert_eq!(
            outcome,
            DispatchOutcome::Continue(DispatchResult::HandlerError(
                "handler panicked: search exploded".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn missing_binding_is_reported_as_handler_error() {
        let presenter = Arc::new(RecordingPresenter::default());
        let dispatcher = Dispatcher::new(CommandTable::builtin(), presenter);

        let outcome = dispatcher.dispatch("search foo").await;

        assert_eq!(
            outcome,
            DispatchOutcome::Continue(DispatchResult::HandlerError(
                "no handler registered for `search`".to_string()
            ))
        );
    }
}
