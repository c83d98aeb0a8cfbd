//! 프롬프트 → 읽기 → 디스패치 → 출력 사이클을 소유하는 입력 루프.

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::application::dispatcher::Dispatcher;
use crate::application::ports::{LineReader, Presenter};
use crate::domain::command::{DispatchOutcome, DispatchResult};

/// 입력 루프 상태. `Terminated`는 흡수 상태다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Prompting,
    Dispatching,
    Terminated,
}

/// 루프가 끝난 이유.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// `exit`/`quit` 입력
    Quit,
    /// 터미널 입력 종료(EOF)
    EndOfInput,
}

impl LoopExit {
    /// 정상 종료 경로는 모두 0으로 끝난다.
    pub fn exit_code(self) -> i32 {
        0
    }
}

/// 한 번의 `step` 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Dispatched(DispatchResult),
    Terminated(LoopExit),
}

pub struct InputLoop {
    reader: Box<dyn LineReader>,
    dispatcher: Dispatcher,
    presenter: Arc<dyn Presenter>,
    prompt: String,
    state: LoopState,
    exit: Option<LoopExit>,
}

impl InputLoop {
    pub fn new(
        reader: Box<dyn LineReader>,
        dispatcher: Dispatcher,
        presenter: Arc<dyn Presenter>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            reader,
            dispatcher,
            presenter,
            prompt: prompt.into(),
            state: LoopState::Prompting,
            exit: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// 종료 신호가 나올 때까지 한 줄씩 처리한다.
    /// 명령 오류로는 끝나지 않고, 입력 장치 I/O 오류만 에러로 전파된다.
    pub async fn run(&mut self) -> Result<LoopExit> {
        loop {
            if let Step::Terminated(exit) = self.step().await? {
                return Ok(exit);
            }
        }
    }

    /// 한 줄을 읽고 처리한다. 이미 종료된 루프는 같은 종료 결과를 반복한다.
    pub async fn step(&mut self) -> Result<Step> {
        if let Some(exit) = self.exit {
            return Ok(Step::Terminated(exit));
        }

        let Some(line) = self.reader.read_line(&self.prompt)? else {
            self.presenter.farewell();
            return Ok(self.terminate(LoopExit::EndOfInput));
        };

        self.state = LoopState::Dispatching;
        match self.dispatcher.dispatch(&line).await {
            DispatchOutcome::Quit => Ok(self.terminate(LoopExit::Quit)),
            DispatchOutcome::Continue(result) => {
                self.report(&result);
                self.state = LoopState::Prompting;
                Ok(Step::Dispatched(result))
            }
        }
    }

    fn report(&self, result: &DispatchResult) {
        match result {
            DispatchResult::Handled => {}
            DispatchResult::UnknownCommand => self.presenter.unknown_command(),
            DispatchResult::HandlerError(message) => self.presenter.handler_error(message),
        }
    }

    fn terminate(&mut self, exit: LoopExit) -> Step {
        debug!(?exit, "input loop terminated");
        self.state = LoopState::Terminated;
        self.exit = Some(exit);
        Step::Terminated(exit)
    }
}
