//! 단위 테스트용 포트 더블.

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::application::ports::{CommandHandler, LineReader, Output, Presenter};
use crate::domain::command::CommandSpec;
use crate::infrastructure::adapters::BufferOutput;

#[derive(Default)]
pub(crate) struct RecordingPresenter {
    events: Mutex<Vec<String>>,
    out: BufferOutput,
}

impl RecordingPresenter {
    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: impl Into<String>) {
        self.events.lock().unwrap().push(event.into());
    }
}

impl Presenter for RecordingPresenter {
    fn banner(&self) {
        self.push("banner");
    }

    fn help(&self, commands: &[CommandSpec]) {
        let names: Vec<&str> = commands.iter().map(|c| c.name).collect();
        self.push(format!("help:{}", names.join(",")));
    }

    fn thinking(&self) {
        self.push("thinking");
    }

    fn unknown_command(&self) {
        self.push("unknown");
    }

    fn handler_error(&self, message: &str) {
        self.push(format!("error:{message}"));
    }

    fn farewell(&self) {
        self.push("farewell");
    }

    fn output(&self) -> &dyn Output {
        &self.out
    }
}

#[derive(Default)]
pub(crate) struct RecordingHandler {
    calls: Mutex<Vec<String>>,
}

impl RecordingHandler {
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandHandler for RecordingHandler {
    async fn handle(&self, line: &str, _out: &dyn Output) -> Result<()> {
        self.calls.lock().unwrap().push(line.to_string());
        Ok(())
    }
}

pub(crate) struct FailingHandler(pub &'static str);

#[async_trait]
impl CommandHandler for FailingHandler {
    async fn handle(&self, _line: &str, _out: &dyn Output) -> Result<()> {
        bail!("{}", self.0)
    }
}

pub(crate) struct PanickingHandler;

#[async_trait]
impl CommandHandler for PanickingHandler {
    async fn handle(&self, _line: &str, _out: &dyn Output) -> Result<()> {
        panic!("search exploded")
    }
}

/// 미리 정한 줄을 순서대로 돌려주고, 다 쓰면 EOF를 알린다.
pub(crate) struct ScriptedReader {
    lines: VecDeque<String>,
}

impl ScriptedReader {
    pub(crate) fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl LineReader for ScriptedReader {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}
