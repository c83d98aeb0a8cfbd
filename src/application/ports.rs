//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::command::CommandSpec;

/// 텍스트 출력 싱크. 스타일링은 구현체가 아니라 상위 presenter가 담당한다.
pub trait Output: Send + Sync {
    fn write(&self, text: &str);

    fn write_line(&self, text: &str) {
        self.write(text);
        self.write("\n");
    }
}

/// 명령 하나의 실제 작업을 수행하는 외부 핸들러 포트.
///
/// `line`은 정규화된 전체 입력 줄이다. 실패는 사람이 읽을 수 있는 메시지를 가진
/// 에러로 돌려주면 되고, 디스패처가 경계에서 모두 흡수한다.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, line: &str, out: &dyn Output) -> Result<()>;
}

#[async_trait]
impl<T: CommandHandler + ?Sized> CommandHandler for Arc<T> {
    async fn handle(&self, line: &str, out: &dyn Output) -> Result<()> {
        (**self).handle(line, out).await
    }
}

/// 터미널에서 한 줄씩 입력을 읽는 포트.
/// `Ok(None)`은 입력 종료(EOF)를 뜻한다.
pub trait LineReader: Send {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// 배너/도움말/알림 출력 포트.
pub trait Presenter: Send + Sync {
    fn banner(&self);
    fn help(&self, commands: &[CommandSpec]);
    fn thinking(&self);
    fn unknown_command(&self);
    fn handler_error(&self, message: &str);
    fn farewell(&self);
    /// 핸들러가 결과를 쓸 출력 채널.
    fn output(&self) -> &dyn Output;
}
