//! `ccos` 대화형 쉘(REPL) 인터페이스.

use anyhow::Result;
use tracing::debug;

use crate::application::input_loop::LoopExit;
use crate::application::ports::LineReader;
use crate::interface::cli::composition::AppComposition;

/// 배너 출력 후 터미널 입력으로 명령을 처리한다.
pub async fn run_repl(composition: &AppComposition) -> Result<LoopExit> {
    run_repl_with(composition, composition.terminal_reader()).await
}

/// 라인 리더를 주입해 REPL을 실행한다.
pub async fn run_repl_with(
    composition: &AppComposition,
    reader: Box<dyn LineReader>,
) -> Result<LoopExit> {
    if composition.banner_enabled() {
        composition.presenter().banner();
    }

    let mut input_loop = composition.input_loop(reader);
    let exit = input_loop.run().await?;
    debug!(?exit, "repl finished");
    Ok(exit)
}
