//! ccos library root.
//! Clean Architecture 계층(domain/application/infrastructure/interface)을 외부에 노출한다.

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use application::input_loop::LoopExit;
use interface::cli::{AppComposition, ShellOptions};

/// 설정을 읽어 조립한 뒤 stdin/stdout 대화형 쉘을 실행한다.
pub async fn run(options: ShellOptions) -> Result<LoopExit> {
    let composition = AppComposition::load(&options)?;
    interface::cli::run_repl(&composition).await
}
