//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod line_reader;
mod output;
mod presenter;

pub use line_reader::TerminalLineReader;
pub use output::{BufferOutput, StdoutOutput};
pub use presenter::ConsolePresenter;
