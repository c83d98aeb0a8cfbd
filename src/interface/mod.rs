//! Interface layer
//! 사용자 진입점(CLI/REPL)을 담당한다.

pub mod cli;
