//! 출력 포트 구현 어댑터.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::application::ports::Output;

/// 표준 출력으로 바로 쓰고 flush하는 어댑터.
pub struct StdoutOutput;

impl Output for StdoutOutput {
    fn write(&self, text: &str) {
        let mut out = io::stdout().lock();
        // 닫힌 파이프에 쓰는 실패는 루프를 멈출 이유가 아니다.
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }
}

/// 출력 내용을 메모리에 모아 두는 어댑터(테스트/라이브러리 호출용).
#[derive(Default)]
pub struct BufferOutput {
    buf: Mutex<String>,
}

impl BufferOutput {
    pub fn contents(&self) -> String {
        self.buf.lock().map(|b| b.clone()).unwrap_or_default()
    }
}

impl Output for BufferOutput {
    fn write(&self, text: &str) {
        if let Ok(mut buf) = self.buf.lock() {
            buf.push_str(text);
        }
    }
}
