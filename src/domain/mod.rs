//! Domain layer
//! 명령 테이블/디스패치 결과를 외부 의존성 없이 표현한다.

pub mod command;
