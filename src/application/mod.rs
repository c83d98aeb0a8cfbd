//! Application layer
//! 디스패처와 입력 루프를 정의하고 포트(추상 인터페이스)를 통해 인프라를 사용한다.

pub mod dispatcher;
pub mod input_loop;
pub mod ports;

#[cfg(test)]
pub(crate) mod test_support;
