//! Infrastructure layer
//! 터미널/파일시스템과 직접 통신하는 구현체 집합.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod render;
