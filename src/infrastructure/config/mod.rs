//! 사용자 설정(JSON) 로딩/병합 모듈.
//! 여러 경로의 설정을 우선순위대로 병합한다.

mod loader;
mod types;

use std::path::Path;

use anyhow::Result;

pub use loader::{CONFIG_ENV, LoadedConfig, config_paths, load_from_paths};
pub use types::{Config, DEFAULT_PROMPT, UiConfig};

impl Config {
    /// 병합된 최종 설정을 로딩한다.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Ok(loader::load_merged_config(explicit)?.config)
    }
}
