//! CLI 인자 파싱 모듈.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "ccos", version)]
#[command(about = "An open-source alternative to Claude Code using Perplexity AI models")]
pub struct Cli {
    /// Extra JSON config file, merged with the highest priority
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Skip the welcome banner
    #[arg(long)]
    no_banner: bool,
}

/// 대화형 쉘 실행 옵션.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellOptions {
    pub config_path: Option<PathBuf>,
    pub no_color: bool,
    pub no_banner: bool,
}

impl Cli {
    pub fn parse_options() -> ShellOptions {
        Cli::parse().into_options()
    }

    // `--config` 경로의 존재 여부는 설정 로더가 검사한다.
    fn into_options(self) -> ShellOptions {
        ShellOptions {
            config_path: self.config,
            no_color: self.no_color,
            no_banner: self.no_banner,
        }
    }
}
