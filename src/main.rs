//! `ccos` 바이너리 진입점.

use ccos::interface::cli::Cli;

#[tokio::main]
async fn main() {
    // 로그는 프롬프트와 섞이지 않도록 stderr로 보낸다.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // 인자 오류는 clap이 종료 코드 2로 처리한다.
    let options = Cli::parse_options();

    match ccos::run(options).await {
        Ok(exit) => std::process::exit(exit.exit_code()),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    }
}
