//! 명령 테이블과 디스패치 결과를 표현하는 도메인 모델.
//!
//! 명령 추가는 `BUILTIN_COMMANDS`에 행을 더하는 데이터 변경으로 끝나야 한다.

use anyhow::{Result, bail};

/// 테이블 항목이 정규화된 입력과 비교되는 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// 입력 전체가 토큰과 같아야 한다.
    Exact,
    /// 입력이 토큰으로 시작하면 일치로 본다.
    Prefix,
}

/// 명령이 일치했을 때 디스패처가 수행할 동작.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    /// 작별 인사 후 루프 종료 신호를 돌려준다.
    Quit,
    /// 명령 테이블 전체를 도움말로 출력한다.
    Help,
    /// 이름으로 등록된 외부 핸들러를 호출한다.
    Run,
}

/// 불변 명령 테이블의 한 행.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    /// 소문자 토큰 목록. 테이블 전체에서 중복될 수 없다.
    pub prefixes: &'static [&'static str],
    pub description: &'static str,
    pub rule: MatchRule,
    pub action: CommandAction,
}

impl CommandSpec {
    fn matches(&self, command: &str) -> bool {
        match self.rule {
            MatchRule::Exact => self.prefixes.iter().any(|token| command == *token),
            MatchRule::Prefix => self.prefixes.iter().any(|token| command.starts_with(token)),
        }
    }
}

/// 도움말 출력 순서이자 접두사 매칭 우선순위.
pub const BUILTIN_COMMANDS: [CommandSpec; 5] = [
    CommandSpec {
        name: "analyze",
        prefixes: &["analyze", "explain"],
        description: "Analyze the current project structure and dependencies",
        rule: MatchRule::Prefix,
        action: CommandAction::Run,
    },
    CommandSpec {
        name: "navigate",
        prefixes: &["navigate", "cd", "ls"],
        description: "Navigate through project files and directories",
        rule: MatchRule::Prefix,
        action: CommandAction::Run,
    },
    CommandSpec {
        name: "search",
        prefixes: &["search", "find"],
        description: "Search for files and content within the project",
        rule: MatchRule::Prefix,
        action: CommandAction::Run,
    },
    CommandSpec {
        name: "help",
        prefixes: &["help"],
        description: "Show this help message",
        rule: MatchRule::Exact,
        action: CommandAction::Help,
    },
    CommandSpec {
        name: "exit",
        prefixes: &["exit", "quit"],
        description: "Exit the program",
        rule: MatchRule::Exact,
        action: CommandAction::Quit,
    },
];

/// 검증을 마친 불변 명령 테이블.
#[derive(Debug, Clone)]
pub struct CommandTable {
    specs: Vec<CommandSpec>,
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CommandTable {
    /// 빈 토큰, 대문자/공백 포함 토큰, 중복 토큰이 있으면 거부한다.
    pub fn new(specs: Vec<CommandSpec>) -> Result<Self> {
        let mut seen: Vec<&str> = Vec::new();

        for spec in &specs {
            if spec.prefixes.is_empty() {
                bail!("command `{}` has no match tokens", spec.name);
            }

            for token in spec.prefixes {
                if token.is_empty() {
                    bail!("command `{}` has an empty match token", spec.name);
                }
                if *token != normalize(token) || token.contains(char::is_whitespace) {
                    bail!(
                        "command `{}` token `{token}` must be lower-case without whitespace",
                        spec.name
                    );
                }
                if seen.contains(token) {
                    bail!("duplicate command token `{token}` in `{}`", spec.name);
                }
                seen.push(*token);
            }
        }

        Ok(Self { specs })
    }

    /// 기본 내장 명령(analyze/navigate/search/help/exit) 테이블.
    pub fn builtin() -> Self {
        Self {
            specs: BUILTIN_COMMANDS.to_vec(),
        }
    }

    pub fn specs(&self) -> &[CommandSpec] {
        &self.specs
    }

    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    /// 정규화된 입력에 대응하는 행을 찾는다.
    /// 정확 일치 항목을 먼저 보고, 그다음 테이블 순서대로 접두사 항목을 본다.
    pub fn resolve(&self, command: &str) -> Option<&CommandSpec> {
        let exact = self
            .specs
            .iter()
            .filter(|spec| spec.rule == MatchRule::Exact)
            .find(|spec| spec.matches(command));
        if exact.is_some() {
            return exact;
        }

        self.specs
            .iter()
            .filter(|spec| spec.rule == MatchRule::Prefix)
            .find(|spec| spec.matches(command))
    }
}

/// 비교 전 입력 정규화: 앞뒤 공백 제거 + 소문자화.
pub fn normalize(line: &str) -> String {
    line.trim().to_lowercase()
}

/// 한 번의 디스패치 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    Handled,
    UnknownCommand,
    HandlerError(String),
}

/// 디스패치 후 입력 루프가 받는 제어 신호.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Continue(DispatchResult),
    Quit,
}
