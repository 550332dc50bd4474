use crate::config::Config;
use crate::error::AppError;
use crate::models::question::GenerationSettings;
use crate::render::render;
use crate::utils::logging::{log_results, log_startup};
use crate::workflow::QuizFlow;
use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

const HELP: &str = "\
Commands:
  open <path>                         select a PDF, DOCX, DOC or TXT file
  change                              remove the selected file
  settings <count> [difficulty] [type] set generation options
  generate                            generate a quiz from the file
  <n>                                 choose option n
  n | next, p | prev                  move between questions
  submit                              score the quiz (last question)
  retake                              start over
  help, quit";

/// 终端命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(PathBuf),
    Change,
    Settings {
        num_questions: u32,
        difficulty: Option<String>,
        question_type: Option<String>,
    },
    Generate,
    Choose(usize),
    Next,
    Previous,
    Submit,
    Retake,
    Help,
    Quit,
}

impl Command {
    /// 解析一行输入，选项编号从 1 开始
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head.to_ascii_lowercase().as_str() {
            "open" if !rest.is_empty() => Ok(Command::Open(PathBuf::from(rest))),
            "open" => Err("Usage: open <path>".to_string()),
            "change" => Ok(Command::Change),
            "settings" => {
                let mut parts = rest.split_whitespace();
                let num_questions = parts
                    .next()
                    .and_then(|v| v.parse().ok())
                    .ok_or_else(|| "Usage: settings <count> [difficulty] [type]".to_string())?;
                Ok(Command::Settings {
                    num_questions,
                    difficulty: parts.next().map(str::to_string),
                    question_type: parts.next().map(str::to_string),
                })
            }
            "generate" | "g" => Ok(Command::Generate),
            "n" | "next" => Ok(Command::Next),
            "p" | "prev" | "previous" => Ok(Command::Previous),
            "submit" => Ok(Command::Submit),
            "retake" => Ok(Command::Retake),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => match other.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(Command::Choose(n - 1)),
                _ => Err(format!("Unknown command: {}. Type 'help'.", line)),
            },
        }
    }
}

/// 应用主结构
pub struct App {
    flow: QuizFlow,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let flow = QuizFlow::new(&config)?;

        Ok(Self { flow })
    }

    pub fn flow(&self) -> &QuizFlow {
        &self.flow
    }

    /// 检查服务是否可用，失败只记录警告
    pub async fn check_service(&self) {
        let client = self.flow.client();
        match client.health_check().await {
            Ok(true) => info!("✓ 服务可用: {}", client.base_url()),
            Ok(false) => warn!("⚠️ 服务状态异常: {}", client.base_url()),
            Err(e) => warn!("⚠️ 无法连接服务 {}: {}", client.base_url(), e),
        }
    }

    /// 运行应用主逻辑（标准输入输出）
    pub async fn run(mut self, initial_file: Option<PathBuf>) -> Result<()> {
        self.check_service().await;

        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        self.run_with(stdin, &mut stdout, initial_file.as_deref())
            .await
    }

    /// 从任意输入读取命令，把界面写到任意输出
    pub async fn run_with<R, W>(
        &mut self,
        input: R,
        out: &mut W,
        initial_file: Option<&Path>,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        if let Some(path) = initial_file {
            let _ = self.flow.open_file(path).await;
        }
        self.redraw(out)?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(message) => {
                    writeln!(out, "{}", message)?;
                    continue;
                }
            };

            match command {
                Command::Quit => break,
                Command::Help => {
                    writeln!(out, "{}", HELP)?;
                    continue;
                }
                command => self.handle(command, out).await?,
            }

            self.redraw(out)?;
        }

        info!("👋 退出");
        Ok(())
    }

    async fn handle<W: Write>(&mut self, command: Command, out: &mut W) -> Result<()> {
        let result = match command {
            Command::Open(path) => self.flow.open_file(&path).await,
            Command::Change => self.flow.session_mut().change_file(),
            Command::Settings {
                num_questions,
                difficulty,
                question_type,
            } => {
                let current = self.flow.session().settings().clone();
                self.flow.session_mut().set_settings(GenerationSettings {
                    num_questions,
                    difficulty: difficulty.unwrap_or(current.difficulty),
                    question_type: question_type.unwrap_or(current.question_type),
                });
                Ok(())
            }
            Command::Generate => {
                if self.flow.session().can_generate() {
                    writeln!(out, "Generating quiz...")?;
                    out.flush()?;
                }
                self.flow.generate().await.map(|_| ())
            }
            Command::Choose(index) => self.flow.session_mut().select_answer(index),
            Command::Next => {
                self.flow.session_mut().next();
                Ok(())
            }
            Command::Previous => {
                self.flow.session_mut().previous();
                Ok(())
            }
            Command::Submit => self.flow.session_mut().submit().map(log_results),
            Command::Retake => self.flow.session_mut().retake(),
            Command::Help | Command::Quit => Ok(()),
        };

        if let Err(e) = result {
            self.report(e, out)?;
        }
        Ok(())
    }

    /// 已记录在会话中的错误由界面展示，其余直接输出
    fn report<W: Write>(&self, err: AppError, out: &mut W) -> Result<()> {
        warn!("{}", err);
        let message = err.user_message();
        if self.flow.session().error() != Some(message.as_str()) {
            writeln!(out, "{}", message)?;
        }
        Ok(())
    }

    fn redraw<W: Write>(&self, out: &mut W) -> Result<()> {
        write!(out, "\n{}", render(&self.flow.session().view()))?;
        out.flush()?;
        Ok(())
    }
}
