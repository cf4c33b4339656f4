//! 编排层：把配置、存储、能力层和交互循环装配在一起
//!
//! 三大入口对应原工具的三个核心功能：
//! - `import`：批量导入新题目
//! - `practice`：刷题强化训练（交互式循环）
//! - `list` / `delete` / `note`：题库整理中心

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, BufRead};
use std::path::Path;
use tracing::{info, warn};

use crate::cli::Commands;
use crate::config::Config;
use crate::error::AppError;
use crate::models::{GradeOutcome, QuestionType, UserResponse, MODULES};
use crate::services::{Grader, Importer, OptionSplitter};
use crate::storage::BankStore;
use crate::utils::logging::{log_startup, truncate_text};
use crate::workflow::{
    filter_questions, page_bounds, page_count, PracticeCommand, PracticeFilter, PracticeSession,
    RenderModel,
};

/// 应用主结构
pub struct App {
    config: Config,
    bank: BankStore,
    missed: BankStore,
    importer: Importer,
    grader: Grader,
    splitter: OptionSplitter,
}

impl App {
    /// 初始化应用：打开（必要时创建）两个题库文件
    pub fn initialize(config: Config) -> Result<Self> {
        let bank = BankStore::open(&config.bank_file)
            .with_context(|| format!("打开题库失败: {}", config.bank_file))?;
        let missed = BankStore::open(&config.missed_file)
            .with_context(|| format!("打开错题本失败: {}", config.missed_file))?;

        log_startup(bank.count()?, missed.count()?);

        Ok(Self {
            config,
            bank,
            missed,
            importer: Importer::new(),
            grader: Grader::new(),
            splitter: OptionSplitter::new(),
        })
    }

    /// 分发子命令
    pub fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Import { module, file } => self.run_import(&module, file.as_deref()),
            Commands::Practice {
                missed_only,
                module,
                qtype,
                page,
            } => self.run_practice(missed_only, module, qtype, page),
            Commands::List {
                module,
                keyword,
                missed,
                full,
            } => self.run_list(module, keyword, missed, full),
            Commands::Delete { indices, missed } => self.run_delete(&indices, missed),
            Commands::Note { index, text } => self.run_note(index, &text),
        }
    }

    // ========== 批量导入 ==========

    fn run_import(&self, module: &str, file: Option<&Path>) -> Result<()> {
        if !MODULES.contains(&module) {
            return Err(AppError::UnknownModule(format!(
                "{}（可选：{}）",
                module,
                MODULES.join(" / ")
            ))
            .into());
        }

        let text = match file {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("读取导入文件失败: {}", path.display()))?,
            None => {
                info!("请粘贴题目文本，结束后按 Ctrl-D：");
                io::read_to_string(io::stdin()).context("读取标准输入失败")?
            }
        };

        let rows = self.importer.parse(&text, module);
        self.bank.append(&rows)?;
        info!("🚀 导入成功！新增 {} 道题目", rows.len());
        Ok(())
    }

    // ========== 刷题模式 ==========

    fn run_practice(
        &self,
        missed_only: bool,
        module: Option<String>,
        qtype: Option<String>,
        page: usize,
    ) -> Result<()> {
        let source = if missed_only { &self.missed } else { &self.bank };
        let qtype = qtype.map(|s| s.parse::<QuestionType>()).transpose()?;
        let filter = PracticeFilter { module, qtype };

        let rows = filter_questions(source.load()?, &filter);
        if rows.is_empty() {
            warn!("⚠️ 当前筛选条件下无题目");
            return Ok(());
        }

        let total = rows.len();
        let pages = page_count(total, self.config.page_size);
        let page_idx = page.saturating_sub(1);
        if page_idx >= pages {
            return Err(AppError::IndexOutOfRange {
                index: page_idx,
                max_index: pages.saturating_sub(1),
            }
            .into());
        }
        let (start, end) = page_bounds(total, page_idx, self.config.page_size);
        info!(
            "🎯 刷题范围: 第 {} - {} 题 / 共 {} 题（第 {}/{} 页）",
            start + 1,
            end,
            total,
            page_idx + 1,
            pages
        );

        let Some(mut session) = PracticeSession::new(rows[start..end].to_vec(), start) else {
            warn!("⚠️ 当前页无题目");
            return Ok(());
        };

        let mut turn = session.handle(PracticeCommand::Show, &self.grader, &self.splitter);
        print_render(&turn.render);
        print_prompt(&turn.render);

        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line.context("读取输入失败")?;
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            if input.eq_ignore_ascii_case("q") {
                break;
            }

            let Some(command) = parse_practice_input(input, turn.render.qtype, &turn.render.options)
            else {
                println!("无法识别的输入: {}", input);
                print_prompt(&turn.render);
                continue;
            };

            let marking = command == PracticeCommand::MarkMissed;
            turn = session.handle(command, &self.grader, &self.splitter);

            if marking {
                match turn.missed.take() {
                    Some(question) => {
                        self.missed.append(&[question])?;
                        info!("💔 已同步至错题本");
                    }
                    None => println!("请先作答或查看答案，再记入错题本"),
                }
            } else {
                print_render(&turn.render);
            }
            print_prompt(&turn.render);
        }

        info!("👋 本次刷题结束");
        Ok(())
    }

    // ========== 题库整理中心 ==========

    fn run_list(
        &self,
        module: Option<String>,
        keyword: Option<String>,
        missed: bool,
        full: bool,
    ) -> Result<()> {
        let source = if missed { &self.missed } else { &self.bank };
        let rows = source.load()?;
        let total = rows.len();

        let mut shown = 0;
        for (index, question) in rows.iter().enumerate() {
            if let Some(m) = &module {
                if &question.module != m {
                    continue;
                }
            }
            if let Some(k) = &keyword {
                if !question.stem.contains(k.as_str()) {
                    continue;
                }
            }
            shown += 1;
            println!(
                "{:>4}  【{}】【{}】 {}",
                index,
                question.qtype,
                question.module,
                truncate_text(&question.stem, 60)
            );
            if full {
                println!(
                    "      答案: {} | 解析: {}",
                    question.answer,
                    truncate_text(&question.explanation, 80)
                );
                if !question.note.is_empty() {
                    println!("      📝 {}", question.note);
                }
            }
        }

        info!("📂 共 {} 题，符合条件 {} 题", total, shown);
        Ok(())
    }

    fn run_delete(&self, indices: &[usize], missed: bool) -> Result<()> {
        if indices.is_empty() {
            warn!("⚠️ 未指定要删除的索引");
            return Ok(());
        }
        let source = if missed { &self.missed } else { &self.bank };
        let removed = source.delete(indices)?;
        info!("🗑️ 已永久删除 {} 道题目", removed);
        Ok(())
    }

    fn run_note(&self, index: usize, text: &str) -> Result<()> {
        self.bank.update_note(index, text)?;
        info!("📝 第 {} 题的笔记已更新", index);
        Ok(())
    }
}

// ========== 交互输入与渲染 ==========

/// 把一行用户输入翻译为刷题命令
///
/// 导航键（n / p / m）对所有题型生效；作答输入按题型解释。
/// 选项字母限定 A-G，不会与导航键冲突。
fn parse_practice_input(
    input: &str,
    qtype: QuestionType,
    options: &[String],
) -> Option<PracticeCommand> {
    match input {
        "n" | "N" => return Some(PracticeCommand::Next),
        "p" | "P" => return Some(PracticeCommand::Prev),
        "m" | "M" => return Some(PracticeCommand::MarkMissed),
        _ => {}
    }

    let response = match qtype {
        QuestionType::Judge => match input {
            "1" | "对" | "正确" => UserResponse::Judge(Some(true)),
            "2" | "错" | "错误" => UserResponse::Judge(Some(false)),
            _ => return None,
        },
        QuestionType::Multiple => {
            let letters: Vec<char> = input
                .chars()
                .filter(|c| c.is_ascii_alphabetic())
                .map(|c| c.to_ascii_uppercase())
                .collect();
            if letters.is_empty() {
                return None;
            }
            let mut selected = Vec::with_capacity(letters.len());
            for letter in letters {
                selected.push(find_option(options, letter)?.clone());
            }
            UserResponse::Multiple(selected)
        }
        QuestionType::Single => {
            let letter = input.chars().next()?.to_ascii_uppercase();
            UserResponse::Single(Some(find_option(options, letter)?.clone()))
        }
        QuestionType::Essay | QuestionType::Blank => match input {
            "s" | "S" => UserResponse::Reveal,
            _ => return None,
        },
    };
    Some(PracticeCommand::Submit(response))
}

/// 按首字母查找选项
fn find_option(options: &[String], letter: char) -> Option<&String> {
    options.iter().find(|opt| {
        opt.trim()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            == Some(letter)
    })
}

fn print_render(render: &RenderModel) {
    println!();
    println!(
        "【{}】【{}】 第 {} 题（本页 {}/{}）",
        render.module, render.qtype, render.number, render.position, render.total
    );
    println!("{}", render.stem);
    for option in &render.options {
        println!("  {}", option);
    }
    if !render.note.is_empty() {
        println!("📝 我的笔记: {}", render.note);
    }

    match &render.outcome {
        Some(GradeOutcome::Correct) => println!("✅ 回答正确！"),
        Some(GradeOutcome::Incorrect { answer }) => {
            println!("❌ 回答错误！正确答案是：{}", answer);
        }
        Some(GradeOutcome::Ungraded) => {
            if let Some(answer) = &render.answer {
                println!("【答案】{}", answer);
            }
        }
        None => {}
    }
    if let Some(explanation) = &render.explanation {
        println!("【解析】{}", explanation);
    }
}

fn print_prompt(render: &RenderModel) {
    let hint = match render.qtype {
        QuestionType::Judge => "1=正确 2=错误",
        QuestionType::Multiple => "输入字母组合提交，如 AC",
        QuestionType::Single => "输入选项字母，如 A",
        QuestionType::Essay | QuestionType::Blank => "s=查看答案与解析",
    };
    println!("({} | n=下一题 p=上一题 m=记入错题本 q=退出)", hint);
}
