//! 刷题会话 - 流程层
//!
//! 把一次刷题交互显式建模为：
//!
//! ```text
//! PracticeCommand ──▶ PracticeSession::handle ──▶ Turn { RenderModel, 错题副本 }
//! ```
//!
//! 会话对象持有当前页的题目、游标和本题的作答状态，
//! 切换题目时作答状态重置；翻页 / 改筛选条件时重建整个会话。

use crate::models::{GradeOutcome, Question, QuestionType, UserResponse};
use crate::services::{Grader, OptionSplitter};

/// 刷题筛选条件（范围由调用方选择题库 / 错题本体现）
#[derive(Debug, Clone, Default)]
pub struct PracticeFilter {
    /// 按模块筛选，None 为全部模块
    pub module: Option<String>,
    /// 按题型筛选，None 为全部题型
    pub qtype: Option<QuestionType>,
}

impl PracticeFilter {
    pub fn matches(&self, question: &Question) -> bool {
        if let Some(module) = &self.module {
            if &question.module != module {
                return false;
            }
        }
        if let Some(qtype) = self.qtype {
            if question.qtype != qtype {
                return false;
            }
        }
        true
    }
}

/// 按筛选条件过滤题目，保持原有顺序
pub fn filter_questions(rows: Vec<Question>, filter: &PracticeFilter) -> Vec<Question> {
    rows.into_iter().filter(|q| filter.matches(q)).collect()
}

/// 总页数（向上取整）
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// 第 `page`（0 起）页的 [start, end) 边界
pub fn page_bounds(total: usize, page: usize, page_size: usize) -> (usize, usize) {
    let page_size = page_size.max(1);
    let start = (page * page_size).min(total);
    let end = ((page + 1) * page_size).min(total);
    (start, end)
}

/// 一次交互的命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PracticeCommand {
    /// 渲染当前题（进入会话 / 记错题后刷新）
    Show,
    /// 下一题（越过末尾绕回开头）
    Next,
    /// 上一题（越过开头绕回末尾）
    Prev,
    /// 提交作答（多选只在此时判分）
    Submit(UserResponse),
    /// 把当前题记入错题本（需要先作答 / 查看答案）
    MarkMissed,
}

/// 渲染模型：一次交互后界面需要的全部内容
#[derive(Debug, Clone, PartialEq)]
pub struct RenderModel {
    /// 页内序号（从 1 开始）
    pub position: usize,
    /// 页内题目总数
    pub total: usize,
    /// 全局题号（从 1 开始）
    pub number: usize,
    pub module: String,
    pub qtype: QuestionType,
    /// 去掉内嵌选项后的干净题干
    pub stem: String,
    pub options: Vec<String>,
    /// 本题最近一次判分结果，未作答时为 None
    pub outcome: Option<GradeOutcome>,
    /// 作答 / 查看答案后展示的标准答案
    pub answer: Option<String>,
    /// 作答 / 查看答案后展示的解析
    pub explanation: Option<String>,
    pub note: String,
}

/// 一次交互的输出
#[derive(Debug, Clone)]
pub struct Turn {
    pub render: RenderModel,
    /// 需要追加到错题本的题目副本（允许重复记录）
    pub missed: Option<Question>,
}

/// 刷题会话
pub struct PracticeSession {
    questions: Vec<Question>,
    /// 当前页在全量筛选结果中的起始偏移（只用于显示全局题号）
    page_start: usize,
    cursor: usize,
    /// 当前题是否已作答或查看过答案
    revealed: bool,
    last_outcome: Option<GradeOutcome>,
}

impl PracticeSession {
    /// 创建会话；工作集为空时返回 None
    pub fn new(questions: Vec<Question>, page_start: usize) -> Option<Self> {
        if questions.is_empty() {
            return None;
        }
        Some(Self {
            questions,
            page_start,
            cursor: 0,
            revealed: false,
            last_outcome: None,
        })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &Question {
        &self.questions[self.cursor]
    }

    /// 处理一条命令，返回新的渲染模型和可能的错题副本
    pub fn handle(
        &mut self,
        command: PracticeCommand,
        grader: &Grader,
        splitter: &OptionSplitter,
    ) -> Turn {
        let mut missed = None;
        match command {
            PracticeCommand::Show => {}
            PracticeCommand::Next => self.advance(),
            PracticeCommand::Prev => self.retreat(),
            PracticeCommand::Submit(response) => {
                let outcome = grader.grade(self.current(), &response);
                // 查看答案算"已揭示"；判断题尚未作答等 Ungraded 不算
                self.revealed = matches!(response, UserResponse::Reveal)
                    || !matches!(outcome, GradeOutcome::Ungraded);
                self.last_outcome = self.revealed.then(|| outcome);
            }
            PracticeCommand::MarkMissed => {
                if self.revealed {
                    missed = Some(self.current().clone());
                }
            }
        }
        Turn {
            render: self.render(splitter),
            missed,
        }
    }

    /// 下一题，绕回开头（index mod len）
    fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % self.questions.len();
        self.reset_answer_state();
    }

    /// 上一题，从 0 绕回末尾
    fn retreat(&mut self) {
        let len = self.questions.len();
        self.cursor = (self.cursor + len - 1) % len;
        self.reset_answer_state();
    }

    fn reset_answer_state(&mut self) {
        self.revealed = false;
        self.last_outcome = None;
    }

    fn render(&self, splitter: &OptionSplitter) -> RenderModel {
        let question = self.current();
        let (stem, options) = splitter.split(&question.stem);
        RenderModel {
            position: self.cursor + 1,
            total: self.questions.len(),
            number: self.page_start + self.cursor + 1,
            module: question.module.clone(),
            qtype: question.qtype,
            stem,
            options,
            outcome: self.last_outcome.clone(),
            answer: self.revealed.then(|| question.answer.clone()),
            explanation: self.revealed.then(|| question.explanation.clone()),
            note: question.note.clone(),
        }
    }
}
