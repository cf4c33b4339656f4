//! 批量导入 - 业务能力层
//!
//! 把粘贴的多题文本解析为结构化题目记录：
//! 1. 去掉 `#` 开头的标题行
//! 2. 按 `---` 分隔符切块
//! 3. 逐块提取 题目 / 答案 / 解析 三个字段（支持中英文冒号）
//! 4. 归一化答案并自动分类题型
//!
//! 解析是尽力而为的：缺少题目或答案标记的块被静默丢弃，
//! 单块的失败不影响其他块。

use regex::Regex;
use tracing::debug;

use crate::models::{Question, QuestionType};
use crate::services::option_splitter::OptionSplitter;

/// 判断题答案标志词（出现任意一个即判定为判断题）
const JUDGE_TOKENS: [&str; 6] = ["正确", "错误", "对", "错", "√", "×"];

/// 答案归一化时剔除的分隔 / 点缀字符（字母间的顿号、逗号等）
const ANSWER_SEPARATORS: [char; 6] = ['、', '，', ',', '；', ';', '·'];

/// 批量导入器
///
/// 职责：
/// - 纯文本 → Vec<Question> 的解析
/// - 不写文件，追加入库由存储层完成
pub struct Importer {
    heading: Regex,
    question: Regex,
    answer: Regex,
    explanation: Regex,
    splitter: OptionSplitter,
}

impl Importer {
    pub fn new() -> Self {
        // regex crate 不支持前瞻，原来的 (?=答案[:：]) 改写为
        // 消耗式的 (?:答案[:：]|\z)，三个字段各自对整块独立匹配
        Self {
            heading: Regex::new(r"#+[^\n]*\n").expect("标题行正则不合法"),
            question: Regex::new(r"(?s)题目[:：]\s*(.*?)(?:答案[:：]|\z)").expect("题目正则不合法"),
            answer: Regex::new(r"(?s)答案[:：]\s*(.*?)(?:解析[:：]|\z)").expect("答案正则不合法"),
            explanation: Regex::new(r"(?s)解析[:：]\s*(.*)").expect("解析正则不合法"),
            splitter: OptionSplitter::new(),
        }
    }

    /// 解析整段粘贴文本
    ///
    /// # 参数
    /// - `raw_text`: 粘贴的多题文本
    /// - `module`: 归属模块
    ///
    /// # 返回
    /// 返回解析出的题目记录，导入数量即其长度。
    pub fn parse(&self, raw_text: &str, module: &str) -> Vec<Question> {
        let text = self.heading.replace_all(raw_text, "");
        let mut rows = Vec::new();

        for block in text.split("---") {
            let block = block.trim();
            if block.is_empty() {
                continue;
            }

            let stem = self.capture(&self.question, block);
            let answer = self.capture(&self.answer, block);
            let (Some(stem), Some(answer)) = (stem, answer) else {
                debug!("跳过无题目/答案标记的块: {}", block.lines().next().unwrap_or(""));
                continue;
            };

            let answer = normalize_answer(&answer);
            let explanation = self
                .capture(&self.explanation, block)
                .unwrap_or_else(|| "无".to_string());
            let qtype = self.classify(&stem, &answer);

            rows.push(Question::new(module, qtype, stem, answer, explanation));
        }
        rows
    }

    /// 题型分类，按优先级取第一个命中的规则
    fn classify(&self, stem: &str, answer: &str) -> QuestionType {
        if JUDGE_TOKENS.iter().any(|t| answer.contains(t)) || stem.contains("判断") {
            QuestionType::Judge
        } else if answer.chars().count() > 1 && answer.chars().all(|c| matches!(c, 'A'..='G')) {
            QuestionType::Multiple
        } else if !self.splitter.split(stem).1.is_empty() {
            QuestionType::Single
        } else {
            QuestionType::Essay
        }
    }

    fn capture(&self, re: &Regex, block: &str) -> Option<String> {
        re.captures(block)
            .map(|c| c.get(1).map_or("", |m| m.as_str()).trim().to_string())
    }
}

impl Default for Importer {
    fn default() -> Self {
        Self::new()
    }
}

/// 归一化答案：去空白、转大写、剔除字母间的分隔字符
fn normalize_answer(raw: &str) -> String {
    raw.trim()
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace() && !ANSWER_SEPARATORS.contains(c))
        .collect()
}
