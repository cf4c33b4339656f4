use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 固定的模块（归属章节）列表
pub const MODULES: [&str; 6] = [
    "绪论与基因工程",
    "细胞工程",
    "发酵工程",
    "蛋白质工程与酶工程",
    "应用",
    "微生物生物技术",
];

/// 题型
///
/// 决定判题策略。导入时自动分类，`填空` 不会被自动判定，
/// 只能通过手工编辑题库获得，判题时与大题同样处理（只展示答案）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuestionType {
    #[serde(rename = "单选")]
    Single,
    #[serde(rename = "多选")]
    Multiple,
    #[serde(rename = "判断")]
    Judge,
    #[serde(rename = "填空")]
    Blank,
    #[serde(rename = "大题")]
    Essay,
}

impl QuestionType {
    /// 全部题型（筛选菜单用）
    pub const ALL: [QuestionType; 5] = [
        QuestionType::Single,
        QuestionType::Multiple,
        QuestionType::Judge,
        QuestionType::Blank,
        QuestionType::Essay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Single => "单选",
            QuestionType::Multiple => "多选",
            QuestionType::Judge => "判断",
            QuestionType::Blank => "填空",
            QuestionType::Essay => "大题",
        }
    }

    /// 从中文名解析题型，无法识别时返回 None
    pub fn from_cn(s: &str) -> Option<Self> {
        match s.trim() {
            "单选" => Some(QuestionType::Single),
            "多选" => Some(QuestionType::Multiple),
            "判断" => Some(QuestionType::Judge),
            "填空" => Some(QuestionType::Blank),
            "大题" => Some(QuestionType::Essay),
            _ => None,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_cn(s).ok_or_else(|| AppError::UnknownQuestionType(s.to_string()))
    }
}

// 存储文件里的题型是自由文本，读到无法识别的值时退化为大题
// （没有选项、不自动判分），而不是让整个文件加载失败
fn deserialize_qtype<'de, D>(deserializer: D) -> Result<QuestionType, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(QuestionType::from_cn(&s).unwrap_or(QuestionType::Essay))
}

/// 题目记录
///
/// 字段顺序即 CSV 文件的规范列顺序，serde 重命名保证与
/// 既有数据文件（模块/题型/题目/答案/解析/我的笔记）完全兼容。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// 归属模块
    #[serde(rename = "模块", default)]
    pub module: String,

    /// 题型
    #[serde(rename = "题型", deserialize_with = "deserialize_qtype")]
    pub qtype: QuestionType,

    /// 题干（可能内嵌 A-G 选项文本）
    #[serde(rename = "题目", default)]
    pub stem: String,

    /// 标准答案（导入时已归一化为大写）
    #[serde(rename = "答案", default)]
    pub answer: String,

    /// 解析，缺省为 "无"
    #[serde(rename = "解析", default)]
    pub explanation: String,

    /// 我的笔记（唯一允许后期修改的字段）
    #[serde(rename = "我的笔记", default)]
    pub note: String,
}

impl Question {
    /// 规范列名，顺序固定
    pub const COLUMNS: [&'static str; 6] = ["模块", "题型", "题目", "答案", "解析", "我的笔记"];

    pub fn new(
        module: impl Into<String>,
        qtype: QuestionType,
        stem: impl Into<String>,
        answer: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            module: module.into(),
            qtype,
            stem: stem.into(),
            answer: answer.into(),
            explanation: explanation.into(),
            note: String::new(),
        }
    }
}
