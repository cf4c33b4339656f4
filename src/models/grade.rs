//! 判题结果与用户作答的数据类型

/// 判题结果
///
/// 三值结果：大题 / 填空以及"尚未作答"都归入 `Ungraded`，
/// 答错时附带标准答案用于展示。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradeOutcome {
    /// 回答正确
    Correct,
    /// 回答错误，附标准答案
    Incorrect { answer: String },
    /// 无法自动判分（未作答 / 大题 / 填空）
    Ungraded,
}

/// 用户作答（按题型取不同形状）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserResponse {
    /// 判断题：None 表示尚未作答
    Judge(Option<bool>),
    /// 单选题：选中选项的完整文本，None 表示尚未选择
    Single(Option<String>),
    /// 多选题：选中选项的文本集合，显式提交时才判分
    Multiple(Vec<String>),
    /// 大题 / 填空：查看答案（仅展示，不判分）
    Reveal,
}
