//! 选项切分 - 业务能力层
//!
//! 把原始题干切分为"干净题干 + 有序选项列表"。
//! 选项标记：A-G 字母后跟分隔符（`.`、`、` 或空白），
//! 且位于行首或空白之后。

use regex::Regex;

/// 选项切分器
///
/// 职责：
/// - 定位题干中的选项标记
/// - 切出干净题干和按出现顺序排列的选项文本
/// - 不做题型判断，不做存储
pub struct OptionSplitter {
    marker: Regex,
}

impl OptionSplitter {
    pub fn new() -> Self {
        Self {
            marker: Regex::new(r"(?:^|\s)[A-G][\.、\s]").expect("选项标记正则不合法"),
        }
    }

    /// 切分题干与选项
    ///
    /// # 参数
    /// - `raw`: 原始题干（可能内嵌选项）
    ///
    /// # 返回
    /// 返回 (干净题干, 选项列表)。找不到任何标记时返回
    /// (整段去空白文本, 空列表)，表示非选择题。
    ///
    /// 已知局限：选项正文内部恰好出现"空白 + 字母 + 分隔符"时
    /// 会被误认为新选项的起点，这是启发式切分接受的误差。
    pub fn split(&self, raw: &str) -> (String, Vec<String>) {
        let marks: Vec<regex::Match> = self.marker.find_iter(raw).collect();
        if marks.is_empty() {
            return (raw.trim().to_string(), Vec::new());
        }

        let stem = raw[..marks[0].start()].trim().to_string();
        let mut options = Vec::with_capacity(marks.len());
        for (i, m) in marks.iter().enumerate() {
            let end = marks.get(i + 1).map_or(raw.len(), |next| next.start());
            options.push(raw[m.start()..end].trim().to_string());
        }
        (stem, options)
    }
}

impl Default for OptionSplitter {
    fn default() -> Self {
        Self::new()
    }
}
