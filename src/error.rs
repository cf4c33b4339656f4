//! 应用程序错误类型
//!
//! 按来源分类：存储、配置、业务（索引 / 题型 / 模块）

use thiserror::Error;

/// 应用程序错误
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件读写错误
    #[error("文件读写失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV 解析 / 写入错误
    #[error("CSV 处理失败 ({path}): {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 索引超出范围
    #[error("索引 {index} 超出范围 [0, {max_index}]")]
    IndexOutOfRange { index: usize, max_index: usize },

    /// 未知题型
    #[error("未知题型: {0}（可选：单选 / 多选 / 判断 / 填空 / 大题）")]
    UnknownQuestionType(String),

    /// 未知模块
    #[error("未知模块: {0}")]
    UnknownModule(String),
}

/// 应用程序结果类型
pub type Result<T> = std::result::Result<T, AppError>;
