use crate::error::{AppError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 题库 CSV 文件路径
    pub bank_file: String,
    /// 错题本 CSV 文件路径
    pub missed_file: String,
    /// 刷题模式下每页题目数量
    pub page_size: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bank_file: "bio_bank_v2.csv".to_string(),
            missed_file: "wrong_questions.csv".to_string(),
            page_size: 25,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 加载配置：优先读取 config.toml，再用环境变量覆盖
    pub fn load() -> Result<Self> {
        let base = match fs::read_to_string("config.toml") {
            Ok(text) => toml::from_str(&text)
                .map_err(|e| AppError::Config(format!("config.toml 解析失败: {}", e)))?,
            Err(_) => Self::default(),
        };
        Ok(base.apply_env())
    }

    /// 从指定路径加载配置文件（测试 / 自定义部署用）
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| AppError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&text)
            .map_err(|e| AppError::Config(format!("{} 解析失败: {}", path.display(), e)))
    }

    /// 用环境变量覆盖已有配置
    pub fn apply_env(self) -> Self {
        Self {
            bank_file: std::env::var("BANK_FILE").unwrap_or(self.bank_file),
            missed_file: std::env::var("MISSED_FILE").unwrap_or(self.missed_file),
            page_size: std::env::var("PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.page_size)
                .max(1),
            verbose_logging: std::env::var("VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.verbose_logging),
        }
    }
}
