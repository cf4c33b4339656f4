//! 题库存储 - 存储层
//!
//! 每个 `BankStore` 管理一个 CSV 文件（题库或错题本），
//! 是整个系统中唯一接触磁盘的地方。
//!
//! 存储契约：
//! - 首次打开时创建只含表头的空文件
//! - 再次打开时宽容读取（缺失列补空字符串），然后按规范列顺序整体重写
//! - 导入追加行（不带表头），删除 / 改笔记整体重写
//!
//! 整体重写是面向个人低数据量工具的刻意取舍，不提供并发写保护。

use csv::{ReaderBuilder, WriterBuilder};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::{Question, QuestionType};

/// 单个 CSV 题库文件的存储句柄
pub struct BankStore {
    path: PathBuf,
}

impl BankStore {
    /// 打开（必要时初始化）一个题库文件
    ///
    /// 文件不存在时写入只含表头的空表；已存在时宽容读取后
    /// 按规范列顺序整体重写一次，保证后续读取走规范格式。
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self { path: path.into() };
        if store.path.exists() {
            let rows = store.read_permissive()?;
            store.rewrite(&rows)?;
            debug!("题库文件已规范化: {} ({} 行)", store.path.display(), rows.len());
        } else {
            store.rewrite(&[])?;
            debug!("已创建空题库文件: {}", store.path.display());
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取全部题目
    pub fn load(&self) -> Result<Vec<Question>> {
        let mut reader = ReaderBuilder::new()
            .from_path(&self.path)
            .map_err(|e| self.csv_err(e))?;
        let mut rows = Vec::new();
        for record in reader.deserialize::<Question>() {
            rows.push(record.map_err(|e| self.csv_err(e))?);
        }
        Ok(rows)
    }

    /// 题目总数
    pub fn count(&self) -> Result<usize> {
        Ok(self.load()?.len())
    }

    /// 追加题目（不写表头）
    pub fn append(&self, rows: &[Question]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_err(e))?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        for question in rows {
            writer.serialize(question).map_err(|e| self.csv_err(e))?;
        }
        writer.flush().map_err(|e| self.io_err(e))?;
        Ok(())
    }

    /// 按索引批量删除，返回实际删除的行数
    ///
    /// 其余行保持原有相对顺序；越界索引被忽略（尽力而为）。
    pub fn delete(&self, indices: &[usize]) -> Result<usize> {
        let rows = self.load()?;
        let before = rows.len();
        let kept: Vec<Question> = rows
            .into_iter()
            .enumerate()
            .filter(|(i, _)| !indices.contains(i))
            .map(|(_, q)| q)
            .collect();
        let removed = before - kept.len();
        self.rewrite(&kept)?;
        Ok(removed)
    }

    /// 修改某题的"我的笔记"字段（其余字段不可变）
    pub fn update_note(&self, index: usize, note: &str) -> Result<()> {
        let mut rows = self.load()?;
        let max_index = rows.len().saturating_sub(1);
        let question = rows
            .get_mut(index)
            .ok_or(AppError::IndexOutOfRange { index, max_index })?;
        question.note = note.to_string();
        self.rewrite(&rows)
    }

    /// 以规范列顺序整体重写文件
    pub fn rewrite(&self, rows: &[Question]) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)
            .map_err(|e| self.csv_err(e))?;
        writer
            .write_record(Question::COLUMNS)
            .map_err(|e| self.csv_err(e))?;
        for question in rows {
            writer.serialize(question).map_err(|e| self.csv_err(e))?;
        }
        writer.flush().map_err(|e| self.io_err(e))?;
        Ok(())
    }

    /// 按列名宽容读取：缺失列补空字符串，未知题型退化为大题
    fn read_permissive(&self) -> Result<Vec<Question>> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| self.csv_err(e))?;
        let headers = reader.headers().map_err(|e| self.csv_err(e))?.clone();
        let positions: Vec<Option<usize>> = Question::COLUMNS
            .iter()
            .map(|name| headers.iter().position(|h| h == *name))
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| self.csv_err(e))?;
            let field = |slot: usize| -> String {
                positions[slot]
                    .and_then(|i| record.get(i))
                    .unwrap_or("")
                    .to_string()
            };
            let qtype =
                QuestionType::from_cn(&field(1)).unwrap_or(QuestionType::Essay);
            rows.push(Question {
                module: field(0),
                qtype,
                stem: field(2),
                answer: field(3),
                explanation: field(4),
                note: field(5),
            });
        }
        Ok(rows)
    }

    fn csv_err(&self, source: csv::Error) -> AppError {
        AppError::Csv {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn io_err(&self, source: std::io::Error) -> AppError {
        AppError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}
