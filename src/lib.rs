//! # 刷题宝 (shuati-bao)
//!
//! 面向考研复习的个人刷题工具：批量导入题目文本、交互式刷题、
//! 错题本跟踪，数据落在两个 CSV 文件里（题库 + 错题本）。
//!
//! ## 架构设计
//!
//! 本系统采用严格的分层架构：
//!
//! ### ① 存储层（Storage）
//! - `storage/` - 唯一接触磁盘的层
//! - `BankStore` - 单个 CSV 题库文件的句柄：初始化 / 读取 / 追加 / 删除 / 整体重写
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，纯函数式能力，不做 I/O
//! - `OptionSplitter` - 题干与 A-G 选项的切分能力
//! - `Importer` - 粘贴文本 → 结构化题目记录的解析能力
//! - `Grader` - 按题型判分的能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次刷题交互"的完整流程
//! - `PracticeSession` - 显式会话状态（游标 / 作答状态 / 绕回导航）
//! - `PracticeCommand` → `Turn`（渲染模型 + 错题副本）
//!
//! ### ④ 编排层（Orchestration）
//! - `app.rs` - 装配配置、存储与能力层，分发子命令，驱动交互循环
//!
//! ## 模块结构
//!
//! - `models/` - 题目记录、题型、判题结果等数据类型
//! - `services/` - 切分 / 导入 / 判题三项纯能力
//! - `storage/` - CSV 文件句柄
//! - `workflow/` - 刷题会话与翻页导航
//! - `app` / `cli` - 子命令定义与分发
//! - `config` / `error` / `utils` - 配置、错误类型与日志

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppError, Result};
pub use models::{GradeOutcome, Question, QuestionType, UserResponse, MODULES};
pub use services::{Grader, Importer, OptionSplitter};
pub use storage::BankStore;
pub use workflow::{PracticeCommand, PracticeFilter, PracticeSession};
