//! 命令行定义

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "shuati-bao",
    version,
    about = "生物工程考研刷题宝 — 题库导入 / 刷题训练 / 错题本"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 批量导入新题目（从文件或标准输入粘贴）
    Import {
        /// 归属模块
        #[arg(long)]
        module: String,

        /// 题目文本文件，缺省读标准输入
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// 刷题强化训练（交互式）
    Practice {
        /// 只刷错题本
        #[arg(long)]
        missed_only: bool,

        /// 按模块筛选
        #[arg(long)]
        module: Option<String>,

        /// 按题型筛选（单选 / 多选 / 判断 / 填空 / 大题）
        #[arg(long = "type")]
        qtype: Option<String>,

        /// 题号区间（第几页，从 1 开始）
        #[arg(long, default_value = "1")]
        page: usize,
    },

    /// 题库整理中心：列出 / 搜索题目
    List {
        /// 按模块筛选
        #[arg(long)]
        module: Option<String>,

        /// 题干关键字搜索
        #[arg(long)]
        keyword: Option<String>,

        /// 查看错题本而不是主题库
        #[arg(long)]
        missed: bool,

        /// 同时显示答案与解析
        #[arg(long)]
        full: bool,
    },

    /// 永久删除选中题目（按 list 显示的索引）
    Delete {
        /// 逗号分隔的索引，如 0,2,5
        #[arg(long, value_delimiter = ',')]
        indices: Vec<usize>,

        /// 从错题本而不是主题库删除
        #[arg(long)]
        missed: bool,
    },

    /// 修改某题的"我的笔记"
    Note {
        /// 题目在主题库中的索引
        #[arg(long)]
        index: usize,

        /// 笔记内容
        #[arg(long)]
        text: String,
    },
}
