//! 流程层（Workflow Layer）
//!
//! 把原本散落在界面回调里的刷题状态收敛为显式的会话对象：
//!
//! ```text
//! app (编排层，读写存储、驱动输入输出)
//!     ↓ PracticeCommand
//! PracticeSession (流程层，游标 / 作答状态 / 绕回导航)
//!     ↓
//! services (能力层：切分 / 判题)
//! ```

pub mod practice_session;

pub use practice_session::{
    filter_questions, page_bounds, page_count, PracticeCommand, PracticeFilter, PracticeSession,
    RenderModel, Turn,
};
