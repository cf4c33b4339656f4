pub mod grade;
pub mod question;

pub use grade::{GradeOutcome, UserResponse};
pub use question::{Question, QuestionType, MODULES};
