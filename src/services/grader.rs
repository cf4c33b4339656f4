//! 判题 - 业务能力层
//!
//! 按题型对用户作答与标准答案做匹配：
//! - 判断：标准答案含任一肯定标志词即视为"正确"，否则视为"错误"
//! - 多选：选中选项首字母集合与答案中 A-G 字母集合比较（忽略顺序）
//! - 单选：选中选项首字母与答案首字母比较
//! - 大题 / 填空：仅展示答案，不判分

use crate::models::{GradeOutcome, Question, QuestionType, UserResponse};

/// 肯定标志词：标准答案包含任意一个即判定为"正确"
///
/// 注意这里只做肯定方向的检查：答案里一个肯定词都没有就按
/// "错误"处理，即使它也不含否定词。既有题库依赖这一行为。
const POSITIVE_TOKENS: [&str; 5] = ["正确", "对", "√", "T", "TRUE"];

/// 判题器
///
/// 职责：
/// - 只处理单个题目的作答匹配
/// - 不持有状态，不做存储，不关心刷题流程
pub struct Grader;

impl Grader {
    pub fn new() -> Self {
        Self
    }

    /// 判分
    ///
    /// # 参数
    /// - `question`: 题目记录
    /// - `response`: 与题型对应形状的用户作答
    ///
    /// # 返回
    /// 三值判题结果；作答形状与题型不符时视为未判分。
    ///
    /// 标准答案在比较前统一去首尾空白并转大写：导入会写入规范化
    /// 后的答案，但手工编辑过的 CSV 里可能存着 "b" / " B" / "true"
    /// 这样的记录，判题不应因此失准。
    pub fn grade(&self, question: &Question, response: &UserResponse) -> GradeOutcome {
        let stored = question.answer.trim().to_uppercase();
        match (question.qtype, response) {
            (QuestionType::Judge, UserResponse::Judge(choice)) => {
                self.grade_judge(&stored, *choice)
            }
            (QuestionType::Multiple, UserResponse::Multiple(selected)) => {
                self.grade_multiple(&stored, selected)
            }
            (QuestionType::Single, UserResponse::Single(choice)) => {
                self.grade_single(&stored, choice.as_deref())
            }
            (QuestionType::Essay | QuestionType::Blank, UserResponse::Reveal) => {
                GradeOutcome::Ungraded
            }
            _ => GradeOutcome::Ungraded,
        }
    }

    /// 判断题：用户的布尔选择 vs 标准答案推导出的布尔值
    fn grade_judge(&self, stored: &str, choice: Option<bool>) -> GradeOutcome {
        let Some(user) = choice else {
            return GradeOutcome::Ungraded;
        };
        let stored_positive = POSITIVE_TOKENS.iter().any(|t| stored.contains(t));
        if user == stored_positive {
            GradeOutcome::Correct
        } else {
            GradeOutcome::Incorrect {
                answer: stored.to_string(),
            }
        }
    }

    /// 多选题：首字母集合相等（与勾选顺序无关）
    fn grade_multiple(&self, stored: &str, selected: &[String]) -> GradeOutcome {
        let mut chosen: Vec<char> = selected
            .iter()
            .filter_map(|opt| opt.trim().chars().next())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        chosen.sort_unstable();

        let mut expected: Vec<char> = stored.chars().filter(|c| matches!(c, 'A'..='G')).collect();
        expected.sort_unstable();

        if chosen == expected {
            GradeOutcome::Correct
        } else {
            GradeOutcome::Incorrect {
                answer: stored.to_string(),
            }
        }
    }

    /// 单选题：选项首字母 vs 答案首字母
    fn grade_single(&self, stored: &str, choice: Option<&str>) -> GradeOutcome {
        let Some(text) = choice else {
            return GradeOutcome::Ungraded;
        };
        let user_letter = text.trim().chars().next().map(|c| c.to_ascii_uppercase());
        let stored_letter = stored.chars().next();
        match (user_letter, stored_letter) {
            (Some(u), Some(s)) if u == s => GradeOutcome::Correct,
            _ => GradeOutcome::Incorrect {
                answer: stored.to_string(),
            },
        }
    }
}

impl Default for Grader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn judge_question(answer: &str) -> Question {
        Question::new("应用", QuestionType::Judge, "判断题干", answer, "无")
    }

    #[test]
    fn test_judge_positive_answer() {
        let grader = Grader::new();
        let q = judge_question("正确");
        assert_eq!(grader.grade(&q, &UserResponse::Judge(Some(true))), GradeOutcome::Correct);
        assert_eq!(
            grader.grade(&q, &UserResponse::Judge(Some(false))),
            GradeOutcome::Incorrect { answer: "正确".to_string() }
        );
    }

    #[test]
    fn test_judge_negative_answer() {
        let grader = Grader::new();
        let q = judge_question("错误");
        assert_eq!(grader.grade(&q, &UserResponse::Judge(Some(false))), GradeOutcome::Correct);
    }

    #[test]
    fn test_judge_unanswered_is_ungraded() {
        let grader = Grader::new();
        let q = judge_question("对");
        assert_eq!(grader.grade(&q, &UserResponse::Judge(None)), GradeOutcome::Ungraded);
    }

    /// 答案既无肯定词也无否定词时按"错误"处理（只查肯定方向）
    #[test]
    fn test_judge_ambiguous_answer_resolves_to_false() {
        let grader = Grader::new();
        let q = judge_question("无法确定");
        assert_eq!(grader.grade(&q, &UserResponse::Judge(Some(false))), GradeOutcome::Correct);
        assert_eq!(
            grader.grade(&q, &UserResponse::Judge(Some(true))),
            GradeOutcome::Incorrect { answer: "无法确定".to_string() }
        );
    }

    /// 同时含肯定词和否定词时肯定词胜出
    #[test]
    fn test_judge_both_tokens_positive_wins() {
        let grader = Grader::new();
        let q = judge_question("正确（原说法错误已更正）");
        assert_eq!(grader.grade(&q, &UserResponse::Judge(Some(true))), GradeOutcome::Correct);
    }

    #[test]
    fn test_multiple_order_independent() {
        let grader = Grader::new();
        let q = Question::new("应用", QuestionType::Multiple, "多选 A. 甲 B. 乙 C. 丙", "AC", "无");
        let sel = vec!["C. 丙".to_string(), "A. 甲".to_string()];
        assert_eq!(grader.grade(&q, &UserResponse::Multiple(sel)), GradeOutcome::Correct);
    }

    #[test]
    fn test_multiple_wrong_subset() {
        let grader = Grader::new();
        let q = Question::new("应用", QuestionType::Multiple, "多选 A. 甲 B. 乙 C. 丙", "AC", "无");
        let sel = vec!["A. 甲".to_string()];
        assert_eq!(
            grader.grade(&q, &UserResponse::Multiple(sel)),
            GradeOutcome::Incorrect { answer: "AC".to_string() }
        );
    }

    #[test]
    fn test_multiple_extracts_letters_from_noisy_answer() {
        let grader = Grader::new();
        let q = Question::new("应用", QuestionType::Multiple, "多选", "答案AC", "无");
        let sel = vec!["A. 甲".to_string(), "C. 丙".to_string()];
        assert_eq!(grader.grade(&q, &UserResponse::Multiple(sel)), GradeOutcome::Correct);
    }

    #[test]
    fn test_single_first_letter_match() {
        let grader = Grader::new();
        let q = Question::new("应用", QuestionType::Single, "单选 A. 甲 B. 乙", "B", "无");
        assert_eq!(
            grader.grade(&q, &UserResponse::Single(Some("b. 乙".to_string()))),
            GradeOutcome::Correct
        );
        assert_eq!(
            grader.grade(&q, &UserResponse::Single(Some("A. 甲".to_string()))),
            GradeOutcome::Incorrect { answer: "B".to_string() }
        );
    }

    #[test]
    fn test_single_no_choice_is_ungraded() {
        let grader = Grader::new();
        let q = Question::new("应用", QuestionType::Single, "单选 A. 甲", "A", "无");
        assert_eq!(grader.grade(&q, &UserResponse::Single(None)), GradeOutcome::Ungraded);
    }

    #[test]
    fn test_single_empty_stored_answer_is_incorrect() {
        let grader = Grader::new();
        let q = Question::new("应用", QuestionType::Single, "单选 A. 甲", "", "无");
        assert_eq!(
            grader.grade(&q, &UserResponse::Single(Some("A. 甲".to_string()))),
            GradeOutcome::Incorrect { answer: String::new() }
        );
    }

    /// 手工编辑的 CSV 可能存着未规范化的答案，判题前统一 trim + 转大写
    #[test]
    fn test_unnormalized_stored_answer_single() {
        let grader = Grader::new();
        let q = Question::new("应用", QuestionType::Single, "单选 A. 甲 B. 乙", "b", "无");
        assert_eq!(
            grader.grade(&q, &UserResponse::Single(Some("B. 乙".to_string()))),
            GradeOutcome::Correct
        );

        let padded = Question::new("应用", QuestionType::Single, "单选 A. 甲 B. 乙", " B ", "无");
        assert_eq!(
            grader.grade(&padded, &UserResponse::Single(Some("B. 乙".to_string()))),
            GradeOutcome::Correct
        );
    }

    #[test]
    fn test_unnormalized_stored_answer_multiple() {
        let grader = Grader::new();
        let q = Question::new("应用", QuestionType::Multiple, "多选 A. 甲 B. 乙 C. 丙", "ac", "无");
        let sel = vec!["A. 甲".to_string(), "C. 丙".to_string()];
        assert_eq!(grader.grade(&q, &UserResponse::Multiple(sel)), GradeOutcome::Correct);
    }

    #[test]
    fn test_unnormalized_stored_answer_judge() {
        let grader = Grader::new();
        let q = judge_question(" true ");
        assert_eq!(grader.grade(&q, &UserResponse::Judge(Some(true))), GradeOutcome::Correct);
    }

    #[test]
    fn test_essay_reveal_is_ungraded() {
        let grader = Grader::new();
        let q = Question::new("应用", QuestionType::Essay, "简述题", "见解析", "详细解析");
        assert_eq!(grader.grade(&q, &UserResponse::Reveal), GradeOutcome::Ungraded);
    }

    #[test]
    fn test_mismatched_response_shape_is_ungraded() {
        let grader = Grader::new();
        let q = judge_question("正确");
        assert_eq!(
            grader.grade(&q, &UserResponse::Single(Some("A".to_string()))),
            GradeOutcome::Ungraded
        );
    }
}
