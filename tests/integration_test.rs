use shuati_bao::config::Config;
use shuati_bao::models::{GradeOutcome, QuestionType, UserResponse};
use shuati_bao::services::{Grader, Importer, OptionSplitter};
use shuati_bao::storage::BankStore;
use shuati_bao::workflow::{filter_questions, PracticeCommand, PracticeFilter, PracticeSession};
use std::fs;
use tempfile::tempdir;

/// 导入 → 刷题 → 记错题 → 删除 的完整闭环
#[test]
fn test_full_practice_cycle() {
    let dir = tempdir().expect("创建临时目录失败");
    let bank = BankStore::open(dir.path().join("bank.csv")).expect("打开题库失败");
    let missed = BankStore::open(dir.path().join("wrong.csv")).expect("打开错题本失败");

    // 1. 批量导入
    let importer = Importer::new();
    let text = "# 模拟卷一\n\
        题目：判断：限制性内切酶只切割双链 DNA 答案：正确 解析：识别回文序列\n\
        ---\n\
        题目：下列属于细胞工程技术的是？ A. 原生质体融合 B. PCR C. 蛋白质电泳 答案：a 解析：略\n\
        ---\n\
        题目：发酵过程需要控制的参数包括 A. 温度 B. pH C. 溶氧 答案：A、B、C 解析：均为关键参数\n\
        ---\n\
        题目：简述基因工程的基本步骤。 答案：见解析 解析：切、接、转、筛\n\
        ---\n\
        残缺块，没有任何标记\n";
    let rows = importer.parse(text, "绪论与基因工程");
    assert_eq!(rows.len(), 4, "残缺块应被静默丢弃");
    assert_eq!(rows[0].qtype, QuestionType::Judge);
    assert_eq!(rows[1].qtype, QuestionType::Single);
    assert_eq!(rows[1].answer, "A");
    assert_eq!(rows[2].qtype, QuestionType::Multiple);
    assert_eq!(rows[2].answer, "ABC");
    assert_eq!(rows[3].qtype, QuestionType::Essay);

    bank.append(&rows).expect("导入入库失败");
    assert_eq!(bank.count().unwrap(), 4);

    // 2. 按题型筛选后刷判断题
    let grader = Grader::new();
    let splitter = OptionSplitter::new();
    let filter = PracticeFilter {
        module: None,
        qtype: Some(QuestionType::Judge),
    };
    let working = filter_questions(bank.load().unwrap(), &filter);
    assert_eq!(working.len(), 1);

    let mut session = PracticeSession::new(working, 0).expect("会话不应为空");
    let turn = session.handle(
        PracticeCommand::Submit(UserResponse::Judge(Some(false))),
        &grader,
        &splitter,
    );
    assert_eq!(
        turn.render.outcome,
        Some(GradeOutcome::Incorrect {
            answer: "正确".to_string()
        })
    );

    // 3. 答错后记入错题本
    let turn = session.handle(PracticeCommand::MarkMissed, &grader, &splitter);
    let question = turn.missed.expect("作答后应允许记错题");
    missed.append(&[question]).expect("写错题本失败");
    assert_eq!(missed.count().unwrap(), 1);

    // 4. 错题本可以作为刷题范围
    let missed_rows = missed.load().unwrap();
    assert_eq!(missed_rows[0].qtype, QuestionType::Judge);

    // 5. 删除主题库中的两题，剩余顺序不变
    let removed = bank.delete(&[0, 2]).unwrap();
    assert_eq!(removed, 2);
    let remaining = bank.load().unwrap();
    assert_eq!(remaining.len(), 2);
    assert_eq!(remaining[0].qtype, QuestionType::Single);
    assert_eq!(remaining[1].qtype, QuestionType::Essay);

    // 6. 重新打开会触发规范化重写，数据不丢
    drop(bank);
    let reopened = BankStore::open(dir.path().join("bank.csv")).unwrap();
    assert_eq!(reopened.count().unwrap(), 2);
}

/// 单选题在会话里的完整作答流程
#[test]
fn test_single_choice_session_flow() {
    let dir = tempdir().unwrap();
    let bank = BankStore::open(dir.path().join("bank.csv")).unwrap();

    let importer = Importer::new();
    let rows = importer.parse(
        "题目：原生质体融合常用的化学诱导剂是？ A. PEG B. SDS C. EDTA 答案：A 解析：聚乙二醇促进膜融合",
        "细胞工程",
    );
    bank.append(&rows).unwrap();

    let grader = Grader::new();
    let splitter = OptionSplitter::new();
    let mut session = PracticeSession::new(bank.load().unwrap(), 0).unwrap();

    let turn = session.handle(PracticeCommand::Show, &grader, &splitter);
    assert_eq!(turn.render.stem, "原生质体融合常用的化学诱导剂是？");
    assert_eq!(turn.render.options.len(), 3);
    assert!(turn.render.explanation.is_none(), "作答前不展示解析");

    let turn = session.handle(
        PracticeCommand::Submit(UserResponse::Single(Some("A. PEG".to_string()))),
        &grader,
        &splitter,
    );
    assert_eq!(turn.render.outcome, Some(GradeOutcome::Correct));
    assert_eq!(turn.render.explanation.as_deref(), Some("聚乙二醇促进膜融合"));
}

/// 配置文件加载与环境变量覆盖
#[test]
fn test_config_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "bank_file = \"my_bank.csv\"\npage_size = 10\n",
    )
    .unwrap();

    let config = Config::from_file(&path).expect("配置解析失败");
    assert_eq!(config.bank_file, "my_bank.csv");
    assert_eq!(config.page_size, 10);
    // 未出现的键取默认值
    assert_eq!(config.missed_file, "wrong_questions.csv");
    assert!(!config.verbose_logging);
}

/// 手工编辑过的数据文件里答案未规范化（小写 / 带空白），判题仍应判对
#[test]
fn test_hand_edited_answers_grade_correctly() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("edited.csv");
    fs::write(
        &path,
        "模块,题型,题目,答案,解析,我的笔记\n\
         应用,单选,单选 A. 甲 B. 乙,b,无,\n\
         应用,多选,多选 A. 甲 B. 乙 C. 丙, ac ,无,\n\
         应用,判断,判断题干,true,无,\n",
    )
    .unwrap();

    let bank = BankStore::open(&path).unwrap();
    let rows = bank.load().unwrap();
    assert_eq!(rows.len(), 3);

    let grader = Grader::new();
    assert_eq!(
        grader.grade(&rows[0], &UserResponse::Single(Some("B. 乙".to_string()))),
        GradeOutcome::Correct
    );
    assert_eq!(
        grader.grade(
            &rows[1],
            &UserResponse::Multiple(vec!["A. 甲".to_string(), "C. 丙".to_string()])
        ),
        GradeOutcome::Correct
    );
    assert_eq!(
        grader.grade(&rows[2], &UserResponse::Judge(Some(true))),
        GradeOutcome::Correct
    );
}

/// 旧版数据文件（缺列）打开后自动迁移到规范六列
#[test]
fn test_legacy_file_migration() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("legacy.csv");
    fs::write(
        &path,
        "模块,题型,题目,答案,解析\n应用,判断,旧题干,正确,旧解析\n",
    )
    .unwrap();

    let bank = BankStore::open(&path).unwrap();
    let rows = bank.load().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].note, "");

    let header = fs::read_to_string(&path).unwrap();
    assert!(header.starts_with("模块,题型,题目,答案,解析,我的笔记"));
}
