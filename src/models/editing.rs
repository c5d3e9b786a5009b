//! 题目列表的编辑操作
//!
//! 每个操作都接收一个题目列表并返回新的列表，不在原列表上修改。
//! 越界的索引和空白输入都会被忽略，返回内容不变的列表。

use crate::models::question::{Question, Variant};

/// 追加一道新题（无选项）；空白题干被忽略
pub fn add_question(questions: &[Question], text: &str) -> Vec<Question> {
    let mut updated = questions.to_vec();
    if !text.trim().is_empty() {
        updated.push(Question::new(text));
    }
    updated
}

/// 给指定题目追加一个选项
///
/// 空白选项、越界索引、已存在的选项都不会被追加。
pub fn add_option(questions: &[Question], question_index: usize, option: &str) -> Vec<Question> {
    let mut updated = questions.to_vec();
    if option.trim().is_empty() {
        return updated;
    }
    if let Some(question) = updated.get_mut(question_index) {
        if !question.options.iter().any(|o| o == option) {
            question.options.push(option.to_string());
        }
    }
    updated
}

/// 修改题干
pub fn update_question(questions: &[Question], index: usize, text: &str) -> Vec<Question> {
    let mut updated = questions.to_vec();
    if let Some(question) = updated.get_mut(index) {
        question.text = text.to_string();
    }
    updated
}

/// 修改某个选项的文本
pub fn update_option(
    questions: &[Question],
    question_index: usize,
    option_index: usize,
    text: &str,
) -> Vec<Question> {
    let mut updated = questions.to_vec();
    if let Some(option) = updated
        .get_mut(question_index)
        .and_then(|q| q.options.get_mut(option_index))
    {
        *option = text.to_string();
    }
    updated
}

/// 删除某个选项
pub fn remove_option(
    questions: &[Question],
    question_index: usize,
    option_index: usize,
) -> Vec<Question> {
    let mut updated = questions.to_vec();
    if let Some(question) = updated.get_mut(question_index) {
        if option_index < question.options.len() {
            question.options.remove(option_index);
        }
    }
    updated
}

/// 删除一道题
pub fn remove_question(questions: &[Question], index: usize) -> Vec<Question> {
    questions
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, q)| q.clone())
        .collect()
}

/// 按顺序拼接所有变体，得到打乱后的完整题目列表
pub fn flatten_variants(variants: &[Variant]) -> Vec<Question> {
    variants
        .iter()
        .flat_map(|v| v.questions.iter().cloned())
        .collect()
}
