//! 打乱服务 - 业务能力层
//!
//! 只负责"生成排列"，从不修改调用方的列表。

use crate::infrastructure::random::RandomSource;
use crate::models::question::Question;

/// Fisher–Yates 洗牌，返回输入的一个均匀随机排列
///
/// 从最后一个位置往前，每个位置 `i` 与 `[0, i]` 中随机抽取的位置交换。
pub fn shuffle<T: Clone, R: RandomSource>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.next_index(i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// 对每道题独立打乱选项；题干和选项集合保持不变
pub fn shuffle_options_within_questions<R: RandomSource>(
    questions: &[Question],
    rng: &mut R,
) -> Vec<Question> {
    questions
        .iter()
        .map(|q| Question {
            text: q.text.clone(),
            options: shuffle(&q.options, rng),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::random::{FnRandom, SeededRandom};
    use std::collections::HashMap;

    fn multiset<T: std::hash::Hash + Eq + Clone>(items: &[T]) -> HashMap<T, usize> {
        let mut counts = HashMap::new();
        for item in items {
            *counts.entry(item.clone()).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = SeededRandom::new(11);
        for len in 0..20 {
            let input: Vec<usize> = (0..len).map(|i| i % 5).collect();
            let output = shuffle(&input, &mut rng);
            assert_eq!(output.len(), input.len());
            assert_eq!(multiset(&output), multiset(&input));
        }
    }

    #[test]
    fn test_shuffle_does_not_touch_input() {
        let input = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let snapshot = input.clone();
        let _ = shuffle(&input, &mut SeededRandom::new(3));
        assert_eq!(input, snapshot);
    }

    #[test]
    fn test_shuffle_visits_every_index_once() {
        let mut calls = Vec::new();
        let mut rng = FnRandom::new(|upper| {
            calls.push(upper);
            0
        });
        let out = shuffle(&[1, 2, 3, 4], &mut rng);
        drop(rng);

        // i = 3, 2, 1，每次与位置 0 交换
        assert_eq!(calls, vec![3, 2, 1]);
        assert_eq!(out, vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_identity_draws_keep_order() {
        let mut rng = FnRandom::new(|upper| upper);
        assert_eq!(shuffle(&[1, 2, 3, 4, 5], &mut rng), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_shuffle_is_roughly_uniform() {
        // 3 个元素共 6 种排列，每种约 1/6
        let mut rng = SeededRandom::new(2024);
        let mut counts: HashMap<Vec<u8>, usize> = HashMap::new();
        let trials = 6000;
        for _ in 0..trials {
            *counts.entry(shuffle(&[1u8, 2, 3], &mut rng)).or_insert(0) += 1;
        }
        assert_eq!(counts.len(), 6);
        for count in counts.values() {
            assert!((800..1200).contains(count), "分布偏差过大: {:?}", counts);
        }
    }

    #[test]
    fn test_option_shuffle_preserves_sets() {
        let questions = vec![
            Question::with_options("Q1", ["a", "b", "c", "d"]),
            Question::new("Q2"),
            Question::with_options("Q3", ["x", "y"]),
        ];
        let shuffled = shuffle_options_within_questions(&questions, &mut SeededRandom::new(5));

        assert_eq!(shuffled.len(), questions.len());
        for (before, after) in questions.iter().zip(&shuffled) {
            assert_eq!(before.text, after.text);
            let mut a = before.options.clone();
            let mut b = after.options.clone();
            a.sort();
            b.sort();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_option_shuffle_draws_per_question() {
        // 每道题都单独抽取，互不共享结果
        let mut calls = Vec::new();
        let mut rng = FnRandom::new(|upper| {
            calls.push(upper);
            0
        });
        let questions = vec![
            Question::with_options("Q1", ["a", "b", "c"]),
            Question::with_options("Q2", ["d", "e"]),
        ];
        let shuffled = shuffle_options_within_questions(&questions, &mut rng);
        drop(rng);

        assert_eq!(calls, vec![2, 1, 1]);
        assert_eq!(shuffled[0].options, vec!["b", "c", "a"]);
        assert_eq!(shuffled[1].options, vec!["e", "d"]);
    }
}
