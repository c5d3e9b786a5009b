//! 变体划分服务 - 业务能力层

use crate::error::PartitionError;
use crate::infrastructure::random::RandomSource;
use crate::models::question::{Question, Variant};
use crate::services::shuffle_service::shuffle;
use tracing::debug;

/// 单份试卷允许的最大变体数量
pub const MAX_VARIANT_COUNT: usize = 1000;

/// 校验变体数量，必须在 `1..=MAX_VARIANT_COUNT` 内
pub fn validate_variant_count(count: i64) -> Result<usize, PartitionError> {
    let n = usize::try_from(count)
        .ok()
        .filter(|&n| n >= 1)
        .ok_or(PartitionError::InvalidVariantCount { count })?;
    if n > MAX_VARIANT_COUNT {
        return Err(PartitionError::TooManyVariants {
            count,
            max: MAX_VARIANT_COUNT,
        });
    }
    Ok(n)
}

/// 先整体打乱，再切成 `variant_count` 段连续的变体
///
/// 每段长度为 `ceil(total / variant_count)`，最后几段可能更短或为空。
/// 按顺序拼接所有变体正好得到打乱后的序列。
pub fn partition_into_variants<R: RandomSource>(
    questions: &[Question],
    variant_count: i64,
    rng: &mut R,
) -> Result<Vec<Variant>, PartitionError> {
    let count = validate_variant_count(variant_count)?;
    let shuffled = shuffle(questions, rng);
    Ok(split_into_variants(shuffled, count))
}

/// 把已排好顺序的题目按固定块大小切分
fn split_into_variants(shuffled: Vec<Question>, count: usize) -> Vec<Variant> {
    let total = shuffled.len();
    let chunk_size = total.div_ceil(count);

    let mut remaining = shuffled.into_iter();
    let variants: Vec<Variant> = (0..count)
        .map(|i| Variant {
            number: i + 1,
            questions: remaining.by_ref().take(chunk_size).collect(),
        })
        .collect();

    debug!(
        "划分完成: {} 道题 → {} 个变体 (每个最多 {} 道)",
        total, count, chunk_size
    );
    variants
}
