//! 随机源抽象
//!
//! 打乱算法只依赖 `RandomSource`，生产环境使用线程随机数，
//! 复现/测试时使用固定种子或脚本化的抽取序列。

use rand::rngs::ThreadRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// 均匀整数随机源
pub trait RandomSource {
    /// 返回 `[0, upper_inclusive]` 范围内均匀分布的整数
    fn next_index(&mut self, upper_inclusive: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_index(&mut self, upper_inclusive: usize) -> usize {
        (**self).next_index(upper_inclusive)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_index(&mut self, upper_inclusive: usize) -> usize {
        (**self).next_index(upper_inclusive)
    }
}

/// 进程级线程随机数
pub struct ThreadRandom {
    rng: ThreadRng,
}

impl ThreadRandom {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadRandom {
    fn next_index(&mut self, upper_inclusive: usize) -> usize {
        self.rng.gen_range(0..=upper_inclusive)
    }
}

/// 固定种子的随机源，同一种子产生同一序列
pub struct SeededRandom {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_index(&mut self, upper_inclusive: usize) -> usize {
        self.rng.gen_range(0..=upper_inclusive)
    }
}

/// 由闭包提供抽取结果
///
/// 闭包返回值超出范围时按 `upper_inclusive + 1` 取模。
pub struct FnRandom<F> {
    draw: F,
}

impl<F> FnRandom<F>
where
    F: FnMut(usize) -> usize,
{
    pub fn new(draw: F) -> Self {
        Self { draw }
    }
}

impl<F> RandomSource for FnRandom<F>
where
    F: FnMut(usize) -> usize,
{
    fn next_index(&mut self, upper_inclusive: usize) -> usize {
        let value = (self.draw)(upper_inclusive);
        match upper_inclusive.checked_add(1) {
            Some(bound) => value % bound,
            None => value,
        }
    }
}

/// 根据可选种子创建随机源
pub fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom::new()),
    }
}
