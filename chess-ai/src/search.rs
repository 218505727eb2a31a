//! 走法选择
//!
//! 一层贪心评估：枚举走子方的全部合法走法，模拟走子后评估局面并加上吃子奖励，
//! 按分数降序排列，再在前 K 个候选中均匀随机选择（K 由难度决定）。
//! 困难难度 K = 1，总是选择最高分走法。

use chess_rules::{Board, Color, Move, MoveGenerator};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::evaluate::Evaluator;

/// 吃子奖励倍数（乘以被吃棋子的子力价值）
const CAPTURE_BONUS_MULTIPLIER: i32 = 10;

/// AI 难度
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// 简单：在前 6 个候选中随机
    Easy,
    /// 中等：在前 3 个候选中随机
    #[default]
    Medium,
    /// 困难：总是最佳
    Hard,
}

/// AI 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    /// 候选池大小
    pub pool_size: usize,
    pub capture_bonus_multiplier: i32,
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let pool_size = match difficulty {
            Difficulty::Easy => 6,
            Difficulty::Medium => 3,
            Difficulty::Hard => 1,
        };
        Self {
            difficulty,
            pool_size,
            capture_bonus_multiplier: CAPTURE_BONUS_MULTIPLIER,
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Medium)
    }
}

/// 为走子方的全部合法走法打分，按分数降序返回（同分保持生成顺序）
pub fn score_moves(board: &Board, color: Color) -> Vec<Move> {
    score_moves_with(board, color, CAPTURE_BONUS_MULTIPLIER)
}

fn score_moves_with(board: &Board, color: Color, capture_bonus_multiplier: i32) -> Vec<Move> {
    let mut scored: Vec<Move> = MoveGenerator::all_legal_moves(board, color)
        .into_iter()
        .map(|mv| {
            let next = board.apply_move(&mv, color);
            let mut score = Evaluator::evaluate(&next, color);
            if let Some(captured) = mv.captured {
                score += captured.value() * capture_bonus_multiplier;
            }
            Move {
                score: Some(score),
                ..mv
            }
        })
        .collect();

    scored.sort_by_key(|mv| std::cmp::Reverse(mv.score.unwrap_or(i32::MIN)));
    scored
}

fn pick(board: &Board, config: &AiConfig, color: Color, rng: &mut ChaCha8Rng) -> Option<Move> {
    let mut candidates = score_moves_with(board, color, config.capture_bonus_multiplier);
    if candidates.is_empty() {
        tracing::debug!("{} 没有合法走法", color);
        return None;
    }

    let pool = config.pool_size.clamp(1, candidates.len());
    let index = rng.gen_range(0..pool);

    tracing::debug!(
        "{} 共 {} 个候选，难度 {:?}，在前 {} 个中选第 {} 个",
        color,
        candidates.len(),
        config.difficulty,
        pool,
        index + 1
    );

    Some(candidates.swap_remove(index))
}

/// AI 引擎
///
/// 持有自己的随机数生成器，同一种子的选择结果可复现。
pub struct AiEngine {
    config: AiConfig,
    rng: ChaCha8Rng,
}

impl AiEngine {
    /// 使用固定种子创建
    pub fn with_seed(config: AiConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// 为走子方选择走法，没有合法走法时返回 None
    pub fn select_move(&mut self, board: &Board, color: Color) -> Option<Move> {
        pick(board, &self.config, color, &mut self.rng)
    }
}
