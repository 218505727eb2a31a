//! 国际象棋 AI
//!
//! 包含:
//! - 局面评估函数（子力 + 位置分）
//! - 一层贪心走法选择，按难度在前 K 个候选中随机

mod evaluate;
mod search;

pub use evaluate::Evaluator;
pub use search::{score_moves, AiConfig, AiEngine, Difficulty};
