//! 对局控制错误

use chess_rules::ChessError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    /// 规则层拒绝
    #[error(transparent)]
    Chess(#[from] ChessError),

    /// AI 正在思考，拒绝玩家操作
    #[error("Bot is thinking")]
    BotThinking,

    /// 人机模式下轮到 AI 走棋
    #[error("Not the player's turn")]
    NotPlayerTurn,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
