//! 错误类型定义

use thiserror::Error;

use crate::piece::Position;

/// 国际象棋规则错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChessError {
    /// 无效的坐标文本（如 "e9"）
    #[error("Invalid square: {text}")]
    InvalidSquare { text: String },

    /// 无效的走法
    #[error("Illegal move: from {from} to {to}")]
    IllegalMove { from: Position, to: Position },

    /// 没有棋子
    #[error("No piece at position {pos}")]
    NoPiece { pos: Position },

    /// 不是该方的回合
    #[error("Not your turn")]
    NotYourTurn,

    /// 无效的 FEN 字符串
    #[error("Invalid FEN string: {reason}")]
    InvalidFen { reason: String },

    /// 没有可悔的棋
    #[error("Nothing to undo")]
    NothingToUndo,

    /// 游戏已结束
    #[error("Game is already over")]
    GameOver,
}
