//! 国际象棋规则库
//!
//! 包含:
//! - 棋子、棋盘、位置等核心数据结构
//! - 伪合法走法生成、将军检测和合法走法过滤
//! - 走法执行（王车易位、兵升变）与对局状态判定
//! - 对局会话与基于重放的悔棋
//! - 记谱与 FEN 格式

mod board;
mod constants;
mod error;
mod fen;
mod moves;
mod notation;
mod piece;
mod session;

pub use board::{Board, BoardState};
pub use constants::*;
pub use error::ChessError;
pub use fen::{Fen, INITIAL_FEN};
pub use moves::{Castle, GameStatus, Move, MoveGenerator};
pub use notation::Notation;
pub use piece::{Color, Piece, PieceKind, Position};
pub use session::{replay, replay_from, GameSession};
