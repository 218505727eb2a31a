//! 对局会话
//!
//! 会话持有棋盘、走子方、已提交的走法记录和对局状态。
//! 每次只提交一步经过验证的合法走法；悔棋不做增量回退，而是从起始局面重放历史前缀。

use serde::{Deserialize, Serialize};

use crate::board::BoardState;
use crate::error::ChessError;
use crate::moves::{GameStatus, Move, MoveGenerator};
use crate::notation::Notation;
use crate::piece::{Color, Position};

/// 从初始局面依次重放走法，得到棋盘和走子方
pub fn replay(history: &[Move]) -> BoardState {
    replay_from(&BoardState::initial(), history)
}

/// 从指定局面依次重放走法
pub fn replay_from(start: &BoardState, history: &[Move]) -> BoardState {
    let mut state = start.clone();
    for mv in history {
        state.apply(mv);
    }
    state
}

/// 对局会话
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    /// 起始局面（重放的起点）
    initial: BoardState,
    /// 当前局面
    state: BoardState,
    /// 已提交的走法
    history: Vec<Move>,
    /// 对局状态
    status: GameStatus,
}

impl GameSession {
    /// 以标准初始局面开始新对局
    pub fn new() -> Self {
        Self::from_position(BoardState::initial())
    }

    /// 从指定局面开始对局
    pub fn from_position(state: BoardState) -> Self {
        let status = MoveGenerator::status(&state.board, state.to_move);
        Self {
            initial: state.clone(),
            state,
            history: Vec::new(),
            status,
        }
    }

    /// 当前局面
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// 当前走子方
    pub fn to_move(&self) -> Color {
        self.state.to_move
    }

    /// 已提交的走法
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// 最后一步走法
    pub fn last_move(&self) -> Option<&Move> {
        self.history.last()
    }

    /// 对局状态
    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Playing
    }

    /// 走子方在指定位置的棋子的合法走法（不是走子方的棋子返回空）
    pub fn legal_moves_at(&self, pos: Position) -> Vec<Move> {
        match self.state.board.get(pos) {
            Some(piece) if piece.color == self.state.to_move && !self.is_over() => {
                MoveGenerator::legal_moves(&self.state.board, pos)
            }
            _ => Vec::new(),
        }
    }

    /// 按起止位置走一步
    pub fn play(&mut self, from: Position, to: Position) -> Result<Move, ChessError> {
        self.commit_squares(from, to, None)
    }

    /// 提交一步走法（如 AI 选出的走法），保留其评估分数
    pub fn commit(&mut self, requested: Move) -> Result<Move, ChessError> {
        self.commit_squares(requested.from, requested.to, requested.score)
    }

    /// 只按起止位置匹配合法走法集合，实际提交的是生成器产生的走法，并在提交时生成记谱
    fn commit_squares(
        &mut self,
        from: Position,
        to: Position,
        score: Option<i32>,
    ) -> Result<Move, ChessError> {
        if self.is_over() {
            return Err(ChessError::GameOver);
        }

        let piece = self
            .state
            .board
            .get(from)
            .ok_or(ChessError::NoPiece { pos: from })?;
        if piece.color != self.state.to_move {
            return Err(ChessError::NotYourTurn);
        }

        let legal = MoveGenerator::legal_moves(&self.state.board, from)
            .into_iter()
            .find(|m| m.same_squares(from, to))
            .ok_or(ChessError::IllegalMove { from, to })?;

        let committed = Move {
            score,
            notation: Some(Notation::describe(&legal)),
            ..legal
        };

        let mover = self.state.to_move;
        self.state.apply(&committed);
        self.history.push(committed.clone());
        self.status = MoveGenerator::status(&self.state.board, self.state.to_move);

        tracing::debug!(
            "{} 走棋: {}，状态: {:?}",
            mover,
            committed.notation.as_deref().unwrap_or_default(),
            self.status
        );

        Ok(committed)
    }

    /// 悔棋：撤销最后 `plies` 步（不足时撤销全部），返回实际撤销的步数
    pub fn undo(&mut self, plies: usize) -> Result<usize, ChessError> {
        if self.history.is_empty() {
            return Err(ChessError::NothingToUndo);
        }

        let steps = plies.min(self.history.len());
        self.history.truncate(self.history.len() - steps);
        self.state = replay_from(&self.initial, &self.history);
        self.status = MoveGenerator::status(&self.state.board, self.state.to_move);

        tracing::debug!("悔棋 {} 步，剩余 {} 步", steps, self.history.len());

        Ok(steps)
    }

    /// 走子方无棋可走时结束对局
    pub fn declare_no_moves(&mut self) {
        self.status = GameStatus::Checkmate;
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
