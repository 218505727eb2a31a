//! 走法生成和验证
//!
//! 分三层：
//! - `raw_moves`：单个棋子的伪合法走法，不考虑将军
//! - `is_in_check`：基于禁用易位的伪合法走法判断王是否受攻击
//! - `legal_moves`：模拟走子后过滤掉使己方王受攻击的走法
//!
//! 易位生成只在 `allow_castling` 时调用一次 `is_in_check`，
//! 而 `is_in_check` 总是禁用易位，因此递归最多一层。

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::{
    KINGSIDE_KING_TARGET_COL, KINGSIDE_ROOK_COL, KINGSIDE_ROOK_TARGET_COL,
    QUEENSIDE_KING_TARGET_COL, QUEENSIDE_ROOK_COL, QUEENSIDE_ROOK_TARGET_COL,
};
use crate::piece::{Color, Piece, PieceKind, Position};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
];

const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// 王车易位中车的移动
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Castle {
    pub rook_from: Position,
    pub rook_to: Position,
}

/// 走法
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始位置
    pub from: Position,
    /// 目标位置
    pub to: Position,
    /// 走子的棋子类型
    pub piece_kind: PieceKind,
    /// 被吃的棋子（如果有）
    pub captured: Option<Piece>,
    /// 王车易位时车的移动
    pub castle: Option<Castle>,
    /// AI 评估分数
    pub score: Option<i32>,
    /// 记谱（提交时生成）
    pub notation: Option<String>,
}

impl Move {
    /// 创建新走法
    pub fn new(from: Position, to: Position, piece_kind: PieceKind) -> Self {
        Self {
            from,
            to,
            piece_kind,
            captured: None,
            castle: None,
            score: None,
            notation: None,
        }
    }

    /// 创建带吃子的走法
    pub fn with_capture(from: Position, to: Position, piece_kind: PieceKind, captured: Piece) -> Self {
        Self {
            captured: Some(captured),
            ..Self::new(from, to, piece_kind)
        }
    }

    /// 创建王车易位走法
    pub fn castling(from: Position, to: Position, rook_from: Position, rook_to: Position) -> Self {
        Self {
            castle: Some(Castle { rook_from, rook_to }),
            ..Self::new(from, to, PieceKind::King)
        }
    }

    /// 是否为王车易位
    pub fn is_castling(&self) -> bool {
        self.castle.is_some()
    }

    /// 起止位置是否相同
    pub fn same_squares(&self, from: Position, to: Position) -> bool {
        self.from == from && self.to == to
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// 对局状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    /// 走子方无合法走法（无论是否被将军）
    Checkmate,
    /// 目前的判定流程不会产生和棋
    Draw,
}

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成单个棋子的伪合法走法（不考虑将军）
    ///
    /// 出界的目标格直接丢弃。`allow_castling` 为真且王未走过、当前未被将军时，
    /// 额外生成王车易位走法。
    pub fn raw_moves(
        board: &Board,
        pos: Position,
        kind: PieceKind,
        color: Color,
        has_moved: bool,
        allow_castling: bool,
    ) -> Vec<Move> {
        let mut moves = Vec::with_capacity(32);

        match kind {
            PieceKind::Pawn => Self::generate_pawn_moves(board, pos, color, &mut moves),
            PieceKind::Knight => {
                Self::generate_step_moves(board, pos, kind, color, &KNIGHT_OFFSETS, &mut moves)
            }
            PieceKind::Bishop => {
                Self::generate_slide_moves(board, pos, kind, color, &DIAGONAL, &mut moves)
            }
            PieceKind::Rook => {
                Self::generate_slide_moves(board, pos, kind, color, &ORTHOGONAL, &mut moves)
            }
            PieceKind::Queen => {
                Self::generate_slide_moves(board, pos, kind, color, &ALL_DIRECTIONS, &mut moves)
            }
            PieceKind::King => {
                Self::generate_step_moves(board, pos, kind, color, &ALL_DIRECTIONS, &mut moves);
                if allow_castling && !has_moved && !Self::is_in_check(board, color) {
                    Self::generate_castling_moves(board, pos, color, &mut moves);
                }
            }
        }

        moves
    }

    /// 生成兵的走法
    fn generate_pawn_moves(board: &Board, pos: Position, color: Color, moves: &mut Vec<Move>) {
        let forward = color.forward();

        // 前进一格，起始行且两格皆空时可前进两格
        if let Some(one) = pos.offset(forward, 0) {
            if board.get(one).is_none() {
                moves.push(Move::new(pos, one, PieceKind::Pawn));

                if pos.row == color.pawn_start_row() {
                    if let Some(two) = pos.offset(forward * 2, 0) {
                        if board.get(two).is_none() {
                            moves.push(Move::new(pos, two, PieceKind::Pawn));
                        }
                    }
                }
            }
        }

        // 斜前方只能吃子
        for dc in [-1i8, 1i8] {
            if let Some(to) = pos.offset(forward, dc) {
                if let Some(target) = board.get(to) {
                    if target.color != color {
                        moves.push(Move::with_capture(pos, to, PieceKind::Pawn, target));
                    }
                }
            }
        }
    }

    /// 生成固定偏移的走法（马、王）
    fn generate_step_moves(
        board: &Board,
        pos: Position,
        kind: PieceKind,
        color: Color,
        offsets: &[(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for &(dr, dc) in offsets {
            if let Some(to) = pos.offset(dr, dc) {
                Self::try_add_move(board, pos, to, kind, color, moves);
            }
        }
    }

    /// 生成滑行走法（象、车、后）
    fn generate_slide_moves(
        board: &Board,
        pos: Position,
        kind: PieceKind,
        color: Color,
        directions: &[(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for &(dr, dc) in directions {
            let mut current = pos;
            while let Some(to) = current.offset(dr, dc) {
                if let Some(target) = board.get(to) {
                    // 遇到敌子可以吃，遇到己方棋子停下
                    if target.color != color {
                        moves.push(Move::with_capture(pos, to, kind, target));
                    }
                    break;
                }
                moves.push(Move::new(pos, to, kind));
                current = to;
            }
        }
    }

    /// 生成王车易位走法（调用方已确认王未走过且未被将军）
    fn generate_castling_moves(board: &Board, pos: Position, color: Color, moves: &mut Vec<Move>) {
        let sides = [
            (KINGSIDE_ROOK_COL, KINGSIDE_KING_TARGET_COL, KINGSIDE_ROOK_TARGET_COL),
            (QUEENSIDE_ROOK_COL, QUEENSIDE_KING_TARGET_COL, QUEENSIDE_ROOK_TARGET_COL),
        ];

        for (rook_col, king_col, rook_target_col) in sides {
            let rook_from = Position::new_unchecked(pos.row, rook_col);
            let rook_ready = board
                .get(rook_from)
                .is_some_and(|rook| rook.is(PieceKind::Rook, color) && !rook.has_moved);

            if rook_ready && Self::is_path_clear(board, pos, rook_from) {
                moves.push(Move::castling(
                    pos,
                    Position::new_unchecked(pos.row, king_col),
                    rook_from,
                    Position::new_unchecked(pos.row, rook_target_col),
                ));
            }
        }
    }

    /// 同一行上两格之间（不含两端）是否全空
    fn is_path_clear(board: &Board, from: Position, to: Position) -> bool {
        let (low, high) = if from.col < to.col {
            (from.col, to.col)
        } else {
            (to.col, from.col)
        };
        ((low + 1)..high).all(|col| board.get(Position::new_unchecked(from.row, col)).is_none())
    }

    /// 尝试添加走法（目标为空或敌子时添加）
    fn try_add_move(
        board: &Board,
        from: Position,
        to: Position,
        kind: PieceKind,
        color: Color,
        moves: &mut Vec<Move>,
    ) {
        match board.get(to) {
            Some(target) if target.color != color => {
                moves.push(Move::with_capture(from, to, kind, target));
            }
            Some(_) => {}
            None => moves.push(Move::new(from, to, kind)),
        }
    }

    /// 检查指定阵营是否被将军
    ///
    /// 找不到王时视为被将军。
    pub fn is_in_check(board: &Board, color: Color) -> bool {
        let king_pos = match board.find_king(color) {
            Some(pos) => pos,
            None => return true,
        };

        let opponent = color.opponent();
        board.pieces(opponent).into_iter().any(|(pos, piece)| {
            Self::raw_moves(board, pos, piece.kind, opponent, piece.has_moved, false)
                .iter()
                .any(|mv| mv.to == king_pos)
        })
    }

    /// 生成指定位置棋子的合法走法
    pub fn legal_moves(board: &Board, pos: Position) -> Vec<Move> {
        let piece = match board.get(pos) {
            Some(piece) => piece,
            None => return Vec::new(),
        };

        Self::raw_moves(board, pos, piece.kind, piece.color, piece.has_moved, true)
            .into_iter()
            .filter(|mv| Self::keeps_king_safe(board, mv, piece.color))
            .collect()
    }

    /// 生成指定阵营所有棋子的合法走法
    pub fn all_legal_moves(board: &Board, color: Color) -> Vec<Move> {
        board
            .pieces(color)
            .into_iter()
            .flat_map(|(pos, _)| Self::legal_moves(board, pos))
            .collect()
    }

    /// 模拟走法后己方王是否安全
    fn keeps_king_safe(board: &Board, mv: &Move, color: Color) -> bool {
        let mut after = board.clone();
        after.move_piece(mv.from, mv.to);

        if let Some(castle) = mv.castle {
            after.move_piece(castle.rook_from, castle.rook_to);
            if Self::is_in_check(&after, color) {
                return false;
            }

            // 王经过的中间格也不能受攻击
            let mid = Position::new_unchecked(mv.from.row, (mv.from.col + mv.to.col) / 2);
            let mut midway = board.clone();
            midway.move_piece(mv.from, mid);
            return !Self::is_in_check(&midway, color);
        }

        !Self::is_in_check(&after, color)
    }

    /// 判定对局状态
    ///
    /// 走子方任意棋子有合法走法即为进行中，否则为将死（不区分逼和）。
    pub fn status(board: &Board, to_move: Color) -> GameStatus {
        let has_move = board
            .pieces(to_move)
            .into_iter()
            .any(|(pos, _)| !Self::legal_moves(board, pos).is_empty());

        if has_move {
            GameStatus::Playing
        } else {
            GameStatus::Checkmate
        }
    }
}
