//! FEN 格式解析和生成
//!
//! 支持的格式：`<棋盘> [走子方] [易位权]`
//!
//! 示例：
//! `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq`
//!
//! 棋盘部分从第 0 行（黑方底线）写到第 7 行。不写易位权时所有棋子视为未走过；
//! 写了易位权（`-` 表示都没有）时，只有拥有对应易位权且在原位的王和车视为未走过。
//! 不在原位的王和车总是视为已走过。

use crate::board::{Board, BoardState};
use crate::constants::{BOARD_SIZE, KING_HOME_COL, KINGSIDE_ROOK_COL, QUEENSIDE_ROOK_COL};
use crate::error::ChessError;
use crate::piece::{Color, PieceKind, Position};

/// 初始局面 FEN
pub const INITIAL_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq";

/// 易位权字符及其对应的阵营和车所在列
const CASTLING_RIGHTS: [(char, Color, u8); 4] = [
    ('K', Color::White, KINGSIDE_ROOK_COL),
    ('Q', Color::White, QUEENSIDE_ROOK_COL),
    ('k', Color::Black, KINGSIDE_ROOK_COL),
    ('q', Color::Black, QUEENSIDE_ROOK_COL),
];

/// FEN 格式处理
pub struct Fen;

impl Fen {
    /// 解析 FEN 字符串为棋盘状态
    pub fn parse(fen: &str) -> Result<BoardState, ChessError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.is_empty() {
            return Err(ChessError::InvalidFen {
                reason: "Empty FEN string".to_string(),
            });
        }

        let mut board = Self::parse_board(parts[0])?;

        // 解析走子方（默认白方）
        let to_move = match parts.get(1) {
            Some(side) => {
                let mut chars = side.chars();
                match (chars.next().and_then(Color::from_fen_char), chars.next()) {
                    (Some(color), None) => color,
                    _ => {
                        return Err(ChessError::InvalidFen {
                            reason: format!("Invalid side to move: {}", side),
                        })
                    }
                }
            }
            None => Color::White,
        };

        Self::apply_castling_rights(&mut board, parts.get(2).copied())?;

        Ok(BoardState::from_board(board, to_move))
    }

    /// 解析棋盘部分
    fn parse_board(board_str: &str) -> Result<Board, ChessError> {
        let mut board = Board::empty();
        let rows: Vec<&str> = board_str.split('/').collect();

        if rows.len() != BOARD_SIZE {
            return Err(ChessError::InvalidFen {
                reason: format!("Expected {} rows, got {}", BOARD_SIZE, rows.len()),
            });
        }

        for (row_idx, row) in rows.iter().enumerate() {
            let mut col = 0usize;

            for c in row.chars() {
                if col >= BOARD_SIZE {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Row {} has too many columns", row_idx),
                    });
                }

                if let Some(empty_count) = c.to_digit(10) {
                    col += empty_count as usize;
                } else if let Some((kind, color)) = PieceKind::from_fen_char(c) {
                    board.place(Position::new_unchecked(row_idx as u8, col as u8), kind, color);
                    col += 1;
                } else {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Invalid piece character: {}", c),
                    });
                }
            }

            if col != BOARD_SIZE {
                return Err(ChessError::InvalidFen {
                    reason: format!("Row {} has {} columns, expected {}", row_idx, col, BOARD_SIZE),
                });
            }
        }

        Ok(board)
    }

    /// 根据易位权设置王和车的 has_moved
    fn apply_castling_rights(board: &mut Board, field: Option<&str>) -> Result<(), ChessError> {
        let rights: Vec<char> = match field {
            None => CASTLING_RIGHTS.iter().map(|(c, _, _)| *c).collect(),
            Some("-") => Vec::new(),
            Some(text) => {
                if let Some(bad) = text
                    .chars()
                    .find(|c| !CASTLING_RIGHTS.iter().any(|(r, _, _)| r == c))
                {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Invalid castling right: {}", bad),
                    });
                }
                text.chars().collect()
            }
        };

        for (pos, mut piece) in board.all_pieces() {
            let unmoved = match piece.kind {
                PieceKind::King => {
                    pos == Position::new_unchecked(piece.color.back_row(), KING_HOME_COL)
                        && CASTLING_RIGHTS
                            .iter()
                            .any(|(c, color, _)| *color == piece.color && rights.contains(c))
                }
                PieceKind::Rook => CASTLING_RIGHTS.iter().any(|(c, color, col)| {
                    *color == piece.color
                        && pos == Position::new_unchecked(color.back_row(), *col)
                        && rights.contains(c)
                }),
                _ => continue,
            };
            piece.has_moved = !unmoved;
            board.set(pos, Some(piece));
        }

        Ok(())
    }

    /// 将棋盘状态转换为 FEN 字符串
    pub fn to_string(state: &BoardState) -> String {
        format!(
            "{} {} {}",
            Self::board_to_string(&state.board),
            state.to_move.to_fen_char(),
            Self::castling_to_string(&state.board)
        )
    }

    /// 将棋盘转换为 FEN 棋盘部分
    pub fn board_to_string(board: &Board) -> String {
        let mut rows = Vec::with_capacity(BOARD_SIZE);

        for row in 0..BOARD_SIZE as u8 {
            let mut text = String::new();
            let mut empty_count = 0;

            for col in 0..BOARD_SIZE as u8 {
                if let Some(piece) = board.get(Position::new_unchecked(row, col)) {
                    if empty_count > 0 {
                        text.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    text.push(piece.to_fen_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                text.push_str(&empty_count.to_string());
            }

            rows.push(text);
        }

        rows.join("/")
    }

    /// 根据未走过的王和车生成易位权
    fn castling_to_string(board: &Board) -> String {
        let unmoved = |pos: Position, kind: PieceKind, color: Color| {
            board
                .get(pos)
                .is_some_and(|p| p.is(kind, color) && !p.has_moved)
        };

        let rights: String = CASTLING_RIGHTS
            .iter()
            .filter(|(_, color, col)| {
                let row = color.back_row();
                unmoved(Position::new_unchecked(row, KING_HOME_COL), PieceKind::King, *color)
                    && unmoved(Position::new_unchecked(row, *col), PieceKind::Rook, *color)
            })
            .map(|(c, _, _)| *c)
            .collect();

        if rights.is_empty() {
            "-".to_string()
        } else {
            rights
        }
    }

    /// 解析初始局面
    pub fn initial() -> BoardState {
        Self::parse(INITIAL_FEN).expect("Initial FEN should be valid")
    }
}
