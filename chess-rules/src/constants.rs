//! 规则常量定义

/// 棋盘边长（行数与列数）
pub const BOARD_SIZE: usize = 8;

/// 棋盘格子总数
pub const SQUARE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// 王翼车所在列
pub const KINGSIDE_ROOK_COL: u8 = 7;

/// 后翼车所在列
pub const QUEENSIDE_ROOK_COL: u8 = 0;

/// 王的初始列
pub const KING_HOME_COL: u8 = 4;

/// 王车易位后王所在列（王翼 / 后翼）
pub const KINGSIDE_KING_TARGET_COL: u8 = 6;
pub const QUEENSIDE_KING_TARGET_COL: u8 = 2;

/// 王车易位后车所在列（王翼 / 后翼）
pub const KINGSIDE_ROOK_TARGET_COL: u8 = 5;
pub const QUEENSIDE_ROOK_TARGET_COL: u8 = 3;

/// 列名（第 0 列为 A）
pub const FILES: [char; BOARD_SIZE] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];
