//! 国际象棋对局
//!
//! 包含:
//! - 对局配置（JSON 文件）
//! - 对局控制器：玩家走棋、AI 回合、悔棋、新对局
//! - 命令行输入解析

pub mod command;
pub mod config;
pub mod controller;
pub mod error;

pub use command::Command;
pub use config::{GameConfig, GameMode};
pub use controller::{BotSearch, BotTurn, GameController, SearchOutcome};
pub use error::GameError;
