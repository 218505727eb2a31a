//! 对局配置
//!
//! JSON 格式，默认保存在用户配置目录下 `western-chess/config.json`。

use std::path::{Path, PathBuf};
use std::time::Duration;

use chess_ai::{AiConfig, Difficulty};
use chess_rules::Color;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// 对局模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// 双人对弈
    #[default]
    Pvp,
    /// 人机对弈
    Bot,
}

/// 对局配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: GameMode,
    /// AI 难度
    pub difficulty: Difficulty,
    /// 玩家执棋方（人机模式）
    pub player_color: Color,
    /// AI 思考延迟（毫秒）
    pub bot_delay_ms: u64,
    /// AI 随机种子，None 时每局随机
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Pvp,
            difficulty: Difficulty::Medium,
            player_color: Color::White,
            bot_delay_ms: 600,
            seed: None,
        }
    }
}

impl GameConfig {
    /// 默认配置文件路径
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("western-chess");
            path.push("config.json");
            path
        })
    }

    /// 从默认路径加载，无法获取配置目录时使用默认配置
    pub fn load() -> Result<Self, GameError> {
        let Some(path) = Self::default_path() else {
            tracing::warn!("无法获取配置目录，使用默认配置");
            return Ok(Self::default());
        };
        Self::load_from(&path)
    }

    /// 从指定文件加载，文件不存在时使用默认配置
    pub fn load_from(path: &Path) -> Result<Self, GameError> {
        if !path.exists() {
            tracing::info!("配置文件不存在，使用默认配置: {:?}", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        tracing::info!("已加载配置: {:?}", path);
        Ok(config)
    }

    /// 保存到指定文件
    pub fn save_to(&self, path: &Path) -> Result<(), GameError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::info!("配置已保存: {:?}", path);
        Ok(())
    }

    /// AI 方阵营（双人模式为 None）
    pub fn bot_color(&self) -> Option<Color> {
        match self.mode {
            GameMode::Bot => Some(self.player_color.opponent()),
            GameMode::Pvp => None,
        }
    }

    pub fn bot_delay(&self) -> Duration {
        Duration::from_millis(self.bot_delay_ms)
    }

    pub fn ai_config(&self) -> AiConfig {
        AiConfig::from_difficulty(self.difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.mode, GameMode::Pvp);
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.player_color, Color::White);
        assert_eq!(config.bot_color(), None);
        assert_eq!(config.bot_delay(), Duration::from_millis(600));
        assert_eq!(config.ai_config().pool_size, 3);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = GameConfig {
            mode: GameMode::Bot,
            difficulty: Difficulty::Hard,
            player_color: Color::Black,
            bot_delay_ms: 0,
            seed: Some(9),
        };
        config.save_to(&path).unwrap();

        let loaded = GameConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.bot_color(), Some(Color::White));
    }

    #[test]
    fn test_partial_file_uses_field_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "mode": "Bot", "difficulty": "Easy", "player_color": "Black" }"#).unwrap();

        let config = GameConfig::load_from(&path).unwrap();
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.bot_color(), Some(Color::White));
        assert_eq!(config.bot_delay_ms, 600);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            GameConfig::load_from(&path),
            Err(GameError::Json(_))
        ));
    }
}
