//! 环境变量配置模块
//!
//! 此模块从 `MEMLOG_*` 环境变量读取配置，生成一次可合并的 [`ConfigUpdate`]。

use std::env;

use crate::config::{ConfigUpdate, Threshold};
use crate::error::{MemLogError, Result};

pub const ROOT_LOGGER_VAR: &str = "MEMLOG_ROOT_LOGGER";
pub const SHOW_TIME_VAR: &str = "MEMLOG_SHOW_TIME";
pub const REMOTE_LOGGING_PORT_VAR: &str = "MEMLOG_REMOTE_LOGGING_PORT";

/// 环境变量配置管理器
pub struct EnvConfig;

impl EnvConfig {
    fn var(name: &str) -> Option<String> {
        env::var(name).ok().filter(|s| !s.trim().is_empty())
    }

    /// 从环境变量读取根级别
    pub fn get_root_logger() -> Option<Threshold> {
        Self::var(ROOT_LOGGER_VAR).map(|value| Threshold::parse(value.trim()))
    }

    /// 从环境变量读取是否显示时间
    pub fn get_show_time() -> Result<Option<bool>> {
        match Self::var(SHOW_TIME_VAR) {
            None => Ok(None),
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(Some(true)),
                "false" | "0" | "no" | "off" => Ok(Some(false)),
                _ => Err(MemLogError::ConfigError(format!(
                    "{} 不是有效的布尔值: {}",
                    SHOW_TIME_VAR, value
                ))),
            },
        }
    }

    /// 从环境变量读取远程日志端口
    pub fn get_remote_logging_port() -> Result<Option<u16>> {
        match Self::var(REMOTE_LOGGING_PORT_VAR) {
            None => Ok(None),
            Some(value) => value.trim().parse::<u16>().map(Some).map_err(|e| {
                MemLogError::ConfigError(format!(
                    "{} 不是有效的端口: {} ({})",
                    REMOTE_LOGGING_PORT_VAR, value, e
                ))
            }),
        }
    }

    /// 汇总所有环境变量为一次配置更新
    pub fn load() -> Result<ConfigUpdate> {
        let mut update = ConfigUpdate::new();
        update.root_logger = Self::get_root_logger();
        update.show_time = Self::get_show_time()?;
        update.remote_logging_port = Self::get_remote_logging_port()?;
        Ok(update)
    }
}
