//! 应用运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_access_ttl_seconds: u64,
    /// 单次修改请求的处理期限（毫秒），到期取消后续单元。
    pub edit_timeout_ms: u64,
    pub access_code_min_length: usize,
    pub access_code_max_length: usize,
    /// 关闭时使用空指挥中心（仅记录日志）。
    pub command_center_enabled: bool,
    pub mqtt_host: String,
    pub mqtt_port: u16,
    pub mqtt_username: Option<String>,
    pub mqtt_password: Option<String>,
    pub command_topic_prefix: String,
    pub command_qos: u8,
    pub command_dispatch_max_retries: u64,
    pub command_dispatch_backoff_ms: u64,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("GATE_DATABASE_URL")
            .map_err(|_| ConfigError::Missing("GATE_DATABASE_URL".to_string()))?;
        let jwt_secret = env::var("GATE_JWT_SECRET")
            .map_err(|_| ConfigError::Missing("GATE_JWT_SECRET".to_string()))?;
        let jwt_access_ttl_seconds = read_u64("GATE_JWT_ACCESS_TTL_SECONDS")?;
        let http_addr =
            env::var("GATE_HTTP_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let edit_timeout_ms = read_u64_with_default("GATE_EDIT_TIMEOUT_MS", 10_000)?;
        let access_code_min_length = read_usize_with_default("GATE_ACCESS_CODE_MIN_LENGTH", 4)?;
        let access_code_max_length = read_usize_with_default("GATE_ACCESS_CODE_MAX_LENGTH", 12)?;
        if access_code_min_length == 0 || access_code_min_length > access_code_max_length {
            return Err(ConfigError::Invalid(
                "GATE_ACCESS_CODE_MIN_LENGTH".to_string(),
                access_code_min_length.to_string(),
            ));
        }
        let command_center_enabled = read_bool_with_default("GATE_COMMAND_CENTER", false);
        let mqtt_host = env::var("GATE_MQTT_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let mqtt_port = read_u16_with_default("GATE_MQTT_PORT", 1883)?;
        let mqtt_username = read_optional("GATE_MQTT_USERNAME");
        let mqtt_password = read_optional("GATE_MQTT_PASSWORD");
        let command_topic_prefix = env::var("GATE_COMMAND_TOPIC_PREFIX")
            .unwrap_or_else(|_| "gate/commands".to_string());
        let command_qos = read_u8_with_default("GATE_COMMAND_QOS", 1)?;
        let command_dispatch_max_retries =
            read_u64_with_default("GATE_COMMAND_DISPATCH_MAX_RETRIES", 2)?;
        let command_dispatch_backoff_ms =
            read_u64_with_default("GATE_COMMAND_DISPATCH_BACKOFF_MS", 200)?;

        Ok(Self {
            http_addr,
            database_url,
            jwt_secret,
            jwt_access_ttl_seconds,
            edit_timeout_ms,
            access_code_min_length,
            access_code_max_length,
            command_center_enabled,
            mqtt_host,
            mqtt_port,
            mqtt_username,
            mqtt_password,
            command_topic_prefix,
            command_qos,
            command_dispatch_max_retries,
            command_dispatch_backoff_ms,
        })
    }
}

/// 读取 u64 类型环境变量。
fn read_u64(key: &str) -> Result<u64, ConfigError> {
    let value = env::var(key).map_err(|_| ConfigError::Missing(key.to_string()))?;
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_u16_with_default(key: &str, default: u16) -> Result<u16, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u16>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_u8_with_default(key: &str, default: u8) -> Result<u8, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u8>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_usize_with_default(key: &str, default: usize) -> Result<usize, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<usize>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn read_bool_with_default(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "on"),
        Err(_) => default,
    }
}
