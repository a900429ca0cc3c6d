/// 服务配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖（启动时先加载 `.env`）：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_HOST | 0.0.0.0 | 监听地址 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 默认日志级别 (RUST_LOG 优先) |
/// | LOG_JSON | 生产环境 true | JSON 日志 |
/// | LOG_DIR | (无) | 按天滚动的日志目录 |
/// | SEED_SAMPLE_DATA | true | 启动时加载示例数据 |
/// | OVERDUE_SCAN_INTERVAL_SECS | 30 | 超时订单扫描周期 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | CURRENCY_CODE | RWF | 货币前缀 |
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 SEED_SAMPLE_DATA=false cargo run -p brms-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 监听地址
    pub http_host: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | production
    pub environment: String,
    /// 默认日志级别
    pub log_level: String,
    /// 是否输出 JSON 日志
    pub log_json: bool,
    /// 日志目录 (None = 仅控制台)
    pub log_dir: Option<String>,
    /// 启动时加载示例数据
    pub seed_sample_data: bool,
    /// 超时订单扫描周期 (秒)
    pub overdue_scan_interval_secs: u64,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 货币前缀
    pub currency_code: String,
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let is_production = environment == "production";

        Self {
            http_host: std::env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            http_port: env_parse("HTTP_PORT").unwrap_or(3000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: env_parse("LOG_JSON").unwrap_or(is_production),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            seed_sample_data: env_parse("SEED_SAMPLE_DATA").unwrap_or(true),
            overdue_scan_interval_secs: env_parse("OVERDUE_SCAN_INTERVAL_SECS")
                .filter(|s: &u64| *s > 0)
                .unwrap_or(30),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS").unwrap_or(30000),
            currency_code: std::env::var("CURRENCY_CODE").unwrap_or_else(|_| "RWF".into()),
            environment,
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(http_port: u16, seed_sample_data: bool) -> Self {
        let mut config = Self::from_env();
        config.http_port = http_port;
        config.seed_sample_data = seed_sample_data;
        config
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_overrides() {
        let config = Config::with_overrides(4321, false);
        assert_eq!(config.http_port, 4321);
        assert!(!config.seed_sample_data);
        assert!(config.overdue_scan_interval_secs > 0);
        assert!(config.bind_addr().ends_with(":4321"));
    }
}
