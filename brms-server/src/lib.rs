//! BRMS Server - 餐厅管理系统后台服务
//!
//! # 架构概述
//!
//! 所有数据保存在内存中，由 [`ServerState`] 通过 `Arc` 共享给 axum handler：
//!
//! - **厨房看板** (`kitchen`): 订单生命周期、通知、员工与档口、变更推送
//! - **财务账本** (`finance`): 收支记录、发票、税务
//! - **顾客订单** (`orders`): 搜索、状态管理、历史
//! - **结算** (`shared::checkout`): 购物车合计与 RWF 格式化
//!
//! # 模块结构
//!
//! ```text
//! brms-server/src/
//! ├── core/          # 配置、状态、错误、后台任务
//! ├── api/           # HTTP 路由和处理器
//! ├── kitchen/       # 厨房看板存储
//! ├── finance/       # 账本存储
//! ├── orders/        # 顾客订单存储
//! ├── seed.rs        # 示例数据
//! └── utils/         # 日志、校验
//! ```

pub mod api;
pub mod core;
pub mod finance;
pub mod kitchen;
pub mod orders;
pub mod seed;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState, build_router};
pub use finance::Ledger;
pub use kitchen::{KitchenEvent, KitchenStore};
pub use orders::OrderBook;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// 加载 `.env` 并按配置初始化日志
pub fn setup_environment() -> anyhow::Result<Config> {
    // .env 不存在时忽略
    let _ = dotenv::dotenv();
    let config = Config::from_env();
    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
    ____  ____  __  ________
   / __ )/ __ \/  |/  / ___/
  / __  / /_/ / /|_/ /\__ \
 / /_/ / _, _/ /  / /___/ /
/_____/_/ |_/_/  /_//____/
    "#
    );
}
