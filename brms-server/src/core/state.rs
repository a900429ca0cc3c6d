//! 服务器状态
//!
//! [`ServerState`] 持有所有内存存储的共享引用，克隆成本很低 (全部为 Arc)。

use chrono::Local;
use shared::models::RestaurantProfile;
use shared::util::now_millis;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;

use crate::core::Config;
use crate::core::tasks::{BackgroundTasks, TaskKind};
use crate::finance::Ledger;
use crate::kitchen::{KitchenEvent, KitchenStore};
use crate::orders::OrderBook;
use crate::seed;
use crate::utils::logger::{LOG_RETENTION_DAYS, cleanup_old_logs};

/// 日志清理周期
const LOG_CLEANUP_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// 服务器状态 - 所有 handler 共享
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 厨房看板
    pub kitchen: Arc<KitchenStore>,
    /// 财务账本
    pub ledger: Arc<Ledger>,
    /// 顾客订单
    pub orders: Arc<OrderBook>,
    /// 餐厅资料与菜单
    pub restaurant: Arc<RestaurantProfile>,
    /// 启动时间
    pub started_at: Instant,
    /// 实例 epoch，每次启动生成，客户端据此检测重启
    pub epoch: String,
    /// 全局 shutdown 信号 (后台任务与 SSE 连接共享)
    pub shutdown: CancellationToken,
}

impl ServerState {
    /// 手动构造 (测试常用)
    pub fn new(
        config: Config,
        kitchen: KitchenStore,
        ledger: Ledger,
        orders: OrderBook,
        restaurant: RestaurantProfile,
    ) -> Self {
        Self {
            config,
            kitchen: Arc::new(kitchen),
            ledger: Arc::new(ledger),
            orders: Arc::new(orders),
            restaurant: Arc::new(restaurant),
            started_at: Instant::now(),
            epoch: uuid::Uuid::new_v4().to_string(),
            shutdown: CancellationToken::new(),
        }
    }

    /// 按配置初始化：`seed_sample_data` 为 true 时加载示例数据
    pub fn initialize(config: &Config) -> Self {
        let state = if config.seed_sample_data {
            let now = now_millis();
            Self::new(
                config.clone(),
                seed::kitchen_store(now),
                seed::ledger(),
                seed::order_book(now),
                seed::restaurant_profile(),
            )
        } else {
            Self::new(
                config.clone(),
                KitchenStore::new(),
                Ledger::new(),
                OrderBook::default(),
                seed::restaurant_profile(),
            )
        };
        tracing::info!(
            epoch = %state.epoch,
            seeded = config.seed_sample_data,
            kitchen_orders = state.kitchen.orders().len(),
            "Server state initialized"
        );
        state
    }

    /// 运行时长 (秒)
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// 启动后台任务
    ///
    /// - `overdue_scanner`: 超时订单提醒 + 发票逾期刷新
    /// - `kitchen_event_logger`: 记录厨房事件
    /// - `log_cleanup`: 清理过期日志 (仅在配置 LOG_DIR 时)
    pub fn start_background_tasks(&self) -> BackgroundTasks {
        let mut tasks = BackgroundTasks::with_token(self.shutdown.clone());

        let kitchen = self.kitchen.clone();
        let ledger = self.ledger.clone();
        let token = tasks.shutdown_token();
        let period = Duration::from_secs(self.config.overdue_scan_interval_secs);
        tasks.spawn("overdue_scanner", TaskKind::Periodic, async move {
            let mut interval = tokio::time::interval(period);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        let alerts = kitchen.scan_overdue(now_millis());
                        let invoices = ledger.refresh_overdue(Local::now().date_naive());
                        if !alerts.is_empty() || invoices > 0 {
                            tracing::debug!(alerts = alerts.len(), invoices, "Overdue scan finished");
                        }
                    }
                }
            }
        });

        let mut rx = self.kitchen.subscribe();
        let token = tasks.shutdown_token();
        tasks.spawn("kitchen_event_logger", TaskKind::Listener, async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    event = rx.recv() => match event {
                        Ok(KitchenEvent::OrderUpdated(order)) => {
                            tracing::debug!(order_id = %order.id, status = %order.status, "Kitchen order updated");
                        }
                        Ok(event) => tracing::trace!(event = event.name(), "Kitchen event"),
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "Kitchen event logger lagged");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            }
        });

        if let Some(dir) = &self.config.log_dir {
            let dir = PathBuf::from(dir);
            let token = tasks.shutdown_token();
            tasks.spawn("log_cleanup", TaskKind::Periodic, async move {
                let mut interval = tokio::time::interval(LOG_CLEANUP_INTERVAL);
                loop {
                    tokio::select! {
                        _ = token.cancelled() => break,
                        _ = interval.tick() => {
                            if let Err(e) = cleanup_old_logs(&dir, LOG_RETENTION_DAYS, Local::now().date_naive()) {
                                tracing::warn!(error = %e, "Log cleanup failed");
                            }
                        }
                    }
                }
            });
        }

        tasks.log_summary();
        tasks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_overdue_scanner_runs_and_stops() {
        let mut config = Config::with_overrides(0, true);
        config.log_dir = None;
        let state = ServerState::initialize(&config);

        let tasks = state.start_background_tasks();
        assert_eq!(tasks.len(), 2);

        // first interval tick fires immediately
        tokio::time::sleep(Duration::from_millis(50)).await;
        let overdue_alerts = state
            .kitchen
            .notifications(false)
            .into_iter()
            .filter(|n| n.kind == shared::models::NotificationType::OrderOverdue)
            .count();
        assert_eq!(overdue_alerts, 1);

        tasks.shutdown().await;
        assert!(state.shutdown.is_cancelled());
    }
}
