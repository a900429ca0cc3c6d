//! 后台任务管理
//!
//! 逾期扫描、看板事件日志和日志清理都在这里注册，与 HTTP 服务共用同一个
//! shutdown 令牌。

use futures::FutureExt;
use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// 任务类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Reacts to kitchen board events
    Listener,
    /// Runs on an interval
    Periodic,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TaskKind::Listener => "listener",
            TaskKind::Periodic => "periodic",
        })
    }
}

struct RegisteredTask {
    name: &'static str,
    handle: JoinHandle<()>,
    kind: TaskKind,
}

/// Background jobs of one server instance
///
/// ```ignore
/// let mut tasks = BackgroundTasks::with_token(shutdown.clone());
/// let token = tasks.shutdown_token();
/// tasks.spawn("overdue_scanner", TaskKind::Periodic, async move {
///     token.cancelled().await;
/// });
/// tasks.shutdown().await;
/// ```
pub struct BackgroundTasks {
    shutdown: CancellationToken,
    tasks: Vec<RegisteredTask>,
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

impl BackgroundTasks {
    /// 共享 HTTP 服务的 shutdown 信号
    pub fn with_token(shutdown: CancellationToken) -> Self {
        Self {
            shutdown,
            tasks: Vec::new(),
        }
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Spawn a job; a panic inside it is logged and contained
    pub fn spawn<F>(&mut self, name: &'static str, kind: TaskKind, future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let shutdown = self.shutdown.clone();
        let handle = tokio::spawn(async move {
            match AssertUnwindSafe(future).catch_unwind().await {
                Ok(()) if shutdown.is_cancelled() => {}
                Ok(()) => {
                    tracing::warn!(task = name, %kind, "Background task exited before shutdown");
                }
                Err(payload) => {
                    tracing::error!(
                        task = name,
                        %kind,
                        panic = panic_message(payload.as_ref()),
                        "Background task panicked"
                    );
                }
            }
        });
        tracing::debug!(task = name, %kind, "Background task started");
        self.tasks.push(RegisteredTask { name, handle, kind });
    }

    pub(crate) fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn log_summary(&self) {
        let periodic = self
            .tasks
            .iter()
            .filter(|t| t.kind == TaskKind::Periodic)
            .count();
        tracing::info!(
            periodic,
            listeners = self.tasks.len() - periodic,
            "Background tasks running"
        );
    }

    /// Cancel the shared token and wait for every job to finish
    pub async fn shutdown(self) {
        tracing::info!(count = self.tasks.len(), "Stopping background tasks");
        self.shutdown.cancel();

        for task in self.tasks {
            if let Err(e) = task.handle.await {
                tracing::error!(task = task.name, error = ?e, "Background task join failed");
            }
        }
        tracing::info!("Background tasks stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn test_shutdown_cancels_tasks() {
        let mut tasks = BackgroundTasks::with_token(CancellationToken::new());
        let token = tasks.shutdown_token();
        let stopped = Arc::new(AtomicBool::new(false));
        let flag = stopped.clone();

        tasks.spawn("waiter", TaskKind::Listener, async move {
            token.cancelled().await;
            flag.store(true, Ordering::SeqCst);
        });
        assert_eq!(tasks.len(), 1);

        tasks.shutdown().await;
        assert!(stopped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_panicking_task_is_contained() {
        let mut tasks = BackgroundTasks::with_token(CancellationToken::new());
        tasks.spawn("boom", TaskKind::Periodic, async {
            panic!("boom");
        });
        // shutdown must not propagate the panic
        tasks.shutdown().await;
    }

    #[test]
    fn test_panic_message() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("scanner died"));
        assert_eq!(panic_message(owned.as_ref()), "scanner died");
        let other: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(other.as_ref()), "unknown panic");
    }
}
