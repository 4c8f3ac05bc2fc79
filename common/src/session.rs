//! 解析の多重実行防止フラグ

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 解析中フラグ（同時に1件のみ）
///
/// クローンは同じフラグを共有する。
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    busy: Arc<AtomicBool>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// フラグを立てる。既に解析中なら None。
    ///
    /// 返したガードが破棄されるとフラグは下りる。
    pub fn try_begin(&self) -> Option<FlightGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FlightGuard {
                busy: Arc::clone(&self.busy),
            })
    }
}

/// 解析中を表すガード
#[derive(Debug)]
pub struct FlightGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
