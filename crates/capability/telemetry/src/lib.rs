//! 追踪、请求 ID 生成与门禁密码修改指标。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 指标快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub edits_requested: u64,
    pub edits_succeeded: u64,
    pub edits_failed: u64,
    pub units_applied: u64,
    pub units_unchanged: u64,
    pub codes_superseded: u64,
    pub revoke_failures: u64,
    pub set_failures: u64,
    pub edit_latency_ms_total: u64,
    pub edit_latency_ms_count: u64,
}

/// 进程级指标。
pub struct TelemetryMetrics {
    edits_requested: AtomicU64,
    edits_succeeded: AtomicU64,
    edits_failed: AtomicU64,
    units_applied: AtomicU64,
    units_unchanged: AtomicU64,
    codes_superseded: AtomicU64,
    revoke_failures: AtomicU64,
    set_failures: AtomicU64,
    edit_latency_ms_total: AtomicU64,
    edit_latency_ms_count: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            edits_requested: AtomicU64::new(0),
            edits_succeeded: AtomicU64::new(0),
            edits_failed: AtomicU64::new(0),
            units_applied: AtomicU64::new(0),
            units_unchanged: AtomicU64::new(0),
            codes_superseded: AtomicU64::new(0),
            revoke_failures: AtomicU64::new(0),
            set_failures: AtomicU64::new(0),
            edit_latency_ms_total: AtomicU64::new(0),
            edit_latency_ms_count: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            edits_requested: self.edits_requested.load(Ordering::Relaxed),
            edits_succeeded: self.edits_succeeded.load(Ordering::Relaxed),
            edits_failed: self.edits_failed.load(Ordering::Relaxed),
            units_applied: self.units_applied.load(Ordering::Relaxed),
            units_unchanged: self.units_unchanged.load(Ordering::Relaxed),
            codes_superseded: self.codes_superseded.load(Ordering::Relaxed),
            revoke_failures: self.revoke_failures.load(Ordering::Relaxed),
            set_failures: self.set_failures.load(Ordering::Relaxed),
            edit_latency_ms_total: self.edit_latency_ms_total.load(Ordering::Relaxed),
            edit_latency_ms_count: self.edit_latency_ms_count.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录修改请求次数。
pub fn record_edit_requested() {
    metrics().edits_requested.fetch_add(1, Ordering::Relaxed);
}

/// 记录修改成功次数。
pub fn record_edit_succeeded() {
    metrics().edits_succeeded.fetch_add(1, Ordering::Relaxed);
}

/// 记录修改失败次数（任意错误类别）。
pub fn record_edit_failed() {
    metrics().edits_failed.fetch_add(1, Ordering::Relaxed);
}

/// 记录已写入新密码的单元数。
pub fn record_unit_applied() {
    metrics().units_applied.fetch_add(1, Ordering::Relaxed);
}

/// 记录幂等跳过的单元数。
pub fn record_unit_unchanged() {
    metrics().units_unchanged.fetch_add(1, Ordering::Relaxed);
}

/// 记录被标记为 remove 的旧密码数量。
pub fn record_codes_superseded(count: u64) {
    metrics()
        .codes_superseded
        .fetch_add(count, Ordering::Relaxed);
}

/// 记录指挥中心 revoke 失败次数。
pub fn record_revoke_failure() {
    metrics().revoke_failures.fetch_add(1, Ordering::Relaxed);
}

/// 记录指挥中心 set 失败次数。
pub fn record_set_failure() {
    metrics().set_failures.fetch_add(1, Ordering::Relaxed);
}

/// 记录单次修改请求耗时（毫秒）。
pub fn record_edit_latency_ms(latency_ms: u64) {
    let metrics = metrics();
    metrics
        .edit_latency_ms_total
        .fetch_add(latency_ms, Ordering::Relaxed);
    metrics
        .edit_latency_ms_count
        .fetch_add(1, Ordering::Relaxed);
}
