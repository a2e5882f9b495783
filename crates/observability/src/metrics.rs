//! Vehicle model accessor 指标收集模块
//!
//! 记录预测请求、输入校验拒绝、模型错误以及模型加载的运行指标。

use std::sync::atomic::{AtomicU64, Ordering};

use metrics::{counter, histogram};

/// 预测类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionKind {
    /// 保持最后控制量预测
    Constant,
    /// 控制序列预测
    Controls,
}

impl PredictionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::Controls => "controls",
        }
    }
}

/// 预测结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionOutcome {
    /// 模型返回了结果
    Success,
    /// 输入校验失败，模型未被调用
    Rejected,
    /// 模型返回错误
    BackendError,
}

impl PredictionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Rejected => "rejected",
            Self::BackendError => "backend_error",
        }
    }
}

/// 记录一次预测请求
pub fn record_prediction(kind: PredictionKind, outcome: PredictionOutcome) {
    counter!(
        "vehicle_model_predictions_total",
        "kind" => kind.as_str(),
        "status" => outcome.as_str()
    )
    .increment(1);

    if outcome == PredictionOutcome::BackendError {
        counter!("vehicle_model_backend_errors_total", "kind" => kind.as_str()).increment(1);
    }
}

/// 记录输入校验拒绝
pub fn record_validation_rejection(field: &'static str) {
    counter!("vehicle_model_validation_rejections_total", "field" => field).increment(1);
}

/// 记录控制序列长度
pub fn record_control_sequence_len(len: usize) {
    histogram!("vehicle_model_control_sequence_len").record(len as f64);
}

/// 记录模型调用延迟
pub fn record_backend_latency_ms(kind: PredictionKind, latency_ms: f64) {
    histogram!("vehicle_model_backend_latency_ms", "kind" => kind.as_str()).record(latency_ms);
}

/// 记录模型加载
pub fn record_model_load(success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!("vehicle_model_loads_total", "status" => status).increment(1);
}

/// 预测计数器
///
/// 无锁，可在多个调用线程间共享。
#[derive(Debug, Default)]
pub struct PredictionCounters {
    constant: AtomicU64,
    controls: AtomicU64,
    succeeded: AtomicU64,
    rejected: AtomicU64,
    backend_errors: AtomicU64,
}

impl PredictionCounters {
    /// 创建新的计数器
    pub fn new() -> Self {
        Self::default()
    }

    /// 更新计数并转发到 metrics
    pub fn record(&self, kind: PredictionKind, outcome: PredictionOutcome) {
        match kind {
            PredictionKind::Constant => self.constant.fetch_add(1, Ordering::Relaxed),
            PredictionKind::Controls => self.controls.fetch_add(1, Ordering::Relaxed),
        };
        match outcome {
            PredictionOutcome::Success => self.succeeded.fetch_add(1, Ordering::Relaxed),
            PredictionOutcome::Rejected => self.rejected.fetch_add(1, Ordering::Relaxed),
            PredictionOutcome::BackendError => self.backend_errors.fetch_add(1, Ordering::Relaxed),
        };
        record_prediction(kind, outcome);
    }

    /// 生成摘要
    pub fn summary(&self) -> PredictionSummary {
        PredictionSummary {
            constant_requests: self.constant.load(Ordering::Relaxed),
            control_requests: self.controls.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            backend_errors: self.backend_errors.load(Ordering::Relaxed),
        }
    }
}

/// 预测摘要
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PredictionSummary {
    pub constant_requests: u64,
    pub control_requests: u64,
    pub succeeded: u64,
    pub rejected: u64,
    pub backend_errors: u64,
}

impl PredictionSummary {
    pub fn total(&self) -> u64 {
        self.constant_requests + self.control_requests
    }

    /// 拒绝率 (%)
    pub fn rejection_rate(&self) -> f64 {
        if self.total() > 0 {
            self.rejected as f64 / self.total() as f64 * 100.0
        } else {
            0.0
        }
    }
}

impl std::fmt::Display for PredictionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Prediction Summary ===")?;
        writeln!(
            f,
            "Requests: {} (constant: {}, controls: {})",
            self.total(),
            self.constant_requests,
            self.control_requests
        )?;
        writeln!(f, "Succeeded: {}", self.succeeded)?;
        writeln!(
            f,
            "Rejected: {} ({:.2}%)",
            self.rejected,
            self.rejection_rate()
        )?;
        writeln!(f, "Backend errors: {}", self.backend_errors)
    }
}
