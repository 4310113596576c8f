//! Session Metrics
//!
//! Counters and latency tracking for loads and queries.

use hashbrown::HashMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Operation kinds tracked by [`Metrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Load,
    Query,
}

impl Operation {
    fn plural(&self) -> &'static str {
        match self {
            Operation::Load => "loads",
            Operation::Query => "queries",
        }
    }
}

/// Metrics collector
#[derive(Debug)]
pub struct Metrics {
    /// Successful operations, by kind
    succeeded: RwLock<HashMap<Operation, u64>>,

    /// Failed operations, by kind
    failed: RwLock<HashMap<Operation, u64>>,

    latency_sum_us: AtomicU64,
    latency_count: AtomicU64,
    latency_max_us: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            succeeded: RwLock::new(HashMap::new()),
            failed: RwLock::new(HashMap::new()),
            latency_sum_us: AtomicU64::new(0),
            latency_count: AtomicU64::new(0),
            latency_max_us: AtomicU64::new(0),
        }
    }

    /// Record a finished operation and how long it took
    pub fn record(&self, op: Operation, ok: bool, latency: Duration) {
        let counters = if ok { &self.succeeded } else { &self.failed };
        *counters.write().entry(op).or_insert(0) += 1;

        let latency_us = latency.as_micros() as u64;
        self.latency_sum_us.fetch_add(latency_us, Ordering::Relaxed);
        self.latency_count.fetch_add(1, Ordering::Relaxed);
        self.latency_max_us.fetch_max(latency_us, Ordering::Relaxed);
    }

    /// Successful operations of one kind
    pub fn succeeded(&self, op: Operation) -> u64 {
        self.succeeded.read().get(&op).copied().unwrap_or(0)
    }

    /// Failed operations of one kind
    pub fn failed(&self, op: Operation) -> u64 {
        self.failed.read().get(&op).copied().unwrap_or(0)
    }

    /// Get total operations count
    pub fn total_ops(&self) -> u64 {
        self.latency_count.load(Ordering::Relaxed)
    }

    /// Get average latency in microseconds
    pub fn avg_latency_us(&self) -> f64 {
        let count = self.latency_count.load(Ordering::Relaxed);
        if count == 0 {
            return 0.0;
        }
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        sum as f64 / count as f64
    }

    pub fn max_latency_us(&self) -> u64 {
        self.latency_max_us.load(Ordering::Relaxed)
    }

    /// Get a summary of metrics
    pub fn summary(&self) -> String {
        let ops = [Operation::Load, Operation::Query]
            .iter()
            .map(|op| {
                format!(
                    "{}: {} ok / {} failed",
                    op.plural(),
                    self.succeeded(*op),
                    self.failed(*op)
                )
            })
            .collect::<Vec<_>>()
            .join(" | ");

        format!(
            "{} | Latency (µs): avg={:.1}, max={}",
            ops,
            self.avg_latency_us(),
            self.max_latency_us()
        )
    }
}
