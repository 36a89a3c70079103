//! Minimal metrics registry for the relay.
//!
//! Counters with dynamic labels backed by `DashMap`, rendered in Prometheus
//! text exposition format. Label sets are sorted so a series always maps to
//! the same key regardless of call-site ordering.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        let mut key: Vec<(String, String)> = labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        key.sort();

        let counter = self.map.entry(key).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Current value of one series (0 if never incremented).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        let mut key: Vec<(String, String)> = labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        key.sort();
        self.map
            .get(&key)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} counter");
        let mut rows: Vec<(String, u64)> = self
            .map
            .iter()
            .map(|r| {
                let labels = r
                    .key()
                    .iter()
                    .map(|(k, v)| format!("{k}=\"{}\"", escape_label(v)))
                    .collect::<Vec<_>>()
                    .join(",");
                (labels, r.value().load(Ordering::Relaxed))
            })
            .collect();
        rows.sort();
        for (labels, val) in rows {
            if labels.is_empty() {
                let _ = writeln!(out, "{name} {val}");
            } else {
                let _ = writeln!(out, "{name}{{{labels}}} {val}");
            }
        }
    }
}

#[derive(Default)]
pub struct RelayMetrics {
    /// `outcome` = authorized | rejected
    pub config_requests: CounterVec,
    /// `source` = issued | reused | fallback
    pub identity_tokens: CounterVec,
    pub pageviews: CounterVec,
    draining: AtomicBool,
}

impl RelayMetrics {
    pub fn set_draining(&self) {
        self.draining.store(true, Ordering::Relaxed);
    }

    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::Relaxed)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.config_requests.render("amprelay_config_requests_total", &mut out);
        self.identity_tokens.render("amprelay_identity_tokens_total", &mut out);
        self.pageviews.render("amprelay_pageviews_total", &mut out);
        let _ = writeln!(
            out,
            "# TYPE amprelay_draining gauge\namprelay_draining {}",
            u8::from(self.is_draining())
        );
        out
    }
}
