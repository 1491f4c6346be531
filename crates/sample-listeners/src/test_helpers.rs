//! A [FunctionExecution] that records how a listener signalled the host.

use std::sync::Mutex;

use anyhow::bail;
use serde_json::Value;

use crate::FunctionExecution;

/// A lifecycle call made by a listener.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Complete(Value),
    Fail(String),
    Ack,
}

/// Records every lifecycle call, optionally rejecting `complete` or `fail`
/// to simulate a host that can't deliver them.
#[derive(Debug, Default)]
pub struct FakeExecution {
    inputs: Value,
    reject_complete: bool,
    reject_fail: bool,
    signals: Mutex<Vec<Signal>>,
}

impl FakeExecution {
    pub fn new(inputs: Value) -> Self {
        Self {
            inputs,
            ..Default::default()
        }
    }

    pub fn rejecting_complete(mut self) -> Self {
        self.reject_complete = true;
        self
    }

    pub fn rejecting_fail(mut self) -> Self {
        self.reject_fail = true;
        self
    }

    /// All lifecycle calls, oldest first, including rejected ones.
    pub fn signals(&self) -> Vec<Signal> {
        self.signals.lock().unwrap().clone()
    }

    pub fn completions(&self) -> Vec<Value> {
        self.signals()
            .into_iter()
            .filter_map(|signal| match signal {
                Signal::Complete(outputs) => Some(outputs),
                _ => None,
            })
            .collect()
    }

    pub fn failures(&self) -> Vec<String> {
        self.signals()
            .into_iter()
            .filter_map(|signal| match signal {
                Signal::Fail(error) => Some(error),
                _ => None,
            })
            .collect()
    }

    pub fn ack_count(&self) -> usize {
        self.signals()
            .iter()
            .filter(|signal| **signal == Signal::Ack)
            .count()
    }

    fn record(&self, signal: Signal) {
        self.signals.lock().unwrap().push(signal);
    }
}

impl FunctionExecution for FakeExecution {
    fn inputs(&self) -> &Value {
        &self.inputs
    }

    async fn complete(&self, outputs: Value) -> anyhow::Result<()> {
        self.record(Signal::Complete(outputs));
        if self.reject_complete {
            bail!("Unexpected error");
        }
        Ok(())
    }

    async fn fail(&self, error: &str) -> anyhow::Result<()> {
        self.record(Signal::Fail(error.to_string()));
        if self.reject_fail {
            bail!("failed to deliver failure");
        }
        Ok(())
    }

    async fn ack(&self) -> anyhow::Result<()> {
        self.record(Signal::Ack);
        Ok(())
    }
}

/// Catalog entries used across listener tests.
pub fn fake_samples() -> Value {
    serde_json::json!([
        {
            "title": "JavaScript Getting Started",
            "description": "A template for building Slack apps with Bolt for JavaScript.",
            "link": "https://github.com/slack-samples/bolt-js-getting-started",
            "date_updated": "2025-01-01",
            "external_ref": { "id": "bolt-js-getting-started" },
            "content": "This quickstart guide helps you get a Slack app using Bolt for JavaScript up and running.",
        },
        {
            "title": "Python AI Assistant",
            "description": "A template for building AI-enabled apps with Bolt for Python.",
            "link": "https://github.com/slack-samples/bolt-python-assistant",
            "date_updated": "2025-01-02",
            "external_ref": { "id": "bolt-python-assistant" },
            "content": "Create an AI assistant using Python and machine learning capabilities.",
        },
        {
            "title": "TypeScript Starter",
            "description": "A starter template for TypeScript Slack apps.",
            "link": "https://github.com/slack-samples/bolt-ts-starter",
            "date_updated": "2025-01-03",
            "external_ref": { "id": "bolt-ts-starter" },
        },
    ])
}

/// A successful `developer.sampleData.get` response listing [fake_samples].
pub fn fake_sample_data_response() -> Value {
    serde_json::json!({ "ok": true, "samples": fake_samples() })
}
