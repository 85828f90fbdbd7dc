//! Per-step outcome reporting for bulk and multi-step tools
//!
//! A failed step is recorded and the caller moves on; nothing here ever
//! turns a step failure into a tool failure.

use std::fmt::Display;

pub const SUCCESS_MARK: &str = "✅";
pub const FAILURE_MARK: &str = "❌";

/// Ordered outcome lines of a multi-step tool
#[derive(Debug, Default, Clone)]
pub struct StepLog {
    lines: Vec<String>,
    failures: usize,
}

impl StepLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful step
    pub fn succeeded(&mut self, message: impl Display) {
        self.lines.push(format!("{} {}", SUCCESS_MARK, message));
    }

    /// Record a failed step
    pub fn failed(&mut self, message: impl Display) {
        tracing::warn!("Step failed: {}", message);
        self.lines.push(format!("{} {}", FAILURE_MARK, message));
        self.failures += 1;
    }

    /// Record the outcome of a step, returning its value on success.
    ///
    /// Failures are written as `<failure>: <error>`.
    pub fn record<T, E: Display>(
        &mut self,
        outcome: Result<T, E>,
        success: impl Display,
        failure: impl Display,
    ) -> Option<T> {
        match outcome {
            Ok(value) => {
                self.succeeded(success);
                Some(value)
            }
            Err(e) => {
                self.failed(format!("{}: {}", failure, e));
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.failures
    }

    /// Lines joined by newlines, each prefixed with `indent`
    pub fn render(&self, indent: &str) -> String {
        self.lines
            .iter()
            .map(|line| format!("{}{}", indent, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_and_marks() {
        let mut log = StepLog::new();
        assert_eq!(
            log.record::<_, String>(Ok(7), "First step done", "First step failed"),
            Some(7)
        );
        assert_eq!(
            log.record::<i32, _>(Err("boom"), "Second step done", "Second step failed"),
            None
        );
        log.succeeded("Third step done");

        assert_eq!(log.len(), 3);
        assert_eq!(log.failure_count(), 1);
        assert_eq!(
            log.render(""),
            "✅ First step done\n❌ Second step failed: boom\n✅ Third step done"
        );
    }

    #[test]
    fn test_render_indent() {
        let mut log = StepLog::new();
        log.succeeded("a");
        log.failed("b");
        assert_eq!(log.render("  "), "  ✅ a\n  ❌ b");
    }
}
