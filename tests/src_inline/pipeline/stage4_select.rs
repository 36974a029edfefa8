use super::*;
use std::cell::Cell;
use std::io;
use std::sync::{Arc, Mutex};

struct FixedEstimator {
    value: f64,
    calls: Cell<usize>,
}

impl FixedEstimator {
    fn new(value: f64) -> Self {
        Self {
            value,
            calls: Cell::new(0),
        }
    }
}

impl ThresholdEstimator for FixedEstimator {
    fn estimate(&self, _target_ratio: f64) -> Result<f64, CutoffError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.value)
    }
}

/// Threshold falls linearly as the ratio grows.
struct LinearEstimator;

impl ThresholdEstimator for LinearEstimator {
    fn estimate(&self, target_ratio: f64) -> Result<f64, CutoffError> {
        Ok(10.0 - 10.0 * target_ratio)
    }
}

struct FailingEstimator;

impl ThresholdEstimator for FailingEstimator {
    fn estimate(&self, _target_ratio: f64) -> Result<f64, CutoffError> {
        Err(CutoffError::EmptyDistribution)
    }
}

#[test]
fn test_ratio_within_bound_keeps_optimal_limit() {
    let est = FixedEstimator::new(99.0);
    let result = CutoffResult::new(1.5, 0.1, &est);
    let sel = select_threshold(&result, 0.2).unwrap();
    assert_eq!(sel.threshold, 1.5);
    assert_eq!(sel.path, SelectionPath::Optimal);
    assert!(sel.warnings.is_empty());
    assert_eq!(est.calls.get(), 0);
}

#[test]
fn test_ratio_above_bound_falls_back() {
    let est = FixedEstimator::new(2.1);
    let result = CutoffResult::new(1.5, 0.35, &est);
    let sel = select_threshold(&result, 0.2).unwrap();
    assert_eq!(sel.threshold, 2.1);
    assert_eq!(sel.path, SelectionPath::Fallback);
    assert_eq!(
        sel.warnings,
        vec![
            SelectionWarning::RatioTooHigh {
                ratio: 0.35,
                max_ratio: 0.2,
            },
            SelectionWarning::NonOptimalLimit {
                limit_value: 2.1,
                ratio: 0.2,
            },
        ]
    );
    assert_eq!(est.calls.get(), 1);
}

#[test]
fn test_fallback_queries_estimator_at_bound() {
    let result = CutoffResult::new(1.0, 0.9, LinearEstimator);
    let sel = select_threshold(&result, 0.25).unwrap();
    assert_eq!(sel.threshold, 7.5);
}

#[test]
fn test_equal_ratio_takes_optimal_path() {
    let result = CutoffResult::new(1.5, 0.2, LinearEstimator);
    let sel = select_threshold(&result, 0.2).unwrap();
    assert_eq!(sel.threshold, 1.5);
    assert_eq!(sel.path, SelectionPath::Optimal);
    assert!(sel.warnings.is_empty());
}

#[test]
fn test_selection_is_idempotent() {
    let result = CutoffResult::new(0.5, 0.6, LinearEstimator);
    let a = select_threshold(&result, 0.3).unwrap();
    let b = select_threshold(&result, 0.3).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_estimator_failure_propagates() {
    let result = CutoffResult::new(0.5, 0.8, FailingEstimator);
    assert_eq!(
        select_threshold(&result, 0.3),
        Err(CutoffError::EmptyDistribution)
    );
}

#[test]
fn test_estimator_not_consulted_when_within_bound() {
    let result = CutoffResult::new(0.5, 0.1, FailingEstimator);
    assert_eq!(select_threshold(&result, 0.3).unwrap().threshold, 0.5);
}

#[test]
fn test_warning_messages() {
    let too_high = SelectionWarning::RatioTooHigh {
        ratio: 0.35,
        max_ratio: 0.2,
    };
    assert_eq!(
        too_high.to_string(),
        "Estimated optimal cutoff gives a too high ratio (0.35 > 0.20). Consider increasing the bin size."
    );
    let fallback = SelectionWarning::NonOptimalLimit {
        limit_value: 2.1,
        ratio: 0.2,
    };
    assert_eq!(
        fallback.to_string(),
        "Using non-optimal 2.100 as lim value as it gives a ratio of 0.20."
    );
}

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_log_warnings_emits_both_in_order() {
    let captured = CapturedLog::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_target(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    let est = FixedEstimator::new(2.1);
    let result = CutoffResult::new(1.5, 0.35, &est);
    let sel = select_threshold(&result, 0.2).unwrap();
    tracing::subscriber::with_default(subscriber, || sel.log_warnings());

    let text = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("WARN"));
    assert!(lines[0].contains("too high ratio (0.35 > 0.20)"));
    assert!(lines[1].contains("Using non-optimal 2.100 as lim value"));
}
