//! One "run" of a function: the trace plus everything derived from it.

use log::{info, warn};

use crate::analysis::{reference_curve, sample_complexity, ComplexitySample, GrowthModel, TraceStats};
use crate::catalog::CatalogEntry;
use crate::domain::{TraceError, Value};
use crate::interceptor::{Tracer, TracerConfig};
use crate::trace_data::Trace;

/// Everything the views need about one traced run
#[derive(Debug, Clone)]
pub struct Session {
    pub function_name: String,
    pub trace: Trace,
    pub stats: TraceStats,
    pub samples: Vec<ComplexitySample>,
    /// Reference model for the complexity chart
    pub model: Option<GrowthModel>,
    /// Message of the error that ended the run early
    pub failure: Option<String>,
}

impl Session {
    /// Trace `entry` on `args`, then sample it on argument 0 up to that
    /// argument's value, rounded down.
    ///
    /// A failing complexity sample is logged and leaves `samples` empty.
    ///
    /// # Errors
    /// The main run's [`TraceError`]; its partial trace can still be viewed
    /// through [`Session::failed`].
    pub fn run(entry: &CatalogEntry, args: Vec<Value>, config: TracerConfig) -> Result<Self, TraceError> {
        let tracer = Tracer::new(config);
        let function = entry.function.as_ref();
        let trace = tracer.trace(function, args.clone())?;

        let upper = args.first().and_then(Value::floor_int).unwrap_or(0);
        let samples = match sample_complexity(&tracer, function, &args, 0, upper) {
            Ok(samples) => samples,
            Err(e) => {
                warn!("complexity sampling of {} failed: {e}", entry.name());
                Vec::new()
            }
        };

        let mut session = Self::from_trace(trace, Some(entry.big_o));
        session.samples = samples;
        info!(
            "session {}: {} events, {} calls, {} samples",
            session.function_name,
            session.trace.len(),
            session.stats.total_calls,
            session.samples.len()
        );
        Ok(session)
    }

    /// View a trace with no sampling, e.g. one loaded from disk
    #[must_use]
    pub fn from_trace(trace: Trace, big_o: Option<&str>) -> Self {
        let function_name = trace
            .events()
            .first()
            .and_then(|e| e.as_call())
            .map(|c| c.function_name.clone())
            .unwrap_or_default();
        Self {
            function_name,
            stats: TraceStats::from_trace(&trace),
            trace,
            samples: Vec::new(),
            model: big_o.map(GrowthModel::from_label),
            failure: None,
        }
    }

    /// Session over the partial trace of a failed run
    #[must_use]
    pub fn failed(error: &TraceError) -> Option<Self> {
        let partial = error.partial_trace()?.clone();
        let mut session = Self::from_trace(partial, None);
        session.failure = Some(error.to_string());
        Some(session)
    }

    /// Reference curve for the samples, empty without a model
    #[must_use]
    pub fn reference(&self) -> Vec<f64> {
        self.model.map(|m| reference_curve(&self.samples, m)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_run_fibonacci() {
        let catalog = Catalog::builtin();
        let entry = catalog.get("fibonacci").unwrap();
        let session = Session::run(entry, vec![Value::Int(5)], TracerConfig::default()).unwrap();
        assert_eq!(session.function_name, "fibonacci");
        assert_eq!(session.stats.total_calls, 15);
        let counts: Vec<_> = session.samples.iter().map(|s| s.operation_count).collect();
        assert_eq!(counts, vec![1, 3, 5, 9, 15]);
        assert_eq!(session.model, Some(GrowthModel::Exponential));
        assert_eq!(session.reference().len(), 5);
    }

    #[test]
    fn test_failed_run_keeps_partial_trace() {
        let catalog = Catalog::builtin();
        let entry = catalog.get("factorial").unwrap();
        let err = Session::run(entry, vec![Value::Int(-2)], TracerConfig::default()).unwrap_err();
        let session = Session::failed(&err).unwrap();
        assert_eq!(session.trace.call_count(), 1);
        assert_eq!(session.trace.return_count(), 0);
        assert!(session.failure.unwrap().contains("negative"));
    }

    #[test]
    fn test_fractional_first_argument_samples_floor() {
        use crate::catalog::CatalogEntry;
        use crate::domain::CallError;
        use crate::interceptor::{NamedFn, Recur};
        use std::sync::Arc;

        let halve = NamedFn::new("halve", |recur: &mut Recur<'_>, args: &[Value]| {
            let n = args[0].floor_int().unwrap_or(0);
            if n <= 0 {
                return Ok::<_, CallError>(Value::Int(0));
            }
            recur.call(vec![Value::Int(n / 2)])
        });
        let entry = CatalogEntry {
            function: Arc::new(halve),
            description: "halving",
            default_args: "3.5",
            big_o: "O(log n)",
        };
        let session = Session::run(&entry, vec![Value::Float(3.5)], TracerConfig::default()).unwrap();
        let sizes: Vec<_> = session.samples.iter().map(|s| s.size).collect();
        assert_eq!(sizes, vec![1, 2, 3]);
    }

    #[test]
    fn test_non_numeric_first_argument_skips_sampling() {
        let catalog = Catalog::builtin();
        let entry = catalog.get("sumArray").unwrap();
        let session =
            Session::run(entry, vec![Value::from(vec![1i64, 2, 3])], TracerConfig::default()).unwrap();
        assert!(session.samples.is_empty());
        assert!(session.reference().is_empty());
    }
}
