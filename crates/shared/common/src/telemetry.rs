//! Call recording for service logging decorators.
//!
//! [`observe`] runs a service call inside a span carrying its identifying
//! fields and records the method, elapsed time and error once the call ends.
//! Recording happens in `Drop`, so it also fires when the call future is
//! cancelled or unwinds.

use std::future::Future;
use std::time::{Duration, Instant};

use tracing::{Instrument, Span};

use crate::AppResult;

/// Records one service call when dropped.
pub struct CallRecord {
    span: Span,
    method: &'static str,
    started: Instant,
    outcome: Option<Result<(), String>>,
}

impl CallRecord {
    /// Start timing `method` within `span`.
    pub fn start(span: Span, method: &'static str) -> Self {
        Self {
            span,
            method,
            started: Instant::now(),
            outcome: None,
        }
    }

    /// Remember the result; it is logged when the record drops.
    pub fn finish<T>(&mut self, result: &AppResult<T>) {
        self.outcome = Some(match result {
            Ok(_) => Ok(()),
            Err(e) => Err(e.to_string()),
        });
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Drop for CallRecord {
    fn drop(&mut self) {
        let method = self.method;
        let took = self.elapsed();
        let outcome = self.outcome.take();

        self.span.in_scope(|| match outcome {
            Some(Ok(())) => tracing::info!(method, ?took, "call succeeded"),
            Some(Err(err)) => tracing::warn!(method, ?took, err = %err, "call failed"),
            None => tracing::warn!(method, ?took, "call did not complete"),
        });
    }
}

/// Run `call` inside `span` and record its outcome.
///
/// The result is handed back exactly as produced.
pub async fn observe<T, F>(span: Span, method: &'static str, call: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    let mut record = CallRecord::start(span.clone(), method);
    let result = call.instrument(span).await;
    record.finish(&result);
    result
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fmt;
    use std::sync::{Arc, Mutex};

    use tracing::field::{Field, Visit};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    use super::*;
    use crate::AppError;

    type Fields = HashMap<String, String>;

    /// Keeps the fields of every event it sees.
    #[derive(Clone, Default)]
    struct CapturingLayer {
        events: Arc<Mutex<Vec<Fields>>>,
    }

    impl CapturingLayer {
        fn events(&self) -> Vec<Fields> {
            self.events.lock().unwrap().clone()
        }
    }

    struct FieldVisitor<'a>(&'a mut Fields);

    impl Visit for FieldVisitor<'_> {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_string(), value.to_string());
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_string(), format!("{:?}", value));
        }
    }

    impl<S: tracing::Subscriber> Layer<S> for CapturingLayer {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = Fields::new();
            event.record(&mut FieldVisitor(&mut fields));
            self.events.lock().unwrap().push(fields);
        }
    }

    fn capture() -> (CapturingLayer, tracing::subscriber::DefaultGuard) {
        let layer = CapturingLayer::default();
        let subscriber = tracing_subscriber::registry().with(layer.clone());
        (layer, tracing::subscriber::set_default(subscriber))
    }

    #[tokio::test]
    async fn observe_returns_success_untouched() {
        let result = observe(tracing::info_span!("test"), "save", async { Ok(41 + 1) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn observe_returns_error_untouched() {
        let result: AppResult<()> = observe(tracing::info_span!("test"), "remove", async {
            Err(AppError::not_found("reservation"))
        })
        .await;

        assert!(matches!(result, Err(AppError::NotFound(ref e)) if e == "reservation"));
    }

    #[tokio::test]
    async fn success_is_recorded_once() {
        let (layer, _guard) = capture();

        observe(tracing::info_span!("test"), "list", async { Ok(()) })
            .await
            .unwrap();

        let events = layer.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["method"], "list");
        assert_eq!(events[0]["message"], "call succeeded");
        assert!(events[0].contains_key("took"));
        assert!(!events[0].contains_key("err"));
    }

    #[tokio::test]
    async fn failure_is_recorded_once_with_the_error() {
        let (layer, _guard) = capture();

        let result: AppResult<()> = observe(tracing::info_span!("test"), "remove", async {
            Err(AppError::not_found("user"))
        })
        .await;
        assert!(result.is_err());

        let events = layer.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["method"], "remove");
        assert_eq!(events[0]["message"], "call failed");
        assert_eq!(events[0]["err"], "user not found");
        assert!(events[0].contains_key("took"));
    }

    #[test]
    fn dropped_call_is_recorded_as_incomplete() {
        let (layer, _guard) = capture();

        let mut call = tokio_test::task::spawn(observe(
            tracing::info_span!("test"),
            "find_by_date",
            std::future::pending::<AppResult<()>>(),
        ));
        tokio_test::assert_pending!(call.poll());
        assert!(layer.events().is_empty());
        drop(call);

        let events = layer.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["method"], "find_by_date");
        assert_eq!(events[0]["message"], "call did not complete");
    }
}
