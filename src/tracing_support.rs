//! Log output, span timings and log capture.
//!
//! With the `tracing` feature the crate installs a formatting subscriber
//! filtered by `RUST_LOG` and records how long each span stays open. Without
//! it every entry point here is a no-op and events go nowhere.

#[cfg(feature = "tracing")]
mod enabled {
    use std::{
        cell::RefCell,
        collections::BTreeMap,
        fmt::Debug,
        sync::{Arc, Mutex, Once},
        time::{Duration, Instant},
    };

    use tracing::{Event, Level, field::Field, field::Visit};
    use tracing_subscriber::{
        EnvFilter, Layer, Registry, fmt, layer::Context, layer::SubscriberExt, registry::LookupSpan,
        util::SubscriberInitExt,
    };

    thread_local! {
        static SPAN_TIMINGS: RefCell<BTreeMap<&'static str, (Duration, usize)>> =
            const { RefCell::new(BTreeMap::new()) };
    }

    struct TimingLayer;

    impl<S> Layer<S> for TimingLayer
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_new_span(&self, _attrs: &tracing::span::Attributes<'_>, id: &tracing::Id, ctx: Context<'_, S>) {
            if let Some(span) = ctx.span(id) {
                span.extensions_mut().insert(Instant::now());
            }
        }

        fn on_close(&self, id: tracing::Id, ctx: Context<'_, S>) {
            if let Some(span) = ctx.span(&id) {
                let name = span.metadata().name();
                if let Some(start) = span.extensions().get::<Instant>() {
                    let elapsed = start.elapsed();
                    SPAN_TIMINGS.with(|totals| {
                        let mut totals = totals.borrow_mut();
                        let entry = totals.entry(name).or_insert((Duration::ZERO, 0));
                        entry.0 += elapsed;
                        entry.1 += 1;
                    });
                }
            }
        }
    }

    /// Install the global subscriber. Later calls do nothing.
    pub fn init_tracing() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
            let _ = Registry::default()
                .with(fmt::layer().with_writer(std::io::stderr).with_filter(filter))
                .with(TimingLayer)
                .try_init();
        });
    }

    /// Print accumulated span timings on this thread, slowest first.
    pub fn dump_span_timings() {
        SPAN_TIMINGS.with(|totals| {
            let totals = totals.borrow();
            let mut entries: Vec<_> = totals.iter().collect();
            entries.sort_by(|a, b| b.1.0.cmp(&a.1.0));
            eprintln!("span timings (desc):");
            for (name, (duration, count)) in entries {
                eprintln!("  {name}: {duration:?} ({count}x)");
            }
        });
    }

    pub fn reset_span_timings() {
        SPAN_TIMINGS.with(|totals| totals.borrow_mut().clear());
    }

    /// One event seen by [`capture_logs`].
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct CapturedEvent {
        pub level: Level,
        pub message: String,
    }

    struct MessageVisitor<'a>(&'a mut String);

    impl Visit for MessageVisitor<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
            if field.name() == "message" {
                *self.0 = format!("{value:?}");
            }
        }
    }

    struct CaptureLayer {
        events: Arc<Mutex<Vec<CapturedEvent>>>,
    }

    impl<S: tracing::Subscriber> Layer<S> for CaptureLayer {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut message = String::new();
            event.record(&mut MessageVisitor(&mut message));
            if let Ok(mut events) = self.events.lock() {
                events.push(CapturedEvent {
                    level: *event.metadata().level(),
                    message,
                });
            }
        }
    }

    /// Run `f` with a subscriber that records every event on this thread.
    pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<CapturedEvent>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let subscriber = Registry::default().with(CaptureLayer {
            events: events.clone(),
        });
        let result = tracing::subscriber::with_default(subscriber, f);
        let captured = events.lock().map(|e| e.clone()).unwrap_or_default();
        (result, captured)
    }
}

#[cfg(not(feature = "tracing"))]
mod disabled {
    pub fn init_tracing() {}

    pub fn dump_span_timings() {}

    pub fn reset_span_timings() {}
}

#[cfg(feature = "tracing")]
pub use enabled::*;

#[cfg(not(feature = "tracing"))]
pub use disabled::*;
