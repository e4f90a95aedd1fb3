// Keydist Trace Hook
// Diagnostic side channel for distance computations

use parking_lot::Mutex;

/// What one distance computation saw and produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceTrace<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub use_keyboard_model: bool,
    pub distance: f64,
}

impl DistanceTrace<'_> {
    pub fn to_record(&self) -> TraceRecord {
        TraceRecord {
            source: self.source.to_string(),
            target: self.target.to_string(),
            use_keyboard_model: self.use_keyboard_model,
            distance: self.distance,
        }
    }
}

/// Owned copy of a [`DistanceTrace`]
#[derive(Debug, Clone, PartialEq)]
pub struct TraceRecord {
    pub source: String,
    pub target: String,
    pub use_keyboard_model: bool,
    pub distance: f64,
}

/// Receives one trace per distance computation
pub trait TraceSink {
    fn record(&self, trace: &DistanceTrace<'_>);
}

/// Sends traces to the `log` facade at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl TraceSink for LogSink {
    fn record(&self, trace: &DistanceTrace<'_>) {
        log::debug!(
            "Lev({}, {}, {}) = {}",
            trace.source,
            trace.target,
            trace.use_keyboard_model,
            trace.distance
        );
    }
}

/// Drops every trace
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl TraceSink for SilentSink {
    fn record(&self, _trace: &DistanceTrace<'_>) {}
}

/// Keeps every trace in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<TraceRecord>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far
    pub fn records(&self) -> Vec<TraceRecord> {
        self.records.lock().clone()
    }

    /// Take the recorded traces, leaving the sink empty
    pub fn drain(&self) -> Vec<TraceRecord> {
        std::mem::take(&mut *self.records.lock())
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl TraceSink for RecordingSink {
    fn record(&self, trace: &DistanceTrace<'_>) {
        self.records.lock().push(trace.to_record());
    }
}

impl<F> TraceSink for F
where
    F: Fn(&DistanceTrace<'_>),
{
    fn record(&self, trace: &DistanceTrace<'_>) {
        self(trace)
    }
}
