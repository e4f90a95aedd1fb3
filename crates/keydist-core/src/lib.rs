// Keydist Core Library
// Edit distance with keyboard-adjacency bias

pub mod cost;
pub mod direction;
pub mod distance;
pub mod keyboard;
pub mod layout;
pub mod matrix;
pub mod trace;

#[cfg(feature = "config")]
pub mod settings;

pub use cost::CostConfig;
pub use direction::Direction;
pub use distance::{levenshtein_distance, DistanceEngine, Ranked};
pub use keyboard::{AdjacencyMap, KeyboardModel, LayoutIssue, NeighborStatus};
pub use layout::{Layout, LayoutError, PLACEHOLDER};
pub use matrix::DistanceMatrix;
pub use trace::{DistanceTrace, LogSink, RecordingSink, SilentSink, TraceRecord, TraceSink};

#[cfg(feature = "config")]
pub use settings::{Settings, SettingsError};
