//! Shared data models spanning the engine layers.

pub mod framework;
pub mod momentum;
pub mod signal;
pub mod theme;

pub use framework::{Category, Confidence, Criterion, Score, ThemeScore};
pub use momentum::{MomentumSnapshot, TimeRange, TrendDirection, WeeklyMomentumPoint};
pub use signal::{ScoreUpdate, SignalRecord, ThemeSignal};
pub use theme::Theme;
