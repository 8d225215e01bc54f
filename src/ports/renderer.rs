use chrono::{DateTime, Utc};
use crate::domain::TraceReport;

/// Renders a resolved report. Implementations must not mutate state, so
/// rendering the same report at the same instant is repeatable.
pub trait Renderer: Send + Sync {
    fn render(&self, report: &TraceReport, now: DateTime<Utc>) -> String;
}
