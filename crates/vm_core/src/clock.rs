//! Clock collaborator — provenance timestamps only, never parsed back (see
//! SPEC_FULL.md §9). Swappable so tests can supply a fixed clock.

use chrono::Utc;

pub trait Clock: Send + Sync {
    /// UTC timestamp string stamped onto newly-created ballots.
    fn now_utc_string(&self) -> String;
}

/// Default clock: mirrors the original implementation's
/// `str(datetime.datetime.utcnow())` rendering, e.g.
/// `2026-07-27 10:03:11.123456`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc_string(&self) -> String {
        Utc::now().format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    }
}
