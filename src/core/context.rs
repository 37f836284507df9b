//! Build context threaded through builders, assembler and adapter

use super::clock::{format_instant, Clock, SystemClock};
use super::ids::{IdGenerator, RandomIdGenerator};
use chrono::{DateTime, Utc};
use std::fmt;

static SYSTEM_CLOCK: SystemClock = SystemClock;
static RANDOM_IDS: RandomIdGenerator = RandomIdGenerator;

/// Time and identifier sources for one or more conversions
///
/// Production code uses [`BuildContext::system`]; tests pass a
/// [`FixedClock`](super::clock::FixedClock) and a
/// [`SequentialIdGenerator`](super::ids::SequentialIdGenerator) to get
/// byte-stable output.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use pgx_fhir::core::clock::FixedClock;
/// use pgx_fhir::core::context::BuildContext;
/// use pgx_fhir::core::ids::SequentialIdGenerator;
///
/// let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
/// let ids = SequentialIdGenerator::new();
/// let ctx = BuildContext::new(&clock, &ids);
///
/// assert_eq!(ctx.now_text(), "2024-01-01T00:00:00+00:00");
/// assert_eq!(ctx.new_id("bundle"), "bundle-000000000001");
/// ```
#[derive(Clone, Copy)]
pub struct BuildContext<'a> {
    clock: &'a dyn Clock,
    ids: &'a dyn IdGenerator,
}

impl<'a> BuildContext<'a> {
    /// Creates a context from explicit sources
    pub fn new(clock: &'a dyn Clock, ids: &'a dyn IdGenerator) -> Self {
        Self { clock, ids }
    }

    /// Current instant according to the context's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Current instant formatted for FHIR documents
    pub fn now_text(&self) -> String {
        format_instant(self.clock.now())
    }

    /// New identifier from the context's generator
    pub fn new_id(&self, prefix: &str) -> String {
        self.ids.new_id(prefix)
    }
}

impl BuildContext<'static> {
    /// Wall-clock time and random identifiers
    pub fn system() -> Self {
        Self::new(&SYSTEM_CLOCK, &RANDOM_IDS)
    }
}

impl Default for BuildContext<'static> {
    fn default() -> Self {
        Self::system()
    }
}

impl fmt::Debug for BuildContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildContext").finish_non_exhaustive()
    }
}
