// Domain Layer - Pure calendar math and value types

pub mod calendar;
pub mod error;
pub mod settings;
pub mod snapshot;
pub mod subday;
pub mod window;
pub mod zone;

// Re-exports
pub use error::DomainError;
pub use settings::TrackerSettings;
pub use snapshot::{
    CalendarDate, ClockTime, Countdown, LifeProgress, PeriodKind, PeriodProgress,
    ProgressSnapshot,
};
pub use subday::{Partition, SubDayLayout, SubDayProgress};
pub use window::PeriodWindow;
pub use zone::ReferenceZone;
