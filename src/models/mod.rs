//! Data models for the arena booking service

pub mod booking;
pub mod calendar;
pub mod enums;
pub mod event;
pub mod period;
pub mod preferences;
pub mod reservation;

// Re-export commonly used types
pub use booking::{ContactInfo, PriceQuote, TotalQuote};
pub use calendar::{CalendarDay, MonthGrid, Season};
pub use enums::{AvailabilityStatus, IceType, Lang, PeriodId, Theme};
pub use event::{OngoingPromotion, SpecialEvent};
pub use period::{TimePeriod, TimeWindow};
pub use preferences::{FormCacheEntry, Preferences};
pub use reservation::{ReservationRecord, ReservedSlot};
