//! Built-in [`SafeValue`] implementations.
//!
//! Numbers, booleans and a handful of library types render nothing that could
//! identify a person. Strings, characters and IP addresses are absent: they
//! are unsafe unless wrapped in [`Safe`](super::Safe).

use std::num::{
    NonZeroI8, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI128, NonZeroIsize, NonZeroU8,
    NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU128, NonZeroUsize,
};

use super::SafeValue;
use crate::buffer::OutputMode;

macro_rules! impl_safe_value {
    ($($ty:ty),* $(,)?) => {
        $(impl SafeValue for $ty {})*
    };
}

impl_safe_value!(
    bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl_safe_value!(
    NonZeroI8,
    NonZeroI16,
    NonZeroI32,
    NonZeroI64,
    NonZeroI128,
    NonZeroIsize,
    NonZeroU8,
    NonZeroU16,
    NonZeroU32,
    NonZeroU64,
    NonZeroU128,
    NonZeroUsize,
);

impl_safe_value!(OutputMode);

#[cfg(feature = "chrono")]
mod chrono_impls {
    use std::fmt;

    use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Weekday};

    use super::SafeValue;

    impl<Tz> SafeValue for DateTime<Tz>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
    }

    impl_safe_value!(NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday);
}

#[cfg(feature = "time")]
mod time_impls {
    use time::{Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset, Weekday};

    use super::SafeValue;

    impl_safe_value!(
        Date,
        Duration,
        Month,
        OffsetDateTime,
        PrimitiveDateTime,
        Time,
        UtcOffset,
        Weekday,
    );
}
