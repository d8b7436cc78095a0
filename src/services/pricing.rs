//! Rental rates and quote aggregation

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{
    booking::{PriceQuote, TotalQuote},
    enums::{IceType, Lang},
    period::{TimePeriod, TimeWindow},
};

use super::{periods::periods_for, selection::BookingSession};

const FULL_ICE_HOURLY: i64 = 200;
const FULL_ICE_HALF_HOUR: i64 = 150;
const HALF_ICE_HOURLY: i64 = 150;
const HALF_ICE_HALF_HOUR: i64 = 100;

/// Share of the base price kept for off-peak periods (10% rebate)
fn off_peak_factor() -> Decimal {
    Decimal::new(9, 1)
}

/// Price of `duration_minutes` of ice inside `period`
pub fn price_for(period: &TimePeriod, duration_minutes: u32, ice_type: IceType) -> PriceQuote {
    let base = match (ice_type.is_half(), duration_minutes) {
        (false, 30) => Decimal::from(FULL_ICE_HALF_HOUR),
        (true, 30) => Decimal::from(HALF_ICE_HALF_HOUR),
        (half, minutes) => {
            let hourly = if half { HALF_ICE_HOURLY } else { FULL_ICE_HOURLY };
            Decimal::from(hourly) * Decimal::from(minutes) / Decimal::from(60)
        }
    };

    let final_price = if period.is_off_peak {
        base * off_peak_factor()
    } else {
        base
    };

    PriceQuote {
        base,
        final_price,
        discount: base - final_price,
        has_rebate: period.is_off_peak,
    }
}

/// One priced entry of a session: a selected period, or a custom window
/// priced with the period containing it
#[derive(Debug, Clone)]
pub struct QuoteLine {
    pub date: NaiveDate,
    pub period: TimePeriod,
    pub window: Option<TimeWindow>,
    pub minutes: u32,
    pub quote: PriceQuote,
}

/// Every priced line of a session in date order: the date's selected
/// periods, then its custom window if one is set
pub fn quote_lines(session: &BookingSession, lang: Lang) -> Vec<QuoteLine> {
    let mut lines = Vec::new();
    for (date, selection) in session.selections() {
        let offered = periods_for(*date, lang);
        for period in offered.iter().filter(|p| selection.periods.contains(&p.id)) {
            let minutes = period.duration_minutes();
            lines.push(QuoteLine {
                date: *date,
                period: period.clone(),
                window: None,
                minutes,
                quote: price_for(period, minutes, session.ice_type),
            });
        }
        let Some(window) = selection.window else {
            continue;
        };
        if let Some(period) = offered.iter().find(|p| p.contains(&window)) {
            let minutes = u32::try_from(window.duration_minutes()).unwrap_or(0);
            lines.push(QuoteLine {
                date: *date,
                period: period.clone(),
                window: Some(window),
                minutes,
                quote: price_for(period, minutes, session.ice_type),
            });
        }
    }
    lines
}

/// Sum of every priced line. Dates selected without periods or window add nothing.
pub fn total_price_for(session: &BookingSession) -> TotalQuote {
    let mut total = TotalQuote::default();
    for line in quote_lines(session, Lang::default()) {
        total.add(&line.quote);
    }
    total
}

/// Amount with two decimals, the only place rounding happens
pub fn format_amount(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{enums::PeriodId, AvailabilityStatus};
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn period(id: PeriodId, day: NaiveDate) -> TimePeriod {
        crate::services::periods::period_for(day, id, Lang::Fr).unwrap()
    }

    const TODAY: (i32, u32, u32) = (2025, 9, 15);

    fn select(session: &mut BookingSession, day: NaiveDate, periods: &[PeriodId]) {
        let today = date(TODAY.0, TODAY.1, TODAY.2);
        session
            .toggle_date(day, today, AvailabilityStatus::WeekdayAvailable, false)
            .unwrap();
        let offered = periods_for(day, Lang::Fr);
        for p in periods {
            session.toggle_period(day, *p, &offered).unwrap();
        }
    }

    #[test]
    fn test_full_ice_weekday_evening() {
        let evening = period(PeriodId::Evening, date(2025, 10, 6));
        let quote = price_for(&evening, evening.duration_minutes(), IceType::Full);
        assert_eq!(quote.base, Decimal::from(1600));
        assert_eq!(quote.final_price, Decimal::from(1440));
        assert_eq!(quote.discount, Decimal::from(160));
        assert!(quote.has_rebate);
    }

    #[test]
    fn test_half_ice_exact_half_hour_on_weekend() {
        let allday = period(PeriodId::Allday, date(2025, 10, 4));
        let quote = price_for(&allday, 30, IceType::Left);
        assert_eq!(quote.base, Decimal::from(100));
        assert_eq!(quote.final_price, Decimal::from(100));
        assert_eq!(quote.discount, Decimal::ZERO);
        assert!(!quote.has_rebate);

        let full = price_for(&allday, 30, IceType::Full);
        assert_eq!(full.base, Decimal::from(150));
    }

    #[test]
    fn test_off_peak_rebate_is_exact() {
        let morning = period(PeriodId::Morning, date(2025, 10, 6));
        for minutes in [30, 60, 90, 120, 45] {
            for ice in [IceType::Full, IceType::Right] {
                let quote = price_for(&morning, minutes, ice);
                assert_eq!(quote.final_price, quote.base * Decimal::new(9, 1));
                assert_eq!(quote.discount, quote.base - quote.final_price);
            }
        }
    }

    #[test]
    fn test_total_is_additive_over_disjoint_selections() {
        let monday = date(2025, 10, 6);
        let tuesday = date(2025, 10, 7);

        let mut a = BookingSession::new(IceType::Full, Lang::Fr);
        select(&mut a, monday, &[PeriodId::Morning]);

        let mut b = BookingSession::new(IceType::Full, Lang::Fr);
        select(&mut b, tuesday, &[PeriodId::Evening]);

        let mut both = BookingSession::new(IceType::Full, Lang::Fr);
        select(&mut both, monday, &[PeriodId::Morning]);
        select(&mut both, tuesday, &[PeriodId::Evening]);

        let (qa, qb, qab) = (total_price_for(&a), total_price_for(&b), total_price_for(&both));
        assert_eq!(qab.total, qa.total + qb.total);
        assert_eq!(qab.discount, qa.discount + qb.discount);
        assert_eq!(qab.base_total, qa.base_total + qb.base_total);
        assert_eq!(qab.total, Decimal::from(360 + 1440));
    }

    #[test]
    fn test_dates_without_periods_price_nothing() {
        let mut session = BookingSession::new(IceType::Full, Lang::Fr);
        select(&mut session, date(2025, 10, 6), &[]);
        assert_eq!(total_price_for(&session), TotalQuote::default());
    }

    #[test]
    fn test_custom_window_priced_with_containing_period() {
        let monday = date(2025, 10, 6);
        let mut session = BookingSession::new(IceType::Left, Lang::Fr);
        select(&mut session, monday, &[]);
        let offered = periods_for(monday, Lang::Fr);
        session
            .set_window(monday, Some(TimeWindow { start: t(18, 0), end: t(19, 30) }), &offered)
            .unwrap();

        let total = total_price_for(&session);
        // 1.5h half ice at 150/h, off-peak
        assert_eq!(total.base_total, Decimal::from(225));
        assert_eq!(total.total, Decimal::new(2025, 1));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::from(1440)), "1440.00");
        assert_eq!(format_amount(Decimal::new(202_505, 3)), "202.51");
    }
}
