//! Booking models (quotes, contact details, session views)

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{
    calendar::CalendarDay,
    enums::{IceType, Lang, PeriodId},
    period::{TimePeriod, TimeWindow},
};

/// Price of one period or window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PriceQuote {
    pub base: Decimal,
    #[serde(rename = "final")]
    pub final_price: Decimal,
    pub discount: Decimal,
    pub has_rebate: bool,
}

/// Aggregated price of a whole selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct TotalQuote {
    pub total: Decimal,
    pub discount: Decimal,
    pub base_total: Decimal,
}

impl TotalQuote {
    pub fn add(&mut self, quote: &PriceQuote) {
        self.total += quote.final_price;
        self.discount += quote.discount;
        self.base_total = self.total + self.discount;
    }
}

/// Client details typed in the booking form
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct ContactInfo {
    #[validate(length(min = 1, message = "Le nom complet est requis"))]
    pub full_name: String,
    /// 10-digit phone number, any punctuation
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(email(message = "Courriel invalide"))]
    pub email: Option<String>,
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.chars().filter(|c| c.is_ascii_digit()).count() == 10 {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some("Le numéro de téléphone doit contenir 10 chiffres".into());
        Err(err)
    }
}

/// Format a phone number as `###-###-####` as the visitor types it
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).take(10).collect();
    match digits.len() {
        0..=2 => digits,
        3..=5 => format!("{}-{}", &digits[..3], &digits[3..]),
        _ => format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSession {
    pub ice_type: Option<IceType>,
    pub lang: Option<Lang>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetIceType {
    pub ice_type: IceType,
}

/// Custom time window of a selected date; `null` clears it
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetWindow {
    pub window: Option<TimeWindow>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitReservation {
    pub contact: ContactInfo,
    pub lang: Option<Lang>,
}

/// A period offered on a day, with its price for every ice type
#[derive(Debug, Serialize, ToSchema)]
pub struct PeriodOffer {
    #[serde(flatten)]
    pub period: TimePeriod,
    pub slots: Vec<String>,
    pub full_ice: PriceQuote,
    pub half_ice: PriceQuote,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DayDetail {
    pub day: CalendarDay,
    pub reserved_hours: Vec<u32>,
    pub periods: Vec<PeriodOffer>,
}

/// One selected date of a session
#[derive(Debug, Serialize, ToSchema)]
pub struct SelectedDateView {
    pub date: NaiveDate,
    pub periods: Vec<PeriodId>,
    pub window: Option<TimeWindow>,
    /// Selected but contributing nothing to price or submission yet
    pub pending: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionView {
    pub id: Uuid,
    pub ice_type: IceType,
    pub dates: Vec<SelectedDateView>,
    pub quote: TotalQuote,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MailtoResponse {
    pub mailto: String,
    pub subject: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_phone_progressively() {
        assert_eq!(format_phone("45"), "45");
        assert_eq!(format_phone("4505"), "450-5");
        assert_eq!(format_phone("(450) 555-1234 ext 9"), "450-555-1234");
    }

    #[test]
    fn test_contact_validation() {
        let ok = ContactInfo {
            full_name: "Jean-Pierre Tremblay".to_string(),
            phone: "450-555-1234".to_string(),
            email: None,
        };
        assert!(ok.validate().is_ok());

        let bad = ContactInfo {
            full_name: String::new(),
            phone: "555-1234".to_string(),
            email: Some("pas-un-courriel".to_string()),
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("full_name"));
        assert!(fields.contains_key("phone"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn test_total_quote_tracks_base() {
        let mut total = TotalQuote::default();
        total.add(&PriceQuote {
            base: Decimal::from(1600),
            final_price: Decimal::from(1440),
            discount: Decimal::from(160),
            has_rebate: true,
        });
        assert_eq!(total.base_total, Decimal::from(1600));
    }
}
