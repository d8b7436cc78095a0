//! Reservation e-mail composer. Sending is left to the visitor's mail
//! client; this service only builds the `mailto:` link.

use chrono::{Datelike, NaiveDate};
use validator::Validate;

use crate::{
    config::BookingConfig,
    error::{AppError, AppResult},
    models::{
        booking::{format_phone, ContactInfo, MailtoResponse, TotalQuote},
        calendar::weekday_from_sunday,
        enums::{IceType, Lang},
    },
    repository::Repository,
};

use super::{
    pricing::{format_amount, quote_lines},
    selection::BookingSession,
};

pub const MSG_NO_DATE: &str = "Veuillez sélectionner au moins une date";
pub const MSG_NO_PERIOD: &str = "Veuillez sélectionner au moins une période horaire";

/// Form whose cached values are dropped once the e-mail is composed
pub const BOOKING_FORM_ID: &str = "booking";

const RULE: &str = "════════════════════════════════";

struct Labels {
    greeting: &'static str,
    client: &'static str,
    name: &'static str,
    phone: &'static str,
    email: &'static str,
    not_provided: &'static str,
    surface: &'static str,
    dates: &'static str,
    custom_window: &'static str,
    price: &'static str,
    rebate: &'static str,
    summary: &'static str,
    subtotal: &'static str,
    discount: &'static str,
    closing: &'static str,
    regards: &'static str,
}

const FR: Labels = Labels {
    greeting: "Bonjour,\n\nJe souhaite réserver la glace avec les détails suivants:",
    client: "INFORMATIONS DU CLIENT",
    name: "Nom",
    phone: "Téléphone",
    email: "Courriel",
    not_provided: "Non fourni",
    surface: "TYPE DE SURFACE",
    dates: "DATES ET PÉRIODES",
    custom_window: "Plage personnalisée",
    price: "Prix",
    rebate: "rabais 10%",
    summary: "SOMMAIRE DES COÛTS",
    subtotal: "Sous-total",
    discount: "Rabais (10%)",
    closing: "Merci de confirmer la disponibilité.",
    regards: "Cordialement,",
};

const EN: Labels = Labels {
    greeting: "Hello,\n\nI would like to book the ice with the following details:",
    client: "CLIENT INFORMATION",
    name: "Name",
    phone: "Phone",
    email: "Email",
    not_provided: "Not provided",
    surface: "SURFACE TYPE",
    dates: "DATES AND PERIODS",
    custom_window: "Custom time",
    price: "Price",
    rebate: "10% rebate",
    summary: "COST SUMMARY",
    subtotal: "Subtotal",
    discount: "Rebate (10%)",
    closing: "Thank you for confirming availability.",
    regards: "Best regards,",
};

fn labels(lang: Lang) -> &'static Labels {
    match lang {
        Lang::Fr => &FR,
        Lang::En => &EN,
    }
}

/// "lundi 6 octobre 2025" / "Monday, October 6, 2025"
pub fn long_date(date: NaiveDate, lang: Lang) -> String {
    let weekday = lang.weekday_name(weekday_from_sunday(date));
    let month = lang.month_name(date.month());
    match lang {
        Lang::Fr => format!("{} {} {} {}", weekday, date.day(), month, date.year()),
        Lang::En => format!("{}, {} {}, {}", weekday, month, date.day(), date.year()),
    }
}

fn surface_label(ice_type: IceType, lang: Lang) -> String {
    match (ice_type, lang) {
        (IceType::Full, _) => ice_type.label(lang).to_string(),
        (IceType::Left, Lang::Fr) => format!("{} (côté gauche)", ice_type.label(lang)),
        (IceType::Right, Lang::Fr) => format!("{} (côté droit)", ice_type.label(lang)),
        (IceType::Left, Lang::En) => format!("{} (left side)", ice_type.label(lang)),
        (IceType::Right, Lang::En) => format!("{} (right side)", ice_type.label(lang)),
    }
}

/// Percent-encode like JavaScript's `encodeURIComponent`
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[derive(Clone)]
pub struct EmailService {
    config: BookingConfig,
    repository: Repository,
}

impl EmailService {
    pub fn new(config: BookingConfig, repository: Repository) -> Self {
        Self { config, repository }
    }

    /// Validate the contact details and the selection, then build the
    /// pre-filled reservation e-mail
    pub fn compose_reservation_email(
        &self,
        contact: &ContactInfo,
        session: &BookingSession,
        lang: Lang,
    ) -> AppResult<MailtoResponse> {
        contact
            .validate()
            .map_err(|e| AppError::Validation(validation_message(&e)))?;

        if session.selections().is_empty() {
            return Err(AppError::EmptySelection(MSG_NO_DATE.to_string()));
        }
        if !session.has_bookable_selection() {
            return Err(AppError::EmptySelection(MSG_NO_PERIOD.to_string()));
        }

        let subject = self.config.subject.clone();
        let body = self.build_body(contact, session, lang);
        let mailto = format!(
            "mailto:{}?subject={}&body={}",
            self.config.destination_email,
            encode_uri_component(&subject),
            encode_uri_component(&body)
        );

        tracing::info!(
            "Composed reservation e-mail for session {} ({} date(s))",
            session.id,
            session.selections().len()
        );

        Ok(MailtoResponse {
            mailto,
            subject,
            body,
        })
    }

    /// Compose the e-mail and drop the cached booking form on success
    pub async fn submit(
        &self,
        contact: &ContactInfo,
        session: &BookingSession,
        lang: Lang,
    ) -> AppResult<MailtoResponse> {
        let response = self.compose_reservation_email(contact, session, lang)?;
        self.repository.form_cache.clear(BOOKING_FORM_ID).await?;
        Ok(response)
    }

    fn build_body(&self, contact: &ContactInfo, session: &BookingSession, lang: Lang) -> String {
        let l = labels(lang);
        let mut body = String::new();
        let section = |body: &mut String, title: &str| {
            body.push_str(&format!("{}\n{}\n{}\n", RULE, title, RULE));
        };

        body.push_str(&format!("{}\n\n", l.greeting));

        section(&mut body, l.client);
        body.push_str(&format!("{}: {}\n", l.name, contact.full_name.trim()));
        body.push_str(&format!("{}: {}\n", l.phone, format_phone(&contact.phone)));
        let email = contact
            .email
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or(l.not_provided);
        body.push_str(&format!("{}: {}\n\n", l.email, email));

        section(&mut body, l.surface);
        body.push_str(&format!("{}\n\n", surface_label(session.ice_type, lang)));

        section(&mut body, l.dates);
        let lines = quote_lines(session, lang);
        let mut total = TotalQuote::default();
        let mut current: Option<NaiveDate> = None;
        let mut index = 0;
        for line in &lines {
            if current != Some(line.date) {
                if current.is_some() {
                    body.push('\n');
                }
                index += 1;
                current = Some(line.date);
                body.push_str(&format!("{}. {}\n", index, long_date(line.date, lang)));
            }
            let (label, range) = match &line.window {
                Some(window) => (l.custom_window.to_string(), window.to_string()),
                None => (
                    line.period.label.clone(),
                    format!(
                        "{} - {}",
                        line.period.start.format("%H:%M"),
                        line.period.end.format("%H:%M")
                    ),
                ),
            };
            body.push_str(&format!("   • {}: {}\n", label, range));
            if line.quote.has_rebate {
                body.push_str(&format!(
                    "     {}: {}$ → {}$ ({})\n",
                    l.price,
                    format_amount(line.quote.base),
                    format_amount(line.quote.final_price),
                    l.rebate
                ));
            } else {
                body.push_str(&format!("     {}: {}$\n", l.price, format_amount(line.quote.final_price)));
            }
            total.add(&line.quote);
        }
        body.push('\n');

        section(&mut body, l.summary);
        body.push_str(&format!("{}: {}$\n", l.subtotal, format_amount(total.base_total)));
        if total.discount > rust_decimal::Decimal::ZERO {
            body.push_str(&format!("{}: -{}$\n", l.discount, format_amount(total.discount)));
        }
        body.push_str(&format!("TOTAL: {}$\n\n", format_amount(total.total)));

        body.push_str(&format!("{}\n\n", l.closing));
        body.push_str(&format!("{}\n{}", l.regards, contact.full_name.trim()));
        body
    }
}

/// First message of each failing field, joined
fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Champ invalide: {}", field))
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
