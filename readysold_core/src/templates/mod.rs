//! HTML email documents for each kind of lead

pub mod confirmation;
pub mod hero;
pub mod layout;
pub mod valuation;

use crate::config::EmailConfig;
use crate::models::{LeadData, LeadSubmission};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const NOT_PROVIDED: &str = "Not provided";

/// Subject line and HTML body, ready to address and send.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailDocument {
    pub subject: String,
    pub html: String,
}

/// Everything a template needs besides the lead itself.
#[derive(Debug, Clone)]
pub struct TemplateContext {
    pub site_base_url: String,
    pub company_name: String,
    pub submitted_at: DateTime<Utc>,
}

impl TemplateContext {
    pub fn new(site_base_url: impl Into<String>, company_name: impl Into<String>, submitted_at: DateTime<Utc>) -> Self {
        Self {
            site_base_url: site_base_url.into(),
            company_name: company_name.into(),
            submitted_at,
        }
    }

    pub fn from_config(config: &EmailConfig, submitted_at: DateTime<Utc>) -> Self {
        Self::new(config.site_base_url.clone(), config.company_name.clone(), submitted_at)
    }
}

/// The internal notification for a lead.
pub fn render_notification(submission: &LeadSubmission, ctx: &TemplateContext) -> EmailDocument {
    match submission {
        LeadSubmission::Valuation(data) => valuation::render(data, ctx),
        LeadSubmission::HeroForm(data) => hero::render(data, ctx),
    }
}

/// The acknowledgement sent to the customer who submitted the lead.
pub fn render_confirmation(submission: &LeadSubmission, ctx: &TemplateContext) -> EmailDocument {
    confirmation::render(submission.form_type(), submission.data(), ctx)
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// e.g. `Saturday 17 October 2026 at 14:05`
pub fn format_submitted_at(ctx: &TemplateContext) -> String {
    ctx.submitted_at.format("%A %-d %B %Y at %H:%M").to_string()
}

fn escaped_or(value: Option<&str>, fallback: &str) -> String {
    escape_html(value.unwrap_or(fallback))
}

fn mailto_link(email: Option<&str>) -> String {
    match email {
        Some(email) => format!(r#"<a href="mailto:{0}">{0}</a>"#, escape_html(email)),
        None => NOT_PROVIDED.to_string(),
    }
}

fn tel_link(phone: Option<&str>) -> String {
    match phone {
        Some(phone) => {
            let dial: String = phone.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect();
            format!(r#"<a href="tel:{}">{}</a>"#, escape_html(&dial), escape_html(phone))
        }
        None => NOT_PROVIDED.to_string(),
    }
}

fn contact_rows(data: &LeadData) -> Vec<String> {
    vec![
        layout::info_row("Name", &escaped_or(data.name.as_deref(), NOT_PROVIDED)),
        layout::info_row("Email", &mailto_link(data.email.as_deref())),
        layout::info_row("Phone", &tel_link(data.phone.as_deref())),
    ]
}

fn registration_row(data: &LeadData) -> String {
    layout::info_row(
        "Registration",
        &format!("<strong>{}</strong>", escaped_or(data.registration.as_deref(), NOT_PROVIDED)),
    )
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeadData;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
        assert_eq!(escape_html("AB12 CDE"), "AB12 CDE");
    }

    #[test]
    fn test_submitted_at_format() {
        assert_eq!(format_submitted_at(&test_support::context()), "Saturday 17 October 2026 at 14:05");
    }

    #[test]
    fn test_notification_dispatches_on_variant() {
        let ctx = test_support::context();
        let data = LeadData {
            name: Some("Jane Doe".to_string()),
            registration: Some("AB12CDE".to_string()),
            ..LeadData::default()
        };

        let valuation = render_notification(&LeadSubmission::Valuation(data.clone()), &ctx);
        assert_eq!(valuation.subject, "New Valuation Request - AB12CDE");

        let hero = render_notification(&LeadSubmission::HeroForm(data), &ctx);
        assert_eq!(hero.subject, "New Lead - Jane Doe");
    }

    #[test]
    fn test_contact_links() {
        assert_eq!(mailto_link(None), "Not provided");
        assert_eq!(
            tel_link(Some("07123 456 789")),
            r#"<a href="tel:07123456789">07123 456 789</a>"#
        );
        assert_eq!(
            mailto_link(Some("jane@example.com")),
            r#"<a href="mailto:jane@example.com">jane@example.com</a>"#
        );
    }
}
