//! Internal notification for a full valuation request

use super::{
    contact_rows, escape_html, escaped_or, layout, registration_row, EmailDocument, TemplateContext,
    NOT_PROVIDED,
};
use crate::format::format_numeric_text;
use crate::models::LeadData;

pub fn subject(data: &LeadData) -> String {
    format!("New Valuation Request - {}", data.registration.as_deref().unwrap_or("N/A"))
}

fn mileage(data: &LeadData) -> String {
    match data.mileage.as_deref() {
        Some(raw) => {
            let miles = format_numeric_text(raw).unwrap_or_else(|| raw.to_string());
            format!("{} miles", escape_html(&miles))
        }
        None => NOT_PROVIDED.to_string(),
    }
}

fn asking_price(data: &LeadData) -> String {
    match data.expected_price.as_deref() {
        Some(raw) => {
            let price = format_numeric_text(raw).unwrap_or_else(|| raw.to_string());
            format!("&pound;{}", escape_html(&price))
        }
        None => NOT_PROVIDED.to_string(),
    }
}

pub fn render(data: &LeadData, ctx: &TemplateContext) -> EmailDocument {
    let mut content = String::from("        <span class=\"priority-badge\">&#9889; New Lead</span>\n\n");

    content.push_str(&layout::section(
        "Vehicle Details",
        &[
            registration_row(data),
            layout::info_row("Mileage", &mileage(data)),
            layout::info_row("Asking Price", &asking_price(data)),
            layout::info_row("Condition", &escaped_or(data.condition.as_deref(), "Not specified")),
        ],
    ));
    content.push_str(&layout::section("Contact Information", &contact_rows(data)));

    if let Some(message) = data.message.as_deref() {
        content.push_str(&format!(
            r#"        <div class="section">
          <h2 class="section-title">Additional Information</h2>
          <div class="message-box">
            <p>{}</p>
          </div>
        </div>
"#,
            escape_html(message)
        ));
    }

    content.push_str(&layout::timestamp(ctx));
    content.push_str(&layout::highlight(
        "<strong>Next Steps:</strong> Contact this lead promptly to provide their free valuation \
         and discuss the 30-day exclusive listing process.",
    ));

    let shell = layout::Shell {
        title: "New Valuation Request",
        heading: "&#128663; New Valuation Request",
        tagline: "A potential customer is ready to sell their vehicle",
        theme: &layout::VALUATION_THEME,
    };

    EmailDocument {
        subject: subject(data),
        html: layout::render(&shell, &content, ctx),
    }
}
