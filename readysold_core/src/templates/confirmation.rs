//! Acknowledgement sent back to the customer

use super::{escape_html, layout, EmailDocument, TemplateContext};
use crate::models::{FormType, LeadData};

pub fn subject(ctx: &TemplateContext) -> String {
    format!("We've received your request - {}", ctx.company_name)
}

pub fn render(form_type: FormType, data: &LeadData, ctx: &TemplateContext) -> EmailDocument {
    let greeting = match data.name.as_deref() {
        Some(name) => format!("Hi {},", escape_html(name)),
        None => "Hi there,".to_string(),
    };

    let request = match form_type {
        FormType::Valuation => "valuation request",
        FormType::HeroForm => "enquiry",
    };

    let vehicle = data
        .registration
        .as_deref()
        .map(|reg| format!(" for <strong>{}</strong>", escape_html(reg)))
        .unwrap_or_default();

    let mut content = format!(
        r#"        <span class="priority-badge">&#10004; Request Received</span>

        <div class="section">
          <p>{greeting}</p>
          <p>Thanks for your {request}{vehicle}. One of our team will be in touch within 2 hours with your free valuation.</p>
        </div>
"#
    );

    content.push_str(&layout::highlight(
        "<strong>What happens next:</strong> We review your vehicle details, confirm a valuation, \
         and explain how our 30-day exclusive listing works. You keep driving while we sell.",
    ));
    content.push_str(&layout::timestamp(ctx));

    let shell = layout::Shell {
        title: "Request Received",
        heading: "&#128663; Thanks for getting in touch",
        tagline: "Your request is with our team",
        theme: &layout::CONFIRMATION_THEME,
    };

    EmailDocument {
        subject: subject(ctx),
        html: layout::render(&shell, &content, ctx),
    }
}
