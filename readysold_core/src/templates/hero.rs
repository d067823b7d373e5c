//! Internal notification for the short hero-section form

use super::{contact_rows, layout, registration_row, EmailDocument, TemplateContext};
use crate::models::LeadData;

pub fn subject(data: &LeadData) -> String {
    format!("New Lead - {}", data.name.as_deref().unwrap_or("Quick Enquiry"))
}

pub fn render(data: &LeadData, ctx: &TemplateContext) -> EmailDocument {
    let mut content = String::from(
        r#"        <span class="priority-badge">&#128293; Hot Lead</span>

        <div class="quick-lead-badge">
          <h3>Priority Lead</h3>
          <p>This customer used the quick form - they want fast action!</p>
        </div>

"#,
    );

    content.push_str(&layout::section("Vehicle Information", &[registration_row(data)]));
    content.push_str(&layout::section("Contact Details", &contact_rows(data)));
    content.push_str(&layout::timestamp(ctx));
    content.push_str(&layout::highlight(
        "&#9889; Quick Action Required: Respond within 30 minutes for best conversion rates. \
         This lead came from the hero section - high intent!",
    ));

    let shell = layout::Shell {
        title: "Quick Enquiry",
        heading: "&#9889; Quick Enquiry",
        tagline: "Fast response needed - Hero form submission",
        theme: &layout::HERO_THEME,
    };

    EmailDocument {
        subject: subject(data),
        html: layout::render(&shell, &content, ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::test_support::context;

    #[test]
    fn test_subject_contains_name() {
        let lead = LeadData {
            name: Some("Jane Doe".to_string()),
            ..LeadData::default()
        };
        let doc = render(&lead, &context());
        assert!(doc.subject.contains("Jane Doe"));
        assert_eq!(doc.subject, "New Lead - Jane Doe");
    }

    #[test]
    fn test_subject_without_name() {
        assert_eq!(subject(&LeadData::default()), "New Lead - Quick Enquiry");
    }

    #[test]
    fn test_body_is_the_short_form() {
        let lead = LeadData {
            name: Some("Jane Doe".to_string()),
            registration: Some("AB12 CDE".to_string()),
            phone: Some("07123456789".to_string()),
            ..LeadData::default()
        };
        let html = render(&lead, &context()).html;

        assert!(html.contains("Priority Lead"));
        assert!(html.contains("<strong>AB12 CDE</strong>"));
        assert!(html.contains("Contact Details"));
        assert!(!html.contains("Asking Price"));
        assert!(!html.contains("Mileage"));
    }
}
