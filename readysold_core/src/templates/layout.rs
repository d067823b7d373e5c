//! Shared document shell for all outgoing emails

use super::{escape_html, TemplateContext};
use chrono::Datelike;

const BASE_CSS: &str = r#"
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif; line-height: 1.6; color: #1e293b; background-color: #f1f5f9; -webkit-font-smoothing: antialiased; }
    .email-wrapper { width: 100%; background-color: #f1f5f9; padding: 40px 0; }
    .email-container { max-width: 680px; margin: 0 auto; background-color: #ffffff; border-radius: 12px; overflow: hidden; box-shadow: 0 4px 6px -1px rgba(0, 0, 0, 0.1), 0 2px 4px -1px rgba(0, 0, 0, 0.06); }
    .header { padding: 50px 40px; text-align: center; }
    .logo { margin-bottom: 20px; }
    .logo img { max-width: 200px; height: auto; display: inline-block; }
    .header h1 { color: #ffffff; margin: 20px 0 10px 0; font-size: 32px; font-weight: 700; letter-spacing: -0.5px; }
    .header p { color: rgba(255, 255, 255, 0.9); font-size: 16px; }
    .banner-image { width: 100%; height: 200px; overflow: hidden; }
    .banner-image img { width: 100%; height: 100%; object-fit: cover; object-position: center; opacity: 0.9; }
    .content { padding: 50px 40px; }
    .priority-badge { display: inline-block; color: #ffffff; padding: 8px 20px; border-radius: 20px; font-size: 13px; font-weight: 700; text-transform: uppercase; letter-spacing: 0.5px; margin-bottom: 30px; }
    .section { margin-bottom: 40px; }
    .section-title { color: #0f172a; font-size: 20px; font-weight: 700; margin-bottom: 20px; padding-bottom: 12px; border-bottom: 3px solid #0ea5e9; }
    .info-grid { display: table; width: 100%; border-collapse: collapse; }
    .info-row { display: table-row; }
    .info-label { display: table-cell; font-weight: 600; color: #475569; padding: 12px 20px 12px 0; width: 40%; vertical-align: top; }
    .info-value { display: table-cell; color: #0f172a; padding: 12px 0; font-weight: 500; vertical-align: top; }
    .info-value strong { color: #0ea5e9; font-size: 18px; }
    .info-value a { color: #0ea5e9; text-decoration: none; font-weight: 600; }
    .highlight-box { border-left: 4px solid; padding: 25px; margin: 30px 0; border-radius: 8px; }
    .highlight-box p { line-height: 1.7; }
    .message-box { background-color: #f8fafc; border: 2px solid #e2e8f0; border-radius: 8px; padding: 25px; margin: 20px 0; }
    .message-box p { color: #334155; line-height: 1.8; font-size: 15px; white-space: pre-line; }
    .timestamp { border-left: 4px solid; padding: 20px 25px; border-radius: 8px; margin-top: 30px; }
    .timestamp p { font-weight: 600; font-size: 15px; }
    .quick-lead-badge { text-align: center; padding: 30px; background: linear-gradient(135deg, #f0f9ff 0%, #e0f2fe 100%); border-radius: 8px; margin-bottom: 30px; }
    .quick-lead-badge h3 { color: #0ea5e9; font-size: 24px; margin-bottom: 10px; }
    .quick-lead-badge p { color: #475569; font-size: 14px; }
    .footer { background-color: #0f172a; padding: 40px 40px 30px 40px; text-align: center; }
    .footer-logo { margin-bottom: 20px; }
    .footer-logo img { max-width: 150px; height: auto; opacity: 0.9; }
    .footer-text { color: rgba(255, 255, 255, 0.8); font-size: 14px; margin-bottom: 20px; }
    .footer-links { margin: 25px 0 20px 0; }
    .footer-links a { color: #0ea5e9; text-decoration: none; font-size: 13px; font-weight: 500; }
    .footer-divider { color: rgba(255, 255, 255, 0.3); margin: 0 10px; }
    .footer-copyright { color: rgba(255, 255, 255, 0.5); font-size: 12px; margin-top: 20px; }
    @media only screen and (max-width: 600px) {
      .email-wrapper { padding: 20px 0; }
      .email-container { border-radius: 0; }
      .header { padding: 40px 25px; }
      .header h1 { font-size: 26px; }
      .content { padding: 35px 25px; }
      .footer { padding: 35px 25px 25px 25px; }
      .info-label, .info-value { display: block; width: 100%; padding: 8px 0; }
      .info-label { font-weight: 700; color: #0f172a; }
    }
"#;

/// Per-email colour scheme.
pub struct Theme {
    pub header_background: &'static str,
    pub badge_background: &'static str,
    pub highlight_background: &'static str,
    pub highlight_border: &'static str,
    pub highlight_text: &'static str,
    pub timestamp_background: &'static str,
    pub timestamp_border: &'static str,
    pub timestamp_text: &'static str,
}

pub const VALUATION_THEME: Theme = Theme {
    header_background: "linear-gradient(135deg, #0f172a 0%, #1e293b 100%)",
    badge_background: "linear-gradient(135deg, #0ea5e9 0%, #0284c7 100%)",
    highlight_background: "linear-gradient(135deg, #f0f9ff 0%, #e0f2fe 100%)",
    highlight_border: "#0ea5e9",
    highlight_text: "#0f172a",
    timestamp_background: "#fef3c7",
    timestamp_border: "#f59e0b",
    timestamp_text: "#92400e",
};

pub const HERO_THEME: Theme = Theme {
    header_background: "linear-gradient(135deg, #0ea5e9 0%, #38bdf8 100%)",
    badge_background: "linear-gradient(135deg, #f59e0b 0%, #d97706 100%)",
    highlight_background: "linear-gradient(135deg, #fef3c7 0%, #fde68a 100%)",
    highlight_border: "#f59e0b",
    highlight_text: "#78350f",
    timestamp_background: "#f0f9ff",
    timestamp_border: "#0ea5e9",
    timestamp_text: "#075985",
};

pub const CONFIRMATION_THEME: Theme = Theme {
    header_background: "linear-gradient(135deg, #0ea5e9 0%, #0284c7 100%)",
    badge_background: "linear-gradient(135deg, #10b981 0%, #059669 100%)",
    highlight_background: "linear-gradient(135deg, #f0f9ff 0%, #e0f2fe 100%)",
    highlight_border: "#0ea5e9",
    highlight_text: "#0f172a",
    timestamp_background: "#f0f9ff",
    timestamp_border: "#0ea5e9",
    timestamp_text: "#075985",
};

fn theme_css(theme: &Theme) -> String {
    format!(
        ".header {{ background: {}; }}\n    \
         .priority-badge {{ background: {}; }}\n    \
         .highlight-box {{ background: {}; border-left-color: {}; }}\n    \
         .highlight-box p {{ color: {}; }}\n    \
         .timestamp {{ background-color: {}; border-left-color: {}; }}\n    \
         .timestamp p {{ color: {}; }}",
        theme.header_background,
        theme.badge_background,
        theme.highlight_background,
        theme.highlight_border,
        theme.highlight_text,
        theme.timestamp_background,
        theme.timestamp_border,
        theme.timestamp_text,
    )
}

pub struct Shell<'a> {
    pub title: &'a str,
    pub heading: &'a str,
    pub tagline: &'a str,
    pub theme: &'a Theme,
}

/// Wraps `content` (already-escaped HTML) in the header, banner and footer.
pub fn render(shell: &Shell<'_>, content: &str, ctx: &TemplateContext) -> String {
    let base_url = escape_html(ctx.site_base_url.trim_end_matches('/'));
    let company = escape_html(&ctx.company_name);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta http-equiv="X-UA-Compatible" content="IE=edge">
  <title>{title} - {company}</title>
  <style>{base_css}
    {theme_css}
  </style>
</head>
<body>
  <div class="email-wrapper">
    <div class="email-container">
      <div class="header">
        <div class="logo">
          <img src="{base_url}/images/photograph.png" alt="{company} Logo">
        </div>
        <h1>{heading}</h1>
        <p>{tagline}</p>
      </div>

      <div class="banner-image">
        <img src="{base_url}/images/photograph.png" alt="{company} Vehicle">
      </div>

      <div class="content">
{content}
      </div>

      <div class="footer">
        <div class="footer-logo">
          <img src="{base_url}/images/photograph.png" alt="{company}">
        </div>
        <p class="footer-text">
          <strong>{company}</strong><br>
          Professional car selling service - Keep driving while we sell
        </p>
        <div class="footer-links">
          <a href="{base_url}/terms.html">Terms &amp; Conditions</a>
          <span class="footer-divider">&bull;</span>
          <a href="{base_url}/privacy.html">Privacy Policy</a>
          <span class="footer-divider">&bull;</span>
          <a href="{base_url}/contact.html">Contact Us</a>
        </div>
        <p class="footer-copyright">
          &copy; {year} {company}. All rights reserved.
        </p>
      </div>
    </div>
  </div>
</body>
</html>
"#,
        title = escape_html(shell.title),
        company = company,
        base_css = BASE_CSS,
        theme_css = theme_css(shell.theme),
        base_url = base_url,
        heading = shell.heading,
        tagline = escape_html(shell.tagline),
        content = content,
        year = ctx.submitted_at.year(),
    )
}

/// One label/value row; `value_html` must already be escaped.
pub fn info_row(label: &str, value_html: &str) -> String {
    format!(
        r#"            <div class="info-row">
              <div class="info-label">{}:</div>
              <div class="info-value">{}</div>
            </div>
"#,
        escape_html(label),
        value_html
    )
}

pub fn section(title: &str, rows: &[String]) -> String {
    format!(
        r#"        <div class="section">
          <h2 class="section-title">{}</h2>
          <div class="info-grid">
{}          </div>
        </div>
"#,
        escape_html(title),
        rows.concat()
    )
}

pub fn timestamp(ctx: &TemplateContext) -> String {
    format!(
        r#"        <div class="timestamp">
          <p>&#9200; Submitted: {}</p>
        </div>
"#,
        escape_html(&super::format_submitted_at(ctx))
    )
}

pub fn highlight(body_html: &str) -> String {
    format!(
        r#"        <div class="highlight-box">
          <p>{}</p>
        </div>
"#,
        body_html
    )
}
