//! Email-client HTML rendering for generated partner invitations.
//!
//! Table-based layout with inline styles only, so it survives being pasted
//! into webmail composers.

use roofguard_core::GeneratedEmail;
use roofguard_gemini::prompts::PARTNER_PORTAL_URL;

const PRIMARY: &str = "#ea580c";
const DARK: &str = "#111827";

/// Render `email` addressed to `company` as a standalone HTML document.
///
/// Body lines are trimmed, blank lines dropped, and the rest joined with
/// `<br><br>`. All interpolated text is escaped.
pub(crate) fn render_email_html(email: &GeneratedEmail, company: &str) -> String {
    let company = company.trim();
    let banner_company = escape(if company.is_empty() {
        "Premier Contractor"
    } else {
        company
    });
    let footer_company = escape(if company.is_empty() {
        "your firm"
    } else {
        company
    });
    let subject = escape(&email.subject);
    let body = format_body(&email.body);

    format!(
        r##"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
  <meta http-equiv="Content-Type" content="text/html; charset=UTF-8" />
  <title>Elite Partnership Invitation</title>
  <meta name="viewport" content="width=device-width, initial-scale=1.0"/>
</head>
<body style="margin: 0; padding: 0; background-color: #f6f9fc; font-family: Helvetica, Arial, sans-serif;">
  <table border="0" cellpadding="0" cellspacing="0" width="100%" bgcolor="#f6f9fc">
    <tr>
      <td align="center" style="padding: 40px 0;">
        <table border="0" cellpadding="0" cellspacing="0" width="600" style="background-color: #ffffff; border: 1px solid #e2e8f0;">
          <tr>
            <td bgcolor="{DARK}" style="padding: 30px 40px; color: #ffffff; font-size: 20px; font-weight: 800;">
              GTA ROOF <span style="color: {PRIMARY};">GUARD</span>
            </td>
          </tr>
          <tr>
            <td bgcolor="{PRIMARY}" align="center" style="padding: 50px 40px;">
              <h1 style="color: #ffffff; font-size: 28px; margin: 0;">
                Elite Partnership Invitation:<br />
                <span style="color: #ffedd5; text-transform: uppercase; font-size: 22px;">{banner_company}</span>
              </h1>
              <p style="color: #ffedd5; font-size: 11px; text-transform: uppercase; margin: 15px 0 0 0;">Vetted 24/7 Emergency Dispatch Network</p>
            </td>
          </tr>
          <tr>
            <td style="padding: 50px 40px;">
              <table border="0" cellpadding="0" cellspacing="0" width="100%" style="margin-bottom: 35px;">
                <tr>
                  <td style="background-color: #f8fafc; border-left: 4px solid {PRIMARY}; padding: 20px;">
                    <span style="font-size: 10px; color: #64748b; text-transform: uppercase;">Subject</span>
                    <p style="color: #0f172a; font-weight: 700; font-size: 17px; margin: 0;">{subject}</p>
                  </td>
                </tr>
              </table>
              <div style="color: #334155; font-size: 16px; line-height: 1.65;">
                {body}
              </div>
              <p style="margin: 40px 0 0 0; font-size: 14px; font-weight: 800; color: #0f172a;">Marcus</p>
              <p style="margin: 3px 0 0 0; font-size: 12px; color: #64748b;">Senior Growth Consultant | B2B Division</p>
              <table border="0" cellpadding="0" cellspacing="0" width="100%" style="margin-top: 50px;">
                <tr>
                  <td align="center">
                    <a href="{PARTNER_PORTAL_URL}" style="background-color: {DARK}; color: #ffffff; padding: 18px 40px; text-decoration: none; font-weight: 800;">Access Growth Portal</a>
                  </td>
                </tr>
              </table>
            </td>
          </tr>
          <tr>
            <td bgcolor="#f8fafc" style="padding: 30px 40px; font-size: 10px; color: #94a3b8; text-align: center;">
              This invitation is intended for the leadership of {footer_company}.<br/>
              Confidential Partnership Proposal. GTA Roof Guard.
            </td>
          </tr>
        </table>
      </td>
    </tr>
  </table>
</body>
</html>"##
    )
}

fn format_body(body: &str) -> String {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(escape)
        .collect::<Vec<_>>()
        .join("<br><br>")
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(subject: &str, body: &str) -> GeneratedEmail {
        GeneratedEmail {
            subject: subject.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn body_lines_are_trimmed_and_blank_lines_dropped() {
        assert_eq!(
            format_body("  Hi Dave,\n\n\n  We dispatch storms.  \n   \nMarcus"),
            "Hi Dave,<br><br>We dispatch storms.<br><br>Marcus"
        );
    }

    #[test]
    fn body_handles_crlf_line_endings() {
        assert_eq!(format_body("a\r\n\r\nb"), "a<br><br>b");
    }

    #[test]
    fn interpolated_text_is_escaped() {
        let html = render_email_html(
            &email("Tom & Sons <VIP>", "Rates \"below\" 5% > market"),
            "O'Brien Roofing",
        );
        assert!(html.contains("Tom &amp; Sons &lt;VIP&gt;"));
        assert!(html.contains("Rates &quot;below&quot; 5% &gt; market"));
        assert!(html.contains("O&#39;Brien Roofing"));
        assert!(!html.contains("<VIP>"));
    }

    #[test]
    fn blank_company_uses_generic_names() {
        let html = render_email_html(&email("Hello", "Body"), "  ");
        assert!(html.contains("Premier Contractor"));
        assert!(html.contains("leadership of your firm."));
    }

    #[test]
    fn document_links_to_partner_portal() {
        let html = render_email_html(&email("Hello", "Body"), "Apex Roofing");
        assert!(html.starts_with("<!DOCTYPE html"));
        assert!(html.contains(&format!("href=\"{PARTNER_PORTAL_URL}\"")));
        assert!(html.contains("Apex Roofing"));
    }

    #[test]
    fn document_keeps_hex_colours_and_closes() {
        let html = render_email_html(&email("Hello", "Body"), "Apex Roofing");
        assert!(html.contains(r##"bgcolor="#f6f9fc""##));
        assert!(html.contains(r##"bgcolor="#f8fafc""##));
        assert!(html.contains(&format!(r#"bgcolor="{PRIMARY}""#)));
        assert!(html.ends_with("</html>"));
    }
}
