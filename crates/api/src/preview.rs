//! Server-rendered web preview of a shared card.
//!
//! The web surface draws only the themes it supports; anything else renders
//! the unknown-theme marker instead of falling back to a default. Every page
//! carries the "Share Contact" form built from the card's lead-capture
//! configuration.

use onlycard_core::fields::{field_def, FieldKey};
use onlycard_core::lead_capture::{LeadCaptureConfig, LeadField};
use onlycard_core::platform::SocialLinks;
use onlycard_core::theme::{dispatch, Surface, ThemeId, ThemeVariant, UNKNOWN_THEME_MARKER};
use onlycard_db::models::card::Card;

/// Feedback shown above the contact form after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormNotice {
    Saved,
    Error(String),
}

/// Render the full preview page for `card`.
pub fn render_card_page(
    card: &Card,
    links: &SocialLinks,
    lead: &LeadCaptureConfig,
    notice: Option<&FormNotice>,
) -> String {
    let variant = dispatch(Surface::Web, Some(&card.theme));
    let body = match variant {
        ThemeVariant::Themed(ThemeId::HangingGlass) => render_hanging_glass(card, links),
        ThemeVariant::Themed(ThemeId::CoverSocial) => render_cover_social(card, links),
        ThemeVariant::Themed(ThemeId::ClassicDark) => render_classic_dark(card),
        ThemeVariant::Themed(ThemeId::StaticCard) | ThemeVariant::Unknown => {
            format!(r#"<div class="unknown-theme">{UNKNOWN_THEME_MARKER}</div>"#)
        }
    };
    let title = if card.full_name.is_empty() {
        "OnlyCard".to_string()
    } else {
        format!("{} | OnlyCard", html_escape(&card.full_name))
    };
    let form = render_contact_form(card, lead, notice);

    let body_class = match variant {
        ThemeVariant::Themed(theme) => theme.as_str(),
        ThemeVariant::Unknown => "theme-unknown",
    };
    page_shell(&title, body_class, &format!("{body}\n{form}"))
}

/// Page shown when a share id does not resolve to a card.
pub fn render_not_found() -> String {
    page_shell(
        "Card not found | OnlyCard",
        "not-found",
        r#"<div class="not-found"><h1>Card not found</h1><p>This card does not exist or failed to load.</p></div>"#,
    )
}

fn page_shell(title: &str, variant_class: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLES}</style>
</head>
<body class="{variant_class}">
{body}
</body>
</html>"#,
        variant_class = html_escape(variant_class),
    )
}

// ---------------------------------------------------------------------------
// Themes
// ---------------------------------------------------------------------------

fn render_hanging_glass(card: &Card, links: &SocialLinks) -> String {
    format!(
        r#"<div class="card glass">
    <div class="lanyard"></div>
    {avatar}
    <h1>{name}</h1>
    {designation}
    {company}
    <ul class="details">{details}</ul>
    {social}
</div>"#,
        avatar = image_tag(card.profile_image.as_deref(), "avatar"),
        name = html_escape(&card.full_name),
        designation = text_line("designation", &card.designation),
        company = text_line("company", &card.company),
        details = detail_rows(card, &[FieldKey::Mobile, FieldKey::Email, FieldKey::Website, FieldKey::Address]),
        social = social_row(links),
    )
}

fn render_cover_social(card: &Card, links: &SocialLinks) -> String {
    let cover = match card.cover_image.as_deref() {
        Some(src) => format!(
            r#"<div class="cover" style="background-image:url('{}')"></div>"#,
            html_escape(src)
        ),
        None => r#"<div class="cover"></div>"#.to_string(),
    };
    format!(
        r#"<div class="card cover-social">
    {cover}
    {avatar}
    {logo}
    <h1>{name}</h1>
    {designation}
    {bio}
    {social}
    <ul class="details">{details}</ul>
</div>"#,
        avatar = image_tag(card.profile_image.as_deref(), "avatar"),
        logo = image_tag(card.logo_image.as_deref(), "logo"),
        name = html_escape(&card.full_name),
        designation = text_line("designation", &card.designation),
        bio = text_line("bio", &card.bio),
        social = social_row(links),
        details = detail_rows(card, &[FieldKey::Mobile, FieldKey::Email, FieldKey::Website]),
    )
}

fn render_classic_dark(card: &Card) -> String {
    format!(
        r#"<div class="card dark">
    {avatar}
    <h1>{name}</h1>
    {designation}
    {company}
    <ul class="details">{details}</ul>
</div>"#,
        avatar = image_tag(card.profile_image.as_deref(), "avatar"),
        name = html_escape(&card.full_name),
        designation = text_line("designation", &card.designation),
        company = text_line("company", &card.company),
        details = detail_rows(card, &[FieldKey::Email, FieldKey::Mobile, FieldKey::Website]),
    )
}

// ---------------------------------------------------------------------------
// Fragments
// ---------------------------------------------------------------------------

fn image_tag(src: Option<&str>, class: &str) -> String {
    match src.filter(|s| !s.is_empty()) {
        Some(src) => format!(r#"<img class="{class}" src="{}" alt="">"#, html_escape(src)),
        None => String::new(),
    }
}

fn text_line(class: &str, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    format!(r#"<p class="{class}">{}</p>"#, html_escape(value))
}

fn detail_rows(card: &Card, keys: &[FieldKey]) -> String {
    keys.iter()
        .filter_map(|&key| {
            let value = card_field(card, key);
            if value.is_empty() {
                return None;
            }
            let value = html_escape(value);
            let shown = match key {
                FieldKey::Email => format!(r#"<a href="mailto:{value}">{value}</a>"#),
                FieldKey::Mobile => format!(r#"<a href="tel:{value}">{value}</a>"#),
                FieldKey::Website => format!(r#"<a href="{}">{value}</a>"#, website_href(&value)),
                _ => value,
            };
            Some(format!(
                r#"<li><span class="label">{}</span> {shown}</li>"#,
                field_def(key).label
            ))
        })
        .collect()
}

fn card_field(card: &Card, key: FieldKey) -> &str {
    match key {
        FieldKey::FullName => &card.full_name,
        FieldKey::Designation => &card.designation,
        FieldKey::Company => &card.company,
        FieldKey::Address => &card.address,
        FieldKey::Mobile => &card.mobile,
        FieldKey::Email => &card.email,
        FieldKey::Website => &card.website,
        FieldKey::Bio => &card.bio,
    }
}

/// Websites are often entered without a scheme.
fn website_href(escaped: &str) -> String {
    if escaped.starts_with("http://") || escaped.starts_with("https://") {
        escaped.to_string()
    } else {
        format!("https://{escaped}")
    }
}

fn social_row(links: &SocialLinks) -> String {
    if links.is_empty() {
        return String::new();
    }
    let items: String = links
        .iter()
        .map(|(platform, url)| {
            let def = platform.def();
            format!(
                r#"<a class="social {icon}" href="{url}" rel="noopener" target="_blank">{name}</a>"#,
                icon = def.icon,
                url = html_escape(url),
                name = def.name,
            )
        })
        .collect();
    format!(r#"<div class="social-links">{items}</div>"#)
}

fn render_contact_form(card: &Card, lead: &LeadCaptureConfig, notice: Option<&FormNotice>) -> String {
    if notice == Some(&FormNotice::Saved) {
        return r#"<div class="share-contact"><p class="notice saved">Thanks! Your contact has been shared.</p></div>"#
            .to_string();
    }

    let error = match notice {
        Some(FormNotice::Error(msg)) => {
            format!(r#"<p class="notice error">{}</p>"#, html_escape(msg))
        }
        _ => String::new(),
    };
    let open = if error.is_empty() { "" } else { " open" };
    let inputs: String = lead.visible_fields().into_iter().map(form_input).collect();

    format!(
        r#"<details class="share-contact"{open}>
    <summary>Share Contact</summary>
    <h2>{header}</h2>
    {error}
    <form method="post" action="/card/{share_id}/contact">
        {inputs}
        <button type="submit">Submit</button>
    </form>
    <p class="disclaimer">{disclaimer}</p>
</details>"#,
        header = html_escape(&lead.form_header),
        share_id = card.share_id,
        disclaimer = html_escape(&lead.disclaimer),
    )
}

fn form_input(field: LeadField) -> String {
    let name = field.as_str();
    let label = field.label();
    match field {
        LeadField::Email => format!(
            r#"<label>{label}<input type="email" name="{name}" required></label>"#
        ),
        LeadField::Mobile => format!(r#"<label>{label}<input type="tel" name="{name}"></label>"#),
        LeadField::Note => format!(r#"<label>{label}<textarea name="{name}"></textarea></label>"#),
        _ => format!(r#"<label>{label}<input type="text" name="{name}"></label>"#),
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const STYLES: &str = r#"
body { margin: 0; font-family: -apple-system, "Segoe UI", Roboto, sans-serif; background: #f2f2f7; color: #1c1c1e; }
.card { max-width: 420px; margin: 32px auto; padding: 24px; border-radius: 20px; text-align: center; }
.card h1 { margin: 12px 0 4px; font-size: 24px; }
.card .avatar { width: 96px; height: 96px; border-radius: 50%; object-fit: cover; }
.card .logo { height: 32px; }
.details { list-style: none; padding: 0; text-align: left; }
.details li { padding: 6px 0; }
.details .label { display: inline-block; min-width: 90px; opacity: .6; }
.glass { background: rgba(255,255,255,.6); backdrop-filter: blur(12px); box-shadow: 0 8px 32px rgba(0,0,0,.12); }
.glass .lanyard { width: 4px; height: 40px; margin: -24px auto 12px; background: #8e8e93; }
.cover-social { background: #fff; padding-top: 0; overflow: hidden; }
.cover-social .cover { height: 140px; margin: 0 -24px 16px; background: #c7c7cc center/cover; }
.social-links { display: flex; flex-wrap: wrap; justify-content: center; gap: 8px; margin: 12px 0; }
.social-links a { padding: 4px 10px; border-radius: 12px; background: #e5e5ea; color: inherit; text-decoration: none; }
.dark { background: linear-gradient(160deg, #1c1c1e, #3a3a3c); color: #f2f2f7; }
.dark a { color: #f2f2f7; }
.unknown-theme { max-width: 420px; margin: 32px auto; padding: 24px; text-align: center; }
.share-contact { max-width: 420px; margin: 0 auto 32px; padding: 0 24px; }
.share-contact summary { cursor: pointer; padding: 12px; border-radius: 12px; background: #007aff; color: #fff; text-align: center; list-style: none; }
.share-contact label { display: block; margin: 8px 0; }
.share-contact input, .share-contact textarea { display: block; width: 100%; padding: 8px; box-sizing: border-box; }
.notice.error { color: #ff3b30; }
.notice.saved { color: #34c759; text-align: center; }
.disclaimer { font-size: 12px; opacity: .6; }
.not-found { max-width: 420px; margin: 64px auto; padding: 24px; border-radius: 20px; background: #ff3b30; color: #fff; text-align: center; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use onlycard_core::lead_capture::LeadFieldToggles;
    use onlycard_core::platform::Platform;

    fn card(theme: &str) -> Card {
        let now = chrono::Utc::now();
        Card {
            id: 1,
            share_id: uuid::Uuid::nil(),
            user_id: 1,
            card_type: "business".into(),
            has_business_card: true,
            theme: theme.into(),
            profile_image: Some("https://cdn.example/me.png".into()),
            cover_image: None,
            logo_image: None,
            full_name: "Jane <Doe>".into(),
            designation: "CTO".into(),
            company: "Acme & Co".into(),
            address: String::new(),
            mobile: "0400 000 000".into(),
            email: "jane@example.com".into(),
            website: "acme.example".into(),
            bio: String::new(),
            social_links: serde_json::json!({}),
            lead_capture: serde_json::json!({}),
            created_at: now,
            updated_at: now,
        }
    }

    fn render(theme: &str, notice: Option<&FormNotice>) -> String {
        render_card_page(&card(theme), &SocialLinks::new(), &LeadCaptureConfig::default(), notice)
    }

    #[test]
    fn supported_web_themes_render_their_layout() {
        assert!(render("theme-hanging-glass", None).contains(r#"class="card glass""#));
        assert!(render("theme-cover-social", None).contains(r#"class="card cover-social""#));
        assert!(render("theme-classic-dark", None).contains(r#"class="card dark""#));
    }

    #[test]
    fn unsupported_themes_render_unknown_marker() {
        for theme in ["theme-static-card", "theme-neon", ""] {
            let html = render(theme, None);
            assert!(html.contains(UNKNOWN_THEME_MARKER), "theme {theme:?}");
            assert!(!html.contains(r#"class="card glass""#));
        }
    }

    #[test]
    fn theme_id_is_matched_loosely() {
        assert!(render("  Theme-Classic-Dark ", None).contains(r#"class="card dark""#));
    }

    #[test]
    fn user_text_is_escaped() {
        let html = render("theme-classic-dark", None);
        assert!(html.contains("Jane &lt;Doe&gt;"));
        assert!(html.contains("Acme &amp; Co"));
        assert!(!html.contains("<Doe>"));
    }

    #[test]
    fn website_gets_a_scheme() {
        let html = render("theme-classic-dark", None);
        assert!(html.contains(r#"href="https://acme.example""#));
    }

    #[test]
    fn contact_form_follows_lead_config() {
        let mut lead = LeadCaptureConfig {
            form_header: "Stay in touch".into(),
            ..LeadCaptureConfig::default()
        };
        lead.fields = LeadFieldToggles::default();
        lead.fields.set(LeadField::Mobile, false);
        lead.fields.set(LeadField::Email, false);

        let html = render_card_page(&card("theme-hanging-glass"), &SocialLinks::new(), &lead, None);
        assert!(html.contains("Share Contact"));
        assert!(html.contains("Stay in touch"));
        assert!(html.contains(r#"name="email""#));
        assert!(!html.contains(r#"name="mobile""#));
        assert!(html.contains("/card/00000000-0000-0000-0000-000000000000/contact"));
    }

    #[test]
    fn social_links_are_listed() {
        let mut links = SocialLinks::new();
        links.insert(Platform::Instagram, "https://instagram.com/jane".into());
        let html = render_card_page(
            &card("theme-cover-social"),
            &links,
            &LeadCaptureConfig::default(),
            None,
        );
        assert!(html.contains(r#"href="https://instagram.com/jane""#));
        assert!(html.contains("Instagram"));
    }

    #[test]
    fn notices_change_the_form() {
        let error = FormNotice::Error("Please enter a valid email.".into());
        let html = render("theme-hanging-glass", Some(&error));
        assert!(html.contains("Please enter a valid email."));
        assert!(html.contains(r#"<details class="share-contact" open>"#));

        let html = render("theme-hanging-glass", Some(&FormNotice::Saved));
        assert!(html.contains("Your contact has been shared"));
        assert!(!html.contains("<form"));
    }

    #[test]
    fn not_found_page() {
        assert!(render_not_found().contains("Card not found"));
    }
}
