//! Server-rendered HTML pages.
//!
//! Pages are handlebars templates under `templates/`, compiled once on first
//! use. Handlebars HTML-escapes every `{{value}}`; only markup produced here
//! (the page body and the data URI) is inserted raw.

use axum::response::Html;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use handlebars::Handlebars;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{json, Value};

use crate::constants::MSG_INTERNAL;
use crate::models::{ColorPalette, LogoRecord, LogoRequest, Theme};
use crate::services::CreatedLogo;

static TEMPLATES: Lazy<Handlebars<'static>> = Lazy::new(|| {
    let mut hb = Handlebars::new();
    let sources = [
        ("layout", include_str!("../templates/layout.hbs")),
        ("credentials", include_str!("../templates/credentials.hbs")),
        ("home", include_str!("../templates/home.hbs")),
        ("generate", include_str!("../templates/generate.hbs")),
    ];
    for (name, source) in sources {
        if let Err(e) = hb.register_template_string(name, source) {
            tracing::error!("Failed to register template {}: {}", name, e);
        }
    }
    hb
});

fn render(name: &str, data: &Value) -> Option<String> {
    TEMPLATES
        .render(name, data)
        .inspect_err(|e| tracing::error!("Failed to render template {}: {}", name, e))
        .ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

/// One status message shown above the page content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub text: String,
}

impl Flash {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Info,
            text: text.into(),
        }
    }
}

/// Which sidebar entries to show and which one is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Login,
    SignUp,
    Home,
    Generate,
    Guest,
}

impl Nav {
    fn context(self) -> Value {
        json!({
            "logged_in": matches!(self, Nav::Home | Nav::Generate),
            "login": self == Nav::Login,
            "signup": self == Nav::SignUp,
            "home": self == Nav::Home,
            "generate": self == Nav::Generate,
        })
    }
}

fn layout(title: &str, nav: Nav, flashes: &[Flash], body: Option<String>) -> Html<String> {
    let page = body.and_then(|body| {
        render(
            "layout",
            &json!({
                "title": title,
                "nav": nav.context(),
                "flashes": flashes,
                "body": body,
            }),
        )
    });

    Html(page.unwrap_or_else(|| MSG_INTERNAL.to_string()))
}

fn credentials_form(action: &str, button: &str, email: &str) -> Option<String> {
    render(
        "credentials",
        &json!({ "action": action, "button": button, "email": email }),
    )
}

pub fn login_page(email: &str, flash: Option<Flash>) -> Html<String> {
    let flashes: Vec<Flash> = flash.into_iter().collect();
    layout(
        "Login",
        Nav::Login,
        &flashes,
        credentials_form("/login", "Login", email),
    )
}

pub fn signup_page(email: &str, flash: Option<Flash>) -> Html<String> {
    let flashes: Vec<Flash> = flash.into_iter().collect();
    layout(
        "Sign Up",
        Nav::SignUp,
        &flashes,
        credentials_form("/signup", "Create Account", email),
    )
}

/// "My Logos": every record of the user's collection, in store order
pub fn home_page(logos: &[LogoRecord], flashes: &[Flash]) -> Html<String> {
    let logos: Vec<Value> = logos
        .iter()
        .map(|logo| {
            json!({
                "id": logo.id,
                "file_url": logo.file_url,
                "caption": logo.caption(),
            })
        })
        .collect();

    let body = render("home", &json!({ "logos": logos }));
    layout("My Logos", Nav::Home, flashes, body)
}

fn options<T: PartialEq>(all: &[T], current: &T, label: impl Fn(&T) -> &'static str) -> Vec<Value> {
    all.iter()
        .map(|item| json!({ "value": label(item), "selected": item == current }))
        .collect()
}

fn generated_logo(created: &CreatedLogo) -> Value {
    let data_uri = format!(
        "data:{};base64,{}",
        created.image.format.mime_type(),
        STANDARD.encode(&created.image.bytes)
    );

    json!({
        "data_uri": data_uri,
        "download_name": created.download_name,
        "file_url": created.file_url,
    })
}

pub fn generate_page(
    previous: Option<&LogoRequest>,
    created: Option<&CreatedLogo>,
    flash: Option<Flash>,
) -> Html<String> {
    let flashes: Vec<Flash> = flash.into_iter().collect();
    let theme = previous.map(|r| r.theme).unwrap_or(Theme::ALL[0]);
    let palette = previous
        .map(|r| r.color_palette)
        .unwrap_or(ColorPalette::ALL[0]);

    let body = render(
        "generate",
        &json!({
            "title": previous.map(|r| r.title.as_str()).unwrap_or_default(),
            "description": previous.map(|r| r.description.as_str()).unwrap_or_default(),
            "themes": options(&Theme::ALL, &theme, |t| t.as_str()),
            "palettes": options(&ColorPalette::ALL, &palette, |p| p.as_str()),
            "created": created.map(generated_logo),
        }),
    );

    layout("Logo Generator", Nav::Generate, &flashes, body)
}

pub fn error_page(message: &str) -> Html<String> {
    layout(
        "Error",
        Nav::Guest,
        &[Flash::error(message)],
        Some(r#"<p><a href="/">Back</a></p>"#.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeneratedImage;

    #[test]
    fn test_user_input_is_escaped() {
        let Html(html) = login_page(r#""><script>alert(1)</script>"#, None);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains(r#"value="&quot;&gt;"#));
    }

    #[test]
    fn test_home_page_escapes_captions() {
        let logos = vec![LogoRecord {
            id: "1".to_string(),
            title: "<b>Bold</b>".to_string(),
            description: "x".to_string(),
            file_url: "https://example.com/a.png".to_string(),
            timestamp: None,
        }];

        let Html(html) = home_page(&logos, &[]);
        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt; - x"));
        assert!(!html.contains("<b>Bold</b>"));
    }

    #[test]
    fn test_home_page_empty_state() {
        let Html(html) = home_page(&[], &[]);
        assert!(html.contains(r#"class="empty""#));
        assert!(!html.contains("<figure"));
    }

    #[test]
    fn test_generation_form_lists_every_option() {
        let Html(html) = generate_page(None, None, None);

        for theme in Theme::ALL {
            assert!(html.contains(&format!(r#"value="{}""#, theme.as_str())));
        }
        for palette in ColorPalette::ALL {
            assert!(html.contains(&format!(r#"value="{}""#, palette.as_str())));
        }
        assert!(!html.contains("Generated Logo"));
    }

    #[test]
    fn test_generated_logo_has_download_link() {
        let created = CreatedLogo {
            id: "doc".to_string(),
            file_url: "https://example.com/logos/a.png".to_string(),
            image: GeneratedImage::decode(b"\x89PNG\r\n\x1a\n".to_vec()).unwrap(),
            download_name: "My_Logo_logo.png".to_string(),
        };

        let Html(html) = generate_page(None, Some(&created), Some(Flash::success("ok")));
        assert!(html.contains(r#"download="My_Logo_logo.png""#));
        assert!(html.contains("data:image/png;base64,iVBORw0KGgo="));
        assert!(html.contains("https://example.com/logos/a.png"));
        assert!(html.contains(r#"class="flash success""#));
    }

    #[test]
    fn test_generation_form_keeps_previous_choice() {
        let request = LogoRequest {
            title: "Acme".to_string(),
            description: "rockets".to_string(),
            theme: Theme::Cartoon,
            color_palette: ColorPalette::Pastel,
        };

        let Html(html) = generate_page(Some(&request), None, None);
        assert!(html.contains(r#"<option value="Cartoon" selected>"#));
        assert!(html.contains(r#"value="Pastel" checked>"#));
        assert_eq!(html.matches(" selected>").count(), 1);
        assert!(html.contains(r#"name="title" value="Acme""#));
    }

    #[test]
    fn test_sidebar_depends_on_login_state() {
        let Html(logged_out) = login_page("", None);
        assert!(logged_out.contains("Sign Up"));
        assert!(!logged_out.contains("Logout"));

        let Html(logged_in) = home_page(&[], &[]);
        assert!(logged_in.contains("Logout"));
        assert!(logged_in.contains("Generate Logo"));
    }
}
