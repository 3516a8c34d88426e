//! Shared HTML components used across all pages.
//!
//! These are maud functions that return `Markup` fragments for composition
//! into full pages.

use folio_core::{DEFAULT_IMAGE, escape_html};
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Inline CSS for all pages.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
:root{--bg:#f7f7f5;--fg:#1b1b1f;--fg2:#505058;--fg3:#8a8a94;--accent:#2f6fde;--accent-hover:#1f56b5;--surface:#fff;--border:rgba(47,111,222,.18);--error:#c0392b;--success:#1e8449}
body{font-family:Inter,-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.6;color:var(--fg);background:var(--bg);min-height:100vh;display:flex;flex-direction:column;align-items:center;padding:1.5rem 1rem}
main{max-width:860px;width:100%;flex:1}
a{color:var(--accent);text-decoration:none}
a:hover{text-decoration:underline}
img{max-width:100%;height:auto}
h1{font-size:2rem;letter-spacing:-.02em;margin-bottom:1rem}
h2{font-size:1.4rem;margin:1.5rem 0 .75rem}

.site-nav{display:flex;gap:1.25rem;align-items:center;width:100%;max-width:860px;margin-bottom:1.5rem}
.site-name{font-weight:800;font-size:1.2rem;color:var(--fg);margin-right:auto}
.site-nav a.active{font-weight:600;text-decoration:underline}

.project-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(240px,1fr));gap:1rem}
.project-card{padding:1.25rem;background:var(--surface);border:1px solid var(--border);border-radius:10px;display:flex;flex-direction:column;gap:.5rem}
.project-card h3{font-size:1.1rem}
.project-image{width:100%;height:140px;object-fit:cover;border-radius:6px;background:var(--border)}
.project-meta{font-size:.85rem;color:var(--fg3)}
.tech-list{font-size:.9rem;color:var(--fg2)}
.details-link{align-self:flex-start;margin-top:auto;padding:.35rem .8rem;border-radius:6px;background:var(--accent);color:#fff;font-size:.85rem}
.details-link:hover{background:var(--accent-hover);text-decoration:none}
.empty-state{color:var(--fg3);font-style:italic}

#projectDetails{margin-top:1.5rem;padding:1.5rem;background:var(--surface);border:1px solid var(--border);border-radius:10px}
#projectDetails:empty{display:none}
.project-detail-image{max-height:280px;object-fit:cover;border-radius:8px;margin:.75rem 0}
.error-message{color:var(--error);border-color:var(--error)!important}

.filter{display:flex;gap:.5rem;align-items:center;margin-bottom:1rem}
form{display:flex;flex-direction:column;gap:.6rem;max-width:560px}
form label{font-weight:600;font-size:.9rem}
input,textarea,select{font:inherit;padding:.45rem .6rem;border:1px solid var(--border);border-radius:6px;background:var(--surface)}
textarea{min-height:110px}
button{font:inherit;padding:.5rem 1rem;border:none;border-radius:6px;background:var(--accent);color:#fff;cursor:pointer;align-self:flex-start}
button:hover{background:var(--accent-hover)}
.form-flex-container{display:flex;gap:1rem;flex-wrap:wrap}
.input-group{display:flex;flex-direction:column;gap:.3rem;flex:1;min-width:160px}
.file-upload-container{display:flex;flex-direction:column;gap:.3rem}

.form-error{color:var(--error);font-weight:600}
.form-success{color:var(--success);font-weight:600;animation:folio-hide 0s linear 3s forwards}
@keyframes folio-hide{to{visibility:hidden;height:0;margin:0;overflow:hidden}}

.footer{text-align:center;margin-top:2rem;padding-top:.75rem;font-size:.8rem;color:var(--fg3);width:100%;max-width:860px}

@media(prefers-color-scheme:dark){
:root{--bg:#0f1014;--fg:#e6e6ea;--fg2:#a3a3ad;--fg3:#6c6c76;--accent:#6aa0ff;--accent-hover:#8db6ff;--surface:#17181d;--border:rgba(106,160,255,.22);--error:#ff7b6b;--success:#5fd38a}
}
"#;

/// Inline CSS for error pages.
pub const ERROR_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;display:flex;justify-content:center;align-items:center;min-height:100vh;background:#f7f7f5;color:#1b1b1f;padding:1rem}
.error-page{text-align:center;max-width:400px}
.error-page .error-code{font-size:3rem;font-weight:700;color:#2f6fde;margin-bottom:.25rem}
.error-page h1{font-size:1.5rem;margin-bottom:.75rem}
.error-page p{color:#666;margin-bottom:1rem;line-height:1.5}
.error-page a{color:#2f6fde}
@media(prefers-color-scheme:dark){
body{background:#0f1014;color:#e6e6ea}
.error-page p{color:#aaa}
.error-page a{color:#6aa0ff}
}
"#;

/// Content-Security-Policy header value.
///
/// Inline styles only, no scripts, no frames. Forms may only post back to
/// this site.
pub const CSP_HEADER: &str = "default-src 'none'; style-src 'unsafe-inline'; img-src 'self' https: data:; manifest-src 'self'; form-action 'self'; base-uri 'none'; frame-ancestors 'none'";

/// Top-level pages, for navigation highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Home,
    Projects,
    Contact,
}

/// Site-wide values every page needs.
#[derive(Debug, Clone, Copy)]
pub struct SiteMeta<'a> {
    pub site_name: &'a str,
    pub base_url: &'a str,
}

/// Render the full HTML page shell with `<head>`, navigation and footer.
pub fn page_shell(
    meta: SiteMeta<'_>,
    nav: Nav,
    title: &str,
    description: &str,
    path: &str,
    body_content: Markup,
) -> Markup {
    let full_title = format!("{title} | {}", meta.site_name);
    let canonical = format!("{}{path}", meta.base_url);

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (full_title) }
                meta name="description" content=(truncate(description, 160));
                link rel="canonical" href=(canonical);
                link rel="manifest" href="/static/manifest.json";
                meta property="og:title" content=(full_title);
                meta property="og:description" content=(truncate(description, 200));
                meta property="og:url" content=(canonical);
                meta property="og:site_name" content=(meta.site_name);
                meta property="og:type" content="website";
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                (site_nav(meta.site_name, nav))
                main { (body_content) }
                footer class="footer" {
                    (meta.site_name)
                }
            }
        }
    }
}

fn site_nav(site_name: &str, active: Nav) -> Markup {
    let links = [
        (Nav::Home, "/", "Home"),
        (Nav::Projects, "/projects", "Projects"),
        (Nav::Contact, "/contact", "Contact"),
    ];
    html! {
        nav class="site-nav" {
            a class="site-name" href="/" { (site_name) }
            @for (page, href, label) in links {
                a href=(href) class=[(page == active).then_some("active")] { (label) }
            }
        }
    }
}

/// Outcome message shown above a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flash {
    Success(String),
    Error(String),
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }
}

/// Render the `formError` / `formSuccess` message slots.
///
/// Success messages hide themselves after three seconds (CSS animation).
pub fn flash_message(flash: Option<&Flash>) -> Markup {
    html! {
        @match flash {
            Some(Flash::Error(message)) => {
                p id="formError" class="form-error" role="alert" { (message) }
            }
            Some(Flash::Success(message)) => {
                p id="formSuccess" class="form-success" role="status" { (message) }
            }
            None => {}
        }
    }
}

/// Comma-separated technology names, each HTML-escaped.
///
/// Technology names are untrusted input, so they are escaped here (including
/// `'`, which maud leaves alone) and inserted pre-escaped.
pub fn escaped_tech_list(tech_stack: &[String]) -> PreEscaped<String> {
    let escaped: Vec<String> = tech_stack.iter().map(|t| escape_html(t)).collect();
    PreEscaped(escaped.join(", "))
}

/// `<p>` with a label and the escaped technology list.
pub fn tech_paragraph(label: &str, tech_stack: &[String]) -> Markup {
    html! {
        p class="tech-list" {
            strong { (label) ":" } " " (escaped_tech_list(tech_stack))
        }
    }
}

/// Resolve a project's image reference to a URL usable in `src`.
///
/// http(s) URLs and absolute paths (uploads) are used as-is; bare relative
/// references point into the static assets. Anything with another scheme
/// falls back to the placeholder.
pub fn image_src(image: &str) -> String {
    if is_safe_url(image) || (image.starts_with('/') && !image.starts_with("//")) {
        return image.to_string();
    }
    if image.contains(':') || image.starts_with("//") || image.trim().is_empty() {
        return format!("/static/{DEFAULT_IMAGE}");
    }
    format!("/static/{image}")
}

/// Resolve a project link to an `href`, adding `https://` when no scheme was
/// given. Other schemes are rejected.
pub fn link_href(link: &str) -> Option<String> {
    if is_safe_url(link) {
        Some(link.to_string())
    } else if link.contains(':') || link.starts_with("//") {
        None
    } else {
        Some(format!("https://{link}"))
    }
}

/// Check if a URL is safe to use in `src` or `href` attributes.
pub fn is_safe_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

/// Truncate a string to a maximum length, appending "..." if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let mut end = max_len;
        while !s.is_char_boundary(end) && end > 0 {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}
