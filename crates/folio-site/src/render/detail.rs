//! The `projectDetails` panel.

use folio_core::Project;
use maud::{Markup, html};

use super::components::{image_src, link_href, tech_paragraph};

/// Message shown when a detail view is requested for an unknown id.
pub const NOT_FOUND_MESSAGE: &str = "Project not found. Please select a valid project.";

/// Full details for one project.
pub fn detail_panel(project: &Project) -> Markup {
    let href = project.link().and_then(link_href);
    html! {
        h2 { (project.title()) }
        p { strong { "Category:" } " " (project.category()) }
        img class="project-detail-image" src=(image_src(project.image())) alt=(project.title());
        p { (project.description()) }
        (tech_paragraph("Technologies Used", project.tech_stack()))
        @if let Some(href) = href {
            p {
                a href=(href) rel="noopener noreferrer" target="_blank" { "Visit project" }
            }
        }
        p class="project-meta" { "Views: " (project.views()) }
    }
}

pub fn not_found() -> Markup {
    html! {
        p { (NOT_FOUND_MESSAGE) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_lists_all_fields() {
        let project = Project::create(
            7,
            "Weather",
            "Forecasts for the week",
            vec!["Rust".into(), "C&C".into()],
            Some("Web Development".into()),
            Some("/uploads/abc".into()),
        )
        .unwrap()
        .with_link(Some("weather.example.com".into()));

        let html = detail_panel(&project).into_string();
        assert!(html.contains("<h2>Weather</h2>"));
        assert!(html.contains("<strong>Category:</strong> Web Development"));
        assert!(html.contains(r#"src="/uploads/abc""#));
        assert!(html.contains("Forecasts for the week"));
        assert!(html.contains("<strong>Technologies Used:</strong> Rust, C&amp;C"));
        assert!(html.contains(r#"href="https://weather.example.com""#));
    }

    #[test]
    fn panel_without_link() {
        let project = Project::create(1, "t", "d", vec![], None, None).unwrap();
        let html = detail_panel(&project).into_string();
        assert!(!html.contains("Visit project"));
        assert!(html.contains("Uncategorized"));
    }

    #[test]
    fn not_found_message() {
        assert!(not_found().into_string().contains(NOT_FOUND_MESSAGE));
    }
}
