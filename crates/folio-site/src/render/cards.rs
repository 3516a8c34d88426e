//! Project cards for the home list and the filtered projects list.

use std::sync::Arc;

use folio_core::Project;
use maud::{Markup, html};

use super::components::{image_src, tech_paragraph};

/// Cards for the home page `projectList`: title, description, technologies.
pub fn project_list(projects: &[Arc<Project>]) -> Markup {
    html! {
        @if projects.is_empty() {
            p class="empty-state" { "No projects yet." }
        } @else {
            div class="project-grid" {
                @for project in projects {
                    (project_card(project))
                }
            }
        }
    }
}

fn project_card(project: &Project) -> Markup {
    html! {
        article class="project-card" {
            h3 { (project.title()) }
            p { (project.description()) }
            (tech_paragraph("Technologies", project.tech_stack()))
        }
    }
}

/// Cards for the projects page `projectContainer`, each with a details link.
pub fn filtered_list(projects: &[Arc<Project>]) -> Markup {
    html! {
        @if projects.is_empty() {
            p class="empty-state" { "No projects in this category." }
        } @else {
            div class="project-grid" {
                @for project in projects {
                    (filtered_card(project))
                }
            }
        }
    }
}

fn filtered_card(project: &Project) -> Markup {
    let details_href = format!("/projects/{}#projectDetails", project.id());
    html! {
        article class="project-card" {
            h3 { (project.title()) }
            p class="project-meta" { (project.category()) }
            img class="project-image" src=(image_src(project.image())) alt=(project.title()) loading="lazy";
            p { (project.description()) }
            (tech_paragraph("Technologies", project.tech_stack()))
            a class="details-link" href=(details_href) { "View Details" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Catalog;

    #[test]
    fn list_card_has_title_description_and_techs() {
        let catalog = Catalog::seed();
        let html = project_list(&catalog.all()[..1]).into_string();
        let project = &catalog.all()[0];
        assert!(html.contains(&format!("<h3>{}</h3>", project.title())));
        assert!(html.contains(project.description()));
        assert!(html.contains("<strong>Technologies:</strong>"));
        assert!(!html.contains("View Details"));
    }

    #[test]
    fn titles_are_text_not_markup() {
        let mut catalog = Catalog::new();
        catalog
            .append(folio_core::NewProject {
                title: "<em>loud</em>".into(),
                description: "<script>x()</script> description".into(),
                ..Default::default()
            })
            .unwrap();
        let html = filtered_list(catalog.all()).into_string();
        assert!(html.contains("&lt;em&gt;loud&lt;/em&gt;"));
        assert!(html.contains("&lt;script&gt;x()&lt;/script&gt;"));
        assert!(!html.contains("<em>"));
    }

    #[test]
    fn filtered_card_links_to_details() {
        let catalog = Catalog::seed();
        let html = filtered_list(catalog.all()).into_string();
        for id in 1..=3 {
            assert!(html.contains(&format!(r#"href="/projects/{id}#projectDetails""#)));
        }
        assert!(html.contains(r#"src="/static/images/tss_logo.png""#));
    }

    #[test]
    fn empty_lists() {
        assert!(project_list(&[]).into_string().contains("No projects yet."));
        assert!(
            filtered_list(&[])
                .into_string()
                .contains("No projects in this category.")
        );
    }
}
