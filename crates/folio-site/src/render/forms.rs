//! Forms: add-project, contact and the category filter.
//!
//! Both submission forms carry the session's current CSRF token in a hidden
//! `csrfToken` field. Rejected submissions re-render with the posted values.

use folio_core::contact::ContactForm;
use folio_core::csrf::CSRF_FIELD;
use folio_core::submission::{ALLOWED_IMAGE_TYPES, PROJECT_CATEGORIES, ProjectSubmission};
use maud::{Markup, html};

use super::components::{Flash, flash_message};

fn label(for_id: &str, text: &str) -> Markup {
    html! {
        label for=(for_id) { (text) }
    }
}

fn text_input(id: &str, kind: &str, placeholder: &str, value: &str) -> Markup {
    html! {
        input type=(kind) id=(id) name=(id) placeholder=(placeholder) value=(value) required;
    }
}

fn input_group(id: &str, text: &str, input: Markup) -> Markup {
    html! {
        div class="input-group" {
            (label(id, text))
            (input)
        }
    }
}

fn csrf_field(token: &str) -> Markup {
    html! {
        input type="hidden" name=(CSRF_FIELD) value=(token);
    }
}

/// The "add project" form, posted as multipart to `/projects`.
pub fn project_form(csrf_token: &str, values: &ProjectSubmission, flash: Option<&Flash>) -> Markup {
    let accept = ALLOWED_IMAGE_TYPES.join(", ");
    html! {
        section id="projectSubmission" {
            h2 { "Add a Project" }
            (flash_message(flash))
            form id="projectForm" method="post" action="/projects" enctype="multipart/form-data" {
                (label("title", "Project Title"))
                (text_input("title", "text", "Enter project title", &values.title))

                (label("description", "Project Description"))
                textarea id="description" name="description" placeholder="Describe your project" required {
                    (values.description)
                }

                div class="form-flex-container" {
                    (input_group("category", "Category", html! {
                        select id="category" name="category" {
                            @for category in PROJECT_CATEGORIES {
                                option value=(category) selected[values.category == category] { (category) }
                            }
                        }
                    }))
                    (input_group(
                        "technologies",
                        "Technologies (comma separated)",
                        text_input("technologies", "text", "HTML, CSS, JavaScript", &values.technologies),
                    ))
                    (input_group(
                        "projectLink",
                        "Project Link",
                        text_input("projectLink", "url", "https://example.com", &values.project_link),
                    ))
                }

                div class="file-upload-container" {
                    (label("projectImage", "Project Image (PNG or JPEG)"))
                    input type="file" id="projectImage" name="projectImage" accept=(accept);
                }

                (csrf_field(csrf_token))
                button type="submit" { "Add Project" }
            }
        }
    }
}

/// The contact form, posted url-encoded to `/contact`.
pub fn contact_form(csrf_token: &str, values: &ContactForm, flash: Option<&Flash>) -> Markup {
    html! {
        section id="contact" {
            h2 { "Get in Touch" }
            (flash_message(flash))
            form id="contactForm" method="post" action="/contact" {
                (label("name", "Name"))
                (text_input("name", "text", "Your name", &values.name))

                (label("email", "Email"))
                (text_input("email", "email", "you@example.com", &values.email))

                (label("message", "Message"))
                textarea id="message" name="message" placeholder="What would you like to say?" required {
                    (values.message)
                }

                (csrf_field(csrf_token))
                button type="submit" { "Send" }
            }
        }
    }
}

/// The category filter. Submits `?category=` back to `/projects`.
pub fn filter_control(options: &[String], selected: &str) -> Markup {
    html! {
        form class="filter" method="get" action="/projects" {
            label for="filterDropdown" { "Filter by category" }
            select id="filterDropdown" name="category" {
                @for option in options {
                    option value=(option) selected[option == selected] { (option) }
                }
            }
            button type="submit" { "Filter" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_form_fields() {
        let html = project_form("tok-1", &ProjectSubmission::default(), None).into_string();
        assert!(html.contains(r#"enctype="multipart/form-data""#));
        assert!(html.contains(r#"<input type="hidden" name="csrfToken" value="tok-1">"#));
        assert!(html.contains(r#"accept="image/png, image/jpeg""#));
        for category in PROJECT_CATEGORIES {
            assert!(html.contains(&format!(r#"<option value="{category}""#)));
        }
        assert!(html.contains(">Add Project</button>"));
        assert!(!html.contains("formError"));
    }

    #[test]
    fn project_form_keeps_values_and_shows_error() {
        let values = ProjectSubmission {
            title: "Demo \"quoted\"".into(),
            category: "UI/UX Design".into(),
            description: "short".into(),
            ..Default::default()
        };
        let flash = Flash::error("Project description must be at least 10 characters long!");
        let html = project_form("t", &values, Some(&flash)).into_string();
        assert!(html.contains(r#"value="Demo &quot;quoted&quot;""#));
        assert!(html.contains(r#"<option value="UI/UX Design" selected>"#));
        assert!(html.contains(">short</textarea>"));
        assert!(html.contains("Project description must be at least 10 characters long!"));
    }

    #[test]
    fn contact_form_fields() {
        let html = contact_form("abc", &ContactForm::default(), Some(&Flash::success("Your message has been sent!")))
            .into_string();
        assert!(html.contains(r#"action="/contact""#));
        assert!(html.contains(r#"name="csrfToken" value="abc""#));
        assert!(html.contains(r#"id="formSuccess""#));
        assert!(html.contains(r#"type="email""#));
    }

    #[test]
    fn filter_marks_selection() {
        let options = vec!["All".to_string(), "Web Development".to_string()];
        let html = filter_control(&options, "Web Development").into_string();
        assert!(html.contains(r#"<option value="All">All</option>"#));
        assert!(html.contains(r#"<option value="Web Development" selected>Web Development</option>"#));
    }
}
