pub mod create;
pub mod list;

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::db::StorageError;
use crate::models::Recipe;
use crate::AppState;

/// Returns the router for the recipe journal page (mounted at /)
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list::index).post(create::submit))
}

/// Field values echoed back into the form when a submission is rejected.
#[derive(Debug, Default, Clone)]
pub struct FormValues {
    pub title: String,
    pub minutes: String,
    pub description: String,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub recipes: Vec<Recipe>,
    pub error: Option<String>,
    pub form: FormValues,
}

pub fn render_index(template: IndexTemplate) -> Response {
    match template.render() {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            tracing::error!("Failed to render index template: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

/// 500 response for storage failures outside the form flow. The error detail
/// stays in the logs unless debug mode is on.
pub fn storage_failure(debug: bool, error: &StorageError) -> Response {
    let body = if debug {
        format!("Internal server error: {error}")
    } else {
        "Internal server error".to_string()
    };

    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_recipe(id: i32, title: &str) -> Recipe {
        Recipe {
            id,
            title: title.to_string(),
            minutes: 20,
            description: Some("Boil water".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_lists_recipes() {
        let html = IndexTemplate {
            recipes: vec![sample_recipe(1, "Pasta"), sample_recipe(2, "Soup")],
            error: None,
            form: FormValues::default(),
        }
        .render()
        .unwrap();

        assert!(html.contains("Pasta"));
        assert!(html.contains("Soup"));
        assert!(html.contains("Boil water"));
        assert!(!html.contains("No recipes yet"));
    }

    #[test]
    fn test_render_empty_state() {
        let html = IndexTemplate {
            recipes: vec![],
            error: None,
            form: FormValues::default(),
        }
        .render()
        .unwrap();

        assert!(html.contains("No recipes yet"));
    }

    #[test]
    fn test_render_shows_error_and_echoes_form() {
        let html = IndexTemplate {
            recipes: vec![],
            error: Some("title is required.".to_string()),
            form: FormValues {
                title: String::new(),
                minutes: "15".to_string(),
                description: "Stir well".to_string(),
            },
        }
        .render()
        .unwrap();

        assert!(html.contains("title is required."));
        assert!(html.contains("value=\"15\""));
        assert!(html.contains("Stir well"));
    }

    #[test]
    fn test_render_escapes_user_input() {
        let html = IndexTemplate {
            recipes: vec![sample_recipe(1, "<script>alert(1)</script>")],
            error: None,
            form: FormValues::default(),
        }
        .render()
        .unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
