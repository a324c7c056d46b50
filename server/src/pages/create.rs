use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Form;
use serde::Deserialize;

use super::{render_index, storage_failure, FormValues, IndexTemplate};
use crate::db;
use crate::models::NewRecipe;
use crate::AppState;

const TITLE_REQUIRED: &str = "title is required.";
const MINUTES_INVALID: &str = "duration must be an integer ≥ 1.";
const DATABASE_ERROR: &str = "a database error occurred.";

#[derive(Debug, Deserialize)]
pub struct RecipeForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub minutes: String,
    #[serde(default)]
    pub description: String,
}

/// Validate trimmed form input. Title is checked before minutes; only the
/// first failure is reported.
fn validate(title: &str, minutes_raw: &str) -> Result<i32, &'static str> {
    if title.is_empty() {
        return Err(TITLE_REQUIRED);
    }

    match minutes_raw.parse::<i32>() {
        Ok(minutes) if minutes >= 1 => Ok(minutes),
        _ => Err(MINUTES_INVALID),
    }
}

/// An empty description is stored as NULL rather than an empty string.
fn normalize_description(description: &str) -> Option<&str> {
    if description.is_empty() {
        None
    } else {
        Some(description)
    }
}

/// POST / - create a recipe from the submitted form.
///
/// Invalid input and storage failures re-render the page with an inline error
/// and the submitted values kept in the form; success redirects back to GET /.
pub async fn submit(State(state): State<AppState>, Form(form): Form<RecipeForm>) -> Response {
    let title = form.title.trim().to_string();
    let minutes_raw = form.minutes.trim().to_string();
    let description = form.description.trim().to_string();

    let minutes = match validate(&title, &minutes_raw) {
        Ok(minutes) => minutes,
        Err(message) => {
            return redisplay(
                &state,
                message.to_string(),
                FormValues {
                    title,
                    minutes: minutes_raw,
                    description,
                },
            )
        }
    };

    let new_recipe = NewRecipe {
        title: &title,
        minutes,
        description: normalize_description(&description),
    };

    match db::insert_recipe(&state.pool, new_recipe) {
        Ok(recipe) => {
            tracing::debug!(id = recipe.id, "recipe created");
            (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to save recipe: {}", e);
            let message = if state.debug {
                format!("{DATABASE_ERROR} ({e})")
            } else {
                DATABASE_ERROR.to_string()
            };
            redisplay(
                &state,
                message,
                FormValues {
                    title,
                    minutes: minutes_raw,
                    description,
                },
            )
        }
    }
}

/// Re-render the page with an error message and the submitted values. The
/// recipe list is still fetched so the rejected form sits above current data.
fn redisplay(state: &AppState, error: String, form: FormValues) -> Response {
    let recipes = match db::list_recipes_newest_first(&state.pool) {
        Ok(recipes) => recipes,
        Err(e) => {
            tracing::error!("Failed to load recipes: {}", e);
            return storage_failure(state.debug, &e);
        }
    };

    render_index(IndexTemplate {
        recipes,
        error: Some(error),
        form,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_valid_input() {
        assert_eq!(validate("Pasta", "20"), Ok(20));
        assert_eq!(validate("Tea", "1"), Ok(1));
    }

    #[test]
    fn test_validate_rejects_empty_title() {
        assert_eq!(validate("", "10"), Err(TITLE_REQUIRED));
    }

    #[test]
    fn test_empty_title_reported_before_bad_minutes() {
        assert_eq!(validate("", "abc"), Err(TITLE_REQUIRED));
    }

    #[test]
    fn test_validate_rejects_non_numeric_minutes() {
        assert_eq!(validate("Soup", "abc"), Err(MINUTES_INVALID));
        assert_eq!(validate("Soup", ""), Err(MINUTES_INVALID));
        assert_eq!(validate("Soup", "1.5"), Err(MINUTES_INVALID));
    }

    #[test]
    fn test_validate_rejects_minutes_below_one() {
        assert_eq!(validate("Tea", "0"), Err(MINUTES_INVALID));
        assert_eq!(validate("Tea", "-3"), Err(MINUTES_INVALID));
    }

    #[test]
    fn test_validate_rejects_padded_minutes() {
        // Trimming happens before validation; embedded whitespace still fails.
        assert_eq!(validate("Tea", "2 0"), Err(MINUTES_INVALID));
    }

    #[test]
    fn test_normalize_description() {
        assert_eq!(normalize_description(""), None);
        assert_eq!(normalize_description("Boil water"), Some("Boil water"));
    }
}
