use axum::extract::State;
use axum::response::Response;

use super::{render_index, storage_failure, FormValues, IndexTemplate};
use crate::db;
use crate::AppState;

/// GET / - the recipe list with an empty create form.
pub async fn index(State(state): State<AppState>) -> Response {
    let recipes = match db::list_recipes_newest_first(&state.pool) {
        Ok(recipes) => recipes,
        Err(e) => {
            tracing::error!("Failed to load recipes: {}", e);
            return storage_failure(state.debug, &e);
        }
    };

    render_index(IndexTemplate {
        recipes,
        error: None,
        form: FormValues::default(),
    })
}
