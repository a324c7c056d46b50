use std::time::Duration;

use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use thiserror::Error;

use crate::models::{NewRecipe, Recipe};
use crate::schema::recipes;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../migrations");

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

/// Failure while talking to the database. Handlers translate this into a
/// user-facing message; the detail only reaches logs (and debug-mode pages).
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("no database connection available: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("database query failed: {0}")]
    Query(#[from] diesel::result::Error),
}

pub fn create_pool(database_url: &str) -> DbPool {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = r2d2::Pool::builder()
        .connection_timeout(Duration::from_secs(10))
        .build(manager)
        .expect("Failed to create database pool");

    // Run pending migrations on startup
    let mut conn = pool
        .get()
        .expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");

    pool
}

/// Insert one recipe; id and created_at are assigned by the database.
pub fn insert_recipe(pool: &DbPool, recipe: NewRecipe<'_>) -> Result<Recipe, StorageError> {
    let mut conn = pool.get()?;

    let created = diesel::insert_into(recipes::table)
        .values(&recipe)
        .returning(Recipe::as_returning())
        .get_result(&mut conn)?;

    Ok(created)
}

pub fn list_recipes_newest_first(pool: &DbPool) -> Result<Vec<Recipe>, StorageError> {
    let mut conn = pool.get()?;

    let rows = recipes::table
        .order(recipes::created_at.desc())
        .select(Recipe::as_select())
        .load(&mut conn)?;

    Ok(rows)
}
