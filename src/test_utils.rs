//! Test utilities for Stagebook
//!
//! Provides helpers for creating isolated test environments with:
//! - In-memory SQLite databases (one per test)
//! - AppState and router factories
//! - Test data generators

use axum::Router;
use chrono::{DateTime, Utc};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};

use crate::{
    config::{Config, LogFormat},
    db::{
        entities::{artists, shows, venues},
        enums::encode_genres,
    },
    state::AppState,
};

/// Setup an in-memory SQLite database with all migrations applied
///
/// Each call creates a fresh, isolated database
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 3000,
        log_format: LogFormat::Pretty,
        run_migrations: true,
        static_dir: "static".to_string(),
    }
}

pub async fn setup_test_app_state() -> AppState {
    AppState::new(setup_test_db().await, test_config())
}

/// The full application router over `state`
pub fn test_app(state: &AppState) -> Router {
    crate::create_router(state.clone())
}

// ============================================================================
// Test Data Factories
// ============================================================================

pub async fn create_test_venue(
    db: &DatabaseConnection,
    name: &str,
    city: &str,
    state: &str,
) -> venues::Model {
    let now = Utc::now().into();
    let venue = venues::ActiveModel {
        name: Set(name.to_string()),
        city: Set(city.to_string()),
        state: Set(state.to_string()),
        address: Set("1015 Folsom Street".to_string()),
        phone: Set(Some("123-123-1234".to_string())),
        genres: Set(encode_genres(&["Jazz".to_string(), "Folk".to_string()])),
        image_link: Set(None),
        facebook_link: Set(None),
        website: Set(None),
        seeking_talent: Set(false),
        seeking_description: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    venue.insert(db).await.expect("Failed to insert test venue")
}

pub async fn create_test_artist(db: &DatabaseConnection, name: &str) -> artists::Model {
    let now = Utc::now().into();
    let artist = artists::ActiveModel {
        name: Set(name.to_string()),
        city: Set("San Francisco".to_string()),
        state: Set("CA".to_string()),
        phone: Set(None),
        genres: Set(encode_genres(&["Rock n Roll".to_string()])),
        image_link: Set(None),
        facebook_link: Set(None),
        website: Set(None),
        seeking_venue: Set(true),
        seeking_description: Set(Some("Looking for shows to perform at".to_string())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    artist.insert(db).await.expect("Failed to insert test artist")
}

pub async fn create_test_show(
    db: &DatabaseConnection,
    venue_id: i32,
    artist_id: i32,
    start_time: DateTime<Utc>,
) -> shows::Model {
    let show = shows::ActiveModel {
        venue_id: Set(venue_id),
        artist_id: Set(artist_id),
        start_time: Set(start_time.fixed_offset()),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    show.insert(db).await.expect("Failed to insert test show")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sea_orm::EntityTrait;

    #[tokio::test]
    async fn test_setup_test_db() {
        let db = setup_test_db().await;
        let venues = venues::Entity::find().all(&db).await.unwrap();
        assert_eq!(venues.len(), 0);
    }

    #[tokio::test]
    async fn test_factories_link_records() {
        let db = setup_test_db().await;
        let venue = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let artist = create_test_artist(&db, "Guns N Petals").await;
        let show = create_test_show(&db, venue.id, artist.id, Utc::now() + Duration::days(3)).await;

        assert_eq!(venue.genre_list(), vec!["Jazz".to_string(), "Folk".to_string()]);
        assert_eq!(show.venue_id, venue.id);
        assert_eq!(show.artist_id, artist.id);
    }

    #[tokio::test]
    async fn test_parallel_databases() {
        let (db1, db2) = tokio::join!(setup_test_db(), setup_test_db());

        let venue1 = create_test_venue(&db1, "Venue 1", "Austin", "TX").await;
        let venue2 = create_test_venue(&db2, "Venue 2", "Austin", "TX").await;

        assert_eq!(venue1.id, 1);
        assert_eq!(venue2.id, 1);

        let db1_venues = venues::Entity::find().all(&db1).await.unwrap();
        assert_eq!(db1_venues.len(), 1);
        assert_eq!(db1_venues[0].name, "Venue 1");
    }
}
