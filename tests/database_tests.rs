//! Database integration tests
//!
//! Exercises the repositories and the directory service directly:
//! - Writes report typed outcomes and leave nothing behind on failure
//! - Foreign keys reject dangling shows and cascade venue deletes
//! - Listings, searches and detail views aggregate the joined rows

use chrono::{Duration, Utc};
use fake::{faker::company::en::CompanyName, Fake};
use pretty_assertions::assert_eq;
use sea_orm::{EntityTrait, PaginatorTrait};

use stagebook::db::entities::{artists, shows, venues};
use stagebook::db::repositories::{ArtistRepository, ShowRepository, VenueRepository};
use stagebook::error::PersistError;
use stagebook::forms::{ArtistForm, ShowForm, VenueForm};
use stagebook::services::directory;
use stagebook::test_utils::*;

fn venue_form(name: &str, city: &str, state: &str) -> VenueForm {
    VenueForm {
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        address: "335 Delancey Street".to_string(),
        genres: vec!["Jazz".to_string()],
        ..Default::default()
    }
}

#[tokio::test]
async fn test_create_venue_sets_timestamps() {
    let db = setup_test_db().await;

    let venue = VenueRepository::new(db.clone())
        .create(&venue_form("The Dueling Pianos Bar", "New York", "NY"))
        .await
        .unwrap();

    assert!(venue.id > 0);
    assert_eq!(venue.genres, r#"["Jazz"]"#);
    assert!(venue.created_at.timestamp() > 0);
    assert_eq!(venue.created_at, venue.updated_at);
}

#[tokio::test]
async fn test_invalid_venue_is_not_written() {
    let db = setup_test_db().await;

    let err = VenueRepository::new(db.clone())
        .create(&venue_form("", "New York", "NY"))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(venues::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_missing_artist() {
    let db = setup_test_db().await;
    let form = ArtistForm {
        name: "Matt Quevedo".into(),
        city: "New York".into(),
        state: "NY".into(),
        ..Default::default()
    };

    let err = ArtistRepository::new(db.clone()).update(12, &form).await.unwrap_err();

    assert!(matches!(err, PersistError::NotFound));
    assert_eq!(artists::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_show_requires_existing_venue_and_artist() {
    let db = setup_test_db().await;
    let venue = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;

    let form = ShowForm {
        venue_id: venue.id.to_string(),
        artist_id: "404".to_string(),
        start_time: "2035-04-01 20:00:00".to_string(),
    };
    let err = ShowRepository::new(db.clone()).create(&form).await.unwrap_err();

    assert!(matches!(err, PersistError::ConstraintViolation(_)), "got {:?}", err);
    assert_eq!(shows::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_venue_cascades_to_shows() {
    let db = setup_test_db().await;
    let kept = create_test_venue(&db, "Park Square Live Music", "San Francisco", "CA").await;
    let doomed = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&db, "Guns N Petals").await;
    create_test_show(&db, doomed.id, artist.id, Utc::now()).await;
    create_test_show(&db, kept.id, artist.id, Utc::now()).await;

    let repo = VenueRepository::new(db.clone());
    repo.delete(doomed.id).await.unwrap();

    assert!(repo.find_by_id(doomed.id).await.unwrap().is_none());
    let remaining = shows::Entity::find().all(&db).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].venue_id, kept.id);

    assert!(matches!(repo.delete(doomed.id).await, Err(PersistError::NotFound)));
}

#[tokio::test]
async fn test_venue_areas_place_each_venue_once() {
    let db = setup_test_db().await;
    let pairs = [("Austin", "TX"), ("Portland", "OR"), ("Austin", "TX"), ("Portland", "ME")];
    for (city, state) in pairs {
        let name: String = CompanyName().fake();
        create_test_venue(&db, &name, city, state).await;
    }

    let areas = directory::venue_areas(&db, Utc::now()).await.unwrap();

    let keys: Vec<(String, String)> = areas.iter().map(|a| (a.city.clone(), a.state.clone())).collect();
    assert_eq!(
        keys,
        vec![
            ("Portland".to_string(), "ME".to_string()),
            ("Portland".to_string(), "OR".to_string()),
            ("Austin".to_string(), "TX".to_string()),
        ]
    );
    assert_eq!(areas[2].venues.len(), 2);

    let total: usize = areas.iter().map(|a| a.venues.len()).sum();
    assert_eq!(total, pairs.len());
    for area in &areas {
        assert!(area.venues.iter().all(|v| v.city == area.city && v.state == area.state));
    }
}

#[tokio::test]
async fn test_upcoming_counts_in_listings() {
    let db = setup_test_db().await;
    let busy = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let quiet = create_test_venue(&db, "Park Square Live Music", "San Francisco", "CA").await;
    let artist = create_test_artist(&db, "Guns N Petals").await;
    let now = Utc::now();
    create_test_show(&db, busy.id, artist.id, now + Duration::days(1)).await;
    create_test_show(&db, busy.id, artist.id, now + Duration::days(2)).await;
    create_test_show(&db, busy.id, artist.id, now - Duration::days(2)).await;
    create_test_show(&db, quiet.id, artist.id, now - Duration::days(5)).await;

    let areas = directory::venue_areas(&db, now).await.unwrap();
    let counts: Vec<(String, i64)> = areas[0]
        .venues
        .iter()
        .map(|v| (v.name.clone(), v.num_upcoming_shows))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("Park Square Live Music".to_string(), 0),
            ("The Musical Hop".to_string(), 2),
        ]
    );

    let artists = directory::artist_listing(&db, now).await.unwrap();
    assert_eq!(artists[0].num_upcoming_shows, 2);
}

#[tokio::test]
async fn test_search_counts_matches() {
    let db = setup_test_db().await;
    create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    create_test_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
    create_test_venue(&db, "The Dueling Pianos Bar", "New York", "NY").await;

    let now = Utc::now();
    let music = directory::search_venues(&db, "music", now).await.unwrap();
    assert_eq!(music.count, 2);
    assert_eq!(music.search_term, "music");

    let none = directory::search_venues(&db, "opera", now).await.unwrap();
    assert_eq!(none.count, 0);
    assert!(none.data.is_empty());

    let everything = directory::search_venues(&db, "", now).await.unwrap();
    assert_eq!(everything.count, 3);
}

#[tokio::test]
async fn test_search_folds_accented_names() {
    let db = setup_test_db().await;
    create_test_venue(&db, "ÉCOLE Hall", "Montréal", "NY").await;
    create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    create_test_artist(&db, "Zoë ÅNGSTRÖM").await;
    create_test_artist(&db, "Guns N Petals").await;

    let venues = VenueRepository::new(db.clone()).search_by_name("école").await.unwrap();
    assert_eq!(venues.iter().map(|v| v.name.as_str()).collect::<Vec<_>>(), vec!["ÉCOLE Hall"]);

    let artists = ArtistRepository::new(db.clone()).search_by_name("ångström").await.unwrap();
    assert_eq!(artists.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(), vec!["Zoë ÅNGSTRÖM"]);

    let results = directory::search_venues(&db, "HALL", Utc::now()).await.unwrap();
    assert_eq!(results.count, 1);
}

#[tokio::test]
async fn test_detail_partitions_against_now() {
    let db = setup_test_db().await;
    let venue = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&db, "Guns N Petals").await;
    let now = Utc::now();
    let offsets = [-48, -1, 1, 24, 72];
    for hours in offsets {
        create_test_show(&db, venue.id, artist.id, now + Duration::hours(hours)).await;
    }

    let detail = directory::venue_detail(&db, venue.id, now).await.unwrap().unwrap();

    assert_eq!(detail.past_shows_count, 2);
    assert_eq!(detail.upcoming_shows_count, 3);
    assert!(detail.past_shows.iter().all(|s| s.start_time < now));
    assert!(detail.upcoming_shows.iter().all(|s| s.start_time >= now));
    assert!(detail.upcoming_shows.windows(2).all(|w| w[0].start_time <= w[1].start_time));

    assert!(directory::venue_detail(&db, venue.id + 1, now).await.unwrap().is_none());
}
