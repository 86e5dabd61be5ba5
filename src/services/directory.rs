//! Page data for listings, searches and detail views
//!
//! Each function takes `now` from the caller so a request classifies every
//! show against the same instant.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::{
    db::{
        entities::{artists, venues},
        repositories::{ArtistRepository, ShowListing, ShowRepository, VenueRepository},
    },
    error::Result,
};

use super::schedule::{group_by_area, partition_shows, VenueArea, VenueSummary};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults<T> {
    pub search_term: String,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> SearchResults<T> {
    fn new(search_term: &str, data: Vec<T>) -> Self {
        Self {
            search_term: search_term.to_string(),
            count: data.len(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ShowListing>,
    pub upcoming_shows: Vec<ShowListing>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ShowListing>,
    pub upcoming_shows: Vec<ShowListing>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Every venue, grouped by (city, state)
pub async fn venue_areas(db: &DatabaseConnection, now: DateTime<Utc>) -> Result<Vec<VenueArea>> {
    let venues = VenueRepository::new(db.clone()).find_all().await?;
    let summaries = venue_summaries(db, venues, now).await?;
    tracing::debug!("Grouping {} venues by area", summaries.len());
    Ok(group_by_area(summaries))
}

pub async fn search_venues(
    db: &DatabaseConnection,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults<VenueSummary>> {
    let venues = VenueRepository::new(db.clone()).search_by_name(term).await?;
    let summaries = venue_summaries(db, venues, now).await?;
    Ok(SearchResults::new(term, summaries))
}

async fn venue_summaries(
    db: &DatabaseConnection,
    venues: Vec<venues::Model>,
    now: DateTime<Utc>,
) -> Result<Vec<VenueSummary>> {
    if venues.is_empty() {
        return Ok(vec![]);
    }

    let counts = ShowRepository::new(db.clone())
        .upcoming_counts_by_venue(now)
        .await?;

    Ok(venues
        .into_iter()
        .map(|venue| VenueSummary {
            num_upcoming_shows: counts.get(&venue.id).copied().unwrap_or(0),
            id: venue.id,
            name: venue.name,
            city: venue.city,
            state: venue.state,
        })
        .collect())
}

pub async fn venue_detail(
    db: &DatabaseConnection,
    id: i32,
    now: DateTime<Utc>,
) -> Result<Option<VenueDetail>> {
    let Some(venue) = VenueRepository::new(db.clone()).find_by_id(id).await? else {
        return Ok(None);
    };

    let shows = ShowRepository::new(db.clone()).for_venue(id).await?;
    let schedule = partition_shows(shows, now);

    Ok(Some(VenueDetail {
        genres: venue.genre_list(),
        id: venue.id,
        name: venue.name,
        address: venue.address,
        city: venue.city,
        state: venue.state,
        phone: venue.phone,
        website: venue.website,
        facebook_link: venue.facebook_link,
        seeking_talent: venue.seeking_talent,
        seeking_description: venue.seeking_description,
        image_link: venue.image_link,
        past_shows_count: schedule.past.len(),
        upcoming_shows_count: schedule.upcoming.len(),
        past_shows: schedule.past,
        upcoming_shows: schedule.upcoming,
    }))
}

pub async fn artist_listing(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
) -> Result<Vec<ArtistSummary>> {
    let artists = ArtistRepository::new(db.clone()).find_all().await?;
    artist_summaries(db, artists, now).await
}

pub async fn search_artists(
    db: &DatabaseConnection,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults<ArtistSummary>> {
    let artists = ArtistRepository::new(db.clone()).search_by_name(term).await?;
    let summaries = artist_summaries(db, artists, now).await?;
    Ok(SearchResults::new(term, summaries))
}

async fn artist_summaries(
    db: &DatabaseConnection,
    artists: Vec<artists::Model>,
    now: DateTime<Utc>,
) -> Result<Vec<ArtistSummary>> {
    if artists.is_empty() {
        return Ok(vec![]);
    }

    let counts = ShowRepository::new(db.clone())
        .upcoming_counts_by_artist(now)
        .await?;

    Ok(artists
        .into_iter()
        .map(|artist| ArtistSummary {
            num_upcoming_shows: counts.get(&artist.id).copied().unwrap_or(0),
            id: artist.id,
            name: artist.name,
        })
        .collect())
}

pub async fn artist_detail(
    db: &DatabaseConnection,
    id: i32,
    now: DateTime<Utc>,
) -> Result<Option<ArtistDetail>> {
    let Some(artist) = ArtistRepository::new(db.clone()).find_by_id(id).await? else {
        return Ok(None);
    };

    let shows = ShowRepository::new(db.clone()).for_artist(id).await?;
    let schedule = partition_shows(shows, now);

    Ok(Some(ArtistDetail {
        genres: artist.genre_list(),
        id: artist.id,
        name: artist.name,
        city: artist.city,
        state: artist.state,
        phone: artist.phone,
        website: artist.website,
        facebook_link: artist.facebook_link,
        seeking_venue: artist.seeking_venue,
        seeking_description: artist.seeking_description,
        image_link: artist.image_link,
        past_shows_count: schedule.past.len(),
        upcoming_shows_count: schedule.upcoming.len(),
        past_shows: schedule.past,
        upcoming_shows: schedule.upcoming,
    }))
}

pub async fn show_listing(db: &DatabaseConnection) -> Result<Vec<ShowListing>> {
    ShowRepository::new(db.clone()).list_all().await
}
