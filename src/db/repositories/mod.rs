use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    prelude::DateTimeWithTimeZone,
    sea_query::{extension::postgres::PgExpr, Expr, LikeExpr},
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait,
    FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set, TransactionTrait,
};
use serde::Serialize;

use crate::{
    db::{
        entities::{artists, shows, venues},
        enums::encode_genres,
    },
    error::{PersistError, PersistResult, Result},
    forms::{ArtistForm, ShowForm, VenueForm},
};

/// Case-insensitive substring match, folding Unicode case as well as ASCII
fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

/// Rows of `E` whose `column` contains `term`, ordered by that column.
///
/// Postgres does the work with `ILIKE`. SQLite's `LOWER` and `LIKE` only fold
/// ASCII, so there the rows are filtered with [`name_matches`].
async fn search_by_column<E, C>(
    db: &DatabaseConnection,
    column: C,
    term: &str,
    name_of: impl Fn(&E::Model) -> &str,
) -> Result<Vec<E::Model>>
where
    E: EntityTrait,
    C: ColumnTrait,
{
    let query = E::find().order_by_asc(column);

    if db.get_database_backend() == DbBackend::Postgres {
        let pattern = format!("%{}%", escape_like(term));
        return Ok(query
            .filter(Expr::col(column).ilike(LikeExpr::new(pattern).escape('\\')))
            .all(db)
            .await?);
    }

    let rows = query.all(db).await?;
    Ok(rows
        .into_iter()
        .filter(|row| name_matches(name_of(row), term))
        .collect())
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub struct VenueRepository {
    db: DatabaseConnection,
}

impl VenueRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<venues::Model>> {
        Ok(venues::Entity::find()
            .order_by_asc(venues::Column::State)
            .order_by_asc(venues::Column::City)
            .order_by_asc(venues::Column::Name)
            .all(&self.db)
            .await?)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<venues::Model>> {
        Ok(venues::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn search_by_name(&self, term: &str) -> Result<Vec<venues::Model>> {
        search_by_column::<venues::Entity, _>(&self.db, venues::Column::Name, term, |v| &v.name)
            .await
    }

    pub async fn create(&self, form: &VenueForm) -> PersistResult<venues::Model> {
        form.validate()?;

        let now = Utc::now().into();
        let mut venue = venues::ActiveModel {
            created_at: Set(now),
            ..Default::default()
        };
        apply_venue_form(&mut venue, form, now);

        let txn = self.db.begin().await?;
        let venue = venue.insert(&txn).await?;
        txn.commit().await?;
        Ok(venue)
    }

    pub async fn update(&self, id: i32, form: &VenueForm) -> PersistResult<venues::Model> {
        form.validate()?;

        let txn = self.db.begin().await?;
        let existing = venues::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(PersistError::NotFound)?;

        let mut venue: venues::ActiveModel = existing.into();
        apply_venue_form(&mut venue, form, Utc::now().into());
        let venue = venue.update(&txn).await?;
        txn.commit().await?;
        Ok(venue)
    }

    /// Removes the venue and, through the foreign key, its shows
    pub async fn delete(&self, id: i32) -> PersistResult<()> {
        let txn = self.db.begin().await?;
        let result = venues::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(PersistError::NotFound);
        }
        txn.commit().await?;
        Ok(())
    }
}

fn apply_venue_form(venue: &mut venues::ActiveModel, form: &VenueForm, now: DateTimeWithTimeZone) {
    venue.name = Set(form.name.clone());
    venue.city = Set(form.city.clone());
    venue.state = Set(form.state.clone());
    venue.address = Set(form.address.clone());
    venue.phone = Set(form.phone.clone());
    venue.genres = Set(encode_genres(&form.genres));
    venue.image_link = Set(form.image_link.clone());
    venue.facebook_link = Set(form.facebook_link.clone());
    venue.website = Set(form.website.clone());
    venue.seeking_talent = Set(form.seeking_talent);
    venue.seeking_description = Set(form.seeking_description.clone());
    venue.updated_at = Set(now);
}

pub struct ArtistRepository {
    db: DatabaseConnection,
}

impl ArtistRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<artists::Model>> {
        Ok(artists::Entity::find()
            .order_by_asc(artists::Column::Name)
            .all(&self.db)
            .await?)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<artists::Model>> {
        Ok(artists::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn search_by_name(&self, term: &str) -> Result<Vec<artists::Model>> {
        search_by_column::<artists::Entity, _>(&self.db, artists::Column::Name, term, |a| &a.name)
            .await
    }

    pub async fn create(&self, form: &ArtistForm) -> PersistResult<artists::Model> {
        form.validate()?;

        let now = Utc::now().into();
        let mut artist = artists::ActiveModel {
            created_at: Set(now),
            ..Default::default()
        };
        apply_artist_form(&mut artist, form, now);

        let txn = self.db.begin().await?;
        let artist = artist.insert(&txn).await?;
        txn.commit().await?;
        Ok(artist)
    }

    pub async fn update(&self, id: i32, form: &ArtistForm) -> PersistResult<artists::Model> {
        form.validate()?;

        let txn = self.db.begin().await?;
        let existing = artists::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(PersistError::NotFound)?;

        let mut artist: artists::ActiveModel = existing.into();
        apply_artist_form(&mut artist, form, Utc::now().into());
        let artist = artist.update(&txn).await?;
        txn.commit().await?;
        Ok(artist)
    }
}

fn apply_artist_form(artist: &mut artists::ActiveModel, form: &ArtistForm, now: DateTimeWithTimeZone) {
    artist.name = Set(form.name.clone());
    artist.city = Set(form.city.clone());
    artist.state = Set(form.state.clone());
    artist.phone = Set(form.phone.clone());
    artist.genres = Set(encode_genres(&form.genres));
    artist.image_link = Set(form.image_link.clone());
    artist.facebook_link = Set(form.facebook_link.clone());
    artist.website = Set(form.website.clone());
    artist.seeking_venue = Set(form.seeking_venue);
    artist.seeking_description = Set(form.seeking_description.clone());
    artist.updated_at = Set(now);
}

/// A show joined with its venue and artist display fields
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct ShowListing {
    pub show_id: i32,
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTimeWithTimeZone,
}

pub struct ShowRepository {
    db: DatabaseConnection,
}

impl ShowRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn listing_query() -> Select<shows::Entity> {
        shows::Entity::find()
            .select_only()
            .column_as(shows::Column::Id, "show_id")
            .column_as(shows::Column::VenueId, "venue_id")
            .column_as(venues::Column::Name, "venue_name")
            .column_as(venues::Column::ImageLink, "venue_image_link")
            .column_as(shows::Column::ArtistId, "artist_id")
            .column_as(artists::Column::Name, "artist_name")
            .column_as(artists::Column::ImageLink, "artist_image_link")
            .column_as(shows::Column::StartTime, "start_time")
            .join(JoinType::InnerJoin, shows::Relation::Venue.def())
            .join(JoinType::InnerJoin, shows::Relation::Artist.def())
            .order_by_asc(shows::Column::StartTime)
            .order_by_asc(shows::Column::Id)
    }

    pub async fn list_all(&self) -> Result<Vec<ShowListing>> {
        Ok(Self::listing_query()
            .into_model::<ShowListing>()
            .all(&self.db)
            .await?)
    }

    pub async fn for_venue(&self, venue_id: i32) -> Result<Vec<ShowListing>> {
        Ok(Self::listing_query()
            .filter(shows::Column::VenueId.eq(venue_id))
            .into_model::<ShowListing>()
            .all(&self.db)
            .await?)
    }

    pub async fn for_artist(&self, artist_id: i32) -> Result<Vec<ShowListing>> {
        Ok(Self::listing_query()
            .filter(shows::Column::ArtistId.eq(artist_id))
            .into_model::<ShowListing>()
            .all(&self.db)
            .await?)
    }

    /// venue id -> number of shows starting at or after `now`
    pub async fn upcoming_counts_by_venue(&self, now: DateTime<Utc>) -> Result<HashMap<i32, i64>> {
        self.upcoming_counts(shows::Column::VenueId, now).await
    }

    /// artist id -> number of shows starting at or after `now`
    pub async fn upcoming_counts_by_artist(&self, now: DateTime<Utc>) -> Result<HashMap<i32, i64>> {
        self.upcoming_counts(shows::Column::ArtistId, now).await
    }

    async fn upcoming_counts(
        &self,
        key: shows::Column,
        now: DateTime<Utc>,
    ) -> Result<HashMap<i32, i64>> {
        let now: DateTimeWithTimeZone = now.fixed_offset();
        let rows: Vec<(i32, i64)> = shows::Entity::find()
            .select_only()
            .column(key)
            .column_as(Expr::col(shows::Column::Id).count(), "upcoming")
            .filter(shows::Column::StartTime.gte(now))
            .group_by(key)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().collect())
    }

    /// Venue and artist references are checked by the store's foreign keys
    pub async fn create(&self, form: &ShowForm) -> PersistResult<shows::Model> {
        let new_show = form.parse()?;

        let show = shows::ActiveModel {
            venue_id: Set(new_show.venue_id),
            artist_id: Set(new_show.artist_id),
            start_time: Set(new_show.start_time),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let txn = self.db.begin().await?;
        let show = show.insert(&txn).await?;
        txn.commit().await?;
        Ok(show)
    }
}
