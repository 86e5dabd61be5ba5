//! Form submissions
//!
//! Create and edit forms arrive as urlencoded pairs. Keys are fixed per
//! resource and `genres` may repeat, so the raw pairs are kept as a list and
//! read into typed forms. Validation happens before anything touches the
//! database and reports through [`PersistError::Validation`].

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

use crate::{
    db::{
        entities::{artists, venues},
        enums::Genre,
    },
    error::{PersistError, PersistResult},
};

pub const TEXT_MAX_LEN: usize = 120;
pub const LINK_MAX_LEN: usize = 500;

const NAIVE_START_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Raw urlencoded pairs in submission order
#[derive(Debug, Clone, Default)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// First value for `key`, trimmed
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.trim())
    }

    pub fn text(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    /// Blank values read as absent
    pub fn optional(&self, key: &str) -> Option<String> {
        self.get(key)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Every non-blank value for a repeated key, first occurrence wins
    pub fn all(&self, key: &str) -> Vec<String> {
        let mut values: Vec<String> = Vec::new();
        for (k, v) in &self.0 {
            let v = v.trim();
            if k == key && !v.is_empty() && !values.iter().any(|seen| seen == v) {
                values.push(v.to_string());
            }
        }
        values
    }

    /// Checkbox semantics: present with a truthy value
    pub fn flag(&self, key: &str) -> bool {
        matches!(
            self.get(key).map(str::to_ascii_lowercase).as_deref(),
            Some("y" | "yes" | "on" | "true" | "1")
        )
    }
}

impl From<Vec<(String, String)>> for FormFields {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::new(pairs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            name: fields.text("name"),
            city: fields.text("city"),
            state: fields.text("state"),
            address: fields.text("address"),
            phone: fields.optional("phone"),
            genres: fields.all("genres"),
            image_link: fields.optional("image_link"),
            facebook_link: fields.optional("facebook_link"),
            website: fields.optional("website_link"),
            seeking_talent: fields.flag("seeking_talent"),
            seeking_description: fields.optional("seeking_description"),
        }
    }

    pub fn from_model(venue: &venues::Model) -> Self {
        Self {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone(),
            genres: venue.genre_list(),
            image_link: venue.image_link.clone(),
            facebook_link: venue.facebook_link.clone(),
            website: venue.website.clone(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone(),
        }
    }

    pub fn validate(&self) -> PersistResult<()> {
        required_text("Name", &self.name)?;
        required_text("City", &self.city)?;
        required_text("State", &self.state)?;
        required_text("Address", &self.address)?;
        bounded("Phone", self.phone.as_deref(), TEXT_MAX_LEN)?;
        bounded("Image link", self.image_link.as_deref(), LINK_MAX_LEN)?;
        bounded("Facebook link", self.facebook_link.as_deref(), LINK_MAX_LEN)?;
        bounded("Website", self.website.as_deref(), LINK_MAX_LEN)?;
        known_genres(&self.genres)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            name: fields.text("name"),
            city: fields.text("city"),
            state: fields.text("state"),
            phone: fields.optional("phone"),
            genres: fields.all("genres"),
            image_link: fields.optional("image_link"),
            facebook_link: fields.optional("facebook_link"),
            website: fields.optional("website_link"),
            seeking_venue: fields.flag("seeking_venue"),
            seeking_description: fields.optional("seeking_description"),
        }
    }

    pub fn from_model(artist: &artists::Model) -> Self {
        Self {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone(),
            genres: artist.genre_list(),
            image_link: artist.image_link.clone(),
            facebook_link: artist.facebook_link.clone(),
            website: artist.website.clone(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone(),
        }
    }

    pub fn validate(&self) -> PersistResult<()> {
        required_text("Name", &self.name)?;
        required_text("City", &self.city)?;
        required_text("State", &self.state)?;
        bounded("Phone", self.phone.as_deref(), TEXT_MAX_LEN)?;
        bounded("Image link", self.image_link.as_deref(), LINK_MAX_LEN)?;
        bounded("Facebook link", self.facebook_link.as_deref(), LINK_MAX_LEN)?;
        bounded("Website", self.website.as_deref(), LINK_MAX_LEN)?;
        known_genres(&self.genres)
    }
}

/// Show submission, kept as entered so a rejected form can be redisplayed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowForm {
    pub venue_id: String,
    pub artist_id: String,
    pub start_time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewShow {
    pub venue_id: i32,
    pub artist_id: i32,
    pub start_time: DateTime<FixedOffset>,
}

impl ShowForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            venue_id: fields.text("venue_id"),
            artist_id: fields.text("artist_id"),
            start_time: fields.text("start_time"),
        }
    }

    pub fn parse(&self) -> PersistResult<NewShow> {
        let venue_id = parse_id("Venue ID", &self.venue_id)?;
        let artist_id = parse_id("Artist ID", &self.artist_id)?;
        let start_time = parse_start_time(&self.start_time).ok_or_else(|| {
            PersistError::Validation(format!(
                "Start time '{}' is not a valid date and time.",
                self.start_time
            ))
        })?;

        Ok(NewShow {
            venue_id,
            artist_id,
            start_time,
        })
    }
}

/// Naive inputs are read as UTC. The result is normalised to a UTC offset so
/// stored values order the same way as text and as timestamps.
pub fn parse_start_time(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).fixed_offset());
    }

    NAIVE_START_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

fn parse_id(label: &str, raw: &str) -> PersistResult<i32> {
    if raw.is_empty() {
        return Err(PersistError::Validation(format!("{} is required.", label)));
    }
    raw.parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| PersistError::Validation(format!("{} must be a positive number.", label)))
}

fn required_text(label: &str, value: &str) -> PersistResult<()> {
    if value.is_empty() {
        return Err(PersistError::Validation(format!("{} is required.", label)));
    }
    bounded(label, Some(value), TEXT_MAX_LEN)
}

fn bounded(label: &str, value: Option<&str>, max: usize) -> PersistResult<()> {
    match value {
        Some(v) if v.chars().count() > max => Err(PersistError::Validation(format!(
            "{} must be at most {} characters.",
            label, max
        ))),
        _ => Ok(()),
    }
}

fn known_genres(genres: &[String]) -> PersistResult<()> {
    match genres.iter().find(|g| Genre::from_str(g).is_none()) {
        Some(unknown) => Err(PersistError::Validation(format!(
            "'{}' is not a recognised genre.",
            unknown
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        FormFields::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn hall() -> FormFields {
        fields(&[
            ("name", "The Hall"),
            ("city", "Austin"),
            ("state", "TX"),
            ("address", "1 Main St"),
            ("phone", "555-0100"),
            ("genres", "Jazz"),
        ])
    }

    #[test]
    fn test_venue_form_reads_fixed_keys() {
        let form = VenueForm::from_fields(&hall());
        assert_eq!(form.name, "The Hall");
        assert_eq!(form.city, "Austin");
        assert_eq!(form.state, "TX");
        assert_eq!(form.address, "1 Main St");
        assert_eq!(form.phone.as_deref(), Some("555-0100"));
        assert_eq!(form.genres, vec!["Jazz".to_string()]);
        assert_eq!(form.website, None);
        assert!(!form.seeking_talent);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_repeated_genres_are_collected_once() {
        let f = fields(&[
            ("genres", "Jazz"),
            ("genres", "Blues"),
            ("genres", " Jazz "),
            ("genres", ""),
        ]);
        assert_eq!(f.all("genres"), vec!["Jazz".to_string(), "Blues".to_string()]);
    }

    #[test]
    fn test_blank_optional_fields_are_absent() {
        let f = fields(&[("phone", "   "), ("website_link", "")]);
        assert_eq!(f.optional("phone"), None);
        assert_eq!(f.optional("website_link"), None);
        assert_eq!(f.optional("missing"), None);
    }

    #[test]
    fn test_checkbox_values() {
        assert!(fields(&[("seeking_talent", "y")]).flag("seeking_talent"));
        assert!(fields(&[("seeking_talent", "on")]).flag("seeking_talent"));
        assert!(fields(&[("seeking_talent", "True")]).flag("seeking_talent"));
        assert!(!fields(&[("seeking_talent", "n")]).flag("seeking_talent"));
        assert!(!fields(&[]).flag("seeking_talent"));
    }

    #[test]
    fn test_venue_requires_address() {
        let mut form = VenueForm::from_fields(&hall());
        form.address.clear();
        let err = form.validate().unwrap_err();
        assert!(matches!(err, PersistError::Validation(ref m) if m == "Address is required."));
    }

    #[test]
    fn test_unknown_genre_is_rejected() {
        let mut form = ArtistForm {
            name: "Guns N Petals".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            ..Default::default()
        };
        assert!(form.validate().is_ok());

        form.genres = vec!["Polka".into()];
        assert!(form.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_overlong_name_is_rejected() {
        let form = ArtistForm {
            name: "x".repeat(TEXT_MAX_LEN + 1),
            city: "Austin".into(),
            state: "TX".into(),
            ..Default::default()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_start_time_formats() {
        let expected = Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap();
        for raw in [
            "2035-04-01 20:00:00",
            "2035-04-01 20:00",
            "2035-04-01T20:00",
            "2035-04-01T20:00:00",
            "2035-04-01T22:00:00+02:00",
        ] {
            let parsed = parse_start_time(raw).unwrap_or_else(|| panic!("failed on {raw}"));
            assert_eq!(parsed, expected, "input {raw}");
            assert_eq!(parsed.offset().local_minus_utc(), 0);
        }
        assert_eq!(parse_start_time("2035-04-01T20:00:00Z").map(|t| t.hour()), Some(20));
        assert!(parse_start_time("next friday").is_none());
    }

    #[test]
    fn test_show_form_parse() {
        let form = ShowForm::from_fields(&fields(&[
            ("venue_id", "3"),
            ("artist_id", "4"),
            ("start_time", "2019-06-15 23:00:00"),
        ]));
        let show = form.parse().unwrap();
        assert_eq!(show.venue_id, 3);
        assert_eq!(show.artist_id, 4);
        assert_eq!(show.start_time, Utc.with_ymd_and_hms(2019, 6, 15, 23, 0, 0).unwrap());
    }

    #[test]
    fn test_show_form_rejects_bad_ids() {
        let mut form = ShowForm {
            venue_id: "abc".into(),
            artist_id: "1".into(),
            start_time: "2019-06-15 23:00:00".into(),
        };
        assert!(form.parse().unwrap_err().is_validation());

        form.venue_id = "0".into();
        assert!(form.parse().is_err());

        form.venue_id.clear();
        assert!(matches!(
            form.parse().unwrap_err(),
            PersistError::Validation(ref m) if m == "Venue ID is required."
        ));
    }
}
