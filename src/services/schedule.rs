use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::repositories::ShowListing;

/// Shows split around a single instant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShowSchedule {
    pub past: Vec<ShowListing>,
    pub upcoming: Vec<ShowListing>,
}

/// A show that starts exactly at `now` counts as upcoming.
pub fn partition_shows(shows: Vec<ShowListing>, now: DateTime<Utc>) -> ShowSchedule {
    let (past, upcoming): (Vec<_>, Vec<_>) = shows.into_iter().partition(|show| show.start_time < now);
    ShowSchedule { past, upcoming }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: i64,
}

/// Venues sharing one (city, state) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// Groups are ordered by state then city; venues keep their input order.
pub fn group_by_area(venues: Vec<VenueSummary>) -> Vec<VenueArea> {
    let mut areas: BTreeMap<(String, String), Vec<VenueSummary>> = BTreeMap::new();
    for venue in venues {
        areas
            .entry((venue.state.clone(), venue.city.clone()))
            .or_default()
            .push(venue);
    }

    areas
        .into_iter()
        .map(|((state, city), venues)| VenueArea {
            city,
            state,
            venues,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn listing(show_id: i32, start_time: DateTime<Utc>) -> ShowListing {
        ShowListing {
            show_id,
            venue_id: 1,
            venue_name: "The Musical Hop".into(),
            venue_image_link: None,
            artist_id: 4,
            artist_name: "Guns N Petals".into(),
            artist_image_link: None,
            start_time: start_time.fixed_offset(),
        }
    }

    fn summary(id: i32, city: &str, state: &str) -> VenueSummary {
        VenueSummary {
            id,
            name: format!("Venue {}", id),
            city: city.into(),
            state: state.into(),
            num_upcoming_shows: 0,
        }
    }

    #[test]
    fn test_partition_splits_on_now() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let shows = vec![
            listing(1, now - Duration::days(30)),
            listing(2, now + Duration::hours(1)),
            listing(3, now - Duration::seconds(1)),
            listing(4, now),
        ];

        let schedule = partition_shows(shows, now);

        let past: Vec<i32> = schedule.past.iter().map(|s| s.show_id).collect();
        let upcoming: Vec<i32> = schedule.upcoming.iter().map(|s| s.show_id).collect();
        assert_eq!(past, vec![1, 3]);
        assert_eq!(upcoming, vec![2, 4]);
    }

    #[test]
    fn test_partition_is_total_and_disjoint() {
        let now = Utc::now();
        let shows: Vec<ShowListing> = (0..20)
            .map(|i| listing(i, now + Duration::hours(i as i64 * 7 - 70)))
            .collect();

        let schedule = partition_shows(shows.clone(), now);

        assert_eq!(schedule.past.len() + schedule.upcoming.len(), shows.len());
        for show in &shows {
            let in_past = schedule.past.contains(show);
            let in_upcoming = schedule.upcoming.contains(show);
            assert!(in_past ^ in_upcoming, "show {} must land in exactly one list", show.show_id);
            assert_eq!(in_past, show.start_time < now);
        }
    }

    #[test]
    fn test_partition_empty() {
        assert_eq!(partition_shows(vec![], Utc::now()), ShowSchedule::default());
    }

    #[test]
    fn test_group_by_area_places_each_venue_once() {
        let venues = vec![
            summary(1, "San Francisco", "CA"),
            summary(2, "New York", "NY"),
            summary(3, "San Francisco", "CA"),
            summary(4, "Portland", "OR"),
            summary(5, "Portland", "ME"),
        ];

        let areas = group_by_area(venues);

        let keys: Vec<(&str, &str)> = areas
            .iter()
            .map(|a| (a.city.as_str(), a.state.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("San Francisco", "CA"),
                ("Portland", "ME"),
                ("New York", "NY"),
                ("Portland", "OR"),
            ]
        );

        let ids: Vec<i32> = areas[0].venues.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 3]);

        for area in &areas {
            for venue in &area.venues {
                assert_eq!((venue.city.as_str(), venue.state.as_str()), (area.city.as_str(), area.state.as_str()));
            }
        }
        let total: usize = areas.iter().map(|a| a.venues.len()).sum();
        assert_eq!(total, 5);
    }
}
