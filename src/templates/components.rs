use maud::{html, Markup};
use sea_orm::prelude::DateTimeWithTimeZone;

use crate::{
    db::repositories::ShowListing,
    flash::{FlashLevel, FlashMessage},
    services::{ArtistSummary, VenueSummary},
};

const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x300/1a1a1a/ffffff?text=Stagebook";

pub fn notification(message: &FlashMessage) -> Markup {
    let (bg_color, text_color, icon) = match message.level {
        FlashLevel::Success => ("bg-green-50", "text-green-800", "✓"),
        FlashLevel::Error => ("bg-red-50", "text-red-800", "✗"),
    };

    html! {
        div class={(format!("notification notification-{} p-4 rounded-md {} {}", message.level.as_str(), bg_color, text_color))} role="alert" {
            div class="flex items-center" {
                span class="font-bold mr-2" { (icon) }
                span { (message.message) }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// "Friday May, 21, 2019 at 9:30PM"
    Full,
    /// "Fri 05, 21, 2019 9:30PM"
    Medium,
}

pub fn format_start_time(start_time: &DateTimeWithTimeZone, style: DateStyle) -> String {
    let pattern = match style {
        DateStyle::Full => "%A %B, %-d, %Y at %-I:%M%p",
        DateStyle::Medium => "%a %m, %d, %Y %-I:%M%p",
    };
    start_time.format(pattern).to_string()
}

pub fn genre_tags(genres: &[String]) -> Markup {
    html! {
        div class="flex flex-wrap gap-2" {
            @for genre in genres {
                span class="genre-tag px-2 py-1 text-xs font-semibold text-indigo-800 bg-indigo-100 rounded-full" {
                    (genre)
                }
            }
        }
    }
}

fn upcoming_badge(count: i64) -> Markup {
    html! {
        span class="text-xs text-gray-500" {
            (count) " upcoming " @if count == 1 { "show" } @else { "shows" }
        }
    }
}

pub fn venue_row(venue: &VenueSummary) -> Markup {
    html! {
        li class="venue-row flex justify-between items-center py-2" {
            a href={(format!("/venues/{}", venue.id))} class="text-gray-900 font-medium hover:text-primary hover:underline" {
                (venue.name)
            }
            (upcoming_badge(venue.num_upcoming_shows))
        }
    }
}

pub fn artist_row(artist: &ArtistSummary) -> Markup {
    html! {
        li class="artist-row flex justify-between items-center py-2" {
            a href={(format!("/artists/{}", artist.id))} class="text-gray-900 font-medium hover:text-primary hover:underline" {
                (artist.name)
            }
            (upcoming_badge(artist.num_upcoming_shows))
        }
    }
}

/// Which side of the show a card is viewed from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowSide {
    /// On a venue page the card names the artist
    Venue,
    /// On an artist page the card names the venue
    Artist,
    /// The show listing names both
    Listing,
}

pub fn show_card(show: &ShowListing, side: ShowSide) -> Markup {
    let (image, alt) = match side {
        ShowSide::Artist => (show.venue_image_link.as_deref(), show.venue_name.as_str()),
        ShowSide::Venue | ShowSide::Listing => (show.artist_image_link.as_deref(), show.artist_name.as_str()),
    };
    let style = match side {
        ShowSide::Listing => DateStyle::Full,
        ShowSide::Venue | ShowSide::Artist => DateStyle::Medium,
    };

    html! {
        div class="show-card bg-white rounded-lg shadow-md overflow-hidden flex" {
            img
                src=(image.unwrap_or(PLACEHOLDER_IMAGE))
                alt=(alt)
                class="w-24 h-24 object-cover flex-shrink-0"
                loading="lazy";

            div class="p-4" {
                @if side != ShowSide::Artist {
                    a href={(format!("/artists/{}", show.artist_id))} class="block font-semibold text-gray-900 hover:underline" {
                        (show.artist_name)
                    }
                }
                @if side != ShowSide::Venue {
                    a href={(format!("/venues/{}", show.venue_id))} class="block text-sm text-gray-700 hover:underline" {
                        @if side == ShowSide::Listing { "at " }
                        (show.venue_name)
                    }
                }
                p class="text-xs text-gray-500 mt-1" {
                    (format_start_time(&show.start_time, style))
                }
            }
        }
    }
}

/// Past and upcoming show sections of a detail page
pub fn show_sections(past: &[ShowListing], upcoming: &[ShowListing], side: ShowSide) -> Markup {
    html! {
        section class="mt-8" {
            h2 class="text-xl font-bold text-gray-900 mb-4" {
                (upcoming.len()) " Upcoming " @if upcoming.len() == 1 { "Show" } @else { "Shows" }
            }
            div id="upcoming-shows" class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4" {
                @for show in upcoming {
                    (show_card(show, side))
                }
            }
        }
        section class="mt-8" {
            h2 class="text-xl font-bold text-gray-900 mb-4" {
                (past.len()) " Past " @if past.len() == 1 { "Show" } @else { "Shows" }
            }
            div id="past-shows" class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4" {
                @for show in past {
                    (show_card(show, side))
                }
            }
        }
    }
}

pub fn search_form(action: &str, placeholder: &str, term: &str) -> Markup {
    html! {
        form method="post" action=(action) class="bg-white rounded-lg shadow-sm p-4 mb-6 flex gap-4" {
            input
                type="search"
                name="search_term"
                value=(term)
                placeholder=(placeholder)
                class="flex-grow px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-primary";
            button type="submit" class="bg-primary hover:bg-indigo-700 text-white font-semibold py-2 px-4 rounded-md transition" {
                "Search"
            }
        }
    }
}

pub fn detail_image(image_link: Option<&str>, alt: &str) -> Markup {
    html! {
        img
            src=(image_link.unwrap_or(PLACEHOLDER_IMAGE))
            alt=(alt)
            class="w-full md:w-64 rounded-lg shadow-md";
    }
}

pub fn seeking_banner(seeking: bool, what: &str, description: Option<&str>) -> Markup {
    html! {
        @if seeking {
            div class="seeking mt-4 p-4 rounded-md bg-green-50 text-green-800" {
                p class="font-semibold" { "Currently seeking " (what) }
                @if let Some(description) = description {
                    p class="mt-1 text-sm" { (description) }
                }
            }
        } @else {
            p class="not-seeking mt-4 text-sm text-gray-500" { "Not currently seeking " (what) }
        }
    }
}

/// Contact rows for a venue or artist, skipping absent values
pub fn contact_list(
    address: Option<&str>,
    city: &str,
    state: &str,
    phone: Option<&str>,
    website: Option<&str>,
    facebook_link: Option<&str>,
) -> Markup {
    html! {
        dl class="space-y-2 text-gray-700" {
            @if let Some(address) = address {
                div { dt class="sr-only" { "Address" } dd { (address) } }
            }
            div { dt class="sr-only" { "Location" } dd { (city) ", " (state) } }
            @if let Some(phone) = phone {
                div { dt class="sr-only" { "Phone" } dd { (phone) } }
            }
            @if let Some(website) = website {
                div {
                    dt class="sr-only" { "Website" }
                    dd { a href=(website) target="_blank" class="text-primary hover:underline" { (website) } }
                }
            }
            @if let Some(facebook) = facebook_link {
                div {
                    dt class="sr-only" { "Facebook" }
                    dd { a href=(facebook) target="_blank" class="text-primary hover:underline" { (facebook) } }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn show() -> ShowListing {
        ShowListing {
            show_id: 1,
            venue_id: 1,
            venue_name: "The Musical Hop".into(),
            venue_image_link: None,
            artist_id: 4,
            artist_name: "Guns N Petals".into(),
            artist_image_link: Some("https://example.com/gnp.jpg".into()),
            start_time: Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap().fixed_offset(),
        }
    }

    #[test]
    fn test_format_start_time() {
        let start = show().start_time;
        assert_eq!(format_start_time(&start, DateStyle::Full), "Tuesday May, 21, 2019 at 9:30PM");
        assert_eq!(format_start_time(&start, DateStyle::Medium), "Tue 05, 21, 2019 9:30PM");
    }

    #[test]
    fn test_show_card_names_counterpart() {
        let on_venue_page = show_card(&show(), ShowSide::Venue).into_string();
        assert!(on_venue_page.contains("Guns N Petals"));
        assert!(!on_venue_page.contains("The Musical Hop"));

        let on_artist_page = show_card(&show(), ShowSide::Artist).into_string();
        assert!(on_artist_page.contains("The Musical Hop"));
        assert!(on_artist_page.contains("via.placeholder.com"));

        let listing = show_card(&show(), ShowSide::Listing).into_string();
        assert!(listing.contains("/artists/4") && listing.contains("/venues/1"));
    }

    #[test]
    fn test_notification_escapes_message() {
        let markup = notification(&FlashMessage::error("<b>nope</b>")).into_string();
        assert!(markup.contains("&lt;b&gt;nope&lt;/b&gt;"));
        assert!(markup.contains("notification-error"));
    }
}
