use maud::{html, Markup};

use crate::{
    db::repositories::ShowListing,
    flash::FlashMessage,
    services::{ArtistDetail, ArtistSummary, SearchResults, VenueArea, VenueDetail, VenueSummary},
};

use super::components::{
    artist_row, contact_list, detail_image, genre_tags, search_form, seeking_banner, show_card,
    show_sections, venue_row, ShowSide,
};
use super::layout::base_layout;

pub fn home_page(flash: Option<&FlashMessage>) -> Markup {
    base_layout(
        "Home",
        flash,
        html! {
            div class="text-center py-12" {
                h1 class="text-4xl font-bold text-gray-900" { "Stagebook" }
                p class="text-gray-600 mt-4 text-lg" {
                    "Find a stage, find an act, and book the show."
                }
                div class="mt-8 flex justify-center space-x-4" {
                    a href="/venues" class="px-4 py-2 bg-white border border-gray-300 rounded-md hover:bg-gray-50" { "Browse venues" }
                    a href="/artists" class="px-4 py-2 bg-white border border-gray-300 rounded-md hover:bg-gray-50" { "Browse artists" }
                    a href="/shows" class="px-4 py-2 bg-white border border-gray-300 rounded-md hover:bg-gray-50" { "Browse shows" }
                }
            }
        },
    )
}

pub fn venues_page(areas: &[VenueArea], flash: Option<&FlashMessage>) -> Markup {
    base_layout(
        "Venues",
        flash,
        html! {
            (search_form("/venues/search", "Find a venue", ""))

            @if areas.is_empty() {
                div class="text-center py-12" {
                    p class="text-gray-600 text-lg" { "No venues listed yet." }
                }
            } @else {
                div class="grid grid-cols-1 md:grid-cols-2 gap-6" {
                    @for area in areas {
                        div class="venue-area bg-white rounded-lg shadow-sm p-4" {
                            h2 class="text-lg font-bold text-gray-900" { (area.city) ", " (area.state) }
                            ul class="divide-y divide-gray-100 mt-2" {
                                @for venue in &area.venues {
                                    (venue_row(venue))
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn venue_search_page(results: &SearchResults<VenueSummary>, flash: Option<&FlashMessage>) -> Markup {
    base_layout(
        "Venue search",
        flash,
        html! {
            (search_form("/venues/search", "Find a venue", &results.search_term))
            (result_heading(results.count, &results.search_term))
            ul class="bg-white rounded-lg shadow-sm p-4 divide-y divide-gray-100" {
                @for venue in &results.data {
                    (venue_row(venue))
                }
            }
        },
    )
}

fn result_heading(count: usize, term: &str) -> Markup {
    html! {
        h1 class="search-count text-xl font-semibold text-gray-900 mb-4" {
            "Number of search results for \"" (term) "\": " (count)
        }
    }
}

pub fn venue_detail_page(venue: &VenueDetail, flash: Option<&FlashMessage>) -> Markup {
    base_layout(
        &venue.name,
        flash,
        html! {
            div class="bg-white rounded-lg shadow-md p-6" {
                div class="flex flex-col md:flex-row gap-6" {
                    div class="flex-shrink-0" {
                        (detail_image(venue.image_link.as_deref(), &venue.name))
                    }
                    div class="flex-grow" {
                        div class="flex justify-between items-start" {
                            div {
                                h1 class="text-3xl font-bold text-gray-900" { (venue.name) }
                                p class="text-sm text-gray-500" { "ID: " (venue.id) }
                            }
                            div class="flex space-x-2" {
                                a href={(format!("/venues/{}/edit", venue.id))}
                                  class="px-4 py-2 bg-white border border-gray-300 rounded-md hover:bg-gray-50" {
                                    "Edit"
                                }
                                form method="post"
                                     action={(format!("/venues/{}/delete", venue.id))}
                                     hx-post={(format!("/venues/{}/delete", venue.id))}
                                     hx-confirm="Delete this venue and all of its shows?" {
                                    button type="submit" class="px-4 py-2 bg-red-600 hover:bg-red-700 text-white rounded-md" {
                                        "Delete"
                                    }
                                }
                            }
                        }
                        div class="mt-4" { (genre_tags(&venue.genres)) }
                        div class="mt-4" {
                            (contact_list(
                                Some(venue.address.as_str()),
                                &venue.city,
                                &venue.state,
                                venue.phone.as_deref(),
                                venue.website.as_deref(),
                                venue.facebook_link.as_deref(),
                            ))
                        }
                        (seeking_banner(venue.seeking_talent, "talent", venue.seeking_description.as_deref()))
                    }
                }
            }
            (show_sections(&venue.past_shows, &venue.upcoming_shows, ShowSide::Venue))
        },
    )
}

pub fn artists_page(artists: &[ArtistSummary], flash: Option<&FlashMessage>) -> Markup {
    base_layout(
        "Artists",
        flash,
        html! {
            (search_form("/artists/search", "Find an artist", ""))

            @if artists.is_empty() {
                div class="text-center py-12" {
                    p class="text-gray-600 text-lg" { "No artists listed yet." }
                }
            } @else {
                ul class="bg-white rounded-lg shadow-sm p-4 divide-y divide-gray-100" {
                    @for artist in artists {
                        (artist_row(artist))
                    }
                }
            }
        },
    )
}

pub fn artist_search_page(results: &SearchResults<ArtistSummary>, flash: Option<&FlashMessage>) -> Markup {
    base_layout(
        "Artist search",
        flash,
        html! {
            (search_form("/artists/search", "Find an artist", &results.search_term))
            (result_heading(results.count, &results.search_term))
            ul class="bg-white rounded-lg shadow-sm p-4 divide-y divide-gray-100" {
                @for artist in &results.data {
                    (artist_row(artist))
                }
            }
        },
    )
}

pub fn artist_detail_page(artist: &ArtistDetail, flash: Option<&FlashMessage>) -> Markup {
    base_layout(
        &artist.name,
        flash,
        html! {
            div class="bg-white rounded-lg shadow-md p-6" {
                div class="flex flex-col md:flex-row gap-6" {
                    div class="flex-shrink-0" {
                        (detail_image(artist.image_link.as_deref(), &artist.name))
                    }
                    div class="flex-grow" {
                        div class="flex justify-between items-start" {
                            div {
                                h1 class="text-3xl font-bold text-gray-900" { (artist.name) }
                                p class="text-sm text-gray-500" { "ID: " (artist.id) }
                            }
                            a href={(format!("/artists/{}/edit", artist.id))}
                              class="px-4 py-2 bg-white border border-gray-300 rounded-md hover:bg-gray-50" {
                                "Edit"
                            }
                        }
                        div class="mt-4" { (genre_tags(&artist.genres)) }
                        div class="mt-4" {
                            (contact_list(
                                None,
                                &artist.city,
                                &artist.state,
                                artist.phone.as_deref(),
                                artist.website.as_deref(),
                                artist.facebook_link.as_deref(),
                            ))
                        }
                        (seeking_banner(artist.seeking_venue, "performance venues", artist.seeking_description.as_deref()))
                    }
                }
            }
            (show_sections(&artist.past_shows, &artist.upcoming_shows, ShowSide::Artist))
        },
    )
}

pub fn shows_page(shows: &[ShowListing], flash: Option<&FlashMessage>) -> Markup {
    base_layout(
        "Shows",
        flash,
        html! {
            h1 class="text-2xl font-bold text-gray-900 mb-6" { "Shows" }
            @if shows.is_empty() {
                div class="text-center py-12" {
                    p class="text-gray-600 text-lg" { "No shows booked yet." }
                }
            } @else {
                div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4" {
                    @for show in shows {
                        (show_card(show, ShowSide::Listing))
                    }
                }
            }
        },
    )
}

pub fn not_found_page() -> Markup {
    error_page("Not Found", "404", "The page you were looking for does not exist.")
}

pub fn server_error_page() -> Markup {
    error_page("Server Error", "500", "Something went wrong on our side. Please try again later.")
}

fn error_page(title: &str, code: &str, message: &str) -> Markup {
    base_layout(
        title,
        None,
        html! {
            div class="text-center py-12" {
                p class="text-6xl font-bold text-gray-300" { (code) }
                h1 class="text-2xl font-bold text-gray-900 mt-4" { (title) }
                p class="text-gray-600 mt-2" { (message) }
                a href="/" class="inline-block mt-6 text-primary hover:underline" { "Back to the homepage" }
            }
        },
    )
}
