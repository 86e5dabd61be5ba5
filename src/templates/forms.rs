//! Create and edit forms
//!
//! Field names match the keys read by [`crate::forms`], so a rejected
//! submission can be rendered straight back with its values.

use maud::{html, Markup};

use crate::{
    db::enums::Genre,
    flash::FlashMessage,
    forms::{ArtistForm, ShowForm, VenueForm},
};

use super::layout::base_layout;

pub const US_STATES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i32),
}

impl FormMode {
    fn action(&self, resource: &str) -> String {
        match self {
            Self::Create => format!("/{}/create", resource),
            Self::Edit(id) => format!("/{}/{}/edit", resource, id),
        }
    }
}

pub fn venue_form_page(
    mode: FormMode,
    form: &VenueForm,
    error: Option<&str>,
    flash: Option<&FlashMessage>,
) -> Markup {
    let title = match mode {
        FormMode::Create => "List a new venue".to_string(),
        FormMode::Edit(_) => format!("Edit venue {}", form.name),
    };

    base_layout(
        &title,
        flash,
        html! {
            (form_card(&title, &mode.action("venues"), error, html! {
                (text_field("Name", "name", &form.name, true))
                div class="grid grid-cols-1 md:grid-cols-2 gap-4" {
                    (text_field("City", "city", &form.city, true))
                    (state_select(&form.state))
                }
                (text_field("Address", "address", &form.address, true))
                (text_field("Phone", "phone", opt(&form.phone), false))
                (genre_select(&form.genres))
                (url_field("Image link", "image_link", opt(&form.image_link)))
                (url_field("Facebook link", "facebook_link", opt(&form.facebook_link)))
                (url_field("Website", "website_link", opt(&form.website)))
                (checkbox_field("Seeking talent", "seeking_talent", form.seeking_talent))
                (textarea_field("Seeking description", "seeking_description", opt(&form.seeking_description)))
            }))
        },
    )
}

pub fn artist_form_page(
    mode: FormMode,
    form: &ArtistForm,
    error: Option<&str>,
    flash: Option<&FlashMessage>,
) -> Markup {
    let title = match mode {
        FormMode::Create => "List a new artist".to_string(),
        FormMode::Edit(_) => format!("Edit artist {}", form.name),
    };

    base_layout(
        &title,
        flash,
        html! {
            (form_card(&title, &mode.action("artists"), error, html! {
                (text_field("Name", "name", &form.name, true))
                div class="grid grid-cols-1 md:grid-cols-2 gap-4" {
                    (text_field("City", "city", &form.city, true))
                    (state_select(&form.state))
                }
                (text_field("Phone", "phone", opt(&form.phone), false))
                (genre_select(&form.genres))
                (url_field("Image link", "image_link", opt(&form.image_link)))
                (url_field("Facebook link", "facebook_link", opt(&form.facebook_link)))
                (url_field("Website", "website_link", opt(&form.website)))
                (checkbox_field("Seeking venue", "seeking_venue", form.seeking_venue))
                (textarea_field("Seeking description", "seeking_description", opt(&form.seeking_description)))
            }))
        },
    )
}

pub fn show_form_page(form: &ShowForm, error: Option<&str>, flash: Option<&FlashMessage>) -> Markup {
    let title = "List a new show";

    base_layout(
        title,
        flash,
        html! {
            (form_card(title, "/shows/create", error, html! {
                div class="grid grid-cols-1 md:grid-cols-2 gap-4" {
                    (text_field("Artist ID", "artist_id", &form.artist_id, true))
                    (text_field("Venue ID", "venue_id", &form.venue_id, true))
                }
                div {
                    label for="start_time" class="block text-sm font-medium text-gray-700 mb-2" { "Start time" }
                    input
                        type="text"
                        id="start_time"
                        name="start_time"
                        value=(form.start_time)
                        placeholder="YYYY-MM-DD HH:MM:SS"
                        required
                        class=(INPUT_CLASS);
                }
            }))
        },
    )
}

const INPUT_CLASS: &str =
    "w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-primary";

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

fn form_card(title: &str, action: &str, error: Option<&str>, fields: Markup) -> Markup {
    html! {
        div class="max-w-2xl mx-auto bg-white rounded-lg shadow-md p-6" {
            h1 class="text-2xl font-bold text-gray-900 mb-6" { (title) }

            @if let Some(message) = error {
                div class="form-error mb-4 p-4 rounded-md bg-red-50 text-red-800" role="alert" {
                    (message)
                }
            }

            form method="post" action=(action) class="space-y-4" {
                (fields)
                button type="submit" class="w-full bg-primary hover:bg-indigo-700 text-white font-semibold py-2 px-4 rounded-md transition" {
                    "Save"
                }
            }
        }
    }
}

fn text_field(label: &str, name: &str, value: &str, required: bool) -> Markup {
    html! {
        div {
            label for=(name) class="block text-sm font-medium text-gray-700 mb-2" { (label) }
            input type="text" id=(name) name=(name) value=(value) required[required] class=(INPUT_CLASS);
        }
    }
}

fn url_field(label: &str, name: &str, value: &str) -> Markup {
    html! {
        div {
            label for=(name) class="block text-sm font-medium text-gray-700 mb-2" { (label) }
            input type="url" id=(name) name=(name) value=(value) class=(INPUT_CLASS);
        }
    }
}

fn textarea_field(label: &str, name: &str, value: &str) -> Markup {
    html! {
        div {
            label for=(name) class="block text-sm font-medium text-gray-700 mb-2" { (label) }
            textarea id=(name) name=(name) rows="3" class=(INPUT_CLASS) { (value) }
        }
    }
}

fn checkbox_field(label: &str, name: &str, checked: bool) -> Markup {
    html! {
        div class="flex items-center" {
            input type="checkbox" id=(name) name=(name) value="y" checked[checked] class="mr-2";
            label for=(name) class="text-sm font-medium text-gray-700" { (label) }
        }
    }
}

fn state_select(selected: &str) -> Markup {
    html! {
        div {
            label for="state" class="block text-sm font-medium text-gray-700 mb-2" { "State" }
            select id="state" name="state" required class=(INPUT_CLASS) {
                option value="" { "Choose a state" }
                @for state in US_STATES {
                    option value=(state) selected[state == selected] { (state) }
                }
            }
        }
    }
}

fn genre_select(selected: &[String]) -> Markup {
    html! {
        div {
            label for="genres" class="block text-sm font-medium text-gray-700 mb-2" { "Genres" }
            select id="genres" name="genres" multiple size="6" class=(INPUT_CLASS) {
                @for genre in Genre::ALL {
                    option
                        value=(genre.as_str())
                        selected[selected.iter().any(|s| s == genre.as_str())] {
                        (genre.as_str())
                    }
                }
            }
        }
    }
}
