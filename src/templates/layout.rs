use maud::{html, Markup, DOCTYPE};

use crate::flash::FlashMessage;

use super::components::notification;

pub fn base_layout(title: &str, flash: Option<&FlashMessage>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" class="h-full" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " - Stagebook" }

                // Compiled TailwindCSS
                link rel="stylesheet" href="/static/css/output.css";

                // HTMX drives the delete button
                script src="https://unpkg.com/htmx.org@1.9.10" {}

                style {
                    r#"
                    .show-card { transition: transform 0.15s ease, box-shadow 0.15s ease; }
                    .show-card:hover {
                        transform: translateY(-4px);
                        box-shadow: 0 10px 20px rgba(0,0,0,0.1);
                    }
                    "#
                }
            }
            body class="h-full bg-gray-50" {
                div class="min-h-full" {
                    (nav_bar())

                    main class="container mx-auto px-4 py-8" {
                        @if let Some(message) = flash {
                            div id="notification-area" class="mb-6" {
                                (notification(message))
                            }
                        }
                        (content)
                    }

                    (footer())
                }
            }
        }
    }
}

fn nav_bar() -> Markup {
    html! {
        nav class="bg-white shadow-sm" {
            div class="container mx-auto px-4" {
                div class="flex justify-between items-center h-16" {
                    a href="/" class="flex items-center space-x-3" {
                        span class="text-2xl" { "🎤" }
                        span class="text-xl font-bold text-gray-900" { "Stagebook" }
                    }

                    div class="flex space-x-4" {
                        (nav_link("/venues", "Venues"))
                        (nav_link("/artists", "Artists"))
                        (nav_link("/shows", "Shows"))
                    }

                    div class="flex space-x-2" {
                        (post_link("/venues/create", "Post a venue"))
                        (post_link("/artists/create", "Post an artist"))
                        (post_link("/shows/create", "Post a show"))
                    }
                }
            }
        }
    }
}

fn nav_link(href: &str, label: &str) -> Markup {
    html! {
        a href=(href) class="text-gray-700 hover:text-primary px-3 py-2 rounded-md text-sm font-medium" {
            (label)
        }
    }
}

fn post_link(href: &str, label: &str) -> Markup {
    html! {
        a href=(href) class="text-sm font-semibold text-white bg-primary hover:bg-indigo-700 px-3 py-2 rounded-md" {
            (label)
        }
    }
}

fn footer() -> Markup {
    html! {
        footer class="bg-white border-t border-gray-200 mt-12" {
            div class="container mx-auto px-4 py-6" {
                div class="text-center text-gray-600 text-sm" {
                    "Stagebook - Venues, artists and the shows between them"
                }
            }
        }
    }
}
