pub mod directory;
pub mod schedule;

pub use directory::{ArtistDetail, ArtistSummary, SearchResults, VenueDetail};
pub use schedule::{VenueArea, VenueSummary};
