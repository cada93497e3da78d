mod models;
mod scraper;
mod scraper_error;

pub use models::{parse_listing_page, parse_search_links, ListingFields};
pub use scraper::{run_listing_ingest, ListingScraper};
pub use scraper_error::ScrapeError;
