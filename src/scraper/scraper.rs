// scraper.rs
use crate::config::SearchCriteria;
use crate::db::apartments::replace_apartments;
use crate::db::connection::Database;
use crate::domain::listing::Listing;
use crate::errors::AppError;
use crate::geocode::TractLocator;
use crate::scraper::models::{parse_listing_page, parse_search_links};
use crate::scraper::ScrapeError;
use chrono::Utc;
use rand::Rng;
use reqwest::blocking::Client;
use std::time::Duration;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

pub struct ListingScraper {
    client: Client,
}

impl ListingScraper {
    pub fn new() -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        Ok(Self { client })
    }

    fn fetch_html(&self, url: &str) -> Result<String, ScrapeError> {
        let resp = self
            .client
            .get(url)
            .header("Accept", "text/html")
            .send()
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::Status(status.as_u16(), url.to_string()));
        }

        resp.text().map_err(|e| ScrapeError::Network(e.to_string()))
    }

    /// Fetch the search-results page and collect every result link.
    pub fn fetch_search_links(&self, criteria: &SearchCriteria) -> Result<Vec<String>, ScrapeError> {
        let url = criteria.search_url()?;
        eprintln!("📄 Fetching search results: {url}");
        let html = self.fetch_html(&url)?;
        parse_search_links(&html)
    }

    /// Fetch and parse each detail page, keeping the listings that come back
    /// complete. Coverage is best-effort: a failed fetch or a missing field
    /// skips that listing and moves on.
    pub fn scrape_listings(&self, links: &[String]) -> Vec<Listing> {
        let observed_at = Utc::now().naive_utc();
        let mut listings = Vec::new();

        for (i, link) in links.iter().enumerate() {
            // Politeness jitter between detail fetches.
            let pause = rand::thread_rng().gen_range(0..=1000);
            std::thread::sleep(Duration::from_millis(pause));

            let fields = match self
                .fetch_html(link)
                .and_then(|html| parse_listing_page(&html, link))
            {
                Ok(fields) => fields,
                Err(e) => {
                    eprintln!("⚠️ Listing {}/{} failed: {e}", i + 1, links.len());
                    continue;
                }
            };

            match Listing::from_fields(&fields, observed_at) {
                Ok(listing) => listings.push(listing),
                Err(reason) => eprintln!("⚠️ Skipping {link}: {reason}"),
            }
        }

        eprintln!("✅ Parsed {}/{} listings", listings.len(), links.len());
        listings
    }
}

/// Full listing ingestion: search, scrape details, geocode to tracts,
/// replace the apartment table.
pub fn run_listing_ingest(db: &Database, criteria: &SearchCriteria) -> Result<usize, AppError> {
    let scraper = ListingScraper::new()?;

    let links = scraper.fetch_search_links(criteria)?;
    eprintln!("📄 {} result links found", links.len());

    let mut listings = scraper.scrape_listings(&links);

    let locator = TractLocator::new()?;
    let mut unknown = 0;
    for listing in &mut listings {
        listing.tract_id = locator.tract_for(listing.latitude, listing.longitude);
        if listing.tract_id == crate::geocode::UNKNOWN_TRACT {
            unknown += 1;
        }
    }
    if unknown > 0 {
        eprintln!("⚠️ {unknown} listings geocoded to unknown tract");
    }

    let rows = replace_apartments(db, &listings)?;
    eprintln!("🏁 Listing ingest complete");
    Ok(rows)
}
