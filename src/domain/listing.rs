// src/domain/listing.rs

use crate::geocode::UNKNOWN_TRACT;
use crate::scraper::ListingFields;
use chrono::NaiveDateTime;

/// A listing with every scraped field present, ready to persist.
/// This is the anti-corruption layer between the per-field-optional parse
/// record and the database row: promotion fails by naming the missing field
/// instead of silently dropping the listing inside the parser.
#[derive(Debug, PartialEq, Clone)]
pub struct Listing {
    pub posting_id: i64,
    pub created: String,
    pub observed_at: NaiveDateTime,
    pub name: String,
    pub price: i64,
    pub bedrooms: String,
    pub bathrooms: String,
    pub sq_feet: i64,
    pub latitude: f64,
    pub longitude: f64,
    /// UNKNOWN_TRACT until geocoding fills it in; may stay that way.
    pub tract_id: i64,
    pub url: String,
}

impl Listing {
    pub fn from_fields(fields: &ListingFields, observed_at: NaiveDateTime) -> Result<Self, String> {
        let posting_id = fields.posting_id.ok_or("missing posting id")?;
        let created = fields
            .created
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or("missing created time")?
            .to_string();
        let name = fields
            .name
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or("missing title")?
            .to_string();
        let price = fields.price.filter(|p| *p > 0).ok_or("missing price")?;
        let bedrooms = fields
            .bedrooms
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or("missing bedrooms")?
            .to_string();
        let bathrooms = fields
            .bathrooms
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or("missing bathrooms")?
            .to_string();
        // Zero floor area would poison every price-per-area computation.
        let sq_feet = fields
            .sq_feet
            .filter(|sq| *sq > 0)
            .ok_or("missing floor area")?;
        let latitude = fields.latitude.ok_or("missing latitude")?;
        let longitude = fields.longitude.ok_or("missing longitude")?;

        Ok(Listing {
            posting_id,
            created,
            observed_at,
            name,
            price,
            bedrooms,
            bathrooms,
            sq_feet,
            latitude,
            longitude,
            tract_id: UNKNOWN_TRACT,
            url: fields.url.clone(),
        })
    }
}
