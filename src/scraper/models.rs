// `::scraper` is the HTML parsing crate, disambiguated from this module.
use ::scraper::{ElementRef, Html, Selector};

use crate::scraper::ScrapeError;

/// One listing detail page, as parsed. Every field the page may or may not
/// carry is an `Option`: a miss is recorded per field, never a panic, so the
/// caller can decide which misses disqualify the listing.
#[derive(Debug, Clone, Default)]
pub struct ListingFields {
    pub url: String,
    pub posting_id: Option<i64>,
    pub created: Option<String>,
    pub name: Option<String>,
    pub price: Option<i64>,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub sq_feet: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

fn sel(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::HtmlParse(e.to_string()))
}

/// Pull every result link off a search page.
pub fn parse_search_links(html: &str) -> Result<Vec<String>, ScrapeError> {
    let doc = Html::parse_document(html);
    let link_sel = sel("a.result-title")?;

    Ok(doc
        .select(&link_sel)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect())
}

/// Parse a detail page into a per-field record. Field heuristics follow the
/// page's markup: posting id and created time live in `p.postinginfo`
/// paragraphs, the title and coordinates in `meta` tags, price and
/// bed/bath/area in tagged `span`s.
pub fn parse_listing_page(html: &str, url: &str) -> Result<ListingFields, ScrapeError> {
    let doc = Html::parse_document(html);

    let postinginfo_sel = sel("p.postinginfo")?;
    let created_sel = sel("p.postinginfo time")?;
    let title_sel = sel(r#"meta[property="og:title"]"#)?;
    let price_sel = sel("span.price")?;
    let geo_sel = sel(r#"meta[name="geo.position"]"#)?;
    let bubble_sel = sel("span.shared-line-bubble")?;
    let b_sel = sel("b")?;

    let mut fields = ListingFields {
        url: url.to_string(),
        ..Default::default()
    };

    // ----- Posting id -----
    for p in doc.select(&postinginfo_sel) {
        let text: String = p.text().collect();
        if let Some(rest) = text.trim().strip_prefix("post id:") {
            fields.posting_id = rest.trim().parse().ok();
            break;
        }
    }

    // ----- Created -----
    // Prefer the machine-readable datetime attribute; the visible text lacks
    // seconds, so pad it when we have to fall back.
    if let Some(time) = doc.select(&created_sel).next() {
        fields.created = match time.value().attr("datetime") {
            Some(dt) => Some(dt.to_string()),
            None => {
                let text: String = time.text().collect();
                let text = text.trim();
                (!text.is_empty()).then(|| format!("{text}:00"))
            }
        };
    }

    // ----- Name -----
    fields.name = doc
        .select(&title_sel)
        .next()
        .and_then(|m| m.value().attr("content"))
        .map(str::to_string)
        .filter(|s| !s.is_empty());

    // ----- Price -----
    fields.price = doc
        .select(&price_sel)
        .next()
        .and_then(|span| parse_price(&span.text().collect::<String>()));

    // ----- Latitude / longitude -----
    if let Some(content) = doc
        .select(&geo_sel)
        .next()
        .and_then(|m| m.value().attr("content"))
    {
        if let Some((lat, lon)) = content.split_once(';') {
            fields.latitude = lat.trim().parse().ok();
            fields.longitude = lon.trim().parse().ok();
        }
    }

    // ----- Bedrooms / bathrooms / floor area -----
    // First bubble holds "<b>2BR</b> / <b>1Ba</b>", second holds "<b>700</b>ft2".
    let bubbles: Vec<_> = doc.select(&bubble_sel).collect();
    if let Some(bed_bath) = bubbles.first() {
        let mut bolds = bed_bath.select(&b_sel);
        fields.bedrooms = bolds.next().and_then(|b| nonempty_text(&b));
        fields.bathrooms = bolds.next().and_then(|b| nonempty_text(&b));
    }
    if let Some(area) = bubbles.get(1) {
        fields.sq_feet = area
            .select(&b_sel)
            .next()
            .and_then(|b| b.text().collect::<String>().trim().parse().ok());
    }

    Ok(fields)
}

fn nonempty_text(el: &ElementRef<'_>) -> Option<String> {
    let text: String = el.text().collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// "$2,100" -> 2100
fn parse_price(raw: &str) -> Option<i64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL_PAGE: &str = r#"
        <html>
        <head>
            <meta property="og:title" content="Charming 2BR near the park - $2,100">
            <meta name="geo.position" content="34.0722;-118.3612">
        </head>
        <body>
            <span class="price">$2,100</span>
            <span class="shared-line-bubble"><b>2BR</b> / <b>1Ba</b></span>
            <span class="shared-line-bubble"><b>700</b>ft<sup>2</sup></span>
            <div class="postinginfos">
                <p class="postinginfo">post id: 7005735435</p>
                <p class="postinginfo reveal">posted:
                    <time class="date timeago" datetime="2019-11-30T12:34:56-0800">about 2 hours ago</time>
                </p>
            </div>
        </body>
        </html>
    "#;

    #[test]
    fn parses_every_field_from_a_complete_page() {
        let fields = parse_listing_page(DETAIL_PAGE, "https://example.org/apa/1").unwrap();

        assert_eq!(fields.url, "https://example.org/apa/1");
        assert_eq!(fields.posting_id, Some(7005735435));
        assert_eq!(fields.created.as_deref(), Some("2019-11-30T12:34:56-0800"));
        assert_eq!(
            fields.name.as_deref(),
            Some("Charming 2BR near the park - $2,100")
        );
        assert_eq!(fields.price, Some(2100));
        assert_eq!(fields.bedrooms.as_deref(), Some("2BR"));
        assert_eq!(fields.bathrooms.as_deref(), Some("1Ba"));
        assert_eq!(fields.sq_feet, Some(700));
        assert_eq!(fields.latitude, Some(34.0722));
        assert_eq!(fields.longitude, Some(-118.3612));
    }

    #[test]
    fn missing_markup_yields_none_per_field() {
        // No price span, no geo meta: only those fields come back empty.
        let html = r#"
            <html><head><meta property="og:title" content="Studio"></head>
            <body>
                <span class="shared-line-bubble"><b>0BR</b> / <b>1Ba</b></span>
                <p class="postinginfo">post id: 42</p>
            </body></html>
        "#;
        let fields = parse_listing_page(html, "u").unwrap();

        assert_eq!(fields.posting_id, Some(42));
        assert_eq!(fields.name.as_deref(), Some("Studio"));
        assert_eq!(fields.bedrooms.as_deref(), Some("0BR"));
        assert_eq!(fields.price, None);
        assert_eq!(fields.sq_feet, None);
        assert_eq!(fields.latitude, None);
        assert_eq!(fields.longitude, None);
        assert_eq!(fields.created, None);
    }

    #[test]
    fn created_falls_back_to_visible_text() {
        let html = r#"<p class="postinginfo">posted: <time>2019-11-30 12:34</time></p>"#;
        let fields = parse_listing_page(html, "u").unwrap();
        assert_eq!(fields.created.as_deref(), Some("2019-11-30 12:34:00"));
    }

    #[test]
    fn malformed_geo_position_is_a_field_miss() {
        let html = r#"<meta name="geo.position" content="not-coordinates">"#;
        let fields = parse_listing_page(html, "u").unwrap();
        assert_eq!(fields.latitude, None);
        assert_eq!(fields.longitude, None);
    }

    #[test]
    fn price_strips_currency_formatting() {
        assert_eq!(parse_price("$2,100"), Some(2100));
        assert_eq!(parse_price(" $950 "), Some(950));
        assert_eq!(parse_price("call us"), None);
    }

    #[test]
    fn search_page_links_come_from_result_titles() {
        let html = r#"
            <ul>
                <li><a class="result-title" href="https://example.org/apa/1.html">one</a></li>
                <li><a class="other" href="https://example.org/nope.html">skip</a></li>
                <li><a class="result-title" href="https://example.org/apa/2.html">two</a></li>
            </ul>
        "#;
        let links = parse_search_links(html).unwrap();
        assert_eq!(
            links,
            vec![
                "https://example.org/apa/1.html".to_string(),
                "https://example.org/apa/2.html".to_string(),
            ]
        );
    }
}
