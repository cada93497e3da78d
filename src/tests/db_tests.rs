use crate::db::apartments::replace_apartments;
use crate::db::connection::Database;
use crate::db::tracts::replace_tracts;
use crate::tests::utils::{init_test_db, sample_listing, sample_tract};

fn count(db: &Database, table: &str) -> i64 {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    db.with_conn(|conn| Ok(conn.query_row(&sql, [], |row| row.get(0))?))
        .unwrap()
}

#[test]
fn replacing_apartments_keeps_only_the_latest_batch() {
    let db = init_test_db("apt_replace");

    let first = vec![
        sample_listing(1, 2000, 800, 101110),
        sample_listing(2, 2200, 900, 101110),
        sample_listing(3, 2400, 1000, 207500),
    ];
    assert_eq!(replace_apartments(&db, &first).unwrap(), 3);
    assert_eq!(count(&db, "apartment"), 3);

    let second = vec![
        sample_listing(4, 1900, 700, 101110),
        sample_listing(5, 2100, 850, 0),
    ];
    assert_eq!(replace_apartments(&db, &second).unwrap(), 2);
    assert_eq!(count(&db, "apartment"), 2);

    let ids: Vec<i64> = db
        .with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT posting_id FROM apartment ORDER BY posting_id")?;
            let rows = stmt.query_map([], |row| row.get(0))?;
            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            Ok(out)
        })
        .unwrap();
    assert_eq!(ids, vec![4, 5]);
}

#[test]
fn replacing_tracts_keeps_only_the_latest_batch() {
    let db = init_test_db("tract_replace");

    let first = vec![
        sample_tract(101110, 2016, Some(1500), None, Some(0.41)),
        sample_tract(101110, 2018, None, Some(120), Some(0.41)),
    ];
    assert_eq!(replace_tracts(&db, &first).unwrap(), 2);
    assert_eq!(count(&db, "tract"), 2);

    let second = vec![sample_tract(207500, 2018, None, Some(50), None)];
    assert_eq!(replace_tracts(&db, &second).unwrap(), 1);
    assert_eq!(count(&db, "tract"), 1);
}

#[test]
fn persisted_listing_round_trips_every_field() {
    let db = init_test_db("apt_roundtrip");

    let listing = sample_listing(7005735435, 2100, 700, 101110);
    replace_apartments(&db, &[listing.clone()]).unwrap();

    let (posting_id, created, name, price, bedrooms, bathrooms, sq_feet, tract_id, url) = db
        .with_conn(|conn| {
            Ok(conn.query_row(
                "SELECT posting_id, created_at, name, price, bedrooms, bathrooms,
                        sq_feet, tract_id, url
                 FROM apartment",
                [],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, i64>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, String>(5)?,
                        row.get::<_, i64>(6)?,
                        row.get::<_, i64>(7)?,
                        row.get::<_, String>(8)?,
                    ))
                },
            )?)
        })
        .unwrap();

    assert_eq!(posting_id, listing.posting_id);
    assert_eq!(created, listing.created);
    assert_eq!(name, listing.name);
    assert_eq!(price, listing.price);
    assert_eq!(bedrooms, listing.bedrooms);
    assert_eq!(bathrooms, listing.bathrooms);
    assert_eq!(sq_feet, listing.sq_feet);
    assert_eq!(tract_id, listing.tract_id);
    assert_eq!(url, listing.url);

    // No field comes back empty.
    for text in [&created, &name, &bedrooms, &bathrooms, &url] {
        assert!(!text.is_empty());
    }
}

#[test]
fn source_specific_tract_columns_persist_as_null() {
    let db = init_test_db("tract_nulls");

    replace_tracts(&db, &[sample_tract(101110, 2018, None, Some(120), None)]).unwrap();

    let (avg_rent, sqmi, homeless): (Option<i64>, Option<f64>, Option<i64>) = db
        .with_conn(|conn| {
            Ok(conn.query_row(
                "SELECT avg_rent, sqmi, homeless_persons FROM tract",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )?)
        })
        .unwrap();

    assert_eq!(avg_rent, None);
    assert_eq!(sqmi, None);
    assert_eq!(homeless, Some(120));
}
