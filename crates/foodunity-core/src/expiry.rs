//! Expiry timestamp parsing and the authoritative listing order.
//!
//! Listing queries are sorted twice: once at the store level over the raw
//! stored value, and once here over the parsed timestamp. The stored value
//! has no enforced type, so the store-level order can disagree with
//! chronological order; the re-sort performed by [`sort_listings`] is the
//! order callers actually see.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use crate::models::{FoodListing, SortOrder};

/// Parses a stored expiry value into a timestamp.
///
/// Strings are tried as RFC 3339, then as naive date-times with and
/// without seconds, then as bare dates (taken as midnight UTC). Numbers
/// are millisecond epochs. Everything else is unparseable and returns
/// `None`.
pub fn parse_expiry(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_expiry_str(s),
        Value::Number(n) => n.as_i64().and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

fn parse_expiry_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| Utc.from_utc_datetime(&naive));
    }
    None
}

/// Re-sorts listings chronologically by parsed expiry.
///
/// Unparseable or missing expiry values order after parseable ones in both
/// directions, so garbage never interleaves with real dates.
pub fn sort_listings(listings: &mut [FoodListing], order: SortOrder) {
    listings.sort_by(|a, b| {
        let ka = a.expired_date_time.as_ref().and_then(parse_expiry);
        let kb = b.expired_date_time.as_ref().and_then(parse_expiry);
        match (ka, kb) {
            (Some(ta), Some(tb)) => match order {
                SortOrder::Asc => ta.cmp(&tb),
                SortOrder::Desc => tb.cmp(&ta),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}
