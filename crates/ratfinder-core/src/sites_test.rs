use chrono::TimeZone;
use serde_json::json;

use super::*;

fn sample_record() -> SiteRecord {
    SiteRecord {
        id: "site-1".to_string(),
        name: "Chemist Corner".to_string(),
        address: "1 Queen St, Brisbane".to_string(),
        lat: -27.47,
        lng: 153.02,
        date: "2022-01-10T03:04:05".to_string(),
        price_in_cents: Some(1250),
        price_per_n: Some(2),
        status: StockStatus::LowStock,
    }
}

#[test]
fn stock_status_uses_upstream_wire_names() {
    assert_eq!(
        serde_json::to_value(StockStatus::OutOfStock).unwrap(),
        json!("NO_STOCK")
    );
    assert_eq!(
        serde_json::from_value::<StockStatus>(json!("IN_STOCK")).unwrap(),
        StockStatus::InStock
    );
}

#[test]
fn stock_status_from_str_rejects_unknown() {
    assert_eq!(
        "LOW_STOCK".parse::<StockStatus>().unwrap(),
        StockStatus::LowStock
    );
    assert!(matches!(
        "SOLD_OUT".parse::<StockStatus>(),
        Err(CoreError::InvalidStockStatus(ref s)) if s == "SOLD_OUT"
    ));
}

#[test]
fn stock_status_labels() {
    assert_eq!(StockStatus::InStock.label(), "In Stock");
    assert_eq!(StockStatus::LowStock.label(), "Low Stock");
    assert_eq!(StockStatus::OutOfStock.label(), "Out of Stock");
}

#[test]
fn coordinates_parse_accepts_plain_floats() {
    let point = Coordinates::parse("-27.0", "153.0").expect("valid point");
    assert!((point.lat + 27.0).abs() < f64::EPSILON);
    assert!((point.lng - 153.0).abs() < f64::EPSILON);
}

#[test]
fn coordinates_parse_rejects_garbage() {
    let err = Coordinates::parse("abc", "153.0").unwrap_err();
    assert!(matches!(
        err,
        CoreError::InvalidCoordinate {
            field: "latitude",
            ..
        }
    ));
}

#[test]
fn coordinates_parse_rejects_nan_and_infinity() {
    assert!(Coordinates::parse("NaN", "153.0").is_err());
    assert!(Coordinates::parse("-27.0", "inf").is_err());
}

#[test]
fn coordinates_parse_rejects_out_of_range() {
    let err = Coordinates::parse("91", "0").unwrap_err();
    assert!(matches!(
        err,
        CoreError::InvalidCoordinate {
            field: "latitude",
            ..
        }
    ));
    let err = Coordinates::parse("0", "-180.5").unwrap_err();
    assert!(matches!(
        err,
        CoreError::InvalidCoordinate {
            field: "longitude",
            ..
        }
    ));
}

#[test]
fn site_record_deserializes_camel_case_payload() {
    let record: SiteRecord = serde_json::from_value(json!({
        "id": "abc",
        "name": "Pharmacy",
        "address": "2 King St",
        "lat": -27.1,
        "lng": 153.1,
        "date": "2022-01-10 03:04:05.123",
        "priceInCents": null,
        "pricePerN": null,
        "status": "IN_STOCK",
        "extraField": "ignored"
    }))
    .expect("deserialize");
    assert_eq!(record.id, "abc");
    assert!(record.price_in_cents.is_none());
    assert_eq!(record.status, StockStatus::InStock);
}

#[test]
fn site_record_price_fields_are_optional() {
    let record: SiteRecord = serde_json::from_value(json!({
        "id": "abc",
        "name": "Pharmacy",
        "address": "2 King St",
        "lat": -27.1,
        "lng": 153.1,
        "date": "2022-01-10T03:04:05",
        "status": "LOW_STOCK"
    }))
    .expect("deserialize");
    assert!(record.price_per_n.is_none());
}

#[test]
fn observed_at_reads_naive_dates_as_utc() {
    let record = sample_record();
    assert_eq!(
        record.observed_at().unwrap(),
        Utc.with_ymd_and_hms(2022, 1, 10, 3, 4, 5).unwrap()
    );
}

#[test]
fn observed_at_honours_explicit_offsets() {
    let parsed = parse_observation_date("2022-01-10T13:04:05+10:00").unwrap();
    assert_eq!(parsed, Utc.with_ymd_and_hms(2022, 1, 10, 3, 4, 5).unwrap());
}

#[test]
fn observed_at_accepts_space_separator_and_fraction() {
    let parsed = parse_observation_date("2022-01-10 03:04:05.250").unwrap();
    assert_eq!(parsed.timestamp(), 1_641_783_845);
}

#[test]
fn observed_at_rejects_garbage() {
    assert!(matches!(
        parse_observation_date("yesterday"),
        Err(CoreError::InvalidObservationDate(_))
    ));
}

#[test]
fn enriched_site_flattens_record_fields() {
    let enriched = EnrichedSite {
        site: sample_record(),
        distance: 2.5,
        distance_string: "2.50 km".to_string(),
        last_updated: "about 1 hour ago".to_string(),
        timestamp: 1_641_783_845,
    };
    let value = serde_json::to_value(&enriched).expect("serialize");
    assert_eq!(value["id"], json!("site-1"));
    assert_eq!(value["priceInCents"], json!(1250));
    assert_eq!(value["distanceString"], json!("2.50 km"));
    assert_eq!(value["lastUpdated"], json!("about 1 hour ago"));
    assert_eq!(value["status"], json!("LOW_STOCK"));

    let back: EnrichedSite = serde_json::from_value(value).expect("deserialize");
    assert_eq!(back, enriched);
}
