use serde_json::json;

use super::*;

fn record(value: Value) -> ProductRecord {
    ProductRecord::from_value(value).expect("fixture must be a JSON object")
}

#[test]
fn from_value_rejects_non_objects() {
    assert!(ProductRecord::from_value(json!([1, 2])).is_none());
    assert!(ProductRecord::from_value(json!("sofa")).is_none());
    assert!(ProductRecord::from_value(Value::Null).is_none());
}

#[test]
fn numeric_ids_render_without_fraction() {
    let r = record(json!({ "id": 5, "product_id": 12.0 }));
    assert_eq!(r.id.as_deref(), Some("5"));
    assert_eq!(r.product_id.as_deref(), Some("12"));
}

#[test]
fn blank_strings_count_as_absent() {
    let r = record(json!({ "id": "  ", "title": "" }));
    assert!(r.id.is_none());
    assert!(r.title.is_none());
}

#[test]
fn coordinate_aliases_resolve() {
    let r = record(json!({ "latitude": -23.55, "longitude": "-46.63" }));
    assert_eq!(r.coordinates(), Some((-23.55, -46.63)));

    let r = record(json!({ "lat": -23.55, "lon": -46.63 }));
    assert!(r.has_coordinates());
}

#[test]
fn partial_or_garbage_coordinates_are_not_resolvable() {
    let r = record(json!({ "lat": -23.55 }));
    assert!(!r.has_coordinates());

    let r = record(json!({ "lat": "north", "lng": -46.0 }));
    assert!(!r.has_coordinates());

    let r = record(json!({ "lat": null, "latitude": 10.0, "lng": 20.0 }));
    assert_eq!(r.coordinates(), Some((10.0, 20.0)));
}

#[test]
fn location_aliases_resolve() {
    let r = record(json!({ "cidade": "Campinas", "uf": "SP", "countryCode": "BR" }));
    assert_eq!(r.city.as_deref(), Some("Campinas"));
    assert_eq!(r.state.as_deref(), Some("SP"));
    assert_eq!(r.country.as_deref(), Some("BR"));
}

#[test]
fn tags_accept_arrays_and_comma_strings() {
    let r = record(json!({ "tags": ["usado", "barato"] }));
    assert_eq!(r.tags, vec!["usado", "barato"]);

    let r = record(json!({ "tags": "usado, barato ,," }));
    assert_eq!(r.tags, vec!["usado", "barato"]);
}

#[test]
fn attribute_aliases_map_to_canonical_names() {
    let r = record(json!({
        "serviceType": "Encanador",
        "property_type": "Apartamento",
        "bedrooms": 2
    }));
    assert_eq!(r.attributes.get("service_type").map(String::as_str), Some("Encanador"));
    assert_eq!(r.attributes.get("property_type").map(String::as_str), Some("Apartamento"));
    assert_eq!(r.attributes.get("bedrooms").map(String::as_str), Some("2"));
}

#[test]
fn nested_attribute_bags_are_flattened() {
    let r = record(json!({
        "realEstate": { "suites": 1, "amenities": ["piscina", "academia"], "owner": { "x": 1 } }
    }));
    assert_eq!(r.attributes.get("realEstate.suites").map(String::as_str), Some("1"));
    assert_eq!(
        r.attributes.get("realEstate.amenities").map(String::as_str),
        Some("piscina academia")
    );
    assert!(!r.attributes.contains_key("realEstate.owner"));
}

#[test]
fn searchable_text_includes_every_text_source() {
    let r = record(json!({
        "title": "Apartamento",
        "description": "2 quartos",
        "category": "Imóveis",
        "tags": ["centro"],
        "city": "Santos",
        "job": { "company": "ACME" }
    }));
    let text = r.searchable_text();
    for needle in ["Apartamento", "2 quartos", "Imóveis", "centro", "Santos", "ACME"] {
        assert!(text.contains(needle), "missing {needle} in {text}");
    }
}

#[test]
fn serializes_back_to_the_raw_payload() {
    let payload = json!({ "id": 7, "title": "Bicicleta", "extra": { "views": 3 } });
    let r = record(payload.clone());
    assert_eq!(serde_json::to_value(&r).unwrap(), payload);
}
