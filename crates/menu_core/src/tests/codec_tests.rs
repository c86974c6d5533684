use super::*;
use shared::domain::{Course, DishId};

fn record(id: &str, name: &str, course: Course, price: f64) -> DishRecord {
    DishRecord {
        id: DishId::new(id),
        name: name.to_string(),
        description: format!("{name} of the day"),
        course,
        price,
    }
}

#[test]
fn absent_or_blank_input_decodes_to_empty() {
    assert!(decode(None).expect("none").is_empty());
    assert!(decode(Some("")).expect("empty").is_empty());
    assert!(decode(Some("  \n")).expect("blank").is_empty());
}

#[test]
fn encodes_exact_field_names_and_numeric_price() {
    let menu = MenuCollection::from_records(vec![record("1", "Soup", Course::Starter, 40.5)])
        .expect("menu");
    let encoded = encode(&menu).expect("encode");
    assert_eq!(
        encoded,
        r#"[{"id":"1","name":"Soup","description":"Soup of the day","course":"Starter","price":40.5}]"#
    );
}

#[test]
fn decodes_transport_from_original_producers() {
    let raw = r#"[
        {"id":"1718000000000","name":"Bobotie","description":"","course":"Main","price":120},
        {"id":"1718000000001","name":"Melktert","description":"Milk tart","course":"dessert","price":45.99}
    ]"#;
    let menu = decode(Some(raw)).expect("decode");
    assert_eq!(menu.len(), 2);
    assert_eq!(menu.list()[0].price, 120.0);
    assert_eq!(menu.list()[1].course, Course::Other("dessert".to_string()));
}

#[test]
fn round_trip_preserves_awkward_prices_exactly() {
    let menu = MenuCollection::from_records(vec![
        record("a", "Third", Course::Main, 1.0 / 3.0),
        record("b", "Sum", Course::Other("Sides".to_string()), 0.1 + 0.2),
        record("c", "Big", Course::Dessert, 123_456_789.987_654_3),
        record("d", "Tiny", Course::Starter, 5e-324),
    ])
    .expect("menu");

    let decoded = decode(Some(&encode(&menu).expect("encode"))).expect("decode");
    assert_eq!(decoded, menu);
}

#[test]
fn malformed_input_is_reported_not_panicked() {
    for raw in [
        "not json",
        "{\"id\":\"1\"}",
        "[{\"id\":\"1\",\"name\":\"Soup\"}]",
        "[{\"id\":\"1\",\"name\":\"Soup\",\"description\":\"\",\"course\":\"Main\",\"price\":\"12\"}]",
        "[{\"id\":\"1\",\"name\":\"Soup\",\"description\":\"\",\"course\":\"Main\",\"price\":-3}]",
    ] {
        let err = decode(Some(raw)).expect_err("malformed");
        assert!(
            matches!(err, MenuError::MalformedState { .. }),
            "{raw} gave {err:?}"
        );
    }
}

#[test]
fn single_record_side_channel_round_trips() {
    let dish = record("42", "Koeksister", Course::Dessert, 25.0);
    let raw = encode_record(&dish).expect("encode");
    assert_eq!(decode_record(&raw).expect("decode"), dish);
    assert!(decode_record("[]").is_err());
}
