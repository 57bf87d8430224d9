use std::fs::File;
use serde::{Deserialize, Serialize};
use fieldselect::Node;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct User {
    name: String,
    surname: String,
    age: u32,
    #[serde(rename = "e-mail")]
    email: String,
    #[serde(skip)]
    password: String,
    tags: Vec<String>,
    address: Option<Address>,
    billing: Address,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct Address {
    street: String,
    number: u32,
    geo: Option<Geo>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct Geo {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct TestData {
    selection: Node,
    input: User,
    expected: User,
}

#[test]
fn test_all() {
    let tests = [
        "flat",
        "nested",
        "nested_optional",
        "absent_optional",
        "whole_record",
        "renamed",
        "empty",
        "deep",
    ];
    for name in tests {
        do_test(name);
    }
}

#[test]
fn test_skipped_field_never_selected() {
    //given
    let user = User {
        name: "John".into(),
        password: "hunter2".into(),
        ..Default::default()
    };
    let fields = fieldselect::parse("name,password").unwrap();

    //when
    let result = fieldselect::project(&fields, &user).unwrap();

    //then
    assert_eq!(result.name, "John");
    assert_eq!(result.password, "");
}

#[test]
fn test_wildcard_is_identity() {
    //given
    let file = File::open(format!(
        "{}/tests/data/deep.json",
        env!("CARGO_MANIFEST_DIR")
    ))
    .expect("existing file for test `deep`");
    let TestData { mut input, .. } = serde_json::from_reader(file).expect("parsed test data");
    input.password = "hunter2".into();

    //when
    let result = fieldselect::project(&Node::wildcard(), &input).unwrap();
    let boxed = fieldselect::project(&Node::wildcard(), &Box::new(input.clone())).unwrap();

    //then
    assert_eq!(result, input);
    assert_eq!(*boxed, input);
}

#[test]
fn test_non_finite_coordinates() {
    //given
    let user = User {
        name: "John".into(),
        billing: Address {
            street: "Main".into(),
            geo: Some(Geo {
                lat: f64::INFINITY,
                lon: f64::NAN,
            }),
            ..Default::default()
        },
        ..Default::default()
    };
    let fields = fieldselect::parse("billing(geo(lat,lon))").unwrap();

    //when
    let result = fieldselect::project(&fields, &user).unwrap();

    //then
    let geo = result.billing.geo.expect("selected coordinates");
    assert_eq!(geo.lat, f64::INFINITY);
    assert!(geo.lon.is_nan());
    assert_eq!(result.billing.street, "");
    assert_eq!(result.name, "");
}

#[test]
fn test_invalid_selection_in_fixture() {
    let err = serde_json::from_str::<TestData>(
        r#"{ "selection": "name surname", "input": {}, "expected": {} }"#,
    )
    .unwrap_err();

    assert!(err
        .to_string()
        .contains("missing separator between identifiers"));
}

fn do_test(name: &str) {
    //given
    let file = File::open(format!(
        "{}/tests/data/{}.json",
        env!("CARGO_MANIFEST_DIR"),
        name
    ))
    .unwrap_or_else(|_| panic!("existing file for test `{}`", name));
    let TestData {
        selection,
        input,
        expected,
    } = serde_json::from_reader::<_, TestData>(file)
        .unwrap_or_else(|err| panic!("unable to parse file for test `{}`: {:?}", name, err));

    //when
    let result = fieldselect::project(&selection, &input).unwrap();

    //then
    assert_eq!(result, expected, "failed assertion for test `{}`", name);
}
