//! End-to-end tests: YAML/JSON document -> bytes -> hash -> bytes -> workout

use lubba_encoder::{
    ENCODING_VERSION, MAX_URL_HASH_LEN, Part, Workout, decode_workout, encode_workout,
    encode_yaml, from_hash, from_url_hash, parse_workout_json, to_hash,
};
use serde_json::json;

const WORKOUT_YAML: &str = r#"id: 123abc-dsa
isMetric: true
title: Runcoach Speed 04/13
isCustom: true
activityType: 37
locationType: 3
parts:
- title: Warmup
  goalType: distance
  goalValue: 2e+3
- title: Drills
- title: Custom layout
  layout: 2+2
  layoutValues:
    - distance
    - duration
    - bpm
    - paceCurrent
- repeats: 4
  repeatParts:
  - title: Run
    goalType: duration
    goalValue: 3e+2
    targetType: pace
    targetMin: 2.56e+2
    targetMax: 2.76e+2
  - title: Recover
    goalType: duration
    goalValue: 1.8e+2
  - title: Pace Splits
    goalType: distance
    goalValue: 2e+3
    targetType: paceSplits
    targetMin: 3e+2
    targetMax: -1
- title: Cooldown
  goalType: distance
  goalIsVariable: true
  targetType: bpm
  targetMin: 0
  targetMax: 3e+2
"#;

fn expected_json() -> serde_json::Value {
    json!({
        "isMetric": true,
        "title": "Runcoach Speed 04/13",
        "isCustom": true,
        "activityType": 37,
        "locationType": 3,
        "parts": [
            { "title": "Warmup", "goalType": "distance", "goalValue": 2000.0 },
            { "title": "Drills" },
            {
                "title": "Custom layout",
                "layout": "2+2",
                "layoutValues": ["distance", "duration", "bpm", "paceCurrent"]
            },
            {
                "repeats": 4,
                "repeatParts": [
                    {
                        "title": "Run",
                        "goalType": "duration",
                        "goalValue": 300.0,
                        "targetType": "pace",
                        "targetMin": 256.0,
                        "targetMax": 276.0
                    },
                    { "title": "Recover", "goalType": "duration", "goalValue": 180.0 },
                    {
                        "title": "Pace Splits",
                        "goalType": "distance",
                        "goalValue": 2000.0,
                        "targetType": "paceSplits",
                        "targetMin": 300.0,
                        "targetMax": -1.0
                    }
                ]
            },
            {
                "title": "Cooldown",
                "goalType": "distance",
                "goalIsVariable": true,
                "targetType": "bpm",
                "targetMin": 0.0,
                "targetMax": 300.0
            }
        ]
    })
}

fn decode(data: &[u8]) -> Workout {
    decode_workout(data)
        .expect("decode failed")
        .expect("unsupported version")
}

#[test]
fn test_yaml_roundtrip() {
    let encoded = encode_yaml(WORKOUT_YAML, ENCODING_VERSION).unwrap();
    assert_eq!(encoded[0], ENCODING_VERSION);

    let decoded = decode(&encoded);
    assert_eq!(serde_json::to_value(&decoded).unwrap(), expected_json());
}

#[test]
fn test_json_roundtrip() {
    let mut source = expected_json();
    source["id"] = json!("123abc-dsa");
    let workout = parse_workout_json(&source.to_string()).unwrap();

    let encoded = encode_workout(&workout, ENCODING_VERSION).unwrap();
    assert_eq!(encoded[0], ENCODING_VERSION);

    let decoded = decode(&encoded);
    assert_eq!(decoded, workout);
    assert_eq!(serde_json::to_value(&decoded).unwrap(), expected_json());
}

#[test]
fn test_hash_roundtrip() {
    let encoded = encode_yaml(WORKOUT_YAML, ENCODING_VERSION).unwrap();
    let hash = to_hash(&encoded, false);
    assert!(hash.len() < MAX_URL_HASH_LEN);

    let decoded_from_hash = from_hash(&hash).unwrap();
    assert_eq!(decoded_from_hash, encoded);
    assert_eq!(
        serde_json::to_value(decode(&decoded_from_hash)).unwrap(),
        expected_json()
    );
}

#[test]
fn test_custom_and_known_titles() {
    let encoded = encode_yaml(WORKOUT_YAML, ENCODING_VERSION).unwrap();
    let decoded = decode(&encoded);

    assert_eq!(decoded.parts[0].title.as_deref(), Some("Warmup"));
    assert_eq!(decoded.parts[1].title.as_deref(), Some("Drills"));
    // Known titles cost one byte: Warmup part is flags + code + goal fields
    assert_eq!(&encoded[29..32], &[0x19, 0x00, 1]);
}

#[test]
fn test_nested_parts_in_order() {
    let decoded = decode(&encode_yaml(WORKOUT_YAML, ENCODING_VERSION).unwrap());
    let block = &decoded.parts[3];

    assert_eq!(block.repeats, Some(4));
    let sub_parts = block.repeat_parts.as_ref().unwrap();
    assert_eq!(sub_parts.len(), 3);
    assert_eq!(sub_parts[0].target_type.as_deref(), Some("pace"));
    assert_eq!(sub_parts[1].title.as_deref(), Some("Recover"));
    assert_eq!(sub_parts[2].target_max, Some(-1.0));
}

#[test]
fn test_url_encodes_slashes() {
    // This workout's base64 contains '/'
    let workout = Workout {
        is_custom: true,
        is_metric: true,
        title: "My custom workout".to_string(),
        activity_type: 37,
        location_type: 3,
        parts: vec![
            Part::titled("Warmup"),
            Part {
                title: Some("Run".to_string()),
                goal_type: Some("distance".to_string()),
                goal_value: Some(21000.0),
                target_type: Some("paceSplits".to_string()),
                target_min: Some(4800.0),
                target_max: Some(1.0),
                ..Part::default()
            },
            Part::titled("Cooldown"),
        ],
    };

    let encoded = encode_workout(&workout, ENCODING_VERSION).unwrap();
    let hash = to_hash(&encoded, false);
    let hash_for_url = to_hash(&encoded, true);

    assert!(hash.contains('/'));
    assert!(!hash.contains("%2F"));

    assert!(!hash_for_url.contains('/'));
    assert!(hash_for_url.contains("%2F"));
    assert_eq!(hash_for_url.replace("%2F", "/"), hash);

    assert!(from_hash(&hash_for_url).is_err());
    assert_eq!(decode(&from_url_hash(&hash_for_url).unwrap()), workout);
}

#[test]
fn test_unsupported_version_from_hash() {
    let mut encoded = encode_yaml(WORKOUT_YAML, ENCODING_VERSION).unwrap();
    encoded[0] = 2;
    let bytes = from_hash(&to_hash(&encoded, false)).unwrap();
    assert!(decode_workout(&bytes).unwrap().is_none());
}
