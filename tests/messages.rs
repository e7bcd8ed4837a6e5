use detectionio::*;
use serde_json::json;

fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

const CORRELATION: &str = r#"{
    "Type": "Correlation",
    "ID": "12GFH48776857",
    "Site": { "Station": "BMN", "Network": "LB", "Channel": "HHZ", "Location": "01" },
    "Source": { "AgencyID": "US", "Author": "TestAuthor" },
    "Phase": "P",
    "Time": "2015-12-28T21:32:24.017Z",
    "Correlation": 0.8,
    "Hypocenter": {
        "Latitude": 40.3344,
        "Longitude": -121.44,
        "Time": "2015-12-28T21:30:44.039Z",
        "Depth": 32.44,
        "LatitudeError": 12.5,
        "LongitudeError": 22.64,
        "TimeError": 2.44,
        "DepthError": 1.984
    },
    "EventType": "earthquake",
    "Magnitude": 2.14,
    "SNR": 3.8,
    "ZScore": 33.67,
    "DetectionThreshold": 1.5,
    "ThresholdType": "minimum",
    "AssociationInfo": {
        "Phase": "P",
        "Distance": 0.442559,
        "Azimuth": 0.418479,
        "Residual": -0.025393,
        "Sigma": 0.086333
    }
}"#;

#[test]
fn parse_correlation_message() {
    init_logger();
    let message: Message = CORRELATION.parse().unwrap();
    let correlation = match &message {
        Message::Correlation(c) => c,
        other => unreachable!("Unexpected message type {}", other.type_name()),
    };
    assert_eq!(correlation.site.scnl(), "LB.BMN.HHZ.01");
    assert_eq!(correlation.time, Some(1451338344.017));
    assert_eq!(correlation.hypocenter.depth_error, Some(1.984));
    assert_eq!(
        correlation.association_info.as_ref().and_then(|a| a.sigma),
        Some(0.086333)
    );
    assert!(message.is_valid());

    let expected: serde_json::Value = serde_json::from_str(CORRELATION).unwrap();
    assert_eq!(message.to_json(), expected);
}

#[test]
fn serde_interop() {
    init_logger();
    let correlation: Correlation = serde_json::from_str(CORRELATION).unwrap();
    let text = serde_json::to_string(&correlation).unwrap();
    let back: Correlation = serde_json::from_str(&text).unwrap();
    assert_eq!(back, correlation);

    let err = serde_json::from_str::<Pick>(r#"{"Type":"Pick","Time":"whenever"}"#).unwrap_err();
    assert!(err.to_string().contains("Time"));
}

#[test]
fn parse_detection_with_data() {
    init_logger();
    let json = json!({
        "Type": "Detection",
        "ID": "12GFH48776857",
        "Source": { "AgencyID": "US", "Author": "TestAuthor" },
        "Hypocenter": {
            "Latitude": 40.3344,
            "Longitude": -121.44,
            "Time": "2015-12-28T21:32:24.017Z",
            "Depth": 32.44
        },
        "DetectionType": "New",
        "Bayes": 2.65,
        "RMS": 3.8,
        "Data": [
            {
                "Type": "Beam",
                "ID": "b1",
                "Site": { "Station": "BMN", "Network": "LB" },
                "Source": { "AgencyID": "US", "Author": "TestAuthor" },
                "Time": "2015-12-28T21:32:30.000Z",
                "Phase": "P",
                "BackAzimuth": 2.65,
                "Slowness": 1.44
            },
            {
                "Type": "Pick",
                "ID": "p1",
                "Site": { "Station": "BOZ", "Network": "US" },
                "Source": { "AgencyID": "US", "Author": "TestAuthor" },
                "Time": "2015-12-28T21:32:31.000Z",
                "Phase": "P"
            },
            { "Type": "Amplitude", "ID": "a1" }
        ]
    });
    let message = Message::from_json(&json).unwrap();
    let detection = match &message {
        Message::Detection(d) => d,
        other => unreachable!("Unexpected message type {}", other.type_name()),
    };
    assert_eq!(detection.pick_data.len(), 1);
    assert_eq!(detection.beam_data.len(), 1);
    assert_eq!(detection.beam_data[0].site.channel, None);
    assert_eq!(message.validate(), Vec::<String>::new());

    let reencoded = message.to_json();
    let ids: Vec<_> = reencoded["Data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["ID"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["p1", "b1"]);
}

#[test]
fn child_data_as_messages() {
    let mut origin = Origin::new("evid1", Source::new("US", "A"), 1.0, 2.0, 1500000000.0, 3.0);
    origin.push_data(Pick::new("p", Site::new("BMN", "", "LB", ""), Source::new("US", "A"), "P", 1500000001.0));
    let messages: Vec<Message> = origin.data().map(Message::from).collect();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].id(), "p");
    assert!(messages[0].is_valid());
}

#[test]
fn unknown_message() {
    init_logger();
    let err = r#"{"Type":"Trigger","ID":"1"}"#.parse::<Message>().unwrap_err();
    assert!(err.to_string().contains("Trigger"));
}
