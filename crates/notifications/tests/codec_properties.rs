//! Property tests: both codecs reproduce any valid record, and unknown
//! document members never change the decoded result

use herald_core::document::{from_json_str, from_json_value, to_json_string, ToDocument};
use herald_core::wire::{from_bytes, to_bytes};
use herald_notifications::{
    ChannelMessage, ConfigData, ConfigType, EventSource, HttpMethodType, MethodType,
    NotificationConfig, SendNotificationRequest, SeverityType, Slack, SmtpAccount, Webhook,
};
use proptest::prelude::*;
use serde_json::Value;
use std::collections::BTreeMap;

fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _.-]{1,24}".prop_filter("non-blank", |s| !s.trim().is_empty())
}

fn url() -> impl Strategy<Value = String> {
    ("(http|https)", "[a-z]{1,10}", "[a-z]{2,3}", "[a-z0-9/]{0,16}")
        .prop_map(|(scheme, host, tld, path)| format!("{}://{}.{}/{}", scheme, host, tld, path))
}

fn email() -> impl Strategy<Value = String> {
    ("[a-z0-9.]{1,12}", "[a-z]{1,10}", "[a-z]{2,3}")
        .prop_filter("dots", |(local, _, _)| !local.starts_with('.'))
        .prop_map(|(local, domain, tld)| format!("{}@{}.{}", local, domain, tld))
}

fn config_data() -> impl Strategy<Value = ConfigData> {
    prop_oneof![
        url().prop_map(|u| ConfigData::from(Slack::new(u).unwrap())),
        (
            url(),
            proptest::collection::btree_map("[A-Za-z-]{1,8}", "[a-z0-9]{0,8}", 0..4),
            prop_oneof![
                Just(HttpMethodType::Post),
                Just(HttpMethodType::Put),
                Just(HttpMethodType::Patch)
            ],
        )
            .prop_map(|(u, headers, method): (String, BTreeMap<String, String>, _)| {
                ConfigData::from(Webhook::with_options(u, headers, method).unwrap())
            }),
        (
            text(),
            1..65535i32,
            prop_oneof![
                Just(MethodType::None),
                Just(MethodType::Ssl),
                Just(MethodType::StartTls)
            ],
            email(),
        )
            .prop_map(|(host, port, method, from)| {
                ConfigData::from(SmtpAccount::new(host, port, method, from).unwrap())
            }),
    ]
}

fn notification_config() -> impl Strategy<Value = NotificationConfig> {
    (text(), "[a-z ]{0,20}", proptest::option::of(config_data()), any::<bool>()).prop_map(
        |(name, description, data, enabled)| {
            let config_type = data.as_ref().map_or(ConfigType::None, ConfigData::config_type);
            NotificationConfig::new(name, description, config_type, data, enabled).unwrap()
        },
    )
}

fn send_request() -> impl Strategy<Value = SendNotificationRequest> {
    (
        text(),
        text(),
        prop_oneof![
            Just(SeverityType::High),
            Just(SeverityType::Info),
            Just(SeverityType::Critical)
        ],
        proptest::collection::vec(text(), 0..4),
        text(),
        proptest::option::of(text()),
        proptest::collection::vec(text(), 0..4),
        proptest::option::of(text()),
    )
        .prop_map(|(title, reference, severity, tags, body, html, channels, context)| {
            SendNotificationRequest::new(
                EventSource::new(title, reference, severity, tags).unwrap(),
                ChannelMessage::new(body, html, None).unwrap(),
                channels,
                context,
            )
        })
}

proptest! {
    #[test]
    fn prop_config_binary_round_trip(config in notification_config()) {
        prop_assert_eq!(from_bytes::<NotificationConfig>(&to_bytes(&config)).unwrap(), config);
    }

    #[test]
    fn prop_config_document_round_trip(config in notification_config()) {
        let text = to_json_string(&config);
        prop_assert_eq!(from_json_str::<NotificationConfig>(&text).unwrap(), config);
    }

    #[test]
    fn prop_send_request_round_trips(request in send_request()) {
        prop_assert_eq!(
            from_bytes::<SendNotificationRequest>(&to_bytes(&request)).unwrap(),
            request.clone()
        );
        prop_assert_eq!(
            from_json_str::<SendNotificationRequest>(&to_json_string(&request)).unwrap(),
            request
        );
    }

    #[test]
    fn prop_unknown_members_ignored(
        config in notification_config(),
        extra_key in "extra_[a-z]{1,8}",
        extra_value in prop_oneof![
            Just(Value::Null),
            any::<i64>().prop_map(Value::from),
            "[a-z]{0,8}".prop_map(Value::from),
            Just(serde_json::json!({"nested": [1, {"deep": "x"}]})),
        ],
    ) {
        let mut doc = config.to_document();
        if let Value::Object(members) = &mut doc {
            members.insert(extra_key, extra_value);
        }
        prop_assert_eq!(from_json_value::<NotificationConfig>(&doc).unwrap(), config);
    }

    #[test]
    fn prop_truncated_binary_never_decodes(config in notification_config(), cut in 1usize..8) {
        let bytes = to_bytes(&config);
        let end = bytes.len().saturating_sub(cut);
        prop_assert!(from_bytes::<NotificationConfig>(&bytes[..end]).is_err());
    }
}
