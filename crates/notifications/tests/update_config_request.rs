//! UpdateNotificationConfigRequest through both codecs, for every channel type

use herald_core::document::{from_json_str, to_json_string};
use herald_core::wire::{from_bytes, to_bytes};
use herald_core::{ActionRequest, DocumentError, Error};
use herald_notifications::{
    Chime, ConfigData, ConfigType, Email, EmailGroup, EmailRecipient, MethodType, MicrosoftTeams,
    NotificationConfig, SesAccount, Slack, SmtpAccount, Sns, UpdateNotificationConfigRequest,
    Webhook,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_test_writer()
        .try_init();
}

fn config(config_type: ConfigType, data: impl Into<ConfigData>) -> NotificationConfig {
    NotificationConfig::new("name", "description", config_type, Some(data.into()), true).unwrap()
}

fn webhook_config() -> NotificationConfig {
    config(
        ConfigType::Webhook,
        Webhook::new("https://domain.com/sample_webhook_url#1234567890").unwrap(),
    )
}

fn microsoft_teams_config() -> NotificationConfig {
    config(
        ConfigType::MicrosoftTeams,
        MicrosoftTeams::new("https://domain.com/sample_microsoft_teams_url#1234567890").unwrap(),
    )
}

fn slack_config() -> NotificationConfig {
    config(
        ConfigType::Slack,
        Slack::new("https://domain.com/sample_slack_url#1234567890").unwrap(),
    )
}

fn chime_config() -> NotificationConfig {
    config(
        ConfigType::Chime,
        Chime::new("https://domain.com/sample_chime_url#1234567890").unwrap(),
    )
}

fn email_group_config() -> NotificationConfig {
    config(
        ConfigType::EmailGroup,
        EmailGroup::new(vec![EmailRecipient::new("dummy@company.com").unwrap()]),
    )
}

fn email_config() -> NotificationConfig {
    config(
        ConfigType::Email,
        Email::new(
            "sample_1@dummy.com",
            vec![EmailRecipient::new("sample_2@dummy.com").unwrap()],
            vec!["sample_3@dummy.com".to_string()],
        )
        .unwrap(),
    )
}

fn smtp_account_config() -> NotificationConfig {
    config(
        ConfigType::SmtpAccount,
        SmtpAccount::new("http://dummy.com", 11, MethodType::Ssl, "sample@dummy.com").unwrap(),
    )
}

fn sns_config() -> NotificationConfig {
    config(
        ConfigType::Sns,
        Sns::new(
            "arn:aws:sns:us-west-2:012345678912:test-notification",
            Some("arn:aws:iam::012345678912:role/iam-test".to_string()),
        )
        .unwrap(),
    )
}

fn ses_account_config() -> NotificationConfig {
    config(
        ConfigType::SesAccount,
        SesAccount::new("us-east-1", None, "alerts@dummy.com").unwrap(),
    )
}

fn all_configs() -> Vec<NotificationConfig> {
    vec![
        webhook_config(),
        microsoft_teams_config(),
        slack_config(),
        chime_config(),
        email_group_config(),
        email_config(),
        smtp_account_config(),
        sns_config(),
        ses_account_config(),
    ]
}

#[test]
fn test_binary_round_trip_every_channel() {
    for config in all_configs() {
        let request = UpdateNotificationConfigRequest::new("config_id", config.clone());
        let recreated =
            from_bytes::<UpdateNotificationConfigRequest>(&to_bytes(&request)).unwrap();
        assert_eq!(recreated.validate(), None);
        assert_eq!(recreated.config(), &config);
        assert_eq!(recreated.config_id(), "config_id");
    }
}

#[test]
fn test_document_round_trip_every_channel() {
    for config in all_configs() {
        let request = UpdateNotificationConfigRequest::new("config_id", config.clone());
        let recreated =
            from_json_str::<UpdateNotificationConfigRequest>(&to_json_string(&request)).unwrap();
        assert_eq!(recreated.config(), &config);
        assert_eq!(recreated.config_id(), "config_id");
    }
}

fn parse_request(config_type: &str, payload: &str) -> UpdateNotificationConfigRequest {
    let text = format!(
        r#"{{
            "config_id":"config_id1",
            "config":{{
                "name":"name",
                "description":"description",
                "config_type":"{config_type}",
                "feature_list":["index_management"],
                "is_enabled":true,
                "{config_type}":{payload}
            }}
        }}"#
    );
    from_json_str::<UpdateNotificationConfigRequest>(&text).unwrap()
}

#[test]
fn test_parse_slack_document() {
    init_tracing();
    let request = parse_request(
        "slack",
        r#"{"url":"https://domain.com/sample_slack_url#1234567890"}"#,
    );
    assert_eq!(request.config(), &slack_config());
    assert_eq!(request.config().config_type(), ConfigType::Slack);
    match request.config().config_data() {
        Some(ConfigData::Slack(slack)) => {
            assert_eq!(slack.url(), "https://domain.com/sample_slack_url#1234567890")
        }
        other => panic!("expected slack payload, got {:?}", other),
    }
    assert_eq!(request.config_id(), "config_id1");
}

#[test]
fn test_parse_webhook_document() {
    let request = parse_request(
        "webhook",
        r#"{"url":"https://domain.com/sample_webhook_url#1234567890"}"#,
    );
    assert_eq!(request.config(), &webhook_config());
}

#[test]
fn test_parse_chime_document() {
    let request = parse_request(
        "chime",
        r#"{"url":"https://domain.com/sample_chime_url#1234567890"}"#,
    );
    assert_eq!(request.config(), &chime_config());
}

#[test]
fn test_parse_email_group_document() {
    let request = parse_request(
        "email_group",
        r#"{"recipient_list":[{"recipient":"dummy@company.com"}]}"#,
    );
    assert_eq!(request.config(), &email_group_config());
}

#[test]
fn test_parse_email_document() {
    let request = parse_request(
        "email",
        r#"{
            "email_account_id":"sample_1@dummy.com",
            "recipient_list":[{"recipient":"sample_2@dummy.com"}],
            "email_group_id_list":["sample_3@dummy.com"]
        }"#,
    );
    assert_eq!(request.config(), &email_config());
}

#[test]
fn test_parse_smtp_account_document() {
    let request = parse_request(
        "smtp_account",
        r#"{"host":"http://dummy.com", "port":11,"method": "ssl", "from_address": "sample@dummy.com" }"#,
    );
    assert_eq!(request.config(), &smtp_account_config());
}

#[test]
fn test_invalid_json_is_syntax_error() {
    let err = from_json_str::<UpdateNotificationConfigRequest>("sample message").unwrap_err();
    assert!(matches!(err, Error::Document(DocumentError::Syntax(_))));
}

#[test]
fn test_extra_fields_ignored() {
    init_tracing();
    let text = r#"{
        "config_id":"config_id1",
        "config":{
            "name":"name",
            "description":"description",
            "config_type":"slack",
            "feature_list":["index_management"],
            "is_enabled":true,
            "slack":{"url":"https://domain.com/sample_slack_url#1234567890"},
            "extra_field_1":["extra", "value"],
            "extra_field_2":{"extra":"value"},
            "extra_field_3":"extra value 3"
        },
        "extra_top_level":{"nested":[1,{"deep":true}]}
    }"#;
    let request = from_json_str::<UpdateNotificationConfigRequest>(text).unwrap();
    assert_eq!(request.config(), &slack_config());
    assert_eq!(request.config_id(), "config_id1");
}

#[test]
fn test_discriminator_order_irrelevant() {
    let url = "https://domain.com/sample_slack_url#1234567890";
    let before = format!(
        r#"{{"config_id":"c","config":{{"config_type":"slack","slack":{{"url":"{url}"}},"name":"name","description":"description"}}}}"#
    );
    let after = format!(
        r#"{{"config_id":"c","config":{{"slack":{{"url":"{url}"}},"name":"name","description":"description","config_type":"slack"}}}}"#
    );
    let between = format!(
        r#"{{"config_id":"c","config":{{"name":"name","slack":{{"url":"{url}"}},"config_type":"slack","description":"description"}}}}"#
    );
    for text in [before, after, between] {
        let request = from_json_str::<UpdateNotificationConfigRequest>(&text).unwrap();
        assert_eq!(request.config(), &slack_config());
    }
}

#[test]
fn test_mismatched_discriminator_rejected() {
    let text = r#"{"config_id":"c","config":{"name":"n","config_type":"chime",
        "slack":{"url":"https://domain.com/x"}}}"#;
    let err = from_json_str::<UpdateNotificationConfigRequest>(text).unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("ConfigType: chime and data doesn't match"));
}

#[test]
fn test_unknown_config_type_uses_sentinel() {
    init_tracing();
    let text = r#"{"config_id":"c","config":{"name":"n","config_type":"carrier_pigeon",
        "carrier_pigeon":{"loft":"north"}}}"#;
    let request = from_json_str::<UpdateNotificationConfigRequest>(text).unwrap();
    assert_eq!(request.config().config_type(), ConfigType::None);
    assert_eq!(request.config().config_data(), None);
}

#[test]
fn test_missing_required_tags_named() {
    for (text, tag) in [
        (r#"{"config":{"name":"n","config_type":"none"}}"#, "config_id"),
        (r#"{"config_id":"c"}"#, "config"),
        (r#"{"config_id":"c","config":{"config_type":"none"}}"#, "name"),
        (r#"{"config_id":"c","config":{"name":"n"}}"#, "config_type"),
    ] {
        match from_json_str::<UpdateNotificationConfigRequest>(text).unwrap_err() {
            Error::Document(DocumentError::MissingField { field, .. }) => assert_eq!(field, tag),
            other => panic!("expected missing {}, got {:?}", tag, other),
        }
    }
}
