//! Document field tags
//!
//! Tags are the document-form contract. Renaming one breaks every stored
//! document and REST caller that uses it.

/// Config id
pub const CONFIG_ID_TAG: &str = "config_id";
/// Config name
pub const CONFIG_NAME_TAG: &str = "config_name";
/// Config type discriminator
pub const CONFIG_TYPE_TAG: &str = "config_type";
/// Nested notification config
pub const CONFIG_TAG: &str = "config";
/// Record name
pub const NAME_TAG: &str = "name";
/// Record description
pub const DESCRIPTION_TAG: &str = "description";
/// Enabled flag
pub const IS_ENABLED_TAG: &str = "is_enabled";
/// Endpoint URL
pub const URL_TAG: &str = "url";
/// Webhook header parameters
pub const HEADER_PARAMS_TAG: &str = "header_params";
/// HTTP or SMTP method
pub const METHOD_TAG: &str = "method";
/// SMTP host
pub const HOST_TAG: &str = "host";
/// SMTP port
pub const PORT_TAG: &str = "port";
/// Sender address
pub const FROM_ADDRESS_TAG: &str = "from_address";
/// Recipient address
pub const RECIPIENT_TAG: &str = "recipient";
/// Recipient list
pub const RECIPIENT_LIST_TAG: &str = "recipient_list";
/// Email account config id
pub const EMAIL_ACCOUNT_ID_TAG: &str = "email_account_id";
/// Email group config ids
pub const EMAIL_GROUP_ID_LIST_TAG: &str = "email_group_id_list";
/// SNS topic ARN
pub const TOPIC_ARN_TAG: &str = "topic_arn";
/// IAM role ARN
pub const ROLE_ARN_TAG: &str = "role_arn";
/// AWS region
pub const REGION_TAG: &str = "region";
/// Delivery status code
pub const STATUS_CODE_TAG: &str = "status_code";
/// Delivery status text
pub const STATUS_TEXT_TAG: &str = "status_text";
/// Delivery status
pub const DELIVERY_STATUS_TAG: &str = "delivery_status";
/// Per-recipient email status list
pub const EMAIL_RECIPIENT_STATUS_TAG: &str = "email_recipient_status";
/// Event title
pub const TITLE_TAG: &str = "title";
/// Event reference id
pub const REFERENCE_ID_TAG: &str = "reference_id";
/// Event severity
pub const SEVERITY_TAG: &str = "severity";
/// Event tags
pub const TAGS_TAG: &str = "tags";
/// Plain text message body
pub const TEXT_DESCRIPTION_TAG: &str = "text_description";
/// HTML message body
pub const HTML_DESCRIPTION_TAG: &str = "html_description";
/// Message attachment
pub const ATTACHMENT_TAG: &str = "attachment";
/// Attachment file name
pub const FILE_NAME_TAG: &str = "file_name";
/// Attachment encoding
pub const FILE_ENCODING_TAG: &str = "file_encoding";
/// Attachment payload
pub const FILE_DATA_TAG: &str = "file_data";
/// Attachment content type
pub const FILE_CONTENT_TYPE_TAG: &str = "file_content_type";
/// Event source
pub const EVENT_SOURCE_TAG: &str = "event_source";
/// Channel message
pub const CHANNEL_MESSAGE_TAG: &str = "channel_message";
/// Target channel ids
pub const CHANNEL_ID_LIST_TAG: &str = "channel_id_list";
/// Caller thread context
pub const THREAD_CONTEXT_TAG: &str = "context";
