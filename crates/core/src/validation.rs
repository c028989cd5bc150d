//! Construction-time checks shared by record constructors
//!
//! Every record constructor funnels its invariants through these helpers so
//! the messages stay uniform. Each returns `Err(ValidationError)` naming the
//! record that refused construction.
//!
//! ## Formats
//!
//! - Email: `local@domain`, at most 320 characters, local part 1-64
//!   characters, domain made of dot-separated alphanumeric/dash labels with
//!   at least one dot.
//! - URL: absolute `http` or `https` URL with a host.
//! - ARN: `arn:<partition>:<service>:<region>:<account>:<resource>` with an
//!   `aws` partition and a 12-digit account. IAM ARNs have an empty region.

use crate::error::ValidationError;
use url::Url;

/// Maximum length of an email address
pub const MAX_EMAIL_LENGTH: usize = 320;

/// Maximum length of the local part of an email address
pub const MAX_EMAIL_LOCAL_LENGTH: usize = 64;

/// Fail with `message` unless `condition` holds
pub fn require(
    condition: bool,
    record: &'static str,
    message: impl Into<String>,
) -> Result<(), ValidationError> {
    if condition {
        Ok(())
    } else {
        Err(ValidationError::new(record, message))
    }
}

/// Fail unless `value` has at least one non-whitespace character
pub fn require_non_empty(value: &str, record: &'static str, what: &str) -> Result<(), ValidationError> {
    require(
        !value.trim().is_empty(),
        record,
        format!("{} is null or empty", what),
    )
}

/// Fail unless `address` is a well-formed email address
pub fn validate_email(address: &str, record: &'static str) -> Result<(), ValidationError> {
    require(is_valid_email(address), record, "Invalid email address")
}

fn is_valid_email(address: &str) -> bool {
    if address.len() > MAX_EMAIL_LENGTH {
        return false;
    }
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > MAX_EMAIL_LOCAL_LENGTH || domain.contains('@') {
        return false;
    }
    if !local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "!#$%&'*+/=?^_`{|}~.-".contains(c))
    {
        return false;
    }
    if !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

/// Fail unless `value` is an absolute http(s) URL
pub fn validate_url(value: &str, record: &'static str) -> Result<(), ValidationError> {
    let valid = match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    };
    require(valid, record, "Invalid URL or unsupported")
}

/// Fail unless `arn` is an AWS ARN for `service`
pub fn validate_arn(arn: &str, service: &str, record: &'static str) -> Result<(), ValidationError> {
    require(
        is_valid_arn(arn, service),
        record,
        format!("Invalid AWS {} ARN: {}", service, arn),
    )
}

fn is_valid_arn(arn: &str, service: &str) -> bool {
    let parts: Vec<&str> = arn.splitn(6, ':').collect();
    let [prefix, partition, arn_service, region, account, resource] = parts.as_slice() else {
        return false;
    };
    if *prefix != "arn" || !partition.starts_with("aws") || *arn_service != service {
        return false;
    }
    let region_ok = if service == "iam" {
        region.is_empty()
    } else {
        !region.is_empty()
            && region
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    };
    region_ok
        && account.len() == 12
        && account.chars().all(|c| c.is_ascii_digit())
        && !resource.is_empty()
}
