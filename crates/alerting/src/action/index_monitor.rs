//! Create or update a monitor
//!
//! Travels between nodes in binary form only.

use crate::model::Monitor;
use herald_core::dispatch::{TagRegistry, TaggedVariant};
use herald_core::wire::{Readable, WireInput, WireOutput, Writeable};
use herald_core::{ActionRequest, DocumentError, RequestValidationErrors, Result};
use std::fmt;

/// When an index write becomes visible to search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RefreshPolicy {
    /// Do not refresh
    #[default]
    None,
    /// Refresh right after the write
    Immediate,
    /// Wait for the next scheduled refresh
    WaitUntil,
}

/// Tag resolver for [`RefreshPolicy`]; unknown values are errors
pub static REFRESH_POLICIES: TagRegistry<RefreshPolicy> = TagRegistry::rejecting();

impl TaggedVariant for RefreshPolicy {
    const FAMILY: &'static str = "RefreshPolicy";
    const ALL: &'static [Self] = &[
        RefreshPolicy::None,
        RefreshPolicy::Immediate,
        RefreshPolicy::WaitUntil,
    ];

    fn tag(self) -> &'static str {
        match self {
            RefreshPolicy::None => "false",
            RefreshPolicy::Immediate => "true",
            RefreshPolicy::WaitUntil => "wait_for",
        }
    }
}

impl RefreshPolicy {
    /// Parse a `refresh` request parameter
    ///
    /// A bare `refresh` (empty value) means [`RefreshPolicy::Immediate`].
    pub fn from_param(value: &str) -> std::result::Result<Self, DocumentError> {
        if value.is_empty() {
            return Ok(RefreshPolicy::Immediate);
        }
        REFRESH_POLICIES.resolve(value)
    }
}

impl fmt::Display for RefreshPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// HTTP method the request arrived with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum RestMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Patch,
    Trace,
    Connect,
}

/// Tag resolver for [`RestMethod`]; unknown methods are errors
pub static REST_METHODS: TagRegistry<RestMethod> = TagRegistry::rejecting();

impl TaggedVariant for RestMethod {
    const FAMILY: &'static str = "RestMethod";
    const ALL: &'static [Self] = &[
        RestMethod::Get,
        RestMethod::Post,
        RestMethod::Put,
        RestMethod::Delete,
        RestMethod::Head,
        RestMethod::Options,
        RestMethod::Patch,
        RestMethod::Trace,
        RestMethod::Connect,
    ];

    fn tag(self) -> &'static str {
        match self {
            RestMethod::Get => "GET",
            RestMethod::Post => "POST",
            RestMethod::Put => "PUT",
            RestMethod::Delete => "DELETE",
            RestMethod::Head => "HEAD",
            RestMethod::Options => "OPTIONS",
            RestMethod::Patch => "PATCH",
            RestMethod::Trace => "TRACE",
            RestMethod::Connect => "CONNECT",
        }
    }
}

impl fmt::Display for RestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Index `monitor` under `monitor_id`
///
/// `seq_no` and `primary_term` guard against concurrent updates. The monitor
/// is the only field that can be replaced after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMonitorRequest {
    monitor_id: String,
    seq_no: i64,
    primary_term: i64,
    refresh_policy: RefreshPolicy,
    method: RestMethod,
    monitor: Monitor,
    rbac_roles: Option<Vec<String>>,
}

impl IndexMonitorRequest {
    /// Create a request
    pub fn new(
        monitor_id: impl Into<String>,
        seq_no: i64,
        primary_term: i64,
        refresh_policy: RefreshPolicy,
        method: RestMethod,
        monitor: Monitor,
        rbac_roles: Option<Vec<String>>,
    ) -> Self {
        IndexMonitorRequest {
            monitor_id: monitor_id.into(),
            seq_no,
            primary_term,
            refresh_policy,
            method,
            monitor,
            rbac_roles,
        }
    }

    /// Target monitor id
    pub fn monitor_id(&self) -> &str {
        &self.monitor_id
    }

    /// Expected sequence number
    pub fn seq_no(&self) -> i64 {
        self.seq_no
    }

    /// Expected primary term
    pub fn primary_term(&self) -> i64 {
        self.primary_term
    }

    /// Refresh behavior of the write
    pub fn refresh_policy(&self) -> RefreshPolicy {
        self.refresh_policy
    }

    /// HTTP method of the originating call
    pub fn method(&self) -> RestMethod {
        self.method
    }

    /// Monitor to index
    pub fn monitor(&self) -> &Monitor {
        &self.monitor
    }

    /// Replace the monitor to index
    pub fn set_monitor(&mut self, monitor: Monitor) {
        self.monitor = monitor;
    }

    /// Backend roles allowed to see the monitor
    pub fn rbac_roles(&self) -> Option<&[String]> {
        self.rbac_roles.as_deref()
    }
}

impl ActionRequest for IndexMonitorRequest {
    fn validate(&self) -> Option<RequestValidationErrors> {
        None
    }
}

impl Writeable for IndexMonitorRequest {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_string(&self.monitor_id);
        out.write_i64(self.seq_no);
        out.write_i64(self.primary_term);
        out.write_enum(self.refresh_policy);
        out.write_enum(self.method);
        self.monitor.write_to(out);
        out.write_optional_string_list(self.rbac_roles.as_deref());
    }
}

impl Readable for IndexMonitorRequest {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        Ok(IndexMonitorRequest {
            monitor_id: input.read_string()?,
            seq_no: input.read_i64()?,
            primary_term: input.read_i64()?,
            refresh_policy: input.read_enum()?,
            method: input.read_enum()?,
            monitor: Monitor::read_from(input)?,
            rbac_roles: input.read_optional_string_list()?,
        })
    }
}
