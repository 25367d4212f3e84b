//! Canonical data model for tracked deployment environments.
//!
//! Records are serialized in camelCase to match the persisted JSON layout,
//! so a blob written by this crate can be read back by anything that already
//! consumes the dashboard's export format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default Couchbase account id filled in when a record omits one.
pub const DEFAULT_COUCHBASE_ID: &str = "sysadmin";

/// Default Couchbase password filled in when a record omits one.
///
/// Carried over verbatim from the legacy data format; existing blobs rely on
/// this exact value being substituted.
pub const DEFAULT_COUCHBASE_PASSWORD: &str = "Crd!@Mav123";

/// One tracked deployment environment with its login, database, CI, and
/// deployment metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// Unique identifier, generated at creation and immutable afterwards
    pub id: String,
    /// Human-readable display label
    pub name: String,
    /// Operational status of the environment
    pub status: EnvironmentStatus,
    /// Login entries for the environment itself; never empty after
    /// normalization
    pub environment_login: Vec<EnvironmentLogin>,
    /// Couchbase connection info
    pub couchbase: CouchbaseConfig,
    /// Jenkins CI info
    pub jenkins: JenkinsConfig,
    /// Path to the Helm chart used to deploy this environment
    pub helm_chart_path: String,
    /// Shell command used to upgrade the Helm release
    pub helm_upgrade_command: String,
    /// Set once when the record is created
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

impl Environment {
    /// Creates a new environment with a generated id, fresh timestamps, and
    /// a single empty login entry.
    #[must_use]
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            status: EnvironmentStatus::Active,
            environment_login: vec![EnvironmentLogin::default()],
            couchbase: CouchbaseConfig::default(),
            jenkins: JenkinsConfig::default(),
            helm_chart_path: String::new(),
            helm_upgrade_command: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Operational status of an environment.
///
/// Closed enumeration; unrecognized values in raw data are defaulted to
/// `Active` by the normalizer rather than passed through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentStatus {
    /// Environment is up and in use
    #[default]
    Active,
    /// Environment is down or retired
    Inactive,
    /// Environment is temporarily unavailable for planned work
    Maintenance,
}

impl EnvironmentStatus {
    /// Wire value as stored in the persisted blob.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Maintenance => "maintenance",
        }
    }

    /// Capitalized label used when presenting the status to a user.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Maintenance => "Maintenance",
        }
    }
}

impl fmt::Display for EnvironmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvironmentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "maintenance" => Ok(Self::Maintenance),
            other => Err(format!(
                "unknown status '{other}' (expected active, inactive, or maintenance)"
            )),
        }
    }
}

/// One set of credentials for reaching the environment itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentLogin {
    /// What this login is for (e.g. "admin console")
    pub label: String,
    /// URL the credentials apply to
    pub url: String,
    /// Account id
    pub id: String,
    /// Account password
    pub password: String,
}

/// Couchbase connection info for the environment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouchbaseConfig {
    /// Cluster URL
    pub url: String,
    /// Account id
    pub id: String,
    /// Account password
    pub password: String,
}

impl Default for CouchbaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            id: DEFAULT_COUCHBASE_ID.to_string(),
            password: DEFAULT_COUCHBASE_PASSWORD.to_string(),
        }
    }
}

/// Jenkins CI info for the environment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JenkinsConfig {
    /// URL of the pipeline that builds/deploys this environment
    pub pipeline_url: String,
}
