//! Normalization of raw decoded JSON into canonical [`Environment`] records.
//!
//! Persisted blobs have accumulated two generations of the login layout: the
//! current one stores `environmentLogin` as an array, the legacy one stored a
//! single object. [`normalize`] accepts either (or garbage) and always
//! produces a well-formed record, so the rest of the crate only ever sees the
//! canonical shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

use crate::models::{
    CouchbaseConfig, Environment, EnvironmentLogin, EnvironmentStatus, JenkinsConfig,
};

/// Converts an arbitrary decoded JSON value into a canonical [`Environment`].
///
/// Total and pure: any input, including `null`, scalars, and arrays, yields a
/// structurally valid record. Missing or malformed fields are replaced with
/// defaults without disturbing well-formed sibling fields. Normalizing an
/// already-normalized record yields an identical record, except that a fresh
/// id is generated when the input carries none.
#[must_use]
pub fn normalize(raw: &Value) -> Environment {
    RawEnvironment::deserialize(raw)
        .unwrap_or_default()
        .into_environment()
}

/// Accepts any JSON value, keeping it only when it decodes as `T`.
///
/// This is what makes per-field defaulting possible: a field holding the
/// wrong JSON type decodes to `T::default()` instead of failing the whole
/// record.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// The persisted record as found on disk, before any shape guarantees hold.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawEnvironment {
    #[serde(deserialize_with = "lenient")]
    id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    status: EnvironmentStatus,
    #[serde(deserialize_with = "lenient")]
    environment_login: LoginShape,
    #[serde(deserialize_with = "lenient")]
    couchbase: RawCouchbase,
    #[serde(deserialize_with = "lenient")]
    jenkins: RawJenkins,
    #[serde(deserialize_with = "lenient")]
    helm_chart_path: Option<String>,
    #[serde(deserialize_with = "lenient")]
    helm_upgrade_command: Option<String>,
    #[serde(deserialize_with = "lenient")]
    created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient")]
    updated_at: Option<DateTime<Utc>>,
}

impl RawEnvironment {
    fn into_environment(self) -> Environment {
        let now = Utc::now();

        let mut logins = self.environment_login.into_logins();
        if logins.is_empty() {
            logins.push(EnvironmentLogin::default());
        }

        Environment {
            // An absent or empty id means the record predates id generation;
            // mint one so the collection-wide uniqueness invariant can hold.
            id: self
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            name: self.name.unwrap_or_default(),
            status: self.status,
            environment_login: logins,
            couchbase: self.couchbase.into_config(),
            jenkins: self.jenkins.into_config(),
            helm_chart_path: self.helm_chart_path.unwrap_or_default(),
            helm_upgrade_command: self.helm_upgrade_command.unwrap_or_default(),
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        }
    }
}

/// The two on-disk generations of the `environmentLogin` field, decoded
/// explicitly at the deserialization boundary.
///
/// Variant order matters: untagged deserialization tries arrays first, then
/// the legacy single object, and anything else (null, scalars, absent) lands
/// in `Invalid`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LoginShape {
    /// Current layout: an array of login entries
    Array(Vec<LoginEntry>),
    /// Legacy layout: a single login object
    Legacy(RawLogin),
    /// Anything that is neither an array nor an object
    Invalid(Value),
}

impl Default for LoginShape {
    fn default() -> Self {
        Self::Invalid(Value::Null)
    }
}

impl LoginShape {
    fn into_logins(self) -> Vec<EnvironmentLogin> {
        match self {
            Self::Array(entries) => entries.into_iter().map(|entry| entry.0.into_login()).collect(),
            Self::Legacy(login) => vec![login.into_login()],
            Self::Invalid(_) => Vec::new(),
        }
    }
}

/// Array element wrapper whose decode never fails, so one junk element
/// cannot reject the surrounding array.
#[derive(Debug, Default)]
struct LoginEntry(RawLogin);

impl<'de> Deserialize<'de> for LoginEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self(RawLogin::deserialize(value).unwrap_or_default()))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLogin {
    #[serde(deserialize_with = "lenient")]
    label: Option<String>,
    #[serde(deserialize_with = "lenient")]
    url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    password: Option<String>,
}

impl RawLogin {
    fn into_login(self) -> EnvironmentLogin {
        EnvironmentLogin {
            label: self.label.unwrap_or_default(),
            url: self.url.unwrap_or_default(),
            id: self.id.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCouchbase {
    #[serde(deserialize_with = "lenient")]
    url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    password: Option<String>,
}

impl RawCouchbase {
    fn into_config(self) -> CouchbaseConfig {
        let defaults = CouchbaseConfig::default();
        CouchbaseConfig {
            url: self.url.unwrap_or(defaults.url),
            id: self.id.filter(|id| !id.is_empty()).unwrap_or(defaults.id),
            password: self
                .password
                .filter(|password| !password.is_empty())
                .unwrap_or(defaults.password),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawJenkins {
    #[serde(deserialize_with = "lenient")]
    pipeline_url: Option<String>,
}

impl RawJenkins {
    fn into_config(self) -> JenkinsConfig {
        JenkinsConfig {
            pipeline_url: self.pipeline_url.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use serde_json::json;

    use crate::models::{DEFAULT_COUCHBASE_ID, DEFAULT_COUCHBASE_PASSWORD};

    #[test]
    fn test_legacy_single_login_coerced_to_array() {
        let raw = json!({
            "id": "e1",
            "name": "Prod",
            "environmentLogin": { "url": "u", "id": "i", "password": "p" }
        });

        let env = normalize(&raw);
        assert_eq!(
            env.environment_login,
            vec![EnvironmentLogin {
                label: String::new(),
                url: "u".to_string(),
                id: "i".to_string(),
                password: "p".to_string(),
            }]
        );
    }

    #[test]
    fn test_empty_login_array_padded_to_one_entry() {
        let raw = json!({ "id": "e1", "environmentLogin": [] });

        let env = normalize(&raw);
        assert_eq!(env.environment_login, vec![EnvironmentLogin::default()]);
    }

    #[test]
    fn test_login_array_elements_individually_defaulted() {
        let raw = json!({
            "id": "e1",
            "environmentLogin": [42, { "url": "u" }]
        });

        let env = normalize(&raw);
        assert_eq!(env.environment_login.len(), 2);
        assert_eq!(env.environment_login[0], EnvironmentLogin::default());
        assert_eq!(env.environment_login[1].url, "u");
        assert_eq!(env.environment_login[1].label, "");
    }

    #[test]
    fn test_totality_over_non_object_inputs() {
        for raw in [
            json!(null),
            json!({}),
            json!([]),
            json!(42),
            json!("not an environment"),
            json!(true),
        ] {
            let env = normalize(&raw);
            assert!(!env.id.is_empty());
            assert_eq!(env.status, EnvironmentStatus::Active);
            assert_eq!(env.environment_login.len(), 1);
        }
    }

    #[test]
    fn test_idempotence() {
        let raw = json!({
            "id": "e1",
            "name": "Prod",
            "status": "maintenance",
            "environmentLogin": { "label": "console", "url": "u", "id": "i", "password": "p" },
            "couchbase": { "url": "couch://x" },
            "jenkins": { "pipelineUrl": "https://ci/job" },
            "helmChartPath": "charts/prod",
            "helmUpgradeCommand": "helm upgrade prod charts/prod",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-02-01T00:00:00Z"
        });

        let once = normalize(&raw);
        let twice = normalize(&serde_json::to_value(&once).unwrap());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_couchbase_defaults_filled_in() {
        let env = normalize(&json!({ "id": "e1" }));
        assert_eq!(env.couchbase.url, "");
        assert_eq!(env.couchbase.id, DEFAULT_COUCHBASE_ID);
        assert_eq!(env.couchbase.password, DEFAULT_COUCHBASE_PASSWORD);

        let env = normalize(&json!({
            "id": "e1",
            "couchbase": { "url": "couch://x", "id": "admin", "password": "s3cret" }
        }));
        assert_eq!(env.couchbase.url, "couch://x");
        assert_eq!(env.couchbase.id, "admin");
        assert_eq!(env.couchbase.password, "s3cret");
    }

    #[test]
    fn test_unrecognized_status_defaults_to_active() {
        let env = normalize(&json!({ "id": "e1", "status": "exploded" }));
        assert_eq!(env.status, EnvironmentStatus::Active);

        let env = normalize(&json!({ "id": "e1", "status": 7 }));
        assert_eq!(env.status, EnvironmentStatus::Active);
    }

    #[test]
    fn test_malformed_field_does_not_disturb_siblings() {
        let raw = json!({
            "id": "e1",
            "name": "Prod",
            "couchbase": "not an object",
            "helmChartPath": 12,
        });

        let env = normalize(&raw);
        assert_eq!(env.name, "Prod");
        assert_eq!(env.helm_chart_path, "");
        assert_eq!(env.couchbase.id, DEFAULT_COUCHBASE_ID);
    }

    #[test]
    fn test_missing_id_generates_unique_ids() {
        let a = normalize(&json!({ "name": "a" }));
        let b = normalize(&json!({ "name": "b" }));
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);

        // Empty string counts as absent, same as the legacy data treated it.
        let c = normalize(&json!({ "id": "", "name": "c" }));
        assert!(!c.id.is_empty());
    }

    #[test]
    fn test_timestamps_preserved_when_parseable() {
        let env = normalize(&json!({
            "id": "e1",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "garbage"
        }));

        assert_eq!(
            env.created_at,
            "2024-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
        assert!(env.updated_at > env.created_at);
    }
}
