//! Shared test utilities for `envdash`.
//!
//! This module provides common helper functions for building sample
//! environments and scratch file paths with sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::models::{CouchbaseConfig, Environment, EnvironmentLogin};
use chrono::{TimeZone, Utc};
use std::path::PathBuf;

/// Creates a fully-populated sample environment with fresh timestamps.
///
/// # Defaults
/// * `status`: active
/// * one login entry labeled "console"
/// * couchbase/jenkins/helm fields filled with plausible values
#[must_use]
pub fn sample_environment(name: &str) -> Environment {
    let mut environment = Environment::new(name.to_string());
    environment.environment_login = vec![EnvironmentLogin {
        label: "console".to_string(),
        url: format!("https://{}.example.com", name.to_lowercase()),
        id: "admin".to_string(),
        password: "hunter2".to_string(),
    }];
    environment.couchbase = CouchbaseConfig {
        url: "couchbase://db.example.com".to_string(),
        id: "admin".to_string(),
        password: "hunter2".to_string(),
    };
    environment.jenkins.pipeline_url = format!("https://ci.example.com/job/{name}");
    environment.helm_chart_path = format!("charts/{}", name.to_lowercase());
    environment.helm_upgrade_command =
        format!("helm upgrade {0} charts/{0}", name.to_lowercase());
    environment
}

/// Like [`sample_environment`], but with timestamps pinned in the past so
/// tests can assert that a mutation moved `updated_at` forward.
#[must_use]
pub fn stale_environment(name: &str) -> Environment {
    let mut environment = sample_environment(name);
    let then = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap();
    environment.created_at = then;
    environment.updated_at = then;
    environment
}

/// Unique path under the system temp directory for tests that must touch
/// the filesystem.
#[must_use]
pub fn scratch_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("envdash_{}_{name}.json", uuid::Uuid::new_v4()))
}
