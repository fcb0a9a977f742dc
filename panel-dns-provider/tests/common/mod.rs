//! Shared helpers for the live Route 53 tests.

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use panel_dns_provider::{
    Change, ChangeBatch, ClientOptions, ResourceRecordSet, Route53Api, Route53Credentials,
    create_client,
};

/// Skip the test when an environment variable is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("Skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Assert a `Result` is `Ok` and unwrap it (the test fails otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Unique label for a throwaway record.
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// Live client plus the zone the tests may write to.
pub struct TestContext {
    pub client: Arc<dyn Route53Api>,
    pub domain: String,
    pub zone_id: Option<String>,
}

impl TestContext {
    /// Built from `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`, optional
    /// `AWS_SESSION_TOKEN`/`AWS_REGION`, and `TEST_DOMAIN`.
    pub fn from_env() -> Option<Self> {
        let key = env::var("AWS_ACCESS_KEY_ID").ok()?;
        let secret = env::var("AWS_SECRET_ACCESS_KEY").ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;

        let mut credentials = Route53Credentials::new(key, secret);
        if let Ok(token) = env::var("AWS_SESSION_TOKEN") {
            credentials = credentials.with_session(token, None);
        }
        if let Ok(region) = env::var("AWS_REGION") {
            credentials = credentials.with_region(region);
        }
        let client = create_client(credentials, &ClientOptions::default()).ok()?;

        Some(Self {
            client,
            domain,
            zone_id: None,
        })
    }

    /// Zone id of `TEST_DOMAIN`, walking every page of the zone listing.
    pub async fn find_zone_id(&mut self) -> Option<String> {
        if self.zone_id.is_some() {
            return self.zone_id.clone();
        }

        let mut marker: Option<String> = None;
        loop {
            let page = self.client.list_hosted_zones(marker.as_deref()).await.ok()?;
            if let Some(zone) = page.zones.into_iter().find(|z| z.name == self.domain) {
                self.zone_id = Some(zone.id.clone());
                return Some(zone.id);
            }
            marker = page.next_marker;
            if !page.is_truncated || marker.is_none() {
                return None;
            }
        }
    }

    /// TXT record set under a fresh `_test-` label.
    pub fn test_record_set(&self, value: &str) -> ResourceRecordSet {
        ResourceRecordSet {
            name: format!("{}.{}", generate_test_record_name(), self.domain),
            record_type: "TXT".to_string(),
            set_identifier: Some(uuid::Uuid::new_v4().simple().to_string()),
            weight: Some(1),
            ttl: Some(60),
            values: vec![format!("\"{value}\"")],
        }
    }

    /// Best-effort delete.
    pub async fn cleanup_record_set(&self, zone_id: &str, set: ResourceRecordSet) {
        let _ = self
            .client
            .change_resource_record_sets(zone_id, &ChangeBatch::new(vec![Change::delete(set)]))
            .await;
    }
}
