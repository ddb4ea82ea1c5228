//! Live Backend Service check
//!
//! Runs only when BFP_BACKEND_URL is set.

use bfp_admin::backend::{Backend, RestClient};
use bfp_admin::config::{Config, KEY_ENV, URL_ENV};
use bfp_admin_common::query::decode_rows;
use bfp_admin_common::{Personnel, Query, RecordKind};

#[tokio::test]
async fn backend_personnel_select() {
    match std::env::var(URL_ENV) {
        Ok(url) if !url.trim().is_empty() => {}
        _ => {
            eprintln!("{} not set; skipping integration test", URL_ENV);
            return;
        }
    }
    if std::env::var(KEY_ENV).is_err() {
        eprintln!("{} not set; requests will be anonymous", KEY_ENV);
    }

    let client = RestClient::from_config(&Config::default()).expect("client");
    let rows = client
        .select(RecordKind::Personnel.table(), &Query::for_kind(RecordKind::Personnel).limit(5))
        .await
        .expect("select personnel");
    assert!(rows.len() <= 5);

    let people = decode_rows::<Personnel>(rows).expect("decode personnel");
    for person in people {
        assert!(person.id.is_some());
    }
}
