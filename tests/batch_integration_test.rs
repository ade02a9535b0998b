use anyhow::Result;
use httpmock::prelude::*;
use page_access::config::check_file::CheckFile;
use page_access::{
    AccessCheck, AccessValidationClient, BatchSummary, BatchValidator, NavigationMask, PageGate,
};
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_batch_from_check_file() -> Result<()> {
    let server = MockServer::start();
    let granted = server.mock(|when, then| {
        when.method(GET)
            .path("/access_validation_handler/can_access_classroom_page")
            .query_param("classroom_url_fragment", "math");
        then.status(200).json_body(json!({}));
    });
    let denied = server.mock(|when, then| {
        when.method(GET)
            .path("/access_validation_handler/can_access_release_coordinator_page");
        then.status(401).json_body(json!({"error": "Access Denied."}));
    });
    let missing = server.mock(|when, then| {
        when.method(GET)
            .path("/access_validation_handler/does_profile_exist/ghost");
        then.status(404).json_body(json!({"error": "Page not found."}));
    });

    let mut temp_file = NamedTempFile::new()?;
    temp_file.write_all(
        br#"
[[checks]]
kind = "classroom_page"
classroom_url_fragment = "math"

[[checks]]
kind = "release_coordinator_page"

[[checks]]
kind = "profile_page"
username = "ghost"
"#,
    )?;

    let check_file = CheckFile::from_file(temp_file.path())?;
    let client = AccessValidationClient::new(&server.base_url())?;
    let batch = BatchValidator::new(Arc::new(client), 2);
    let outcomes = batch.run(check_file.checks).await?;

    granted.assert();
    denied.assert();
    missing.assert();

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].is_granted());
    assert_eq!(outcomes[1].check, AccessCheck::ReleaseCoordinatorPage);
    assert!(outcomes[2]
        .result
        .as_ref()
        .is_err_and(|e| e.is_not_found()));

    let summary = BatchSummary::from_outcomes(&outcomes);
    assert_eq!(summary.granted, 1);
    assert_eq!(summary.denied, 2);
    assert_eq!(summary.failed, 0);
    Ok(())
}

#[tokio::test]
async fn test_page_gate_with_real_http() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/access_validation_handler/can_access_topic_viewer_page/math/fractions");
        then.status(200).json_body(json!({}));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/access_validation_handler/can_access_topic_viewer_page/math/secret");
        then.status(401).json_body(json!({"error": "Access Denied."}));
    });

    let mask = NavigationMask::new();
    let client = Arc::new(AccessValidationClient::new(&server.base_url())?);
    let gate = PageGate::new(client, mask.clone());

    let open = AccessCheck::TopicViewerPage {
        classroom_url_fragment: "math".to_string(),
        topic_url_fragment: "fractions".to_string(),
    };
    let closed = AccessCheck::TopicViewerPage {
        classroom_url_fragment: "math".to_string(),
        topic_url_fragment: "secret".to_string(),
    };

    assert!(gate.enter(&open).await.is_ok());
    assert!(!mask.is_active());

    assert!(gate.enter(&closed).await.is_err());
    assert!(!mask.is_active());
    Ok(())
}
