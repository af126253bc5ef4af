mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;
use sitekeep::db::CredentialInput;
use sitekeep::{Resource, SitekeepError};

fn sftp_login() -> Vec<(&'static str, &'static str)> {
    vec![
        ("type", "sftp"),
        ("hostname", "ftp.example.com"),
        ("username", "deploy"),
        ("password", "secret"),
        ("path", "/var/www/html"),
    ]
}

#[tokio::test]
async fn add_ftp_login_from_form() {
    let t = TestApp::spawn().await;
    let (status, body) = t
        .post_form(&format!("/api/ftp/{}", t.website_id), &sftp_login())
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "FTP login has been added.");
    assert_eq!(body["record"]["type"], "sftp");
    assert_eq!(body["record"]["path"], "/var/www/html");
    assert!(body["record"].get("database").is_none());
}

#[tokio::test]
async fn add_ftp_login_from_json() {
    let t = TestApp::spawn().await;
    let payload = json!({
        "type": "ftps",
        "hostname": "files.example.com",
        "username": "uploader",
        "notes": null
    });

    let (status, body) = t
        .send(
            "POST",
            &format!("/api/ftp/{}", t.website_id),
            Some(("application/json", payload.to_string())),
            &[],
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["record"]["type"], "ftps");
    assert_eq!(body["record"]["username"], "uploader");
    assert!(body["record"]["notes"].is_null());
}

#[tokio::test]
async fn database_types_are_not_ftp_types() {
    let t = TestApp::spawn().await;
    let (status, body) = t
        .post_form(&format!("/api/ftp/{}", t.website_id), &[("type", "mysql")])
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!({"type": "Invalid ftp type."}));
}

#[tokio::test]
async fn ftp_and_database_records_are_separate() {
    let t = TestApp::spawn().await;
    t.post_form(&format!("/api/ftp/{}", t.website_id), &sftp_login())
        .await;

    let (_, ftp) = t.get(&format!("/api/ftp/{}", t.website_id)).await;
    let (_, db) = t.get(&format!("/api/database/{}", t.website_id)).await;
    assert_eq!(ftp["records"].as_array().unwrap().len(), 1);
    assert_eq!(db["records"], json!([]));
}

#[tokio::test]
async fn ftp_update_and_delete_cycle() {
    let t = TestApp::spawn().await;
    let (_, created) = t
        .post_form(&format!("/api/ftp/{}", t.website_id), &sftp_login())
        .await;
    let id = created["record"]["id"].as_i64().unwrap();
    let uri = format!("/api/ftp/{}/{id}", t.website_id);

    let (status, body) = t.put_form(&uri, &[("type", "ftp")]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "FTP login has been updated.");
    assert_eq!(body["record"]["type"], "ftp");
    assert_eq!(body["record"]["hostname"], "ftp.example.com");

    let (status, _) = t.delete(&uri).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = t.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "FTP login credentials not found");
}

#[tokio::test]
async fn repository_rejects_unknown_website() {
    let t = TestApp::spawn().await;
    let storage = t.storage(Resource::Ftp);
    let input: CredentialInput = sftp_login().into_iter().collect();

    let err = storage.add(9_999, &input).await.unwrap_err();
    let SitekeepError::Validation(errors) = &err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(errors.get("website_id"), Some("Website does not exist."));
    assert_eq!(errors.len(), 1);
}

#[tokio::test]
async fn repository_requires_website_id() {
    let t = TestApp::spawn().await;
    let input: CredentialInput = sftp_login().into_iter().collect();

    let err = t.storage(Resource::Ftp).add(0, &input).await.unwrap_err();
    let SitekeepError::Validation(errors) = &err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(errors.get("website_id"), Some("Website is required."));
}

#[tokio::test]
async fn repository_update_reports_long_field_with_valid_rest() {
    let t = TestApp::spawn().await;
    let storage = t.storage(Resource::Ftp);
    let input: CredentialInput = sftp_login().into_iter().collect();
    let record = storage.add(t.website_id, &input).await.unwrap();

    let long_path = "p".repeat(256);
    let update: CredentialInput = [("path", long_path.as_str())].into_iter().collect();
    let err = storage
        .update(record.id, t.website_id, &update)
        .await
        .unwrap_err();
    let SitekeepError::Validation(errors) = &err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(
        errors.get("path"),
        Some("Path must not be more than 255 characters.")
    );
    assert_eq!(errors.len(), 1);
}

#[tokio::test]
async fn repository_delete_is_idempotent() {
    let t = TestApp::spawn().await;
    let storage = t.storage(Resource::Ftp);
    let input: CredentialInput = sftp_login().into_iter().collect();
    let record = storage.add(t.website_id, &input).await.unwrap();

    assert_eq!(storage.delete(record.id).await.unwrap(), 1);
    assert_eq!(storage.delete(record.id).await.unwrap(), 0);
    assert!(storage.details(record.id, None).await.unwrap().is_none());
}

#[tokio::test]
async fn repository_details_without_website_scope() {
    let t = TestApp::spawn().await;
    let other = t.add_website("Other").await;
    let storage = t.storage(Resource::Ftp);
    let input: CredentialInput = sftp_login().into_iter().collect();
    let record = storage.add(other, &input).await.unwrap();

    let unscoped = storage.details(record.id, None).await.unwrap();
    assert_eq!(unscoped.as_ref(), Some(&record));
    let scoped = storage.details(record.id, Some(t.website_id)).await.unwrap();
    assert!(scoped.is_none());
}

#[tokio::test]
async fn repository_update_of_missing_record_is_not_found() {
    let t = TestApp::spawn().await;
    let update: CredentialInput = [("hostname", "x")].into_iter().collect();
    let err = t
        .storage(Resource::Ftp)
        .update(42, t.website_id, &update)
        .await
        .unwrap_err();
    assert!(matches!(err, SitekeepError::RecordNotFound(Resource::Ftp)));
}

#[tokio::test]
async fn repository_update_with_unknown_website_is_a_validation_error() {
    let t = TestApp::spawn().await;
    let storage = t.storage(Resource::Ftp);
    let input: CredentialInput = sftp_login().into_iter().collect();
    let record = storage.add(t.website_id, &input).await.unwrap();

    let update: CredentialInput = [("hostname", "moved.example.com")].into_iter().collect();
    let err = storage.update(record.id, 9_999, &update).await.unwrap_err();
    let SitekeepError::Validation(errors) = &err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(errors.get("website_id"), Some("Website does not exist."));
    assert_eq!(errors.len(), 1);

    let stored = storage.details(record.id, None).await.unwrap();
    assert_eq!(stored.as_ref(), Some(&record));
}

#[tokio::test]
async fn repository_treats_negative_website_id_as_unknown() {
    let t = TestApp::spawn().await;
    let input: CredentialInput = sftp_login().into_iter().collect();

    let err = t.storage(Resource::Ftp).add(-1, &input).await.unwrap_err();
    let SitekeepError::Validation(errors) = &err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(errors.get("website_id"), Some("Website does not exist."));
}
