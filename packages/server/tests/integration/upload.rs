use common::storage::StorageError;
use sea_orm::{EntityTrait, PaginatorTrait};

use server::entity::{blob_storage_ref, file};

use crate::common::TestApp;

#[tokio::test]
async fn uploads_into_the_source_container() {
    let app = TestApp::spawn().await;
    let (_, workspace_id) = app.seed_workspace().await;
    let source_id = app.create_source(workspace_id, "raw").await;
    app.store.add_container("raw");

    let res = app
        .upload(
            workspace_id,
            source_id,
            "report.pdf",
            b"%PDF-1.7".to_vec(),
            Some("application/pdf"),
        )
        .await;

    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["filename"], "report.pdf");
    assert_eq!(res.body["message"], "File uploaded successfully");

    let stored = app.store.object("raw", "report.pdf").expect("object stored");
    assert_eq!(stored.container, "raw");
    assert_eq!(
        stored.sas_url,
        "https://acct.blob.core.windows.net/?sv=2021-08-06&sig=abc"
    );
    assert_eq!(stored.name, "report.pdf");
    assert_eq!(&stored.data[..], b"%PDF-1.7");
    assert_eq!(stored.content_type.as_deref(), Some("application/pdf"));
}

#[tokio::test]
async fn content_type_is_guessed_from_filename_when_absent() {
    let app = TestApp::spawn().await;
    let (_, workspace_id) = app.seed_workspace().await;
    let source_id = app.create_source(workspace_id, "raw").await;
    app.store.add_container("raw");

    let res = app
        .upload(workspace_id, source_id, "photo.jpg", b"JPEG".to_vec(), None)
        .await;

    assert_eq!(res.status, 201);
    let stored = app.store.object("raw", "photo.jpg").unwrap();
    assert_eq!(stored.content_type.as_deref(), Some("image/jpeg"));
}

#[tokio::test]
async fn reupload_overwrites_existing_object() {
    let app = TestApp::spawn().await;
    let (_, workspace_id) = app.seed_workspace().await;
    let source_id = app.create_source(workspace_id, "raw").await;
    app.store.add_container("raw");

    let first = app
        .upload(workspace_id, source_id, "notes.txt", b"v1".to_vec(), None)
        .await;
    assert_eq!(first.status, 201);
    let second = app
        .upload(workspace_id, source_id, "notes.txt", b"v2".to_vec(), None)
        .await;
    assert_eq!(second.status, 201);

    assert_eq!(app.store.object_count(), 1);
    assert_eq!(&app.store.object("raw", "notes.txt").unwrap().data[..], b"v2");
}

#[tokio::test]
async fn client_filename_reaches_the_store_unchanged() {
    let app = TestApp::spawn().await;
    let (_, workspace_id) = app.seed_workspace().await;
    let source_id = app.create_source(workspace_id, "raw").await;
    app.store.add_container("raw");

    for name in ["a//b.txt", "./notes.txt", "folder/"] {
        let part = reqwest::multipart::Part::bytes(b"data".to_vec()).file_name(name);
        let form = reqwest::multipart::Form::new()
            .percent_encode_noop()
            .part("file", part);

        let res = app.send_form(workspace_id, source_id, form).await;

        assert_eq!(res.status, 201, "{name:?}: {}", res.text);
        assert_eq!(res.body["filename"], name);
        assert!(app.store.object("raw", name).is_some(), "{name:?} not stored");
    }
}

#[tokio::test]
async fn missing_storage_reference_returns_404_without_contacting_storage() {
    let app = TestApp::spawn().await;
    let (_, workspace_id) = app.seed_workspace().await;
    let source_id = app.create_source(workspace_id, "raw").await;
    app.store.add_container("raw");

    blob_storage_ref::Entity::delete_by_id(source_id)
        .exec(&app.db)
        .await
        .unwrap();

    let res = app
        .upload(workspace_id, source_id, "a.txt", b"data".to_vec(), None)
        .await;

    assert_eq!(res.status, 404, "{}", res.text);
    assert_eq!(res.body["code"], "NOT_FOUND");
    assert_eq!(app.store.calls(), 0);
}

#[tokio::test]
async fn unknown_source_returns_404_without_contacting_storage() {
    let app = TestApp::spawn().await;
    let (_, workspace_id) = app.seed_workspace().await;

    let res = app
        .upload(workspace_id, 5150, "a.txt", b"data".to_vec(), None)
        .await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["message"], "Source not found");
    assert_eq!(app.store.calls(), 0);
}

#[tokio::test]
async fn source_in_another_workspace_returns_404() {
    let app = TestApp::spawn().await;
    let (org_id, workspace_id) = app.seed_workspace().await;
    let other_workspace = app.create_workspace(org_id, "Other").await;
    let source_id = app.create_source(workspace_id, "raw").await;
    app.store.add_container("raw");

    let res = app
        .upload(other_workspace, source_id, "a.txt", b"data".to_vec(), None)
        .await;

    assert_eq!(res.status, 404);
    assert_eq!(app.store.object_count(), 0);
}

#[tokio::test]
async fn missing_container_returns_404() {
    let app = TestApp::spawn().await;
    let (_, workspace_id) = app.seed_workspace().await;
    let source_id = app.create_source(workspace_id, "gone").await;

    let res = app
        .upload(workspace_id, source_id, "a.txt", b"data".to_vec(), None)
        .await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["message"], "Container does not exist");
    assert_eq!(app.store.object_count(), 0);
}

#[tokio::test]
async fn storage_failure_returns_500_with_raw_text() {
    let app = TestApp::spawn().await;
    let (_, workspace_id) = app.seed_workspace().await;
    let source_id = app.create_source(workspace_id, "raw").await;
    app.store.add_container("raw");
    app.store.fail_next_put(StorageError::Service {
        status: 403,
        body: "AuthenticationFailed".into(),
    });

    let res = app
        .upload(workspace_id, source_id, "a.txt", b"data".to_vec(), None)
        .await;

    assert_eq!(res.status, 500);
    assert_eq!(res.body["code"], "STORAGE_ERROR");
    assert!(
        res.body["message"]
            .as_str()
            .unwrap()
            .contains("AuthenticationFailed")
    );
}

#[tokio::test]
async fn form_without_file_field_is_rejected() {
    let app = TestApp::spawn().await;
    let (_, workspace_id) = app.seed_workspace().await;
    let source_id = app.create_source(workspace_id, "raw").await;
    app.store.add_container("raw");

    let form = reqwest::multipart::Form::new().text("note", "no file here");
    let res = app.send_form(workspace_id, source_id, form).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["message"], "Missing 'file' field");
    assert_eq!(app.store.calls(), 0);
}

#[tokio::test]
async fn body_over_the_limit_is_rejected() {
    let app = TestApp::spawn_with_upload_limit(1024).await;
    let (_, workspace_id) = app.seed_workspace().await;
    let source_id = app.create_source(workspace_id, "raw").await;
    app.store.add_container("raw");

    let res = app
        .upload(workspace_id, source_id, "big.bin", vec![0u8; 4096], None)
        .await;

    assert!(res.status == 400 || res.status == 413, "got {}", res.status);
    assert_eq!(app.store.object_count(), 0);
}

#[tokio::test]
async fn upload_does_not_record_file_rows() {
    let app = TestApp::spawn().await;
    let (_, workspace_id) = app.seed_workspace().await;
    let source_id = app.create_source(workspace_id, "raw").await;
    app.store.add_container("raw");

    let res = app
        .upload(workspace_id, source_id, "a.txt", b"data".to_vec(), None)
        .await;
    assert_eq!(res.status, 201);

    assert_eq!(file::Entity::find().count(&app.db).await.unwrap(), 0);
}
