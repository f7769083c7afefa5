use sea_orm::EntityTrait;
use serde_json::json;

use server::entity::{blob_storage_ref, source};

use crate::common::{TestApp, routes};

const SAS_URL: &str = "https://acct.blob.core.windows.net/?sv=2021-08-06&sig=abc";

mod create_source {
    use super::*;

    #[tokio::test]
    async fn creates_source_and_storage_reference() {
        let app = TestApp::spawn().await;
        let (_, workspace_id) = app.seed_workspace().await;

        let res = app
            .post(
                &routes::sources(workspace_id),
                &json!({
                    "source_type": "azure_blob",
                    "container_name": "raw",
                    "sas_url": SAS_URL,
                }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["message"], "Data created correctly");
        assert_eq!(res.body["meta"], json!({}));
        let id: i32 = res.body["data"]["id"]
            .as_str()
            .expect("id should be a string")
            .parse()
            .unwrap();

        let row = source::Entity::find_by_id(id)
            .one(&app.db)
            .await
            .unwrap()
            .expect("source row");
        assert_eq!(row.workspace_id, workspace_id);
        assert_eq!(row.source_type, "azure_blob");

        let storage = blob_storage_ref::Entity::find_by_id(id)
            .one(&app.db)
            .await
            .unwrap()
            .expect("storage row");
        assert_eq!(storage.source_id, id);
        assert_eq!(storage.container_name, "raw");
        assert_eq!(storage.sas_url, SAS_URL);
    }

    #[tokio::test]
    async fn unknown_workspace_returns_404_and_persists_nothing() {
        use sea_orm::PaginatorTrait;

        let app = TestApp::spawn().await;

        let res = app
            .post(
                &routes::sources(777),
                &json!({
                    "source_type": "azure_blob",
                    "container_name": "raw",
                    "sas_url": SAS_URL,
                }),
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "Workspace not found");
        assert_eq!(source::Entity::find().count(&app.db).await.unwrap(), 0);
        assert_eq!(
            blob_storage_ref::Entity::find().count(&app.db).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn overlong_sas_url_is_rejected_before_any_write() {
        use sea_orm::PaginatorTrait;

        let app = TestApp::spawn().await;
        let (_, workspace_id) = app.seed_workspace().await;

        let res = app
            .post(
                &routes::sources(workspace_id),
                &json!({
                    "source_type": "azure_blob",
                    "container_name": "raw",
                    "sas_url": "h".repeat(256),
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(source::Entity::find().count(&app.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn missing_container_name_is_a_validation_error() {
        let app = TestApp::spawn().await;
        let (_, workspace_id) = app.seed_workspace().await;

        let res = app
            .post(
                &routes::sources(workspace_id),
                &json!({"source_type": "azure_blob", "sas_url": SAS_URL}),
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn failed_storage_insert_rolls_back_the_source_row() {
        use common::storage::ContainerLocation;
        use sea_orm::{PaginatorTrait, TransactionTrait};
        use server::service::source::SourceService;

        let app = TestApp::spawn().await;
        let (_, workspace_id) = app.seed_workspace().await;

        let txn = app.db.begin().await.unwrap();
        let result = SourceService::new(&txn)
            .create(
                workspace_id,
                "azure_blob".into(),
                ContainerLocation::new("c".repeat(300), SAS_URL),
            )
            .await;
        assert!(result.is_err(), "oversized container name should fail to insert");
        drop(txn);

        assert_eq!(source::Entity::find().count(&app.db).await.unwrap(), 0);
        assert_eq!(
            blob_storage_ref::Entity::find().count(&app.db).await.unwrap(),
            0
        );
    }
}

mod get_source {
    use super::*;

    #[tokio::test]
    async fn returns_flattened_projection() {
        let app = TestApp::spawn().await;
        let (_, workspace_id) = app.seed_workspace().await;
        let source_id = app.create_source(workspace_id, "raw").await;

        let res = app.get(&routes::source(workspace_id, source_id)).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["message"], "Data got correctly");
        assert_eq!(res.body["meta"], json!({}));
        assert_eq!(res.body["data"]["source_type"], "azure_blob");
        assert_eq!(res.body["data"]["container_name"], "raw");
        assert_eq!(res.body["data"]["sas_url"], SAS_URL);
    }

    #[tokio::test]
    async fn storage_fields_are_null_without_a_reference() {
        let app = TestApp::spawn().await;
        let (_, workspace_id) = app.seed_workspace().await;
        let source_id = app.create_source(workspace_id, "raw").await;

        blob_storage_ref::Entity::delete_by_id(source_id)
            .exec(&app.db)
            .await
            .unwrap();

        let res = app.get(&routes::source(workspace_id, source_id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"]["source_type"], "azure_blob");
        assert!(res.body["data"]["container_name"].is_null());
        assert!(res.body["data"]["sas_url"].is_null());
    }

    #[tokio::test]
    async fn source_in_another_workspace_returns_404() {
        let app = TestApp::spawn().await;
        let (org_id, workspace_id) = app.seed_workspace().await;
        let other_workspace = app.create_workspace(org_id, "Other").await;
        let source_id = app.create_source(workspace_id, "raw").await;

        let res = app.get(&routes::source(other_workspace, source_id)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "Source not found");
    }
}

mod update_source {
    use super::*;

    #[tokio::test]
    async fn changes_only_type_and_updated_at() {
        let app = TestApp::spawn().await;
        let (_, workspace_id) = app.seed_workspace().await;
        let source_id = app.create_source(workspace_id, "raw").await;

        let before = source::Entity::find_by_id(source_id)
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();

        let res = app
            .put(
                &routes::source(workspace_id, source_id),
                &json!({
                    "source_type": "sharepoint",
                    "container_name": "ignored",
                    "sas_url": "https://ignored.example/",
                }),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["message"], "Data got correctly");
        assert_eq!(res.body["data"]["source_type"], "sharepoint");
        assert_eq!(res.body["data"]["container_name"], "raw");
        assert_eq!(res.body["data"]["sas_url"], SAS_URL);

        let after = source::Entity::find_by_id(source_id)
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.source_type, "sharepoint");
        assert_eq!(after.workspace_id, before.workspace_id);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.deleted_at, before.deleted_at);
        assert!(after.updated_at >= before.updated_at);

        let storage = blob_storage_ref::Entity::find_by_id(source_id)
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(storage.container_name, "raw");
        assert_eq!(storage.sas_url, SAS_URL);
    }

    #[tokio::test]
    async fn missing_source_returns_404() {
        let app = TestApp::spawn().await;
        let (_, workspace_id) = app.seed_workspace().await;

        let res = app
            .put(
                &routes::source(workspace_id, 31337),
                &json!({"source_type": "sharepoint"}),
            )
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn empty_type_is_rejected() {
        let app = TestApp::spawn().await;
        let (_, workspace_id) = app.seed_workspace().await;
        let source_id = app.create_source(workspace_id, "raw").await;

        let res = app
            .put(
                &routes::source(workspace_id, source_id),
                &json!({"source_type": ""}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}
