mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;
use restoro_site::gateway::tables;
use restoro_site::types::Operation;

use common::{image_payload, TestApp};

#[tokio::test]
async fn create_with_two_images_inserts_one_row() -> Result<()> {
    let app = TestApp::new();
    let token = app.login().await?;
    app.admin(Method::GET, "/admin/api/cases", None, &token).await?;
    let before_rows = app.gateway.rows(tables::CASES).len();
    app.gateway.reset_calls();

    let body = json!({
        "title": "Walnut desk",
        "description": "Split top glued and refinished",
        "process_text": "assessment, gluing , finish",
        "before_upload": image_payload("desk.jpg", &[1, 2, 3]),
        "after_upload": image_payload("desk.jpg", &[4, 5, 6]),
    });
    let res = app.admin(Method::POST, "/admin/api/cases", Some(body), &token).await?;

    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    assert_eq!(app.gateway.count(Operation::Insert, tables::CASES), 1);
    assert_eq!(app.gateway.count(Operation::Upload, "images"), 2);
    assert_eq!(app.gateway.rows(tables::CASES).len(), before_rows + 1);

    let before = res.data()["before_image"].as_str().unwrap_or_default();
    let after = res.data()["after_image"].as_str().unwrap_or_default();
    assert!(before.contains("cases/before/"), "{}", before);
    assert!(after.contains("cases/after/"), "{}", after);
    assert_ne!(before, after);
    assert_eq!(res.data()["process"], json!(["assessment", "gluing", "finish"]));

    // New case is first in the list the admin sees
    let list = app.admin(Method::GET, "/admin/api/cases", None, &token).await?;
    assert_eq!(list.data()[0]["title"], "Walnut desk");
    Ok(())
}

#[tokio::test]
async fn same_file_twice_gets_distinct_paths() -> Result<()> {
    let app = TestApp::new();
    let token = app.login().await?;
    let mut urls = Vec::new();
    for _ in 0..2 {
        let body = json!({
            "title": "Stool",
            "description": "Rewoven seat",
            "after_upload": image_payload("stool.jpg", &[9]),
        });
        let res = app.admin(Method::POST, "/admin/api/cases", Some(body), &token).await?;
        assert_eq!(res.status, StatusCode::CREATED);
        urls.push(res.data()["after_image"].as_str().unwrap_or_default().to_string());
    }
    assert_ne!(urls[0], urls[1]);
    Ok(())
}

#[tokio::test]
async fn missing_title_is_rejected_before_any_write() -> Result<()> {
    let app = TestApp::new();
    let token = app.login().await?;
    app.gateway.reset_calls();

    let body = json!({ "description": "No title", "after_upload": image_payload("x.jpg", &[1]) });
    let res = app.admin(Method::POST, "/admin/api/cases", Some(body), &token).await?;

    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(res.body["field_errors"]["title"].is_string());
    assert!(app.gateway.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn failed_upload_keeps_previous_image() -> Result<()> {
    let app = TestApp::new();
    let token = app.login().await?;
    let list = app.admin(Method::GET, "/admin/api/cases", None, &token).await?;
    let id = list.data()[0]["id"].as_str().unwrap_or_default().to_string();

    app.gateway.fail(Operation::Upload);
    let body = json!({
        "title": "Oak chest of drawers",
        "description": "Updated text",
        "after_image": "https://cdn.example.com/old.jpg",
        "after_upload": image_payload("new.jpg", &[7]),
    });
    let res = app
        .admin(Method::PUT, &format!("/admin/api/cases/{}", id), Some(body), &token)
        .await?;

    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert_eq!(res.data()["after_image"], "https://cdn.example.com/old.jpg");
    assert_eq!(res.data()["description"], "Updated text");
    assert_eq!(app.gateway.count(Operation::Update, tables::CASES), 1);
    Ok(())
}

#[tokio::test]
async fn failed_upload_without_old_url_keeps_stored_image() -> Result<()> {
    let app = TestApp::new();
    let token = app.login().await?;
    let list = app.admin(Method::GET, "/admin/api/cases", None, &token).await?;
    let id = list.data()[0]["id"].as_str().unwrap_or_default().to_string();
    let uri = format!("/admin/api/cases/{}", id);

    let first = json!({
        "title": "Oak chest of drawers",
        "description": "Veneer repair",
        "after_image": "https://cdn.example.com/stored.jpg",
    });
    app.admin(Method::PUT, &uri, Some(first), &token).await?;

    app.gateway.fail(Operation::Upload);
    let body = json!({
        "title": "Oak chest of drawers",
        "description": "Veneer repair and wax",
        "after_upload": image_payload("new.jpg", &[7]),
    });
    let res = app.admin(Method::PUT, &uri, Some(body), &token).await?;

    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert_eq!(res.data()["after_image"], "https://cdn.example.com/stored.jpg");
    assert_eq!(app.gateway.rows(tables::CASES)[0]["after_image"], "https://cdn.example.com/stored.jpg");
    Ok(())
}

#[tokio::test]
async fn large_photos_fit_within_upload_limit() -> Result<()> {
    let app = TestApp::new();
    let token = app.login().await?;
    app.admin(Method::GET, "/admin/api/cases", None, &token).await?;
    app.gateway.reset_calls();

    let photo = vec![7u8; 1_200_000];
    let body = json!({
        "title": "Mahogany bureau",
        "description": "Full refinish",
        "before_upload": image_payload("before.jpg", &photo),
        "after_upload": image_payload("after.jpg", &photo),
    });
    let res = app.admin(Method::POST, "/admin/api/cases", Some(body), &token).await?;

    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    assert_eq!(app.gateway.count(Operation::Insert, tables::CASES), 1);
    assert_eq!(app.gateway.count(Operation::Upload, "images"), 2);
    Ok(())
}

#[tokio::test]
async fn delete_removes_exactly_that_case() -> Result<()> {
    let app = TestApp::new();
    let token = app.login().await?;
    for title in ["Mirror frame", "Rocking chair"] {
        let body = json!({ "title": title, "description": "Restored" });
        app.admin(Method::POST, "/admin/api/cases", Some(body), &token).await?;
    }
    let list = app.admin(Method::GET, "/admin/api/cases", None, &token).await?;
    let ids: Vec<String> = list
        .data()
        .as_array()
        .map(|cases| cases.iter().filter_map(|c| c["id"].as_str().map(str::to_string)).collect())
        .unwrap_or_default();
    assert_eq!(ids.len(), 3);
    let target = ids[1].clone();
    app.gateway.reset_calls();

    // Without confirmation nothing happens
    let refused = app
        .admin(Method::DELETE, &format!("/admin/api/cases/{}", target), None, &token)
        .await?;
    assert_eq!(refused.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.gateway.count(Operation::Delete, tables::CASES), 0);

    let res = app
        .admin(Method::DELETE, &format!("/admin/api/cases/{}?confirm=true", target), None, &token)
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(app.gateway.count(Operation::Delete, tables::CASES), 1);

    let workspace = app.state.sessions.workspace(&token, || unreachable!("session exists"));
    let remaining: Vec<String> = workspace.lock().await.cases.iter().map(|c| c.id.to_string()).collect();
    assert_eq!(remaining, vec![ids[0].clone(), ids[2].clone()]);
    assert!(app
        .gateway
        .rows(tables::CASES)
        .iter()
        .all(|row| row["id"].as_str() != Some(target.as_str())));
    Ok(())
}

#[tokio::test]
async fn image_preview_decodes_without_uploading() -> Result<()> {
    let app = TestApp::new();
    let token = app.login().await?;
    app.gateway.reset_calls();

    let res = app
        .admin(Method::POST, "/admin/api/images/preview", Some(image_payload("a.jpg", &[1, 2])), &token)
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["size"], 2);
    assert_eq!(res.data()["content_type"], "image/jpeg");
    assert_eq!(app.gateway.count(Operation::Upload, "images"), 0);
    Ok(())
}
