mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use restoro_site::gateway::tables;

use common::TestApp;

async fn seed_submissions(app: &TestApp) -> Result<()> {
    for (name, phone) in [("Anna", "+1 555 0101"), ("Boris", "+1 555 0102")] {
        let res = app.post("/contact", json!({ "name": name, "phone": phone })).await?;
        assert_eq!(res.status, StatusCode::CREATED);
    }
    Ok(())
}

fn ids(list: &Value) -> Vec<String> {
    list["items"]
        .as_array()
        .map(|items| items.iter().filter_map(|s| s["id"].as_str().map(str::to_string)).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn toggle_round_trips_and_leaves_the_tab() -> Result<()> {
    let app = TestApp::new();
    seed_submissions(&app).await?;
    let token = app.login().await?;

    let new_tab = app.admin(Method::GET, "/admin/form?status=new", None, &token).await?;
    assert_eq!(new_tab.status, StatusCode::OK);
    assert_eq!(new_tab.data()["tabs"], json!(["new", "processed"]));
    let before = ids(new_tab.data());
    assert_eq!(before.len(), 2);
    let target = before[0].clone();

    let res = app
        .admin(
            Method::PUT,
            &format!("/admin/api/submissions/{}/status", target),
            Some(json!({})),
            &token,
        )
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["status"], "processed");
    assert_eq!(res.data()["remaining"], 1);

    let processed = app
        .admin(Method::GET, "/admin/api/submissions?status=processed", None, &token)
        .await?;
    assert_eq!(ids(processed.data()), vec![target.clone()]);

    // And back again
    let res = app
        .admin(
            Method::PUT,
            &format!("/admin/api/submissions/{}/status", target),
            Some(json!({ "status": "new" })),
            &token,
        )
        .await?;
    assert_eq!(res.data()["status"], "new");
    assert_eq!(res.data()["remaining"], 0);

    let new_again = app.admin(Method::GET, "/admin/api/submissions?status=new", None, &token).await?;
    assert!(ids(new_again.data()).contains(&target));
    Ok(())
}

#[tokio::test]
async fn edit_and_delete_submission() -> Result<()> {
    let app = TestApp::new();
    seed_submissions(&app).await?;
    let token = app.login().await?;
    let tab = app.admin(Method::GET, "/admin/api/submissions", None, &token).await?;
    let target = ids(tab.data())[0].clone();

    let edit = json!({ "name": "Anna K.", "phone": "+1 555 0101", "email": "anna@example.com", "message": "" });
    let res = app
        .admin(Method::PUT, &format!("/admin/api/submissions/{}", target), Some(edit), &token)
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["name"], "Anna K.");
    assert_eq!(res.data()["status"], "new");

    let res = app
        .admin(Method::DELETE, &format!("/admin/api/submissions/{}?confirm=true", target), None, &token)
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(app.gateway.rows(tables::CONTACT_FORMS).len(), 1);
    Ok(())
}

#[tokio::test]
async fn editing_an_unloaded_submission_is_not_found() -> Result<()> {
    let app = TestApp::new();
    let token = app.login().await?;
    let res = app
        .admin(Method::PUT, "/admin/api/submissions/nope", Some(json!({ "name": "x" })), &token)
        .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}
