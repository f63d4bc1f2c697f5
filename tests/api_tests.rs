
use serde_json::json;
use test_utils::TestApp;
use uuid::Uuid;

#[tokio::test]
async fn project_is_created_from_defaults_and_can_be_updated() {
    let app = TestApp::spawn().await;

    let project: serde_json::Value = app
        .client
        .get(app.url("/project"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(project["name"], "Test Site");
    assert_eq!(project["builder_name"], "Test Builder");
    assert_eq!(project["status"], "in progress");

    let response = app
        .client
        .put(app.url("/project"))
        .json(&json!({
            "name": "Lakeside House",
            "start_date": "2024-01-01",
            "description": "Two-storey family home"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let updated: serde_json::Value = response.json().await.unwrap();
    assert_eq!(updated["name"], "Lakeside House");
    assert_eq!(updated["start_date"], "2024-01-01");
    // Fields absent from the request keep their stored values.
    assert_eq!(updated["builder_name"], "Test Builder");
}

#[tokio::test]
async fn project_update_rejects_empty_name() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .put(app.url("/project"))
        .json(&json!({"name": ""}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn entries_round_trip_and_list_newest_first() {
    let app = TestApp::spawn().await;

    for (date, content) in [
        ("2024-03-01", "Excavation"),
        ("2024-03-03", "Footings poured"),
        ("2024-03-02", "Formwork set"),
    ] {
        let response = app
            .client
            .post(app.url("/entries"))
            .json(&json!({"date": date, "content": content}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);
    }

    let entries: Vec<serde_json::Value> = app
        .client
        .get(app.url("/entries"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(entries.len(), 3);
    let dates: Vec<&str> = entries.iter().map(|e| e["date"].as_str().unwrap()).collect();
    assert_eq!(dates, vec!["2024-03-03", "2024-03-02", "2024-03-01"]);

    let entry_id = entries[0]["id"].as_str().unwrap();

    let one: serde_json::Value = app
        .client
        .get(app.url(&format!("/entries/{}", entry_id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(one["content"], "Footings poured");

    let response = app
        .client
        .delete(app.url(&format!("/entries/{}", entry_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);

    let response = app
        .client
        .get(app.url(&format!("/entries/{}", entry_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn entry_creation_rejects_missing_content() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(app.url("/entries"))
        .json(&json!({"date": "2024-03-01", "content": ""}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn entry_creation_rejects_negative_hours() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(app.url("/entries"))
        .json(&json!({"date": "2024-03-01", "content": "Cleanup", "work_hours": -2.0}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn stats_start_at_zero_and_track_entries() {
    let app = TestApp::spawn().await;

    let stats: serde_json::Value = app
        .client
        .get(app.url("/stats"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(stats["total_entries"], 0);
    assert_eq!(stats["total_photos"], 0);
    assert_eq!(stats["total_costs"], 0.0);
    assert_eq!(stats["total_hours"], 0.0);
    assert_eq!(stats["completion"], 65);
    assert!(stats["project_days"].as_i64().unwrap() >= 1);

    for (costs, hours) in [(100.5, 6.0), (49.5, 2.5)] {
        app.client
            .post(app.url("/entries"))
            .json(&json!({
                "date": "2024-03-01",
                "content": "Work",
                "costs": costs,
                "work_hours": hours
            }))
            .send()
            .await
            .unwrap();
    }

    let stats: serde_json::Value = app
        .client
        .get(app.url("/stats"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(stats["total_entries"], 2);
    assert_eq!(stats["total_costs"], 150.0);
    assert_eq!(stats["total_hours"], 8.5);
}

#[tokio::test]
async fn photo_upload_and_delete_keep_record_and_file_in_step() {
    let app = TestApp::spawn().await;

    let photo = app.upload_png("north wall.png", Some("Before rendering")).await;

    let stored_name = photo["filename"].as_str().unwrap().to_string();
    let photo_id = photo["id"].as_str().unwrap().to_string();
    assert_eq!(photo["original_filename"], "north_wall.png");
    assert!(stored_name.ends_with(".png"));
    assert!(app.upload_dir.join(&stored_name).exists());

    // The stored bytes are served back with an image content type.
    let response = app
        .client
        .get(app.url(&format!("/photos/{}/file", photo_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "image/png"
    );

    let response = app
        .client
        .delete(app.url(&format!("/photos/{}", photo_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);
    assert!(!app.upload_dir.join(&stored_name).exists());

    let photos: Vec<serde_json::Value> = app
        .client
        .get(app.url("/photos"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(photos.is_empty());
}

#[tokio::test]
async fn photo_delete_tolerates_an_already_missing_file() {
    let app = TestApp::spawn().await;

    let photo = app.upload_png("wall.png", None).await;
    let stored_name = photo["filename"].as_str().unwrap().to_string();
    let photo_id = photo["id"].as_str().unwrap().to_string();

    std::fs::remove_file(app.upload_dir.join(&stored_name)).unwrap();

    let response = app
        .client
        .delete(app.url(&format!("/photos/{}", photo_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);

    // The record is gone as well.
    let response = app
        .client
        .delete(app.url(&format!("/photos/{}", photo_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn photo_upload_rejects_non_image_payload() {
    let app = TestApp::spawn().await;

    let form = reqwest::multipart::Form::new().part(
        "file",
        reqwest::multipart::Part::bytes(b"definitely not an image".to_vec())
            .file_name("fake.png")
            .mime_str("image/png")
            .unwrap(),
    );

    let response = app
        .client
        .post(app.url("/photos"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn export_contains_project_entries_and_photo_metadata() {
    let app = TestApp::spawn().await;

    for (date, content) in [("2024-03-02", "Formwork set"), ("2024-03-01", "Excavation")] {
        app.client
            .post(app.url("/entries"))
            .json(&json!({"date": date, "content": content}))
            .send()
            .await
            .unwrap();
    }
    app.upload_png("wall.png", Some("North wall")).await;

    let export: serde_json::Value = app
        .client
        .get(app.url("/export"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(export["project"]["name"], "Test Site");
    // Entries are exported oldest first, unlike the newest-first listing.
    let dates: Vec<&str> = export["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-03-01", "2024-03-02"]);
    let photos = export["photos"].as_array().unwrap();
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0]["filename"], "wall.png");
    assert_eq!(photos[0]["description"], "North wall");
}

#[tokio::test]
async fn deleting_the_project_cascades_to_records_and_files() {
    let app = TestApp::spawn().await;

    app.client
        .post(app.url("/entries"))
        .json(&json!({"date": "2024-03-01", "content": "Excavation"}))
        .send()
        .await
        .unwrap();
    let photo = app.upload_png("wall.png", None).await;
    let stored_name = photo["filename"].as_str().unwrap().to_string();

    app.state
        .project_handler
        .delete_project(&app.project_id)
        .await
        .expect("cascade delete failed");

    assert!(!app.upload_dir.join(&stored_name).exists());

    let response = app.client.get(app.url("/project")).send().await.unwrap();
    assert_eq!(response.status(), 404);
    let response = app.client.get(app.url("/entries")).send().await.unwrap();
    let entries: Vec<serde_json::Value> = response.json().await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn unknown_records_return_not_found() {
    let app = TestApp::spawn().await;
    let missing = Uuid::new_v4();

    for path in [
        format!("/entries/{}", missing),
        format!("/photos/{}/file", missing),
    ] {
        let response = app.client.get(app.url(&path)).send().await.unwrap();
        assert_eq!(response.status(), 404, "GET {path}");
        let body: serde_json::Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("Not found"));
    }
}
