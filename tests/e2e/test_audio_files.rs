use crate::e2e::helpers;

use helpers::assertions::assert_track_response;
use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use promo_studio::domain::track::{NewAudioFile, TrackAnalysis};
use promo_studio::infrastructure::repositories::AudioFileRepository;
use serde_json::json;
use std::sync::Arc;
use test_context::test_context;
use uuid::Uuid;

fn track_body() -> serde_json::Value {
    json!({
        "title": "Cyber Dreams",
        "artist": "Neural Wave",
        "file_name": "cyber_dreams.wav",
        "mime_type": "audio/wav",
        "file_size_bytes": 48000000,
        "bpm": 128,
        "mood": "Dark Industrial"
    })
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_register_a_track_for_a_user(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("dj@example.com").await.unwrap();

    let response = ctx
        .client
        .post(&format!("/api/users/{}/tracks", user.id), &track_body())
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);
    let body = response.body.as_ref().unwrap();
    assert_track_response(body, "Cyber Dreams", "Neural Wave");
    assert_eq!(body["user_id"].as_str(), Some(user.id.to_string().as_str()));
    assert_eq!(body["bpm"].as_i64(), Some(128));
    assert!(body.get("duration_seconds").is_none(), "Unset analysis is omitted");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_tracks_for_unknown_users(ctx: &TestContext) {
    let response = ctx
        .client
        .post(&format!("/api/users/{}/tracks", Uuid::new_v4()), &track_body())
        .await
        .unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("User not found");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_invalid_track_metadata(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("dj@example.com").await.unwrap();
    let path = format!("/api/users/{}/tracks", user.id);

    let mut body = track_body();
    body["mime_type"] = json!("image/png");
    ctx.client
        .post(&path, &body)
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Unsupported mime type");

    let mut body = track_body();
    body["file_size_bytes"] = json!(0);
    ctx.client
        .post(&path, &body)
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_REQUEST);

    let mut body = track_body();
    body["bpm"] = json!(999);
    ctx.client
        .post(&path, &body)
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("bpm must be between");

    assert_eq!(ctx.fixtures.count_rows("audio_files").await.unwrap(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_only_the_users_tracks(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("dj@example.com").await.unwrap();
    let other = ctx.fixtures.create_user("other@example.com").await.unwrap();
    ctx.fixtures
        .create_audio_file(user.id, "Cyber Dreams", "Neural Wave", None)
        .await
        .unwrap();
    ctx.fixtures
        .create_audio_file(user.id, "Night Drive", "Neural Wave", None)
        .await
        .unwrap();
    ctx.fixtures
        .create_audio_file(other.id, "Elsewhere", "Someone Else", None)
        .await
        .unwrap();

    let response = ctx
        .client
        .get(&format!("/api/users/{}/tracks", user.id))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let tracks = response.body.as_ref().unwrap().as_array().unwrap().clone();
    assert_eq!(tracks.len(), 2);
    assert!(tracks
        .iter()
        .all(|t| t["user_id"].as_str() == Some(user.id.to_string().as_str())));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_update_track_analysis_partially(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("dj@example.com").await.unwrap();
    let track = ctx
        .fixtures
        .create_audio_file(user.id, "Cyber Dreams", "Neural Wave", Some("Dark Industrial"))
        .await
        .unwrap();

    let response = ctx
        .client
        .patch(&format!("/api/tracks/{}", track.id), &json!({ "bpm": 132 }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body["bpm"].as_i64(), Some(132));
    // Fields left out of the request keep their stored values
    assert_eq!(body["mood"].as_str(), Some("Dark Industrial"));
    assert_eq!(body["duration_seconds"].as_f64(), Some(412.5));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_get_and_delete_a_track(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("dj@example.com").await.unwrap();
    let track = ctx
        .fixtures
        .create_audio_file(user.id, "Cyber Dreams", "Neural Wave", None)
        .await
        .unwrap();
    let path = format!("/api/tracks/{}", track.id);

    let response = ctx.client.get(&path).await.unwrap();
    response.assert_status(StatusCode::OK);
    assert_track_response(response.body.as_ref().unwrap(), "Cyber Dreams", "Neural Wave");

    ctx.client
        .delete(&path)
        .await
        .unwrap()
        .assert_status(StatusCode::NO_CONTENT);

    ctx.client
        .get(&path)
        .await
        .unwrap()
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("Track not found");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_perform_audio_file_crud_through_the_repository(ctx: &TestContext) {
    let repo = AudioFileRepository::new(Arc::new(ctx.pool.clone()));
    let user = ctx.fixtures.create_user("dj@example.com").await.unwrap();

    let created = repo
        .create(&NewAudioFile {
            user_id: user.id,
            title: "Cyber Dreams".to_string(),
            artist: "Neural Wave".to_string(),
            file_name: "cyber_dreams.flac".to_string(),
            mime_type: "audio/flac".to_string(),
            file_size_bytes: 12_345,
            duration_seconds: None,
            bpm: None,
            mood: None,
        })
        .await
        .unwrap();

    let found = repo.find_by_id(created.id).await.unwrap();
    assert_eq!(found.as_ref(), Some(&created));
    assert_eq!(repo.count_by_user(user.id).await.unwrap(), 1);

    let updated = repo
        .update_analysis(
            created.id,
            &TrackAnalysis {
                duration_seconds: Some(301.0),
                bpm: Some(124),
                mood: Some("Hypnotic".to_string()),
            },
        )
        .await
        .unwrap()
        .expect("track exists");
    assert_eq!(updated.bpm, Some(124));
    assert_eq!(updated.mood.as_deref(), Some("Hypnotic"));

    assert!(repo
        .update_analysis(Uuid::new_v4(), &TrackAnalysis::default())
        .await
        .unwrap()
        .is_none());

    assert!(repo.delete(created.id).await.unwrap());
    assert!(!repo.delete(created.id).await.unwrap());
    assert!(repo.find_by_id(created.id).await.unwrap().is_none());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_enforce_positive_file_size_in_the_schema(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("dj@example.com").await.unwrap();

    let result = sqlx::query(
        r#"
        INSERT INTO audio_files (id, user_id, title, artist, file_name, mime_type, file_size_bytes, created_at)
        VALUES ($1, $2, 'Broken', 'Nobody', 'broken.wav', 'audio/wav', 0, NOW())
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.id)
    .execute(&ctx.pool)
    .await;

    assert!(result.is_err(), "CHECK constraint should reject empty files");
}
