use crate::e2e::helpers;

use helpers::assertions::{assert_dj_promo_payload, assert_social_uplink_payload};
use helpers::mock_provider::{dj_promo_json, ScriptedReply};
use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use promo_studio::infrastructure::repositories::ProviderError;
use serde_json::json;
use test_context::test_context;
use uuid::Uuid;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_and_store_a_dj_promo_kit_for_a_track(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("dj@example.com").await.unwrap();
    let track = ctx
        .fixtures
        .create_audio_file(user.id, "Cyber Dreams", "Neural Wave", Some("Dark Industrial"))
        .await
        .unwrap();

    let response = ctx
        .client
        .post(
            &format!("/api/tracks/{}/content", track.id),
            &json!({ "kind": "dj_promo" }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body["kind"].as_str(), Some("dj_promo"));
    assert!(body["id"].as_str().is_some(), "Persisted content has an id");
    assert_dj_promo_payload(&body["payload"]);

    assert_eq!(ctx.provider.call_count(), 1);
    let prompt = ctx.provider.last_prompt().unwrap();
    assert_eq!(prompt.schema_name, "dj_promo_kit");
    assert!(prompt.user.contains("Cyber Dreams"));
    assert!(prompt.user.contains("Neural Wave"));
    assert!(prompt.user.contains("Dark Industrial"));

    assert_eq!(ctx.fixtures.content_count_for_track(track.id).await.unwrap(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_replace_earlier_content_of_the_same_kind(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("dj@example.com").await.unwrap();
    let track = ctx
        .fixtures
        .create_audio_file(user.id, "Cyber Dreams", "Neural Wave", Some("Dark Industrial"))
        .await
        .unwrap();
    let path = format!("/api/tracks/{}/content", track.id);

    for _ in 0..2 {
        ctx.client
            .post(&path, &json!({ "kind": "social_uplink" }))
            .await
            .unwrap()
            .assert_status(StatusCode::OK);
    }
    ctx.client
        .post(&path, &json!({ "kind": "dj_promo" }))
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let response = ctx.client.get(&path).await.unwrap();
    response.assert_status(StatusCode::OK);

    let contents = response.body.as_ref().unwrap().as_array().unwrap().clone();
    assert_eq!(contents.len(), 2);

    let social = contents
        .iter()
        .find(|c| c["kind"] == json!("social_uplink"))
        .expect("social uplink content");
    assert_social_uplink_payload(&social["payload"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_skip_storage_when_persist_is_false(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("dj@example.com").await.unwrap();
    let track = ctx
        .fixtures
        .create_audio_file(user.id, "Cyber Dreams", "Neural Wave", None)
        .await
        .unwrap();

    let response = ctx
        .client
        .post(
            &format!("/api/tracks/{}/content", track.id),
            &json!({ "kind": "growth_content", "mood": "Instagram", "persist": false }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert!(body.get("id").is_none());
    assert!(body.get("created_at").is_none());
    assert_eq!(body["payload"]["viralScore"], json!(72));

    assert_eq!(ctx.fixtures.content_count_for_track(track.id).await.unwrap(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_prefer_the_request_mood_over_the_track_mood(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("dj@example.com").await.unwrap();
    let track = ctx
        .fixtures
        .create_audio_file(user.id, "Cyber Dreams", "Neural Wave", Some("Dark Industrial"))
        .await
        .unwrap();

    ctx.client
        .post(
            &format!("/api/tracks/{}/content", track.id),
            &json!({ "kind": "dj_promo", "mood": "Euphoric Trance", "persist": false }),
        )
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let prompt = ctx.provider.last_prompt().unwrap();
    assert!(prompt.user.contains("Euphoric Trance"));
    assert!(!prompt.user.contains("Dark Industrial"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_ignore_a_blank_mood_override(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("dj@example.com").await.unwrap();
    let track = ctx
        .fixtures
        .create_audio_file(user.id, "Cyber Dreams", "Neural Wave", Some("Dark Industrial"))
        .await
        .unwrap();

    ctx.client
        .post(
            &format!("/api/tracks/{}/content", track.id),
            &json!({ "kind": "dj_promo", "mood": "   ", "persist": false }),
        )
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let prompt = ctx.provider.last_prompt().unwrap();
    assert!(prompt.user.contains("Dark Industrial"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_a_mood_before_calling_the_provider(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("dj@example.com").await.unwrap();
    let track = ctx
        .fixtures
        .create_audio_file(user.id, "Cyber Dreams", "Neural Wave", None)
        .await
        .unwrap();

    let response = ctx
        .client
        .post(
            &format!("/api/tracks/{}/content", track.id),
            &json!({ "kind": "dj_promo" }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("A mood is required");
    assert_eq!(ctx.provider.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_unavailable_when_the_provider_returns_malformed_json(
    ctx: &TestContext,
) {
    let user = ctx.fixtures.create_user("dj@example.com").await.unwrap();
    let track = ctx
        .fixtures
        .create_audio_file(user.id, "Cyber Dreams", "Neural Wave", Some("Dark Industrial"))
        .await
        .unwrap();
    ctx.provider.respond_with("Sure! Here is your promo kit: {clubHype: ...");

    let response = ctx
        .client
        .post(
            &format!("/api/tracks/{}/content", track.id),
            &json!({ "kind": "dj_promo" }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(ctx.provider.call_count(), 1);
    assert_eq!(ctx.fixtures.content_count_for_track(track.id).await.unwrap(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_unavailable_on_provider_faults(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("dj@example.com").await.unwrap();
    let track = ctx
        .fixtures
        .create_audio_file(user.id, "Cyber Dreams", "Neural Wave", Some("Dark Industrial"))
        .await
        .unwrap();
    let path = format!("/api/tracks/{}/content", track.id);

    ctx.provider.push(ScriptedReply::Fail(ProviderError::RateLimited(
        "slow down".to_string(),
    )));
    ctx.provider.push(ScriptedReply::Nothing);

    for _ in 0..2 {
        ctx.client
            .post(&path, &json!({ "kind": "social_uplink" }))
            .await
            .unwrap()
            .assert_status(StatusCode::SERVICE_UNAVAILABLE)
            .assert_error_message("Content generation is unavailable");
    }

    // The queue is drained, so the next call succeeds with canned content
    ctx.client
        .post(&path, &json!({ "kind": "social_uplink" }))
        .await
        .unwrap()
        .assert_status(StatusCode::OK);
    assert_eq!(ctx.provider.call_count(), 3);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_content_on_unknown_tracks(ctx: &TestContext) {
    let path = format!("/api/tracks/{}/content", Uuid::new_v4());

    ctx.client
        .post(&path, &json!({ "kind": "dj_promo", "mood": "Dark" }))
        .await
        .unwrap()
        .assert_status(StatusCode::NOT_FOUND);
    ctx.client
        .get(&path)
        .await
        .unwrap()
        .assert_status(StatusCode::NOT_FOUND);

    assert_eq!(ctx.provider.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_statelessly_from_a_raw_request(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/content/generate",
            &json!({
                "subject_title": "Cyber Dreams",
                "subject_author": "Neural Wave",
                "mood": "Dark Industrial",
                "kind": "dj_promo"
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body["kind"].as_str(), Some("dj_promo"));
    assert_eq!(body["payload"], dj_promo_json());

    assert_eq!(ctx.fixtures.count_rows("ai_generated_content").await.unwrap(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_accept_growth_content_without_an_author(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/content/generate",
            &json!({
                "subject_title": "Growing a techno fanbase",
                "mood": "TikTok",
                "kind": "growth_content"
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body.as_ref().unwrap()["payload"]["title"].as_str(),
        Some("5 ways to grow your techno fanbase")
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_call_the_provider_for_incomplete_raw_requests(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/content/generate",
            &json!({
                "subject_title": "Cyber Dreams",
                "subject_author": "",
                "mood": "Dark Industrial",
                "kind": "social_uplink"
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_error_message("subject_author");
    assert_eq!(ctx.provider.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_content_kinds(ctx: &TestContext) {
    let response = ctx
        .client
        .post_raw(
            "/api/content/generate",
            r#"{"subject_title":"x","subject_author":"y","mood":"z","kind":"press_release"}"#,
        )
        .await
        .unwrap();

    assert!(response.status.is_client_error());
    assert_eq!(ctx.provider.call_count(), 0);
}
