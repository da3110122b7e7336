mod common;

use actix_web::{http::StatusCode, test};
use common::{
    client::{bearer, TestClient},
    TestContext,
};
use entity::role::Role;

#[tokio::test]
async fn test_user_creation_flow_success() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;
    let (_admin, admin_token) = client.create_admin().await;

    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(bearer(&admin_token))
        .set_json(serde_json::json!({
            "email": "Created@Test.com",
            "name": "  Created User ",
            "role": "admin",
            "password": "password123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "created@test.com");
    assert_eq!(body["name"], "Created User");
    assert_eq!(body["role"], "admin");
    assert_eq!(body["isApproved"], true);

    let stored = ctx.db.find_user_by_email("created@test.com").await.unwrap().unwrap();
    assert!(stored.password_hash.is_some());
}

#[tokio::test]
async fn test_user_creation_flow_permissions() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;
    let (_admin, admin_token) = client.create_admin().await;
    let (_member, member_token) = client.create_test_user(Role::Member, None, true).await;
    let (_owner, owner_token) = client.create_owner().await;

    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(bearer(&member_token))
        .set_json(serde_json::json!({"email": "a@test.com", "name": "A"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(bearer(&admin_token))
        .set_json(serde_json::json!({"email": "b@test.com", "name": "B", "role": "owner"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(bearer(&owner_token))
        .set_json(serde_json::json!({"email": "c@test.com", "name": "C", "role": "owner"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_user_list_and_get_flow() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;
    let group = client.create_group("Blue Team").await;
    let other = client.create_group("Red Team").await;
    let (_admin, admin_token) = client.create_admin().await;
    let (member, member_token) = client.create_test_user(Role::Member, Some(group), false).await;
    let (mate, _) = client.create_test_user(Role::Member, Some(group), false).await;
    let (stranger, _) = client.create_test_user(Role::Member, Some(other), false).await;

    let req = test::TestRequest::get()
        .uri("/api/users")
        .insert_header(bearer(&admin_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 4);

    let req = test::TestRequest::get()
        .uri("/api/users")
        .insert_header(bearer(&member_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    for (id, expected) in [
        (member.id, StatusCode::OK),
        (mate.id, StatusCode::OK),
        (stranger.id, StatusCode::FORBIDDEN),
        (uuid::Uuid::new_v4(), StatusCode::NOT_FOUND),
    ] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/users/{id}"))
            .insert_header(bearer(&member_token))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), expected, "user {id}");
    }

    let req = test::TestRequest::get()
        .uri("/api/users/not-a-uuid")
        .insert_header(bearer(&admin_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_user_profile_update_flow() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;
    let group = client.create_group("Web Server Team").await;
    let (leader, leader_token) = client.create_test_user(Role::Leader, Some(group), true).await;
    let (other, other_token) = client.create_test_user(Role::Member, None, false).await;
    let (owner, _) = client.create_owner().await;
    let (_admin, admin_token) = client.create_admin().await;

    // a renamed leader renames the group's leader label too
    let req = test::TestRequest::patch()
        .uri(&format!("/api/users/{}", leader.id))
        .insert_header(bearer(&leader_token))
        .set_json(serde_json::json!({"name": "Renamed Leader"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let g = ctx.db.get_group(group).await.unwrap();
    assert_eq!(g.leader_name.as_deref(), Some("Renamed Leader"));

    let req = test::TestRequest::patch()
        .uri(&format!("/api/users/{}", leader.id))
        .insert_header(bearer(&other_token))
        .set_json(serde_json::json!({"name": "Hijack"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/users/{}", other.id))
        .insert_header(bearer(&other_token))
        .set_json(serde_json::json!({"email": leader.email}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/users/{}", owner.id))
        .insert_header(bearer(&admin_token))
        .set_json(serde_json::json!({"name": "Not The Owner"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_user_delete_flow() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;
    let (admin, admin_token) = client.create_admin().await;
    let (owner, owner_token) = client.create_owner().await;
    let (member, _) = client.create_test_user(Role::Member, None, false).await;

    for (id, token, expected) in [
        (admin.id, &admin_token, StatusCode::FORBIDDEN),
        (owner.id, &admin_token, StatusCode::FORBIDDEN),
        (member.id, &admin_token, StatusCode::OK),
        (admin.id, &owner_token, StatusCode::OK),
    ] {
        let req = test::TestRequest::delete()
            .uri(&format!("/api/users/{id}"))
            .insert_header(bearer(token))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), expected, "delete {id}");
    }

    assert!(ctx.db.get_user_by_id(&member.id).await.is_err());

    // the deleted admin's session died with the account
    let req = test::TestRequest::get()
        .uri("/api/auth/session")
        .insert_header(bearer(&admin_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_submissions_flow_visibility() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone(), ctx.config.clone());
    let app = test::init_service(client.create_app()).await;
    let (member, member_token) = client.create_test_user(Role::Member, None, false).await;
    let (other, _) = client.create_test_user(Role::Member, None, false).await;
    let (_admin, admin_token) = client.create_admin().await;

    for (id, token, expected) in [
        (member.id, &member_token, StatusCode::OK),
        (other.id, &member_token, StatusCode::FORBIDDEN),
        (other.id, &admin_token, StatusCode::OK),
    ] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/users/{id}/submissions"))
            .insert_header(bearer(token))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), expected);
    }
}
