//! Principal resolution over a mock account store: profile lookup, the
//! active-flag gate, the best-effort last-login refresh, and fail-closed
//! handling of store errors.

mod common;
use std::time::SystemTime;

use actix_web::{test, web, App};
use backend::entities::users;
use backend::{
    mint_access_token, AppError, AppState, AuthGate, CurrentUser, RequestTrace, SecurityConfig,
    TraceSpan,
};
use common::assert_gate_failure;
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, MockExecResult};
use serde_json::Value;
use time::OffsetDateTime;

const TEST_SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

fn user_row(id: i64, sub: &str, role: &str, club: Option<&str>, active: bool) -> users::Model {
    let now = OffsetDateTime::now_utc();
    users::Model {
        id,
        sub: sub.to_string(),
        email: Some(format!("{sub}@league.test")),
        display_name: None,
        role: role.to_string(),
        club: club.map(str::to_string),
        is_active: active,
        last_login: None,
        created_at: now,
        updated_at: now,
    }
}

fn touch_ok() -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected: 1,
    }
}

fn token(sub: &str) -> String {
    mint_access_token(
        sub,
        None,
        SystemTime::now(),
        &SecurityConfig::new(TEST_SECRET),
    )
    .unwrap()
}

async fn me(user: CurrentUser) -> Result<web::Json<Value>, AppError> {
    Ok(web::Json(serde_json::json!({
        "id": user.principal.id,
        "role": user.principal.role.as_str(),
        "club": user.principal.club,
        "claims_sub": user.identity.sub,
    })))
}

macro_rules! resolver_app {
    ($db:expr) => {{
        let db: DatabaseConnection = $db;
        let state = web::Data::new(AppState::new(db, SecurityConfig::new(TEST_SECRET)));
        test::init_service(
            App::new()
                .wrap(TraceSpan)
                .wrap(RequestTrace)
                .app_data(state)
                .service(
                    web::scope("/api/account")
                        .wrap(AuthGate)
                        .route("/me", web::get().to(me)),
                ),
        )
        .await
    }};
}

#[actix_web::test]
async fn resolves_principal_and_returns_identity_alongside() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row(7, "sub-7", "coach", Some("lions"), true)]])
        .append_exec_results([touch_ok()])
        .into_connection();
    let app = resolver_app!(db);

    let req = test::TestRequest::get()
        .uri("/api/account/me")
        .insert_header(("Authorization", format!("Bearer {}", token("sub-7"))))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], 7);
    assert_eq!(body["role"], "coach");
    assert_eq!(body["club"], "lions");
    assert_eq!(body["claims_sub"], "sub-7");
}

#[actix_web::test]
async fn unlinked_identity_is_told_to_register() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<users::Model>::new()])
        .into_connection();
    let app = resolver_app!(db);

    let req = test::TestRequest::get()
        .uri("/api/account/me")
        .insert_header(("Authorization", format!("Bearer {}", token("sub-unknown"))))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_gate_failure(resp, 404, "complete your registration").await;
}

#[actix_web::test]
async fn deactivated_account_is_blocked_regardless_of_role() {
    // Even an admin account is blocked once deactivated.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row(1, "sub-1", "admin", None, false)]])
        .into_connection();
    let app = resolver_app!(db);

    let req = test::TestRequest::get()
        .uri("/api/account/me")
        .insert_header(("Authorization", format!("Bearer {}", token("sub-1"))))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_gate_failure(resp, 403, "deactivated").await;
}

#[actix_web::test]
async fn legacy_stored_role_normalizes_to_canonical() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row(3, "sub-3", "manager", Some("lions"), true)]])
        .append_exec_results([touch_ok()])
        .into_connection();
    let app = resolver_app!(db);

    let req = test::TestRequest::get()
        .uri("/api/account/me")
        .insert_header(("Authorization", format!("Bearer {}", token("sub-3"))))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["role"], "clubManager");
}

#[actix_web::test]
async fn last_login_refresh_failure_does_not_block_the_request() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row(7, "sub-7", "coach", Some("lions"), true)]])
        .append_exec_errors([DbErr::Custom("write timeout".to_string())])
        .into_connection();
    let app = resolver_app!(db);

    let req = test::TestRequest::get()
        .uri("/api/account/me")
        .insert_header(("Authorization", format!("Bearer {}", token("sub-7"))))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn store_failure_fails_closed_as_invalid_token() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("connection reset".to_string())])
        .into_connection();
    let app = resolver_app!(db);

    let req = test::TestRequest::get()
        .uri("/api/account/me")
        .insert_header(("Authorization", format!("Bearer {}", token("sub-7"))))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_gate_failure(resp, 401, "invalid token").await;
}
