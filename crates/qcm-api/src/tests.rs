//! Router tests against an in-memory SQLite store.

use std::{collections::HashSet, sync::Arc};

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use qcm_core::auth::{Argon2Verifier, CredentialVerifier, PlaintextVerifier};
use qcm_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

async fn app_with(verifier: Arc<dyn CredentialVerifier>) -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  api_router(Arc::new(store), verifier)
}

async fn app() -> Router { app_with(Arc::new(PlaintextVerifier)).await }

async fn call(
  app: &Router,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = app
    .clone()
    .oneshot(builder.body(body).unwrap())
    .await
    .unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
  (status, json)
}

fn question_body(matiere: &str, n: usize) -> Value {
  let props: Vec<String> = (1..=n).map(|i| format!("p{i}")).collect();
  json!({
    "matiere": matiere,
    "question": "Which one?",
    "propositions": props,
    "answer": "p1",
  })
}

// ─── Subjects ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_list_matieres() {
  let app = app().await;
  let (status, body) = call(
    &app,
    "POST",
    "/api/matieres",
    Some(json!({ "id": "INF111", "name": "Algorithms", "description": "Intro" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["success"], true);
  assert_eq!(body["matiere"]["id"], "INF111");
  assert!(body["matiere"]["created_at"].is_string());

  let (status, body) = call(&app, "GET", "/api/matieres", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["matieres"].as_array().unwrap().len(), 1);
  assert_eq!(body["matieres"][0]["description"], "Intro");
}

#[tokio::test]
async fn malformed_identifier_is_400() {
  let app = app().await;
  for id in ["inf111", "INF11", "INF1111", "INF11A", ""] {
    let (status, body) = call(
      &app,
      "POST",
      "/api/matieres",
      Some(json!({ "id": id, "name": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{id:?}");
    assert_eq!(body["success"], false);
    assert!(body.get("error").is_none());
  }

  let (status, _) =
    call(&app, "POST", "/api/matieres", Some(json!({ "name": "no id" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (_, body) = call(&app, "GET", "/api/matieres", None).await;
  assert!(body["matieres"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_identifier_is_409_and_first_kept() {
  let app = app().await;
  call(
    &app,
    "POST",
    "/api/matieres",
    Some(json!({ "id": "INF111", "name": "Algorithms" })),
  )
  .await;
  let (status, body) = call(
    &app,
    "POST",
    "/api/matieres",
    Some(json!({ "id": "INF111", "name": "Overwritten?" })),
  )
  .await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert_eq!(body["success"], false);

  let (_, body) = call(&app, "GET", "/api/matieres", None).await;
  assert_eq!(body["matieres"][0]["name"], "Algorithms");
}

#[tokio::test]
async fn legacy_field_names_accepted() {
  let app = app().await;
  let (status, body) = call(
    &app,
    "POST",
    "/api/matieres",
    Some(json!({ "_id": "INF204", "nom": "Réseaux" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["matiere"]["name"], "Réseaux");

  let (status, body) = call(
    &app,
    "POST",
    "/api/questions",
    Some(json!({
      "matiere": "INF204",
      "question": "Port HTTP ?",
      "reponses": ["21", "22", "80", "443"],
      "bonneReponse": "80",
      "explication": "Par défaut",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["question"]["answer"], "80");
  assert_eq!(body["question"]["explanation"], "Par défaut");
}

// ─── Questions ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn question_needs_exactly_four_propositions() {
  let app = app().await;
  for n in [3, 5] {
    let (status, body) =
      call(&app, "POST", "/api/questions", Some(question_body("INF111", n))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "n = {n}");
    assert_eq!(body["success"], false);
  }

  let (status, body) =
    call(&app, "POST", "/api/questions", Some(question_body("INF111", 4))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["question"]["propositions"], json!(["p1", "p2", "p3", "p4"]));

  let (_, body) = call(&app, "GET", "/api/questions", None).await;
  assert_eq!(body["questions"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn mistyped_question_body_is_400() {
  let app = app().await;
  let (status, body) = call(
    &app,
    "POST",
    "/api/questions",
    Some(json!({
      "matiere": "INF111",
      "question": "q",
      "propositions": "not a list",
      "answer": "a",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["success"], false);
}

// ─── Quiz ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn quiz_scenario() {
  let app = app().await;
  let (status, _) = call(
    &app,
    "POST",
    "/api/matieres",
    Some(json!({ "id": "INF111", "name": "Algorithms" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);

  for _ in 0..6 {
    let (status, _) =
      call(&app, "POST", "/api/questions", Some(question_body("INF111", 4))).await;
    assert_eq!(status, StatusCode::OK);
  }

  let (status, body) = call(&app, "GET", "/api/quiz/INF111", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["success"], true);
  let drawn = body["questions"].as_array().unwrap();
  assert_eq!(drawn.len(), 5);
  let ids: HashSet<_> = drawn
    .iter()
    .map(|q| q["question_id"].as_str().unwrap().to_owned())
    .collect();
  assert_eq!(ids.len(), 5);
  assert!(drawn.iter().all(|q| q["matiere_id"] == "INF111"));

  let (status, _) = call(
    &app,
    "POST",
    "/api/matieres",
    Some(json!({ "id": "INF111", "name": "Algorithms" })),
  )
  .await;
  assert_eq!(status, StatusCode::CONFLICT);

  let (status, body) = call(&app, "GET", "/api/quiz/INF999", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["success"], true);
  assert_eq!(body["questions"], json!([]));
}

// ─── Users & login ───────────────────────────────────────────────────────────

#[tokio::test]
async fn register_and_login_with_argon2() {
  let app = app_with(Arc::new(Argon2Verifier)).await;
  let (status, body) = call(
    &app,
    "POST",
    "/api/users",
    Some(json!({
      "nom": "Ada",
      "email": "ada@example.com",
      "numero": "0600000000",
      "password": "s3cret",
      "type": "admin",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["user"]["role"], "admin");
  assert!(body["user"].get("password").is_none());

  let (status, body) = call(
    &app,
    "POST",
    "/auth/login",
    Some(json!({ "email": "ada@example.com", "password": "s3cret" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["success"], true);
  assert_eq!(
    body["user"],
    json!({
      "name": "Ada",
      "email": "ada@example.com",
      "phone": "0600000000",
      "role": "admin",
    })
  );

  let (_, body) = call(&app, "GET", "/api/users", None).await;
  let users = body["users"].as_array().unwrap();
  assert_eq!(users.len(), 1);
  assert!(users[0].get("password").is_none());
}

#[tokio::test]
async fn failed_logins_look_the_same() {
  let app = app().await;
  call(
    &app,
    "POST",
    "/api/users",
    Some(json!({ "name": "Ada", "email": "ada@example.com", "password": "pw" })),
  )
  .await;

  let (s1, wrong_pw) = call(
    &app,
    "POST",
    "/auth/login",
    Some(json!({ "email": "ada@example.com", "password": "nope" })),
  )
  .await;
  let (s2, unknown) = call(
    &app,
    "POST",
    "/auth/login",
    Some(json!({ "email": "who@example.com", "password": "pw" })),
  )
  .await;

  assert_eq!(s1, StatusCode::UNAUTHORIZED);
  assert_eq!(s2, StatusCode::UNAUTHORIZED);
  assert_eq!(wrong_pw, unknown);
  assert_eq!(wrong_pw["success"], false);
}

#[tokio::test]
async fn registration_reads_loose_fields_as_text() {
  let app = app().await;
  let (status, body) = call(
    &app,
    "POST",
    "/api/users",
    Some(json!({
      "nom": "Ada",
      "email": "ada@example.com",
      "numero": 612345678,
      "password": "pw",
      "type": null,
    })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["user"]["phone"], "612345678");
  assert_eq!(body["user"]["role"], "student");

  let (status, body) =
    call(&app, "POST", "/api/users", Some(json!({ "password": 1234 }))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["user"]["name"], "");

  let (status, body) = call(
    &app,
    "POST",
    "/auth/login",
    Some(json!({ "email": "", "password": 1234 })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["user"]["role"], "student");
}

// ─── Deletes ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn deletes_are_idempotent() {
  let app = app().await;
  let (_, body) =
    call(&app, "POST", "/api/questions", Some(question_body("INF111", 4))).await;
  let qid = body["question"]["question_id"].as_str().unwrap().to_owned();

  for _ in 0..2 {
    let (status, body) =
      call(&app, "DELETE", &format!("/api/questions/{qid}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
  }

  for uri in [
    "/api/users/00000000-0000-0000-0000-000000000000",
    "/api/users/not-a-uuid",
    "/api/matieres/INF999",
    "/api/matieres/whatever",
    "/api/questions/nope",
  ] {
    let (status, body) = call(&app, "DELETE", uri, None).await;
    assert_eq!(status, StatusCode::OK, "{uri}");
    assert_eq!(body["success"], true);
  }
}

// ─── Store faults ────────────────────────────────────────────────────────────

#[tokio::test]
async fn closed_store_yields_500_with_cause() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let app = api_router(Arc::new(store.clone()), Arc::new(PlaintextVerifier));
  store.close().await.unwrap();

  let requests = [
    ("GET", "/api/matieres".to_owned(), None),
    ("GET", "/api/users".to_owned(), None),
    (
      "POST",
      "/api/matieres".to_owned(),
      Some(json!({ "id": "INF111", "name": "Algorithms" })),
    ),
    ("POST", "/api/questions".to_owned(), Some(question_body("INF111", 4))),
    ("GET", "/api/quiz/INF111".to_owned(), None),
    (
      "POST",
      "/auth/login".to_owned(),
      Some(json!({ "email": "ada@example.com", "password": "pw" })),
    ),
    (
      "DELETE",
      "/api/questions/00000000-0000-0000-0000-000000000000".to_owned(),
      None,
    ),
    ("DELETE", "/api/matieres/INF111".to_owned(), None),
  ];

  for (method, uri, body) in requests {
    let (status, body) = call(&app, method, &uri, body).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "server error");
    let cause = body["error"].as_str().unwrap_or_default();
    assert!(cause.contains("ConnectionClosed"), "{method} {uri}: {cause}");
  }
}
