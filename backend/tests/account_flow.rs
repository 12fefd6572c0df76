//! End-to-end account flows over the real HTTP stack.
//!
//! Requests pass through the trace middleware, the JSON error handler, the
//! handlers and the account service, backed by the in-memory credential store
//! and a clock the tests can move forward.

use std::sync::{Arc, Mutex};

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test, web};
use argon2::Params;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use accounts::Trace;
use accounts::domain::{AccountService, TRACE_ID_HEADER};
use accounts::inbound::http::state::HttpState;
use accounts::inbound::http::{configure, json_config};
use accounts::outbound::memory::InMemoryUserRepository;
use accounts::outbound::security::{Argon2PasswordHasher, JwtTokenIssuer};

const SECRET: &[u8] = b"integration-secret-integration-s";

struct SteppingClock(Mutex<DateTime<Utc>>);

impl SteppingClock {
    fn advance(&self, delta: TimeDelta) {
        let mut now = self.0.lock().expect("clock lock");
        *now += delta;
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock lock")
    }
}

#[fixture]
fn clock() -> Arc<SteppingClock> {
    let start = Utc
        .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .expect("valid start time");
    Arc::new(SteppingClock(Mutex::new(start)))
}

fn http_state(clock: Arc<SteppingClock>) -> web::Data<HttpState> {
    let params = Params::new(Params::MIN_M_COST, 1, 1, None).expect("minimum params");
    let service = AccountService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(Argon2PasswordHasher::with_params(params)),
        Arc::new(JwtTokenIssuer::new(SECRET, clock)),
    );
    web::Data::new(HttpState::from_service(Arc::new(service)))
}

async fn init(
    clock: Arc<SteppingClock>,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(http_state(clock))
            .app_data(json_config())
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

async fn send<S>(app: &S, request: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(app, request.to_request()).await;
    assert!(
        response.headers().contains_key(TRACE_ID_HEADER),
        "every response carries a trace id"
    );
    let status = response.status();
    let body: Value = test::read_body_json(response).await;
    (status, body)
}

fn register_request(name: &str, email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post().uri("/register").set_json(json!({
        "name": name,
        "email": email,
        "password": password,
        "confirmPassword": password
    }))
}

fn login_request(email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": email, "password": password }))
}

fn with_token(request: test::TestRequest, token: &str) -> test::TestRequest {
    request.insert_header((AUTHORIZATION, format!("Bearer {token}")))
}

async fn login_token<S>(app: &S, email: &str, password: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, body) = send(app, login_request(email, password)).await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().expect("token string").to_owned()
}

#[rstest]
#[actix_web::test]
async fn register_login_and_fetch_profile(clock: Arc<SteppingClock>) {
    let app = init(clock).await;

    let (status, registered) =
        send(&app, register_request("Ada Lovelace", "ada@example.com", "secret1")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(registered["message"], "User registered successfully.");
    assert!(registered["user"].get("password").is_none());

    let (status, logged_in) = send(&app, login_request("ada@example.com", "secret1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(logged_in["message"], "Login successful.");
    assert_eq!(logged_in["user"], registered["user"]);
    let token = logged_in["token"].as_str().expect("token");

    let (status, profile) = send(
        &app,
        with_token(test::TestRequest::get().uri("/profile"), token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["user"], registered["user"]);
}

#[rstest]
#[actix_web::test]
async fn duplicate_registration_is_rejected(clock: Arc<SteppingClock>) {
    let app = init(clock).await;
    send(&app, register_request("Ada", "ada@example.com", "secret1")).await;

    let (status, body) = send(&app, register_request("Other", "ada@example.com", "secret2")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Email is already registered." }));
}

#[rstest]
#[actix_web::test]
async fn unknown_email_and_wrong_password_look_identical(clock: Arc<SteppingClock>) {
    let app = init(clock).await;
    send(&app, register_request("Ada", "ada@example.com", "secret1")).await;

    let wrong_password = send(&app, login_request("ada@example.com", "secret2")).await;
    let unknown_email = send(&app, login_request("grace@example.com", "secret1")).await;

    assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(
        wrong_password.1,
        json!({ "error": "Incorrect email or password." })
    );
}

#[rstest]
#[actix_web::test]
async fn tokens_expire_after_seven_days(clock: Arc<SteppingClock>) {
    let app = init(clock.clone()).await;
    send(&app, register_request("Ada", "ada@example.com", "secret1")).await;
    let token = login_token(&app, "ada@example.com", "secret1").await;

    clock.advance(TimeDelta::days(7) - TimeDelta::seconds(1));
    let (status, _) = send(
        &app,
        with_token(test::TestRequest::get().uri("/profile"), &token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    clock.advance(TimeDelta::seconds(1));
    let (status, body) = send(
        &app,
        with_token(test::TestRequest::get().uri("/profile"), &token),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Unauthorized." }));
}

#[rstest]
#[actix_web::test]
async fn profile_update_keeps_password_unless_replaced(clock: Arc<SteppingClock>) {
    let app = init(clock).await;
    send(&app, register_request("Ada", "ada@example.com", "secret1")).await;
    let token = login_token(&app, "ada@example.com", "secret1").await;

    let (status, body) = send(
        &app,
        with_token(
            test::TestRequest::put()
                .uri("/profile")
                .set_json(json!({ "name": "Ada King", "email": "ada@example.com", "password": "abc" })),
            &token,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "Ada King");
    login_token(&app, "ada@example.com", "secret1").await;

    let (status, _) = send(
        &app,
        with_token(
            test::TestRequest::put().uri("/profile").set_json(json!({
                "name": "Ada King",
                "email": "ada.king@example.com",
                "password": "new-secret"
            })),
            &token,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, login_request("ada.king@example.com", "secret1")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    login_token(&app, "ada.king@example.com", "new-secret").await;
}

#[rstest]
#[actix_web::test]
async fn profile_update_cannot_take_another_email(clock: Arc<SteppingClock>) {
    let app = init(clock).await;
    send(&app, register_request("Ada", "ada@example.com", "secret1")).await;
    send(&app, register_request("Grace", "grace@example.com", "secret1")).await;
    let token = login_token(&app, "ada@example.com", "secret1").await;

    let (status, body) = send(
        &app,
        with_token(
            test::TestRequest::put()
                .uri("/profile")
                .set_json(json!({ "name": "Ada", "email": "grace@example.com" })),
            &token,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Email is already in use." }));
}

#[rstest]
#[actix_web::test]
async fn tampered_tokens_are_rejected(clock: Arc<SteppingClock>) {
    let app = init(clock).await;
    send(&app, register_request("Ada", "ada@example.com", "secret1")).await;
    let token = login_token(&app, "ada@example.com", "secret1").await;
    let tampered = format!("{token}x");

    let (status, body) = send(
        &app,
        with_token(test::TestRequest::get().uri("/profile"), &tampered),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Unauthorized." }));
}
