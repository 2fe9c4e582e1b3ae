//! HTTP tests driving the full router in-process

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use bank_admin::api::build_app;
use bank_admin::auth::hash_password;
use bank_admin::db::{MemoryStore, NewUser, UserStore};
use bank_admin::{Config, ServerState};
use http::{HeaderMap, Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestApp {
    app: Router,
    admin_id: i64,
    supervisor_id: i64,
}

/// Ids of a branch with one employee and one client, ready to open accounts
struct Bank {
    branch_id: i64,
    employee_id: i64,
    client_id: i64,
}

async fn seed_user(store: &MemoryStore, username: &str, role: &str) -> i64 {
    UserStore::create(
        store,
        NewUser {
            username: username.into(),
            password_hash: hash_password("secret").unwrap(),
            role: role.into(),
            employee_id: None,
        },
    )
    .await
    .unwrap()
}

async fn setup() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let admin_id = seed_user(&store, "admin", "Administrator").await;
    seed_user(&store, "dev", "Developer").await;
    let supervisor_id = seed_user(&store, "sup", "Supervisor").await;

    let state = ServerState::with_store(Config::for_tests(), store.clone());
    TestApp {
        app: build_app(state),
        admin_id,
        supervisor_id,
    }
}

impl TestApp {
    async fn send(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, HeaderMap, Value) {
        self.send_raw(method, uri, cookie, body.map(|b| b.to_string()))
            .await
    }

    /// Like [`send`](Self::send) but with an arbitrary JSON-typed body
    async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<String>,
    ) -> (StatusCode, HeaderMap, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, json)
    }

    /// Log in and return the `Cookie` header value for the new session
    async fn login(&self, username: &str) -> String {
        let (status, headers, _) = self
            .send(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({"username": username, "password": "secret"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed for {username}");
        set_cookie_pair(&headers)
    }

    /// POST a record and return its new id
    async fn create(&self, uri: &str, cookie: &str, body: Value) -> i64 {
        let (status, _, created) = self.send(Method::POST, uri, Some(cookie), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "create {uri}: {created}");
        created["id"].as_i64().unwrap()
    }

    async fn seed_bank(&self, admin: &str) -> Bank {
        let branch_id = self
            .create(
                "/api/branches",
                admin,
                json!({"name": "Centro", "address": "Calle Mayor 1", "phone": "555-0100"}),
            )
            .await;
        let employee_id = self
            .create(
                "/api/employees",
                admin,
                json!({
                    "branch_id": branch_id,
                    "first_name": "Marta",
                    "last_name": "Soto",
                    "position": "Cashier"
                }),
            )
            .await;
        let client_id = self
            .create(
                "/api/clients",
                admin,
                json!({"first_name": "Ana", "last_name": "Ruiz", "registered_on": "2024-02-01"}),
            )
            .await;
        Bank {
            branch_id,
            employee_id,
            client_id,
        }
    }

    async fn open_account(&self, cookie: &str, bank: &Bank, status: &str) -> i64 {
        self.create(
            "/api/accounts",
            cookie,
            json!({
                "client_id": bank.client_id,
                "branch_id": bank.branch_id,
                "employee_id": bank.employee_id,
                "account_type": "Savings",
                "status": status
            }),
        )
        .await
    }
}

fn set_cookie_pair(headers: &HeaderMap) -> String {
    let set_cookie = headers
        .get(header::SET_COOKIE)
        .expect("Set-Cookie header")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn test_health_is_public() {
    let app = setup().await;
    let (status, _, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
async fn test_login_me_logout_flow() {
    let app = setup().await;

    let (status, headers, body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"username": "sup", "password": "secret"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "sup");
    assert_eq!(body["role"], "Supervisor");
    assert_eq!(body["role_display_name"], "Supervisor");
    assert!(body.get("password_hash").is_none());

    let set_cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    let cookie = set_cookie_pair(&headers);

    let (status, _, body) = app.send(Method::GET, "/api/auth/me", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], app.supervisor_id);

    let (status, headers, _) = app
        .send(Method::POST, "/api/auth/logout", Some(&cookie), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let cleared = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cleared.contains("Max-Age=0"));

    let (status, _, body) = app.send(Method::GET, "/api/auth/me", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    // Logging out again, or without any session, is fine
    let (status, _, _) = app
        .send(Method::POST, "/api/auth/logout", Some(&cookie), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, _) = app.send(Method::POST, "/api/auth/logout", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_failed_logins_are_indistinguishable() {
    let app = setup().await;

    let (wrong_status, _, wrong_body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"username": "sup", "password": "not-it"})),
        )
        .await;
    let (ghost_status, _, ghost_body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"username": "ghost", "password": "secret"})),
        )
        .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, ghost_status);
    assert_eq!(wrong_body, ghost_body);
    assert_eq!(wrong_body["code"], 1002);
}

#[tokio::test]
async fn test_api_requires_session() {
    let app = setup().await;
    for uri in ["/api/dashboard", "/api/clients", "/api/users", "/api/auth/me"] {
        let (status, _, body) = app.send(Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["code"], 1001);
    }

    let (status, _, _) = app
        .send(Method::GET, "/api/clients", Some("bank_session=forged"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_dashboard_menu_follows_role() {
    let app = setup().await;
    let admin = app.login("admin").await;
    let bank = app.seed_bank(&admin).await;
    app.open_account(&admin, &bank, "Active").await;
    app.open_account(&admin, &bank, "Inactive").await;

    let cookie = app.login("sup").await;
    let (status, _, body) = app.send(Method::GET, "/api/dashboard", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);

    let menu: Vec<(String, String)> = body["menu"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| {
            (
                m["resource"].as_str().unwrap().to_string(),
                m["actions"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    let expected: Vec<(String, String)> =
        ["Client", "Account", "Transaction", "Loan", "CreditCard"]
            .iter()
            .map(|r| (r.to_string(), "R".to_string()))
            .collect();
    assert_eq!(menu, expected);

    assert_eq!(body["stats"]["clients"], 1);
    assert_eq!(body["stats"]["active_accounts"], 1);
    assert_eq!(body["stats"]["employees"], 1);
    assert_eq!(body["stats"]["branches"], 1);

    let (_, _, body) = app.send(Method::GET, "/api/dashboard", Some(&admin), None).await;
    let menu = body["menu"].as_array().unwrap();
    assert_eq!(menu.len(), 8);
    assert!(menu.iter().all(|m| m["actions"] == "CRUD"));
}

#[tokio::test]
async fn test_permission_denied_for_disallowed_actions() {
    let app = setup().await;

    let sup = app.login("sup").await;
    let (status, _, _) = app.send(Method::GET, "/api/clients", Some(&sup), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, body) = app
        .send(
            Method::POST,
            "/api/clients",
            Some(&sup),
            Some(json!({"first_name": "Ana", "last_name": "Ruiz"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2001);

    let (status, _, _) = app.send(Method::GET, "/api/users", Some(&sup), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let dev = app.login("dev").await;
    let (status, _, _) = app.send(Method::GET, "/api/clients", Some(&dev), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, _) = app
        .send(Method::DELETE, "/api/clients/1", Some(&dev), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_client_lifecycle_and_account_guard() {
    let app = setup().await;
    let admin = app.login("admin").await;

    let (status, _, body) = app
        .send(
            Method::POST,
            "/api/clients",
            Some(&admin),
            Some(json!({
                "first_name": "Luis",
                "last_name": "Perez",
                "email": "luis@example.com",
                "registered_on": "2024-03-05"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();

    let (status, _, body) = app
        .send(
            Method::POST,
            "/api/clients",
            Some(&admin),
            Some(json!({"first_name": "  ", "last_name": "Perez"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "first_name");

    let (status, _, body) = app
        .send(
            Method::GET,
            "/api/clients?last_name=per&registered_from=2024-03-01&registered_to=2024-03-31",
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _, body) = app
        .send(
            Method::PUT,
            &format!("/api/clients/{id}"),
            Some(&admin),
            Some(json!({"first_name": "Luis", "last_name": "Pérez", "registered_on": "2024-03-05"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["last_name"], "Pérez");
    assert_eq!(body["email"], Value::Null);

    let bank = app.seed_bank(&admin).await;
    let account_id = app
        .open_account(&admin, &Bank { client_id: id, ..bank }, "Inactive")
        .await;
    let (status, _, body) = app
        .send(Method::DELETE, &format!("/api/clients/{id}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 3002);
    assert_eq!(body["details"]["accounts"], 1);

    let (status, _, _) = app
        .send(Method::GET, &format!("/api/clients/{id}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    // Closing the account releases the client
    let (status, _, _) = app
        .send(Method::DELETE, &format!("/api/accounts/{account_id}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, _) = app
        .send(Method::DELETE, &format!("/api/clients/{id}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, body) = app
        .send(Method::GET, "/api/clients/9999", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3001);
}

#[tokio::test]
async fn test_client_without_accounts_can_be_deleted() {
    let app = setup().await;
    let admin = app.login("admin").await;

    let (_, _, body) = app
        .send(
            Method::POST,
            "/api/clients",
            Some(&admin),
            Some(json!({"first_name": "Bea", "last_name": "Soto"})),
        )
        .await;
    let id = body["id"].as_i64().unwrap();

    let (status, _, _) = app
        .send(Method::DELETE, &format!("/api/clients/{id}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = app
        .send(Method::GET, &format!("/api/clients/{id}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_management_rules() {
    let app = setup().await;
    let admin = app.login("admin").await;

    let (status, _, body) = app
        .send(
            Method::POST,
            "/api/users",
            Some(&admin),
            Some(json!({"username": "dev", "password": "x", "role": "Developer"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4002);

    let (status, _, body) = app
        .send(
            Method::POST,
            "/api/users",
            Some(&admin),
            Some(json!({"username": "new", "password": "", "role": "Developer"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4003);

    let (status, _, body) = app
        .send(
            Method::POST,
            "/api/users",
            Some(&admin),
            Some(json!({"username": "new", "password": "pw", "role": "Cashier"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4004);

    let (status, _, body) = app
        .send(
            Method::POST,
            "/api/users",
            Some(&admin),
            Some(json!({"username": "auditor", "password": "pw", "role": "Desarrollador"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let new_id = body["id"].as_i64().unwrap();

    // Legacy role tokens are stored in canonical form
    let (_, _, body) = app
        .send(Method::GET, &format!("/api/users/{new_id}"), Some(&admin), None)
        .await;
    assert_eq!(body["role"], "Developer");

    // Empty password on update keeps the old one
    let (status, _, _) = app
        .send(
            Method::PUT,
            &format!("/api/users/{new_id}"),
            Some(&admin),
            Some(json!({"username": "auditor", "password": "", "role": "Supervisor"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"username": "auditor", "password": "pw"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "Supervisor");

    let (status, _, body) = app
        .send(Method::GET, "/api/users?role=Supervisor", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["auditor", "sup"]);
}

#[tokio::test]
async fn test_user_cannot_delete_self_and_deletion_ends_sessions() {
    let app = setup().await;
    let admin = app.login("admin").await;
    let sup = app.login("sup").await;

    let (status, _, body) = app
        .send(
            Method::DELETE,
            &format!("/api/users/{}", app.admin_id),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2005);

    let (status, _, _) = app
        .send(
            Method::DELETE,
            &format!("/api/users/{}", app.supervisor_id),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = app.send(Method::GET, "/api/auth/me", Some(&sup), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, body) = app
        .send(
            Method::DELETE,
            &format!("/api/users/{}", app.supervisor_id),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);
}

#[tokio::test]
async fn test_blank_search_fields_are_ignored() {
    let app = setup().await;
    let admin = app.login("admin").await;
    app.seed_bank(&admin).await;

    let (status, _, body) = app
        .send(Method::GET, "/api/users?username=&role=&employee_id=", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, _, body) = app
        .send(
            Method::GET,
            "/api/clients?first_name=&registered_from=&registered_to=",
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _, body) = app
        .send(Method::GET, "/api/accounts?client_id=&branch_id=&status=", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    // A non-blank value still has to parse
    let (status, _, body) = app
        .send(Method::GET, "/api/clients?registered_from=yesterday", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5);
}

#[tokio::test]
async fn test_malformed_input_gets_error_envelope() {
    let app = setup().await;
    let admin = app.login("admin").await;

    let (status, headers, body) = app
        .send_raw(
            Method::POST,
            "/api/clients",
            Some(&admin),
            Some("{\"first_name\": ".into()),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(body["code"], 5);

    let (status, _, body) = app
        .send(Method::POST, "/api/clients", Some(&admin), Some(json!({"first_name": 7})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5);

    let (status, _, body) = app
        .send(Method::GET, "/api/clients/abc", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5);
}

#[tokio::test]
async fn test_delete_guards_follow_dependents() {
    let app = setup().await;
    let admin = app.login("admin").await;
    let bank = app.seed_bank(&admin).await;
    let account_id = app.open_account(&admin, &bank, "Active").await;
    let tx_id = app
        .create(
            "/api/transactions",
            &admin,
            json!({
                "account_id": account_id,
                "employee_id": bank.employee_id,
                "transaction_type": "Deposit",
                "amount": 150.0
            }),
        )
        .await;

    let attempts = [
        (format!("/api/accounts/{account_id}"), 3302),
        (format!("/api/employees/{}", bank.employee_id), 3202),
        (format!("/api/branches/{}", bank.branch_id), 3102),
        (format!("/api/clients/{}", bank.client_id), 3002),
    ];
    for (uri, code) in &attempts {
        let (status, _, body) = app.send(Method::DELETE, uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::CONFLICT, "{uri}");
        assert_eq!(body["code"], *code, "{uri}");
    }

    // Unwinding in dependency order succeeds
    let teardown = [
        format!("/api/transactions/{tx_id}"),
        format!("/api/accounts/{account_id}"),
        format!("/api/employees/{}", bank.employee_id),
        format!("/api/branches/{}", bank.branch_id),
        format!("/api/clients/{}", bank.client_id),
    ];
    for uri in &teardown {
        let (status, _, body) = app.send(Method::DELETE, uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK, "{uri}: {body}");
    }
}

#[tokio::test]
async fn test_card_on_account_blocks_its_deletion() {
    let app = setup().await;
    let admin = app.login("admin").await;
    let bank = app.seed_bank(&admin).await;
    let account_id = app.open_account(&admin, &bank, "Active").await;

    let (status, _, body) = app
        .send(
            Method::POST,
            "/api/credit-cards",
            Some(&admin),
            Some(json!({
                "account_id": account_id,
                "client_id": bank.client_id,
                "card_type": "Classic",
                "number": "4111-1111",
                "credit_limit": 500.0,
                "status": "Active"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3602);

    let card_id = app
        .create(
            "/api/credit-cards",
            &admin,
            json!({
                "account_id": account_id,
                "client_id": bank.client_id,
                "card_type": "Classic",
                "number": "4111111111111111",
                "credit_limit": 500.0,
                "issued_on": "2024-05-10",
                "status": "Active"
            }),
        )
        .await;
    let (_, _, body) = app
        .send(Method::GET, &format!("/api/credit-cards/{card_id}"), Some(&admin), None)
        .await;
    assert_eq!(body["expires_on"], "2028-05-10");

    let (status, _, body) = app
        .send(Method::DELETE, &format!("/api/accounts/{account_id}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 8);
}

#[tokio::test]
async fn test_unknown_references_are_rejected() {
    let app = setup().await;
    let admin = app.login("admin").await;
    let bank = app.seed_bank(&admin).await;

    let (status, _, body) = app
        .send(
            Method::POST,
            "/api/accounts",
            Some(&admin),
            Some(json!({
                "client_id": 9999,
                "branch_id": bank.branch_id,
                "employee_id": bank.employee_id,
                "account_type": "Checking",
                "status": "Active"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 9);

    let (status, _, body) = app
        .send(
            Method::POST,
            "/api/users",
            Some(&admin),
            Some(json!({
                "username": "teller",
                "password": "pw",
                "role": "Developer",
                "employee_id": 9999
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 9);
}

#[tokio::test]
async fn test_deleting_employee_detaches_login() {
    let app = setup().await;
    let admin = app.login("admin").await;
    let bank = app.seed_bank(&admin).await;

    let user_id = app
        .create(
            "/api/users",
            &admin,
            json!({
                "username": "teller",
                "password": "pw",
                "role": "Developer",
                "employee_id": bank.employee_id
            }),
        )
        .await;

    let (status, _, _) = app
        .send(
            Method::DELETE,
            &format!("/api/employees/{}", bank.employee_id),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, _, body) = app
        .send(Method::GET, &format!("/api/users/{user_id}"), Some(&admin), None)
        .await;
    assert_eq!(body["employee_id"], Value::Null);
}

#[tokio::test]
async fn test_record_permissions_by_role() {
    let app = setup().await;
    let admin = app.login("admin").await;
    let bank = app.seed_bank(&admin).await;

    let dev = app.login("dev").await;
    let account_id = app.open_account(&dev, &bank, "Active").await;
    let (status, _, body) = app
        .send(
            Method::PUT,
            &format!("/api/accounts/{account_id}"),
            Some(&dev),
            Some(json!({
                "client_id": bank.client_id,
                "branch_id": bank.branch_id,
                "employee_id": bank.employee_id,
                "account_type": "Savings",
                "balance": 20.0,
                "status": "Blocked"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Blocked");

    let (status, _, _) = app.send(Method::GET, "/api/branches", Some(&dev), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _, _) = app.send(Method::GET, "/api/employees", Some(&dev), None).await;
    assert_eq!(status, StatusCode::OK);

    let sup = app.login("sup").await;
    let (status, _, _) = app.send(Method::GET, "/api/loans", Some(&sup), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, body) = app
        .send(
            Method::POST,
            "/api/loans",
            Some(&sup),
            Some(json!({
                "client_id": bank.client_id,
                "employee_id": bank.employee_id,
                "branch_id": bank.branch_id,
                "amount": 1000.0,
                "interest_rate": 5.0,
                "term_months": 12,
                "status": "Approved"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2001);
    let (status, _, _) = app
        .send(Method::DELETE, &format!("/api/accounts/{account_id}"), Some(&sup), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
