use admin_console::model::{DateRange, OrgUserStatus};
use admin_console::screens::Notice;
use admin_console::{AdminConsole, ConsoleConfig, ConsoleError};
use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> ConsoleConfig {
    ConsoleConfig {
        base_url: server.uri(),
        auth_token: Some("token-123".into()),
        ..ConsoleConfig::default()
    }
}

#[tokio::test]
async fn test_reject_over_http_sends_bearer_and_refreshes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/signup/fetch"))
        .and(header("authorization", "Bearer token-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"username": "ravi", "custID": "C100", "email": "ravi@example.in", "mobile": "9876543210"}]
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/auth/signup/reject/C100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/signup/fetch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let console = AdminConsole::new(&config(&server)).unwrap();
    let mut screen = console.signup_screen();
    assert_eq!(screen.load().await, None);

    screen.request_reject("C100").unwrap();
    let notice = screen.confirm_reject().await.unwrap();
    assert_eq!(notice, Some(Notice::success("User rejected successfully")));
    assert!(screen.rows().data().unwrap().is_empty());

    drop(screen);
    console.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_http_error_without_message_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/changelog/fetch"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let console = AdminConsole::new(&config(&server)).unwrap();
    let screen = console.history_screen();
    let notice = screen.load().await.unwrap();
    assert!(notice.is_error());
    assert_eq!(notice.message, "Failed to fetch history");
    assert_eq!(screen.rows().error(), Some("Failed to fetch history"));
}

#[tokio::test]
async fn test_http_error_message_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/org/user/edit"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "Not allowed"})))
        .mount(&server)
        .await;

    let console = AdminConsole::new(&config(&server)).unwrap();
    let outcome = console
        .org_users
        .set_status(OrgUserStatus {
            user_id: "C200".into(),
            status: "0".into(),
        })
        .await;
    assert_eq!(outcome.unwrap_err().message(), "Not allowed");
}

#[tokio::test]
async fn test_dashboard_and_developer_queries_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tranCount/master_counts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"totalProducts": "41"}})))
        .mount(&server)
        .await;
    for counter in [
        "/tranCount/transaction_counts/transaction",
        "/tranCount/transaction_counts/GP",
        "/tranCount/transaction_counts/MIN",
        "/tranCount/pending_counts",
        "/tranCount/top_mfg_products",
    ] {
        Mock::given(method("POST"))
            .and(path(counter))
            .and(body_json(json!({"data": "01-04-2025-30-06-2025"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/org/user/list"))
        .and(query_param("type", "developer"))
        .and(query_param("status", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"username": "dev", "custID": "D01", "status": "1"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let console = AdminConsole::new(&config(&server)).unwrap();
    let range = DateRange::new(
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
    )
    .unwrap();
    let screen = console.dashboard_screen(range);
    assert_eq!(screen.load().await, None);
    let counters = screen.counters();
    assert_eq!(counters.data().unwrap().master.as_ref().unwrap().total_products, 41);

    let history = console.history_screen();
    assert_eq!(history.load_developers().await, None);
    assert_eq!(history.developers().data().unwrap()[0].cust_id, "D01");
}

#[tokio::test]
async fn test_token_with_newline_fails_startup() {
    let config = ConsoleConfig {
        auth_token: Some("token-123\n".into()),
        ..ConsoleConfig::default()
    };
    let err = AdminConsole::new(&config).err().unwrap();
    assert!(matches!(err, ConsoleError::Transport(_)));
}
