/// Integration tests for the dashboard HTTP host
///
/// Binds a real listener on an ephemeral port, serves a rendered page from a
/// background thread and talks to it over HTTP. The server thread is left
/// running; it ends with the test process.
///
/// Run with: cargo test --test dashboard_endpoint

use covid_dashboard::endpoint::{render_page, DashboardServer};
use covid_dashboard::render::{render_chart, ChartKind, ChartTable, ColumnRoles};
use serde_json::json;

fn start_server(page: String) -> u16 {
    let server = DashboardServer::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = server.port().expect("listener should have an IP address");

    std::thread::spawn(move || {
        if let Err(e) = server.serve(&page) {
            eprintln!("dashboard server error: {}", e);
        }
    });

    port
}

fn sample_page() -> String {
    let table = ChartTable::new()
        .with_column("case status", vec![json!("CONFIRMADO"), json!("SOSPECHOSO")])
        .with_column("count", vec![json!(11), json!(4)]);
    let chart = render_chart(
        &table,
        &ColumnRoles::new("case status", "count"),
        "COVID-19 Case Status Distribution (2021)",
        ChartKind::Pie,
        None,
    )
    .expect("pie renders");

    render_page("COVID-19 Dashboard", &[chart])
}

#[test]
fn test_root_serves_dashboard_page() {
    let page = sample_page();
    let port = start_server(page.clone());

    let response = reqwest::blocking::get(format!("http://127.0.0.1:{}/", port))
        .expect("request should succeed");

    assert_eq!(response.status().as_u16(), 200);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"), "got {}", content_type);

    let body = response.text().expect("body should be text");
    assert_eq!(body, page);
    assert!(body.contains("SOSPECHOSO"));
}

#[test]
fn test_other_paths_are_not_found() {
    let port = start_server(sample_page());

    for path in ["/health", "/site/05", "/favicon.ico"] {
        let response = reqwest::blocking::get(format!("http://127.0.0.1:{}{}", port, path))
            .expect("request should succeed");
        assert_eq!(response.status().as_u16(), 404, "path {}", path);
    }
}

#[test]
fn test_post_to_root_is_rejected() {
    let port = start_server(sample_page());

    let response = reqwest::blocking::Client::new()
        .post(format!("http://127.0.0.1:{}/", port))
        .body("x")
        .send()
        .expect("request should succeed");
    assert_eq!(response.status().as_u16(), 405);
}
