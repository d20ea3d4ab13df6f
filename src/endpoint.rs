/// HTTP endpoint serving the dashboard page
///
/// The page is rendered once at startup from the chart list and served
/// as-is on every request. There is one route:
/// - GET / - The dashboard (plotly.js loaded from its CDN)
///
/// Anything else gets a 404 (405 for non-GET methods on `/`).

use std::io::Cursor;

use tracing::{debug, info, warn};

use crate::error::PipelineError;
use crate::render::Chart;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// Builds the single dashboard page: a heading and one plot per chart, in order.
pub fn render_page(heading: &str, charts: &[Chart]) -> String {
    let mut containers = String::new();
    let mut scripts = String::new();

    for (idx, chart) in charts.iter().enumerate() {
        let id = format!("chart-{}", idx);
        containers.push_str(&format!(
            "    <div id=\"{}\" class=\"chart\" title=\"{}\"></div>\n",
            id,
            escape_html(&chart.title)
        ));
        scripts.push_str(&format!(
            "      render(\"{}\", {});\n",
            id,
            script_safe_json(&chart.figure)
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
  <head>
    <meta charset="utf-8">
    <title>{title}</title>
    <script src="{cdn}"></script>
    <style>
      body {{ font-family: sans-serif; margin: 0 2rem; }}
      .chart {{ width: 100%; min-height: 450px; }}
    </style>
  </head>
  <body>
    <h1>{title}</h1>
{containers}    <script>
      function render(id, figure) {{
        Plotly.newPlot(id, figure.data, figure.layout, {{ responsive: true }});
      }}
{scripts}    </script>
  </body>
</html>
"#,
        title = escape_html(heading),
        cdn = PLOTLY_CDN,
        containers = containers,
        scripts = scripts,
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON that can sit inside a `<script>` element: `</` would end the
/// element early, so it is written as `<\/`.
fn script_safe_json(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// Status, content type and body for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Reply {
    fn html(body: &str) -> Self {
        Reply { status: 200, content_type: "text/html; charset=utf-8", body: body.as_bytes().to_vec() }
    }

    fn text(status: u16, body: &str) -> Self {
        Reply { status, content_type: "text/plain; charset=utf-8", body: body.as_bytes().to_vec() }
    }
}

/// Routes a request. Query strings are ignored.
pub fn route(method: &tiny_http::Method, url: &str, page: &str) -> Reply {
    let path = url.split('?').next().unwrap_or("");

    if path != "/" && !path.is_empty() {
        return Reply::text(404, "Not found");
    }

    match method {
        tiny_http::Method::Get | tiny_http::Method::Head => Reply::html(page),
        _ => Reply::text(405, "Method not allowed"),
    }
}

fn to_response(reply: Reply) -> Result<tiny_http::Response<Cursor<Vec<u8>>>, PipelineError> {
    let header = tiny_http::Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes())
        .map_err(|_| PipelineError::Server(format!("bad content type {}", reply.content_type)))?;

    Ok(tiny_http::Response::from_data(reply.body)
        .with_status_code(tiny_http::StatusCode::from(reply.status))
        .with_header(header))
}

// ---------------------------------------------------------------------------
// HTTP Server
// ---------------------------------------------------------------------------

pub struct DashboardServer {
    server: tiny_http::Server,
}

impl DashboardServer {
    /// Binds the listener. Use port 0 for an ephemeral port.
    pub fn bind(addr: &str) -> Result<Self, PipelineError> {
        let server = tiny_http::Server::http(addr)
            .map_err(|e| PipelineError::Server(format!("failed to bind {}: {}", addr, e)))?;
        Ok(DashboardServer { server })
    }

    /// The port actually bound.
    pub fn port(&self) -> Option<u16> {
        self.server.server_addr().to_ip().map(|addr| addr.port())
    }

    /// Serves `page` until the listener shuts down. Requests are handled one
    /// at a time on the calling thread.
    pub fn serve(&self, page: &str) -> Result<(), PipelineError> {
        info!(port = ?self.port(), "dashboard listening");

        for request in self.server.incoming_requests() {
            let reply = route(request.method(), request.url(), page);
            let status = reply.status;
            if status != 200 {
                debug!(method = %request.method(), url = request.url(), status, "request rejected");
            }

            if let Err(e) = request.respond(to_response(reply)?) {
                warn!("failed to send response: {}", e);
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
