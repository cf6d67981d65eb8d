use axum::response::Html;

/// Landing page with a short endpoint overview
///
/// GET /
pub async fn dashboard_handler() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head><title>keygate</title></head>
<body>
  <h1>keygate</h1>
  <p>Register at <code>POST /api/register</code>, log in at
  <code>POST /api/login</code> to receive your API key, then pass it as the
  <code>apikey</code> query parameter to the protected endpoints:</p>
  <ul>
    <li><code>GET /api/protected</code></li>
    <li><code>GET /api/tiktok?url=...</code></li>
    <li><code>GET /api/orkut/createpayment?amount=...&amp;codeqr=...</code></li>
    <li><code>GET /api/orkut/cekstatus?merchant=...&amp;keyorkut=...</code></li>
  </ul>
</body>
</html>
"#,
    )
}
