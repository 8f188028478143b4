//! URL building for resource endpoints.
//!
//! Endpoints are written the way the backend routes them (`/clients/`,
//! `commercial/commercial-products/`) and may carry a query string
//! (`/order-notes/?status=Pendiente`), which stays at the end of every URL
//! derived from them.

use contracts::domain::common::RecordId;

/// `{base}/{path}`, with exactly one slash at the seam.
pub fn join(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn split_query(endpoint: &str) -> (&str, Option<&str>) {
    match endpoint.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (endpoint, None),
    }
}

fn with_segments(endpoint: &str, segments: &[&str]) -> String {
    let (path, query) = split_query(endpoint);
    let mut out = path.to_string();
    if !out.ends_with('/') {
        out.push('/');
    }
    for segment in segments {
        out.push_str(segment);
        out.push('/');
    }
    if let Some(query) = query {
        out.push('?');
        out.push_str(query);
    }
    out
}

/// `{endpoint}{id}/`
pub fn item(endpoint: &str, id: RecordId) -> String {
    with_segments(endpoint, &[&id.to_string()])
}

/// `{endpoint}{id}/{action}/`
pub fn action(endpoint: &str, id: RecordId, action: &str) -> String {
    with_segments(endpoint, &[&id.to_string(), action.trim_matches('/')])
}

/// Append `key=value` to the endpoint's query string, URL-encoding the value.
pub fn with_query(endpoint: &str, key: &str, value: &str) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!(
        "{}{}{}={}",
        endpoint,
        separator,
        key,
        urlencoding::encode(value)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join() {
        let base = "http://localhost:8000/api";
        assert_eq!(join(base, "/clients/"), "http://localhost:8000/api/clients/");
        assert_eq!(
            join("http://localhost:8000/api/", "commercial/commercial-products/"),
            "http://localhost:8000/api/commercial/commercial-products/"
        );
    }

    #[test]
    fn test_item_and_action() {
        assert_eq!(item("/banks/", RecordId(4)), "/banks/4/");
        assert_eq!(item("/banks", RecordId(4)), "/banks/4/");
        assert_eq!(
            action("/production-orders/", RecordId(14), "generate_qr_code"),
            "/production-orders/14/generate_qr_code/"
        );
    }

    #[test]
    fn test_query_survives() {
        assert_eq!(
            item("/order-notes/?status=Pendiente", RecordId(3)),
            "/order-notes/3/?status=Pendiente"
        );
        assert_eq!(
            with_query("/production-orders/", "op_type", "Medias"),
            "/production-orders/?op_type=Medias"
        );
        assert_eq!(
            with_query("/tenants/?active=1", "name", "textil norte"),
            "/tenants/?active=1&name=textil%20norte"
        );
    }
}
