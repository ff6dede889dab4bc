//! Client identification utilities
//!
//! Common functions for identifying clients via HTTP headers. Login,
//! refresh and revocation records are bound to the originating client
//! so audit trails can tell sessions apart.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

/// Client context derived from a request
///
/// Stored alongside refresh tokens and last-login records.
#[derive(Debug, Clone)]
pub struct ClientContext {
    /// Client IP address (from X-Forwarded-For or direct connection)
    pub ip: Option<IpAddr>,
    /// Original User-Agent string
    pub user_agent: Option<String>,
}

impl ClientContext {
    pub fn new(ip: Option<IpAddr>, user_agent: Option<String>) -> Self {
        Self { ip, user_agent }
    }

    /// Get IP as string (for database storage)
    pub fn ip_string(&self) -> Option<String> {
        self.ip.map(|ip| ip.to_string())
    }
}

/// Extract the client context (IP + User-Agent) from request headers
///
/// A missing User-Agent is tolerated; the IP resolution follows
/// [`extract_client_ip`].
pub fn extract_client_context(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> ClientContext {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    ClientContext::new(extract_client_ip(headers, direct_ip), user_agent)
}

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For header first (for reverse proxy setups),
/// taking the first entry, then falls back to the direct connection IP.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first_ip) = xff.split(',').next() {
            if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }
    direct_ip
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_client_context() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static("Mozilla/5.0 Test Browser"),
        );

        let ctx = extract_client_context(&headers, None);
        assert_eq!(ctx.user_agent, Some("Mozilla/5.0 Test Browser".to_string()));
        assert!(ctx.ip.is_none());
    }

    #[test]
    fn test_extract_client_context_missing_ua() {
        let headers = HeaderMap::new();
        let direct: IpAddr = "10.1.2.3".parse().unwrap();

        let ctx = extract_client_context(&headers, Some(direct));
        assert!(ctx.user_agent.is_none());
        assert_eq!(ctx.ip_string(), Some("10.1.2.3".to_string()));
    }

    #[test]
    fn test_extract_client_ip_xff() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("192.168.1.1, 10.0.0.1"),
        );

        let ip = extract_client_ip(&headers, None);
        assert_eq!(ip, Some("192.168.1.1".parse().unwrap()));
    }

    #[test]
    fn test_extract_client_ip_direct() {
        let headers = HeaderMap::new();
        let direct: IpAddr = "127.0.0.1".parse().unwrap();

        let ip = extract_client_ip(&headers, Some(direct));
        assert_eq!(ip, Some(direct));
    }

    #[test]
    fn test_extract_client_ip_invalid_xff_falls_back() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("not-an-ip"));
        let direct: IpAddr = "127.0.0.1".parse().unwrap();

        let ip = extract_client_ip(&headers, Some(direct));
        assert_eq!(ip, Some(direct));
    }
}
