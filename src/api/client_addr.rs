//! Peer address extraction for Axum handlers.
//!
//! [`ClientAddr`] resolves the visitor's network address by looking, in
//! order, at:
//!
//! - the `x-forwarded-for` header (first parseable entry)
//! - the `x-real-ip` header
//! - [`ConnectInfo`] (the TCP peer address, when not behind a proxy)
//!
//! The server must be started with
//! `Router::into_make_service_with_connect_info::<SocketAddr>()` for
//! the final fallback to be populated.

use std::net::{IpAddr, SocketAddr};

use axum::extract::connect_info::ConnectInfo;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};

const X_REAL_IP: &str = "x-real-ip";
const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Extractor for the visitor's network address.
#[derive(Debug, Clone, Copy)]
pub struct ClientAddr(pub IpAddr);

impl<S> FromRequestParts<S> for ClientAddr
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        maybe_x_forwarded_for(&parts.headers)
            .or_else(|| maybe_x_real_ip(&parts.headers))
            .or_else(|| maybe_connect_info(parts))
            .map(Self)
            .ok_or((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Can't determine the client IP, check forwarding configuration",
            ))
    }
}

/// Takes the first parseable address from the `x-forwarded-for` list.
fn maybe_x_forwarded_for(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get(X_FORWARDED_FOR)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|s| s.split(',').find_map(|s| s.trim().parse::<IpAddr>().ok()))
}

/// Tries to parse the `x-real-ip` header.
fn maybe_x_real_ip(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get(X_REAL_IP)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|s| s.parse::<IpAddr>().ok())
}

/// Looks in the `ConnectInfo` extension for the TCP peer address.
fn maybe_connect_info(parts: &Parts) -> Option<IpAddr> {
    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use axum::http::HeaderValue;

    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(
                axum::http::HeaderName::try_from(*name).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn x_forwarded_for_takes_first_entry() {
        let map = headers(&[("x-forwarded-for", "1.1.1.1, 2.2.2.2")]);
        assert_eq!(maybe_x_forwarded_for(&map), Some("1.1.1.1".parse().unwrap()));
    }

    #[test]
    fn x_forwarded_for_skips_garbage() {
        let map = headers(&[("x-forwarded-for", "foo, 203.0.113.7")]);
        assert_eq!(
            maybe_x_forwarded_for(&map),
            Some("203.0.113.7".parse().unwrap())
        );
    }

    #[test]
    fn x_real_ip_parses_ipv6() {
        let map = headers(&[("x-real-ip", "2001:db8:cafe::17")]);
        assert_eq!(
            maybe_x_real_ip(&map),
            Some("2001:db8:cafe::17".parse().unwrap())
        );
    }

    #[test]
    fn malformed_headers_yield_nothing() {
        let map = headers(&[("x-forwarded-for", "foo"), ("x-real-ip", "bar")]);
        assert_eq!(maybe_x_forwarded_for(&map), None);
        assert_eq!(maybe_x_real_ip(&map), None);
    }
}
