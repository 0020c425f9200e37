//! Client address and user agent of a request

use std::{convert::Infallible, net::SocketAddr};

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, header::USER_AGENT, request::Parts},
};

use crate::constants::MAX_USER_AGENT_LENGTH;

/// Proxy headers carrying the client address, most trusted first
const FORWARDED_IP_HEADERS: [&str; 3] = ["cf-connecting-ip", "x-forwarded-for", "x-real-ip"];

/// Who is on the other end of a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl ClientInfo {
    /// Read the client from proxy headers, falling back to the socket peer
    pub fn from_headers(headers: &HeaderMap, peer: Option<SocketAddr>) -> Self {
        let ip_address = FORWARDED_IP_HEADERS
            .iter()
            .filter_map(|name| header_str(headers, name))
            .filter_map(|value| value.split(',').next())
            .map(str::trim)
            .find(|ip| !ip.is_empty())
            .map(str::to_string)
            .or_else(|| peer.map(|addr| addr.ip().to_string()));

        let user_agent = header_str(headers, USER_AGENT.as_str())
            .map(str::trim)
            .filter(|ua| !ua.is_empty())
            .map(|ua| ua.chars().take(MAX_USER_AGENT_LENGTH).collect());

        Self {
            ip_address,
            user_agent,
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(Self::from_headers(&parts.headers, peer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, value.parse().unwrap());
        }
        map
    }

    #[test]
    fn test_proxy_headers_win_over_peer() {
        let peer: SocketAddr = "10.0.0.1:5000".parse().unwrap();

        let info = ClientInfo::from_headers(
            &headers(&[("x-forwarded-for", " 203.0.113.7 , 10.0.0.2")]),
            Some(peer),
        );
        assert_eq!(info.ip_address.as_deref(), Some("203.0.113.7"));

        let info = ClientInfo::from_headers(
            &headers(&[
                ("x-forwarded-for", "203.0.113.7"),
                ("cf-connecting-ip", "198.51.100.4"),
            ]),
            Some(peer),
        );
        assert_eq!(info.ip_address.as_deref(), Some("198.51.100.4"));

        let info = ClientInfo::from_headers(&headers(&[("x-real-ip", "192.0.2.9")]), None);
        assert_eq!(info.ip_address.as_deref(), Some("192.0.2.9"));
    }

    #[test]
    fn test_peer_address_and_missing_client() {
        let peer: SocketAddr = "10.0.0.1:5000".parse().unwrap();
        let info = ClientInfo::from_headers(&headers(&[("x-forwarded-for", " ")]), Some(peer));
        assert_eq!(info.ip_address.as_deref(), Some("10.0.0.1"));

        assert_eq!(
            ClientInfo::from_headers(&HeaderMap::new(), None),
            ClientInfo::default()
        );
    }

    #[test]
    fn test_user_agent_is_truncated() {
        let long = "a".repeat(MAX_USER_AGENT_LENGTH + 50);
        let info = ClientInfo::from_headers(&headers(&[("user-agent", long.as_str())]), None);
        assert_eq!(
            info.user_agent.map(|ua| ua.len()),
            Some(MAX_USER_AGENT_LENGTH)
        );
    }
}
