//! Lexical SSRF rules shared by every outbound fetch of a caller- or
//! vendor-supplied URL.
//!
//! No DNS resolution happens here: the check looks at the scheme and the
//! literal host only. Callers pass the pieces of an already-parsed URL, so
//! IPv4 shorthands like `2130706433` have been canonicalized by the parser.

use std::net::{IpAddr, Ipv6Addr};
use std::sync::LazyLock;

use ipnet::IpNet;
use thiserror::Error;

const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

const BLOCKED_HOSTS: &[&str] = &[
    "localhost",
    "localhost.localdomain",
    "metadata",
    "metadata.google.internal",
    "metadata.gke.internal",
    "metadata.azure.internal",
    "instance-data",
    "instance-data.ec2.internal",
];

static BLOCKED_NETS: LazyLock<Vec<IpNet>> = LazyLock::new(|| {
    [
        "0.0.0.0/8",
        "10.0.0.0/8",
        "127.0.0.0/8",
        "169.254.0.0/16", // link-local, cloud metadata
        "172.16.0.0/12",
        "192.168.0.0/16",
        "::/128",
        "::1/128",
        "fc00::/7",
        "fe80::/10",
    ]
    .iter()
    .map(|cidr| cidr.parse().expect("valid CIDR"))
    .collect()
});

/// Why a target was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct BlockedTarget(pub String);

/// Rejects non-web schemes, internal hostnames, and loopback, private,
/// link-local or metadata addresses.
///
/// `host` is the URL's host as the parser renders it; IPv6 literals may
/// keep their brackets.
///
/// # Errors
///
/// Returns [`BlockedTarget`] carrying the rejection reason.
pub fn check_scheme_and_host(scheme: &str, host: Option<&str>) -> Result<(), BlockedTarget> {
    if !ALLOWED_SCHEMES.contains(&scheme) {
        let reason = format!("scheme '{scheme}' is not allowed (only http and https)");
        return Err(BlockedTarget(reason));
    }

    let Some(raw_host) = host.filter(|h| !h.is_empty()) else {
        return Err(BlockedTarget("URL has no host".to_owned()));
    };
    let host = raw_host
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim_end_matches('.')
        .to_ascii_lowercase();

    if BLOCKED_HOSTS.contains(&host.as_str()) || host.ends_with(".localhost") {
        return Err(BlockedTarget(format!("host '{host}' is internal")));
    }

    if let Ok(ip) = host.parse::<IpAddr>() {
        if let Some(net) = blocked_net_for(ip) {
            return Err(BlockedTarget(format!("address {ip} is in blocked range {net}")));
        }
    }

    Ok(())
}

fn blocked_net_for(ip: IpAddr) -> Option<&'static IpNet> {
    let blocked = |addr: IpAddr| BLOCKED_NETS.iter().find(|net| net.contains(&addr));
    match ip {
        IpAddr::V6(v6) => blocked(ip).or_else(|| embedded_ipv4(v6).and_then(blocked)),
        IpAddr::V4(_) => blocked(ip),
    }
}

/// The IPv4 address inside an IPv4-mapped (`::ffff:a.b.c.d`) or deprecated
/// IPv4-compatible (`::a.b.c.d`) IPv6 address.
fn embedded_ipv4(v6: Ipv6Addr) -> Option<IpAddr> {
    v6.to_ipv4_mapped()
        .or_else(|| v6.to_ipv4())
        .map(IpAddr::V4)
}
