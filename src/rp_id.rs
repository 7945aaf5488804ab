//! RP-ID validator (§4.1): is `rpId` a registrable suffix of the caller's
//! origin host?

use once_cell::sync::Lazy;
use std::collections::HashSet;
use url::{Host, Url};

/// A minimal set of single-label suffixes that must never be accepted as an
/// RP id on their own (`rpId = "com"` must not validate `shop.com`). This is
/// a registrable-suffix judgement, not a full Public Suffix List: no example
/// in the corpus this crate was grounded on depends on a PSL crate, so this
/// is a deliberately small, explicit table rather than an embedded copy of
/// the full IANA/Mozilla list (documented as a simplification in DESIGN.md).
static KNOWN_PUBLIC_SUFFIXES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "com", "org", "net", "edu", "gov", "mil", "int", "info", "biz", "io", "co", "dev", "app",
        "me", "us", "uk", "de", "fr", "jp", "cn", "ru", "nl", "eu", "ai", "xyz",
    ]
    .into_iter()
    .collect()
});

fn is_public_suffix(label: &str) -> bool {
    KNOWN_PUBLIC_SUFFIXES.contains(label)
}

/// `isValidRpId(rpId, origin) -> bool`.
///
/// `origin` must parse as an `https://` URL with a registrable (non-IP) host.
/// `rpId` is accepted when it equals the (lowercased) host exactly, or when
/// the host is a strict subdomain of `rpId` and `rpId` itself is not a bare
/// public suffix.
pub fn is_valid_rp_id(rp_id: &str, origin: &str) -> bool {
    let Ok(url) = Url::parse(origin) else {
        return false;
    };
    if url.scheme() != "https" {
        return false;
    }
    let Some(Host::Domain(host)) = url.host() else {
        // IP literals (Host::Ipv4/Host::Ipv6) are always rejected.
        return false;
    };

    let host = host.to_ascii_lowercase();
    let rp_id = rp_id.to_ascii_lowercase();

    if host == rp_id {
        return true;
    }

    match host.strip_suffix(&format!(".{rp_id}")) {
        Some(_) => !is_public_suffix(&rp_id),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_host_match_is_valid() {
        assert!(is_valid_rp_id("example.com", "https://example.com"));
    }

    #[test]
    fn subdomain_of_rp_id_is_valid() {
        assert!(is_valid_rp_id(
            "example.com",
            "https://login.example.com"
        ));
    }

    #[test]
    fn unrelated_host_is_rejected() {
        assert!(!is_valid_rp_id("example.com", "https://evil.com"));
    }

    #[test]
    fn non_https_origin_is_rejected() {
        assert!(!is_valid_rp_id("example.com", "http://example.com"));
    }

    #[test]
    fn bare_public_suffix_rp_id_is_rejected() {
        assert!(!is_valid_rp_id("com", "https://shop.com"));
    }

    #[test]
    fn ip_literal_origin_is_rejected() {
        assert!(!is_valid_rp_id("127.0.0.1", "https://127.0.0.1"));
    }

    #[test]
    fn rp_id_that_is_a_suffix_but_not_on_a_label_boundary_is_rejected() {
        // "ample.com" is a textual suffix of "example.com" but not a dot-bounded one.
        assert!(!is_valid_rp_id("ample.com", "https://example.com"));
    }
}
