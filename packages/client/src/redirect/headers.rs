//! Header rewriting between redirect hops

use http::header::{AUTHORIZATION, COOKIE, PROXY_AUTHORIZATION, WWW_AUTHENTICATE};
use http::{HeaderMap, HeaderValue};
use url::Url;

/// True when `next` targets a different host or port than `previous`.
pub(crate) fn is_cross_host(next: &Url, previous: &Url) -> bool {
    next.host_str() != previous.host_str()
        || next.port_or_known_default() != previous.port_or_known_default()
}

/// Strip credentials before a hop to another host or port.
pub(crate) fn remove_sensitive_headers(headers: &mut HeaderMap, next: &Url, previous: &[Url]) {
    let Some(previous) = previous.last() else {
        return;
    };
    if is_cross_host(next, previous) {
        headers.remove(AUTHORIZATION);
        headers.remove(COOKIE);
        headers.remove("cookie2");
        headers.remove(PROXY_AUTHORIZATION);
        headers.remove(WWW_AUTHENTICATE);
    }
}

/// Referer for the next hop. None on an https to http downgrade.
pub(crate) fn make_referer(next: &Url, previous: &Url) -> Option<HeaderValue> {
    if next.scheme() == "http" && previous.scheme() == "https" {
        return None;
    }

    let mut referer = previous.clone();
    let _ = referer.set_username("");
    let _ = referer.set_password(None);
    referer.set_fragment(None);
    referer.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).expect("test URL should parse")
    }

    #[test]
    fn credentials_survive_same_host_hops() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer t"));
        remove_sensitive_headers(&mut headers, &url("http://a.test/2"), &[url("http://a.test/1")]);
        assert!(headers.contains_key(AUTHORIZATION));
    }

    #[test]
    fn credentials_dropped_on_port_change() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer t"));
        headers.insert(COOKIE, HeaderValue::from_static("a=b"));
        remove_sensitive_headers(
            &mut headers,
            &url("http://a.test:8080/"),
            &[url("http://a.test/")],
        );
        assert!(headers.is_empty());
    }

    #[test]
    fn referer_strips_userinfo_and_fragment() {
        let referer = make_referer(&url("http://b.test/"), &url("http://u:p@a.test/x#frag"))
            .expect("referer");
        assert_eq!(referer, "http://a.test/x");
        assert!(make_referer(&url("http://b.test/"), &url("https://a.test/")).is_none());
    }
}
