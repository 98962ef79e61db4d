//! URL canonicalization.
//!
//! The service caches verdicts by normalized URL, so the same URL must always
//! normalize to the same string. Normalization also masks e-mail addresses
//! embedded in the path or query before a URL is sent anywhere.

use regex::{Captures, Regex};
use url::{Position, Url};

use crate::config::NormalizerConfig;

const SUPPORTED_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Cleans raw URL strings into the form the service expects
#[derive(Debug, Clone)]
pub struct UrlNormalizer {
    config: NormalizerConfig,
    validator: Regex,
    email: Regex,
}

impl Default for UrlNormalizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default())
    }
}

impl UrlNormalizer {
    /// Build a normalizer with the given masking settings
    #[must_use]
    pub fn new(config: NormalizerConfig) -> Self {
        Self {
            config,
            validator: Regex::new(&url_pattern()).expect("URL pattern is valid"),
            email: Regex::new(r"(?i)[\w.+-]+(?:@|%40)[a-z\d-]+\.[a-z\d.-]+[a-z\d]")
                .expect("e-mail pattern is valid"),
        }
    }

    /// Normalize `raw`, prepending `default_scheme` when it has no
    /// `http://`/`https://` prefix.
    ///
    /// Returns `None` when the string cannot be turned into a valid URL.
    /// Scheme and host are lower-cased; path, query and fragment keep their
    /// case. Applying `normalize` to its own output returns the same string.
    #[must_use]
    pub fn normalize(&self, raw: &str, default_scheme: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let lowered = trimmed.to_ascii_lowercase();
        let candidate = if SUPPORTED_SCHEMES.iter().any(|s| lowered.starts_with(s))
            || default_scheme.is_empty()
        {
            trimmed.to_string()
        } else {
            format!(
                "{default_scheme}://{}",
                trimmed.trim_start_matches([':', '/'])
            )
        };

        // Percent-encodes unsafe characters, IDNA-encodes the host and
        // lower-cases scheme and host.
        let parsed = Url::parse(&candidate).ok()?;
        parsed.host_str()?;
        if !self.validator.is_match(parsed.as_str()) {
            return None;
        }

        Some(self.mask_emails(&parsed))
    }

    /// Replace e-mail addresses in the path, query and fragment, whether the
    /// `@` is literal or `%40`. The authority is left alone so credentials
    /// and host are never rewritten.
    fn mask_emails(&self, parsed: &Url) -> String {
        let head = &parsed[..Position::BeforePath];
        let tail = &parsed[Position::BeforePath..];

        let masked = self.email.replace_all(tail, |caps: &Captures<'_>| {
            let matched = &caps[0];
            if self.config.is_file_like(matched) || matched == self.config.dummy_email {
                matched.to_string()
            } else {
                self.config.dummy_email.clone()
            }
        });

        format!("{head}{masked}")
    }
}

/// A URL split into scheme, host and the remainder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitUrl {
    /// URL scheme, e.g. `https`
    pub scheme: String,
    /// Host name or IP literal, without port or credentials
    pub host: String,
    /// Path, query and fragment; `/` when empty
    pub path: String,
}

/// Split `url` into scheme, host and path. Returns `None` when no host can be
/// parsed.
#[must_use]
pub fn split_host(url: &str) -> Option<SplitUrl> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str().filter(|h| !h.is_empty())?.to_string();
    let path = &parsed[Position::BeforePath..];

    Some(SplitUrl {
        scheme: parsed.scheme().to_string(),
        host,
        path: if path.is_empty() { "/".to_string() } else { path.to_string() },
    })
}

/// URL grammar: optional credentials, an IPv4 literal, bracketed IPv6
/// literal, RFC 1034 host name or `localhost`, optional port and resource.
fn url_pattern() -> String {
    let ipv4 = r"(?:25[0-5]|2[0-4]\d|[0-1]?\d?\d)(?:\.(?:25[0-5]|2[0-4]\d|[0-1]?\d?\d)){3}";
    let ipv6 = r"\[[0-9a-f:.]+\]";
    // Labels are at most 63 characters and never start or end with - or _
    let label = r"[a-z0-9](?:[a-z0-9_-]{0,61}[a-z0-9])?";
    let tld = r"\.(?:[a-z0-9][a-z0-9-]{0,61}[a-z0-9]|xn--[a-z0-9]{1,59})\.?";
    let host = format!(r"(?:{label}(?:\.{label})*{tld}|localhost)");

    format!(
        r"(?i)^[a-z0-9.+-]*://(?:[^\s:@/]+(?::[^\s:@/]*)?@)?(?:{ipv4}|{ipv6}|{host})(?::\d{{2,5}})?(?:[/?#]\S*)?\z"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DUMMY_EMAIL;

    fn normalize(raw: &str) -> Option<String> {
        UrlNormalizer::default().normalize(raw, "http")
    }

    #[test]
    fn test_prepends_default_scheme() {
        assert_eq!(normalize("example.com").as_deref(), Some("http://example.com/"));
        assert_eq!(normalize("://example.com/a").as_deref(), Some("http://example.com/a"));
        assert_eq!(
            UrlNormalizer::default().normalize("example.com", "https").as_deref(),
            Some("https://example.com/")
        );
    }

    #[test]
    fn test_lowercases_scheme_and_host_only() {
        assert_eq!(
            normalize("  HTTPS://WWW.Example.COM/Path/To?Q=AbC  ").as_deref(),
            Some("https://www.example.com/Path/To?Q=AbC")
        );
    }

    #[test]
    fn test_percent_encodes_unsafe_characters() {
        assert_eq!(
            normalize("http://example.com/a b").as_deref(),
            Some("http://example.com/a%20b")
        );
    }

    #[test]
    fn test_accepts_ip_literals_and_ports() {
        assert_eq!(normalize("http://10.0.0.1:8080/x").as_deref(), Some("http://10.0.0.1:8080/x"));
        assert_eq!(normalize("http://[::1]/").as_deref(), Some("http://[::1]/"));
        assert_eq!(normalize("http://localhost:3000").as_deref(), Some("http://localhost:3000/"));
    }

    #[test]
    fn test_rejects_invalid_hosts() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("   "), None);
        assert_eq!(normalize("http://-bad-.com/"), None);
        assert_eq!(normalize("http://nodot/"), None);
        assert_eq!(normalize(&format!("http://{}.com/", "a".repeat(64))), None);
        assert_eq!(normalize("http://exa mple.com/"), None);
    }

    #[test]
    fn test_masks_email_in_query() {
        assert_eq!(
            normalize("http://x.com/path?to=foo@bar.com").unwrap(),
            format!("http://x.com/path?to={DUMMY_EMAIL}")
        );
    }

    #[test]
    fn test_masks_percent_encoded_email() {
        assert_eq!(
            normalize("http://x.com/unsubscribe?u=jane.doe%40mail.example.org&x=1").unwrap(),
            format!("http://x.com/unsubscribe?u={DUMMY_EMAIL}&x=1")
        );
    }

    #[test]
    fn test_masks_each_address_by_position() {
        assert_eq!(
            normalize("http://x.com/?a=foo@bar.co&b=foo@bar.com").unwrap(),
            format!("http://x.com/?a={DUMMY_EMAIL}&b={DUMMY_EMAIL}")
        );
        assert_eq!(
            normalize("http://x.com/?a=o%40b.io&b=jo%40b.io").unwrap(),
            format!("http://x.com/?a={DUMMY_EMAIL}&b={DUMMY_EMAIL}")
        );
    }

    #[test]
    fn test_keeps_file_like_matches() {
        assert_eq!(
            normalize("http://x.com/get/setup@v2.exe").as_deref(),
            Some("http://x.com/get/setup@v2.exe")
        );
        assert_eq!(
            normalize("http://x.com/a@index.html").as_deref(),
            Some("http://x.com/a@index.html")
        );
    }

    #[test]
    fn test_never_rewrites_credentials_or_host() {
        assert_eq!(
            normalize("http://user@x.com/").as_deref(),
            Some("http://user@x.com/")
        );
    }

    #[test]
    fn test_idempotent() {
        for raw in [
            "Example.com/Some Path?a=b",
            "http://x.com/path?to=foo@bar.com",
            "https://sub.domain.example.co.uk:8443/a/b/../c?q=%41#frag",
            "http://x.com/u?mail=a%40b.org",
            "bücher.de/straße",
            "http://x.com/?a=foo@bar.co&b=foo@bar.com",
            "http://x.com/?a=bar.com&to=jo@bar.com",
            "http://x.com/?a=o%40b.io&b=jo%40b.io",
        ] {
            let once = normalize(raw).unwrap();
            assert_eq!(normalize(&once).unwrap(), once, "not idempotent for {raw}");
        }
    }

    #[test]
    fn test_split_host() {
        assert_eq!(
            split_host("https://user:pw@Example.com:8443/a?b=c"),
            Some(SplitUrl {
                scheme: "https".to_string(),
                host: "example.com".to_string(),
                path: "/a?b=c".to_string(),
            })
        );
        assert_eq!(split_host("http://example.com").unwrap().path, "/");
        assert_eq!(split_host("not a url"), None);
        assert_eq!(split_host("mailto:someone@example.com"), None);
    }
}
