//! Maps a raw request path onto a bucket/key pair.
//!
//! Leading, trailing and duplicate slashes never change the resolved pair:
//! `//photos///2025/` and `/photos/2025` both name bucket `photos`, key
//! `2025`. A trailing slash is remembered separately as directory intent.

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

/// Characters escaped when a key is placed back into a URL path. `/` is left
/// alone so keys keep their hierarchy.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'\'')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedPath {
    pub bucket: String,
    /// Remaining segments joined by `/`; empty for the bucket root.
    pub key: String,
    /// The decoded path ended in `/`.
    pub trailing_slash: bool,
}

impl ParsedPath {
    /// Should this request be answered with a listing straight away?
    pub fn is_directory(&self) -> bool {
        self.key.is_empty() || self.trailing_slash
    }

    /// Listing prefix for the key: `""` at the bucket root, else `key/`.
    pub fn directory_prefix(&self) -> String {
        if self.key.is_empty() {
            String::new()
        } else {
            format!("{}/", self.key)
        }
    }

    /// Canonical `/<bucket>/<key>` form, percent-encoded.
    pub fn normalized(&self) -> String {
        if self.key.is_empty() {
            format!("/{}", encode_path(&self.bucket))
        } else {
            format!("/{}/{}", encode_path(&self.bucket), encode_path(&self.key))
        }
    }
}

/// Split `raw` into bucket and key. Returns `None` when no bucket segment
/// remains after discarding empty segments.
///
/// The path is decoded once, before splitting, so `%2F` is an ordinary
/// separator.
pub fn parse_path(raw: &str) -> Option<ParsedPath> {
    let decoded = percent_decode_str(raw).decode_utf8_lossy();
    let trailing_slash = decoded.ends_with('/');
    let mut segments = decoded.split('/').filter(|segment| !segment.is_empty());

    let bucket = segments.next()?.to_string();
    let key = segments.collect::<Vec<_>>().join("/");

    Some(ParsedPath {
        bucket,
        key,
        trailing_slash,
    })
}

/// Percent-encode a bucket name or key for use in an href, keeping `/`.
pub fn encode_path(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(raw: &str) -> Option<(String, String)> {
        parse_path(raw).map(|p| (p.bucket, p.key))
    }

    #[test]
    fn root_has_no_bucket() {
        assert_eq!(parse_path("/"), None);
        assert_eq!(parse_path(""), None);
        assert_eq!(parse_path("///"), None);
    }

    #[test]
    fn bucket_only() {
        let parsed = parse_path("/photos").unwrap();
        assert_eq!(parsed.bucket, "photos");
        assert_eq!(parsed.key, "");
        assert!(parsed.is_directory());
        assert_eq!(parsed.directory_prefix(), "");
    }

    #[test]
    fn bucket_and_nested_key() {
        let parsed = parse_path("/photos/2025/img.jpg").unwrap();
        assert_eq!(parsed.bucket, "photos");
        assert_eq!(parsed.key, "2025/img.jpg");
        assert!(!parsed.trailing_slash);
        assert!(!parsed.is_directory());
    }

    #[test]
    fn empty_segments_collapse() {
        let expected = Some(("bad".to_string(), "path".to_string()));
        assert_eq!(pair("/bad//path"), expected);
        assert_eq!(pair("//bad/path"), expected);
        assert_eq!(pair("/bad/path/"), expected);
        assert_eq!(pair("bad///path//"), expected);
    }

    #[test]
    fn trailing_slash_marks_directory() {
        let parsed = parse_path("/photos/2025/").unwrap();
        assert_eq!(parsed.key, "2025");
        assert!(parsed.trailing_slash);
        assert!(parsed.is_directory());
        assert_eq!(parsed.directory_prefix(), "2025/");
    }

    #[test]
    fn segments_are_percent_decoded() {
        let parsed = parse_path("/docs/my%20report.pdf").unwrap();
        assert_eq!(parsed.key, "my report.pdf");
    }

    #[test]
    fn encoded_slashes_are_separators() {
        let parsed = parse_path("/b/a%2F%2Fc").unwrap();
        assert_eq!(parsed.key, "a/c");

        let parsed = parse_path("/b/docs%2F").unwrap();
        assert_eq!(parsed.key, "docs");
        assert!(parsed.is_directory());

        assert_eq!(parse_path("/%2F%2F"), None);
    }

    #[test]
    fn reparsing_normalized_form_is_stable() {
        for raw in [
            "/b/a%2F%2Fc",
            "%2Fb%2F%2Fx%2F",
            "/b/%2541",
            "/b/k",
            "//b///a/b/c.png",
            "/b/",
            "/b/with%20space/and%25percent",
            "/b/caf%C3%A9/menu.txt",
            "/b/q?x/#frag",
        ] {
            let first = parse_path(raw).unwrap();
            let second = parse_path(&first.normalized()).unwrap();
            assert_eq!(
                (&first.bucket, &first.key),
                (&second.bucket, &second.key),
                "{raw}"
            );
        }
    }

    #[test]
    fn encode_keeps_slashes() {
        assert_eq!(encode_path("a b/c#d.txt"), "a%20b/c%23d.txt");
    }
}
