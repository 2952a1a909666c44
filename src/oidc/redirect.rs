/*
 *  idp-core - Multi-tenant OpenID Connect identity provider
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

//! Redirect-URI matching: exact match, or a single `*` wildcard standing in
//! for one whole `/`-delimited segment. Deliberately not `globset` — that
//! crate's glob semantics (`**`, character classes, brace alternation) are
//! more permissive than the spec allows, so this is hand-rolled.

/// Matches one `/`-delimited segment. A segment containing a single `*` is a
/// glob over that segment only: the part before and after `*` must match the
/// candidate's prefix/suffix. A segment of exactly `*` matches anything
/// non-empty.
fn segment_matches(pattern: &str, candidate: &str) -> bool {
    match pattern.find('*') {
        None => pattern == candidate,
        Some(star) => {
            let prefix = &pattern[..star];
            let suffix = &pattern[star + 1..];
            if suffix.contains('*') {
                return false;
            }
            if prefix.is_empty() && suffix.is_empty() {
                return !candidate.is_empty();
            }
            candidate.len() >= prefix.len() + suffix.len()
                && candidate.starts_with(prefix)
                && candidate.ends_with(suffix)
        }
    }
}

/// `pattern` is one of a client's `allowed_callback_urls`; `candidate` is the
/// `redirect_uri` presented on the request.
pub fn matches(pattern: &str, candidate: &str) -> bool {
    if pattern == candidate {
        return true;
    }
    let pattern_segments: Vec<&str> = pattern.split('/').collect();
    let candidate_segments: Vec<&str> = candidate.split('/').collect();
    if pattern_segments.len() != candidate_segments.len() {
        return false;
    }
    pattern_segments
        .iter()
        .zip(candidate_segments.iter())
        .all(|(p, c)| segment_matches(p, c))
}

pub fn find_match<'a>(allowed: &'a [String], candidate: &str) -> Option<&'a str> {
    allowed.iter().map(String::as_str).find(|pattern| matches(pattern, candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match() {
        assert!(matches("https://app.example.com/cb", "https://app.example.com/cb"));
    }

    #[test]
    fn wildcard_matches_one_segment() {
        assert!(matches("https://*.example.com/cb", "https://tenant1.example.com/cb"));
        assert!(!matches("https://*.example.com/cb", "https://example.com/cb"));
    }

    #[test]
    fn wildcard_does_not_span_multiple_segments() {
        assert!(!matches("https://example.com/*", "https://example.com/a/b"));
    }

    #[test]
    fn mismatched_path_rejected() {
        assert!(!matches("https://example.com/cb", "https://example.com/other"));
    }

    #[test]
    fn find_match_picks_first_allowed_pattern() {
        let allowed = vec!["https://a.example.com/cb".to_string(), "https://*.example.com/cb".to_string()];
        assert_eq!(
            find_match(&allowed, "https://b.example.com/cb"),
            Some("https://*.example.com/cb")
        );
        assert_eq!(find_match(&allowed, "https://evil.com/cb"), None);
    }
}
