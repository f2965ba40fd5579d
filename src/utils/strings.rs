// Mon Aug 17 2026 - Alex

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static GENERIC_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`\d+.*$|\[\[.*$|<.*$").unwrap());

static INVALID_PATH_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1F]"#).unwrap());

pub struct StringUtils;

impl StringUtils {
    /// Turn a managed type name into a filesystem-safe directory name.
    ///
    /// Generic arity markers and instantiation lists are dropped first,
    /// so a closed Dictionary instantiation becomes just `Dictionary`,
    /// then anything a filesystem could object to is replaced with `_`.
    pub fn sanitize_type_name(type_name: &str) -> String {
        let stripped = GENERIC_SUFFIX.replace(type_name, "");
        let safe = INVALID_PATH_CHARS.replace_all(stripped.trim(), "_");
        if safe.is_empty() {
            "unknown_type".to_string()
        } else {
            safe.into_owned()
        }
    }

    /// Last dot-separated segment of a namespaced type name.
    pub fn short_type_name(type_name: &str) -> &str {
        type_name.rsplit('.').next().unwrap_or(type_name)
    }

    pub fn truncate(s: &str, max_len: usize) -> Cow<'_, str> {
        if s.chars().count() <= max_len {
            Cow::Borrowed(s)
        } else if max_len >= 3 {
            let cut: String = s.chars().take(max_len - 3).collect();
            Cow::Owned(format!("{}...", cut))
        } else {
            Cow::Owned(s.chars().take(max_len).collect())
        }
    }
}

pub fn sanitize_type_name(type_name: &str) -> String {
    StringUtils::sanitize_type_name(type_name)
}

pub fn short_type_name(type_name: &str) -> &str {
    StringUtils::short_type_name(type_name)
}

pub fn truncate(s: &str, max_len: usize) -> String {
    StringUtils::truncate(s, max_len).into_owned()
}
