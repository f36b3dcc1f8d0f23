//! # Text Helpers
//!
//! Substring search variants, camelCase splitting and title-casing for
//! field labels, slash-delimited path helpers, and `${path}` substitution
//! for annotation patterns such as `itemPathPattern`.

use serde_json::Value;

/// Text before the first occurrence of `pat`, or all of `s` if absent.
pub fn up_to<'a>(s: &'a str, pat: &str) -> &'a str {
    s.find(pat).map_or(s, |pos| &s[..pos])
}

/// Text before the last occurrence of `pat`, or all of `s` if absent.
pub fn up_to_last<'a>(s: &'a str, pat: &str) -> &'a str {
    s.rfind(pat).map_or(s, |pos| &s[..pos])
}

/// Text after the first occurrence of `pat`, or `""` if absent.
pub fn after<'a>(s: &'a str, pat: &str) -> &'a str {
    s.find(pat).map_or("", |pos| &s[pos + pat.len()..])
}

/// Text after the last occurrence of `pat`, or `""` if absent.
pub fn after_last<'a>(s: &'a str, pat: &str) -> &'a str {
    s.rfind(pat).map_or("", |pos| &s[pos + pat.len()..])
}

/// Split a camelCase identifier into lower-case words: `firstName` → `first name`.
///
/// Every ASCII capital after the first character starts a new word, so
/// acronyms split per letter (`postURL` → `post u r l`).
pub fn camel_to_words(camel: &str) -> String {
    let camel = camel.trim();
    let mut words = Vec::new();
    let mut current = String::new();
    for (i, ch) in camel.chars().enumerate() {
        if i > 0 && ch.is_ascii_uppercase() {
            words.push(current.to_lowercase());
            current.clear();
        }
        current.push(ch);
    }
    words.push(current.to_lowercase());
    words.join(" ")
}

/// [`camel_to_words`] with the first letter capitalized: `firstName` → `First name`.
pub fn camel_to_title(camel: &str) -> String {
    let words = camel_to_words(camel);
    match words.char_indices().find(|(_, c)| c.is_ascii_alphabetic()) {
        Some((pos, first)) => {
            let mut out = String::with_capacity(words.len());
            out.push_str(&words[..pos]);
            out.push(first.to_ascii_uppercase());
            out.push_str(&words[pos + first.len_utf8()..]);
            out
        }
        None => words,
    }
}

/// Strip one leading and one trailing `/`.
pub fn slash_trim(s: &str) -> &str {
    let s = s.strip_prefix('/').unwrap_or(s);
    s.strip_suffix('/').unwrap_or(s)
}

/// Strip one leading `/`.
pub fn slash_trim_left(s: &str) -> &str {
    s.strip_prefix('/').unwrap_or(s)
}

/// Split a slash path into its non-empty parts.
pub fn path_to_array(path: &str) -> Vec<&str> {
    slash_trim(path).split('/').filter(|s| !s.is_empty()).collect()
}

/// Join path fragments with single slashes.
///
/// A leading slash on the first non-empty fragment and a trailing slash on
/// the last one are preserved.
pub fn path_combine(parts: &[&str]) -> String {
    let parts: Vec<&str> = parts.iter().copied().filter(|p| !p.is_empty()).collect();
    let (Some(first), Some(last)) = (parts.first(), parts.last()) else {
        return String::new();
    };
    let start_slash = first.starts_with('/');
    let end_slash = last.ends_with('/');
    let mut joined = parts
        .iter()
        .map(|p| slash_trim(p))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    if start_slash {
        joined.insert(0, '/');
    }
    if end_slash && joined != "/" {
        joined.push('/');
    }
    joined
}

/// Extension after the last `.`, or `""`.
pub fn get_extension(s: &str) -> &str {
    after_last(s, ".")
}

/// First line of `s`, without its line terminator.
pub fn first_line(s: &str) -> &str {
    let line = up_to(s, "\n");
    if line.len() < s.len() {
        line.strip_suffix('\r').unwrap_or(line)
    } else {
        line
    }
}

/// Everything after the first newline. A single-line string is returned whole.
pub fn tail_lines(s: &str) -> &str {
    s.find('\n').map_or(s, |pos| &s[pos + 1..])
}

/// Replace `${path}` placeholders with text taken from `value`.
///
/// `path` uses dotted/bracketed syntax (`owner.name`, `tags[0]`); `${}`
/// stands for the whole value. Missing lookups and falsy values (`null`,
/// `false`, `0`) substitute an empty string, and a fragment with no closing
/// `}` is dropped. A falsy `value` (including `""`) leaves the pattern
/// untouched.
pub fn substitute_properties(pattern: &str, value: &Value) -> String {
    if pattern.is_empty() || is_falsy(value) {
        return pattern.to_string();
    }
    let mut parts = pattern.split("${");
    let mut out = String::from(parts.next().unwrap_or_default());
    for part in parts {
        if !part.contains('}') {
            continue;
        }
        let path = up_to(part, "}");
        let found = if path.is_empty() {
            Some(value)
        } else {
            lookup_dotted(value, path)
        };
        out.push_str(&value_text(found));
        out.push_str(after(part, "}"));
    }
    out
}

fn lookup_dotted<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let normalized = path.replace('[', ".").replace(']', "");
    normalized
        .split('.')
        .filter(|key| !key.is_empty())
        .try_fold(value, |current, key| match current {
            Value::Object(map) => map.get(key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn value_text(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(found) if is_falsy(found) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_substring_variants() {
        assert_eq!(up_to("a/b/c", "/"), "a");
        assert_eq!(up_to("abc", "/"), "abc");
        assert_eq!(up_to_last("a/b/c", "/"), "a/b");
        assert_eq!(up_to_last("abc", "/"), "abc");
        assert_eq!(after("a/b/c", "/"), "b/c");
        assert_eq!(after("abc", "/"), "");
        assert_eq!(after_last("a/b/c", "/"), "c");
        assert_eq!(after_last("abc", "/"), "");
        assert_eq!(after_last("#/properties/name/minLength", "/"), "minLength");
    }

    #[test]
    fn test_camel_to_words() {
        assert_eq!(camel_to_words("firstName"), "first name");
        assert_eq!(camel_to_words("  dateOfBirth "), "date of birth");
        assert_eq!(camel_to_words("Name"), "name");
        assert_eq!(camel_to_words("postURL"), "post u r l");
        assert_eq!(camel_to_words(""), "");
    }

    #[test]
    fn test_camel_to_title() {
        assert_eq!(camel_to_title("firstName"), "First name");
        assert_eq!(camel_to_title("email"), "Email");
        assert_eq!(camel_to_title("_internalId"), "_Internal id");
        assert_eq!(camel_to_title("42"), "42");
    }

    #[test]
    fn test_slash_helpers() {
        assert_eq!(slash_trim("/a/b/"), "a/b");
        assert_eq!(slash_trim("/"), "");
        assert_eq!(slash_trim("//"), "");
        assert_eq!(slash_trim_left("/a/"), "a/");
        assert_eq!(path_to_array("/a//b/"), vec!["a", "b"]);
        assert!(path_to_array("/").is_empty());
    }

    #[test]
    fn test_path_combine() {
        assert_eq!(path_combine(&["/a/", "b", "c/"]), "/a/b/c/");
        assert_eq!(path_combine(&["a", "", "/b"]), "a/b");
        assert_eq!(path_combine(&["/", "/"]), "/");
        assert_eq!(path_combine(&[]), "");
        assert_eq!(path_combine(&["", ""]), "");
    }

    #[test]
    fn test_line_helpers() {
        assert_eq!(get_extension("photo.large.png"), "png");
        assert_eq!(get_extension("README"), "");
        assert_eq!(first_line("one\r\ntwo"), "one");
        assert_eq!(first_line("single"), "single");
        assert_eq!(tail_lines("one\ntwo\nthree"), "two\nthree");
        assert_eq!(tail_lines("single"), "single");
    }

    #[test]
    fn test_substitute_properties() {
        let value = json!({"owner": {"name": "ada"}, "tags": ["x", "y"], "n": 3});
        assert_eq!(
            substitute_properties("/users/${owner.name}/tag-${tags[1]}", &value),
            "/users/ada/tag-y"
        );
        assert_eq!(substitute_properties("n=${n}", &value), "n=3");
        assert_eq!(substitute_properties("missing=${nope}!", &value), "missing=!");
        assert_eq!(substitute_properties("dangling ${owner", &value), "dangling ");
        assert_eq!(substitute_properties("item-${}", &json!("abc")), "item-abc");
        assert_eq!(substitute_properties("${a}", &Value::Null), "${a}");
    }

    #[test]
    fn test_substitute_falsy_values_as_empty() {
        let value = json!({"n": 0, "x": 0.0, "off": false, "on": true, "blank": ""});
        assert_eq!(substitute_properties("n=${n}", &value), "n=");
        assert_eq!(substitute_properties("x=${x}", &value), "x=");
        assert_eq!(substitute_properties("[${off}|${on}]", &value), "[|true]");
        assert_eq!(substitute_properties("b=${blank}", &value), "b=");
        assert_eq!(substitute_properties("row-${}", &json!(0)), "row-${}");
        assert_eq!(substitute_properties("row-${}", &json!("")), "row-${}");
    }
}
