//! Heuristic rewrites for almost-JSON.
//!
//! The rewrites are textual. String literals are only tracked within the
//! line that ends at a candidate break. They act on line boundaries between
//! two tokens and on separators right before a closing delimiter, which
//! keeps well-formed pretty-printed JSON untouched.

use once_cell::sync::Lazy;
use regex::Regex;

/// A value-ending token followed by a line break.
static TOKEN_BEFORE_LINE_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([\w\]}"])[ \t]*\r?\n"#).expect("line break pattern is valid")
});

/// A quoted key and its colon at the start of the remaining text.
static KEY_AHEAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^"(?:[^"\\\r\n]|\\.)*"\s*:"#).expect("key pattern is valid")
});

static TRAILING_SEPARATOR_BEFORE_ARRAY_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",(\s*)\]").expect("array close pattern is valid"));

static TRAILING_SEPARATOR_BEFORE_OBJECT_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",(\s*)\}").expect("object close pattern is valid"));

/// Applies every rewrite once, in order.
pub fn repair(fragment: &str) -> String {
    let text = separate_bare_tokens(fragment);
    let text = separate_keys(&text);
    let text = TRAILING_SEPARATOR_BEFORE_ARRAY_CLOSE.replace_all(&text, "$1]");
    let text = TRAILING_SEPARATOR_BEFORE_OBJECT_CLOSE.replace_all(&text, "$1}");
    text.into_owned()
}

/// `1\n2`, `"a"\n"b"`, `}\n{`: a value on the next line that is not a key.
fn separate_bare_tokens(text: &str) -> String {
    insert_separators(text, |next| match next.chars().next() {
        Some('"') => !KEY_AHEAD.is_match(next),
        Some(c) => c.is_alphanumeric() || matches!(c, '_' | '-' | '{' | '['),
        None => false,
    })
}

/// `"Q1"\n"answer":`: a key on the next line.
fn separate_keys(text: &str) -> String {
    insert_separators(text, |next| KEY_AHEAD.is_match(next))
}

/// Inserts `,` right after every token that ends a line when the first
/// non-blank text of the following lines satisfies `accepts`.
fn insert_separators(text: &str, accepts: impl Fn(&str) -> bool) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut copied = 0;

    for caps in TOKEN_BEFORE_LINE_BREAK.captures_iter(text) {
        let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if token.as_str() == "\"" && !is_closing_quote(&text[..token.start()]) {
            continue;
        }
        if !accepts(text[whole.end()..].trim_start()) {
            continue;
        }
        out.push_str(&text[copied..token.end()]);
        out.push(',');
        copied = token.end();
    }

    out.push_str(&text[copied..]);
    out
}

/// Whether a quote right after `before` closes a string.
///
/// JSON strings cannot span lines, so only the unescaped quotes earlier on
/// the same line decide it.
fn is_closing_quote(before: &str) -> bool {
    let line = before.rsplit('\n').next().unwrap_or(before);
    let mut inside = false;
    let mut escaped = false;

    for c in line.chars() {
        match c {
            _ if escaped => escaped = false,
            '\\' if inside => escaped = true,
            '"' => inside = !inside,
            _ => {}
        }
    }

    inside && !escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn parses(text: &str) -> bool {
        serde_json::from_str::<Value>(text).is_ok()
    }

    #[test]
    fn inserts_separator_between_quoted_fields_on_separate_lines() {
        let broken = "{\"question\": \"Q1\"\n\"answer\": \"A1\"}";
        assert!(!parses(broken));

        let repaired = repair(broken);
        assert_eq!(repaired, "{\"question\": \"Q1\",\n\"answer\": \"A1\"}");
        assert!(parses(&repaired));
    }

    #[test]
    fn inserts_separator_between_bare_tokens() {
        let repaired = repair("[1\n2\n3]");
        assert_eq!(repaired, "[1,\n2,\n3]");
    }

    #[test]
    fn inserts_separator_between_bare_value_and_key() {
        let repaired = repair("{\n  \"week\": 1\n  \"days\": []\n}");
        assert!(parses(&repaired));
        assert_eq!(repaired, "{\n  \"week\": 1,\n  \"days\": []\n}");
    }

    #[test]
    fn inserts_separator_between_string_items() {
        let repaired = repair("{\"tips\": [\n\"Sleep\"\n\"Review\"\n]}");
        assert!(parses(&repaired));
    }

    #[test]
    fn inserts_separator_between_objects() {
        let repaired = repair("[\n{\"a\": 1}\n{\"a\": 2}\n]");
        assert!(parses(&repaired));
    }

    #[test]
    fn removes_trailing_separators() {
        assert_eq!(repair("[1, 2, ]"), "[1, 2 ]");
        assert_eq!(repair("{\"a\": 1,\n}"), "{\"a\": 1\n}");
    }

    #[test]
    fn leaves_pretty_printed_json_untouched() {
        let value = serde_json::json!({
            "title": "Plano",
            "schedule": [{"week": 1, "days": [{"day": "Segunda-feira", "hours": 2}]}],
            "tips": ["a", "b"],
            "done": true,
            "empty": ""
        });
        let pretty = serde_json::to_string_pretty(&value).unwrap();
        assert_eq!(repair(&pretty), pretty);
    }

    #[test]
    fn handles_non_ascii_words() {
        let repaired = repair("{\"subject\": \"Matemática\"\n\"hours\": 2}");
        assert!(parses(&repaired));
    }

    #[test]
    fn ignores_opening_quotes_before_line_breaks() {
        assert!(!is_closing_quote("{\"a\": "));
        assert!(!is_closing_quote("["));
        assert!(is_closing_quote("\"abc"));
        assert!(is_closing_quote("\""));
    }

    #[test]
    fn closing_quote_is_judged_by_quotes_on_the_same_line() {
        assert!(is_closing_quote("{\"question\": \"Complete a frase:"));
        assert!(is_closing_quote("{\"question\": \"Q1 "));
        assert!(is_closing_quote("\"earlier\",\n  \"say \\\"hi\\\" "));
        assert!(!is_closing_quote("{\"a\": \"b\",\n  \"c\": "));
        assert!(!is_closing_quote("\"abc\\"));
    }

    #[test]
    fn inserts_separator_after_value_ending_in_colon() {
        let broken = "{\"flashcards\":[{\"question\":\"Complete a frase:\"\n\"answer\":\"A1\"}]}";
        let repaired = repair(broken);
        assert_eq!(
            repaired,
            "{\"flashcards\":[{\"question\":\"Complete a frase:\",\n\"answer\":\"A1\"}]}"
        );
        assert!(parses(&repaired));
    }

    #[test]
    fn inserts_separator_after_value_ending_in_space() {
        let repaired = repair("{\"flashcards\":[{\"question\":\"Q1 \"\n\"answer\":\"A1\"}]}");
        assert!(parses(&repaired));
    }

    #[test]
    fn repairing_twice_changes_nothing_more_for_targeted_patterns() {
        let once = repair("{\"a\": 1\n\"b\": [1\n2,]}");
        assert_eq!(repair(&once), once);
        assert!(parses(&once));
    }
}
