//! Text normalization shared by token matching.

use std::sync::LazyLock;

use regex::Regex;

/// One or more characters that are not letters, decimal digits or underscores.
/// Unlike `\W`, combining marks, `‿` and ZWJ count as separators here.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{Nd}_]+").expect("valid regex"));

/// Collapses every run of non-word characters into a single space and lowercases.
///
/// `None` is treated as empty text. The output only contains lowercase letters,
/// digits, underscores and single spaces, so `normalize(Some(&normalize(x))) == normalize(x)`.
pub fn normalize(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };
    let lowered = NON_WORD.replace_all(text, " ").to_lowercase();
    // lowercasing can emit combining marks (`İ` becomes `i\u{307}`)
    NON_WORD.replace_all(&lowered, " ").into_owned()
}
