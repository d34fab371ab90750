/// Split a `location.search` string into `(key, value)` pairs.
///
/// A leading `?` is ignored, empty segments are skipped and a key without
/// `=` maps to an empty value. `+` is read as a space; percent escapes are
/// not decoded since every recognised value is plain ASCII.
pub fn parse_query(search: &str) -> Vec<(String, String)> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter(|seg| !seg.is_empty())
        .map(|seg| {
            let (k, v) = seg.split_once('=').unwrap_or((seg, ""));
            (k.replace('+', " "), v.replace('+', " "))
        })
        .collect()
}
