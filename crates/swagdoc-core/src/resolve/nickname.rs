use crate::tree::HttpMethod;

/// Derive the operation nickname from a method and a dispatch pattern.
///
/// Every structural character is replaced by `-` and runs are kept as they
/// are, so two different patterns never sanitize to the same identifier:
/// `GET /something(.:format)` becomes `GET-something---format-`.
pub fn nickname(method: HttpMethod, pattern: &str) -> String {
    let mut out = String::with_capacity(method.as_str().len() + pattern.len());
    out.push_str(method.as_str());
    out.extend(pattern.chars().map(|c| match c {
        '/' | ':' | '(' | ')' | '.' | '{' | '}' => '-',
        other => other,
    }));
    out
}
