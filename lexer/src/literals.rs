/// Parse the text of a numeric literal (`digits` or `digits.digits`).
///
/// The scanner only hands over text matching that shape, so `None` means the
/// scanner and this function disagree about what a numeral is.
pub fn parse_number_literal(text: &str) -> Option<f64> {
    if text.is_empty() || text.starts_with('.') || text.ends_with('.') {
        return None;
    }
    text.parse::<f64>().ok()
}

/// Unescape the body of a string literal: `""` stands for one `"`.
pub fn unescape_string_body(body: &str) -> String {
    body.replace("\"\"", "\"")
}
