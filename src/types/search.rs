use std::collections::HashMap;

/// Filters accepted by `GET /questions/search`. Both are optional and combine
/// with AND.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct SearchParams {
    /// Exact match on the question category.
    pub category: Option<String>,
    /// Case-insensitive substring of the title or the description.
    pub keywords: Option<String>,
}

/// Extract search filters from the query string.
/// # Example query
/// GET requests to this route can have a query string attached.
/// `/questions/search?category=Geography&keywords=capital`
/// Blank values are treated as if the parameter was not sent. Anything else
/// is kept as sent, surrounding spaces included.
pub fn extract_search(params: HashMap<String, String>) -> SearchParams {
    let non_empty = |key: &str| {
        params
            .get(key)
            .filter(|value| !value.trim().is_empty())
            .cloned()
    };

    SearchParams {
        category: non_empty("category"),
        keywords: non_empty("keywords"),
    }
}

/// Build an `ILIKE` pattern matching `keywords` anywhere in a column. LIKE
/// wildcards in the input are escaped so they match literally.
pub fn substring_pattern(keywords: &str) -> String {
    let mut pattern = String::with_capacity(keywords.len() + 2);
    pattern.push('%');
    for c in keywords.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
