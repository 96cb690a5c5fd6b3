/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Derive a URL-safe slug from a display name.
///
/// Lower-cases the input, collapses every run of characters outside
/// `[a-z0-9]` into a single hyphen and trims hyphens at both ends.
/// Non-ASCII letters count as separators.
///
/// ```
/// assert_eq!(shared::util::slugify("Pressed-Flower Resin!"), "pressed-flower-resin");
/// ```
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for c in input.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// A slug is valid when it is non-empty and already in canonical form.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slugify(slug) == slug
}
