/// Converts a user-entered display name into a program identifier.
///
/// Blank names fall back to `agent_<position + 1>`.
pub fn resolve(display_name: &str, position: usize) -> String {
    resolve_with_prefix(display_name, position, "agent")
}

/// Like [`resolve`], with a custom fallback prefix for blank names.
pub fn resolve_with_prefix(display_name: &str, position: usize, prefix: &str) -> String {
    let trimmed = display_name.trim();
    if trimmed.is_empty() {
        return fallback(prefix, position);
    }

    let snake = to_snake_case(trimmed);
    let ident: String = snake
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    match ident.chars().next() {
        None => fallback(prefix, position),
        Some(c) if c.is_ascii_digit() => format!("{}_{}", prefix, ident),
        Some(_) => ident,
    }
}

/// Appends `_<suffix>` while `ident` equals one of the `reserved` names.
pub fn avoid_reserved(mut ident: String, reserved: &[impl AsRef<str>], suffix: &str) -> String {
    while reserved.iter().any(|name| name.as_ref() == ident) {
        ident.push('_');
        ident.push_str(suffix);
    }
    ident
}

fn fallback(prefix: &str, position: usize) -> String {
    format!("{}_{}", prefix, position + 1)
}

/// Splits lower-to-upper boundaries and collapses whitespace/hyphen runs into `_`.
fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut previous: Option<char> = None;
    let mut in_separator = false;

    for c in name.chars() {
        if c.is_whitespace() || c == '-' {
            if !in_separator {
                out.push('_');
                in_separator = true;
            }
            previous = Some(c);
            continue;
        }
        in_separator = false;
        if c.is_uppercase() && previous.is_some_and(char::is_lowercase) {
            out.push('_');
        }
        out.extend(c.to_lowercase());
        previous = Some(c);
    }

    out
}
