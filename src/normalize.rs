//! Folder name normalization.
//!
//! Turns a raw group key such as `"Wait For It???"` into a lowercase,
//! dash-separated folder name (`"wait-for-it?"`). Only ASCII letters, digits,
//! dashes and a single trailing terminal symbol survive.
//!
//! # Examples
//!
//! ```
//! use prefixtidy::normalize::normalize_group_name;
//!
//! assert_eq!(normalize_group_name("  My Folder  "), "my-folder");
//! assert_eq!(normalize_group_name("Proj@ct!"), "projct!");
//! assert_eq!(normalize_group_name(" Série_01 (Completa)"), "srie-01-completa");
//! ```

/// Symbols that may survive normalization, but only at the very end.
pub const TERMINAL_SYMBOLS: &[char] = &['!', '?', '+'];

fn is_terminal_symbol(c: char) -> bool {
    TERMINAL_SYMBOLS.contains(&c)
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || is_terminal_symbol(c)
}

/// Collapses every run of consecutive dashes into a single dash.
fn collapse_dashes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }
    out
}

/// Normalizes a raw group key into a filesystem-friendly folder name.
///
/// Steps, in order:
/// 1. trim surrounding whitespace
/// 2. spaces and underscores become dashes
/// 3. runs of dashes collapse to one
/// 4. everything except ASCII letters, digits, dashes and `! ? +` is deleted
/// 5. a terminal symbol is kept once, and only if it is the final character
///    once trailing dashes are gone; all other terminal symbols are dropped
/// 6. trailing dashes are stripped
/// 7. the result is lowercased
///
/// The function is idempotent. It can return an empty string when the key
/// contains nothing that survives.
pub fn normalize_group_name(raw: &str) -> String {
    let dashed: String = raw
        .trim()
        .chars()
        .map(|c| if c == ' ' || c == '_' { '-' } else { c })
        .collect();

    let filtered: String = collapse_dashes(&dashed)
        .chars()
        .filter(|&c| is_allowed(c))
        .collect();

    // Deleting characters can leave dashes next to each other again.
    let filtered = collapse_dashes(&filtered);
    let filtered = filtered.trim_end_matches('-');

    let terminal = filtered.chars().last().filter(|&c| is_terminal_symbol(c));
    let body = match terminal {
        Some(symbol) => filtered.trim_end_matches(symbol),
        None => filtered,
    };

    let body: String = body.chars().filter(|&c| !is_terminal_symbol(c)).collect();
    let mut name = collapse_dashes(&body).trim_end_matches('-').to_string();
    if let Some(symbol) = terminal {
        name.push(symbol);
    }

    name.to_ascii_lowercase()
}
