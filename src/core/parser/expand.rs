//! Variable expansion inside a single token.
//!
//! Handles `$VAR` and `${VAR}`. Unknown variables, a bare `$`, and an
//! unclosed `${` are kept verbatim.

/// Result of reading a variable reference after `$`
enum VariableRead {
    /// Variable name and the source text it was read from (`VAR` or `{VAR}`)
    Name { name: String, raw: String },
    /// Nothing usable after `$` (including `${}`)
    Empty { raw: String },
    /// `${...` without closing `}`
    UnclosedBrace(String),
}

/// Expand every variable reference in `token` using `lookup`.
pub fn expand_vars<F>(token: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if !token.contains('$') {
        return token.to_string();
    }

    let mut result = String::with_capacity(token.len());
    let mut rest = token;

    while let Some(idx) = rest.find('$') {
        result.push_str(&rest[..idx]);
        let (read, consumed) = read_variable(&rest[idx + 1..]);
        match read {
            VariableRead::Name { name, raw } => match lookup(&name) {
                Some(value) => result.push_str(&value),
                None => {
                    result.push('$');
                    result.push_str(&raw);
                }
            },
            VariableRead::Empty { raw } => {
                result.push('$');
                result.push_str(&raw);
            }
            VariableRead::UnclosedBrace(partial) => {
                result.push_str("${");
                result.push_str(&partial);
            }
        }
        rest = &rest[idx + 1 + consumed..];
    }

    result.push_str(rest);
    result
}

/// Read a variable reference from the text following `$`.
///
/// Returns what was read and how many bytes it consumed.
fn read_variable(input: &str) -> (VariableRead, usize) {
    if let Some(after_brace) = input.strip_prefix('{') {
        return match after_brace.find('}') {
            Some(end) => {
                let name = &after_brace[..end];
                let raw = format!("{{{}}}", name);
                let read = if name.is_empty() {
                    VariableRead::Empty { raw }
                } else {
                    VariableRead::Name {
                        name: name.to_string(),
                        raw,
                    }
                };
                (read, end + 2)
            }
            None => (
                VariableRead::UnclosedBrace(after_brace.to_string()),
                input.len(),
            ),
        };
    }

    let end = input
        .char_indices()
        .find(|(_, c)| !c.is_ascii_alphanumeric() && *c != '_')
        .map(|(i, _)| i)
        .unwrap_or(input.len());

    if end == 0 {
        (VariableRead::Empty { raw: String::new() }, 0)
    } else {
        let name = input[..end].to_string();
        (
            VariableRead::Name {
                raw: name.clone(),
                name,
            },
            end,
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
