//! Command line parsing with variable expansion.
//!
//! Lines are split purely on whitespace (no quoting), then every token,
//! including the command name, goes through `$VAR` / `${VAR}` expansion.

mod expand;

pub use expand::expand_vars;

/// A command name and its arguments after expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

/// Split `input` into tokens and expand variables using `lookup`.
///
/// Returns `None` for a blank line.
pub fn parse_input<F>(input: &str, lookup: F) -> Option<ParsedCommand>
where
    F: Fn(&str) -> Option<String>,
{
    let mut tokens = input
        .split_whitespace()
        .map(|token| expand_vars(token, &lookup));

    let name = tokens.next()?;
    Some(ParsedCommand {
        name,
        args: tokens.collect(),
    })
}

/// Look up a variable in the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn no_vars(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_parse_simple() {
        let parsed = parse_input("ls", no_vars).unwrap();
        assert_eq!(parsed.name, "ls");
        assert!(parsed.args.is_empty());
    }

    #[test]
    fn test_parse_args_whitespace() {
        let parsed = parse_input("  chown   -R\tbob  dir ", no_vars).unwrap();
        assert_eq!(parsed.name, "chown");
        assert_eq!(parsed.args, vec!["-R", "bob", "dir"]);
    }

    #[test]
    fn test_parse_blank() {
        assert!(parse_input("", no_vars).is_none());
        assert!(parse_input("   \t ", no_vars).is_none());
    }

    #[test]
    fn test_no_quoting() {
        let parsed = parse_input("touch \"a b\"", no_vars).unwrap();
        assert_eq!(parsed.args, vec!["\"a", "b\""]);
    }

    #[test]
    fn test_command_name_expanded() {
        let lookup = |name: &str| (name == "CMD").then(|| "pwd".to_string());
        let parsed = parse_input("$CMD extra", lookup).unwrap();
        assert_eq!(parsed.name, "pwd");
        assert_eq!(parsed.args, vec!["extra"]);
    }

    #[test]
    fn test_expanded_value_stays_one_token() {
        let lookup = |name: &str| (name == "SPACED").then(|| "a b".to_string());
        let parsed = parse_input("cd $SPACED", lookup).unwrap();
        assert_eq!(parsed.args, vec!["a b"]);
    }

    #[test]
    fn test_process_env_lookup() {
        assert!(process_env("VFSH_SURELY_UNSET_VARIABLE_1234").is_none());
        assert!(process_env("PATH").is_some());
    }
}
