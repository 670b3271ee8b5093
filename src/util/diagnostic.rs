//! User-friendly diagnostic messages.
//!
//! Every error reported to the user names the failing path or package,
//! carries the underlying detail verbatim and suggests a fix.

use std::path::PathBuf;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when a package directory has no manifest.
    pub const NO_MANIFEST: &str =
        "Every package directory needs a `package.json` with at least a `name`";

    /// Suggestion when a manifest does not parse.
    pub const FIX_MANIFEST: &str = "Fix the JSON syntax and check that `name` is a string";

    /// Suggestion when a package is not found.
    pub const PACKAGE_NOT_FOUND: &str = "Run `manifold packages` to see all known packages";

    /// Suggestion when a package lives outside the root.
    pub const EXTRA_PATH: &str =
        "Pass `--path <dir>` or add it to `[packages] extra-paths` in .manifold/config.toml";

    /// Suggestion when an extension is not registered with the host.
    pub const EXTENSION_NOT_REGISTERED: &str =
        "Register the extension with the host's `ExtensionRegistry` before invoking";
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let error = if color { "\x1b[1;31merror\x1b[0m" } else { "error" };

        // Main message
        output.push_str(&format!("{}: {}\n", error, self.message));

        // Location if present
        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        // Context lines
        for ctx in &self.context {
            output.push_str(&format!("  -> {}\n", ctx));
        }

        // Suggestions
        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("could not find package `api-utils`")
            .with_context("required by `addon-kit`")
            .with_suggestion("Check that the package name is spelled correctly")
            .with_suggestion(suggestions::EXTRA_PATH);

        let output = diag.format(false);
        assert!(output.contains("error: could not find package"));
        assert!(output.contains("required by `addon-kit`"));
        assert!(output.contains("consider:"));
        assert!(output.contains("1. Check that the package name"));
        assert!(output.contains("2. Pass `--path <dir>`"));
    }

    #[test]
    fn test_location_is_rendered() {
        let diag = Diagnostic::error("malformed `package.json`").with_location("/pkgs/a/package.json");

        let output = diag.format(false);
        assert!(output.starts_with("error: malformed"));
        assert!(output.contains("--> /pkgs/a/package.json"));

        let colored = diag.format(true);
        assert!(colored.starts_with("\x1b[1;31merror\x1b[0m: malformed"));
    }
}
