//! Splitting a prompt file into YAML frontmatter and markdown body.

use super::PromptConfig;
use crate::error::{AirError, Result};

const OPENING: &str = "---\n";
const CLOSING: &str = "\n---\n";

/// Split `content` into its frontmatter config and body.
///
/// Line endings are normalized to `\n` first. Content that does not start
/// with `---` is all body and gets the default config. With frontmatter the
/// body is trimmed; the closing `---` may also be the last line of input.
pub fn parse_frontmatter(content: &str) -> Result<(PromptConfig, String)> {
    let normalized = content.replace("\r\n", "\n");

    let Some(rest) = normalized.strip_prefix(OPENING) else {
        return Ok((PromptConfig::default(), normalized));
    };

    let (yaml, body) = split_closing(rest).ok_or_else(|| {
        AirError::ConfigError("invalid frontmatter: missing closing ---".to_string())
    })?;

    let config = PromptConfig::from_yaml(yaml)?;
    Ok((config, body.trim().to_string()))
}

/// Return `(yaml, body)` split at the closing delimiter.
fn split_closing(rest: &str) -> Option<(&str, &str)> {
    // Empty frontmatter: the closing delimiter directly follows the opening one.
    if let Some(body) = rest.strip_prefix(OPENING) {
        return Some(("", body));
    }
    if rest == "---" {
        return Some(("", ""));
    }

    if let Some(pos) = rest.find(CLOSING) {
        return Some((&rest[..pos], &rest[pos + CLOSING.len()..]));
    }

    rest.strip_suffix("\n---").map(|yaml| (yaml, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_frontmatter_returns_content_unchanged() {
        let (config, body) = parse_frontmatter("  Plain prompt\n").unwrap();
        assert_eq!(config, PromptConfig::default());
        assert_eq!(body, "  Plain prompt\n");
    }

    #[test]
    fn test_frontmatter_and_trimmed_body() {
        let content = "---\ntemperature: 0.5\nmodel: gemini-1.5-pro-001\n---\n\nHello {{name}}\n\n";
        let (config, body) = parse_frontmatter(content).unwrap();

        assert_eq!(config.temperature, Some(0.5));
        assert_eq!(config.model.as_deref(), Some("gemini-1.5-pro-001"));
        assert_eq!(body, "Hello {{name}}");
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "---\r\ntopP: 0.8\r\n---\r\nBody line\r\nsecond";
        let (config, body) = parse_frontmatter(content).unwrap();

        assert_eq!(config.top_p, Some(0.8));
        assert_eq!(body, "Body line\nsecond");
    }

    #[test]
    fn test_empty_frontmatter() {
        let (config, body) = parse_frontmatter("---\n---\nJust body").unwrap();
        assert_eq!(config, PromptConfig::default());
        assert_eq!(body, "Just body");
    }

    #[test]
    fn test_closing_delimiter_at_end_of_input() {
        let (config, body) = parse_frontmatter("---\nmaxTokens: 100\n---").unwrap();
        assert_eq!(config.max_tokens, Some(100));
        assert_eq!(body, "");
    }

    #[test]
    fn test_missing_closing_delimiter() {
        let err = parse_frontmatter("---\nmodel: x\nno closing").unwrap_err();
        assert!(matches!(err, AirError::ConfigError(_)));
        assert!(err.to_string().contains("missing closing ---"));
    }

    #[test]
    fn test_invalid_yaml_is_a_config_error() {
        let err = parse_frontmatter("---\ninvalid: yaml: content:\n---\nPrompt text").unwrap_err();
        assert!(matches!(err, AirError::ConfigError(_)));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = parse_frontmatter("---\nmodel: gpt-4\n---\nPrompt").unwrap_err();
        assert!(err.to_string().contains("unsupported model: gpt-4"));
    }

    #[test]
    fn test_body_may_contain_horizontal_rules() {
        let content = "---\nmodel: gemini-2.0-flash-001\n---\nIntro\n---\nOutro";
        let (_, body) = parse_frontmatter(content).unwrap();
        assert_eq!(body, "Intro\n---\nOutro");
    }
}
