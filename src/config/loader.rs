//! Token file loading from disk.
//!
//! The server profile keeps its upstream credential in a small YAML file
//! (`config.yaml` by default):
//!
//! ```yaml
//! NETLIFY_API_TOKEN: your_token_here
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::auth::token::TokenError;

/// Deserialized shape of the token file. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct TokenFile {
    #[serde(rename = "NETLIFY_API_TOKEN", default)]
    pub netlify_api_token: Option<String>,
}

/// Read and parse the YAML token file.
pub fn load_token_file(path: &Path) -> Result<TokenFile, TokenError> {
    let file = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| TokenError::Unreadable {
        file: file.clone(),
        reason: e.to_string(),
    })?;

    if content.trim().is_empty() {
        return Ok(TokenFile::default());
    }

    serde_yaml::from_str(&content).map_err(|e| TokenError::Invalid {
        file,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_has_no_token() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let parsed = load_token_file(file.path()).unwrap();
        assert!(parsed.netlify_api_token.is_none());
    }

    #[test]
    fn test_ignores_unknown_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# comment\nPORT: 4000\nNETLIFY_API_TOKEN: \"abc\"").unwrap();
        let parsed = load_token_file(file.path()).unwrap();
        assert_eq!(parsed.netlify_api_token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_non_mapping_is_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "- just\n- a list").unwrap();
        assert!(matches!(
            load_token_file(file.path()),
            Err(TokenError::Invalid { .. })
        ));
    }
}
