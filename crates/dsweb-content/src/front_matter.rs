//! YAML front matter parsing.
//!
//! Front matter is a YAML block at the very top of a markdown file, fenced
//! by `---` lines.

use serde::Deserialize;

/// Front matter fields the build understands. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub draft: bool,
    /// Explicit URL overriding the file-derived slug.
    pub permalink: Option<String>,
    redirect_from: Option<OneOrMany>,
    #[serde(alias = "deepstreamVersion")]
    pub version: Option<String>,
    #[serde(alias = "deepstreamHub")]
    pub hub: bool,
}

/// `redirect_from` accepts a single path or a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl FrontMatter {
    /// Parse front matter from YAML content.
    ///
    /// Empty content returns a default instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(trimmed)
    }

    /// Redirect sources declared with `redirect_from`.
    #[must_use]
    pub fn redirect_from(&self) -> Vec<String> {
        match &self.redirect_from {
            Some(OneOrMany::One(path)) => vec![path.clone()],
            Some(OneOrMany::Many(paths)) => paths.clone(),
            None => Vec::new(),
        }
    }
}

/// Split a markdown document into its front matter block and body.
///
/// Returns `(None, text)` when the document does not open with a `---`
/// fence or the fence is never closed.
///
/// ```
/// use dsweb_content::split_front_matter;
///
/// let (yaml, body) = split_front_matter("---\ntitle: A\n---\nBody");
/// assert_eq!(yaml, Some("title: A\n"));
/// assert_eq!(body, "Body");
/// ```
#[must_use]
pub fn split_front_matter(text: &str) -> (Option<&str>, &str) {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let Some(rest) = text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))
    else {
        return (None, text);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let body = &rest[offset + line.len()..];
            return (Some(&rest[..offset]), body);
        }
        offset += line.len();
    }

    (None, text)
}
