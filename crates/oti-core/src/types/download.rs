use serde::{Deserialize, Serialize};

/// Screenshot resolution accepted by `download/screenshot`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Full resolution
    #[default]
    High,
    /// Reduced resolution
    Medium,
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
        }
    }
}

/// A forensics artifact downloaded for a scan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Artifact {
    /// Suggested file name, without extension
    pub name: String,

    /// Content type or extension hint (`jpeg`, `html`, `txt`)
    pub content_type: String,

    /// Base64 encoded payload
    pub base64: String,
}

/// `scData` of `download/screenshot`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotData {
    /// Base64 encoded image
    #[serde(default)]
    pub sc_base64: String,
    /// File name
    #[serde(default)]
    pub sc_name: String,
    /// Image type
    #[serde(default)]
    pub sc_content_type: String,
}

/// `htmlData` of `download/html`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlData {
    /// Base64 encoded page source
    #[serde(default)]
    pub html_base64: String,
    /// File name
    #[serde(default)]
    pub html_name: String,
    /// Content type; the service spells the key `htmlContenType`
    #[serde(default, alias = "htmlContenType")]
    pub html_content_type: String,
}

/// `textData` of `download/text`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextData {
    /// Base64 encoded rendered text
    #[serde(default)]
    pub text_base64: String,
    /// File name
    #[serde(default)]
    pub text_name: String,
}

impl From<ScreenshotData> for Artifact {
    fn from(data: ScreenshotData) -> Self {
        Self {
            name: data.sc_name,
            content_type: data.sc_content_type,
            base64: data.sc_base64,
        }
    }
}

impl From<HtmlData> for Artifact {
    fn from(data: HtmlData) -> Self {
        Self {
            name: data.html_name,
            content_type: if data.html_content_type.is_empty() {
                "html".to_string()
            } else {
                data.html_content_type
            },
            base64: data.html_base64,
        }
    }
}

impl From<TextData> for Artifact {
    fn from(data: TextData) -> Self {
        Self {
            name: data.text_name,
            content_type: "txt".to_string(),
            base64: data.text_base64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_misspelled_key() {
        let data: HtmlData = serde_json::from_value(serde_json::json!({
            "htmlBase64": "dGVzdA==",
            "htmlName": "Webpage-html",
            "htmlContenType": "html"
        }))
        .unwrap();

        let artifact = Artifact::from(data);
        assert_eq!(artifact.content_type, "html");
        assert_eq!(artifact.name, "Webpage-html");
    }
}
