use serde::{Deserialize, Deserializer, Serialize};

/// One classified inquiry as returned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryRecord {
    pub email: String,
    pub category: String,
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inquiry_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inquirer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_message: Option<String>,
}

impl InquiryRecord {
    pub fn new(
        email: impl Into<String>,
        category: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            category: category.into(),
            response: response.into(),
            ..Self::default()
        }
    }
}

/// A previously processed entry from the history endpoint.
///
/// The service returns either per-inquiry rows (`email`, `category`,
/// `response`, `processedAt`) or per-batch rows (`filename`,
/// `totalInquiries`, `createdAt`), so everything except `id` is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub total_inquiries: Option<u64>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub processed_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl HistoryRecord {
    /// Primary label: the inquirer's email, else the batch file name.
    pub fn label(&self) -> &str {
        self.email
            .as_deref()
            .or(self.filename.as_deref())
            .unwrap_or("")
    }

    /// Best available timestamp for display.
    pub fn timestamp(&self) -> Option<&str> {
        self.processed_at
            .as_deref()
            .or(self.created_at.as_deref())
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Int(value) => value.to_string(),
        RawId::Float(value) => value.to_string(),
    })
}
