use serde_json::Value;

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// A `/process` request as received. Presence of each field is checked by
/// the dispatcher, not by the transport layer.
#[derive(Debug, Clone, Default)]
pub struct ProcessCommand {
    pub image: Option<String>,
    pub operation: Option<String>,
    pub params: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditedImage {
    pub image: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub file_name: String,
    pub url: String,
}

impl DownloadLink {
    #[must_use]
    pub fn for_file(file_name: String) -> Self {
        let url = format!("/download/{file_name}");
        Self { file_name, url }
    }
}
