use serde::{Deserialize, Serialize};

/// Handle to an in-memory binary held by the UI layer (e.g. a browser `File`).
///
/// The contracts crate never touches the bytes; the frontend resolves the key
/// when it builds the multipart body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlobKey(pub u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub key: BlobKey,
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

impl UploadedFile {
    /// Lower-cased extension taken from the file name.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_lowercase())
    }
}

/// Content of a file slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FileValue {
    #[default]
    None,
    /// Already stored on the backend; only a display marker is kept.
    Stored { marker: String },
    /// New binary waiting to be uploaded.
    Upload(UploadedFile),
}

impl FileValue {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn display_name(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::Stored { marker } => marker.rsplit('/').next().unwrap_or(marker).to_string(),
            Self::Upload(file) => file.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileAttachment {
    pub file_type_id: Option<i64>,
    pub file_cabinet_id: Option<i64>,
    pub file_description: String,
    pub file_attachment: FileValue,
    /// Backend id of the stored file this row replaces or keeps (edit mode).
    pub original_file_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension() {
        let file = UploadedFile {
            key: BlobKey(1),
            name: "Scan.Final.PDF".into(),
            mime_type: "application/pdf".into(),
            size: 10,
        };
        assert_eq!(file.extension().as_deref(), Some("pdf"));

        let hidden = UploadedFile { name: ".env".into(), ..file.clone() };
        assert_eq!(hidden.extension(), None);
        let bare = UploadedFile { name: "README".into(), ..file };
        assert_eq!(bare.extension(), None);
    }

    #[test]
    fn test_stored_display_name() {
        let stored = FileValue::Stored { marker: "uploads/2024/nbi.pdf".into() };
        assert_eq!(stored.display_name(), "nbi.pdf");
    }
}
