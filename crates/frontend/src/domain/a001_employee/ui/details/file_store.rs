use contracts::domain::a001_employee::{BlobKey, UploadedFile};
use leptos::prelude::*;
use std::collections::HashMap;

/// Browser `File`s picked in the wizard, addressed by [`BlobKey`].
///
/// The form state only carries the key and metadata; the multipart encoder
/// resolves the key back to the `File` when the request is built.
#[derive(Clone, Copy)]
pub struct FileStore {
    files: StoredValue<HashMap<BlobKey, web_sys::File>, LocalStorage>,
    next_key: StoredValue<u32>,
}

impl FileStore {
    pub fn new() -> Self {
        Self {
            files: StoredValue::new_local(HashMap::new()),
            next_key: StoredValue::new(1),
        }
    }

    /// Keep `file` and describe it for the form.
    pub fn insert(&self, file: web_sys::File) -> UploadedFile {
        let key = BlobKey(self.next_key.get_value());
        self.next_key.update_value(|k| *k += 1);
        let uploaded = UploadedFile {
            key,
            name: file.name(),
            mime_type: file.type_(),
            size: file.size() as u64,
        };
        self.files.update_value(|files| {
            files.insert(key, file);
        });
        uploaded
    }

    pub fn get(&self, key: BlobKey) -> Option<web_sys::File> {
        self.files.with_value(|files| files.get(&key).cloned())
    }

    /// Drop every held file. Called when a wizard session ends.
    pub fn clear(&self) {
        self.files.update_value(|files| files.clear());
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_file_store() -> FileStore {
    use_context::<FileStore>().expect("FileStore not provided in context")
}
