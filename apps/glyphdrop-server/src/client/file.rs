//! Selected files and drag-and-drop events

use std::path::Path;

use bytes::Bytes;

/// A file picked by the user or dropped onto the page
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    /// Declared MIME type; empty when the source declared none
    pub mime_type: String,
    pub bytes: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, deriving the MIME type from its extension
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or_default()
            .to_string();

        Ok(Self::new(name, mime_type, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A drag-over event on the drop zone
#[derive(Debug, Default)]
pub struct DragEvent {
    default_prevented: bool,
}

impl DragEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// A drop event carrying zero or more files
#[derive(Debug, Default)]
pub struct DropEvent {
    files: Vec<SelectedFile>,
    default_prevented: bool,
}

impl DropEvent {
    pub fn new(files: Vec<SelectedFile>) -> Self {
        Self {
            files,
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Take the first dropped file, if any
    pub fn take_first(&mut self) -> Option<SelectedFile> {
        if self.files.is_empty() {
            None
        } else {
            Some(self.files.remove(0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_from_path_guesses_mime() {
        let mut tmp = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        tmp.write_all(b"\x89PNG").unwrap();

        let file = SelectedFile::from_path(tmp.path()).await.unwrap();

        assert_eq!(file.mime_type, "image/png");
        assert_eq!(file.len(), 4);
        assert!(file.name.ends_with(".png"));
    }

    #[tokio::test]
    async fn test_from_path_unknown_extension() {
        let tmp = tempfile::Builder::new().suffix(".glyphdrop-unknown").tempfile().unwrap();

        let file = SelectedFile::from_path(tmp.path()).await.unwrap();

        assert_eq!(file.mime_type, "");
        assert!(file.is_empty());
    }

    #[test]
    fn test_clone_shares_buffer() {
        let file = SelectedFile::new("hello.png", "image/png", Bytes::from_static(b"\x89PNG"));
        let copy = file.clone();

        assert_eq!(copy.bytes.as_ptr(), file.bytes.as_ptr());
        assert_eq!(copy, file);
    }

    #[test]
    fn test_drop_takes_first_file() {
        let mut event = DropEvent::new(vec![
            SelectedFile::new("a.png", "image/png", b"a".to_vec()),
            SelectedFile::new("b.png", "image/png", b"b".to_vec()),
        ]);

        assert_eq!(event.take_first().unwrap().name, "a.png");
    }
}
