//! Audio file inputs for transcription and translation uploads.

use std::fmt;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::core::{FilePart, LlmError};

/// Extensions accepted for uploads. Matching is exact and case-sensitive.
pub const ACCEPTED_AUDIO_EXTENSIONS: [&str; 9] = [
    ".mp3", ".mp4", ".mpeg", ".mpga", ".m4a", ".webm", ".wav", ".flac", ".ogg",
];

pub type AudioReader = Box<dyn AsyncRead + Send + Unpin>;

/// A caller-owned file that knows its name and can be opened for reading.
#[async_trait]
pub trait UploadHandle: Send + Sync {
    fn file_name(&self) -> &str;

    async fn open(&self) -> io::Result<AudioReader>;
}

/// An [`UploadHandle`] over bytes already in memory.
#[derive(Debug, Clone)]
pub struct InMemoryUpload {
    file_name: String,
    content: Bytes,
}

impl InMemoryUpload {
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }
}

#[async_trait]
impl UploadHandle for InMemoryUpload {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    async fn open(&self) -> io::Result<AudioReader> {
        Ok(Box::new(Cursor::new(self.content.clone())))
    }
}

/// Where the audio of an upload comes from.
pub enum FileInput {
    Handle(Box<dyn UploadHandle>),
    /// A path on the local filesystem; the upload is named after its last component.
    Path(PathBuf),
    /// An already open reader. A file name is required to pick the format.
    Stream {
        reader: AudioReader,
        file_name: String,
    },
}

impl FileInput {
    pub fn handle(handle: impl UploadHandle + 'static) -> Self {
        FileInput::Handle(Box::new(handle))
    }

    pub fn path(path: impl Into<PathBuf>) -> Self {
        FileInput::Path(path.into())
    }

    pub fn stream(reader: impl AsyncRead + Send + Unpin + 'static, file_name: impl Into<String>) -> Self {
        FileInput::Stream {
            reader: Box::new(reader),
            file_name: file_name.into(),
        }
    }

    /// Open the input and read it whole into a multipart `file` part.
    pub(crate) async fn into_file_part(self) -> Result<FilePart, LlmError> {
        let (mut reader, file_name) = self.resolve().await?;
        check_extension(&file_name)?;

        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .await
            .map_err(|e| LlmError::io(format!("Failed to read audio file '{file_name}'"), e))?;

        Ok(FilePart {
            field: "file".to_string(),
            file_name,
            content: Bytes::from(content),
        })
    }

    async fn resolve(self) -> Result<(AudioReader, String), LlmError> {
        match self {
            FileInput::Handle(handle) => {
                let file_name = handle.file_name().to_string();
                let reader = handle
                    .open()
                    .await
                    .map_err(|e| LlmError::io(format!("Failed to open '{file_name}'"), e))?;
                Ok((reader, file_name))
            }
            FileInput::Path(path) => {
                let file_name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .ok_or_else(|| {
                        LlmError::MissingArgument(format!(
                            "Path '{}' has no file name",
                            path.display()
                        ))
                    })?;
                let file = tokio::fs::File::open(&path).await.map_err(|e| {
                    LlmError::io(format!("Failed to open '{}'", path.display()), e)
                })?;
                Ok((Box::new(file), file_name))
            }
            FileInput::Stream { reader, file_name } => {
                if file_name.is_empty() {
                    return Err(LlmError::MissingArgument(
                        "File name must be provided for stream inputs".to_string(),
                    ));
                }
                Ok((reader, file_name))
            }
        }
    }
}

impl fmt::Debug for FileInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileInput::Handle(handle) => f
                .debug_struct("Handle")
                .field("file_name", &handle.file_name())
                .finish(),
            FileInput::Path(path) => f.debug_tuple("Path").field(path).finish(),
            FileInput::Stream { file_name, .. } => f
                .debug_struct("Stream")
                .field("file_name", file_name)
                .finish_non_exhaustive(),
        }
    }
}

fn check_extension(file_name: &str) -> Result<(), LlmError> {
    // Everything from the last dot of the base name, so `.mp3` alone counts as `.mp3`.
    let base_name = Path::new(file_name)
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let extension = base_name
        .rsplit_once('.')
        .map(|(_, ext)| format!(".{ext}"))
        .unwrap_or_default();

    if ACCEPTED_AUDIO_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(LlmError::InvalidArgument(format!(
            "Unsupported audio file '{file_name}', expected one of: {}",
            ACCEPTED_AUDIO_EXTENSIONS.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    struct FailingHandle;

    #[async_trait]
    impl UploadHandle for FailingHandle {
        fn file_name(&self) -> &str {
            "broken.wav"
        }

        async fn open(&self) -> io::Result<AudioReader> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }
    }

    #[test]
    fn test_extension_matching_is_exact() {
        for name in ["a.mp3", "b.mp4", "c.mpeg", "d.mpga", "e.m4a", "f.webm", "g.wav", "h.flac", "i.ogg"] {
            check_extension(name).unwrap();
        }
        for name in ["a.MP3", "a.Wav", "a.txt", "a", "a.mp3.gz", ".mp3x"] {
            assert!(
                matches!(check_extension(name), Err(LlmError::InvalidArgument(_))),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_extension_uses_last_dot_of_base_name() {
        check_extension(".mp3").unwrap();
        check_extension("recordings/2024.06/.wav").unwrap();
        check_extension("take.2.ogg").unwrap();
        assert!(matches!(
            check_extension("recordings.mp3/notes"),
            Err(LlmError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_in_memory_handle_reads_content() {
        let part = FileInput::handle(InMemoryUpload::new("memo.m4a", &b"m4a-bytes"[..]))
            .into_file_part()
            .await
            .unwrap();

        assert_eq!(part.field, "file");
        assert_eq!(part.file_name, "memo.m4a");
        assert_eq!(part.content, Bytes::from_static(b"m4a-bytes"));
    }

    #[tokio::test]
    async fn test_path_input_uses_base_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interview.flac");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"fLaC")
            .unwrap();

        let part = FileInput::path(&path).into_file_part().await.unwrap();
        assert_eq!(part.file_name, "interview.flac");
        assert_eq!(part.content, Bytes::from_static(b"fLaC"));
    }

    #[tokio::test]
    async fn test_missing_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileInput::path(dir.path().join("missing.mp3"))
            .into_file_part()
            .await;
        assert!(matches!(result, Err(LlmError::Io { .. })));
    }

    #[tokio::test]
    async fn test_handle_open_failure_is_io_error() {
        let result = FileInput::handle(FailingHandle).into_file_part().await;
        assert!(matches!(result, Err(LlmError::Io { .. })));
    }

    #[tokio::test]
    async fn test_stream_requires_file_name() {
        let result = FileInput::stream(Cursor::new(b"data".to_vec()), "")
            .into_file_part()
            .await;
        assert!(matches!(result, Err(LlmError::MissingArgument(_))));
    }

    #[tokio::test]
    async fn test_stream_with_wrong_extension_is_invalid() {
        let result = FileInput::stream(Cursor::new(b"data".to_vec()), "notes.txt")
            .into_file_part()
            .await;
        assert!(matches!(result, Err(LlmError::InvalidArgument(_))));
    }
}
