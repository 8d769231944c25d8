//! Image attachments held by a form until the server accepts them.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("failed to read image `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("`{file_name}` is not an image ({content_type})")]
    NotAnImage {
        file_name: String,
        content_type: String,
    },
    #[error("image is {size} bytes; the limit is {limit} bytes")]
    TooLarge { size: u64, limit: u64 },
}

/// Image chosen on this machine, kept in memory as the form's preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalImage {
    file_name: String,
    content_type: String,
    bytes: Bytes,
}

impl LocalImage {
    pub async fn load(path: &Path, max_bytes: u64) -> Result<Self, ImageError> {
        let io_error = |source| ImageError::Io {
            path: path.to_path_buf(),
            source,
        };
        let metadata = tokio::fs::metadata(path).await.map_err(io_error)?;
        if metadata.len() > max_bytes {
            return Err(ImageError::TooLarge {
                size: metadata.len(),
                limit: max_bytes,
            });
        }
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let content_type = guess_image_type(path, &file_name)?;
        let bytes = tokio::fs::read(path).await.map_err(io_error)?;
        Self::checked(file_name, content_type, Bytes::from(bytes), max_bytes)
    }

    pub fn from_bytes(
        file_name: impl Into<String>,
        bytes: impl Into<Bytes>,
        max_bytes: u64,
    ) -> Result<Self, ImageError> {
        let file_name = file_name.into();
        let content_type = guess_image_type(Path::new(&file_name), &file_name)?;
        Self::checked(file_name, content_type, bytes.into(), max_bytes)
    }

    fn checked(
        file_name: String,
        content_type: String,
        bytes: Bytes,
        max_bytes: u64,
    ) -> Result<Self, ImageError> {
        let size = bytes.len() as u64;
        if size > max_bytes {
            return Err(ImageError::TooLarge {
                size,
                limit: max_bytes,
            });
        }
        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn guess_image_type(path: &Path, file_name: &str) -> Result<String, ImageError> {
    let guess = mime_guess::from_path(path).first_or_octet_stream();
    if guess.type_() != "image" {
        return Err(ImageError::NotAnImage {
            file_name: file_name.to_string(),
            content_type: guess.essence_str().to_string(),
        });
    }
    Ok(guess.essence_str().to_string())
}

/// Image slot of a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImageField {
    #[default]
    Empty,
    /// Image already stored by the server.
    Remote(String),
    /// Local preview pending upload.
    Local(LocalImage),
}

impl ImageField {
    pub fn local(&self) -> Option<&LocalImage> {
        match self {
            Self::Local(image) => Some(image),
            _ => None,
        }
    }

    pub fn has_local_preview(&self) -> bool {
        matches!(self, Self::Local(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_image_types_from_extension() {
        let image = LocalImage::from_bytes("cover.png", vec![1_u8, 2, 3], 10).expect("png");
        assert_eq!(image.content_type(), "image/png");
        assert_eq!(image.len(), 3);

        let err = LocalImage::from_bytes("notes.txt", vec![1_u8], 10).expect_err("text");
        assert!(matches!(err, ImageError::NotAnImage { .. }));
    }

    #[test]
    fn rejects_oversized_images() {
        let err = LocalImage::from_bytes("big.jpg", vec![0_u8; 11], 10).expect_err("too big");
        assert!(matches!(err, ImageError::TooLarge { size: 11, limit: 10 }));
    }

    #[tokio::test]
    async fn loads_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("logo.jpeg");
        std::fs::write(&path, b"jpeg-bytes").expect("write");

        let image = LocalImage::load(&path, 1024).await.expect("load");
        assert_eq!(image.file_name(), "logo.jpeg");
        assert_eq!(image.content_type(), "image/jpeg");
        assert_eq!(image.bytes().as_ref(), b"jpeg-bytes");

        let missing = LocalImage::load(&dir.path().join("nope.png"), 1024).await;
        assert!(matches!(missing, Err(ImageError::Io { .. })));
    }
}
