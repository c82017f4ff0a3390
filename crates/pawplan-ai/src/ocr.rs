//! Image-to-text collaborator interface.
//!
//! The engine never decodes images itself. A platform recognizer is
//! injected and its recognized lines are joined before extraction.

use thiserror::Error;

/// OCR errors.
#[derive(Error, Debug)]
pub enum OcrError {
    #[error("image decode error: {0}")]
    ImageDecode(String),

    #[error("no text recognizer configured")]
    NotConfigured,
}

/// Recognizes text lines in an encoded image.
pub trait TextRecognizer: Send + Sync {
    /// Returns the recognized lines in reading order.
    fn recognize_text(&self, image: &[u8]) -> Result<Vec<String>, OcrError>;
}

/// Recognizer that accepts nothing, for builds without a platform OCR.
pub struct NoopRecognizer;

impl TextRecognizer for NoopRecognizer {
    fn recognize_text(&self, _image: &[u8]) -> Result<Vec<String>, OcrError> {
        Err(OcrError::ImageDecode("no OCR engine in this build".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_recognizer_always_fails() {
        let recognizer = NoopRecognizer;
        assert!(matches!(
            recognizer.recognize_text(&[1, 2, 3]),
            Err(OcrError::ImageDecode(_))
        ));
    }
}
