//! Prediction and feedback endpoints.

use super::client::{ApiClient, Service};
use super::types::{Feedback, Prediction, UploadMetadata};
use crate::constants::endpoints;
use crate::error::{Error, Result};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use tracing::{debug, info};

/// Audio container formats the service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    /// RIFF WAVE.
    Wav,
    /// MPEG layer III.
    Mp3,
    /// Advanced Audio Coding.
    Aac,
    /// Free Lossless Audio Codec.
    Flac,
}

impl AudioFormat {
    /// Detect the format from a file name's extension.
    pub fn from_file_name(name: &str) -> Result<Self> {
        let extension = Path::new(name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "wav" => Ok(Self::Wav),
            "mp3" => Ok(Self::Mp3),
            "aac" => Ok(Self::Aac),
            "flac" => Ok(Self::Flac),
            _ => Err(Error::UnsupportedAudioFormat { format: extension }),
        }
    }

    /// MIME type sent with the multipart file part.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::Aac => "audio/aac",
            Self::Flac => "audio/flac",
        }
    }

    /// Display label, e.g. `WAV`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Wav => "WAV",
            Self::Mp3 => "MP3",
            Self::Aac => "AAC",
            Self::Flac => "FLAC",
        }
    }
}

/// An audio recording ready to be posted.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    file_name: String,
    format: AudioFormat,
    bytes: Vec<u8>,
}

impl AudioUpload {
    /// Wrap in-memory audio. The format comes from the file name.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let file_name = file_name.into();
        let format = AudioFormat::from_file_name(&file_name)?;
        Ok(Self {
            file_name,
            format,
            bytes,
        })
    }

    /// Read a recording from disk.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let format = AudioFormat::from_file_name(&file_name)?;

        let bytes = tokio::fs::read(path).await.map_err(|e| Error::AudioRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(Self {
            file_name,
            format,
            bytes,
        })
    }

    /// File name sent to the service.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Detected container format.
    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Build the multipart body: the file part plus each metadata field that is set.
fn build_form(upload: &AudioUpload, metadata: Option<&UploadMetadata>) -> Result<Form> {
    let part = Part::bytes(upload.bytes.clone())
        .file_name(upload.file_name.clone())
        .mime_str(upload.format.mime())
        .map_err(|e| Error::Internal {
            message: format!("invalid MIME type for upload: {e}"),
        })?;

    let mut form = Form::new().part("file", part);

    if let Some(metadata) = metadata {
        if let Some(latitude) = metadata.latitude {
            form = form.text("latitude", latitude.to_string());
        }
        if let Some(longitude) = metadata.longitude {
            form = form.text("longitude", longitude.to_string());
        }
        if let Some(recorded_at) = non_blank(metadata.recorded_at.as_deref()) {
            form = form.text("recorded_at", recorded_at.to_string());
        }
        if let Some(notes) = non_blank(metadata.user_notes.as_deref()) {
            form = form.text("user_notes", notes.to_string());
        }
    }

    Ok(form)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

impl ApiClient {
    /// `POST /predictions` (multipart).
    ///
    /// Failure statuses surface as [`Error::Upload`] so callers can tell
    /// them apart from read failures.
    pub async fn upload_audio_for_prediction(
        &self,
        upload: &AudioUpload,
        metadata: Option<&UploadMetadata>,
    ) -> Result<Prediction> {
        let url = self.url(Service::Main, endpoints::PREDICTIONS, &[])?;
        let form = build_form(upload, metadata)?;

        info!(
            "Uploading {} ({} bytes) for prediction",
            upload.file_name,
            upload.size()
        );
        let prediction: Prediction = self.post_multipart(url, form).await?;
        debug!(
            "Prediction {}: {} ({:.1}%)",
            prediction.id, prediction.predicted_bird, prediction.confidence
        );
        Ok(prediction)
    }

    /// `GET /predictions`.
    pub async fn get_all_predictions(&self) -> Result<Vec<Prediction>> {
        let url = self.url(Service::Main, endpoints::PREDICTIONS, &[])?;
        self.get_json(url).await
    }

    /// `GET /predictions/{id}`.
    pub async fn get_prediction_by_id(&self, id: &str) -> Result<Prediction> {
        let url = self.url(Service::Main, endpoints::PREDICTIONS, &[id])?;
        self.get_json(url).await
    }

    /// `DELETE /predictions/{id}`.
    pub async fn delete_prediction(&self, id: &str) -> Result<()> {
        let url = self.url(Service::Main, endpoints::PREDICTIONS, &[id])?;
        self.send_unit::<()>(Method::DELETE, url, None).await
    }

    /// `POST /predictions/{id}/feedback`.
    pub async fn submit_feedback(&self, prediction_id: &str, feedback: &Feedback) -> Result<()> {
        let url = self.url(
            Service::Main,
            endpoints::PREDICTIONS,
            &[prediction_id, "feedback"],
        )?;
        self.send_unit(Method::POST, url, Some(feedback)).await
    }
}
