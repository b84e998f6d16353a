//! Upload-and-preview widget state.
//!
//! One widget per visitor walks `Empty -> Previewing -> Analyzing -> Ready`,
//! and any state returns to `Empty` on removal. Analyses are tracked by a
//! generation number so a result that arrives after the file was replaced or
//! removed is dropped instead of overwriting the newer state.

use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tokio_util::sync::CancellationToken;

use crate::analysis::AnalysisResult;

/// 10 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileSource {
    Drop,
    #[default]
    Picker,
    Camera,
}

impl FromStr for FileSource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "drop" => Ok(FileSource::Drop),
            "picker" => Ok(FileSource::Picker),
            "camera" => Ok(FileSource::Camera),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn preview_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            STANDARD.encode(&self.bytes)
        )
    }
}

/// Rejected selection. Shown to the user as a toast; never an error response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UploadWarning {
    #[error("File too large")]
    TooLarge,
    #[error("Invalid file type")]
    NotAnImage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("No image selected")]
    NothingSelected,
    #[error("Analysis already in progress")]
    AlreadyAnalyzing,
}

/// Size is checked before type.
pub fn validate(size: u64, content_type: &str, max_bytes: u64) -> Result<(), UploadWarning> {
    if size > max_bytes {
        return Err(UploadWarning::TooLarge);
    }
    if !content_type.starts_with("image/") {
        return Err(UploadWarning::NotAnImage);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    Empty,
    Previewing,
    Analyzing,
    Ready,
}

/// Handed out by [`UploadWidget::begin_analysis`]; the holder runs the
/// analysis and reports back with the same generation.
#[derive(Debug, Clone)]
pub struct AnalysisTicket {
    pub generation: u64,
    pub image: ImageFile,
    pub cancel: CancellationToken,
}

#[derive(Debug)]
struct Selection {
    file: ImageFile,
    source: FileSource,
    preview_url: String,
}

#[derive(Debug)]
enum Stage {
    Idle,
    Analyzing {
        generation: u64,
        cancel: CancellationToken,
    },
    Ready(AnalysisResult),
}

#[derive(Debug)]
pub struct UploadWidget {
    max_bytes: u64,
    selection: Option<Selection>,
    stage: Stage,
    generation: u64,
}

impl UploadWidget {
    pub fn new(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            selection: None,
            stage: Stage::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> UploadState {
        match (&self.selection, &self.stage) {
            (None, _) => UploadState::Empty,
            (Some(_), Stage::Idle) => UploadState::Previewing,
            (Some(_), Stage::Analyzing { .. }) => UploadState::Analyzing,
            (Some(_), Stage::Ready(_)) => UploadState::Ready,
        }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub fn file(&self) -> Option<&ImageFile> {
        self.selection.as_ref().map(|s| &s.file)
    }

    pub fn source(&self) -> Option<FileSource> {
        self.selection.as_ref().map(|s| s.source)
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.selection.as_ref().map(|s| s.preview_url.as_str())
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.stage {
            Stage::Ready(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.stage, Stage::Analyzing { .. })
    }

    /// Replaces whatever was selected before. A rejected file leaves the
    /// widget exactly as it was.
    pub fn select_file(&mut self, source: FileSource, file: ImageFile) -> Result<(), UploadWarning> {
        validate(file.size(), &file.content_type, self.max_bytes)?;

        self.reset();
        tracing::debug!(
            name = %file.name,
            size = file.size(),
            ?source,
            "Image selected"
        );
        let preview_url = file.preview_url();
        self.selection = Some(Selection {
            file,
            source,
            preview_url,
        });
        Ok(())
    }

    pub fn begin_analysis(&mut self) -> Result<AnalysisTicket, UploadError> {
        if self.is_analyzing() {
            return Err(UploadError::AlreadyAnalyzing);
        }
        let image = self
            .selection
            .as_ref()
            .map(|s| s.file.clone())
            .ok_or(UploadError::NothingSelected)?;

        self.generation += 1;
        let cancel = CancellationToken::new();
        self.stage = Stage::Analyzing {
            generation: self.generation,
            cancel: cancel.clone(),
        };
        Ok(AnalysisTicket {
            generation: self.generation,
            image,
            cancel,
        })
    }

    /// Returns false when the ticket is stale and the result was discarded.
    pub fn finish_analysis(&mut self, generation: u64, result: AnalysisResult) -> bool {
        if !self.is_current(generation) {
            tracing::debug!(generation, "Discarding stale analysis result");
            return false;
        }
        self.stage = Stage::Ready(result);
        true
    }

    /// Drops back to the preview after a failed analysis.
    pub fn abandon_analysis(&mut self, generation: u64) {
        if self.is_current(generation) {
            self.stage = Stage::Idle;
        }
    }

    pub fn remove(&mut self) {
        self.reset();
        self.selection = None;
    }

    fn is_current(&self, generation: u64) -> bool {
        matches!(self.stage, Stage::Analyzing { generation: g, .. } if g == generation)
    }

    fn reset(&mut self) {
        if let Stage::Analyzing { cancel, .. } = &self.stage {
            cancel.cancel();
        }
        self.generation += 1;
        self.stage = Stage::Idle;
    }
}

impl Drop for UploadWidget {
    fn drop(&mut self) {
        if let Stage::Analyzing { cancel, .. } = &self.stage {
            cancel.cancel();
        }
    }
}
