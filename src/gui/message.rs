use crate::error::InferenceError;
use crate::gui::screens::{
    ScreenData, ScreenMessage, loading_page::LoadingPageScreen, scan_page::ScanPageScreen,
    upload_page::UploadPageScreen,
};
use crate::inference::ScanOutcome;
use crate::ingest::ImageHandle;
use crate::provider::ModelSet;

#[derive(Debug, Clone)]
pub enum Message {
    LoadingPage(ScreenMessage<LoadingPageScreen>),
    UploadPage(ScreenMessage<UploadPageScreen>),
    ScanPage(ScreenMessage<ScanPageScreen>),
    ChangeScreen(ScreenData),
    /// The model loader resolved (or failed fatally; the error is display
    /// text because the session stays stuck either way).
    ModelsLoaded(Result<ModelSet, String>),
    /// The selected file finished decoding.
    ImageLoaded(Result<ImageHandle, String>),
    /// Both inference calls resolved, or one of them failed.
    ScanFinished(Result<ScanOutcome, InferenceError>),
}
