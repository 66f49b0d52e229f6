pub mod loading_page;
pub mod scan_page;
pub mod upload_page;

use iced::{Element, Task};

use crate::gui::{AppState, Message};
use crate::{format, inference, ingest};

#[derive(Debug, Clone)]
pub enum ScreenMessage<S: Screen> {
    ScreenMessage(S::Message),
    ParentMessage(S::ParentMessage),
}

pub trait Screen: Sized {
    type Message: std::fmt::Debug + Clone;
    type ParentMessage: std::fmt::Debug + Clone;
    fn view(&self) -> Element<'_, ScreenMessage<Self>>;
    fn update(&mut self, message: Self::Message, state: &mut AppState)
    -> Task<ScreenMessage<Self>>;
}

/// One screen per session state: loading (Initializing), upload (NoImage),
/// scan (ImageSelected through ResultsShown).
#[derive(Debug, Clone)]
pub enum ScreenData {
    LoadingPage(loading_page::LoadingPageScreen),
    UploadPage(upload_page::UploadPageScreen),
    ScanPage(scan_page::ScanPageScreen),
}

impl Screen for ScreenData {
    type Message = Message;
    type ParentMessage = std::convert::Infallible;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        match self {
            ScreenData::LoadingPage(screen) => screen.view().map(Message::LoadingPage),
            ScreenData::UploadPage(screen) => screen.view().map(Message::UploadPage),
            ScreenData::ScanPage(screen) => screen.view().map(Message::ScanPage),
        }
        .map(ScreenMessage::ScreenMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match (self, message) {
            (x, Message::ChangeScreen(screen)) => {
                *x = screen;
                Task::none()
            }
            (x, Message::ModelsLoaded(result)) => match result {
                Ok(models) => {
                    if state.session.models_loaded(models).is_err() {
                        // Second load signal; the session already has its
                        // capabilities, so drop it.
                        return Task::none();
                    }
                    *x = ScreenData::UploadPage(upload_page::UploadPageScreen::default());
                    Task::none()
                }
                Err(text) => {
                    // Fatal: the session never leaves Initializing. Show
                    // why instead of spinning forever.
                    if let ScreenData::LoadingPage(screen) = x {
                        screen.error = Some(text);
                    }
                    Task::none()
                }
            },
            (x, Message::ImageLoaded(result)) => match result {
                Ok(handle) => match state.session.select_image(handle.clone()) {
                    Ok(()) => {
                        *x = ScreenData::ScanPage(scan_page::ScanPageScreen::new(&handle));
                        Task::none()
                    }
                    Err(_) => Task::none(),
                },
                Err(text) => {
                    if let ScreenData::UploadPage(screen) = x {
                        screen.error = Some(text);
                    }
                    Task::none()
                }
            },
            (x, Message::ScanFinished(result)) => {
                let ScreenData::ScanPage(screen) = x else {
                    return Task::none();
                };
                match result {
                    Ok(outcome) => {
                        let label_rows = format::label_rows(&outcome.labels);
                        let detection_rows = format::detection_rows(&outcome.detections);
                        if state.session.complete_scan(outcome).is_ok() {
                            screen.show_results(label_rows, detection_rows);
                        }
                        Task::none()
                    }
                    Err(error) => {
                        let text = error.to_string();
                        if state.session.fail_scan(error).is_ok() {
                            screen.show_scan_error(text);
                        }
                        Task::none()
                    }
                }
            }
            (ScreenData::UploadPage(page), Message::UploadPage(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page
                    .update(msg, state)
                    .map(Message::UploadPage)
                    .map(ScreenMessage::ScreenMessage),
                ScreenMessage::ParentMessage(parent_msg) => match parent_msg {
                    upload_page::ParentMessage::ImagePicked(path) => Task::perform(
                        async move {
                            tokio::task::spawn_blocking(move || ingest::ingest(&path))
                                .await
                                .map_err(|e| e.to_string())?
                                .map_err(|e| e.to_string())
                        },
                        |result| ScreenMessage::ScreenMessage(Message::ImageLoaded(result)),
                    ),
                },
            },
            (ScreenData::ScanPage(page), Message::ScanPage(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page
                    .update(msg, state)
                    .map(Message::ScanPage)
                    .map(ScreenMessage::ScreenMessage),
                ScreenMessage::ParentMessage(parent_msg) => match parent_msg {
                    scan_page::ParentMessage::ScanRequested => {
                        match state.session.begin_scan() {
                            Ok(job) => {
                                page.show_scanning();
                                Task::perform(inference::scan(job), |result| {
                                    ScreenMessage::ScreenMessage(Message::ScanFinished(result))
                                })
                            }
                            // Rejected (scan already in flight, or not in a
                            // scannable state): the button gating should
                            // prevent this; drop the command.
                            Err(_) => Task::none(),
                        }
                    }
                    scan_page::ParentMessage::ResetRequested => {
                        match state.session.reset() {
                            Ok(()) => Task::done(ScreenMessage::ScreenMessage(
                                Message::ChangeScreen(ScreenData::UploadPage(
                                    upload_page::UploadPageScreen::default(),
                                )),
                            )),
                            Err(_) => Task::none(),
                        }
                    }
                },
            },
            _ => Task::none(),
        }
    }
}
