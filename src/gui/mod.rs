mod app;
mod message;
mod screens;
mod state;

pub use app::DualscanApp;
pub use message::Message;
pub use state::AppState;

use crate::provider::ProviderConfig;

/// Launch the GUI. Model loading starts immediately; the window opens on
/// the loading screen.
pub fn run(config: ProviderConfig) -> iced::Result {
    iced::application(
        move || DualscanApp::new(config.clone()),
        DualscanApp::update,
        DualscanApp::view,
    )
    .title(DualscanApp::title)
    .theme(DualscanApp::theme)
    .run()
}
