use iced::{Element, Task, Theme};

use crate::gui::screens::{Screen, ScreenData, ScreenMessage, loading_page::LoadingPageScreen};
use crate::gui::{AppState, Message};
use crate::provider::{self, ProviderConfig};

pub struct DualscanApp {
    state: AppState,
    screen: ScreenData,
}

impl DualscanApp {
    /// Opens on the loading screen and starts the one-time model load
    /// immediately.
    pub fn new(config: ProviderConfig) -> (Self, Task<Message>) {
        let load_config = config.clone();
        let load = Task::perform(
            async move { provider::load(&load_config).await },
            |result| Message::ModelsLoaded(result.map_err(|e| e.to_string())),
        );

        (
            Self {
                state: AppState::new(config),
                screen: ScreenData::LoadingPage(LoadingPageScreen::default()),
            },
            load,
        )
    }

    pub fn title(&self) -> String {
        "Dualscan - Image Class Detection".to_string()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        self.screen.update(message, &mut self.state).map(|msg| {
            match msg {
                ScreenMessage::ScreenMessage(msg) => msg,
                ScreenMessage::ParentMessage(infallible) => match infallible {},
            }
        })
    }

    pub fn view(&self) -> Element<'_, Message> {
        self.screen.view().map(|msg| match msg {
            ScreenMessage::ScreenMessage(msg) => msg,
            ScreenMessage::ParentMessage(infallible) => match infallible {},
        })
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}
