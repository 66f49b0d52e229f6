use std::convert::Infallible;

use iced::{
    Element, Task,
    widget::{column, container, text},
};

use crate::gui::{
    AppState,
    screens::{Screen, ScreenMessage},
};

/// Shown while the models load. If loading fails the session is stuck here
/// for good, so the error text replaces the progress line.
#[derive(Debug, Clone, Default)]
pub struct LoadingPageScreen {
    pub error: Option<String>,
}

impl Screen for LoadingPageScreen {
    type Message = Infallible;
    type ParentMessage = Infallible;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let content: Element<'_, _> = match &self.error {
            Some(error) => column![
                text("Failed to load models").size(24),
                text(error.clone()),
            ]
            .spacing(10)
            .into(),
            None => text("Loading Models...").size(24).into(),
        };

        container(content)
            .center_x(iced::Length::Fill)
            .center_y(iced::Length::Fill)
            .into()
    }

    fn update(
        &mut self,
        _message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        Task::none()
    }
}
