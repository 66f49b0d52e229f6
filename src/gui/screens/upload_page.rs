use std::path::PathBuf;

use iced::{
    Alignment::Center,
    Element, Task,
    widget::{button, column, container, text},
};
use rfd::AsyncFileDialog;

use crate::gui::{
    AppState,
    screens::{Screen, ScreenMessage},
};

#[derive(Debug, Clone, Default)]
pub struct UploadPageScreen {
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum UploadPageMessage {
    ChooseImage,
    None,
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    ImagePicked(PathBuf),
}

impl Screen for UploadPageScreen {
    type Message = UploadPageMessage;
    type ParentMessage = ParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let mut content = column![
            text("Image Class Detection").size(32),
            text("Upload an image to classify it with the MobileNet and COCO-SSD models."),
            button("Choose Image")
                .on_press(ScreenMessage::ScreenMessage(UploadPageMessage::ChooseImage)),
        ]
        .spacing(20)
        .padding(20)
        .align_x(Center);

        if let Some(error) = &self.error {
            content = content.push(text(error.clone()));
        }

        container(content)
            .center_x(iced::Length::Fill)
            .center_y(iced::Length::Fill)
            .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            UploadPageMessage::ChooseImage => Task::perform(
                AsyncFileDialog::new()
                    .add_filter("Images", &["png", "jpg", "jpeg", "gif", "bmp", "webp"])
                    .pick_file(),
                |handle| match handle {
                    Some(file) => ScreenMessage::ParentMessage(ParentMessage::ImagePicked(
                        file.path().to_path_buf(),
                    )),
                    None => ScreenMessage::ScreenMessage(UploadPageMessage::None),
                },
            ),
            UploadPageMessage::None => Task::none(),
        }
    }
}
