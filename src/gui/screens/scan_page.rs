use iced::{
    Alignment::Center,
    Element, Length, Task,
    widget::{button, column, container, image as iced_image, scrollable, text},
};

use crate::gui::{
    AppState,
    screens::{Screen, ScreenMessage},
};
use crate::ingest::ImageHandle;

/// Preview, scan and results for the selected image. The fields are a
/// render projection of the session; the parent routes every command
/// through the session's transition methods and calls back into the
/// `show_*` methods with the result.
#[derive(Debug, Clone)]
pub struct ScanPageScreen {
    preview: iced_image::Handle,
    file_name: String,
    scanning: bool,
    scanned: bool,
    label_rows: Vec<String>,
    detection_rows: Vec<String>,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum ScanPageMessage {
    Scan,
    Reset,
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    ScanRequested,
    ResetRequested,
}

impl ScanPageScreen {
    pub fn new(image: &ImageHandle) -> Self {
        let rgba = image.image().to_rgba8();
        let preview = iced_image::Handle::from_rgba(rgba.width(), rgba.height(), rgba.into_raw());
        let file_name = image
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            preview,
            file_name,
            scanning: false,
            scanned: false,
            label_rows: Vec::new(),
            detection_rows: Vec::new(),
            error: None,
        }
    }

    pub fn show_scanning(&mut self) {
        self.scanning = true;
        self.error = None;
    }

    pub fn show_results(&mut self, label_rows: Vec<String>, detection_rows: Vec<String>) {
        self.scanning = false;
        self.scanned = true;
        self.label_rows = label_rows;
        self.detection_rows = detection_rows;
    }

    pub fn show_scan_error(&mut self, error: String) {
        self.scanning = false;
        self.error = Some(error);
    }

    fn results(&self) -> Element<'_, ScreenMessage<Self>> {
        let mut rows = column![].spacing(5);
        rows = rows.push(text("MobileNet").size(20));
        for row in &self.label_rows {
            rows = rows.push(text(row.clone()));
        }
        rows = rows.push(text("COCO-SSD").size(20));
        for row in &self.detection_rows {
            rows = rows.push(text(row.clone()));
        }

        column![
            scrollable(rows).height(Length::FillPortion(2)),
            button("Scan New Image")
                .on_press(ScreenMessage::ScreenMessage(ScanPageMessage::Reset)),
        ]
        .spacing(10)
        .align_x(Center)
        .into()
    }

    fn scan_controls(&self) -> Element<'_, ScreenMessage<Self>> {
        let scan_button = if self.scanning {
            button("Scanning...")
        } else {
            button("Scan").on_press(ScreenMessage::ScreenMessage(ScanPageMessage::Scan))
        };

        let mut controls = column![scan_button].spacing(10).align_x(Center);
        if let Some(error) = &self.error {
            controls = controls.push(text(error.clone()));
        }
        controls.into()
    }

    fn body(&self) -> Element<'_, ScreenMessage<Self>> {
        if self.scanned {
            self.results()
        } else {
            self.scan_controls()
        }
    }
}

impl Screen for ScanPageScreen {
    type Message = ScanPageMessage;
    type ParentMessage = ParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let content = column![
            text(self.file_name.clone()),
            iced_image(self.preview.clone())
                .width(Length::FillPortion(3))
                .height(Length::FillPortion(3)),
            self.body(),
        ]
        .spacing(20)
        .padding(20)
        .align_x(Center);

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
            ScanPageMessage::Scan => {
                Task::done(ScreenMessage::ParentMessage(ParentMessage::ScanRequested))
            }
            ScanPageMessage::Reset => {
                Task::done(ScreenMessage::ParentMessage(ParentMessage::ResetRequested))
            }
        }
    }
}
