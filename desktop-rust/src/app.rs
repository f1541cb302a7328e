use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use egui::{Color32, RichText};

use crate::io::{decode_thumbnail, load_upload, upload_from_bytes};
use crate::model::{ThumbData, ThumbSource, UiMessage};
use product_matcher_common::{
    ApiConfig, CardView, ImageUpload, ResultsView, SearchClient, UiState, IMAGE_EXTENSIONS,
};

const THUMB_SIZE: [u32; 2] = [220, 160];
const PREVIEW_KEY_PREFIX: &str = "preview:";

pub struct DesktopApp {
    state: UiState,
    client: SearchClient,
    status: String,
    backend_status: String,
    checking_status: bool,
    msg_tx: Sender<UiMessage>,
    msg_rx: Receiver<UiMessage>,
    thumbs: HashMap<String, egui::TextureHandle>,
    thumb_rx: Receiver<ThumbData>,
    thumb_tx: Sender<ThumbData>,
    thumb_inflight: HashSet<String>,
    thumb_failed: HashSet<String>,
    pending_thumbs: Vec<ThumbData>,
    preview_bytes: Option<Arc<[u8]>>,
    preview_serial: u64,
}

/// サムネイルの状態
enum ThumbSlot<'a> {
    Ready(&'a egui::TextureHandle),
    Failed,
    Loading,
}

impl DesktopApp {
    pub fn new(client: SearchClient) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let (thumb_tx, thumb_rx) = mpsc::channel();
        Self {
            state: UiState::new(),
            client,
            status: String::new(),
            backend_status: String::new(),
            checking_status: false,
            msg_tx,
            msg_rx,
            thumbs: HashMap::new(),
            thumb_rx,
            thumb_tx,
            thumb_inflight: HashSet::new(),
            thumb_failed: HashSet::new(),
            pending_thumbs: Vec::new(),
            preview_bytes: None,
            preview_serial: 0,
        }
    }

    fn choose_image(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        {
            self.process_path(&path);
        }
    }

    fn process_path(&mut self, path: &Path) {
        match load_upload(path) {
            Ok(upload) => self.process_image(upload),
            Err(err) => self.status = format!("{err:#}"),
        }
    }

    fn process_image(&mut self, upload: ImageUpload) {
        self.status.clear();
        let bytes: Arc<[u8]> = Arc::from(upload.bytes.as_slice());
        // 同名・同サイズのファイルでもキーが重ならないよう連番にする
        self.preview_serial += 1;
        let (ticket, released) = self
            .state
            .begin_search(format!("{PREVIEW_KEY_PREFIX}{}", self.preview_serial));
        if let Some(old) = released {
            self.release_preview(&old);
        }
        self.preview_bytes = Some(bytes);

        let client = self.client.clone();
        let tx = self.msg_tx.clone();
        log::info!(
            "search #{}: {} ({} bytes)",
            ticket.id(),
            upload.file_name,
            upload.bytes.len()
        );
        std::thread::spawn(move || {
            let outcome = block_on(client.search(upload)).and_then(|r| r);
            let _ = tx.send(UiMessage::SearchDone { ticket, outcome });
        });
    }

    fn reset(&mut self) {
        if let Some(old) = self.state.reset() {
            self.release_preview(&old);
        }
        self.preview_bytes = None;
        self.status.clear();
    }

    fn release_preview(&mut self, key: &str) {
        self.thumbs.remove(key);
        self.thumb_inflight.remove(key);
        self.thumb_failed.remove(key);
    }

    fn check_backend(&mut self) {
        let client = self.client.clone();
        let tx = self.msg_tx.clone();
        self.checking_status = true;
        self.backend_status = "Checking...".to_string();
        std::thread::spawn(move || {
            let result = block_on(client.status()).and_then(|r| r);
            let _ = tx.send(UiMessage::StatusDone(result));
        });
    }

    fn request_thumbnail(&mut self, key: &str, source: ThumbSource) {
        if self.thumbs.contains_key(key)
            || self.thumb_inflight.contains(key)
            || self.thumb_failed.contains(key)
        {
            return;
        }
        self.thumb_inflight.insert(key.to_string());
        let sender = self.thumb_tx.clone();
        let client = self.client.clone();
        let key = key.to_string();

        std::thread::spawn(move || {
            let bytes: Option<Vec<u8>> = match source {
                ThumbSource::Local(bytes) => Some(bytes.to_vec()),
                ThumbSource::Remote(relative) => match block_on(client.fetch_image(&relative)) {
                    Ok(Ok(bytes)) => Some(bytes),
                    Ok(Err(err)) | Err(err) => {
                        log::warn!("thumbnail {relative}: {err}");
                        None
                    }
                },
            };
            let decoded = bytes.and_then(|b| decode_thumbnail(&b, THUMB_SIZE[0], THUMB_SIZE[1]));
            let (size, pixels) = decoded.unwrap_or(([0, 0], Vec::new()));
            let _ = sender.send(ThumbData { key, size, pixels });
        });
    }

    fn thumb_slot(&self, key: &str) -> ThumbSlot<'_> {
        if let Some(texture) = self.thumbs.get(key) {
            ThumbSlot::Ready(texture)
        } else if self.thumb_failed.contains(key) {
            ThumbSlot::Failed
        } else {
            ThumbSlot::Loading
        }
    }

    fn process_pending_thumbs(&mut self, ctx: &egui::Context) {
        let pending = std::mem::take(&mut self.pending_thumbs);
        for msg in pending {
            if msg.size[0] == 0 || msg.size[1] == 0 {
                self.thumb_failed.insert(msg.key);
                continue;
            }
            let color_image = egui::ColorImage::from_rgba_unmultiplied(msg.size, &msg.pixels);
            let texture = ctx.load_texture(&msg.key, color_image, egui::TextureOptions::default());
            self.thumbs.insert(msg.key, texture);
        }
    }

    fn poll_messages(&mut self) {
        while let Ok(msg) = self.thumb_rx.try_recv() {
            // リセット後に届いたプレビューは捨てる
            if !self.thumb_inflight.remove(&msg.key) {
                continue;
            }
            self.pending_thumbs.push(msg);
        }

        while let Ok(msg) = self.msg_rx.try_recv() {
            match msg {
                UiMessage::SearchDone { ticket, outcome } => {
                    self.state.complete(ticket, outcome);
                }
                UiMessage::StatusDone(result) => {
                    self.checking_status = false;
                    self.backend_status = match result {
                        Ok(status) => status.status,
                        Err(err) => err.user_message().to_string(),
                    };
                }
            }
        }
    }

    fn handle_file_drops(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            (!i.raw.hovered_files.is_empty(), i.raw.dropped_files.first().cloned())
        });

        if let Some(file) = dropped {
            self.state.drop_received();
            if let Some(path) = &file.path {
                self.process_path(path);
            } else if let Some(bytes) = &file.bytes {
                match upload_from_bytes(&file.name, bytes.to_vec()) {
                    Ok(upload) => self.process_image(upload),
                    Err(err) => self.status = format!("{err:#}"),
                }
            }
        } else if hovering && !self.state.is_dragging {
            self.state.drag_over();
        } else if !hovering && self.state.is_dragging {
            self.state.drag_leave();
        }
    }

    fn render_upload_panel(&mut self, ui: &mut egui::Ui) {
        match self.state.preview.clone() {
            None => {
                let dragging = self.state.is_dragging;
                let frame = egui::Frame::none()
                    .fill(if dragging { Color32::from_rgb(30, 48, 66) } else { Color32::from_rgb(24, 28, 40) })
                    .stroke(egui::Stroke::new(
                        2.0,
                        if dragging { Color32::from_rgb(66, 153, 225) } else { Color32::from_gray(80) },
                    ))
                    .rounding(egui::Rounding::same(12.0))
                    .inner_margin(egui::Margin::same(24.0));

                frame.show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new("Drop file here").size(16.0).strong());
                        ui.label("OR");
                        if ui.button("Upload File").clicked() {
                            self.choose_image();
                        }
                    });
                });
            }
            Some(key) => {
                ui.vertical_centered(|ui| {
                    let size = egui::vec2(THUMB_SIZE[0] as f32, THUMB_SIZE[1] as f32);
                    let placeholder = match self.thumb_slot(&key) {
                        ThumbSlot::Ready(texture) => {
                            ui.add(egui::Image::new(texture).fit_to_exact_size(size));
                            None
                        }
                        ThumbSlot::Failed => Some("Preview unavailable"),
                        ThumbSlot::Loading => Some("Loading preview..."),
                    };
                    if let Some(text) = placeholder {
                        if let Some(bytes) = self.preview_bytes.clone() {
                            self.request_thumbnail(&key, ThumbSource::Local(bytes));
                        }
                        ui.allocate_ui_with_layout(
                            size,
                            egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
                            |ui| {
                                ui.label(text);
                            },
                        );
                    }
                    if ui.button("Upload Another Image").clicked() {
                        self.reset();
                    }
                });
            }
        }
    }

    fn render_results(&mut self, ui: &mut egui::Ui) {
        match self.state.view() {
            ResultsView::Loading => {
                ui.vertical_centered(|ui| {
                    ui.spinner();
                    ui.label("Finding matches...");
                });
            }
            ResultsView::Error => {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(&self.state.error).color(Color32::from_rgb(229, 62, 62)));
                });
            }
            ResultsView::Results => {
                let cards = CardView::from_matches(&self.state.results, self.client.config());
                let relatives: Vec<String> = self
                    .state
                    .results
                    .iter()
                    .map(|m| m.product.image_url.clone())
                    .collect();
                egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        for (card, relative) in cards.iter().zip(relatives) {
                            self.render_card(ui, card, relative);
                        }
                    });
                });
            }
            ResultsView::Empty => {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("Matching products will appear here.").color(Color32::from_gray(160)));
                });
            }
        }
    }

    fn render_card(&mut self, ui: &mut egui::Ui, card: &CardView, relative: String) {
        let frame = egui::Frame::none()
            .fill(Color32::from_rgb(24, 28, 40))
            .stroke(egui::Stroke::new(1.0, Color32::from_gray(40)))
            .rounding(egui::Rounding::same(10.0))
            .inner_margin(egui::Margin::same(10.0));

        frame.show(ui, |ui| {
            ui.set_width(THUMB_SIZE[0] as f32);
            ui.vertical(|ui| {
                let size = egui::vec2(THUMB_SIZE[0] as f32, THUMB_SIZE[1] as f32);
                let placeholder = match self.thumb_slot(&card.image_src) {
                    ThumbSlot::Ready(texture) => {
                        ui.add(egui::Image::new(texture).fit_to_exact_size(size));
                        None
                    }
                    ThumbSlot::Failed => Some("No image"),
                    ThumbSlot::Loading => Some("Loading..."),
                };
                if let Some(text) = placeholder {
                    self.request_thumbnail(&card.image_src, ThumbSource::Remote(relative));
                    ui.allocate_ui_with_layout(
                        size,
                        egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
                        |ui| {
                            ui.label(RichText::new(text).color(Color32::from_gray(140)));
                        },
                    );
                }
                if let Some(category) = &card.category {
                    ui.label(RichText::new(category.to_uppercase()).size(10.0).color(Color32::from_gray(150)));
                }
                ui.label(RichText::new(&card.title).strong());
                ui.label(&card.price);
                ui.horizontal(|ui| {
                    ui.label("Match:");
                    ui.label(RichText::new(&card.score).color(Color32::from_rgb(56, 161, 105)).strong());
                });
            });
        });
    }
}

/// ワーカースレッドで非同期処理を1つ実行する
fn block_on<F, T>(future: F) -> Result<T, product_matcher_common::SearchError>
where
    F: std::future::Future<Output = T>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| product_matcher_common::SearchError::Transport(e.to_string()))?;
    Ok(runtime.block_on(future))
}

pub fn api_client() -> anyhow::Result<SearchClient> {
    let config = ApiConfig::from_env()?;
    Ok(SearchClient::new(config))
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.is_loading
            || self.checking_status
            || !self.thumb_inflight.is_empty()
            || !self.pending_thumbs.is_empty()
        {
            ctx.request_repaint();
        }
        self.poll_messages();
        self.process_pending_thumbs(ctx);
        self.handle_file_drops(ctx);

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Visual Product Matcher");
                ui.separator();
                ui.label(RichText::new(self.client.config().base_url()).color(Color32::from_gray(170)));
            });
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!self.checking_status, egui::Button::new("Check backend"))
                    .clicked()
                {
                    self.check_backend();
                }
                if !self.backend_status.is_empty() {
                    ui.label(RichText::new(&self.backend_status).color(Color32::from_gray(170)));
                }
                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(RichText::new(&self.status).color(Color32::from_rgb(246, 196, 69)));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_upload_panel(ui);
            ui.add_space(16.0);
            ui.separator();
            self.render_results(ui);
        });
    }
}
