//! Fences desktop
//!
//! Features:
//! - Wallpaper scaled to cover the screen
//! - Fences with a title bar to drag and eight resize handles
//! - Fence edges snap to other fences and to the screen, with guide lines
//! - Icons dragged between slots and fences
//! - Desktop context menu for view mode, sorting and refreshing

use crate::textures::{cover_uv, TextureCache};
use egui::{
    Align2, Color32, Context, CursorIcon, FontId, Id, Key, LayerId, Order, Painter, Pos2, Rect,
    Sense, Stroke, TextureHandle, Ui, Vec2, ViewportCommand,
};
use fencecore::fences::SortOrder;
use fencecore::storage::{SavedLayout, StorageError};
use fencecore::theme::FenceColors;
use fencecore::{
    DesktopApi, DesktopFile, FenceGesture, FenceLayout, FenceSettings, FenceTheme, FileDrag,
    GestureKind, GuideLine, NativeHost, Orientation, ResizeEdges, Selection, SnapEngine, ViewMode,
    Viewport,
};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Fence layout
const TITLE_HEIGHT: f32 = 28.0;
const RESIZE_GRIP: f32 = 8.0;
const BODY_PADDING: f32 = 8.0;
const GRID_CELL: Vec2 = Vec2::new(84.0, 84.0);
const GRID_ICON: f32 = 48.0;
const GRID_LABEL_CHARS: usize = 12;
const LIST_ROW: f32 = 26.0;
const LIST_ICON: f32 = 20.0;
const LIST_LABEL_CHARS: usize = 40;

/// How long a status message stays on screen
const STATUS_SECS: u64 = 4;

/// Results of the background loaders
enum Loaded {
    Files(Vec<DesktopFile>),
    Background(Option<String>),
}

/// Per-frame input gathered while drawing, applied once drawing is done
enum Action {
    BeginGesture { fence_id: String, kind: GestureKind },
    DragGesture(Vec2),
    EndGesture,
    PressFile { fence_id: String, index: usize, at: Pos2 },
    Click { path: PathBuf, ctrl: bool },
    ClearSelection,
    Open(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum MenuAction {
    View(ViewMode),
    Sort(SortOrder),
    ToggleIcons,
    Refresh,
    RefreshBackground,
    Close,
}

pub struct FencesApp {
    settings: FenceSettings,
    settings_path: PathBuf,
    layout_path: PathBuf,
    layout: FenceLayout,
    /// Whether desktop files have arrived at least once
    loaded: bool,
    selection: Selection,
    engine: SnapEngine,
    theme: FenceTheme,
    gesture: Option<FenceGesture>,
    /// Guide lines of the current gesture
    guides: Vec<GuideLine>,
    file_drag: Option<FileDrag>,
    textures: TextureCache,
    viewport: Viewport,
    tx: Sender<Loaded>,
    rx: Receiver<Loaded>,
    status_message: String,
    status_time: Instant,
}

impl FencesApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings_path = FenceSettings::default_path();
        let settings = FenceSettings::load_or_default(&settings_path);
        let (tx, rx) = mpsc::channel();

        let mut app = Self {
            engine: SnapEngine::new(settings.snap_threshold),
            settings,
            settings_path,
            layout_path: SavedLayout::default_path(),
            layout: FenceLayout::default(),
            loaded: false,
            selection: Selection::default(),
            theme: FenceTheme::default(),
            gesture: None,
            guides: Vec::new(),
            file_drag: None,
            textures: TextureCache::default(),
            viewport: Viewport::default(),
            tx,
            rx,
            status_message: "loading desktop".to_string(),
            status_time: Instant::now(),
        };
        app.refresh_files(&cc.egui_ctx);
        app.refresh_background(&cc.egui_ctx);
        app
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
        self.status_time = Instant::now();
    }

    /// Re-read the desktop directories in the background
    fn refresh_files(&self, ctx: &Context) {
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        let dirs = self.settings.resolved_desktop_dirs();
        let show_hidden = self.settings.show_hidden;
        std::thread::spawn(move || {
            let api = DesktopApi::new(NativeHost::new(show_hidden), dirs);
            let files = api.get_desktop_files();
            debug!(count = files.len(), "desktop files read");
            if tx.send(Loaded::Files(files)).is_ok() {
                ctx.request_repaint();
            }
        });
    }

    fn refresh_background(&self, ctx: &Context) {
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let api = DesktopApi::new(NativeHost::default(), Vec::new());
            let background = api.get_desktop_background();
            debug!(found = background.is_some(), "wallpaper read");
            if tx.send(Loaded::Background(background)).is_ok() {
                ctx.request_repaint();
            }
        });
    }

    fn poll_loader(&mut self, ctx: &Context) {
        while let Ok(loaded) = self.rx.try_recv() {
            match loaded {
                Loaded::Files(files) => self.apply_files(files),
                Loaded::Background(uri) => self.textures.set_wallpaper(ctx, uri.as_deref()),
            }
        }
    }

    fn apply_files(&mut self, files: Vec<DesktopFile>) {
        let count = files.len();
        self.layout = match SavedLayout::load(&self.layout_path) {
            Ok(saved) => FenceLayout::restore(files, &saved, &self.settings),
            Err(StorageError::NotFound(_)) => FenceLayout::from_files(files, &self.settings),
            Err(e) => {
                warn!(path = %self.layout_path.display(), error = %e, "ignoring saved layout");
                FenceLayout::from_files(files, &self.settings)
            }
        };
        self.gesture = None;
        self.guides.clear();
        self.file_drag = None;
        self.textures.clear_icons();
        self.keep_fences_on_screen();
        if self.loaded {
            self.set_status(format!("{} items", count));
        } else {
            self.status_message.clear();
        }
        self.loaded = true;
        info!(files = count, fences = self.layout.fences().len(), "desktop ready");
    }

    fn keep_fences_on_screen(&mut self) {
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return;
        }
        let moved: Vec<(String, fencecore::BoundingBox)> = self
            .layout
            .fences()
            .iter()
            .map(|f| (f.id.clone(), f.position.kept_within(self.viewport)))
            .collect();
        for (id, bounds) in moved {
            self.layout.set_position(&id, bounds);
        }
    }

    fn save_layout(&mut self) {
        if !self.loaded {
            return;
        }
        if let Err(e) = self.layout.to_saved().save(&self.layout_path) {
            warn!(path = %self.layout_path.display(), error = %e, "could not save layout");
            self.set_status(format!("could not save layout: {}", e));
        }
    }

    fn save_settings(&mut self) {
        if let Err(e) = self.settings.save(&self.settings_path) {
            warn!(path = %self.settings_path.display(), error = %e, "could not save settings");
            self.set_status(format!("could not save settings: {}", e));
        }
    }

    fn open_file(&mut self, path: &Path) {
        info!(path = %path.display(), "opening");
        if let Err(e) = open::that(path) {
            warn!(path = %path.display(), error = %e, "open failed");
            self.set_status(format!("cannot open {}: {}", path.display(), e));
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::BeginGesture { fence_id, kind } => {
                if let Some(fence) = self.layout.get(&fence_id) {
                    self.gesture = Some(FenceGesture::begin(fence_id, kind, fence.position));
                }
            }
            Action::DragGesture(delta) => {
                if let Some(gesture) = self.gesture.as_mut() {
                    let boxes = self.layout.box_set();
                    let outcome = gesture.drag_by(delta.x, delta.y, &self.engine, &boxes, self.viewport);
                    self.layout.set_position(&gesture.fence_id, outcome.bounds);
                    self.guides = outcome.guides;
                }
            }
            Action::EndGesture => {
                if self.gesture.take().is_some() {
                    self.guides.clear();
                    self.save_layout();
                }
            }
            Action::PressFile { fence_id, index, at } => {
                self.file_drag = Some(FileDrag::press(fence_id, index, at));
            }
            Action::Click { path, ctrl } => self.selection.click(path, ctrl),
            Action::ClearSelection => self.selection.clear(),
            Action::Open(path) => self.open_file(&path),
        }
    }

    fn apply_menu(&mut self, ctx: &Context, action: MenuAction) {
        debug!(?action, "menu");
        match action {
            MenuAction::View(mode) => {
                self.settings.view_mode = mode;
                self.save_settings();
            }
            MenuAction::Sort(order) => {
                self.layout.sort_files(order);
                self.save_layout();
            }
            MenuAction::ToggleIcons => {
                self.settings.icons_visible = !self.settings.icons_visible;
                self.save_settings();
            }
            MenuAction::Refresh => {
                self.set_status("refreshing");
                self.refresh_files(ctx);
            }
            MenuAction::RefreshBackground => self.refresh_background(ctx),
            MenuAction::Close => ctx.send_viewport_cmd(ViewportCommand::Close),
        }
    }

    fn handle_keys(&mut self, ctx: &Context) {
        let (refresh, escape) = ctx.input(|i| (i.key_pressed(Key::F5), i.key_pressed(Key::Escape)));
        if refresh {
            self.apply_menu(ctx, MenuAction::Refresh);
        }
        if escape {
            self.selection.clear();
            self.file_drag = None;
            self.cancel_gesture();
        }
    }

    /// Put the fence back where the gesture found it
    fn cancel_gesture(&mut self) {
        if let Some(gesture) = self.gesture.take() {
            self.layout.set_position(&gesture.fence_id, gesture.start());
            self.guides.clear();
        }
    }

    /// Track a pressed icon and drop it when the button comes up
    fn update_file_drag(&mut self, ctx: &Context) {
        let (pointer, down) = ctx.input(|i| (i.pointer.interact_pos(), i.pointer.primary_down()));
        let Some(drag) = self.file_drag.as_mut() else {
            return;
        };
        if let Some(pos) = pointer {
            drag.move_to(pos);
        }
        if down {
            if drag.is_active() {
                ctx.set_cursor_icon(CursorIcon::Grabbing);
            }
            return;
        }

        let Some(drag) = self.file_drag.take() else {
            return;
        };
        if !drag.is_active() {
            return;
        }
        if let Some((to_id, to_index)) = drop_target(&self.layout, drag.pointer(), self.settings.view_mode) {
            if self.layout.move_file(&drag.fence_id, drag.index, &to_id, to_index) {
                debug!(from = %drag.fence_id, to = %to_id, to_index, "file moved");
                self.save_layout();
            }
        }
    }

    fn draw_background(&self, ui: &mut Ui) {
        let rect = ui.max_rect();
        let painter = ui.painter();
        match self.textures.wallpaper() {
            Some(tex) => {
                painter.image(tex.id(), rect, cover_uv(tex.size_vec2(), rect.size()), Color32::WHITE);
            }
            None => {
                painter.rect_filled(rect, 0.0, FenceColors::DESKTOP);
            }
        }
    }

    fn draw_fences(&mut self, ui: &mut Ui, actions: &mut Vec<Action>, menu: &mut Option<MenuAction>) {
        let ctx = ui.ctx().clone();
        let mode = self.settings.view_mode;
        let hover = ctx.input(|i| i.pointer.hover_pos());
        let ctrl = ctx.input(|i| i.modifiers.command);
        let dragging = self.file_drag.as_ref().filter(|d| d.is_active());

        for fence in self.layout.fences() {
            let rect = fence.position.to_rect();
            let title = title_rect(rect);
            let body = body_rect(rect);
            let painter = ui.painter();

            painter.rect_filled(rect, self.theme.fence_rounding(), FenceColors::FENCE_FILL);
            painter.rect_filled(title, self.theme.title_rounding(), FenceColors::TITLE_FILL);
            painter.rect_stroke(rect, self.theme.fence_rounding(), Stroke::new(1.0, FenceColors::BORDER));
            painter.text(
                title.center(),
                Align2::CENTER_CENTER,
                &fence.name,
                FontId::proportional(self.theme.font_size_title),
                FenceColors::TEXT,
            );

            if dragging.is_some() && hover.is_some_and(|p| body.contains(p)) {
                painter.rect_filled(body.shrink(2.0), self.theme.fence_rounding(), FenceColors::DROP_TARGET);
            }

            // body first so icons on top of it win the pointer
            let body_resp = ui.interact(body, Id::new(("fence-body", &fence.id)), Sense::click());
            if body_resp.clicked() {
                actions.push(Action::ClearSelection);
            }
            body_resp.context_menu(|ui| desktop_menu(ui, &self.settings, menu));

            let clipped = painter.with_clip_rect(body);
            for (index, file) in fence.files.iter().enumerate() {
                let slot = slot_rect(body, index, mode);
                if !body.intersects(slot) {
                    continue;
                }
                let response = ui.interact(
                    slot.intersect(body),
                    Id::new(("fence-file", &fence.id, index)),
                    Sense::click_and_drag(),
                );
                let look = FileLook {
                    selected: self.selection.contains(&file.path),
                    hovered: response.hovered(),
                    lifted: dragging.is_some_and(|d| d.fence_id == fence.id && d.index == index),
                };
                let texture = self.textures.icon(&ctx, file);
                draw_file(&clipped, texture, file, slot, mode, look);

                if response.double_clicked() {
                    actions.push(Action::Open(file.path.clone()));
                } else if response.clicked() {
                    actions.push(Action::Click { path: file.path.clone(), ctrl });
                }
                if response.drag_started() {
                    let at = ctx.input(|i| i.pointer.press_origin()).unwrap_or(slot.center());
                    actions.push(Action::PressFile { fence_id: fence.id.clone(), index, at });
                }
                if !file.name.is_empty() {
                    response.on_hover_text(&file.name);
                }
            }

            let title_resp = ui.interact(title, Id::new(("fence-title", &fence.id)), Sense::drag());
            if title_resp.hovered() || title_resp.dragged() {
                ctx.set_cursor_icon(CursorIcon::Move);
            }
            push_gesture(actions, &title_resp, &fence.id, GestureKind::Move);

            for (n, edges) in ResizeEdges::ALL.iter().enumerate() {
                let handle = edges.handle_rect(rect, RESIZE_GRIP);
                let resp = ui.interact(handle, Id::new(("fence-resize", &fence.id, n)), Sense::drag());
                if resp.hovered() || resp.dragged() {
                    ctx.set_cursor_icon(edges.cursor_icon());
                }
                push_gesture(actions, &resp, &fence.id, GestureKind::Resize(*edges));
            }
        }
    }

    fn draw_overlays(&self, ctx: &Context) {
        if !self.guides.is_empty() {
            let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("snap-guides")));
            let screen = ctx.screen_rect();
            let stroke = self.theme.guide_stroke();
            for line in &self.guides {
                let points = match line.orientation {
                    Orientation::Vertical => [Pos2::new(line.offset, screen.min.y), Pos2::new(line.offset, screen.max.y)],
                    Orientation::Horizontal => [Pos2::new(screen.min.x, line.offset), Pos2::new(screen.max.x, line.offset)],
                };
                painter.line_segment(points, stroke);
            }
        }

        let Some(drag) = self.file_drag.as_ref().filter(|d| d.is_active()) else {
            return;
        };
        let Some(file) = self.layout.file(&drag.fence_id, drag.index) else {
            return;
        };
        let painter = ctx.layer_painter(LayerId::new(Order::Tooltip, Id::new("file-drag")));
        let slot = Rect::from_center_size(drag.pointer(), GRID_CELL);
        painter.rect_filled(slot, self.theme.fence_rounding(), FenceColors::SELECTION);
        painter.text(
            slot.center(),
            Align2::CENTER_CENTER,
            file.fallback_glyph(),
            FontId::proportional(GRID_ICON * 0.6),
            FenceColors::TEXT,
        );
        painter.text(
            Pos2::new(slot.center().x, slot.max.y + 2.0),
            Align2::CENTER_TOP,
            short_label(&file.name, GRID_LABEL_CHARS),
            FontId::proportional(self.theme.font_size_small),
            FenceColors::TEXT,
        );
    }

    fn draw_status(&self, ui: &mut Ui) {
        let elapsed = self.status_time.elapsed();
        if self.status_message.is_empty() || elapsed >= Duration::from_secs(STATUS_SECS) {
            return;
        }
        let rect = ui.max_rect();
        ui.painter().text(
            Pos2::new(rect.min.x + 12.0, rect.max.y - 12.0),
            Align2::LEFT_BOTTOM,
            &self.status_message,
            FontId::proportional(self.theme.font_size_small),
            FenceColors::TEXT,
        );
        ui.ctx().request_repaint_after(Duration::from_secs(STATUS_SECS) - elapsed);
    }
}

impl eframe::App for FencesApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_loader(ctx);
        self.handle_keys(ctx);

        let viewport = Viewport::from_rect(ctx.screen_rect());
        if viewport != self.viewport {
            self.viewport = viewport;
            self.keep_fences_on_screen();
        }

        let mut actions = Vec::new();
        let mut menu_action = None;

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.draw_background(ui);

                let desktop = ui.interact(ui.max_rect(), Id::new("desktop"), Sense::click());
                if desktop.clicked() {
                    actions.push(Action::ClearSelection);
                }
                desktop.context_menu(|ui| desktop_menu(ui, &self.settings, &mut menu_action));

                if self.settings.icons_visible {
                    self.draw_fences(ui, &mut actions, &mut menu_action);
                }
                self.draw_status(ui);
            });

        for action in actions {
            self.apply(action);
        }
        if let Some(action) = menu_action {
            self.apply_menu(ctx, action);
        }
        self.update_file_drag(ctx);
        self.draw_overlays(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.save_layout();
    }
}

fn push_gesture(actions: &mut Vec<Action>, response: &egui::Response, fence_id: &str, kind: GestureKind) {
    if response.drag_started() {
        actions.push(Action::BeginGesture { fence_id: fence_id.to_string(), kind });
    }
    if response.dragged() {
        actions.push(Action::DragGesture(response.drag_delta()));
    }
    if response.drag_stopped() {
        actions.push(Action::EndGesture);
    }
}

fn desktop_menu(ui: &mut Ui, settings: &FenceSettings, chosen: &mut Option<MenuAction>) {
    if ui.radio(settings.view_mode == ViewMode::Grid, "Grid view").clicked() {
        *chosen = Some(MenuAction::View(ViewMode::Grid));
    }
    if ui.radio(settings.view_mode == ViewMode::List, "List view").clicked() {
        *chosen = Some(MenuAction::View(ViewMode::List));
    }
    ui.separator();
    if ui.button("Sort by name (A to Z)").clicked() {
        *chosen = Some(MenuAction::Sort(SortOrder::Ascending));
    }
    if ui.button("Sort by name (Z to A)").clicked() {
        *chosen = Some(MenuAction::Sort(SortOrder::Descending));
    }
    ui.separator();
    let icons = if settings.icons_visible { "Hide desktop icons" } else { "Show desktop icons" };
    if ui.button(icons).clicked() {
        *chosen = Some(MenuAction::ToggleIcons);
    }
    ui.separator();
    if ui.button("Refresh").clicked() {
        *chosen = Some(MenuAction::Refresh);
    }
    if ui.button("Refresh desktop background").clicked() {
        *chosen = Some(MenuAction::RefreshBackground);
    }
    ui.separator();
    if ui.button("Close").clicked() {
        *chosen = Some(MenuAction::Close);
    }
    if chosen.is_some() {
        ui.close_menu();
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct FileLook {
    selected: bool,
    hovered: bool,
    /// Being dragged elsewhere
    lifted: bool,
}

fn draw_file(
    painter: &Painter,
    texture: Option<&TextureHandle>,
    file: &DesktopFile,
    slot: Rect,
    mode: ViewMode,
    look: FileLook,
) {
    if look.selected {
        painter.rect_filled(slot.shrink(2.0), 4.0, FenceColors::SELECTION);
    } else if look.hovered {
        painter.rect_filled(slot.shrink(2.0), 4.0, Color32::from_white_alpha(20));
    }

    let (icon_rect, label_pos, align, chars) = match mode {
        ViewMode::Grid => {
            let icon = Rect::from_center_size(
                Pos2::new(slot.center().x, slot.min.y + 6.0 + GRID_ICON / 2.0),
                Vec2::splat(GRID_ICON),
            );
            (icon, Pos2::new(slot.center().x, icon.max.y + 4.0), Align2::CENTER_TOP, GRID_LABEL_CHARS)
        }
        ViewMode::List => {
            let icon = Rect::from_center_size(
                Pos2::new(slot.min.x + 4.0 + LIST_ICON / 2.0, slot.center().y),
                Vec2::splat(LIST_ICON),
            );
            (icon, Pos2::new(icon.max.x + 8.0, slot.center().y), Align2::LEFT_CENTER, LIST_LABEL_CHARS)
        }
    };

    let tint = if look.lifted { Color32::from_white_alpha(90) } else { Color32::WHITE };
    match texture {
        Some(tex) => {
            painter.image(tex.id(), icon_rect, Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)), tint);
        }
        None => {
            painter.text(
                icon_rect.center(),
                Align2::CENTER_CENTER,
                file.fallback_glyph(),
                FontId::proportional(icon_rect.height() * 0.7),
                tint,
            );
        }
    }

    painter.text(label_pos, align, short_label(&file.name, chars), FontId::proportional(12.0), FenceColors::TEXT);
}

fn title_rect(fence: Rect) -> Rect {
    Rect::from_min_max(fence.min, Pos2::new(fence.max.x, fence.min.y + TITLE_HEIGHT))
}

fn body_rect(fence: Rect) -> Rect {
    Rect::from_min_max(Pos2::new(fence.min.x, fence.min.y + TITLE_HEIGHT), fence.max)
}

fn grid_columns(body_width: f32) -> usize {
    (((body_width - 2.0 * BODY_PADDING) / GRID_CELL.x).floor() as usize).max(1)
}

/// Where file `index` is drawn inside a fence body.
fn slot_rect(body: Rect, index: usize, mode: ViewMode) -> Rect {
    match mode {
        ViewMode::Grid => {
            let cols = grid_columns(body.width());
            let col = (index % cols) as f32;
            let row = (index / cols) as f32;
            Rect::from_min_size(
                body.min + Vec2::new(BODY_PADDING + col * GRID_CELL.x, BODY_PADDING + row * GRID_CELL.y),
                GRID_CELL,
            )
        }
        ViewMode::List => Rect::from_min_size(
            body.min + Vec2::new(BODY_PADDING, BODY_PADDING + index as f32 * LIST_ROW),
            Vec2::new((body.width() - 2.0 * BODY_PADDING).max(0.0), LIST_ROW),
        ),
    }
}

/// Fence and slot a file dropped at `pos` goes to. The topmost fence wins;
/// a drop on empty fence space appends.
fn drop_target(layout: &FenceLayout, pos: Pos2, mode: ViewMode) -> Option<(String, usize)> {
    layout.fences().iter().rev().find_map(|fence| {
        let body = body_rect(fence.position.to_rect());
        if !body.contains(pos) {
            return None;
        }
        let index = (0..fence.files.len())
            .find(|&i| slot_rect(body, i, mode).contains(pos))
            .unwrap_or(fence.files.len());
        Some((fence.id.clone(), index))
    })
}

fn short_label(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        return name.to_string();
    }
    let mut label: String = name.chars().take(max_chars.saturating_sub(1)).collect();
    label.push('…');
    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use fencecore::{BoundingBox, Fence};

    fn file(name: &str) -> DesktopFile {
        DesktopFile {
            name: name.to_string(),
            path: PathBuf::from(format!("/desk/{}", name)),
            is_directory: false,
            is_file: true,
            ext: fencecore::desktop_data::extract_file_ext(name),
            icon: String::new(),
        }
    }

    fn layout() -> FenceLayout {
        let mut a = Fence::new("a", "A", BoundingBox::new(0.0, 0.0, 300.0, 300.0));
        a.files = vec![file("one.txt"), file("two.txt"), file("three.txt")];
        let mut b = Fence::new("b", "B", BoundingBox::new(200.0, 0.0, 300.0, 300.0));
        b.files = vec![file("four.txt")];
        FenceLayout::new(vec![a, b])
    }

    #[test]
    fn test_grid_slots_wrap() {
        // 300 wide body fits three 84px cells after padding
        let body = Rect::from_min_size(Pos2::new(0.0, 28.0), Vec2::new(300.0, 272.0));
        assert_eq!(grid_columns(body.width()), 3);
        assert_eq!(slot_rect(body, 0, ViewMode::Grid).min, Pos2::new(8.0, 36.0));
        assert_eq!(slot_rect(body, 2, ViewMode::Grid).min, Pos2::new(176.0, 36.0));
        assert_eq!(slot_rect(body, 3, ViewMode::Grid).min, Pos2::new(8.0, 120.0));
    }

    #[test]
    fn test_narrow_grid_keeps_one_column() {
        assert_eq!(grid_columns(10.0), 1);
    }

    #[test]
    fn test_list_slots() {
        let body = Rect::from_min_size(Pos2::ZERO, Vec2::new(200.0, 100.0));
        let slot = slot_rect(body, 2, ViewMode::List);
        assert_eq!(slot.min, Pos2::new(8.0, 60.0));
        assert_eq!(slot.width(), 184.0);
    }

    #[test]
    fn test_drop_on_icon_and_on_empty_space() {
        let layout = layout();
        // second slot of fence a, left of where b starts
        assert_eq!(
            drop_target(&layout, Pos2::new(100.0, 60.0), ViewMode::Grid),
            Some(("a".to_string(), 1))
        );
        // below a's icons
        assert_eq!(
            drop_target(&layout, Pos2::new(50.0, 250.0), ViewMode::Grid),
            Some(("a".to_string(), 3))
        );
        // overlap goes to b, which is drawn on top
        assert_eq!(
            drop_target(&layout, Pos2::new(250.0, 60.0), ViewMode::Grid),
            Some(("b".to_string(), 0))
        );
        // title bars and the desktop take no drops
        assert_eq!(drop_target(&layout, Pos2::new(50.0, 10.0), ViewMode::Grid), None);
        assert_eq!(drop_target(&layout, Pos2::new(600.0, 60.0), ViewMode::Grid), None);
    }

    #[test]
    fn test_short_label() {
        assert_eq!(short_label("notes.txt", 12), "notes.txt");
        assert_eq!(short_label("a very long file name.txt", 8), "a very …");
    }

    #[test]
    fn test_title_and_body_split() {
        let rect = Rect::from_min_size(Pos2::new(10.0, 10.0), Vec2::new(200.0, 120.0));
        assert_eq!(title_rect(rect).height(), TITLE_HEIGHT);
        assert_eq!(body_rect(rect).min.y, 10.0 + TITLE_HEIGHT);
        assert_eq!(body_rect(rect).max, rect.max);
    }
}
