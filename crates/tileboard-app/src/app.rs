//! Core application state and lifecycle.

use kurbo::{Point, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tileboard_core::config::{ConfigResult, WorkspaceConfig};
use tileboard_core::input::{InputState, Key as InputKey, MouseButton as InputButton, PointerEvent};
use tileboard_core::workspace::Workspace;
use tileboard_render::{RenderContext, Renderer, RendererError, RenderResult, VelloRenderer};
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalPosition;
#[cfg(not(target_arch = "wasm32"))]
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use crate::event_handler::{EventHandler, PressOutcome};
use crate::ui::{UiAction, UiState, render_ui};

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "TILEBOARD_CONFIG";

#[cfg(not(target_arch = "wasm32"))]
mod tile_ops {
    use tileboard_core::images::CatalogImageSource;
    use tileboard_core::tile::TileId;
    use tileboard_core::workspace::Workspace;

    pub type SharedSource = CatalogImageSource;

    /// Create a tile, blocking on the image fetch.
    pub fn add_tile(workspace: &mut Workspace, source: &SharedSource) -> TileId {
        pollster::block_on(workspace.add_tile(source))
    }
}

#[cfg(target_arch = "wasm32")]
mod tile_ops {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use tileboard_core::config::TileGeometry;
    use tileboard_core::images::CatalogImageSource;
    use tileboard_core::tile::TileFields;
    use tileboard_core::workspace::random_tile_fields;

    pub type SharedSource = Rc<CatalogImageSource>;

    thread_local! {
        static PENDING_TILES: RefCell<Vec<TileFields>> = const { RefCell::new(Vec::new()) };
        static IN_FLIGHT: Cell<usize> = const { Cell::new(0) };
    }

    /// Start building a tile in the background. The result shows up in
    /// take_pending_tiles() on a later frame.
    pub fn request_tile(source: &SharedSource, geometry: TileGeometry) {
        let source = Rc::clone(source);
        IN_FLIGHT.with(|n| n.set(n.get() + 1));
        wasm_bindgen_futures::spawn_local(async move {
            let mut rng = rand::rng();
            let fields = random_tile_fields(source.as_ref(), geometry, &mut rng).await;
            PENDING_TILES.with(|cell| cell.borrow_mut().push(fields));
            IN_FLIGHT.with(|n| n.set(n.get().saturating_sub(1)));
        });
    }

    /// Take every tile whose fetch has finished, in completion order.
    pub fn take_pending_tiles() -> Vec<TileFields> {
        PENDING_TILES.with(|cell| std::mem::take(&mut *cell.borrow_mut()))
    }

    /// Requests still waiting on their fetch.
    pub fn in_flight() -> usize {
        IN_FLIGHT.with(|n| n.get())
    }
}

/// Parse a CSS color string like "#ff0000".
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.is_ascii() && s.starts_with('#') && s.len() == 7 {
        let r = u8::from_str_radix(&s[1..3], 16).ok()?;
        let g = u8::from_str_radix(&s[3..5], 16).ok()?;
        let b = u8::from_str_radix(&s[5..7], 16).ok()?;
        Some(Color::from_rgba8(r, g, b, 255))
    } else {
        None
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Canvas background as "#rrggbb".
    pub background_color: String,
    pub workspace: WorkspaceConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Tileboard".to_string(),
            width: 1280,
            height: 800,
            background_color: "#000000".to_string(),
            workspace: WorkspaceConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file.
    pub fn load(path: &std::path::Path) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from the file named by `TILEBOARD_CONFIG`, or use defaults.
    ///
    /// A missing or broken file is logged and ignored.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            return Self::default();
        };
        match Self::load(std::path::Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring {}: {}", CONFIG_ENV, e);
                Self::default()
            }
        }
    }

    /// Background color, black if the configured string does not parse.
    pub fn background(&self) -> Color {
        parse_color(&self.background_color).unwrap_or_else(|| {
            log::warn!("Invalid background color {:?}", self.background_color);
            Color::BLACK
        })
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    tile_renderer: VelloRenderer,
    /// Texture blitter for RGBA->surface format conversion (needed for WebGPU/WASM)
    texture_blitter: vello::wgpu::util::TextureBlitter,
    background: Color,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    ui_state: UiState,

    // State
    workspace: Workspace,
    image_source: tile_ops::SharedSource,
    input: InputState,
    config: AppConfig,

    event_handler: EventHandler,
}

impl AppState {
    /// Convert a physical window position to workspace coordinates.
    fn to_logical(&self, position: PhysicalPosition<f64>) -> Point {
        let scale = self.window.scale_factor();
        Point::new(position.x / scale, position.y / scale)
    }

    /// Workspace size for a physical surface size.
    fn logical_size(&self, width: u32, height: u32) -> Size {
        let scale = self.window.scale_factor();
        Size::new(width as f64 / scale, height as f64 / scale)
    }

    fn add_tile(&mut self) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let id = tile_ops::add_tile(&mut self.workspace, &self.image_source);
            log::info!("Tile {} added", id);
        }

        #[cfg(target_arch = "wasm32")]
        {
            tile_ops::request_tile(&self.image_source, self.workspace.default_tile());
        }
    }

    fn apply_action(&mut self, action: UiAction) {
        match action {
            UiAction::AddTile => self.add_tile(),
            UiAction::RemoveTile(id) => {
                if self.workspace.selected() == Some(id) {
                    self.event_handler.remove_selected(&mut self.workspace);
                } else {
                    self.workspace.remove_tile(id);
                    self.event_handler.sync_selection(&self.workspace);
                }
            }
            UiAction::ClearSelection => self.clear_selection(),
        }
    }

    fn clear_selection(&mut self) {
        self.event_handler.cancel(&mut self.workspace);
        self.workspace.clear_selection();
        self.event_handler.sync_selection(&self.workspace);
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
    /// Window waiting for async surface creation (WASM only)
    pending_window: Option<Arc<Window>>,
    /// Flag to indicate async init is in progress
    #[cfg(target_arch = "wasm32")]
    init_in_progress: std::cell::Cell<bool>,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
            pending_window: None,
            #[cfg(target_arch = "wasm32")]
            init_in_progress: std::cell::Cell::new(false),
        }
    }

    /// Run the application with default configuration.
    pub async fn run() {
        Self::run_with_config(AppConfig::default()).await
    }

    /// Run the application.
    pub async fn run_with_config(config: AppConfig) {
        let event_loop = EventLoop::new().expect("Failed to create event loop");
        let app = App::with_config(config);

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::EventLoopExtWebSys;
            event_loop.spawn_app(app);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut app = app;
            event_loop.run_app(&mut app).expect("Event loop error");
        }
    }

    fn create_vello_renderer(device: &vello::wgpu::Device) -> RenderResult<vello::Renderer> {
        vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(e.to_string()))
    }

    /// Finish initialization after surface is created.
    fn finish_init(&mut self, window: Arc<Window>, surface: RenderSurface<'static>) {
        let Some(render_cx) = self.render_cx.as_ref() else {
            log::error!("{}", RendererError::InitFailed("no render context".to_string()));
            return;
        };
        let device = &render_cx.devices[surface.dev_id].device;

        let vello_renderer = match Self::create_vello_renderer(device) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };

        // Vello renders to Rgba8Unorm but the surface may be Bgra8Unorm
        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface.config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let scale = window.scale_factor();
        let bounds = Size::new(
            surface.config.width as f64 / scale,
            surface.config.height as f64 / scale,
        );
        let workspace_config = &self.config.workspace;
        let workspace = Workspace::with_config(bounds, workspace_config);

        #[cfg(not(target_arch = "wasm32"))]
        let image_source = workspace_config.image_source();
        #[cfg(target_arch = "wasm32")]
        let image_source = std::rc::Rc::new(workspace_config.image_source());

        log::info!(
            "Tileboard initialized - {}x{}",
            surface.config.width,
            surface.config.height
        );
        log::info!("Shortcuts: Delete/Backspace removes the selected tile, Escape cancels");

        self.state = Some(AppState {
            window: window.clone(),
            surface,
            vello_renderer,
            tile_renderer: VelloRenderer::new(),
            texture_blitter,
            background: self.config.background(),
            egui_ctx,
            egui_state,
            egui_renderer,
            ui_state: UiState::default(),
            workspace,
            image_source,
            input: InputState::new(),
            config: self.config.clone(),
            event_handler: EventHandler::new(workspace_config),
        });

        self.pending_window = None;

        window.request_redraw();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.pending_window.is_some() {
            return;
        }

        log::info!("Creating window...");

        #[cfg(not(target_arch = "wasm32"))]
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        // On WASM, attach a canvas to the DOM that fills the viewport
        #[cfg(target_arch = "wasm32")]
        let window_attrs = {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            let web_window = web_sys::window().expect("No window");
            let document = web_window.document().expect("No document");

            let viewport_width = web_window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(self.config.width as f64);
            let viewport_height = web_window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(self.config.height as f64);

            if let Some(loading) = document.get_element_by_id("loading") {
                loading.remove();
            }

            let canvas = document
                .get_element_by_id("tileboard-canvas")
                .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
                .or_else(|| {
                    let app_div = document.get_element_by_id("app")?;
                    let canvas = document.create_element("canvas").ok()?;
                    canvas.set_id("tileboard-canvas");
                    app_div.append_child(&canvas).ok()?;
                    canvas.dyn_into::<web_sys::HtmlCanvasElement>().ok()
                })
                .expect("Failed to create canvas");

            // Size the backing store in device pixels for sharp rendering
            let dpr = web_window.device_pixel_ratio();
            let physical_width = (viewport_width * dpr) as u32;
            let physical_height = (viewport_height * dpr) as u32;

            canvas.set_width(physical_width);
            canvas.set_height(physical_height);
            let style = canvas.style();
            let _ = style.set_property("width", "100%");
            let _ = style.set_property("height", "100%");
            let _ = style.set_property("display", "block");
            let _ = style.set_property("position", "fixed");
            let _ = style.set_property("top", "0");
            let _ = style.set_property("left", "0");

            log::info!(
                "Canvas created: {}x{} (physical: {}x{}, dpr: {})",
                viewport_width,
                viewport_height,
                physical_width,
                physical_height,
                dpr
            );

            Window::default_attributes()
                .with_title(&self.config.title)
                .with_canvas(Some(canvas))
        };

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("Failed to create window"),
        );

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };

        log::info!("Surface size: {}x{}", width, height);

        // On native, block on async surface creation
        #[cfg(not(target_arch = "wasm32"))]
        {
            let render_cx = self.render_cx.get_or_insert_with(vello::util::RenderContext::new);

            let surface = pollster::block_on(render_cx.create_surface(
                window.clone(),
                width,
                height,
                PresentMode::AutoVsync,
            ))
            .expect("Failed to create surface");

            // SAFETY: the surface borrows the window, which AppState keeps alive
            // alongside it for the rest of the program.
            let surface: RenderSurface<'static> = unsafe { std::mem::transmute(surface) };
            self.finish_init(window, surface);
        }

        // On WASM, store window for later async initialization
        #[cfg(target_arch = "wasm32")]
        {
            self.pending_window = Some(window);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        #[cfg(target_arch = "wasm32")]
        if self.state.is_none() {
            if let Some(window) = self.pending_window.clone() {
                if !self.init_in_progress.get() {
                    self.init_in_progress.set(true);

                    let web_window = web_sys::window().expect("No window");
                    let dpr = web_window.device_pixel_ratio();
                    let viewport_width = web_window
                        .inner_width()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(self.config.width as f64);
                    let viewport_height = web_window
                        .inner_height()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(self.config.height as f64);

                    let width = (viewport_width * dpr) as u32;
                    let height = (viewport_height * dpr) as u32;

                    let self_ptr = self as *mut Self;
                    let window_clone = window.clone();

                    wasm_bindgen_futures::spawn_local(async move {
                        log::info!("Creating surface asynchronously...");
                        let mut render_cx = vello::util::RenderContext::new();

                        match render_cx
                            .create_surface(window_clone.clone(), width, height, PresentMode::AutoVsync)
                            .await
                        {
                            Ok(surface) => {
                                let surface: RenderSurface<'static> =
                                    unsafe { std::mem::transmute(surface) };

                                // SAFETY: WASM is single-threaded and the event
                                // loop keeps the App alive.
                                let app = unsafe { &mut *self_ptr };
                                app.render_cx = Some(render_cx);
                                app.finish_init(window_clone, surface);
                            }
                            Err(e) => {
                                log::error!("{}", RendererError::Surface(format!("{:?}", e)));
                                let app = unsafe { &mut *self_ptr };
                                app.init_in_progress.set(false);
                            }
                        }
                    });
                }

                window.request_redraw();
            }
            return;
        }

        let Some(state) = &mut self.state else {
            return;
        };

        // Let egui process the event first
        let egui_response = state.egui_state.on_window_event(&state.window, &event);

        // A gesture in flight keeps the pointer even over egui areas
        let egui_wants_input = !state.event_handler.is_manipulating()
            && (egui_response.consumed
                || state.egui_ctx.is_pointer_over_area()
                || state.egui_ctx.wants_pointer_input()
                || state.egui_ctx.wants_keyboard_input());

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }

                let bounds = state.logical_size(size.width, size.height);
                state.workspace.set_bounds(bounds);

                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }

                state.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                #[cfg(target_arch = "wasm32")]
                {
                    for fields in tile_ops::take_pending_tiles() {
                        let id = state.workspace.insert_tile(fields);
                        log::info!("Tile {} added", id);
                    }
                    state.ui_state.pending_tiles = tile_ops::in_flight();
                }

                state.ui_state.update(&state.workspace);

                let egui_input = state.egui_state.take_egui_input(&state.window);
                let mut deferred_action: Option<UiAction> = None;
                let egui_output = state.egui_ctx.run(egui_input, |ctx| {
                    deferred_action = render_ui(ctx, &state.ui_state);
                });

                state
                    .egui_state
                    .handle_platform_output(&state.window, egui_output.platform_output);
                let egui_primitives = state
                    .egui_ctx
                    .tessellate(egui_output.shapes, egui_output.pixels_per_point);

                if let Some(action) = deferred_action {
                    log::debug!("UI action: {:?}", action);
                    state.apply_action(action);
                }

                let width = state.surface.config.width;
                let height = state.surface.config.height;

                let render_ctx = RenderContext::new(&state.workspace, Size::new(width as f64, height as f64))
                    .with_scale_factor(state.window.scale_factor())
                    .with_background(state.background)
                    .with_moveable(Some(state.event_handler.moveable()))
                    .with_tile_view(state.event_handler.tile_view())
                    .with_handle_size(state.config.workspace.handle_size)
                    .with_delete_button_size(state.config.workspace.delete_button_size);

                state.tile_renderer.build_scene(&render_ctx);
                let base_color = state.tile_renderer.background_color(&render_ctx);
                let scene = state.tile_renderer.take_scene();

                let Some(render_cx) = self.render_cx.as_ref() else {
                    return;
                };

                let device_handle = &render_cx.devices[state.surface.dev_id];
                let device = &device_handle.device;
                let queue = &device_handle.queue;

                let surface_texture = match state.surface.surface.get_current_texture() {
                    Ok(t) => t,
                    Err(e) => {
                        log::warn!("{}", RendererError::Surface(format!("{:?}", e)));
                        return;
                    }
                };

                let params = RenderParams {
                    base_color,
                    width,
                    height,
                    antialiasing_method: AaConfig::Area,
                };

                // Vello's compute shaders need a StorageBinding target, which
                // WebGPU only allows for Rgba8Unorm.
                let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
                    label: Some("vello render texture"),
                    size: vello::wgpu::Extent3d {
                        width,
                        height,
                        depth_or_array_layers: 1,
                    },
                    mip_level_count: 1,
                    sample_count: 1,
                    dimension: vello::wgpu::TextureDimension::D2,
                    format: vello::wgpu::TextureFormat::Rgba8Unorm,
                    usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                        | vello::wgpu::TextureUsages::COPY_SRC
                        | vello::wgpu::TextureUsages::TEXTURE_BINDING,
                    view_formats: &[],
                });

                let render_texture_view =
                    render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

                if let Err(e) = state.vello_renderer.render_to_texture(
                    device,
                    queue,
                    &scene,
                    &render_texture_view,
                    &params,
                ) {
                    log::error!("{}", RendererError::RenderFailed(format!("{:?}", e)));
                    return;
                }

                let surface_view = surface_texture
                    .texture
                    .create_view(&vello::wgpu::TextureViewDescriptor::default());

                {
                    let mut blit_encoder =
                        device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                            label: Some("blit encoder"),
                        });
                    state
                        .texture_blitter
                        .copy(device, &mut blit_encoder, &render_texture_view, &surface_view);
                    queue.submit(std::iter::once(blit_encoder.finish()));
                }

                for (id, image_delta) in &egui_output.textures_delta.set {
                    state.egui_renderer.update_texture(device, queue, *id, image_delta);
                }

                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [width, height],
                    pixels_per_point: egui_output.pixels_per_point,
                };

                {
                    let mut egui_encoder =
                        device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                            label: Some("egui encoder"),
                        });

                    state.egui_renderer.update_buffers(
                        device,
                        queue,
                        &mut egui_encoder,
                        &egui_primitives,
                        &screen_descriptor,
                    );

                    let render_pass = egui_encoder.begin_render_pass(&vello::wgpu::RenderPassDescriptor {
                        label: Some("egui render pass"),
                        color_attachments: &[Some(vello::wgpu::RenderPassColorAttachment {
                            view: &surface_view,
                            resolve_target: None,
                            ops: vello::wgpu::Operations {
                                // Keep the tiles underneath
                                load: vello::wgpu::LoadOp::Load,
                                store: vello::wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        })],
                        depth_stencil_attachment: None,
                        timestamp_writes: None,
                        occlusion_query_set: None,
                    });

                    // egui-wgpu wants a 'static render pass
                    let mut render_pass = render_pass.forget_lifetime();
                    state
                        .egui_renderer
                        .render(&mut render_pass, &egui_primitives, &screen_descriptor);
                    drop(render_pass);

                    queue.submit(std::iter::once(egui_encoder.finish()));
                }

                for id in &egui_output.textures_delta.free {
                    state.egui_renderer.free_texture(id);
                }
                surface_texture.present();
                state.window.request_redraw();
            }

            WindowEvent::CursorMoved { position, .. } => {
                let point = state.to_logical(position);
                state.input.handle_pointer_event(PointerEvent::Move { position: point });

                if egui_wants_input {
                    return;
                }

                state.event_handler.handle_move(&mut state.workspace, point);
                let cursor = state.event_handler.cursor_for_position(&state.workspace, point);
                state.window.set_cursor(cursor);
            }

            WindowEvent::MouseInput {
                state: btn_state,
                button: MouseButton::Left,
                ..
            } => {
                let position = state.input.pointer();

                match btn_state {
                    ElementState::Pressed => {
                        if egui_wants_input {
                            return;
                        }
                        state.input.handle_pointer_event(PointerEvent::Down {
                            position,
                            button: InputButton::Left,
                        });
                        let outcome = state.event_handler.handle_press(&mut state.workspace, position);
                        if let PressOutcome::Removed(_) | PressOutcome::Cleared = outcome {
                            state.window.set_cursor(
                                state.event_handler.cursor_for_position(&state.workspace, position),
                            );
                        }
                        log::debug!("Press at ({:.0}, {:.0}): {:?}", position.x, position.y, outcome);
                    }
                    ElementState::Released => {
                        // Always release, so a gesture never outlives the button.
                        state.input.handle_pointer_event(PointerEvent::Up {
                            position,
                            button: InputButton::Left,
                        });
                        state.event_handler.handle_release(&mut state.workspace);
                        if let Some(press) = state.input.released() {
                            log::debug!(
                                "Release after {:.1}px ({})",
                                press.travel,
                                if press.is_click() { "click" } else { "drag" }
                            );
                        }
                    }
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if egui_wants_input || event.state != ElementState::Pressed {
                    return;
                }

                let key = match event.logical_key {
                    Key::Named(NamedKey::Delete) => InputKey::Delete,
                    Key::Named(NamedKey::Backspace) => InputKey::Backspace,
                    Key::Named(NamedKey::Escape) => InputKey::Escape,
                    _ => return,
                };
                state.input.handle_key_pressed(key);
            }

            _ => {}
        }
    }

    fn new_events(&mut self, _event_loop: &ActiveEventLoop, _cause: winit::event::StartCause) {
        if let Some(state) = &mut self.state {
            state.input.begin_frame();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &mut self.state {
            state
                .event_handler
                .handle_keys(&mut state.workspace, &state.input);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_color() {
        let rgba = |s: &str| parse_color(s).map(|c| c.to_rgba8());
        assert_eq!(rgba("#ff8000"), Some(Color::from_rgba8(255, 128, 0, 255).to_rgba8()));
        assert_eq!(rgba(" #000000 "), Some(Color::BLACK.to_rgba8()));
        assert!(rgba("red").is_none());
        assert!(rgba("#ff80").is_none());
        assert!(rgba("#gg0000").is_none());
        // Seven bytes but not seven characters
        assert!(rgba("#aééa").is_none());
    }

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.title, "Tileboard");
        assert_eq!((config.width, config.height), (1280, 800));
        assert_eq!(config.background().to_rgba8(), Color::BLACK.to_rgba8());
        assert_eq!(config.workspace, WorkspaceConfig::default());
    }

    #[test]
    fn test_config_partial_json() {
        let config = AppConfig::from_json(
            r##"{"title": "Board", "background_color": "#102030", "workspace": {"delete_button_size": 24}}"##,
        )
        .unwrap();
        assert_eq!(config.title, "Board");
        assert_eq!(config.width, 1280);
        assert_eq!(
            config.background().to_rgba8(),
            Color::from_rgba8(16, 32, 48, 255).to_rgba8()
        );
        assert_eq!(config.workspace.delete_button_size, 24.0);
        assert_eq!(config.workspace.handle_size, 10.0);
    }

    #[test]
    fn test_invalid_background_falls_back() {
        let config = AppConfig {
            background_color: "blue".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.background().to_rgba8(), Color::BLACK.to_rgba8());
    }

    #[test]
    fn test_config_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"width": 640, "height": 480}}"#).unwrap();
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!((config.width, config.height), (640, 480));

        assert!(AppConfig::from_json("{not json").is_err());
        assert!(AppConfig::load(std::path::Path::new("/nonexistent/tileboard.json")).is_err());
    }
}
