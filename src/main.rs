use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window as WinitWindow, WindowId},
};

use sketchbook::cli::Cli;
use sketchbook::config::Settings;
use sketchbook::core::FrameHost;
use sketchbook::frame::{FpsCounter, FrameClock};
use sketchbook::headless::{run_headless, HeadlessHost};
use sketchbook::renderer::SketchRenderer;
use sketchbook::window::Window;
use sketchbook::{FrameLoop, FrameStatus, SketchKind};

const FPS_UPDATE_INTERVAL: f32 = 1.0;

// === Application ===

struct App {
    settings: Settings,
    sketch: SketchKind,
    frame_limit: Option<u64>,
    quiet: bool,
    window: Option<Window>,
    renderer: Option<SketchRenderer>,
    frame_loop: Option<FrameLoop>,
    clock: FrameClock,
    fps: FpsCounter,
}

impl App {
    fn new(settings: Settings, sketch: SketchKind, cli: &Cli) -> Self {
        Self {
            settings,
            sketch,
            frame_limit: cli.frames,
            quiet: cli.quiet,
            window: None,
            renderer: None,
            frame_loop: None,
            clock: FrameClock::real_time(),
            fps: FpsCounter::new(FPS_UPDATE_INTERVAL),
        }
    }

    fn setup(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let title = format!("{} - {}", self.settings.window.title, self.sketch);
        let window = Arc::new(event_loop.create_window(
            WinitWindow::default_attributes()
                .with_title(title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.settings.window.width,
                    self.settings.window.height,
                )),
        )?);

        let sketch = self.sketch.create(&self.settings);
        let frame_loop = FrameLoop::from_sketch(sketch.as_ref(), self.settings.seed());
        let renderer = pollster::block_on(SketchRenderer::new(
            window.clone(),
            frame_loop.scene(),
            frame_loop.clear_state(),
        ))?;

        let window = Window::new(window, self.frame_limit);
        window.request_redraw();

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.frame_loop = Some(frame_loop);
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.setup(event_loop) {
                log::error!("Failed to initialize rendering context: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                if let Some(window) = &self.window {
                    log::info!("Closing after {} frames", window.frames_counted());
                    window.close();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                let Some(frame) = self.clock.next() else {
                    return;
                };

                if let Some(fps) = self.fps.tick(frame.delta) {
                    if !self.quiet {
                        log::info!("FPS: {:.1}", fps);
                    }
                }

                if let (Some(window), Some(renderer), Some(frame_loop)) =
                    (&self.window, &mut self.renderer, &mut self.frame_loop)
                {
                    window.count_frame();
                    if frame_loop.frame(&frame, renderer, window) == FrameStatus::Shutdown {
                        event_loop.exit();
                    }
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = cli.settings()?;
    let sketch = cli.sketch;

    if cli.headless {
        let mut frame_loop = FrameLoop::from_sketch(sketch.create(&settings).as_ref(), settings.seed());
        let host = HeadlessHost::new(
            settings.window.width,
            settings.window.height,
            Some(cli.frames.unwrap_or(1)),
        );
        run_headless(&mut frame_loop, &host);
        return Ok(());
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(settings, sketch, &cli);

    log::info!("Running '{}' - Escape to quit", sketch);
    event_loop.run_app(&mut app)?;

    Ok(())
}
