use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowId, WindowLevel};

use crate::coords::Vec2;
use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::{
    InputEvent, InputState, Key, KeyState, Modifiers, MouseButton, MouseButtonState,
    PointerButtonEvent, PointerMoveEvent,
};

/// How the window occupies the screen.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum WindowMode {
    /// Regular window of `initial_size`.
    Windowed,
    /// Borderless window covering the current monitor.
    BorderlessFullscreen,
}

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub mode: WindowMode,
    /// Let the desktop show through wherever nothing is drawn.
    pub transparent: bool,
    /// Show the platform title bar and borders.
    pub decorations: bool,
    /// Keep the window above regular windows.
    pub always_on_top: bool,
    /// Turn Ctrl+C / SIGINT into an orderly event-loop exit.
    pub exit_on_interrupt: bool,
}

impl RuntimeConfig {
    /// Borderless, transparent, always-on-top window covering the monitor.
    pub fn overlay(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            mode: WindowMode::BorderlessFullscreen,
            transparent: true,
            decorations: false,
            always_on_top: true,
            exit_on_interrupt: true,
            ..Self::default()
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "pendule".to_string(),
            initial_size: LogicalSize::new(640.0, 480.0),
            mode: WindowMode::Windowed,
            transparent: false,
            decorations: true,
            always_on_top: false,
            exit_on_interrupt: false,
        }
    }
}

/// Events injected into the loop from outside the window system.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RuntimeEvent {
    /// The process received Ctrl+C / SIGINT.
    Interrupt,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs `app` in a single window until it exits, the window closes or
    /// (with `exit_on_interrupt`) the process is interrupted.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::<RuntimeEvent>::with_user_event()
            .build()
            .context("failed to create winit EventLoop")?;

        if config.exit_on_interrupt {
            install_interrupt_handler(event_loop.create_proxy())?;
        }

        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn install_interrupt_handler(proxy: EventLoopProxy<RuntimeEvent>) -> Result<()> {
    ctrlc::set_handler(move || {
        // The loop may already be gone during shutdown; nothing left to notify then.
        let _ = proxy.send_event(RuntimeEvent::Interrupt);
    })
    .context("failed to install Ctrl+C handler")?;

    log::debug!("interrupt handler installed");
    Ok(())
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    exit_requested: bool,
    exited: bool,
    failure: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            exit_requested: false,
            exited: false,
            failure: None,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        self.request_exit(event_loop);
    }

    fn request_redraw(&self) {
        if let Some(entry) = &self.window {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn apply_control(&mut self, event_loop: &ActiveEventLoop, control: AppControl) {
        match control {
            AppControl::Continue => {}
            AppControl::Redraw => self.request_redraw(),
            AppControl::Exit => self.request_exit(event_loop),
        }
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let config = &self.config;

        let mut attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size)
            .with_transparent(config.transparent)
            .with_decorations(config.decorations);

        if config.always_on_top {
            attrs = attrs.with_window_level(WindowLevel::AlwaysOnTop);
        }
        if config.mode == WindowMode::BorderlessFullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            input_state: InputState::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")
    }

    fn drive_frame(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId) {
        let (app, window) = (&mut self.app, &mut self.window);
        let Some(entry) = window.as_mut() else { return };

        let mut control = AppControl::Continue;
        entry.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: WindowCtx {
                    id: window_id,
                    window: fields.window,
                },
                gpu: fields.gpu,
                input: fields.input_state,
            };
            control = app.on_frame(&mut ctx);
        });

        self.apply_control(event_loop, control);
    }

    /// Runs the app's deadline callback if it is due, then arms the wake-up timer.
    fn service_deadline(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if let Some(deadline) = self.app.next_deadline() {
            if now >= deadline {
                let control = self.app.on_deadline(now);
                self.apply_control(event_loop, control);
            }
        }

        if self.exit_requested {
            return;
        }

        match self.app.next_deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

impl<A> ApplicationHandler<RuntimeEvent> for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                self.window = Some(entry);
                log::info!("window `{}` created", self.config.title);
                self.request_redraw();
                self.service_deadline(event_loop);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: RuntimeEvent) {
        match event {
            RuntimeEvent::Interrupt => {
                log::info!("interrupt received, shutting down");
                self.request_exit(event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        self.service_deadline(event_loop);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, window) = (&mut self.app, &mut self.window);
        let Some(entry) = window.as_mut() else { return };

        let mut control = AppControl::Continue;
        entry.with_mut(|fields| {
            let now = Instant::now();
            if let Some(ev) = translate_input_event(fields.window, fields.input_state, &event, now)
            {
                fields.input_state.apply_event(&ev);
                control = app.on_input(&ev, fields.input_state);
            }
        });
        self.apply_control(event_loop, control);

        if self.exit_requested {
            return;
        }

        // Runtime-managed window lifecycle / resize / redraw handling.
        match &event {
            WindowEvent::CloseRequested => {
                log::info!("window close requested");
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.window.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                }
                self.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.window.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
                self.request_redraw();
            }

            WindowEvent::RedrawRequested => self.drive_frame(event_loop, window_id),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if self.exited {
            return;
        }
        self.exited = true;

        self.app.on_exit();
        // Surface before window: dropping the entry tears both down in order.
        self.window = None;
        log::info!("event loop exited");
    }
}

fn translate_input_event(
    window: &Window,
    state: &mut InputState,
    event: &WindowEvent,
    now: Instant,
) -> Option<InputEvent> {
    match event {
        WindowEvent::ModifiersChanged(m) => Some(InputEvent::ModifiersChanged(map_modifiers(m.state()))),

        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::PointerMoved(PointerMoveEvent {
            pos: to_logical(window, *position),
        })),

        WindowEvent::MouseInput { state: st, button, .. } => {
            let button = map_mouse_button(*button);
            let pos = state.pointer_pos.unwrap_or_default();

            let (st, click_count) = match st {
                ElementState::Pressed => (MouseButtonState::Pressed, state.count_click(button, pos, now)),
                ElementState::Released => (MouseButtonState::Released, 0),
            };

            Some(InputEvent::PointerButton(PointerButtonEvent {
                button,
                state: st,
                pos,
                click_count,
                modifiers: state.modifiers,
            }))
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let st = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };

            Some(InputEvent::Key {
                key: map_key(event.physical_key),
                state: st,
                modifiers: state.modifiers,
                repeat: event.repeat,
            })
        }

        _ => None,
    }
}

fn to_logical(window: &Window, pos: PhysicalPosition<f64>) -> Vec2 {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    Vec2::new(logical.x as f32, logical.y as f32)
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
        PhysicalKey::Code(other) => Key::Unknown(other as u32),
        // NativeKeyCode is not a u32 in winit 0.30; preserve "unknown" without a stable numeric.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}
