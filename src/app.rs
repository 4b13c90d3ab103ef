use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{MouseScrollDelta, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

use crate::camera::{Camera, CameraMovement, ViewProjection};
use crate::clock::FrameClock;
use crate::input::{HeldKeys, InputEvent, Key, MouseTracker};
use crate::orbit::LightOrbit;
use crate::renderer::SceneRenderer;

pub const WINDOW_TITLE: &str = "Clay Scene";
pub const WINDOW_WIDTH: u32 = 1200;
pub const WINDOW_HEIGHT: u32 = 1000;

const FPS_LOG_INTERVAL: f32 = 1.0;

/// All per-process mutable state outside the GPU: camera, timing, the
/// orbiting light and the input trackers. Lives for the whole process and
/// is only ever touched by the render/input thread.
pub struct AppState {
    pub camera: Camera,
    pub clock: FrameClock,
    pub light: LightOrbit,
    pub mouse: MouseTracker,
    pub keys: HeldKeys,
    pub framebuffer_size: (u32, u32),
    pub should_close: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            camera: Camera::default(),
            clock: FrameClock::new(),
            light: LightOrbit::default(),
            mouse: MouseTracker::new(),
            keys: HeldKeys::new(),
            framebuffer_size: (WINDOW_WIDTH, WINDOW_HEIGHT),
            should_close: false,
        }
    }

    /// The single input dispatch point. Every window-system event funnels
    /// through here exactly once, in arrival order.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key { key, pressed } => match key {
                Key::Escape => {
                    if pressed {
                        self.should_close = true;
                    }
                }
                Key::L => {
                    if pressed {
                        self.light.resume();
                    }
                }
                Key::K => {
                    if pressed {
                        self.light.pause();
                    }
                }
                _ => self.keys.set(key, pressed),
            },
            InputEvent::CursorMove { x, y } => {
                if let Some((dx, dy)) = self.mouse.track(x, y) {
                    self.camera.process_mouse_movement(dx, dy);
                }
            }
            InputEvent::Scroll { dy } => self.camera.process_mouse_scroll(dy),
            InputEvent::Resize { width, height } => {
                self.framebuffer_size = (width.max(1), height.max(1));
            }
            InputEvent::CloseRequested => self.should_close = true,
        }
    }

    /// Per-frame update: apply every held movement key independently (two
    /// held keys add up, diagonals are faster than single axes), then step
    /// the light orbit.
    pub fn advance_frame(&mut self, delta_seconds: f32) {
        if self.keys.is_down(Key::W) {
            self.camera.process_keyboard(CameraMovement::Forward, delta_seconds);
        }
        if self.keys.is_down(Key::S) {
            self.camera.process_keyboard(CameraMovement::Backward, delta_seconds);
        }
        if self.keys.is_down(Key::A) {
            self.camera.process_keyboard(CameraMovement::Left, delta_seconds);
        }
        if self.keys.is_down(Key::D) {
            self.camera.process_keyboard(CameraMovement::Right, delta_seconds);
        }
        if self.keys.is_down(Key::Q) {
            self.camera.process_keyboard(CameraMovement::Up, delta_seconds);
        }
        if self.keys.is_down(Key::E) {
            self.camera.process_keyboard(CameraMovement::Down, delta_seconds);
        }

        self.light.advance(delta_seconds);
    }

    /// View and projection for the frame being drawn, from the camera and
    /// framebuffer size as they stand right now.
    pub fn view_projection(&self) -> ViewProjection {
        let (width, height) = self.framebuffer_size;
        ViewProjection::new(&self.camera, width, height)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Winit shell: owns the window and renderer, translates window events
/// into [`InputEvent`]s and runs the per-frame sequence.
pub struct App {
    window: Option<Arc<Window>>,
    renderer: Option<SceneRenderer>,
    state: AppState,
    startup_error: Option<anyhow::Error>,
    frame_count: u32,
    fps_timer: f32,
}

impl App {
    pub fn new() -> Self {
        Self {
            window: None,
            renderer: None,
            state: AppState::new(),
            startup_error: None,
            frame_count: 0,
            fps_timer: 0.0,
        }
    }

    /// Surfaces a startup failure to the caller after the event loop ends,
    /// so the process can exit nonzero.
    pub fn into_startup_result(self) -> anyhow::Result<()> {
        match self.startup_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn log_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_timer += delta;

        if self.fps_timer >= FPS_LOG_INTERVAL {
            log::info!("fps: {:.1}", self.frame_count as f32 / self.fps_timer);
            self.frame_count = 0;
            self.fps_timer = 0.0;
        }
    }

    /// One full frame: tick the clock, apply held keys and the orbit,
    /// derive this frame's view/projection and draw with it.
    fn redraw(&mut self) {
        let delta = self.state.clock.tick();
        self.state.advance_frame(delta);
        self.log_fps(delta);

        let vp = self.state.view_projection();
        let Some(renderer) = &mut self.renderer else {
            return;
        };

        match renderer.render(&vp, self.state.camera.position, self.state.light.position) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = self.state.framebuffer_size;
                renderer.resize(width, height);
            }
            Err(error) => log::error!("render error: {error}"),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(error) => {
                log::error!("failed to create window: {error}");
                self.startup_error = Some(error.into());
                event_loop.exit();
                return;
            }
        };

        // First-person viewer: capture the cursor and hide it.
        if window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
            .is_ok()
        {
            window.set_cursor_visible(false);
        }

        let renderer = match pollster::block_on(SceneRenderer::new(window.clone())) {
            Ok(renderer) => renderer,
            Err(error) => {
                log::error!("failed to initialize renderer: {error:#}");
                self.startup_error = Some(error);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.state.framebuffer_size = (size.width.max(1), size.height.max(1));

        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::RedrawRequested => self.redraw(),
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size.width, new_size.height);
                }
                self.state.apply(InputEvent::Resize {
                    width: new_size.width,
                    height: new_size.height,
                });
            }
            WindowEvent::MouseInput { state, button, .. } => {
                log::debug!("mouse button {button:?} {state:?}");
            }
            other => {
                if let Some(input) = translate_event(&other) {
                    self.state.apply(input);
                    if self.state.should_close {
                        event_loop.exit();
                    }
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Map a winit window event onto the crate's own event type. Events the
/// viewer does not react to map to None.
fn translate_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::CloseRequested => Some(InputEvent::CloseRequested),
        WindowEvent::KeyboardInput { event, .. } => {
            let PhysicalKey::Code(code) = event.physical_key else {
                return None;
            };
            map_keycode(code).map(|key| InputEvent::Key {
                key,
                pressed: event.state.is_pressed(),
            })
        }
        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::CursorMove {
            x: position.x as f32,
            y: position.y as f32,
        }),
        WindowEvent::MouseWheel { delta, .. } => {
            let dy = match delta {
                MouseScrollDelta::LineDelta(_, y) => *y,
                MouseScrollDelta::PixelDelta(position) => position.y as f32 / 20.0,
            };
            Some(InputEvent::Scroll { dy })
        }
        _ => None,
    }
}

fn map_keycode(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::KeyQ => Some(Key::Q),
        KeyCode::KeyE => Some(Key::E),
        KeyCode::KeyL => Some(Key::L),
        KeyCode::KeyK => Some(Key::K),
        KeyCode::Escape => Some(Key::Escape),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_requests_close() {
        let mut state = AppState::new();
        state.apply(InputEvent::Key {
            key: Key::Escape,
            pressed: true,
        });
        assert!(state.should_close);
    }

    #[test]
    fn close_event_requests_close() {
        let mut state = AppState::new();
        state.apply(InputEvent::CloseRequested);
        assert!(state.should_close);
    }

    #[test]
    fn orbit_keys_resume_and_pause() {
        let mut state = AppState::new();
        assert!(state.light.is_orbiting());

        state.apply(InputEvent::Key {
            key: Key::K,
            pressed: true,
        });
        assert!(!state.light.is_orbiting());

        state.apply(InputEvent::Key {
            key: Key::L,
            pressed: true,
        });
        assert!(state.light.is_orbiting());
    }

    #[test]
    fn orbit_key_release_is_ignored() {
        let mut state = AppState::new();
        state.apply(InputEvent::Key {
            key: Key::K,
            pressed: true,
        });
        state.apply(InputEvent::Key {
            key: Key::K,
            pressed: false,
        });
        assert!(!state.light.is_orbiting());
    }

    #[test]
    fn resize_updates_framebuffer_without_touching_camera() {
        let mut state = AppState::new();
        let position = state.camera.position;
        let (yaw, pitch) = (state.camera.yaw, state.camera.pitch);

        state.apply(InputEvent::Resize {
            width: 800,
            height: 600,
        });

        assert_eq!(state.framebuffer_size, (800, 600));
        assert_eq!(state.camera.position, position);
        assert_eq!(state.camera.yaw, yaw);
        assert_eq!(state.camera.pitch, pitch);
    }

    #[test]
    fn held_movement_keys_apply_during_frame_advance() {
        let mut state = AppState::new();
        let start = state.camera.position;

        state.apply(InputEvent::Key {
            key: Key::W,
            pressed: true,
        });
        state.advance_frame(0.5);

        let moved = state.camera.position - start;
        let expected = state.camera.front() * state.camera.movement_speed * 0.5;
        assert!(moved.distance(expected) < 1e-5);
    }

    #[test]
    fn released_movement_key_stops_applying() {
        let mut state = AppState::new();
        state.apply(InputEvent::Key {
            key: Key::W,
            pressed: true,
        });
        state.apply(InputEvent::Key {
            key: Key::W,
            pressed: false,
        });

        let start = state.camera.position;
        state.advance_frame(0.5);
        assert_eq!(state.camera.position, start);
    }
}
