use softbuffer::{Context, Surface};

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    platform::modifier_supplement::KeyEventExtModifierSupplement,
    window::{Theme, Window, WindowId},
};

use std::{
    num::NonZeroU32,
    sync::mpsc::{self, RecvTimeoutError, SyncSender},
    thread,
};

use tracing::{debug, error, warn};

use crate::data::{error::RunError, Command, Program};
use crate::game::geometry::Direction;

type WindowSurface = Surface<&'static Window, &'static Window>;

struct WindowState {
    pub prog: Program,
    pub window: Option<&'static Window>,
    pub surface: Option<WindowSurface>,
    pub exit_sender: Option<SyncSender<()>>,
    pub final_buffer_size: PhysicalSize<u32>,
    pub error: Option<RunError>,
}

impl ApplicationHandler for WindowState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // The window is leaked into a static reference, so a second
        // resume must not create another one.
        if self.window.is_some() {
            debug!("resumed again, keeping the existing window");
            return;
        }

        if let Err(e) = self.open_window(event_loop) {
            error!("failed to set up the window: {e}");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Focused(focused) => {
                if focused {
                    self.prog.restart_clock();
                }

                if let Some(w) = self.window.as_ref() {
                    w.request_redraw()
                }
            }

            WindowEvent::Resized(PhysicalSize { width, height }) => {
                let Some(surface) = self.surface.as_mut() else {
                    warn!("unable to resize the surface before it exists");
                    return;
                };

                if let Err(e) = Self::resize_surface(surface, width, height) {
                    warn!("failed to resize the surface: {e}");
                    return;
                }

                self.final_buffer_size = PhysicalSize::new(width, height);

                if let Ok(mut buffer) = surface.buffer_mut() {
                    buffer.fill(0x0);
                }
            }

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                let Some(cmd) = key_command(event.key_without_modifiers().as_ref()) else {
                    return;
                };

                if self.prog.eval_command(cmd) {
                    event_loop.exit();
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(window) = self.window else {
                    return;
                };

                self.prog.render();

                if let Some(title) = self.prog.title_changed() {
                    window.set_title(title);
                }

                if let Some(Ok(mut buffer)) = self.surface.as_mut().map(|s| s.buffer_mut()) {
                    self.prog.pix.scale_to(
                        self.prog.scale() as usize,
                        &mut buffer,
                        Some(self.final_buffer_size.width as usize),
                    );

                    window.pre_present_notify();
                    if let Err(e) = buffer.present() {
                        warn!("failed to present the frame: {e}");
                    }
                }
            }

            _ => {}
        }
    }
}

impl WindowState {
    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RunError> {
        self.prog.print_startup_info();

        let scale = self.prog.scale() as u32;
        let win_size = PhysicalSize::<u32>::new(
            self.prog.pix.width() as u32 * scale,
            self.prog.pix.height() as u32 * scale,
        );

        let window_attributes = Window::default_attributes()
            .with_title(self.prog.title())
            .with_inner_size(win_size)
            .with_transparent(false)
            .with_resizable(false)
            .with_theme(Some(Theme::Dark));

        let window: &'static Window = Box::leak(Box::new(event_loop.create_window(window_attributes)?));
        self.window = Some(window);

        let size = window.inner_size();
        self.final_buffer_size = size;

        let context = Context::new(window)?;
        let mut surface = Surface::new(&context, window)?;
        Self::resize_surface(&mut surface, size.width, size.height)?;
        self.surface = Some(surface);

        // Some compositors ignore the resizable flag.
        window.set_min_inner_size(Some(win_size));
        window.set_max_inner_size(Some(win_size));

        let (exit_send, exit_recv) = mpsc::sync_channel(1);
        self.exit_sender = Some(exit_send);

        let interval = self.prog.refresh_rate();
        self.prog.restart_clock();

        // Thread to control requesting redraws.
        thread::Builder::new()
            .name("redraw".into())
            .spawn(move || loop {
                match exit_recv.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }

                if !window.is_minimized().unwrap_or(false) {
                    window.request_redraw();
                }
            })?;

        Ok(())
    }

    fn resize_surface(surface: &mut WindowSurface, w: u32, h: u32) -> Result<(), RunError> {
        // A zero sized (minimized) window keeps its old buffer.
        let (Some(w), Some(h)) = (NonZeroU32::new(w), NonZeroU32::new(h)) else {
            return Ok(());
        };

        surface.resize(w, h)?;
        Ok(())
    }
}

fn key_command(key: Key<&str>) -> Option<Command> {
    match key {
        Key::Named(NamedKey::Escape) => Some(Command::Close),

        Key::Named(NamedKey::ArrowUp) => Some(Command::Steer(Direction::Up)),
        Key::Named(NamedKey::ArrowDown) => Some(Command::Steer(Direction::Down)),
        Key::Named(NamedKey::ArrowLeft) => Some(Command::Steer(Direction::Left)),
        Key::Named(NamedKey::ArrowRight) => Some(Command::Steer(Direction::Right)),

        Key::Character(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Command::from_char(c),
                _ => None,
            }
        }

        _ => None,
    }
}

pub fn winit_main(prog: Program) -> Result<(), RunError> {
    let event_loop = EventLoop::new()?;

    let mut state = WindowState {
        prog,
        window: None,
        surface: None,
        exit_sender: None,
        final_buffer_size: PhysicalSize::<u32>::new(0, 0),
        error: None,
    };

    event_loop.set_control_flow(ControlFlow::Wait);
    let result = event_loop.run_app(&mut state);

    if let Some(sender) = state.exit_sender.as_ref() {
        let _ = sender.send(());
    }

    result?;

    match state.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_translate() {
        assert_eq!(
            key_command(Key::Named(NamedKey::ArrowLeft)),
            Some(Command::Steer(Direction::Left))
        );
        assert_eq!(key_command(Key::Named(NamedKey::Escape)), Some(Command::Close));
        assert_eq!(
            key_command(Key::Character("s")),
            Some(Command::Steer(Direction::Down))
        );
        assert_eq!(key_command(Key::Character("R")), Some(Command::Restart));
        assert_eq!(key_command(Key::Character("ss")), None);
        assert_eq!(key_command(Key::Named(NamedKey::Space)), None);
    }
}
