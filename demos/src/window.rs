//! A minimal frontend using the `minifb` crate for window creation and
//! event handling.

use std::ops::ControlFlow::{self, Break};
use std::time::{Duration, Instant};

use minifb::{Key, WindowOptions};

use re::prelude::*;

/// Per-frame state. [`Window::run`] passes an instance of `Frame` to the
/// callback function on every iteration of the main loop.
pub struct Frame<'a> {
    /// Elapsed time since the start of the first frame.
    pub t: Duration,
    /// Elapsed time since the start of the previous frame.
    pub dt: Duration,
    /// Pixel buffer in which to draw, in `0x00_RR_GG_BB` format.
    pub buf: &'a mut Buf2<u32>,
    /// The wrapped minifb window, for reading input.
    pub win: &'a minifb::Window,
    /// Rendering context and config.
    pub ctx: &'a mut Context,
}

/// A lightweight wrapper of a `minifb` window.
pub struct Window {
    /// The wrapped minifb window.
    pub imp: minifb::Window,
    /// The width and height of the window.
    pub dims: Dims,
    /// Rendering context defaults.
    pub ctx: Context,
}

/// Builder for creating `Window`s.
pub struct Builder<'title> {
    pub dims: Dims,
    pub title: &'title str,
    pub target_fps: Option<u32>,
    pub opts: WindowOptions,
}

impl Default for Builder<'_> {
    fn default() -> Self {
        Self {
            dims: (640, 480),
            title: "// painter //",
            target_fps: Some(60),
            opts: WindowOptions::default(),
        }
    }
}

impl<'t> Builder<'t> {
    /// Sets the width and height of the window.
    pub fn dims(mut self, dims: Dims) -> Self {
        self.dims = dims;
        self
    }
    /// Sets the title of the window.
    pub fn title(mut self, title: &'t str) -> Self {
        self.title = title;
        self
    }
    /// Sets the frame rate cap of the window. `None` means unlimited
    /// frame rate.
    pub fn target_fps(mut self, fps: Option<u32>) -> Self {
        self.target_fps = fps;
        self
    }

    /// Creates the window.
    pub fn build(self) -> minifb::Result<Window> {
        let Self { dims, title, target_fps, opts } = self;
        let mut imp =
            minifb::Window::new(title, dims.0 as usize, dims.1 as usize, opts)?;
        if let Some(fps) = target_fps {
            imp.set_target_fps(fps as usize);
        }
        Ok(Window { imp, dims, ctx: Context::default() })
    }
}

impl Window {
    /// Returns a window builder.
    pub fn builder() -> Builder<'static> {
        Builder::default()
    }

    /// Runs the main loop of the program, invoking the callback on each
    /// iteration to draw the next frame.
    ///
    /// The main loop stops if the window is closed, the Esc key is
    /// pressed, or the callback returns `ControlFlow::Break`. Rendering
    /// statistics are then printed to stderr.
    ///
    /// # Errors
    /// Returns an error if updating the window contents fails.
    pub fn run<F>(&mut self, mut frame_fn: F) -> minifb::Result<()>
    where
        F: FnMut(&mut Frame) -> ControlFlow<()>,
    {
        let (w, h) = self.dims;
        let mut buf = Buf2::new_default((w, h));
        let mut ctx = self.ctx.clone();

        let start = Instant::now();
        let mut last = Instant::now();
        while self.imp.is_open() && !self.imp.is_key_down(Key::Escape) {
            let frame = &mut Frame {
                t: start.elapsed(),
                dt: last.elapsed(),
                buf: &mut buf,
                win: &self.imp,
                ctx: &mut ctx,
            };
            last = Instant::now();
            if let Break(()) = frame_fn(frame) {
                break;
            }
            self.imp
                .update_with_buffer(buf.data(), w as usize, h as usize)?;
        }
        eprintln!("{}", ctx.stats.borrow());
        Ok(())
    }
}

impl Frame<'_> {
    /// Returns the time since the previous frame in seconds.
    pub fn dt_secs(&self) -> f32 {
        self.dt.as_secs_f32()
    }
}
