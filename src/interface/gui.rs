//! Window and context bootstrap plus the render loop.
//!
//! Everything here is single-threaded by construction: the GL context is
//! made current on this thread, and every pipeline and draw call happens
//! inside the event loop that owns it.

use std::time::Instant;

use glutin::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use glutin::event_loop::{ControlFlow, EventLoop};
use glutin::window::WindowBuilder;
use glutin::{Api, ContextBuilder, ContextError, CreationError, GlRequest};
use log::{debug, error, info};
use thiserror::Error;

use crate::graphics::diagnostics;
use crate::graphics::shader::ShaderError;
use crate::interface::cli::WindowConfig;
use crate::scene::Scene;

/// Everything that can go wrong before the first frame. All of it is
/// terminal; main logs the diagnostic and exits non-zero.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("could not create the window: {0}")]
    Window(#[from] CreationError),

    #[error("could not make the GL context current: {0}")]
    Context(ContextError),

    #[error(transparent)]
    Shader(#[from] ShaderError),
}

/// Opens the window, loads the GL entry points, builds the scene, and runs
/// the render loop until the window is closed or Escape is pressed.
pub fn gui_main(config: WindowConfig) -> Result<(), AppError> {
    let event_loop = EventLoop::new();

    let window = WindowBuilder::new()
        .with_title(config.title.as_str())
        .with_inner_size(glutin::dpi::LogicalSize::new(
            config.width as f64,
            config.height as f64,
        ));

    let context = ContextBuilder::new()
        .with_gl(GlRequest::Specific(Api::OpenGl, (3, 3)))
        .build_windowed(window, &event_loop)?;

    // make_current requires that no other context is current on this
    // thread; this is the only context the program builds.
    let context = unsafe { context.make_current() }.map_err(|(_, e)| AppError::Context(e))?;

    gl::load_with(|symbol| context.get_proc_address(symbol) as *const _);
    info!("GL context is current, building the scene");

    let scene = Scene::build()?;
    diagnostics::drain_errors("scene setup");

    let started = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,

                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(VirtualKeyCode::Escape),
                            ..
                        },
                    ..
                } => {
                    debug!("escape pressed, closing");
                    *control_flow = ControlFlow::Exit;
                }

                WindowEvent::Resized(size) => {
                    context.resize(size);
                    unsafe {
                        gl::Viewport(0, 0, size.width as i32, size.height as i32);
                    }
                }

                _ => {}
            },

            Event::MainEventsCleared => context.window().request_redraw(),

            Event::RedrawRequested(_) => {
                unsafe {
                    gl::ClearColor(0.2, 0.3, 0.3, 1.0);
                    gl::Clear(gl::COLOR_BUFFER_BIT);
                }

                scene.draw(started.elapsed().as_secs_f32());
                diagnostics::drain_errors("frame draw");

                if let Err(e) = context.swap_buffers() {
                    error!("presenting the frame failed: {}", e);
                    *control_flow = ControlFlow::Exit;
                }
            }

            _ => {}
        }
    })
}
