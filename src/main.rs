use crate::{
    config::Demo,
    demos::Scene,
    input::InputAction,
    opengl::{
        shader::{BuildFailure, ShaderProgramBuilder},
        GlDevice,
    },
};
use winit::{dpi::LogicalSize, event_loop::*, window::Window};

mod config;
mod demos;
mod input;
mod logger;
mod opengl;
mod render;

#[macro_use]
extern crate log;
extern crate gl;

static GL_DEVICE: GlDevice = GlDevice;

#[derive(thiserror::Error, Debug)]
enum HostError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create OpenGL context: {0:?}")]
    Context(raw_gl_context::GlError),

    #[error("{0}")]
    Build(#[from] BuildFailure),
}

fn configure_environment(
    demo: Demo,
) -> Result<(EventLoop<()>, Window, raw_gl_context::GlContext), HostError> {
    let event_loop = EventLoop::new();
    let window = winit::window::WindowBuilder::new()
        .with_title(demo.title())
        .with_inner_size(LogicalSize::new(config::WIDTH, config::HEIGHT))
        .build(&event_loop)?;
    let gl_context = raw_gl_context::GlContext::create(
        &window,
        raw_gl_context::GlConfig {
            version: (4, 5),
            profile: raw_gl_context::Profile::Core,
            red_bits: 8,
            blue_bits: 8,
            green_bits: 8,
            alpha_bits: 0,
            depth_bits: 0,
            stencil_bits: 0,
            samples: None,
            srgb: true,
            double_buffer: true,
            vsync: true,
        },
    )
    .map_err(HostError::Context)?;
    gl_context.make_current();
    gl::load_with(|s| gl_context.get_proc_address(s) as *const _);

    unsafe {
        let version = std::ffi::CStr::from_ptr(gl::GetString(gl::VERSION) as *const _);
        info!("OpenGL version string: {:?}", version);
    }

    let size = window.inner_size();
    render::set_viewport(size.width, size.height);

    Ok((event_loop, window, gl_context))
}

fn run() -> Result<(), HostError> {
    let demo = Demo::from_args(std::env::args())?;
    info!("Starting {:?} demo.", demo);

    let (event_loop, window, gl_context) = configure_environment(demo)?;

    let builder = ShaderProgramBuilder::new(&GL_DEVICE);
    let mut scene = Scene::new(demo, &builder)?;
    opengl::check_errors();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        use winit::event::{Event, WindowEvent};

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => *control_flow = ControlFlow::Exit,

            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => render::set_viewport(size.width, size.height),

            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { input, .. },
                ..
            } => match input::map_key(scene.demo(), input.virtual_keycode, input.state) {
                Some(InputAction::Exit) => *control_flow = ControlFlow::Exit,
                Some(InputAction::SetPolygonMode(mode)) => scene.set_polygon_mode(mode),
                Some(InputAction::CheckErrors) => {
                    if !opengl::check_errors() {
                        info!("No pending OpenGL errors.");
                    }
                }
                None => {}
            },

            Event::MainEventsCleared => window.request_redraw(),

            Event::RedrawRequested(_) => {
                scene.render();
                gl_context.swap_buffers();
            }

            Event::LoopDestroyed => info!("Exiting {:?} demo.", scene.demo()),

            _ => {}
        }
    })
}

fn main() {
    let level = config::log_level(std::env::var(config::LOG_LEVEL_VAR).ok().as_deref());

    if let Err(error) = logger::init(level.clone().unwrap_or(config::DEFAULT_LOG_LEVEL)) {
        eprintln!("Failed to install logger: {}", error);
        std::process::exit(1);
    }

    if let Err(error) = level {
        warn!("{}; using {}", error, config::DEFAULT_LOG_LEVEL);
    }

    if let Err(error) = run() {
        if let HostError::Build(failure) = &error {
            failure
                .diagnostics()
                .iter()
                .for_each(|diagnostic| error!("{}", diagnostic));
        }

        error!("{}", error);
        std::process::exit(1);
    }
}
