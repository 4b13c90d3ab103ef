use winit::event_loop::{ControlFlow, EventLoop};

use clay_scene::app::App;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();

    log::info!("controls: WASD move, Q/E up/down, mouse look, scroll zoom, L/K orbit on/off, Esc quits");
    event_loop.run_app(&mut app)?;

    app.into_startup_result()
}
