use std::env;

// Import from the library crate
use woxel_sandbox::{
    logging,
    config::SandboxConfig,
    controller::{FrameLoop, InputEvent, MouseButton, Sandbox, ScriptedInput},
    view::SnapshotRenderer,
};

const CONFIG_ENV: &str = "WOXEL_CONFIG";

fn load_config() -> SandboxConfig {
    let Ok(path) = env::var(CONFIG_ENV) else {
        tracing::info!("{CONFIG_ENV} not set, using default config");
        return SandboxConfig::default();
    };
    match SandboxConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(%path, "falling back to default config: {e}");
            SandboxConfig::default()
        }
    }
}

fn key_down(key: &str) -> InputEvent {
    InputEvent::KeyDown(key.to_string())
}

fn key_up(key: &str) -> InputEvent {
    InputEvent::KeyUp(key.to_string())
}

fn click(button: MouseButton) -> InputEvent {
    InputEvent::MouseClick { button, is_down: true }
}

/// Settle onto the terrain, walk and jump, look down, then dig and rebuild.
fn demo_script() -> Vec<Vec<InputEvent>> {
    let mut frames = vec![vec![InputEvent::PointerLockChanged { locked: true }]];
    frames.extend(std::iter::repeat(Vec::new()).take(240));

    frames.push(vec![key_down("KeyW")]);
    frames.extend(std::iter::repeat(Vec::new()).take(60));
    frames.push(vec![key_down("Space")]);
    frames.extend(std::iter::repeat(Vec::new()).take(60));
    frames.push(vec![key_up("KeyW"), key_up("Space")]);
    frames.extend(std::iter::repeat(Vec::new()).take(60));

    frames.push(vec![InputEvent::MouseMove { dx: 0.0, dy: 700.0 }]);
    frames.push(vec![click(MouseButton::Left)]);
    frames.push(vec![click(MouseButton::Left)]);
    frames.push(vec![click(MouseButton::Right)]);
    frames.extend(std::iter::repeat(Vec::new()).take(60));

    frames.push(vec![InputEvent::PointerLockChanged { locked: false }]);
    frames
}

fn main() {
    logging::init();

    let config = load_config();
    let sandbox = Sandbox::new(&config);
    let input = ScriptedInput::new(demo_script());
    let mut frame_loop = FrameLoop::new(sandbox, input, SnapshotRenderer::default());
    let stats = frame_loop.run();

    let player = frame_loop.sandbox.player();
    tracing::info!(
        frames = stats.frames,
        ticks = stats.ticks,
        edits = stats.edits,
        blocks = frame_loop.sandbox.world().len(),
        instances = frame_loop.renderer.instances.len(),
        position = ?player.position,
        grounded = player.grounded,
        "demo finished"
    );
}
