//! FxMask harness
//!
//! Runs the effect against an in-process host: registers it, replays a
//! scripted corner drag through the on-screen control, builds the draw
//! data for one full-frame tile and prints the result as JSON.

use std::sync::Arc;

use glam::Vec2;
use serde_json::json;
use tracing::info;

use fx_mask::host::SimulatedHost;
use fx_mask::params::{read_region, FrameParams};
use fx_mask::plugin::{EffectDefinition, FxMaskDefinition, PluginInfo, PluginRegistry};
use fx_mask::render::{build_brightness_params, build_image_pass, build_mask_pass, MaskStyle, TileViewport};
use fx_mask::settings::PluginSettings;
use fx_mask::telemetry::{init_logging, LogConfig};
use fx_mask::{PointerEvent, ViewTransform};

const CANVAS: Vec2 = Vec2::new(1920.0, 1080.0);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _log_guard = match init_logging(&LogConfig::default()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    let plugin = PluginInfo::fx_mask();
    let settings = PluginSettings::load();
    let definition = FxMaskDefinition::new(settings);

    let mut registry = PluginRegistry::new();
    registry.register(definition.clone());
    info!(name = plugin.name, version = plugin.version, effects = registry.len(), "Plugin registered");

    let host = Arc::new(SimulatedHost::with_parameters(definition.default_parameters()));
    let mut control = definition.create_control(host.clone());
    let view = ViewTransform::from_canvas(Vec2::ZERO, CANVAS);

    // Grab the upper-right handle and drag it up and to the right,
    // then try to pull it past the lower-left corner.
    let start = view.render_to_screen(read_region(&*host)?.upper_right)?;
    let path = [
        start + Vec2::new(120.0, -80.0),
        start + Vec2::new(300.0, -200.0),
        Vec2::new(100.0, 1000.0),
    ];
    control.handle_event(PointerEvent::Down { position: start, view });
    for position in path {
        control.handle_event(PointerEvent::Drag { position, view });
    }
    let overlay = control.handle_event(PointerEvent::Up);

    let frame = FrameParams::from_host(&*host);
    let viewport = TileViewport::full(CANVAS.x as u32, CANVAS.y as u32);
    let image_pass = build_image_pass(viewport.tile_size, "input");

    let (brightness, mask_pass) = match &frame {
        FrameParams::Render(snapshot) => {
            let style = MaskStyle {
                fill_color: snapshot.fill_color,
                outline_color: snapshot.outline_color,
                outline_width: definition.settings().mask_outline_width,
                filled: snapshot.filled,
            };
            (
                build_brightness_params(snapshot.brightness),
                Some(build_mask_pass(&snapshot.region, &viewport, &style)),
            )
        }
        FrameParams::PassThrough => (build_brightness_params(0.0), None),
    };

    let report = json!({
        "plugin": plugin,
        "controls": definition.control_bindings(),
        "region": read_region(&*host)?,
        "overlayVertices": overlay.len(),
        "imagePass": {
            "viewportSize": image_pass.viewport_size.size,
            "positions": image_pass.vertices.iter().map(|v| v.position).collect::<Vec<_>>(),
            "textureCoordinates": image_pass.vertices.iter().map(|v| v.texture_coordinate).collect::<Vec<_>>(),
        },
        "maskPass": mask_pass.as_ref().map(|pass| json!({
            "vertices": pass.vertices.len(),
            "fillVertices": pass.fill_vertex_count,
        })),
        "brightness": brightness.brightness,
        "errors": host.reported_errors().iter().map(|e| e.to_string()).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
