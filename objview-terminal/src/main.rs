/// objview terminal viewer
///
/// Usage: objview-terminal [path/to/mesh.obj]
/// Without a path the unit cube is shown.
/// Controls:
///   - WASD: Move the camera
///   - Arrow Keys / Mouse: Look around
///   - F: Toggle filled / wireframe
///   - B: Cycle backface culling
///   - Q/ESC: Quit

use nalgebra::Vector3;
use objview_core::{parse_obj, Camera, Mesh, World, WorldObject};
use std::env;
use std::fs;
use std::io;
use objview_terminal::TerminalApp;

fn main() -> io::Result<()> {
    env_logger::init();

    let mesh = match env::args().nth(1) {
        Some(path) => load_mesh(&path)?,
        None => {
            println!("No OBJ file provided, using unit cube...");
            Mesh::unit_cube()
        }
    };

    println!(
        "Loaded {} vertices, {} faces",
        mesh.vertices.len(),
        mesh.faces.len()
    );

    let world = framing_world(mesh);

    // Run the terminal app
    let mut app = TerminalApp::new(world)?;
    app.run()?;

    println!("Bye!");
    Ok(())
}

fn load_mesh(path: &str) -> io::Result<Mesh> {
    println!("Loading OBJ file: {}", path);

    let text = fs::read_to_string(path)
        .map_err(|e| io::Error::new(e.kind(), format!("Failed to read OBJ file: {}", e)))?;

    parse_obj(&text)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Failed to parse OBJ: {}", e)))
}

/// Minimum camera distance from the mesh, in near-plane distances. The
/// projected depth only reaches `near` about two near distances away.
const NEAR_MARGIN: f64 = 2.5;

/// World holding `mesh` with the camera on the +z side of its bounds,
/// looking down -z and stepping a tenth of the mesh size per key press.
/// The far plane is pushed back when the mesh would not fit in front of it.
fn framing_world(mesh: Mesh) -> World {
    let world = World::new(Camera::default(), vec![WorldObject::new(0, mesh)]);
    let Some((min, max)) = bounds(&world.objects[0].mesh) else {
        return world;
    };

    let center = (min + max) / 2.0;
    let size = (max - min).norm().max(1e-3);
    let distance = (size * 2.0).max(world.near * NEAR_MARGIN);
    let position = Vector3::new(center.x, center.y, max.z + distance);
    let far = world.far.max((distance + size) * 2.0);
    log::info!("framing mesh of size {:.3} from {:?}, far plane {:.1}", size, position, far);

    World {
        far,
        ..world.with_camera(Camera::new(position, -Vector3::z(), size / 10.0))
    }
}

fn bounds(mesh: &Mesh) -> Option<(Vector3<f64>, Vector3<f64>)> {
    let mut vertices = mesh.vertices.iter().map(|v| Vector3::new(v.x, v.y, v.z) / v.w);
    let first = vertices.next()?;
    Some(vertices.fold((first, first), |(min, max), v| (min.inf(&v), max.sup(&v))))
}
