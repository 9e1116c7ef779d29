//! Lays out a small branch line end to end: a straight trunk, a curved
//! extension, a diverging wye, and an elevated spur picked from a batch of
//! previewed candidates. Prints the resulting geometry, runs the network
//! audit, and walks the connectivity dump.
//!
//! Run with `cargo run` from the workspace root (branchline is the default
//! binary) or `cargo run -p branchline`.

use anyhow::{Context, Result};
use rail_core::{Direction, GeometryConfig, TrackCatalog, TrackType, Vec2};
use rail_geom::{Endpoint as FitEndpoint, TrackShape, plan_shapes};
use rail_net::{Endpoint, RailNetwork};
use tracing::Level;

// ── Constants ────────────────────────────────────────────────────────────────

const TRUNK_LENGTH_M: f64 = 400.0; // west end sits at the origin
const SIDING_LENGTH_M: f64 = 80.0;

fn class<'a>(catalog: &'a TrackCatalog, name: &str) -> Result<&'a TrackType> {
    catalog
        .iter()
        .find(|t| t.name == name)
        .with_context(|| format!("track class `{name}` not registered"))
}

fn main() -> Result<()> {
    // 1. Logging. Placement and demolition log at DEBUG, audit failures at
    //    ERROR, so the full story shows up on the console.
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .init();

    // 2. Track classes and an empty network with default tolerances.
    let catalog = TrackCatalog::standard();
    let standard = class(&catalog, "standard")?;
    let viaduct = class(&catalog, "viaduct")?;
    let mut net = RailNetwork::new(GeometryConfig::default());

    // 3. Trunk: two free endpoints, so the fit degenerates to a straight.
    let trunk = net.place(
        Endpoint::Free(Vec2::new(0.0, 0.0)),
        Endpoint::Free(Vec2::new(TRUNK_LENGTH_M, 0.0)),
        standard,
    )?;
    let (west_end, east_end) = {
        let piece = net.piece(trunk).context("trunk piece missing")?;
        (piece.start.node, piece.end.node)
    };

    // 4. Curved extension off the east end. Leaving along EAST towards
    //    (650, 120) fits a left-hand arc of radius 76900 / 240 ~ 320 m.
    let extension = net.place(
        Endpoint::Node { node: east_end, direction: Direction::EAST },
        Endpoint::Free(Vec2::new(650.0, 120.0)),
        standard,
    )?;

    // 5. Wye: a second departure from the east end, rotated half a radian
    //    south of the trunk heading.
    net.place(
        Endpoint::Node { node: east_end, direction: Direction::from_angle(-0.5) },
        Endpoint::Free(Vec2::new(600.0, -150.0)),
        standard,
    )?;

    // 6. Elevated spur off the west end, chosen by previewing three targets
    //    in one batch. The first target needs a tighter turn than the
    //    viaduct class allows and is rejected without touching the network.
    let west_pos = net.node(west_end).context("west end vanished")?.position;
    let targets = [
        Vec2::new(-20.0, 30.0),
        Vec2::new(-200.0, 80.0),
        Vec2::new(-250.0, 10.0),
    ];
    let candidates: Vec<(FitEndpoint, FitEndpoint)> = targets
        .iter()
        .map(|&t| (FitEndpoint::anchored(west_pos, Direction::WEST), FitEndpoint::free(t)))
        .collect();
    let fits = plan_shapes(&candidates, viaduct, net.config());
    println!("── Spur candidates ─────────────────────────────────────────────");
    for (target, fit) in targets.iter().zip(&fits) {
        match fit {
            Ok(shape) => println!("  {target}: {} of {:.1} m", shape.kind(), shape.length()),
            Err(e) => println!("  {target}: rejected, {e}"),
        }
    }
    let chosen = fits
        .iter()
        .position(|fit| fit.is_ok())
        .context("no feasible spur candidate")?;
    net.place(
        Endpoint::Node { node: west_end, direction: Direction::WEST },
        Endpoint::Free(targets[chosen]),
        viaduct,
    )?;

    // 7. A temporary siding straight ahead of the extension, then demolish
    //    it again. The stub node it created disappears with it.
    let (ext_end, ext_dir) = {
        let piece = net.piece(extension).context("extension piece missing")?;
        (piece.end.node, piece.end.direction)
    };
    let ext_pos = net.node(ext_end).context("extension end vanished")?.position;
    let siding = net.place(
        Endpoint::Node { node: ext_end, direction: ext_dir },
        Endpoint::Free(ext_pos + ext_dir.as_vec() * SIDING_LENGTH_M),
        standard,
    )?;
    let before = (net.node_count(), net.piece_count());
    net.remove(siding)?;
    println!("── Siding round trip ───────────────────────────────────────────");
    println!("  with siding    {} nodes, {} pieces", before.0, before.1);
    println!("  after removal  {} nodes, {} pieces", net.node_count(), net.piece_count());

    // 8. Audit the whole component, then walk it deterministically.
    net.check(west_end)?;
    println!("── Connectivity from {west_end} ───────────────────────────────");
    print!("{}", net.dump(west_end));

    // 9. Per-piece breakdown and totals.
    println!("── Pieces ──────────────────────────────────────────────────────");
    println!(
        "  {:<12} {:<12} {:<10} {:>9} {:>9} {:>9}  generators",
        "id", "class", "shape", "length", "radius", "cost"
    );
    let mut total_cost = 0.0;
    for (id, piece) in net.pieces() {
        let class = catalog.get(piece.track_type).context("unknown track class")?;
        let radius = match piece.shape {
            TrackShape::Arc(arc) => format!("{:.1}", arc.radius),
            TrackShape::Straight(_) => "-".into(),
        };
        let generators: Vec<&str> = class
            .generators(piece.shape.kind())
            .iter()
            .map(|g| g.as_str())
            .collect();
        total_cost += piece.cost(class);
        // Column widths pad str arguments, not custom Display impls.
        println!(
            "  {:<12} {:<12} {:<10} {:>8.1}m {:>9} {:>9.0}  {}",
            id.to_string(),
            class.name,
            piece.shape.kind().as_str(),
            piece.length(),
            radius,
            piece.cost(class),
            generators.join("+"),
        );
    }
    println!("── Summary ─────────────────────────────────────────────────────");
    println!("  {:<14} {:>8}", "nodes", net.node_count());
    println!("  {:<14} {:>8}", "pieces", net.piece_count());
    println!("  {:<14} {:>7.1}m", "laid track", net.total_length());
    println!("  {:<14} {:>7.0}c", "build cost", total_cost);
    Ok(())
}
