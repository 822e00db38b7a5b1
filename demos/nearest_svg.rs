use gridnear::{cell_parity, NeighborQuery, QueryConfig, SegmentKind};
use plotters::prelude::*;

const STYLE_RED: RGBColor = RGBColor(127, 0, 0);
const STYLE_BLUE: RGBColor = RGBColor(0, 0, 127);
const ORANGE: RGBColor = RGBColor(255, 165, 0);

/// Renders one query: cells shaded by occupancy, points coloured by cell,
/// green lines to each nearest neighbor and a red (brute force) / orange
/// (grid) pair wherever the two searches disagree.
///
/// Usage: `cargo run --example nearest_svg -- [points] [cells] [seed]`
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let point_count = args.next().and_then(|a| a.parse().ok()).unwrap_or(50);
    let cells = args.next().and_then(|a| a.parse().ok()).unwrap_or(15);
    let seed = args.next().and_then(|a| a.parse().ok()).unwrap_or(1);

    let config = QueryConfig::default()
        .with_point_count(point_count)
        .with_grid_cells(cells, cells)
        .with_seed(seed);
    let query = NeighborQuery::new(config)?;
    let report = query.run()?;

    let bounds = config.bounds;
    let filename = "nearest_neighbors.svg";
    let root = SVGBackend::new(filename, (bounds.width() as u32, bounds.height() as u32)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .build_cartesian_2d(bounds.min[0]..bounds.max[0], bounds.min[1]..bounds.max[1])?;

    let grid = report.grid_config();
    let [nx, ny] = grid.cells();
    let [cw, ch] = grid.cell_size();

    // Draw points
    let points = report.points();
    chart.draw_series(points.iter().map(|p| {
        let (ix, iy) = grid.locate(p.x, p.y);
        let color = if cell_parity(ix, iy, nx) { STYLE_RED } else { STYLE_BLUE };
        Circle::new((p.x, p.y), p.radius as i32, color.filled())
    }))?;

    // Draw neighbor lines
    for segment in report.segments() {
        let a = &points[segment.from];
        let b = &points[segment.to];
        let style = match segment.kind {
            SegmentKind::Agree => GREEN.stroke_width(3),
            SegmentKind::BruteOnly => RED.stroke_width(5),
            SegmentKind::GridOnly => ORANGE.stroke_width(5),
        };
        chart.draw_series(std::iter::once(PathElement::new(vec![(a.x, a.y), (b.x, b.y)], style)))?;
    }

    // Draw cells shaded by occupancy
    for iy in 0..ny {
        for ix in 0..nx {
            let alpha = report.cell_alpha(ix, iy).unwrap_or(0.0);
            let [x0, y0] = grid.cell_origin(ix, iy);
            chart.draw_series(std::iter::once(Rectangle::new(
                [(x0, y0), (x0 + cw, y0 + ch)],
                BLACK.mix(alpha).filled(),
            )))?;
        }
    }

    // Draw grid lines last
    let line_style = RGBColor(100, 100, 100).mix(0.5);
    for ix in 0..=nx {
        let x = bounds.min[0] + ix as f64 * cw;
        chart.draw_series(std::iter::once(PathElement::new(vec![(x, bounds.min[1]), (x, bounds.max[1])], line_style)))?;
    }
    for iy in 0..=ny {
        let y = bounds.min[1] + iy as f64 * ch;
        chart.draw_series(std::iter::once(PathElement::new(vec![(bounds.min[0], y), (bounds.max[0], y)], line_style)))?;
    }

    root.present()?;

    let consistency = report.consistency();
    if !consistency.is_consistent() {
        println!("Warning, brute force & grid-based have {} mismatches", consistency.mismatch_count());
    }
    println!(
        "Brute count: {}, grid count: {}",
        report.brute().comparisons(),
        report.grid().comparisons()
    );
    println!("Output saved to {}", filename);
    Ok(())
}
