//! Small synthetic networks shared by unit tests.

use super::network::NetworkGraph;
use super::point::{GeoCoord, RailroadId};

const REGIONS: [&str; 2] = ["EAST", "WEST"];

/// Points `0..n` in a line on a single railroad. Every point is a city named
/// `C<i>`; the first half is in region EAST, the rest in WEST.
pub fn line(n: usize) -> (NetworkGraph, RailroadId) {
    let mut b = NetworkGraph::builder();
    for i in 0..n {
        let name = format!("C{}", i);
        let region = REGIONS[usize::from(i >= n / 2)];
        b.add_point(GeoCoord::new(40.0, -100.0 + i as f64), region, &[name.as_str()]);
    }
    let rr = b.add_railroad("Line", "L", 10_000).unwrap();
    let chain: Vec<usize> = (0..n).collect();
    b.connect_chain(rr, &chain).unwrap();
    (b.build().unwrap(), rr)
}

/// Points `0..n` in a ring on a single railroad.
pub fn ring(n: usize) -> (NetworkGraph, RailroadId) {
    let mut b = NetworkGraph::builder();
    for i in 0..n {
        let angle = (i as f64) * std::f64::consts::TAU / n as f64;
        let name = format!("R{}", i);
        b.add_point(GeoCoord::new(40.0 + angle.sin(), -100.0 + angle.cos()), "EAST", &[name.as_str()]);
    }
    let rr = b.add_railroad("Ring", "R", 10_000).unwrap();
    for i in 0..n {
        b.connect(rr, i, (i + 1) % n).unwrap();
    }
    (b.build().unwrap(), rr)
}

/// A 3x3 grid of junctions (ids `row * 3 + col`). Rows ride railroad `H`,
/// columns ride railroad `V`. Corners are cities.
///
/// ```text
/// 0 - 1 - 2
/// |   |   |
/// 3 - 4 - 5
/// |   |   |
/// 6 - 7 - 8
/// ```
pub fn grid() -> (NetworkGraph, RailroadId, RailroadId) {
    let mut b = NetworkGraph::builder();
    for row in 0..3 {
        for col in 0..3 {
            let id = row * 3 + col;
            let name = format!("G{}", id);
            let names: Vec<&str> = if id % 2 == 0 && id != 4 { vec![name.as_str()] } else { Vec::new() };
            let region = REGIONS[usize::from(col == 2)];
            b.add_point(GeoCoord::new(40.0 - row as f64, -100.0 + col as f64), region, &names);
        }
    }
    let h = b.add_railroad("Horizontal", "H", 20_000).unwrap();
    let v = b.add_railroad("Vertical", "V", 30_000).unwrap();
    for row in 0..3 {
        b.connect_chain(h, &[row * 3, row * 3 + 1, row * 3 + 2]).unwrap();
    }
    for col in 0..3 {
        b.connect_chain(v, &[col, col + 3, col + 6]).unwrap();
    }
    (b.build().unwrap(), h, v)
}
