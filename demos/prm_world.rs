// MIT License
//
// Copyright (c) 2024 Erik Holum
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use geo::polygon;
use log::{info, warn};
use plotly::common::{Fill, Line, Marker, Mode};
use plotly::{Layout, Plot, Scatter};
use rustroadmap::{
    Agent, DrawOptions, Obstacle, PointAgent, PositionConfigurationSpace, Prm, PrmConfig,
    SearchStrategy, SteeringParams, Vec2,
};
use std::env;

// Host loop parameters, updates per rendered frame and their time step
const SUBSTEPS: usize = 40;
const DT: f64 = 0.002;
const MAX_FRAMES: usize = 10_000;

fn parse_strategy(name: &str) -> Option<SearchStrategy> {
    match name {
        "dfs" => Some(SearchStrategy::DepthFirst),
        "bfs" => Some(SearchStrategy::BreadthFirst),
        "ucs" => Some(SearchStrategy::UniformCost),
        "astar" => Some(SearchStrategy::AStar),
        "weighted" => Some(SearchStrategy::WeightedAStar(1.5)),
        _ => None,
    }
}

/// A circle in the middle of the world and a couple of walls
fn world() -> PositionConfigurationSpace {
    let upper_wall = polygon![
        (x: -60.0, y: 40.0),
        (x: 20.0, y: 40.0),
        (x: 20.0, y: 50.0),
        (x: -60.0, y: 50.0),
        (x: -60.0, y: 40.0),
    ];
    let lower_wall = polygon![
        (x: 40.0, y: -70.0),
        (x: 50.0, y: -70.0),
        (x: 50.0, y: 10.0),
        (x: 40.0, y: 10.0),
        (x: 40.0, y: -70.0),
    ];
    PositionConfigurationSpace::new(vec![
        Obstacle::circle(Vec2::zeros(), 25.0),
        Obstacle::Polygon(upper_wall),
        Obstacle::Polygon(lower_wall),
    ])
    .with_clearance(1.0)
}

// Closed outline of an obstacle
fn outline(obstacle: &Obstacle) -> (Vec<f64>, Vec<f64>) {
    match obstacle {
        Obstacle::Circle { center, radius } => (0..=64)
            .map(|i| {
                let angle = f64::from(i) * std::f64::consts::TAU / 64.0;
                let p = *center + Vec2::from_angle(angle) * *radius;
                (p.x(), p.y())
            })
            .unzip(),
        Obstacle::Polygon(polygon) => polygon.exterior().points().map(|p| (p.x(), p.y())).unzip(),
    }
}

// Line segments as a single trace, NaN breaks the line between segments
fn segments(edges: &[(Vec2, Vec2)]) -> (Vec<f64>, Vec<f64>) {
    let mut x = Vec::with_capacity(edges.len() * 3);
    let mut y = Vec::with_capacity(edges.len() * 3);
    for (a, b) in edges {
        x.extend([a.x(), b.x(), f64::NAN]);
        y.extend([a.y(), b.y(), f64::NAN]);
    }
    (x, y)
}

fn visualize(
    prm: &Prm,
    space: &PositionConfigurationSpace,
    path: &[Vec2],
    trajectory: &[Vec2],
    title: &str,
) {
    let mut plot = Plot::new();
    let snapshot = prm.snapshot(&DrawOptions::default());

    // Plot obstacles
    for obstacle in space.obstacles() {
        let (x, y) = outline(obstacle);
        let trace = Scatter::new(x, y)
            .fill(Fill::ToSelf)
            .fill_color("black")
            .line(Line::new().color("black"))
            .opacity(1.0);
        plot.add_trace(trace);
    }

    // Plot roadmap
    let (x, y) = segments(&snapshot.edges);
    plot.add_trace(
        Scatter::new(x, y)
            .mode(Mode::Lines)
            .line(Line::new().color("lightblue").width(0.5)),
    );
    let (x, y): (Vec<_>, Vec<_>) = snapshot.milestones.iter().map(|p| (p.x(), p.y())).unzip();
    plot.add_trace(
        Scatter::new(x, y)
            .mode(Mode::Markers)
            .marker(Marker::new().color("blue").size(2)),
    );

    // Plot path and the agent's trajectory along it
    let (x, y): (Vec<_>, Vec<_>) = path.iter().map(|p| (p.x(), p.y())).unzip();
    plot.add_trace(
        Scatter::new(x, y)
            .mode(Mode::Lines)
            .line(Line::new().color("red").width(4.0)),
    );
    let (x, y): (Vec<_>, Vec<_>) = trajectory.iter().map(|p| (p.x(), p.y())).unzip();
    plot.add_trace(
        Scatter::new(x, y)
            .mode(Mode::Lines)
            .line(Line::new().color("orange").width(2.0)),
    );

    // Plot start and end
    if let (Some(start), Some(end)) = (path.first(), path.last()) {
        plot.add_trace(
            Scatter::new(vec![start.x()], vec![start.y()])
                .mode(Mode::Markers)
                .marker(Marker::new().color("green").size(16)),
        );
        plot.add_trace(
            Scatter::new(vec![end.x()], vec![end.y()])
                .mode(Mode::Markers)
                .marker(Marker::new().color("yellow").size(16)),
        );
    }

    let layout = Layout::new()
        .title(title.into())
        .show_legend(false)
        .width(750)
        .height(750)
        .x_axis(plotly::layout::Axis::new().title("X".into()))
        .y_axis(plotly::layout::Axis::new().title("Y".into()));

    plot.set_layout(layout);
    plot.show();
}

pub fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() > 3 {
        eprintln!("Usage: prm_world [dfs|bfs|ucs|astar|weighted] [seed]");
        return;
    }
    let Some(strategy) = parse_strategy(args.get(1).map_or("astar", String::as_str)) else {
        eprintln!("Unknown strategy, expected one of dfs, bfs, ucs, astar, weighted");
        return;
    };
    let Ok(seed) = args.get(2).map_or(Ok(0), |s| s.parse::<u64>()) else {
        eprintln!("Invalid seed");
        return;
    };

    let space = world();
    let config = PrmConfig::default();
    let mut prm = Prm::seeded(seed);
    if let Err(e) = prm.grow_with(&config, &space) {
        eprintln!("Failed to grow the roadmap: {e}");
        return;
    }

    let (start, goal) = (Vec2::new(-90.0, 90.0), Vec2::new(90.0, -90.0));
    let path = prm.search(strategy, start, goal, config.min_edge_len, config.max_edge_len, &space);
    if path.is_empty() {
        warn!("No path found, try another seed");
    } else {
        info!(
            "{strategy} path with {} milestones and cost {:.2}",
            path.len(),
            path.cost()
        );
    }

    // Drive an agent along the path, recording one position per frame
    let waypoints = path.positions();
    let mut agent = PointAgent::new();
    agent.spawn(&waypoints, SteeringParams::default());
    let mut trajectory = vec![agent.position()];
    for frame in 0..MAX_FRAMES {
        let arrived = agent.update_substeps(SUBSTEPS, DT);
        trajectory.push(agent.position());
        if arrived {
            info!("Agent arrived after {frame} frames");
            break;
        }
    }

    let title = format!("{strategy} Path Finding Result");
    visualize(&prm, &space, &waypoints, &trajectory, &title);
}
