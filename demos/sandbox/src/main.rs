// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Simulates a 30 second session over a 5,000-node scene.
//!
//! Frame cost is modelled from the active quality level plus noise, so the
//! adaptive controller visibly settles on the level the simulated machine can
//! sustain. The final JSON report is printed to stdout.
//!
//! Usage: `sandbox [config.json]`

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use vizperf_core::platform::{Clock, ManualClock};
use vizperf_infra::{native_platform, SysinfoDeviceProfile};
use vizperf_sdk::prelude::*;

const NODE_COUNT: usize = 5_000;
const EDGE_COUNT: usize = 8_000;
const SCENE_SIZE: f32 = 2_000.0;
const SESSION_MS: f64 = 30_000.0;

/// Simulated render cost of one frame at each level, in milliseconds.
fn frame_cost(level: QualityLevel) -> f64 {
    match level {
        QualityLevel::Low => 9.0,
        QualityLevel::Medium => 15.0,
        QualityLevel::High => 22.0,
        QualityLevel::Ultra => 30.0,
    }
}

fn build_scene(rng: &mut StdRng) -> (Vec<VisualNode>, Vec<VisualEdge>) {
    let nodes: Vec<VisualNode> = (0..NODE_COUNT)
        .map(|i| {
            let position = Vec3::new(
                rng.gen_range(0.0..SCENE_SIZE),
                rng.gen_range(0.0..SCENE_SIZE),
                0.0,
            );
            VisualNode::new(format!("node-{i}"), (), position).with_size(rng.gen_range(4.0..16.0))
        })
        .collect();
    let edges = (0..EDGE_COUNT)
        .map(|i| {
            let source = rng.gen_range(0..NODE_COUNT);
            let target = rng.gen_range(0..NODE_COUNT);
            VisualEdge::new(
                format!("edge-{i}"),
                format!("node-{source}"),
                format!("node-{target}"),
            )
        })
        .collect();
    (nodes, edges)
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    // Real memory and device monitors, simulated time.
    let native = native_platform();
    let clock = ManualClock::new();
    let mut platform = native.platform;
    platform.clock = Arc::new(clock.clone());
    // The simulated host renders with WebGL2 on a standard-density display.
    platform.device = Some(Arc::new(
        SysinfoDeviceProfile::detect()
            .with_gpu(true, true)
            .with_pixel_ratio(1.0),
    ));

    let mut engine = VizPerf::new(config, platform);
    let changes = engine.quality_mut().subscribe();
    log::info!(
        "Device suggests '{}' quality",
        engine.quality().detect_optimal_quality()
    );

    let mut rng = StdRng::seed_from_u64(2025);
    let (nodes, edges) = build_scene(&mut rng);
    let viewport = Aabb::from_min_max(Vec2::ZERO, Vec2::splat(SCENE_SIZE / 2.0));

    engine.start();
    let mut next_report = 5_000.0;
    while clock.now_ms() < SESSION_MS {
        native.frames.pump(clock.now_ms());

        engine.begin_frame();
        let pass = engine.render_pass(&nodes, &edges, &viewport);
        let drawn: usize = pass.batches.iter().map(|b| b.len()).sum();
        let cost = frame_cost(engine.quality().current_quality()) + rng.gen_range(-2.0..2.0);
        clock.advance(cost.max(1.0));
        engine.end_frame();
        log::trace!("Drew {} nodes in {} batches", drawn, pass.batches.len());

        engine.tick();
        for change in changes.try_iter() {
            log::info!("Quality {} -> {} at {:.0} ms", change.from, change.to, change.timestamp);
        }

        if clock.now_ms() >= next_report {
            if let Some(surface) = engine.render_dashboard() {
                log::info!("\n{}", surface);
            }
            next_report += 5_000.0;
        }
    }
    engine.stop();

    println!("{}", engine.export_report()?);
    engine.destroy();
    Ok(())
}
