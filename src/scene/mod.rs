//! Scene state and renderable collections
//!
//! `Scene` owns the logical simulation record (time, obstacle position,
//! culling flags) and its device-visible backing store. Every mutator pushes
//! the full record through the `UniformSink` before returning, so the GPU
//! never observes a stale record: the staleness window is zero frames.

pub mod uniform;
pub mod culling;
pub mod model;
pub mod blades;

pub use uniform::{SceneUniform, UniformSink};
pub use culling::CullingMode;
pub use model::{Model, Vertex};
pub use blades::{BladeInstance, Blades, BladesConfig};

use std::time::Instant;

use crate::core::types::Vec3;

/// Scene state: the logical record, its write-through sink, and the
/// renderable collections drawn each frame.
pub struct Scene<S: UniformSink> {
    uniform: SceneUniform,
    sink: S,
    models: Vec<Model>,
    blades: Vec<Blades>,
    last_tick: Option<Instant>,
}

impl<S: UniformSink> Scene<S> {
    /// Create a scene over the given sink and push the initial record
    pub fn new(sink: S) -> Self {
        let uniform = SceneUniform::default();
        sink.write(&uniform);
        Self {
            uniform,
            sink,
            models: Vec::new(),
            blades: Vec::new(),
            last_tick: None,
        }
    }

    /// Advance simulation time by the wall-clock elapsed since the previous
    /// call. The first call establishes the baseline with a zero delta.
    /// A stalled frame is reflected verbatim in the next delta.
    pub fn advance_time(&mut self) {
        self.advance_time_at(Instant::now());
    }

    fn advance_time_at(&mut self, now: Instant) {
        let delta = match self.last_tick {
            Some(prev) => (now - prev).as_secs_f32(),
            None => 0.0,
        };
        self.last_tick = Some(now);

        self.uniform.time_data[0] = delta;
        self.uniform.time_data[1] += delta;
        self.sink.write(&self.uniform);
    }

    /// Replace the obstacle position, preserving the reserved w component
    pub fn set_sphere_position(&mut self, pos: Vec3) {
        self.uniform.sphere_position[0] = pos.x;
        self.uniform.sphere_position[1] = pos.y;
        self.uniform.sphere_position[2] = pos.z;
        self.sink.write(&self.uniform);
    }

    /// Last-set obstacle position (host copy, never re-read from the device)
    pub fn sphere_position(&self) -> Vec3 {
        Vec3::new(
            self.uniform.sphere_position[0],
            self.uniform.sphere_position[1],
            self.uniform.sphere_position[2],
        )
    }

    /// Toggle orientation culling, leaving the sibling flags untouched
    pub fn set_orientation_culling(&mut self, enabled: bool) {
        self.uniform.culling_flags[0] = if enabled { 1.0 } else { 0.0 };
        self.sink.write(&self.uniform);
    }

    /// Toggle frustum culling, leaving the sibling flags untouched
    pub fn set_frustum_culling(&mut self, enabled: bool) {
        self.uniform.culling_flags[1] = if enabled { 1.0 } else { 0.0 };
        self.sink.write(&self.uniform);
    }

    /// Toggle distance culling, leaving the sibling flags untouched
    pub fn set_distance_culling(&mut self, enabled: bool) {
        self.uniform.culling_flags[2] = if enabled { 1.0 } else { 0.0 };
        self.sink.write(&self.uniform);
    }

    /// Set all three culling flags to the same value in one write
    pub fn set_all_culling(&mut self, enabled: bool) {
        let v = if enabled { 1.0 } else { 0.0 };
        self.uniform.culling_flags[0] = v;
        self.uniform.culling_flags[1] = v;
        self.uniform.culling_flags[2] = v;
        self.sink.write(&self.uniform);
    }

    /// Apply a culling mode's flag triple in one write
    pub fn set_culling_mode(&mut self, mode: CullingMode) {
        let (orientation, frustum, distance) = mode.flags();
        self.uniform.culling_flags[0] = if orientation { 1.0 } else { 0.0 };
        self.uniform.culling_flags[1] = if frustum { 1.0 } else { 0.0 };
        self.uniform.culling_flags[2] = if distance { 1.0 } else { 0.0 };
        self.sink.write(&self.uniform);
    }

    /// Append a renderable mesh
    pub fn add_model(&mut self, model: Model) {
        self.models.push(model);
    }

    /// Append a blade field
    pub fn add_blades(&mut self, blades: Blades) {
        self.blades.push(blades);
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn blades(&self) -> &[Blades] {
        &self.blades
    }

    /// Host copy of the current record
    pub fn uniform(&self) -> &SceneUniform {
        &self.uniform
    }

    /// The write-through sink (the renderer binds its device buffer)
    pub fn sink(&self) -> &S {
        &self.sink
    }
}
