//! Bookkeeping for geometry buffers handed to the GPU.
//!
//! Every upload yields a [`GeometryHandle`]; the buffers stay live until the
//! handle is passed to [`GpuResources::dispose`]. Disposing twice is an error,
//! which is what lets the controller prove it never leaks or double-frees.

use prim_core::{PrimError, Result};
use prim_math::Color;
use prim_mesh::{LineSegments, TriangleMesh};
use slotmap::{new_key_type, SlotMap};
use tracing::trace;

use crate::pipeline::{prepare_lines, prepare_mesh, prepare_points, PreparedGeometry, Topology};

new_key_type! {
    /// Key of an uploaded geometry.
    pub struct GeometryHandle;
}

/// Counters over the lifetime of a [`GpuResources`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GpuStats {
    pub uploads: usize,
    pub disposals: usize,
    pub live: usize,
    pub peak_live: usize,
    pub live_bytes: usize,
}

#[derive(Debug, Default)]
pub struct GpuResources {
    buffers: SlotMap<GeometryHandle, PreparedGeometry>,
    stats: GpuStats,
}

impl GpuResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload_mesh(&mut self, mesh: &TriangleMesh) -> GeometryHandle {
        self.insert(prepare_mesh(mesh))
    }

    pub fn upload_lines(&mut self, lines: &LineSegments, color: Color) -> GeometryHandle {
        self.insert(prepare_lines(lines, color))
    }

    pub fn upload_points(&mut self, mesh: &TriangleMesh) -> GeometryHandle {
        self.insert(prepare_points(mesh))
    }

    fn insert(&mut self, prepared: PreparedGeometry) -> GeometryHandle {
        self.stats.uploads += 1;
        self.stats.live_bytes += prepared.byte_len();
        let topology = prepared.topology;
        let handle = self.buffers.insert(prepared);
        self.stats.live = self.buffers.len();
        self.stats.peak_live = self.stats.peak_live.max(self.stats.live);
        trace!(?handle, ?topology, "geometry uploaded");
        handle
    }

    /// Release the buffers behind `handle`.
    pub fn dispose(&mut self, handle: GeometryHandle) -> Result<()> {
        let prepared = self.buffers.remove(handle).ok_or_else(|| {
            PrimError::Resource(format!(
                "geometry {handle:?} is not live (unknown or already disposed)"
            ))
        })?;
        self.stats.disposals += 1;
        self.stats.live = self.buffers.len();
        self.stats.live_bytes -= prepared.byte_len();
        trace!(?handle, "geometry disposed");
        Ok(())
    }

    pub fn get(&self, handle: GeometryHandle) -> Option<&PreparedGeometry> {
        self.buffers.get(handle)
    }

    pub fn is_live(&self, handle: GeometryHandle) -> bool {
        self.buffers.contains_key(handle)
    }

    /// Element count to draw for `handle`, if live.
    pub fn element_count(&self, handle: GeometryHandle) -> Option<u32> {
        self.get(handle).map(|g| g.element_count)
    }

    pub fn topology(&self, handle: GeometryHandle) -> Option<Topology> {
        self.get(handle).map(|g| g.topology)
    }

    pub fn live(&self) -> usize {
        self.buffers.len()
    }

    pub fn stats(&self) -> GpuStats {
        self.stats
    }
}
