//! Progress bars for the GNUPLOT slice files

// standard library
use std::sync::Mutex;

// penvox modules
use penvox_format::f;
use penvox_penelope::{Plane, ProjectionPaths, SliceObserver};
use penvox_phantom::Dimensions;

// external crates
use kdam::{Bar, BarBuilder, BarExt};
use log::debug;

/// One progress bar per plane, stacked so concurrent files do not overwrite
/// each other
///
/// Bars are only built when the first slice of their plane is written, so a
/// run that fails before writing never draws anything.
pub struct SliceProgress {
    planes: [PlaneBar; 3],
}

struct PlaneBar {
    total: usize,
    desc: String,
    position: u16,
    bar: Mutex<Option<Bar>>,
}

impl PlaneBar {
    fn new(plane: Plane, dimensions: &Dimensions, paths: &ProjectionPaths) -> Self {
        Self {
            total: plane.slices(dimensions),
            desc: f!("{}", paths.get(plane).display()),
            position: position(plane),
            bar: Mutex::new(None),
        }
    }

    fn build(&self) -> Result<Bar, String> {
        BarBuilder::default()
            .total(self.total)
            .desc(self.desc.clone())
            .unit(" slices")
            .position(self.position)
            .leave(true)
            .build()
    }
}

fn position(plane: Plane) -> u16 {
    match plane {
        Plane::XY => 0,
        Plane::XZ => 1,
        Plane::YZ => 2,
    }
}

impl SliceProgress {
    pub fn new(dimensions: &Dimensions, paths: &ProjectionPaths) -> Self {
        Self {
            planes: Plane::ALL.map(|plane| PlaneBar::new(plane, dimensions, paths)),
        }
    }

    fn plane(&self, plane: Plane) -> &PlaneBar {
        &self.planes[usize::from(position(plane))]
    }
}

impl SliceObserver for SliceProgress {
    fn slice_written(&self, plane: Plane, _slice: usize, _total: usize) {
        let plane = self.plane(plane);
        let Ok(mut guard) = plane.bar.lock() else {
            return;
        };

        if guard.is_none() {
            match plane.build() {
                Ok(bar) => *guard = Some(bar),
                Err(e) => debug!("Progress bar could not be built: {e}"),
            }
        }

        if let Some(bar) = guard.as_mut() {
            if let Err(e) = bar.update(1) {
                debug!("Progress bar update failed: {e}");
            }
        }
    }

    fn plane_finished(&self, plane: Plane) {
        if let Ok(mut guard) = self.plane(plane).bar.lock() {
            if let Some(bar) = guard.as_mut() {
                if let Err(e) = bar.refresh() {
                    debug!("Progress bar refresh failed: {e}");
                }
            }
        }
    }
}
