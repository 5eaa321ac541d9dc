//! Coplanar triangle-group optimizer.
//!
//! Given a set of input triangles that all lie on one plane (a "group"),
//! [`optimize_group_list`] replaces them with a topologically clean,
//! non-overlapping retriangulation of the same covered 2D region: vertices
//! are shared along common boundaries, interior edges between
//! same-classification regions are pruned, colinear vertex chains are
//! collapsed, and the remaining outline is retriangulated with a greedy
//! shortest-diagonal strategy before being emitted back to 3D.
//!
//! # Example
//!
//! ```
//! use mapopt_groups::{
//!     optimize_group_list, MapTri, MapVert, NoopTjunctionFixer, OptimizeConfig,
//!     OptimizeGroup, PlaneNum, PlaneTable,
//! };
//! use nalgebra::{Point3, Vector3};
//!
//! struct FlatPlane;
//! impl PlaneTable for FlatPlane {
//!     fn normal(&self, _plane_num: PlaneNum) -> Vector3<f64> {
//!         Vector3::z()
//!     }
//! }
//!
//! let v = |x: f64, y: f64| MapVert {
//!     xyz: Point3::new(x, y, 0.0),
//!     normal: Vector3::z(),
//!     st: (0.0, 0.0),
//! };
//!
//! let mut groups = vec![OptimizeGroup::new(
//!     PlaneNum(0),
//!     "concrete",
//!     0,
//!     vec![MapTri { verts: [v(0.0, 0.0), v(10.0, 0.0), v(0.0, 10.0)] }],
//! )];
//!
//! optimize_group_list(
//!     &mut groups,
//!     &FlatPlane,
//!     &mut NoopTjunctionFixer,
//!     OptimizeConfig::default(),
//! )
//! .unwrap();
//! assert_eq!(groups[0].regenerated_tris.len(), 1);
//! ```

pub mod arena;
pub mod arrangement;
pub mod classify;
pub mod colinear;
pub mod config;
pub mod crossing;
pub mod emit;
pub mod error;
mod pipeline;
pub mod predicates;
pub mod triangulate;
pub mod types;

pub use config::OptimizeConfig;
pub use error::OptimizeError;
pub use pipeline::{optimize_group_list, optimize_opt_list};
pub use types::{
    project_axes, MapTri, MapVert, NoopTjunctionFixer, OptimizeGroup, PlaneNum, PlaneTable,
    TjunctionFixer,
};
