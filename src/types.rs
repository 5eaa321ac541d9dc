//! External interface types (§6): the shapes the optimizer consumes and
//! produces, plus the collaborator traits standing in for the surrounding
//! compiler (plane table, T-junction fixer) that §1 treats as external.

use nalgebra::{Point3, Vector3};

use crate::arena::VertPayload;

/// One input vertex: position, normal, texture coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapVert {
    pub xyz: Point3<f64>,
    pub normal: Vector3<f64>,
    pub st: (f64, f64),
}

impl From<MapVert> for VertPayload {
    fn from(v: MapVert) -> Self {
        VertPayload {
            xyz: v.xyz,
            normal: v.normal,
            st: v.st,
        }
    }
}

impl From<VertPayload> for MapVert {
    fn from(v: VertPayload) -> Self {
        MapVert {
            xyz: v.xyz,
            normal: v.normal,
            st: v.st,
        }
    }
}

/// One input triangle: three map vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapTri {
    pub verts: [MapVert; 3],
}

/// Index into the caller's plane table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaneNum(pub u32);

/// The caller's global plane table, queried only for a group's normal.
/// Kept as a trait rather than a concrete type since the plane table's
/// storage, allocation and dedup are entirely out of scope (§1).
pub trait PlaneTable {
    fn normal(&self, plane_num: PlaneNum) -> Vector3<f64>;
}

/// `FixAreaGroupsTjunctions` / `FreeTJunctionHash`, the whole-area
/// T-junction fixer this core calls as a black box before and after
/// running (§5 ordering requirement). Standalone tests use
/// [`NoopTjunctionFixer`].
pub trait TjunctionFixer {
    fn fix(&mut self, group: &mut OptimizeGroup);
}

/// A fixer that does nothing, for use when testing the core in isolation
/// from the whole-area T-junction pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTjunctionFixer;

impl TjunctionFixer for NoopTjunctionFixer {
    fn fix(&mut self, _group: &mut OptimizeGroup) {}
}

/// One coplanar group of input triangles, and the slot the core populates
/// with its retriangulated output.
#[derive(Debug, Clone)]
pub struct OptimizeGroup {
    pub plane_num: PlaneNum,
    pub material: String,
    pub merge_group: i32,
    pub tri_list: Vec<MapTri>,
    pub regenerated_tris: Vec<MapTri>,
    /// Orthonormal in-plane basis, populated by `project_axes`.
    pub axis: [Vector3<f64>; 2],
}

impl OptimizeGroup {
    pub fn new(plane_num: PlaneNum, material: impl Into<String>, merge_group: i32, tri_list: Vec<MapTri>) -> Self {
        OptimizeGroup {
            plane_num,
            material: material.into(),
            merge_group,
            tri_list,
            regenerated_tris: Vec::new(),
            axis: [Vector3::zeros(), Vector3::zeros()],
        }
    }
}

/// Derive two orthonormal in-plane basis vectors from a plane normal
/// (`ProjectAxes`, §2 step 1), matching
/// `vcad_kernel_geom::Plane::from_normal`'s arbitrary-perpendicular
/// construction: pick whichever world axis is least aligned with the
/// normal, cross it in to get the first in-plane axis, then cross again
/// for the second.
pub fn project_axes(normal: Vector3<f64>) -> [Vector3<f64>; 2] {
    let n = normal.normalize();
    let arbitrary = if n.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let axis0 = arbitrary.cross(&n).normalize();
    let axis1 = n.cross(&axis0).normalize();
    [axis0, axis1]
}
