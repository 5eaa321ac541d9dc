//! Arrangement construction: interning original triangles into vertices
//! and edges, then splitting those edges at every crossing (§4.4).

use nalgebra::Point2;

use crate::arena::{OptimizeContext, VertKey, VertPayload};
use crate::crossing::{edge_intersection, edges_cross};
use crate::error::OptimizeError;
use crate::predicates::{is_triangle_valid, vertex_between};
use crate::types::{MapTri, OptimizeGroup};

/// One deduplicated undirected edge from the original input triangles,
/// together with the vertices later found to cross it.
struct OriginalEdge {
    v1: VertKey,
    v2: VertKey,
    crossings: Vec<VertKey>,
}

impl OriginalEdge {
    fn has_pair(&self, a: VertKey, b: VertKey) -> bool {
        (self.v1 == a && self.v2 == b) || (self.v1 == b && self.v2 == a)
    }
}

/// `AddOriginalEdges`: intern every input triangle's vertices, validate
/// it, and collect its (deduplicated) edges. Returns the original edges
/// (pre-split) and the projected triangles later used by `PointInTri`
/// fill classification. Triangles failing `IsTriangleValid` are logged
/// and excluded from both.
fn add_original_edges(
    ctx: &mut OptimizeContext,
    group: &OptimizeGroup,
) -> Result<(Vec<OriginalEdge>, Vec<[Point2<f64>; 3]>), OptimizeError> {
    let mut original_edges: Vec<OriginalEdge> = Vec::new();
    let mut original_tris: Vec<[Point2<f64>; 3]> = Vec::new();

    for (idx, tri) in group.tri_list.iter().enumerate() {
        let keys = project_and_intern(ctx, tri, &group.axis)?;
        let pvs = [
            ctx.verts[keys[0]].pv,
            ctx.verts[keys[1]].pv,
            ctx.verts[keys[2]].pv,
        ];

        if !is_triangle_valid(pvs[0], pvs[1], pvs[2]) {
            log::warn!(
                "group plane {:?}: input triangle {idx} is degenerate or backwards in its projected plane, skipping",
                group.plane_num,
            );
            continue;
        }

        original_tris.push(pvs);

        for &(a, b) in &[(keys[0], keys[1]), (keys[1], keys[2]), (keys[2], keys[0])] {
            if a == b {
                continue;
            }
            if !original_edges.iter().any(|e| e.has_pair(a, b)) {
                original_edges.push(OriginalEdge {
                    v1: a,
                    v2: b,
                    crossings: Vec::new(),
                });
            }
        }
    }

    Ok((original_edges, original_tris))
}

fn project_and_intern(
    ctx: &mut OptimizeContext,
    tri: &MapTri,
    axis: &[nalgebra::Vector3<f64>; 2],
) -> Result<[VertKey; 3], OptimizeError> {
    let mut keys = [VertKey::default(); 3];
    for (i, v) in tri.verts.iter().enumerate() {
        let pv = Point2::new(v.xyz.coords.dot(&axis[0]), v.xyz.coords.dot(&axis[1]));
        keys[i] = ctx.intern_vertex(pv, VertPayload::from(*v))?;
    }
    Ok(keys)
}

fn push_crossing(list: &mut Vec<VertKey>, v: VertKey) {
    if !list.contains(&v) {
        list.push(v);
    }
}

/// `SplitOriginalEdgesAtCrossings`: for every pair of original edges that
/// cross, synthesize or locate the crossing vertex; then, per original
/// edge, emit the maximal non-subdivided subsegments between its
/// accumulated split points as real `OptEdge`s in `ctx`.
fn split_original_edges_at_crossings(
    ctx: &mut OptimizeContext,
    mut original_edges: Vec<OriginalEdge>,
) -> Result<(), OptimizeError> {
    let n = original_edges.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let (a1, a2) = (original_edges[i].v1, original_edges[i].v2);
            let (b1, b2) = (original_edges[j].v1, original_edges[j].v2);
            let (pa1, pa2, pb1, pb2) = (
                ctx.verts[a1].pv,
                ctx.verts[a2].pv,
                ctx.verts[b1].pv,
                ctx.verts[b2].pv,
            );

            if !edges_cross(pa1, pa2, pb1, pb2) {
                continue;
            }

            match edge_intersection(pa1, pa2, pb1, pb2) {
                Some((point, f)) => {
                    let payload = VertPayload::lerp(&ctx.verts[a1].payload, &ctx.verts[a2].payload, f);
                    let new_vert = ctx.intern_vertex(point, payload)?;
                    if new_vert != a1 && new_vert != a2 {
                        push_crossing(&mut original_edges[i].crossings, new_vert);
                    }
                    if new_vert != b1 && new_vert != b2 {
                        push_crossing(&mut original_edges[j].crossings, new_vert);
                    }
                }
                None => {
                    // Exactly colinear: any endpoint of the other edge
                    // strictly between this edge's endpoints is a split
                    // point for this edge, and vice versa. This
                    // asymmetric bookkeeping (i gets b's endpoints, j
                    // gets a's) is deliberate; see SPEC_FULL.md §9.
                    if vertex_between(pb1, pa1, pa2) {
                        push_crossing(&mut original_edges[i].crossings, b1);
                    }
                    if vertex_between(pb2, pa1, pa2) {
                        push_crossing(&mut original_edges[i].crossings, b2);
                    }
                    if vertex_between(pa1, pb1, pb2) {
                        push_crossing(&mut original_edges[j].crossings, a1);
                    }
                    if vertex_between(pa2, pb1, pb2) {
                        push_crossing(&mut original_edges[j].crossings, a2);
                    }
                }
            }
        }
    }

    for oe in &original_edges {
        let mut sorted: Vec<VertKey> = Vec::with_capacity(oe.crossings.len() + 2);
        sorted.push(oe.v1);
        sorted.push(oe.v2);
        for &c in &oe.crossings {
            if !sorted.contains(&c) {
                sorted.push(c);
            }
        }

        for jx in 0..sorted.len() {
            for kx in (jx + 1)..sorted.len() {
                let (vj, vk) = (sorted[jx], sorted[kx]);
                let (pj, pk) = (ctx.verts[vj].pv, ctx.verts[vk].pv);
                let subdivided = sorted.iter().enumerate().any(|(lx, &vl)| {
                    lx != jx && lx != kx && vertex_between(ctx.verts[vl].pv, pj, pk)
                });
                if !subdivided {
                    ctx.add_edge_if_new(vj, vk, false)?;
                }
            }
        }
    }

    Ok(())
}

/// Build the full edge arrangement for `group` in `ctx`: intern vertices,
/// collect original edges, split them at crossings, and return the
/// original (projected) triangles for later fill classification.
pub fn build_arrangement(
    ctx: &mut OptimizeContext,
    group: &OptimizeGroup,
) -> Result<Vec<[Point2<f64>; 3]>, OptimizeError> {
    let (original_edges, original_tris) = add_original_edges(ctx, group)?;
    split_original_edges_at_crossings(ctx, original_edges)?;
    Ok(original_tris)
}
