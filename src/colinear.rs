//! Colinear vertex collapse (§4.8) and unused-vertex culling (§4.9).
//!
//! The original recurses on both far endpoints after a successful merge.
//! This crate uses an explicit work queue instead (`VecDeque`), per
//! SPEC_FULL.md §9, to avoid unbounded recursion depth on long colinear
//! chains.

use std::collections::VecDeque;

use crate::arena::{EdgeKey, OptimizeContext, VertKey};
use crate::error::OptimizeError;
use crate::triangulate::try_add_new_edge;

fn point_line_distance_3d(
    p: nalgebra::Point3<f64>,
    a: nalgebra::Point3<f64>,
    b: nalgebra::Point3<f64>,
) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return (p - a).norm();
    }
    let t = (p - a).dot(&ab) / len2;
    let proj = a + ab * t;
    (p - proj).norm()
}

/// Attempt to collapse `v` if it has exactly two incident edges that are
/// oppositely directed and colinear (within `COLINEAR_EPSILON`) with it in
/// world space. On success, `v`'s two former neighbours are requeued for
/// re-examination, since the merge may have created a new colinear chain.
fn try_collapse(
    ctx: &mut OptimizeContext,
    v: VertKey,
    queue: &mut VecDeque<VertKey>,
) -> Result<(), OptimizeError> {
    let incident: Vec<EdgeKey> = ctx.incident_edges(v).collect();
    if incident.len() != 2 {
        return Ok(());
    }
    let (e_a, e_b) = (incident[0], incident[1]);
    let v1 = ctx.edges[e_a].other(v);
    let v3 = ctx.edges[e_b].other(v);
    if v1 == v3 {
        return Ok(());
    }

    let pv = ctx.verts[v].pv;
    let p1 = ctx.verts[v1].pv;
    let p3 = ctx.verts[v3].pv;
    if (p3 - pv).dot(&(p1 - pv)) >= 0.0 {
        return Ok(());
    }

    let dist = point_line_distance_3d(
        ctx.verts[v].payload.xyz,
        ctx.verts[v1].payload.xyz,
        ctx.verts[v3].payload.xyz,
    );
    if dist > ctx.config.colinear_epsilon {
        return Ok(());
    }

    let payload = ctx.verts[v].payload;
    let created_a = ctx.edges[e_a].created;
    let created_b = ctx.edges[e_b].created;

    ctx.remove_edge(e_a);
    ctx.remove_edge(e_b);
    ctx.verts.remove(v);

    if let Some(existing) = ctx.find_edge(v1, v3) {
        // A sliver collapsed onto an edge that was already there.
        ctx.remove_edge(existing);
        queue.push_back(v1);
        queue.push_back(v3);
        return Ok(());
    }

    if try_add_new_edge(ctx, v1, v3)? {
        queue.push_back(v1);
        queue.push_back(v3);
    } else {
        // The merged edge would cross something; put v back exactly as
        // it was.
        let restored = ctx.verts.insert(crate::arena::OptVertex {
            pv,
            payload,
            edges: None,
            emitted: false,
        });
        ctx.insert_edge(restored, v1, created_a)?;
        ctx.insert_edge(restored, v3, created_b)?;
    }
    Ok(())
}

/// `CombineColinearEdges`: repeatedly attempt colinear collapse across the
/// whole vertex set until no vertex qualifies anymore.
pub fn combine_colinear_edges(ctx: &mut OptimizeContext) -> Result<(), OptimizeError> {
    let mut queue: VecDeque<VertKey> = ctx.verts.keys().collect();
    while let Some(v) = queue.pop_front() {
        if !ctx.verts.contains_key(v) {
            continue;
        }
        try_collapse(ctx, v, &mut queue)?;
    }
    Ok(())
}

/// `CullUnusedVerts`: remove isolated vertices, and vertices left with a
/// single dangling incident edge (a spur left by a failed-then-undone or
/// partial colinear collapse).
pub fn cull_unused_verts(ctx: &mut OptimizeContext) {
    loop {
        let mut changed = false;
        let keys: Vec<VertKey> = ctx.verts.keys().collect();
        for v in keys {
            if !ctx.verts.contains_key(v) {
                continue;
            }
            let incident: Vec<EdgeKey> = ctx.incident_edges(v).collect();
            match incident.len() {
                0 => {
                    ctx.verts.remove(v);
                    changed = true;
                }
                1 => {
                    ctx.remove_edge(incident[0]);
                    ctx.verts.remove(v);
                    changed = true;
                }
                _ => {}
            }
        }
        if !changed {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrangement::build_arrangement;
    use crate::config::OptimizeConfig;
    use crate::types::{MapTri, MapVert, OptimizeGroup, PlaneNum};
    use nalgebra::{Point3, Vector3};

    fn vert(x: f64, y: f64) -> MapVert {
        MapVert {
            xyz: Point3::new(x, y, 0.0),
            normal: Vector3::z(),
            st: (0.0, 0.0),
        }
    }

    #[test]
    fn sliver_third_vertex_near_shared_edge_is_collapsed() {
        // Two triangles sharing the edge (0,0)-(10,0). The second has a
        // third vertex at (5, 0.01), within COLINEAR_EPSILON of that edge,
        // making it a sliver once the shared edge is subdivided there.
        let mut g = OptimizeGroup::new(
            PlaneNum(0),
            "mat",
            0,
            vec![
                MapTri {
                    verts: [vert(0.0, 0.0), vert(10.0, 0.0), vert(5.0, 10.0)],
                },
                MapTri {
                    verts: [vert(0.0, 0.0), vert(5.0, 0.01), vert(10.0, 0.0)],
                },
            ],
        );
        g.axis = [Vector3::x(), Vector3::y()];

        let mut ctx = OptimizeContext::new(OptimizeConfig::default());
        build_arrangement(&mut ctx, &g).unwrap();
        combine_colinear_edges(&mut ctx).unwrap();
        cull_unused_verts(&mut ctx);

        // The near-colinear vertex at (5, 0.01) should have been merged
        // away, leaving the bottom boundary a single edge again.
        let near_sliver = ctx
            .verts
            .values()
            .any(|v| (v.pv.x - 5.0).abs() < 1e-6 && (v.pv.y - 0.01).abs() < 1e-6);
        assert!(!near_sliver);
    }

    #[test]
    fn real_junction_with_three_edges_is_not_collapsed() {
        let mut g = OptimizeGroup::new(
            PlaneNum(0),
            "mat",
            0,
            vec![
                MapTri {
                    verts: [vert(0.0, 0.0), vert(10.0, 0.0), vert(5.0, 10.0)],
                },
                MapTri {
                    verts: [vert(5.0, 0.0), vert(10.0, 0.0), vert(5.0, -10.0)],
                },
            ],
        );
        g.axis = [Vector3::x(), Vector3::y()];

        let mut ctx = OptimizeContext::new(OptimizeConfig::default());
        build_arrangement(&mut ctx, &g).unwrap();
        combine_colinear_edges(&mut ctx).unwrap();

        // (5,0) has three incident edges (to (0,0), (10,0) is split there,
        // and to (5,-10)) so it must survive as a real junction.
        let junction = ctx
            .verts
            .iter()
            .find(|(_, v)| (v.pv.x - 5.0).abs() < 1e-9 && v.pv.y.abs() < 1e-9)
            .map(|(k, _)| k);
        assert!(junction.is_some());
    }
}
