//! Interior triangulation (`AddInteriorEdges`, §4.5) and triangle
//! enumeration (`BuildOptTriangles`, §4.6).

use nalgebra::Point2;

use crate::arena::{EdgeKey, OptimizeContext, TriKey, VertKey};
use crate::crossing::edges_cross;
use crate::error::OptimizeError;
use crate::predicates::{is_triangle_valid, point_in_tri};

/// `TryAddNewEdge`: add an edge between `a` and `b` iff it does not cross
/// any edge already present in `ctx` and isn't already linked. Used both
/// by [`add_interior_edges`] and by colinear collapse (§4.8) when
/// re-joining a collapsed vertex's two neighbours.
pub fn try_add_new_edge(ctx: &mut OptimizeContext, a: VertKey, b: VertKey) -> Result<bool, OptimizeError> {
    if a == b || ctx.find_edge(a, b).is_some() {
        return Ok(false);
    }
    let (pa, pb) = (ctx.verts[a].pv, ctx.verts[b].pv);
    let crosses_existing = ctx.edges.values().any(|e| {
        let (p1, p2) = (ctx.verts[e.v1].pv, ctx.verts[e.v2].pv);
        edges_cross(pa, pb, p1, p2)
    });
    if crosses_existing {
        return Ok(false);
    }
    ctx.insert_edge(a, b, true)?;
    Ok(true)
}

/// `AddInteriorEdges`: greedily triangulate the convex hull of the active
/// vertex set (those with at least one incident edge) by trying candidate
/// diagonals shortest-first and keeping only the ones that don't cross
/// anything already committed.
pub fn add_interior_edges(ctx: &mut OptimizeContext) -> Result<(), OptimizeError> {
    let active: Vec<VertKey> = ctx
        .verts
        .iter()
        .filter(|(_, v)| v.edges.is_some())
        .map(|(k, _)| k)
        .collect();

    let mut candidates: Vec<(VertKey, VertKey, f64)> = Vec::new();
    for i in 0..active.len() {
        for j in (i + 1)..active.len() {
            let (a, b) = (active[i], active[j]);
            let len = (ctx.verts[a].pv - ctx.verts[b].pv).norm();
            candidates.push((a, b, len));
        }
    }
    candidates.sort_by(|x, y| x.2.partial_cmp(&y.2).unwrap_or(std::cmp::Ordering::Equal));

    for (a, b, _) in candidates {
        try_add_new_edge(ctx, a, b)?;
    }
    Ok(())
}

fn link_tri_to_edge(ctx: &mut OptimizeContext, tri: TriKey, edge: EdgeKey, from: VertKey, to: VertKey) {
    let e = &mut ctx.edges[edge];
    if e.v1 == from && e.v2 == to {
        if e.front_tri.is_some() {
            log::warn!("LinkTriToEdge: front side already linked, leaving edge partially linked");
        } else {
            e.front_tri = Some(tri);
        }
    } else if e.v1 == to && e.v2 == from {
        if e.back_tri.is_some() {
            log::warn!("LinkTriToEdge: back side already linked, leaving edge partially linked");
        } else {
            e.back_tri = Some(tri);
        }
    } else {
        log::warn!("LinkTriToEdge: edge does not match either triangle direction, skipping");
    }
}

fn create_opt_tri(
    ctx: &mut OptimizeContext,
    pivot: VertKey,
    e1: EdgeKey,
    e2: EdgeKey,
    second: VertKey,
    third: VertKey,
    original_tris: &[[Point2<f64>; 3]],
) -> Option<TriKey> {
    let opposite = match ctx.find_edge(second, third) {
        Some(e) => e,
        None => {
            log::warn!("CreateOptTri: opposite edge between far endpoints not found, skipping triangle");
            return None;
        }
    };

    let (p0, p1, p2) = (ctx.verts[pivot].pv, ctx.verts[second].pv, ctx.verts[third].pv);
    let mid = Point2::new((p0.x + p1.x + p2.x) / 3.0, (p0.y + p1.y + p2.y) / 3.0);

    let filled = original_tris
        .iter()
        .any(|t| point_in_tri(mid, t[0], t[1], t[2]));

    let tri = ctx.tris.insert(crate::arena::OptTri {
        verts: [pivot, second, third],
        mid,
        filled,
    });

    link_tri_to_edge(ctx, tri, e1, pivot, second);
    link_tri_to_edge(ctx, tri, opposite, second, third);
    link_tri_to_edge(ctx, tri, e2, third, pivot);

    Some(tri)
}

/// `BuildOptTriangles`: enumerate the candidate triangles implied by the
/// current edge arrangement, classify each as filled/empty against the
/// original input triangles, and link them to their bounding edges.
pub fn build_opt_triangles(
    ctx: &mut OptimizeContext,
    original_tris: &[[Point2<f64>; 3]],
) -> Result<(), OptimizeError> {
    ctx.tris.clear();
    for v in ctx.verts.values_mut() {
        v.emitted = false;
    }
    for e in ctx.edges.values_mut() {
        e.front_tri = None;
        e.back_tri = None;
    }

    let pivots: Vec<VertKey> = ctx.verts.keys().collect();
    for ov in pivots {
        let incident: Vec<EdgeKey> = ctx.incident_edges(ov).collect();

        for i in 0..incident.len() {
            for j in (i + 1)..incident.len() {
                let (e1, e2) = (incident[i], incident[j]);
                let second = ctx.edges[e1].other(ov);
                let third = ctx.edges[e2].other(ov);

                if ctx.verts[second].emitted || ctx.verts[third].emitted {
                    continue;
                }
                if !is_triangle_valid(ctx.verts[ov].pv, ctx.verts[second].pv, ctx.verts[third].pv) {
                    continue;
                }

                let bisected = incident.iter().any(|&check| {
                    if check == e1 || check == e2 {
                        return false;
                    }
                    let middle = ctx.edges[check].other(ov);
                    is_triangle_valid(ctx.verts[ov].pv, ctx.verts[second].pv, ctx.verts[middle].pv)
                        && is_triangle_valid(ctx.verts[ov].pv, ctx.verts[middle].pv, ctx.verts[third].pv)
                });
                if bisected {
                    continue;
                }

                create_opt_tri(ctx, ov, e1, e2, second, third, original_tris);
            }
        }

        ctx.verts[ov].emitted = true;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::OptimizeContext;
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
    fn try_add_new_edge_rejects_a_crossing_candidate() {
        let mut g = OptimizeGroup::new(
            PlaneNum(0),
            "mat",
            0,
            vec![MapTri {
                verts: [vert(0.0, 0.0), vert(10.0, 0.0), vert(0.0, 10.0)],
            }],
        );
        g.axis = [Vector3::x(), Vector3::y()];
        let mut ctx = OptimizeContext::new(OptimizeConfig::default());
        build_arrangement(&mut ctx, &g).unwrap();

        let a = ctx.intern_vertex(Point2::new(10.0, 10.0), ctx.verts.values().next().unwrap().payload).unwrap();
        let b = ctx.intern_vertex(Point2::new(-5.0, -5.0), ctx.verts.values().next().unwrap().payload).unwrap();

        // This diagonal crosses the triangle's hypotenuse, so it must be
        // rejected even though neither endpoint is already linked to it.
        assert!(!try_add_new_edge(&mut ctx, a, b).unwrap());
    }

    #[test]
    fn clean_triangle_yields_exactly_one_opt_triangle() {
        let mut g = OptimizeGroup::new(
            PlaneNum(0),
            "mat",
            0,
            vec![MapTri {
                verts: [vert(0.0, 0.0), vert(10.0, 0.0), vert(0.0, 10.0)],
            }],
        );
        g.axis = [Vector3::x(), Vector3::y()];
        let mut ctx = OptimizeContext::new(OptimizeConfig::default());
        let original_tris = build_arrangement(&mut ctx, &g).unwrap();

        add_interior_edges(&mut ctx).unwrap();
        build_opt_triangles(&mut ctx, &original_tris).unwrap();

        assert_eq!(ctx.tris.len(), 1);
        assert!(ctx.tris.values().next().unwrap().filled);
    }
}
