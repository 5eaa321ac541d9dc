//! Interior-edge removal (§4.7). Fill/empty classification itself happens
//! per-triangle in `triangulate::create_opt_tri`; this module only acts on
//! the result.

use crate::arena::{EdgeKey, OptimizeContext};

/// `RemoveInteriorEdges`: drop every edge whose two bounding candidate
/// triangles agree on fill classification (both filled or both empty,
/// treating a missing side as empty), leaving only the filled/empty
/// outline (V5 / P3).
pub fn remove_interior_edges(ctx: &mut OptimizeContext) {
    let to_remove: Vec<EdgeKey> = ctx
        .edges
        .iter()
        .filter_map(|(key, e)| {
            let front = e.front_tri.map(|t| ctx.tris[t].filled).unwrap_or(false);
            let back = e.back_tri.map(|t| ctx.tris[t].filled).unwrap_or(false);
            (front == back).then_some(key)
        })
        .collect();

    for key in to_remove {
        ctx.remove_edge(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrangement::build_arrangement;
    use crate::config::OptimizeConfig;
    use crate::triangulate::{add_interior_edges, build_opt_triangles};
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
    fn single_triangle_keeps_all_boundary_edges() {
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

        remove_interior_edges(&mut ctx);
        // A lone triangle's three sides each have one missing side
        // (outside, unfilled) and one filled side: never equal, so all
        // three edges survive.
        assert_eq!(ctx.edges.len(), 3);
    }
}
