//! `RegenerateTriangles` (§4.10): turn filled optimizer triangles back
//! into 3D output, rejecting any that numerically flipped the plane
//! normal.

use nalgebra::Vector3;

use crate::arena::OptimizeContext;
use crate::types::{MapTri, OptimizeGroup};

/// Populate `group.regenerated_tris` from every filled triangle in `ctx`,
/// discarding (with a warning) any whose 3D winding disagrees with
/// `plane_normal` (P1).
pub fn regenerate_triangles(
    ctx: &OptimizeContext,
    group: &mut OptimizeGroup,
    plane_normal: Vector3<f64>,
) {
    for tri in ctx.tris.values().filter(|t| t.filled) {
        let [a, b, c] = tri.verts;
        let pa = ctx.verts[a].payload;
        let pb = ctx.verts[b].payload;
        let pc = ctx.verts[c].payload;

        let normal = (pb.xyz - pa.xyz).cross(&(pc.xyz - pa.xyz));
        if normal.dot(&plane_normal) <= 0.0 {
            log::warn!(
                "RegenerateTriangles: discarding triangle whose 3D winding disagrees with the group plane normal"
            );
            continue;
        }

        group.regenerated_tris.push(MapTri {
            verts: [pa.into(), pb.into(), pc.into()],
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrangement::build_arrangement;
    use crate::classify::remove_interior_edges;
    use crate::colinear::{combine_colinear_edges, cull_unused_verts};
    use crate::config::OptimizeConfig;
    use crate::triangulate::{add_interior_edges, build_opt_triangles};
    use crate::types::{MapVert, PlaneNum};
    use nalgebra::Point3;

    fn vert(x: f64, y: f64) -> MapVert {
        MapVert {
            xyz: Point3::new(x, y, 0.0),
            normal: Vector3::z(),
            st: (0.0, 0.0),
        }
    }

    #[test]
    fn clean_triangle_round_trips() {
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
        combine_colinear_edges(&mut ctx).unwrap();
        cull_unused_verts(&mut ctx);
        add_interior_edges(&mut ctx).unwrap();
        build_opt_triangles(&mut ctx, &original_tris).unwrap();

        regenerate_triangles(&ctx, &mut g, Vector3::z());
        assert_eq!(g.regenerated_tris.len(), 1);
    }
}
