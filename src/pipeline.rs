//! Outer orchestration (§2 step 6, §5, §6): the public entry points that
//! glue the component stages into the full per-group and per-list
//! pipeline.

use crate::arena::OptimizeContext;
use crate::arrangement::build_arrangement;
use crate::classify::remove_interior_edges;
use crate::colinear::{combine_colinear_edges, cull_unused_verts};
use crate::config::OptimizeConfig;
use crate::emit::regenerate_triangles;
use crate::error::OptimizeError;
use crate::triangulate::{add_interior_edges, build_opt_triangles};
use crate::types::{project_axes, OptimizeGroup, PlaneTable, TjunctionFixer};

/// Run the full optimizer pipeline (§2 step 6) on a single group:
/// `AddInteriorEdges → BuildOptTriangles → RemoveInteriorEdges →
/// CombineColinearEdges → CullUnusedVerts → AddInteriorEdges →
/// BuildOptTriangles → RegenerateTriangles`, having first projected the
/// group's plane normal into an in-plane basis and built the edge
/// arrangement from its input triangles.
pub fn optimize_opt_list(
    group: &mut OptimizeGroup,
    config: OptimizeConfig,
    plane_normal: nalgebra::Vector3<f64>,
) -> Result<(), OptimizeError> {
    group.axis = project_axes(plane_normal);

    let mut ctx = OptimizeContext::new(config);
    let original_tris = build_arrangement(&mut ctx, group)?;
    ctx.validate_edge_counts();

    add_interior_edges(&mut ctx)?;
    build_opt_triangles(&mut ctx, &original_tris)?;

    remove_interior_edges(&mut ctx);
    combine_colinear_edges(&mut ctx)?;
    cull_unused_verts(&mut ctx);

    add_interior_edges(&mut ctx)?;
    build_opt_triangles(&mut ctx, &original_tris)?;

    group.regenerated_tris.clear();
    regenerate_triangles(&ctx, group, plane_normal);

    #[cfg(feature = "debug-stats")]
    log::debug!(
        "group plane {:?}: {} input tris -> {} verts, {} edges, {} tris -> {} output tris",
        group.plane_num,
        group.tri_list.len(),
        ctx.verts.len(),
        ctx.edges.len(),
        ctx.tris.len(),
        group.regenerated_tris.len(),
    );

    Ok(())
}

/// `OptimizeGroupList`: run the core over every group, calling the
/// whole-area T-junction collaborator before and after (§5 ordering
/// requirement). A fatal error on one group aborts the whole batch and
/// propagates to the caller, matching the original's whole-compile-abort
/// behaviour for capacity exhaustion and invariant violations.
pub fn optimize_group_list(
    groups: &mut [OptimizeGroup],
    planes: &impl PlaneTable,
    fixer: &mut impl TjunctionFixer,
    config: OptimizeConfig,
) -> Result<(), OptimizeError> {
    for group in groups.iter_mut() {
        fixer.fix(group);
    }

    for group in groups.iter_mut() {
        let normal = planes.normal(group.plane_num);
        optimize_opt_list(group, config, normal)?;
    }

    for group in groups.iter_mut() {
        fixer.fix(group);
    }

    Ok(())
}
