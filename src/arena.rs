//! Per-group scoped storage for the optimizer's vertex/edge/triangle graph.
//!
//! `optVerts`/`optEdges` were historically module-level arrays reset at the
//! start of each group. Here the same arenas are fields
//! of [`OptimizeContext`], constructed fresh per group, so there is no
//! global mutable state to reset. The "island" of the original design is
//! simply this context's live slotmap entries — there is only ever one
//! island per context (the "don't separate" variant), so no separate
//! linked-list-of-islands bookkeeping is needed.

use nalgebra::{Point2, Point3, Vector3};
use slotmap::{new_key_type, SlotMap};

use crate::config::OptimizeConfig;
use crate::error::OptimizeError;

new_key_type! {
    pub struct VertKey;
    pub struct EdgeKey;
    pub struct TriKey;
}

/// The 3D payload carried by an interned vertex: position, normal, texture
/// coordinates. Mirrors `idDrawVert` fields relevant to this pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertPayload {
    pub xyz: Point3<f64>,
    pub normal: Vector3<f64>,
    pub st: (f64, f64),
}

impl VertPayload {
    /// Linear interpolation used when synthesizing a crossing vertex.
    /// Position and texture coordinates interpolate linearly; the normal
    /// interpolates linearly then renormalizes.
    pub fn lerp(a: &VertPayload, b: &VertPayload, f: f64) -> VertPayload {
        let xyz = a.xyz + (b.xyz - a.xyz) * f;
        let st = (a.st.0 + (b.st.0 - a.st.0) * f, a.st.1 + (b.st.1 - a.st.1) * f);
        let normal = a.normal + (b.normal - a.normal) * f;
        let normal = if normal.norm_squared() > 0.0 {
            normal.normalize()
        } else {
            normal
        };
        VertPayload { xyz, normal, st }
    }
}

pub struct OptVertex {
    /// Projected 2D coordinates. Kept as `Point2` rather than the original's
    /// `(x, y, 0)` triple — the z component existed only so in-place cross
    /// products could read a z; this crate computes 2D cross products
    /// directly instead (see `predicates::cross2d`).
    pub pv: Point2<f64>,
    pub payload: VertPayload,
    /// Head of the incident-edge chain, or `None` if isolated.
    pub edges: Option<EdgeKey>,
    pub emitted: bool,
}

pub struct OptEdge {
    pub v1: VertKey,
    pub v2: VertKey,
    /// Next edge in `v1`'s incidence chain.
    pub v1_next: Option<EdgeKey>,
    /// Next edge in `v2`'s incidence chain.
    pub v2_next: Option<EdgeKey>,
    pub front_tri: Option<TriKey>,
    pub back_tri: Option<TriKey>,
    pub created: bool,
}

impl OptEdge {
    /// The endpoint of this edge other than `from`.
    pub fn other(&self, from: VertKey) -> VertKey {
        if self.v1 == from {
            self.v2
        } else {
            debug_assert_eq!(self.v2, from);
            self.v1
        }
    }
}

pub struct OptTri {
    pub verts: [VertKey; 3],
    pub mid: Point2<f64>,
    pub filled: bool,
}

/// Running 2D bounding box of interned vertices. Supplements the
/// distilled spec with the original's `optBounds` accumulation (see
/// SPEC_FULL.md §10.5); exposed read-only for callers that want it for
/// spatial indexing downstream.
#[derive(Debug, Clone, Copy)]
pub struct Bounds2 {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl Bounds2 {
    fn empty() -> Self {
        Bounds2 {
            min: Point2::new(f64::INFINITY, f64::INFINITY),
            max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    fn include(&mut self, p: Point2<f64>) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }
}

/// Scoped arenas and intern table for a single group's optimization run.
pub struct OptimizeContext {
    pub verts: SlotMap<VertKey, OptVertex>,
    pub edges: SlotMap<EdgeKey, OptEdge>,
    pub tris: SlotMap<TriKey, OptTri>,
    pub bounds: Bounds2,
    pub config: OptimizeConfig,
}

impl OptimizeContext {
    pub fn new(config: OptimizeConfig) -> Self {
        OptimizeContext {
            verts: SlotMap::with_key(),
            edges: SlotMap::with_key(),
            tris: SlotMap::with_key(),
            bounds: Bounds2::empty(),
            config,
        }
    }

    /// Intern a projected vertex by exact float equality (V3). Returns the
    /// existing vertex if one already has this exact `(x, y)` pair.
    ///
    /// This is a linear scan over all live vertices, matching the
    /// original's `FindOptVertex`, which never upgrades to a hash map
    /// despite `MAX_OPT_VERTEXES` headroom. Preserved deliberately; see
    /// SPEC_FULL.md §10.5.
    pub fn intern_vertex(
        &mut self,
        pv: Point2<f64>,
        payload: VertPayload,
    ) -> Result<VertKey, OptimizeError> {
        for (key, v) in self.verts.iter() {
            if v.pv.x == pv.x && v.pv.y == pv.y {
                return Ok(key);
            }
        }
        if self.verts.len() >= self.config.max_opt_vertexes {
            return Err(OptimizeError::VertexCapacityExceeded {
                limit: self.config.max_opt_vertexes,
            });
        }
        self.bounds.include(pv);
        Ok(self.verts.insert(OptVertex {
            pv,
            payload,
            edges: None,
            emitted: false,
        }))
    }

    /// Iterate the edges incident to `v`, in incidence-chain order.
    pub fn incident_edges(&self, v: VertKey) -> IncidentEdges<'_> {
        IncidentEdges {
            ctx: self,
            pivot: v,
            cur: self.verts[v].edges,
        }
    }

    /// Find an already-linked edge between `a` and `b`, if one exists.
    pub fn find_edge(&self, a: VertKey, b: VertKey) -> Option<EdgeKey> {
        self.incident_edges(a).find(|&e| self.edges[e].other(a) == b)
    }

    fn link_at(&mut self, v: VertKey, e: EdgeKey) {
        let head = self.verts[v].edges;
        let edge = &mut self.edges[e];
        if edge.v1 == v {
            edge.v1_next = head;
        } else {
            debug_assert_eq!(edge.v2, v);
            edge.v2_next = head;
        }
        self.verts[v].edges = Some(e);
    }

    /// Insert a new edge between `a` and `b` unconditionally, linking it
    /// into both endpoints' incidence chains. Callers that must not
    /// duplicate an unordered pair should use [`Self::add_edge_if_new`].
    pub fn insert_edge(
        &mut self,
        a: VertKey,
        b: VertKey,
        created: bool,
    ) -> Result<EdgeKey, OptimizeError> {
        if a == b {
            return Err(OptimizeError::invariant(
                "insert_edge called with equal endpoints (self-loop)",
            ));
        }
        if self.edges.len() >= self.config.max_opt_edges {
            return Err(OptimizeError::EdgeCapacityExceeded {
                limit: self.config.max_opt_edges,
            });
        }
        let key = self.edges.insert(OptEdge {
            v1: a,
            v2: b,
            v1_next: None,
            v2_next: None,
            front_tri: None,
            back_tri: None,
            created,
        });
        self.link_at(a, key);
        self.link_at(b, key);
        Ok(key)
    }

    /// `AddEdgeIfNotAlready`: insert an edge between `a` and `b` unless one
    /// is already linked between them (V2: no duplicate unordered pairs).
    pub fn add_edge_if_new(
        &mut self,
        a: VertKey,
        b: VertKey,
        created: bool,
    ) -> Result<Option<EdgeKey>, OptimizeError> {
        if a == b || self.find_edge(a, b).is_some() {
            return Ok(None);
        }
        self.insert_edge(a, b, created).map(Some)
    }

    fn remove_from_vert(&mut self, v: VertKey, target: EdgeKey) {
        let mut cur = self.verts[v].edges;
        let mut prev: Option<EdgeKey> = None;
        while let Some(c) = cur {
            let next = if self.edges[c].v1 == v {
                self.edges[c].v1_next
            } else {
                self.edges[c].v2_next
            };
            if c == target {
                match prev {
                    None => self.verts[v].edges = next,
                    Some(p) => {
                        if self.edges[p].v1 == v {
                            self.edges[p].v1_next = next;
                        } else {
                            self.edges[p].v2_next = next;
                        }
                    }
                }
                return;
            }
            prev = Some(c);
            cur = next;
        }
    }

    /// Unlink `e` from both its endpoints' incidence chains and remove it
    /// from the arena. Leaves the endpoint vertices in place even if they
    /// become isolated; `cull_unused_verts` handles that separately.
    pub fn remove_edge(&mut self, e: EdgeKey) {
        let (v1, v2) = {
            let edge = &self.edges[e];
            (edge.v1, edge.v2)
        };
        self.remove_from_vert(v1, e);
        self.remove_from_vert(v2, e);
        self.edges.remove(e);
    }

    /// `ValidateEdgeCounts`: trace-log any vertex whose incident edge count
    /// is neither 0 (isolated, pending `cull_unused_verts`) nor 2 (an
    /// ordinary chain link). Three or more is an expected real junction
    /// wherever several original edges meet at a point, so this is purely
    /// a diagnostic, never a correctness check or an error.
    pub fn validate_edge_counts(&self) {
        for v in self.verts.keys() {
            let count = self.incident_edges(v).count();
            if count != 0 && count != 2 {
                log::trace!("vertex has {count} incident edges (neither isolated nor a chain link)");
            }
        }
    }
}

pub struct IncidentEdges<'a> {
    ctx: &'a OptimizeContext,
    pivot: VertKey,
    cur: Option<EdgeKey>,
}

impl<'a> Iterator for IncidentEdges<'a> {
    type Item = EdgeKey;

    fn next(&mut self) -> Option<EdgeKey> {
        let cur = self.cur?;
        let edge = &self.ctx.edges[cur];
        self.cur = if edge.v1 == self.pivot {
            edge.v1_next
        } else {
            debug_assert_eq!(edge.v2, self.pivot);
            edge.v2_next
        };
        Some(cur)
    }
}
