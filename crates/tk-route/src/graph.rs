//! The arena's macro route graph.
//!
//! # Layout
//!
//! The square map is cut into `TILES × TILES` tiles of side
//! `resolution = map_size / TILES`.  A waypoint sits at the centre of a tile:
//!
//! ```text
//! position(x, y) = (resolution/2 + resolution·x, resolution/2 + resolution·y)
//! ```
//!
//! Waypoints occupy the four borders, both diagonals and the four tiles
//! around the centre; 52 in total.  The friendly base is the bottom-left
//! corner `(0, 9)`, the enemy base the top-right `(9, 0)`.  The top lane runs
//! along the left and top borders, the bottom lane along the bottom and right
//! borders, the middle lane along the anti-diagonal.
//!
//! # Data layout
//!
//! Arcs live in a dense `n × n` row-major matrix of weights, `f64::INFINITY`
//! for "no arc".  With 52 nodes the matrix is ~21 KB and a full row scan is
//! cheaper than chasing adjacency lists.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps a world position to the nearest waypoint.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use tk_core::{CoreError, NodeId, Point};

use crate::error::{RouteError, RouteResult};
use crate::router::{DijkstraRouter, RoutePath, Router};

/// Tiles per map side.
pub const TILES: usize = 10;

// ── Lane ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Lane {
    Top,
    Middle,
    Bottom,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Top, Lane::Middle, Lane::Bottom];

    #[inline]
    fn bit(self) -> u8 {
        match self {
            Lane::Top    => 0b001,
            Lane::Middle => 0b010,
            Lane::Bottom => 0b100,
        }
    }
}

/// Set of lanes a waypoint belongs to.  Empty for connective nodes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct LaneSet(u8);

impl LaneSet {
    pub const EMPTY: LaneSet = LaneSet(0);

    #[inline]
    pub fn insert(&mut self, lane: Lane) {
        self.0 |= lane.bit();
    }

    #[inline]
    pub fn contains(self, lane: Lane) -> bool {
        self.0 & lane.bit() != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Lane> {
        Lane::ALL.into_iter().filter(move |&l| self.contains(l))
    }
}

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2],
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── RouteGraph ───────────────────────────────────────────────────────────────

/// Fixed waypoint graph for one match.  Build with [`RouteGraph::for_map`].
pub struct RouteGraph {
    resolution: f64,
    zone_size:  f64,

    /// World position of each node.  Indexed by `NodeId`.
    positions: Vec<Point>,
    /// Tile coordinate of each node.
    tiles:     Vec<(usize, usize)>,
    lanes:     Vec<LaneSet>,
    /// Row-major `n × n` arc weights; `INFINITY` when absent.
    arcs:      Vec<f64>,

    center:      NodeId,
    friend_base: NodeId,
    enemy_base:  NodeId,

    spatial_idx: RTree<NodeEntry>,
}

impl RouteGraph {
    /// Derive the waypoint graph from the map's side length.
    pub fn for_map(map_size: f64) -> RouteResult<Self> {
        if !(map_size > 0.0) {
            return Err(CoreError::Config(format!("map_size must be positive, got {map_size}")).into());
        }
        let graph = TileGraphBuilder::new(map_size / TILES as f64).build()?;
        tracing::debug!(
            nodes = graph.node_count(),
            resolution = graph.resolution,
            "route graph built"
        );
        Ok(graph)
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.positions.len()
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Radius around a waypoint that counts as "being at" it.
    pub fn zone_size(&self) -> f64 {
        self.zone_size
    }

    pub fn center(&self) -> NodeId {
        self.center
    }

    pub fn friend_base(&self) -> NodeId {
        self.friend_base
    }

    pub fn enemy_base(&self) -> NodeId {
        self.enemy_base
    }

    // ── Node data ─────────────────────────────────────────────────────────

    #[inline]
    fn check(&self, node: NodeId) -> RouteResult<usize> {
        let i = node.index();
        if i < self.node_count() { Ok(i) } else { Err(RouteError::NodeNotFound(node)) }
    }

    pub fn position(&self, node: NodeId) -> RouteResult<Point> {
        Ok(self.positions[self.check(node)?])
    }

    pub fn lanes(&self, node: NodeId) -> RouteResult<LaneSet> {
        Ok(self.lanes[self.check(node)?])
    }

    /// Tile coordinate `(x, y)` of a node.
    pub fn tile(&self, node: NodeId) -> RouteResult<(usize, usize)> {
        Ok(self.tiles[self.check(node)?])
    }

    pub fn node_at_tile(&self, x: usize, y: usize) -> Option<NodeId> {
        self.tiles.iter().position(|&t| t == (x, y)).map(|i| NodeId(i as u32))
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, Point)> + '_ {
        self.positions.iter().enumerate().map(|(i, &p)| (NodeId(i as u32), p))
    }

    pub fn nodes_in_lane(&self, lane: Lane) -> impl Iterator<Item = NodeId> + '_ {
        self.lanes
            .iter()
            .enumerate()
            .filter(move |(_, set)| set.contains(lane))
            .map(|(i, _)| NodeId(i as u32))
    }

    // ── Arcs ──────────────────────────────────────────────────────────────

    /// Weight of the arc `from → to`, `None` if the nodes are not adjacent.
    pub fn arc(&self, from: NodeId, to: NodeId) -> RouteResult<Option<f64>> {
        let (f, t) = (self.check(from)?, self.check(to)?);
        let w = self.arcs[f * self.node_count() + t];
        Ok(w.is_finite().then_some(w))
    }

    /// Neighbours of `node` with arc weights, in id order.
    pub fn arcs(&self, node: NodeId) -> RouteResult<impl Iterator<Item = (NodeId, f64)> + '_> {
        let n = self.node_count();
        let row = self.check(node)? * n;
        Ok(self.arcs[row..row + n]
            .iter()
            .enumerate()
            .filter(|(_, w)| w.is_finite())
            .map(|(i, &w)| (NodeId(i as u32), w)))
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Waypoint closest to `point`.  `None` only for an empty graph.
    pub fn nearest_node(&self, point: Point) -> Option<NodeId> {
        self.spatial_idx.nearest_neighbor(&[point.x, point.y]).map(|e| e.id)
    }

    /// Shortest waypoint sequence from `src` to `dst`, both included.
    pub fn shortest_path(&self, src: NodeId, dst: NodeId) -> RouteResult<RoutePath> {
        DijkstraRouter.route(self, src, dst)
    }
}

// ── TileGraphBuilder ─────────────────────────────────────────────────────────

struct TileGraphBuilder {
    resolution: f64,
    tile_node:  [[Option<NodeId>; TILES]; TILES],
    positions:  Vec<Point>,
    tiles:      Vec<(usize, usize)>,
    lanes:      Vec<LaneSet>,
    edges:      Vec<(NodeId, NodeId)>,
}

impl TileGraphBuilder {
    fn new(resolution: f64) -> Self {
        Self {
            resolution,
            tile_node: [[None; TILES]; TILES],
            positions: Vec::with_capacity(52),
            tiles:     Vec::with_capacity(52),
            lanes:     Vec::with_capacity(52),
            edges:     Vec::new(),
        }
    }

    fn tile_point(&self, x: usize, y: usize) -> Point {
        let half = self.resolution / 2.0;
        Point::new(half + self.resolution * x as f64, half + self.resolution * y as f64)
    }

    fn add(&mut self, x: usize, y: usize, lane: Option<Lane>) {
        let id = NodeId(self.positions.len() as u32);
        self.tile_node[x][y] = Some(id);
        self.positions.push(self.tile_point(x, y));
        self.tiles.push((x, y));
        let mut set = LaneSet::EMPTY;
        if let Some(lane) = lane {
            set.insert(lane);
        }
        self.lanes.push(set);
    }

    fn node(&self, x: usize, y: usize) -> RouteResult<NodeId> {
        self.tile_node[x][y].ok_or(RouteError::MissingTile { x, y })
    }

    fn tag(&mut self, x: usize, y: usize, lane: Lane) -> RouteResult<()> {
        let id = self.node(x, y)?;
        self.lanes[id.index()].insert(lane);
        Ok(())
    }

    fn edge(&mut self, a: (usize, usize), b: (usize, usize)) -> RouteResult<()> {
        let edge = (self.node(a.0, a.1)?, self.node(b.0, b.1)?);
        self.edges.push(edge);
        Ok(())
    }

    fn build(mut self) -> RouteResult<RouteGraph> {
        const LAST: usize = TILES - 1;
        const MID: usize = TILES / 2;

        // ── Nodes ─────────────────────────────────────────────────────────
        for s in 1..LAST {
            self.add(0, s, Some(Lane::Top));
            self.add(s, 0, None);
            self.add(s, LAST, Some(Lane::Bottom));
            self.add(LAST, s, None);
            self.add(s, LAST - s, Some(Lane::Middle));
        }
        for s in 2..LAST - 1 {
            self.tag(s, 0, Lane::Top)?;
            self.tag(LAST, s, Lane::Bottom)?;
        }
        self.add(0, LAST, None);
        self.add(LAST, 0, None);
        for s in 0..TILES {
            self.add(s, s, None);
        }
        self.tag(0, 0, Lane::Top)?;
        self.tag(1, 1, Lane::Top)?;
        self.tag(LAST, LAST, Lane::Bottom)?;
        self.tag(LAST - 1, LAST - 1, Lane::Bottom)?;
        self.tag(MID, MID, Lane::Middle)?;
        self.tag(MID - 1, MID - 1, Lane::Middle)?;

        // ── Edges ─────────────────────────────────────────────────────────
        for s in 1..LAST - 1 {
            self.edge((s, LAST - s), (s + 1, LAST - 1 - s))?;
        }
        for s in 0..LAST {
            self.edge((0, LAST - s), (0, LAST - 1 - s))?;
            self.edge((s, LAST), (s + 1, LAST))?;
            self.edge((LAST - s, LAST - s), (LAST - 1 - s, LAST - 1 - s))?;
            self.edge((LAST, s), (LAST, s + 1))?;
            self.edge((LAST - s, 0), (LAST - 1 - s, 0))?;
        }

        // Corner connectors.
        self.edge((1, 1), (1, 0))?;
        self.edge((1, 1), (0, 1))?;
        self.edge((0, 1), (1, 0))?;

        self.edge((LAST - 1, 1), (LAST - 1, 0))?;
        self.edge((LAST - 1, 1), (LAST, 1))?;
        self.edge((LAST - 1, 1), (LAST - 2, 0))?;
        self.edge((LAST - 1, 1), (LAST, 2))?;

        self.edge((LAST - 1, LAST - 1), (LAST - 1, LAST))?;
        self.edge((LAST - 1, LAST - 1), (LAST, LAST - 1))?;
        self.edge((LAST, LAST - 1), (LAST - 1, LAST))?;

        self.edge((1, LAST - 1), (0, LAST - 1))?;
        self.edge((1, LAST - 1), (1, LAST))?;
        self.edge((1, LAST - 1), (0, LAST - 2))?;
        self.edge((1, LAST - 1), (2, LAST))?;

        // Centre square.
        self.edge((MID - 1, MID - 1), (MID, MID - 1))?;
        self.edge((MID, MID - 1), (MID, MID))?;
        self.edge((MID, MID), (MID - 1, MID))?;
        self.edge((MID - 1, MID), (MID - 1, MID - 1))?;

        // ── Assemble ──────────────────────────────────────────────────────
        let n = self.positions.len();
        let mut arcs = vec![f64::INFINITY; n * n];
        for &(a, b) in &self.edges {
            let w = self.positions[a.index()].distance(self.positions[b.index()]);
            arcs[a.index() * n + b.index()] = w;
            arcs[b.index() * n + a.index()] = w;
        }

        let entries = self
            .positions
            .iter()
            .enumerate()
            .map(|(i, p)| NodeEntry { point: [p.x, p.y], id: NodeId(i as u32) })
            .collect();

        Ok(RouteGraph {
            resolution:  self.resolution,
            zone_size:   1.5 * self.resolution,
            center:      self.node(MID - 1, MID)?,
            friend_base: self.node(0, LAST)?,
            enemy_base:  self.node(LAST, 0)?,
            positions:   self.positions,
            tiles:       self.tiles,
            lanes:       self.lanes,
            arcs,
            spatial_idx: RTree::bulk_load(entries),
        })
    }
}
