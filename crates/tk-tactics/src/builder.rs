//! Fluent builder for constructing a [`TacticalController`].

use tk_core::GameRules;
use tk_route::{RouteGraph, Router};

use crate::controller::{ControllerConfig, TacticalController};
use crate::error::TacticsResult;

/// Fluent builder for [`TacticalController<R>`].
///
/// # Required inputs
///
/// - `R: Router`: the macro routing algorithm (e.g. [`tk_route::DijkstraRouter`])
///
/// # Optional inputs (have defaults)
///
/// | Method         | Default                                  |
/// |----------------|------------------------------------------|
/// | `.rules(r)`    | `GameRules::default()`                   |
/// | `.config(c)`   | `ControllerConfig::default()`            |
/// | `.graph(g)`    | `RouteGraph::for_map(rules.map_size)`    |
///
/// # Example
///
/// ```rust,ignore
/// let controller = ControllerBuilder::new(DijkstraRouter)
///     .rules(rules)
///     .build()?;
/// let mut session = controller.new_session(Role::Leader);
/// let command = controller.decide(&world, &objective, &mut session, &mut NoopObserver)?;
/// ```
pub struct ControllerBuilder<R: Router> {
    router: R,
    rules:  Option<GameRules>,
    config: Option<ControllerConfig>,
    graph:  Option<RouteGraph>,
}

impl<R: Router> ControllerBuilder<R> {
    pub fn new(router: R) -> Self {
        Self { router, rules: None, config: None, graph: None }
    }

    pub fn rules(mut self, rules: GameRules) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn config(mut self, config: ControllerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a prebuilt route graph.  It must describe the same map as the
    /// rules.
    pub fn graph(mut self, graph: RouteGraph) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Validate inputs and construct the controller.
    pub fn build(self) -> TacticsResult<TacticalController<R>> {
        let rules = self.rules.unwrap_or_default();
        rules.validate()?;
        let config = self.config.unwrap_or_default();
        config.validate()?;
        let graph = match self.graph {
            Some(graph) => graph,
            None => RouteGraph::for_map(rules.map_size)?,
        };
        Ok(TacticalController { rules, graph, router: self.router, config })
    }
}
