//! Monte Carlo Tree Search with UCT selection.
//!
//! Every search grows a fresh tree from the board it is given. One iteration walks down the
//! fully expanded part of the tree by UCT, expands one untried move, plays a uniformly random
//! game from there and adds the result to every node on the way back up. When the budget is
//! spent, the most-won child of the root is played and the tree is thrown away.
//!
//! Nodes live in an arena (`Vec<Node>`); parents and children refer to each other by
//! [`NodeId`], so the back-references used during backpropagation never own anything.

use itertools::Itertools as _;
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::{Outcome, Player, Position, Strategy};
use crate::error::SearchError;

pub const DEFAULT_ITERATIONS: usize = 2000;
pub const DEFAULT_EXPLORATION: f64 = std::f64::consts::SQRT_2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MctsConfig {
    /// Number of select/expand/simulate/backpropagate rounds per move. At least one is run.
    pub iterations: usize,
    /// The constant c in the UCT formula. Larger values explore more.
    pub exploration: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            exploration: DEFAULT_EXPLORATION,
        }
    }
}

/// Index of a node in a [`SearchTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub struct Node {
    pub board: Board,
    pub parent: Option<NodeId>,
    /// The move that led here from the parent. `None` for the root.
    pub action: Option<Position>,
    pub children: Vec<NodeId>,
    /// Number of simulations whose path went through this node
    pub visits: u32,
    /// Sum of simulation results, seen from the player who moved into this node
    pub wins: f64,
    untried: Vec<Position>,
}

impl Node {
    fn new(board: Board, parent: Option<NodeId>, action: Option<Position>) -> Self {
        Self {
            board,
            parent,
            action,
            children: Vec::new(),
            visits: 0,
            wins: 0.0,
            untried: board.legal_moves(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.board.is_over()
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    pub fn untried_actions(&self) -> &[Position] {
        &self.untried
    }

    /// The player whose move produced this node
    pub fn mover(&self) -> Player {
        self.board.next_player().other()
    }
}

/// The UCT formula. Unvisited nodes are always tried first.
pub fn uct(c: f64, wins: f64, visits: u32, parent_visits: u32) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }
    let visits = visits as f64;
    wins / visits + c * ((parent_visits as f64).ln() / visits).sqrt()
}

/// Play uniformly random moves from `board` until the game is decided.
pub fn rollout<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Outcome {
    let mut board = *board;
    loop {
        let outcome = board.check_outcome();
        if outcome.is_decided() {
            return outcome;
        }
        let player = board.next_player();
        match board.legal_moves().choose(rng) {
            Some(&pos) => board.place_mark(pos, player),
            None => return outcome,
        }
    }
}

/// +1 if `mover` won, -1 if the opponent won, 0 for a draw
fn reward_for(mover: Player, outcome: Outcome) -> f64 {
    match outcome {
        Outcome::Won(p) if p == mover => 1.0,
        Outcome::Won(_) => -1.0,
        Outcome::Draw | Outcome::InProgress => 0.0,
    }
}

pub struct SearchTree {
    nodes: Vec<Node>,
    exploration: f64,
}

impl SearchTree {
    /// A tree holding only `board`. Fails if the game on `board` is already decided.
    pub fn new(board: Board, exploration: f64) -> Result<Self, SearchError> {
        let outcome = board.check_outcome();
        if outcome.is_decided() {
            return Err(SearchError::InvalidState(outcome));
        }
        Ok(Self {
            nodes: vec![Node::new(board, None, None)],
            exploration,
        })
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Run `iterations` rounds of search, growing the tree.
    pub fn run<R: Rng + ?Sized>(&mut self, iterations: usize, rng: &mut R) {
        for _ in 0..iterations {
            self.iterate(rng);
        }
        trace!(
            "search tree has {} nodes and {} root visits",
            self.len(),
            self.node(self.root()).visits
        );
    }

    /// One round of selection, expansion, simulation and backpropagation.
    pub fn iterate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut id = self.select();
        let node = self.node(id);
        if !node.is_terminal() && !node.is_fully_expanded() {
            id = self.expand(id);
        }
        let outcome = rollout(&self.node(id).board, rng);
        self.backpropagate(id, outcome);
    }

    /// Walk down from the root through fully expanded nodes, following the best UCT score.
    pub fn select(&self) -> NodeId {
        let mut id = self.root();
        loop {
            let node = self.node(id);
            if node.is_terminal() || !node.is_fully_expanded() {
                return id;
            }
            match self.uct_select(id, self.exploration) {
                Some(child) => id = child,
                None => return id,
            }
        }
    }

    /// The child of `id` with the highest UCT score for exploration constant `c`.
    /// Ties go to the child that was expanded first.
    pub fn uct_select(&self, id: NodeId, c: f64) -> Option<NodeId> {
        let parent = self.node(id);
        parent
            .children
            .iter()
            .map(|&child_id| {
                let child = self.node(child_id);
                (child_id, uct(c, child.wins, child.visits, parent.visits))
            })
            .max_set_by(|(_, a), (_, b)| a.total_cmp(b))
            .into_iter()
            .next()
            .map(|(child_id, _)| child_id)
    }

    /// Take the last untried move of `id`, and add the board it leads to as a new child.
    /// Returns `id` itself if there was nothing left to try.
    pub fn expand(&mut self, id: NodeId) -> NodeId {
        let parent = &mut self.nodes[id.0];
        let Some(action) = parent.untried.pop() else {
            return id;
        };
        let board = parent.board.apply_move(action, parent.board.next_player());
        let child_id = NodeId(self.nodes.len());
        self.nodes[id.0].children.push(child_id);
        self.nodes.push(Node::new(board, Some(id), Some(action)));
        child_id
    }

    /// Count a visit on every node from `id` up to the root, crediting each with the
    /// result seen from the player who moved into it.
    pub fn backpropagate(&mut self, id: NodeId, outcome: Outcome) {
        let mut reward = reward_for(self.node(id).mover(), outcome);
        let mut current = Some(id);
        while let Some(id) = current {
            let node = &mut self.nodes[id.0];
            node.visits += 1;
            node.wins += reward;
            // the parent was moved into by the other player
            reward = -reward;
            current = node.parent;
        }
    }

    /// The move to the root child with the best mean result, with exploration turned off.
    pub fn best_action(&self) -> Option<Position> {
        self.uct_select(self.root(), 0.0)
            .and_then(|id| self.node(id).action)
    }
}

/// What a search decided: the move, who makes it, and the board after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MctsMove {
    pub position: Position,
    pub player: Player,
    pub board: Board,
}

/// Run a search from `board` with the given configuration and pick a move.
pub fn search<R: Rng + ?Sized>(
    board: &Board,
    config: &MctsConfig,
    rng: &mut R,
) -> Result<MctsMove, SearchError> {
    let mut tree = SearchTree::new(*board, config.exploration)?;
    tree.run(config.iterations.max(1), rng);
    let position = tree.best_action().ok_or(SearchError::EmptyTree)?;
    let player = board.next_player();
    Ok(MctsMove {
        position,
        player,
        board: board.apply_move(position, player),
    })
}

/// Run `iterations` rounds of MCTS with the default exploration constant.
pub fn run_mcts<R: Rng + ?Sized>(
    board: &Board,
    iterations: usize,
    rng: &mut R,
) -> Result<MctsMove, SearchError> {
    let config = MctsConfig {
        iterations,
        ..MctsConfig::default()
    };
    search(board, &config, rng)
}

pub struct MctsAi {
    name: String,
    config: MctsConfig,
    rng: StdRng,
}

impl MctsAi {
    /// seed is for the RNG used in the rollouts
    pub fn new(mark: Player, config: MctsConfig, seed: u64) -> Self {
        MctsAi {
            name: format!("mcts {mark}"),
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Strategy for MctsAi {
    fn choose(&mut self, board: &Board) -> Result<Position, SearchError> {
        let decision = search(board, &self.config, &mut self.rng)?;
        debug!(
            "{} picked {} after {} iterations",
            self.name, decision.position, self.config.iterations
        );
        Ok(decision.position)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn tree(s: &str) -> SearchTree {
        SearchTree::new(s.parse().unwrap(), DEFAULT_EXPLORATION).unwrap()
    }

    #[test]
    fn refuses_decided_boards() {
        let won: Board = "xxxoo    ".parse().unwrap();
        assert!(matches!(
            SearchTree::new(won, DEFAULT_EXPLORATION),
            Err(SearchError::InvalidState(Outcome::Won(Player::One)))
        ));
        let drawn: Board = "xoxxoxoxo".parse().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            run_mcts(&drawn, 100, &mut rng),
            Err(SearchError::InvalidState(Outcome::Draw))
        ));
    }

    #[test]
    fn unvisited_children_come_first() {
        assert_eq!(uct(DEFAULT_EXPLORATION, 0.0, 0, 10), f64::INFINITY);
        assert!(uct(DEFAULT_EXPLORATION, 5.0, 10, 20) > 0.5);
        assert_eq!(uct(0.0, 5.0, 10, 20), 0.5);
    }

    #[test]
    fn rollouts_end_in_a_decided_game() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert!(rollout(&Board::new(), &mut rng).is_decided());
        }
        let won: Board = "ooo xx x ".parse().unwrap();
        assert_eq!(rollout(&won, &mut rng), Outcome::Won(Player::Two));
    }

    #[test]
    fn expansion_pops_the_last_untried_move() {
        let mut t = tree("xx oo    ");
        let root = t.root();
        let child = t.expand(root);
        assert_eq!(t.node(child).action, Some(Position::new(2, 2)));
        assert_eq!(t.node(child).parent, Some(root));
        assert_eq!(t.node(root).children, vec![child]);
        assert_eq!(t.node(root).untried_actions().len(), 4);
        assert_eq!(t.node(child).mover(), Player::One);
    }

    #[test]
    fn backpropagation_flips_the_sign_every_ply() {
        let mut t = tree("xx oo    ");
        let root = t.root();
        let child = t.expand(root);
        let grandchild = t.expand(child);
        t.backpropagate(grandchild, Outcome::Won(Player::Two));
        // grandchild was moved into by O, child by X
        assert_eq!(t.node(grandchild).wins, 1.0);
        assert_eq!(t.node(child).wins, -1.0);
        assert_eq!(t.node(root).wins, 1.0);
        t.backpropagate(child, Outcome::Draw);
        assert_eq!(t.node(child).wins, -1.0);
        assert_eq!(t.node(child).visits, 2);
        assert_eq!(t.node(root).visits, 2);
    }

    #[test]
    fn visit_counts_add_up() {
        let mut t = tree("         ");
        let mut rng = StdRng::seed_from_u64(42);
        t.run(500, &mut rng);
        assert_eq!(t.node(t.root()).visits, 500);
        t.run(300, &mut rng);
        assert_eq!(t.node(t.root()).visits, 800);
        for id in t.node_ids() {
            let node = t.node(id);
            let through_children: u32 = node.children.iter().map(|&c| t.node(c).visits).sum();
            if node.is_terminal() {
                assert!(node.children.is_empty());
            } else if id == t.root() {
                assert_eq!(node.visits, through_children);
            } else {
                // one simulation started here when the node was expanded
                assert_eq!(node.visits, through_children + 1);
            }
        }
    }

    #[test]
    fn takes_the_immediate_win() {
        let board: Board = "xx oo    ".parse().unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let decision = run_mcts(&board, 2000, &mut rng).unwrap();
        assert_eq!(decision.position, Position::new(0, 2));
        assert_eq!(decision.player, Player::One);
        assert_eq!(decision.board.check_outcome(), Outcome::Won(Player::One));
    }

    #[test]
    fn same_seed_same_move() {
        let board: Board = "x   o    ".parse().unwrap();
        let config = MctsConfig {
            iterations: 500,
            ..MctsConfig::default()
        };
        let a = search(&board, &config, &mut StdRng::seed_from_u64(11)).unwrap();
        let b = search(&board, &config, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(a, b);
    }
}
