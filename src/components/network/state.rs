use std::collections::HashSet;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::{debug, info, warn};

use super::types::{INSTITUTIONS, LAYERS, LayoutMode, NetworkConfig, TRANSFERS, Transfer, Wallet};

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

/// One wallet per layer and institution, row-major, with starting balances
/// in `[100, 1100)`.
pub fn initial_wallets() -> Vec<Wallet> {
	let mut wallets = Vec::with_capacity(LAYERS.len() * INSTITUTIONS.len());
	for (layer, l) in LAYERS.iter().enumerate() {
		for (institution, inst) in INSTITUTIONS.iter().enumerate() {
			let seed = wallets.len();
			wallets.push(Wallet {
				id: format!("{}_{}", l.id, inst.id),
				layer,
				institution,
				balance: 100 + (rand_simple(seed) * 1000.0) as i64,
			});
		}
	}
	wallets
}

/// A transfer with its endpoints resolved to wallet indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
	pub transfer: Transfer,
	pub from: usize,
	pub to: usize,
}

/// A token currently moving along a route.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Token {
	pub route: usize,
	pub started_ms: f64,
}

/// When the next transfer leaves. Launches are half a flight apart; after the
/// last one the sequence pauses for a full flight before starting again.
#[derive(Clone, Debug)]
struct Schedule {
	next_route: usize,
	next_launch_ms: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub wallet: Option<usize>,
	pub neighbors: HashSet<usize>,
}

#[derive(Clone, Debug, Default)]
pub struct WalletNode {
	pub wallet: usize,
}

pub struct NetworkState {
	pub config: NetworkConfig,
	pub wallets: Vec<Wallet>,
	pub routes: Vec<Route>,
	/// Current on-canvas centre of each wallet.
	pub positions: Vec<(f64, f64)>,
	pub mode: LayoutMode,
	pub tokens: Vec<Token>,
	pub selected: HashSet<usize>,
	pub hover: HoverState,
	pub now_ms: f64,
	graph: Option<ForceGraph<WalletNode, ()>>,
	schedule: Schedule,
	last_tick_ms: Option<f64>,
}

impl NetworkState {
	pub fn new(config: NetworkConfig) -> Self {
		let wallets = initial_wallets();
		let positions = wallets
			.iter()
			.map(|w| config.grid_position(w.layer, w.institution))
			.collect();
		let schedule = Schedule {
			next_route: 0,
			next_launch_ms: config.start_delay_ms,
		};

		let mut state = Self {
			config,
			wallets,
			routes: Vec::new(),
			positions,
			mode: LayoutMode::Grid,
			tokens: Vec::new(),
			selected: HashSet::new(),
			hover: HoverState::default(),
			now_ms: 0.0,
			graph: None,
			schedule,
			last_tick_ms: None,
		};
		for transfer in TRANSFERS {
			match (state.wallet_index(transfer.from), state.wallet_index(transfer.to)) {
				(Some(from), Some(to)) => state.routes.push(Route { transfer, from, to }),
				_ => warn!("Skipping transfer {} -> {}: unknown wallet", transfer.from, transfer.to),
			}
		}
		state
	}

	pub fn set_mode(&mut self, mode: LayoutMode) {
		if self.mode == mode {
			return;
		}
		info!("Network layout: {mode:?}");
		self.mode = mode;
		match mode {
			LayoutMode::Grid => {
				self.graph = None;
				for (i, w) in self.wallets.iter().enumerate() {
					self.positions[i] = self.config.grid_position(w.layer, w.institution);
				}
			}
			LayoutMode::Force => self.graph = Some(self.build_graph()),
		}
	}

	fn build_graph(&self) -> ForceGraph<WalletNode, ()> {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 4000.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let nodes: Vec<DefaultNodeIdx> = self
			.positions
			.iter()
			.enumerate()
			.map(|(wallet, &(x, y))| {
				graph.add_node(NodeData {
					x: x as f32,
					y: y as f32,
					mass: 10.0,
					is_anchor: false,
					user_data: WalletNode { wallet },
				})
			})
			.collect();
		for route in &self.routes {
			graph.add_edge(nodes[route.from], nodes[route.to], EdgeData::default());
		}
		graph
	}

	pub fn wallet_index(&self, id: &str) -> Option<usize> {
		self.wallets.iter().position(|w| w.id == id)
	}

	pub fn wallet_at(&self, x: f64, y: f64) -> Option<usize> {
		let r = self.config.node_radius;
		self.positions
			.iter()
			.position(|&(wx, wy)| (wx - x).hypot(wy - y) <= r)
	}

	/// Flip a wallet's selection; returns whether it is now selected.
	pub fn toggle_selected(&mut self, idx: usize) -> bool {
		let now_selected = if self.selected.remove(&idx) {
			false
		} else {
			self.selected.insert(idx);
			true
		};
		if let Some(w) = self.wallets.get(idx) {
			info!(
				"Clicked wallet {} ({} on {}, balance {}), selected: {now_selected}",
				w.id,
				w.institution().name,
				w.layer().name,
				w.balance
			);
		}
		now_selected
	}

	pub fn set_hover(&mut self, wallet: Option<usize>) {
		if self.hover.wallet == wallet {
			return;
		}
		self.hover.wallet = wallet;
		self.hover.neighbors.clear();
		if let Some(idx) = wallet {
			for route in &self.routes {
				if route.from == idx {
					self.hover.neighbors.insert(route.to);
				} else if route.to == idx {
					self.hover.neighbors.insert(route.from);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: usize) -> bool {
		self.hover.wallet == Some(idx) || self.hover.neighbors.contains(&idx)
	}

	/// A route is active while a token is moving along it.
	pub fn route_active(&self, route: usize) -> bool {
		self.tokens.iter().any(|t| t.route == route)
	}

	/// Linear position of a token at the current time.
	pub fn token_position(&self, token: &Token) -> (f64, f64) {
		let route = &self.routes[token.route];
		let (from, to) = (self.positions[route.from], self.positions[route.to]);
		let t = ((self.now_ms - token.started_ms) / self.config.transfer_ms).clamp(0.0, 1.0);
		(from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t)
	}

	pub fn total_balance(&self) -> i64 {
		self.wallets.iter().map(|w| w.balance).sum()
	}

	/// Advance to `now_ms`: step the simulation, launch due transfers and
	/// settle arrived tokens.
	pub fn tick(&mut self, now_ms: f64) {
		let dt = self.last_tick_ms.map_or(0.0, |last| (now_ms - last).max(0.0));
		self.last_tick_ms = Some(now_ms);
		self.now_ms = now_ms;

		if dt > 0.0 {
			self.step_layout((dt / 1000.0).min(0.05) as f32);
		}
		self.launch_due(now_ms);
		self.settle_arrived(now_ms);
	}

	fn step_layout(&mut self, dt: f32) {
		let Some(graph) = self.graph.as_mut() else {
			return;
		};
		graph.update(dt);

		// Keep the cloud centred on the canvas.
		let (mut sx, mut sy, mut n) = (0.0_f32, 0.0_f32, 0.0_f32);
		graph.visit_nodes(|node| {
			sx += node.x();
			sy += node.y();
			n += 1.0;
		});
		if n == 0.0 {
			return;
		}
		let (dx, dy) = (
			self.config.width as f32 / 2.0 - sx / n,
			self.config.height as f32 / 2.0 - sy / n,
		);
		let positions = &mut self.positions;
		graph.visit_nodes_mut(|node| {
			node.data.x += dx;
			node.data.y += dy;
			positions[node.data.user_data.wallet] = (node.data.x as f64, node.data.y as f64);
		});
	}

	fn launch_due(&mut self, now_ms: f64) {
		if self.routes.is_empty() {
			return;
		}
		let stagger = self.config.transfer_ms / 2.0;
		while self.schedule.next_launch_ms <= now_ms {
			let route = self.schedule.next_route;
			debug!("Launching {}", self.routes[route].transfer.token);
			self.tokens.push(Token {
				route,
				started_ms: self.schedule.next_launch_ms,
			});
			self.schedule.next_route += 1;
			self.schedule.next_launch_ms += stagger;
			if self.schedule.next_route == self.routes.len() {
				self.schedule.next_route = 0;
				self.schedule.next_launch_ms += self.config.transfer_ms;
			}
		}
	}

	fn settle_arrived(&mut self, now_ms: f64) {
		let duration = self.config.transfer_ms;
		let (arrived, flying): (Vec<Token>, Vec<Token>) = self
			.tokens
			.drain(..)
			.partition(|t| now_ms - t.started_ms >= duration);
		self.tokens = flying;
		for token in arrived {
			let route = self.routes[token.route];
			self.wallets[route.from].balance -= route.transfer.amount;
			self.wallets[route.to].balance += route.transfer.amount;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn state() -> NetworkState {
		NetworkState::new(NetworkConfig::default())
	}

	#[test]
	fn sixteen_wallets_on_grid() {
		let s = state();
		assert_eq!(s.wallets.len(), 16);
		assert_eq!(s.routes.len(), 5);
		assert_eq!(s.wallets[0].id, "rtgs_bank_a");
		assert_eq!(s.wallets[15].id, "mobile_bank_d");
		assert_eq!(s.positions[0], (120.0, 80.0));
		assert_eq!(s.positions[s.wallet_index("cards_bank_c").unwrap()], (480.0, 200.0));
		for w in &s.wallets {
			assert!((100..1100).contains(&w.balance), "{} {}", w.id, w.balance);
		}
	}

	#[test]
	fn launches_are_staggered_and_loop() {
		let mut s = state();
		s.tick(999.0);
		assert!(s.tokens.is_empty());
		s.tick(1000.0);
		assert_eq!(s.tokens.len(), 1);
		s.tick(2500.0);
		assert_eq!(s.tokens.iter().map(|t| t.route).collect::<Vec<_>>(), vec![0, 1]);
		s.tick(5000.0);
		// Routes 0-2 have landed by now.
		assert_eq!(s.tokens.iter().map(|t| t.route).collect::<Vec<_>>(), vec![3, 4]);
		s.tick(7999.0);
		assert!(s.tokens.is_empty());
		s.tick(8000.0);
		assert_eq!(s.tokens, vec![Token { route: 0, started_ms: 8000.0 }]);
	}

	#[test]
	fn arrival_moves_balance_and_conserves_total() {
		let mut s = state();
		let total = s.total_balance();
		let (a, b) = (s.wallet_index("rtgs_bank_a").unwrap(), s.wallet_index("rtgs_bank_b").unwrap());
		let (before_a, before_b) = (s.wallets[a].balance, s.wallets[b].balance);
		s.tick(1000.0);
		s.tick(2000.0);
		assert!(s.route_active(0));
		assert_eq!(s.token_position(&s.tokens[0]), (210.0, 80.0));
		s.tick(3000.0);
		assert!(!s.route_active(0));
		assert_eq!(s.wallets[a].balance, before_a - 100);
		assert_eq!(s.wallets[b].balance, before_b + 100);
		for t in (3000..30000).step_by(250) {
			s.tick(t as f64);
			assert_eq!(s.total_balance(), total);
		}
	}

	#[test]
	fn selection_toggles() {
		let mut s = state();
		let hit = s.wallet_at(125.0, 85.0).unwrap();
		assert_eq!(hit, 0);
		assert!(s.toggle_selected(hit));
		assert!(!s.toggle_selected(hit));
		assert!(s.selected.is_empty());
		assert_eq!(s.wallet_at(10.0, 10.0), None);
	}

	#[test]
	fn hover_includes_transfer_neighbours() {
		let mut s = state();
		let b = s.wallet_index("rtgs_bank_b").unwrap();
		s.set_hover(Some(b));
		assert!(s.is_highlighted(s.wallet_index("rtgs_bank_a").unwrap()));
		assert!(s.is_highlighted(s.wallet_index("cards_bank_b").unwrap()));
		assert!(!s.is_highlighted(s.wallet_index("crypto_bank_a").unwrap()));
		s.set_hover(None);
		assert!(s.hover.neighbors.is_empty());
	}

	#[test]
	fn force_mode_stays_centred() {
		let mut s = state();
		s.set_mode(LayoutMode::Force);
		for t in 0..60 {
			s.tick(t as f64 * 16.0);
		}
		let n = s.positions.len() as f64;
		let cx = s.positions.iter().map(|p| p.0).sum::<f64>() / n;
		assert!(s.positions.iter().all(|p| p.0.is_finite() && p.1.is_finite()));
		assert!((cx - 600.0).abs() < 1.0);
		s.set_mode(LayoutMode::Grid);
		assert_eq!(s.positions[0], (120.0, 80.0));
	}
}
