/// A payment rail; one row of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaymentLayer {
	pub id: &'static str,
	pub name: &'static str,
	pub color: &'static str,
}

/// A participant holding one wallet on every layer; one column of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Institution {
	pub id: &'static str,
	pub name: &'static str,
}

pub const LAYERS: [PaymentLayer; 4] = [
	PaymentLayer {
		id: "rtgs",
		name: "RTGS",
		color: "#3498db",
	},
	PaymentLayer {
		id: "cards",
		name: "Card Network",
		color: "#9b59b6",
	},
	PaymentLayer {
		id: "crypto",
		name: "Blockchain",
		color: "#f39c12",
	},
	PaymentLayer {
		id: "mobile",
		name: "Mobile Money",
		color: "#2ecc71",
	},
];

pub const INSTITUTIONS: [Institution; 4] = [
	Institution {
		id: "bank_a",
		name: "Bank A",
	},
	Institution {
		id: "bank_b",
		name: "Bank B",
	},
	Institution {
		id: "bank_c",
		name: "Bank C",
	},
	Institution {
		id: "bank_d",
		name: "Bank D",
	},
];

#[derive(Clone, Debug, PartialEq)]
pub struct Wallet {
	/// `{layer}_{institution}`.
	pub id: String,
	pub layer: usize,
	pub institution: usize,
	pub balance: i64,
}

impl Wallet {
	pub fn layer(&self) -> &'static PaymentLayer {
		&LAYERS[self.layer]
	}

	pub fn institution(&self) -> &'static Institution {
		&INSTITUTIONS[self.institution]
	}
}

/// A recurring payment between two wallets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transfer {
	pub from: &'static str,
	pub to: &'static str,
	pub amount: i64,
	/// Glyph drawn for the token in flight.
	pub token: &'static str,
}

pub const TRANSFERS: [Transfer; 5] = [
	Transfer {
		from: "rtgs_bank_a",
		to: "rtgs_bank_b",
		amount: 100,
		token: "💰",
	},
	Transfer {
		from: "cards_bank_b",
		to: "cards_bank_c",
		amount: 50,
		token: "💳",
	},
	Transfer {
		from: "crypto_bank_a",
		to: "crypto_bank_d",
		amount: 75,
		token: "₿",
	},
	Transfer {
		from: "mobile_bank_c",
		to: "mobile_bank_a",
		amount: 30,
		token: "📱",
	},
	// Cross-layer
	Transfer {
		from: "rtgs_bank_b",
		to: "cards_bank_b",
		amount: 200,
		token: "💵",
	},
];

/// Canvas geometry and timing of the demo.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkConfig {
	pub width: f64,
	pub height: f64,
	pub margin_top: f64,
	pub margin_left: f64,
	pub node_radius: f64,
	pub spacing_x: f64,
	pub spacing_y: f64,
	pub token_size: f64,
	/// Flight time of one token.
	pub transfer_ms: f64,
	/// Delay before the first transfer.
	pub start_delay_ms: f64,
}

impl Default for NetworkConfig {
	fn default() -> Self {
		Self {
			width: 1200.0,
			height: 800.0,
			margin_top: 80.0,
			margin_left: 120.0,
			node_radius: 25.0,
			spacing_x: 180.0,
			spacing_y: 120.0,
			token_size: 20.0,
			transfer_ms: 2000.0,
			start_delay_ms: 1000.0,
		}
	}
}

impl NetworkConfig {
	/// Grid position of a wallet cell.
	pub fn grid_position(&self, layer: usize, institution: usize) -> (f64, f64) {
		(
			self.margin_left + institution as f64 * self.spacing_x,
			self.margin_top + layer as f64 * self.spacing_y,
		)
	}
}

/// How wallet positions are computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutMode {
	#[default]
	Grid,
	/// Transfers as springs in a `force_graph` simulation.
	Force,
}
