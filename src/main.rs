use leptos::prelude::*;
use payments_topology::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App);
}
