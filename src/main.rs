use leptos::prelude::*;
use rama_client::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App);
}
