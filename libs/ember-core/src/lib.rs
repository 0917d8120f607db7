mod op;
mod reg;
mod size;

pub use op::*;
pub use reg::*;
pub use size::*;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::filter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static START: Once = Once::new();
pub fn init() {
	START.call_once(|| {
		let filter = filter::Targets::new()
			.with_default(Level::DEBUG)
			.with_target("ember_codegen_x86", Level::TRACE);
		let layered = tracing_subscriber::registry()
			.with(tracing_subscriber::fmt::layer())
			.with(filter);

		tracing::subscriber::set_global_default(layered).unwrap();
	});
}
