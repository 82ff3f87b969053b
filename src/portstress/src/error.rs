use crate::port_bank::Direction;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("bad arguments: {0}")]
	Args(String),

	#[error("invalid value for {option}: {value:?}")]
	Config { option: &'static str, value: String },

	#[error("jack_client_open() failed")]
	Open(#[source] jack::Error),

	#[error("Failed to register {direction} port {index}")]
	Register {
		direction: Direction,
		index: usize,
		#[source]
		source: jack::Error,
	},

	#[error("cannot activate client")]
	Activate(#[source] jack::Error),

	#[error("cannot deactivate client")]
	Deactivate(#[source] jack::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// The error followed by its sources, `: ` separated.
pub fn report(e: &dyn std::error::Error) -> String {
	let mut out = e.to_string();
	let mut source = e.source();
	while let Some(s) = source {
		out.push_str(": ");
		out.push_str(&s.to_string());
		source = s.source();
	}
	out
}
