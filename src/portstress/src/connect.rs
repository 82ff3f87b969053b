/// The parts of the client the connect step needs.
pub trait PortQuery {
	fn physical_ports(&self, flags: jack::PortFlags) -> Vec<String>;
	fn connect(&self, source: &str, destination: &str) -> Result<(), jack::Error>;
}

impl PortQuery for jack::Client {
	fn physical_ports(&self, flags: jack::PortFlags) -> Vec<String> {
		self.ports(None, None, jack::PortFlags::IS_PHYSICAL | flags)
	}

	fn connect(&self, source: &str, destination: &str) -> Result<(), jack::Error> {
		self.connect_ports_by_name(source, destination)
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConnectSummary {
	pub connected: usize,
	pub failed: usize,
}

fn connect_pair<Q: PortQuery>(
	query: &Q,
	source: &str,
	destination: &str,
	summary: &mut ConnectSummary,
) {
	match query.connect(source, destination) {
		Ok(()) => {
			log::debug!("Ok {} -> {}", source, destination);
			summary.connected += 1;
		}
		Err(jack::Error::PortAlreadyConnected(a, b)) => {
			log::debug!("Exist {} -> {}", a, b);
			summary.connected += 1;
		}
		Err(e) => {
			log::warn!("cannot connect {} -> {}: {}", source, destination, e);
			summary.failed += 1;
		}
	}
}

/// Capture ports feed `input-i`, `output-i` feeds playback ports, paired by
/// position up to the shorter list. Failures are logged and counted only.
pub fn connect_physical<Q: PortQuery>(
	query: &Q,
	client_name: &str,
	input_names: &[String],
	output_names: &[String],
) -> ConnectSummary {
	let mut summary = ConnectSummary::default();

	let capture = query.physical_ports(jack::PortFlags::IS_OUTPUT);
	if capture.is_empty() {
		log::warn!("no physical capture ports");
	}
	for (source, input) in capture.iter().zip(input_names.iter()) {
		let destination = format!("{}:{}", client_name, input);
		connect_pair(query, source, &destination, &mut summary);
	}

	let playback = query.physical_ports(jack::PortFlags::IS_INPUT);
	if playback.is_empty() {
		log::warn!("no physical playback ports");
	}
	for (output, destination) in output_names.iter().zip(playback.iter()) {
		let source = format!("{}:{}", client_name, output);
		connect_pair(query, &source, destination, &mut summary);
	}

	log::info!(
		"physical connections: {} made, {} failed",
		summary.connected,
		summary.failed
	);
	summary
}

#[cfg(test)]
mod test {
	use super::*;
	use std::cell::RefCell;

	struct FakeGraph {
		capture: Vec<String>,
		playback: Vec<String>,
		refuse: Option<String>,
		made: RefCell<Vec<(String, String)>>,
	}

	impl FakeGraph {
		fn new(capture: usize, playback: usize) -> Self {
			Self {
				capture: (1..=capture).map(|i| format!("system:capture_{}", i)).collect(),
				playback: (1..=playback).map(|i| format!("system:playback_{}", i)).collect(),
				refuse: None,
				made: RefCell::new(Vec::new()),
			}
		}
	}

	impl PortQuery for FakeGraph {
		fn physical_ports(&self, flags: jack::PortFlags) -> Vec<String> {
			if flags.contains(jack::PortFlags::IS_OUTPUT) {
				self.capture.clone()
			} else {
				self.playback.clone()
			}
		}

		fn connect(&self, source: &str, destination: &str) -> Result<(), jack::Error> {
			if self.refuse.as_deref() == Some(source) {
				return Err(jack::Error::PortConnectionError(
					source.to_string(),
					destination.to_string(),
				));
			}
			self.made.borrow_mut().push((source.to_string(), destination.to_string()));
			Ok(())
		}
	}

	fn names(prefix: &str, n: usize) -> Vec<String> {
		(0..n).map(|i| format!("{}-{}", prefix, i)).collect()
	}

	#[test]
	fn test_pairs_up_to_shorter_list() {
		let graph = FakeGraph::new(2, 2);
		let summary = connect_physical(&graph, "stress", &names("input", 8), &names("output", 8));
		assert_eq!(summary, ConnectSummary { connected: 4, failed: 0 });
		let made = graph.made.borrow();
		assert_eq!(made[0], ("system:capture_1".to_string(), "stress:input-0".to_string()));
		assert_eq!(made[1], ("system:capture_2".to_string(), "stress:input-1".to_string()));
		assert_eq!(made[2], ("stress:output-0".to_string(), "system:playback_1".to_string()));
		assert_eq!(made[3], ("stress:output-1".to_string(), "system:playback_2".to_string()));
	}

	#[test]
	fn test_failure_is_not_fatal() {
		let mut graph = FakeGraph::new(3, 1);
		graph.refuse = Some("system:capture_2".to_string());
		let summary = connect_physical(&graph, "stress", &names("input", 3), &names("output", 3));
		assert_eq!(summary, ConnectSummary { connected: 3, failed: 1 });
	}

	#[test]
	fn test_no_physical_ports() {
		let graph = FakeGraph::new(0, 0);
		let summary = connect_physical(&graph, "stress", &names("input", 4), &names("output", 4));
		assert_eq!(summary, ConnectSummary::default());
		assert!(graph.made.borrow().is_empty());
	}
}
