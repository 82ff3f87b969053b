use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::port_bank::PortBank;
use crate::stop::{Stop, StopHandle};

pub type JackBank = PortBank<jack::Port<jack::AudioIn>, jack::Port<jack::AudioOut>>;

/// Counters shared between the realtime thread and main.
#[derive(Clone, Debug, Default)]
pub struct Stats {
	cycles: Arc<AtomicU64>,
	xruns: Arc<AtomicU64>,
}

impl Stats {
	pub fn cycles(&self) -> u64 {
		self.cycles.load(Ordering::Relaxed)
	}

	pub fn xruns(&self) -> u64 {
		self.xruns.load(Ordering::Relaxed)
	}

	fn add_cycle(&self) {
		self.cycles.fetch_add(1, Ordering::Relaxed);
	}

	fn add_xrun(&self) {
		self.xruns.fetch_add(1, Ordering::Relaxed);
	}
}

// no allocation, no panic on a length mismatch
#[inline]
pub fn copy_frames(src: &[f32], dst: &mut [f32]) {
	for (s, d) in src.iter().zip(dst.iter_mut()) {
		*d = *s;
	}
}

pub struct CopyProcess {
	bank: JackBank,
	stats: Stats,
}

impl CopyProcess {
	pub fn new(bank: JackBank, stats: Stats) -> Self {
		Self { bank, stats }
	}
}

impl jack::ProcessHandler for CopyProcess {
	fn process(&mut self, _: &jack::Client, ps: &jack::ProcessScope) -> jack::Control {
		for (input, output) in self.bank.pairs_mut() {
			copy_frames(input.as_slice(ps), output.as_mut_slice(ps));
		}
		self.stats.add_cycle();
		jack::Control::Continue
	}
}

pub struct Notifications {
	stop: StopHandle,
	stats: Stats,
}

impl Notifications {
	pub fn new(stop: StopHandle, stats: Stats) -> Self {
		Self { stop, stats }
	}

	fn on_shutdown(&mut self) {
		self.stop.raise(Stop::ServerShutdown);
	}

	fn on_xrun(&mut self) -> jack::Control {
		self.stats.add_xrun();
		jack::Control::Continue
	}
}

impl jack::NotificationHandler for Notifications {
	// runs on a jack thread, only a non blocking send here
	unsafe fn shutdown(&mut self, _status: jack::ClientStatus, _reason: &str) {
		self.on_shutdown();
	}

	fn xrun(&mut self, _: &jack::Client) -> jack::Control {
		self.on_xrun()
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::stop::StopSignal;
	use jack::NotificationHandler;
	use std::time::{Duration, Instant};

	#[test]
	fn test_copy_exact() {
		let src: Vec<f32> = (0..256).map(|i| (i as f32 * 0.37).sin()).collect();
		let mut dst = vec![0.0; 256];
		copy_frames(&src, &mut dst);
		for (s, d) in src.iter().zip(dst.iter()) {
			assert_eq!(s.to_bits(), d.to_bits());
		}
	}

	#[test]
	fn test_copy_many_pairs() {
		let inputs: Vec<Vec<f32>> = (0..64)
			.map(|p| (0..128).map(|f| (p * 1000 + f) as f32).collect())
			.collect();
		let mut outputs = vec![vec![-1.0f32; 128]; 64];
		for (input, output) in inputs.iter().zip(outputs.iter_mut()) {
			copy_frames(input, output);
		}
		assert_eq!(inputs, outputs);
	}

	#[test]
	fn test_copy_short_output() {
		let src = [1.0, 2.0, 3.0];
		let mut dst = [0.0; 2];
		copy_frames(&src, &mut dst);
		assert_eq!(dst, [1.0, 2.0]);
	}

	#[test]
	fn test_stats_shared() {
		let stats = Stats::default();
		let other = stats.clone();
		other.add_cycle();
		other.add_cycle();
		other.add_xrun();
		assert_eq!(stats.cycles(), 2);
		assert_eq!(stats.xruns(), 1);
	}

	#[test]
	fn test_shutdown_stops_wait() {
		let signal = StopSignal::new();
		let mut n = Notifications::new(signal.handle(), Stats::default());
		unsafe { n.shutdown(jack::ClientStatus::empty(), "") };
		let start = Instant::now();
		assert_eq!(signal.wait(Some(Duration::from_secs(60))), Stop::ServerShutdown);
		assert!(start.elapsed() < Duration::from_secs(10));
	}

	#[test]
	fn test_shutdown_beats_later_interrupt() {
		let signal = StopSignal::new();
		let mut n = Notifications::new(signal.handle(), Stats::default());
		unsafe { n.shutdown(jack::ClientStatus::SERVER_ERROR, "server gone") };
		signal.handle().raise(Stop::Interrupted);
		assert_eq!(signal.wait(None), Stop::ServerShutdown);
	}

	#[test]
	fn test_xrun_counted() {
		let signal = StopSignal::new();
		let stats = Stats::default();
		let mut n = Notifications::new(signal.handle(), stats.clone());
		assert_eq!(n.on_xrun(), jack::Control::Continue);
		assert_eq!(n.on_xrun(), jack::Control::Continue);
		assert_eq!(stats.xruns(), 2);
		assert_eq!(stats.cycles(), 0);
		assert_eq!(signal.wait(Some(Duration::ZERO)), Stop::Elapsed);
	}
}
