use std::future::Future;
use std::sync::mpsc::{sync_channel, Receiver, RecvTimeoutError, SyncSender};
use std::thread::JoinHandle;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stop {
	/// The run limit passed without anything else happening.
	Elapsed,
	/// Operator asked to stop.
	Interrupted,
	/// The server shut the client down.
	ServerShutdown,
}

/// Raising side, cheap to clone and never blocks.
#[derive(Clone)]
pub struct StopHandle {
	tx: SyncSender<Stop>,
}

impl StopHandle {
	pub fn raise(&self, reason: Stop) {
		// the first reason fills the slot, later ones are dropped
		let _ = self.tx.try_send(reason);
	}
}

pub struct StopSignal {
	rx: Receiver<Stop>,
	// keeps the channel connected while no handle is out
	handle: StopHandle,
}

impl Default for StopSignal {
	fn default() -> Self {
		Self::new()
	}
}

impl StopSignal {
	pub fn new() -> Self {
		let (tx, rx) = sync_channel(1);
		Self { rx, handle: StopHandle { tx } }
	}

	pub fn handle(&self) -> StopHandle {
		self.handle.clone()
	}

	/// Block until a reason is raised or `limit` passes, `None` waits forever.
	pub fn wait(&self, limit: Option<Duration>) -> Stop {
		match limit {
			Some(limit) => match self.rx.recv_timeout(limit) {
				Ok(reason) => reason,
				Err(RecvTimeoutError::Timeout) => Stop::Elapsed,
				// unreachable, self.handle holds a sender
				Err(RecvTimeoutError::Disconnected) => Stop::Elapsed,
			},
			None => self.rx.recv().unwrap_or(Stop::Elapsed),
		}
	}
}

/// Raise `Interrupted` once a line or EOF arrives on stdin.
pub fn watch_stdin(handle: StopHandle) -> std::io::Result<JoinHandle<()>> {
	std::thread::Builder::new()
		.name("stdin-watch".to_string())
		.spawn(move || {
			let mut line = String::new();
			if let Err(e) = std::io::stdin().read_line(&mut line) {
				log::warn!("stdin: {}", e);
			}
			log::info!("stop requested on stdin");
			handle.raise(Stop::Interrupted);
		})
}

fn spawn_forwarder<F>(
	runtime: tokio::runtime::Runtime,
	handle: StopHandle,
	received: F,
) -> std::io::Result<JoinHandle<()>>
where
	F: Future<Output = &'static str> + Send + 'static,
{
	std::thread::Builder::new()
		.name("signal-watch".to_string())
		.spawn(move || {
			let name = runtime.block_on(received);
			log::info!("{} received, stopping", name);
			handle.raise(Stop::Interrupted);
		})
}

/// Raise `Interrupted` on SIGINT or SIGTERM. The handlers are installed
/// before this returns.
#[cfg(unix)]
pub fn watch_signals(handle: StopHandle) -> std::io::Result<JoinHandle<()>> {
	use tokio::signal::unix::{signal, SignalKind};

	let runtime = tokio::runtime::Builder::new_current_thread()
		.enable_io()
		.build()?;
	let (mut interrupt, mut terminate) = {
		let _guard = runtime.enter();
		(signal(SignalKind::interrupt())?, signal(SignalKind::terminate())?)
	};
	spawn_forwarder(runtime, handle, async move {
		tokio::select! {
			_ = interrupt.recv() => "SIGINT",
			_ = terminate.recv() => "SIGTERM",
		}
	})
}

#[cfg(not(unix))]
pub fn watch_signals(handle: StopHandle) -> std::io::Result<JoinHandle<()>> {
	let runtime = tokio::runtime::Builder::new_current_thread()
		.enable_io()
		.build()?;
	spawn_forwarder(runtime, handle, async {
		if tokio::signal::ctrl_c().await.is_err() {
			std::future::pending::<()>().await;
		}
		"ctrl-c"
	})
}
