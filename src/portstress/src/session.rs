use crate::config::Config;
use crate::connect;
use crate::error::{Error, Result};
use crate::port_bank::PortBank;
use crate::process::{CopyProcess, Notifications, Stats};
use crate::stop::{self, Stop, StopSignal};

pub fn exit_code(result: &Result<Stop>) -> i32 {
	match result {
		Ok(Stop::Elapsed) | Ok(Stop::Interrupted) => 0,
		Ok(Stop::ServerShutdown) => 1,
		Err(_) => 1,
	}
}

fn open(config: &Config) -> Result<jack::Client> {
	let (client, status) =
		jack::Client::new(&config.client_name, config.client_options())
			.map_err(|e| {
				if let jack::Error::ClientError(status) = &e {
					if status.contains(jack::ClientStatus::SERVER_FAILED) {
						log::error!("Unable to connect to JACK server");
					}
				}
				Error::Open(e)
			})?;
	if status.contains(jack::ClientStatus::SERVER_STARTED) {
		log::info!("JACK server started");
	}
	if status.contains(jack::ClientStatus::NAME_NOT_UNIQUE) {
		log::warn!("unique name `{}' assigned", client.name());
	}
	Ok(client)
}

/// Open, register, activate, wait, close. Returns why the wait ended.
/// After a server shutdown nothing is torn down, the caller should exit.
pub fn run(config: &Config) -> Result<Stop> {
	let client = open(config)?;
	let client_name = client.name().to_string();
	println!("engine sample rate: {}", client.sample_rate());

	let bank = PortBank::register(&client, config.port_count)?;
	let input_names = bank.input_names().to_vec();
	let output_names = bank.output_names().to_vec();
	let pairs = bank.len();

	let stats = Stats::default();
	let signal = StopSignal::new();
	let active = client
		.activate_async(
			Notifications::new(signal.handle(), stats.clone()),
			CopyProcess::new(bank, stats.clone()),
		)
		.map_err(Error::Activate)?;
	log::info!("{} active with {} port pairs", client_name, pairs);

	if config.connect_physical {
		connect::connect_physical(
			active.as_client(),
			&client_name,
			&input_names,
			&output_names,
		);
	}
	if let Err(e) = stop::watch_signals(signal.handle()) {
		log::warn!("cannot watch signals: {}", e);
	}
	if config.stop_on_stdin {
		if let Err(e) = stop::watch_stdin(signal.handle()) {
			log::warn!("cannot watch stdin: {}", e);
		}
	}

	let reason = signal.wait(config.duration);
	if reason == Stop::ServerShutdown {
		log::error!("server shut down the client");
		// the server already released the client and its ports
		std::mem::forget(active);
		return Ok(reason);
	}

	println!("Starting close");
	let (client, _, _) = active.deactivate().map_err(Error::Deactivate)?;
	drop(client);
	log::info!(
		"stopped ({:?}) after {} cycles, {} xruns",
		reason,
		stats.cycles(),
		stats.xruns()
	);
	Ok(reason)
}
