use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_CLIENT_NAME: &str = "jack_large_number_ports";
pub const DEFAULT_PORT_COUNT: usize = 1024;
pub const DEFAULT_DURATION_SECS: f32 = 60.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
	pub client_name: String,
	pub port_count: usize,
	// None means run until stopped
	pub duration: Option<Duration>,
	pub connect_physical: bool,
	pub stop_on_stdin: bool,
	pub start_server: bool,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			client_name: DEFAULT_CLIENT_NAME.to_string(),
			port_count: DEFAULT_PORT_COUNT,
			duration: Some(Duration::from_secs_f32(DEFAULT_DURATION_SECS)),
			connect_physical: false,
			stop_on_stdin: false,
			start_server: false,
		}
	}
}

impl Config {
	pub fn from_args() -> Result<Self> {
		let args = aarg::parse().map_err(|e| Error::Args(format!("{:?}", e)))?;
		Self::from_lookup(|key| args.get(key).cloned())
	}

	/// Build a config from an option lookup, `key` includes the leading `--`.
	/// Flags only need to be present, valued options use their first value.
	pub fn from_lookup<F>(get: F) -> Result<Self>
	where
		F: Fn(&str) -> Option<Vec<String>>,
	{
		let mut config = Self::default();
		let first = |key: &'static str| -> Result<Option<String>> {
			match get(key) {
				None => Ok(None),
				Some(values) => match values.into_iter().next() {
					Some(v) => Ok(Some(v)),
					None => Err(Error::Config {
						option: key,
						value: String::new(),
					}),
				},
			}
		};

		if let Some(name) = first("--name")? {
			if name.is_empty() {
				return Err(Error::Config { option: "--name", value: name });
			}
			config.client_name = name;
		}
		if let Some(value) = first("--ports")? {
			config.port_count = match value.parse::<usize>() {
				Ok(n) if n > 0 => n,
				_ => return Err(Error::Config { option: "--ports", value }),
			};
		}
		if let Some(value) = first("--duration")? {
			config.duration = parse_duration(&value)
				.ok_or(Error::Config { option: "--duration", value })?;
		}
		config.connect_physical = get("--connect").is_some();
		config.stop_on_stdin = get("--stdin").is_some();
		config.start_server = get("--start-server").is_some();
		Ok(config)
	}

	pub fn client_options(&self) -> jack::ClientOptions {
		if self.start_server {
			jack::ClientOptions::empty()
		} else {
			jack::ClientOptions::NO_START_SERVER
		}
	}
}

// seconds as f32, "inf" disables the bound
fn parse_duration(value: &str) -> Option<Option<Duration>> {
	let secs = value.parse::<f32>().ok()?;
	if secs.is_nan() || secs < 0.0 {
		None
	} else if secs.is_infinite() {
		Some(None)
	} else {
		Duration::try_from_secs_f32(secs).ok().map(Some)
	}
}
