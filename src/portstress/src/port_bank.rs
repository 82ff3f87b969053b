use std::fmt;

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
	Input,
	Output,
}

impl Direction {
	pub fn port_name(self, index: usize) -> String {
		match self {
			Direction::Input => format!("input-{}", index),
			Direction::Output => format!("output-{}", index),
		}
	}
}

impl fmt::Display for Direction {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Direction::Input => write!(f, "input"),
			Direction::Output => write!(f, "output"),
		}
	}
}

/// Something ports can be registered on, the jack client in practice.
pub trait PortHost {
	type Input;
	type Output;

	fn register_input(&self, name: &str) -> std::result::Result<Self::Input, jack::Error>;
	fn register_output(&self, name: &str) -> std::result::Result<Self::Output, jack::Error>;
}

impl PortHost for jack::Client {
	type Input = jack::Port<jack::AudioIn>;
	type Output = jack::Port<jack::AudioOut>;

	fn register_input(&self, name: &str) -> std::result::Result<Self::Input, jack::Error> {
		self.register_port(name, jack::AudioIn::default())
	}

	fn register_output(&self, name: &str) -> std::result::Result<Self::Output, jack::Error> {
		self.register_port(name, jack::AudioOut::default())
	}
}

/// Index aligned input and output ports, `inputs[i]` feeds `outputs[i]`.
pub struct PortBank<I, O> {
	inputs: Vec<I>,
	outputs: Vec<O>,
	input_names: Vec<String>,
	output_names: Vec<String>,
}

impl<I, O> PortBank<I, O> {
	/// Registers `count` inputs, then `count` outputs. Stops at the first
	/// failure, ports registered so far are left to the client.
	pub fn register<H>(host: &H, count: usize) -> Result<Self>
	where
		H: PortHost<Input = I, Output = O>,
	{
		let mut bank = Self {
			inputs: Vec::with_capacity(count),
			outputs: Vec::with_capacity(count),
			input_names: Vec::with_capacity(count),
			output_names: Vec::with_capacity(count),
		};
		for index in 0..count {
			let name = Direction::Input.port_name(index);
			let port = host.register_input(&name).map_err(|source| {
				Error::Register { direction: Direction::Input, index, source }
			})?;
			bank.inputs.push(port);
			bank.input_names.push(name);
		}
		for index in 0..count {
			let name = Direction::Output.port_name(index);
			let port = host.register_output(&name).map_err(|source| {
				Error::Register { direction: Direction::Output, index, source }
			})?;
			bank.outputs.push(port);
			bank.output_names.push(name);
		}
		log::info!("registered {} input and {} output ports", count, count);
		Ok(bank)
	}

	pub fn len(&self) -> usize {
		self.inputs.len()
	}

	pub fn input_names(&self) -> &[String] {
		&self.input_names
	}

	pub fn output_names(&self) -> &[String] {
		&self.output_names
	}

	pub fn pairs_mut(&mut self) -> impl Iterator<Item = (&I, &mut O)> {
		self.inputs.iter().zip(self.outputs.iter_mut())
	}
}
