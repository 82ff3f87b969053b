use midk_portstress::{error, session, Config};

fn main() {
	env_logger::Builder::from_env(
		env_logger::Env::default().default_filter_or("info"),
	)
	.init();

	let result = Config::from_args().and_then(|config| session::run(&config));
	if let Err(e) = &result {
		log::error!("{}", error::report(e));
	}
	std::process::exit(session::exit_code(&result));
}
