/*!
# Disc ID: CLI
*/

use argyle::Argument;
use discid_core::{
	DiscIdError,
	Feature,
};



#[derive(Debug)]
/// # Parsed Options.
pub(super) struct Parsed {
	/// # What To Do.
	pub(super) action: Action,

	/// # JSON Output?
	pub(super) json: bool,

	/// # Debug Logging?
	pub(super) verbose: bool,
}



#[derive(Debug)]
/// # Action.
pub(super) enum Action {
	/// # Print the Default Device.
	DefaultDevice,

	/// # Print the Supported Features.
	Features,

	/// # Read a Drive.
	Read(Option<String>, Vec<Feature>),

	/// # Use a TOC String.
	Toc(String),
}



/// # Parse Options.
pub(super) fn parse() -> Result<Parsed, DiscIdError> {
	let args = argyle::args()
		.with_keywords(include!(concat!(env!("OUT_DIR"), "/argyle.rs")));

	let mut default_device = false;
	let mut features = vec![Feature::Read];
	let mut list_features = false;
	let mut json = false;
	let mut verbose = false;
	let mut dev: Option<String> = None;
	let mut toc: Option<String> = None;
	for arg in args {
		match arg {
			Argument::Key("--default-device") => { default_device = true; },
			Argument::Key("--features") => { list_features = true; },
			Argument::Key("-h" | "--help") => return Err(DiscIdError::PrintHelp),
			Argument::Key("--isrc") => { features.push(Feature::Isrc); },
			Argument::Key("--json") => { json = true; },
			Argument::Key("--mcn") => { features.push(Feature::Mcn); },
			Argument::Key("-v" | "--verbose") => { verbose = true; },
			Argument::Key("-V" | "--version") => return Err(DiscIdError::PrintVersion),

			Argument::KeyWithValue("-d" | "--dev", s) => { dev.replace(s); },
			Argument::KeyWithValue("--toc", s) => { toc.replace(s); },

			// A bare value is the device, but only one is allowed.
			Argument::Other(s) =>
				if dev.is_none() { dev.replace(s); }
				else { return Err(DiscIdError::CliArg(s)); },

			_ => {},
		}
	}

	let action =
		if default_device { Action::DefaultDevice }
		else if list_features { Action::Features }
		else if let Some(toc) = toc {
			if dev.is_some() { return Err(DiscIdError::CliArg("-d/--dev with --toc".to_owned())); }
			Action::Toc(toc)
		}
		else { Action::Read(dev, features) };

	Ok(Parsed { action, json, verbose })
}
