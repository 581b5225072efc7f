/*!
# Disc ID
*/

#![forbid(unsafe_code)]

#![deny(
	clippy::allow_attributes_without_reason,
	clippy::correctness,
	unreachable_pub,
)]

#![warn(
	clippy::complexity,
	clippy::nursery,
	clippy::pedantic,
	clippy::perf,
	clippy::style,

	clippy::allow_attributes,
	clippy::clone_on_ref_ptr,
	clippy::create_dir,
	clippy::filetype_is_file,
	clippy::format_push_string,
	clippy::get_unwrap,
	clippy::impl_trait_in_params,
	clippy::lossy_float_literal,
	clippy::missing_assert_message,
	clippy::missing_docs_in_private_items,
	clippy::needless_raw_strings,
	clippy::panic_in_result_fn,
	clippy::pub_without_shorthand,
	clippy::rest_pat_in_fully_bound_structs,
	clippy::semicolon_inside_block,
	clippy::str_to_string,
	clippy::string_to_string,
	clippy::todo,
	clippy::undocumented_unsafe_blocks,
	clippy::unneeded_field_pattern,
	clippy::unseparated_literal_suffix,
	clippy::unwrap_in_result,

	macro_use_extern_crate,
	missing_copy_implementations,
	missing_docs,
	non_ascii_idents,
	trivial_casts,
	trivial_numeric_casts,
	unused_crate_dependencies,
	unused_extern_crates,
	unused_import_braces,
)]

#![expect(clippy::redundant_pub_crate, reason = "Unresolvable.")]



mod cli;

use cli::{
	Action,
	Parsed,
};
use dactyl::NiceU32;
use discid_core::{
	CD_LEADIN,
	Disc,
	DiscIdError,
};
use fyi_ansi::{
	csi,
	dim,
};
use fyi_msg::Msg;
use log::LevelFilter;
use oxford_join::OxfordJoin;
use std::process::ExitCode;



/// # Divider.
const DIVIDER: &str = dim!("----------------------------------------");



/// # Main.
///
/// This lets us bubble up startup errors so they can be pretty-printed.
fn main() -> ExitCode {
	match main__() {
		Ok(()) => ExitCode::SUCCESS,
		Err(e @ (DiscIdError::PrintHelp | DiscIdError::PrintVersion)) => {
			println!("{e}");
			ExitCode::SUCCESS
		},
		Err(e) => {
			Msg::from(e).eprint();
			ExitCode::FAILURE
		},
	}
}

#[inline]
/// # Actual Main.
///
/// This does all the stuff.
fn main__() -> Result<(), DiscIdError> {
	let Parsed { action, json, verbose } = cli::parse()?;

	// Logging goes to STDERR; RUST_LOG can still override the level.
	env_logger::Builder::new()
		.filter_level(if verbose { LevelFilter::Debug } else { LevelFilter::Warn })
		.parse_default_env()
		.init();

	let disc = match action {
		Action::DefaultDevice => {
			println!("{}", discid_core::default_device());
			return Ok(());
		},
		Action::Features => {
			print_features();
			return Ok(());
		},
		Action::Read(dev, features) => Disc::from_device(dev.as_deref(), &features)?,
		Action::Toc(toc) => Disc::from_toc_str(&toc)?,
	};

	if json {
		let out = serde_json::to_string_pretty(&disc)
			.map_err(|_| DiscIdError::CliParse("JSON"))?;
		println!("{out}");
	}
	else { print_summary(&disc); }

	Ok(())
}

/// # Print Features.
///
/// List the read features supported by this build, one per line, or
/// complain to STDERR if there aren't any.
fn print_features() {
	let set: Vec<&str> = discid_core::features().map(|f| f.as_str()).collect();
	if set.is_empty() {
		Msg::warning(concat!(
			"This build cannot read discs; rebuild with the ",
			csi!(bold), "cdio", csi!(),
			" feature to enable drive access.",
		)).eprint();
	}
	else {
		log::debug!("Supported features: {}.", set.oxford_and());
		for f in set { println!("{f}"); }
	}
}

/// # Print Summary.
///
/// Print the various disc identifiers followed by the table of contents in
/// a nice little table.
fn print_summary(disc: &Disc) {
	let Some(tracks) = disc.tracks() else { return; };

	// A few key/value pairs.
	let mut kv: Vec<(&str, &str, String)> = vec![
		("MusicBrainz:", csi!(bold, blue), disc.id().unwrap_or_default().to_owned()),
		("FreeDB:", csi!(bold, blue), disc.freedb_id().unwrap_or_default().to_owned()),
		("TOC:", csi!(bold, 199), disc.toc_string().unwrap_or_default()),
	];
	if let Some(mcn) = disc.mcn() {
		kv.push(("MCN:", csi!(bold, 199), mcn.to_string()));
	}
	if let Some(dev) = disc.device() {
		kv.push(("Device:", csi!(bold, 199), dev.to_owned()));
	}
	kv.push(("Submit:", csi!(dim), disc.submission_url().unwrap_or_default().to_owned()));

	let col_max: usize = kv.iter().map(|(k, _, _)| k.len()).max().unwrap_or(0);
	for (k, color, v) in kv {
		println!(
			concat!("{color}{k:col_max$}", csi!(), " {v}"),
			color=color,
			k=k,
			col_max=col_max,
			v=v,
		);
	}

	// The table of contents.
	let has_isrc = tracks.clone().any(|t| t.isrc().is_some());
	println!(
		dim!("\n##   FIRST    LAST  LENGTH  {:>12}"),
		if has_isrc { "ISRC" } else { "" },
	);
	println!("{DIVIDER}");

	for t in tracks {
		let isrc = t.isrc().map(|v| v.to_string()).unwrap_or_default();
		println!(
			"{:02}  {:>6}  {:>6}  {:>6}  {isrc:>12}",
			t.number(),
			t.offset(),
			t.end() - 1,
			t.length(),
		);
	}

	// The leadout.
	let sectors = disc.sectors().unwrap_or_default();
	println!(dim!("AA  {:>6}                      LEAD-OUT"), sectors);
	println!("{DIVIDER}");
	println!(
		dim!("{} sectors, including the {}-sector lead-in.\n"),
		NiceU32::from(sectors),
		CD_LEADIN,
	);
}
