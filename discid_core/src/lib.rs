/*!
# Disc ID: Library

This crate computes the identifiers used to look up audio CDs in the
MusicBrainz and FreeDB databases from a disc's table of contents, which can be
read straight from an optical drive (with the `cdio` crate feature enabled) or
supplied directly.

```
use discid_core::Disc;

let disc = Disc::from_toc(
	1,
	206_535,
	&[150, 18_901, 39_738, 59_557, 79_152, 100_126, 124_833, 147_278, 166_336, 182_560],
).unwrap();

assert_eq!(disc.id(), Some("Wn8eRBtfLDfM0qjYPdxrz.Zjs_U-"));
assert_eq!(disc.freedb_id(), Some("830abf0a"));
assert_eq!(disc.last_track_num(), Some(10));
```
*/

#![deny(unsafe_code)]

#![warn(
	clippy::filetype_is_file,
	clippy::integer_division,
	clippy::needless_borrow,
	clippy::nursery,
	clippy::pedantic,
	clippy::perf,
	clippy::suboptimal_flops,
	clippy::unneeded_field_pattern,
	macro_use_extern_crate,
	missing_copy_implementations,
	missing_debug_implementations,
	missing_docs,
	non_ascii_idents,
	trivial_casts,
	trivial_numeric_casts,
	unreachable_pub,
	unused_crate_dependencies,
	unused_extern_crates,
	unused_import_braces,
)]

#![allow(
	clippy::doc_markdown,
	clippy::module_name_repetitions,
	clippy::redundant_pub_crate,
)]

#[cfg(feature = "cdio")] mod cdio;
mod device;
mod disc;
mod error;
mod id;
mod isrc;
mod mcn;
mod toc;
mod track;

#[cfg(feature = "cdio")]
pub(crate) use cdio::LibcdioInstance;
pub use device::{
	default_device,
	Feature,
	features,
	has_feature,
	version_string,
};
pub use disc::Disc;
pub use error::{
	DiscIdError,
	ErrorKind,
};
pub use id::{
	FreedbId,
	MusicBrainzId,
};
pub use isrc::Isrc;
pub use mcn::Mcn;
pub use toc::Toc;
pub use track::{
	Track,
	Tracks,
};



/// # Number of lead-in sectors.
///
/// All discs have a 2-second region at the start before any data. Drives
/// report positions without it; MusicBrainz offsets include it.
pub const CD_LEADIN: u32 = 150;

/// # CD-Extra Data Gap.
///
/// The leadout of the audio session on an enhanced CD sits this many sectors
/// before the start of the trailing data track.
pub const CD_EXTRA_GAP: u32 = 11_400;

/// # Sectors Per Second.
///
/// Per the Red Book, one second of audio occupies 75 sectors.
pub const SECTORS_PER_SECOND: u32 = 75;

/// # Maximum Track Number.
pub const MAX_TRACKS: u8 = 99;

/// # Maximum Leadout.
///
/// One hundred minutes' worth of sectors, comfortably beyond anything a real
/// disc can hold.
pub const MAX_SECTORS: u32 = 100 * 60 * SECTORS_PER_SECOND;

/// # MusicBrainz Submission URL (Base).
pub const SUBMISSION_URL: &str = "https://musicbrainz.org/cdtoc/attach";

/// # MusicBrainz Web Service URL (Base).
pub const WEBSERVICE_URL: &str = "https://musicbrainz.org/ws/2/discid";



#[must_use]
#[allow(clippy::integer_division)]
/// # Sectors to Seconds.
///
/// Convert a sector count to whole seconds, rounding halves up.
///
/// ```
/// assert_eq!(discid_core::sectors_to_seconds(0), 0);
/// assert_eq!(discid_core::sectors_to_seconds(37), 0);
/// assert_eq!(discid_core::sectors_to_seconds(38), 1);
/// assert_eq!(discid_core::sectors_to_seconds(206_535), 2754);
/// ```
pub const fn sectors_to_seconds(sectors: u32) -> u32 {
	sectors / SECTORS_PER_SECOND + (sectors % SECTORS_PER_SECOND >= 38) as u32
}
