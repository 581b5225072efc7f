/*!
# Disc ID: Table of Contents
*/

use crate::{
	DiscIdError,
	MAX_SECTORS,
	MAX_TRACKS,
	sectors_to_seconds,
	Track,
	Tracks,
};
use dactyl::traits::BytesToUnsigned;
use serde::{
	Deserialize,
	Serialize,
};
use std::{
	fmt,
	str::FromStr,
};



#[derive(Debug, Clone, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawToc")]
/// # Table of Contents.
///
/// This holds the (audio) track layout of a compact disc: the first and last
/// track numbers, the start sector of each track, and the leadout.
///
/// All sector positions are absolute LBAs, i.e. they include the 150-sector
/// lead-in, so the first track of a typical disc starts at `150`.
///
/// Instances are validated on construction; if you have one, it is
/// guaranteed to be representable as a MusicBrainz DiscID:
/// * `1 <= first_track <= last_track <= 99`;
/// * offsets are strictly increasing;
/// * the leadout comes after the last offset and is at most [`MAX_SECTORS`].
pub struct Toc {
	/// # First Track Number.
	first_track: u8,

	/// # Last Track Number.
	last_track: u8,

	/// # Leadout.
	sectors: u32,

	/// # Track Offsets.
	offsets: Vec<u32>,
}

impl fmt::Display for Toc {
	/// # TOC String.
	///
	/// Print the table of contents in the space-separated
	/// `FIRST LAST LEADOUT OFFSET…` format understood by [`Toc::from_str`].
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {} {}", self.first_track, self.last_track, self.sectors)?;
		for v in &self.offsets { write!(f, " {v}")?; }
		Ok(())
	}
}

impl FromStr for Toc {
	type Err = DiscIdError;

	/// # Parse TOC String.
	///
	/// Parse a `FIRST LAST LEADOUT OFFSET…` string, like the one printed by
	/// `Display`. Values may be separated by whitespace, plus signs, or both,
	/// so the `toc` query value of a MusicBrainz URL works too.
	///
	/// ## Errors
	///
	/// Returns an error if the string is not made up of at least four
	/// numbers, the number of offsets doesn't match the track range, or the
	/// values fail the usual [`Toc::new`] validation.
	fn from_str(src: &str) -> Result<Self, Self::Err> {
		let mut parts = src.as_bytes()
			.split(|b| b.is_ascii_whitespace() || b'+'.eq(b))
			.filter(|v| ! v.is_empty());

		let first = parts.next()
			.and_then(u8::btou)
			.ok_or(DiscIdError::TocParse)?;
		let last = parts.next()
			.and_then(u8::btou)
			.ok_or(DiscIdError::TocParse)?;
		let sectors = parts.next()
			.and_then(u32::btou)
			.ok_or(DiscIdError::TocParse)?;
		let offsets = parts.map(u32::btou)
			.collect::<Option<Vec<u32>>>()
			.ok_or(DiscIdError::TocParse)?;

		Self::from_parts(first, last, sectors, offsets)
	}
}

impl TryFrom<&str> for Toc {
	type Error = DiscIdError;

	#[inline]
	fn try_from(src: &str) -> Result<Self, Self::Error> { src.parse() }
}

impl Toc {
	/// # New.
	///
	/// Build a table of contents from the first track number, leadout, and
	/// the start sector of each track. The last track number is implied by
	/// the number of offsets.
	///
	/// ## Examples
	///
	/// ```
	/// use discid_core::Toc;
	///
	/// let toc = Toc::new(1, 100_000, &[150, 30_000, 60_000]).unwrap();
	/// assert_eq!(toc.last_track(), 3);
	/// assert_eq!(toc.to_string(), "1 3 100000 150 30000 60000");
	/// ```
	///
	/// ## Errors
	///
	/// Offsets that would take the track count past 99 are rejected with
	/// [`DiscIdError::Capacity`] (nothing is silently dropped). An error is
	/// also returned if the first track is zero, the offsets are empty or out
	/// of order, or the leadout is out of range.
	pub fn new(first_track: u8, sectors: u32, offsets: &[u32]) -> Result<Self, DiscIdError> {
		if offsets.is_empty() { return Err(DiscIdError::NoTracks); }
		if first_track == 0 || MAX_TRACKS < first_track {
			return Err(DiscIdError::FirstTrack(first_track));
		}

		// The last track number has to fit too.
		let last = usize::from(first_track) + offsets.len() - 1;
		let last_track = u8::try_from(last)
			.ok()
			.filter(|n| *n <= MAX_TRACKS)
			.ok_or(DiscIdError::Capacity(last))?;

		if sectors == 0 || MAX_SECTORS < sectors {
			return Err(DiscIdError::Sectors(sectors));
		}

		// Offsets must increase, and must all come before the leadout.
		let mut last_offset = None;
		for (num, &offset) in (first_track..=last_track).zip(offsets) {
			if sectors <= offset || last_offset.is_some_and(|v| offset <= v) {
				return Err(DiscIdError::Offset(num));
			}
			last_offset.replace(offset);
		}

		Ok(Self {
			first_track,
			last_track,
			sectors,
			offsets: offsets.to_vec(),
		})
	}

	/// # From Parts.
	///
	/// Same as [`Toc::new`], but with an explicit last track number, which
	/// must agree with the number of offsets.
	///
	/// ## Errors
	///
	/// In addition to the [`Toc::new`] checks, this returns an error if the
	/// last track number is out of range or disagrees with the offsets.
	pub fn from_parts(first_track: u8, last_track: u8, sectors: u32, offsets: Vec<u32>)
	-> Result<Self, DiscIdError> {
		if MAX_TRACKS < last_track { return Err(DiscIdError::Capacity(usize::from(last_track))); }
		if last_track < first_track { return Err(DiscIdError::LastTrack(last_track)); }
		if offsets.len() != usize::from(last_track - first_track) + 1 {
			return Err(DiscIdError::TocCount);
		}

		let out = Self::new(first_track, sectors, &offsets)?;
		debug_assert_eq!(out.last_track, last_track, "Last track mismatch.");
		Ok(out)
	}

	#[cfg_attr(not(feature = "cdio"), allow(dead_code))]
	/// # Drive Track Range.
	///
	/// Turn the first track number and track count reported by a drive into
	/// an inclusive first/last pair. Drives answer `0xFF` when they can't
	/// tell, and anything out of range is the drive's fault rather than the
	/// caller's, so these come back as device errors.
	pub(crate) fn drive_range(first: u8, num: u8) -> Result<(u8, u8), DiscIdError> {
		if first == 0 || MAX_TRACKS < first { return Err(DiscIdError::FirstTrackNum); }
		if num == 0 || MAX_TRACKS < num { return Err(DiscIdError::NumTracks); }

		let last = first + (num - 1);
		if MAX_TRACKS < last { Err(DiscIdError::NumTracks) }
		else { Ok((first, last)) }
	}

	#[cfg_attr(not(feature = "cdio"), allow(dead_code))]
	/// # From Drive.
	///
	/// Same as [`Toc::new`], except validation failures are reported as
	/// [`DiscIdError::DriveToc`], since the values came from hardware.
	pub(crate) fn from_drive(first_track: u8, sectors: u32, offsets: &[u32])
	-> Result<Self, DiscIdError> {
		Self::new(first_track, sectors, offsets).map_err(|e| {
			log::debug!("Drive TOC rejected: {e}");
			DiscIdError::DriveToc
		})
	}
}

impl Toc {
	#[must_use]
	/// # First Track Number.
	pub const fn first_track(&self) -> u8 { self.first_track }

	#[must_use]
	/// # Last Track Number.
	pub const fn last_track(&self) -> u8 { self.last_track }

	#[must_use]
	/// # Number of Tracks.
	pub const fn track_count(&self) -> u8 { self.last_track - self.first_track + 1 }

	#[must_use]
	/// # Leadout.
	///
	/// The total length of the disc in sectors, i.e. the position of the
	/// leadout.
	pub const fn sectors(&self) -> u32 { self.sectors }

	#[must_use]
	/// # Length in Seconds.
	pub const fn seconds(&self) -> u32 { sectors_to_seconds(self.sectors) }

	#[must_use]
	/// # Track Offsets.
	///
	/// Return the start sectors of each track, in order.
	pub fn offsets(&self) -> &[u32] { &self.offsets }

	#[must_use]
	/// # Track Offset.
	///
	/// Return the start sector of track `num`, if it exists.
	pub fn offset(&self, num: u8) -> Option<u32> {
		self.idx(num).map(|idx| self.offsets[idx])
	}

	#[must_use]
	/// # Track Length.
	///
	/// Return the length of track `num` in sectors, if it exists. This runs up
	/// to the next track or, for the last track, the leadout.
	pub fn length(&self, num: u8) -> Option<u32> {
		let idx = self.idx(num)?;
		let end = self.offsets.get(idx + 1).copied().unwrap_or(self.sectors);
		Some(end - self.offsets[idx])
	}

	#[must_use]
	/// # Track.
	///
	/// Return the details of track `num`, if it exists.
	pub fn track(&self, num: u8) -> Option<Track> {
		let offset = self.offset(num)?;
		let length = self.length(num)?;
		Some(Track::new(num, offset, length, None))
	}

	#[must_use]
	/// # Tracks.
	///
	/// Return an iterator over the tracks, in order.
	pub const fn tracks(&self) -> Tracks<'_> { Tracks::new(self, None) }

	/// # Index.
	///
	/// Convert a track number to an offset index.
	fn idx(&self, num: u8) -> Option<usize> {
		if self.first_track <= num && num <= self.last_track {
			Some(usize::from(num - self.first_track))
		}
		else { None }
	}
}



#[derive(Deserialize)]
/// # Raw TOC.
///
/// Deserialization passes through this so the result gets validated.
struct RawToc {
	/// # First Track.
	first_track: u8,

	/// # Last Track.
	last_track: u8,

	/// # Leadout.
	sectors: u32,

	/// # Offsets.
	offsets: Vec<u32>,
}

impl TryFrom<RawToc> for Toc {
	type Error = DiscIdError;

	#[inline]
	fn try_from(src: RawToc) -> Result<Self, Self::Error> {
		Self::from_parts(src.first_track, src.last_track, src.sectors, src.offsets)
	}
}
