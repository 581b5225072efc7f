/*!
# Disc ID: Tracks
*/

use crate::{
	Isrc,
	sectors_to_seconds,
	Toc,
};
use serde::Serialize;
use std::ops::RangeInclusive;



#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq, Serialize)]
/// # Track.
///
/// The position and length of a single audio track, along with its ISRC if
/// one was read from the disc.
pub struct Track {
	/// # Track Number.
	number: u8,

	/// # Start Sector.
	offset: u32,

	/// # Length (in Sectors).
	length: u32,

	/// # ISRC.
	isrc: Option<Isrc>,
}

impl Track {
	/// # New.
	pub(crate) const fn new(number: u8, offset: u32, length: u32, isrc: Option<Isrc>) -> Self {
		Self { number, offset, length, isrc }
	}

	#[must_use]
	/// # Track Number.
	pub const fn number(&self) -> u8 { self.number }

	#[must_use]
	/// # Start Sector.
	pub const fn offset(&self) -> u32 { self.offset }

	#[must_use]
	/// # Length (in Sectors).
	pub const fn length(&self) -> u32 { self.length }

	#[must_use]
	/// # End Sector.
	///
	/// This is exclusive, i.e. the start of whatever comes next.
	pub const fn end(&self) -> u32 { self.offset + self.length }

	#[must_use]
	/// # ISRC.
	pub const fn isrc(&self) -> Option<Isrc> { self.isrc }

	#[must_use]
	/// # Length (in Seconds).
	pub const fn seconds(&self) -> u32 { sectors_to_seconds(self.length) }

	#[must_use]
	/// # Start Time (in Seconds).
	pub const fn start_time(&self) -> u32 { sectors_to_seconds(self.offset) }

	#[must_use]
	/// # End Time (in Seconds).
	pub const fn end_time(&self) -> u32 { sectors_to_seconds(self.end()) }
}



#[derive(Debug, Clone)]
/// # Track Iterator.
///
/// This yields each [`Track`] of a table of contents, in order. It is cheap to
/// clone, so if you need to go around twice, just clone it first (or call
/// `tracks()` again).
pub struct Tracks<'a> {
	/// # Table of Contents.
	toc: &'a Toc,

	/// # ISRCs (Indexed From First Track).
	isrcs: Option<&'a [Option<Isrc>]>,

	/// # Remaining Track Numbers.
	pos: RangeInclusive<u8>,
}

impl<'a> Tracks<'a> {
	/// # New.
	pub(crate) const fn new(toc: &'a Toc, isrcs: Option<&'a [Option<Isrc>]>) -> Self {
		Self {
			toc,
			isrcs,
			pos: toc.first_track()..=toc.last_track(),
		}
	}

	/// # Track.
	fn track(&self, num: u8) -> Option<Track> {
		let offset = self.toc.offset(num)?;
		let length = self.toc.length(num)?;
		let isrc = self.isrcs
			.and_then(|all| all.get(usize::from(num - self.toc.first_track())).copied())
			.flatten();
		Some(Track::new(num, offset, length, isrc))
	}
}

impl Iterator for Tracks<'_> {
	type Item = Track;

	fn next(&mut self) -> Option<Self::Item> {
		let num = self.pos.next()?;
		self.track(num)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let len = self.len();
		(len, Some(len))
	}
}

impl DoubleEndedIterator for Tracks<'_> {
	fn next_back(&mut self) -> Option<Self::Item> {
		let num = self.pos.next_back()?;
		self.track(num)
	}
}

impl ExactSizeIterator for Tracks<'_> {
	#[inline]
	fn len(&self) -> usize { self.pos.len() }
}

impl std::iter::FusedIterator for Tracks<'_> {}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_tracks() {
		let toc = Toc::new(3, 100_000, &[150, 30_000, 60_000]).expect("TOC failed.");
		let tracks: Vec<Track> = toc.tracks().collect();
		assert_eq!(tracks.len(), 3);
		assert_eq!(toc.tracks().len(), 3, "Wrong exact size.");

		assert_eq!(tracks[0], Track::new(3, 150, 29_850, None));
		assert_eq!(tracks[1], Track::new(4, 30_000, 30_000, None));
		assert_eq!(tracks[2], Track::new(5, 60_000, 40_000, None));
		assert_eq!(tracks[2].end(), toc.sectors(), "The last track should end at the leadout.");

		// Every track ends where the next one starts.
		for pair in tracks.windows(2) {
			assert_eq!(pair[0].end(), pair[1].offset(), "Gap between tracks.");
		}

		// The iterator is restartable.
		let again: Vec<Track> = toc.tracks().collect();
		assert_eq!(tracks, again, "Tracks changed between runs.");

		// And reversible.
		let mut back: Vec<Track> = toc.tracks().rev().collect();
		back.reverse();
		assert_eq!(tracks, back, "Reversed tracks don't match.");
	}

	#[test]
	fn t_times() {
		let track = Track::new(1, 150, 18_751, None);
		assert_eq!(track.end(), 18_901);
		assert_eq!(track.seconds(), 250);
		assert_eq!(track.start_time(), 2);
		assert_eq!(track.end_time(), 252);
	}

	#[test]
	fn t_isrcs() {
		let toc = Toc::new(1, 100_000, &[150, 30_000]).expect("TOC failed.");
		let isrc = Isrc::try_from("USS1Z9900001").expect("ISRC failed.");
		let isrcs = [None, Some(isrc)];

		let tracks: Vec<Track> = Tracks::new(&toc, Some(isrcs.as_slice())).collect();
		assert_eq!(tracks[0].isrc(), None);
		assert_eq!(tracks[1].isrc(), Some(isrc));
	}
}
