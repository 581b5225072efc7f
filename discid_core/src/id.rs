/*!
# Disc ID: Identifiers

The MusicBrainz and FreeDB IDs, and the URLs built from them.
*/

use base64::{
	Engine,
	engine::general_purpose::STANDARD,
};
use crate::{
	MAX_TRACKS,
	SECTORS_PER_SECOND,
	SUBMISSION_URL,
	Toc,
	WEBSERVICE_URL,
};
use serde::{
	Serialize,
	Serializer,
};
use sha1::{
	Digest,
	Sha1,
};
use std::fmt;



/// # Upper Hex.
const HEX: &[u8; 16] = b"0123456789ABCDEF";



#[derive(Debug, Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// # MusicBrainz DiscID.
///
/// A 28-character identifier derived from a SHA-1 digest of the table of
/// contents, encoded with a URL-friendly base64 variant where `+`, `/`, and
/// `=` are replaced with `.`, `_`, and `-` respectively.
pub struct MusicBrainzId(String);

impl AsRef<str> for MusicBrainzId {
	#[inline]
	fn as_ref(&self) -> &str { self.as_str() }
}

impl fmt::Display for MusicBrainzId {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		<str as fmt::Display>::fmt(self.as_str(), f)
	}
}

impl From<&Toc> for MusicBrainzId {
	/// # Compute.
	///
	/// The digest covers the first and last track numbers as two-digit
	/// uppercase hex, followed by one hundred eight-digit uppercase hex slots:
	/// the leadout, then the offset of each track at its track-number
	/// position, zero-filled. The layout is fixed regardless of track count,
	/// which is why there's no room for a hundredth track.
	fn from(toc: &Toc) -> Self {
		let first = toc.first_track();
		let offsets = toc.offsets();

		let mut hasher = Sha1::new();
		hasher.update(hex2(first));
		hasher.update(hex2(toc.last_track()));
		hasher.update(hex8(toc.sectors()));
		for num in 1..=MAX_TRACKS {
			let offset =
				if num < first { 0 }
				else { offsets.get(usize::from(num - first)).copied().unwrap_or(0) };
			hasher.update(hex8(offset));
		}

		let raw = STANDARD.encode(hasher.finalize());
		Self(
			raw.chars()
				.map(|c| match c {
					'+' => '.',
					'/' => '_',
					'=' => '-',
					c => c,
				})
				.collect()
		)
	}
}

impl Serialize for MusicBrainzId {
	#[inline]
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

impl MusicBrainzId {
	#[must_use]
	/// # As Str.
	pub fn as_str(&self) -> &str { self.0.as_str() }
}



#[derive(Debug, Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// # FreeDB (CDDB) ID.
///
/// The legacy 32-bit disc ID, printed as eight lowercase hex digits. The top
/// byte is a checksum of the track start times, the middle two bytes hold
/// the playing time in seconds, and the bottom byte is the track count.
pub struct FreedbId(u32);

impl fmt::Display for FreedbId {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:08x}", self.0)
	}
}

impl From<&Toc> for FreedbId {
	#[allow(clippy::integer_division)]
	fn from(toc: &Toc) -> Self {
		let offsets = toc.offsets();

		// Sum the digits of each track's start time in seconds.
		let checksum: u32 = offsets.iter()
			.map(|&v| digit_sum(v / SECTORS_PER_SECOND))
			.sum();

		// Playing time, from the start of the first track.
		let first = offsets.first().copied().unwrap_or_default();
		let length = toc.sectors() / SECTORS_PER_SECOND - first / SECTORS_PER_SECOND;

		Self(
			((checksum % 0xFF) << 24) |
			(length << 8) |
			u32::from(toc.track_count())
		)
	}
}

impl From<FreedbId> for u32 {
	#[inline]
	fn from(src: FreedbId) -> Self { src.0 }
}

impl Serialize for FreedbId {
	#[inline]
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}



/// ## URLs.
impl Toc {
	#[must_use]
	/// # MusicBrainz ID.
	pub fn musicbrainz_id(&self) -> MusicBrainzId { MusicBrainzId::from(self) }

	#[must_use]
	/// # FreeDB ID.
	pub fn freedb_id(&self) -> FreedbId { FreedbId::from(self) }

	#[must_use]
	/// # Submission URL.
	///
	/// Return the MusicBrainz URL for attaching this disc to a release, e.g.
	/// `https://musicbrainz.org/cdtoc/attach?id=…&tracks=10&toc=1+10+206535+150+…`.
	///
	/// ```
	/// use discid_core::Toc;
	///
	/// let toc = Toc::new(1, 100_000, &[150, 30_000]).unwrap();
	/// assert_eq!(
	///     toc.submission_url(),
	///     format!(
	///         "https://musicbrainz.org/cdtoc/attach?id={}&tracks=2&toc=1+2+100000+150+30000",
	///         toc.musicbrainz_id(),
	///     ),
	/// );
	/// ```
	pub fn submission_url(&self) -> String {
		self.submission_url_with_id(&self.musicbrainz_id())
	}

	#[must_use]
	/// # Web Service URL.
	///
	/// Return the MusicBrainz web service lookup URL for this disc, e.g.
	/// `https://musicbrainz.org/ws/2/discid/…?toc=1+10+206535+150+…`. The
	/// `toc` parameter lets the server fall back to fuzzy matching when the
	/// ID itself is unknown.
	pub fn webservice_url(&self) -> String {
		self.webservice_url_with_id(&self.musicbrainz_id())
	}

	/// # Submission URL (Precomputed ID).
	pub(crate) fn submission_url_with_id(&self, id: &MusicBrainzId) -> String {
		format!(
			"{SUBMISSION_URL}?id={id}&tracks={}&toc={}",
			self.last_track(),
			self.toc_plus(),
		)
	}

	/// # Web Service URL (Precomputed ID).
	pub(crate) fn webservice_url_with_id(&self, id: &MusicBrainzId) -> String {
		format!("{WEBSERVICE_URL}/{id}?toc={}", self.toc_plus())
	}

	/// # Plus-Joined TOC.
	///
	/// This is the `toc` query value: the display form with plus signs
	/// instead of spaces.
	fn toc_plus(&self) -> String { self.to_string().replace(' ', "+") }
}



/// # Digit Sum.
///
/// Add up the decimal digits of a number, e.g. `123` becomes `6`.
const fn digit_sum(mut num: u32) -> u32 {
	let mut out = 0;
	while num != 0 {
		out += num % 10;
		num /= 10;
	}
	out
}

/// # Two-Digit Hex.
const fn hex2(num: u8) -> [u8; 2] {
	[HEX[(num >> 4) as usize], HEX[(num & 0x0F) as usize]]
}

#[allow(clippy::cast_possible_truncation)] // Each nibble fits.
/// # Eight-Digit Hex.
const fn hex8(num: u32) -> [u8; 8] {
	let mut out = [b'0'; 8];
	let mut i = 0;
	while i < 8 {
		out[i] = HEX[((num >> (28 - i * 4)) & 0x0F) as usize];
		i += 1;
	}
	out
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_hex() {
		assert_eq!(&hex2(1), b"01");
		assert_eq!(&hex2(99), b"63");
		assert_eq!(&hex8(0), b"00000000");
		assert_eq!(&hex8(206_535), b"000326C7");
		assert_eq!(&hex8(u32::MAX), b"FFFFFFFF");
	}

	#[test]
	fn t_digit_sum() {
		assert_eq!(digit_sum(0), 0);
		assert_eq!(digit_sum(2), 2);
		assert_eq!(digit_sum(123), 6);
		assert_eq!(digit_sum(999), 27);
	}

	#[test]
	fn t_ids() {
		for (raw, mb, freedb) in [
			(
				"1 10 206535 150 18901 39738 59557 79152 100126 124833 147278 166336 182560",
				"Wn8eRBtfLDfM0qjYPdxrz.Zjs_U-",
				"830abf0a",
			),
			(
				"1 11 242457 150 44942 61305 72755 96360 130485 147315 164275 190702 205412 220437",
				"lSOVc5h6IXSuzcamJS1Gp4_tRuA-",
				"b40c9e0b",
			),
			(
				"3 5 100000 150 30000 60000",
				"LvQ.gixpR2IwKGv3uDiHLoPsO18-",
				"0e053303",
			),
		] {
			let toc: Toc = raw.parse().expect("TOC parse failed.");
			let id = toc.musicbrainz_id();
			assert_eq!(id.as_str(), mb, "Wrong MusicBrainz ID for {raw}.");
			assert_eq!(id.as_str().len(), 28, "MusicBrainz IDs are always 28 characters.");
			assert_eq!(toc.freedb_id().to_string(), freedb, "Wrong FreeDB ID for {raw}.");

			// Same TOC, same answer.
			assert_eq!(id, toc.musicbrainz_id(), "ID computation is not stable.");
		}
	}

	#[test]
	fn t_urls() {
		let toc: Toc = "1 10 206535 150 18901 39738 59557 79152 100126 124833 147278 166336 182560"
			.parse()
			.expect("TOC parse failed.");

		assert_eq!(
			toc.submission_url(),
			"https://musicbrainz.org/cdtoc/attach?id=Wn8eRBtfLDfM0qjYPdxrz.Zjs_U-&tracks=10&toc=1+10+206535+150+18901+39738+59557+79152+100126+124833+147278+166336+182560",
		);
		assert_eq!(
			toc.webservice_url(),
			"https://musicbrainz.org/ws/2/discid/Wn8eRBtfLDfM0qjYPdxrz.Zjs_U-?toc=1+10+206535+150+18901+39738+59557+79152+100126+124833+147278+166336+182560",
		);
	}
}
