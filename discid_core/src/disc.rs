/*!
# Disc ID: Disc
*/

use crate::{
	default_device,
	DiscIdError,
	Feature,
	FreedbId,
	Isrc,
	Mcn,
	MusicBrainzId,
	Toc,
	Tracks,
};
use serde::{
	ser::SerializeStruct,
	Serialize,
	Serializer,
};
use std::{
	fmt,
	str::FromStr,
};



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Disc.
///
/// This holds the table of contents of a disc (read from a drive or supplied
/// directly) along with the identifiers derived from it.
///
/// A `Disc` is either unread, in which case all of the getters return
/// `None`, or fully populated. Every read, put, or parse clears the previous
/// state before trying, so a failure never leaves stale values behind.
///
/// ## Examples
///
/// ```
/// use discid_core::Disc;
///
/// let mut disc = Disc::new();
/// assert!(disc.id().is_none());
///
/// disc.parse("1 2 100000 150 30000").unwrap();
/// assert_eq!(disc.id(), Some("mT3qk6XHrkLN.UCECGIOdtRd8a8-"));
///
/// // A bad put wipes out the old answer.
/// assert!(disc.put(0, 100_000, &[150, 30_000]).is_err());
/// assert!(disc.id().is_none());
/// ```
pub struct Disc {
	/// # Device (Last Read).
	device: Option<String>,

	/// # State.
	state: TocState,
}

impl fmt::Display for Disc {
	/// # DiscID.
	///
	/// This prints the MusicBrainz ID, or nothing if the disc is unread.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.id().unwrap_or_default())
	}
}

impl FromStr for Disc {
	type Err = DiscIdError;

	#[inline]
	fn from_str(src: &str) -> Result<Self, Self::Err> { Self::from_toc_str(src) }
}

impl Serialize for Disc {
	/// # Serialize.
	///
	/// Unread discs serialize as `null`.
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let TocState::Populated(p) = &self.state else {
			return serializer.serialize_none();
		};

		let tracks: Vec<_> = self.tracks().map_or_else(Vec::new, Iterator::collect);
		let mut out = serializer.serialize_struct("Disc", 12)?;
		out.serialize_field("device", &self.device)?;
		out.serialize_field("id", &p.id)?;
		out.serialize_field("freedb_id", &p.freedb_id)?;
		out.serialize_field("toc", &p.toc.to_string())?;
		out.serialize_field("first_track", &p.toc.first_track())?;
		out.serialize_field("last_track", &p.toc.last_track())?;
		out.serialize_field("sectors", &p.toc.sectors())?;
		out.serialize_field("seconds", &p.toc.seconds())?;
		out.serialize_field("mcn", &p.mcn)?;
		out.serialize_field("submission_url", &p.submission_url)?;
		out.serialize_field("webservice_url", &p.webservice_url)?;
		out.serialize_field("tracks", &tracks)?;
		out.end()
	}
}

/// ## Construction.
impl Disc {
	#[must_use]
	/// # New (Unread).
	pub fn new() -> Self { Self::default() }

	/// # From Device.
	///
	/// Read a disc from an optical drive. If `dev` is `None` or empty, the
	/// [default device](crate::default_device) is used. Reading the table
	/// of contents is always implied; `features` can additionally request the
	/// MCN and/or ISRCs. Features this build doesn't support are ignored.
	///
	/// ## Errors
	///
	/// Returns an error if the drive or disc cannot be read, or if this crate
	/// was built without its `cdio` feature.
	pub fn from_device(dev: Option<&str>, features: &[Feature]) -> Result<Self, DiscIdError> {
		let mut out = Self::new();
		out.read(dev, features)?;
		Ok(out)
	}

	/// # From TOC.
	///
	/// Build a disc from the first track number, leadout, and track offsets.
	///
	/// ## Errors
	///
	/// Returns an error if the values do not make a valid table of contents.
	/// See [`Toc::new`] for details.
	pub fn from_toc(first_track: u8, sectors: u32, offsets: &[u32])
	-> Result<Self, DiscIdError> {
		let mut out = Self::new();
		out.put(first_track, sectors, offsets)?;
		Ok(out)
	}

	/// # From TOC String.
	///
	/// Build a disc from a `FIRST LAST LEADOUT OFFSET…` string.
	///
	/// ## Errors
	///
	/// Returns an error if the string cannot be parsed or does not make a
	/// valid table of contents.
	pub fn from_toc_str(src: &str) -> Result<Self, DiscIdError> {
		let mut out = Self::new();
		out.parse(src)?;
		Ok(out)
	}
}

/// ## Population.
impl Disc {
	/// # Read.
	///
	/// Same as [`Disc::from_device`], but replacing the contents of an
	/// existing instance. The instance is left unread if the read fails.
	///
	/// ## Errors
	///
	/// Returns an error if the drive or disc cannot be read, or if this crate
	/// was built without its `cdio` feature.
	pub fn read(&mut self, dev: Option<&str>, features: &[Feature])
	-> Result<(), DiscIdError> {
		self.reset();

		let dev = dev.map(str::trim)
			.filter(|v| ! v.is_empty())
			.map_or_else(default_device, str::to_owned);

		log::debug!("Reading disc from {dev}.");
		let populated = read_device(&dev, Feature::flags(features))?;
		log::debug!("Read {} ({} tracks).", populated.id, populated.toc.track_count());

		self.device.replace(dev);
		self.state = TocState::Populated(Box::new(populated));
		Ok(())
	}

	/// # Put.
	///
	/// Populate the disc from the first track number, leadout, and track
	/// offsets, replacing whatever was there before. The instance is left
	/// unread if the values are invalid.
	///
	/// ## Errors
	///
	/// Returns an error if the values do not make a valid table of contents.
	/// See [`Toc::new`] for details.
	pub fn put(&mut self, first_track: u8, sectors: u32, offsets: &[u32])
	-> Result<(), DiscIdError> {
		self.reset();
		let toc = Toc::new(first_track, sectors, offsets)?;
		self.set_toc(toc);
		Ok(())
	}

	/// # Parse.
	///
	/// Populate the disc from a `FIRST LAST LEADOUT OFFSET…` string,
	/// replacing whatever was there before. The instance is left unread if
	/// the string is invalid.
	///
	/// ## Errors
	///
	/// Returns an error if the string cannot be parsed, the number of offsets
	/// does not match the track range, or the values do not make a valid
	/// table of contents.
	pub fn parse(&mut self, src: &str) -> Result<(), DiscIdError> {
		self.reset();
		let toc = src.parse::<Toc>()?;
		self.set_toc(toc);
		Ok(())
	}

	/// # Reset.
	fn reset(&mut self) {
		self.device = None;
		self.state = TocState::Unread;
	}

	/// # Set TOC.
	fn set_toc(&mut self, toc: Toc) {
		let populated = Populated::new(toc, None, Vec::new());
		log::debug!("Computed {} from {}.", populated.id, populated.toc);
		self.state = TocState::Populated(Box::new(populated));
	}
}

/// ## Getters.
impl Disc {
	#[must_use]
	/// # Is Read?
	///
	/// Returns `true` if the disc has been populated.
	pub const fn is_read(&self) -> bool { matches!(self.state, TocState::Populated(_)) }

	#[must_use]
	/// # Device.
	///
	/// Return the device the disc was read from, if it was read from one.
	pub fn device(&self) -> Option<&str> { self.device.as_deref() }

	#[must_use]
	/// # Table of Contents.
	pub fn toc(&self) -> Option<&Toc> { self.populated().map(|p| &p.toc) }

	#[must_use]
	/// # MusicBrainz ID.
	pub fn id(&self) -> Option<&str> { self.populated().map(|p| p.id.as_str()) }

	#[must_use]
	/// # MusicBrainz ID (Typed).
	pub fn musicbrainz_id(&self) -> Option<&MusicBrainzId> {
		self.populated().map(|p| &p.id)
	}

	#[must_use]
	/// # FreeDB ID.
	pub fn freedb_id(&self) -> Option<&str> {
		self.populated().map(|p| p.freedb_id_str.as_str())
	}

	#[must_use]
	/// # FreeDB ID (Typed).
	pub fn freedb_id_raw(&self) -> Option<FreedbId> {
		self.populated().map(|p| p.freedb_id)
	}

	#[must_use]
	/// # Submission URL.
	///
	/// The MusicBrainz URL for attaching this disc to a release.
	pub fn submission_url(&self) -> Option<&str> {
		self.populated().map(|p| p.submission_url.as_str())
	}

	#[must_use]
	/// # Web Service URL.
	///
	/// The MusicBrainz web service URL for looking up this disc.
	pub fn webservice_url(&self) -> Option<&str> {
		self.populated().map(|p| p.webservice_url.as_str())
	}

	#[must_use]
	/// # TOC String.
	///
	/// Return the table of contents as a `FIRST LAST LEADOUT OFFSET…`
	/// string.
	pub fn toc_string(&self) -> Option<String> { self.toc().map(Toc::to_string) }

	#[must_use]
	/// # First Track Number.
	pub fn first_track_num(&self) -> Option<u8> { self.toc().map(Toc::first_track) }

	#[must_use]
	/// # Last Track Number.
	pub fn last_track_num(&self) -> Option<u8> { self.toc().map(Toc::last_track) }

	#[must_use]
	/// # Leadout (Sectors).
	pub fn sectors(&self) -> Option<u32> { self.toc().map(Toc::sectors) }

	#[must_use]
	/// # Length (Seconds).
	pub fn seconds(&self) -> Option<u32> { self.toc().map(Toc::seconds) }

	#[must_use]
	/// # Media Catalogue Number.
	///
	/// This is only available if it was requested during a read and the disc
	/// actually has one.
	pub fn mcn(&self) -> Option<Mcn> { self.populated().and_then(|p| p.mcn) }

	#[must_use]
	/// # Track ISRC.
	///
	/// This is only available if ISRCs were requested during a read and the
	/// track actually has one.
	pub fn isrc(&self, num: u8) -> Option<Isrc> {
		let p = self.populated()?;
		let idx = num.checked_sub(p.toc.first_track())?;
		p.isrcs.get(usize::from(idx)).copied().flatten()
	}

	#[must_use]
	/// # Tracks.
	///
	/// Return an iterator over the tracks, or `None` if the disc is unread.
	/// The iterator is cheap; call this again (or clone it) to go around
	/// another time.
	pub fn tracks(&self) -> Option<Tracks<'_>> {
		self.populated().map(|p| Tracks::new(&p.toc, Some(p.isrcs.as_slice())))
	}

	/// # Populated State.
	fn populated(&self) -> Option<&Populated> {
		if let TocState::Populated(p) = &self.state { Some(p) }
		else { None }
	}
}



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Disc State.
enum TocState {
	#[default]
	/// # Nothing Yet.
	Unread,

	/// # Ready.
	Populated(Box<Populated>),
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Populated Disc.
///
/// The table of contents and everything computed from it. The identifiers
/// are worked out once, up front.
struct Populated {
	/// # Table of Contents.
	toc: Toc,

	/// # MusicBrainz ID.
	id: MusicBrainzId,

	/// # FreeDB ID.
	freedb_id: FreedbId,

	/// # FreeDB ID (Formatted).
	freedb_id_str: String,

	/// # Submission URL.
	submission_url: String,

	/// # Web Service URL.
	webservice_url: String,

	/// # Media Catalogue Number.
	mcn: Option<Mcn>,

	/// # ISRCs (Indexed From First Track).
	isrcs: Vec<Option<Isrc>>,
}

impl Populated {
	/// # New.
	fn new(toc: Toc, mcn: Option<Mcn>, isrcs: Vec<Option<Isrc>>) -> Self {
		let id = toc.musicbrainz_id();
		let freedb_id = toc.freedb_id();
		let submission_url = toc.submission_url_with_id(&id);
		let webservice_url = toc.webservice_url_with_id(&id);
		Self {
			freedb_id_str: freedb_id.to_string(),
			toc,
			id,
			freedb_id,
			submission_url,
			webservice_url,
			mcn,
			isrcs,
		}
	}
}



#[cfg(feature = "cdio")]
/// # Read Device.
fn read_device(dev: &str, flags: u8) -> Result<Populated, DiscIdError> {
	let cdio = crate::LibcdioInstance::new(Some(dev))?;
	let toc = cdio.toc()?;

	let mcn =
		if Feature::Mcn.in_flags(flags) {
			let mcn = cdio.mcn();
			if mcn.is_none() { log::warn!("No media catalogue number found."); }
			mcn
		}
		else { None };

	let isrcs =
		if Feature::Isrc.in_flags(flags) {
			(toc.first_track()..=toc.last_track())
				.map(|num| {
					let isrc = cdio.isrc(num);
					if isrc.is_none() { log::warn!("No ISRC found for track #{num}."); }
					isrc
				})
				.collect()
		}
		else { Vec::new() };

	Ok(Populated::new(toc, mcn, isrcs))
}

#[cfg(not(feature = "cdio"))]
/// # Read Device.
///
/// Drive access requires the `cdio` crate feature.
const fn read_device(_dev: &str, _flags: u8) -> Result<Populated, DiscIdError> {
	Err(DiscIdError::Unsupported)
}



#[cfg(test)]
mod test {
	use super::*;

	/// # DiscID.
	const ID: &str = "Wn8eRBtfLDfM0qjYPdxrz.Zjs_U-";

	/// # Offsets.
	const OFFSETS: [u32; 10] = [
		150, 18_901, 39_738, 59_557, 79_152,
		100_126, 124_833, 147_278, 166_336, 182_560,
	];

	/// # Lengths.
	const LENGTHS: [u32; 10] = [
		18_751, 20_837, 19_819, 19_595, 20_974,
		24_707, 22_445, 19_058, 16_224, 23_975,
	];

	/// # Assert Unread.
	fn assert_unread(disc: &Disc) {
		assert!(! disc.is_read(), "Disc should be unread.");
		assert_eq!(disc.id(), None);
		assert_eq!(disc.to_string(), "");
		assert_eq!(disc.freedb_id(), None);
		assert_eq!(disc.submission_url(), None);
		assert_eq!(disc.webservice_url(), None);
		assert_eq!(disc.toc_string(), None);
		assert_eq!(disc.first_track_num(), None);
		assert_eq!(disc.last_track_num(), None);
		assert_eq!(disc.sectors(), None);
		assert_eq!(disc.mcn(), None);
		assert_eq!(disc.isrc(1), None);
		assert!(disc.tracks().is_none(), "Unread discs should not have tracks.");
	}

	#[test]
	fn t_put() {
		let mut disc = Disc::new();
		assert_unread(&disc);

		// Bad first track.
		assert_eq!(
			disc.put(0, 206_535, &OFFSETS),
			Err(DiscIdError::FirstTrack(0)),
		);
		assert_unread(&disc);

		// Good.
		disc.put(1, 206_535, &OFFSETS).expect("Put failed.");
		assert!(disc.is_read(), "Disc should be read.");
		assert_eq!(disc.id(), Some(ID));
		assert_eq!(disc.to_string(), ID);
		assert_eq!(disc.freedb_id(), Some("830abf0a"));
		assert_eq!(disc.first_track_num(), Some(1));
		assert_eq!(disc.last_track_num(), Some(10));
		assert_eq!(disc.sectors(), Some(206_535));
		assert_eq!(disc.seconds(), Some(2754));
		assert_eq!(disc.device(), None, "Put discs have no device.");

		let tracks: Vec<_> = disc.tracks().expect("Missing tracks.").collect();
		assert_eq!(
			tracks.iter().map(|t| t.offset()).collect::<Vec<_>>(),
			OFFSETS,
		);
		assert_eq!(
			tracks.iter().map(|t| t.length()).collect::<Vec<_>>(),
			LENGTHS,
		);

		// Too many tracks; the previous answer should be cleared.
		assert_eq!(
			disc.put(1, 206_535, &[1; 100]),
			Err(DiscIdError::Capacity(100)),
		);
		assert_unread(&disc);

		// And a good put works again after that.
		disc.put(1, 206_535, &OFFSETS).expect("Put failed.");
		assert_eq!(disc.id(), Some(ID));
	}

	#[test]
	fn t_put_idempotent() {
		let mut disc = Disc::from_toc(1, 206_535, &OFFSETS).expect("Put failed.");
		let before = disc.clone();
		disc.put(1, 206_535, &OFFSETS).expect("Put failed.");
		assert_eq!(disc, before, "Putting the same TOC twice changed something.");
	}

	#[test]
	fn t_parse() {
		let disc = Disc::from_toc(1, 206_535, &OFFSETS).expect("Put failed.");
		let toc = disc.toc_string().expect("Missing TOC string.");
		assert_eq!(
			toc,
			"1 10 206535 150 18901 39738 59557 79152 100126 124833 147278 166336 182560",
		);

		// Feeding the TOC string back in should give the same result.
		let disc2: Disc = toc.parse().expect("Parse failed.");
		assert_eq!(disc, disc2);

		// Bad strings clear the state.
		let mut disc3 = disc2.clone();
		assert_eq!(disc3.parse("1 3 1000 150 300"), Err(DiscIdError::TocCount));
		assert_unread(&disc3);
	}

	#[test]
	fn t_urls() {
		let disc = Disc::from_toc(1, 206_535, &OFFSETS).expect("Put failed.");
		let toc = disc.toc().expect("Missing TOC.");
		assert_eq!(disc.submission_url(), Some(toc.submission_url().as_str()));
		assert_eq!(disc.webservice_url(), Some(toc.webservice_url().as_str()));
		assert!(
			disc.submission_url().is_some_and(|v| v.contains(ID)),
			"Submission URL should contain the ID.",
		);
	}

	#[cfg(not(feature = "cdio"))]
	#[test]
	fn t_read_unsupported() {
		let mut disc = Disc::from_toc(1, 206_535, &OFFSETS).expect("Put failed.");
		assert_eq!(
			disc.read(None, &[Feature::Read, Feature::Mcn]),
			Err(DiscIdError::Unsupported),
		);
		assert_unread(&disc);
		assert_eq!(disc.device(), None);

		assert_eq!(
			Disc::from_device(Some("/dev/cdrom"), &[]),
			Err(DiscIdError::Unsupported),
		);
	}

	#[test]
	fn t_serialize() {
		let disc = Disc::new();
		assert_eq!(serde_json::to_string(&disc).expect("Serialize failed."), "null");

		let disc = Disc::from_toc(3, 100_000, &[150, 30_000, 60_000]).expect("Put failed.");
		let json = serde_json::to_value(&disc).expect("Serialize failed.");
		assert_eq!(json["id"], "LvQ.gixpR2IwKGv3uDiHLoPsO18-");
		assert_eq!(json["freedb_id"], "0e053303");
		assert_eq!(json["toc"], "3 5 100000 150 30000 60000");
		assert_eq!(json["first_track"], 3);
		assert_eq!(json["last_track"], 5);
		assert_eq!(json["sectors"], 100_000);
		assert_eq!(json["seconds"], 1333);
		assert_eq!(
			json["submission_url"],
			"https://musicbrainz.org/cdtoc/attach?id=LvQ.gixpR2IwKGv3uDiHLoPsO18-&tracks=5&toc=3+5+100000+150+30000+60000",
		);
		assert_eq!(
			json["webservice_url"],
			"https://musicbrainz.org/ws/2/discid/LvQ.gixpR2IwKGv3uDiHLoPsO18-?toc=3+5+100000+150+30000+60000",
		);
		assert!(json["mcn"].is_null(), "MCN should be null.");
		assert!(json["device"].is_null(), "Device should be null.");
		assert_eq!(json["tracks"][2]["number"], 5);
		assert_eq!(json["tracks"][2]["length"], 40_000);
	}
}
