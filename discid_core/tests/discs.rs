/*!
# Disc ID: Integration Tests
*/

use discid_core::{
	Disc,
	DiscIdError,
	ErrorKind,
	Feature,
	MAX_TRACKS,
	Toc,
};



/// # Known Discs.
///
/// TOC string, MusicBrainz ID, FreeDB ID.
const DISCS: [(&str, &str, &str); 3] = [
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
];



#[test]
fn t_known_discs() {
	for (toc, id, freedb) in DISCS {
		let disc = Disc::from_toc_str(toc).expect("Disc failed.");
		assert_eq!(disc.id(), Some(id), "Wrong DiscID for {toc}.");
		assert_eq!(disc.freedb_id(), Some(freedb), "Wrong FreeDB ID for {toc}.");
		assert_eq!(disc.toc_string().as_deref(), Some(toc), "TOC didn't round-trip.");

		// The submission URL carries both the ID and the TOC.
		let url = disc.submission_url().expect("Missing submission URL.");
		assert!(url.starts_with(discid_core::SUBMISSION_URL), "Wrong URL base.");
		assert!(url.contains(&format!("id={id}")), "URL is missing the ID.");
		assert!(url.ends_with(&toc.replace(' ', "+")), "URL is missing the TOC.");

		// Building from parts should agree with parsing.
		let parsed: Toc = toc.parse().expect("TOC failed.");
		let disc2 = Disc::from_toc(parsed.first_track(), parsed.sectors(), parsed.offsets())
			.expect("Disc failed.");
		assert_eq!(disc, disc2, "Put and parse disagree.");
	}
}

#[test]
fn t_track_consistency() {
	for (toc, _, _) in DISCS {
		let disc = Disc::from_toc_str(toc).expect("Disc failed.");
		let first = disc.first_track_num().expect("Missing first track.");
		let last = disc.last_track_num().expect("Missing last track.");
		let sectors = disc.sectors().expect("Missing sectors.");

		let tracks: Vec<_> = disc.tracks().expect("Missing tracks.").collect();
		assert_eq!(tracks.len(), usize::from(last - first + 1), "Wrong track count.");
		assert_eq!(tracks[0].number(), first);
		assert_eq!(tracks[tracks.len() - 1].number(), last);
		assert_eq!(tracks[tracks.len() - 1].end(), sectors, "Tracks should end at the leadout.");
		assert_eq!(
			tracks.iter().map(|t| t.length()).sum::<u32>(),
			sectors - tracks[0].offset(),
			"Track lengths should cover the disc.",
		);
	}
}

#[test]
fn t_capacity() {
	// Ninety-nine is fine, and fills every slot.
	let offsets: Vec<u32> = (0..99).map(|n| 150 + n * 1000).collect();
	let disc = Disc::from_toc(1, 200_000, &offsets).expect("99 tracks failed.");
	assert_eq!(disc.last_track_num(), Some(MAX_TRACKS));
	assert_eq!(disc.id(), Some("gKc1sPpGCN90LbrYXMoM.ZTWRCc-"));
	assert_eq!(disc.freedb_id(), Some("1e0a6863"));

	// One hundred is not.
	let offsets: Vec<u32> = (0..100).map(|n| 150 + n * 1000).collect();
	let err = Disc::from_toc(1, 200_000, &offsets).expect_err("100 tracks should fail.");
	assert_eq!(err, DiscIdError::Capacity(100));
	assert_eq!(err.kind(), ErrorKind::Capacity);
}

#[test]
fn t_bad_input() {
	for toc in [
		"",
		"hello",
		"1 2 100000 150",
		"1 1 100000 150000",
		"0 1 100000 150",
		"1 2 100000 30000 150",
	] {
		let err = Disc::from_toc_str(toc).expect_err("Bad TOC should fail.");
		assert_eq!(err.kind(), ErrorKind::Argument, "Wrong error kind for {toc:?}.");
	}
}

#[test]
fn t_device() {
	assert!(! discid_core::default_device().is_empty(), "Missing default device.");

	// Without drive support, reads fail cleanly.
	if ! discid_core::has_feature(Feature::Read) {
		let mut disc = Disc::from_toc_str(DISCS[0].0).expect("Disc failed.");
		let err = disc.read(Some(""), &[Feature::Isrc]).expect_err("Read should fail.");
		assert_eq!(err, DiscIdError::Unsupported);
		assert_eq!(err.kind(), ErrorKind::Device);
		assert!(! disc.is_read(), "Failed reads should clear the disc.");
	}
}
