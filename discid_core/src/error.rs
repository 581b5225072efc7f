/*!
# Disc ID: Errors
*/

use fyi_msg::Msg;
use std::{
	error::Error,
	fmt,
};



#[cfg(feature = "bin")]
/// # Help Text.
const HELP: &str = concat!(r"
Disc ID v", env!("CARGO_PKG_VERSION"), r#"
Compute MusicBrainz and FreeDB disc IDs for audio CDs.

USAGE:
    discid [OPTIONS] [DEVICE]

SOURCE:
    -d, --dev <PATH>  The device path for the optical drive containing the CD
                      of interest, like /dev/cdrom. A bare trailing argument
                      is treated the same way. [default: auto]
        --toc <TOC>   Skip the drive entirely and compute everything from a
                      table of contents instead, formatted like
                      "FIRST LAST LEADOUT OFFSET1 OFFSET2 …" (spaces or plus
                      signs between the numbers).

EXTRAS:
        --isrc        Also read the ISRC of each track (drive reads only).
        --mcn         Also read the media catalogue number (drive reads
                      only).

OUTPUT:
        --json        Print the results as JSON to STDOUT instead of the
                      usual summary table.

MISCELLANEOUS:
        --default-device
                      Print the platform's default device to STDOUT and exit.
        --features    Print the read features supported by this build to
                      STDOUT and exit.
    -h, --help        Print help information to STDOUT and exit.
    -v, --verbose     Print debug information to STDERR while working.
    -V, --version     Print version information to STDOUT and exit.
"#);



#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
/// # Error Kind.
///
/// A coarse classification of [`DiscIdError`], useful for callers who want to
/// e.g. retry device errors (after the user inserts a disc) but report bad
/// input straight away.
pub enum ErrorKind {
	/// # Device Problem.
	///
	/// The drive is missing, inaccessible, empty, or returned nonsense.
	Device,

	/// # Bad Input.
	///
	/// A caller-supplied table of contents was malformed.
	Argument,

	/// # Too Many Tracks.
	///
	/// The table of contents cannot be represented in the 99-track DiscID
	/// format.
	Capacity,

	#[cfg(feature = "bin")]
	/// # CLI.
	Cli,
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Errors.
pub enum DiscIdError {
	/// # Last track number exceeds 99.
	Capacity(usize),

	/// # Invalid device.
	Device(String),

	/// # Unable to open device.
	DeviceOpen(Option<String>),

	/// # Unsupported Disc.
	DiscMode,

	/// # Nonsensical TOC from the drive.
	DriveToc,

	/// # Unknown feature name.
	Feature(String),

	/// # Invalid first track number.
	FirstTrack(u8),

	/// # Unable to obtain first track number.
	FirstTrackNum,

	/// # Invalid last track number.
	LastTrack(u8),

	/// # Empty drive.
	NoDisc,

	/// # Invalid ISRC.
	Isrc,

	/// # Invalid MCN.
	Mcn,

	/// # No tracks.
	NoTracks,

	/// # Unable to obtain track count.
	NumTracks,

	/// # Invalid track offset (by track number).
	Offset(u8),

	/// # Invalid leadout.
	Sectors(u32),

	/// # Track count/offset count mismatch.
	TocCount,

	/// # Unparseable TOC string.
	TocParse,

	/// # Invalid/unsupported track format.
	TrackFormat(u8),

	/// # Invalid track LBA.
	TrackLba(u8),

	/// # No device support in this build.
	Unsupported,

	#[cfg(feature = "bin")]
	/// # Invalid CLI arg.
	CliArg(String),

	#[cfg(feature = "bin")]
	/// # CLI Parsing failure.
	CliParse(&'static str),

	#[cfg(feature = "bin")]
	/// # Print Help (Not an Error).
	PrintHelp,

	#[cfg(feature = "bin")]
	/// # Print Version (Not an Error).
	PrintVersion,
}

impl Error for DiscIdError {}

impl From<DiscIdError> for Msg {
	#[inline]
	fn from(src: DiscIdError) -> Self { Self::error(src.to_string()) }
}

impl fmt::Display for DiscIdError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Capacity(n) => write!(f, "Track numbers cannot exceed 99 (#{n})."),
			Self::Device(s) => write!(f, "Invalid device path {s}."),
			Self::DeviceOpen(s) =>
				if let Some(s) = s { write!(f, "Unable to open connection with {s}.") }
				else {
					f.write_str("Unable to open connection with default optical drive.")
				},
			Self::DiscMode => f.write_str("Missing or unsupported disc type."),
			Self::DriveToc => f.write_str("The drive reported an invalid table of contents."),
			Self::Feature(s) => write!(f, "Unknown feature {s:?}."),
			Self::FirstTrack(n) => write!(f, "Illegal first track number ({n})."),
			Self::FirstTrackNum => f.write_str("Unable to obtain the first track number."),
			Self::LastTrack(n) => write!(f, "Illegal last track number ({n})."),
			Self::Isrc => f.write_str("Invalid ISRC."),
			Self::Mcn => f.write_str("Invalid media catalogue number."),
			Self::NoDisc => f.write_str("No disc in drive."),
			Self::NoTracks => f.write_str("At least one track offset is required."),
			Self::NumTracks => f.write_str("Unable to obtain the number of tracks."),
			Self::Offset(n) => write!(f, "Illegal offset for track #{n}."),
			Self::Sectors(n) => write!(f, "Illegal leadout ({n})."),
			Self::TocCount => f.write_str("The number of track offsets does not match the track range."),
			Self::TocParse => f.write_str("Unable to parse the table of contents."),
			Self::TrackFormat(n) => write!(f, "Unsupported track type ({n})."),
			Self::TrackLba(n) => write!(f, "Unable to obtain LBA ({n})."),
			Self::Unsupported => f.write_str("Reading discs is not supported by this build."),

			#[cfg(feature = "bin")]
			Self::CliArg(s) => write!(f, "Invalid CLI option: {s}"),

			#[cfg(feature = "bin")]
			Self::CliParse(s) => write!(f, "Unable to parse {s}."),

			#[cfg(feature = "bin")]
			Self::PrintHelp => f.write_str(HELP),

			#[cfg(feature = "bin")]
			Self::PrintVersion => f.write_str(concat!("Disc ID v", env!("CARGO_PKG_VERSION"))),
		}
	}
}

impl DiscIdError {
	#[must_use]
	/// # Kind.
	///
	/// Return the general category of the error.
	pub const fn kind(&self) -> ErrorKind {
		match self {
			Self::Capacity(_) => ErrorKind::Capacity,

			Self::Device(_) |
			Self::DeviceOpen(_) |
			Self::DiscMode |
			Self::DriveToc |
			Self::FirstTrackNum |
			Self::NoDisc |
			Self::NumTracks |
			Self::TrackFormat(_) |
			Self::TrackLba(_) |
			Self::Unsupported => ErrorKind::Device,

			Self::Feature(_) |
			Self::FirstTrack(_) |
			Self::Isrc |
			Self::LastTrack(_) |
			Self::Mcn |
			Self::NoTracks |
			Self::Offset(_) |
			Self::Sectors(_) |
			Self::TocCount |
			Self::TocParse => ErrorKind::Argument,

			#[cfg(feature = "bin")]
			Self::CliArg(_) |
			Self::CliParse(_) |
			Self::PrintHelp |
			Self::PrintVersion => ErrorKind::Cli,
		}
	}
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_kind() {
		assert_eq!(DiscIdError::Capacity(100).kind(), ErrorKind::Capacity);
		assert_eq!(DiscIdError::NoDisc.kind(), ErrorKind::Device);
		assert_eq!(DiscIdError::Unsupported.kind(), ErrorKind::Device);
		assert_eq!(DiscIdError::DriveToc.kind(), ErrorKind::Device);
		assert_eq!(DiscIdError::FirstTrackNum.kind(), ErrorKind::Device);
		assert_eq!(DiscIdError::NumTracks.kind(), ErrorKind::Device);
		assert_eq!(DiscIdError::FirstTrack(0).kind(), ErrorKind::Argument);
		assert_eq!(DiscIdError::TocParse.kind(), ErrorKind::Argument);
	}

	#[test]
	fn t_display() {
		assert_eq!(
			DiscIdError::DeviceOpen(None).to_string(),
			"Unable to open connection with default optical drive.",
		);
		assert_eq!(
			DiscIdError::DeviceOpen(Some("/dev/sr1".to_owned())).to_string(),
			"Unable to open connection with /dev/sr1.",
		);
		assert_eq!(
			DiscIdError::Capacity(100).to_string(),
			"Track numbers cannot exceed 99 (#100).",
		);
	}
}
