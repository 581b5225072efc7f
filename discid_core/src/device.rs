/*!
# Disc ID: Device Features
*/

use crate::DiscIdError;
use std::{
	fmt,
	str::FromStr,
};



#[cfg(target_os = "linux")]
/// # Fallback Device.
const FALLBACK_DEVICE: &str = "/dev/cdrom";

#[cfg(target_os = "macos")]
/// # Fallback Device.
const FALLBACK_DEVICE: &str = "1";

#[cfg(target_os = "windows")]
/// # Fallback Device.
const FALLBACK_DEVICE: &str = "D:";

#[cfg(any(target_os = "freebsd", target_os = "dragonfly"))]
/// # Fallback Device.
const FALLBACK_DEVICE: &str = "/dev/cd0";

#[cfg(any(target_os = "netbsd", target_os = "openbsd"))]
/// # Fallback Device.
const FALLBACK_DEVICE: &str = "/dev/cd0d";

#[cfg(not(any(
	target_os = "linux",
	target_os = "macos",
	target_os = "windows",
	target_os = "freebsd",
	target_os = "dragonfly",
	target_os = "netbsd",
	target_os = "openbsd",
)))]
/// # Fallback Device.
const FALLBACK_DEVICE: &str = "/dev/cdrom";



#[derive(Debug, Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// # Read Feature.
///
/// The things that can be asked of a drive. Reading the table of contents is
/// always implied; the others cost extra time and are opt-in.
pub enum Feature {
	/// # Table of Contents.
	Read,

	/// # Media Catalogue Number.
	Mcn,

	/// # Track ISRCs.
	Isrc,
}

impl fmt::Display for Feature {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		<str as fmt::Display>::fmt(self.as_str(), f)
	}
}

impl FromStr for Feature {
	type Err = DiscIdError;

	fn from_str(src: &str) -> Result<Self, Self::Err> {
		let src = src.trim();
		if src.eq_ignore_ascii_case("read") { Ok(Self::Read) }
		else if src.eq_ignore_ascii_case("mcn") { Ok(Self::Mcn) }
		else if src.eq_ignore_ascii_case("isrc") { Ok(Self::Isrc) }
		else { Err(DiscIdError::Feature(src.to_owned())) }
	}
}

impl Feature {
	/// # All Features.
	pub const ALL: [Self; 3] = [Self::Read, Self::Mcn, Self::Isrc];

	#[must_use]
	/// # As Str.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Read => "read",
			Self::Mcn => "mcn",
			Self::Isrc => "isrc",
		}
	}

	#[must_use]
	/// # As Flag.
	pub const fn as_flag(self) -> u8 {
		match self {
			Self::Read => 0b0001,
			Self::Mcn => 0b0010,
			Self::Isrc => 0b0100,
		}
	}

	#[must_use]
	/// # Flags.
	///
	/// Combine a set of features into a single bitflag, ignoring anything
	/// this build doesn't support.
	///
	/// ```
	/// use discid_core::Feature;
	///
	/// let flags = Feature::flags(&[Feature::Read, Feature::Isrc]);
	/// if discid_core::has_feature(Feature::Isrc) { assert_eq!(flags, 0b0101); }
	/// else { assert_eq!(flags, 0); }
	/// ```
	pub fn flags(set: &[Self]) -> u8 {
		set.iter()
			.copied()
			.filter(|f| has_feature(*f))
			.fold(0, |acc, f| acc | f.as_flag())
	}

	#[must_use]
	/// # Flag Set?
	pub const fn in_flags(self, flags: u8) -> bool {
		let flag = self.as_flag();
		flags & flag == flag
	}
}



#[must_use]
/// # Default Device.
///
/// Return the device path `libcdio` would pick on its own, or (if that comes
/// up empty, or drive support is disabled) the usual path for the platform.
pub fn default_device() -> String {
	#[cfg(feature = "cdio")]
	if let Some(dev) = crate::LibcdioInstance::default_device() { return dev; }

	FALLBACK_DEVICE.to_owned()
}

#[must_use]
/// # Has Feature?
///
/// Drive features are only available when the crate is built with its
/// `cdio` feature; without it, discs can only be identified from TOCs
/// supplied by the caller.
pub const fn has_feature(feature: Feature) -> bool {
	match feature {
		Feature::Read | Feature::Mcn | Feature::Isrc => cfg!(feature = "cdio"),
	}
}

/// # Supported Features.
///
/// Return an iterator over the features this build supports.
pub fn features() -> impl Iterator<Item=Feature> {
	Feature::ALL.into_iter().filter(|f| has_feature(*f))
}

#[must_use]
/// # Version String.
///
/// Return the library name and version, along with the drive backend, if
/// any, e.g. `discid_core v0.1.0 (libcdio)`.
pub const fn version_string() -> &'static str {
	if cfg!(feature = "cdio") {
		concat!("discid_core v", env!("CARGO_PKG_VERSION"), " (libcdio)")
	}
	else {
		concat!("discid_core v", env!("CARGO_PKG_VERSION"))
	}
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_parse() {
		assert_eq!("read".parse::<Feature>(), Ok(Feature::Read));
		assert_eq!(" MCN".parse::<Feature>(), Ok(Feature::Mcn));
		assert_eq!("Isrc".parse::<Feature>(), Ok(Feature::Isrc));
		assert_eq!(
			"fake".parse::<Feature>(),
			Err(DiscIdError::Feature("fake".to_owned())),
		);

		for f in Feature::ALL {
			assert_eq!(f.as_str().parse::<Feature>(), Ok(f), "Feature didn't round-trip.");
		}
	}

	#[test]
	fn t_flags() {
		assert_eq!(Feature::flags(&[]), 0, "No features, no flags.");

		// Unknown names get dropped before they get this far.
		let set: Vec<Feature> = ["read", "fake"].into_iter()
			.filter_map(|v| v.parse().ok())
			.collect();
		assert_eq!(set, [Feature::Read]);

		let flags = Feature::flags(&Feature::ALL);
		for f in Feature::ALL {
			assert_eq!(f.in_flags(flags), has_feature(f), "Unsupported features should be dropped.");
		}

		assert!(Feature::Mcn.in_flags(0b0011));
		assert!(! Feature::Isrc.in_flags(0b0011));
	}

	#[test]
	fn t_has_feature() {
		assert_eq!(has_feature(Feature::Read), cfg!(feature = "cdio"));
		assert_eq!(features().count(), if cfg!(feature = "cdio") { 3 } else { 0 });
	}

	#[test]
	fn t_default_device() {
		assert!(! default_device().is_empty(), "Default device should never be empty.");
		assert!(version_string().starts_with("discid_core v"));
	}
}
