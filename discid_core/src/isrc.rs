/*!
# Disc ID: ISRC
*/

use crate::DiscIdError;
use serde::{
	Serialize,
	Serializer,
};
use std::fmt;
use trimothy::TrimSliceMatches;



#[derive(Debug, Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// # ISRC.
///
/// An International Standard Recording Code, stored as its twelve normalized
/// ASCII characters: a two-letter country code, a three-character registrant
/// code, a two-digit year, and a five-digit designation.
///
/// Hyphens and surrounding whitespace are stripped during parsing, and
/// letters are uppercased, so `us-s1z-99-00001` and `USS1Z9900001` are the
/// same thing.
pub struct Isrc([u8; 12]);

impl AsRef<str> for Isrc {
	#[inline]
	fn as_ref(&self) -> &str { self.as_str() }
}

impl fmt::Display for Isrc {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		<str as fmt::Display>::fmt(self.as_str(), f)
	}
}

impl Serialize for Isrc {
	#[inline]
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

impl TryFrom<&[u8]> for Isrc {
	type Error = DiscIdError;

	fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
		// Drives like to pad with whitespace or nulls.
		let src = src.trim_matches(|b| b.is_ascii_whitespace() || b == 0);

		// Copy everything but the hyphens, uppercasing as we go.
		let mut out = [0_u8; 12];
		let mut len = 0;
		for b in src.iter().copied().filter(|b| b'-'.ne(b)) {
			if len == 12 { return Err(DiscIdError::Isrc); }
			out[len] = b.to_ascii_uppercase();
			len += 1;
		}

		if
			len == 12 &&
			out[..2].iter().all(u8::is_ascii_uppercase) &&
			out[2..5].iter().all(u8::is_ascii_alphanumeric) &&
			out[5..].iter().all(u8::is_ascii_digit)
		{
			Ok(Self(out))
		}
		else { Err(DiscIdError::Isrc) }
	}
}

impl TryFrom<&str> for Isrc {
	type Error = DiscIdError;

	#[inline]
	fn try_from(src: &str) -> Result<Self, Self::Error> {
		Self::try_from(src.as_bytes())
	}
}

impl Isrc {
	#[allow(unsafe_code)]
	#[must_use]
	/// # As Str.
	pub const fn as_str(&self) -> &str {
		// Safety: all values are validated ASCII.
		unsafe { std::str::from_utf8_unchecked(self.0.as_slice()) }
	}

	#[must_use]
	/// # Country Code.
	pub fn country(&self) -> &str { &self.as_str()[..2] }

	#[must_use]
	/// # Pretty.
	///
	/// Return the code in its hyphenated display form, e.g.
	/// `US-S1Z-99-00001`.
	pub fn pretty(&self) -> String {
		let s = self.as_str();
		format!("{}-{}-{}-{}", &s[..2], &s[2..5], &s[5..7], &s[7..])
	}
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_isrc() {
		for raw in [
			"USS1Z9900001",
			"us-s1z-99-00001",
			" USS1Z9900001\0\0",
			"US-S1Z-9900001",
		] {
			let isrc = Isrc::try_from(raw).expect("ISRC failed.");
			assert_eq!(isrc.as_str(), "USS1Z9900001", "Wrong normalization for {raw:?}.");
			assert_eq!(isrc.country(), "US");
			assert_eq!(isrc.pretty(), "US-S1Z-99-00001");
		}
	}

	#[test]
	fn t_isrc_bad() {
		for raw in [
			"",
			"000000000000",
			"USS1Z990000",
			"USS1Z99000011",
			"1SS1Z9900001",
			"USS1Z99A0001",
			"US S1Z9900001",
		] {
			assert_eq!(Isrc::try_from(raw), Err(DiscIdError::Isrc), "Expected error for {raw:?}.");
		}
	}
}
