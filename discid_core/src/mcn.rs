/*!
# Disc ID: Media Catalogue Number
*/

use crate::DiscIdError;
use serde::{
	Serialize,
	Serializer,
};
use std::fmt;
use trimothy::TrimSliceMatches;



#[derive(Debug, Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// # Media Catalogue Number.
///
/// This is the UPC/EAN barcode a disc was pressed with, stored as thirteen
/// ASCII digits. Twelve-digit UPCs are zero-padded on the left.
///
/// Drives report whatever was written to the subchannel, and plenty of
/// pressings have bad check digits, so the checksum is exposed via
/// [`Mcn::is_valid_ean`] rather than enforced. An all-zero value, which is
/// what drives return when there isn't an MCN, is rejected.
pub struct Mcn([u8; 13]);

impl AsRef<str> for Mcn {
	#[inline]
	fn as_ref(&self) -> &str { self.as_str() }
}

impl fmt::Display for Mcn {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		<str as fmt::Display>::fmt(self.as_str(), f)
	}
}

impl Serialize for Mcn {
	#[inline]
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

impl TryFrom<&[u8]> for Mcn {
	type Error = DiscIdError;

	fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
		// Remove whitespace and trailing nulls.
		let src = src.trim_start_matches(|b| b.is_ascii_whitespace());
		let src = src.trim_end_matches(|b| b.is_ascii_whitespace() || b == 0);

		// UPC-A or EAN-13, nothing else.
		if ! (12..=13).contains(&src.len()) || ! src.iter().all(u8::is_ascii_digit) {
			return Err(DiscIdError::Mcn);
		}

		// Move the data into place, zero-padding the left as needed so that it
		// occupies thirteen bytes.
		let mut out = [b'0'; 13];
		out[13 - src.len()..].copy_from_slice(src);

		if out.iter().all(|b| b'0'.eq(b)) { Err(DiscIdError::Mcn) }
		else { Ok(Self(out)) }
	}
}

impl TryFrom<&str> for Mcn {
	type Error = DiscIdError;

	#[inline]
	fn try_from(src: &str) -> Result<Self, Self::Error> {
		Self::try_from(src.as_bytes())
	}
}

impl Mcn {
	#[allow(unsafe_code)]
	#[must_use]
	/// # As Str.
	pub const fn as_str(&self) -> &str {
		// Safety: all values are ASCII digits.
		unsafe { std::str::from_utf8_unchecked(self.0.as_slice()) }
	}

	#[must_use]
	/// # Valid EAN-13?
	///
	/// Returns `true` if the check digit is correct.
	pub fn is_valid_ean(&self) -> bool { is_ean13(&self.0) }

	#[must_use]
	/// # Pretty.
	///
	/// Return the number hyphenated like a UPC (if it begins with a zero) or
	/// an EAN, e.g. `0-18861-00652-9` or `9-332727-016318`.
	pub fn pretty(&self) -> String {
		let s = self.as_str();
		if self.0[0] == b'0' {
			format!("{}-{}-{}-{}", &s[1..2], &s[2..7], &s[7..12], &s[12..])
		}
		else {
			format!("{}-{}-{}", &s[..1], &s[1..7], &s[7..])
		}
	}
}



/// # Is EAN13?
fn is_ean13(src: &[u8; 13]) -> bool {
	let mut chk = 0;
	let mut total = 0;
	let mut k = 13;
	for num in src.iter().copied().rev() {
		k -= 1;

		// Convert ASCII to decimal. (TryFrom verifies all values are digits.)
		let num = num ^ b'0';

		// The last entry (the first we're checking) is the check digit.
		if k == 12 {
			if num == 0 { chk = 10; }
			else { chk = num; }
		}
		// Everything else goes into the total.
		else { total += ((k % 2) * 2 + 1) * num; }
	}

	10 - (total % 10) == chk
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_mcn() {
		for (raw, expected, valid) in [
			("0008811126827", "0008811126827", true),
			("018861006529", "0018861006529", true),
			("  0042282848420\0", "0042282848420", true),
			("0089218545555", "0089218545555", false),
			("0732455829921", "0732455829921", false),
			("5099997200628", "5099997200628", true),
			("9332727016318", "9332727016318", true),
		] {
			let mcn = Mcn::try_from(raw).expect("MCN failed.");
			assert_eq!(mcn.as_str(), expected, "Wrong MCN for {raw:?}.");
			assert_eq!(mcn.is_valid_ean(), valid, "Wrong checksum result for {raw:?}.");
		}

		let mcn = Mcn::try_from("9332727016318").expect("MCN failed.");
		assert_eq!(mcn.pretty(), "9-332727-016318");

		let mcn = Mcn::try_from("0018861006529").expect("MCN failed.");
		assert_eq!(mcn.pretty(), "0-18861-00652-9");
	}

	#[test]
	fn t_mcn_bad() {
		for raw in [
			"",
			"0000000000000",
			"000000000000",
			"12345678901",
			"12345678901234",
			"00188610065A9",
		] {
			assert_eq!(Mcn::try_from(raw), Err(DiscIdError::Mcn), "Expected error for {raw:?}.");
		}
	}
}
