/*!
# Disc ID: `libcdio` Wrappers
*/

use crate::{
	CD_EXTRA_GAP,
	CD_LEADIN,
	DiscIdError,
	Isrc,
	Mcn,
	Toc,
};
use libcdio_sys::{
	cdio_track_enums_CDIO_CDROM_LEADOUT_TRACK,
	cdtext_field_t,
	cdtext_field_t_CDTEXT_FIELD_ISRC,
	cdtext_field_t_CDTEXT_FIELD_UPC_EAN,
	discmode_t_CDIO_DISC_MODE_CD_DA,
	discmode_t_CDIO_DISC_MODE_CD_MIXED,
	discmode_t_CDIO_DISC_MODE_CD_XA,
	discmode_t_CDIO_DISC_MODE_ERROR,
	discmode_t_CDIO_DISC_MODE_NO_INFO,
	driver_id_t_DRIVER_DEVICE, // The equivalent of "use whatever's best".
	track_format_t_TRACK_FORMAT_AUDIO,
	track_format_t_TRACK_FORMAT_ERROR,
	track_format_t_TRACK_FORMAT_PSX,
};
use std::{
	ffi::{
		CStr,
		CString,
	},
	os::raw::c_char,
	path::Path,
	sync::Once,
};



static LIBCDIO_INIT: Once = Once::new();



#[derive(Debug)]
#[allow(dead_code)] // We just want to make sure dev lives as long as the ptr.
/// # CDIO Instance.
///
/// A connection to a single drive. It only lives as long as a read does;
/// the handle is released on drop.
pub(crate) struct LibcdioInstance {
	dev: Option<CString>,
	ptr: *mut libcdio_sys::CdIo_t,
	cdtext: Option<*mut libcdio_sys::cdtext_t>,
}

impl Drop for LibcdioInstance {
	#[allow(unsafe_code)]
	fn drop(&mut self) {
		// Release the C memory!
		if ! self.ptr.is_null() {
			unsafe { libcdio_sys::cdio_destroy(self.as_mut_ptr()); }
		}
	}
}

impl LibcdioInstance {
	#[allow(unsafe_code)]
	/// # New!
	///
	/// Initialize a new instance, optionally connecting to a specific device.
	///
	/// ## Errors
	///
	/// This will return an error if initialization fails, the provided
	/// device path is obviously wrong, or there's no audio disc in the drive.
	pub(crate) fn new(dev: Option<&str>) -> Result<Self, DiscIdError> {
		// Make sure the library has been initialized.
		init();

		// Take a look at the desired device. Paths should exist, but some
		// platforms use bare drive numbers or letters instead.
		let dev = match dev {
			Some(dev) => {
				let path = Path::new(dev);
				if path.is_absolute() && ! path.exists() {
					return Err(DiscIdError::Device(dev.to_owned()));
				}
				let dev = CString::new(dev)
					.map_err(|_| DiscIdError::Device(dev.to_owned()))?;
				Some(dev)
			},
			None => None,
		};

		// Connect to it.
		let ptr = unsafe {
			libcdio_sys::cdio_open(
				dev.as_ref().map_or_else(std::ptr::null, |v| v.as_ptr()),
				driver_id_t_DRIVER_DEVICE,
			)
		};

		// NULL is bad.
		if ptr.is_null() {
			Err(DiscIdError::DeviceOpen(dev.map(|v| v.to_string_lossy().into_owned())))
		}
		// Otherwise maybe!
		else {
			let mut out = Self {
				dev,
				ptr,
				cdtext: None,
			};

			out._check_disc_mode()?;
			out._init_cdtext();

			Ok(out)
		}
	}

	#[allow(unsafe_code)]
	/// # Default Device.
	///
	/// Ask `libcdio` which drive it would use if left to its own devices.
	pub(crate) fn default_device() -> Option<String> {
		init();

		let raw = unsafe {
			libcdio_sys::cdio_get_default_device(std::ptr::null())
		};
		let out = c_char_to_string(raw);
		if ! raw.is_null() {
			unsafe { libcdio_sys::cdio_free(raw.cast()); }
		}
		out
	}

	#[allow(unsafe_code)]
	#[allow(non_upper_case_globals)] // These aren't our globals.
	/// # Check Disc Mode.
	///
	/// This makes sure a disc with audio on it is actually present in the
	/// drive.
	///
	/// ## Errors
	///
	/// Returns an error if the disc is missing or unsupported.
	fn _check_disc_mode(&self) -> Result<(), DiscIdError> {
		let discmode = unsafe {
			libcdio_sys::cdio_get_discmode(self.as_mut_ptr())
		};
		match discmode {
			discmode_t_CDIO_DISC_MODE_CD_DA |
			discmode_t_CDIO_DISC_MODE_CD_MIXED |
			discmode_t_CDIO_DISC_MODE_CD_XA => Ok(()),
			discmode_t_CDIO_DISC_MODE_NO_INFO |
			discmode_t_CDIO_DISC_MODE_ERROR => Err(DiscIdError::NoDisc),
			_ => Err(DiscIdError::DiscMode),
		}
	}

	#[allow(unsafe_code)]
	/// # Initialize CDText.
	///
	/// This initializes (but does not parse) the CDText information contained
	/// on the disc, if any.
	///
	/// The data on the other end of this pointer gets cleaned up when the
	/// parent instance is destroyed, so it makes sense keeping them together.
	fn _init_cdtext(&mut self) {
		let ptr = unsafe {
			libcdio_sys::cdio_get_cdtext(self.as_mut_ptr())
		};
		if ! ptr.is_null() { self.cdtext.replace(ptr); }
	}
}

impl LibcdioInstance {
	/// # As Ptr.
	const fn as_ptr(&self) -> *const libcdio_sys::CdIo_t { self.ptr.cast() }

	/// # As Mut Ptr.
	const fn as_mut_ptr(&self) -> *mut libcdio_sys::CdIo_t { self.ptr }
}

impl LibcdioInstance {
	#[allow(unsafe_code)]
	/// # First Track Number.
	fn first_track_num(&self) -> Result<u8, DiscIdError> {
		let raw = unsafe {
			libcdio_sys::cdio_get_first_track_num(self.as_ptr())
		};

		if raw == 0 { Err(DiscIdError::FirstTrackNum) }
		else { Ok(raw) }
	}

	/// # Leadout.
	fn leadout_lba(&self) -> Result<u32, DiscIdError> {
		let idx = u8::try_from(cdio_track_enums_CDIO_CDROM_LEADOUT_TRACK)
			.unwrap_or(170);
		self.track_lba_start(idx)
	}

	#[allow(unsafe_code)]
	/// # Get the Number of Tracks.
	fn num_tracks(&self) -> Result<u8, DiscIdError> {
		let raw = unsafe {
			libcdio_sys::cdio_get_num_tracks(self.as_ptr())
		};

		if raw == 0 { Err(DiscIdError::NumTracks) }
		else { Ok(raw) }
	}

	#[allow(unsafe_code)]
	#[allow(non_upper_case_globals)] // Not our globals.
	/// # Track Format.
	///
	/// Returns `true` for audio, `false` for data, and an error for anything
	/// else.
	fn track_format(&self, idx: u8) -> Result<bool, DiscIdError> {
		let kind = unsafe {
			libcdio_sys::cdio_get_track_format(self.as_ptr(), idx)
		};

		match kind {
			track_format_t_TRACK_FORMAT_AUDIO => Ok(true),
			track_format_t_TRACK_FORMAT_PSX |
			track_format_t_TRACK_FORMAT_ERROR => Err(DiscIdError::TrackFormat(idx)),
			_ => Ok(false),
		}
	}

	#[allow(unsafe_code)]
	/// # Track LBA Start.
	///
	/// Drives report positions relative to the end of the lead-in; this
	/// adds it back.
	fn track_lba_start(&self, idx: u8) -> Result<u32, DiscIdError> {
		if idx == 0 { Err(DiscIdError::TrackLba(0)) }
		else {
			let raw = unsafe {
				libcdio_sys::cdio_get_track_lsn(self.as_ptr(), idx)
			};
			if raw < 0 { Err(DiscIdError::TrackLba(idx)) }
			else { Ok(raw.abs_diff(0) + CD_LEADIN) }
		}
	}

	/// # Table of Contents.
	///
	/// Build a [`Toc`] from the drive's answers.
	///
	/// Enhanced CDs end with a data track in a second session. That track is
	/// left off, and the audio leadout is placed the standard gap before it.
	///
	/// ## Errors
	///
	/// Returns a device error if the drive's answers are missing or
	/// nonsensical.
	pub(crate) fn toc(&self) -> Result<Toc, DiscIdError> {
		let (first, mut last) = Toc::drive_range(
			self.first_track_num()?,
			self.num_tracks()?,
		)?;

		let mut leadout = self.leadout_lba()?;
		if first < last && ! self.track_format(last)? {
			leadout = self.track_lba_start(last)?
				.checked_sub(CD_EXTRA_GAP)
				.ok_or(DiscIdError::TrackLba(last))?;
			last -= 1;
		}

		let offsets = (first..=last)
			.map(|idx| self.track_lba_start(idx))
			.collect::<Result<Vec<u32>, DiscIdError>>()?;

		Toc::from_drive(first, leadout, &offsets)
	}
}

impl LibcdioInstance {
	#[allow(unsafe_code)]
	/// # CDText Value.
	///
	/// Return the value associated with the CDText field, if any.
	///
	/// Set the track number to zero to query album-level metadata.
	fn cdtext(&self, idx: u8, field: cdtext_field_t) -> Option<String> {
		let ptr = self.cdtext?;
		let raw = unsafe {
			libcdio_sys::cdtext_get_const(ptr.cast(), field, idx)
		};

		c_char_to_string(raw)
	}

	/// # Track ISRC.
	///
	/// CDText is checked first, since we already have it. Otherwise the
	/// (relatively slow) subchannel query is used.
	pub(crate) fn isrc(&self, idx: u8) -> Option<Isrc> {
		self.cdtext(idx, cdtext_field_t_CDTEXT_FIELD_ISRC)
			.and_then(|v| Isrc::try_from(v.as_bytes()).ok())
			.or_else(|| self._isrc(idx))
	}

	#[allow(unsafe_code)]
	/// # ISRC Fallback.
	fn _isrc(&self, idx: u8) -> Option<Isrc> {
		let raw = unsafe {
			libcdio_sys::cdio_get_track_isrc(self.as_ptr(), idx)
		};
		if raw.is_null() { None }
		else {
			let isrc = unsafe { CStr::from_ptr(raw) }
				.to_str()
				.ok()
				.and_then(|v| Isrc::try_from(v).ok());
			unsafe { libcdio_sys::cdio_free(raw.cast()); }
			isrc
		}
	}

	/// # MCN.
	///
	/// This checks CDText before falling back to a direct query.
	pub(crate) fn mcn(&self) -> Option<Mcn> {
		// It probably isn't in CDText, but we already have it, so might as
		// well check there first.
		self.cdtext(0, cdtext_field_t_CDTEXT_FIELD_UPC_EAN)
			.and_then(|v| Mcn::try_from(v.as_bytes()).ok())
			// Otherwise try pulling it directly.
			.or_else(|| self._mcn())
	}

	#[allow(unsafe_code)]
	/// # MCN Fallback.
	///
	/// Try pulling MCN via `cdio_get_mcn` in cases where CDText fails.
	fn _mcn(&self) -> Option<Mcn> {
		let raw = unsafe {
			libcdio_sys::cdio_get_mcn(self.as_ptr())
		};
		if raw.is_null() { None }
		else {
			let mcn = unsafe { CStr::from_ptr(raw) }
				.to_str()
				.ok()
				.and_then(|v| Mcn::try_from(v).ok());
			unsafe { libcdio_sys::cdio_free(raw.cast()); }
			mcn
		}
	}
}



#[allow(unsafe_code)]
/// # Initialize `libcdio`.
fn init() {
	LIBCDIO_INIT.call_once(|| unsafe { libcdio_sys::cdio_init(); });
}

#[allow(unsafe_code)]
/// # Pointer to String.
///
/// Convert C-string pointers to a string, unless they're null.
fn c_char_to_string(ptr: *const c_char) -> Option<String> {
	if ptr.is_null() { None }
	else {
		unsafe { CStr::from_ptr(ptr) }
			.to_str()
			.ok()
			.map(|s| s.trim().to_owned())
			.filter(|s| ! s.is_empty())
	}
}
