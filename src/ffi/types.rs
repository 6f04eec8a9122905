//! FFI-safe type definitions for ALICE-BIND
//!
//! These types are passed across the C boundary unchanged.
//!
//! Author: ALICE-BIND contributors

use std::ffi::c_void;

use crate::error::BindError;

/// Opaque handle to an `AdultPerson`
///
/// The record lives in a global registry; the handle is its registry id.
pub type PersonHandle = *mut c_void;

/// Null person handle
pub const PERSON_HANDLE_NULL: PersonHandle = std::ptr::null_mut();

/// Status codes returned by fallible FFI calls
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindStatus {
    /// Operation succeeded
    Ok = 0,
    /// Unknown or freed handle
    InvalidHandle = 1,
    /// Null pointer provided
    NullPointer = 2,
    /// Argument rejected by validation (e.g. age below 18)
    InvalidParameter = 3,
    /// Integer overflow
    Overflow = 4,
    /// Callback reported failure
    CallbackFailed = 5,
    /// Output buffer too small
    BufferTooSmall = 6,
    /// Text was not valid UTF-8 or contained NUL
    InvalidString = 7,
    /// Unknown error
    Unknown = 99,
}

impl From<&BindError> for BindStatus {
    fn from(e: &BindError) -> Self {
        match e {
            BindError::TooYoung { .. } => BindStatus::InvalidParameter,
            BindError::Overflow(_) => BindStatus::Overflow,
            BindError::Callback(_) => BindStatus::CallbackFailed,
            _ => BindStatus::Unknown,
        }
    }
}

/// Callback invoked by `alice_bind_call_callback`
///
/// Receives the count `n`, an output buffer of `capacity` doubles and the
/// caller's `user_data`. Returns the number of values written, or a negative
/// number to signal failure.
pub type CountCallback =
    extern "C" fn(n: usize, out: *mut f64, capacity: usize, user_data: *mut c_void) -> isize;

/// Library version
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionInfo {
    /// Major
    pub major: u16,
    /// Minor
    pub minor: u16,
    /// Patch
    pub patch: u16,
}

impl VersionInfo {
    /// Version of this build
    pub fn current() -> Self {
        let mut parts = crate::VERSION.split('.').map(|p| p.parse::<u16>().unwrap_or(0));
        Self {
            major: parts.next().unwrap_or(0),
            minor: parts.next().unwrap_or(0),
            patch: parts.next().unwrap_or(0),
        }
    }
}
