//! FFI API for ALICE-BIND
//!
//! C-compatible entry points over the catalogue. Every function uses the
//! `extern "C"` calling convention.
//!
//! # Memory Management
//!
//! - Call `alice_bind_person_free()` for every person handle
//! - Call `alice_bind_free_string()` for every string returned by this API
//! - Strings returned by `alice_bind_color_name()` are static; do not free them
//!
//! Author: ALICE-BIND contributors

use super::registry::{register_person, remove_person, with_person};
use super::types::*;
use crate::attr::get_attribute;
use crate::color::Color;
use crate::functions;
use crate::person::AdultPerson;
use std::ffi::{c_char, c_void, CStr, CString};
use std::ptr;

fn to_c_string(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(s) => s.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

fn from_c_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(s) }.to_str().ok()
}

// ============================================================================
// Library Info
// ============================================================================

/// Get the library version
#[no_mangle]
pub extern "C" fn alice_bind_version() -> VersionInfo {
    VersionInfo::current()
}

// ============================================================================
// Basic
// ============================================================================

/// Print `Hello, world`
#[no_mangle]
pub extern "C" fn alice_bind_hello_world() {
    functions::hello_world();
}

/// `Hello, <name>!` (caller must free with alice_bind_free_string; null on bad input)
#[no_mangle]
pub extern "C" fn alice_bind_greet(name: *const c_char) -> *mut c_char {
    match from_c_str(name) {
        Some(name) => to_c_string(functions::greet(name)),
        None => ptr::null_mut(),
    }
}

/// Integer sum written to `out`; C has no default arguments, pass 0 for `b`
#[no_mangle]
pub extern "C" fn alice_bind_add_int(a: i64, b: i64, out: *mut i64) -> BindStatus {
    if out.is_null() {
        return BindStatus::NullPointer;
    }
    match functions::add_int(a, b) {
        Ok(sum) => {
            unsafe { *out = sum };
            BindStatus::Ok
        }
        Err(e) => BindStatus::from(&e),
    }
}

/// Real sum
#[no_mangle]
pub extern "C" fn alice_bind_add_float(a: f64, b: f64) -> f64 {
    functions::add_float(a, b)
}

// ============================================================================
// Containers
// ============================================================================

/// Write `n` zeros into `out` (capacity `capacity`)
#[no_mangle]
pub extern "C" fn alice_bind_get_n_zeros(n: usize, out: *mut f64, capacity: usize) -> BindStatus {
    if out.is_null() {
        return BindStatus::NullPointer;
    }
    if capacity < n {
        return BindStatus::BufferTooSmall;
    }
    let zeros = functions::get_n_zeros(n);
    unsafe { ptr::copy_nonoverlapping(zeros.as_ptr(), out, zeros.len()) };
    BindStatus::Ok
}

/// Look up `key` in the fixed map; `InvalidParameter` when absent
#[no_mangle]
pub extern "C" fn alice_bind_get_map_value(key: *const c_char, out: *mut usize) -> BindStatus {
    if key.is_null() || out.is_null() {
        return BindStatus::NullPointer;
    }
    let Some(key) = from_c_str(key) else {
        return BindStatus::InvalidString;
    };
    match functions::get_map().get(key) {
        Some(&v) => {
            unsafe { *out = v };
            BindStatus::Ok
        }
        None => BindStatus::InvalidParameter,
    }
}

// ============================================================================
// AdultPerson
// ============================================================================

/// Create a person record (age stored as given); null on bad name
#[no_mangle]
pub extern "C" fn alice_bind_person_new(age: usize, name: *const c_char) -> PersonHandle {
    match from_c_str(name) {
        Some(name) => register_person(AdultPerson::new(age, name)),
        None => PERSON_HANDLE_NULL,
    }
}

/// Read the age into `out`
#[no_mangle]
pub extern "C" fn alice_bind_person_get_age(handle: PersonHandle, out: *mut usize) -> BindStatus {
    if out.is_null() {
        return BindStatus::NullPointer;
    }
    match with_person(handle, |p| p.age()) {
        Some(age) => {
            unsafe { *out = age };
            BindStatus::Ok
        }
        None => BindStatus::InvalidHandle,
    }
}

/// Set the age; `InvalidParameter` below 18 (record unchanged)
#[no_mangle]
pub extern "C" fn alice_bind_person_set_age(handle: PersonHandle, age: usize) -> BindStatus {
    match with_person(handle, |p| p.set_age(age)) {
        Some(Ok(())) => BindStatus::Ok,
        Some(Err(e)) => BindStatus::from(&e),
        None => BindStatus::InvalidHandle,
    }
}

/// Name (caller must free with alice_bind_free_string)
#[no_mangle]
pub extern "C" fn alice_bind_person_get_name(handle: PersonHandle) -> *mut c_char {
    with_person(handle, |p| p.name().to_string()).map_or(ptr::null_mut(), to_c_string)
}

/// `AdultPerson(age=.., name=..)` (caller must free with alice_bind_free_string)
#[no_mangle]
pub extern "C" fn alice_bind_person_describe(handle: PersonHandle) -> *mut c_char {
    with_person(handle, |p| p.describe()).map_or(ptr::null_mut(), to_c_string)
}

/// Attribute by name, rendered as text; null when the attribute does not exist
#[no_mangle]
pub extern "C" fn alice_bind_person_get_attr(
    handle: PersonHandle,
    attr: *const c_char,
) -> *mut c_char {
    let Some(attr) = from_c_str(attr) else {
        return ptr::null_mut();
    };
    match with_person(handle, |p| get_attribute(&*p, attr)) {
        Some(Ok(value)) => to_c_string(value.to_string()),
        _ => ptr::null_mut(),
    }
}

/// Print a greeting; pass null for the generic `Hello!`
#[no_mangle]
pub extern "C" fn alice_bind_person_greet(name: *const c_char) {
    AdultPerson::greet(from_c_str(name));
}

/// Free a person handle
#[no_mangle]
pub extern "C" fn alice_bind_person_free(handle: PersonHandle) {
    remove_person(handle);
}

// ============================================================================
// Color
// ============================================================================

/// Member name for a colour value (static string, null when out of range)
#[no_mangle]
pub extern "C" fn alice_bind_color_name(value: i64) -> *const c_char {
    match Color::from_value(value) {
        Some(Color::Black) => c"BLACK".as_ptr(),
        Some(Color::White) => c"WHITE".as_ptr(),
        None => ptr::null(),
    }
}

// ============================================================================
// Functional
// ============================================================================

/// Invoke `callback(n, ...)` exactly once, writing its values into `out`
///
/// The number of values produced is stored in `out_len`.
#[no_mangle]
pub extern "C" fn alice_bind_call_callback(
    callback: Option<CountCallback>,
    n: usize,
    out: *mut f64,
    capacity: usize,
    user_data: *mut c_void,
    out_len: *mut usize,
) -> BindStatus {
    let Some(callback) = callback else {
        return BindStatus::NullPointer;
    };
    if out.is_null() || out_len.is_null() {
        return BindStatus::NullPointer;
    }

    let result = functions::call_callback(
        |n| {
            let mut buf = vec![0.0f64; capacity];
            let written = callback(n, buf.as_mut_ptr(), capacity, user_data);
            match usize::try_from(written) {
                Ok(len) if len <= capacity => {
                    buf.truncate(len);
                    Ok(buf)
                }
                Ok(_) => Err(BindStatus::BufferTooSmall),
                Err(_) => Err(BindStatus::CallbackFailed),
            }
        },
        n,
    );

    match result {
        Ok(values) => {
            unsafe {
                ptr::copy_nonoverlapping(values.as_ptr(), out, values.len());
                *out_len = values.len();
            }
            BindStatus::Ok
        }
        Err(status) => status,
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by this API
#[no_mangle]
pub extern "C" fn alice_bind_free_string(s: *mut c_char) {
    if !s.is_null() {
        unsafe {
            drop(CString::from_raw(s));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn take_string(s: *mut c_char) -> String {
        assert!(!s.is_null());
        let out = unsafe { CStr::from_ptr(s) }.to_str().unwrap().to_string();
        alice_bind_free_string(s);
        out
    }

    #[test]
    fn test_person_lifecycle() {
        let person = alice_bind_person_new(30, c"Ann".as_ptr());
        assert!(!person.is_null());

        let mut age = 0usize;
        assert_eq!(alice_bind_person_get_age(person, &mut age), BindStatus::Ok);
        assert_eq!(age, 30);

        assert_eq!(alice_bind_person_set_age(person, 17), BindStatus::InvalidParameter);
        alice_bind_person_get_age(person, &mut age);
        assert_eq!(age, 30);

        assert_eq!(alice_bind_person_set_age(person, 45), BindStatus::Ok);
        assert_eq!(take_string(alice_bind_person_get_name(person)), "Ann");
        assert_eq!(
            take_string(alice_bind_person_describe(person)),
            "AdultPerson(age=45, name=Ann)"
        );
        assert_eq!(take_string(alice_bind_person_get_attr(person, c"age".as_ptr())), "45");
        assert!(alice_bind_person_get_attr(person, c"height".as_ptr()).is_null());

        alice_bind_person_free(person);
        assert_eq!(alice_bind_person_get_age(person, &mut age), BindStatus::InvalidHandle);
        assert!(!remove_person(person));
    }

    #[test]
    fn test_null_handles() {
        let mut age = 0usize;
        assert_eq!(
            alice_bind_person_get_age(PERSON_HANDLE_NULL, &mut age),
            BindStatus::InvalidHandle
        );
        assert!(alice_bind_person_new(20, ptr::null()).is_null());
        assert!(alice_bind_greet(ptr::null()).is_null());
    }

    #[test]
    fn test_add_int() {
        let mut out = 0i64;
        assert_eq!(alice_bind_add_int(3, 4, &mut out), BindStatus::Ok);
        assert_eq!(out, 7);
        assert_eq!(alice_bind_add_int(i64::MAX, 1, &mut out), BindStatus::Overflow);
        assert_eq!(alice_bind_add_int(1, 1, ptr::null_mut()), BindStatus::NullPointer);
    }

    #[test]
    fn test_containers() {
        let mut buf = [1.0f64; 5];
        assert_eq!(alice_bind_get_n_zeros(5, buf.as_mut_ptr(), buf.len()), BindStatus::Ok);
        assert!(buf.iter().all(|&v| v == 0.0));
        assert_eq!(alice_bind_get_n_zeros(6, buf.as_mut_ptr(), buf.len()), BindStatus::BufferTooSmall);

        let mut v = 0usize;
        assert_eq!(alice_bind_get_map_value(c"a".as_ptr(), &mut v), BindStatus::Ok);
        assert_eq!(v, 1);
        assert_eq!(alice_bind_get_map_value(c"z".as_ptr(), &mut v), BindStatus::InvalidParameter);
    }

    #[test]
    fn test_greet_and_color() {
        assert_eq!(take_string(alice_bind_greet(c"Bob".as_ptr())), "Hello, Bob!");

        let name = alice_bind_color_name(1);
        assert_eq!(unsafe { CStr::from_ptr(name) }.to_str().unwrap(), "WHITE");
        assert!(alice_bind_color_name(7).is_null());
    }

    extern "C" fn halves(n: usize, out: *mut f64, capacity: usize, user_data: *mut c_void) -> isize {
        let calls = unsafe { &mut *(user_data as *mut usize) };
        *calls += 1;
        if n > capacity {
            return -1;
        }
        for i in 0..n {
            unsafe { *out.add(i) = i as f64 * 0.5 };
        }
        n as isize
    }

    #[test]
    fn test_call_callback() {
        let mut calls = 0usize;
        let mut buf = [0.0f64; 8];
        let mut len = 0usize;
        let status = alice_bind_call_callback(
            Some(halves),
            3,
            buf.as_mut_ptr(),
            buf.len(),
            &mut calls as *mut usize as *mut c_void,
            &mut len,
        );
        assert_eq!(status, BindStatus::Ok);
        assert_eq!(calls, 1);
        assert_eq!(&buf[..len], &[0.0, 0.5, 1.0]);

        let status = alice_bind_call_callback(
            Some(halves),
            9,
            buf.as_mut_ptr(),
            buf.len(),
            &mut calls as *mut usize as *mut c_void,
            &mut len,
        );
        assert_eq!(status, BindStatus::CallbackFailed);
        assert_eq!(calls, 2);

        let status = alice_bind_call_callback(
            None,
            1,
            buf.as_mut_ptr(),
            buf.len(),
            ptr::null_mut(),
            &mut len,
        );
        assert_eq!(status, BindStatus::NullPointer);
    }

    /// Claims one more value than the buffer holds
    extern "C" fn overclaims(_n: usize, _out: *mut f64, capacity: usize, user_data: *mut c_void) -> isize {
        let calls = unsafe { &mut *(user_data as *mut usize) };
        *calls += 1;
        capacity as isize + 1
    }

    #[test]
    fn test_call_callback_overflowing_buffer() {
        let mut calls = 0usize;
        let mut buf = [7.0f64; 4];
        let mut len = 99usize;
        let status = alice_bind_call_callback(
            Some(overclaims),
            2,
            buf.as_mut_ptr(),
            buf.len(),
            &mut calls as *mut usize as *mut c_void,
            &mut len,
        );
        assert_eq!(status, BindStatus::BufferTooSmall);
        assert_eq!(calls, 1);
        // Nothing copied out on failure
        assert_eq!(len, 99);
        assert!(buf.iter().all(|&v| v == 7.0));
    }

    #[test]
    fn test_version() {
        let v = alice_bind_version();
        assert_eq!(
            format!("{}.{}.{}", v.major, v.minor, v.patch),
            crate::VERSION
        );
    }
}
