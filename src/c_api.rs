// C ABI over an opaque handle. Every entry point catches panics so that
// nothing unwinds across the FFI boundary.
use crate::core::data::NameData;
use crate::core::engine::GenderResolver;
use crate::core::types::GenderLabel;
use crate::persistence::load_snapshot;
use libc::c_char;
use std::ffi::{CStr, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use std::ptr;

/// Loaded tables owned by the caller through a raw pointer.
pub struct GenderComputerHandle {
    data: NameData,
}

unsafe fn read_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    CStr::from_ptr(s).to_str().ok()
}

fn into_c_string(s: String) -> *mut c_char {
    CString::new(s).map(CString::into_raw).unwrap_or(ptr::null_mut())
}

/// Opens a compiled snapshot. Returns null on failure.
///
/// # Safety
/// `snapshot_path` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn gender_computer_open(snapshot_path: *const c_char) -> *mut GenderComputerHandle {
    let path = match read_str(snapshot_path) {
        Some(path) => path,
        None => return ptr::null_mut(),
    };
    let result = catch_unwind(|| load_snapshot(Path::new(path)));
    match result {
        Ok(Ok(data)) => Box::into_raw(Box::new(GenderComputerHandle { data })),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "failed to open name snapshot");
            ptr::null_mut()
        }
        Err(_) => {
            tracing::error!("panic while opening name snapshot");
            ptr::null_mut()
        }
    }
}

/// Releases a handle from [`gender_computer_open`].
///
/// # Safety
/// `handle` must be null or a pointer returned by `gender_computer_open`
/// that has not been closed yet.
#[no_mangle]
pub unsafe extern "C" fn gender_computer_close(handle: *mut GenderComputerHandle) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

/// Resolves one name. Returns the label as a string, or null for no result.
/// Free the result with [`gender_computer_free_string`].
///
/// # Safety
/// `handle` must come from `gender_computer_open`; `name` and `country`
/// must be null or valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn gender_computer_resolve(
    handle: *const GenderComputerHandle,
    name: *const c_char,
    country: *const c_char,
) -> *mut c_char {
    let handle = match handle.as_ref() {
        Some(handle) => handle,
        None => return ptr::null_mut(),
    };
    let name = read_str(name).unwrap_or("");
    let country = read_str(country).unwrap_or("");

    let result = catch_unwind(AssertUnwindSafe(|| {
        GenderResolver::new(&handle.data).resolve_gender(name, country)
    }));
    match result {
        Ok(Some(gender)) => into_c_string(gender.as_str().to_string()),
        Ok(None) => ptr::null_mut(),
        Err(_) => {
            tracing::error!("panic in gender_computer_resolve");
            ptr::null_mut()
        }
    }
}

/// Resolves a JSON array of `[name, country]` pairs into a JSON array of
/// labels (`null` where there is no result). Returns null on invalid input.
///
/// # Safety
/// Same requirements as [`gender_computer_resolve`].
#[no_mangle]
pub unsafe extern "C" fn gender_computer_resolve_batch(
    handle: *const GenderComputerHandle,
    json: *const c_char,
) -> *mut c_char {
    let handle = match handle.as_ref() {
        Some(handle) => handle,
        None => return ptr::null_mut(),
    };
    let json = match read_str(json) {
        Some(json) => json,
        None => return ptr::null_mut(),
    };

    let result = catch_unwind(AssertUnwindSafe(|| resolve_batch_json(&handle.data, json)));
    match result {
        Ok(Some(out)) => into_c_string(out),
        Ok(None) => ptr::null_mut(),
        Err(_) => {
            tracing::error!("panic in gender_computer_resolve_batch");
            ptr::null_mut()
        }
    }
}

/// Frees a string returned by this library.
///
/// # Safety
/// `s` must be null or a pointer returned by one of the resolve functions.
#[no_mangle]
pub unsafe extern "C" fn gender_computer_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

fn resolve_batch_json(data: &NameData, json: &str) -> Option<String> {
    let pairs: Vec<(String, String)> = match serde_json::from_str(json) {
        Ok(pairs) => pairs,
        Err(e) => {
            tracing::warn!(error = %e, "invalid batch payload");
            return None;
        }
    };
    let resolver = GenderResolver::new(data);
    let labels: Vec<Option<GenderLabel>> = pairs
        .iter()
        .map(|(name, country)| resolver.resolve_gender(name, country))
        .collect();
    serde_json::to_string(&labels).ok()
}
