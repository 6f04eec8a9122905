//! Foreign Function Interface (FFI) for ALICE-BIND
//!
//! C-compatible bindings for the catalogue: free functions, the person
//! record behind opaque handles, the colour enum and a callback bridge.
//!
//! # Usage from C
//!
//! ```c
//! #include "alice_bind.h"
//!
//! static intptr_t ones(size_t n, double *out, size_t cap, void *ud) {
//!     if (n > cap) return -1;
//!     for (size_t i = 0; i < n; i++) out[i] = 1.0;
//!     return (intptr_t)n;
//! }
//!
//! int main() {
//!     PersonHandle p = alice_bind_person_new(30, "Ann");
//!     if (alice_bind_person_set_age(p, 12) != BIND_STATUS_INVALID_PARAMETER) return 1;
//!
//!     char *desc = alice_bind_person_describe(p);
//!     puts(desc);
//!     alice_bind_free_string(desc);
//!
//!     double buf[8];
//!     size_t len = 0;
//!     alice_bind_call_callback(ones, 3, buf, 8, NULL, &len);
//!
//!     alice_bind_person_free(p);
//!     return 0;
//! }
//! ```
//!
//! # Thread Safety
//!
//! All functions are thread-safe. Person records sit in a global table whose
//! lock is held only for single reads and writes.
//!
//! Author: ALICE-BIND contributors

mod api;
mod registry;
mod types;

pub use api::*;
pub use types::*;
