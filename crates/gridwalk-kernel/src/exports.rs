//! The exported C-ABI surface over two static memory regions.
//!
//! A host drives the kernel in three steps:
//!
//! 1. write the request bytes starting at [`input_buffer_address`]
//!    (at most [`INPUT_CAPACITY`] bytes);
//! 2. call [`search`] with that address and the request length;
//! 3. read the returned number of bytes starting at
//!    [`output_buffer_address`].
//!
//! # Reentrancy
//!
//! The regions and the kernel's search caches are process-wide and are
//! reused by every call without locking. At most one call may be in flight
//! at a time, and the host must not touch either region while `search`
//! runs. The kernel cannot observe the host's threading model, so it does
//! not try to enforce this.

#![allow(unsafe_code)]

use std::cell::UnsafeCell;
use std::panic::{self, AssertUnwindSafe};

use crate::config::{INPUT_CAPACITY, OUTPUT_CAPACITY};
use crate::error::{KernelError, KernelStatus, MalformedReason};
use crate::kernel::Kernel;

struct Regions {
    input: UnsafeCell<[u8; INPUT_CAPACITY]>,
    output: UnsafeCell<[u8; OUTPUT_CAPACITY]>,
    kernel: UnsafeCell<Kernel>,
}

// SAFETY: every access goes through `search`, whose contract requires the
// host to serialise calls. The address getters only compute pointers.
unsafe impl Sync for Regions {}

static REGIONS: Regions = Regions {
    input: UnsafeCell::new([0; INPUT_CAPACITY]),
    output: UnsafeCell::new([0; OUTPUT_CAPACITY]),
    kernel: UnsafeCell::new(Kernel::new()),
};

/// Start of the input region. Stable for the life of the module.
#[unsafe(export_name = "inputBufferAddress")]
pub extern "C" fn input_buffer_address() -> *mut u8 {
    REGIONS.input.get().cast()
}

/// Start of the output region. Stable for the life of the module.
#[unsafe(export_name = "outputBufferAddress")]
pub extern "C" fn output_buffer_address() -> *const u8 {
    REGIONS.output.get().cast_const().cast()
}

/// Search the request of `len` bytes at `input` and write the path to the
/// output region.
///
/// Returns the number of path bytes written (zero when there is no path),
/// or a negative [`KernelStatus`]. `input` must be the address returned by
/// [`input_buffer_address`]; any other address is rejected without being
/// read.
///
/// A panic inside the search is caught and reported as
/// [`KernelStatus::Panicked`] only where unwinding is available. Targets
/// built with `panic = "abort"`, including `wasm32-unknown-unknown`, trap
/// instead and never return that status.
///
/// # Safety
///
/// No other call to `search` may be running, and the host must not access
/// either region until this call returns.
#[unsafe(export_name = "search")]
pub unsafe extern "C" fn search(input: *const u8, len: usize) -> i32 {
    if input != input_buffer_address().cast_const() {
        return reject(MalformedReason::ForeignAddress.into());
    }
    if len > INPUT_CAPACITY {
        return reject(
            MalformedReason::InputTooLarge {
                len,
                capacity: INPUT_CAPACITY,
            }
            .into(),
        );
    }

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        // SAFETY: the caller guarantees exclusive access for the duration
        // of this call, and `len` was checked against the region size.
        let (request, output, kernel) = unsafe {
            (
                &(&*REGIONS.input.get())[..len],
                &mut *REGIONS.output.get(),
                &mut *REGIONS.kernel.get(),
            )
        };
        kernel.search(request, output)
    }));

    match outcome {
        // The output region is far smaller than i32::MAX.
        Ok(Ok(written)) => written as i32,
        Ok(Err(e)) => KernelStatus::from(&e).code(),
        Err(_) => {
            log::error!("search: panicked, request discarded");
            KernelStatus::Panicked.code()
        }
    }
}

fn reject(e: KernelError) -> i32 {
    log::warn!("search: rejected: {e}");
    KernelStatus::from(&e).code()
}
