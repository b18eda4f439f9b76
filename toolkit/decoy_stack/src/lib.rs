//! Stack growth guard for recursive walks over type descriptors.
//!
//! Type descriptors nest without a fixed bound: `^^^^i`, arrays of structs of
//! unions, and so on. The scanner, the layout calculator and the comparison
//! engine all recurse over that nesting, so every recursive step goes through
//! [`ensure_sufficient_stack`].
//!
//! - **Native targets**: `stacker` grows the stack on demand.
//! - **WASM targets**: plain call.

/// Remaining stack below which a new segment is allocated (64KB).
const RED_ZONE: usize = 64 * 1024;

/// Size of each newly allocated stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// ```text
/// fn scan_pointer(&mut self) -> Option<TypeDescriptor> {
///     ensure_sufficient_stack(|| {
///         // ... recurse into the pointee ...
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
