//! Wall-time and peak-memory measurement around a single call.
//!
//! Requires the `measure` feature. Nothing in [`crate::ortho`] depends on
//! this module; it wraps a callable from the outside and hands its return
//! value back untouched.
//!
//! ```
//! use orthobasis::{householder, DynMatrix};
//! use orthobasis::measure::measure;
//!
//! let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
//! let m = measure(householder, &a);
//! assert_eq!(m.value.unwrap(), householder(&a).unwrap());
//! assert!(m.peak_bytes.is_none()); // wall time only by default
//! ```
//!
//! To record heap usage, install [`TrackingAllocator`] as the global
//! allocator in the binary and measure with [`AllocProbe`]:
//!
//! ```ignore
//! use orthobasis::measure::{measure_with, AllocProbe, TrackingAllocator};
//!
//! #[global_allocator]
//! static ALLOC: TrackingAllocator = TrackingAllocator::new();
//!
//! let m = measure_with(&mut AllocProbe::new(&ALLOC), orthobasis::gram_schmidt, &a);
//! println!("{:?} {:?}", m.elapsed, m.peak_bytes);
//! ```

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Result of a measured call.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement<R> {
    /// Exactly what the wrapped callable returned.
    pub value: R,
    /// Wall-clock time spent inside the call.
    pub elapsed: Duration,
    /// Peak heap bytes allocated during the call above what was live when it
    /// started. `None` when the probe does not track memory.
    pub peak_bytes: Option<usize>,
}

/// Something that can observe a call from start to finish.
pub trait Probe {
    /// Called immediately before the measured call.
    fn start(&mut self);

    /// Called immediately after; returns `(elapsed, peak_bytes)`.
    fn finish(&mut self) -> (Duration, Option<usize>);
}

/// Wall-time only probe.
#[derive(Debug, Default)]
pub struct Stopwatch {
    started: Option<Instant>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Probe for Stopwatch {
    fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    fn finish(&mut self) -> (Duration, Option<usize>) {
        let elapsed = self.started.take().map(|t| t.elapsed()).unwrap_or_default();
        (elapsed, None)
    }
}

/// Global allocator wrapper that counts live and peak heap bytes.
///
/// Delegates every allocation to [`System`].
#[derive(Debug)]
pub struct TrackingAllocator {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl TrackingAllocator {
    pub const fn new() -> Self {
        Self {
            current: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Bytes currently allocated through this allocator.
    pub fn current(&self) -> usize {
        self.current.load(Ordering::Relaxed)
    }

    /// High-water mark since construction or the last [`reset_peak`](Self::reset_peak).
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::Relaxed)
    }

    /// Lower the high-water mark to the current usage.
    pub fn reset_peak(&self) {
        self.peak.store(self.current(), Ordering::Relaxed);
    }

    fn record_alloc(&self, size: usize) {
        let now = self.current.fetch_add(size, Ordering::Relaxed) + size;
        self.peak.fetch_max(now, Ordering::Relaxed);
    }

    fn record_dealloc(&self, size: usize) {
        self.current.fetch_sub(size, Ordering::Relaxed);
    }
}

impl Default for TrackingAllocator {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            self.record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc_zeroed(layout);
        if !ptr.is_null() {
            self.record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        self.record_dealloc(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = System.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            self.record_dealloc(layout.size());
            self.record_alloc(new_size);
        }
        new_ptr
    }
}

/// Probe reporting wall time plus transient heap usage from a
/// [`TrackingAllocator`].
///
/// Counts are process-wide: allocations made by other threads during the
/// call are included.
#[derive(Debug)]
pub struct AllocProbe<'a> {
    alloc: &'a TrackingAllocator,
    watch: Stopwatch,
    baseline: usize,
}

impl<'a> AllocProbe<'a> {
    pub fn new(alloc: &'a TrackingAllocator) -> Self {
        Self {
            alloc,
            watch: Stopwatch::new(),
            baseline: 0,
        }
    }
}

impl Probe for AllocProbe<'_> {
    fn start(&mut self) {
        self.alloc.reset_peak();
        self.baseline = self.alloc.current();
        self.watch.start();
    }

    fn finish(&mut self) -> (Duration, Option<usize>) {
        let (elapsed, _) = self.watch.finish();
        let peak = self.alloc.peak().saturating_sub(self.baseline);
        (elapsed, Some(peak))
    }
}

/// Call `f(arg)` under `probe`.
pub fn measure_with<A, R, P: Probe + ?Sized>(
    probe: &mut P,
    f: impl FnOnce(A) -> R,
    arg: A,
) -> Measurement<R> {
    probe.start();
    let value = f(arg);
    let (elapsed, peak_bytes) = probe.finish();
    log::debug!(
        "measured call: {:?} elapsed, peak {}",
        elapsed,
        peak_bytes.map_or_else(|| "untracked".to_string(), |b| format!("{} bytes", b)),
    );
    Measurement {
        value,
        elapsed,
        peak_bytes,
    }
}

/// Call `f(arg)`, timing it with a [`Stopwatch`].
pub fn measure<A, R>(f: impl FnOnce(A) -> R, arg: A) -> Measurement<R> {
    measure_with(&mut Stopwatch::new(), f, arg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{gram_schmidt, DynMatrix};

    struct FixedProbe {
        started: bool,
    }

    impl Probe for FixedProbe {
        fn start(&mut self) {
            self.started = true;
        }

        fn finish(&mut self) -> (Duration, Option<usize>) {
            assert!(self.started, "finish before start");
            (Duration::from_millis(7), Some(42))
        }
    }

    #[test]
    fn value_is_passed_through() {
        let a = DynMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 1.0, 3.0]);
        let m = measure(gram_schmidt, &a);
        assert_eq!(m.value, gram_schmidt(&a));
        assert_eq!(m.peak_bytes, None);
    }

    #[test]
    fn injected_probe_is_used() {
        let mut probe = FixedProbe { started: false };
        let m = measure_with(&mut probe, |x: i32| x * 2, 21);
        assert_eq!(m.value, 42);
        assert_eq!(m.elapsed, Duration::from_millis(7));
        assert_eq!(m.peak_bytes, Some(42));
    }

    #[test]
    fn stopwatch_without_start_reports_zero() {
        let mut w = Stopwatch::new();
        assert_eq!(w.finish(), (Duration::ZERO, None));
    }

    #[test]
    fn tracking_allocator_counts() {
        // Not installed globally; drive it directly.
        let alloc = TrackingAllocator::new();
        let layout = Layout::from_size_align(256, 8).unwrap();
        unsafe {
            let p = alloc.alloc(layout);
            assert!(!p.is_null());
            assert_eq!(alloc.current(), 256);
            let p = alloc.realloc(p, layout, 512);
            assert!(!p.is_null());
            assert_eq!(alloc.current(), 512);
            assert_eq!(alloc.peak(), 512);
            alloc.dealloc(p, Layout::from_size_align(512, 8).unwrap());
        }
        assert_eq!(alloc.current(), 0);
        alloc.reset_peak();
        assert_eq!(alloc.peak(), 0);
    }

    #[test]
    fn alloc_probe_reports_transient_bytes() {
        let alloc = TrackingAllocator::new();
        let mut probe = AllocProbe::new(&alloc);
        let layout = Layout::from_size_align(1024, 8).unwrap();
        let m = measure_with(
            &mut probe,
            |l: Layout| unsafe {
                let p = alloc.alloc(l);
                alloc.dealloc(p, l);
            },
            layout,
        );
        assert_eq!(m.peak_bytes, Some(1024));
        assert_eq!(alloc.current(), 0);
    }
}
