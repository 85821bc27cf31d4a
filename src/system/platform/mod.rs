pub trait PlatformExtensions {
    /// Proportional set size (PSS) in bytes, when the platform exposes one.
    /// `None` means unavailable or access denied; callers fall back to the
    /// resident figure.
    fn proportional_memory(pid: u32) -> Option<u64>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

pub fn proportional_memory(pid: u32) -> Option<u64> {
    platform_impl::Platform::proportional_memory(pid)
}
