use super::PlatformExtensions;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn proportional_memory(_pid: u32) -> Option<u64> {
        // No PSS equivalent on macOS; the sampler falls back to resident.
        None
    }
}
