use super::PlatformExtensions;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn proportional_memory(pid: u32) -> Option<u64> {
        // /proc/{pid}/smaps_rollup pre-aggregates the smaps mappings
        // (Linux 4.14+). Reading it for another user's process needs
        // ptrace permission, so EACCES is a normal outcome here.
        let path = format!("/proc/{pid}/smaps_rollup");
        let contents = std::fs::read_to_string(path).ok()?;
        for line in contents.lines() {
            if let Some(rest) = line.strip_prefix("Pss:") {
                let kb: u64 = rest.trim().strip_suffix("kB")?.trim().parse().ok()?;
                return Some(kb * 1024);
            }
        }
        None
    }
}
