use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};

use super::platform;
use super::snapshot::{Snapshot, SnapshotSet};

/// Memory-accuracy mode. Proportional (PSS) charges shared pages fairly but
/// may need elevated privilege; resident (RSS) is always readable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MemoryMode {
    Resident,
    #[default]
    Proportional,
}

impl MemoryMode {
    pub fn label(self) -> &'static str {
        match self {
            MemoryMode::Resident => "RSS",
            MemoryMode::Proportional => "PSS",
        }
    }

    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "resident" | "rss" => MemoryMode::Resident,
            _ => MemoryMode::Proportional,
        }
    }
}

/// The process-memory source: owns the sysinfo handle and turns each refresh
/// into a `SnapshotSet`. A process that exits mid-read simply drops out of
/// sysinfo's table; it never aborts the poll.
pub struct Sampler {
    sys: System,
    mode: MemoryMode,
}

impl Sampler {
    pub fn new(mode: MemoryMode) -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::everything(),
        );
        Sampler { sys, mode }
    }

    pub fn mode(&self) -> MemoryMode {
        self.mode
    }

    pub fn memory_total(&self) -> u64 {
        self.sys.total_memory()
    }

    pub fn memory_used(&self) -> u64 {
        self.sys.used_memory()
    }

    pub fn sample(&mut self) -> SnapshotSet {
        #[cfg(feature = "trace-polls")]
        let _sample_span = tracing::debug_span!("sampler.sample").entered();

        self.sys.refresh_memory();
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing()
                .with_memory()
                .with_cmd(UpdateKind::OnlyIfNotSet),
        );

        let mut set = SnapshotSet::new();
        for (pid, process) in self.sys.processes() {
            let pid = pid.as_u32();
            let snapshot = Snapshot {
                pid,
                name: process.name().to_string_lossy().to_string(),
                command: process
                    .cmd()
                    .iter()
                    .map(|s| s.to_string_lossy().to_string())
                    .collect(),
                memory: self.measure(pid, process.memory()),
            };
            // Zero or unreadable memory is dropped at insertion.
            set.insert(snapshot);
        }
        set
    }

    fn measure(&self, pid: u32, resident: u64) -> u64 {
        match self.mode {
            MemoryMode::Resident => resident,
            // PSS read denied or unavailable: fall back to the coarser
            // resident figure rather than dropping the process.
            MemoryMode::Proportional => platform::proportional_memory(pid).unwrap_or(resident),
        }
    }
}
