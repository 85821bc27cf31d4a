use std::cmp::Reverse;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::config::{Config, parse_key};
use crate::delta::{Delta, DeltaSet, diff};
use crate::system::sampler::{MemoryMode, Sampler};
use crate::system::snapshot::SnapshotSet;
use crate::ui::theme::Theme;

/// How long a status message stays on screen.
const STATUS_TTL_SECS: u64 = 4;

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub pause: KeyCode,
    pub cycle_sort: KeyCode,
    pub refresh: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &crate::config::KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            pause: parse_key(&kb.pause).unwrap_or(KeyCode::Char(' ')),
            cycle_sort: parse_key(&kb.cycle_sort).unwrap_or(KeyCode::Char('s')),
            refresh: parse_key(&kb.refresh).unwrap_or(KeyCode::Char('r')),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Descending by signed change: fastest growers first.
    #[default]
    Growth,
    /// Descending by absolute change: biggest movers first, either way.
    Magnitude,
}

impl SortMode {
    pub fn next(self) -> Self {
        match self {
            SortMode::Growth => SortMode::Magnitude,
            SortMode::Magnitude => SortMode::Growth,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Growth => "Growth",
            SortMode::Magnitude => "Magnitude",
        }
    }
}

/// Which baseline each poll is diffed against. Advancing measures growth per
/// interval; fixed measures growth since the process was first seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferencePolicy {
    #[default]
    Advancing,
    Fixed,
}

impl ReferencePolicy {
    pub fn label(self) -> &'static str {
        match self {
            ReferencePolicy::Advancing => "advancing",
            ReferencePolicy::Fixed => "fixed",
        }
    }

    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "fixed" => ReferencePolicy::Fixed,
            _ => ReferencePolicy::Advancing,
        }
    }
}

/// Owned, display-ready projection of one delta. The borrowed `DeltaSet`
/// dies with the poll; rows outlive it until the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaRow {
    pub delta: i64,
    pub percent: f64,
    pub pid: u32,
    pub name: String,
    pub command: String,
    pub memory: u64,
}

impl DeltaRow {
    fn from_delta(delta: &Delta<'_>) -> Self {
        let subject = delta.subject;
        let command = if subject.command.is_empty() {
            // Kernel threads expose no argv.
            format!("[{}]", subject.name)
        } else {
            subject.command.join(" ")
        };
        DeltaRow {
            delta: delta.delta,
            percent: delta.percent,
            pid: subject.pid,
            name: subject.name.clone(),
            command,
            memory: subject.memory,
        }
    }
}

pub struct App {
    pub running: bool,
    pub paused: bool,
    pub rows: Vec<DeltaRow>,
    pub sort_mode: SortMode,
    pub reference_policy: ReferencePolicy,
    pub top_n: usize,
    pub poll_count: u64,
    pub poll_interval_ms: u64,
    pub status_message: Option<(String, Instant)>,
    pub theme: Theme,
    pub keybinds: ResolvedKeybinds,
    sampler: Sampler,
    reference: SnapshotSet,
}

impl App {
    pub fn new(config: Config) -> Self {
        let mode = MemoryMode::from_str_config(&config.general.memory_mode);
        let mut sampler = Sampler::new(mode);
        // First snapshot becomes the initial reference; no deltas yet.
        let reference = sampler.sample();

        App {
            running: true,
            paused: false,
            rows: Vec::new(),
            sort_mode: SortMode::default(),
            reference_policy: ReferencePolicy::from_str_config(
                &config.general.reference_policy,
            ),
            top_n: config.general.top_n,
            poll_count: 0,
            poll_interval_ms: config.general.poll_interval_ms,
            status_message: None,
            theme: Theme::default(),
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
            sampler,
            reference,
        }
    }

    pub fn memory_mode(&self) -> MemoryMode {
        self.sampler.mode()
    }

    pub fn memory_total(&self) -> u64 {
        self.sampler.memory_total()
    }

    pub fn memory_used(&self) -> u64 {
        self.sampler.memory_used()
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }
        match key.code {
            code if code == self.keybinds.quit => Action::Quit,
            code if code == self.keybinds.pause => Action::TogglePause,
            code if code == self.keybinds.cycle_sort => Action::CycleSortMode,
            code if code == self.keybinds.refresh => Action::Refresh,
            _ => Action::None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::TogglePause => {
                self.paused = !self.paused;
                let msg = if self.paused { "paused" } else { "resumed" };
                self.status_message = Some((msg.to_string(), Instant::now()));
            }
            Action::CycleSortMode => {
                self.sort_mode = self.sort_mode.next();
                // Reorder what is on screen now; the next poll re-ranks the
                // full delta set.
                sort_rows(&mut self.rows, self.sort_mode);
                self.status_message = Some((
                    format!("sort: {}", self.sort_mode.label()),
                    Instant::now(),
                ));
            }
            Action::Refresh => self.poll_cycle(),
            Action::None => {}
        }
    }

    pub fn on_tick(&mut self) {
        self.expire_status();
        if !self.paused {
            self.poll_cycle();
        }
    }

    /// One full cycle: sample, diff against the reference, rank into display
    /// rows, then reconcile the reference for the next poll.
    pub fn poll_cycle(&mut self) {
        #[cfg(feature = "trace-polls")]
        let _cycle_span = tracing::debug_span!("app.poll_cycle").entered();

        let new = self.sampler.sample();
        if new.is_empty() {
            // Systemic enumeration failure: keep the previous reference and
            // surface the condition instead of rendering an empty delta set.
            self.status_message = Some((
                "error: process enumeration returned nothing; keeping previous baseline"
                    .to_string(),
                Instant::now(),
            ));
            return;
        }

        // Diff in ascending-memory order so equal changes tie-break by size.
        let new = new.sorted();
        let deltas = diff(&new, &self.reference);
        debug_assert_eq!(deltas.len(), new.len());
        self.rows = rank_rows(&deltas, self.sort_mode, self.top_n);

        reconcile(&mut self.reference, new, self.reference_policy);
        self.poll_count += 1;
    }

    fn expire_status(&mut self) {
        if let Some((_, since)) = &self.status_message
            && since.elapsed().as_secs() >= STATUS_TTL_SECS
        {
            self.status_message = None;
        }
    }
}

/// Top-N display rows for a delta set, ordered per the sort mode.
fn rank_rows(deltas: &DeltaSet<'_>, sort: SortMode, top_n: usize) -> Vec<DeltaRow> {
    let mut ordered = deltas.ranked();
    ordered.reverse();
    if sort == SortMode::Magnitude {
        ordered.sort_by_key(|d| Reverse(d.delta.unsigned_abs()));
    }
    ordered
        .into_iter()
        .take(top_n)
        .map(DeltaRow::from_delta)
        .collect()
}

fn sort_rows(rows: &mut [DeltaRow], sort: SortMode) {
    match sort {
        SortMode::Growth => rows.sort_by_key(|r| Reverse(r.delta)),
        SortMode::Magnitude => rows.sort_by_key(|r| Reverse(r.delta.unsigned_abs())),
    }
}

/// Updates the held reference after a poll. Advancing: the new set replaces
/// the reference wholesale, so deltas are poll-to-poll and exited pids age
/// out. Fixed: matched pids keep their first-seen baseline; only new or
/// recycled pids are (re)inserted.
fn reconcile(reference: &mut SnapshotSet, new: SnapshotSet, policy: ReferencePolicy) {
    match policy {
        ReferencePolicy::Advancing => *reference = new,
        ReferencePolicy::Fixed => {
            for snapshot in new.iter() {
                let keep = reference
                    .get(snapshot.pid)
                    .is_some_and(|old| old.same_identity(snapshot));
                if !keep {
                    reference.insert(snapshot.clone());
                }
            }
        }
    }
}
