//! Background job table.
//!
//! An unordered, `Vec`-backed mapping from process id to display name. The
//! table holds exactly the background children that have not been reaped
//! yet, so pids are unique at any instant. Removal swaps the last entry
//! into the vacated slot, so iteration order is not stable across removals.

use std::fmt;

use nix::unistd::Pid;

/// Fixed capacity increment, matching the table's small initial allocation.
const JOB_TABLE_GROWTH: usize = 4;

/// A tracked background process: its pid and the command name at launch.
pub struct Job {
    pid: Pid,
    name: String,
}

impl Job {
    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "pid: {}\tname: {}", self.pid, self.name)
    }
}

/// The background job table. Owned by the shell and passed by reference to
/// the builtin dispatcher and the reap step.
#[derive(Default)]
pub struct JobTable {
    jobs: Vec<Job>,
}

impl JobTable {
    pub fn new() -> JobTable {
        Default::default()
    }

    pub fn has_jobs(&self) -> bool {
        !self.jobs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Registers a background process under `name`.
    ///
    /// The table stores its own copy of the name, independent of the
    /// caller's command. The backing storage is allocated on first use and
    /// grows by a fixed increment whenever it is full.
    pub fn insert(&mut self, pid: Pid, name: &str) {
        debug_assert!(self.find(pid).is_none(), "duplicate pid in job table");
        if self.jobs.len() == self.jobs.capacity() {
            self.jobs.reserve_exact(JOB_TABLE_GROWTH);
        }
        self.jobs.push(Job {
            pid,
            name: name.to_string(),
        });
    }

    /// Returns the job registered under `pid`, if any. The reference is
    /// valid until the next insert or remove.
    pub fn find(&self, pid: Pid) -> Option<&Job> {
        self.jobs.iter().find(|job| job.pid == pid)
    }

    /// Removes and returns the job registered under `pid`. Removing an
    /// absent pid is a no-op. The last entry is swapped into the vacated
    /// slot, so this is O(1) past the scan.
    pub fn remove(&mut self, pid: Pid) -> Option<Job> {
        self.jobs
            .iter()
            .position(|job| job.pid == pid)
            .map(|index| self.jobs.swap_remove(index))
    }

    /// Iterates over the jobs in current table order. Not stable across
    /// mutations; traverse without inserting or removing.
    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }

    /// Drops every entry and the backing allocation. Idempotent.
    pub fn clear(&mut self) {
        self.jobs = Vec::new();
    }
}

impl fmt::Debug for JobTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} jobs", self.jobs.len())?;
        for job in &self.jobs {
            writeln!(f, "{:?}", job)?;
        }

        Ok(())
    }
}
