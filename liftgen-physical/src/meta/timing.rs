//! Code for timing blocks of code
//!
//! Measurements are taken with a [Stopwatch] owned by the caller
//! and only the finished [Measurement] is put into the global [TimedCode] tree,
//! so concurrently running code never shares an open measurement.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use ascii_tree::{write_tree, Tree};
use cpu_time::ProcessTime;
use linked_hash_map::LinkedHashMap;
use once_cell::sync::Lazy;

/// Global instance of the [TimedCode]
static TIMING_INSTANCE: Lazy<Mutex<TimedCode>> = Lazy::new(|| Mutex::new(TimedCode::new()));

/// Wall clock and process time spent in one run of a block
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    /// Elapsed wall clock time
    pub system: Duration,
    /// Elapsed cpu time of the process
    pub process: Duration,
}

/// A measurement that has been started but not yet stopped
#[derive(Clone, Copy)]
pub struct Stopwatch {
    system: Instant,
    process: ProcessTime,
}

impl fmt::Debug for Stopwatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stopwatch [running for {:?}]", self.system.elapsed())
    }
}

impl Stopwatch {
    /// Start a new measurement.
    pub fn start() -> Self {
        Self {
            system: Instant::now(),
            process: ProcessTime::now(),
        }
    }

    /// Finish the measurement.
    pub fn stop(self) -> Measurement {
        Measurement {
            system: self.system.elapsed(),
            process: ProcessTime::now().duration_since(self.process),
        }
    }
}

/// Accumulated measurements of a block of code
#[derive(Default, Clone, Copy)]
pub struct TimedCodeInfo {
    total_system_time: Duration,
    total_process_time: Duration,
    runs: u64,
}

impl TimedCodeInfo {
    /// Returns the total system time for this node.
    pub fn system_time(&self) -> Duration {
        self.total_system_time
    }

    /// Returns the total process time for this node
    pub fn process_time(&self) -> Duration {
        self.total_process_time
    }

    /// Returns how often this node has been measured.
    pub fn runs(&self) -> u64 {
        self.runs
    }
}

impl fmt::Debug for TimedCodeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TimedCodeInfo [totals (msec): {}/{}, {} completed runs]",
            self.total_system_time.as_millis(),
            self.total_process_time.as_millis(),
            self.runs,
        )
    }
}

/// Represents a block of code that is timed
#[derive(Debug, Default, Clone)]
pub struct TimedCode {
    info: TimedCodeInfo,
    subblocks: LinkedHashMap<String, TimedCode>,
}

impl TimedCode {
    /// Create new [TimedCode] object
    pub fn new() -> Self {
        Self {
            info: TimedCodeInfo::default(),
            subblocks: LinkedHashMap::new(),
        }
    }

    /// Return the global instance
    pub fn instance() -> MutexGuard<'static, TimedCode> {
        TIMING_INSTANCE
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `code` and add its duration to the block `name` of the global instance,
    /// provided the "timing" feature is enabled.
    pub fn measure<Output, Code>(name: &str, code: Code) -> Output
    where
        Code: FnOnce() -> Output,
    {
        let stopwatch = Stopwatch::start();
        let result = code();
        let measurement = stopwatch.stop();

        if cfg!(feature = "timing") {
            Self::instance().record_along(name, measurement);
        }

        result
    }

    /// Return an iterator through the sub-nodes
    pub fn sub_nodes(&self) -> impl Iterator<Item = (&str, &TimedCode)> {
        self.subblocks.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Return the recorded timings for this block
    pub fn timings(&self) -> &TimedCodeInfo {
        &self.info
    }

    /// Reset the current node, remove all subnodes
    pub fn reset(&mut self) {
        self.info = TimedCodeInfo::default();
        self.subblocks.clear();
    }

    /// Navigate to a subblock (use forward slash to go multiple layers at once)
    pub fn sub(&mut self, name: &str) -> &mut TimedCode {
        let mut current_block = self;
        for part in name.split('/') {
            current_block = current_block
                .subblocks
                .entry(part.to_string())
                .or_insert_with(TimedCode::new);
        }

        current_block
    }

    /// Add a finished measurement to this block.
    pub fn record(&mut self, measurement: Measurement) {
        self.info.total_system_time += measurement.system;
        self.info.total_process_time += measurement.process;
        self.info.runs += 1;
    }

    /// Add a finished measurement to this block and to every block on the path `name`,
    /// so that each block accounts for the time of its subblocks.
    pub fn record_along(&mut self, name: &str, measurement: Measurement) {
        self.record(measurement);

        let mut current_block = self;
        for part in name.split('/') {
            current_block = current_block
                .subblocks
                .entry(part.to_string())
                .or_insert_with(TimedCode::new);
            current_block.record(measurement);
        }
    }

    fn create_tree_recursive(node: &TimedCode, title: String) -> Tree {
        let subnodes: Vec<Tree> = node
            .subblocks
            .iter()
            .map(|(name, block)| {
                let percentage = if node.info.total_system_time > Duration::ZERO {
                    100.0
                        * (block.info.total_system_time.as_secs_f64()
                            / node.info.total_system_time.as_secs_f64())
                } else {
                    0.0
                };

                let title = format!(
                    "{name} [{percentage:.1}%, {}ms, {}x]",
                    block.info.total_system_time.as_millis(),
                    block.info.runs
                );
                Self::create_tree_recursive(block, title)
            })
            .collect();

        if subnodes.is_empty() {
            Tree::Leaf(vec![title])
        } else {
            Tree::Node(title, subnodes)
        }
    }

    /// Creates an ASCII tree
    pub fn create_tree(&self, title: &str) -> Tree {
        let title = format!(
            "{title} [system/process (ms): {}/{}]",
            self.info.total_system_time.as_millis(),
            self.info.total_process_time.as_millis(),
        );
        Self::create_tree_recursive(self, title)
    }

    /// Creates an ASCII tree and converts it to a string representation
    pub fn create_tree_string(&self, title: &str) -> String {
        let tree = self.create_tree(title);

        let mut output = String::new();
        if write_tree(&mut output, &tree).is_err() {
            log::warn!("Failed to render the timing tree");
        }

        output
    }
}
