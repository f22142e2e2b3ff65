//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::input::InputStore;
use aoc_solver::{DynSolver, SolverError, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;

/// Result from a single solver execution
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    /// Set on the first part solved from a given parse
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: ArcExecutorError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        }
    }
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    sync_executor_config: SyncExecutorConfig,
    thread_pool: rayon::ThreadPool,
}

/// State shared by every worker thread
pub struct SyncExecutorConfig {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            sync_executor_config: SyncExecutorConfig {
                registry,
                inputs: InputStore::new(config.input_dir.clone())
                    .with_override(config.input_file.clone()),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    pub fn inputs(&self) -> &InputStore {
        &self.sync_executor_config.inputs
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.sync_executor_config;
        cfg.registry
            .storage()
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: self.filter_parts(info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Filter parts based on config.part_filter and solver's max parts
    #[allow(clippy::reversed_empty_ranges)]
    fn filter_parts(&self, max_parts: u8) -> RangeInclusive<u8> {
        match self.sync_executor_config.part_filter {
            Some(p) if p <= max_parts => p..=p,
            Some(_) => 1..=0,
            None => 1..=max_parts,
        }
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        let parallelize_by = self.sync_executor_config.parallelize_by;
        tracing::debug!(items = work_items.len(), ?parallelize_by, "scheduling work");

        match parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_work_item(&work, &tx, &self.sync_executor_config) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_parallel_grouped(by_year, &tx)
            }
            // Part mode additionally fans out inside run_work_item
            ParallelizeBy::Day | ParallelizeBy::Part => self.execute_parallel(work_items, &tx),
        }
    }

    /// Execute work items in parallel, collecting errors
    fn execute_parallel(
        &self,
        work_items: Vec<WorkItem>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let cfg = &self.sync_executor_config;

        self.thread_pool.install(|| {
            work_items
                .into_par_iter()
                .map(|work| run_work_item(&work, tx, cfg).err())
                .reduce_with(|err1, err2| match (err1, err2) {
                    (Some(e1), e2) => Some(ArcExecutorError::combine_opt(e2, e1)),
                    (None, e2) => e2,
                })
                .flatten()
                .map_or(Ok(()), Err)
        })
    }

    /// Execute grouped work items in parallel (for year-level parallelism)
    fn execute_parallel_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let cfg = &self.sync_executor_config;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_work_item(&work, tx, cfg) {
                            err = Some(ArcExecutorError::combine_opt(err, e))
                        }
                    }
                    err
                })
                .reduce_with(|err1, err2| match (err1, err2) {
                    (Some(e1), e2) => Some(ArcExecutorError::combine_opt(e2, e1)),
                    (None, e2) => e2,
                })
                .flatten()
                .map_or(Ok(()), Err)
        })
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Load the input for one year/day and solve its parts
///
/// Input and parse failures become per-part error results; only a closed
/// channel is returned as an error.
fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    cfg: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    tracing::debug!(year, day, parts = ?work.parts, "running");

    let input = match cfg.inputs.read(year, day) {
        Ok(input) => input,
        Err(e) => {
            let error: ArcExecutorError = ExecutorError::from(e).into();
            for part in work.parts.clone() {
                send(tx, SolverResult::failed(year, day, part, error.clone()))?;
            }
            return Ok(());
        }
    };

    if matches!(cfg.parallelize_by, ParallelizeBy::Part) {
        run_parts_parallel(work, &input, tx, &cfg.registry)
    } else {
        run_parts_sequential(work, &input, tx, &cfg.registry)
    }
}

/// Parse once per part and solve the parts concurrently
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    // collect keeps part order
    let results: Vec<SolverResult> = work
        .parts
        .clone()
        .into_par_iter()
        .map(|part| match registry.create_solver(year, day, input) {
            Ok(mut solver) => solve_part(part, &mut *solver, true),
            Err(e) => SolverResult::failed(year, day, part, ExecutorError::from(e).into()),
        })
        .collect();

    for result in results {
        send(tx, result)?;
    }
    Ok(())
}

/// Parse once and solve the parts in order, sharing the parsed data
fn run_parts_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let mut solver = match registry.create_solver(year, day, input) {
        Ok(solver) => solver,
        Err(e) => {
            let error: ArcExecutorError = ExecutorError::from(e).into();
            for part in work.parts.clone() {
                send(tx, SolverResult::failed(year, day, part, error.clone()))?;
            }
            return Ok(());
        }
    };

    for (i, part) in work.parts.clone().enumerate() {
        send(tx, solve_part(part, &mut *solver, i == 0))?;
    }
    Ok(())
}

/// Solve a single part on an already parsed solver
fn solve_part(part: u8, solver: &mut dyn DynSolver, report_parse: bool) -> SolverResult {
    let (year, day) = (solver.year(), solver.day());
    let parse_duration = report_parse.then(|| solver.parse_duration());

    match solver.solve(part) {
        Ok(solved) => SolverResult {
            year,
            day,
            part,
            solve_duration: solved.duration(),
            answer: Ok(solved.answer),
            parse_duration,
        },
        Err(e) => {
            tracing::debug!(year, day, part, error = %e, "part failed");
            SolverResult {
                parse_duration,
                ..SolverResult::failed(
                    year,
                    day,
                    part,
                    ExecutorError::from(SolverError::from(e)).into(),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::SolverRegistryBuilder;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn config(dir: &Path, parallelize_by: ParallelizeBy) -> Config {
        Config {
            year_filter: Some(2021),
            day_filter: None,
            part_filter: None,
            tags: Vec::new(),
            input_dir: dir.to_path_buf(),
            input_file: None,
            thread_count: 2,
            parallelize_by,
            quiet: true,
            verbosity: 0,
        }
    }

    fn registry() -> SolverRegistry {
        SolverRegistryBuilder::new()
            .register_solver_plugins(|p| p.year == 2021 && [1, 6, 10].contains(&p.day))
            .unwrap()
            .build()
    }

    fn inputs() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("2021")).unwrap();
        fs::write(
            temp.path().join("2021/day01.txt"),
            "199\n200\n208\n210\n200\n207\n240\n269\n260\n263\n",
        )
        .unwrap();
        fs::write(temp.path().join("2021_day10.txt"), "()\n").unwrap();
        temp
    }

    fn run(executor: &Executor) -> Vec<SolverResult> {
        let (tx, rx) = std::sync::mpsc::channel();
        executor.execute(tx).unwrap();
        let mut results: Vec<_> = rx.into_iter().collect();
        results.sort_by_key(|r| (r.year, r.day, r.part));
        results
    }

    #[test]
    fn test_collect_work_items_applies_filters() {
        let temp = inputs();
        let mut cfg = config(temp.path(), ParallelizeBy::Day);
        let executor = Executor::new(registry(), &cfg).unwrap();
        let days: Vec<u8> = executor.collect_work_items().iter().map(|w| w.day).collect();
        assert_eq!(days, [1, 6, 10]);

        cfg.day_filter = Some(6);
        cfg.part_filter = Some(2);
        let executor = Executor::new(registry(), &cfg).unwrap();
        assert_eq!(
            executor.collect_work_items(),
            [WorkItem {
                year: 2021,
                day: 6,
                parts: 2..=2
            }]
        );

        cfg.year_filter = Some(2020);
        let executor = Executor::new(registry(), &cfg).unwrap();
        assert!(executor.collect_work_items().is_empty());
    }

    #[test]
    fn test_every_mode_gives_the_same_answers() {
        let temp = inputs();
        for mode in [
            ParallelizeBy::Sequential,
            ParallelizeBy::Year,
            ParallelizeBy::Day,
            ParallelizeBy::Part,
        ] {
            let executor = Executor::new(registry(), &config(temp.path(), mode)).unwrap();
            let results = run(&executor);
            assert_eq!(results.len(), 6, "{:?}", mode);

            let answers: Vec<Option<&str>> = results
                .iter()
                .map(|r| r.answer.as_deref().ok())
                .collect();
            // day 6 has no input; day 10 part 2 has no incomplete lines
            assert_eq!(
                answers,
                [Some("7"), Some("5"), None, None, Some("0"), None],
                "{:?}",
                mode
            );
        }
    }

    #[test]
    fn test_missing_input_fails_each_part() {
        let temp = inputs();
        let mut cfg = config(temp.path(), ParallelizeBy::Day);
        cfg.day_filter = Some(6);
        let executor = Executor::new(registry(), &cfg).unwrap();

        let results = run(&executor);
        assert_eq!(results.len(), 2);
        for result in results {
            let err = result.answer.unwrap_err();
            assert!(matches!(err.inner(), ExecutorError::Input(_)), "{err}");
            assert_eq!(result.solve_duration, TimeDelta::zero());
        }
    }

    #[test]
    fn test_parse_duration_reported_once_per_parse() {
        let temp = inputs();
        let mut cfg = config(temp.path(), ParallelizeBy::Sequential);
        cfg.day_filter = Some(1);
        let executor = Executor::new(registry(), &cfg).unwrap();
        let results = run(&executor);
        assert!(results[0].parse_duration.is_some());
        assert!(results[1].parse_duration.is_none());

        cfg.parallelize_by = ParallelizeBy::Part;
        let executor = Executor::new(registry(), &cfg).unwrap();
        assert!(run(&executor).iter().all(|r| r.parse_duration.is_some()));
    }

    #[test]
    fn test_override_file_feeds_selected_day() {
        let temp = inputs();
        let file = temp.path().join("fish.txt");
        fs::write(&file, "3,4,3,1,2\n").unwrap();

        let mut cfg = config(temp.path(), ParallelizeBy::Day);
        cfg.day_filter = Some(6);
        cfg.input_file = Some(file);
        let executor = Executor::new(registry(), &cfg).unwrap();

        let answers: Vec<String> = run(&executor)
            .into_iter()
            .map(|r| r.answer.unwrap())
            .collect();
        assert_eq!(answers, ["5934", "26984457539"]);
    }
}
