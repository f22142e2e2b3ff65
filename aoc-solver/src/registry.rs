//! Solver registry for managing and creating solver instances

use crate::error::{ParseError, RegistrationError, SolverError};
use crate::instance::{DynSolver, SolverInstance};
use crate::solver::Solver;

// ============================================================================
// Storage layout
// ============================================================================

/// First Advent of Code year
pub const BASE_YEAR: u16 = 2015;
/// Years addressable by the flat storage (2015-2034)
pub const MAX_YEARS: usize = 20;
pub const DAYS_PER_YEAR: usize = 25;
const CAPACITY: usize = MAX_YEARS * DAYS_PER_YEAR;

/// Flat index of `(year, day)`, or `None` when outside the storage
#[inline]
fn calc_index(year: u16, day: u8) -> Option<usize> {
    if year < BASE_YEAR || year >= BASE_YEAR + MAX_YEARS as u16 {
        return None;
    }
    if day == 0 || day > DAYS_PER_YEAR as u8 {
        return None;
    }
    let y = (year - BASE_YEAR) as usize;
    let d = (day - 1) as usize;
    Some(y * DAYS_PER_YEAR + d)
}

#[inline]
fn from_index(index: usize) -> (u16, u8) {
    let year = BASE_YEAR + (index / DAYS_PER_YEAR) as u16;
    let day = (index % DAYS_PER_YEAR) as u8 + 1;
    (year, day)
}

// ============================================================================
// Factories
// ============================================================================

/// Thread-safe factory that parses an input into a ready-to-solve instance
pub type SolverFactory =
    Box<dyn for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError> + Send + Sync>;

/// Metadata about a registered solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryInfo {
    pub year: u16,
    pub day: u8,
    /// Number of parts the solver implements
    pub parts: u8,
    /// Puzzle title, empty when registered without one
    pub title: &'static str,
}

struct SolverFactoryEntry {
    factory: SolverFactory,
    parts: u8,
    title: &'static str,
}

impl SolverFactoryEntry {
    fn info(&self, year: u16, day: u8) -> FactoryInfo {
        FactoryInfo {
            year,
            day,
            parts: self.parts,
            title: self.title,
        }
    }
}

// ============================================================================
// Storage
// ============================================================================

/// Immutable factory storage with O(1) lookup by year and day.
///
/// Iteration always yields solvers in `(year, day)` order.
pub struct SolverFactoryStorage {
    entries: Vec<Option<SolverFactoryEntry>>,
}

impl SolverFactoryStorage {
    /// Metadata for every registered solver, ordered by year then day
    pub fn iter_info(&self) -> impl Iterator<Item = FactoryInfo> + '_ {
        self.entries.iter().enumerate().filter_map(|(i, entry)| {
            entry.as_ref().map(|e| {
                let (year, day) = from_index(i);
                e.info(year, day)
            })
        })
    }

    pub fn get_info(&self, year: u16, day: u8) -> Option<FactoryInfo> {
        calc_index(year, day)
            .and_then(|i| self.entries.get(i)?.as_ref())
            .map(|e| e.info(year, day))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.get_info(year, day).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|e| e.is_none())
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for a [`SolverRegistry`].
///
/// Registration is fallible: a second solver for the same year and day, or a
/// year/day the storage cannot address, is rejected.
///
/// ```
/// use aoc_solver::SolverRegistryBuilder;
///
/// let registry = SolverRegistryBuilder::new()
///     .register_all_plugins()
///     .unwrap()
///     .build();
/// # let _ = registry;
/// ```
pub struct SolverRegistryBuilder {
    entries: Vec<Option<SolverFactoryEntry>>,
}

impl SolverRegistryBuilder {
    pub fn new() -> Self {
        Self {
            entries: (0..CAPACITY).map(|_| None).collect(),
        }
    }

    /// Register a factory for `year`/`day` that supports `parts` parts
    pub fn register_factory<F>(
        self,
        year: u16,
        day: u8,
        parts: u8,
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        self.insert(
            year,
            day,
            SolverFactoryEntry {
                factory: Box::new(factory),
                parts,
                title: "",
            },
        )
    }

    /// Register solver type `S` directly
    pub fn register<S>(self, year: u16, day: u8) -> Result<Self, RegistrationError>
    where
        S: Solver + 'static,
    {
        self.register_factory(year, day, S::PARTS, move |input: &str| {
            let instance = SolverInstance::<S>::new(year, day, input)?;
            Ok(Box::new(instance) as Box<dyn DynSolver + '_>)
        })
    }

    /// Register every plugin collected through `inventory`
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_solver_plugins(|_| true)
    }

    /// Register the plugins for which `filter` returns `true`.
    ///
    /// ```
    /// use aoc_solver::SolverRegistryBuilder;
    ///
    /// let registry = SolverRegistryBuilder::new()
    ///     .register_solver_plugins(|plugin| plugin.year == 2021 && plugin.tags.contains(&"grid"))
    ///     .unwrap()
    ///     .build();
    /// # let _ = registry;
    /// ```
    pub fn register_solver_plugins<F>(mut self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolverPlugin) -> bool,
    {
        for plugin in inventory::iter::<SolverPlugin>() {
            if filter(plugin) {
                self = self.register_plugin(plugin)?;
            }
        }
        Ok(self)
    }

    fn register_plugin(self, plugin: &SolverPlugin) -> Result<Self, RegistrationError> {
        let (year, day) = (plugin.year, plugin.day);
        let mut builder = plugin.solver.register_with(self, year, day)?;
        // register_with went through register_factory; attach the title afterwards
        if let Some(Some(entry)) = calc_index(year, day).and_then(|i| builder.entries.get_mut(i)) {
            entry.title = plugin.title;
        }
        Ok(builder)
    }

    fn insert(
        mut self,
        year: u16,
        day: u8,
        entry: SolverFactoryEntry,
    ) -> Result<Self, RegistrationError> {
        let index = calc_index(year, day).ok_or(RegistrationError::InvalidYearDay(year, day))?;
        if self.entries[index].is_some() {
            return Err(RegistrationError::DuplicateSolver(year, day));
        }
        self.entries[index] = Some(entry);
        Ok(self)
    }

    pub fn build(self) -> SolverRegistry {
        SolverRegistry {
            storage: SolverFactoryStorage {
                entries: self.entries,
            },
        }
    }
}

impl Default for SolverRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Immutable registry mapping `(year, day)` to solver factories.
///
/// The registry is `Send + Sync`, so an executor can share one registry
/// across worker threads.
pub struct SolverRegistry {
    storage: SolverFactoryStorage,
}

impl SolverRegistry {
    /// Read-only view of the registered factories
    pub fn storage(&self) -> &SolverFactoryStorage {
        &self.storage
    }

    /// Parse `input` with the solver registered for `year`/`day`
    pub fn create_solver<'a>(
        &self,
        year: u16,
        day: u8,
        input: &'a str,
    ) -> Result<Box<dyn DynSolver + 'a>, SolverError> {
        let index = calc_index(year, day).ok_or(SolverError::InvalidYearDay(year, day))?;

        let entry = self
            .storage
            .entries
            .get(index)
            .and_then(Option::as_ref)
            .ok_or(SolverError::NotFound(year, day))?;

        (entry.factory)(input).map_err(SolverError::ParseError)
    }
}

// ============================================================================
// Plugins
// ============================================================================

/// Object-safe registration hook so plugins of different solver types can
/// live in one `inventory` collection.
pub trait RegisterableSolver: Sync {
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError>;

    fn parts(&self) -> u8;
}

impl<S> RegisterableSolver for S
where
    S: Solver + Sync + 'static,
{
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError> {
        builder.register::<S>(year, day)
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

/// A solver submitted for automatic registration.
///
/// Normally produced by `#[derive(AutoRegisterSolver)]`; it can also be
/// submitted by hand:
///
/// ```ignore
/// aoc_solver::inventory::submit! {
///     SolverPlugin {
///         year: 2021,
///         day: 1,
///         title: "Sonar Sweep",
///         solver: &Day01,
///         tags: &["2021"],
///     }
/// }
/// ```
pub struct SolverPlugin {
    pub year: u16,
    pub day: u8,
    pub title: &'static str,
    pub solver: &'static dyn RegisterableSolver,
    /// Free-form labels used by `--tags` filtering
    pub tags: &'static [&'static str],
}

inventory::collect!(SolverPlugin);

/// Register `$solver` for `$year`/`$day` on a mutable builder binding.
///
/// Panics on duplicate registration, so it is meant for tests and small
/// hand-built registries.
#[macro_export]
macro_rules! register_solver {
    ($builder:expr, $solver:ty, $year:expr, $day:expr) => {
        $builder = $builder
            .register::<$solver>($year, $day)
            .expect("Failed to register solver");
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AocParser, SolveError};

    struct Echo;

    impl AocParser for Echo {
        type SharedData<'a> = &'a str;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            if input.is_empty() {
                Err(ParseError::MissingData("empty input".into()))
            } else {
                Ok(input)
            }
        }
    }

    impl Solver for Echo {
        const PARTS: u8 = 2;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            Ok(format!("{}:{}", part, shared))
        }
    }

    #[test]
    fn test_index_roundtrip_bounds() {
        assert_eq!(calc_index(2015, 1), Some(0));
        assert_eq!(calc_index(2021, 25), Some(6 * 25 + 24));
        assert_eq!(from_index(6 * 25 + 24), (2021, 25));
        assert_eq!(calc_index(2014, 1), None);
        assert_eq!(calc_index(2035, 1), None);
        assert_eq!(calc_index(2021, 0), None);
        assert_eq!(calc_index(2021, 26), None);
    }

    #[test]
    fn test_register_and_create() {
        let registry = SolverRegistryBuilder::new()
            .register::<Echo>(2021, 3)
            .unwrap()
            .build();

        let info = registry.storage().get_info(2021, 3).unwrap();
        assert_eq!(info.parts, 2);
        assert_eq!(registry.storage().len(), 1);

        let mut solver = registry.create_solver(2021, 3, "abc").unwrap();
        assert_eq!(solver.solve(2).unwrap().answer, "2:abc");
        assert!(matches!(solver.solve(3), Err(SolveError::PartOutOfRange(3))));
    }

    #[test]
    fn test_duplicate_and_invalid_registration() {
        let builder = SolverRegistryBuilder::new().register::<Echo>(2021, 1).unwrap();
        assert!(matches!(
            builder.register::<Echo>(2021, 1),
            Err(RegistrationError::DuplicateSolver(2021, 1))
        ));
        assert!(matches!(
            SolverRegistryBuilder::new().register::<Echo>(2021, 26),
            Err(RegistrationError::InvalidYearDay(2021, 26))
        ));
    }

    #[test]
    fn test_create_errors() {
        let registry = SolverRegistryBuilder::new()
            .register::<Echo>(2021, 1)
            .unwrap()
            .build();

        assert!(matches!(
            registry.create_solver(2021, 2, "x"),
            Err(SolverError::NotFound(2021, 2))
        ));
        assert!(matches!(
            registry.create_solver(1999, 1, "x"),
            Err(SolverError::InvalidYearDay(1999, 1))
        ));
        assert!(matches!(
            registry.create_solver(2021, 1, ""),
            Err(SolverError::ParseError(ParseError::MissingData(_)))
        ));
    }

    #[test]
    fn test_iter_info_is_ordered() {
        let registry = SolverRegistryBuilder::new()
            .register::<Echo>(2022, 1)
            .unwrap()
            .register::<Echo>(2021, 7)
            .unwrap()
            .register::<Echo>(2021, 2)
            .unwrap()
            .build();

        let keys: Vec<_> = registry
            .storage()
            .iter_info()
            .map(|i| (i.year, i.day))
            .collect();
        assert_eq!(keys, vec![(2021, 2), (2021, 7), (2022, 1)]);
    }
}
