use std::{fmt, path::PathBuf, str::FromStr, time::Duration};

use anyhow::Context;
use lifelike::{CellState, Grid, RuleSet, RuleSpec};

/// Environment variable consulted for the output root when `--root` is absent
pub const ROOT_ENV: &str = "LIFELIKE_ROOT";

/// Grid size used when neither a file nor explicit dimensions are given
const DEFAULT_GRID_SIZE: usize = 30;

pub struct Args {
    matches: getopts::Matches,
}

impl Args {
    fn new<T: AsRef<str>>(args: &[T]) -> anyhow::Result<Option<Self>> {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optflag("c", "console", "run in console mode");
        opts.optflag("t", "threads", "compute generations on all cores");
        opts.optopt("r", "rule", "life-like rule, e.g. b3s23", "NAME");
        opts.optopt("m", "mutation", "cancer mutation chance in [0, 1]", "CHANCE");
        opts.optopt("G", "growth", "cancer growth rate in [1, 8]", "RATE");
        opts.optopt("", "seed", "seed for fills and cancer rules", "SEED");
        opts.optopt("i", "input", "input grid file, or a name under <root>/inputs", "FILE");
        opts.optopt("o", "output", "snapshot file, overrides the derived path", "FILE");
        opts.optopt("", "root", "directory holding the outputs/ tree", "DIR");
        opts.optflag("", "no-output", "do not write snapshots to disk");
        opts.optopt("w", "width", "set grid width", "WIDTH");
        opts.optopt("h", "height", "set grid height", "HEIGHT");
        opts.optopt("f", "fill", "set fill type", "TYPE");
        opts.optopt(
            "s",
            "sleep",
            "the amount of time to sleep between generations",
            "MILLIS",
        );
        opts.optopt("g", "gens", "max number of generations", "COUNT");
        opts.optopt("", "stats", "write stats csv to file", "FILE");

        let matches = opts.parse(args.iter().map(T::as_ref))?;
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: lifelike [options]"));
            Ok(None)
        } else {
            Ok(Some(Self { matches }))
        }
    }
    pub fn from_env() -> anyhow::Result<Option<Self>> {
        let env = std::env::args().collect::<Vec<_>>();
        Self::new(&env[1..])
    }

    fn get<T>(&self, name: &str) -> anyhow::Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.matches
            .opt_get(name)
            .with_context(|| format!("invalid value for --{name}"))
    }

    pub fn console(&self) -> bool {
        self.matches.opt_present("console")
    }
    pub fn multithreading(&self) -> bool {
        self.matches.opt_present("threads")
    }

    /// Builds the rule set; any cancer parameter selects the cancer variant
    pub fn rules(&self) -> anyhow::Result<RuleSet> {
        let spec = match self.matches.opt_str("rule") {
            Some(name) => name.parse::<RuleSpec>()?,
            None => RuleSpec::conway(),
        };
        let mutation = self.get::<f64>("mutation")?;
        let growth = self.get::<u8>("growth")?;
        if mutation.is_none() && growth.is_none() {
            return Ok(RuleSet::standard(spec));
        }
        Ok(RuleSet::cancer(
            spec,
            mutation.unwrap_or(0.0),
            growth.unwrap_or(1),
        )?)
    }

    pub fn seed(&self) -> anyhow::Result<Option<u64>> {
        self.get("seed")
    }

    pub fn generations(&self) -> anyhow::Result<u64> {
        Ok(self.get("gens")?.unwrap_or(u64::MAX))
    }
    pub fn sleep(&self) -> anyhow::Result<Option<Duration>> {
        Ok(match self.get("sleep")? {
            Some(millis) => Some(Duration::from_millis(millis)),
            None if self.console() => Some(Duration::from_millis(100)),
            None => None,
        })
    }

    /// Grid size as `(rows, cols)`
    pub fn grid_size(&self) -> anyhow::Result<(usize, usize)> {
        let default = if self.console() {
            let (cols, rows) = crossterm::terminal::size()?;
            // leave room for the footer
            ((rows as usize).saturating_sub(1).max(1), cols as usize)
        } else {
            (DEFAULT_GRID_SIZE, DEFAULT_GRID_SIZE)
        };

        Ok((
            self.get("height")?.unwrap_or(default.0),
            self.get("width")?.unwrap_or(default.1),
        ))
    }
    pub fn fill_mode(&self) -> anyhow::Result<FillMode> {
        let mode_str = self.matches.opt_str("fill");
        mode_str.as_deref().unwrap_or("random").parse()
    }

    /// The grid file to load, if any
    ///
    /// A path that does not exist as given is looked up under `<root>/inputs`.
    pub fn input_path(&self) -> Option<PathBuf> {
        let input = PathBuf::from(self.matches.opt_str("input")?);
        if input.exists() {
            return Some(input);
        }
        Some(self.root().join("inputs").join(input))
    }
    pub fn stats_file(&self) -> Option<String> {
        self.matches.opt_str("stats")
    }

    fn root(&self) -> PathBuf {
        self.matches
            .opt_str("root")
            .or_else(|| std::env::var(ROOT_ENV).ok())
            .unwrap_or_else(|| ".".to_owned())
            .into()
    }

    /// Where snapshots of this run are written, if anywhere
    ///
    /// `<root>/outputs/<rule>/<input>`, with a `<mutation>-<growth>` directory
    /// before the input name for cancer rules.
    pub fn output_path(&self, rules: &RuleSet, input_name: &str) -> Option<PathBuf> {
        if self.matches.opt_present("no-output") {
            return None;
        }
        if let Some(file) = self.matches.opt_str("output") {
            return Some(file.into());
        }

        let mut path = self.root().join("outputs").join(rules.spec().to_string());
        if let RuleSet::Cancer(cancer) = rules {
            path.push(cancer.parameters_name());
        }
        path.push(input_name);
        Some(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    Random,
    Alternating,
    All,
    Empty,
}
impl FromStr for FillMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "random" => Ok(Self::Random),
            "alternating" => Ok(Self::Alternating),
            "all" => Ok(Self::All),
            "empty" => Ok(Self::Empty),
            _ => anyhow::bail!("unknown fill mode {s:?}"),
        }
    }
}
impl fmt::Display for FillMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Random => "random",
            Self::Alternating => "alternating",
            Self::All => "all",
            Self::Empty => "empty",
        };
        f.write_str(name)
    }
}
impl FillMode {
    fn fill_cell<R: rand::Rng>(&self, r: usize, c: usize, rng: &mut R) -> bool {
        match self {
            Self::Random => rng.random_bool(0.5),
            Self::Alternating => (r + c) % 2 == 0,
            Self::All => true,
            Self::Empty => false,
        }
    }
    pub fn create_grid<R: rand::Rng>(
        self,
        rows: usize,
        cols: usize,
        rng: &mut R,
    ) -> lifelike::Result<Grid> {
        let mut grid = Grid::new(rows, cols)?;
        for r in 0..rows {
            for c in 0..cols {
                if self.fill_cell(r, c, rng) {
                    grid.set(r as isize, c as isize, CellState::Alive);
                }
            }
        }
        Ok(grid)
    }
}
