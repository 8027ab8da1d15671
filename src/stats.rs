use std::time::Instant;

pub trait Recorder {
    type Str: AsRef<str>;

    fn record(&mut self, generation: u64, population: usize);

    fn has_report(&self) -> bool;
    fn report(&mut self) -> Self::Str;
}

pub struct SimpleRecord {
    generation: u64,
    population: usize,
    gens_in_report: usize,
    last_report: Instant,
}
impl SimpleRecord {
    pub fn new(generation: u64, population: usize) -> Self {
        Self {
            generation,
            population,
            gens_in_report: 0,
            last_report: Instant::now(),
        }
    }
}
impl Recorder for SimpleRecord {
    type Str = String;

    fn record(&mut self, generation: u64, population: usize) {
        self.generation = generation;
        self.gens_in_report += 1;
        self.population = population;
    }

    fn has_report(&self) -> bool {
        self.last_report.elapsed().as_millis() >= 500
    }
    fn report(&mut self) -> Self::Str {
        let gens_per_sec = self.gens_in_report as f64 / self.last_report.elapsed().as_secs_f64();
        // reset stats for next report
        self.last_report = Instant::now();
        self.gens_in_report = 0;

        format!(
            "{:.02}gen/s gen:{}, pop:{}",
            gens_per_sec, self.generation, self.population
        )
    }
}

pub struct CsvRecord {
    inner: SimpleRecord,
    data: Vec<(u64, u128, usize)>,
    last: Instant,
}
impl CsvRecord {
    pub fn new(generation: u64, population: usize) -> Self {
        Self {
            inner: SimpleRecord::new(generation, population),
            data: vec![(generation, 0, population)],
            last: Instant::now(),
        }
    }

    fn write_csv<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        out.write_all(b"gen,delta_t,population\n")?;
        for (generation, delta, population) in &self.data {
            writeln!(out, "{},{},{}", generation, delta, population)?;
        }
        out.flush()
    }

    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(std::io::BufWriter::new(file))
    }
}
impl Recorder for CsvRecord {
    type Str = <SimpleRecord as Recorder>::Str;

    fn record(&mut self, generation: u64, population: usize) {
        let delta = self.last.elapsed().as_micros();
        self.last = Instant::now();

        self.data.push((generation, delta, population));
        self.inner.record(generation, population);
    }

    fn has_report(&self) -> bool {
        self.inner.has_report()
    }
    fn report(&mut self) -> Self::Str {
        self.inner.report()
    }
}

pub enum SwitchRecorder {
    Csv(CsvRecord),
    Simple(SimpleRecord),
}
impl SwitchRecorder {
    pub fn new(generation: u64, population: usize, csv: bool) -> Self {
        if csv {
            Self::Csv(CsvRecord::new(generation, population))
        } else {
            Self::Simple(SimpleRecord::new(generation, population))
        }
    }
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        match self {
            Self::Csv(r) => r.save(path),
            Self::Simple(_) => Err(std::io::Error::other(
                "statistics are only kept by the csv recorder",
            )),
        }
    }
}
impl Recorder for SwitchRecorder {
    type Str = String;

    fn record(&mut self, generation: u64, population: usize) {
        match self {
            Self::Csv(r) => r.record(generation, population),
            Self::Simple(r) => r.record(generation, population),
        }
    }
    fn has_report(&self) -> bool {
        match self {
            Self::Csv(r) => r.has_report(),
            Self::Simple(r) => r.has_report(),
        }
    }
    fn report(&mut self) -> Self::Str {
        match self {
            Self::Csv(r) => r.report(),
            Self::Simple(r) => r.report(),
        }
    }
}
