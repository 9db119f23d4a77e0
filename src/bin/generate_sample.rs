use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use log::info;
use parquet::arrow::ArrowWriter;

use scout_board::data::model::{CellValue, Dataset, Record};
use scout_board::export::{export_dataset, ExportFormat};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_u64() % (hi - lo + 1) as u64) as i64
    }
}

const TEAMS: [(&str, &str); 6] = [
    ("CD Leganés", "Primera Nacional"),
    ("Getafe CF", "Primera Nacional"),
    ("AD Alcorcón", "Segunda Federación"),
    ("Rayo Majadahonda", "Segunda Federación"),
    ("CD Móstoles", "Preferente"),
    ("UD Tres Cantos", "Preferente"),
];
const FIRST_NAMES: [&str; 10] = [
    "Ana", "Lucía", "Marta", "Sara", "Paula", "Irene", "Carla", "Noelia", "Laura", "Elena",
];
const SURNAMES: [&str; 8] = [
    "García", "López", "Martín", "Sánchez", "Ruiz", "Díaz", "Moreno", "Romero",
];
const SEASONS: [&str; 2] = ["2023-2024", "2024-2025"];
const SQUAD_SIZE: usize = 12;
const SEASON_MATCHES: i64 = 26;

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    // One row per player and season; players keep their name and team across seasons.
    let mut names: Vec<String> = Vec::new();
    let mut teams: Vec<&str> = Vec::new();
    let mut leagues: Vec<&str> = Vec::new();
    let mut ages: Vec<i64> = Vec::new();
    let mut matches: Vec<i64> = Vec::new();
    let mut starts: Vec<i64> = Vec::new();
    let mut goals: Vec<i64> = Vec::new();
    let mut seasons: Vec<&str> = Vec::new();

    for (t, &(team, league)) in TEAMS.iter().enumerate() {
        for p in 0..SQUAD_SIZE {
            let idx = t * SQUAD_SIZE + p;
            let name = format!(
                "{} {}",
                FIRST_NAMES[idx % FIRST_NAMES.len()],
                SURNAMES[(idx / FIRST_NAMES.len()) % SURNAMES.len()]
            );
            let base_age = rng.range(16, 30);
            for (s, &season) in SEASONS.iter().enumerate() {
                let pj = rng.range(0, SEASON_MATCHES);
                let titular = rng.range(0, pj);
                let scored = if pj == 0 { 0 } else { rng.range(0, pj / 2) };

                names.push(name.clone());
                teams.push(team);
                leagues.push(league);
                ages.push(base_age + s as i64);
                matches.push(pj);
                starts.push(titular);
                goals.push(scored);
                seasons.push(season);
            }
        }
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("Nombre", DataType::Utf8, false),
        Field::new("Equipo", DataType::Utf8, false),
        Field::new("Edad", DataType::Int64, false),
        Field::new("PJ", DataType::Int64, false),
        Field::new("Titular", DataType::Int64, false),
        Field::new("Goles", DataType::Int64, false),
        Field::new("Temporada", DataType::Utf8, false),
        Field::new("Liga", DataType::Utf8, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(names.iter().map(|s| s.as_str()).collect::<Vec<_>>())),
        Arc::new(StringArray::from(teams)),
        Arc::new(Int64Array::from(ages)),
        Arc::new(Int64Array::from(matches)),
        Arc::new(Int64Array::from(starts)),
        Arc::new(Int64Array::from(goals)),
        Arc::new(StringArray::from(seasons)),
        Arc::new(StringArray::from(leagues)),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let rows = batch.num_rows();

    std::fs::create_dir_all("data").context("creating data/")?;

    let parquet_path = Path::new("data/jugadoras.parquet");
    let file = std::fs::File::create(parquet_path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    info!("Wrote {rows} rows to {}", parquet_path.display());

    // Same table as CSV via the loader round trip, plus the badge table.
    let players = scout_board::data::loader::load_file(parquet_path)?;
    export_dataset(&players, Path::new("data/jugadoras.csv"), ExportFormat::Csv)?;

    let badges = Dataset::from_records(
        TEAMS
            .iter()
            .map(|(team, _)| {
                let slug: String = team
                    .to_lowercase()
                    .chars()
                    .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
                    .collect();
                let url = format!("https://example.org/escudos/{slug}.png");
                Record::new()
                    .with("Equipo", *team)
                    .with("url_escudo", CellValue::String(url))
            })
            .collect(),
    );
    export_dataset(&badges, Path::new("data/escudos.csv"), ExportFormat::Csv)?;

    println!("Wrote {rows} player-seasons to data/jugadoras.parquet and data/jugadoras.csv");
    Ok(())
}
