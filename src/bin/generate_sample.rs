use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use football_health_dashboard::config::DEFAULT_DATA_FILE;
use football_health_dashboard::data::views::serialize_csv;
use football_health_dashboard::{Clearance, ComplianceStatus, PlayerRecord};

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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[lo, hi)`, rounded to one decimal.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        ((lo + (hi - lo) * self.next_f64()) * 10.0).round() / 10.0
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

#[derive(Parser)]
#[command(name = "generate_sample")]
#[command(about = "Write a deterministic sample player health dataset")]
struct Cli {
    /// Output CSV file
    #[arg(short, long, default_value = DEFAULT_DATA_FILE)]
    output: PathBuf,

    /// Number of players
    #[arg(short, long, default_value_t = 40)]
    players: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const FIRST_NAMES: [&str; 12] = [
    "Luca", "Mateo", "Noah", "Kai", "Andre", "Yusuf", "Diego", "Tomas", "Idris", "Jonas", "Rafael",
    "Emil",
];
const LAST_NAMES: [&str; 12] = [
    "Silva", "Okafor", "Berg", "Moreau", "Kowalski", "Haddad", "Romero", "Novak", "Jensen",
    "Costa", "Mensah", "Fischer",
];
const POSITIONS: [&str; 4] = ["Goalkeeper", "Defender", "Midfielder", "Forward"];

fn generate_player(index: usize, rng: &mut SimpleRng) -> PlayerRecord {
    let injury_risk = rng.uniform(5.0, 95.0);
    let training_load = rng.uniform(300.0, 900.0);
    // Heavy load and high risk both drag recovery down.
    let recovery_score =
        (100.0 - 0.04 * training_load - 0.3 * injury_risk + rng.uniform(0.0, 20.0)).clamp(0.0, 100.0);
    let recovery_score = (recovery_score * 10.0).round() / 10.0;

    let cleared_for_play = if injury_risk > 80.0 || rng.chance(0.15) {
        Clearance::No
    } else {
        Clearance::Yes
    };
    let compliance_status = if rng.chance(0.25) {
        ComplianceStatus::NonCompliant
    } else {
        ComplianceStatus::Compliant
    };

    PlayerRecord {
        player_name: format!(
            "{} {} {}",
            rng.pick(&FIRST_NAMES),
            rng.pick(&LAST_NAMES),
            index + 1
        ),
        position: rng.pick(&POSITIONS).to_string(),
        injury_risk,
        recovery_score,
        training_load,
        cleared_for_play,
        compliance_status,
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut rng = SimpleRng::new(cli.seed);
    let players: Vec<PlayerRecord> = (0..cli.players)
        .map(|i| generate_player(i, &mut rng))
        .collect();

    let bytes = serialize_csv(&players).context("serialising sample players")?;
    std::fs::write(&cli.output, bytes)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    log::info!("Wrote {} players to {}", players.len(), cli.output.display());
    Ok(())
}
