use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use realmgen::{Cube, GenerationParams, Weights, generate_continents};
use std::path::PathBuf;

/// Генератор территорий для Chronicles of Realms
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Путь к конфигурационному файлу в формате TOML
    #[arg(short, long)]
    config: PathBuf,

    /// Радиус гексагонального домена в клетках
    #[arg(short, long, default_value_t = 24)]
    radius: i32,

    /// Путь для сохранения continents.json (по умолчанию: ./continents.json)
    #[arg(short, long, default_value = "continents.json")]
    output: PathBuf,
}

/// Гексагональный диск со случайными весами прохождения 1..=4.
fn demo_domain<R: Rng>(radius: i32, rng: &mut R) -> Weights {
    let mut weights = Weights::new();
    for x in -radius..=radius {
        for y in (-radius).max(-x - radius)..=radius.min(-x + radius) {
            weights.insert(Cube::new(x, y, -x - y), rng.gen_range(1..=4));
        }
    }
    weights
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    println!("Загрузка конфигурации...");
    let params = GenerationParams::from_toml_file(cli.config.to_str().unwrap())?;

    let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
    let weights = demo_domain(cli.radius, &mut rng);
    println!(
        "Генерация {} континентов на домене из {} клеток...",
        params.continents.len(),
        weights.len()
    );
    let continents = generate_continents(&weights, &params, &mut rng)?;

    for (i, continent) in continents.iter().enumerate() {
        println!(
            "Континент {}: {} королевств, {} провинций, {} клеток",
            i + 1,
            continent.kingdoms.len(),
            continent.cube_from_pid().len(),
            continent.total_cubes()
        );
    }

    println!("Сохранение в {:?}", cli.output);
    let file = std::fs::File::create(&cli.output)?;
    serde_json::to_writer_pretty(file, &continents)?;

    println!("\nГотово! Континенты сохранены.");
    Ok(())
}
