//! Deterministic sample-data generator for demos and manual testing.
//! Writes `sample_data.csv` with two numerical and two categorical columns.

use serde::Serialize;

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

#[derive(Serialize)]
struct SampleRow {
    height: f64,
    weight: f64,
    sex: &'static str,
    region: &'static str,
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let regions = ["east", "north", "south"];

    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    let n_rows = 300;
    for _ in 0..n_rows {
        let sex = if rng.next_u64() % 2 == 0 { "F" } else { "M" };
        let region = regions[(rng.next_u64() % regions.len() as u64) as usize];

        let (mu_height, mu_weight) = match sex {
            "F" => (1.65, 68.0),
            _ => (1.78, 81.0),
        };
        // Small per-region shift so the facets differ visibly.
        let region_shift = match region {
            "east" => -2.0,
            "north" => 0.0,
            _ => 2.5,
        };

        let height = rng.gauss(mu_height, 0.07);
        let weight = rng.gauss(mu_weight + region_shift, 9.0).max(35.0);

        writer
            .serialize(SampleRow {
                height: (height * 100.0).round() / 100.0,
                weight: (weight * 10.0).round() / 10.0,
                sex,
                region,
            })
            .expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush output file");
    println!("Wrote {n_rows} rows to {output_path}");
}
