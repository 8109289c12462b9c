use chrono::{DateTime, Duration, Utc};

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Uniform value in [lo, hi).
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }
}

struct Region {
    descriptor: &'static str,
    short_place: &'static str,
    latitude: f64,
    longitude: f64,
}

fn main() {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    let regions = [
        Region { descriptor: "10 km N of Reno", short_place: "Nevada", latitude: 39.6, longitude: -119.8 },
        Region { descriptor: "7 km NW of The Geysers", short_place: "CA", latitude: 38.8, longitude: -122.8 },
        Region { descriptor: "52 km SE of Denali Park", short_place: "Alaska", latitude: 63.3, longitude: -150.5 },
        Region { descriptor: "101 km ESE of Kimbe", short_place: "Papua New Guinea", latitude: -5.8, longitude: 151.0 },
        Region { descriptor: "South of the Fiji Islands", short_place: "Fiji region", latitude: -24.9, longitude: 179.5 },
    ];
    let event_types = ["earthquake", "earthquake", "earthquake", "quarry blast", "ice quake"];

    let month_start: DateTime<Utc> = "2024-05-01T00:00:00Z".parse().expect("start timestamp");
    let n_events = 500;

    let output_path = "sample_quakes.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record(["id", "time", "latitude", "longitude", "depth", "mag", "place", "type"])
        .expect("Failed to write header");

    for i in 0..n_events {
        let region = rng.pick(&regions);
        let event_type = *rng.pick(&event_types);

        let time = month_start + Duration::seconds((rng.next_f64() * 31.0 * 86_400.0) as i64);
        let latitude = region.latitude + rng.range(-0.5, 0.5);
        let longitude = region.longitude + rng.range(-0.5, 0.5);
        // Shallow events dominate; depth occasionally sits above the datum.
        let depth = rng.range(-2.0, 40.0).max(rng.range(-2.0, 40.0) * 0.3);
        let magnitude = rng.range(0.1, 7.5) * rng.next_f64();
        let place = format!("{}, {}", region.descriptor, region.short_place);

        writer
            .write_record([
                format!("qk{i:05}"),
                time.to_rfc3339(),
                format!("{latitude:.4}"),
                format!("{longitude:.4}"),
                format!("{depth:.2}"),
                format!("{magnitude:.2}"),
                place,
                event_type.to_string(),
            ])
            .expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {n_events} events to {output_path}");
}
