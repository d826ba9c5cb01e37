use fortune_wheel::{Canvas, Point, Scene, SpinState, WheelConfig, WheelEngine};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let labels = ["Alice 1", "Bob 2", "Carol 3", "Dave 4", "Erin 5"];
    let config = WheelConfig::builder().build();
    let mut rng = StdRng::seed_from_u64(2024);

    let (width, height) = (400usize, 400usize);
    let mut wheel = WheelEngine::new(Point::new(200.0, 200.0), 190.0, labels, &config, &mut rng)
        .map_err(|report| format!("{report:?}"))?;

    // The winner is known before a single frame is animated.
    let winner = wheel.spin(&mut rng).map_err(|report| format!("{report:?}"))?;
    println!("predicted winner: {winner}");

    let mut frame = vec![0u8; width * height * 4];
    let mut ticks = 0;
    while wheel.state() != SpinState::Highlighting {
        wheel.advance();
        ticks += 1;

        let mut scene = Scene::new();
        wheel.draw(&mut scene);
        scene.replay(&mut Canvas::new(&mut frame, width, height));
    }

    println!(
        "wheel stopped after {ticks} ticks on {:?} (sector {:?})",
        wheel.result(),
        wheel.final_sector_index()
    );
    Ok(())
}
