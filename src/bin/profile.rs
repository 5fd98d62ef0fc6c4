use amazeing::{app::App, generators::Generator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10)
        .max(1);

    let size = u8::MAX as u16;
    for generator in Generator::ALL {
        let elapsed = App::profile(size, size, generator, false, num_iters)?;
        println!(
            "{generator}: {num_iters} mazes of {size}x{size} in {:?} ({:?} per maze)",
            elapsed,
            elapsed / num_iters as u32
        );
    }
    Ok(())
}
