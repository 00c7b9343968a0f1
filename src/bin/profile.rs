use mazeroute::{bench, logging};

fn main() -> mazeroute::Result<()> {
    let _guard = logging::init_tracing(None)?;

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(100);

    bench::profile(num_iters)?;
    Ok(())
}
