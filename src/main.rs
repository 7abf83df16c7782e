use kiln::cli::{get_args, get_log_level_from_verbose};
use kiln::context::ExecutionContext;
use kiln::error::default_error_handler;
use kiln::generator;

fn main() {
    let args = get_args();

    env_logger::Builder::from_default_env()
        .filter_level(get_log_level_from_verbose(args.verbose))
        .init();

    let ctx = ExecutionContext::production();
    if let Err(err) = generator::run(args, &ctx) {
        default_error_handler(err);
    }
}
