use stackforge::{
    cli::{get_args, get_log_level_from_verbose, run},
    constants::exit_codes,
    error::default_error_handler,
};

fn main() {
    // Interrupting a prompt is a normal way to back out of the setup.
    ctrlc::set_handler(|| {
        // Prompts hide the cursor while they are active.
        let _ = console::Term::stderr().show_cursor();
        eprintln!("\nSetup cancelled.");
        std::process::exit(exit_codes::SUCCESS);
    })
    .ok();

    let args = get_args();
    let lvl = get_log_level_from_verbose(args.verbose);
    env_logger::Builder::new().filter_level(lvl).init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}
