use setgame_cli::logging::init_logging;

fn main() {
    init_logging();
    let mut out = std::io::stdout();
    let mut err = std::io::stderr();
    let code = setgame_cli::run(std::env::args(), &mut out, &mut err);
    std::process::exit(code);
}
