fn main() {
    if let Err(e) = fanls_cli::run() {
        eprintln!("fanls: {e}");
        std::process::exit(1);
    }
}
