fn main() {
    if let Err(e) = classmap_cli::run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
