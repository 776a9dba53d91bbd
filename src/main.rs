fn main() {
    if let Err(e) = graffiti_decoder::cli::run() {
        eprintln!("graffiti-decoder: {}", e);
        std::process::exit(1);
    }
}
