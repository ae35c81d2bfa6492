fn main() {
    if let Err(err) = swapmatch::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
