fn main() {
    if let Err(err) = lil_lex::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
