fn main() {
    if let Err(e) = dxgraph_lib::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
